use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{RecordStatus, RecordType};

/// Metadata for one medical document, owned by a patient and attributed
/// to a doctor (the two may be the same user).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicalRecord {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub record_type: RecordType,
    pub file_name: Option<String>,
    pub file_size: Option<i64>,
    /// Content-hash placeholder; no file store is wired up in this layer.
    pub content_hash: Option<String>,
    pub status: RecordStatus,
    pub created_at: NaiveDateTime,
}

/// A medical record joined with patient and doctor profile fields.
#[derive(Debug, Clone, Serialize)]
pub struct MedicalRecordView {
    #[serde(flatten)]
    pub record: MedicalRecord,
    pub patient_name: String,
    pub patient_email: String,
    pub doctor_name: String,
    pub doctor_specialization: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_flattens_and_expands() {
        let view = MedicalRecordView {
            record: MedicalRecord {
                id: Uuid::new_v4(),
                patient_id: Uuid::new_v4(),
                doctor_id: Uuid::new_v4(),
                title: "CBC panel".into(),
                description: None,
                record_type: RecordType::LabResults,
                file_name: Some("cbc.pdf".into()),
                file_size: Some(52_113),
                content_hash: None,
                status: RecordStatus::Verified,
                created_at: NaiveDateTime::default(),
            },
            patient_name: "Carol".into(),
            patient_email: "carol@example.com".into(),
            doctor_name: "Dr. Osei".into(),
            doctor_specialization: Some("Hematology".into()),
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["title"], "CBC panel");
        assert_eq!(json["record_type"], "lab_results");
        assert_eq!(json["status"], "verified");
        assert_eq!(json["doctor_specialization"], "Hematology");
    }
}
