//! Medical-record endpoints — document metadata per patient and doctor.

use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::endpoints::health_records::parse_patient_id;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository;
use crate::models::{MedicalRecord, MedicalRecordView, RecordStatus, RecordType};

#[derive(Debug, Deserialize)]
pub struct RecordsQuery {
    pub patient_id: Option<String>,
}

#[derive(Serialize)]
pub struct MedicalRecordListResponse {
    pub success: bool,
    pub records: Vec<MedicalRecordView>,
}

/// `GET /medical-records` — newest first, patient and doctor expanded.
/// Without `?patient_id=` the full unfiltered collection is returned.
pub async fn list(
    State(ctx): State<ApiContext>,
    Query(query): Query<RecordsQuery>,
) -> Result<Json<MedicalRecordListResponse>, ApiError> {
    let conn = ctx.conn()?;
    let records = match query.patient_id.as_deref() {
        Some(raw) => {
            let patient_id = parse_patient_id(raw)?;
            repository::list_medical_records_for_patient(&conn, &patient_id)?
        }
        None => repository::list_all_medical_records(&conn)?,
    };
    Ok(Json(MedicalRecordListResponse {
        success: true,
        records,
    }))
}

#[derive(Debug, Deserialize)]
pub struct CreateMedicalRecordRequest {
    pub patient_id: Option<String>,
    /// Defaults to the patient when absent (self-uploaded records).
    pub doctor_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub record_type: Option<String>,
    pub file_name: Option<String>,
    pub file_size: Option<i64>,
    pub content_hash: Option<String>,
    pub status: Option<String>,
}

#[derive(Serialize)]
pub struct CreateMedicalRecordResponse {
    pub success: bool,
    pub record: MedicalRecord,
}

/// `POST /medical-records` — store document metadata. Requires
/// patient_id, title and record_type; a missing-field response names
/// every absent one and nothing is written.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(req): Json<CreateMedicalRecordRequest>,
) -> Result<Json<CreateMedicalRecordResponse>, ApiError> {
    let mut missing = Vec::new();
    if req.patient_id.as_deref().unwrap_or("").is_empty() {
        missing.push("patient_id");
    }
    if req.title.as_deref().unwrap_or("").is_empty() {
        missing.push("title");
    }
    if req.record_type.as_deref().unwrap_or("").is_empty() {
        missing.push("record_type");
    }
    if !missing.is_empty() {
        return Err(ApiError::missing_fields(&missing));
    }

    let patient_id = parse_patient_id(req.patient_id.as_deref().unwrap_or_default())?;
    let doctor_id = match req.doctor_id.as_deref() {
        Some(raw) if !raw.is_empty() => Uuid::parse_str(raw)
            .map_err(|_| ApiError::Validation(format!("Invalid doctor_id: {raw}")))?,
        _ => patient_id,
    };
    let record_type: RecordType = req.record_type.as_deref().unwrap_or_default().parse()?;
    let status: RecordStatus = match req.status.as_deref() {
        Some(raw) if !raw.is_empty() => raw.parse()?,
        _ => RecordStatus::Verified,
    };

    let record = MedicalRecord {
        id: Uuid::new_v4(),
        patient_id,
        doctor_id,
        title: req.title.unwrap_or_default(),
        description: req.description,
        record_type,
        file_name: req.file_name,
        file_size: req.file_size,
        content_hash: req.content_hash,
        status,
        created_at: Utc::now().naive_utc(),
    };

    let conn = ctx.conn()?;
    repository::insert_medical_record(&conn, &record)?;
    tracing::info!(record = %record.id, patient = %patient_id, "Medical record stored");

    Ok(Json(CreateMedicalRecordResponse {
        success: true,
        record,
    }))
}
