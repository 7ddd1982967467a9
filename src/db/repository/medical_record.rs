use rusqlite::{params, Connection};
use uuid::Uuid;

use super::{format_ts, parse_ts, parse_uuid};
use crate::db::DatabaseError;
use crate::models::{MedicalRecord, MedicalRecordView};

/// Insert a medical-record metadata row.
pub fn insert_medical_record(
    conn: &Connection,
    record: &MedicalRecord,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO medical_records (id, patient_id, doctor_id, title, description,
         record_type, file_name, file_size, content_hash, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            record.id.to_string(),
            record.patient_id.to_string(),
            record.doctor_id.to_string(),
            record.title,
            record.description,
            record.record_type.as_str(),
            record.file_name,
            record.file_size,
            record.content_hash,
            record.status.as_str(),
            format_ts(&record.created_at),
        ],
    )?;
    Ok(())
}

const SELECT_JOINED: &str = "SELECT m.id, m.patient_id, m.doctor_id, m.title, m.description,
         m.record_type, m.file_name, m.file_size, m.content_hash, m.status, m.created_at,
         p.name AS patient_name, p.email AS patient_email,
         d.name AS doctor_name, d.specialization AS doctor_specialization
         FROM medical_records m
         JOIN users p ON m.patient_id = p.id
         JOIN users d ON m.doctor_id = d.id";

/// All medical records for one patient, newest first, with patient and
/// doctor profile fields expanded.
pub fn list_medical_records_for_patient(
    conn: &Connection,
    patient_id: &Uuid,
) -> Result<Vec<MedicalRecordView>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "{SELECT_JOINED} WHERE m.patient_id = ?1 ORDER BY m.created_at DESC"
    ))?;
    let rows = stmt.query_map(params![patient_id.to_string()], row_to_record_row)?;

    let mut records = Vec::new();
    for row in rows {
        records.push(view_from_row(row?)?);
    }
    Ok(records)
}

/// The full medical-record collection, newest first.
pub fn list_all_medical_records(
    conn: &Connection,
) -> Result<Vec<MedicalRecordView>, DatabaseError> {
    let mut stmt = conn.prepare(&format!("{SELECT_JOINED} ORDER BY m.created_at DESC"))?;
    let rows = stmt.query_map([], row_to_record_row)?;

    let mut records = Vec::new();
    for row in rows {
        records.push(view_from_row(row?)?);
    }
    Ok(records)
}

struct RecordRow {
    id: String,
    patient_id: String,
    doctor_id: String,
    title: String,
    description: Option<String>,
    record_type: String,
    file_name: Option<String>,
    file_size: Option<i64>,
    content_hash: Option<String>,
    status: String,
    created_at: String,
    patient_name: String,
    patient_email: String,
    doctor_name: String,
    doctor_specialization: Option<String>,
}

fn row_to_record_row(row: &rusqlite::Row) -> Result<RecordRow, rusqlite::Error> {
    Ok(RecordRow {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        doctor_id: row.get(2)?,
        title: row.get(3)?,
        description: row.get(4)?,
        record_type: row.get(5)?,
        file_name: row.get(6)?,
        file_size: row.get(7)?,
        content_hash: row.get(8)?,
        status: row.get(9)?,
        created_at: row.get(10)?,
        patient_name: row.get(11)?,
        patient_email: row.get(12)?,
        doctor_name: row.get(13)?,
        doctor_specialization: row.get(14)?,
    })
}

fn view_from_row(row: RecordRow) -> Result<MedicalRecordView, DatabaseError> {
    Ok(MedicalRecordView {
        record: MedicalRecord {
            id: parse_uuid(&row.id)?,
            patient_id: parse_uuid(&row.patient_id)?,
            doctor_id: parse_uuid(&row.doctor_id)?,
            title: row.title,
            description: row.description,
            record_type: row.record_type.parse()?,
            file_name: row.file_name,
            file_size: row.file_size,
            content_hash: row.content_hash,
            status: row.status.parse()?,
            created_at: parse_ts(&row.created_at),
        },
        patient_name: row.patient_name,
        patient_email: row.patient_email,
        doctor_name: row.doctor_name,
        doctor_specialization: row.doctor_specialization,
    })
}
