use rusqlite::{params, Connection};
use uuid::Uuid;

use super::{format_ts, parse_ts, parse_uuid};
use crate::db::DatabaseError;
use crate::models::{AnemiaAnalysis, AnemiaAnalysisView, AnemiaPrediction};

/// Insert a stored screening result.
pub fn insert_anemia_analysis(
    conn: &Connection,
    analysis: &AnemiaAnalysis,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO anemia_analyses (id, patient_id, analysis_type, prediction,
         confidence, roi_detected, image_preview, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            analysis.id.to_string(),
            analysis.patient_id.to_string(),
            analysis.analysis_type.as_str(),
            analysis.prediction.as_str(),
            analysis.confidence,
            analysis.roi_detected as i32,
            analysis.image_preview,
            format_ts(&analysis.created_at),
        ],
    )?;
    Ok(())
}

const SELECT_JOINED: &str = "SELECT a.id, a.patient_id, a.analysis_type, a.prediction,
         a.confidence, a.roi_detected, a.image_preview, a.created_at,
         u.name AS patient_name, u.email AS patient_email
         FROM anemia_analyses a
         JOIN users u ON a.patient_id = u.id";

/// All screenings for one patient, newest first, with the owning
/// patient expanded.
pub fn list_anemia_analyses_for_patient(
    conn: &Connection,
    patient_id: &Uuid,
) -> Result<Vec<AnemiaAnalysisView>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "{SELECT_JOINED} WHERE a.patient_id = ?1 ORDER BY a.created_at DESC"
    ))?;
    let rows = stmt.query_map(params![patient_id.to_string()], row_to_analysis_row)?;

    let mut analyses = Vec::new();
    for row in rows {
        analyses.push(view_from_row(row?)?);
    }
    Ok(analyses)
}

/// The full screening collection, newest first.
pub fn list_all_anemia_analyses(
    conn: &Connection,
) -> Result<Vec<AnemiaAnalysisView>, DatabaseError> {
    let mut stmt = conn.prepare(&format!("{SELECT_JOINED} ORDER BY a.created_at DESC"))?;
    let rows = stmt.query_map([], row_to_analysis_row)?;

    let mut analyses = Vec::new();
    for row in rows {
        analyses.push(view_from_row(row?)?);
    }
    Ok(analyses)
}

struct AnalysisRow {
    id: String,
    patient_id: String,
    analysis_type: String,
    prediction: String,
    confidence: f64,
    roi_detected: i32,
    image_preview: Option<String>,
    created_at: String,
    patient_name: String,
    patient_email: String,
}

fn row_to_analysis_row(row: &rusqlite::Row) -> Result<AnalysisRow, rusqlite::Error> {
    Ok(AnalysisRow {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        analysis_type: row.get(2)?,
        prediction: row.get(3)?,
        confidence: row.get(4)?,
        roi_detected: row.get(5)?,
        image_preview: row.get(6)?,
        created_at: row.get(7)?,
        patient_name: row.get(8)?,
        patient_email: row.get(9)?,
    })
}

fn view_from_row(row: AnalysisRow) -> Result<AnemiaAnalysisView, DatabaseError> {
    let prediction =
        AnemiaPrediction::from_str(&row.prediction).ok_or(DatabaseError::InvalidEnum {
            field: "AnemiaPrediction".into(),
            value: row.prediction.clone(),
        })?;
    Ok(AnemiaAnalysisView {
        analysis: AnemiaAnalysis {
            id: parse_uuid(&row.id)?,
            patient_id: parse_uuid(&row.patient_id)?,
            analysis_type: row.analysis_type.parse()?,
            prediction,
            confidence: row.confidence,
            roi_detected: row.roi_detected != 0,
            image_preview: row.image_preview,
            created_at: parse_ts(&row.created_at),
        },
        patient_name: row.patient_name,
        patient_email: row.patient_email,
    })
}
