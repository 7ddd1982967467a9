//! Health-record endpoints — vitals entries per patient.

use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository;
use crate::emergency::{self, EmergencyCheck};
use crate::models::{parse_blood_pressure, HealthRecord, HealthRecordView};

#[derive(Debug, Deserialize)]
pub struct RecordsQuery {
    pub patient_id: Option<String>,
}

#[derive(Serialize)]
pub struct HealthRecordListResponse {
    pub success: bool,
    pub records: Vec<HealthRecordView>,
}

pub(crate) fn parse_patient_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::Validation(format!("Invalid patient_id: {raw}")))
}

/// `GET /health-records` — newest first. Without `?patient_id=` the
/// full unfiltered collection is returned; scoping is the caller's job.
pub async fn list(
    State(ctx): State<ApiContext>,
    Query(query): Query<RecordsQuery>,
) -> Result<Json<HealthRecordListResponse>, ApiError> {
    let conn = ctx.conn()?;
    let records = match query.patient_id.as_deref() {
        Some(raw) => {
            let patient_id = parse_patient_id(raw)?;
            repository::list_health_records_for_patient(&conn, &patient_id)?
        }
        None => repository::list_all_health_records(&conn)?,
    };
    Ok(Json(HealthRecordListResponse {
        success: true,
        records,
    }))
}

#[derive(Debug, Deserialize)]
pub struct CreateHealthRecordRequest {
    pub patient_id: Option<String>,
    pub heart_rate: Option<i32>,
    pub blood_pressure: Option<String>,
    pub temperature: Option<f64>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
}

#[derive(Serialize)]
pub struct CreateHealthRecordResponse {
    pub success: bool,
    pub record: HealthRecord,
    pub emergency: EmergencyCheck,
}

/// `POST /health-records` — store a vitals entry. Only the owning
/// patient reference is required; partial vitals are valid. The stored
/// record is screened for emergency conditions and the result returned
/// alongside it.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(req): Json<CreateHealthRecordRequest>,
) -> Result<Json<CreateHealthRecordResponse>, ApiError> {
    let patient_id = match req.patient_id.as_deref() {
        Some(raw) if !raw.is_empty() => parse_patient_id(raw)?,
        _ => return Err(ApiError::missing_fields(&["patient_id"])),
    };

    validate_vitals(&req)?;

    let record = HealthRecord {
        id: Uuid::new_v4(),
        patient_id,
        heart_rate: req.heart_rate,
        blood_pressure: req.blood_pressure,
        temperature: req.temperature,
        weight: req.weight,
        height: req.height,
        recorded_at: Utc::now().naive_utc(),
    };

    let emergency = emergency::check_emergency_conditions(&record);
    if emergency.is_emergency {
        tracing::warn!(
            patient = %patient_id,
            score = emergency.severity_score,
            "Emergency vitals recorded"
        );
    }

    let conn = ctx.conn()?;
    repository::insert_health_record(&conn, &record)?;

    Ok(Json(CreateHealthRecordResponse {
        success: true,
        record,
        emergency,
    }))
}

/// Reject physiologically impossible vitals before they reach the store.
/// Temperature is degrees Celsius.
fn validate_vitals(req: &CreateHealthRecordRequest) -> Result<(), ApiError> {
    if let Some(hr) = req.heart_rate {
        if !(30..=200).contains(&hr) {
            return Err(ApiError::Validation(format!(
                "heart_rate out of range: {hr}"
            )));
        }
    }
    if let Some(bp) = req.blood_pressure.as_deref() {
        let (sys, dia) = parse_blood_pressure(bp).ok_or_else(|| {
            ApiError::Validation(format!("blood_pressure must be \"SYS/DIA\": {bp}"))
        })?;
        if !(70..=250).contains(&sys) {
            return Err(ApiError::Validation(format!(
                "blood_pressure systolic out of range: {sys}"
            )));
        }
        if !(40..=150).contains(&dia) {
            return Err(ApiError::Validation(format!(
                "blood_pressure diastolic out of range: {dia}"
            )));
        }
    }
    if let Some(temp) = req.temperature {
        if !(30.0..=45.0).contains(&temp) {
            return Err(ApiError::Validation(format!(
                "temperature out of range: {temp}"
            )));
        }
    }
    if let Some(weight) = req.weight {
        if !(10.0..=500.0).contains(&weight) {
            return Err(ApiError::Validation(format!(
                "weight out of range: {weight}"
            )));
        }
    }
    if let Some(height) = req.height {
        if !(50.0..=250.0).contains(&height) {
            return Err(ApiError::Validation(format!(
                "height out of range: {height}"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_request() -> CreateHealthRecordRequest {
        CreateHealthRecordRequest {
            patient_id: None,
            heart_rate: None,
            blood_pressure: None,
            temperature: None,
            weight: None,
            height: None,
        }
    }

    #[test]
    fn empty_vitals_pass_validation() {
        assert!(validate_vitals(&empty_request()).is_ok());
    }

    #[test]
    fn heart_rate_limits() {
        let mut req = empty_request();
        req.heart_rate = Some(30);
        assert!(validate_vitals(&req).is_ok());
        req.heart_rate = Some(200);
        assert!(validate_vitals(&req).is_ok());
        req.heart_rate = Some(29);
        assert!(validate_vitals(&req).is_err());
        req.heart_rate = Some(201);
        assert!(validate_vitals(&req).is_err());
    }

    #[test]
    fn blood_pressure_must_parse() {
        let mut req = empty_request();
        req.blood_pressure = Some("120/80".into());
        assert!(validate_vitals(&req).is_ok());
        req.blood_pressure = Some("onetwenty".into());
        assert!(validate_vitals(&req).is_err());
    }

    #[test]
    fn blood_pressure_component_ranges() {
        let mut req = empty_request();
        req.blood_pressure = Some("260/80".into());
        assert!(validate_vitals(&req).is_err());
        req.blood_pressure = Some("120/30".into());
        assert!(validate_vitals(&req).is_err());
    }

    #[test]
    fn temperature_is_celsius_banded() {
        let mut req = empty_request();
        req.temperature = Some(36.8);
        assert!(validate_vitals(&req).is_ok());
        // A Fahrenheit reading must be rejected, not silently accepted
        req.temperature = Some(98.6);
        assert!(validate_vitals(&req).is_err());
    }

    #[test]
    fn weight_and_height_ranges() {
        let mut req = empty_request();
        req.weight = Some(9.9);
        assert!(validate_vitals(&req).is_err());
        req.weight = Some(72.0);
        req.height = Some(300.0);
        assert!(validate_vitals(&req).is_err());
    }
}
