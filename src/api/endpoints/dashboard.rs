//! Patient dashboard endpoint — assembles the derived views (health
//! score, latest vitals, status badges) from the patient's collections.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::api::endpoints::health_records::parse_patient_id;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::dashboard::{self, DashboardSummary};
use crate::db::repository;

#[derive(Serialize)]
pub struct DashboardResponse {
    pub success: bool,
    pub dashboard: DashboardSummary,
}

/// `GET /patients/:patient_id/dashboard`
pub async fn show(
    State(ctx): State<ApiContext>,
    Path(patient_id): Path<String>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let patient_id = parse_patient_id(&patient_id)?;
    let conn = ctx.conn()?;

    let patient = repository::get_user_by_id(&conn, &patient_id)?
        .ok_or_else(|| ApiError::NotFound("Patient not found".into()))?;

    let health_records = repository::list_health_records_for_patient(&conn, &patient_id)?;
    let medical_records = repository::list_medical_records_for_patient(&conn, &patient_id)?;
    let analyses = repository::list_anemia_analyses_for_patient(&conn, &patient_id)?;

    let dashboard =
        dashboard::build_dashboard(patient, health_records, medical_records, analyses);

    Ok(Json(DashboardResponse {
        success: true,
        dashboard,
    }))
}
