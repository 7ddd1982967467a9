//! Anemia screening endpoints.
//!
//! `POST /anemia-detection` takes a multipart form (image, analysis_type,
//! patient_id), runs the configured screener, stores the analysis, and
//! returns it with follow-up recommendations.

use axum::extract::{Multipart, Query, State};
use axum::Json;
use base64::Engine;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::endpoints::health_records::parse_patient_id;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository;
use crate::models::{AnalysisType, AnemiaAnalysis, AnemiaAnalysisView};
use crate::screening::{self, AnemiaScreener};

/// Stored image previews keep only the head of the base64 payload.
const PREVIEW_LEN: usize = 64;

#[derive(Debug, Deserialize)]
pub struct AnalysesQuery {
    pub patient_id: Option<String>,
}

#[derive(Serialize)]
pub struct AnalysisListResponse {
    pub success: bool,
    pub analyses: Vec<AnemiaAnalysisView>,
}

/// `GET /anemia-detection` — stored screenings, newest first, patient
/// expanded. Without `?patient_id=` the full collection is returned.
pub async fn list(
    State(ctx): State<ApiContext>,
    Query(query): Query<AnalysesQuery>,
) -> Result<Json<AnalysisListResponse>, ApiError> {
    let conn = ctx.conn()?;
    let analyses = match query.patient_id.as_deref() {
        Some(raw) => {
            let patient_id = parse_patient_id(raw)?;
            repository::list_anemia_analyses_for_patient(&conn, &patient_id)?
        }
        None => repository::list_all_anemia_analyses(&conn)?,
    };
    Ok(Json(AnalysisListResponse {
        success: true,
        analyses,
    }))
}

#[derive(Serialize)]
pub struct CreateAnalysisResponse {
    pub success: bool,
    pub analysis: AnemiaAnalysis,
    pub recommendations: Vec<&'static str>,
}

/// `POST /anemia-detection` — multipart screening submission.
pub async fn create(
    State(ctx): State<ApiContext>,
    mut multipart: Multipart,
) -> Result<Json<CreateAnalysisResponse>, ApiError> {
    let mut image: Option<Vec<u8>> = None;
    let mut analysis_type: Option<String> = None;
    let mut patient_id: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(format!("Malformed multipart body: {e}")))?
    {
        match field.name().unwrap_or_default() {
            "image" => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::Validation(format!("Unreadable image field: {e}")))?;
                image = Some(bytes.to_vec());
            }
            "analysis_type" => {
                analysis_type = field.text().await.ok();
            }
            "patient_id" => {
                patient_id = field.text().await.ok();
            }
            _ => {}
        }
    }

    let mut missing = Vec::new();
    if patient_id.as_deref().unwrap_or("").is_empty() {
        missing.push("patient_id");
    }
    if analysis_type.as_deref().unwrap_or("").is_empty() {
        missing.push("analysis_type");
    }
    if !missing.is_empty() {
        return Err(ApiError::missing_fields(&missing));
    }

    let image = match image {
        Some(bytes) if !bytes.is_empty() => bytes,
        _ => return Err(ApiError::Validation("No image file provided".into())),
    };

    let patient_id = parse_patient_id(patient_id.as_deref().unwrap_or_default())?;
    let analysis_type: AnalysisType = analysis_type.as_deref().unwrap_or_default().parse()?;

    let result = ctx.screener.predict(&image, analysis_type);

    let mut preview = base64::engine::general_purpose::STANDARD.encode(&image);
    preview.truncate(PREVIEW_LEN);

    let analysis = AnemiaAnalysis {
        id: Uuid::new_v4(),
        patient_id,
        analysis_type,
        prediction: result.prediction,
        confidence: result.confidence,
        roi_detected: result.roi_detected,
        image_preview: Some(preview),
        created_at: Utc::now().naive_utc(),
    };

    let conn = ctx.conn()?;
    repository::insert_anemia_analysis(&conn, &analysis)?;
    tracing::info!(
        patient = %patient_id,
        kind = analysis_type.as_str(),
        prediction = analysis.prediction.as_str(),
        "Anemia screening stored"
    );

    let recommendations = screening::recommendations(analysis.prediction).to_vec();

    Ok(Json(CreateAnalysisResponse {
        success: true,
        analysis,
        recommendations,
    }))
}
