//! Dashboard aggregation — pure functions over already-fetched record
//! collections: latest vitals, health score, and status badges.
//!
//! Nothing here touches the database. Ordering is a precondition: list
//! inputs are expected newest-first, exactly as the repository returns
//! them, and no re-sorting happens internally.

use serde::Serialize;

use crate::models::{
    AnemiaAnalysisView, AnemiaPrediction, HealthRecord, HealthRecordView, MedicalRecordView, User,
};

/// Baseline score for a patient with no usable signals.
const BASE_SCORE: u32 = 70;
/// Bonus per satisfied signal (heart rate, temperature, screening).
const SIGNAL_BONUS: u32 = 10;
const MAX_SCORE: u32 = 100;

/// The most recent vitals entry, i.e. the head of a newest-first list.
pub fn latest_vitals(records: &[HealthRecordView]) -> Option<&HealthRecordView> {
    records.first()
}

/// Composite wellbeing score in [70, 100].
///
/// Starts at 70 and adds 10 for each of: resting heart rate within
/// 60–100 bpm, temperature within 36.0–37.5 °C, and at least one
/// screening that came back Non-Anemic. Additive only, clamped at 100.
pub fn health_score(latest: Option<&HealthRecord>, analyses: &[AnemiaAnalysisView]) -> u32 {
    let mut score = BASE_SCORE;

    if let Some(vitals) = latest {
        if let Some(hr) = vitals.heart_rate {
            if (60..=100).contains(&hr) {
                score += SIGNAL_BONUS;
            }
        }
        if let Some(temp) = vitals.temperature {
            if (36.0..=37.5).contains(&temp) {
                score += SIGNAL_BONUS;
            }
        }
    }

    if analyses
        .iter()
        .any(|a| a.analysis.prediction == AnemiaPrediction::NonAnemic)
    {
        score += SIGNAL_BONUS;
    }

    score.min(MAX_SCORE)
}

/// Vitals presence badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VitalsBadge {
    #[serde(rename = "Good")]
    Good,
    #[serde(rename = "No Data")]
    NoData,
}

/// Medical-record presence badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RecordsBadge {
    #[serde(rename = "Complete")]
    Complete,
    #[serde(rename = "Pending")]
    Pending,
}

/// Screening outcome badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScreeningBadge {
    #[serde(rename = "Normal")]
    Normal,
    #[serde(rename = "Check Needed")]
    CheckNeeded,
}

/// The three independent status labels shown on the dashboard header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusBadges {
    pub vitals: VitalsBadge,
    pub records: RecordsBadge,
    pub screening: ScreeningBadge,
}

/// Derive the three dashboard badges. Each is computed independently:
/// vitals present at all, any medical record on file, any screening
/// that came back Non-Anemic.
pub fn status_badges(
    latest: Option<&HealthRecord>,
    medical_records: &[MedicalRecordView],
    analyses: &[AnemiaAnalysisView],
) -> StatusBadges {
    let non_anemic = analyses
        .iter()
        .any(|a| a.analysis.prediction == AnemiaPrediction::NonAnemic);

    StatusBadges {
        vitals: if latest.is_some() {
            VitalsBadge::Good
        } else {
            VitalsBadge::NoData
        },
        records: if medical_records.is_empty() {
            RecordsBadge::Pending
        } else {
            RecordsBadge::Complete
        },
        screening: if non_anemic {
            ScreeningBadge::Normal
        } else {
            ScreeningBadge::CheckNeeded
        },
    }
}

/// Per-collection record counts for the dashboard header.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RecordCounts {
    pub health_records: usize,
    pub medical_records: usize,
    pub anemia_analyses: usize,
}

/// Dashboard data — single assembly of all derived views for one patient.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub patient: User,
    pub health_score: u32,
    pub latest_vitals: Option<HealthRecordView>,
    pub badges: StatusBadges,
    pub counts: RecordCounts,
}

/// Assemble the full dashboard from fetched collections (newest-first).
pub fn build_dashboard(
    patient: User,
    health_records: Vec<HealthRecordView>,
    medical_records: Vec<MedicalRecordView>,
    analyses: Vec<AnemiaAnalysisView>,
) -> DashboardSummary {
    let latest = latest_vitals(&health_records).cloned();
    let latest_record = latest.as_ref().map(|v| &v.record);

    DashboardSummary {
        health_score: health_score(latest_record, &analyses),
        badges: status_badges(latest_record, &medical_records, &analyses),
        counts: RecordCounts {
            health_records: health_records.len(),
            medical_records: medical_records.len(),
            anemia_analyses: analyses.len(),
        },
        latest_vitals: latest,
        patient,
    }
}
