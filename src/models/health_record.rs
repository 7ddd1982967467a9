use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A point-in-time vitals entry for one patient. Every vital is optional;
/// a record carrying only some of them is valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthRecord {
    pub id: Uuid,
    pub patient_id: Uuid,
    /// Beats per minute.
    pub heart_rate: Option<i32>,
    /// Composite "systolic/diastolic" string, e.g. "120/80".
    pub blood_pressure: Option<String>,
    /// Degrees Celsius.
    pub temperature: Option<f64>,
    /// Kilograms.
    pub weight: Option<f64>,
    /// Centimetres.
    pub height: Option<f64>,
    pub recorded_at: NaiveDateTime,
}

/// A health record joined with its owning patient for display.
#[derive(Debug, Clone, Serialize)]
pub struct HealthRecordView {
    #[serde(flatten)]
    pub record: HealthRecord,
    pub patient_name: String,
    pub patient_email: String,
}

/// Parse a composite "systolic/diastolic" blood pressure string.
pub fn parse_blood_pressure(bp: &str) -> Option<(i32, i32)> {
    let (sys, dia) = bp.split_once('/')?;
    let sys: i32 = sys.trim().parse().ok()?;
    let dia: i32 = dia.trim().parse().ok()?;
    Some((sys, dia))
}
