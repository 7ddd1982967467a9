//! Emergency condition screening over a submitted vitals entry.
//!
//! Each vital outside its emergency band adds 3 to a severity score;
//! a score of 3 or more marks the entry as an emergency. The check is
//! pure — alert storage or notification is not this layer's concern.

use serde::Serialize;

use crate::models::{parse_blood_pressure, HealthRecord};

/// Emergency bands (inclusive). Temperature is degrees Celsius.
const HEART_RATE_BAND: (f64, f64) = (50.0, 120.0);
const SYSTOLIC_BAND: (f64, f64) = (90.0, 180.0);
const DIASTOLIC_BAND: (f64, f64) = (60.0, 110.0);
const TEMPERATURE_BAND: (f64, f64) = (35.5, 38.9);

const BREACH_WEIGHT: u32 = 3;

/// One out-of-band vital.
#[derive(Debug, Clone, Serialize)]
pub struct EmergencyIndicator {
    pub vital: &'static str,
    pub value: f64,
    pub condition: &'static str,
}

/// Outcome of the emergency screen for one vitals entry.
#[derive(Debug, Clone, Serialize)]
pub struct EmergencyCheck {
    pub is_emergency: bool,
    pub severity_score: u32,
    pub indicators: Vec<EmergencyIndicator>,
    pub recommended_action: &'static str,
    pub urgency_level: &'static str,
}

/// Screen a vitals entry against the emergency bands. Absent vitals
/// are skipped; a record with no vitals at all is never an emergency.
pub fn check_emergency_conditions(record: &HealthRecord) -> EmergencyCheck {
    let mut indicators = Vec::new();

    if let Some(hr) = record.heart_rate {
        check_band("heart_rate", hr as f64, HEART_RATE_BAND, &mut indicators);
    }
    if let Some((sys, dia)) = record
        .blood_pressure
        .as_deref()
        .and_then(parse_blood_pressure)
    {
        check_band("blood_pressure_systolic", sys as f64, SYSTOLIC_BAND, &mut indicators);
        check_band("blood_pressure_diastolic", dia as f64, DIASTOLIC_BAND, &mut indicators);
    }
    if let Some(temp) = record.temperature {
        check_band("temperature", temp, TEMPERATURE_BAND, &mut indicators);
    }

    let severity_score = indicators.len() as u32 * BREACH_WEIGHT;

    EmergencyCheck {
        is_emergency: severity_score >= 3,
        severity_score,
        recommended_action: recommended_action(severity_score),
        urgency_level: urgency_level(severity_score),
        indicators,
    }
}

fn check_band(
    vital: &'static str,
    value: f64,
    (min, max): (f64, f64),
    indicators: &mut Vec<EmergencyIndicator>,
) {
    if value < min {
        indicators.push(EmergencyIndicator {
            vital,
            value,
            condition: "critically_low",
        });
    } else if value > max {
        indicators.push(EmergencyIndicator {
            vital,
            value,
            condition: "critically_high",
        });
    }
}

fn recommended_action(severity_score: u32) -> &'static str {
    match severity_score {
        s if s >= 6 => "Call emergency services immediately",
        s if s >= 3 => "Seek immediate medical attention",
        s if s >= 1 => "Contact healthcare provider",
        _ => "Continue monitoring",
    }
}

fn urgency_level(severity_score: u32) -> &'static str {
    match severity_score {
        s if s >= 6 => "critical",
        s if s >= 3 => "high",
        s if s >= 1 => "medium",
        _ => "low",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use uuid::Uuid;

    fn record(
        heart_rate: Option<i32>,
        blood_pressure: Option<&str>,
        temperature: Option<f64>,
    ) -> HealthRecord {
        HealthRecord {
            id: Uuid::new_v4(),
            patient_id: Uuid::new_v4(),
            heart_rate,
            blood_pressure: blood_pressure.map(Into::into),
            temperature,
            weight: None,
            height: None,
            recorded_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn normal_vitals_no_emergency() {
        let check = check_emergency_conditions(&record(Some(72), Some("118/76"), Some(36.8)));
        assert!(!check.is_emergency);
        assert_eq!(check.severity_score, 0);
        assert!(check.indicators.is_empty());
        assert_eq!(check.recommended_action, "Continue monitoring");
        assert_eq!(check.urgency_level, "low");
    }

    #[test]
    fn empty_record_is_never_emergency() {
        let check = check_emergency_conditions(&record(None, None, None));
        assert!(!check.is_emergency);
        assert_eq!(check.severity_score, 0);
    }

    #[test]
    fn single_breach_triggers_emergency() {
        let check = check_emergency_conditions(&record(Some(140), None, None));
        assert!(check.is_emergency);
        assert_eq!(check.severity_score, 3);
        assert_eq!(check.indicators.len(), 1);
        assert_eq!(check.indicators[0].vital, "heart_rate");
        assert_eq!(check.indicators[0].condition, "critically_high");
        assert_eq!(check.recommended_action, "Seek immediate medical attention");
        assert_eq!(check.urgency_level, "high");
    }

    #[test]
    fn low_breach_is_flagged_as_low() {
        let check = check_emergency_conditions(&record(Some(42), None, None));
        assert_eq!(check.indicators[0].condition, "critically_low");
    }

    #[test]
    fn multiple_breaches_escalate_to_critical() {
        let check = check_emergency_conditions(&record(Some(150), Some("200/120"), None));
        assert_eq!(check.severity_score, 9);
        assert_eq!(check.urgency_level, "critical");
        assert_eq!(check.recommended_action, "Call emergency services immediately");
    }

    #[test]
    fn blood_pressure_components_checked_separately() {
        // Systolic in band, diastolic critically high
        let check = check_emergency_conditions(&record(None, Some("130/115"), None));
        assert_eq!(check.indicators.len(), 1);
        assert_eq!(check.indicators[0].vital, "blood_pressure_diastolic");
    }

    #[test]
    fn malformed_blood_pressure_is_skipped() {
        let check = check_emergency_conditions(&record(None, Some("not-a-reading"), None));
        assert_eq!(check.severity_score, 0);
    }

    #[test]
    fn fever_in_celsius_is_flagged() {
        let check = check_emergency_conditions(&record(None, None, Some(39.4)));
        assert!(check.is_emergency);
        assert_eq!(check.indicators[0].vital, "temperature");
        assert_eq!(check.indicators[0].condition, "critically_high");
    }

    #[test]
    fn band_edges_are_inside() {
        let check = check_emergency_conditions(&record(Some(50), Some("90/60"), Some(38.9)));
        assert_eq!(check.severity_score, 0);
        let check = check_emergency_conditions(&record(Some(120), Some("180/110"), Some(35.5)));
        assert_eq!(check.severity_score, 0);
    }
}
