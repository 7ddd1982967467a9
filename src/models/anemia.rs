use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::AnalysisType;

/// Screening outcome label. Serialized with the display capitalization
/// the portal has always used ("Anemic" / "Non-Anemic").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnemiaPrediction {
    #[serde(rename = "Anemic")]
    Anemic,
    #[serde(rename = "Non-Anemic")]
    NonAnemic,
}

impl AnemiaPrediction {
    pub fn as_str(self) -> &'static str {
        match self {
            AnemiaPrediction::Anemic => "Anemic",
            AnemiaPrediction::NonAnemic => "Non-Anemic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Anemic" => Some(AnemiaPrediction::Anemic),
            "Non-Anemic" => Some(AnemiaPrediction::NonAnemic),
            _ => None,
        }
    }
}

/// One stored anemia screening for a patient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnemiaAnalysis {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub analysis_type: AnalysisType,
    pub prediction: AnemiaPrediction,
    /// Percent, 0–100.
    pub confidence: f64,
    /// Whether a region of interest (conjunctiva / nail bed) was located.
    pub roi_detected: bool,
    /// Truncated base64 of the submitted image, kept for display only.
    pub image_preview: Option<String>,
    pub created_at: NaiveDateTime,
}

/// An analysis joined with its owning patient for display.
#[derive(Debug, Clone, Serialize)]
pub struct AnemiaAnalysisView {
    #[serde(flatten)]
    pub analysis: AnemiaAnalysis,
    pub patient_name: String,
    pub patient_email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prediction_round_trips() {
        for p in [AnemiaPrediction::Anemic, AnemiaPrediction::NonAnemic] {
            assert_eq!(AnemiaPrediction::from_str(p.as_str()), Some(p));
        }
        assert_eq!(AnemiaPrediction::from_str("maybe"), None);
    }

    #[test]
    fn prediction_serializes_display_form() {
        let json = serde_json::to_string(&AnemiaPrediction::NonAnemic).unwrap();
        assert_eq!(json, "\"Non-Anemic\"");
    }

    #[test]
    fn analysis_serializes() {
        let analysis = AnemiaAnalysis {
            id: Uuid::new_v4(),
            patient_id: Uuid::new_v4(),
            analysis_type: AnalysisType::EyeAnemia,
            prediction: AnemiaPrediction::Anemic,
            confidence: 87.5,
            roi_detected: true,
            image_preview: Some("iVBORw0KGgo".into()),
            created_at: NaiveDateTime::default(),
        };
        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["analysis_type"], "eye_anemia");
        assert_eq!(json["prediction"], "Anemic");
        assert_eq!(json["roi_detected"], true);
    }
}
