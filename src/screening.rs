//! Anemia screening capability.
//!
//! The portal ships no trained classifier: predictions come from
//! whatever [`AnemiaScreener`] the server is built with. The default
//! is [`RandomScreener`], an unweighted random stand-in; a real model
//! or a deterministic stub slots in behind the same trait.

use rand::Rng;
use serde::Serialize;

use crate::models::{AnalysisType, AnemiaPrediction};

/// Outcome of one screening call.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Screening {
    pub prediction: AnemiaPrediction,
    /// Percent, 0–100.
    pub confidence: f64,
    /// Whether a region of interest was located. Only eye screenings
    /// attempt ROI detection; nail screenings use the full image.
    pub roi_detected: bool,
}

/// A pluggable screening backend.
pub trait AnemiaScreener: Send + Sync {
    fn predict(&self, image: &[u8], analysis_type: AnalysisType) -> Screening;

    /// Short label reported by the status endpoint.
    fn name(&self) -> &'static str;
}

/// Unweighted random screener — the shipped stand-in for a model.
#[derive(Debug, Default)]
pub struct RandomScreener;

impl AnemiaScreener for RandomScreener {
    fn predict(&self, _image: &[u8], analysis_type: AnalysisType) -> Screening {
        let mut rng = rand::thread_rng();
        let prediction = if rng.gen_bool(0.5) {
            AnemiaPrediction::Anemic
        } else {
            AnemiaPrediction::NonAnemic
        };
        let confidence = (rng.gen_range(55.0..=97.0_f64) * 100.0).round() / 100.0;
        let roi_detected = match analysis_type {
            AnalysisType::EyeAnemia => rng.gen_bool(0.5),
            AnalysisType::NailAnemia => false,
        };

        Screening {
            prediction,
            confidence,
            roi_detected,
        }
    }

    fn name(&self) -> &'static str {
        "randomized-stub"
    }
}

/// Deterministic screener for tests and demo environments.
#[derive(Debug, Clone, Copy)]
pub struct FixedScreener {
    pub prediction: AnemiaPrediction,
    pub confidence: f64,
    pub roi_detected: bool,
}

impl AnemiaScreener for FixedScreener {
    fn predict(&self, _image: &[u8], _analysis_type: AnalysisType) -> Screening {
        Screening {
            prediction: self.prediction,
            confidence: self.confidence,
            roi_detected: self.roi_detected,
        }
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

/// Follow-up guidance keyed off the screening outcome.
pub fn recommendations(prediction: AnemiaPrediction) -> &'static [&'static str] {
    match prediction {
        AnemiaPrediction::Anemic => &[
            "Confirm with a complete blood count (CBC) test",
            "Increase iron-rich foods: leafy greens, legumes, red meat",
            "Pair iron intake with vitamin C to aid absorption",
            "Consult a doctor before starting iron supplements",
        ],
        AnemiaPrediction::NonAnemic => &[
            "No signs of anemia detected in this screening",
            "Maintain a balanced diet with adequate iron",
            "Repeat screening if fatigue or pallor develops",
        ],
    }
}
