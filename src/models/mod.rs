pub mod anemia;
pub mod enums;
pub mod health_record;
pub mod medical_record;
pub mod user;

pub use anemia::{AnemiaAnalysis, AnemiaAnalysisView, AnemiaPrediction};
pub use enums::{AnalysisType, RecordStatus, RecordType, UserRole};
pub use health_record::{parse_blood_pressure, HealthRecord, HealthRecordView};
pub use medical_record::{MedicalRecord, MedicalRecordView};
pub use user::{User, UserProfile};
