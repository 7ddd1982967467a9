use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(UserRole {
    Patient => "patient",
    Doctor => "doctor",
    Admin => "admin",
});

str_enum!(RecordType {
    LabResults => "lab_results",
    Prescription => "prescription",
    Imaging => "imaging",
    Consultation => "consultation",
    Vaccination => "vaccination",
    Other => "other",
});

str_enum!(RecordStatus {
    Pending => "pending",
    Verified => "verified",
});

str_enum!(AnalysisType {
    EyeAnemia => "eye_anemia",
    NailAnemia => "nail_anemia",
});

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn role_round_trips() {
        for role in [UserRole::Patient, UserRole::Doctor, UserRole::Admin] {
            assert_eq!(UserRole::from_str(role.as_str()).unwrap(), role);
        }
    }

    #[test]
    fn record_type_rejects_unknown() {
        let err = RecordType::from_str("x_ray").unwrap_err();
        assert!(matches!(err, DatabaseError::InvalidEnum { .. }));
    }

    #[test]
    fn role_serializes_snake_case() {
        let json = serde_json::to_string(&UserRole::Patient).unwrap();
        assert_eq!(json, "\"patient\"");
    }

    #[test]
    fn record_type_serializes_snake_case() {
        let json = serde_json::to_string(&RecordType::LabResults).unwrap();
        assert_eq!(json, "\"lab_results\"");
    }
}
