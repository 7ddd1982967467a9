//! Repository layer — entity-scoped database operations.
//!
//! Free functions over `rusqlite::Connection`, one module per table.
//! Single-row lookups map `QueryReturnedNoRows` to `Ok(None)`; absence
//! is a valid result, not a fault.

mod anemia;
mod health_record;
mod medical_record;
mod user;

pub use anemia::*;
pub use health_record::*;
pub use medical_record::*;
pub use user::*;

use chrono::NaiveDateTime;
use uuid::Uuid;

use super::DatabaseError;

pub(crate) const TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub(crate) fn format_ts(ts: &NaiveDateTime) -> String {
    ts.format(TS_FORMAT).to_string()
}

pub(crate) fn parse_ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, TS_FORMAT).unwrap_or_default()
}

pub(crate) fn parse_uuid(s: &str) -> Result<Uuid, DatabaseError> {
    Uuid::parse_str(s).map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))
}
