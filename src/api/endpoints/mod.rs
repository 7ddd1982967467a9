//! API endpoint handlers.
//!
//! One module per record service plus the dashboard assembly and
//! service status. Handlers validate, delegate to the repository, and
//! wrap payloads in the `success` envelope.

pub mod anemia;
pub mod dashboard;
pub mod health_records;
pub mod medical_records;
pub mod status;
pub mod users;
