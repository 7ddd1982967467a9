use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::UserRole;

/// A portal user. The wallet address is the sole external identity key:
/// exactly one row exists per address, maintained by upsert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub wallet_address: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub specialization: Option<String>,
    pub license_number: Option<String>,
    pub hospital: Option<String>,
    pub is_verified: bool,
    pub created_at: NaiveDateTime,
    pub last_login_at: Option<NaiveDateTime>,
}

/// Mutable profile fields accepted by the upsert. Wallet address keys the
/// row; id, created_at and is_verified are never updated by a re-submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub wallet_address: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub specialization: Option<String>,
    pub license_number: Option<String>,
    pub hospital: Option<String>,
}
