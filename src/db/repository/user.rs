use chrono::Utc;
use rusqlite::{params, Connection};
use uuid::Uuid;

use super::{format_ts, parse_ts, parse_uuid};
use crate::db::DatabaseError;
use crate::models::{User, UserProfile, UserRole};

const USER_COLUMNS: &str = "id, wallet_address, name, email, role, specialization, \
     license_number, hospital, is_verified, created_at, last_login_at";

/// Insert-or-update a user keyed by wallet address, in one atomic statement.
///
/// On first submission the row is created with is_verified auto-set for
/// patients (doctors and admins start unverified). A re-submission of the
/// same address updates the mutable profile fields and refreshes the
/// last-login time; id, wallet address, creation time and verification
/// state are left untouched. Last write wins on profile fields.
pub fn upsert_user_by_wallet(
    conn: &Connection,
    profile: &UserProfile,
) -> Result<User, DatabaseError> {
    let now = format_ts(&Utc::now().naive_utc());
    conn.execute(
        "INSERT INTO users (id, wallet_address, name, email, role, specialization,
         license_number, hospital, is_verified, created_at, last_login_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
         ON CONFLICT(wallet_address) DO UPDATE SET
             name = excluded.name,
             email = excluded.email,
             role = excluded.role,
             specialization = excluded.specialization,
             license_number = excluded.license_number,
             hospital = excluded.hospital,
             last_login_at = excluded.last_login_at",
        params![
            Uuid::new_v4().to_string(),
            profile.wallet_address,
            profile.name,
            profile.email,
            profile.role.as_str(),
            profile.specialization,
            profile.license_number,
            profile.hospital,
            (profile.role == UserRole::Patient) as i32,
            now,
            now,
        ],
    )?;

    get_user_by_wallet(conn, &profile.wallet_address)?.ok_or_else(|| DatabaseError::NotFound {
        entity_type: "user".into(),
        key: profile.wallet_address.clone(),
    })
}

/// Look up a user by wallet address. Absence is not an error.
pub fn get_user_by_wallet(
    conn: &Connection,
    wallet_address: &str,
) -> Result<Option<User>, DatabaseError> {
    let result = conn.query_row(
        &format!("SELECT {USER_COLUMNS} FROM users WHERE wallet_address = ?1"),
        params![wallet_address],
        row_to_user_row,
    );

    match result {
        Ok(row) => Ok(Some(user_from_row(row)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Look up a user by id. Absence is not an error.
pub fn get_user_by_id(conn: &Connection, id: &Uuid) -> Result<Option<User>, DatabaseError> {
    let result = conn.query_row(
        &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
        params![id.to_string()],
        row_to_user_row,
    );

    match result {
        Ok(row) => Ok(Some(user_from_row(row)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Refresh only the last-login time. Fails if no user has that address.
pub fn touch_login(conn: &Connection, wallet_address: &str) -> Result<User, DatabaseError> {
    let now = format_ts(&Utc::now().naive_utc());
    let affected = conn.execute(
        "UPDATE users SET last_login_at = ?1 WHERE wallet_address = ?2",
        params![now, wallet_address],
    )?;
    if affected == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "user".into(),
            key: wallet_address.into(),
        });
    }
    get_user_by_wallet(conn, wallet_address)?.ok_or_else(|| DatabaseError::NotFound {
        entity_type: "user".into(),
        key: wallet_address.into(),
    })
}

/// All users, newest first.
pub fn list_users(conn: &Connection) -> Result<Vec<User>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC"
    ))?;
    let rows = stmt.query_map([], row_to_user_row)?;

    let mut users = Vec::new();
    for row in rows {
        users.push(user_from_row(row?)?);
    }
    Ok(users)
}

// Internal row type for User mapping
struct UserRow {
    id: String,
    wallet_address: String,
    name: String,
    email: String,
    role: String,
    specialization: Option<String>,
    license_number: Option<String>,
    hospital: Option<String>,
    is_verified: i32,
    created_at: String,
    last_login_at: Option<String>,
}

fn row_to_user_row(row: &rusqlite::Row) -> Result<UserRow, rusqlite::Error> {
    Ok(UserRow {
        id: row.get(0)?,
        wallet_address: row.get(1)?,
        name: row.get(2)?,
        email: row.get(3)?,
        role: row.get(4)?,
        specialization: row.get(5)?,
        license_number: row.get(6)?,
        hospital: row.get(7)?,
        is_verified: row.get(8)?,
        created_at: row.get(9)?,
        last_login_at: row.get(10)?,
    })
}

fn user_from_row(row: UserRow) -> Result<User, DatabaseError> {
    Ok(User {
        id: parse_uuid(&row.id)?,
        wallet_address: row.wallet_address,
        name: row.name,
        email: row.email,
        role: row.role.parse()?,
        specialization: row.specialization,
        license_number: row.license_number,
        hospital: row.hospital,
        is_verified: row.is_verified != 0,
        created_at: parse_ts(&row.created_at),
        last_login_at: row.last_login_at.as_deref().map(parse_ts),
    })
}
