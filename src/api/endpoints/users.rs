//! User endpoints — wallet-keyed profiles with upsert semantics.

use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository;
use crate::models::{User, UserProfile, UserRole};

#[derive(Debug, Deserialize)]
pub struct UsersQuery {
    pub wallet_address: Option<String>,
}

#[derive(Serialize)]
pub struct SingleUserResponse {
    pub success: bool,
    pub user: Option<User>,
}

#[derive(Serialize)]
pub struct UserListResponse {
    pub success: bool,
    pub users: Vec<User>,
}

/// `GET /users` — with `?wallet_address=` a single-user lookup (absence
/// is success with a null user), otherwise all users newest first.
pub async fn list(
    State(ctx): State<ApiContext>,
    Query(query): Query<UsersQuery>,
) -> Result<Response, ApiError> {
    let conn = ctx.conn()?;

    match query.wallet_address {
        Some(wallet) => {
            let user = repository::get_user_by_wallet(&conn, &wallet)?;
            Ok(Json(SingleUserResponse {
                success: true,
                user,
            })
            .into_response())
        }
        None => {
            let users = repository::list_users(&conn)?;
            Ok(Json(UserListResponse {
                success: true,
                users,
            })
            .into_response())
        }
    }
}

/// `GET /users/:wallet` — single-user lookup by path param.
pub async fn get_by_wallet(
    State(ctx): State<ApiContext>,
    Path(wallet): Path<String>,
) -> Result<Json<SingleUserResponse>, ApiError> {
    let conn = ctx.conn()?;
    let user = repository::get_user_by_wallet(&conn, &wallet)?;
    Ok(Json(SingleUserResponse {
        success: true,
        user,
    }))
}

/// Profile fields accepted by the upsert. Everything is optional at the
/// wire level so validation can name each absent field.
#[derive(Debug, Deserialize)]
pub struct UpsertUserRequest {
    pub wallet_address: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub specialization: Option<String>,
    pub license_number: Option<String>,
    pub hospital: Option<String>,
}

#[derive(Serialize)]
pub struct UpsertUserResponse {
    pub success: bool,
    pub user: User,
}

/// `POST /users` — insert-or-update keyed by wallet address.
pub async fn upsert(
    State(ctx): State<ApiContext>,
    Json(req): Json<UpsertUserRequest>,
) -> Result<Json<UpsertUserResponse>, ApiError> {
    let mut missing = Vec::new();
    if req.wallet_address.as_deref().unwrap_or("").is_empty() {
        missing.push("wallet_address");
    }
    if req.name.as_deref().unwrap_or("").is_empty() {
        missing.push("name");
    }
    if req.email.as_deref().unwrap_or("").is_empty() {
        missing.push("email");
    }
    if req.role.as_deref().unwrap_or("").is_empty() {
        missing.push("role");
    }
    if !missing.is_empty() {
        return Err(ApiError::missing_fields(&missing));
    }

    let role: UserRole = req.role.as_deref().unwrap_or_default().parse()?;
    let profile = UserProfile {
        wallet_address: req.wallet_address.unwrap_or_default(),
        name: req.name.unwrap_or_default(),
        email: req.email.unwrap_or_default(),
        role,
        specialization: req.specialization,
        license_number: req.license_number,
        hospital: req.hospital,
    };

    let conn = ctx.conn()?;
    let user = repository::upsert_user_by_wallet(&conn, &profile)?;
    tracing::info!(wallet = %user.wallet_address, "User profile upserted");

    Ok(Json(UpsertUserResponse {
        success: true,
        user,
    }))
}

#[derive(Debug, Deserialize)]
pub struct UpdateLoginRequest {
    pub wallet_address: Option<String>,
}

/// `POST /users/update-login` — refresh only the last-login time.
/// Unlike the lookups, an unknown wallet here is a 404.
pub async fn update_login(
    State(ctx): State<ApiContext>,
    Json(req): Json<UpdateLoginRequest>,
) -> Result<Json<UpsertUserResponse>, ApiError> {
    let wallet = match req.wallet_address.as_deref() {
        Some(w) if !w.is_empty() => w,
        _ => return Err(ApiError::missing_fields(&["wallet_address"])),
    };

    let conn = ctx.conn()?;
    let user = repository::touch_login(&conn, wallet)?;
    Ok(Json(UpsertUserResponse {
        success: true,
        user,
    }))
}
