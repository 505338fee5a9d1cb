use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::api::errors::ApiError;
use crate::api::middleware::auth::CurrentUser;
use crate::api::state::JwtSecret;
use crate::auth::jwt::create_token;
use crate::auth::password::{hash_password, verify_password};
use crate::domain::repositories::user_repository::{NewUser, User, DEFAULT_ROLE};
use crate::domain::repositories::UserRepository;
use crate::domain::user::value_objects::{Email, Password};
use crate::infrastructure::repositories::PostgresUserRepository;

/// Request body for registration and login
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

/// Public view of a user account
#[derive(Debug, Serialize)]
pub struct UserResponse {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Role")]
    pub role: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.to_string(),
            role: user.role.clone(),
        }
    }
}

/// Response from successful login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

/// Register a new customer account
///
/// POST /register
pub async fn register(
    State(pool): State<PgPool>,
    Json(req): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let email = Email::new(&req.email).map_err(ApiError::bad_request)?;
    let password = Password::new(req.password).map_err(ApiError::bad_request)?;

    let password_hash = hash_password(&password)
        .map_err(|e| ApiError::internal_server_error(format!("Failed to hash password: {}", e)))?;

    let user_repo = PostgresUserRepository::new(pool);
    let user = user_repo
        .create(NewUser {
            email,
            password_hash,
            role: DEFAULT_ROLE.to_string(),
        })
        .await?;

    tracing::info!(user_id = user.id, "User registered");
    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// Login with email and password
///
/// POST /login
pub async fn login(
    State(pool): State<PgPool>,
    State(secret): State<JwtSecret>,
    Json(req): Json<CredentialsRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let email = Email::new(&req.email).map_err(ApiError::bad_request)?;

    let user_repo = PostgresUserRepository::new(pool);
    let user = user_repo
        .find_by_email(&email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    if !verify_password(&req.password, &user.password_hash) {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let token = create_token(user.id, &user.role, secret.as_str())
        .map_err(|e| ApiError::internal_server_error(format!("Failed to create token: {}", e)))?;

    Ok(Json(LoginResponse {
        token,
        user: UserResponse::from(&user),
    }))
}

/// Current account
///
/// GET /me
pub async fn me(
    State(pool): State<PgPool>,
    current: CurrentUser,
) -> Result<Json<UserResponse>, ApiError> {
    let user_repo = PostgresUserRepository::new(pool);
    let user = user_repo
        .find_by_id(current.id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User not found: {}", current.id)))?;

    Ok(Json(UserResponse::from(&user)))
}
