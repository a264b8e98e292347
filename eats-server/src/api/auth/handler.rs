//! Account Handlers
//!
//! Registration creates the account plus a pending email verification and
//! hands the verification mail off without waiting on the provider. Login
//! returns one uniform error for every credential failure so accounts
//! cannot be enumerated.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use shared::UserRole;
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{User, UserCreate, VerificationCreate};
use crate::db::repository::{UserRepository, VerificationRepository};
use crate::utils::{AppError, AppResponse, AppResult, ok};

/// Registration request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    pub role: UserRole,
}

/// Create a new account
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<Json<AppResponse<()>>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let users = UserRepository::new(state.db.clone());
    if users.find_by_email(&req.email).await?.is_some() {
        return Err(AppError::conflict(
            "There is a user with that email already",
        ));
    }

    let hash_pass = User::hash_password(&req.password)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

    let now = shared::now_millis();
    let user = users
        .create(UserCreate {
            email: req.email,
            hash_pass,
            role: req.role,
            verified: false,
            created_at: now,
            updated_at: now,
        })
        .await?;
    let user_id = user
        .id
        .clone()
        .ok_or_else(|| AppError::internal("Created user has no id"))?;

    let verification = VerificationRepository::new(state.db.clone())
        .create(VerificationCreate {
            code: uuid::Uuid::new_v4().to_string(),
            user: user_id,
            created_at: now,
        })
        .await?;

    // Fire and forget: signup never waits on the mail provider
    let mail = state.mail.clone();
    let email = user.email.clone();
    tokio::spawn(async move {
        mail.send_verification_email(&email, &verification.code)
            .await;
    });

    tracing::info!(email = %user.email, role = %user.role, "Account created");
    Ok(ok(()))
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Authenticate and issue a session token
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<AppResponse<LoginResponse>>> {
    let users = UserRepository::new(state.db.clone());

    let user = users
        .find_by_email(&req.email)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    let password_valid = user
        .verify_password(&req.password)
        .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;
    if !password_valid {
        tracing::warn!(email = %req.email, "Login failed");
        return Err(AppError::invalid_credentials());
    }

    let user_id = user
        .id
        .clone()
        .ok_or_else(|| AppError::internal("Stored user has no id"))?;

    let token = state
        .jwt_service
        .generate_token(&user_id, &user.email, user.role)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    Ok(ok(LoginResponse { token }))
}
