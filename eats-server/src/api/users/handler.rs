//! User Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use surrealdb::RecordId;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{User, VerificationCreate};
use crate::db::repository::{UserRepository, VerificationRepository};
use crate::utils::{AppError, AppResponse, AppResult, ok};

/// Own profile
pub async fn me(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<AppResponse<User>>> {
    let users = UserRepository::new(state.db.clone());
    let profile = users
        .find_by_id(&user.id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    Ok(ok(profile))
}

/// Any profile by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<User>>> {
    let users = UserRepository::new(state.db.clone());
    let profile = users
        .find_by_id(&RecordId::from_table_key("user", id))
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    Ok(ok(profile))
}

/// Profile edit request; both fields optional
#[derive(Debug, Deserialize)]
pub struct EditProfileRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Edit own email and/or password.
///
/// An email change drops the verified flag and starts a fresh verification
/// round: the old pending code is discarded and a new one is mailed out.
pub async fn edit_profile(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<EditProfileRequest>,
) -> AppResult<Json<AppResponse<()>>> {
    let users = UserRepository::new(state.db.clone());
    let verifications = VerificationRepository::new(state.db.clone());

    if let Some(email) = req.email {
        if users.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("Email is already in use"));
        }

        verifications.delete_for_user(&user.id).await?;
        users.set_email(&user.id, &email).await?;

        let verification = verifications
            .create(VerificationCreate {
                code: uuid::Uuid::new_v4().to_string(),
                user: user.id.clone(),
                created_at: shared::now_millis(),
            })
            .await?;

        let mail = state.mail.clone();
        tokio::spawn(async move {
            mail.send_verification_email(&email, &verification.code)
                .await;
        });
    }

    if let Some(password) = req.password {
        if password.len() < 8 {
            return Err(AppError::validation(
                "Password must be at least 8 characters",
            ));
        }
        let hash_pass = User::hash_password(&password)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;
        users.set_password_hash(&user.id, &hash_pass).await?;
    }

    Ok(ok(()))
}

/// Email verification request
#[derive(Debug, Deserialize)]
pub struct VerifyEmailRequest {
    pub code: String,
}

/// Redeem a verification code
pub async fn verify_email(
    State(state): State<ServerState>,
    Json(req): Json<VerifyEmailRequest>,
) -> AppResult<Json<AppResponse<()>>> {
    let users = UserRepository::new(state.db.clone());
    let verifications = VerificationRepository::new(state.db.clone());

    let verification = verifications
        .find_by_code(&req.code)
        .await?
        .ok_or_else(|| AppError::not_found("Verification not found"))?;

    users.mark_verified(&verification.user).await?;
    verifications.delete_for_user(&verification.user).await?;

    Ok(ok(()))
}
