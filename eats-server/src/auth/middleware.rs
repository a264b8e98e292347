//! Authentication middleware
//!
//! Validates `Authorization: Bearer <token>` and injects [`CurrentUser`]
//! into the request extensions.

use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use crate::utils::AppError;

/// Routes reachable without a session
fn is_public_route(path: &str) -> bool {
    path == "/api/auth/login" || path == "/api/auth/register" || path == "/api/health"
}

/// Require a valid JWT for every non-public `/api/` route.
///
/// | Failure | Response |
/// |---|---|
/// | Missing Authorization header | 401 Unauthorized |
/// | Expired token | 401 TokenExpired |
/// | Anything else invalid | 401 InvalidToken |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    // CORS preflight never carries credentials
    if req.method() == Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // Non-API paths fall through to their own 404 handling
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    if is_public_route(path) {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::InvalidToken)?,
        None => {
            tracing::warn!(target: "security", uri = %req.uri(), "Request without credentials");
            return Err(AppError::Unauthorized);
        }
    };

    match state.jwt_service.validate_token(token) {
        Ok(claims) => {
            let user = CurrentUser::try_from(claims).map_err(|_| AppError::InvalidToken)?;
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(target: "security", error = %e, uri = %req.uri(), "Token rejected");
            match e {
                crate::auth::JwtError::ExpiredToken => Err(AppError::TokenExpired),
                _ => Err(AppError::InvalidToken),
            }
        }
    }
}
