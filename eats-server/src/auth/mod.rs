//! Authentication
//!
//! JWT session handling: token service, axum middleware and the
//! [`CurrentUser`] extractor. Role checks on individual operations live
//! next to the handlers via [`require_role`]; order visibility is decided
//! by the order policy, not here.

mod extractor;
mod jwt;
mod middleware;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::require_auth;

use crate::utils::AppError;
use shared::UserRole;

/// Reject the request unless the actor carries the expected role.
///
/// This mirrors the per-operation role gates of the API surface (clients
/// place orders, owners cook, delivery accounts take orders).
pub fn require_role(user: &CurrentUser, role: UserRole) -> Result<(), AppError> {
    if user.role != role {
        return Err(AppError::forbidden(format!("Requires {} role", role)));
    }
    Ok(())
}
