//! Services
//!
//! Outbound collaborators and background jobs: mail delivery and the
//! promotion expiry sweep.

pub mod mail;
pub mod promotions;

pub use mail::{MailConfig, MailService};
