//! Server configuration
//!
//! Every setting comes from the environment with a sensible default:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | WORK_DIR | /var/lib/eats | Database and log storage |
//! | HTTP_PORT | 3000 | HTTP API port |
//! | ENVIRONMENT | development | development, staging or production |
//! | PROMOTION_SWEEP_INTERVAL_SECS | 86400 | Promotion expiry sweep cadence |
//! | JWT_SECRET, JWT_EXPIRATION_MINUTES, ... | see auth | Session settings |
//! | MAILGUN_DOMAIN, MAILGUN_API_KEY, MAIL_FROM | unset | Mail delivery |

use crate::auth::JwtConfig;
use crate::services::MailConfig;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for database files and logs
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// JWT session configuration
    pub jwt: JwtConfig,
    /// Mail delivery configuration
    pub mail: MailConfig,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Seconds between promotion expiry sweeps (daily by default)
    pub promotion_sweep_interval_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/eats".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            jwt: JwtConfig::default(),
            mail: MailConfig::from_env(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            promotion_sweep_interval_secs: std::env::var("PROMOTION_SWEEP_INTERVAL_SECS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(86_400),
        }
    }

    /// Directory holding the embedded database
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// Make sure the work directory layout exists
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(PathBuf::from(&self.work_dir).join("logs"))?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
