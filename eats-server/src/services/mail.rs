//! Mail delivery
//!
//! Fire-and-forget transactional mail through the Mailgun messages API.
//! Delivery reports success as a bool; failures are logged and swallowed at
//! this boundary so no mail outage ever fails an account operation.

use serde::{Deserialize, Serialize};

/// Mailgun configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    pub domain: String,
    pub api_key: String,
    /// Display sender, e.g. "Eats <mailgun@example.com>"
    pub from: String,
}

impl MailConfig {
    pub fn from_env() -> Self {
        let domain = std::env::var("MAILGUN_DOMAIN").unwrap_or_default();
        Self {
            from: std::env::var("MAIL_FROM").unwrap_or_else(|_| format!("Eats <mailgun@{domain}>")),
            api_key: std::env::var("MAILGUN_API_KEY").unwrap_or_default(),
            domain,
        }
    }

    /// Delivery is disabled entirely without credentials (local development)
    pub fn is_configured(&self) -> bool {
        !self.domain.is_empty() && !self.api_key.is_empty()
    }
}

/// Mail service
#[derive(Debug, Clone)]
pub struct MailService {
    config: MailConfig,
    client: reqwest::Client,
}

impl MailService {
    pub fn new(config: MailConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Send one templated message. Returns whether delivery was accepted.
    pub async fn send_email(
        &self,
        subject: &str,
        template: &str,
        to: &str,
        vars: &[(&str, &str)],
    ) -> bool {
        if !self.config.is_configured() {
            tracing::debug!(to, subject, "Mail delivery disabled, skipping");
            return false;
        }

        let url = format!("https://api.mailgun.net/v3/{}/messages", self.config.domain);

        let mut form: Vec<(String, String)> = vec![
            ("from".into(), self.config.from.clone()),
            ("to".into(), to.to_string()),
            ("subject".into(), subject.to_string()),
            ("template".into(), template.to_string()),
        ];
        for (key, value) in vars {
            form.push((format!("v:{key}"), (*value).to_string()));
        }

        match self
            .client
            .post(&url)
            .basic_auth("api", Some(&self.config.api_key))
            .form(&form)
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                tracing::warn!(status = %response.status(), to, "Mail delivery rejected");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, to, "Mail delivery failed");
                false
            }
        }
    }

    /// Verification mail sent on signup and on email change
    pub async fn send_verification_email(&self, to: &str, code: &str) {
        let delivered = self
            .send_email(
                "Verify Your Email",
                "verify-email",
                to,
                &[("code", code), ("username", to)],
            )
            .await;
        if !delivered {
            tracing::warn!(to, "Verification email was not delivered");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unconfigured_mail_reports_failure_without_network() {
        let service = MailService::new(MailConfig {
            domain: String::new(),
            api_key: String::new(),
            from: "Eats <noreply@example.com>".into(),
        });
        assert!(
            !service
                .send_email("subject", "template", "a@b.c", &[])
                .await
        );
    }
}
