//! Brevo transactional-email client.
//!
//! Delivery is best-effort and at-most-once: the caller dispatches each send
//! from a detached task and only logs the outcome. When a credential or a
//! recipient is missing, the send degrades to a logged no-op instead of an
//! error, so a half-configured deployment still serves the contact form.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::{debug, info, warn};

use domains::{ContactSubmission, MailError, Mailer};

use crate::templates::{self, RenderedEmail};

/// Outbound request timeout; on expiry the send fails with
/// `MailError::Transport` and is never retried.
const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Static wiring for the Brevo adapter, assembled from `MailConfig` by the
/// binary.
#[derive(Debug, Clone)]
pub struct BrevoSettings {
    pub api_key: Option<SecretString>,
    pub api_base: String,
    pub sender_email: String,
    pub sender_name: String,
    pub admin_email: Option<String>,
    pub site_phone: Option<String>,
}

#[derive(Debug, Serialize)]
struct Party<'a> {
    name: &'a str,
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct Recipient<'a> {
    email: &'a str,
}

/// Body of `POST /v3/smtp/email`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendEmailRequest<'a> {
    sender: Party<'a>,
    to: Vec<Recipient<'a>>,
    subject: &'a str,
    html_content: &'a str,
    text_content: &'a str,
}

pub struct BrevoMailer {
    http: reqwest::Client,
    settings: BrevoSettings,
}

impl BrevoMailer {
    pub fn new(settings: BrevoSettings) -> Result<Self, MailError> {
        let http = reqwest::Client::builder()
            .timeout(SEND_TIMEOUT)
            .build()
            .map_err(|err| MailError::Transport(err.to_string()))?;
        Ok(Self { http, settings })
    }

    /// Lightweight startup probe: asks Brevo for the account behind the
    /// configured key and logs the verdict. Never fatal.
    pub async fn verify(&self) {
        let Some(api_key) = &self.settings.api_key else {
            warn!("BREVO_API_KEY not set, skipping Brevo verify");
            return;
        };

        let result = self
            .http
            .get(format!("{}/v3/account", self.settings.api_base))
            .header("api-key", api_key.expose_secret())
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                info!("Brevo API key verified");
            }
            Ok(response) => {
                warn!(status = %response.status(), "Brevo verify returned non-success status");
            }
            Err(err) => {
                warn!(error = %err, "Brevo verify failed");
            }
        }
    }

    async fn send(
        &self,
        api_key: &SecretString,
        recipient: &str,
        email: &RenderedEmail,
    ) -> Result<(), MailError> {
        let payload = SendEmailRequest {
            sender: Party {
                name: &self.settings.sender_name,
                email: &self.settings.sender_email,
            },
            to: vec![Recipient { email: recipient }],
            subject: &email.subject,
            html_content: &email.html,
            text_content: &email.text,
        };

        let response = self
            .http
            .post(format!("{}/v3/smtp/email", self.settings.api_base))
            .header("api-key", api_key.expose_secret())
            .json(&payload)
            .send()
            .await
            .map_err(|err| MailError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailError::Provider(format!("{status}: {body}")));
        }

        debug!(%status, "Brevo accepted message");
        Ok(())
    }
}

#[async_trait]
impl Mailer for BrevoMailer {
    async fn send_admin_alert(&self, submission: &ContactSubmission) -> Result<(), MailError> {
        let Some(admin_email) = &self.settings.admin_email else {
            warn!("EMAIL_TO not set, skipping admin alert");
            return Ok(());
        };
        let Some(api_key) = &self.settings.api_key else {
            warn!("BREVO_API_KEY not set, cannot send admin alert");
            return Ok(());
        };

        let email = templates::admin_alert(submission, &self.settings.sender_name)
            .map_err(|err| MailError::Transport(format!("template render: {err}")))?;
        self.send(api_key, admin_email, &email).await?;
        info!(id = %submission.id, "admin alert delivered");
        Ok(())
    }

    async fn send_customer_reply(&self, submission: &ContactSubmission) -> Result<(), MailError> {
        if submission.email.is_empty() {
            warn!(id = %submission.id, "submission has no email, skipping auto-reply");
            return Ok(());
        }
        let Some(api_key) = &self.settings.api_key else {
            warn!("BREVO_API_KEY not set, skipping auto-reply");
            return Ok(());
        };

        let email = templates::customer_reply(
            submission,
            &self.settings.sender_name,
            self.settings.admin_email.as_deref().unwrap_or(""),
            self.settings.site_phone.as_deref(),
        )
        .map_err(|err| MailError::Transport(format!("template render: {err}")))?;
        self.send(api_key, &submission.email, &email).await?;
        info!(id = %submission.id, email = %submission.email, "auto-reply delivered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn submission() -> ContactSubmission {
        ContactSubmission {
            id: Uuid::now_v7(),
            name: "Ravi Patel".into(),
            email: "ravi@example.com".into(),
            phone: None,
            service: Some("architectural-metalwork".into()),
            message: "Quote please.".into(),
            submitted_at: Utc::now(),
        }
    }

    fn settings() -> BrevoSettings {
        BrevoSettings {
            api_key: None,
            api_base: "https://api.brevo.com".into(),
            sender_email: "no-reply@shreekrishnafabrication.in".into(),
            sender_name: "Shree Krishna Fabrication".into(),
            admin_email: Some("owner@shreekrishnafabrication.in".into()),
            site_phone: None,
        }
    }

    #[test]
    fn payload_uses_brevo_field_names() {
        let email = RenderedEmail {
            subject: "s".into(),
            html: "<p>h</p>".into(),
            text: "t".into(),
        };
        let payload = SendEmailRequest {
            sender: Party {
                name: "Shree Krishna Fabrication",
                email: "no-reply@shreekrishnafabrication.in",
            },
            to: vec![Recipient {
                email: "ravi@example.com",
            }],
            subject: &email.subject,
            html_content: &email.html,
            text_content: &email.text,
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("htmlContent").is_some());
        assert!(json.get("textContent").is_some());
        assert_eq!(json["to"][0]["email"], "ravi@example.com");
        assert_eq!(json["sender"]["name"], "Shree Krishna Fabrication");
    }

    #[tokio::test]
    async fn missing_api_key_turns_sends_into_noops() {
        let mailer = BrevoMailer::new(settings()).unwrap();
        assert!(mailer.send_admin_alert(&submission()).await.is_ok());
        assert!(mailer.send_customer_reply(&submission()).await.is_ok());
    }

    #[tokio::test]
    async fn missing_admin_address_skips_admin_alert() {
        let mut s = settings();
        s.admin_email = None;
        s.api_key = Some(SecretString::from("xkeysib-test".to_string()));
        let mailer = BrevoMailer::new(s).unwrap();
        // No admin recipient: resolves Ok without any network call.
        assert!(mailer.send_admin_alert(&submission()).await.is_ok());
    }

    #[tokio::test]
    async fn empty_submitter_email_skips_auto_reply() {
        let mailer = BrevoMailer::new(settings()).unwrap();
        let mut s = submission();
        s.email = String::new();
        assert!(mailer.send_customer_reply(&s).await.is_ok());
    }
}
