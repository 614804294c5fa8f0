use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info, warn};

pub const DEFAULT_RESEND_API_URL: &str = "https://api.resend.com";

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("mail provider unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Resend API error ({status}): {message}")]
    Provider { status: u16, message: String },
}

/// Body of a single send request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Coarse outcome of a credential check against the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProbeStatus {
    #[serde(rename = "valid key")]
    ValidKey,
    #[serde(rename = "invalid key")]
    InvalidKey,
    #[serde(rename = "connection error")]
    ConnectionError,
    #[serde(rename = "not tested")]
    NotTested,
}

#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, api_key: &str, email: &OutgoingEmail) -> Result<(), DispatchError>;

    /// Sends a throwaway message to learn whether `api_key` is accepted.
    async fn probe(&self, api_key: &str, from: &str) -> ProbeStatus;
}

/// Resend's REST API.
#[derive(Debug, Clone)]
pub struct ResendClient {
    client: reqwest::Client,
    base_url: String,
}

impl ResendClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn emails_url(&self) -> String {
        format!("{}/emails", self.base_url)
    }

    async fn post_email(
        &self,
        api_key: &str,
        email: &OutgoingEmail,
    ) -> Result<reqwest::Response, reqwest::Error> {
        self.client
            .post(self.emails_url())
            .bearer_auth(api_key)
            .json(email)
            .send()
            .await
    }
}

#[async_trait]
impl MailTransport for ResendClient {
    async fn send(&self, api_key: &str, email: &OutgoingEmail) -> Result<(), DispatchError> {
        info!(to = %email.to, "Sending email");

        let response = self.post_email(api_key, email).await?;
        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!(to = %email.to, status = %status, error = %e, "Unreadable Resend response body");
                String::new()
            }
        };

        if !status.is_success() {
            error!(to = %email.to, status = %status, body = %body, "Resend API error");
            return Err(DispatchError::Provider {
                status: status.as_u16(),
                message: provider_message(&body),
            });
        }

        info!(to = %email.to, "Email sent");
        Ok(())
    }

    async fn probe(&self, api_key: &str, from: &str) -> ProbeStatus {
        let test_email = OutgoingEmail {
            from: from.to_string(),
            to: "test@example.com".to_string(),
            subject: "Test".to_string(),
            html: "<p>Test</p>".to_string(),
        };

        match self.post_email(api_key, &test_email).await {
            Ok(response) => probe_status(response.status().as_u16()),
            Err(e) => {
                error!(error = %e, "Resend probe failed");
                ProbeStatus::ConnectionError
            }
        }
    }
}

pub fn probe_status(status: u16) -> ProbeStatus {
    if status == 401 {
        ProbeStatus::InvalidKey
    } else {
        ProbeStatus::ValidKey
    }
}

/// The provider's `message` field when the body is JSON carrying one,
/// otherwise the whole body.
pub fn provider_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}
