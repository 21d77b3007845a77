use crate::error::NotifierError;
use crate::http_gateway::HttpGateway;
use crate::settings::NotifierSettings;
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::instrument;
use tracing::log::error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html_content: String,
}

/// Outbound email capability.
///
/// Implementations return the provider's HTTP status for any answered request
/// and an error only when no answer was obtained (timeout, connection, encoding).
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(
        &self,
        message: &EmailMessage,
    ) -> Result<u16, NotifierError>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SmtpEmailRequest<'a> {
    sender: Address<'a>,
    to: Vec<Address<'a>>,
    subject: &'a str,
    html_content: &'a str,
}

#[derive(Serialize)]
struct Address<'a> {
    email: &'a str,
}

/// Client for a Brevo compatible `POST /v3/smtp/email` endpoint.
#[derive(Clone)]
pub struct BrevoEmailClient {
    http_gateway: HttpGateway,
    url: String,
    api_key: SecretString,
}

impl BrevoEmailClient {
    pub fn new(
        http_gateway: HttpGateway,
        url: &str,
        api_key: SecretString,
    ) -> Self {
        Self {
            http_gateway,
            url: url.to_string(),
            api_key,
        }
    }

    pub fn from_settings(settings: &NotifierSettings) -> Result<Self, NotifierError> {
        let http_gateway = HttpGateway::new(settings.http_timeout_in_millis)?;
        Ok(Self::new(http_gateway, &settings.email_provider_url, settings.email_api_key.clone()))
    }
}

#[async_trait]
impl EmailSender for BrevoEmailClient {
    #[instrument(skip_all, name = "send_to_email_provider")]
    async fn send(
        &self,
        message: &EmailMessage,
    ) -> Result<u16, NotifierError> {
        let request = SmtpEmailRequest {
            sender: Address { email: &message.from },
            to: vec![Address { email: &message.to }],
            subject: &message.subject,
            html_content: &message.html_content,
        };

        let body = serde_json::to_string(&request).map_err(|error| NotifierError::new(&error.to_string(), "Failed to encode email provider request"))?;

        let response = self
            .http_gateway
            .client
            .post(&self.url)
            .header("api-key", self.api_key.expose_secret())
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .body(body)
            .send()
            .await
            .map_err(|error| NotifierError::provider(&error.to_string(), "Failed to reach email provider"))?;

        let status = response.status();
        if !status.is_success() {
            error!(
                "Email provider answered {} with body {}",
                status,
                response.text().await.unwrap_or("unknown".to_string())
            );
        }

        Ok(status.as_u16())
    }
}
