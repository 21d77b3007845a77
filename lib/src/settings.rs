use crate::environment::Environment;
use crate::error::NotifierError;
use secrecy::SecretString;

pub const DEFAULT_EMAIL_SENDER: &str = "videoframeprofiap@gmail.com";
pub const DEFAULT_EMAIL_PROVIDER_URL: &str = "https://api.brevo.com/v3/smtp/email";
pub const DEFAULT_LOGO_URL: &str = "https://i.ibb.co/tLQk12V/logo.png";
pub const DEFAULT_FALLBACK_EMAIL: &str = "not-provided";

/// Process-wide configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct NotifierSettings {
    pub email_api_key: SecretString,
    pub email_sender: String,
    pub email_provider_url: String,
    pub http_timeout_in_millis: u64,
    pub support_email: String,
    pub logo_url: String,
    pub fallback_email: String,
    pub success_subject: Option<String>,
    pub failure_subject: Option<String>,
    pub success_template_path: Option<String>,
    pub failure_template_path: Option<String>,
    pub queue_url: Option<String>,
    pub queue_max_messages: i32,
    pub queue_wait_time_in_seconds: i32,
    pub queue_poll_interval_in_seconds: u64,
    pub server_port: u16,
}

impl NotifierSettings {
    pub fn from_env() -> Result<Self, NotifierError> {
        let email_api_key = SecretString::from(Environment::required_string("EMAIL_API_KEY")?);
        let email_sender = Environment::string("EMAIL_SENDER", DEFAULT_EMAIL_SENDER);
        let support_email = Environment::string("SUPPORT_EMAIL", &email_sender);

        Ok(Self {
            email_api_key,
            email_provider_url: Environment::string("EMAIL_PROVIDER_URL", DEFAULT_EMAIL_PROVIDER_URL),
            http_timeout_in_millis: Environment::u64("HTTP_TIMEOUT_IN_MILLIS", 3000)?,
            support_email,
            email_sender,
            logo_url: Environment::string("LOGO_URL", DEFAULT_LOGO_URL),
            fallback_email: Environment::string("FALLBACK_EMAIL", DEFAULT_FALLBACK_EMAIL),
            success_subject: Environment::optional_string("SUCCESS_SUBJECT"),
            failure_subject: Environment::optional_string("FAILURE_SUBJECT"),
            success_template_path: Environment::optional_string("SUCCESS_TEMPLATE_PATH"),
            failure_template_path: Environment::optional_string("FAILURE_TEMPLATE_PATH"),
            queue_url: Environment::optional_string("QUEUE_URL"),
            queue_max_messages: Environment::i32("QUEUE_MAX_MESSAGES", 10)?.clamp(1, 10),
            queue_wait_time_in_seconds: Environment::i32("QUEUE_WAIT_TIME_IN_SECONDS", 20)?.clamp(0, 20),
            queue_poll_interval_in_seconds: Environment::u64("QUEUE_POLL_INTERVAL_IN_SECONDS", 5)?,
            server_port: Environment::u16("SERVER_PORT", 9095)?,
        })
    }
}
