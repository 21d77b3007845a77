use crate::email_client::{BrevoEmailClient, EmailMessage, EmailSender};
use crate::error::NotifierError;
use crate::job_outcome::{JobOutcome, JobRecord, Payload};
use crate::notification::{DispatchResult, NotificationResult};
use crate::settings::NotifierSettings;
use crate::template::{EmailTemplates, RenderedEmail};
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::instrument;
use tracing::log::{error, info, warn};
use uuid::Uuid;

/// Turns one job outcome into one email and reports what happened.
///
/// Provider trouble never fails an invocation: only malformed input (400) and
/// unexpected internal failures (500) are surfaced, and both still try to
/// email the user a failure notice.
pub struct Notifier {
    email_sender: Arc<dyn EmailSender>,
    templates: EmailTemplates,
    sender_address: String,
    fallback_email: String,
}

impl Notifier {
    pub fn new(
        email_sender: Arc<dyn EmailSender>,
        templates: EmailTemplates,
        sender_address: &str,
        fallback_email: &str,
    ) -> Self {
        Self {
            email_sender,
            templates,
            sender_address: sender_address.to_string(),
            fallback_email: fallback_email.to_string(),
        }
    }

    pub fn from_settings(settings: &NotifierSettings) -> Result<Self, NotifierError> {
        let email_sender = BrevoEmailClient::from_settings(settings)?;
        let templates = EmailTemplates::from_settings(settings)?;

        Ok(Self::new(Arc::new(email_sender), templates, &settings.email_sender, &settings.fallback_email))
    }

    pub fn validate(record: &JobRecord) -> Result<JobOutcome, NotifierError> {
        record.validate()
    }

    pub fn render(
        &self,
        outcome: &JobOutcome,
    ) -> RenderedEmail {
        self.templates.render(outcome)
    }

    pub async fn dispatch(
        &self,
        email: &str,
        subject: &str,
        html_content: &str,
    ) -> DispatchResult {
        let message = EmailMessage {
            from: self.sender_address.clone(),
            to: email.to_string(),
            subject: subject.to_string(),
            html_content: html_content.to_string(),
        };

        let dispatch_result = match self.email_sender.send(&message).await {
            Ok(status) => DispatchResult::from_status(status),
            Err(error) => DispatchResult::TransportFailed { cause: error.to_string() },
        };

        match &dispatch_result {
            DispatchResult::Delivered { status } => info!("Email \"{}\" sent to {} with provider status {}", subject, email, status),
            DispatchResult::ProviderRejected { status } => error!("Email provider rejected \"{}\" for {} with status {}", subject, email, status),
            DispatchResult::TransportFailed { cause } => error!("Failed to send \"{}\" to {} cause {}", subject, email, cause),
        }

        dispatch_result
    }

    #[instrument(skip_all, name = "handle_job_outcome", fields(invocation_id = %Uuid::now_v7()))]
    pub async fn handle(
        &self,
        payload: Payload,
    ) -> NotificationResult {
        let record = match JobRecord::normalize(payload) {
            Ok(record) => record,
            Err(error) => return self.reject(error, &JobRecord::default()).await,
        };

        let outcome = match Self::validate(&record) {
            Ok(outcome) => outcome,
            Err(error) => return self.reject(error, &record).await,
        };

        match AssertUnwindSafe(self.notify(&outcome)).catch_unwind().await {
            Ok(_) => NotificationResult::handled(&outcome),
            Err(panic) => {
                let error = NotifierError::new(&panic_cause(panic.as_ref()), "Notification failed unexpectedly");
                self.reject(error, &record).await
            },
        }
    }

    async fn notify(
        &self,
        outcome: &JobOutcome,
    ) -> DispatchResult {
        info!("Sending {} notification", if outcome.succeeded() { "success" } else { "failure" });
        let rendered = self.render(outcome);
        self.dispatch(outcome.email(), &rendered.subject, &rendered.html_content).await
    }

    async fn reject(
        &self,
        error: NotifierError,
        record: &JobRecord,
    ) -> NotificationResult {
        if error.is_validation() {
            warn!("Validation error: {}", error);
        } else {
            error!("Unexpected error: {}", error);
        }

        let fallback = JobOutcome::Failed {
            email: record.recipient().unwrap_or(self.fallback_email.clone()),
        };

        info!("Attempting to send failure notification after error");
        if let Err(panic) = AssertUnwindSafe(self.notify(&fallback)).catch_unwind().await {
            error!("Failed to send failure notification cause {}", panic_cause(panic.as_ref()));
        }

        NotificationResult::failed(&error)
    }
}

fn panic_cause(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
