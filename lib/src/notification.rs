use crate::error::NotifierError;
use crate::job_outcome::JobOutcome;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchResult {
    Delivered { status: u16 },
    ProviderRejected { status: u16 },
    TransportFailed { cause: String },
}

impl DispatchResult {
    pub fn from_status(status: u16) -> Self {
        match status {
            201 | 202 => DispatchResult::Delivered { status },
            _ => DispatchResult::ProviderRejected { status },
        }
    }

    pub fn is_delivered(&self) -> bool {
        matches!(self, DispatchResult::Delivered { .. })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResult {
    pub status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl NotificationResult {
    pub fn handled(outcome: &JobOutcome) -> Self {
        Self {
            status_code: 200,
            email: Some(outcome.email().to_string()),
            download_url: outcome.download_url().map(str::to_string),
            message: None,
        }
    }

    pub fn failed(error: &NotifierError) -> Self {
        let status_code = if error.is_validation() { error.status_code } else { 500 };

        Self {
            status_code,
            email: None,
            download_url: None,
            message: Some(error.caller_message()),
        }
    }
}
