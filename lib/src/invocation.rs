use crate::job_outcome::Payload;
use crate::notification::NotificationResult;
use crate::notifier::Notifier;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

/// Synchronous trigger: `body` is either the record itself or its JSON encoding.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InvocationEvent {
    #[serde(default)]
    pub body: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResponse {
    pub status_code: u16,
    pub body: InvocationBody,
}

impl From<NotificationResult> for InvocationResponse {
    fn from(result: NotificationResult) -> Self {
        Self {
            status_code: result.status_code,
            body: InvocationBody {
                message: result.message,
                email: result.email,
                download_url: result.download_url,
            },
        }
    }
}

#[instrument(skip_all, name = "invoke")]
pub async fn invoke(
    notifier: &Notifier,
    event: InvocationEvent,
) -> InvocationResponse {
    notifier.handle(Payload::from(event.body)).await.into()
}
