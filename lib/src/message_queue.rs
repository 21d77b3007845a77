use crate::error::NotifierError;
use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueMessage {
    pub message_id: String,
    pub receipt_handle: String,
    pub body: Option<String>,
}

/// Source of queued job outcomes. A message is removed only through `acknowledge`.
#[async_trait]
pub trait MessageQueue: Send + Sync {
    async fn receive(&self) -> Result<Vec<QueueMessage>, NotifierError>;

    async fn acknowledge(
        &self,
        message: &QueueMessage,
    ) -> Result<(), NotifierError>;
}
