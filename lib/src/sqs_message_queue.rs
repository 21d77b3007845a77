use crate::aws::SqsClient;
use crate::error::NotifierError;
use crate::message_queue::{MessageQueue, QueueMessage};
use async_trait::async_trait;
use aws_sdk_sqs::error::DisplayErrorContext;
use aws_sdk_sqs::types::Message;
use tracing::log::warn;

pub struct SqsMessageQueue {
    sqs_client: SqsClient,
    queue_url: String,
    max_messages: i32,
    wait_time_in_seconds: i32,
}

impl SqsMessageQueue {
    pub fn new(
        sqs_client: SqsClient,
        queue_url: &str,
    ) -> Self {
        Self {
            sqs_client,
            queue_url: queue_url.to_string(),
            max_messages: 10,
            wait_time_in_seconds: 20,
        }
    }

    /// SQS accepts between 1 and 10 messages per receive.
    pub fn with_max_messages(
        self,
        max_messages: i32,
    ) -> Self {
        Self {
            max_messages: max_messages.clamp(1, 10),
            ..self
        }
    }

    pub fn with_wait_time_in_seconds(
        self,
        wait_time_in_seconds: i32,
    ) -> Self {
        Self {
            wait_time_in_seconds: wait_time_in_seconds.clamp(0, 20),
            ..self
        }
    }
}

#[async_trait]
impl MessageQueue for SqsMessageQueue {
    async fn receive(&self) -> Result<Vec<QueueMessage>, NotifierError> {
        let output = self
            .sqs_client
            .client
            .receive_message()
            .queue_url(&self.queue_url)
            .max_number_of_messages(self.max_messages)
            .wait_time_seconds(self.wait_time_in_seconds)
            .send()
            .await
            .map_err(|error| NotifierError::new(&DisplayErrorContext(&error).to_string(), "Failed to receive sqs messages"))?;

        Ok(queue_messages(output.messages.unwrap_or_default()))
    }

    async fn acknowledge(
        &self,
        message: &QueueMessage,
    ) -> Result<(), NotifierError> {
        self.sqs_client
            .client
            .delete_message()
            .queue_url(&self.queue_url)
            .receipt_handle(&message.receipt_handle)
            .send()
            .await
            .map_err(|error| {
                NotifierError::new(
                    &DisplayErrorContext(&error).to_string(),
                    &format!("Failed to delete sqs message {}", message.message_id),
                )
            })?;

        Ok(())
    }
}

/// Messages without a receipt handle can't be deleted, so they are skipped.
fn queue_messages(messages: Vec<Message>) -> Vec<QueueMessage> {
    messages
        .into_iter()
        .filter_map(|message| match message.receipt_handle {
            Some(receipt_handle) => Some(QueueMessage {
                message_id: message.message_id.unwrap_or("unknown".to_string()),
                receipt_handle,
                body: message.body,
            }),
            None => {
                warn!("Ignoring sqs message {:?} without receipt handle", message.message_id);
                None
            },
        })
        .collect()
}
