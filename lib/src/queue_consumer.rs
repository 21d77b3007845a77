use crate::error::NotifierError;
use crate::job_outcome::Payload;
use crate::message_queue::{MessageQueue, QueueMessage};
use crate::notification::NotificationResult;
use crate::notifier::Notifier;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;
use tracing::log::{error, info, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub acknowledged: usize,
    pub left_for_redelivery: usize,
    pub acknowledge_failures: usize,
}

/// Collaborators shared by every poll of the consumer loop.
#[derive(Clone)]
pub struct QueueConsumerResources {
    pub notifier: Arc<Notifier>,
    pub queue: Arc<dyn MessageQueue>,
    pub poll_interval_in_seconds: Option<u64>,
}

impl QueueConsumerResources {
    pub fn new(
        notifier: Arc<Notifier>,
        queue: Arc<dyn MessageQueue>,
    ) -> Self {
        Self {
            notifier,
            queue,
            poll_interval_in_seconds: None,
        }
    }

    pub fn with_poll_interval_in_seconds(
        self,
        poll_interval_in_seconds: u64,
    ) -> Self {
        Self {
            poll_interval_in_seconds: Some(poll_interval_in_seconds),
            ..self
        }
    }
}

pub struct QueueConsumer {
    resources: QueueConsumerResources,
    signal: Option<Pin<Box<dyn Future<Output = ()> + Send>>>,
}

impl QueueConsumer {
    pub fn new(resources: QueueConsumerResources) -> Self {
        Self { resources, signal: None }
    }

    pub fn with_graceful_shutdown(
        self,
        signal: impl Future<Output = ()> + Send + 'static,
    ) -> Self {
        Self {
            resources: self.resources,
            signal: Some(Box::pin(signal)),
        }
    }

    pub async fn init(self) -> Result<(), NotifierError> {
        info!("Starting queue consumer...");

        let resources = self.resources;
        let mut shutdown_signal = self.signal.unwrap_or(Box::pin(std::future::pending::<()>()));
        let poll_interval = Duration::from_secs(resources.poll_interval_in_seconds.unwrap_or(5));

        info!("Running queue consumer...");
        loop {
            let received = tokio::select! {
                biased;

                _ = &mut shutdown_signal => break,
                received = resources.queue.receive() => received,
            };

            // A received batch always runs to completion, shutdown or not.
            let idle = match received {
                Ok(messages) => QueueConsumer::process_received(&resources, messages).await == 0,
                Err(error) => {
                    error!("Queue consumer failed with error: {}", error);
                    true
                },
            };

            if idle {
                tokio::select! {
                    biased;

                    _ = &mut shutdown_signal => break,
                    _ = tokio::time::sleep(poll_interval) => {},
                }
            }
        }

        info!("Queue consumer stopped!");

        Ok(())
    }

    /// Receives one batch and processes it. Returns the number of received messages.
    pub async fn one_shot(resources: &QueueConsumerResources) -> Result<usize, NotifierError> {
        let messages = resources.queue.receive().await?;

        Ok(Self::process_received(resources, messages).await)
    }

    async fn process_received(
        resources: &QueueConsumerResources,
        messages: Vec<QueueMessage>,
    ) -> usize {
        let received_len = messages.len();

        if received_len > 0 {
            let summary = Self::process_batch(resources, messages).await;
            info!(
                "Processed {} queued messages: {} acknowledged, {} left for redelivery, {} failed to acknowledge",
                received_len, summary.acknowledged, summary.left_for_redelivery, summary.acknowledge_failures
            );
        }

        received_len
    }

    #[instrument(skip_all, name = "process_queue_batch")]
    pub async fn process_batch(
        resources: &QueueConsumerResources,
        messages: Vec<QueueMessage>,
    ) -> BatchSummary {
        let mut summary = BatchSummary::default();

        for message in messages {
            let result = resources.notifier.handle(Payload::from(message.body.clone())).await;

            if !should_acknowledge(&result) {
                warn!("Leaving message {} for redelivery after status {}", message.message_id, result.status_code);
                summary.left_for_redelivery += 1;
                continue;
            }

            match resources.queue.acknowledge(&message).await {
                Ok(_) => summary.acknowledged += 1,
                Err(error) => {
                    error!("{}", error);
                    summary.acknowledge_failures += 1;
                },
            }
        }

        summary
    }
}

/// Malformed messages will not get better on redelivery, unexpected failures might.
fn should_acknowledge(result: &NotificationResult) -> bool {
    result.status_code < 500
}
