pub mod aws;
pub mod email_client;
pub mod environment;
pub mod error;
pub mod http_gateway;
pub mod invocation;
pub mod job_outcome;
pub mod message_queue;
pub mod notification;
pub mod notifier;
pub mod queue_consumer;
pub mod settings;
pub mod shutdown;
pub mod sqs_message_queue;
pub mod template;
