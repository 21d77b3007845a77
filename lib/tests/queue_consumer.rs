
#[cfg(test)]
mod test {
    use crate::commons::{notifier_with, queue_message, InMemoryQueue, RecordingEmailSender, SenderBehavior};
    use std::sync::Arc;
    use std::time::Duration;
    use video_frame_notifier::queue_consumer::{BatchSummary, QueueConsumer, QueueConsumerResources};
    use video_frame_notifier::template::SUCCESS_SUBJECT;

    const SUCCESS_BODY: &str = r#"{"email": "a@b.com", "succeeded": true, "downloadUrl": "http://x/y"}"#;
    const FAILURE_BODY: &str = r#"{"email": "c@d.com", "succeeded": false}"#;

    #[tokio::test]
    async fn should_acknowledge_each_handled_message() {
        let email_sender = RecordingEmailSender::new(SenderBehavior::Answer(202));
        let queue = InMemoryQueue::new(vec![queue_message("1", Some(SUCCESS_BODY)), queue_message("2", Some(FAILURE_BODY))]);
        let resources = QueueConsumerResources::new(Arc::new(notifier_with(email_sender.clone())), queue.clone());

        let received_len = QueueConsumer::one_shot(&resources).await.unwrap();

        assert_eq!(2, received_len);
        assert_eq!(vec!["receipt-1".to_string(), "receipt-2".to_string()], queue.acknowledged());

        let recipients = email_sender.sent().into_iter().map(|it| it.to).collect::<Vec<_>>();
        assert_eq!(vec!["a@b.com".to_string(), "c@d.com".to_string()], recipients);
    }

    #[tokio::test]
    async fn should_acknowledge_invalid_message_after_fallback() {
        let email_sender = RecordingEmailSender::new(SenderBehavior::Answer(202));
        let queue = InMemoryQueue::new(vec![]);
        let resources = QueueConsumerResources::new(Arc::new(notifier_with(email_sender.clone())), queue.clone());

        let summary = QueueConsumer::process_batch(&resources, vec![queue_message("1", None), queue_message("2", Some(r#"{"succeeded": true}"#))]).await;

        assert_eq!(
            BatchSummary {
                acknowledged: 2,
                left_for_redelivery: 0,
                acknowledge_failures: 0,
            },
            summary
        );
        assert_eq!(2, email_sender.sent().len());
    }

    #[tokio::test]
    async fn should_acknowledge_when_provider_rejects() {
        let email_sender = RecordingEmailSender::new(SenderBehavior::Answer(500));
        let queue = InMemoryQueue::new(vec![]);
        let resources = QueueConsumerResources::new(Arc::new(notifier_with(email_sender)), queue.clone());

        let summary = QueueConsumer::process_batch(&resources, vec![queue_message("1", Some(SUCCESS_BODY))]).await;

        assert_eq!(1, summary.acknowledged);
        assert_eq!(vec!["receipt-1".to_string()], queue.acknowledged());
    }

    #[tokio::test]
    async fn should_leave_unexpected_failures_for_redelivery() {
        let email_sender = RecordingEmailSender::new(SenderBehavior::PanicOnSubject(SUCCESS_SUBJECT.to_string()));
        let queue = InMemoryQueue::new(vec![]);
        let resources = QueueConsumerResources::new(Arc::new(notifier_with(email_sender)), queue.clone());

        let summary = QueueConsumer::process_batch(&resources, vec![queue_message("1", Some(SUCCESS_BODY)), queue_message("2", Some(FAILURE_BODY))]).await;

        assert_eq!(1, summary.left_for_redelivery);
        assert_eq!(vec!["receipt-2".to_string()], queue.acknowledged());
    }

    #[tokio::test]
    async fn should_keep_processing_when_acknowledge_fails() {
        let email_sender = RecordingEmailSender::new(SenderBehavior::Answer(202));
        let queue = InMemoryQueue::with_failing_receipts(vec![], vec!["receipt-1".to_string()]);
        let resources = QueueConsumerResources::new(Arc::new(notifier_with(email_sender.clone())), queue.clone());

        let summary = QueueConsumer::process_batch(&resources, vec![queue_message("1", Some(SUCCESS_BODY)), queue_message("2", Some(FAILURE_BODY))]).await;

        assert_eq!(1, summary.acknowledge_failures);
        assert_eq!(1, summary.acknowledged);
        assert_eq!(vec!["receipt-2".to_string()], queue.acknowledged());
        assert_eq!(2, email_sender.sent().len());
    }

    #[tokio::test]
    async fn should_stop_consuming_on_shutdown_signal() {
        let email_sender = RecordingEmailSender::new(SenderBehavior::Answer(202));
        let queue = InMemoryQueue::new(vec![queue_message("1", Some(SUCCESS_BODY))]);
        let resources = QueueConsumerResources::new(Arc::new(notifier_with(email_sender.clone())), queue.clone()).with_poll_interval_in_seconds(0);

        let consumer = QueueConsumer::new(resources).with_graceful_shutdown(tokio::time::sleep(Duration::from_millis(200)));

        tokio::time::timeout(Duration::from_secs(5), consumer.init()).await.unwrap().unwrap();

        assert_eq!(vec!["receipt-1".to_string()], queue.acknowledged());
        assert_eq!(1, email_sender.sent().len());
    }

    #[tokio::test]
    async fn should_finish_received_batch_before_stopping() {
        let email_sender = RecordingEmailSender::new(SenderBehavior::AnswerAfter(Duration::from_millis(300)));
        let queue = InMemoryQueue::new(vec![queue_message("1", Some(SUCCESS_BODY)), queue_message("2", Some(FAILURE_BODY))]);
        let resources = QueueConsumerResources::new(Arc::new(notifier_with(email_sender.clone())), queue.clone()).with_poll_interval_in_seconds(0);

        let consumer = QueueConsumer::new(resources).with_graceful_shutdown(tokio::time::sleep(Duration::from_millis(100)));

        tokio::time::timeout(Duration::from_secs(5), consumer.init()).await.unwrap().unwrap();

        assert_eq!(2, email_sender.sent().len());
        assert_eq!(vec!["receipt-1".to_string(), "receipt-2".to_string()], queue.acknowledged());
    }

    #[tokio::test]
    async fn should_stop_while_waiting_for_next_poll() {
        let email_sender = RecordingEmailSender::new(SenderBehavior::Answer(202));
        let queue = InMemoryQueue::new(vec![]);
        let resources = QueueConsumerResources::new(Arc::new(notifier_with(email_sender)), queue).with_poll_interval_in_seconds(3600);

        let consumer = QueueConsumer::new(resources).with_graceful_shutdown(tokio::time::sleep(Duration::from_millis(100)));

        tokio::time::timeout(Duration::from_secs(5), consumer.init()).await.unwrap().unwrap();
    }
}
