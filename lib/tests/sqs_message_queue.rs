
#[cfg(test)]
mod test {
    use crate::commons::TestContext;
    use serde_json::json;
    use test_context::test_context;
    use video_frame_notifier::message_queue::{MessageQueue, QueueMessage};
    use video_frame_notifier::sqs_message_queue::SqsMessageQueue;
    use wiremock::matchers::{body_partial_json, header, method};
    use wiremock::{Mock, ResponseTemplate};

    const QUEUE_URL: &str = "http://localhost:4566/000000000000/video-frame-notifications";

    fn sqs_response(body: serde_json::Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_raw(body.to_string(), "application/x-amz-json-1.0")
    }

    #[test_context(TestContext)]
    #[tokio::test]
    async fn should_receive_messages_with_clamped_limits(ctx: &mut TestContext) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Mock::given(method("POST"))
            .and(header("x-amz-target", "AmazonSQS.ReceiveMessage"))
            .and(body_partial_json(json!({
                "QueueUrl": QUEUE_URL,
                "MaxNumberOfMessages": 10,
                "WaitTimeSeconds": 0
            })))
            .respond_with(sqs_response(json!({
                "Messages": [
                    {"MessageId": "1", "ReceiptHandle": "receipt-1", "Body": "{\"email\": \"a@b.com\"}"},
                    {"MessageId": "2", "Body": "{}"}
                ]
            })))
            .expect(1)
            .mount(&ctx.mock_server)
            .await;

        let queue = SqsMessageQueue::new(ctx.sqs_client(), QUEUE_URL).with_max_messages(50).with_wait_time_in_seconds(-3);

        let messages = queue.receive().await?;

        assert_eq!(
            vec![QueueMessage {
                message_id: "1".to_string(),
                receipt_handle: "receipt-1".to_string(),
                body: Some("{\"email\": \"a@b.com\"}".to_string()),
            }],
            messages
        );

        Ok(())
    }

    #[test_context(TestContext)]
    #[tokio::test]
    async fn should_receive_nothing_from_empty_queue(ctx: &mut TestContext) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Mock::given(method("POST"))
            .and(header("x-amz-target", "AmazonSQS.ReceiveMessage"))
            .respond_with(sqs_response(json!({})))
            .mount(&ctx.mock_server)
            .await;

        let queue = SqsMessageQueue::new(ctx.sqs_client(), QUEUE_URL).with_wait_time_in_seconds(0);

        assert!(queue.receive().await?.is_empty());

        Ok(())
    }

    #[test_context(TestContext)]
    #[tokio::test]
    async fn should_delete_message_by_receipt_handle(ctx: &mut TestContext) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Mock::given(method("POST"))
            .and(header("x-amz-target", "AmazonSQS.DeleteMessage"))
            .and(body_partial_json(json!({
                "QueueUrl": QUEUE_URL,
                "ReceiptHandle": "receipt-1"
            })))
            .respond_with(sqs_response(json!({})))
            .expect(1)
            .mount(&ctx.mock_server)
            .await;

        let queue = SqsMessageQueue::new(ctx.sqs_client(), QUEUE_URL);
        let message = QueueMessage {
            message_id: "1".to_string(),
            receipt_handle: "receipt-1".to_string(),
            body: None,
        };

        queue.acknowledge(&message).await?;

        Ok(())
    }

    #[test_context(TestContext)]
    #[tokio::test]
    async fn should_fail_acknowledge_when_queue_rejects_delete(ctx: &mut TestContext) {
        Mock::given(method("POST"))
            .and(header("x-amz-target", "AmazonSQS.DeleteMessage"))
            .respond_with(
                ResponseTemplate::new(400).set_body_raw(
                    json!({"__type": "com.amazonaws.sqs#ReceiptHandleIsInvalid", "message": "invalid receipt"}).to_string(),
                    "application/x-amz-json-1.0",
                ),
            )
            .mount(&ctx.mock_server)
            .await;

        let queue = SqsMessageQueue::new(ctx.sqs_client(), QUEUE_URL);
        let message = QueueMessage {
            message_id: "1".to_string(),
            receipt_handle: "stale".to_string(),
            body: None,
        };

        let error = queue.acknowledge(&message).await.unwrap_err();

        assert!(!error.is_validation());
        assert_eq!(Some("Failed to delete sqs message 1".to_string()), error.message);
    }
}
