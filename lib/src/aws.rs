use std::borrow::Cow;
use std::env;

use aws_config::default_provider::credentials::DefaultCredentialsChain;
use aws_config::{BehaviorVersion, Region};

#[derive(Clone)]
pub struct SqsClient {
    pub client: aws_sdk_sqs::Client,
}

impl SqsClient {
    /// `LOCAL_ENDPOINT` and `LOCAL_REGION` point the client at a local emulator.
    pub async fn new(aws_config: &aws_config::SdkConfig) -> SqsClient {
        let endpoint = env::var("LOCAL_ENDPOINT").ok();
        let region = env::var("LOCAL_REGION").map(|region| Region::new(Cow::Owned(region))).ok();

        let client = match endpoint {
            None => aws_sdk_sqs::Client::new(aws_config),
            Some(url) => aws_sdk_sqs::Client::from_conf(
                aws_sdk_sqs::config::Builder::from(aws_config)
                    .endpoint_url(url)
                    .region(region)
                    .credentials_provider(DefaultCredentialsChain::builder().build().await)
                    .build(),
            ),
        };

        SqsClient { client }
    }

    pub async fn from_env() -> SqsClient {
        let aws_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        Self::new(&aws_config).await
    }
}
