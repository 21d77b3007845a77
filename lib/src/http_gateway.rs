use std::time::Duration;

use crate::error::NotifierError;
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};

/// Shared outbound HTTP client. Every request is bounded by the configured timeout.
#[derive(Clone)]
pub struct HttpGateway {
    pub client: ClientWithMiddleware,
}

impl HttpGateway {
    pub fn new(request_timeout_in_millis: u64) -> Result<Self, NotifierError> {
        let client = ClientBuilder::new(
            Client::builder()
                .timeout(Duration::from_millis(request_timeout_in_millis))
                .connect_timeout(Duration::from_millis(request_timeout_in_millis))
                .build()
                .map_err(|error| NotifierError::new(&error.to_string(), "Failed to create http gateway client"))?,
        )
        .build();

        Ok(Self { client })
    }
}
