//! HTTP multicast push provider.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use peerhub_core::config::delivery::PushConfig;
use peerhub_core::error::AppError;
use peerhub_core::result::AppResult;
use peerhub_core::traits::channel::PushSender;
use peerhub_core::types::delivery::PushOutcome;

/// Provider error codes meaning the token is permanently dead.
const INVALID_TOKEN_ERRORS: [&str; 3] =
    ["NotRegistered", "InvalidRegistration", "MismatchSenderId"];

#[derive(Debug, Serialize)]
struct MulticastRequest<'a> {
    registration_ids: &'a [String],
    notification: MessageBody<'a>,
    data: &'a HashMap<String, String>,
}

#[derive(Debug, Serialize)]
struct MessageBody<'a> {
    title: &'a str,
    body: &'a str,
}

#[derive(Debug, Deserialize)]
struct MulticastResponse {
    success: u32,
    failure: u32,
    results: Vec<SendResult>,
}

#[derive(Debug, Deserialize)]
struct SendResult {
    #[serde(default)]
    error: Option<String>,
}

/// Push sender over the FCM legacy HTTP multicast endpoint.
#[derive(Debug)]
pub struct FcmPushSender {
    config: PushConfig,
    client: reqwest::Client,
}

impl FcmPushSender {
    /// Create a push sender from configuration.
    pub fn new(config: PushConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl PushSender for FcmPushSender {
    async fn send_multicast(
        &self,
        tokens: &[String],
        title: &str,
        body: &str,
        data: HashMap<String, String>,
    ) -> AppResult<PushOutcome> {
        if tokens.is_empty() {
            return Ok(PushOutcome::default());
        }

        let request = MulticastRequest {
            registration_ids: tokens,
            notification: MessageBody { title, body },
            data: &data,
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("key={}", self.config.server_key),
            )
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::delivery(format!("Push multicast request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::delivery(format!(
                "Push provider returned status {status}"
            )));
        }

        let parsed: MulticastResponse = response
            .json()
            .await
            .map_err(|e| AppError::delivery(format!("Invalid push provider response: {e}")))?;

        // Per-token results come back in request order; pair them up to
        // recover which tokens are permanently dead.
        let invalid_tokens = parsed
            .results
            .iter()
            .zip(tokens)
            .filter(|(result, _)| {
                result
                    .error
                    .as_deref()
                    .is_some_and(|e| INVALID_TOKEN_ERRORS.contains(&e))
            })
            .map(|(_, token)| token.clone())
            .collect();

        debug!(
            success = parsed.success,
            failure = parsed.failure,
            "Push multicast completed"
        );

        Ok(PushOutcome {
            success_count: parsed.success,
            failure_count: parsed.failure,
            invalid_tokens,
        })
    }
}
