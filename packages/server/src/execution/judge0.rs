use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{ExecutionError, ExecutionRequest, ExecutionService};
use crate::config::ExecutionConfig;

#[derive(Serialize)]
struct BatchBody<'a> {
    submissions: &'a [ExecutionRequest],
}

/// One element of the batch response. Judge0 puts validation errors in place of the
/// token when a single run is rejected, so `token` may be absent.
#[derive(Deserialize)]
struct BatchItem {
    #[serde(default)]
    token: Option<String>,
}

/// HTTP client for a Judge0-compatible execution service.
pub struct Judge0Client {
    http: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
}

impl Judge0Client {
    pub fn new(config: &ExecutionConfig) -> Result<Self, ExecutionError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth_token: config.auth_token.clone(),
        })
    }

    fn batch_url(&self) -> String {
        format!("{}/submissions/batch?base64_encoded=false", self.base_url)
    }
}

#[async_trait]
impl ExecutionService for Judge0Client {
    #[instrument(skip_all, fields(runs = requests.len()))]
    async fn submit_batch(
        &self,
        requests: Vec<ExecutionRequest>,
    ) -> Result<Vec<String>, ExecutionError> {
        let mut req = self.http.post(self.batch_url()).json(&BatchBody {
            submissions: &requests,
        });
        if let Some(ref token) = self.auth_token {
            req = req.header("X-Auth-Token", token);
        }

        let res = req.send().await?;
        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(ExecutionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let items: Vec<BatchItem> = res
            .json()
            .await
            .map_err(|e| ExecutionError::Malformed(e.to_string()))?;
        let tokens = collect_tokens(items, requests.len())?;

        debug!(tokens = tokens.len(), "Batch accepted");
        Ok(tokens)
    }
}

/// Validate a batch response: one non-empty, distinct token per request.
fn collect_tokens(items: Vec<BatchItem>, expected: usize) -> Result<Vec<String>, ExecutionError> {
    if items.len() != expected {
        return Err(ExecutionError::TokenCount {
            expected,
            actual: items.len(),
        });
    }

    let mut seen = HashSet::with_capacity(items.len());
    let mut tokens = Vec::with_capacity(items.len());
    for (i, item) in items.into_iter().enumerate() {
        let token = item
            .token
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ExecutionError::Malformed(format!("run {i} has no token")))?;
        if !seen.insert(token.clone()) {
            return Err(ExecutionError::Malformed(format!(
                "token '{token}' returned twice"
            )));
        }
        tokens.push(token);
    }
    Ok(tokens)
}
