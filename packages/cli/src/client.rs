use std::time::Duration;

use anyhow::{Context, Result, bail};
use common::submission::{SubmissionPoll, SubmitRequest, SubmitResponse};
use reqwest::blocking::{Client, Response};
use serde::Deserialize;

use crate::poll::StatusSource;

#[derive(Deserialize)]
struct ErrorBody {
    code: String,
    message: String,
}

/// Blocking client for the judge's submission API.
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: String,
}

impl ApiClient {
    pub fn new(base_url: &str, token: &str) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    pub fn submit(&self, req: &SubmitRequest) -> Result<i32> {
        let res = self
            .http
            .post(format!("{}/api/v1/submissions", self.base_url))
            .bearer_auth(&self.token)
            .json(req)
            .send()
            .context("Failed to reach server")?;
        let body: SubmitResponse = parse(res)?;
        Ok(body.submission_id)
    }

    pub fn status(&self, id: i32) -> Result<SubmissionPoll> {
        let res = self
            .http
            .get(format!("{}/api/v1/submissions/{id}", self.base_url))
            .bearer_auth(&self.token)
            .send()
            .context("Failed to reach server")?;
        parse(res)
    }
}

impl StatusSource for ApiClient {
    fn fetch(&self, id: i32) -> Result<SubmissionPoll> {
        self.status(id)
    }
}

fn parse<T: serde::de::DeserializeOwned>(res: Response) -> Result<T> {
    let status = res.status();
    if status.is_success() {
        return res.json().context("Unexpected response from server");
    }
    match res.json::<ErrorBody>() {
        Ok(err) => bail!("{} ({}): {}", status, err.code, err.message),
        Err(_) => bail!("Server returned {status}"),
    }
}
