use reqwest::{Client as ReqwestClient, StatusCode};
use serde::Serialize;
use std::time::Duration;

use crate::models::errors::SamplerError;

pub(crate) struct HttpClient {
    client: ReqwestClient,
    url: String,
}

impl HttpClient {
    pub(crate) fn new(url: String, timeout: Duration) -> Result<Self, SamplerError> {
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SamplerError::ClientBuild(e.to_string()))?;

        Ok(Self { client, url })
    }

    pub(crate) fn url(&self) -> &str {
        &self.url
    }

    /// Posts `body` as `application/json` and returns the response status.
    pub(crate) async fn post_json<T>(&self, body: &T) -> Result<StatusCode, reqwest::Error>
    where
        T: Serialize + ?Sized,
    {
        let response = self.client.post(&self.url).json(body).send().await?;
        Ok(response.status())
    }
}
