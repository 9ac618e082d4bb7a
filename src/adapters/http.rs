use crate::utils::error::{Result, StatsError};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Shared client for both services. HeadHunter rejects requests without a
/// User-Agent, so one is always set.
pub fn build_client(timeout: Duration, user_agent: &str) -> Result<Client> {
    let client = Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

/// Sends the request and decodes a successful JSON body into `T`.
///
/// Non-2xx statuses become [`StatsError::HttpStatus`]; bodies that do not
/// match `T` become [`StatsError::MalformedResponse`].
pub async fn get_json<T: DeserializeOwned>(service: &str, request: RequestBuilder) -> Result<T> {
    let response = request.send().await?;
    let status = response.status();
    let url = response.url().to_string();
    tracing::debug!("{} response status: {} ({})", service, status, url);

    if !status.is_success() {
        return Err(StatsError::HttpStatus {
            service: service.to_string(),
            status: status.as_u16(),
            url,
        });
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| StatsError::MalformedResponse {
        service: service.to_string(),
        message: e.to_string(),
    })
}
