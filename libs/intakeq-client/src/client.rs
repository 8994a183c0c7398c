//! HTTP client for the IntakeQ API.

use async_trait::async_trait;
use bridge_core::directory::{ClientDirectory, ClientMatch};
use bridge_core::models::{ClientId, ClientRecord};
use bridge_core::{Error, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;

/// Production endpoint of the IntakeQ v1 API.
pub const DEFAULT_BASE_URL: &str = "https://api.intakeq.com/v1";

/// Longest response-body excerpt carried on a transport error.
const ERROR_BODY_LIMIT: usize = 512;

/// Authenticated client for the IntakeQ practice-management API.
///
/// Every request carries the bearer token and a JSON content type; the
/// per-request timeout bounds hung calls at the transport boundary, since
/// the core pipeline imposes none itself.
pub struct IntakeQClient {
    http: reqwest::Client,
    base_url: String,
}

impl IntakeQClient {
    pub fn new(api_key: &str, base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|_| Error::Http("API key contains characters invalid in a header".into()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|error| Error::Http(error.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

fn request_error(error: reqwest::Error) -> Error {
    Error::Http(error.to_string())
}

/// Reject non-success statuses, carrying the status code and a body excerpt.
async fn check_status(response: Response, call: &str) -> Result<Response> {
    let status = response.status();
    tracing::info!(call, status = status.as_u16(), "IntakeQ response");

    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::UNAUTHORIZED {
        tracing::error!(call, "IntakeQ rejected the API key");
    }

    let message = response.text().await.unwrap_or_default();
    Err(Error::Transport {
        status: status.as_u16(),
        message: truncate(&message),
    })
}

async fn decode<T: DeserializeOwned>(response: Response, call: &str) -> Result<T> {
    let body = response.text().await.map_err(request_error)?;
    tracing::debug!(call, body = %body, "IntakeQ response body");
    serde_json::from_str(&body).map_err(|error| Error::Decode(error.to_string()))
}

fn truncate(message: &str) -> String {
    let trimmed = message.trim();
    match trimmed.char_indices().nth(ERROR_BODY_LIMIT) {
        Some((index, _)) => trimmed[..index].to_string(),
        None => trimmed.to_string(),
    }
}

#[async_trait]
impl ClientDirectory for IntakeQClient {
    async fn search_by_email(&self, email: &str) -> Result<Vec<ClientMatch>> {
        let response = self
            .http
            .get(self.endpoint("clients"))
            .query(&[("search", email)])
            .send()
            .await
            .map_err(request_error)?;

        // An unknown email comes back as 404 on some API revisions; both it
        // and an empty list mean "no match".
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }

        let response = check_status(response, "search clients").await?;
        decode(response, "search clients").await
    }

    async fn create_client(&self, record: &ClientRecord) -> Result<ClientMatch> {
        let response = self
            .http
            .post(self.endpoint("clients"))
            .json(record)
            .send()
            .await
            .map_err(request_error)?;

        let response = check_status(response, "create client").await?;
        decode(response, "create client").await
    }

    async fn update_client(&self, id: &ClientId, record: &ClientRecord) -> Result<ClientMatch> {
        let response = self
            .http
            .put(self.endpoint(&format!("clients/{id}")))
            .json(record)
            .send()
            .await
            .map_err(request_error)?;

        let response = check_status(response, "update client").await?;
        decode(response, "update client").await
    }

    async fn attach_tag(&self, id: &ClientId, tag: &str) -> Result<()> {
        let response = self
            .http
            .post(self.endpoint(&format!("clients/{id}/tags")))
            .json(&json!({ "tag": tag }))
            .send()
            .await
            .map_err(request_error)?;

        check_status(response, "attach tag").await.map(|_| ())
    }
}
