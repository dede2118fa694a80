//! HTTP transport
//!
//! One shared `reqwest::Client` behind every endpoint group. All requests
//! carry `Authorization: Bearer <token>`; non-2xx responses are read for a
//! `message` field before falling back to the raw status line.

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

use crate::config::Settings;
use crate::error::ClientError;
use crate::session::Session;

#[derive(Debug, Deserialize)]
struct ApiMessage {
    message: String,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(settings: &Settings) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.api.timeout_seconds))
            .build()?;
        Ok(Self {
            http,
            base_url: settings.api.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        session: &Session,
        path: &str,
    ) -> Result<T, ClientError> {
        let request = self.http.get(self.url(path)).bearer_auth(session.token());
        self.execute(request, path).await
    }

    pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        session: &Session,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let request = self
            .http
            .post(self.url(path))
            .bearer_auth(session.token())
            .json(body);
        self.execute(request, path).await
    }

    pub(crate) async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        session: &Session,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let request = self
            .http
            .put(self.url(path))
            .bearer_auth(session.token())
            .json(body);
        self.execute(request, path).await
    }

    pub(crate) async fn delete(&self, session: &Session, path: &str) -> Result<(), ClientError> {
        let request = self.http.delete(self.url(path)).bearer_auth(session.token());
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(self.status_error(status, response, path).await)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        path: &str,
    ) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(self.status_error(status, response, path).await);
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            warn!(endpoint = path, error = %e, "failed to decode response body");
            ClientError::Decode(e.to_string())
        })
    }

    async fn status_error(
        &self,
        status: StatusCode,
        response: reqwest::Response,
        path: &str,
    ) -> ClientError {
        let body = response.text().await.unwrap_or_default();
        warn!(endpoint = path, status = status.as_u16(), "request failed");

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return ClientError::Unauthorized;
        }

        let message = serde_json::from_str::<ApiMessage>(&body)
            .map(|m| m.message)
            .unwrap_or_else(|_| {
                if body.is_empty() {
                    status.to_string()
                } else {
                    body
                }
            });

        ClientError::Api {
            status: status.as_u16(),
            message,
        }
    }
}
