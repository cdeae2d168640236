//! HTTP transport for the Stride backend.
//!
//! One [`ApiClient`] is shared by the whole process. It owns the reqwest
//! client (connection pool included), joins paths onto the configured base
//! URL, attaches the bearer token from the session, and classifies every
//! response into `Ok(decoded)` or [`ApiError`]. One attempt per call; retry
//! is a user action, not a transport concern.

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::models::ErrorEnvelope;
use crate::session::SessionHandle;

use super::error::ApiError;

/// Production backend.
pub const DEFAULT_API_URL: &str = "https://api.stride.app";

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
    session: SessionHandle,
}

impl ApiClient {
    /// Client against the production backend.
    pub fn new(session: SessionHandle) -> Self {
        Self::with_base_url(DEFAULT_API_URL, session)
    }

    /// Client against a custom base URL (tests point this at a mock server).
    pub fn with_base_url(base_url: impl Into<String>, session: SessionHandle) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: Client::new(),
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(self.request(Method::GET, path)).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    /// POST with an empty JSON object body (`/done`, `/undone` style
    /// endpoints take no payload).
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(
            self.request(Method::POST, path)
                .json(&serde_json::json!({})),
        )
        .await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(self.request(Method::PUT, path).json(body)).await
    }

    pub async fn patch<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(self.request(Method::PATCH, path).json(body))
            .await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.client.request(method, url);
        self.add_auth_header(builder)
    }

    /// Attach `Authorization: Bearer <token>` when the session holds one.
    /// The login exchange is the only call made without a token.
    fn add_auth_header(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => builder.header("Authorization", format!("Bearer {}", token)),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = builder.send().await?;
        Self::decode(response).await
    }

    /// 2xx decodes as `T`; anything else decodes the error envelope, with a
    /// generic "Request failed with status N" when the body has no message.
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let code = status.as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorEnvelope>(&body)
            .ok()
            .and_then(|envelope| envelope.error.message)
            .unwrap_or_else(|| ApiError::fallback_message(code));
        debug!(status = code, %message, "request failed");
        Err(ApiError::Status {
            status: code,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::with_base_url("http://localhost:9999/", SessionHandle::new());
        assert_eq!(client.base_url(), "http://localhost:9999");
    }

    #[test]
    fn test_default_base_url() {
        let client = ApiClient::new(SessionHandle::new());
        assert_eq!(client.base_url(), DEFAULT_API_URL);
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        // Port 1 is never listening; the connect fails before any response.
        let client = ApiClient::with_base_url("http://127.0.0.1:1", SessionHandle::new());
        let result: Result<serde_json::Value, ApiError> = client.get("/v1/me").await;

        match result {
            Err(ApiError::Network(message)) => assert!(!message.is_empty()),
            other => panic!("expected network error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_post_empty_unreachable_server() {
        let client = ApiClient::with_base_url("http://127.0.0.1:1", SessionHandle::new());
        let result: Result<serde_json::Value, ApiError> =
            client.post_empty("/v1/tasks/t1/done").await;
        assert!(matches!(result, Err(ApiError::Network(_))));
    }
}
