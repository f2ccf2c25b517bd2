//! CloudHaven API client
//!
//! The fetch wrapper every domain service goes through. Depending on the
//! [`ServeMode`] a call hits the live backend, the mock router, or the live
//! backend with the mock router as a fallback for unreachable servers.

use super::error::{ApiError, Result};
use super::http::{sanitize_for_log, ApiHttpClient, RawResponse};
use crate::mock::MockRouter;
use crate::notification::{Notification, NotificationManager};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::RwLock;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";

const CONNECTION_ERROR_MESSAGE: &str =
    "Failed to connect to the API. Please check your network connection and try again.";

/// Where API calls are answered from
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ServeMode {
    /// Network only
    Live,
    /// Network first, mock data when the server is unreachable
    #[default]
    Development,
    /// Mock data only
    Mock,
}

impl ServeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Development => "development",
            Self::Mock => "mock",
        }
    }
}

impl fmt::Display for ServeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServeMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "live" => Ok(Self::Live),
            "development" | "dev" => Ok(Self::Development),
            "mock" => Ok(Self::Mock),
            other => Err(format!("unknown serve mode: {}", other)),
        }
    }
}

/// Method, body and headers of one call
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<Value>,
    pub headers: HeaderMap,
}

impl Default for RequestOptions {
    fn default() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        Self {
            method: Method::GET,
            body: None,
            headers,
        }
    }
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn post() -> Self {
        Self::new(Method::POST)
    }

    pub fn put() -> Self {
        Self::new(Method::PUT)
    }

    pub fn delete() -> Self {
        Self::new(Method::DELETE)
    }

    /// Attach a JSON body
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = Some(serde_json::to_value(body).map_err(ApiError::Encode)?);
        Ok(self)
    }

    /// Set a header, replacing any default of the same name
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Fetch wrapper shared by all domain services
#[derive(Clone)]
pub struct ApiClient {
    http: ApiHttpClient,
    base_url: String,
    mode: ServeMode,
    router: MockRouter,
    notifications: Arc<RwLock<NotificationManager>>,
}

impl ApiClient {
    /// Create a client for `base_url`
    pub fn new(base_url: &str, mode: ServeMode) -> Result<Self> {
        url::Url::parse(base_url).map_err(|source| ApiError::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        })?;

        Ok(Self {
            http: ApiHttpClient::new()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            mode,
            router: MockRouter::new(),
            notifications: Arc::new(RwLock::new(NotificationManager::new())),
        })
    }

    /// Client that never leaves the process
    pub fn mock() -> Result<Self> {
        Self::new(DEFAULT_API_BASE_URL, ServeMode::Mock)
    }

    /// Replace the mock router (e.g. one over a custom store)
    pub fn with_router(mut self, router: MockRouter) -> Self {
        self.router = router;
        self
    }

    pub fn mode(&self) -> ServeMode {
        self.mode
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn router(&self) -> &MockRouter {
        &self.router
    }

    /// Toasts raised by failed calls
    pub fn notifications(&self) -> Arc<RwLock<NotificationManager>> {
        Arc::clone(&self.notifications)
    }

    /// Full URL for an endpoint
    pub fn api_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Perform a call and decode the answer into `T`
    pub async fn fetch_api<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T> {
        let value = self.fetch_value(endpoint, options).await?;
        serde_json::from_value(value).map_err(|source| ApiError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }

    /// Perform a call and return the raw JSON answer
    pub async fn fetch_value(&self, endpoint: &str, options: RequestOptions) -> Result<Value> {
        let url = self.api_url(endpoint);
        tracing::debug!("Fetching from: {}", url);

        if self.mode == ServeMode::Mock {
            return self.answer_from_mock(endpoint, &options);
        }

        let sent = self
            .http
            .send(
                options.method.clone(),
                &url,
                &options.headers,
                options.body.as_ref(),
            )
            .await;

        match sent {
            Ok(raw) => self.handle_response(endpoint, raw).await,
            Err(source) if self.mode == ServeMode::Development => {
                tracing::warn!(
                    "API request to {} failed ({}), falling back to mock data",
                    url,
                    source
                );
                self.answer_from_mock(endpoint, &options)
            },
            Err(source) => {
                tracing::error!("API request to {} failed: {}", url, source);
                self.notify(Notification::destructive(
                    "Connection Error",
                    CONNECTION_ERROR_MESSAGE,
                ))
                .await;
                Err(ApiError::Transport { url, source })
            },
        }
    }

    async fn handle_response(&self, endpoint: &str, raw: RawResponse) -> Result<Value> {
        if !raw.is_success() {
            let message = raw.error_message();
            self.notify(Notification::destructive("API Error", &message))
                .await;
            return Err(ApiError::Request {
                status: raw.status,
                message,
            });
        }

        let value = raw.json().map_err(|source| {
            tracing::error!(
                "Failed to parse response from {}: {}",
                endpoint,
                sanitize_for_log(&raw.body)
            );
            ApiError::Decode {
                endpoint: endpoint.to_string(),
                source,
            }
        })?;

        tracing::debug!("{} answered {}", endpoint, raw.status);
        Ok(value)
    }

    fn answer_from_mock(&self, endpoint: &str, options: &RequestOptions) -> Result<Value> {
        let result = self
            .router
            .dispatch(endpoint, &options.method, options.body.as_ref());

        match &result {
            Ok(_) => tracing::debug!("mock answered {} {}", options.method, endpoint),
            Err(e) if e.is_routing_error() => tracing::error!("Mock routing failed: {}", e),
            Err(e) => tracing::debug!("mock {} {} failed: {}", options.method, endpoint, e),
        }

        result
    }

    async fn notify(&self, notification: Notification) {
        self.notifications.write().await.push(notification);
    }

    // =========================================================================
    // Verb helpers
    // =========================================================================

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        self.fetch_api(endpoint, RequestOptions::get()).await
    }

    pub async fn post<T, B>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.fetch_api(endpoint, RequestOptions::post().json(body)?)
            .await
    }

    /// POST without a body
    pub async fn post_empty<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        self.fetch_api(endpoint, RequestOptions::post()).await
    }

    pub async fn put<T, B>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.fetch_api(endpoint, RequestOptions::put().json(body)?)
            .await
    }

    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        self.fetch_api(endpoint, RequestOptions::delete()).await
    }
}
