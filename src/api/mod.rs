//! Backend REST client
//!
//! `ApiClient` is a cheap handle over shared state: the base URL, the default
//! headers sent with every request, the registered response interceptors and
//! the transport that actually moves bytes. The Authorization header is not
//! part of the ordinary default headers. It lives behind a `CredentialSlot`
//! that is handed out exactly once, when the client is built, so whoever owns
//! the session is the only code able to change it.

pub mod accounts;
pub mod campaigns;
pub mod models;
pub mod multipart;
pub mod templates;
pub mod transport;
pub mod upload;

pub use accounts::AccountsApi;
pub use campaigns::CampaignsApi;
pub use multipart::MultipartForm;
pub use templates::TemplatesApi;
pub use transport::UreqTransport;

use crate::config::schema::ApiConfig;
use crate::error::{DeskError, DeskResult};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// Versioned prefix shared by all backend routes
pub const API_PREFIX: &str = "/api/v1";

/// Name of the header carrying the bearer credential
pub const AUTHORIZATION: &str = "Authorization";

/// Upload progress callback: `(bytes_sent, bytes_total)`
pub type ProgressFn = Arc<dyn Fn(u64, u64) + Send + Sync>;

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// Request body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Empty,
    Json(String),
    Bytes { content_type: String, data: Vec<u8> },
}

/// A fully resolved request, as seen by a transport
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Body,
    pub progress: Option<ProgressFn>,
}

impl HttpRequest {
    /// Look up a header by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Raw response returned by a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Moves a request over the wire
///
/// The default implementation is [`UreqTransport`]; tests script responses
/// with their own implementations.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute the request. HTTP error statuses are returned as responses;
    /// only failures to get a response at all are errors.
    async fn execute(&self, request: HttpRequest) -> DeskResult<HttpResponse>;
}

/// Observer for failed responses
///
/// Interceptors run after the response arrived and before the error is
/// handed back to the caller. They cannot swallow or replace the error.
#[async_trait]
pub trait ResponseInterceptor: Send + Sync {
    async fn on_error(&self, error: &DeskError);
}

/// Handle returned when registering an interceptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InterceptorId(u64);

/// A request relative to the API base URL
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Body,
    progress: Option<ProgressFn>,
    intercept: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: Body::Empty,
            progress: None,
            intercept: true,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Append a query parameter
    pub fn query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Path with the query string, values percent-encoded
    fn target(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let pairs: Vec<String> = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect();
        format!("{}?{}", self.path, pairs.join("&"))
    }

    /// Attach a JSON body
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> DeskResult<Self> {
        self.body = Body::Json(serde_json::to_string(body)?);
        Ok(self)
    }

    /// Attach a multipart form body
    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.body = Body::Bytes {
            content_type: form.content_type(),
            data: form.into_bytes(),
        };
        self
    }

    /// Report upload progress while the body is sent
    pub fn progress(mut self, progress: ProgressFn) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Skip response interceptors for this request
    pub fn without_interceptors(mut self) -> Self {
        self.intercept = false;
        self
    }
}

struct Shared {
    base_url: String,
    headers: RwLock<BTreeMap<String, String>>,
    authorization: RwLock<Option<String>>,
    interceptors: RwLock<Vec<(InterceptorId, Arc<dyn ResponseInterceptor>)>>,
    next_interceptor: AtomicU64,
    transport: Arc<dyn Transport>,
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|e| e.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|e| e.into_inner())
}

/// Client for the backend REST API
#[derive(Clone)]
pub struct ApiClient {
    shared: Arc<Shared>,
}

/// Exclusive write access to the client's Authorization header
///
/// Not `Clone`: exactly one exists per client.
pub struct CredentialSlot {
    shared: Arc<Shared>,
}

impl CredentialSlot {
    /// Send `Authorization: Bearer <token>` with every subsequent request
    pub fn set_bearer(&self, token: &str) {
        *write(&self.shared.authorization) = Some(format!("Bearer {}", token));
    }

    /// Stop sending the Authorization header
    pub fn clear(&self) {
        *write(&self.shared.authorization) = None;
    }

    /// Current header value
    pub fn current(&self) -> Option<String> {
        read(&self.shared.authorization).clone()
    }
}

impl ApiClient {
    /// Build a client and its credential slot
    pub fn new(
        config: &ApiConfig,
        transport: Arc<dyn Transport>,
    ) -> DeskResult<(Self, CredentialSlot)> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(DeskError::InvalidBaseUrl(config.base_url.clone()));
        }

        let mut headers = BTreeMap::new();
        headers.insert("Accept".to_string(), "application/json".to_string());
        headers.insert("User-Agent".to_string(), config.user_agent.clone());

        let shared = Arc::new(Shared {
            base_url,
            headers: RwLock::new(headers),
            authorization: RwLock::new(None),
            interceptors: RwLock::new(Vec::new()),
            next_interceptor: AtomicU64::new(1),
            transport,
        });

        let slot = CredentialSlot {
            shared: Arc::clone(&shared),
        };
        Ok((Self { shared }, slot))
    }

    /// Base URL requests are resolved against
    pub fn base_url(&self) -> &str {
        &self.shared.base_url
    }

    /// Resolve a path against the base URL
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.shared.base_url, path)
        } else {
            format!("{}/{}", self.shared.base_url, path)
        }
    }

    /// Set a default header sent with every request.
    ///
    /// The Authorization header is owned by the [`CredentialSlot`] and is
    /// rejected here.
    pub fn set_default_header(&self, name: &str, value: &str) -> DeskResult<()> {
        if name.eq_ignore_ascii_case(AUTHORIZATION) {
            return Err(DeskError::Internal(
                "the Authorization header is managed by the session".to_string(),
            ));
        }
        write(&self.shared.headers).insert(name.to_string(), value.to_string());
        Ok(())
    }

    /// Snapshot of the headers every request carries, Authorization included
    pub fn default_headers(&self) -> BTreeMap<String, String> {
        let mut headers = read(&self.shared.headers).clone();
        if let Some(auth) = read(&self.shared.authorization).clone() {
            headers.insert(AUTHORIZATION.to_string(), auth);
        }
        headers
    }

    /// Current Authorization header value, if any
    pub fn authorization(&self) -> Option<String> {
        read(&self.shared.authorization).clone()
    }

    /// Register a response interceptor
    pub fn add_response_interceptor(
        &self,
        interceptor: Arc<dyn ResponseInterceptor>,
    ) -> InterceptorId {
        let id = InterceptorId(self.shared.next_interceptor.fetch_add(1, Ordering::Relaxed));
        write(&self.shared.interceptors).push((id, interceptor));
        debug!("Registered response interceptor {:?}", id);
        id
    }

    /// Deregister a response interceptor. Returns false if it was not registered.
    pub fn remove_response_interceptor(&self, id: InterceptorId) -> bool {
        let mut interceptors = write(&self.shared.interceptors);
        let before = interceptors.len();
        interceptors.retain(|(existing, _)| *existing != id);
        let removed = interceptors.len() != before;
        if removed {
            debug!("Removed response interceptor {:?}", id);
        }
        removed
    }

    /// Number of registered interceptors
    pub fn interceptor_count(&self) -> usize {
        read(&self.shared.interceptors).len()
    }

    /// Send a request and return the successful response.
    ///
    /// Non-2xx responses become [`DeskError::Api`]; interceptors see the
    /// error first, then it is returned unchanged.
    pub async fn send(&self, request: ApiRequest) -> DeskResult<HttpResponse> {
        let path = request.target();
        let ApiRequest {
            method,
            body,
            progress,
            intercept,
            ..
        } = request;

        let url = self.url(&path);
        let headers: Vec<(String, String)> = self.default_headers().into_iter().collect();

        debug!("{} {}", method.as_str(), url);
        let response = self
            .shared
            .transport
            .execute(HttpRequest {
                method,
                url,
                headers,
                body,
                progress,
            })
            .await?;

        if response.is_success() {
            return Ok(response);
        }

        let error = DeskError::Api {
            status: response.status,
            message: error_message(&response.body),
        };
        debug!("{} {} failed: {}", method.as_str(), path, error);

        if intercept {
            // Snapshot so no lock is held while interceptors run
            let interceptors: Vec<Arc<dyn ResponseInterceptor>> = read(&self.shared.interceptors)
                .iter()
                .map(|(_, i)| Arc::clone(i))
                .collect();
            for interceptor in interceptors {
                interceptor.on_error(&error).await;
            }
        }

        Err(error)
    }

    /// Send a request and decode the JSON response
    pub async fn send_json<T: DeserializeOwned>(&self, request: ApiRequest) -> DeskResult<T> {
        let response = self.send(request).await?;
        decode(&response.body)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> DeskResult<T> {
        self.send_json(ApiRequest::get(path)).await
    }

    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> DeskResult<T> {
        self.send_json(ApiRequest::post(path).json(body)?).await
    }

    pub async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> DeskResult<T> {
        self.send_json(ApiRequest::put(path).json(body)?).await
    }

    pub async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> DeskResult<T> {
        self.send_json(ApiRequest::delete(path)).await
    }
}

/// Decode a JSON body, reporting the shape mismatch instead of a bare serde error
pub fn decode<T: DeserializeOwned>(body: &str) -> DeskResult<T> {
    serde_json::from_str(body).map_err(|e| DeskError::UnexpectedResponse(e.to_string()))
}

/// Pull a human-readable message out of an error body.
///
/// The backend answers with `{"message": ...}` from its own handlers and
/// `{"detail": ...}` from framework validation.
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;

    for key in ["message", "detail"] {
        match value.get(key) {
            Some(serde_json::Value::String(s)) if !s.trim().is_empty() => {
                return Some(s.trim().to_string())
            }
            Some(serde_json::Value::Array(items)) => {
                let joined: Vec<String> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                    .map(str::to_string)
                    .collect();
                if !joined.is_empty() {
                    return Some(joined.join("; "));
                }
            }
            _ => {}
        }
    }

    None
}
