use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::{header, HeaderMap, HeaderName, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use super::{CacheBackend, CacheError};

/// Marks whether a response was served from the cache
pub const X_CACHE: &str = "x-cache";

/// Headers that belong to a single exchange and are never replayed
const PER_REQUEST_HEADERS: [&str; 2] = ["x-request-id", X_CACHE];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl CachedResponse {
    pub fn new(status: StatusCode, headers: &HeaderMap, body: Vec<u8>) -> Self {
        let headers = headers
            .iter()
            .filter(|(name, _)| !PER_REQUEST_HEADERS.contains(&name.as_str()))
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.to_string(), v.to_string()))
            })
            .collect();

        Self {
            status: status.as_u16(),
            headers,
            body,
        }
    }
}

impl IntoResponse for CachedResponse {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = StatusCode::from_u16(self.status).unwrap_or(StatusCode::OK);

        let headers = response.headers_mut();
        for (name, value) in &self.headers {
            if let (Ok(name), Ok(value)) = (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                headers.append(name, value);
            }
        }
        response
    }
}

/// Response cache for idempotent reads.
///
/// Entries are keyed by method, path, query and the `Cookie` header, so each
/// client cookie sees its own copy. Writes never invalidate entries; they
/// age out after the TTL.
#[derive(Clone)]
pub struct ResponseCache {
    backend: Arc<dyn CacheBackend>,
    ttl: Duration,
    max_body_size: usize,
}

impl ResponseCache {
    pub fn new(backend: Arc<dyn CacheBackend>, ttl: Duration) -> Self {
        Self {
            backend,
            ttl,
            max_body_size: 1024 * 1024,
        }
    }

    fn generate_cache_key(request: &Request) -> String {
        let mut key_parts = vec![
            request.method().to_string(),
            request.uri().path().to_string(),
            request.uri().query().unwrap_or_default().to_string(),
        ];

        let cookie = request
            .headers()
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect::<Vec<_>>()
            .join("; ");
        key_parts.push(format!("cookie:{}", cookie));

        format!("http_cache:{}", key_parts.join(":"))
    }

    fn should_cache_response(response: &Response) -> bool {
        if response.status() != StatusCode::OK {
            return false;
        }

        match response.headers().get(header::CACHE_CONTROL) {
            Some(value) => value
                .to_str()
                .map(|v| !v.contains("no-store") && !v.contains("private"))
                .unwrap_or(true),
            None => true,
        }
    }

    async fn lookup(&self, key: &str) -> Option<CachedResponse> {
        match self.backend.get(key).await {
            Ok(Some(raw)) => match serde_json::from_str::<CachedResponse>(&raw) {
                Ok(cached) => {
                    debug!("Cache hit for key: {}", key);
                    Some(cached)
                }
                Err(e) => {
                    warn!("Failed to deserialize cached response: {}", e);
                    None
                }
            },
            Ok(None) => {
                debug!("Cache miss for key: {}", key);
                None
            }
            Err(e) => {
                warn!("Cache error: {}", e);
                None
            }
        }
    }

    async fn store(&self, key: &str, cached: &CachedResponse) -> Result<(), CacheError> {
        if cached.body.len() > self.max_body_size {
            debug!("Response body too large to cache: {} bytes", cached.body.len());
            return Ok(());
        }

        let serialized = serde_json::to_string(cached)?;
        self.backend.set(key, &serialized, Some(self.ttl)).await?;
        debug!("Stored response in cache with key: {}", key);
        Ok(())
    }

    fn decorate(&self, headers: &mut HeaderMap) {
        headers.insert(header::VARY, HeaderValue::from_static("Cookie"));
        if let Ok(value) = HeaderValue::from_str(&format!("max-age={}", self.ttl.as_secs())) {
            headers.insert(header::CACHE_CONTROL, value);
        }
    }
}

/// Serves cached copies of successful GET responses and stores fresh ones.
pub async fn response_cache(
    State(cache): State<ResponseCache>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() != Method::GET {
        return next.run(request).await;
    }

    let key = ResponseCache::generate_cache_key(&request);

    if let Some(cached) = cache.lookup(&key).await {
        let mut response = cached.into_response();
        response
            .headers_mut()
            .insert(X_CACHE, HeaderValue::from_static("HIT"));
        return response;
    }

    let response = next.run(request).await;
    if !ResponseCache::should_cache_response(&response) {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Failed to buffer response body for caching: {}", e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    cache.decorate(&mut parts.headers);
    let cached = CachedResponse::new(parts.status, &parts.headers, bytes.to_vec());
    if let Err(e) = cache.store(&key, &cached).await {
        warn!("Failed to store response in cache: {}", e);
    }

    parts
        .headers
        .insert(X_CACHE, HeaderValue::from_static("MISS"));
    Response::from_parts(parts, Body::from(bytes))
}
