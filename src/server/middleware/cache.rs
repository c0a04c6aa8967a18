//! In-process response cache for `GET /api/...` requests.
//!
//! The caller is authenticated before the cache is consulted, so a deactivated user or an
//! expired token never receives a stored response. Entries are keyed by user id and role
//! plus path and query: users never see each other's responses, and a role change misses
//! every entry stored under the old role. Successful mutations evict every entry of the
//! mutated resource and of the resources whose figures depend on it.

use std::{
    num::NonZeroUsize,
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    body::{to_bytes, Body, Bytes},
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use lru::LruCache;
use tokio::sync::Mutex;

use crate::server::{
    error::AppError,
    middleware::auth::{AuthGuard, BearerToken},
    model::user::User,
    state::AppState,
};

pub const CACHE_STATUS_HEADER: &str = "x-cache";

/// Resources whose responses embed stock figures. A mutation of any of them evicts
/// all of them.
const STOCK_RESOURCES: &[&str] = &[
    "materials",
    "requests",
    "deliveries",
    "inventory",
    "inventory-items",
    "inventory-reserves",
    "inventory-transactions",
    "stock-movements",
    "statistics",
    "notifications",
];

/// Largest response body that is buffered for caching.
const MAX_CACHED_BODY: usize = 2 * 1024 * 1024;

#[derive(Clone)]
struct CachedResponse {
    resource: String,
    content_type: Option<HeaderValue>,
    body: Bytes,
    stored_at: Instant,
}

/// Shared LRU of successful `GET` responses.
#[derive(Clone)]
pub struct ResponseCache {
    entries: Arc<Mutex<LruCache<String, CachedResponse>>>,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);

        Self {
            entries: Arc::new(Mutex::new(LruCache::new(capacity))),
            ttl,
        }
    }

    /// Evicts cached responses of `resource` and of every resource related to it.
    ///
    /// # Returns
    /// - `usize` - Number of entries removed
    pub async fn invalidate(&self, resource: &str) -> usize {
        let related = related_resources(resource);
        let mut entries = self.entries.lock().await;

        let stale: Vec<String> = entries
            .iter()
            .filter(|(_, cached)| related.iter().any(|r| *r == cached.resource))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &stale {
            entries.pop(key);
        }

        stale.len()
    }

    /// Removes every entry older than the TTL.
    pub async fn purge_expired(&self) -> usize {
        let mut entries = self.entries.lock().await;

        let expired: Vec<String> = entries
            .iter()
            .filter(|(_, cached)| cached.stored_at.elapsed() > self.ttl)
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            entries.pop(key);
        }

        expired.len()
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    async fn get(&self, key: &str) -> Option<CachedResponse> {
        let mut entries = self.entries.lock().await;

        match entries.get(key) {
            Some(cached) if cached.stored_at.elapsed() <= self.ttl => Some(cached.clone()),
            Some(_) => {
                entries.pop(key);
                None
            }
            None => None,
        }
    }

    async fn put(&self, key: String, response: CachedResponse) {
        self.entries.lock().await.put(key, response);
    }
}

/// Caches successful `GET` responses and evicts entries after successful mutations.
///
/// A `GET` whose caller fails authentication bypasses the cache entirely, leaving the
/// handler to answer with the matching 401.
pub async fn response_cache(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let cache = &state.cache;
    let path = request.uri().path().to_string();
    let Some(resource) = resource_of(&path) else {
        return next.run(request).await;
    };
    let resource = resource.to_string();

    let method = request.method().clone();
    if method == Method::GET {
        if !is_cacheable(&path) {
            return next.run(request).await;
        }

        let token = BearerToken::parse(
            request
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok()),
        );
        let user = match AuthGuard::new(&state.db, &state.jwt, &token).require(&[]).await {
            Ok(user) => user,
            Err(_) => return next.run(request).await,
        };

        let key = cache_key(&user, &request);
        if let Some(cached) = cache.get(&key).await {
            return cached_response(cached);
        }

        let response = next.run(request).await;
        if response.status() != StatusCode::OK {
            return response;
        }

        let (parts, body) = response.into_parts();
        let body = match to_bytes(body, MAX_CACHED_BODY).await {
            Ok(body) => body,
            Err(e) => {
                tracing::error!("Failed to buffer response for caching: {}", e);
                return AppError::InternalError("Failed to read response body".to_string())
                    .into_response();
            }
        };

        cache
            .put(
                key,
                CachedResponse {
                    resource,
                    content_type: parts.headers.get(header::CONTENT_TYPE).cloned(),
                    body: body.clone(),
                    stored_at: Instant::now(),
                },
            )
            .await;

        return Response::from_parts(parts, Body::from(body));
    }

    let response = next.run(request).await;

    let mutates = matches!(
        method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    );
    if mutates && response.status().is_success() {
        let evicted = cache.invalidate(&resource).await;
        tracing::debug!("Evicted {} cached responses after {} {}", evicted, method, path);
    }

    response
}

fn cached_response(cached: CachedResponse) -> Response {
    let mut response = Response::new(Body::from(cached.body));
    if let Some(content_type) = cached.content_type {
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, content_type);
    }
    response
        .headers_mut()
        .insert(CACHE_STATUS_HEADER, HeaderValue::from_static("HIT"));
    response
}

fn cache_key(user: &User, request: &Request) -> String {
    let path_and_query = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| request.uri().path());

    format!("{}:{:?}|{}", user.id, user.role, path_and_query)
}

/// First path segment after `/api/`, e.g. `materials` for `/api/materials/3/stock`.
pub fn resource_of(path: &str) -> Option<&str> {
    path.strip_prefix("/api/")
        .and_then(|rest| rest.split('/').next())
        .filter(|segment| !segment.is_empty())
}

fn is_cacheable(path: &str) -> bool {
    !(path == "/api/health" || path.ends_with("/download") || path.ends_with("/preview"))
}

/// Resources evicted together with `resource`.
pub fn related_resources(resource: &str) -> Vec<&str> {
    if STOCK_RESOURCES.contains(&resource) {
        return STOCK_RESOURCES.to_vec();
    }

    match resource {
        // Registration creates users and password changes alter profiles
        "auth" => vec!["auth", "users"],
        "users" => vec!["users", "auth", "projects"],
        "roles" => vec!["roles", "employees"],
        "employees" => vec!["employees", "projects"],
        "uoms" => vec!["uoms", "materials", "inventory-items"],
        "warehouses" => vec!["warehouses", "inventory-items", "statistics"],
        "projects" => vec!["projects", "statistics"],
        other => vec![other],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_first_resource_segment() {
        assert_eq!(resource_of("/api/materials/3/stock"), Some("materials"));
        assert_eq!(resource_of("/api/inventory-items"), Some("inventory-items"));
        assert_eq!(resource_of("/api/"), None);
        assert_eq!(resource_of("/api-docs/openapi.json"), None);
    }

    #[test]
    fn stock_resources_evict_each_other() {
        let related = related_resources("deliveries");

        assert!(related.contains(&"materials"));
        assert!(related.contains(&"inventory-items"));
        assert!(related.contains(&"statistics"));
        assert_eq!(related_resources("institutions"), vec!["institutions"]);
    }

    #[test]
    fn file_contents_and_health_are_not_cached() {
        assert!(!is_cacheable("/api/health"));
        assert!(!is_cacheable("/api/files/4/download"));
        assert!(!is_cacheable("/api/files/4/preview"));
        assert!(is_cacheable("/api/files/4"));
    }

    #[tokio::test]
    async fn purges_only_expired_entries() {
        let cache = ResponseCache::new(10, Duration::from_millis(20));
        let entry = CachedResponse {
            resource: "materials".to_string(),
            content_type: None,
            body: Bytes::from_static(b"{}"),
            stored_at: Instant::now(),
        };

        cache.put("a".to_string(), entry.clone()).await;
        tokio::time::sleep(Duration::from_millis(40)).await;
        cache.put("b".to_string(), CachedResponse { stored_at: Instant::now(), ..entry }).await;

        assert_eq!(cache.purge_expired().await, 1);
        assert_eq!(cache.len().await, 1);
    }
}
