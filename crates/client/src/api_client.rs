//! HTTP API client: bearer injection, request timeout and envelope unwrapping.
//!
//! The wire itself sits behind [`Transport`] so the stores can be driven by a
//! scripted transport in tests; [`ReqwestTransport`] is the real one.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use blogfront_shared::{ApiError, Envelope};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::token_store::TokenStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// A fully resolved outbound request.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Base URL, path and encoded query.
    pub url: String,
    /// Sent as `Authorization: Bearer <token>`.
    pub bearer: Option<String>,
    /// JSON body.
    pub body: Option<Vec<u8>>,
}

impl ApiRequest {
    /// Body decoded back to JSON, for inspection.
    pub fn json_body(&self) -> Option<serde_json::Value> {
        self.body
            .as_deref()
            .and_then(|b| serde_json::from_slice(b).ok())
    }
}

/// Status and body of whatever the server sent back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

#[cfg(not(target_arch = "wasm32"))]
pub trait MaybeSync: Send + Sync {}
#[cfg(not(target_arch = "wasm32"))]
impl<T: Send + Sync> MaybeSync for T {}

#[cfg(target_arch = "wasm32")]
pub trait MaybeSync {}
#[cfg(target_arch = "wasm32")]
impl<T> MaybeSync for T {}

/// Moves one request over the wire.
///
/// Errors are transport errors only: anything that produced a response,
/// whatever its status, is `Ok`.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait Transport: MaybeSync {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError>;
}

/// [`Transport`] over `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(target_arch = "wasm32")]
    fn absolute(url: &str) -> String {
        if url.contains("://") {
            return url.to_string();
        }
        let origin = web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_default();
        format!("{}{}", origin.trim_end_matches('/'), url)
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn absolute(url: &str) -> String {
        url.to_string()
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
        let url = Self::absolute(&request.url);
        let mut rb = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Delete => self.client.delete(&url),
        };

        #[cfg(target_arch = "wasm32")]
        {
            rb = rb.fetch_credentials_include();
        }

        if let Some(token) = &request.bearer {
            rb = rb.bearer_auth(token);
        }
        if let Some(body) = request.body {
            rb = rb.header("Content-Type", "application/json").body(body);
        }

        let resp = rb
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| ApiError::Transport(format!("failed to read body: {e}")))?;

        Ok(RawResponse { status, body })
    }
}

/// Ordered query parameters; `None` values are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query(Vec<(&'static str, String)>);

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, key: &'static str, value: impl ToString) -> Self {
        self.0.push((key, value.to_string()));
        self
    }

    pub fn opt<V: ToString>(self, key: &'static str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.param(key, v),
            None => self,
        }
    }

    fn encode(&self) -> Option<String> {
        if self.0.is_empty() {
            return None;
        }
        let mut ser = url::form_urlencoded::Serializer::new(String::new());
        for (k, v) in &self.0 {
            ser.append_pair(k, v);
        }
        Some(ser.finish())
    }
}

/// Client shared by every API module. Cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    tokens: TokenStore,
    base_url: String,
    timeout: Duration,
}

impl ApiClient {
    /// Client over the real network.
    pub fn new(config: &ClientConfig, tokens: TokenStore) -> Self {
        Self::with_transport(config, tokens, ReqwestTransport::new())
    }

    pub fn with_transport(
        config: &ClientConfig,
        tokens: TokenStore,
        transport: impl Transport + 'static,
    ) -> Self {
        Self {
            transport: Arc::new(transport),
            tokens,
            base_url: config.base_url.clone(),
            timeout: config.timeout,
        }
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    fn url(&self, path: &str, query: &Query) -> String {
        let mut url = if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            let base = self.base_url.trim_end_matches('/');
            let path = path.trim_start_matches('/');
            format!("{base}/{path}")
        };
        if let Some(qs) = query.encode() {
            url.push(if url.contains('?') { '&' } else { '?' });
            url.push_str(&qs);
        }
        url
    }

    pub async fn get<TRes: DeserializeOwned>(
        &self,
        path: &str,
        query: Query,
    ) -> Result<TRes, ApiError> {
        self.execute(Method::Get, path, &query, None).await
    }

    pub async fn post<TReq: Serialize + ?Sized, TRes: DeserializeOwned>(
        &self,
        path: &str,
        body: &TReq,
    ) -> Result<TRes, ApiError> {
        let body = encode_body(body)?;
        self.execute(Method::Post, path, &Query::new(), Some(body))
            .await
    }

    /// POST without a request body.
    pub async fn post_empty<TRes: DeserializeOwned>(&self, path: &str) -> Result<TRes, ApiError> {
        self.execute(Method::Post, path, &Query::new(), None).await
    }

    pub async fn put<TReq: Serialize + ?Sized, TRes: DeserializeOwned>(
        &self,
        path: &str,
        body: &TReq,
    ) -> Result<TRes, ApiError> {
        let body = encode_body(body)?;
        self.execute(Method::Put, path, &Query::new(), Some(body))
            .await
    }

    /// PUT without a request body.
    pub async fn put_empty<TRes: DeserializeOwned>(&self, path: &str) -> Result<TRes, ApiError> {
        self.execute(Method::Put, path, &Query::new(), None).await
    }

    pub async fn delete<TRes: DeserializeOwned>(&self, path: &str) -> Result<TRes, ApiError> {
        self.execute(Method::Delete, path, &Query::new(), None).await
    }

    async fn execute<TRes: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &Query,
        body: Option<Vec<u8>>,
    ) -> Result<TRes, ApiError> {
        let request = ApiRequest {
            method,
            url: self.url(path, query),
            bearer: self.tokens.access_token(),
            body,
        };
        let label = format!("{} {}", method.as_str(), request.url);

        let raw = match with_timeout(self.transport.send(request), self.timeout).await {
            Ok(raw) => raw,
            Err(e) => {
                crate::log_debug!("{label} failed: {e}");
                return Err(e);
            }
        };
        crate::log_debug!("{label} -> {}", raw.status);

        unwrap_envelope(raw)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn encode_body<T: Serialize + ?Sized>(body: &T) -> Result<Vec<u8>, ApiError> {
    serde_json::to_vec(body).map_err(|e| ApiError::Decode(format!("failed to encode body: {e}")))
}

/// Turn a raw response into the caller's data or the matching error.
pub fn unwrap_envelope<TRes: DeserializeOwned>(raw: RawResponse) -> Result<TRes, ApiError> {
    let ok_status = (200..300).contains(&raw.status);
    match Envelope::parse(&raw.body) {
        Some(envelope) if !envelope.success => Err(ApiError::Rejected(envelope)),
        Some(envelope) if ok_status => {
            serde_json::from_value(envelope.data).map_err(|e| ApiError::Decode(e.to_string()))
        }
        None if ok_status => Err(ApiError::Rejected(Envelope::fallback())),
        _ => Err(ApiError::Http {
            status: raw.status,
            body: raw.body,
        }),
    }
}

#[cfg(not(target_arch = "wasm32"))]
async fn with_timeout<F>(fut: F, timeout: Duration) -> Result<RawResponse, ApiError>
where
    F: std::future::Future<Output = Result<RawResponse, ApiError>>,
{
    tokio::time::timeout(timeout, fut)
        .await
        .map_err(|_| ApiError::Timeout(timeout.as_millis() as u64))?
}

#[cfg(target_arch = "wasm32")]
async fn with_timeout<F>(fut: F, timeout: Duration) -> Result<RawResponse, ApiError>
where
    F: std::future::Future<Output = Result<RawResponse, ApiError>>,
{
    use futures_util::future::{select, Either};

    let sleep = gloo_timers::future::sleep(timeout);
    futures_util::pin_mut!(fut, sleep);
    match select(fut, sleep).await {
        Either::Left((result, _)) => result,
        Either::Right(_) => Err(ApiError::Timeout(timeout.as_millis() as u64)),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted transport used by the unit tests of every module.

    use super::*;
    use std::collections::VecDeque;
    use std::sync::{Mutex, PoisonError};

    use crate::storage::MemoryStorage;

    type Reply = (Result<RawResponse, ApiError>, Option<Duration>);

    /// Replies are matched by `"METHOD /path"` (query stripped), first in
    /// first out; unscripted requests get a 404. A reply is claimed when its
    /// request is sent, so a slow reply never reorders the queue.
    #[derive(Clone, Default)]
    pub struct FakeTransport {
        routes: Arc<Mutex<Vec<(String, VecDeque<Reply>)>>>,
        log: Arc<Mutex<Vec<ApiRequest>>>,
    }

    impl FakeTransport {
        pub fn new() -> Self {
            Self::default()
        }

        fn push(&self, key: &str, reply: Reply) {
            let mut routes = self.routes.lock().unwrap_or_else(PoisonError::into_inner);
            match routes.iter_mut().find(|(k, _)| k == key) {
                Some((_, queue)) => queue.push_back(reply),
                None => routes.push((key.to_string(), VecDeque::from([reply]))),
            }
        }

        fn envelope(envelope: Envelope) -> Result<RawResponse, ApiError> {
            Ok(RawResponse {
                status: 200,
                body: serde_json::to_string(&envelope).unwrap(),
            })
        }

        /// Script a successful envelope around `data`.
        pub fn ok(&self, key: &str, data: impl Serialize) -> &Self {
            self.push(key, (Self::envelope(Envelope::ok(data)), None));
            self
        }

        /// Like [`ok`](Self::ok), delivered after `delay`.
        pub fn slow_ok(&self, key: &str, data: impl Serialize, delay: Duration) -> &Self {
            self.push(key, (Self::envelope(Envelope::ok(data)), Some(delay)));
            self
        }

        /// Script an application-level rejection.
        pub fn reject(&self, key: &str, code: &str, message: &str) -> &Self {
            self.push(key, (Self::envelope(Envelope::failure(code, message)), None));
            self
        }

        pub fn raw(&self, key: &str, status: u16, body: &str) -> &Self {
            let reply = Ok(RawResponse {
                status,
                body: body.to_string(),
            });
            self.push(key, (reply, None));
            self
        }

        /// Script a transport failure (no response).
        pub fn fail(&self, key: &str, message: &str) -> &Self {
            self.push(key, (Err(ApiError::Transport(message.to_string())), None));
            self
        }

        pub fn requests(&self) -> Vec<ApiRequest> {
            self.log
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }

        pub fn requests_to(&self, key: &str) -> Vec<ApiRequest> {
            self.requests()
                .into_iter()
                .filter(|r| route_key(r) == key)
                .collect()
        }
    }

    fn route_key(request: &ApiRequest) -> String {
        let path = request.url.split('?').next().unwrap_or(&request.url);
        format!("{} {}", request.method.as_str(), path)
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
            let key = route_key(&request);
            self.log
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(request);
            let scripted = {
                let mut routes = self.routes.lock().unwrap_or_else(PoisonError::into_inner);
                routes
                    .iter_mut()
                    .find(|(k, _)| *k == key)
                    .and_then(|(_, queue)| queue.pop_front())
            };
            let Some((reply, delay)) = scripted else {
                return Ok(RawResponse {
                    status: 404,
                    body: String::new(),
                });
            };
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            reply
        }
    }

    /// Client with a base URL of `/api`, fresh in-memory tokens and `transport`.
    pub fn client(transport: &FakeTransport) -> ApiClient {
        client_with_storage(transport, MemoryStorage::new())
    }

    pub fn client_with_storage(transport: &FakeTransport, storage: MemoryStorage) -> ApiClient {
        ApiClient::with_transport(
            &ClientConfig::default(),
            TokenStore::new(storage),
            transport.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use blogfront_shared::PageResult;

    #[tokio::test]
    async fn success_envelope_yields_data() {
        let transport = FakeTransport::new();
        transport.ok("GET /api/tags/count", 42);
        let client = client(&transport);

        let n: u32 = client.get("/tags/count", Query::new()).await.unwrap();
        assert_eq!(n, 42);
    }

    #[tokio::test]
    async fn bearer_is_injected_only_when_a_token_exists() {
        let transport = FakeTransport::new();
        transport.ok("GET /api/a", ()).ok("GET /api/a", ());
        let client = client(&transport);

        let _: () = client.get("a", Query::new()).await.unwrap();
        client.tokens().set_access_token("tok");
        let _: () = client.get("a", Query::new()).await.unwrap();

        let sent = transport.requests();
        assert_eq!(sent[0].bearer, None);
        assert_eq!(sent[1].bearer.as_deref(), Some("tok"));
    }

    #[tokio::test]
    async fn failed_envelope_rejects_with_the_envelope() {
        let transport = FakeTransport::new();
        transport.reject("POST /api/tags", "TAG_EXISTS", "tag already exists");
        let client = client(&transport);

        let err = client
            .post::<_, serde_json::Value>("/tags", &serde_json::json!({"name": "rust"}))
            .await
            .unwrap_err();
        match err {
            ApiError::Rejected(envelope) => {
                assert_eq!(envelope.code, "TAG_EXISTS");
                assert_eq!(envelope.message, "tag already exists");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_envelope_rejects_with_generic_message() {
        let transport = FakeTransport::new();
        transport.raw("GET /api/posts", 200, "");
        let client = client(&transport);

        let err = client
            .get::<PageResult<u32>>("/posts", Query::new())
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::Rejected(Envelope::fallback()));
    }

    #[tokio::test]
    async fn non_envelope_error_status_keeps_status_and_body() {
        let transport = FakeTransport::new();
        transport.raw("DELETE /api/tags/3", 502, "Bad Gateway");
        let client = client(&transport);

        let err = client.delete::<()>("/tags/3").await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Http {
                status: 502,
                body: "Bad Gateway".to_string()
            }
        );
    }

    #[tokio::test]
    async fn transport_errors_propagate_unchanged() {
        let transport = FakeTransport::new();
        transport.fail("GET /api/posts", "connection refused");
        let client = client(&transport);

        let err = client.get::<()>("/posts", Query::new()).await.unwrap_err();
        assert_eq!(err, ApiError::Transport("connection refused".to_string()));
    }

    #[tokio::test]
    async fn slow_responses_time_out() {
        let transport = FakeTransport::new();
        transport.slow_ok("GET /api/posts", (), Duration::from_secs(5));
        let client = ApiClient::with_transport(
            &ClientConfig::default().with_timeout(Duration::from_millis(20)),
            TokenStore::new(crate::storage::MemoryStorage::new()),
            transport.clone(),
        );

        let err = client.get::<()>("/posts", Query::new()).await.unwrap_err();
        assert_eq!(err, ApiError::Timeout(20));
    }

    #[tokio::test]
    async fn query_is_encoded_in_order_and_skips_none() {
        let transport = FakeTransport::new();
        transport.ok("GET /api/search/posts", PageResult::<u32>::empty(1, 10));
        let client = client(&transport);

        let query = Query::new()
            .param("q", "rust & wasm")
            .opt("page", Some(1))
            .opt::<u32>("size", None);
        let _: PageResult<u32> = client.get("/search/posts", query).await.unwrap();

        assert_eq!(
            transport.requests()[0].url,
            "/api/search/posts?q=rust+%26+wasm&page=1"
        );
    }
}
