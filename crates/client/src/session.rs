//! Session store: tokens plus the signed-in user's profile.
//!
//! Invariant: `user` is only ever `Some` while `access_token` is `Some`.
//! Tokens are mirrored into the [`TokenStore`] so the HTTP client and the next
//! page load see the same credentials.

use std::collections::BTreeSet;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use blogfront_shared::{ApiError, LoginRequest, LoginResult, Profile, RegisterRequest};
use thiserror::Error;

use crate::api::AuthApi;
use crate::api_client::ApiClient;
use crate::token_store::TokenStore;

/// Shown for visitors without a profile.
pub const GUEST_NAME: &str = "Guest";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub user: Option<Profile>,
    pub loading: bool,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    /// A token was restored but the profile has not been fetched yet.
    pub fn needs_hydration(&self) -> bool {
        self.access_token.is_some() && self.user.is_none()
    }

    pub fn roles(&self) -> BTreeSet<String> {
        self.user
            .as_ref()
            .map(|u| u.roles.clone())
            .unwrap_or_default()
    }

    pub fn display_name(&self) -> &str {
        self.user.as_ref().map_or(GUEST_NAME, Profile::display_name)
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(Profile::is_admin)
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("no refresh token available")]
    NoRefreshToken,
    /// `login`/`register` is already running on this store.
    #[error("another sign-in request is already in progress")]
    Busy,
}

impl SessionError {
    pub fn user_message(&self) -> String {
        match self {
            SessionError::Api(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}

/// Owns the [`Session`]. Clones share state.
#[derive(Debug, Clone)]
pub struct SessionStore {
    state: Arc<RwLock<Session>>,
    api: AuthApi,
    tokens: TokenStore,
}

/// Clears `loading` when dropped, whichever way the call ends.
struct LoadingGuard<'a> {
    state: &'a RwLock<Session>,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .loading = false;
    }
}

impl SessionStore {
    /// Build the store from whatever tokens survived the last visit.
    pub fn new(client: ApiClient) -> Self {
        let tokens = client.tokens().clone();
        let session = Session {
            access_token: tokens.access_token(),
            refresh_token: tokens.refresh_token(),
            user: None,
            loading: false,
        };
        Self {
            state: Arc::new(RwLock::new(session)),
            api: client.auth(),
            tokens,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Session> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Session> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> Session {
        self.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_authenticated()
    }

    pub fn needs_hydration(&self) -> bool {
        self.read().needs_hydration()
    }

    pub fn roles(&self) -> BTreeSet<String> {
        self.read().roles()
    }

    pub fn is_loading(&self) -> bool {
        self.read().loading
    }

    fn begin_loading(&self) -> Result<LoadingGuard<'_>, SessionError> {
        let mut state = self.write();
        if state.loading {
            return Err(SessionError::Busy);
        }
        state.loading = true;
        Ok(LoadingGuard { state: &self.state })
    }

    fn set_session(&self, tokens: &LoginResult) {
        self.tokens
            .set_tokens(&tokens.access_token, tokens.refresh_token.as_deref());
        let mut state = self.write();
        state.access_token = Some(tokens.access_token.clone());
        if let Some(refresh) = &tokens.refresh_token {
            state.refresh_token = Some(refresh.clone());
        }
    }

    /// Exchange credentials for tokens, then load the profile.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<(), SessionError> {
        let _loading = self.begin_loading()?;
        let tokens = self.api.login(credentials).await?;
        self.set_session(&tokens);
        self.fetch_profile().await?;
        crate::log_info!("signed in as {}", credentials.username);
        Ok(())
    }

    /// Create an account. The caller still has to sign in.
    pub async fn register(&self, payload: &RegisterRequest) -> Result<Profile, SessionError> {
        let _loading = self.begin_loading()?;
        let profile = self.api.register(payload).await?;
        crate::log_info!("registered account {}", profile.username);
        Ok(profile)
    }

    /// Replace the profile with a fresh copy. Does nothing when signed out.
    pub async fn fetch_profile(&self) -> Result<(), SessionError> {
        if !self.is_authenticated() {
            return Ok(());
        }
        let profile = self.api.fetch_profile().await?;
        let mut state = self.write();
        // A logout may have landed while the request was in flight.
        if state.access_token.is_some() {
            state.user = Some(profile);
        }
        Ok(())
    }

    /// Trade the refresh token for a new pair; returns the new access token.
    pub async fn refresh_tokens(&self) -> Result<String, SessionError> {
        let refresh = self
            .read()
            .refresh_token
            .clone()
            .ok_or(SessionError::NoRefreshToken)?;
        let tokens = self.api.refresh(&refresh).await?;
        self.set_session(&tokens);
        crate::log_debug!("access token refreshed");
        Ok(tokens.access_token)
    }

    /// Replace only the access token.
    pub fn set_access_token(&self, token: &str) {
        self.tokens.set_access_token(token);
        self.write().access_token = Some(token.to_string());
    }

    /// Sign out. The server is told on a best-effort basis; local state is
    /// always cleared.
    pub async fn logout(&self) {
        let refresh = self.read().refresh_token.clone();
        if let Err(e) = self.api.logout(refresh.as_deref()).await {
            crate::log_warn!("logout failed: {e}");
        }
        self.tokens.clear();
        let mut state = self.write();
        state.access_token = None;
        state.refresh_token = None;
        state.user = None;
        crate::log_info!("signed out");
    }

    /// Load the profile for a restored token, signing out if that fails.
    pub async fn bootstrap(&self) {
        if !self.needs_hydration() {
            return;
        }
        if let Err(e) = self.fetch_profile().await {
            crate::log_warn!("restored session is no longer valid: {e}");
            self.logout().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_client::testing::*;
    use crate::storage::{MemoryStorage, StorageBackend};
    use crate::token_store::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
    use serde_json::json;
    use std::time::Duration;

    fn credentials() -> LoginRequest {
        LoginRequest {
            username: "ada".into(),
            password: "secret".into(),
        }
    }

    fn profile_json(roles: &[&str]) -> serde_json::Value {
        json!({"id": 7, "username": "ada", "nickname": "Ada", "roles": roles})
    }

    fn signed_in_storage() -> MemoryStorage {
        MemoryStorage::new()
            .with_entry(ACCESS_TOKEN_KEY, "a0")
            .with_entry(REFRESH_TOKEN_KEY, "r0")
    }

    #[tokio::test]
    async fn login_stores_tokens_and_loads_matching_profile() {
        let transport = FakeTransport::new();
        transport
            .ok("POST /api/auth/login", json!({"accessToken": "a1", "refreshToken": "r1"}))
            .ok("GET /api/auth/profile", profile_json(&["ROLE_USER"]));
        let storage = MemoryStorage::new();
        let store = SessionStore::new(client_with_storage(&transport, storage.clone()));

        store.login(&credentials()).await.unwrap();

        let session = store.snapshot();
        assert_eq!(session.access_token.as_deref(), Some("a1"));
        let user = session.user.as_ref().unwrap();
        assert_eq!((user.id, user.username.as_str()), (7, "ada"));
        assert!(!session.loading);
        assert_eq!(session.display_name(), "Ada");
        assert_eq!(storage.get(ACCESS_TOKEN_KEY).as_deref(), Some("a1"));
        assert_eq!(storage.get(REFRESH_TOKEN_KEY).as_deref(), Some("r1"));

        let profile_req = &transport.requests_to("GET /api/auth/profile")[0];
        assert_eq!(profile_req.bearer.as_deref(), Some("a1"));
    }

    #[tokio::test]
    async fn failed_login_propagates_and_resets_loading() {
        let transport = FakeTransport::new();
        transport.reject("POST /api/auth/login", "AUTH_FAILED", "bad credentials");
        let store = SessionStore::new(client(&transport));

        let err = store.login(&credentials()).await.unwrap_err();

        assert!(matches!(err, SessionError::Api(ApiError::Rejected(_))));
        assert!(!store.is_loading());
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn concurrent_login_is_refused_while_one_is_in_flight() {
        let transport = FakeTransport::new();
        transport
            .slow_ok(
                "POST /api/auth/login",
                json!({"accessToken": "a1"}),
                Duration::from_millis(30),
            )
            .ok("GET /api/auth/profile", profile_json(&[]));
        let store = SessionStore::new(client(&transport));

        let (c1, c2) = (credentials(), credentials());
        let (first, second) = tokio::join!(store.login(&c1), store.login(&c2));

        assert!(first.is_ok());
        assert!(matches!(second, Err(SessionError::Busy)));
        assert_eq!(transport.requests_to("POST /api/auth/login").len(), 1);
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn fetch_profile_without_token_sends_nothing() {
        let transport = FakeTransport::new();
        let store = SessionStore::new(client(&transport));

        store.fetch_profile().await.unwrap();

        assert!(transport.requests().is_empty());
        assert_eq!(store.snapshot().user, None);
    }

    #[tokio::test]
    async fn fetch_profile_replaces_rather_than_merges() {
        let transport = FakeTransport::new();
        transport
            .ok("GET /api/auth/profile", profile_json(&["ROLE_USER", "ROLE_ADMIN"]))
            .ok("GET /api/auth/profile", json!({"id": 7, "username": "ada", "roles": []}));
        let store = SessionStore::new(client_with_storage(&transport, signed_in_storage()));

        store.fetch_profile().await.unwrap();
        assert!(store.snapshot().is_admin());

        store.fetch_profile().await.unwrap();
        let session = store.snapshot();
        assert!(session.roles().is_empty());
        assert_eq!(session.user.unwrap().nickname, None);
    }

    #[tokio::test]
    async fn refresh_without_refresh_token_fails() {
        let transport = FakeTransport::new();
        let storage = MemoryStorage::new().with_entry(ACCESS_TOKEN_KEY, "a0");
        let store = SessionStore::new(client_with_storage(&transport, storage));

        let err = store.refresh_tokens().await.unwrap_err();

        assert!(matches!(err, SessionError::NoRefreshToken));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn refresh_replaces_and_persists_both_tokens() {
        let transport = FakeTransport::new();
        transport.ok(
            "POST /api/auth/refresh",
            json!({"accessToken": "a1", "refreshToken": "r1"}),
        );
        let storage = signed_in_storage();
        let store = SessionStore::new(client_with_storage(&transport, storage.clone()));

        let access = store.refresh_tokens().await.unwrap();

        assert_eq!(access, "a1");
        assert_eq!(store.snapshot().refresh_token.as_deref(), Some("r1"));
        assert_eq!(storage.get(ACCESS_TOKEN_KEY).as_deref(), Some("a1"));
        assert_eq!(storage.get(REFRESH_TOKEN_KEY).as_deref(), Some("r1"));
        assert_eq!(
            transport.requests()[0].json_body(),
            Some(json!({"refreshToken": "r0"}))
        );
    }

    #[tokio::test]
    async fn refresh_without_new_refresh_token_keeps_the_old_one() {
        let transport = FakeTransport::new();
        transport.ok("POST /api/auth/refresh", json!({"accessToken": "a1"}));
        let storage = signed_in_storage();
        let store = SessionStore::new(client_with_storage(&transport, storage.clone()));

        let access = store.refresh_tokens().await.unwrap();

        assert_eq!(access, "a1");
        let session = store.snapshot();
        assert_eq!(session.access_token.as_deref(), Some("a1"));
        assert_eq!(session.refresh_token.as_deref(), Some("r0"));
        assert_eq!(storage.get(ACCESS_TOKEN_KEY).as_deref(), Some("a1"));
        assert_eq!(storage.get(REFRESH_TOKEN_KEY).as_deref(), Some("r0"));
    }

    #[tokio::test]
    async fn logout_clears_everything_when_the_server_is_reachable() {
        let transport = FakeTransport::new();
        transport
            .ok("GET /api/auth/profile", profile_json(&[]))
            .ok("POST /api/auth/logout", ());
        let storage = signed_in_storage();
        let store = SessionStore::new(client_with_storage(&transport, storage.clone()));
        store.fetch_profile().await.unwrap();

        store.logout().await;

        assert_eq!(store.snapshot(), Session::default());
        assert_eq!(storage.get(ACCESS_TOKEN_KEY), None);
        assert_eq!(
            transport.requests_to("POST /api/auth/logout")[0].json_body(),
            Some(json!({"refreshToken": "r0"}))
        );
    }

    #[tokio::test]
    async fn logout_clears_everything_when_the_server_fails() {
        let transport = FakeTransport::new();
        transport.fail("POST /api/auth/logout", "connection reset");
        let storage = signed_in_storage();
        let store = SessionStore::new(client_with_storage(&transport, storage.clone()));

        store.logout().await;

        let session = store.snapshot();
        assert_eq!(session.access_token, None);
        assert_eq!(session.user, None);
        assert_eq!(storage.get(REFRESH_TOKEN_KEY), None);
    }

    #[tokio::test]
    async fn bootstrap_signs_out_when_restored_token_is_rejected() {
        let transport = FakeTransport::new();
        transport
            .raw("GET /api/auth/profile", 401, "Unauthorized")
            .ok("POST /api/auth/logout", ());
        let store = SessionStore::new(client_with_storage(&transport, signed_in_storage()));

        store.bootstrap().await;

        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn register_does_not_sign_in() {
        let transport = FakeTransport::new();
        transport.ok("POST /api/auth/register", profile_json(&["ROLE_USER"]));
        let store = SessionStore::new(client(&transport));

        let payload = RegisterRequest {
            username: "ada".into(),
            email: "ada@example.com".into(),
            password: "secret".into(),
            nickname: None,
        };
        let profile = store.register(&payload).await.unwrap();

        assert_eq!(profile.username, "ada");
        assert!(!store.is_authenticated());
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn rejected_login_surfaces_server_message() {
        let transport = FakeTransport::new();
        transport.reject("POST /api/auth/login", "AUTH_401", "bad credentials");
        let store = SessionStore::new(client(&transport));

        let err = store.login(&credentials()).await.unwrap_err();

        assert_eq!(err.user_message(), "bad credentials");
        assert_eq!(
            SessionError::Busy.user_message(),
            "another sign-in request is already in progress"
        );
    }
}
