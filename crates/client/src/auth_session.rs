//! App-wide context: the stores, built once at startup and handed to every
//! component through Dioxus context.

use blogfront_shared::{LoginRequest, Profile, RegisterRequest};
use dioxus::prelude::*;

use crate::api_client::ApiClient;
use crate::config::ClientConfig;
use crate::guard::NavigationGuard;
use crate::session::{Session, SessionError, SessionStore};
use crate::stores::PostStore;
use crate::token_store::TokenStore;

/// Everything a view needs to talk to the API.
///
/// The stores are plain shared containers; `snapshot` mirrors the session into
/// a signal so components re-render when it changes.
#[derive(Clone)]
pub struct AuthContext {
    pub config: ClientConfig,
    pub client: ApiClient,
    pub session: SessionStore,
    pub posts: PostStore,
    pub guard: NavigationGuard,
    pub snapshot: Signal<Session>,
}

/// Provider component that builds the stores and restores the session.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let auth = use_context_provider(|| {
        let config = ClientConfig::from_env();
        let client = ApiClient::new(&config, TokenStore::platform());
        let session = SessionStore::new(client.clone());
        AuthContext {
            posts: PostStore::new(&client),
            guard: NavigationGuard::new(session.clone(), config.site_name.clone()),
            snapshot: Signal::new(session.snapshot()),
            session,
            client,
            config,
        }
    });

    use_hook(move || {
        spawn(async move {
            auth.session.bootstrap().await;
            auth.sync();
        });
    });

    children
}

impl AuthContext {
    /// Push the store's current session into the signal.
    pub fn sync(&self) {
        let mut snapshot = self.snapshot;
        snapshot.set(self.session.snapshot());
    }

    pub async fn login(&self, credentials: LoginRequest) -> Result<(), SessionError> {
        let result = self.session.login(&credentials).await;
        self.sync();
        result
    }

    pub async fn register(&self, payload: RegisterRequest) -> Result<Profile, SessionError> {
        let result = self.session.register(&payload).await;
        self.sync();
        result
    }

    pub async fn logout(&self) {
        self.session.logout().await;
        self.sync();
    }

    pub fn is_authenticated(&self) -> bool {
        self.snapshot.read().is_authenticated()
    }
}
