//! Blogfront Client - Dioxus blog application
//!
//! Reader-facing blog plus an admin console, talking to the blog API through
//! a single envelope-aware HTTP client. Runs in the browser (WASM) and on
//! desktop.

#[macro_use]
pub mod logging;

pub mod api;
pub mod api_client;
pub mod auth_session;
pub mod config;
pub mod guard;
pub mod session;
pub mod storage;
pub mod stores;
pub mod token_store;

pub mod components;
pub mod routes;
pub mod views;

pub use api_client::ApiClient;
pub use auth_session::{AuthContext, AuthProvider};
pub use config::ClientConfig;
pub use guard::{GuardDecision, NavigationGuard, Redirect, RouteMeta, RouteTarget};
pub use routes::Route;
pub use session::{Session, SessionError, SessionStore};
pub use stores::PostStore;
pub use token_store::TokenStore;
