//! Navigation guard run before every route transition.
//!
//! Each evaluation walks `Idle → Hydrating (when a restored token has no
//! profile yet) → Authorizing → Allow | Redirect`, always in that order.
//! Hydration is a single attempt; if it fails the session is signed out and
//! the transition is judged as anonymous. An evaluation cannot be cancelled
//! by a later navigation, each one runs to completion.

use crate::session::SessionStore;

/// Static guard data attached to a route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteMeta {
    pub requires_auth: bool,
    /// Any one of these grants access. Empty means no role check.
    pub roles: &'static [&'static str],
    pub title: Option<&'static str>,
}

impl RouteMeta {
    pub const fn titled(title: &'static str) -> Self {
        Self {
            requires_auth: false,
            roles: &[],
            title: Some(title),
        }
    }

    pub const fn with_title(self, title: &'static str) -> Self {
        Self {
            title: Some(title),
            ..self
        }
    }
}

/// The transition being evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTarget {
    /// Path plus the query parameters the route models. Unmodelled query
    /// keys and the fragment are not carried, and `&` inside a query value
    /// is not escaped, so only parameter-free paths round-trip exactly.
    pub full_path: String,
    pub meta: RouteMeta,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Redirect {
    /// Sign in first, then come back to `redirect`.
    Login { redirect: String },
    Home,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(Redirect),
}

/// Where the document title goes once a transition is allowed.
pub trait TitleSink {
    fn set_title(&self, title: &str);
}

/// Writes `document.title` in the browser; elsewhere the title is only logged.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentTitle;

impl TitleSink for DocumentTitle {
    #[cfg(target_arch = "wasm32")]
    fn set_title(&self, title: &str) {
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            document.set_title(title);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn set_title(&self, title: &str) {
        crate::log_debug!("title: {title}");
    }
}

#[derive(Debug)]
enum Phase {
    Idle,
    Hydrating,
    Authorizing,
    Decided(GuardDecision),
}

#[derive(Debug, Clone)]
pub struct NavigationGuard<T = DocumentTitle> {
    session: SessionStore,
    titles: T,
    site_name: String,
}

impl NavigationGuard<DocumentTitle> {
    pub fn new(session: SessionStore, site_name: impl Into<String>) -> Self {
        Self::with_title_sink(session, site_name, DocumentTitle)
    }
}

impl<T: TitleSink> NavigationGuard<T> {
    pub fn with_title_sink(session: SessionStore, site_name: impl Into<String>, titles: T) -> Self {
        Self {
            session,
            titles,
            site_name: site_name.into(),
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub async fn evaluate(&self, target: &RouteTarget) -> GuardDecision {
        let mut phase = Phase::Idle;
        loop {
            phase = match phase {
                Phase::Idle if self.session.needs_hydration() => Phase::Hydrating,
                Phase::Idle => Phase::Authorizing,
                Phase::Hydrating => {
                    self.hydrate().await;
                    Phase::Authorizing
                }
                Phase::Authorizing => Phase::Decided(self.authorize(target)),
                Phase::Decided(decision) => {
                    match &decision {
                        GuardDecision::Allow => {
                            if let Some(title) = target.meta.title {
                                self.titles.set_title(&self.format_title(title));
                            }
                        }
                        GuardDecision::Redirect(redirect) => {
                            crate::log_debug!("guard: {} -> {redirect:?}", target.full_path);
                        }
                    }
                    return decision;
                }
            };
        }
    }

    async fn hydrate(&self) {
        if let Err(e) = self.session.fetch_profile().await {
            crate::log_warn!("fetch profile failed: {e}");
            self.session.logout().await;
        }
    }

    fn authorize(&self, target: &RouteTarget) -> GuardDecision {
        let meta = &target.meta;
        if meta.requires_auth && !self.session.is_authenticated() {
            return GuardDecision::Redirect(Redirect::Login {
                redirect: target.full_path.clone(),
            });
        }
        if !meta.roles.is_empty() {
            let held = self.session.roles();
            if !meta.roles.iter().any(|role| held.contains(*role)) {
                return GuardDecision::Redirect(Redirect::Home);
            }
        }
        GuardDecision::Allow
    }

    fn format_title(&self, title: &str) -> String {
        format!("{title} | {}", self.site_name)
    }
}
