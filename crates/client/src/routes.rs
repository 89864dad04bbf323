//! Application routing configuration and per-route guard metadata.

use blogfront_shared::ROLE_ADMIN;
use dioxus::prelude::*;

use crate::guard::{Redirect, RouteMeta, RouteTarget};
use crate::views::{
    AdminComments, AdminDashboard, AdminLayout, AdminPosts, AdminSettings, AdminTags,
    GuardedLayout, Home, Login, NotFound, PostDetail, Register, SearchResult, SiteLayout,
};

/// Shared by every page under `/admin`; children only change the title.
const ADMIN: RouteMeta = RouteMeta {
    requires_auth: true,
    roles: &[ROLE_ADMIN],
    title: Some("Admin"),
};

// Router configuration
#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(GuardedLayout)]
        // Public site
        #[layout(SiteLayout)]
            #[route("/")]
            Home {},
            #[route("/post/:slug")]
            PostDetail { slug: String },
            #[route("/login?:redirect")]
            Login { redirect: String },
            #[route("/register")]
            Register {},
            #[route("/search?:q")]
            SearchResult { q: String },
        #[end_layout]

        // Admin console
        #[nest("/admin")]
            #[layout(AdminLayout)]
                #[redirect("/", || Route::AdminDashboard {})]
                #[route("/dashboard")]
                AdminDashboard {},
                #[route("/posts")]
                AdminPosts {},
                #[route("/comments")]
                AdminComments {},
                #[route("/tags")]
                AdminTags {},
                #[route("/settings")]
                AdminSettings {},
            #[end_layout]
        #[end_nest]

        #[route("/:..segments")]
        NotFound { segments: Vec<String> },
}

impl Route {
    pub fn meta(&self) -> RouteMeta {
        match self {
            Route::Home {} => RouteMeta::titled("Home"),
            Route::PostDetail { .. } => RouteMeta::titled("Post"),
            Route::Login { .. } => RouteMeta::titled("Sign in"),
            Route::Register {} => RouteMeta::titled("Sign up"),
            Route::SearchResult { .. } => RouteMeta::titled("Search results"),
            Route::AdminDashboard {} => ADMIN.with_title("Dashboard"),
            Route::AdminPosts {} => ADMIN.with_title("Posts"),
            Route::AdminComments {} => ADMIN.with_title("Comments"),
            Route::AdminTags {} => ADMIN.with_title("Tags"),
            Route::AdminSettings {} => ADMIN.with_title("Settings"),
            Route::NotFound { .. } => RouteMeta::default(),
        }
    }

    /// What the navigation guard is asked to judge.
    pub fn target(&self) -> RouteTarget {
        RouteTarget {
            full_path: self.to_string(),
            meta: self.meta(),
        }
    }

    /// Resolve a post-login `redirect` parameter, falling back to home.
    pub fn from_redirect(path: &str) -> Route {
        match path.parse::<Route>() {
            Ok(route) if !path.is_empty() && !matches!(route, Route::Login { .. }) => route,
            _ => Route::Home {},
        }
    }
}

impl From<Redirect> for Route {
    fn from(redirect: Redirect) -> Self {
        match redirect {
            Redirect::Login { redirect } => Route::Login { redirect },
            Redirect::Home => Route::Home {},
        }
    }
}
