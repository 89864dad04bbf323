//! Layout components wrapping groups of routes.

mod admin;
mod guarded;
mod site;

pub use admin::AdminLayout;
pub use guarded::GuardedLayout;
pub use site::SiteLayout;
