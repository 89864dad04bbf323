//! View components for the application.

pub mod admin;
pub mod auth;
pub mod home;
pub mod layouts;
pub mod not_found;
pub mod post_detail;
pub mod search;

pub use admin::{AdminComments, AdminDashboard, AdminPosts, AdminSettings, AdminTags};
pub use auth::{Login, Register};
pub use home::{Home, PostList};
pub use layouts::{AdminLayout, GuardedLayout, SiteLayout};
pub use not_found::NotFound;
pub use post_detail::PostDetail;
pub use search::SearchResult;

use chrono::NaiveDateTime;

pub(crate) fn format_date(at: &NaiveDateTime) -> String {
    at.format("%Y-%m-%d").to_string()
}

pub(crate) fn format_time(at: &NaiveDateTime) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

/// Treat blank form input as absent.
pub(crate) fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn dates_render_without_seconds() {
        let at = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(14, 5, 59)
            .unwrap();
        assert_eq!(format_date(&at), "2024-03-09");
        assert_eq!(format_time(&at), "2024-03-09 14:05");
    }

    #[test]
    fn blank_input_is_absent() {
        assert_eq!(non_empty("   "), None);
        assert_eq!(non_empty(" Ada "), Some("Ada".to_string()));
    }
}
