//! Wire models for the blog API. Field names are camelCase on the wire.

use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Role granted to site administrators.
pub const ROLE_ADMIN: &str = "ROLE_ADMIN";

// --- Auth ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoginResult {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct LogoutRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

/// The signed-in user as returned by `GET /auth/profile`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub roles: BTreeSet<String>,
}

impl Profile {
    /// Nickname when set, username otherwise.
    pub fn display_name(&self) -> &str {
        self.nickname
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.username)
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(ROLE_ADMIN)
    }
}

// --- Posts ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub id: i64,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub published_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub tag_names: Vec<String>,
    #[serde(default)]
    pub view_count: Option<u64>,
    #[serde(default)]
    pub like_count: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PostDetail {
    #[serde(flatten)]
    pub summary: PostSummary,
    pub content: String,
    #[serde(default)]
    pub comment_count: Option<u64>,
    #[serde(default)]
    pub liked_by_current_user: Option<bool>,
    #[serde(default)]
    pub favorited_by_current_user: Option<bool>,
}

/// Body of `POST /posts` and `PUT /posts/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PostPayload {
    pub title: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading_time: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_keywords: Option<String>,
    #[serde(default)]
    pub tag_ids: Vec<i64>,
}

/// Query for `GET /posts` and `GET /posts/manage`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub status: Option<String>,
}

/// Query for `GET /search/posts`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub q: String,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

// --- Comments ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommentItem {
    pub id: i64,
    pub post_id: i64,
    #[serde(default)]
    pub parent_id: Option<i64>,
    pub content: String,
    pub author_name: String,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub children: Vec<CommentItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CommentPayload {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommentModerationItem {
    pub id: i64,
    pub post_id: i64,
    pub post_title: String,
    pub author_name: String,
    pub content: String,
    pub status: String,
    pub created_at: NaiveDateTime,
}

/// Query for `GET /admin/comments`. The server defaults `status` to `pending`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModerationQuery {
    pub status: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

// --- Tags ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TagItem {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub post_count: Option<u32>,
    #[serde(default)]
    pub subscribed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TagPayload {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// --- Interactions ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InteractionResult {
    pub active: bool,
    pub total: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionResult {
    pub subscribed: bool,
}

// --- Analytics ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsOverview {
    pub today_pv: u64,
    pub today_uv: u64,
    pub published_posts: u64,
    pub pending_comments: u64,
    #[serde(default)]
    pub hot_posts: Vec<HotPost>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HotPost {
    pub post_id: i64,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub view_count: Option<u64>,
    pub score: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_display_name_falls_back_to_username() {
        let mut profile: Profile = serde_json::from_str(
            r#"{"id":7,"username":"ada","roles":["ROLE_USER","ROLE_ADMIN"]}"#,
        )
        .unwrap();
        assert_eq!(profile.display_name(), "ada");
        assert!(profile.is_admin());

        profile.nickname = Some("Ada L.".to_string());
        assert_eq!(profile.display_name(), "Ada L.");
    }

    #[test]
    fn post_detail_flattens_summary_fields() {
        let detail: PostDetail = serde_json::from_str(
            r#"{"id":1,"title":"Hello","slug":"hello","content":"body",
                "publishedAt":"2024-03-01T09:30:00","tagNames":["rust"],"likedByCurrentUser":true}"#,
        )
        .unwrap();
        assert_eq!(detail.summary.slug, "hello");
        assert_eq!(detail.summary.tag_names, vec!["rust".to_string()]);
        assert_eq!(detail.liked_by_current_user, Some(true));
        assert!(detail.summary.published_at.is_some());
    }

    #[test]
    fn optional_payload_fields_are_omitted() {
        let json = serde_json::to_value(CommentPayload {
            content: "nice".to_string(),
            parent_id: None,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"content": "nice"}));
    }
}
