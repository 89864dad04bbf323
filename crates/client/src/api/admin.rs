//! Comment moderation endpoints under `/admin/comments`.

use blogfront_shared::{ApiError, CommentModerationItem, ModerationQuery, PageResult};

use crate::api_client::{ApiClient, Query};

#[derive(Debug, Clone)]
pub struct AdminApi {
    client: ApiClient,
}

impl AdminApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn fetch_comments(
        &self,
        params: &ModerationQuery,
    ) -> Result<PageResult<CommentModerationItem>, ApiError> {
        let query = Query::new()
            .opt("status", params.status.as_deref())
            .opt("page", params.page)
            .opt("size", params.size);
        self.client.get("/admin/comments", query).await
    }

    pub async fn approve_comment(&self, id: i64) -> Result<(), ApiError> {
        self.client
            .put_empty(&format!("/admin/comments/{id}/approve"))
            .await
    }

    pub async fn reject_comment(&self, id: i64) -> Result<(), ApiError> {
        self.client
            .put_empty(&format!("/admin/comments/{id}/reject"))
            .await
    }

    pub async fn delete_comment(&self, id: i64) -> Result<(), ApiError> {
        self.client
            .delete(&format!("/admin/comments/{id}"))
            .await
    }
}
