//! `/posts/{postId}/comments` endpoints.

use blogfront_shared::{ApiError, CommentItem, CommentPayload};

use crate::api_client::{ApiClient, Query};

#[derive(Debug, Clone)]
pub struct CommentApi {
    client: ApiClient,
}

impl CommentApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Approved comments of a post, replies nested under `children`.
    pub async fn fetch_comments(&self, post_id: i64) -> Result<Vec<CommentItem>, ApiError> {
        self.client
            .get(&format!("/posts/{post_id}/comments"), Query::new())
            .await
    }

    pub async fn create_comment(
        &self,
        post_id: i64,
        payload: &CommentPayload,
    ) -> Result<CommentItem, ApiError> {
        self.client
            .post(&format!("/posts/{post_id}/comments"), payload)
            .await
    }
}
