//! `/tags` endpoints.

use blogfront_shared::{ApiError, TagItem, TagPayload};

use crate::api_client::{ApiClient, Query};

#[derive(Debug, Clone)]
pub struct TagApi {
    client: ApiClient,
}

impl TagApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn fetch_all(&self) -> Result<Vec<TagItem>, ApiError> {
        self.client.get("/tags", Query::new()).await
    }

    pub async fn create_tag(&self, payload: &TagPayload) -> Result<TagItem, ApiError> {
        self.client.post("/tags", payload).await
    }

    pub async fn update_tag(&self, id: i64, payload: &TagPayload) -> Result<TagItem, ApiError> {
        self.client.put(&format!("/tags/{id}"), payload).await
    }

    pub async fn delete_tag(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("/tags/{id}")).await
    }
}
