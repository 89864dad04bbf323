//! Dashboard analytics.

use blogfront_shared::{AnalyticsOverview, ApiError};

use crate::api_client::{ApiClient, Query};

#[derive(Debug, Clone)]
pub struct AnalyticsApi {
    client: ApiClient,
}

impl AnalyticsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn fetch_overview(&self) -> Result<AnalyticsOverview, ApiError> {
        self.client
            .get("/admin/analytics/overview", Query::new())
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::api_client::testing::*;
    use serde_json::json;

    #[tokio::test]
    async fn overview_decodes_hot_posts() {
        let transport = FakeTransport::new();
        transport.ok(
            "GET /api/admin/analytics/overview",
            json!({
                "todayPv": 120, "todayUv": 45, "publishedPosts": 12, "pendingComments": 3,
                "hotPosts": [{"postId": 1, "title": "Hello", "slug": "hello", "score": 88}]
            }),
        );
        let api = client(&transport).analytics();

        let overview = api.fetch_overview().await.unwrap();
        assert_eq!(overview.pending_comments, 3);
        assert_eq!(overview.hot_posts[0].view_count, None);
    }
}
