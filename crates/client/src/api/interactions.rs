//! Like, favorite and tag subscription toggles.

use blogfront_shared::{ApiError, InteractionResult, SubscriptionResult};

use crate::api_client::ApiClient;

#[derive(Debug, Clone)]
pub struct InteractionApi {
    client: ApiClient,
}

impl InteractionApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn toggle_like(&self, post_id: i64) -> Result<InteractionResult, ApiError> {
        self.client
            .post_empty(&format!("/posts/{post_id}/like"))
            .await
    }

    pub async fn toggle_favorite(&self, post_id: i64) -> Result<InteractionResult, ApiError> {
        self.client
            .post_empty(&format!("/posts/{post_id}/favorite"))
            .await
    }

    pub async fn toggle_tag_subscription(
        &self,
        tag_id: i64,
    ) -> Result<SubscriptionResult, ApiError> {
        self.client
            .post_empty(&format!("/tags/{tag_id}/subscribe"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::api_client::testing::*;
    use blogfront_shared::{InteractionResult, SubscriptionResult};
    use serde_json::json;

    #[tokio::test]
    async fn toggles_post_without_body() {
        let transport = FakeTransport::new();
        transport
            .ok("POST /api/posts/5/like", json!({"active": true, "total": 12}))
            .ok("POST /api/posts/5/favorite", json!({"active": false, "total": 3}))
            .ok("POST /api/tags/2/subscribe", json!({"subscribed": true}));
        let api = client(&transport).interactions();

        assert_eq!(
            api.toggle_like(5).await.unwrap(),
            InteractionResult { active: true, total: 12 }
        );
        assert!(!api.toggle_favorite(5).await.unwrap().active);
        assert_eq!(
            api.toggle_tag_subscription(2).await.unwrap(),
            SubscriptionResult { subscribed: true }
        );
        assert!(transport.requests().iter().all(|r| r.body.is_none()));
    }
}
