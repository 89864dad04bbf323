//! `/auth/*` endpoints.

use blogfront_shared::{
    ApiError, LoginRequest, LoginResult, LogoutRequest, Profile, RefreshRequest, RegisterRequest,
};

use crate::api_client::ApiClient;

#[derive(Debug, Clone)]
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn login(&self, payload: &LoginRequest) -> Result<LoginResult, ApiError> {
        self.client.post("/auth/login", payload).await
    }

    /// Creates the account; does not sign in.
    pub async fn register(&self, payload: &RegisterRequest) -> Result<Profile, ApiError> {
        self.client.post("/auth/register", payload).await
    }

    pub async fn refresh(&self, refresh_token: &str) -> Result<LoginResult, ApiError> {
        let body = RefreshRequest {
            refresh_token: refresh_token.to_string(),
        };
        self.client.post("/auth/refresh", &body).await
    }

    pub async fn fetch_profile(&self) -> Result<Profile, ApiError> {
        self.client.get("/auth/profile", Default::default()).await
    }

    /// Revokes `refresh_token` server side when given.
    pub async fn logout(&self, refresh_token: Option<&str>) -> Result<(), ApiError> {
        let body = LogoutRequest {
            refresh_token: refresh_token.map(str::to_string),
        };
        self.client.post("/auth/logout", &body).await
    }
}

#[cfg(test)]
mod tests {
    use crate::api_client::testing::*;
    use blogfront_shared::{LoginRequest, LoginResult};
    use serde_json::json;

    #[tokio::test]
    async fn login_posts_credentials() {
        let transport = FakeTransport::new();
        transport.ok(
            "POST /api/auth/login",
            json!({"accessToken": "a", "refreshToken": "r"}),
        );
        let api = client(&transport).auth();

        let result = api
            .login(&LoginRequest {
                username: "ada".into(),
                password: "secret".into(),
            })
            .await
            .unwrap();

        assert_eq!(
            result,
            LoginResult {
                access_token: "a".into(),
                refresh_token: Some("r".into())
            }
        );
        assert_eq!(
            transport.requests()[0].json_body(),
            Some(json!({"username": "ada", "password": "secret"}))
        );
    }

    #[tokio::test]
    async fn refresh_and_logout_send_the_refresh_token() {
        let transport = FakeTransport::new();
        transport
            .ok("POST /api/auth/refresh", json!({"accessToken": "a2", "refreshToken": "r2"}))
            .ok("POST /api/auth/logout", ())
            .ok("POST /api/auth/logout", ());
        let api = client(&transport).auth();

        api.refresh("r1").await.unwrap();
        api.logout(Some("r2")).await.unwrap();
        api.logout(None).await.unwrap();

        let sent = transport.requests();
        assert_eq!(sent[0].json_body(), Some(json!({"refreshToken": "r1"})));
        assert_eq!(sent[1].json_body(), Some(json!({"refreshToken": "r2"})));
        assert_eq!(sent[2].json_body(), Some(json!({})));
    }
}
