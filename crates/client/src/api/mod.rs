//! One module per backend resource, each a flat set of calls mapping a
//! signature to a request shape.

pub mod admin;
pub mod analytics;
pub mod auth;
pub mod comments;
pub mod interactions;
pub mod posts;
pub mod tags;

pub use admin::AdminApi;
pub use analytics::AnalyticsApi;
pub use auth::AuthApi;
pub use comments::CommentApi;
pub use interactions::InteractionApi;
pub use posts::PostApi;
pub use tags::TagApi;

use crate::api_client::ApiClient;

impl ApiClient {
    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.clone())
    }

    pub fn posts(&self) -> PostApi {
        PostApi::new(self.clone())
    }

    pub fn comments(&self) -> CommentApi {
        CommentApi::new(self.clone())
    }

    pub fn interactions(&self) -> InteractionApi {
        InteractionApi::new(self.clone())
    }

    pub fn tags(&self) -> TagApi {
        TagApi::new(self.clone())
    }

    pub fn admin(&self) -> AdminApi {
        AdminApi::new(self.clone())
    }

    pub fn analytics(&self) -> AnalyticsApi {
        AnalyticsApi::new(self.clone())
    }
}
