//! `/posts` and `/search/posts` endpoints.

use blogfront_shared::{
    ApiError, PageResult, PostDetail, PostPayload, PostQuery, PostSummary, SearchQuery,
};

use crate::api_client::{ApiClient, Query};

#[derive(Debug, Clone)]
pub struct PostApi {
    client: ApiClient,
}

fn post_query(params: &PostQuery) -> Query {
    Query::new()
        .opt("page", params.page)
        .opt("size", params.size)
        .opt("status", params.status.as_deref())
}

impl PostApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Published posts, newest first.
    pub async fn fetch_posts(
        &self,
        params: &PostQuery,
    ) -> Result<PageResult<PostSummary>, ApiError> {
        self.client.get("/posts", post_query(params)).await
    }

    /// All posts regardless of status; admin only.
    pub async fn fetch_manage_posts(
        &self,
        params: &PostQuery,
    ) -> Result<PageResult<PostSummary>, ApiError> {
        self.client.get("/posts/manage", post_query(params)).await
    }

    pub async fn fetch_post_detail(&self, slug: &str) -> Result<PostDetail, ApiError> {
        let path = format!("/posts/{}", urlencoding::encode(slug));
        self.client.get(&path, Query::new()).await
    }

    pub async fn create_post(&self, payload: &PostPayload) -> Result<PostDetail, ApiError> {
        self.client.post("/posts", payload).await
    }

    pub async fn update_post(&self, id: i64, payload: &PostPayload) -> Result<PostDetail, ApiError> {
        self.client.put(&format!("/posts/{id}"), payload).await
    }

    pub async fn delete_post(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("/posts/{id}")).await
    }

    pub async fn search_posts(
        &self,
        params: &SearchQuery,
    ) -> Result<PageResult<PostSummary>, ApiError> {
        let query = Query::new()
            .param("q", &params.q)
            .opt("page", params.page)
            .opt("size", params.size);
        self.client.get("/search/posts", query).await
    }
}

#[cfg(test)]
mod tests {
    use crate::api_client::{testing::*, Method};
    use blogfront_shared::{PageResult, PostPayload, PostQuery, PostSummary, SearchQuery};
    use serde_json::json;

    fn payload() -> PostPayload {
        PostPayload {
            title: "Hello".into(),
            slug: "hello".into(),
            summary: None,
            content: "# Hello".into(),
            cover_url: None,
            status: "PUBLISHED".into(),
            reading_time: Some(3),
            seo_keywords: None,
            tag_ids: vec![1, 2],
        }
    }

    #[tokio::test]
    async fn manage_listing_forwards_status_filter() {
        let transport = FakeTransport::new();
        transport.ok("GET /api/posts/manage", PageResult::<PostSummary>::empty(1, 20));
        let api = client(&transport).posts();

        let query = PostQuery {
            page: Some(1),
            size: Some(20),
            status: Some("DRAFT".into()),
        };
        api.fetch_manage_posts(&query).await.unwrap();

        assert_eq!(
            transport.requests()[0].url,
            "/api/posts/manage?page=1&size=20&status=DRAFT"
        );
    }

    #[tokio::test]
    async fn detail_slug_is_path_encoded() {
        let transport = FakeTransport::new();
        transport.ok(
            "GET /api/posts/hello%20world",
            json!({"id": 1, "title": "Hi", "slug": "hello world", "content": "x"}),
        );
        let api = client(&transport).posts();

        let post = api.fetch_post_detail("hello world").await.unwrap();
        assert_eq!(post.summary.id, 1);
    }

    #[tokio::test]
    async fn write_operations_use_id_paths() {
        let transport = FakeTransport::new();
        let detail = json!({"id": 9, "title": "Hello", "slug": "hello", "content": "# Hello"});
        transport
            .ok("POST /api/posts", detail.clone())
            .ok("PUT /api/posts/9", detail)
            .ok("DELETE /api/posts/9", ());
        let api = client(&transport).posts();

        api.create_post(&payload()).await.unwrap();
        api.update_post(9, &payload()).await.unwrap();
        api.delete_post(9).await.unwrap();

        let sent = transport.requests();
        let methods: Vec<Method> = sent.iter().map(|r| r.method).collect();
        assert_eq!(methods, vec![Method::Post, Method::Put, Method::Delete]);
        assert_eq!(sent[0].json_body().unwrap()["tagIds"], json!([1, 2]));
        assert_eq!(sent[2].body, None);
    }

    #[tokio::test]
    async fn search_sends_keyword_first() {
        let transport = FakeTransport::new();
        transport.ok("GET /api/search/posts", PageResult::<PostSummary>::empty(1, 10));
        let api = client(&transport).posts();

        let query = SearchQuery {
            q: "tokio".into(),
            page: None,
            size: Some(10),
        };
        api.search_posts(&query).await.unwrap();

        assert_eq!(transport.requests()[0].url, "/api/search/posts?q=tokio&size=10");
    }
}
