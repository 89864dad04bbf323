//! Post store: the last fetched page of posts and the post being viewed.
//!
//! Every fetch overwrites what was there; nothing is cached across parameter
//! changes. Each request takes a ticket and only the newest ticket may write,
//! so a slow response cannot overwrite the result of a later call.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use blogfront_shared::{ApiError, PageResult, PostDetail, PostQuery, PostSummary};

use crate::api::PostApi;
use crate::api_client::ApiClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub size: u32,
    pub total: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            size: 10,
            total: 0,
        }
    }
}

impl Pagination {
    pub fn page_count(&self) -> u64 {
        if self.size == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.size))
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.page) < self.page_count()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostState {
    pub list: Vec<PostSummary>,
    pub pagination: Pagination,
    pub loading: bool,
    pub current_post: Option<PostDetail>,
}

#[derive(Debug, Clone)]
pub struct PostStore {
    state: Arc<RwLock<PostState>>,
    api: PostApi,
    list_ticket: Arc<AtomicU64>,
    detail_ticket: Arc<AtomicU64>,
    in_flight: Arc<AtomicUsize>,
}

/// Keeps `loading` true while any request of this store is outstanding.
struct InFlight<'a> {
    store: &'a PostStore,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.store.in_flight.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.store.write().loading = false;
        }
    }
}

impl PostStore {
    pub fn new(client: &ApiClient) -> Self {
        Self {
            state: Arc::new(RwLock::new(PostState::default())),
            api: client.posts(),
            list_ticket: Arc::new(AtomicU64::new(0)),
            detail_ticket: Arc::new(AtomicU64::new(0)),
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, PostState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, PostState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> PostState {
        self.read().clone()
    }

    pub fn pagination(&self) -> Pagination {
        self.read().pagination
    }

    fn begin(&self) -> InFlight<'_> {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        self.write().loading = true;
        InFlight { store: self }
    }

    /// Fetch a page of published posts. `params` win over the current cursor.
    pub async fn fetch_posts(&self, params: PostQuery) -> Result<(), ApiError> {
        let cursor = self.pagination();
        let query = PostQuery {
            page: params.page.or(Some(cursor.page)),
            size: params.size.or(Some(cursor.size)),
            status: params.status,
        };
        let ticket = self.list_ticket.fetch_add(1, Ordering::SeqCst) + 1;
        let _in_flight = self.begin();

        let data = self.api.fetch_posts(&query).await?;

        if self.list_ticket.load(Ordering::SeqCst) != ticket {
            crate::log_debug!("discarding stale post list for page {:?}", query.page);
            return Ok(());
        }
        let mut state = self.write();
        state.pagination = Pagination {
            page: data.page,
            size: data.size,
            total: data.total,
        };
        state.list = data.records;
        Ok(())
    }

    /// Fetch one post by slug into `current_post`.
    pub async fn fetch_post_detail(&self, slug: &str) -> Result<(), ApiError> {
        let ticket = self.detail_ticket.fetch_add(1, Ordering::SeqCst) + 1;
        let _in_flight = self.begin();

        let post = self.api.fetch_post_detail(slug).await?;

        if self.detail_ticket.load(Ordering::SeqCst) != ticket {
            crate::log_debug!("discarding stale detail for {slug}");
            return Ok(());
        }
        self.write().current_post = Some(post);
        Ok(())
    }

    /// Admin listing; returned directly, store state is untouched.
    pub async fn fetch_manage_posts(
        &self,
        params: &PostQuery,
    ) -> Result<PageResult<PostSummary>, ApiError> {
        self.api.fetch_manage_posts(params).await
    }
}
