//! Search results for `/search?q=`.

use blogfront_shared::{PageResult, PostSummary, SearchQuery};
use dioxus::prelude::*;

use crate::auth_session::AuthContext;
use crate::components::ui::{ApiErrorNotice, Loading};
use crate::stores::Pagination;
use crate::views::home::{Pager, PostList};

const PAGE_SIZE: u32 = 10;

#[component]
pub fn SearchResult(q: String) -> Element {
    let auth = use_context::<AuthContext>();
    let mut page = use_signal(|| 1u32);
    let term = q.trim().to_string();

    let api = auth.client.posts();
    let results = use_resource(use_reactive((&term,), move |(term,)| {
        let api = api.clone();
        let page = page();
        async move {
            if term.is_empty() {
                return Ok(PageResult::<PostSummary>::empty(1, PAGE_SIZE));
            }
            api.search_posts(&SearchQuery {
                q: term,
                page: Some(page),
                size: Some(PAGE_SIZE),
            })
            .await
        }
    }));

    let body = match &*results.read() {
        None => rsx! { Loading {} },
        Some(Err(error)) => rsx! { ApiErrorNotice { error: error.clone() } },
        Some(Ok(found)) => {
            let pagination = Pagination {
                page: found.page.max(1),
                size: found.size,
                total: found.total,
            };
            rsx! {
                p { class: "mb-4 text-sm text-stone-500", "{found.total} results" }
                PostList { posts: found.records.clone() }
                if found.total > 0 {
                    Pager { pagination, on_change: move |next: u32| page.set(next) }
                }
            }
        }
    };

    rsx! {
        h1 { class: "mb-2 text-2xl font-bold",
            if term.is_empty() {
                "Search"
            } else {
                "Results for “{term}”"
            }
        }
        {body}
    }
}
