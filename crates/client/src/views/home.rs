//! Home page: the paginated list of published posts.

use blogfront_shared::{ApiError, PostQuery, PostSummary};
use dioxus::prelude::*;

use crate::auth_session::AuthContext;
use crate::components::ui::{ApiErrorNotice, Button, ButtonVariant, Card, Loading};
use crate::routes::Route;
use crate::stores::Pagination;
use crate::views::format_date;

#[component]
pub fn Home() -> Element {
    let auth = use_context::<AuthContext>();
    let mut page = use_signal(|| auth.posts.pagination().page);

    let posts = auth.posts.clone();
    let listing = use_resource(move || {
        let posts = posts.clone();
        let page = page();
        async move {
            posts
                .fetch_posts(PostQuery {
                    page: Some(page),
                    ..Default::default()
                })
                .await?;
            Ok::<_, ApiError>(posts.snapshot())
        }
    });

    let body = match &*listing.read() {
        None => rsx! { Loading {} },
        Some(Err(error)) => rsx! { ApiErrorNotice { error: error.clone() } },
        Some(Ok(state)) => rsx! {
            PostList { posts: state.list.clone() }
            Pager {
                pagination: state.pagination,
                on_change: move |next: u32| page.set(next),
            }
        },
    };

    rsx! {
        h1 { class: "mb-6 text-2xl font-bold", "Latest posts" }
        {body}
    }
}

/// Cards for a page of posts; shared by the home page and search results.
#[component]
pub fn PostList(posts: Vec<PostSummary>) -> Element {
    if posts.is_empty() {
        return rsx! {
            p { class: "py-8 text-center text-stone-500", "No posts yet." }
        };
    }

    rsx! {
        ul { class: "space-y-4",
            for post in posts {
                li { key: "{post.id}",
                    PostCard { post }
                }
            }
        }
    }
}

#[component]
fn PostCard(post: PostSummary) -> Element {
    let published = post.published_at.as_ref().map(format_date);
    let author = post.author_name.clone().unwrap_or_default();
    let likes = post.like_count.unwrap_or(0);

    rsx! {
        Card {
            Link {
                to: Route::PostDetail { slug: post.slug.clone() },
                class: "text-xl font-semibold text-stone-900 hover:text-emerald-700",
                "{post.title}"
            }
            div { class: "mt-1 flex gap-3 text-xs text-stone-500",
                if let Some(date) = published {
                    span { "{date}" }
                }
                if !author.is_empty() {
                    span { "by {author}" }
                }
                span { "♥ {likes}" }
            }
            if let Some(summary) = &post.summary {
                p { class: "mt-3 text-sm text-stone-700", "{summary}" }
            }
            if !post.tag_names.is_empty() {
                div { class: "mt-3 flex flex-wrap gap-2",
                    for tag in post.tag_names.iter() {
                        span {
                            key: "{tag}",
                            class: "rounded bg-emerald-50 px-2 py-0.5 text-xs text-emerald-700",
                            "#{tag}"
                        }
                    }
                }
            }
        }
    }
}

/// Previous/next controls driven by the server's page cursor.
#[component]
pub fn Pager(pagination: Pagination, on_change: EventHandler<u32>) -> Element {
    let page = pagination.page;
    let pages = pagination.page_count().max(1);

    rsx! {
        div { class: "mt-6 flex items-center justify-between text-sm",
            Button {
                variant: ButtonVariant::Secondary,
                disabled: page <= 1,
                onclick: move |_| on_change.call(page - 1),
                "Previous"
            }
            span { class: "text-stone-500", "Page {page} of {pages}" }
            Button {
                variant: ButtonVariant::Secondary,
                disabled: !pagination.has_next(),
                onclick: move |_| on_change.call(page + 1),
                "Next"
            }
        }
    }
}
