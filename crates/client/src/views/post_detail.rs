//! Single post page: content, like/favorite toggles and the comment thread.

use blogfront_shared::{ApiError, CommentItem, CommentPayload, PostDetail as Post};
use dioxus::prelude::*;

use crate::auth_session::AuthContext;
use crate::components::ui::{ApiErrorNotice, Button, ButtonVariant, Card, Loading};
use crate::routes::Route;
use crate::views::{format_date, format_time, non_empty};

#[component]
pub fn PostDetail(slug: String) -> Element {
    let auth = use_context::<AuthContext>();

    let posts = auth.posts.clone();
    let detail = use_resource(use_reactive((&slug,), move |(slug,)| {
        let posts = posts.clone();
        async move {
            posts.fetch_post_detail(&slug).await?;
            Ok::<_, ApiError>(posts.snapshot().current_post)
        }
    }));

    let body = match &*detail.read() {
        None => rsx! { Loading {} },
        Some(Err(error)) => rsx! { ApiErrorNotice { error: error.clone() } },
        Some(Ok(None)) => rsx! { Loading {} },
        Some(Ok(Some(post))) => rsx! {
            PostBody { key: "{post.summary.id}", post: post.clone() }
            Comments { post_id: post.summary.id, path: Route::PostDetail { slug: slug.clone() }.to_string() }
        },
    };
    body
}

fn toggle_variant(active: bool) -> ButtonVariant {
    if active {
        ButtonVariant::Primary
    } else {
        ButtonVariant::Secondary
    }
}

#[component]
fn PostBody(post: Post) -> Element {
    let auth = use_context::<AuthContext>();
    let post_id = post.summary.id;
    let mut liked = use_signal(|| post.liked_by_current_user.unwrap_or(false));
    let mut likes = use_signal(|| post.summary.like_count.unwrap_or(0));
    let mut favorited = use_signal(|| post.favorited_by_current_user.unwrap_or(false));
    let mut error = use_signal(|| None::<ApiError>);

    let signed_in = auth.is_authenticated();
    let interactions = auth.client.interactions();
    let published = post.summary.published_at.as_ref().map(format_date);
    let author = post.summary.author_name.clone().unwrap_or_default();
    let views = post.summary.view_count.unwrap_or(0);

    let like_api = interactions.clone();
    let on_like = move |_: MouseEvent| {
        let api = like_api.clone();
        spawn(async move {
            match api.toggle_like(post_id).await {
                Ok(result) => {
                    liked.set(result.active);
                    likes.set(result.total);
                }
                Err(e) => error.set(Some(e)),
            }
        });
    };

    let on_favorite = move |_: MouseEvent| {
        let api = interactions.clone();
        spawn(async move {
            match api.toggle_favorite(post_id).await {
                Ok(result) => favorited.set(result.active),
                Err(e) => error.set(Some(e)),
            }
        });
    };

    rsx! {
        article { class: "mb-8",
            h1 { class: "mb-2 text-3xl font-bold", "{post.summary.title}" }
            div { class: "mb-6 flex gap-3 text-sm text-stone-500",
                if let Some(date) = published {
                    span { "{date}" }
                }
                if !author.is_empty() {
                    span { "by {author}" }
                }
                span { "{views} views" }
            }
            if let Some(err) = error() {
                ApiErrorNotice { error: err }
            }
            div { class: "prose max-w-none whitespace-pre-wrap text-stone-800", "{post.content}" }
            div { class: "mt-6 flex items-center gap-3",
                Button {
                    variant: toggle_variant(liked()),
                    disabled: !signed_in,
                    onclick: on_like,
                    "♥ {likes}"
                }
                Button {
                    variant: toggle_variant(favorited()),
                    disabled: !signed_in,
                    onclick: on_favorite,
                    if favorited() {
                        "Favorited"
                    } else {
                        "Favorite"
                    }
                }
            }
        }
    }
}

/// Comment thread plus the form for a new top-level comment.
#[component]
fn Comments(post_id: i64, path: String) -> Element {
    let auth = use_context::<AuthContext>();
    let nav = use_navigator();
    let mut draft = use_signal(String::new);
    let mut error = use_signal(|| None::<ApiError>);
    let mut posting = use_signal(|| false);

    let api = auth.client.comments();
    let list_api = api.clone();
    let mut thread = use_resource(use_reactive((&post_id,), move |(post_id,)| {
        let api = list_api.clone();
        async move { api.fetch_comments(post_id).await }
    }));

    let signed_in = auth.is_authenticated();

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let Some(content) = non_empty(&draft.read()) else {
            return;
        };
        let api = api.clone();
        posting.set(true);
        spawn(async move {
            let payload = CommentPayload {
                content,
                parent_id: None,
            };
            match api.create_comment(post_id, &payload).await {
                Ok(_) => {
                    draft.set(String::new());
                    error.set(None);
                    thread.restart();
                }
                Err(e) => error.set(Some(e)),
            }
            posting.set(false);
        });
    };

    let list = match &*thread.read() {
        None => rsx! { Loading {} },
        Some(Err(e)) => rsx! { ApiErrorNotice { error: e.clone() } },
        Some(Ok(items)) if items.is_empty() => rsx! {
            p { class: "text-sm text-stone-500", "No comments yet." }
        },
        Some(Ok(items)) => rsx! {
            ul { class: "space-y-4",
                for item in items.iter() {
                    CommentThread { key: "{item.id}", comment: item.clone() }
                }
            }
        },
    };

    rsx! {
        Card { title: "Comments",
            if let Some(err) = error() {
                ApiErrorNotice { error: err }
            }
            if signed_in {
                form { class: "mb-6 space-y-2", onsubmit: on_submit,
                    textarea {
                        class: "w-full rounded-md border border-stone-300 p-2 text-sm",
                        rows: "3",
                        placeholder: "Leave a comment",
                        value: "{draft}",
                        oninput: move |e| draft.set(e.value()),
                    }
                    Button { r#type: "submit", disabled: posting(), "Post comment" }
                }
            } else {
                p { class: "mb-6 text-sm text-stone-600",
                    button {
                        class: "text-emerald-700 hover:underline",
                        onclick: move |_: MouseEvent| {
                            nav.push(Route::Login { redirect: path.clone() });
                        },
                        "Sign in"
                    }
                    " to join the discussion."
                }
            }
            {list}
        }
    }
}

#[component]
fn CommentThread(comment: CommentItem) -> Element {
    let at = format_time(&comment.created_at);

    rsx! {
        li {
            div { class: "text-sm",
                span { class: "font-medium text-stone-900", "{comment.author_name}" }
                span { class: "ml-2 text-xs text-stone-400", "{at}" }
            }
            p { class: "mt-1 whitespace-pre-wrap text-sm text-stone-700", "{comment.content}" }
            if !comment.children.is_empty() {
                ul { class: "mt-3 space-y-3 border-l-2 border-stone-100 pl-4",
                    for child in comment.children.iter() {
                        CommentThread { key: "{child.id}", comment: child.clone() }
                    }
                }
            }
        }
    }
}
