//! Post management: filterable listing, editor and deletion.

use blogfront_shared::{ApiError, PostDetail, PostPayload, PostQuery, TagItem};
use dioxus::prelude::*;

use super::PageHeader;
use crate::auth_session::AuthContext;
use crate::components::ui::{ApiErrorNotice, Button, ButtonVariant, Card, Loading, TextInput};
use crate::stores::Pagination;
use crate::views::home::Pager;
use crate::views::{format_date, non_empty};

const PAGE_SIZE: u32 = 20;
const STATUSES: [&str; 2] = ["DRAFT", "PUBLISHED"];

/// Editable form state for one post. `id` is `None` for a new post.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostDraft {
    pub id: Option<i64>,
    pub title: String,
    pub slug: String,
    pub summary: String,
    pub content: String,
    pub status: String,
    pub tag_ids: Vec<i64>,
}

impl PostDraft {
    pub fn new_post() -> Self {
        Self {
            status: STATUSES[0].to_string(),
            ..Default::default()
        }
    }

    /// Tag names on the post are matched back to ids; unknown names are dropped.
    pub fn from_detail(post: &PostDetail, tags: &[TagItem]) -> Self {
        let tag_ids = tags
            .iter()
            .filter(|tag| post.summary.tag_names.contains(&tag.name))
            .map(|tag| tag.id)
            .collect();
        Self {
            id: Some(post.summary.id),
            title: post.summary.title.clone(),
            slug: post.summary.slug.clone(),
            summary: post.summary.summary.clone().unwrap_or_default(),
            content: post.content.clone(),
            status: post
                .summary
                .status
                .clone()
                .unwrap_or_else(|| STATUSES[0].to_string()),
            tag_ids,
        }
    }

    pub fn to_payload(&self) -> PostPayload {
        let slug = match non_empty(&self.slug) {
            Some(slug) => slug,
            None => slugify(&self.title),
        };
        PostPayload {
            title: self.title.trim().to_string(),
            slug,
            summary: non_empty(&self.summary),
            content: self.content.clone(),
            cover_url: None,
            status: self.status.clone(),
            reading_time: None,
            seo_keywords: None,
            tag_ids: self.tag_ids.clone(),
        }
    }

    fn toggle_tag(&mut self, id: i64) {
        if let Some(pos) = self.tag_ids.iter().position(|t| *t == id) {
            self.tag_ids.remove(pos);
        } else {
            self.tag_ids.push(id);
        }
    }
}

/// Lowercase ASCII words joined by single dashes.
pub fn slugify(title: &str) -> String {
    title
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

#[component]
pub fn AdminPosts() -> Element {
    let auth = use_context::<AuthContext>();
    let mut status = use_signal(String::new);
    let mut page = use_signal(|| 1u32);
    let mut editing = use_signal(|| None::<PostDraft>);
    let mut error = use_signal(|| None::<ApiError>);

    let posts = auth.posts.clone();
    let mut listing = use_resource(move || {
        let posts = posts.clone();
        let status = status();
        let page = page();
        async move {
            posts
                .fetch_manage_posts(&PostQuery {
                    page: Some(page),
                    size: Some(PAGE_SIZE),
                    status: non_empty(&status),
                })
                .await
        }
    });

    let tag_api = auth.client.tags();
    let tags = use_resource(move || {
        let api = tag_api.clone();
        async move {
            api.fetch_all().await.unwrap_or_else(|e| {
                crate::log_error!("loading tags for the editor failed: {e}");
                Vec::new()
            })
        }
    });

    let api = auth.client.posts();
    let open_api = api.clone();
    let open_editor = use_callback(move |slug: String| {
        let api = open_api.clone();
        spawn(async move {
            match api.fetch_post_detail(&slug).await {
                Ok(post) => {
                    let known = tags.cloned().unwrap_or_default();
                    editing.set(Some(PostDraft::from_detail(&post, &known)));
                }
                Err(e) => error.set(Some(e)),
            }
        });
    });

    let delete_api = api.clone();
    let delete_post = use_callback(move |id: i64| {
        let api = delete_api.clone();
        spawn(async move {
            match api.delete_post(id).await {
                Ok(()) => {
                    crate::log_info!("deleted post {id}");
                    listing.restart();
                }
                Err(e) => error.set(Some(e)),
            }
        });
    });

    let table = match &*listing.read() {
        None => rsx! { Loading {} },
        Some(Err(e)) => rsx! { ApiErrorNotice { error: e.clone() } },
        Some(Ok(result)) => {
            let pagination = Pagination {
                page: result.page.max(1),
                size: result.size,
                total: result.total,
            };
            rsx! {
                table { class: "w-full bg-white text-sm",
                    thead {
                        tr { class: "border-b text-left text-stone-500",
                            th { class: "p-2", "Title" }
                            th { class: "p-2", "Status" }
                            th { class: "p-2", "Published" }
                            th { class: "p-2", "Views" }
                            th { class: "p-2", "" }
                        }
                    }
                    tbody {
                        for post in result.records.iter() {
                            tr { key: "{post.id}", class: "border-b",
                                td { class: "p-2 font-medium", "{post.title}" }
                                td { class: "p-2", {post.status.clone().unwrap_or_default()} }
                                td { class: "p-2",
                                    {post.published_at.as_ref().map(format_date).unwrap_or_default()}
                                }
                                td { class: "p-2", {post.view_count.unwrap_or(0).to_string()} }
                                td { class: "flex gap-1 p-2",
                                    RowActions {
                                        id: post.id,
                                        slug: post.slug.clone(),
                                        on_edit: open_editor,
                                        on_delete: delete_post,
                                    }
                                }
                            }
                        }
                    }
                }
                Pager { pagination, on_change: move |next: u32| page.set(next) }
            }
        }
    };

    let editor = editing();
    let editor_key = match editor.as_ref().and_then(|d| d.id) {
        Some(id) => id.to_string(),
        None => "new".to_string(),
    };

    rsx! {
        PageHeader { title: "Posts",
            select {
                class: "rounded-md border border-stone-300 px-2 py-1 text-sm",
                value: "{status}",
                onchange: move |e| {
                    status.set(e.value());
                    page.set(1);
                },
                option { value: "", "All" }
                for value in STATUSES {
                    option { key: "{value}", value: "{value}", "{value}" }
                }
            }
            Button { onclick: move |_: MouseEvent| editing.set(Some(PostDraft::new_post())), "New post" }
        }
        if let Some(err) = error() {
            ApiErrorNotice { error: err }
        }
        if let Some(draft) = editor {
            PostEditor {
                key: "{editor_key}",
                draft,
                tags: tags.cloned().unwrap_or_default(),
                on_close: move |saved: bool| {
                    editing.set(None);
                    if saved {
                        listing.restart();
                    }
                },
            }
        }
        {table}
    }
}

#[component]
fn RowActions(
    id: i64,
    slug: String,
    on_edit: Callback<String>,
    on_delete: Callback<i64>,
) -> Element {
    rsx! {
        Button {
            variant: ButtonVariant::Secondary,
            onclick: move |_: MouseEvent| on_edit.call(slug.clone()),
            "Edit"
        }
        Button {
            variant: ButtonVariant::Danger,
            onclick: move |_: MouseEvent| on_delete.call(id),
            "Delete"
        }
    }
}

#[component]
fn PostEditor(draft: PostDraft, tags: Vec<TagItem>, on_close: EventHandler<bool>) -> Element {
    let auth = use_context::<AuthContext>();
    let mut form = use_signal(|| draft.clone());
    let mut error = use_signal(|| None::<ApiError>);
    let mut saving = use_signal(|| false);
    let heading = if draft.id.is_some() { "Edit post" } else { "New post" };

    let api = auth.client.posts();
    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let current = form.read().clone();
        let api = api.clone();
        saving.set(true);
        spawn(async move {
            let payload = current.to_payload();
            let result = match current.id {
                Some(id) => api.update_post(id, &payload).await,
                None => api.create_post(&payload).await,
            };
            saving.set(false);
            match result {
                Ok(saved) => {
                    crate::log_info!("saved post {}", saved.summary.slug);
                    on_close.call(true);
                }
                Err(e) => error.set(Some(e)),
            }
        });
    };

    let current = form.read().clone();

    rsx! {
        Card { class: "mb-6", title: heading,
            if let Some(err) = error() {
                ApiErrorNotice { error: err }
            }
            form { class: "space-y-4", onsubmit: on_submit,
                TextInput {
                    label: "Title",
                    value: current.title.clone(),
                    oninput: move |e: FormEvent| form.write().title = e.value(),
                }
                TextInput {
                    label: "Slug",
                    placeholder: "derived from the title when empty",
                    value: current.slug.clone(),
                    oninput: move |e: FormEvent| form.write().slug = e.value(),
                }
                TextInput {
                    label: "Summary",
                    value: current.summary.clone(),
                    oninput: move |e: FormEvent| form.write().summary = e.value(),
                }
                label { class: "block",
                    span { class: "mb-1 block text-sm font-medium text-stone-700", "Content" }
                    textarea {
                        class: "w-full rounded-md border border-stone-300 p-2 font-mono text-sm",
                        rows: "12",
                        value: "{current.content}",
                        oninput: move |e| form.write().content = e.value(),
                    }
                }
                div { class: "flex flex-wrap gap-3 text-sm",
                    for tag in tags.iter() {
                        label { key: "{tag.id}", class: "flex items-center gap-1",
                            input {
                                r#type: "checkbox",
                                checked: current.tag_ids.contains(&tag.id),
                                onchange: {
                                    let id = tag.id;
                                    move |_| form.write().toggle_tag(id)
                                },
                            }
                            "{tag.name}"
                        }
                    }
                }
                select {
                    class: "rounded-md border border-stone-300 px-2 py-1 text-sm",
                    value: "{current.status}",
                    onchange: move |e| form.write().status = e.value(),
                    for value in STATUSES {
                        option { key: "{value}", value: "{value}", "{value}" }
                    }
                }
                div { class: "flex gap-2",
                    Button { r#type: "submit", disabled: saving(), "Save" }
                    Button {
                        variant: ButtonVariant::Ghost,
                        onclick: move |_: MouseEvent| on_close.call(false),
                        "Cancel"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blogfront_shared::PostSummary;

    fn tag(id: i64, name: &str) -> TagItem {
        TagItem {
            id,
            name: name.to_string(),
            description: None,
            post_count: None,
            subscribed: false,
        }
    }

    #[test]
    fn slug_collapses_punctuation_and_case() {
        assert_eq!(slugify("Hello, Rust & WASM!"), "hello-rust-wasm");
        assert_eq!(slugify("  "), "");
    }

    #[test]
    fn empty_slug_is_derived_and_blank_summary_dropped() {
        let draft = PostDraft {
            title: " Async in Practice ".to_string(),
            summary: "   ".to_string(),
            content: "body".to_string(),
            ..PostDraft::new_post()
        };
        let payload = draft.to_payload();
        assert_eq!(payload.title, "Async in Practice");
        assert_eq!(payload.slug, "async-in-practice");
        assert_eq!(payload.summary, None);
        assert_eq!(payload.status, "DRAFT");
    }

    #[test]
    fn editing_existing_post_maps_tag_names_to_ids() {
        let post = PostDetail {
            summary: PostSummary {
                id: 4,
                title: "Hello".to_string(),
                slug: "hello".to_string(),
                summary: None,
                cover_url: None,
                status: Some("PUBLISHED".to_string()),
                author_name: None,
                published_at: None,
                tag_names: vec!["rust".to_string(), "gone".to_string()],
                view_count: None,
                like_count: None,
            },
            content: "body".to_string(),
            comment_count: None,
            liked_by_current_user: None,
            favorited_by_current_user: None,
        };
        let mut draft = PostDraft::from_detail(&post, &[tag(1, "rust"), tag(2, "web")]);
        assert_eq!(draft.id, Some(4));
        assert_eq!(draft.tag_ids, vec![1]);
        assert_eq!(draft.status, "PUBLISHED");

        draft.toggle_tag(2);
        draft.toggle_tag(1);
        assert_eq!(draft.to_payload().tag_ids, vec![2]);
    }
}
