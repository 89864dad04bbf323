//! Tag management.

use blogfront_shared::{ApiError, TagItem, TagPayload};
use dioxus::prelude::*;

use super::PageHeader;
use crate::auth_session::AuthContext;
use crate::components::ui::{ApiErrorNotice, Button, ButtonVariant, Card, Loading, TextInput};
use crate::views::non_empty;

#[component]
pub fn AdminTags() -> Element {
    let auth = use_context::<AuthContext>();
    let mut name = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut editing = use_signal(|| None::<i64>);
    let mut error = use_signal(|| None::<ApiError>);

    let api = auth.client.tags();
    let list_api = api.clone();
    let mut tags = use_resource(move || {
        let api = list_api.clone();
        async move { api.fetch_all().await }
    });

    let save_api = api.clone();
    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let Some(tag_name) = non_empty(&name.read()) else {
            return;
        };
        let payload = TagPayload {
            name: tag_name,
            description: non_empty(&description.read()),
        };
        let api = save_api.clone();
        let target = editing();
        spawn(async move {
            let result = match target {
                Some(id) => api.update_tag(id, &payload).await,
                None => api.create_tag(&payload).await,
            };
            match result {
                Ok(_) => {
                    name.set(String::new());
                    description.set(String::new());
                    editing.set(None);
                    error.set(None);
                    tags.restart();
                }
                Err(e) => error.set(Some(e)),
            }
        });
    };

    let on_edit = use_callback(move |tag: TagItem| {
        name.set(tag.name);
        description.set(tag.description.unwrap_or_default());
        editing.set(Some(tag.id));
    });

    let on_delete = use_callback(move |id: i64| {
        let api = api.clone();
        spawn(async move {
            match api.delete_tag(id).await {
                Ok(()) => tags.restart(),
                Err(e) => error.set(Some(e)),
            }
        });
    });

    let list = match &*tags.read() {
        None => rsx! { Loading {} },
        Some(Err(e)) => rsx! { ApiErrorNotice { error: e.clone() } },
        Some(Ok(items)) if items.is_empty() => rsx! {
            p { class: "text-sm text-stone-500", "No tags yet." }
        },
        Some(Ok(items)) => rsx! {
            ul { class: "divide-y bg-white",
                for tag in items.iter() {
                    TagRow {
                        key: "{tag.id}",
                        tag: tag.clone(),
                        on_edit: on_edit,
                        on_delete: on_delete,
                    }
                }
            }
        },
    };

    let form_title = if editing().is_some() { "Edit tag" } else { "New tag" };

    rsx! {
        PageHeader { title: "Tags" }
        if let Some(err) = error() {
            ApiErrorNotice { error: err }
        }
        Card { class: "mb-6", title: form_title,
            form { class: "flex items-end gap-3", onsubmit: on_submit,
                TextInput {
                    label: "Name",
                    value: name(),
                    oninput: move |e: FormEvent| name.set(e.value()),
                }
                TextInput {
                    label: "Description",
                    value: description(),
                    oninput: move |e: FormEvent| description.set(e.value()),
                }
                Button { r#type: "submit", "Save" }
            }
        }
        {list}
    }
}

#[component]
fn TagRow(tag: TagItem, on_edit: Callback<TagItem>, on_delete: Callback<i64>) -> Element {
    let id = tag.id;
    let posts = tag.post_count.unwrap_or(0);
    let description = tag.description.clone().unwrap_or_default();

    rsx! {
        li { class: "flex items-center justify-between p-3",
            div {
                p { class: "font-medium", "{tag.name}" }
                p { class: "text-xs text-stone-500", "{description} · {posts} posts" }
            }
            div { class: "flex gap-1",
                Button {
                    variant: ButtonVariant::Secondary,
                    onclick: move |_: MouseEvent| on_edit.call(tag.clone()),
                    "Edit"
                }
                Button {
                    variant: ButtonVariant::Danger,
                    onclick: move |_: MouseEvent| on_delete.call(id),
                    "Delete"
                }
            }
        }
    }
}
