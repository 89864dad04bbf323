//! Comment moderation queue.

use blogfront_shared::{ApiError, ModerationQuery};
use dioxus::prelude::*;

use super::PageHeader;
use crate::api::AdminApi;
use crate::auth_session::AuthContext;
use crate::components::ui::{ApiErrorNotice, Button, ButtonVariant, Loading};
use crate::views::format_time;

const STATUSES: [(&str, &str); 4] = [
    ("PENDING", "Pending"),
    ("APPROVED", "Approved"),
    ("REJECTED", "Rejected"),
    ("", "All"),
];

#[derive(Clone, Copy, PartialEq)]
enum Moderation {
    Approve,
    Reject,
    Delete,
}

impl Moderation {
    async fn apply(self, api: &AdminApi, id: i64) -> Result<(), ApiError> {
        match self {
            Moderation::Approve => api.approve_comment(id).await,
            Moderation::Reject => api.reject_comment(id).await,
            Moderation::Delete => api.delete_comment(id).await,
        }
    }
}

#[component]
pub fn AdminComments() -> Element {
    let auth = use_context::<AuthContext>();
    let mut status = use_signal(|| "PENDING".to_string());
    let mut error = use_signal(|| None::<ApiError>);

    let api = auth.client.admin();
    let list_api = api.clone();
    let mut queue = use_resource(move || {
        let api = list_api.clone();
        let status = status();
        async move {
            api.fetch_comments(&ModerationQuery {
                status: (!status.is_empty()).then_some(status),
                page: Some(1),
                size: Some(50),
            })
            .await
        }
    });

    let moderate = use_callback(move |(action, id): (Moderation, i64)| {
        let api = api.clone();
        spawn(async move {
            match action.apply(&api, id).await {
                Ok(()) => {
                    error.set(None);
                    queue.restart();
                }
                Err(e) => error.set(Some(e)),
            }
        });
    });

    let rows = match &*queue.read() {
        None => rsx! { Loading {} },
        Some(Err(e)) => rsx! { ApiErrorNotice { error: e.clone() } },
        Some(Ok(page)) if page.records.is_empty() => rsx! {
            p { class: "text-sm text-stone-500", "The queue is empty." }
        },
        Some(Ok(page)) => rsx! {
            table { class: "w-full bg-white text-sm",
                thead {
                    tr { class: "border-b text-left text-stone-500",
                        th { class: "p-2", "Author" }
                        th { class: "p-2", "Comment" }
                        th { class: "p-2", "Post" }
                        th { class: "p-2", "Status" }
                        th { class: "p-2", "" }
                    }
                }
                tbody {
                    for item in page.records.iter() {
                        tr { key: "{item.id}", class: "border-b align-top",
                            td { class: "p-2", "{item.author_name}"
                                div { class: "text-xs text-stone-400", {format_time(&item.created_at)} }
                            }
                            td { class: "p-2 whitespace-pre-wrap", "{item.content}" }
                            td { class: "p-2", "{item.post_title}" }
                            td { class: "p-2", "{item.status}" }
                            td { class: "flex gap-1 p-2",
                                ModerationButtons { id: item.id, on_action: moderate }
                            }
                        }
                    }
                }
            }
        },
    };

    rsx! {
        PageHeader { title: "Comments",
            select {
                class: "rounded-md border border-stone-300 px-2 py-1 text-sm",
                value: "{status}",
                onchange: move |e| status.set(e.value()),
                for (value, label) in STATUSES {
                    option { key: "{label}", value: "{value}", "{label}" }
                }
            }
        }
        if let Some(err) = error() {
            ApiErrorNotice { error: err }
        }
        {rows}
    }
}

#[component]
fn ModerationButtons(id: i64, on_action: Callback<(Moderation, i64)>) -> Element {
    rsx! {
        Button { onclick: move |_: MouseEvent| on_action.call((Moderation::Approve, id)), "Approve" }
        Button {
            variant: ButtonVariant::Secondary,
            onclick: move |_: MouseEvent| on_action.call((Moderation::Reject, id)),
            "Reject"
        }
        Button {
            variant: ButtonVariant::Danger,
            onclick: move |_: MouseEvent| on_action.call((Moderation::Delete, id)),
            "Delete"
        }
    }
}
