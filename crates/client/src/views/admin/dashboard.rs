use dioxus::prelude::*;

use super::PageHeader;
use crate::auth_session::AuthContext;
use crate::components::ui::{ApiErrorNotice, Card, Loading};
use crate::routes::Route;

#[component]
pub fn AdminDashboard() -> Element {
    let auth = use_context::<AuthContext>();
    let api = auth.client.analytics();
    let overview = use_resource(move || {
        let api = api.clone();
        async move { api.fetch_overview().await }
    });

    let body = match &*overview.read() {
        None => rsx! { Loading {} },
        Some(Err(error)) => rsx! { ApiErrorNotice { error: error.clone() } },
        Some(Ok(stats)) => rsx! {
            div { class: "mb-8 grid grid-cols-2 gap-4 lg:grid-cols-4",
                Stat { label: "Page views today", value: stats.today_pv }
                Stat { label: "Visitors today", value: stats.today_uv }
                Stat { label: "Published posts", value: stats.published_posts }
                Stat { label: "Pending comments", value: stats.pending_comments }
            }
            Card { title: "Hot posts",
                if stats.hot_posts.is_empty() {
                    p { class: "text-sm text-stone-500", "Nothing trending yet." }
                } else {
                    ol { class: "space-y-2",
                        for hot in stats.hot_posts.iter() {
                            li { key: "{hot.post_id}", class: "flex justify-between text-sm",
                                Link {
                                    to: Route::PostDetail { slug: hot.slug.clone() },
                                    class: "text-emerald-700 hover:underline",
                                    "{hot.title}"
                                }
                                span { class: "text-stone-500", "score {hot.score}" }
                            }
                        }
                    }
                }
            }
        },
    };

    rsx! {
        PageHeader { title: "Dashboard" }
        {body}
    }
}

#[component]
fn Stat(#[props(into)] label: String, value: u64) -> Element {
    rsx! {
        div { class: "rounded-lg border border-stone-200 bg-white p-4",
            p { class: "text-xs uppercase tracking-wide text-stone-500", "{label}" }
            p { class: "mt-1 text-2xl font-semibold", "{value}" }
        }
    }
}
