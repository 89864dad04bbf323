//! Admin console pages. Every route here is behind `ROLE_ADMIN`.

mod comments;
mod dashboard;
mod posts;
mod settings;
mod tags;

pub use comments::AdminComments;
pub use dashboard::AdminDashboard;
pub use posts::AdminPosts;
pub use settings::AdminSettings;
pub use tags::AdminTags;

use dioxus::prelude::*;

/// Page heading with an optional action area on the right.
#[component]
fn PageHeader(#[props(into)] title: String, #[props(default)] children: Element) -> Element {
    rsx! {
        div { class: "mb-6 flex items-center justify-between",
            h1 { class: "text-2xl font-bold", "{title}" }
            div { class: "flex items-center gap-2", {children} }
        }
    }
}
