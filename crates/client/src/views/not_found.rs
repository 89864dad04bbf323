use dioxus::prelude::*;

use crate::routes::Route;

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = format!("/{}", segments.join("/"));

    rsx! {
        div { class: "flex min-h-screen flex-col items-center justify-center bg-stone-50 text-stone-800",
            h1 { class: "mb-2 text-4xl font-bold", "404" }
            p { class: "mb-6 text-stone-500", "Nothing lives at {path}." }
            Link { to: Route::Home {}, class: "text-emerald-700 hover:underline", "Back to the blog" }
        }
    }
}
