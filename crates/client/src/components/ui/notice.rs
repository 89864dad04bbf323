use blogfront_shared::ApiError;
use dioxus::prelude::*;

/// Red banner for a failed call.
#[component]
pub fn ErrorNotice(message: String) -> Element {
    rsx! {
        div { class: "mb-4 rounded-md border border-rose-200 bg-rose-50 p-3 text-sm text-rose-700",
            "{message}"
        }
    }
}

/// Banner for an [`ApiError`], showing the server's message when it sent one.
#[component]
pub fn ApiErrorNotice(error: ApiError) -> Element {
    rsx! {
        ErrorNotice { message: error.user_message() }
    }
}

#[component]
pub fn Loading() -> Element {
    rsx! {
        p { class: "py-8 text-center text-sm text-stone-500", "Loading…" }
    }
}
