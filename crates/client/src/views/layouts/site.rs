//! Public site chrome: header with search and account links, footer.

use dioxus::prelude::*;

use crate::auth_session::AuthContext;
use crate::components::ui::{Button, ButtonVariant};
use crate::routes::Route;

#[component]
pub fn SiteLayout() -> Element {
    let auth = use_context::<AuthContext>();
    let nav = use_navigator();
    let mut search = use_signal(String::new);

    let session = auth.snapshot.read().clone();
    let site_name = auth.config.site_name.clone();
    let display_name = session.display_name().to_string();

    let on_search = move |evt: FormEvent| {
        evt.prevent_default();
        let q = search.read().trim().to_string();
        if !q.is_empty() {
            nav.push(Route::SearchResult { q });
        }
    };

    let on_logout = move |_: MouseEvent| {
        let auth = auth.clone();
        spawn(async move {
            auth.logout().await;
            nav.push(Route::Home {});
        });
    };

    rsx! {
        div { class: "min-h-screen flex flex-col bg-stone-50 text-stone-900",
            header { class: "border-b border-stone-200 bg-white",
                div { class: "mx-auto flex max-w-5xl items-center gap-4 px-4 py-3",
                    Link { to: Route::Home {}, class: "text-xl font-bold text-emerald-700", "{site_name}" }
                    form { class: "flex-1", onsubmit: on_search,
                        input {
                            class: "w-full max-w-xs rounded-md border border-stone-300 px-3 py-1.5 text-sm",
                            r#type: "search",
                            placeholder: "Search posts",
                            value: "{search}",
                            oninput: move |e| search.set(e.value()),
                        }
                    }
                    nav { class: "flex items-center gap-3 text-sm",
                        if session.is_authenticated() {
                            span { class: "text-stone-600", "{display_name}" }
                            if session.is_admin() {
                                Link { to: Route::AdminDashboard {}, class: "text-emerald-700 hover:underline", "Admin" }
                            }
                            Button { variant: ButtonVariant::Ghost, onclick: on_logout, "Sign out" }
                        } else {
                            Link {
                                to: Route::Login { redirect: String::new() },
                                class: "text-stone-700 hover:underline",
                                "Sign in"
                            }
                            Link { to: Route::Register {}, class: "text-stone-700 hover:underline", "Sign up" }
                        }
                    }
                }
            }
            main { class: "mx-auto w-full max-w-5xl flex-1 px-4 py-8",
                Outlet::<Route> {}
            }
            footer { class: "border-t border-stone-200 py-4 text-center text-xs text-stone-500",
                "{site_name}"
            }
        }
    }
}
