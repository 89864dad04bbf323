//! Admin console chrome: sidebar navigation around the admin pages.

use dioxus::prelude::*;

use crate::auth_session::AuthContext;
use crate::routes::Route;

const SECTIONS: [(&str, Route); 5] = [
    ("Dashboard", Route::AdminDashboard {}),
    ("Posts", Route::AdminPosts {}),
    ("Comments", Route::AdminComments {}),
    ("Tags", Route::AdminTags {}),
    ("Settings", Route::AdminSettings {}),
];

fn section_class(active: bool) -> &'static str {
    if active {
        "rounded-md bg-stone-700 px-3 py-2 text-sm text-white"
    } else {
        "rounded-md px-3 py-2 text-sm hover:bg-stone-800"
    }
}

#[component]
pub fn AdminLayout() -> Element {
    let auth = use_context::<AuthContext>();
    let route = use_route::<Route>();
    let name = auth.snapshot.read().display_name().to_string();
    let site_name = auth.config.site_name.clone();

    rsx! {
        div { class: "flex min-h-screen bg-stone-100 text-stone-900",
            aside { class: "flex w-56 flex-col bg-stone-900 text-stone-200",
                div { class: "px-4 py-5 text-lg font-semibold", "{site_name}" }
                nav { class: "flex flex-1 flex-col gap-1 px-2",
                    for (label, target) in SECTIONS {
                        Link {
                            key: "{label}",
                            to: target.clone(),
                            class: section_class(route == target),
                            "{label}"
                        }
                    }
                }
                div { class: "border-t border-stone-700 px-4 py-3 text-xs",
                    p { class: "mb-2 text-stone-400", "Signed in as {name}" }
                    Link { to: Route::Home {}, class: "hover:underline", "Back to site" }
                }
            }
            main { class: "flex-1 p-8",
                Outlet::<Route> {}
            }
        }
    }
}
