//! Account and client settings.

use dioxus::prelude::*;

use super::PageHeader;
use crate::auth_session::AuthContext;
use crate::components::ui::{Button, Card, ErrorNotice};

#[component]
pub fn AdminSettings() -> Element {
    let auth = use_context::<AuthContext>();
    let mut notice = use_signal(|| None::<String>);
    let mut error = use_signal(|| None::<String>);

    let session = auth.snapshot.read().clone();
    let profile = session.user.clone();
    let roles = session.roles().into_iter().collect::<Vec<_>>().join(", ");
    let base_url = auth.config.base_url.clone();
    let timeout_ms = auth.config.timeout.as_millis();
    let site_name = auth.config.site_name.clone();
    let can_refresh = session.refresh_token.is_some();

    let on_refresh = move |_: MouseEvent| {
        let auth = auth.clone();
        spawn(async move {
            match auth.session.refresh_tokens().await {
                Ok(_) => {
                    error.set(None);
                    notice.set(Some("Session renewed.".to_string()));
                }
                Err(e) => {
                    notice.set(None);
                    error.set(Some(e.user_message()));
                }
            }
            auth.sync();
        });
    };

    rsx! {
        PageHeader { title: "Settings" }
        div { class: "grid gap-6 lg:grid-cols-2",
            Card { title: "Account",
                if let Some(user) = profile {
                    dl { class: "grid grid-cols-3 gap-2 text-sm",
                        dt { class: "text-stone-500", "Username" }
                        dd { class: "col-span-2", "{user.username}" }
                        dt { class: "text-stone-500", "Display name" }
                        dd { class: "col-span-2", {user.display_name().to_string()} }
                        dt { class: "text-stone-500", "Email" }
                        dd { class: "col-span-2", {user.email.clone().unwrap_or_default()} }
                        dt { class: "text-stone-500", "Roles" }
                        dd { class: "col-span-2", "{roles}" }
                    }
                }
                div { class: "mt-4",
                    if let Some(message) = error() {
                        ErrorNotice { message }
                    }
                    if let Some(message) = notice() {
                        p { class: "mb-2 text-sm text-emerald-700", "{message}" }
                    }
                    Button { disabled: !can_refresh, onclick: on_refresh, "Renew session" }
                }
            }
            Card { title: "Client",
                dl { class: "grid grid-cols-3 gap-2 text-sm",
                    dt { class: "text-stone-500", "Site name" }
                    dd { class: "col-span-2", "{site_name}" }
                    dt { class: "text-stone-500", "API base" }
                    dd { class: "col-span-2 font-mono", "{base_url}" }
                    dt { class: "text-stone-500", "Timeout" }
                    dd { class: "col-span-2", "{timeout_ms} ms" }
                }
            }
        }
    }
}
