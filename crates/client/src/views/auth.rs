//! Sign-in and sign-up forms.

use blogfront_shared::{LoginRequest, RegisterRequest};
use dioxus::prelude::*;

use crate::auth_session::AuthContext;
use crate::components::ui::{Button, Card, ErrorNotice, InputType, TextInput};
use crate::routes::Route;
use crate::views::non_empty;

/// `redirect` is where to go after a successful sign-in.
#[component]
pub fn Login(redirect: String) -> Element {
    let auth = use_context::<AuthContext>();
    let nav = use_navigator();
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let credentials = LoginRequest {
            username: username.read().trim().to_string(),
            password: password.read().clone(),
        };
        if credentials.username.is_empty() || credentials.password.is_empty() {
            error.set(Some("Enter your username and password.".to_string()));
            return;
        }
        let auth = auth.clone();
        let redirect = redirect.clone();
        submitting.set(true);
        spawn(async move {
            match auth.login(credentials).await {
                Ok(()) => {
                    nav.replace(Route::from_redirect(&redirect));
                }
                Err(e) => error.set(Some(e.user_message())),
            }
            submitting.set(false);
        });
    };

    rsx! {
        div { class: "mx-auto max-w-sm",
            Card { title: "Sign in",
                if let Some(message) = error() {
                    ErrorNotice { message }
                }
                form { class: "space-y-4", onsubmit: on_submit,
                    TextInput {
                        label: "Username",
                        value: username(),
                        oninput: move |e: FormEvent| username.set(e.value()),
                    }
                    TextInput {
                        label: "Password",
                        input_type: InputType::Password,
                        value: password(),
                        oninput: move |e: FormEvent| password.set(e.value()),
                    }
                    Button { r#type: "submit", class: "w-full", disabled: submitting(),
                        if submitting() {
                            "Signing in…"
                        } else {
                            "Sign in"
                        }
                    }
                }
                p { class: "mt-4 text-center text-sm text-stone-500",
                    "No account? "
                    Link { to: Route::Register {}, class: "text-emerald-700 hover:underline", "Sign up" }
                }
            }
        }
    }
}

#[component]
pub fn Register() -> Element {
    let auth = use_context::<AuthContext>();
    let nav = use_navigator();
    let mut username = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut nickname = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let payload = RegisterRequest {
            username: username.read().trim().to_string(),
            email: email.read().trim().to_string(),
            password: password.read().clone(),
            nickname: non_empty(&nickname.read()),
        };
        if payload.username.is_empty() || payload.email.is_empty() || payload.password.is_empty() {
            error.set(Some("Username, email and password are required.".to_string()));
            return;
        }
        let auth = auth.clone();
        submitting.set(true);
        spawn(async move {
            match auth.register(payload).await {
                Ok(_) => {
                    nav.push(Route::Login {
                        redirect: String::new(),
                    });
                }
                Err(e) => error.set(Some(e.user_message())),
            }
            submitting.set(false);
        });
    };

    rsx! {
        div { class: "mx-auto max-w-sm",
            Card { title: "Create an account",
                if let Some(message) = error() {
                    ErrorNotice { message }
                }
                form { class: "space-y-4", onsubmit: on_submit,
                    TextInput {
                        label: "Username",
                        value: username(),
                        oninput: move |e: FormEvent| username.set(e.value()),
                    }
                    TextInput {
                        label: "Email",
                        input_type: InputType::Email,
                        value: email(),
                        oninput: move |e: FormEvent| email.set(e.value()),
                    }
                    TextInput {
                        label: "Nickname (optional)",
                        value: nickname(),
                        oninput: move |e: FormEvent| nickname.set(e.value()),
                    }
                    TextInput {
                        label: "Password",
                        input_type: InputType::Password,
                        value: password(),
                        oninput: move |e: FormEvent| password.set(e.value()),
                    }
                    Button { r#type: "submit", class: "w-full", disabled: submitting(), "Sign up" }
                }
                p { class: "mt-4 text-center text-sm text-stone-500",
                    "Already registered? "
                    Link {
                        to: Route::Login { redirect: String::new() },
                        class: "text-emerald-700 hover:underline",
                        "Sign in"
                    }
                }
            }
        }
    }
}
