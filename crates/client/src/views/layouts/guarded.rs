//! Outermost layout: runs the navigation guard for every route change.

use dioxus::prelude::*;

use crate::auth_session::AuthContext;
use crate::components::ui::Loading;
use crate::guard::GuardDecision;
use crate::routes::Route;

/// Renders the matched route only once the guard has allowed it.
///
/// Each route change starts a new evaluation. Evaluations are not cancelled,
/// but only the most recent one may navigate or reveal the page.
#[component]
pub fn GuardedLayout() -> Element {
    let auth = use_context::<AuthContext>();
    let route = use_route::<Route>();
    let nav = use_navigator();
    let mut cleared = use_signal(|| None::<Route>);
    let mut generation = use_signal(|| 0u64);

    use_effect(use_reactive((&route,), move |(route,)| {
        let auth = auth.clone();
        let current = *generation.peek() + 1;
        generation.set(current);

        spawn(async move {
            let decision = auth.guard.evaluate(&route.target()).await;
            auth.sync();
            if *generation.peek() != current {
                crate::log_debug!("dropping guard decision for {route}");
                return;
            }
            match decision {
                GuardDecision::Allow => cleared.set(Some(route)),
                GuardDecision::Redirect(redirect) => {
                    nav.replace(Route::from(redirect));
                }
            }
        });
    }));

    if cleared.read().as_ref() == Some(&route) {
        rsx! {
            Outlet::<Route> {}
        }
    } else {
        rsx! {
            Loading {}
        }
    }
}
