//! Blogfront Client - Main entry point
//!
//! Supports both web (WASM) and desktop platforms.

#![allow(non_snake_case)]

use blogfront_client::{auth_session::AuthProvider, logging, routes::Route};
use dioxus::prelude::*;

const MAIN_CSS: Asset = asset!("/assets/styling/main.css");

fn main() {
    logging::init();
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        AuthProvider {
            Router::<Route> {}
        }
    }
}
