//! WAY Studio Client - Main entry point
//!
//! A Dioxus application for the WAY pottery/art studio.
//! Supports both web (WASM) and desktop platforms.

#![allow(non_snake_case)]

use dioxus::prelude::*;
use way_client::{auth_session::AuthProvider, routes::Route};

// Assets
const MAIN_CSS: Asset = asset!("/assets/styling/main.css");

fn main() {
    // Initialize tracing for desktop
    #[cfg(not(target_arch = "wasm32"))]
    {
        use tracing_subscriber::EnvFilter;
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("way_client=debug")),
            )
            .init();
    }

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
