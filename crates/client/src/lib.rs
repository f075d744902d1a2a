//! WAY Studio Client - Dioxus web application
//!
//! The single-page site for the WAY pottery/art studio: marketing pages,
//! events, the class schedule with per-session registration, a small shop,
//! and the email/password auth flow. Domain logic lives in `way-shared`;
//! this crate is the HTTP client, session store, and rendering.

pub mod api_client;
pub mod auth_session;
pub mod config;
pub mod logging;
pub mod storage;

pub mod components;
pub mod hooks;
pub mod routes;
pub mod views;

pub use api_client::ApiClient;
pub use auth_session::{AuthContext, AuthProvider};
pub use routes::Route;
