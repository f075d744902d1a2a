use std::collections::BTreeSet;

use chrono::Utc;
use dioxus::prelude::*;

use way_shared::button::{resolve_button_state, RegisterButtonState};
use way_shared::Session;

use crate::routes::Route;

#[derive(Props, Clone, PartialEq)]
pub struct RegistrationButtonProps {
    pub sessions: Vec<Session>,
    #[props(!optional)]
    pub selected_session_id: Option<String>,
    /// Session ids of this schedule the user already registered for.
    pub registered_sessions: BTreeSet<String>,
    pub is_full: bool,
    pub logged_in: bool,
    pub verified: bool,
    pub busy: bool,
    pub on_register: EventHandler<String>,
    pub on_request_spot: EventHandler<String>,
    pub on_open_calendar: EventHandler<()>,
}

/// The schedule card's call to action. All branching lives in
/// [`resolve_button_state`]; this maps each state to its markup.
#[component]
pub fn RegistrationButton(props: RegistrationButtonProps) -> Element {
    let selected = props
        .selected_session_id
        .as_ref()
        .and_then(|id| props.sessions.iter().find(|s| &s.id == id));

    let state = resolve_button_state(
        props.is_full,
        props.logged_in,
        props.verified,
        selected,
        &props.registered_sessions,
        Utc::now(),
    );

    let session_id = props.selected_session_id.clone().unwrap_or_default();

    match state {
        RegisterButtonState::LoginToRequest => rsx! {
            Link {
                to: Route::Login {},
                class: "inline-block text-stone-900 font-medium text-sm underline hover:text-stone-600 transition-colors",
                "Log in to Request Spot"
            }
        },
        RegisterButtonState::VerifyToRequest => rsx! {
            Link {
                to: Route::Verify {},
                class: "inline-block text-stone-900 font-medium text-sm underline hover:text-stone-600 transition-colors",
                "Verify Account to Request"
            }
        },
        RegisterButtonState::RequestSpot => rsx! {
            button {
                class: "text-stone-900 font-medium text-sm underline hover:text-stone-600 transition-colors disabled:opacity-50 disabled:cursor-not-allowed",
                disabled: props.busy,
                onclick: move |_| props.on_request_spot.call(session_id.clone()),
                if props.busy { "Processing..." } else { "Request a Spot" }
            }
        },
        RegisterButtonState::LoginToRegister => rsx! {
            Link {
                to: Route::Login {},
                class: "inline-block text-black underline font-medium text-sm hover:text-gray-700 transition-colors",
                "Log in to Register"
            }
        },
        RegisterButtonState::VerifyToRegister => rsx! {
            Link {
                to: Route::Verify {},
                class: "inline-block text-black underline font-medium text-sm hover:text-gray-700 transition-colors",
                "Verify Account to Register"
            }
        },
        RegisterButtonState::SelectSession => rsx! {
            button {
                class: "text-stone-900 font-medium text-sm underline hover:text-stone-600 transition-colors",
                onclick: move |_| props.on_open_calendar.call(()),
                "Select a session"
            }
        },
        RegisterButtonState::Hidden => rsx! {},
        RegisterButtonState::SessionStarted => rsx! {
            span { class: "text-gray-500 font-medium text-sm", "Session has started" }
        },
        RegisterButtonState::Register { starts_at } => {
            let label = format!("Register for {} session", starts_at.format("%b %-d"));
            rsx! {
                button {
                    class: "text-amber-800 font-medium text-sm underline hover:text-amber-600 transition-colors disabled:opacity-50 disabled:cursor-not-allowed",
                    disabled: props.busy,
                    onclick: move |_| props.on_register.call(session_id.clone()),
                    if props.busy { "Processing..." } else { "{label}" }
                }
            }
        }
    }
}
