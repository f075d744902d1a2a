use std::collections::BTreeMap;

use dioxus::prelude::*;

use way_shared::registration::RegistrationState;
use way_shared::Schedule;

use crate::components::schedule::{RegistrationButton, SessionCalendar, StatusIndicator};
use crate::config;
use crate::hooks::use_capacity;

#[derive(Props, Clone, PartialEq)]
pub struct ScheduleCardProps {
    pub schedule: Schedule,
    /// This schedule's registration slots, keyed by session id.
    pub statuses: BTreeMap<String, RegistrationState>,
    pub logged_in: bool,
    pub verified: bool,
    pub busy: bool,
    /// `(schedule_id, session_id)` pairs.
    pub on_register: EventHandler<(String, String)>,
    pub on_request_spot: EventHandler<(String, String)>,
}

/// One bookable class: gallery, description, price, session picker, and the
/// registration call-to-action with its status badge.
#[component]
pub fn ScheduleCard(props: ScheduleCardProps) -> Element {
    let mut selected_session_id = use_signal(|| None::<String>);
    let mut show_calendar = use_signal(|| false);

    let capacity = use_capacity(props.schedule.id.clone());

    let schedule = &props.schedule;
    let selected = selected_session_id();
    let selected_session = selected
        .as_ref()
        .and_then(|id| schedule.sessions.iter().find(|s| &s.id == id));

    // Fail-open: an unloaded or failed capacity fetch reads as not-full.
    let is_full = selected_session.is_some_and(|session| {
        capacity
            .read()
            .as_ref()
            .is_some_and(|board| board.session_is_full(session))
    });

    let registered_sessions: std::collections::BTreeSet<String> =
        props.statuses.keys().cloned().collect();
    let selected_state = selected
        .as_ref()
        .and_then(|id| props.statuses.get(id).cloned());

    let schedule_id = schedule.id.clone();
    let schedule_id_for_register = schedule_id.clone();
    let schedule_id_for_spot = schedule_id.clone();
    let schedule_id_for_confirm = schedule_id.clone();

    let confirm_label = match (&selected, selected_session) {
        (None, _) => "Please select a session".to_string(),
        (Some(id), _) if registered_sessions.contains(id) => {
            "Select this session".to_string()
        }
        (Some(_), Some(session)) => {
            format!("Register for {} session", session.start_date.format("%b %-d"))
        }
        (Some(_), None) => "Register for this session".to_string(),
    };
    let confirm_registered = selected
        .as_ref()
        .is_some_and(|id| registered_sessions.contains(id));

    rsx! {
        div { class: "flex flex-col h-full",
            // Calendar modal
            if show_calendar() && !schedule.sessions.is_empty() {
                div { class: "fixed inset-0 z-[9999] flex items-center justify-center bg-black/50 backdrop-blur-sm p-3 sm:px-4 animate-fadeIn",
                    div { class: "bg-white p-3 sm:p-4 md:p-6 rounded-lg shadow-2xl max-w-[95%] sm:max-w-sm md:max-w-md w-full",
                        div { class: "flex justify-between items-center mb-3 sm:mb-4",
                            h3 { class: "text-base sm:text-lg font-medium", "Select a Session Date" }
                            button {
                                class: "text-gray-400 hover:text-gray-600",
                                onclick: move |_| show_calendar.set(false),
                                "✕"
                            }
                        }
                        SessionCalendar {
                            sessions: schedule.sessions.clone(),
                            selected_session_id: selected.clone(),
                            on_select: move |session_id: String| {
                                selected_session_id.set(Some(session_id));
                                show_calendar.set(false);
                            },
                        }
                        div { class: "mt-3 sm:mt-4 flex flex-col sm:flex-row justify-between gap-3",
                            button {
                                class: "text-gray-600 text-sm sm:text-base order-2 sm:order-1",
                                onclick: move |_| show_calendar.set(false),
                                "Cancel"
                            }
                            button {
                                class: "text-black underline font-medium text-sm sm:text-base order-1 sm:order-2 disabled:opacity-50",
                                disabled: selected.is_none(),
                                onclick: move |_| {
                                    if let Some(session_id) = selected_session_id.peek().clone() {
                                        show_calendar.set(false);
                                        if !confirm_registered {
                                            props.on_register.call((
                                                schedule_id_for_confirm.clone(),
                                                session_id,
                                            ));
                                        }
                                    }
                                },
                                "{confirm_label}"
                            }
                        }
                    }
                }
            }

            // Image gallery with fully-booked badge
            div { class: "w-full relative",
                div { class: "absolute top-2 right-2 z-[100]",
                    if is_full {
                        span { class: "text-sm px-3 py-1 rounded-full font-medium bg-red-200 text-red-700",
                            "Fully Booked"
                        }
                    }
                }
                ScheduleImageGallery { images: schedule.images.clone() }
            }

            // Content
            div { class: "relative flex-grow",
                h2 { class: "text-xl sm:text-2xl italic font-medium text-gray-900 mt-4 sm:mt-5 mb-3 sm:mb-4",
                    "{schedule.title}"
                }

                div { class: "mb-6",
                    div {
                        class: "text-stone-700 font-medium",
                        dangerous_inner_html: schedule
                            .text
                            .clone()
                            .unwrap_or_else(|| "No description available.".to_string()),
                    }
                }

                if schedule.price > 0.0 {
                    div { class: "mb-4",
                        span { class: "text-2xl font-bold text-stone-900", "${schedule.price}" }
                    }
                }

                div { class: "mt-auto flex items-center gap-6",
                    RegistrationButton {
                        sessions: schedule.sessions.clone(),
                        selected_session_id: selected.clone(),
                        registered_sessions: registered_sessions.clone(),
                        is_full,
                        logged_in: props.logged_in,
                        verified: props.verified,
                        busy: props.busy,
                        on_register: move |session_id: String| {
                            props.on_register.call((schedule_id_for_register.clone(), session_id));
                        },
                        on_request_spot: move |session_id: String| {
                            props
                                .on_request_spot
                                .call((schedule_id_for_spot.clone(), session_id));
                        },
                        on_open_calendar: move |_| show_calendar.set(true),
                    }

                    if let Some(state) = selected_state {
                        StatusIndicator { state }
                    }
                }
            }
        }
    }
}

/// Minimal gallery: one image at a time with previous/next controls.
#[component]
fn ScheduleImageGallery(images: Vec<String>) -> Element {
    let mut index = use_signal(|| 0usize);

    if images.is_empty() {
        return rsx! {
            div { class: "w-full h-56 bg-stone-100 rounded-lg flex items-center justify-center",
                span { class: "text-gray-400", "No images available" }
            }
        };
    }

    let count = images.len();
    let current = index() % count;
    let src = config::image_url(&images[current]);

    rsx! {
        div { class: "relative w-full h-56 rounded-lg overflow-hidden bg-stone-100",
            img { class: "w-full h-full object-cover", src: "{src}" }
            if count > 1 {
                button {
                    class: "absolute left-2 top-1/2 -translate-y-1/2 bg-white/80 rounded-full w-8 h-8 hover:bg-white",
                    onclick: move |_| index.set((current + count - 1) % count),
                    "‹"
                }
                button {
                    class: "absolute right-2 top-1/2 -translate-y-1/2 bg-white/80 rounded-full w-8 h-8 hover:bg-white",
                    onclick: move |_| index.set((current + 1) % count),
                    "›"
                }
            }
        }
    }
}
