//! Class schedule page: fetches schedules and renders a card per class,
//! with the registration machine driving all booking interactions.

use dioxus::prelude::*;

use crate::api_client::ApiClient;
use crate::auth_session::AuthContext;
use crate::components::schedule::{MessageNotification, ScheduleCard};
use crate::hooks::use_registration;

#[component]
pub fn SchedulePage() -> Element {
    let auth = use_context::<AuthContext>();
    let registration = use_registration();

    let schedules = use_resource(|| async move {
        ApiClient::new().schedules().await.map_err(|e| e.to_string())
    });

    let logged_in = auth.is_logged_in();
    let verified = auth.is_verified();

    rsx! {
        if let Some(notice) = registration.notice() {
            MessageNotification { notice }
        }

        div { class: "max-w-6xl mx-auto px-4 py-12",
            h1 { class: "text-3xl sm:text-4xl font-bold italic mb-10", "Class Schedule" }

            match schedules.read().as_ref() {
                None => rsx! {
                    div { class: "flex flex-col gap-4 min-h-[50vh] items-center justify-center",
                        p { class: "text-xl font-bold", "Loading..." }
                    }
                },
                Some(Err(e)) => rsx! {
                    div { class: "min-h-[50vh] flex items-center justify-center",
                        div { class: "p-4 bg-red-50 border border-red-200 rounded-lg text-red-700",
                            "Could not load the schedule: {e}"
                        }
                    }
                },
                Some(Ok(schedules)) if schedules.is_empty() => rsx! {
                    div { class: "min-h-[50vh] flex flex-col items-center justify-center text-center",
                        h2 { class: "text-2xl font-bold mb-2", "No classes right now" }
                        p { class: "text-stone-500 max-w-md",
                            "We're preparing the next round of classes. Check back soon
                             or follow us for announcements."
                        }
                    }
                },
                Some(Ok(schedules)) => rsx! {
                    div { class: "grid sm:grid-cols-2 lg:grid-cols-3 gap-10",
                        for schedule in schedules.iter() {
                            ScheduleCard {
                                key: "{schedule.id}",
                                schedule: schedule.clone(),
                                statuses: registration.schedule_statuses(&schedule.id),
                                logged_in,
                                verified,
                                busy: registration.busy(),
                                on_register: move |(schedule_id, session_id): (String, String)| {
                                    registration.register(schedule_id, Some(session_id));
                                },
                                on_request_spot: move |(schedule_id, session_id): (String, String)| {
                                    registration.request_spot(schedule_id, session_id);
                                },
                            }
                        }
                    }
                },
            }
        }
    }
}
