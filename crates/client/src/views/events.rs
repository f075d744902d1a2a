//! Events page: upcoming studio events with a request-to-attend modal.

use dioxus::prelude::*;

use way_shared::{Event, EventRequest};

use crate::api_client::ApiClient;
use crate::components::ui::{Button, ButtonVariant, FormField, InputType};
use crate::config;
use crate::hooks::time::sleep_ms;

#[component]
pub fn Events() -> Element {
    let events = use_resource(|| async move {
        ApiClient::new().events().await.map_err(|e| e.to_string())
    });

    let mut selected_event = use_signal(|| None::<Event>);

    rsx! {
        div { class: "max-w-6xl mx-auto px-4 py-12",
            h1 { class: "text-3xl sm:text-4xl font-bold italic mb-10", "Events" }

            match events.read().as_ref() {
                None => rsx! {
                    div { class: "min-h-[50vh] flex items-center justify-center",
                        p { class: "text-xl font-bold", "Loading..." }
                    }
                },
                Some(Err(e)) => rsx! {
                    div { class: "min-h-[50vh] flex items-center justify-center",
                        div { class: "p-4 bg-red-50 border border-red-200 rounded-lg text-red-700",
                            "Could not load events: {e}"
                        }
                    }
                },
                Some(Ok(events)) if events.is_empty() => rsx! {
                    div { class: "min-h-[50vh] flex flex-col items-center justify-center text-center",
                        h2 { class: "text-2xl font-bold mb-2", "No events scheduled" }
                        p { class: "text-stone-500", "New workshops and open-studio nights are announced here." }
                    }
                },
                Some(Ok(events)) => rsx! {
                    div { class: "grid sm:grid-cols-2 lg:grid-cols-3 gap-8",
                        for event in events.iter() {
                            EventCard {
                                key: "{event.id}",
                                event: event.clone(),
                                on_request: move |event: Event| selected_event.set(Some(event)),
                            }
                        }
                    }
                },
            }

            if let Some(event) = selected_event() {
                EventRequestModal {
                    event,
                    on_close: move |_| selected_event.set(None),
                }
            }
        }
    }
}

#[component]
fn EventCard(event: Event, on_request: EventHandler<Event>) -> Element {
    let event_for_request = event.clone();

    rsx! {
        div { class: "flex flex-col bg-white border border-stone-200 rounded-xl overflow-hidden",
            if let Some(image) = &event.image {
                img {
                    class: "w-full h-48 object-cover",
                    src: config::image_url(image),
                    alt: "{event.title}",
                }
            } else {
                div { class: "w-full h-48 bg-stone-100" }
            }
            div { class: "p-5 flex flex-col flex-grow",
                h3 { class: "text-lg font-semibold mb-2", "{event.title}" }
                if let Some(date) = event.date {
                    p { class: "text-sm text-stone-500 mb-2", {date.format("%B %-d, %Y").to_string()} }
                }
                if let Some(content) = &event.content {
                    div {
                        class: "text-sm text-stone-600 mb-4 flex-grow",
                        dangerous_inner_html: "{content}",
                    }
                }
                button {
                    class: "mt-auto self-start text-stone-900 font-medium text-sm underline hover:text-stone-600",
                    onclick: move |_| on_request.call(event_for_request.clone()),
                    "Request to attend"
                }
            }
        }
    }
}

/// Show a status banner and clear it after five seconds, unless a newer
/// banner replaced it meanwhile.
fn flash_status(
    mut status: Signal<Option<(bool, String)>>,
    mut status_seq: Signal<u64>,
    ok: bool,
    text: String,
) {
    status.set(Some((ok, text)));
    let tag = *status_seq.peek() + 1;
    status_seq.set(tag);
    spawn(async move {
        sleep_ms(5_000).await;
        if *status_seq.peek() == tag {
            status.set(None);
        }
    });
}

#[component]
fn EventRequestModal(event: Event, on_close: EventHandler<()>) -> Element {
    let mut email = use_signal(String::new);
    let mut phone = use_signal(String::new);
    let mut message = use_signal(String::new);
    let status = use_signal(|| None::<(bool, String)>);
    let status_seq = use_signal(|| 0u64);
    let mut is_sending = use_signal(|| false);
    let mut sent = use_signal(|| false);

    let event_id = event.id.clone();
    let event_title = event.title.clone();

    let handle_submit = move |e: FormEvent| {
        e.prevent_default();

        let email_value = email.read().trim().to_string();
        let phone_value = phone.read().trim().to_string();
        if email_value.is_empty() {
            flash_status(status, status_seq, false, "Email is required".to_string());
            return;
        }
        if phone_value.is_empty() {
            flash_status(
                status,
                status_seq,
                false,
                "Phone number is required".to_string(),
            );
            return;
        }

        is_sending.set(true);
        let req = EventRequest {
            event_id: event_id.clone(),
            event_title: event_title.clone(),
            email: email_value,
            phone: phone_value,
            message: message.read().trim().to_string(),
        };
        spawn(async move {
            match ApiClient::new().request_event(&req).await {
                Ok(_) => {
                    sent.set(true);
                    flash_status(
                        status,
                        status_seq,
                        true,
                        "Your event request has been sent successfully!".to_string(),
                    );
                }
                Err(err) => {
                    let text = err
                        .server_message()
                        .map(str::to_string)
                        .unwrap_or_else(|| err.to_string());
                    flash_status(status, status_seq, false, text);
                }
            }
            is_sending.set(false);
        });
    };

    rsx! {
        div { class: "fixed inset-0 z-[9999] flex items-center justify-center bg-black/50 backdrop-blur-sm p-4 animate-fadeIn",
            div { class: "bg-white p-6 rounded-lg shadow-2xl max-w-md w-full",
                div { class: "flex justify-between items-start mb-4",
                    h3 { class: "text-lg font-semibold", "Request: {event.title}" }
                    button {
                        class: "text-gray-400 hover:text-gray-600",
                        onclick: move |_| on_close.call(()),
                        "✕"
                    }
                }

                if sent() {
                    div { class: "text-center py-8",
                        p { class: "text-green-700 font-medium mb-4",
                            "Thanks! We'll get back to you about this event."
                        }
                        Button {
                            variant: ButtonVariant::Primary,
                            onclick: move |_| on_close.call(()),
                            "Done"
                        }
                    }
                } else {
                    form { onsubmit: handle_submit,
                        FormField {
                            label: "Email",
                            value: email(),
                            input_type: InputType::Email,
                            placeholder: "you@example.com",
                            oninput: move |e: FormEvent| email.set(e.value()),
                        }
                        FormField {
                            label: "Phone",
                            value: phone(),
                            input_type: InputType::Tel,
                            oninput: move |e: FormEvent| phone.set(e.value()),
                        }
                        FormField {
                            label: "Message (optional)",
                            value: message(),
                            oninput: move |e: FormEvent| message.set(e.value()),
                        }

                        if let Some((ok, text)) = status() {
                            div {
                                class: if ok {
                                    "mb-4 p-3 bg-green-50 border border-green-200 rounded-lg text-green-700 text-sm"
                                } else {
                                    "mb-4 p-3 bg-red-50 border border-red-200 rounded-lg text-red-700 text-sm"
                                },
                                "{text}"
                            }
                        }

                        div { class: "flex justify-end gap-3",
                            Button {
                                variant: ButtonVariant::Secondary,
                                onclick: move |_| on_close.call(()),
                                "Cancel"
                            }
                            Button {
                                r#type: "submit",
                                variant: ButtonVariant::Primary,
                                disabled: is_sending(),
                                if is_sending() { "Sending..." } else { "Send request" }
                            }
                        }
                    }
                }
            }
        }
    }
}
