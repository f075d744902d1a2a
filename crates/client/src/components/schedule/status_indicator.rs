use dioxus::prelude::*;

use way_shared::registration::RegistrationState;
use way_shared::RegistrationStatus;

/// Status badge for the selected session: pending, confirmed, or rejected
/// with a view-reason modal. Payment is handled offline, so approval means
/// enrolled and no payment state is surfaced.
#[component]
pub fn StatusIndicator(state: RegistrationState) -> Element {
    let mut show_reason = use_signal(|| false);

    match state.status {
        RegistrationStatus::Rejected => {
            let reason = state.rejection_reason.clone();
            rsx! {
                div { class: "flex items-center gap-2",
                    span { class: "text-sm px-3 py-1 bg-red-50 text-red-700 rounded-full font-medium badge-enter",
                        "✗ Rejected"
                    }
                    if !reason.is_empty() {
                        button {
                            class: "text-xs text-red-600 underline hover:text-red-800",
                            onclick: move |_| show_reason.set(true),
                            "View Reason"
                        }
                    }
                }
                if show_reason() {
                    div { class: "fixed inset-0 z-[9999] flex items-center justify-center bg-black/50 backdrop-blur-sm p-4 animate-fadeIn",
                        div { class: "bg-white p-6 rounded-lg shadow-2xl max-w-md w-full",
                            div { class: "flex justify-between items-start mb-4",
                                h3 { class: "text-lg font-semibold text-gray-900",
                                    "Registration Rejected"
                                }
                                button {
                                    class: "text-gray-400 hover:text-gray-600",
                                    onclick: move |_| show_reason.set(false),
                                    "✕"
                                }
                            }
                            div { class: "mb-6",
                                p { class: "text-sm text-gray-600 mb-2", "Reason:" }
                                p { class: "text-base text-gray-800 bg-gray-50 p-3 rounded",
                                    "{state.rejection_reason}"
                                }
                            }
                            div { class: "flex justify-end",
                                button {
                                    class: "px-4 py-2 bg-stone-900 text-white rounded hover:bg-stone-700",
                                    onclick: move |_| show_reason.set(false),
                                    "Close"
                                }
                            }
                        }
                    }
                }
            }
        }
        RegistrationStatus::Approved => rsx! {
            div { class: "flex items-center gap-2",
                span { class: "text-sm px-3 py-1 bg-green-50 text-green-700 rounded-full font-medium badge-enter",
                    "✓ Confirmed"
                }
            }
        },
        RegistrationStatus::Pending => rsx! {
            div { class: "flex items-center gap-2",
                span { class: "text-sm px-3 py-1 bg-gray-50 text-gray-600 rounded-full font-medium badge-enter",
                    "⏳ Pending"
                }
            }
        },
    }
}
