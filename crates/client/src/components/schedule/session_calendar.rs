use chrono::{Datelike, Utc};
use dioxus::prelude::*;

use way_shared::calendar::{
    month_cells, month_title, next_month, previous_month, session_dates,
};
use way_shared::Session;

#[derive(Props, Clone, PartialEq)]
pub struct SessionCalendarProps {
    pub sessions: Vec<Session>,
    #[props(!optional)]
    pub selected_session_id: Option<String>,
    /// Fires with the session id when a highlighted day is picked.
    pub on_select: EventHandler<String>,
}

/// Month-grid session picker. Only days carrying a session are selectable.
#[component]
pub fn SessionCalendar(props: SessionCalendarProps) -> Element {
    let today = Utc::now().date_naive();
    let mut shown = use_signal(|| (today.year(), today.month()));

    let (year, month) = shown();
    let dates = session_dates(&props.sessions);
    let cells = month_cells(year, month, &dates);

    rsx! {
        div { class: "relative w-full",
            div { class: "w-full bg-white px-1 sm:px-2",
                // Month header with navigation
                div { class: "flex justify-between items-center mb-4",
                    button {
                        class: "p-1 px-3 rounded-full hover:bg-gray-100",
                        onclick: move |_| {
                            let (y, m) = shown();
                            shown.set(previous_month(y, m));
                        },
                        "‹"
                    }
                    h3 { class: "text-lg font-medium text-gray-900", {month_title(year, month)} }
                    button {
                        class: "p-1 px-3 rounded-full hover:bg-gray-100",
                        onclick: move |_| {
                            let (y, m) = shown();
                            shown.set(next_month(y, m));
                        },
                        "›"
                    }
                }

                // Weekday headers
                div { class: "grid grid-cols-7 gap-1 mb-2 text-center text-xs text-gray-500",
                    for day in ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"] {
                        div { key: "{day}", class: "py-1", {&day[..1]} }
                    }
                }

                // Day grid
                div { class: "grid grid-cols-7 gap-px sm:gap-1",
                    for (index, cell) in cells.iter().enumerate() {
                        match cell {
                            None => rsx! {
                                div { key: "{index}", class: "h-8 sm:h-10 w-full invisible" }
                            },
                            Some(day) => {
                                let label = day.day.to_string();
                                let session_id = day.session_id.clone();
                                let selected = session_id.is_some()
                                    && session_id == props.selected_session_id;
                                let class = if selected {
                                    "cursor-pointer bg-black text-white hover:bg-gray-800 border border-black font-bold"
                                } else if session_id.is_some() {
                                    "cursor-pointer bg-amber-700 text-white border border-gray-300 font-bold hover:bg-stone-900"
                                } else {
                                    "text-gray-400"
                                };
                                rsx! {
                                    div {
                                        key: "{index}",
                                        class: "h-8 sm:h-10 w-full flex items-center justify-center rounded-full text-xs sm:text-sm font-medium {class}",
                                        onclick: move |_| {
                                            if let Some(id) = &session_id {
                                                props.on_select.call(id.clone());
                                            }
                                        },
                                        "{label}"
                                    }
                                }
                            }
                        }
                    }
                }

                div { class: "mt-4 p-2 bg-blue-50 rounded-md border border-blue-200",
                    p { class: "text-xs font-medium text-center text-blue-800",
                        "Only highlighted dates have available sessions"
                    }
                }
            }
        }
    }
}
