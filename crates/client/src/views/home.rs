//! Landing page: hero and about sections.

use dioxus::prelude::*;

use crate::auth_session::AuthContext;
use crate::routes::Route;

#[component]
pub fn Home() -> Element {
    let auth = use_context::<AuthContext>();

    rsx! {
        // Hero
        section { class: "bg-stone-100",
            div { class: "max-w-6xl mx-auto px-4 py-24 text-center",
                h1 { class: "text-4xl sm:text-6xl font-bold italic text-stone-900 mb-6",
                    "Make something with your hands"
                }
                p { class: "text-lg text-stone-600 max-w-2xl mx-auto mb-10",
                    "WAY is a pottery and art studio offering wheel-throwing and
                     hand-building classes, one-off workshops, and a small shop of
                     studio-made pieces."
                }
                div { class: "flex items-center justify-center gap-4",
                    Link {
                        to: Route::SchedulePage {},
                        class: "px-6 py-3 bg-stone-900 text-white rounded-lg font-medium hover:bg-stone-700 transition-colors",
                        "Browse classes"
                    }
                    if !auth.is_logged_in() {
                        Link {
                            to: Route::Register {},
                            class: "px-6 py-3 border border-stone-300 rounded-lg font-medium hover:bg-stone-200 transition-colors",
                            "Create an account"
                        }
                    }
                }
            }
        }

        // About
        section { class: "max-w-6xl mx-auto px-4 py-20 grid sm:grid-cols-2 gap-12 items-center",
            div {
                h2 { class: "text-3xl font-bold italic mb-4", "About the studio" }
                p { class: "text-stone-600 leading-relaxed mb-4",
                    "Our classes run in small groups around shared wheels and
                     worktables. Every schedule has several dated sessions, so you
                     can pick the one that fits your week and register online."
                }
                p { class: "text-stone-600 leading-relaxed",
                    "Spots are confirmed by the studio after you register. Full
                     sessions keep a waitlist; request a spot and we'll reach out
                     when one opens up."
                }
            }
            div { class: "grid grid-cols-2 gap-4",
                div { class: "h-40 bg-stone-200 rounded-lg" }
                div { class: "h-40 bg-stone-300 rounded-lg mt-8" }
                div { class: "h-40 bg-stone-300 rounded-lg" }
                div { class: "h-40 bg-stone-200 rounded-lg mt-8" }
            }
        }

        // Events teaser
        section { class: "bg-stone-900 text-white",
            div { class: "max-w-6xl mx-auto px-4 py-16 flex flex-col sm:flex-row items-center justify-between gap-6",
                div {
                    h2 { class: "text-2xl font-bold italic mb-2", "Private events & workshops" }
                    p { class: "text-stone-300",
                        "Birthdays, team days, date nights. Tell us what you have in mind."
                    }
                }
                Link {
                    to: Route::Events {},
                    class: "px-6 py-3 bg-white text-stone-900 rounded-lg font-medium hover:bg-stone-200 transition-colors",
                    "See events"
                }
            }
        }
    }
}
