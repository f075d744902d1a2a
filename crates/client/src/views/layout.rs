//! Site chrome: header navigation, footer, and the routed outlet.

use dioxus::prelude::*;

use crate::auth_session::AuthContext;
use crate::routes::Route;

#[component]
pub fn SiteLayout() -> Element {
    let mut auth = use_context::<AuthContext>();
    let nav = use_navigator();

    rsx! {
        div { class: "min-h-screen flex flex-col",
            header { class: "sticky top-0 z-50 bg-white/90 backdrop-blur border-b border-stone-200",
                div { class: "max-w-6xl mx-auto px-4 py-4 flex items-center justify-between",
                    Link { to: Route::Home {}, class: "text-2xl font-bold tracking-wide italic",
                        "WAY"
                    }
                    nav { class: "flex items-center gap-6 text-sm font-medium",
                        Link { to: Route::Home {}, class: "hover:text-stone-600", "Home" }
                        Link { to: Route::SchedulePage {}, class: "hover:text-stone-600", "Schedule" }
                        Link { to: Route::Events {}, class: "hover:text-stone-600", "Events" }
                        Link { to: Route::Shop {}, class: "hover:text-stone-600", "Shop" }
                        if auth.is_logged_in() {
                            Link { to: Route::Profile {}, class: "hover:text-stone-600", "Profile" }
                            button {
                                class: "text-stone-500 hover:text-stone-900",
                                onclick: move |_| {
                                    auth.logout();
                                    nav.push(Route::Home {});
                                },
                                "Log out"
                            }
                        } else {
                            Link { to: Route::Login {}, class: "hover:text-stone-600", "Log in" }
                            Link {
                                to: Route::Register {},
                                class: "px-4 py-2 bg-stone-900 text-white rounded-lg hover:bg-stone-700",
                                "Join us"
                            }
                        }
                    }
                }
            }

            main { class: "flex-1", Outlet::<Route> {} }

            footer { class: "bg-stone-900 text-stone-300 mt-16",
                div { class: "max-w-6xl mx-auto px-4 py-10 flex flex-col sm:flex-row justify-between gap-6 text-sm",
                    div {
                        p { class: "text-lg font-bold italic text-white mb-2", "WAY" }
                        p { "A pottery and art studio." }
                    }
                    div { class: "flex flex-col gap-1",
                        Link { to: Route::SchedulePage {}, class: "hover:text-white", "Classes" }
                        Link { to: Route::Events {}, class: "hover:text-white", "Events" }
                        Link { to: Route::Shop {}, class: "hover:text-white", "Shop" }
                    }
                }
            }
        }
    }
}
