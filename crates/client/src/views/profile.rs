//! Profile page: account details and links to account management.

use dioxus::prelude::*;

use crate::auth_session::AuthContext;
use crate::routes::Route;

#[component]
pub fn Profile() -> Element {
    let mut auth = use_context::<AuthContext>();
    let nav = use_navigator();

    let Some(user) = auth.user() else {
        return rsx! {
            div { class: "max-w-md mx-auto px-4 py-16 text-center",
                p { class: "text-stone-600 mb-4", "You're not logged in." }
                Link { to: Route::Login {}, class: "underline text-stone-900", "Go to login" }
            }
        };
    };

    rsx! {
        div { class: "max-w-2xl mx-auto px-4 py-16",
            div { class: "flex items-center justify-between mb-8",
                h1 { class: "text-3xl font-bold italic", "Your profile" }
                if !user.verified {
                    Link {
                        to: Route::Verify {},
                        class: "text-sm px-3 py-1 bg-amber-100 text-amber-800 rounded-full font-medium hover:bg-amber-200",
                        "Email not verified"
                    }
                }
            }

            div { class: "bg-white border border-stone-200 rounded-xl divide-y divide-stone-100",
                ProfileRow { label: "Name", value: user.full_name.clone() }
                ProfileRow { label: "Email", value: user.email.clone() }
                ProfileRow {
                    label: "Phone",
                    value: user.phone_number.clone().unwrap_or_else(|| "—".to_string()),
                }
            }

            div { class: "mt-8 flex flex-wrap gap-4 text-sm",
                Link {
                    to: Route::EditProfile {},
                    class: "px-4 py-2 bg-stone-900 text-white rounded-lg hover:bg-stone-700",
                    "Edit profile"
                }
                Link {
                    to: Route::ChangePassword {},
                    class: "px-4 py-2 border border-stone-300 rounded-lg hover:bg-stone-100",
                    "Change password"
                }
                button {
                    class: "px-4 py-2 text-stone-500 hover:text-stone-900 underline",
                    onclick: move |_| {
                        auth.logout();
                        nav.push(Route::Home {});
                    },
                    "Log out"
                }
            }
        }
    }
}

#[component]
fn ProfileRow(label: String, value: String) -> Element {
    rsx! {
        div { class: "flex justify-between px-6 py-4",
            span { class: "text-stone-500 text-sm", "{label}" }
            span { class: "font-medium text-sm", "{value}" }
        }
    }
}
