//! Change-password page.

use dioxus::prelude::*;

use way_shared::ChangePasswordRequest;

use crate::auth_session::AuthContext;
use crate::components::ui::{Button, ButtonVariant, FormField, InputType};
use crate::routes::Route;

#[component]
pub fn ChangePassword() -> Element {
    let auth = use_context::<AuthContext>();
    let nav = use_navigator();

    let mut old_password = use_signal(String::new);
    let mut new_password = use_signal(String::new);
    let mut confirm_password = use_signal(String::new);
    let mut message = use_signal(|| None::<(bool, String)>);
    let mut is_loading = use_signal(|| false);

    if !auth.is_logged_in() {
        return rsx! {
            div { class: "max-w-md mx-auto px-4 py-16 text-center",
                p { class: "text-stone-600 mb-4", "Log in to change your password." }
                Link { to: Route::Login {}, class: "underline text-stone-900", "Go to login" }
            }
        };
    }

    let handle_submit = move |e: FormEvent| {
        e.prevent_default();

        let old_value = old_password.read().clone();
        let new_value = new_password.read().clone();
        let confirm_value = confirm_password.read().clone();

        if new_value.len() < 8 {
            message.set(Some((
                false,
                "The new password must be at least 8 characters.".to_string(),
            )));
            return;
        }
        if new_value != confirm_value {
            message.set(Some((false, "Passwords do not match.".to_string())));
            return;
        }

        is_loading.set(true);
        spawn(async move {
            let req = ChangePasswordRequest {
                old_password: old_value,
                new_password: new_value,
                confirm_password: confirm_value,
            };
            let token = auth.token().unwrap_or_default();
            match auth.client().change_password(&token, &req).await {
                Ok(resp) if resp.success => {
                    message.set(Some((
                        true,
                        resp.message
                            .unwrap_or_else(|| "Password updated.".to_string()),
                    )));
                    old_password.set(String::new());
                    new_password.set(String::new());
                    confirm_password.set(String::new());
                    is_loading.set(false);
                }
                Ok(resp) => {
                    message.set(Some((
                        false,
                        resp.message
                            .unwrap_or_else(|| "Could not change the password.".to_string()),
                    )));
                    is_loading.set(false);
                }
                Err(err) => {
                    let text = err
                        .server_message()
                        .map(str::to_string)
                        .unwrap_or_else(|| err.to_string());
                    message.set(Some((false, text)));
                    is_loading.set(false);
                }
            }
        });
    };

    rsx! {
        div { class: "max-w-md mx-auto px-4 py-16",
            h1 { class: "text-3xl font-bold italic mb-8", "Change password" }

            form { onsubmit: handle_submit,
                FormField {
                    label: "Current password",
                    value: old_password(),
                    input_type: InputType::Password,
                    oninput: move |e: FormEvent| old_password.set(e.value()),
                }
                FormField {
                    label: "New password",
                    value: new_password(),
                    input_type: InputType::Password,
                    oninput: move |e: FormEvent| new_password.set(e.value()),
                }
                FormField {
                    label: "Confirm new password",
                    value: confirm_password(),
                    input_type: InputType::Password,
                    oninput: move |e: FormEvent| confirm_password.set(e.value()),
                }

                if let Some((ok, text)) = message() {
                    div {
                        class: if ok {
                            "mb-4 p-3 bg-green-50 border border-green-200 rounded-lg text-green-700 text-sm"
                        } else {
                            "mb-4 p-3 bg-red-50 border border-red-200 rounded-lg text-red-700 text-sm"
                        },
                        "{text}"
                    }
                }

                div { class: "flex gap-3",
                    Button {
                        r#type: "submit",
                        variant: ButtonVariant::Primary,
                        disabled: is_loading(),
                        if is_loading() { "Updating..." } else { "Update password" }
                    }
                    Button {
                        variant: ButtonVariant::Secondary,
                        onclick: move |_| {
                            nav.push(Route::Profile {});
                        },
                        "Back to profile"
                    }
                }
            }
        }
    }
}
