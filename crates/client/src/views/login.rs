//! Login page.

use dioxus::prelude::*;

use way_shared::LoginRequest;

use crate::api_client::ApiClient;
use crate::auth_session::AuthContext;
use crate::components::ui::{Button, ButtonVariant, FormField, InputType};
use crate::routes::Route;

#[component]
pub fn Login() -> Element {
    let mut auth = use_context::<AuthContext>();
    let nav = use_navigator();

    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut email_error = use_signal(|| None::<String>);
    let mut password_error = use_signal(|| None::<String>);
    let mut form_error = use_signal(|| None::<String>);
    let mut is_loading = use_signal(|| false);

    // Already logged in: straight to the profile.
    use_effect(move || {
        if auth.is_logged_in() {
            nav.push(Route::Profile {});
        }
    });

    let handle_submit = move |e: FormEvent| {
        e.prevent_default();
        form_error.set(None);
        email_error.set(None);
        password_error.set(None);

        let email_value = email.read().trim().to_string();
        let password_value = password.read().clone();

        let mut valid = true;
        if !email_value.contains('@') {
            email_error.set(Some("Enter a valid email address.".to_string()));
            valid = false;
        }
        if password_value.len() < 8 {
            password_error.set(Some(
                "Password must be at least 8 characters.".to_string(),
            ));
            valid = false;
        }
        if !valid {
            return;
        }

        is_loading.set(true);
        spawn(async move {
            let req = LoginRequest {
                email: email_value,
                password: password_value,
            };
            match ApiClient::new().login(&req).await {
                Ok(payload) => {
                    auth.login(payload.user, payload.token);
                    nav.push(Route::Profile {});
                }
                Err(err) => {
                    let message = err
                        .server_message()
                        .map(str::to_string)
                        .unwrap_or_else(|| err.to_string());
                    let lowered = message.to_lowercase();
                    // Map credential-shaped messages onto both fields.
                    if lowered.contains("credential")
                        || lowered.contains("invalid")
                        || lowered.contains("incorrect")
                    {
                        email_error.set(Some("Invalid credentials".to_string()));
                        password_error.set(Some("Invalid credentials".to_string()));
                    } else if lowered.contains("email") {
                        email_error.set(Some(message.clone()));
                    } else if lowered.contains("password") {
                        password_error.set(Some(message.clone()));
                    }
                    form_error.set(Some(message));
                    is_loading.set(false);
                }
            }
        });
    };

    rsx! {
        div { class: "max-w-md mx-auto px-4 py-16",
            h1 { class: "text-3xl font-bold italic mb-2", "Welcome back" }
            p { class: "text-stone-500 mb-8", "Log in to manage your class registrations." }

            form { onsubmit: handle_submit,
                FormField {
                    label: "Email",
                    value: email(),
                    input_type: InputType::Email,
                    placeholder: "you@example.com",
                    error: email_error().unwrap_or_default(),
                    oninput: move |e: FormEvent| email.set(e.value()),
                }
                FormField {
                    label: "Password",
                    value: password(),
                    input_type: InputType::Password,
                    error: password_error().unwrap_or_default(),
                    oninput: move |e: FormEvent| password.set(e.value()),
                }

                if let Some(err) = form_error() {
                    div { class: "mb-4 p-3 bg-red-50 border border-red-200 rounded-lg text-red-700 text-sm",
                        "{err}"
                    }
                }

                Button {
                    r#type: "submit",
                    variant: ButtonVariant::Primary,
                    class: "w-full",
                    disabled: is_loading(),
                    if is_loading() { "Logging in..." } else { "Log in" }
                }
            }

            div { class: "mt-6 flex justify-between text-sm",
                Link {
                    to: Route::SendVerificationCode {},
                    class: "text-stone-500 underline hover:text-stone-900",
                    "Forgot password?"
                }
                Link {
                    to: Route::Register {},
                    class: "text-stone-900 underline hover:text-stone-600",
                    "Create an account"
                }
            }
        }
    }
}
