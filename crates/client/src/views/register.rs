//! Account registration page.

use dioxus::prelude::*;

use way_shared::RegisterRequest;

use crate::api_client::ApiClient;
use crate::auth_session::AuthContext;
use crate::components::ui::{Button, ButtonVariant, FormField, InputType};
use crate::routes::Route;

#[component]
pub fn Register() -> Element {
    let mut auth = use_context::<AuthContext>();
    let nav = use_navigator();

    let mut full_name = use_signal(String::new);
    let mut phone_number = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm_password = use_signal(String::new);
    let mut field_errors = use_signal(Vec::<(&'static str, String)>::new);
    let mut form_error = use_signal(|| None::<String>);
    let mut is_loading = use_signal(|| false);

    let error_for = move |field: &str| {
        field_errors
            .read()
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, msg)| msg.clone())
    };

    let handle_submit = move |e: FormEvent| {
        e.prevent_default();
        form_error.set(None);

        let name_value = full_name.read().trim().to_string();
        let phone_value = phone_number.read().trim().to_string();
        let email_value = email.read().trim().to_string();
        let password_value = password.read().clone();
        let confirm_value = confirm_password.read().clone();

        let mut errors: Vec<(&'static str, String)> = Vec::new();
        if name_value.is_empty() {
            errors.push(("full_name", "Your name is required.".to_string()));
        }
        if phone_value.len() < 6 {
            errors.push(("phone_number", "Enter a valid phone number.".to_string()));
        }
        if !email_value.contains('@') {
            errors.push(("email", "Enter a valid email address.".to_string()));
        }
        if password_value.len() < 8 {
            errors.push((
                "password",
                "Password must be at least 8 characters.".to_string(),
            ));
        }
        if confirm_value != password_value {
            errors.push(("confirm_password", "Passwords do not match.".to_string()));
        }
        if !errors.is_empty() {
            field_errors.set(errors);
            return;
        }
        field_errors.set(Vec::new());

        is_loading.set(true);
        spawn(async move {
            let req = RegisterRequest {
                full_name: name_value,
                phone_number: phone_value,
                email: email_value,
                password: password_value,
                confirm_password: confirm_value,
            };
            match ApiClient::new().register_account(&req).await {
                Ok(payload) => {
                    // The account starts unverified; log in and send the user
                    // to the verification step.
                    auth.login(payload.user, payload.token);
                    nav.push(Route::Verify {});
                }
                Err(err) => {
                    let message = err
                        .server_message()
                        .map(str::to_string)
                        .unwrap_or_else(|| err.to_string());
                    form_error.set(Some(message));
                    is_loading.set(false);
                }
            }
        });
    };

    rsx! {
        div { class: "max-w-md mx-auto px-4 py-16",
            h1 { class: "text-3xl font-bold italic mb-2", "Join the studio" }
            p { class: "text-stone-500 mb-8",
                "Create an account to register for classes and events."
            }

            form { onsubmit: handle_submit,
                FormField {
                    label: "Full name",
                    value: full_name(),
                    error: error_for("full_name").unwrap_or_default(),
                    oninput: move |e: FormEvent| full_name.set(e.value()),
                }
                FormField {
                    label: "Phone number",
                    value: phone_number(),
                    input_type: InputType::Tel,
                    error: error_for("phone_number").unwrap_or_default(),
                    oninput: move |e: FormEvent| phone_number.set(e.value()),
                }
                FormField {
                    label: "Email",
                    value: email(),
                    input_type: InputType::Email,
                    error: error_for("email").unwrap_or_default(),
                    oninput: move |e: FormEvent| email.set(e.value()),
                }
                FormField {
                    label: "Password",
                    value: password(),
                    input_type: InputType::Password,
                    error: error_for("password").unwrap_or_default(),
                    oninput: move |e: FormEvent| password.set(e.value()),
                }
                FormField {
                    label: "Confirm password",
                    value: confirm_password(),
                    input_type: InputType::Password,
                    error: error_for("confirm_password").unwrap_or_default(),
                    oninput: move |e: FormEvent| confirm_password.set(e.value()),
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
                    if is_loading() { "Creating account..." } else { "Create account" }
                }
            }

            p { class: "mt-6 text-sm text-stone-500",
                "Already have an account? "
                Link { to: Route::Login {}, class: "text-stone-900 underline", "Log in" }
            }
        }
    }
}
