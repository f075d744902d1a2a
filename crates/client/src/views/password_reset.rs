//! Three-step password reset: request a code, verify it, set a new
//! password. The email and the reset token travel between the steps in the
//! query string.

use dioxus::prelude::*;

use way_shared::{PasswordResetRequest, ResetPasswordRequest, VerifyResetCodeRequest};

use crate::api_client::ApiClient;
use crate::components::ui::{Button, ButtonVariant, FormField, InputType};
use crate::routes::Route;

#[component]
fn StatusBanner(ok: bool, text: String) -> Element {
    rsx! {
        div {
            class: if ok {
                "mb-4 p-3 bg-green-50 border border-green-200 rounded-lg text-green-700 text-sm"
            } else {
                "mb-4 p-3 bg-red-50 border border-red-200 rounded-lg text-red-700 text-sm"
            },
            "{text}"
        }
    }
}

/// Step 1: request a reset code by email.
#[component]
pub fn SendVerificationCode() -> Element {
    let nav = use_navigator();
    let mut email = use_signal(String::new);
    let mut message = use_signal(|| None::<(bool, String)>);
    let mut is_loading = use_signal(|| false);

    let handle_submit = move |e: FormEvent| {
        e.prevent_default();
        let email_value = email.read().trim().to_lowercase();
        if !email_value.contains('@') {
            message.set(Some((false, "Enter a valid email address.".to_string())));
            return;
        }

        is_loading.set(true);
        spawn(async move {
            let req = PasswordResetRequest {
                email: email_value.clone(),
            };
            match ApiClient::new().request_password_reset(&req).await {
                Ok(resp) if resp.success => {
                    message.set(Some((
                        true,
                        resp.message.unwrap_or_else(|| {
                            "Verification code sent to your email.".to_string()
                        }),
                    )));
                    nav.push(Route::VerifyResetCode { email: email_value });
                }
                Ok(resp) => {
                    message.set(Some((
                        false,
                        resp.message
                            .unwrap_or_else(|| "Could not send the code.".to_string()),
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
            h1 { class: "text-3xl font-bold italic mb-2", "Reset your password" }
            p { class: "text-stone-500 mb-8", "We'll email you a verification code." }

            form { onsubmit: handle_submit,
                FormField {
                    label: "Email",
                    value: email(),
                    input_type: InputType::Email,
                    placeholder: "you@example.com",
                    oninput: move |e: FormEvent| email.set(e.value()),
                }
                if let Some((ok, text)) = message() {
                    StatusBanner { ok, text }
                }
                Button {
                    r#type: "submit",
                    variant: ButtonVariant::Primary,
                    class: "w-full",
                    disabled: is_loading(),
                    if is_loading() { "Sending..." } else { "Send code" }
                }
            }
        }
    }
}

/// Step 2: verify the emailed code; the server answers with a reset token.
#[component]
pub fn VerifyResetCode(email: String) -> Element {
    let nav = use_navigator();
    let mut code = use_signal(String::new);
    let mut message = use_signal(|| None::<(bool, String)>);
    let mut is_loading = use_signal(|| false);

    let email_for_submit = email.clone();
    let handle_submit = move |e: FormEvent| {
        e.prevent_default();
        let code_value = code.read().trim().to_string();
        if code_value.is_empty() {
            message.set(Some((false, "Enter the code from your email.".to_string())));
            return;
        }

        is_loading.set(true);
        let email = email_for_submit.trim().to_lowercase();
        spawn(async move {
            let req = VerifyResetCodeRequest {
                email,
                code: code_value,
            };
            match ApiClient::new().verify_reset_code(&req).await {
                Ok(payload) => {
                    nav.push(Route::ResetPassword {
                        token: payload.reset_token,
                    });
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
            h1 { class: "text-3xl font-bold italic mb-2", "Check your inbox" }
            p { class: "text-stone-500 mb-8", "Enter the code we sent to {email}." }

            form { onsubmit: handle_submit,
                FormField {
                    label: "Verification code",
                    value: code(),
                    placeholder: "123456",
                    oninput: move |e: FormEvent| code.set(e.value()),
                }
                if let Some((ok, text)) = message() {
                    StatusBanner { ok, text }
                }
                Button {
                    r#type: "submit",
                    variant: ButtonVariant::Primary,
                    class: "w-full",
                    disabled: is_loading(),
                    if is_loading() { "Verifying..." } else { "Verify code" }
                }
            }
        }
    }
}

/// Step 3: set the new password with the reset token from step 2.
#[component]
pub fn ResetPassword(token: String) -> Element {
    let nav = use_navigator();
    let mut password = use_signal(String::new);
    let mut confirm_password = use_signal(String::new);
    let mut message = use_signal(|| None::<(bool, String)>);
    let mut is_loading = use_signal(|| false);

    let token_for_submit = token.clone();
    let handle_submit = move |e: FormEvent| {
        e.prevent_default();
        let password_value = password.read().clone();
        let confirm_value = confirm_password.read().clone();

        if password_value.len() < 8 {
            message.set(Some((
                false,
                "Password must be at least 8 characters.".to_string(),
            )));
            return;
        }
        if password_value != confirm_value {
            message.set(Some((false, "Passwords do not match.".to_string())));
            return;
        }

        is_loading.set(true);
        let reset_token = token_for_submit.clone();
        spawn(async move {
            let req = ResetPasswordRequest {
                reset_token,
                password: password_value,
                confirm_password: confirm_value,
            };
            match ApiClient::new().reset_password(&req).await {
                Ok(resp) if resp.success => {
                    message.set(Some((
                        true,
                        resp.message
                            .unwrap_or_else(|| "Password reset successfully.".to_string()),
                    )));
                    nav.push(Route::Login {});
                }
                Ok(resp) => {
                    message.set(Some((
                        false,
                        resp.message
                            .unwrap_or_else(|| "Could not reset the password.".to_string()),
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
            h1 { class: "text-3xl font-bold italic mb-8", "Choose a new password" }

            form { onsubmit: handle_submit,
                FormField {
                    label: "New password",
                    value: password(),
                    input_type: InputType::Password,
                    oninput: move |e: FormEvent| password.set(e.value()),
                }
                FormField {
                    label: "Confirm new password",
                    value: confirm_password(),
                    input_type: InputType::Password,
                    oninput: move |e: FormEvent| confirm_password.set(e.value()),
                }
                if let Some((ok, text)) = message() {
                    StatusBanner { ok, text }
                }
                Button {
                    r#type: "submit",
                    variant: ButtonVariant::Primary,
                    class: "w-full",
                    disabled: is_loading(),
                    if is_loading() { "Saving..." } else { "Reset password" }
                }
            }
        }
    }
}
