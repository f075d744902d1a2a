//! Email verification page: enter the 6-digit code, or resend it.

use dioxus::prelude::*;

use way_shared::{SendVerificationRequest, VerifyEmailRequest};

use crate::api_client::ApiClient;
use crate::auth_session::AuthContext;
use crate::components::ui::{Button, ButtonVariant, FormField};
use crate::routes::Route;

#[component]
pub fn Verify() -> Element {
    let mut auth = use_context::<AuthContext>();
    let nav = use_navigator();

    let mut code = use_signal(String::new);
    let mut message = use_signal(|| None::<(bool, String)>);
    let mut is_loading = use_signal(|| false);

    let Some(user) = auth.user() else {
        return rsx! {
            div { class: "max-w-md mx-auto px-4 py-16 text-center",
                p { class: "text-stone-600 mb-4", "Log in first to verify your email." }
                Link { to: Route::Login {}, class: "underline text-stone-900", "Go to login" }
            }
        };
    };

    if user.verified {
        return rsx! {
            div { class: "max-w-md mx-auto px-4 py-16 text-center",
                h1 { class: "text-2xl font-bold italic mb-2", "You're verified" }
                p { class: "text-stone-600 mb-4", "Your email is already confirmed." }
                Link { to: Route::SchedulePage {}, class: "underline text-stone-900",
                    "Browse classes"
                }
            }
        };
    }

    let email = user.email.clone();
    let email_for_submit = email.clone();
    let email_for_resend = email.clone();

    let handle_submit = move |e: FormEvent| {
        e.prevent_default();
        let code_value = code.read().trim().to_string();
        if code_value.len() != 6 || !code_value.chars().all(|c| c.is_ascii_digit()) {
            message.set(Some((false, "Enter the 6-digit code from your email.".to_string())));
            return;
        }

        is_loading.set(true);
        let email = email_for_submit.clone();
        spawn(async move {
            let req = VerifyEmailRequest { email, code: code_value };
            match ApiClient::new().verify_email(&req).await {
                Ok(resp) if resp.success => {
                    auth.mark_verified();
                    message.set(Some((
                        true,
                        resp.message.unwrap_or_else(|| "Verification successful!".to_string()),
                    )));
                    nav.push(Route::Profile {});
                }
                Ok(resp) => {
                    message.set(Some((
                        false,
                        resp.message.unwrap_or_else(|| "Verification failed.".to_string()),
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

    let handle_resend = move |_| {
        let email = email_for_resend.clone();
        spawn(async move {
            let req = SendVerificationRequest { email };
            match ApiClient::new().send_verification_code(&req).await {
                Ok(resp) => {
                    code.set(String::new());
                    message.set(Some((
                        resp.success,
                        resp.message
                            .unwrap_or_else(|| "Verification code resent!".to_string()),
                    )));
                }
                Err(err) => {
                    let text = err
                        .server_message()
                        .map(str::to_string)
                        .unwrap_or_else(|| err.to_string());
                    message.set(Some((false, text)));
                }
            }
        });
    };

    rsx! {
        div { class: "max-w-md mx-auto px-4 py-16",
            h1 { class: "text-3xl font-bold italic mb-2", "Verify your email" }
            p { class: "text-stone-500 mb-8", "We sent a 6-digit code to {email}." }

            form { onsubmit: handle_submit,
                FormField {
                    label: "Verification code",
                    value: code(),
                    placeholder: "123456",
                    oninput: move |e: FormEvent| code.set(e.value()),
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

                Button {
                    r#type: "submit",
                    variant: ButtonVariant::Primary,
                    class: "w-full",
                    disabled: is_loading(),
                    if is_loading() { "Verifying..." } else { "Verify" }
                }
            }

            button {
                class: "mt-6 text-sm text-stone-500 underline hover:text-stone-900",
                onclick: handle_resend,
                "Resend the code"
            }
        }
    }
}
