//! Edit-profile page.

use dioxus::prelude::*;

use way_shared::UpdateProfileRequest;

use crate::auth_session::AuthContext;
use crate::components::ui::{Button, ButtonVariant, FormField, InputType};
use crate::routes::Route;

#[component]
pub fn EditProfile() -> Element {
    let mut auth = use_context::<AuthContext>();
    let nav = use_navigator();

    let user = auth.user();
    let mut full_name =
        use_signal(|| user.as_ref().map(|u| u.full_name.clone()).unwrap_or_default());
    let mut phone_number = use_signal(|| {
        user.as_ref()
            .and_then(|u| u.phone_number.clone())
            .unwrap_or_default()
    });
    let mut email = use_signal(|| user.as_ref().map(|u| u.email.clone()).unwrap_or_default());
    let mut form_error = use_signal(|| None::<String>);
    let mut is_loading = use_signal(|| false);

    if user.is_none() {
        return rsx! {
            div { class: "max-w-md mx-auto px-4 py-16 text-center",
                p { class: "text-stone-600 mb-4", "Log in to edit your profile." }
                Link { to: Route::Login {}, class: "underline text-stone-900", "Go to login" }
            }
        };
    }

    let handle_submit = move |e: FormEvent| {
        e.prevent_default();
        form_error.set(None);

        let req = UpdateProfileRequest {
            full_name: full_name.read().trim().to_string(),
            phone_number: phone_number.read().trim().to_string(),
            email: email.read().trim().to_string(),
        };
        if req.full_name.is_empty() || !req.email.contains('@') {
            form_error.set(Some("Name and a valid email are required.".to_string()));
            return;
        }

        is_loading.set(true);
        spawn(async move {
            let token = auth.token().unwrap_or_default();
            match auth.client().update_profile(&token, &req).await {
                Ok(resp) if resp.success => {
                    auth.update_profile(&req);
                    nav.push(Route::Profile {});
                }
                Ok(resp) => {
                    form_error.set(Some(
                        resp.message.unwrap_or_else(|| "Update failed.".to_string()),
                    ));
                    is_loading.set(false);
                }
                Err(err) => {
                    let text = err
                        .server_message()
                        .map(str::to_string)
                        .unwrap_or_else(|| err.to_string());
                    form_error.set(Some(text));
                    is_loading.set(false);
                }
            }
        });
    };

    rsx! {
        div { class: "max-w-md mx-auto px-4 py-16",
            h1 { class: "text-3xl font-bold italic mb-8", "Edit profile" }

            form { onsubmit: handle_submit,
                FormField {
                    label: "Full name",
                    value: full_name(),
                    oninput: move |e: FormEvent| full_name.set(e.value()),
                }
                FormField {
                    label: "Phone number",
                    value: phone_number(),
                    input_type: InputType::Tel,
                    oninput: move |e: FormEvent| phone_number.set(e.value()),
                }
                FormField {
                    label: "Email",
                    value: email(),
                    input_type: InputType::Email,
                    oninput: move |e: FormEvent| email.set(e.value()),
                }

                if let Some(err) = form_error() {
                    div { class: "mb-4 p-3 bg-red-50 border border-red-200 rounded-lg text-red-700 text-sm",
                        "{err}"
                    }
                }

                div { class: "flex gap-3",
                    Button {
                        r#type: "submit",
                        variant: ButtonVariant::Primary,
                        disabled: is_loading(),
                        if is_loading() { "Saving..." } else { "Save changes" }
                    }
                    Button {
                        variant: ButtonVariant::Secondary,
                        onclick: move |_| {
                            nav.push(Route::Profile {});
                        },
                        "Cancel"
                    }
                }
            }
        }
    }
}
