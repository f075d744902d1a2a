//! Shop page: category-filtered product grid with a request flow.
//!
//! There is no cart or checkout; interested visitors send a product request
//! and the studio follows up directly.

use dioxus::prelude::*;

use way_shared::{Product, ProductRequest};

use crate::api_client::ApiClient;
use crate::components::ui::{Button, ButtonVariant, FormField, InputType};
use crate::config;

#[component]
pub fn Shop() -> Element {
    // `None` = the "All" tab.
    let mut selected_category = use_signal(|| None::<String>);
    let mut requested_product = use_signal(|| None::<Product>);

    let categories = use_resource(|| async move {
        ApiClient::new()
            .product_categories()
            .await
            .map_err(|e| e.to_string())
    });

    let products = use_resource(move || {
        let category = selected_category();
        async move {
            let client = ApiClient::new();
            match category {
                Some(id) => client.products_in_category(&id).await,
                None => client.products().await,
            }
            .map_err(|e| e.to_string())
        }
    });

    rsx! {
        div { class: "max-w-6xl mx-auto px-4 py-12",
            h1 { class: "text-3xl sm:text-4xl font-bold italic mb-6", "Shop" }

            // Category tabs
            div { class: "flex flex-wrap gap-2 mb-10",
                button {
                    class: if selected_category().is_none() {
                        "px-4 py-2 rounded-full text-sm font-medium bg-stone-900 text-white"
                    } else {
                        "px-4 py-2 rounded-full text-sm font-medium bg-stone-100 hover:bg-stone-200"
                    },
                    onclick: move |_| selected_category.set(None),
                    "All"
                }
                if let Some(Ok(categories)) = categories.read().as_ref() {
                    for category in categories.iter() {
                        button {
                            key: "{category.id}",
                            class: if selected_category().as_deref() == Some(category.id.as_str()) {
                                "px-4 py-2 rounded-full text-sm font-medium bg-stone-900 text-white"
                            } else {
                                "px-4 py-2 rounded-full text-sm font-medium bg-stone-100 hover:bg-stone-200"
                            },
                            onclick: {
                                let id = category.id.clone();
                                move |_| selected_category.set(Some(id.clone()))
                            },
                            "{category.title}"
                        }
                    }
                }
            }

            match products.read().as_ref() {
                None => rsx! {
                    div { class: "min-h-[40vh] flex items-center justify-center",
                        p { class: "text-xl font-bold", "Loading..." }
                    }
                },
                Some(Err(e)) => rsx! {
                    div { class: "p-4 bg-red-50 border border-red-200 rounded-lg text-red-700",
                        "Could not load products: {e}"
                    }
                },
                Some(Ok(products)) if products.is_empty() => rsx! {
                    div { class: "min-h-[40vh] flex items-center justify-center",
                        p { class: "text-stone-500", "Nothing in this category yet." }
                    }
                },
                Some(Ok(products)) => rsx! {
                    div { class: "grid sm:grid-cols-2 lg:grid-cols-4 gap-8",
                        for product in products.iter() {
                            ProductCard {
                                key: "{product.id}",
                                product: product.clone(),
                                on_request: move |product: Product| {
                                    requested_product.set(Some(product));
                                },
                            }
                        }
                    }
                },
            }

            if let Some(product) = requested_product() {
                ProductRequestModal {
                    product,
                    on_close: move |_| requested_product.set(None),
                }
            }
        }
    }
}

#[component]
fn ProductCard(product: Product, on_request: EventHandler<Product>) -> Element {
    let product_for_request = product.clone();

    rsx! {
        div { class: "flex flex-col bg-white border border-stone-200 rounded-xl overflow-hidden h-full",
            if let Some(image) = &product.image {
                img {
                    class: "w-full h-44 object-cover",
                    src: config::image_url(image),
                    alt: "{product.name}",
                }
            } else {
                div { class: "w-full h-44 bg-stone-100" }
            }
            div { class: "p-4 flex flex-col flex-grow",
                h3 { class: "font-semibold", "{product.name}" }
                if product.price > 0.0 {
                    p { class: "text-stone-900 font-bold mt-1", {format!("${:.2}", product.price)} }
                }
                if let Some(description) = &product.description {
                    p { class: "text-sm text-stone-600 mt-2 flex-grow", "{description}" }
                }
                button {
                    class: "mt-4 self-start text-stone-900 font-medium text-sm underline hover:text-stone-600",
                    onclick: move |_| on_request.call(product_for_request.clone()),
                    "Request this piece"
                }
            }
        }
    }
}

#[component]
fn ProductRequestModal(product: Product, on_close: EventHandler<()>) -> Element {
    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut phone = use_signal(String::new);
    let mut location = use_signal(String::new);
    let mut message = use_signal(String::new);
    let mut errors = use_signal(Vec::<(&'static str, String)>::new);
    let mut submit_error = use_signal(|| None::<String>);
    let mut is_submitting = use_signal(|| false);
    let mut submitted = use_signal(|| false);

    let error_for = move |field: &str| {
        errors
            .read()
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, msg)| msg.clone())
    };

    let product_id = product.id.clone();

    let handle_submit = move |e: FormEvent| {
        e.prevent_default();
        submit_error.set(None);

        let name_value = name.read().trim().to_string();
        let email_value = email.read().trim().to_string();
        let phone_value = phone.read().trim().to_string();

        let mut found: Vec<(&'static str, String)> = Vec::new();
        if name_value.is_empty() {
            found.push(("name", "Your name is required.".to_string()));
        }
        if !email_value.contains('@') {
            found.push(("email", "Enter a valid email address.".to_string()));
        }
        if phone_value.is_empty() {
            found.push(("phone", "A phone number is required.".to_string()));
        }
        if !found.is_empty() {
            errors.set(found);
            return;
        }
        errors.set(Vec::new());

        is_submitting.set(true);
        let req = ProductRequest {
            product: product_id.clone(),
            name: name_value,
            email: email_value,
            phone: phone_value,
            location: location.read().trim().to_string(),
            message: message.read().trim().to_string(),
        };
        spawn(async move {
            match ApiClient::new().request_product(&req).await {
                Ok(_) => submitted.set(true),
                Err(err) => {
                    let text = err
                        .server_message()
                        .map(str::to_string)
                        .unwrap_or_else(|| err.to_string());
                    submit_error.set(Some(text));
                }
            }
            is_submitting.set(false);
        });
    };

    rsx! {
        div { class: "fixed inset-0 z-[9999] flex items-center justify-center bg-black/50 backdrop-blur-sm p-4 animate-fadeIn",
            div { class: "bg-white p-6 rounded-lg shadow-2xl max-w-md w-full max-h-[90vh] overflow-y-auto",
                div { class: "flex justify-between items-start mb-4",
                    h3 { class: "text-lg font-semibold", "Request: {product.name}" }
                    button {
                        class: "text-gray-400 hover:text-gray-600",
                        onclick: move |_| on_close.call(()),
                        "✕"
                    }
                }

                if submitted() {
                    div { class: "text-center py-8",
                        p { class: "text-green-700 font-medium mb-4",
                            "Request sent! We'll contact you about availability and pickup."
                        }
                        Button {
                            variant: ButtonVariant::Primary,
                            onclick: move |_| on_close.call(()),
                            "Done"
                        }
                    }
                } else {
                    form { onsubmit: handle_submit,
                        FormField {
                            label: "Name",
                            value: name(),
                            error: error_for("name").unwrap_or_default(),
                            oninput: move |e: FormEvent| name.set(e.value()),
                        }
                        FormField {
                            label: "Email",
                            value: email(),
                            input_type: InputType::Email,
                            error: error_for("email").unwrap_or_default(),
                            oninput: move |e: FormEvent| email.set(e.value()),
                        }
                        FormField {
                            label: "Phone",
                            value: phone(),
                            input_type: InputType::Tel,
                            error: error_for("phone").unwrap_or_default(),
                            oninput: move |e: FormEvent| phone.set(e.value()),
                        }
                        FormField {
                            label: "Location (optional)",
                            value: location(),
                            oninput: move |e: FormEvent| location.set(e.value()),
                        }
                        FormField {
                            label: "Message (optional)",
                            value: message(),
                            oninput: move |e: FormEvent| message.set(e.value()),
                        }

                        if let Some(err) = submit_error() {
                            div { class: "mb-4 p-3 bg-red-50 border border-red-200 rounded-lg text-red-700 text-sm",
                                "{err}"
                            }
                        }

                        div { class: "flex justify-end gap-3",
                            Button {
                                variant: ButtonVariant::Secondary,
                                onclick: move |_| on_close.call(()),
                                "Cancel"
                            }
                            Button {
                                r#type: "submit",
                                variant: ButtonVariant::Primary,
                                disabled: is_submitting(),
                                if is_submitting() { "Sending..." } else { "Send request" }
                            }
                        }
                    }
                }
            }
        }
    }
}
