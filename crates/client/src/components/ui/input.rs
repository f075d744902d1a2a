use dioxus::prelude::*;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    Text,
    Email,
    Password,
    Tel,
}

impl InputType {
    fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Password => "password",
            Self::Tel => "tel",
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct FormFieldProps {
    pub label: String,
    pub value: String,
    pub oninput: EventHandler<FormEvent>,
    #[props(optional)]
    pub input_type: Option<InputType>,
    #[props(optional)]
    pub placeholder: Option<String>,
    /// Field-level validation or server error, shown under the input.
    #[props(default)]
    pub error: String,
}

/// Labelled input with an inline error slot, used by every auth form.
#[component]
pub fn FormField(props: FormFieldProps) -> Element {
    let has_error = !props.error.is_empty();
    let border = if has_error {
        "border-red-400 focus:border-red-500"
    } else {
        "border-stone-300 focus:border-stone-900"
    };

    rsx! {
        div { class: "mb-4",
            label { class: "block text-sm font-medium text-stone-700 mb-1.5",
                "{props.label}"
            }
            input {
                class: "w-full rounded-lg bg-white px-4 py-2.5 text-sm text-stone-900 border {border} placeholder-stone-400 transition-colors focus:outline-none",
                r#type: props.input_type.unwrap_or(InputType::Text).as_str(),
                value: "{props.value}",
                placeholder: props.placeholder.unwrap_or_default(),
                oninput: move |e| props.oninput.call(e),
            }
            if has_error {
                p { class: "mt-1 text-xs text-red-600", "{props.error}" }
            }
        }
    }
}
