use dioxus::prelude::*;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ButtonVariant {
    Primary,
    Secondary,
    Link,
}

impl Default for ButtonVariant {
    fn default() -> Self {
        Self::Primary
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct ButtonProps {
    #[props(optional)]
    pub class: Option<String>,
    #[props(optional)]
    pub variant: Option<ButtonVariant>,
    #[props(optional)]
    pub r#type: Option<String>,
    #[props(optional)]
    pub disabled: Option<bool>,
    #[props(optional)]
    pub onclick: Option<EventHandler<MouseEvent>>,
    pub children: Element,
}

#[component]
pub fn Button(props: ButtonProps) -> Element {
    let variant = props.variant.unwrap_or_default();
    let disabled = props.disabled.unwrap_or(false);

    let base = "inline-flex items-center justify-center text-sm font-medium transition-colors duration-200 focus:outline-none disabled:opacity-50 disabled:cursor-not-allowed";

    let variant_class = match variant {
        ButtonVariant::Primary => {
            "rounded-lg px-5 py-2.5 bg-stone-900 text-white hover:bg-stone-700"
        }
        ButtonVariant::Secondary => {
            "rounded-lg px-5 py-2.5 bg-stone-100 text-stone-900 border border-stone-300 hover:bg-stone-200"
        }
        ButtonVariant::Link => "text-stone-900 underline hover:text-stone-600",
    };

    let class = match props.class {
        Some(extra) if !extra.is_empty() => format!("{} {} {}", base, variant_class, extra),
        _ => format!("{} {}", base, variant_class),
    };

    rsx! {
        button {
            class,
            r#type: props.r#type.unwrap_or_else(|| "button".to_string()),
            disabled,
            onclick: move |evt| {
                if disabled {
                    return;
                }
                if let Some(handler) = &props.onclick {
                    handler.call(evt);
                }
            },
            {props.children}
        }
    }
}
