use dioxus::prelude::*;

#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Danger,
    Ghost,
}

#[derive(Props, Clone, PartialEq)]
pub struct ButtonProps {
    #[props(optional, into)]
    pub class: Option<String>,
    #[props(optional)]
    pub variant: Option<ButtonVariant>,
    #[props(optional, into)]
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

    let base = "inline-flex items-center justify-center rounded-md px-3 py-1.5 text-sm font-medium transition-colors focus:outline-none focus:ring-2 focus:ring-offset-1 disabled:opacity-50 disabled:pointer-events-none";

    let variant_class = match variant {
        ButtonVariant::Primary => "bg-emerald-600 text-white hover:bg-emerald-500 focus:ring-emerald-500",
        ButtonVariant::Secondary => "bg-stone-200 text-stone-800 hover:bg-stone-300 focus:ring-stone-400",
        ButtonVariant::Danger => "bg-rose-600 text-white hover:bg-rose-500 focus:ring-rose-500",
        ButtonVariant::Ghost => "bg-transparent text-stone-600 hover:bg-stone-100 focus:ring-stone-300",
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
