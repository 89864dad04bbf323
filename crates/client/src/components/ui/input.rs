use dioxus::prelude::*;

#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub enum InputType {
    #[default]
    Text,
    Email,
    Password,
    Search,
}

impl InputType {
    fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Password => "password",
            Self::Search => "search",
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct TextInputProps {
    #[props(optional, into)]
    pub class: Option<String>,
    #[props(optional, into)]
    pub label: Option<String>,
    pub value: String,
    pub oninput: EventHandler<FormEvent>,
    #[props(optional, into)]
    pub placeholder: Option<String>,
    #[props(optional)]
    pub input_type: Option<InputType>,
}

#[component]
pub fn TextInput(props: TextInputProps) -> Element {
    let base = "w-full rounded-md border border-stone-300 bg-white px-3 py-2 text-sm text-stone-900 placeholder-stone-400 focus:border-emerald-500 focus:outline-none focus:ring-1 focus:ring-emerald-500";
    let class = match props.class {
        Some(extra) if !extra.is_empty() => format!("{} {}", base, extra),
        _ => base.to_string(),
    };

    rsx! {
        label { class: "block",
            if let Some(label) = &props.label {
                span { class: "mb-1 block text-sm font-medium text-stone-700", "{label}" }
            }
            input {
                class,
                r#type: props.input_type.unwrap_or_default().as_str(),
                value: "{props.value}",
                placeholder: props.placeholder.unwrap_or_default(),
                oninput: move |e| props.oninput.call(e),
            }
        }
    }
}
