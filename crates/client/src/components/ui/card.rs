use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct CardProps {
    #[props(optional, into)]
    pub class: Option<String>,
    #[props(optional, into)]
    pub title: Option<String>,
    pub children: Element,
}

/// Bordered panel with an optional heading.
#[component]
pub fn Card(props: CardProps) -> Element {
    let base = "rounded-lg border border-stone-200 bg-white p-6 shadow-sm";
    let class = match props.class {
        Some(extra) if !extra.is_empty() => format!("{} {}", base, extra),
        _ => base.to_string(),
    };

    rsx! {
        section { class,
            if let Some(title) = &props.title {
                h2 { class: "mb-4 text-lg font-semibold text-stone-900", "{title}" }
            }
            {props.children}
        }
    }
}
