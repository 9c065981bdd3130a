//! Text and search inputs.

use std::sync::atomic::{AtomicU32, Ordering};

use dioxus::prelude::*;

/// Properties for the Input component
#[derive(Clone, PartialEq, Props)]
pub struct InputProps {
    pub value: String,
    pub oninput: EventHandler<String>,
    #[props(default)]
    pub placeholder: Option<String>,
    #[props(default)]
    pub label: Option<String>,
    /// text, number, ...
    #[props(default = "text".to_string())]
    pub input_type: String,
    #[props(default = false)]
    pub required: bool,
    #[props(default = false)]
    pub disabled: bool,
    /// Element id; generated when absent
    #[props(default)]
    pub id: Option<String>,
    #[props(default)]
    pub class: Option<String>,
}

/// Labelled single-line text input
///
/// # Example
///
/// ```rust,ignore
/// let mut nim = use_signal(String::new);
///
/// rsx! {
///     Input {
///         value: nim(),
///         oninput: move |s| nim.set(s),
///         label: "NIM".to_string(),
///         placeholder: "Masukkan NIM".to_string()
///     }
/// }
/// ```
#[component]
pub fn Input(props: InputProps) -> Element {
    let id = props.id.clone().unwrap_or_else(|| next_id("input"));
    let input_class = match props.class.as_deref() {
        Some(extra) if !extra.is_empty() => format!("input-field {}", extra),
        _ => "input-field".to_string(),
    };

    rsx! {
        div { class: "form-field",
            if let Some(label) = &props.label {
                label {
                    class: "input-label",
                    r#for: "{id}",
                    "{label}"
                }
            }
            input {
                id: "{id}",
                class: "{input_class}",
                r#type: "{props.input_type}",
                value: "{props.value}",
                placeholder: props.placeholder.as_deref().unwrap_or(""),
                required: props.required,
                disabled: props.disabled,
                oninput: move |e| props.oninput.call(e.value()),
            }
        }
    }
}

static NEXT_ID: AtomicU32 = AtomicU32::new(1);

/// Unique element id for label association.
pub(crate) fn next_id(prefix: &str) -> String {
    format!("{}-{}", prefix, NEXT_ID.fetch_add(1, Ordering::Relaxed))
}

/// Search box above the record table
#[derive(Clone, PartialEq, Props)]
pub struct SearchInputProps {
    pub value: String,
    pub oninput: EventHandler<String>,
    #[props(default = "Cari nama atau NIM...".to_string())]
    pub placeholder: String,
}

#[component]
pub fn SearchInput(props: SearchInputProps) -> Element {
    rsx! {
        div { class: "search-input-wrapper",
            span { class: "search-icon", "\u{1F50D}" }
            input {
                class: "input-field search-input",
                r#type: "search",
                placeholder: "{props.placeholder}",
                value: "{props.value}",
                oninput: move |e| props.oninput.call(e.value()),
            }
        }
    }
}
