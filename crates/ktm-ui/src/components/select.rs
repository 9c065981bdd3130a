//! Drop-down selection, used for faculty and major.

use dioxus::prelude::*;

use super::input::next_id;

/// Properties for the Select component
#[derive(Clone, PartialEq, Props)]
pub struct SelectProps {
    pub label: String,
    /// Currently selected option, or empty for none
    pub value: String,
    pub options: Vec<String>,
    /// Text of the empty first entry
    pub placeholder: String,
    pub onchange: EventHandler<String>,
    /// Disabled selects still show their placeholder
    #[props(default = false)]
    pub disabled: bool,
}

/// Labelled `<select>` with an empty leading option
///
/// # Example
///
/// ```rust,ignore
/// rsx! {
///     Select {
///         label: "Jurusan".to_string(),
///         value: draft.major.clone(),
///         options: majors,
///         placeholder: "Pilih Jurusan".to_string(),
///         disabled: draft.faculty.is_empty(),
///         onchange: move |m| form.write().set_major(m)
///     }
/// }
/// ```
#[component]
pub fn Select(props: SelectProps) -> Element {
    let id = use_hook(|| next_id("select"));

    rsx! {
        div { class: "form-field",
            label { class: "input-label", r#for: "{id}", "{props.label}" }
            select {
                id: "{id}",
                class: "input-field select-field",
                disabled: props.disabled,
                onchange: move |e| props.onchange.call(e.value()),
                option {
                    value: "",
                    selected: props.value.is_empty(),
                    "{props.placeholder}"
                }
                for opt in props.options.iter() {
                    option {
                        key: "{opt}",
                        value: "{opt}",
                        selected: *opt == props.value,
                        "{opt}"
                    }
                }
            }
        }
    }
}

/// Owned option list from a static catalog slice.
pub fn options_from(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_keep_order() {
        let majors = ktm_core::catalog::majors_for("PSIKOLOGI");
        let options = options_from(majors);
        assert_eq!(options.len(), majors.len());
        assert_eq!(options[0], majors[0]);
    }

    #[test]
    fn unknown_faculty_has_no_options() {
        assert!(options_from(ktm_core::catalog::majors_for("NOPE")).is_empty());
    }
}
