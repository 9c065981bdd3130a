use dioxus::prelude::*;
use ktm_core::{CardPreview, Notice, RecordForm, RecordTable};

use crate::context::Refresh;
use crate::pages::Admin;
use crate::theme::GLOBAL_STYLES;

/// Application routes.
///
/// - `/` - Record form, table and card preview
#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[route("/")]
    Admin {},
}

/// Root application component.
///
/// Provides global styles, shared state and routing.
#[component]
pub fn App() -> Element {
    let Some(state) = use_hook(crate::app_state) else {
        return rsx! {
            style { {GLOBAL_STYLES} }
            p { class: "startup-error", "KTM Admin was not initialized." }
        };
    };

    use_context_provider(|| state);
    use_context_provider(|| Signal::new(RecordForm::new()));
    use_context_provider(|| Signal::new(RecordTable::new()));
    use_context_provider(|| Signal::new(CardPreview::new()));
    use_context_provider(|| Signal::new(Option::<Notice>::None));
    use_context_provider(|| Refresh(Signal::new(0)));

    rsx! {
        style { {GLOBAL_STYLES} }
        Router::<Route> {}
    }
}
