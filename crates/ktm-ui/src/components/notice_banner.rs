//! Notice banner
//!
//! Shows the outcome of the last action above the form. Errors stay until
//! dismissed; the caller decides when to clear info notices.

use dioxus::prelude::*;
use ktm_core::{Notice, NoticeKind};

/// CSS class for a notice kind
pub fn notice_class(kind: NoticeKind) -> &'static str {
    match kind {
        NoticeKind::Info => "notice notice-info",
        NoticeKind::Error => "notice notice-error",
    }
}

#[derive(Clone, PartialEq, Props)]
pub struct NoticeBannerProps {
    pub notice: Notice,
    pub ondismiss: EventHandler<()>,
}

#[component]
pub fn NoticeBanner(props: NoticeBannerProps) -> Element {
    let class = notice_class(props.notice.kind);
    let role = if props.notice.is_error() { "alert" } else { "status" };

    rsx! {
        div { class: "{class}", role: "{role}",
            span { class: "notice-message", "{props.notice.message}" }
            super::CloseButton { onclick: move |_| props.ondismiss.call(()) }
        }
    }
}
