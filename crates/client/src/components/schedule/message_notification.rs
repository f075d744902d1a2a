use dioxus::prelude::*;

use way_shared::registration::{Notice, NoticeKind};

/// Floating feedback toast for the registration flow. The owning hook
/// clears the notice after five seconds; this just renders it.
#[component]
pub fn MessageNotification(notice: Notice) -> Element {
    let palette = match notice.kind {
        NoticeKind::Success => "bg-green-50 text-green-800 border-green-200",
        NoticeKind::Error => "bg-red-50 text-red-800 border-red-200",
        NoticeKind::Info => "bg-blue-50 text-blue-800 border-blue-200",
    };

    rsx! {
        div {
            class: "fixed top-20 left-1/2 -translate-x-1/2 z-[999] max-w-md w-[90%] sm:w-auto px-4 py-3 rounded-lg border shadow-lg text-sm font-medium text-center animate-fadeIn {palette}",
            "{notice.text}"
        }
    }
}
