use dioxus::prelude::*;

/// Rotating ring shown while a request is outstanding
#[component]
pub fn Spinner(size: u32) -> Element {
    rsx! {
        div {
            class: "spinner",
            style: "width: {size}px; height: {size}px;",
        }
    }
}
