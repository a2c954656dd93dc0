use dioxus::prelude::*;

#[component]
pub fn Card(#[props(default)] title: Option<String>, #[props(default)] class: String, children: Element) -> Element {
    rsx! {
        section {
            class: "card {class}",
            if let Some(title) = title {
                h2 { class: "card-title", "{title}" }
            }
            div { class: "card-body", {children} }
        }
    }
}

#[component]
pub fn Loading(#[props(default = "Loading…".to_string())] label: String) -> Element {
    rsx! {
        div { class: "loading", role: "status", span { class: "spinner" } "{label}" }
    }
}

#[component]
pub fn EmptyState(text: String) -> Element {
    rsx! {
        p { class: "empty", "{text}" }
    }
}
