use dioxus::prelude::*;

#[component]
pub fn Label(#[props(default)] html_for: String, children: Element) -> Element {
    rsx! {
        label { class: "form-label", r#for: "{html_for}", {children} }
    }
}

#[component]
pub fn Input(
    #[props(default)] id: String,
    #[props(default = "text".to_string())] r#type: String,
    #[props(default)] class: String,
    #[props(default)] placeholder: String,
    #[props(default)] value: String,
    #[props(default)] disabled: bool,
    #[props(default)] required: bool,
    /// Passed through for `number` inputs.
    #[props(default)]
    step: Option<String>,
    #[props(default)] min: Option<String>,
    #[props(default)] max: Option<String>,
    oninput: Option<EventHandler<FormEvent>>,
) -> Element {
    rsx! {
        input {
            id: "{id}",
            class: "form-control {class}",
            r#type: "{r#type}",
            placeholder: "{placeholder}",
            value: "{value}",
            disabled,
            required,
            step,
            min,
            max,
            oninput: move |evt| {
                if let Some(handler) = oninput {
                    handler.call(evt);
                }
            },
        }
    }
}

#[component]
pub fn TextArea(
    #[props(default)] id: String,
    #[props(default)] placeholder: String,
    #[props(default)] value: String,
    #[props(default = 3)] rows: u32,
    oninput: Option<EventHandler<FormEvent>>,
) -> Element {
    rsx! {
        textarea {
            id: "{id}",
            class: "form-control",
            rows: "{rows}",
            placeholder: "{placeholder}",
            value: "{value}",
            oninput: move |evt| {
                if let Some(handler) = oninput {
                    handler.call(evt);
                }
            },
        }
    }
}

/// A labelled form row.
#[component]
pub fn Field(label: String, #[props(default)] html_for: String, children: Element) -> Element {
    rsx! {
        div {
            class: "form-field",
            Label { html_for, "{label}" }
            {children}
        }
    }
}
