//! User-visible status messages.
//!
//! Every failure a view shows goes through a [`StatusMessage`] with a
//! [`Severity`]; [`StatusAlert`] renders one and lets the user dismiss it.
//! Messages are mirrored to `tracing` at the matching level.

use std::fmt;

use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Danger,
}

impl Severity {
    pub fn class(&self) -> &'static str {
        match self {
            Severity::Info => "alert alert-info",
            Severity::Success => "alert alert-success",
            Severity::Warning => "alert alert-warning",
            Severity::Danger => "alert alert-danger",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StatusMessage {
    pub severity: Severity,
    pub text: String,
    pub timestamp: String,
}

impl StatusMessage {
    pub fn new(severity: Severity, text: impl Into<String>) -> Self {
        let text = text.into();
        match severity {
            Severity::Info | Severity::Success => tracing::info!("{text}"),
            Severity::Warning => tracing::warn!("{text}"),
            Severity::Danger => tracing::error!("{text}"),
        }
        Self {
            severity,
            text,
            timestamp: current_time(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(Severity::Info, text)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(Severity::Success, text)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(Severity::Warning, text)
    }

    pub fn danger(text: impl Into<String>) -> Self {
        Self::new(Severity::Danger, text)
    }

    /// "<what>: <error>" at danger level.
    pub fn failed(what: &str, error: &impl fmt::Display) -> Self {
        Self::danger(format!("{what}: {error}"))
    }
}

fn current_time() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

/// Dismissible alert bound to an optional message.
#[component]
pub fn StatusAlert(message: Signal<Option<StatusMessage>>) -> Element {
    let Some(current) = message() else {
        return rsx! {};
    };

    rsx! {
        div {
            class: "{current.severity.class()}",
            role: "alert",
            span { class: "alert-time", "{current.timestamp}" }
            span { class: "alert-text", "{current.text}" }
            button {
                class: "alert-close",
                r#type: "button",
                aria_label: "Dismiss",
                onclick: move |_| message.set(None),
                "×"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_message_is_danger() {
        let msg = StatusMessage::failed("Could not load pets", &"502 Bad Gateway");
        assert_eq!(msg.severity, Severity::Danger);
        assert_eq!(msg.text, "Could not load pets: 502 Bad Gateway");
        assert_eq!(msg.timestamp.len(), 8);
    }

    #[test]
    fn test_severity_classes() {
        assert_eq!(Severity::Warning.class(), "alert alert-warning");
        assert_eq!(Severity::Success.class(), "alert alert-success");
    }
}
