use api::WalkerQueue;
use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant, Card};
use ui::icons::{FaLocationDot, FaRoute};
use ui::{use_api, use_config, use_duty, use_session, Icon, StatusAlert, StatusMessage};

use crate::Route;

#[component]
pub fn WalkerHome() -> Element {
    let session = use_session();
    let duty = use_duty();
    let state = duty.state();
    let api = use_api();
    let interval = use_config().location.report_interval();

    let name = session
        .read()
        .as_ref()
        .map(|s| s.display_name().to_string())
        .unwrap_or_default();

    let pending = use_resource(move || {
        let api = api.clone();
        async move { api.walker_queue(WalkerQueue::Pending).await }
    });
    let pending_count = match &*pending.read() {
        Some(Ok(list)) => Some(list.len()),
        _ => None,
    };

    let current = state();
    let mut message = use_signal(|| Option::<StatusMessage>::None);
    use_effect(move || {
        message.set(state.read().message.clone());
    });

    let (label, variant) = if current.available {
        ("Stop being available", ButtonVariant::Outline)
    } else {
        ("I am available", ButtonVariant::Primary)
    };
    let toggle = duty.clone();

    rsx! {
        h1 { "Hello, {name}" }
        StatusAlert { message }
        div {
            class: "tiles",
            Card {
                title: "Availability",
                Icon { icon: FaLocationDot, width: 28, height: 28 }
                if current.available {
                    p { class: "status-on", "You are available. Owners nearby can find you." }
                } else {
                    p { class: "status-off", "You are not available." }
                }
                if current.reporting {
                    p {
                        class: "muted",
                        "Your location is shared every {interval.as_secs() / 60} minutes."
                    }
                    if current.sending {
                        p { class: "sending", span { class: "spinner" } " Sending location…" }
                    } else if let Some(at) = current.last_sent.clone() {
                        p { class: "muted", "Last sent at {at}" }
                    }
                }
                Button {
                    variant,
                    disabled: current.busy,
                    onclick: move |_| toggle.toggle(),
                    if current.busy { "Updating…" } else { "{label}" }
                }
            }
            Card {
                title: "Walks",
                Icon { icon: FaRoute, width: 28, height: 28 }
                if let Some(count) = pending_count {
                    p { "{count} request(s) waiting for you." }
                }
                Link { class: "btn btn-primary", to: Route::WalkerWalks {}, "See walks" }
            }
        }
    }
}
