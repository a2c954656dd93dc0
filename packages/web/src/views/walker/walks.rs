use api::{Walk, WalkAction, WalkerQueue};
use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant, Card, EmptyState, Loading};
use ui::{use_api, StatusAlert, StatusMessage};

use crate::views::shared::{LoadError, WalkRow};
use crate::Route;

#[component]
pub fn WalkerWalks() -> Element {
    let message = use_signal(|| Option::<StatusMessage>::None);
    // Bumped after accept/reject so the accepted queue reloads too
    let version = use_signal(|| 0u32);

    rsx! {
        h1 { "My walks" }
        StatusAlert { message }
        Queue {
            queue: WalkerQueue::Pending,
            title: "Requests",
            empty: "No pending requests.",
            version,
            message,
        }
        Queue {
            queue: WalkerQueue::Accepted,
            title: "Accepted",
            empty: "No accepted walks.",
            version,
            message,
        }
        Queue {
            queue: WalkerQueue::History,
            title: "History",
            empty: "No past walks.",
            version,
            message,
        }
    }
}

#[component]
fn Queue(
    queue: WalkerQueue,
    title: String,
    empty: String,
    version: Signal<u32>,
    message: Signal<Option<StatusMessage>>,
) -> Element {
    let api = use_api();
    let walks = use_resource(move || {
        let api = api.clone();
        let _ = version();
        async move { api.walker_queue(queue).await }
    });

    rsx! {
        Card {
            title,
            match &*walks.read() {
                None => rsx! { Loading {} },
                Some(Err(e)) => rsx! { LoadError { what: "Could not load walks", error: e.clone() } },
                Some(Ok(list)) if list.is_empty() => rsx! { EmptyState { text: empty.clone() } },
                Some(Ok(list)) => rsx! {
                    ul {
                        class: "walk-list",
                        for (id, walk) in list.iter().map(|w| (w.id, w.clone())) {
                            QueueRow { key: "{id}", walk, version, message }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn QueueRow(walk: Walk, version: Signal<u32>, message: Signal<Option<StatusMessage>>) -> Element {
    let api = use_api();
    let mut busy = use_signal(|| false);
    let id = walk.id;
    let can_respond = walk.status.can_respond();

    let respond = move |action: WalkAction| {
        let api = api.clone();
        let mut version = version;
        let mut message = message;
        spawn(async move {
            busy.set(true);
            let result = api.walk_transition(id, action).await;
            busy.set(false);
            match result {
                Ok(()) => {
                    message.set(Some(StatusMessage::success(format!("Walk #{id}: {action}"))));
                    *version.write() += 1;
                }
                Err(e) => message.set(Some(StatusMessage::failed("Could not update the walk", &e))),
            }
        });
    };
    let accept = respond.clone();
    let reject = respond;

    rsx! {
        WalkRow {
            walk,
            to: Route::WalkerWalkDetail { id },
            if can_respond {
                Button {
                    disabled: busy(),
                    onclick: move |_| accept(WalkAction::Accept),
                    "Accept"
                }
                Button {
                    variant: ButtonVariant::Destructive,
                    disabled: busy(),
                    onclick: move |_| reject(WalkAction::Reject),
                    "Reject"
                }
            }
        }
    }
}
