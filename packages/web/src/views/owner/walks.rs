use api::Walk;
use dioxus::prelude::*;
use ui::components::{Card, EmptyState, Loading};
use ui::use_api;

use crate::views::shared::{LoadError, WalkRow};
use crate::Route;

/// Active walks first, then closed ones.
fn split(walks: &[Walk]) -> (Vec<Walk>, Vec<Walk>) {
    let active = walks.iter().filter(|w| w.status.is_active()).cloned().collect();
    let history = walks.iter().filter(|w| w.status.is_closed()).cloned().collect();
    (active, history)
}

#[component]
pub fn OwnerWalks() -> Element {
    let api = use_api();
    let walks = use_resource(move || {
        let api = api.clone();
        async move { api.owner_walks().await }
    });

    rsx! {
        div {
            class: "page-header",
            h1 { "My walks" }
            Link { class: "btn btn-primary", to: Route::RequestWalk {}, "Request a walk" }
        }
        match &*walks.read() {
            None => rsx! { Loading {} },
            Some(Err(e)) => rsx! { LoadError { what: "Could not load your walks", error: e.clone() } },
            Some(Ok(list)) => {
                let (active, history) = split(list);
                rsx! {
                    WalkList { title: "Active", empty: "No active walks.", walks: active }
                    WalkList { title: "History", empty: "No finished walks yet.", walks: history }
                }
            }
        }
    }
}

#[component]
fn WalkList(title: String, empty: String, walks: Vec<Walk>) -> Element {
    rsx! {
        Card {
            title,
            if walks.is_empty() {
                EmptyState { text: empty }
            } else {
                ul {
                    class: "walk-list",
                    for (id, walk) in walks.into_iter().map(|w| (w.id, w)) {
                        WalkRow {
                            key: "{id}",
                            to: Route::OwnerWalkDetail { id },
                            walk,
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk(id: i64, status: &str) -> Walk {
        serde_json::from_value(serde_json::json!({"id": id, "status": status})).unwrap()
    }

    #[test]
    fn test_split_active_and_history() {
        let walks = vec![
            walk(1, "PENDING"),
            walk(2, "FINISHED"),
            walk(3, "IN_PROGRESS"),
            walk(4, "REJECTED"),
            walk(5, "ACCEPTED"),
        ];
        let (active, history) = split(&walks);
        let ids = |v: &[Walk]| v.iter().map(|w| w.id).collect::<Vec<_>>();
        assert_eq!(ids(&active), vec![1, 3, 5]);
        assert_eq!(ids(&history), vec![2, 4]);
    }
}
