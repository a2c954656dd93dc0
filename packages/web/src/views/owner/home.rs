use dioxus::prelude::*;
use ui::components::Card;
use ui::icons::{FaDog, FaLocationDot, FaRoute};
use ui::{use_api, use_session, Icon};

use crate::Route;

#[component]
pub fn OwnerHome() -> Element {
    let session = use_session();
    let api = use_api();
    let name = session
        .read()
        .as_ref()
        .map(|s| s.display_name().to_string())
        .unwrap_or_default();

    let walks = use_resource(move || {
        let api = api.clone();
        async move { api.owner_walks().await }
    });

    let active = match &*walks.read() {
        Some(Ok(list)) => Some(list.iter().filter(|w| w.status.is_active()).count()),
        _ => None,
    };

    rsx! {
        h1 { "Hello, {name}" }
        div {
            class: "tiles",
            Card {
                title: "My pets",
                Icon { icon: FaDog, width: 28, height: 28 }
                p { "Add your pets and keep their photos up to date." }
                Link { class: "btn btn-primary", to: Route::OwnerPets {}, "Manage pets" }
            }
            Card {
                title: "Walks",
                Icon { icon: FaRoute, width: 28, height: 28 }
                if let Some(count) = active {
                    p { "{count} active walk(s)." }
                } else {
                    p { "Follow your walks and leave reviews." }
                }
                Link { class: "btn btn-primary", to: Route::OwnerWalks {}, "See walks" }
            }
            Card {
                title: "Find a walker",
                Icon { icon: FaLocationDot, width: 28, height: 28 }
                p { "Available walkers close to you." }
                Link { class: "btn btn-primary", to: Route::NearbyWalkers {}, "Search nearby" }
            }
        }
    }
}
