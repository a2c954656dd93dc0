use dioxus::prelude::*;
use ui::components::{Card, Loading};
use ui::{format, use_api};

use crate::views::shared::LoadError;
use crate::Route;

#[component]
pub fn WalkerDetail(id: i64) -> Element {
    let api = use_api();
    let asset_api = api.clone();

    let mut id_signal = use_signal(|| id);
    if *id_signal.peek() != id {
        id_signal.set(id);
    }

    let walker = use_resource(move || {
        let api = api.clone();
        let id = id_signal();
        async move { api.walker(id).await }
    });

    let view = match &*walker.read() {
        None => rsx! { Loading {} },
        Some(Err(e)) => rsx! { LoadError { what: "Could not load the walker", error: e.clone() } },
        Some(Ok(walker)) => {
            let name = walker.display_name().to_string();
            let photo = walker
                .photo_url
                .as_deref()
                .map(|f| asset_api.asset_url("walkers", f));
            let availability = match walker.is_available {
                Some(true) => "Available now",
                Some(false) => "Not available",
                None => "Availability unknown",
            };
            rsx! {
                Card {
                    class: "walker-profile",
                    if let Some(src) = photo {
                        img { class: "avatar-large", src: "{src}", alt: "{name}" }
                    }
                    h1 { "{name}" }
                    if let Some(email) = walker.email.clone() {
                        p { class: "muted", "{email}" }
                    }
                    dl {
                        class: "facts",
                        dt { "Price" }
                        dd { "{format::price_per_hour(walker.price_per_hour)}" }
                        dt { "Rating" }
                        dd { "{format::rating(walker.avg_rating, walker.reviews_count)}" }
                        dt { "Status" }
                        dd { "{availability}" }
                    }
                    div {
                        class: "form-actions",
                        Link {
                            class: "btn btn-primary",
                            to: Route::RequestWalkWith { walker_id: id },
                            "Request a walk"
                        }
                        Link { class: "btn btn-outline", to: Route::NearbyWalkers {}, "Back" }
                    }
                }
            }
        }
    };
    view
}
