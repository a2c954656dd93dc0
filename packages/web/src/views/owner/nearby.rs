use api::{fallback_coordinates, locate_or, PositionRequest, WalkerProfile};
use dioxus::prelude::*;
use ui::components::{Card, EmptyState, Loading};
use ui::icons::FaStar;
use ui::platform::make_positioner;
use ui::{format, use_api, use_config, Icon, StatusAlert, StatusMessage};

use crate::views::shared::LoadError;
use crate::Route;

/// Available walkers around the device, or around the configured default
/// point when positioning fails.
#[component]
pub fn NearbyWalkers() -> Element {
    let api = use_api();
    let config = use_config();
    let mut notice = use_signal(|| Option::<StatusMessage>::None);
    let mut searched_at = use_signal(|| Option::<String>::None);

    let mut walkers = use_resource(move || {
        let api = api.clone();
        let config = config.clone();
        async move {
            let positioner = make_positioner(&config);
            let (coords, error) = locate_or(
                &positioner,
                PositionRequest::for_nearby(&config.location),
                fallback_coordinates(&config.location),
            )
            .await;
            if let Some(e) = error {
                notice.set(Some(StatusMessage::warning(format!(
                    "{e}. Showing walkers around the default location."
                ))));
            }
            searched_at.set(Some(format::coordinates(coords.latitude, coords.longitude)));
            api.nearby_walkers(coords).await
        }
    });

    rsx! {
        div {
            class: "page-header",
            h1 { "Walkers near you" }
            button {
                class: "btn btn-outline",
                r#type: "button",
                onclick: move |_| {
                    notice.set(None);
                    walkers.restart();
                },
                "Search again"
            }
        }
        StatusAlert { message: notice }
        if let Some(at) = searched_at() {
            p { class: "muted", "Searching around {at}" }
        }
        match &*walkers.read() {
            None => rsx! { Loading { label: "Finding your location…" } },
            Some(Err(e)) => rsx! { LoadError { what: "Could not search walkers", error: e.clone() } },
            Some(Ok(list)) if list.is_empty() => rsx! { EmptyState { text: "No walkers are available near you right now." } },
            Some(Ok(list)) => rsx! {
                div {
                    class: "walker-grid",
                    for walker in list.iter().filter_map(|w| w.id.map(|id| (id, w.clone()))) {
                        WalkerCard { key: "{walker.0}", id: walker.0, walker: walker.1 }
                    }
                }
            },
        }
    }
}

#[component]
fn WalkerCard(id: i64, walker: WalkerProfile) -> Element {
    let api = use_api();
    let photo = walker.photo_url.as_deref().map(|f| api.asset_url("walkers", f));
    let name = walker.display_name().to_string();
    let price = format::price_per_hour(walker.price_per_hour);
    let rating = format::rating(walker.avg_rating, walker.reviews_count);
    let distance = format::distance(walker.distance_km);

    rsx! {
        Card {
            class: "walker-card",
            if let Some(src) = photo {
                img { class: "avatar", src: "{src}", alt: "{name}" }
            }
            h3 { "{name}" }
            p { "{price}" }
            p { Icon { icon: FaStar, width: 12, height: 12 } " {rating}" }
            p { class: "muted", "{distance}" }
            div {
                class: "row-actions",
                Link { class: "btn btn-outline", to: Route::WalkerDetail { id }, "Profile" }
                Link { class: "btn btn-primary", to: Route::RequestWalkWith { walker_id: id }, "Request walk" }
            }
        }
    }
}
