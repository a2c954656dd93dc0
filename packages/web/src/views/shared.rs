//! Pieces used by both the owner and walker sections.

use api::{ApiError, Walk, WalkLocation, WalkPhoto};
use dioxus::prelude::*;
use ui::components::EmptyState;
use ui::format;
use ui::icons::{FaClock, FaLocationDot};
use ui::{use_api, Icon, WalkStatusBadge};

use crate::Route;

/// Inline error for a failed load.
#[component]
pub fn LoadError(what: String, error: ApiError) -> Element {
    tracing::warn!("{what}: {error}");
    rsx! {
        div { class: "alert alert-danger", role: "alert", "{what}: {error}" }
    }
}

/// One row in a walk list.
#[component]
pub fn WalkRow(walk: Walk, to: Route, children: Element) -> Element {
    let when = format::optional_datetime(walk.scheduled_at.as_deref());
    let duration = format::duration_minutes(walk.duration_minutes);
    let pet = walk.pet_name().to_string();
    let counterpart = walk
        .walker
        .as_ref()
        .map(|w| w.display_name().to_string())
        .or_else(|| walk.owner.as_ref().and_then(|o| o.name.clone()))
        .unwrap_or_else(|| "Unassigned".to_string());

    rsx! {
        li {
            class: "walk-row",
            Link {
                class: "walk-row-main",
                to,
                span { class: "walk-row-pet", "{pet}" }
                span { class: "walk-row-meta", Icon { icon: FaClock, width: 12, height: 12 } " {when} · {duration}" }
                span { class: "walk-row-meta", "{counterpart}" }
            }
            WalkStatusBadge { status: walk.status }
            div { class: "walk-row-actions", {children} }
        }
    }
}

#[component]
pub fn WalkFacts(walk: Walk) -> Element {
    let when = format::optional_datetime(walk.scheduled_at.as_deref());
    let duration = format::duration_minutes(walk.duration_minutes);
    let notes = walk.notes.clone().filter(|n| !n.trim().is_empty());
    let pet = walk.pet_name().to_string();
    let walker = walk.walker.as_ref().map(|w| w.display_name().to_string());
    let owner = walk.owner.as_ref().and_then(|o| o.name.clone());

    rsx! {
        dl {
            class: "facts",
            dt { "Pet" }
            dd { "{pet}" }
            dt { "Status" }
            dd { WalkStatusBadge { status: walk.status } }
            dt { "Scheduled" }
            dd { "{when}" }
            dt { "Duration" }
            dd { "{duration}" }
            if let Some(walker) = walker {
                dt { "Walker" }
                dd { "{walker}" }
            }
            if let Some(name) = owner {
                dt { "Owner" }
                dd { "{name}" }
            }
            if let Some(notes) = notes {
                dt { "Notes" }
                dd { "{notes}" }
            }
        }
    }
}

#[component]
pub fn LocationList(locations: Vec<WalkLocation>) -> Element {
    if locations.is_empty() {
        return rsx! { EmptyState { text: "No locations recorded yet." } };
    }
    let rows: Vec<(String, Option<String>)> = locations
        .iter()
        .map(|loc| {
            (
                format::coordinates(loc.lat, loc.lng),
                loc.timestamp.as_deref().map(format::datetime),
            )
        })
        .collect();

    rsx! {
        ol {
            class: "location-list",
            for (i, (coords, at)) in rows.into_iter().enumerate() {
                li {
                    key: "{i}",
                    Icon { icon: FaLocationDot, width: 12, height: 12 }
                    " {coords}"
                    if let Some(at) = at {
                        span { class: "muted", " at {at}" }
                    }
                }
            }
        }
    }
}

#[component]
pub fn PhotoGallery(photos: Vec<WalkPhoto>) -> Element {
    let api = use_api();
    if photos.is_empty() {
        return rsx! { EmptyState { text: "No photos yet." } };
    }
    let urls: Vec<String> = photos
        .iter()
        .map(|p| api.asset_url("walks", &p.photo_url))
        .collect();

    rsx! {
        div {
            class: "gallery",
            for (i, url) in urls.into_iter().enumerate() {
                img {
                    key: "{i}",
                    src: "{url}",
                    alt: "Walk photo",
                }
            }
        }
    }
}
