use dioxus::prelude::*;
use store::Role;
use ui::{AppHeader, RoleGate};

use crate::Route;

#[component]
pub fn OwnerLayout() -> Element {
    let nav = use_navigator();
    rsx! {
        RoleGate {
            required: Role::Owner,
            on_denied: move |role| {
                nav.replace(Route::login(role));
            },
            AppHeader {
                on_logout: move |role| {
                    nav.replace(Route::login(role));
                },
                Link { to: Route::OwnerHome {}, "Home" }
                Link { to: Route::OwnerPets {}, "My pets" }
                Link { to: Route::OwnerWalks {}, "Walks" }
                Link { to: Route::NearbyWalkers {}, "Find a walker" }
            }
            main { class: "page", Outlet::<Route> {} }
        }
    }
}

#[component]
pub fn WalkerLayout() -> Element {
    let nav = use_navigator();
    rsx! {
        RoleGate {
            required: Role::Walker,
            on_denied: move |role| {
                nav.replace(Route::login(role));
            },
            AppHeader {
                on_logout: move |role| {
                    nav.replace(Route::login(role));
                },
                Link { to: Route::WalkerHome {}, "Home" }
                Link { to: Route::WalkerWalks {}, "Walks" }
                Link { to: Route::WalkerReviews {}, "Reviews" }
            }
            main { class: "page", Outlet::<Route> {} }
        }
    }
}

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! {
        div {
            class: "page not-found",
            h1 { "Page not found" }
            p { class: "muted", "Nothing lives at /{path}." }
            Link { to: Route::Root {}, "Back to Paseo" }
        }
    }
}
