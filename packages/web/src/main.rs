use dioxus::prelude::*;

use store::Role;
use ui::{DutyProvider, SessionProvider, MAIN_CSS};
use views::{
    EditPet, LoginOwner, LoginWalker, NearbyWalkers, NewPet, NotFound, OwnerHome, OwnerLayout,
    OwnerPets, OwnerWalkDetail, OwnerWalks, PetPhoto, RegisterOwner, RegisterWalker, RequestWalk,
    RequestWalkWith, WalkerDetail, WalkerHome, WalkerLayout, WalkerReviews, WalkerWalkDetail,
    WalkerWalks,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[route("/")]
    Root {},
    #[route("/login-owner")]
    LoginOwner {},
    #[route("/login-walker")]
    LoginWalker {},
    #[route("/register-owner")]
    RegisterOwner {},
    #[route("/register-walker")]
    RegisterWalker {},

    #[layout(OwnerLayout)]
        #[route("/owner/home")]
        OwnerHome {},
        #[route("/owner/pets")]
        OwnerPets {},
        #[route("/owner/pets/new")]
        NewPet {},
        #[route("/owner/pets/:id/edit")]
        EditPet { id: i64 },
        #[route("/owner/pets/:id/photo")]
        PetPhoto { id: i64 },
        #[route("/owner/walks")]
        OwnerWalks {},
        #[route("/owner/walks/new")]
        RequestWalk {},
        #[route("/owner/walks/new/:walker_id")]
        RequestWalkWith { walker_id: i64 },
        #[route("/owner/walks/:id")]
        OwnerWalkDetail { id: i64 },
        #[route("/owner/walkers/nearby")]
        NearbyWalkers {},
        #[route("/owner/walkers/:id")]
        WalkerDetail { id: i64 },
    #[end_layout]

    #[layout(WalkerLayout)]
        #[route("/walker/home")]
        WalkerHome {},
        #[route("/walker/walks")]
        WalkerWalks {},
        #[route("/walker/walks/:id")]
        WalkerWalkDetail { id: i64 },
        #[route("/walker/reviews")]
        WalkerReviews {},
    #[end_layout]

    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

impl Route {
    pub fn home(role: Role) -> Self {
        match role {
            Role::Owner => Route::OwnerHome {},
            Role::Walker => Route::WalkerHome {},
        }
    }

    pub fn login(role: Role) -> Self {
        match role {
            Role::Owner => Route::LoginOwner {},
            Role::Walker => Route::LoginWalker {},
        }
    }

    pub fn register(role: Role) -> Self {
        match role {
            Role::Owner => Route::RegisterOwner {},
            Role::Walker => Route::RegisterWalker {},
        }
    }
}

const FAVICON: Asset = asset!("/assets/favicon.svg");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        // Global app resources
        document::Link { rel: "icon", href: FAVICON }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        // Duty sits above the router so reporting survives navigation
        SessionProvider {
            DutyProvider {
                Router::<Route> {}
            }
        }
    }
}

/// Redirect `/` to the current role's home, or to the owner login.
#[component]
fn Root() -> Element {
    let nav = use_navigator();
    let session = ui::use_session();
    let target = match session.read().as_ref() {
        Some(s) => Route::home(s.role),
        None => Route::LoginOwner {},
    };
    nav.replace(target);
    rsx! {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_render_paths() {
        assert_eq!(Route::home(Role::Walker).to_string(), "/walker/home");
        assert_eq!(Route::login(Role::Owner).to_string(), "/login-owner");
        assert_eq!(
            Route::RequestWalkWith { walker_id: 7 }.to_string(),
            "/owner/walks/new/7"
        );
        assert_eq!(
            Route::EditPet { id: 3 }.to_string(),
            "/owner/pets/3/edit"
        );
    }

    #[test]
    fn test_static_segments_win_over_ids() {
        assert_eq!(
            "/owner/walks/new".parse::<Route>().ok(),
            Some(Route::RequestWalk {})
        );
        assert_eq!(
            "/owner/walkers/nearby".parse::<Route>().ok(),
            Some(Route::NearbyWalkers {})
        );
        assert_eq!(
            "/owner/walks/42".parse::<Route>().ok(),
            Some(Route::OwnerWalkDetail { id: 42 })
        );
    }
}
