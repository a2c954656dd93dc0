use dioxus::prelude::*;
use store::Role;

use crate::components::{Button, ButtonVariant};
use crate::icons::{FaPaw, FaRightFromBracket, FaUser};
use crate::session::{use_session, use_sessions};
use crate::Icon;

/// Top bar: brand, the section's links, and the signed-in user.
#[component]
pub fn AppHeader(on_logout: EventHandler<Role>, children: Element) -> Element {
    let session = use_session();
    let sessions = use_sessions();

    let user = session.read().as_ref().map(|s| (s.role, s.display_name().to_string()));

    rsx! {
        header {
            class: "navbar",
            div {
                class: "navbar-brand",
                Icon { icon: FaPaw, width: 20, height: 20 }
                span { "Paseo" }
            }
            nav { class: "navbar-links", {children} }
            if let Some((role, name)) = user {
                div {
                    class: "navbar-user",
                    Icon { icon: FaUser, width: 14, height: 14 }
                    span { class: "navbar-user-name", "{name}" }
                    Button {
                        variant: ButtonVariant::Ghost,
                        onclick: move |_| {
                            sessions.logout();
                            on_logout.call(role);
                        },
                        Icon { icon: FaRightFromBracket, width: 14, height: 14 }
                        " Log out"
                    }
                }
            }
        }
    }
}
