//! Role gating for the owner and walker sections.

use dioxus::prelude::*;
use store::{check_access, Access, Role};

use crate::session::use_session;

/// Render `children` only for a session of the `required` role. Otherwise
/// nothing is rendered and `on_denied` receives the role whose login view
/// the user should be sent to.
#[component]
pub fn RoleGate(required: Role, on_denied: EventHandler<Role>, children: Element) -> Element {
    let session = use_session();
    let access = check_access(session.read().as_ref(), required);

    use_effect(move || {
        if let Access::Redirect(role) = check_access(session.read().as_ref(), required) {
            tracing::info!(%role, "access denied, redirecting to login");
            on_denied.call(role);
        }
    });

    match access {
        Access::Granted => rsx! { {children} },
        Access::Redirect(_) => rsx! {},
    }
}
