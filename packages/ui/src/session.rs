//! Session context for the UI.
//!
//! [`SessionProvider`] opens the platform session store once, mirrors it into
//! a `Signal` so views re-render on login/logout, and provides the
//! [`ApiClient`] whose bearer token is read from the store at call time.

use api::ApiClient;
use dioxus::prelude::*;
use store::{PaseoConfig, Session, SessionStore};

use crate::platform::{load_config, make_session_store, PlatformStore};

pub type Sessions = SessionStore<PlatformStore>;

/// Reactive snapshot of the current session.
pub fn use_session() -> Signal<Option<Session>> {
    use_context::<Signal<Option<Session>>>()
}

/// The session store itself, for `login`/`logout`.
pub fn use_sessions() -> Sessions {
    use_context::<Sessions>()
}

pub fn use_api() -> ApiClient {
    use_context::<ApiClient>()
}

pub fn use_config() -> PaseoConfig {
    use_context::<PaseoConfig>()
}

#[component]
pub fn SessionProvider(children: Element) -> Element {
    let config = use_context_provider(load_config);
    let sessions = use_context_provider(make_session_store);
    let current = use_context_provider(|| Signal::new(sessions.current()));

    use_hook(|| {
        sessions.subscribe(move |session| {
            let mut current = current;
            current.set(session.cloned());
        });
    });

    let token_source = sessions.clone();
    use_context_provider(move || {
        ApiClient::new(&config.api).with_token_source(move || token_source.token())
    });

    rsx! { {children} }
}

