//! Shared UI for the Paseo front-ends: session and duty context, platform
//! wiring, components and formatting helpers.

use dioxus::prelude::*;

pub mod components;
pub mod format;
pub mod platform;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub const MAIN_CSS: Asset = asset!("/assets/main.css");

mod session;
pub use session::{use_api, use_config, use_session, use_sessions, SessionProvider, Sessions};

mod duty;
pub use duty::{use_duty, Duty, DutyHandle, DutyProvider, DutyState};

mod status;
pub use status::{Severity, StatusAlert, StatusMessage};

mod badge;
pub use badge::WalkStatusBadge;

mod role_gate;
pub use role_gate::RoleGate;

mod navbar;
pub use navbar::AppHeader;
