//! # API crate — backend client and walker duty for Paseo
//!
//! Everything the front-ends need to talk to the Paseo backend, plus the one
//! piece of client-side behaviour with real timing: periodic walker location
//! reporting.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`ApiClient`]: base URL, bearer token source, timeouts, error mapping |
//! | [`auth`] | owner/walker login and multipart registration |
//! | [`pets`] | pet CRUD and photo upload |
//! | [`walks`] | walk creation, detail, photos, walker queues and transitions |
//! | [`walkers`] | nearby search, walker profile, availability and location endpoints |
//! | [`reviews`] | leaving and listing reviews |
//! | [`models`] | wire types, normalized at deserialization |
//! | [`location`] | [`Positioner`] trait, browser geolocation (`web` feature) |
//! | [`reporter`] | [`LocationReporter`]: armed/idle state machine, one cycle in flight |
//! | [`duty`] | [`DutyController`]: availability toggle that owns the reporter |
//! | [`timer`] | platform `sleep` and `with_timeout` |
//!
//! Endpoint modules expose a pure request builder per call (easy to test) and
//! an `impl ApiClient` block with the async method views use.

pub mod auth;
pub mod client;
pub mod duty;
pub mod error;
pub mod location;
pub mod models;
pub mod pets;
pub mod reporter;
pub mod reviews;
pub mod timer;
pub mod walkers;
pub mod walks;

pub use auth::Authenticated;
pub use client::ApiClient;
pub use duty::{AvailabilityApi, DutyController, DutyError, Spawner};
pub use error::{ApiError, ValidationError};
pub use location::{
    fallback_coordinates, locate, locate_or, Coordinates, FixedPositioner, LocationSample,
    PositionError, PositionRequest, Positioner, UnavailablePositioner,
};
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use location::BrowserPositioner;
pub use models::*;
pub use reporter::{LocationReporter, LocationSink, ReportStatus, ReporterSettings};
pub use walks::{WalkAction, WalkerQueue};

pub use store::{PaseoConfig, Profile, Role, Session};
