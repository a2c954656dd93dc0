//! Walker duty context.
//!
//! [`DutyProvider`] sits at the app root, above the router, so the location
//! reporter keeps running across navigation. It resumes reporting after a
//! reload when the persisted flag says the walker was on duty, and the
//! controller itself stops reporting when the session ends.

use std::rc::Rc;

use api::{ApiClient, DutyController, ReportStatus, ReporterSettings};
use dioxus::core::spawn_forever;
use dioxus::prelude::*;
use futures::future::LocalBoxFuture;

use crate::platform::{make_positioner, PlatformPositioner, PlatformStore};
use crate::session::{use_api, use_config, use_session, use_sessions};
use crate::status::StatusMessage;

pub type Duty = DutyController<PlatformStore, PlatformPositioner, ApiClient>;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DutyState {
    pub available: bool,
    pub reporting: bool,
    /// A positioning or send is in flight.
    pub sending: bool,
    /// An availability change is waiting for the backend.
    pub busy: bool,
    pub last_sent: Option<String>,
    pub message: Option<StatusMessage>,
}

#[derive(Clone)]
pub struct DutyHandle {
    controller: Duty,
    state: Signal<DutyState>,
}

impl DutyHandle {
    pub fn state(&self) -> Signal<DutyState> {
        self.state
    }

    /// Flip availability. Runs outside the calling view's scope so the
    /// outcome lands even if the walker navigates away meanwhile.
    pub fn toggle(&self) {
        let mut state = self.state;
        if state.peek().busy {
            return;
        }
        let desired = !state.peek().available;
        state.write().busy = true;

        let controller = self.controller.clone();
        let _ = spawn_forever(async move {
            let result = controller.set_available(desired).await;
            let mut s = state.write();
            s.busy = false;
            settle(
                &mut s,
                controller.is_available(),
                controller.is_reporting(),
                controller.is_sending(),
            );
            s.message = Some(match result {
                Ok(()) if desired => StatusMessage::success("You are available. Sharing your location."),
                Ok(()) => StatusMessage::info("You are no longer available."),
                Err(e) => StatusMessage::failed("Could not change availability", &e),
            });
        });
    }
}

pub fn use_duty() -> DutyHandle {
    use_context::<DutyHandle>()
}

#[component]
pub fn DutyProvider(children: Element) -> Element {
    let sessions = use_sessions();
    let api = use_api();
    let config = use_config();
    let session = use_session();
    let mut state = use_context_provider(|| Signal::new(DutyState::default()));

    let handle = use_context_provider(move || {
        let controller: Duty = DutyController::new(
            sessions,
            Rc::new(make_positioner(&config)),
            Rc::new(api),
            ReporterSettings::from_config(&config.location),
            Rc::new(|driver: LocalBoxFuture<'static, ()>| {
                let _ = spawn_forever(driver);
            }),
        );
        controller.on_status(move |status| {
            let mut state = state;
            apply_status(&mut state.write(), status);
        });
        controller.resume();
        DutyHandle { controller, state }
    });

    // Logout clears the flag and stops the reporter; mirror that here
    use_effect(move || {
        let _ = session();
        let controller = &handle.controller;
        settle(
            &mut state.write(),
            controller.is_available(),
            controller.is_reporting(),
            controller.is_sending(),
        );
    });

    rsx! { {children} }
}

/// Copy the controller's view into the signal. A disarmed reporter emits no
/// further status events, so `sending` has to be taken from here too.
fn settle(state: &mut DutyState, available: bool, reporting: bool, sending: bool) {
    state.available = available;
    state.reporting = reporting;
    state.sending = sending;
    if !available {
        state.last_sent = None;
    }
}

fn apply_status(state: &mut DutyState, status: ReportStatus) {
    match status {
        ReportStatus::CycleStarted => state.sending = true,
        ReportStatus::Sent(sample) => {
            state.sending = false;
            state.last_sent = Some(
                sample
                    .captured_at
                    .with_timezone(&chrono::Local)
                    .format("%H:%M:%S")
                    .to_string(),
            );
        }
        ReportStatus::PositionFailed(e) => {
            state.sending = false;
            state.message = Some(StatusMessage::warning(format!("Location unavailable: {e}")));
        }
        ReportStatus::SendFailed(e) => {
            state.sending = false;
            state.message = Some(StatusMessage::failed("Could not send location", &e));
        }
        ReportStatus::Skipped => {
            tracing::debug!("location tick skipped, previous report still running");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::{Coordinates, LocationSample, PositionError};
    use crate::status::Severity;

    #[test]
    fn test_status_events_drive_state() {
        let mut state = DutyState::default();
        apply_status(&mut state, ReportStatus::CycleStarted);
        assert!(state.sending);

        apply_status(
            &mut state,
            ReportStatus::Sent(LocationSample::now(Coordinates::new(1.0, 2.0))),
        );
        assert!(!state.sending);
        assert!(state.last_sent.is_some());

        apply_status(&mut state, ReportStatus::CycleStarted);
        apply_status(
            &mut state,
            ReportStatus::PositionFailed(PositionError::PermissionDenied),
        );
        assert!(!state.sending);
        assert_eq!(
            state.message.as_ref().map(|m| m.severity),
            Some(Severity::Warning)
        );

        apply_status(&mut state, ReportStatus::SendFailed("offline".into()));
        assert_eq!(
            state.message.as_ref().map(|m| m.severity),
            Some(Severity::Danger)
        );
    }

    #[test]
    fn test_going_off_duty_mid_cycle_clears_sending() {
        let mut state = DutyState::default();
        settle(&mut state, true, true, false);
        apply_status(&mut state, ReportStatus::CycleStarted);
        apply_status(
            &mut state,
            ReportStatus::Sent(LocationSample::now(Coordinates::new(1.0, 2.0))),
        );
        apply_status(&mut state, ReportStatus::CycleStarted);
        assert!(state.sending);

        settle(&mut state, false, false, false);
        assert!(!state.available);
        assert!(!state.reporting);
        assert!(!state.sending);
        assert_eq!(state.last_sent, None);
    }
}
