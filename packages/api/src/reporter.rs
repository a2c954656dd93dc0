//! # Walker location reporter
//!
//! While armed, the reporter samples the device position and forwards it to a
//! [`LocationSink`] on a fixed cadence:
//!
//! ```text
//! arm() ──► cycle ──► tick ──► cycle ──► tick ──► ...   disarm() ──► idle
//!           t = 0     t = I             t = 2I
//! ```
//!
//! - **Sample, then wait.** Arming runs one cycle immediately; the timer only
//!   governs the following ones.
//! - **One cycle in flight.** A tick that fires while the previous cycle is
//!   still positioning or sending is skipped and reported as
//!   [`ReportStatus::Skipped`]; it is never queued.
//! - **No retries.** A failed cycle is reported and the next tick tries again.
//! - **Teardown.** [`LocationReporter::disarm`] drops the driver (and with it
//!   any in-flight cycle) and bumps a generation counter. Work belonging to an
//!   older generation can neither touch the `sending` flag nor invoke the
//!   status callback.
//!
//! The reporter does not spawn anything itself: [`LocationReporter::arm`]
//! hands back the driver future and the caller puts it on its executor.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::future::Future;
use std::pin::pin;
use std::rc::Rc;
use std::time::Duration;

use futures::channel::oneshot;
use futures::future::{select, Either, FutureExt, LocalBoxFuture};
use store::LocationConfig;

use crate::location::{locate, LocationSample, PositionError, PositionRequest, Positioner};
use crate::timer;

/// Where samples go. Implemented by [`crate::ApiClient`].
pub trait LocationSink {
    type Error: fmt::Display;

    fn report_location(
        &self,
        sample: &LocationSample,
    ) -> impl Future<Output = Result<(), Self::Error>>;
}

/// Progress of the reporter, delivered to the status callback.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportStatus {
    CycleStarted,
    Sent(LocationSample),
    PositionFailed(PositionError),
    SendFailed(String),
    /// A tick fired while the previous cycle was still running.
    Skipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReporterSettings {
    pub interval: Duration,
    pub position: PositionRequest,
}

impl ReporterSettings {
    pub fn from_config(config: &LocationConfig) -> Self {
        Self {
            interval: config.report_interval(),
            position: PositionRequest::for_reporting(config),
        }
    }
}

type StatusCallback = Rc<dyn Fn(ReportStatus)>;

#[derive(Default)]
struct Shared {
    generation: Cell<u64>,
    sending: Cell<bool>,
    cancel: RefCell<Option<oneshot::Sender<()>>>,
    on_status: RefCell<Option<StatusCallback>>,
}

pub struct LocationReporter<P, S> {
    positioner: Rc<P>,
    sink: Rc<S>,
    settings: ReporterSettings,
    shared: Rc<Shared>,
}

impl<P, S> Clone for LocationReporter<P, S> {
    fn clone(&self) -> Self {
        Self {
            positioner: self.positioner.clone(),
            sink: self.sink.clone(),
            settings: self.settings,
            shared: self.shared.clone(),
        }
    }
}

impl<P, S> LocationReporter<P, S>
where
    P: Positioner + 'static,
    S: LocationSink + 'static,
{
    pub fn new(positioner: Rc<P>, sink: Rc<S>, settings: ReporterSettings) -> Self {
        Self {
            positioner,
            sink,
            settings,
            shared: Rc::new(Shared::default()),
        }
    }

    pub fn settings(&self) -> ReporterSettings {
        self.settings
    }

    /// Replace the status callback. Takes effect for the next event.
    pub fn on_status(&self, callback: impl Fn(ReportStatus) + 'static) {
        *self.shared.on_status.borrow_mut() = Some(Rc::new(callback));
    }

    pub fn is_armed(&self) -> bool {
        self.shared
            .cancel
            .borrow()
            .as_ref()
            .is_some_and(|tx| !tx.is_canceled())
    }

    /// A positioning or send is in flight.
    pub fn is_sending(&self) -> bool {
        self.shared.sending.get()
    }

    /// Start reporting. Returns the driver future to spawn, or `None` when
    /// already armed.
    pub fn arm(&self) -> Option<LocalBoxFuture<'static, ()>> {
        if self.is_armed() {
            tracing::debug!("reporter already armed");
            return None;
        }

        let generation = self.shared.generation.get() + 1;
        self.shared.generation.set(generation);
        self.shared.sending.set(false);

        let (cancel_tx, cancel_rx) = oneshot::channel::<()>();
        *self.shared.cancel.borrow_mut() = Some(cancel_tx);

        tracing::info!(
            interval_secs = self.settings.interval.as_secs(),
            "location reporting armed"
        );
        let driver = self.clone().drive(generation);
        Some(
            async move {
                let driver = pin!(driver);
                // Resolves when disarm() drops the sender
                let _ = select(driver, cancel_rx).await;
            }
            .boxed_local(),
        )
    }

    /// Stop reporting. Safe to call when idle.
    pub fn disarm(&self) {
        let was_armed = self.shared.cancel.borrow_mut().take().is_some();
        self.shared
            .generation
            .set(self.shared.generation.get() + 1);
        self.shared.sending.set(false);
        if was_armed {
            tracing::info!("location reporting disarmed");
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        self.shared.generation.get() == generation
    }

    fn emit(&self, generation: u64, status: ReportStatus) {
        if !self.is_current(generation) {
            return;
        }
        let callback = self.shared.on_status.borrow().clone();
        if let Some(callback) = callback {
            callback(status);
        }
    }

    async fn drive(self, generation: u64) {
        let interval = self.settings.interval;
        let mut running: Option<LocalBoxFuture<'static, ()>> =
            Some(self.clone().cycle(generation).boxed_local());
        let mut tick = timer::sleep(interval).boxed_local();

        loop {
            match running.take() {
                Some(cycle) => match select(cycle, tick).await {
                    Either::Left(((), pending_tick)) => tick = pending_tick,
                    Either::Right(((), still_running)) => {
                        tracing::debug!("previous cycle still running, skipping tick");
                        self.emit(generation, ReportStatus::Skipped);
                        running = Some(still_running);
                        tick = timer::sleep(interval).boxed_local();
                    }
                },
                None => {
                    tick.await;
                    running = Some(self.clone().cycle(generation).boxed_local());
                    tick = timer::sleep(interval).boxed_local();
                }
            }
        }
    }

    async fn cycle(self, generation: u64) {
        if !self.is_current(generation) {
            return;
        }
        self.shared.sending.set(true);
        self.emit(generation, ReportStatus::CycleStarted);

        let outcome = match locate(self.positioner.as_ref(), self.settings.position).await {
            Err(e) => ReportStatus::PositionFailed(e),
            Ok(coords) => {
                let sample = LocationSample::now(coords);
                match self.sink.report_location(&sample).await {
                    Ok(()) => ReportStatus::Sent(sample),
                    Err(e) => ReportStatus::SendFailed(e.to_string()),
                }
            }
        };

        if !self.is_current(generation) {
            return;
        }
        match &outcome {
            ReportStatus::Sent(_) => tracing::debug!("location sent"),
            ReportStatus::PositionFailed(e) => tracing::warn!("positioning failed: {e}"),
            ReportStatus::SendFailed(e) => tracing::warn!("location send failed: {e}"),
            _ => {}
        }
        self.shared.sending.set(false);
        self.emit(generation, outcome);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::location::{Coordinates, FixedPositioner, UnavailablePositioner};
    use tokio::task::{spawn_local, LocalSet};
    use tokio::time::sleep;

    /// Records sends; each send takes `delay` and tracks concurrency.
    #[derive(Default)]
    pub(crate) struct RecordingSink {
        pub delay: Duration,
        pub fail: bool,
        pub started: Cell<u32>,
        pub completed: Cell<u32>,
        pub in_flight: Cell<u32>,
        pub max_in_flight: Cell<u32>,
    }

    impl RecordingSink {
        pub fn slow(delay: Duration) -> Self {
            Self {
                delay,
                ..Self::default()
            }
        }
    }

    impl LocationSink for RecordingSink {
        type Error = String;

        async fn report_location(&self, _: &LocationSample) -> Result<(), String> {
            self.started.set(self.started.get() + 1);
            self.in_flight.set(self.in_flight.get() + 1);
            self.max_in_flight
                .set(self.max_in_flight.get().max(self.in_flight.get()));
            if !self.delay.is_zero() {
                sleep(self.delay).await;
            }
            self.in_flight.set(self.in_flight.get() - 1);
            self.completed.set(self.completed.get() + 1);
            if self.fail {
                Err("502 Bad Gateway".to_string())
            } else {
                Ok(())
            }
        }
    }

    pub(crate) fn settings() -> ReporterSettings {
        ReporterSettings::from_config(&LocationConfig::default())
    }

    fn here() -> Rc<FixedPositioner> {
        Rc::new(FixedPositioner(Coordinates::new(-17.78, -63.18)))
    }

    fn record_statuses<P, S>(reporter: &LocationReporter<P, S>) -> Rc<RefCell<Vec<ReportStatus>>>
    where
        P: Positioner + 'static,
        S: LocationSink + 'static,
    {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        reporter.on_status(move |s| sink.borrow_mut().push(s));
        log
    }

    #[tokio::test(start_paused = true)]
    async fn test_arm_sends_immediately_then_every_interval() {
        LocalSet::new()
            .run_until(async {
                let sink = Rc::new(RecordingSink::default());
                let reporter = LocationReporter::new(here(), sink.clone(), settings());

                spawn_local(reporter.arm().unwrap());
                sleep(Duration::from_secs(1)).await;
                assert_eq!(sink.completed.get(), 1);
                assert!(reporter.is_armed());

                sleep(Duration::from_secs(180)).await;
                assert_eq!(sink.completed.get(), 2);
                sleep(Duration::from_secs(180)).await;
                assert_eq!(sink.completed.get(), 3);

                reporter.disarm();
                sleep(Duration::from_secs(1000)).await;
                assert_eq!(sink.completed.get(), 3);
                assert!(!reporter.is_armed());
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_arming_twice_does_not_duplicate_timer() {
        LocalSet::new()
            .run_until(async {
                let sink = Rc::new(RecordingSink::default());
                let reporter = LocationReporter::new(here(), sink.clone(), settings());

                spawn_local(reporter.arm().unwrap());
                assert!(reporter.arm().is_none());

                reporter.disarm();
                spawn_local(reporter.arm().unwrap());

                sleep(Duration::from_secs(1)).await;
                // The first driver was cancelled before it ever ran
                assert_eq!(sink.completed.get(), 1);

                sleep(Duration::from_secs(180)).await;
                assert_eq!(sink.completed.get(), 2);
                reporter.disarm();
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearm_after_disarm_keeps_single_timer() {
        LocalSet::new()
            .run_until(async {
                let sink = Rc::new(RecordingSink::default());
                let reporter = LocationReporter::new(here(), sink.clone(), settings());

                spawn_local(reporter.arm().unwrap());
                sleep(Duration::from_secs(1)).await;
                reporter.disarm();
                spawn_local(reporter.arm().unwrap());
                sleep(Duration::from_secs(1)).await;
                assert_eq!(sink.completed.get(), 2);

                // Only the second driver's timer fires (at t = 181)
                sleep(Duration::from_secs(180)).await;
                assert_eq!(sink.completed.get(), 3);
                reporter.disarm();
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_cycle_skips_tick() {
        LocalSet::new()
            .run_until(async {
                let sink = Rc::new(RecordingSink::slow(Duration::from_secs(200)));
                let reporter = LocationReporter::new(here(), sink.clone(), settings());
                let log = record_statuses(&reporter);

                spawn_local(reporter.arm().unwrap());
                sleep(Duration::from_secs(1)).await;
                assert!(reporter.is_sending());

                // Tick at 180 lands while the first send is still running
                sleep(Duration::from_secs(189)).await;
                assert_eq!(sink.started.get(), 1);
                assert!(log.borrow().contains(&ReportStatus::Skipped));

                // First send done at 200, next cycle starts on the 360 tick
                sleep(Duration::from_secs(20)).await;
                assert_eq!(sink.completed.get(), 1);
                assert!(!reporter.is_sending());
                sleep(Duration::from_secs(160)).await;
                assert_eq!(sink.started.get(), 2);
                assert_eq!(sink.max_in_flight.get(), 1);
                reporter.disarm();
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_disarm_mid_cycle_suppresses_late_completion() {
        LocalSet::new()
            .run_until(async {
                let sink = Rc::new(RecordingSink::slow(Duration::from_secs(30)));
                let reporter = LocationReporter::new(here(), sink.clone(), settings());
                let before = record_statuses(&reporter);

                spawn_local(reporter.arm().unwrap());
                sleep(Duration::from_secs(1)).await;
                assert!(reporter.is_sending());
                assert_eq!(*before.borrow(), vec![ReportStatus::CycleStarted]);

                reporter.disarm();
                assert!(!reporter.is_sending());
                let after = record_statuses(&reporter);

                // Let the send's would-be completion time pass
                sleep(Duration::from_secs(100)).await;
                assert_eq!(sink.completed.get(), 0);
                assert!(!reporter.is_sending());
                assert_eq!(before.borrow().len(), 1);
                assert!(after.borrow().is_empty());
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_failures_are_reported_and_timer_continues() {
        LocalSet::new()
            .run_until(async {
                let sink = Rc::new(RecordingSink::default());
                let reporter =
                    LocationReporter::new(Rc::new(UnavailablePositioner), sink.clone(), settings());
                let log = record_statuses(&reporter);

                spawn_local(reporter.arm().unwrap());
                sleep(Duration::from_secs(181)).await;

                let failures = log
                    .borrow()
                    .iter()
                    .filter(|s| matches!(s, ReportStatus::PositionFailed(_)))
                    .count();
                assert_eq!(failures, 2);
                assert_eq!(sink.started.get(), 0);
                assert!(reporter.is_armed());
                reporter.disarm();

                let failing = Rc::new(RecordingSink {
                    fail: true,
                    ..RecordingSink::default()
                });
                let reporter = LocationReporter::new(here(), failing, settings());
                let log = record_statuses(&reporter);
                spawn_local(reporter.arm().unwrap());
                sleep(Duration::from_secs(1)).await;
                assert_eq!(
                    log.borrow().last(),
                    Some(&ReportStatus::SendFailed("502 Bad Gateway".to_string()))
                );
                reporter.disarm();
            })
            .await;
    }
}
