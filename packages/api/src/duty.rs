//! Walker duty: the availability flag and the location reporter it drives.
//!
//! [`DutyController`] lives at the application root, not in a view, so
//! reporting keeps running while the walker navigates and stops on logout no
//! matter which screen is showing. It is the only writer of the persisted
//! availability flag, and writes it only after the backend accepted the
//! change.

use std::fmt;
use std::future::Future;
use std::rc::Rc;

use futures::future::LocalBoxFuture;
use store::{KeyValueStore, Role, SessionError, SessionStore};

use crate::location::Positioner;
use crate::reporter::{LocationReporter, LocationSink, ReportStatus, ReporterSettings};

/// Backend side of the availability toggle.
pub trait AvailabilityApi {
    type Error: fmt::Display;

    fn update_availability(&self, available: bool) -> impl Future<Output = Result<(), Self::Error>>;
}

/// Puts the reporter's driver future on an executor.
pub type Spawner = Rc<dyn Fn(LocalBoxFuture<'static, ()>)>;

#[derive(Debug, thiserror::Error)]
pub enum DutyError {
    #[error("only a signed-in walker can change availability")]
    NotWalker,
    #[error("could not update availability: {0}")]
    Api(String),
    #[error(transparent)]
    Session(#[from] SessionError),
}

pub struct DutyController<K, P, C> {
    sessions: SessionStore<K>,
    api: Rc<C>,
    reporter: LocationReporter<P, C>,
    spawner: Spawner,
}

impl<K: Clone, P, C> Clone for DutyController<K, P, C> {
    fn clone(&self) -> Self {
        Self {
            sessions: self.sessions.clone(),
            api: self.api.clone(),
            reporter: self.reporter.clone(),
            spawner: self.spawner.clone(),
        }
    }
}

impl<K, P, C> DutyController<K, P, C>
where
    K: KeyValueStore + Clone + 'static,
    P: Positioner + 'static,
    C: AvailabilityApi + LocationSink + 'static,
{
    /// Build the controller and tie the reporter to the session: reporting
    /// stops as soon as the session is no longer an available walker. Every
    /// login clears the flag, so a walker who signs in again starts off duty.
    pub fn new(
        sessions: SessionStore<K>,
        positioner: Rc<P>,
        api: Rc<C>,
        settings: ReporterSettings,
        spawner: Spawner,
    ) -> Self {
        let reporter = LocationReporter::new(positioner, api.clone(), settings);

        let watcher = reporter.clone();
        let flag = sessions.clone();
        sessions.subscribe(move |session| {
            if session.map(|s| s.role) != Some(Role::Walker) || !flag.is_available() {
                watcher.disarm();
            }
        });

        Self {
            sessions,
            api,
            reporter,
            spawner,
        }
    }

    pub fn is_available(&self) -> bool {
        self.sessions.is_available()
    }

    pub fn is_reporting(&self) -> bool {
        self.reporter.is_armed()
    }

    pub fn is_sending(&self) -> bool {
        self.reporter.is_sending()
    }

    pub fn on_status(&self, callback: impl Fn(ReportStatus) + 'static) {
        self.reporter.on_status(callback);
    }

    /// Toggle availability. The backend is told first; the flag and the
    /// reporter change only if it agreed.
    pub async fn set_available(&self, desired: bool) -> Result<(), DutyError> {
        if self.sessions.role() != Some(Role::Walker) {
            return Err(DutyError::NotWalker);
        }

        self.api
            .update_availability(desired)
            .await
            .map_err(|e| DutyError::Api(e.to_string()))?;

        // The walker may have logged out while the call was in flight
        if self.sessions.role() != Some(Role::Walker) {
            return Err(DutyError::NotWalker);
        }
        self.sessions.set_available(desired)?;
        tracing::info!(available = desired, "walker availability updated");

        if desired {
            self.arm();
        } else {
            self.reporter.disarm();
        }
        Ok(())
    }

    /// Resume reporting after a reload if the walker was on duty.
    pub fn resume(&self) -> bool {
        if self.sessions.role() == Some(Role::Walker) && self.sessions.is_available() {
            tracing::info!("resuming location reporting");
            self.arm();
            true
        } else {
            false
        }
    }

    /// Stop reporting without touching the persisted flag.
    pub fn release(&self) {
        self.reporter.disarm();
    }

    fn arm(&self) {
        if let Some(driver) = self.reporter.arm() {
            (self.spawner)(driver);
        }
    }
}
