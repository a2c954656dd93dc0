//! Device positioning.
//!
//! [`Positioner`] abstracts "where am I": the browser Geolocation API on the
//! web build, a fixed point on native builds and in tests.

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use store::LocationConfig;

use crate::timer::with_timeout;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// One position fix, consumed immediately by a single send.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationSample {
    pub coords: Coordinates,
    pub captured_at: DateTime<Utc>,
}

impl LocationSample {
    pub fn now(coords: Coordinates) -> Self {
        Self {
            coords,
            captured_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionRequest {
    pub timeout: Duration,
    pub high_accuracy: bool,
}

impl PositionRequest {
    /// Settings for the walker's periodic report.
    pub fn for_reporting(config: &LocationConfig) -> Self {
        Self {
            timeout: config.positioning_timeout(),
            high_accuracy: config.high_accuracy,
        }
    }

    /// Settings for the owner's one-off "walkers near me" search.
    pub fn for_nearby(config: &LocationConfig) -> Self {
        Self {
            timeout: config.nearby_positioning_timeout(),
            high_accuracy: config.high_accuracy,
        }
    }

    /// Deadline in the whole milliseconds geolocation options take.
    pub fn timeout_millis(&self) -> u32 {
        u32::try_from(self.timeout.as_millis()).unwrap_or(u32::MAX)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    #[error("location permission was denied")]
    PermissionDenied,
    #[error("location is unavailable: {0}")]
    Unavailable(String),
    #[error("timed out waiting for a location fix")]
    Timeout,
}

pub trait Positioner {
    fn current_position(
        &self,
        request: PositionRequest,
    ) -> impl Future<Output = Result<Coordinates, PositionError>>;
}

/// Always answers with the same point.
#[derive(Debug, Clone, Copy)]
pub struct FixedPositioner(pub Coordinates);

impl Positioner for FixedPositioner {
    async fn current_position(&self, _: PositionRequest) -> Result<Coordinates, PositionError> {
        Ok(self.0)
    }
}

/// A device without positioning.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailablePositioner;

impl Positioner for UnavailablePositioner {
    async fn current_position(&self, _: PositionRequest) -> Result<Coordinates, PositionError> {
        Err(PositionError::Unavailable("no positioning on this device".into()))
    }
}

/// Ask for a fix within the request's deadline.
pub async fn locate<P: Positioner>(
    positioner: &P,
    request: PositionRequest,
) -> Result<Coordinates, PositionError> {
    match with_timeout(request.timeout, positioner.current_position(request)).await {
        Ok(result) => result,
        Err(_) => Err(PositionError::Timeout),
    }
}

/// Like [`locate`], but fall back to `fallback` on any failure. The error is
/// returned alongside so the caller can tell the user.
pub async fn locate_or<P: Positioner>(
    positioner: &P,
    request: PositionRequest,
    fallback: Coordinates,
) -> (Coordinates, Option<PositionError>) {
    match locate(positioner, request).await {
        Ok(coords) => (coords, None),
        Err(e) => {
            tracing::warn!("positioning failed, using fallback: {e}");
            (fallback, Some(e))
        }
    }
}

pub fn fallback_coordinates(config: &LocationConfig) -> Coordinates {
    Coordinates::new(config.fallback_latitude, config.fallback_longitude)
}

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use browser::BrowserPositioner;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod browser {
    use std::cell::RefCell;
    use std::rc::Rc;

    use futures::channel::oneshot;
    use js_sys::{Function, Reflect};
    use wasm_bindgen::{closure::Closure, JsCast, JsValue};
    use web_sys::PositionOptions;

    use super::{Coordinates, PositionError, PositionRequest, Positioner};

    type Reply = Rc<RefCell<Option<oneshot::Sender<Result<Coordinates, PositionError>>>>>;

    /// `navigator.geolocation.getCurrentPosition`, bridged to a future.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct BrowserPositioner;

    impl Positioner for BrowserPositioner {
        async fn current_position(
            &self,
            request: PositionRequest,
        ) -> Result<Coordinates, PositionError> {
            let geolocation = web_sys::window()
                .ok_or_else(|| PositionError::Unavailable("no window".into()))?
                .navigator()
                .geolocation()
                .map_err(|_| PositionError::Unavailable("geolocation not supported".into()))?;

            let (tx, rx) = oneshot::channel();
            let reply: Reply = Rc::new(RefCell::new(Some(tx)));

            let on_success = {
                let reply = reply.clone();
                Closure::once_into_js(move |position: JsValue| {
                    send(&reply, read_coordinates(&position));
                })
            };
            let on_error = {
                let reply = reply.clone();
                Closure::once_into_js(move |error: JsValue| {
                    send(&reply, Err(read_error(&error)));
                })
            };

            let options = PositionOptions::new();
            options.set_enable_high_accuracy(request.high_accuracy);
            options.set_timeout(request.timeout_millis());
            options.set_maximum_age(0);

            geolocation
                .get_current_position_with_error_callback_and_options(
                    on_success.unchecked_ref::<Function>(),
                    Some(on_error.unchecked_ref::<Function>()),
                    &options,
                )
                .map_err(|e| PositionError::Unavailable(format!("{e:?}")))?;

            rx.await
                .unwrap_or_else(|_| Err(PositionError::Unavailable("request dropped".into())))
        }
    }

    fn send(reply: &Reply, result: Result<Coordinates, PositionError>) {
        if let Some(tx) = reply.borrow_mut().take() {
            let _ = tx.send(result);
        }
    }

    fn number(target: &JsValue, key: &str) -> Option<f64> {
        Reflect::get(target, &key.into()).ok()?.as_f64()
    }

    fn read_coordinates(position: &JsValue) -> Result<Coordinates, PositionError> {
        let coords = Reflect::get(position, &"coords".into())
            .map_err(|_| PositionError::Unavailable("position without coords".into()))?;
        match (number(&coords, "latitude"), number(&coords, "longitude")) {
            (Some(lat), Some(lng)) => Ok(Coordinates::new(lat, lng)),
            _ => Err(PositionError::Unavailable("position without coords".into())),
        }
    }

    // GeolocationPositionError codes
    fn read_error(error: &JsValue) -> PositionError {
        match number(error, "code").map(|c| c as u32) {
            Some(1) => PositionError::PermissionDenied,
            Some(3) => PositionError::Timeout,
            _ => {
                let message = Reflect::get(error, &"message".into())
                    .ok()
                    .and_then(|m| m.as_string())
                    .unwrap_or_else(|| "position unavailable".into());
                PositionError::Unavailable(message)
            }
        }
    }
}
