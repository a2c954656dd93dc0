//! Platform timers: `gloo-timers` in the browser, `tokio::time` natively.

use std::future::Future;
use std::pin::pin;
use std::time::Duration;

use futures::future::{select, Either};

pub async fn sleep(duration: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}

/// The wrapped future did not finish in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("timed out after {0:?}")]
pub struct Elapsed(pub Duration);

/// Race `future` against a timer. The loser is dropped.
pub async fn with_timeout<F: Future>(duration: Duration, future: F) -> Result<F::Output, Elapsed> {
    let future = pin!(future);
    let timer = pin!(sleep(duration));
    match select(future, timer).await {
        Either::Left((output, _)) => Ok(output),
        Either::Right(_) => Err(Elapsed(duration)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_fast_future_wins() {
        let out = with_timeout(Duration::from_secs(10), async { 7 }).await;
        assert_eq!(out, Ok(7));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_future_times_out() {
        let slow = async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            7
        };
        let out = with_timeout(Duration::from_secs(10), slow).await;
        assert_eq!(out, Err(Elapsed(Duration::from_secs(10))));
    }
}
