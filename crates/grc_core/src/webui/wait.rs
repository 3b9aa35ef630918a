//! Bounded polling.

use crate::webui::driver::DriverResult;
use crate::webui::error::{WebUiError, WebUiResult};
use log::{debug, warn};
use std::thread;
use std::time::{Duration, Instant};

/// Polls `condition` until it holds or `timeout` elapses.
///
/// The condition is evaluated at least once. A driver error from the
/// condition aborts the wait immediately.
pub fn wait_for<F>(what: &str, timeout: Duration, poll: Duration, mut condition: F) -> WebUiResult<()>
where
    F: FnMut() -> DriverResult<bool>,
{
    let started = Instant::now();
    loop {
        if condition()? {
            debug!(
                "event=webui_wait module=webui status=ok what={what} elapsed_ms={}",
                started.elapsed().as_millis()
            );
            return Ok(());
        }
        let elapsed = started.elapsed();
        if elapsed >= timeout {
            warn!(
                "event=webui_wait module=webui status=error what={what} elapsed_ms={}",
                elapsed.as_millis()
            );
            return Err(WebUiError::Timeout {
                what: what.to_string(),
                waited: timeout,
            });
        }
        thread::sleep(poll.min(timeout - elapsed));
    }
}
