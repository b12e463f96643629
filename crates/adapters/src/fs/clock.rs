use std::time::{SystemTime, UNIX_EPOCH};

use boardkit_application::Clock;

/// Stamps imported images with milliseconds since the Unix epoch.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_timestamp_string(&self) -> String {
        epoch_millis(SystemTime::now()).to_string()
    }
}

/// Instants before the epoch collapse to zero.
fn epoch_millis(at: SystemTime) -> u128 {
    at.duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or(0)
}
