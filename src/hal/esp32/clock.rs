//! ESP32 wall clock implementation over the system time.
//!
//! Reads `gettimeofday()`, which SNTP keeps synchronized once the network
//! bootstrap has run. Until then the system clock sits near the Unix
//! epoch, so readings from before 2020 are reported as "not synced" rather
//! than handed to the scheduler as a bogus date.

use crate::civil::CivilDateTime;
use crate::traits::WallClock;

/// Plausibility floor for a synced clock (2020-01-01 00:00:00 UTC).
const EPOCH_2020: i64 = 1_577_836_800;

/// ESP32 wall clock backed by the SNTP-synchronized system time.
///
/// # Example
///
/// ```ignore
/// use rs_feedz::hal::esp32::Esp32WallClock;
/// use rs_feedz::traits::WallClock;
///
/// let mut clock = Esp32WallClock::new();
/// if let Some(utc) = clock.now_utc() {
///     println!("UTC now: {}", utc);
/// }
/// ```
pub struct Esp32WallClock;

impl Esp32WallClock {
    /// Creates a new wall clock instance.
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl Default for Esp32WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl WallClock for Esp32WallClock {
    fn now_utc(&mut self) -> Option<CivilDateTime> {
        let mut tv = esp_idf_hal::sys::timeval {
            tv_sec: 0,
            tv_usec: 0,
        };
        // Safe: plain read of the system clock into a local struct
        if unsafe { esp_idf_hal::sys::gettimeofday(&mut tv, core::ptr::null_mut()) } != 0 {
            return None;
        }

        let secs = tv.tv_sec as i64;
        if secs < EPOCH_2020 {
            return None;
        }

        Some(CivilDateTime::from_unix_secs(secs))
    }
}
