//! Microsecond-precision date primitive
//!
//! `Timestamp` is the date/time shape a store holds natively. It is stored
//! as signed microseconds relative to the Unix epoch
//! (1970-01-01 00:00:00 UTC), so dates before 1970 survive a round trip.
//!
//! ```
//! use prefstore_core::Timestamp;
//!
//! let now = Timestamp::now();
//! let from_secs = Timestamp::from_secs(1000);
//! assert!(now > from_secs);
//! ```

use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Microsecond-precision point in time
///
/// ## Invariants
///
/// - Always in microseconds
/// - Negative values are before the Unix epoch
/// - Totally ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Unix epoch (1970-01-01 00:00:00 UTC)
    pub const EPOCH: Timestamp = Timestamp(0);

    /// Earliest representable timestamp
    pub const MIN: Timestamp = Timestamp(i64::MIN);

    /// Latest representable timestamp
    pub const MAX: Timestamp = Timestamp(i64::MAX);

    // =========================================================================
    // Constructors
    // =========================================================================

    /// Timestamp for the current moment
    ///
    /// A system clock set before the epoch yields a negative timestamp.
    pub fn now() -> Self {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(after) => Timestamp(after.as_micros().min(i64::MAX as u128) as i64),
            Err(before) => {
                let micros = before.duration().as_micros().min(i64::MAX as u128) as i64;
                Timestamp(-micros)
            }
        }
    }

    /// Create a timestamp from microseconds since epoch
    #[inline]
    pub const fn from_micros(micros: i64) -> Self {
        Timestamp(micros)
    }

    /// Create a timestamp from milliseconds since epoch
    #[inline]
    pub const fn from_millis(millis: i64) -> Self {
        Timestamp(millis.saturating_mul(1_000))
    }

    /// Create a timestamp from seconds since epoch
    #[inline]
    pub const fn from_secs(secs: i64) -> Self {
        Timestamp(secs.saturating_mul(1_000_000))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Microseconds since Unix epoch
    #[inline]
    pub const fn as_micros(&self) -> i64 {
        self.0
    }

    /// Milliseconds since Unix epoch (floored)
    #[inline]
    pub const fn as_millis(&self) -> i64 {
        self.0.div_euclid(1_000)
    }

    /// Seconds since Unix epoch (floored)
    #[inline]
    pub const fn as_secs(&self) -> i64 {
        self.0.div_euclid(1_000_000)
    }

    /// Duration since an earlier timestamp
    ///
    /// Returns `None` if `earlier` is actually later than `self`.
    pub fn duration_since(&self, earlier: Timestamp) -> Option<Duration> {
        let delta = self.0.checked_sub(earlier.0)?;
        u64::try_from(delta).ok().map(Duration::from_micros)
    }

    /// Add a duration, saturating at `Timestamp::MAX`
    pub fn saturating_add(&self, duration: Duration) -> Self {
        let micros = duration.as_micros().min(i64::MAX as u128) as i64;
        Timestamp(self.0.saturating_add(micros))
    }

    /// Subtract a duration, saturating at `Timestamp::MIN`
    pub fn saturating_sub(&self, duration: Duration) -> Self {
        let micros = duration.as_micros().min(i64::MAX as u128) as i64;
        Timestamp(self.0.saturating_sub(micros))
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Timestamp::EPOCH
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // "seconds.microseconds", floored so the fraction is never negative
        let secs = self.0.div_euclid(1_000_000);
        let micros = self.0.rem_euclid(1_000_000);
        write!(f, "{}.{:06}", secs, micros)
    }
}

impl From<i64> for Timestamp {
    fn from(micros: i64) -> Self {
        Timestamp::from_micros(micros)
    }
}

impl From<Timestamp> for i64 {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

impl From<SystemTime> for Timestamp {
    fn from(time: SystemTime) -> Self {
        match time.duration_since(UNIX_EPOCH) {
            Ok(after) => Timestamp(after.as_micros().min(i64::MAX as u128) as i64),
            Err(before) => Timestamp(-(before.duration().as_micros().min(i64::MAX as u128) as i64)),
        }
    }
}
