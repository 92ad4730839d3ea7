//! Fetch timing utilities
//!
//! Pure functions that can be tested without threads.

use crate::models::{FETCH_INTERVAL_STEP_MS, MAX_FETCH_INTERVAL_MS, MIN_FETCH_INTERVAL_MS};

/// Clamp a fetch interval to the supported range and round it down to
/// the interval step
pub fn clamp_fetch_interval(interval_ms: u64) -> u64 {
    let clamped = interval_ms.clamp(MIN_FETCH_INTERVAL_MS, MAX_FETCH_INTERVAL_MS);
    clamped - clamped % FETCH_INTERVAL_STEP_MS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_fetch_interval_bounds() {
        assert_eq!(clamp_fetch_interval(0), MIN_FETCH_INTERVAL_MS);
        assert_eq!(clamp_fetch_interval(10_000_000_000), MAX_FETCH_INTERVAL_MS);
        assert_eq!(clamp_fetch_interval(120_000), 120_000);
    }

    #[test]
    fn test_clamp_fetch_interval_rounds_to_step() {
        assert_eq!(clamp_fetch_interval(90_500), 60_000);
        assert_eq!(clamp_fetch_interval(120_001), 120_000);
    }
}
