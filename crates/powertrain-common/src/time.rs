//! ---
//! pt_section: "01-core-functionality"
//! pt_subsection: "module"
//! pt_type: "source"
//! pt_scope: "code"
//! pt_description: "Shared primitives and utilities for the assembly-line runtime."
//! pt_version: "v0.1.0"
//! pt_owner: "tbd"
//! ---
use std::time::{Duration, Instant};

/// Capture an instant suitable for elapsed-time comparisons.
pub fn monotonic_now() -> Instant {
    Instant::now()
}

/// Convert a duration into microseconds, saturating at `u64::MAX`.
pub fn duration_to_micros(duration: Duration) -> u64 {
    duration
        .as_secs()
        .saturating_mul(1_000_000)
        .saturating_add(u64::from(duration.subsec_micros()))
}

/// Scale a base delay by `factor`, clamping negative factors to zero.
pub fn scale_delay(base: Duration, factor: f64) -> Duration {
    if factor <= 0.0 || !factor.is_finite() {
        return Duration::ZERO;
    }
    base.mul_f64(factor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn micros_saturate() {
        assert_eq!(duration_to_micros(Duration::from_millis(3)), 3_000);
        assert_eq!(duration_to_micros(Duration::MAX), u64::MAX);
    }

    #[test]
    fn scale_delay_clamps() {
        let base = Duration::from_millis(10);
        assert_eq!(scale_delay(base, 0.5), Duration::from_millis(5));
        assert_eq!(scale_delay(base, -1.0), Duration::ZERO);
        assert_eq!(scale_delay(base, f64::NAN), Duration::ZERO);
    }

    #[test]
    fn monotonic_now_never_goes_backwards() {
        let first = monotonic_now();
        let second = monotonic_now();
        assert!(second >= first);
    }
}
