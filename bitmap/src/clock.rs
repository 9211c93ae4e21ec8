//! Monotonic clock readings
//!
//! Readings come from `CLOCK_MONOTONIC` on unix, so they never go backwards
//! and ignore wall-clock adjustments. The epoch is arbitrary: only differences
//! between readings are meaningful.

/// Milliseconds since an arbitrary fixed point
pub fn monotonic_millis() -> u64 {
    let (secs, nanos) = monotonic_parts();
    secs.saturating_mul(1000)
        .saturating_add(u64::from(nanos / 1_000_000))
}

/// Seconds since an arbitrary fixed point, with sub-second precision
pub fn monotonic_secs() -> f64 {
    let (secs, nanos) = monotonic_parts();
    secs as f64 + f64::from(nanos) / 1e9
}

/// Milliseconds elapsed since an earlier [`monotonic_millis`] reading
pub fn elapsed_millis(since: u64) -> u64 {
    monotonic_millis().saturating_sub(since)
}

#[cfg(unix)]
fn monotonic_parts() -> (u64, u32) {
    let mut ts = libc::timespec {
        tv_sec: 0,
        tv_nsec: 0,
    };

    // SAFETY: ts is a valid, writable timespec for the duration of the call
    let rc = unsafe { libc::clock_gettime(libc::CLOCK_MONOTONIC, &mut ts) };

    // CLOCK_MONOTONIC is mandatory on every supported unix; a zeroed reading
    // would break ordering, so failure is fatal
    assert!(
        rc == 0,
        "clock_gettime(CLOCK_MONOTONIC) failed: {}",
        std::io::Error::last_os_error()
    );

    (ts.tv_sec.max(0) as u64, ts.tv_nsec.clamp(0, 999_999_999) as u32)
}

#[cfg(not(unix))]
fn monotonic_parts() -> (u64, u32) {
    use std::sync::OnceLock;
    use std::time::Instant;

    static ANCHOR: OnceLock<Instant> = OnceLock::new();

    let elapsed = ANCHOR.get_or_init(Instant::now).elapsed();
    (elapsed.as_secs(), elapsed.subsec_nanos())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monotonic_millis_never_decreases() {
        let mut last = monotonic_millis();
        for _ in 0..1000 {
            let now = monotonic_millis();
            assert!(now >= last, "clock went backwards: {now} < {last}");
            last = now;
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_unix_reading_is_populated() {
        // The clock counts from boot, so a real reading is never all zeros
        let (secs, nanos) = monotonic_parts();
        assert!(secs > 0 || nanos > 0);
        assert!(nanos < 1_000_000_000);
    }

    #[test]
    fn test_elapsed_millis() {
        let start = monotonic_millis();
        std::thread::sleep(std::time::Duration::from_millis(20));
        let elapsed = elapsed_millis(start);
        assert!(elapsed >= 20, "elapsed {elapsed}ms");

        // A reading from the future saturates instead of wrapping
        assert_eq!(elapsed_millis(u64::MAX), 0);
    }

    #[test]
    fn test_secs_and_millis_agree() {
        let millis = monotonic_millis();
        let secs = monotonic_secs();
        assert!(secs * 1000.0 + 1.0 >= millis as f64);
    }
}
