// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host clock reads.

use rustix::time::{ClockId, Timespec, clock_gettime};
use tether_core::time::{HostTime, Timebase};

const NANOS_PER_SECOND: u128 = 1_000_000_000;

/// Returns the host [`Timebase`]: ticks are nanoseconds.
#[must_use]
pub const fn timebase() -> Timebase {
    Timebase::NANOS
}

/// Returns the current `CLOCK_MONOTONIC` time in nanoseconds.
#[must_use]
pub fn now() -> HostTime {
    timespec_to_host_time(clock_gettime(ClockId::Monotonic))
}

fn timespec_to_host_time(timespec: Timespec) -> HostTime {
    let seconds = u64::try_from(timespec.tv_sec).unwrap_or(0);
    let nanos = u64::try_from(timespec.tv_nsec)
        .unwrap_or(0)
        .min(999_999_999);

    let ticks = u128::from(seconds)
        .saturating_mul(NANOS_PER_SECOND)
        .saturating_add(u128::from(nanos));
    HostTime(u64::try_from(ticks).unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_does_not_go_backwards() {
        let first = now();
        let second = now();
        assert!(second >= first, "monotonic clock went backwards");
    }

    #[test]
    fn timespec_is_converted_to_nanoseconds() {
        let ts = Timespec {
            tv_sec: 3,
            tv_nsec: 250,
        };
        assert_eq!(timespec_to_host_time(ts), HostTime(3_000_000_250));
    }

    #[test]
    fn negative_seconds_clamp_to_zero() {
        let ts = Timespec {
            tv_sec: -1,
            tv_nsec: 5,
        };
        assert_eq!(timespec_to_host_time(ts), HostTime(5));
    }
}
