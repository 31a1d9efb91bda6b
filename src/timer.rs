use std::time::{Duration, Instant};

/// how often the timer interrupt line fires
const TIMER_PERIOD: Duration = Duration::from_secs(1);

/// Source of periodic timer ticks for the interrupt controller. The
/// dispatcher polls this once per loop iteration; it is not preemptive.
pub trait Clock {
    /// true when a full timer period has elapsed since the last tick
    fn tick_elapsed(&mut self) -> bool;
}

/// the real thing: wall-clock time, re-armed each time it fires so the
/// tick is periodic rather than one-shot
pub struct WallClock {
    last_tick: Instant,
}

impl WallClock {
    pub fn new() -> Self {
        WallClock {
            last_tick: Instant::now(),
        }
    }
}

impl Clock for WallClock {
    fn tick_elapsed(&mut self) -> bool {
        if self.last_tick.elapsed() >= TIMER_PERIOD {
            // keep the cadence anchored to machine start, not to
            // whenever we happened to poll
            self.last_tick += TIMER_PERIOD;
            true
        } else {
            false
        }
    }
}

/// test double: ticks exactly when told to
pub struct ManualClock {
    pending: u32,
}

impl ManualClock {
    pub fn new() -> Self {
        ManualClock { pending: 0 }
    }

    /// queue up one tick for the next poll
    pub fn fire(&mut self) {
        self.pending += 1;
    }
}

impl Clock for ManualClock {
    fn tick_elapsed(&mut self) -> bool {
        if self.pending > 0 {
            self.pending -= 1;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_fires_once_per_arm() {
        let mut c = ManualClock::new();
        assert!(!c.tick_elapsed());
        c.fire();
        assert!(c.tick_elapsed());
        assert!(!c.tick_elapsed());
    }

    #[test]
    fn test_wall_clock_quiet_at_start() {
        let mut c = WallClock::new();
        assert!(!c.tick_elapsed());
    }
}
