//! Fixed-interval cadence bookkeeping for the tick and boss-timer drivers.

use super::constants::{TICK_INTERVAL_MS, TIMER_INTERVAL_MS};

/// Work released by one call to [`Scheduler::advance`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DueWork {
    pub ticks: u32,
    pub timer_steps: u32,
}

/// Accumulates elapsed time into whole ticks and whole timer seconds.
/// Remainders carry over, so no time is lost between calls.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    tick_accumulator_ms: u64,
    timer_accumulator_ms: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, elapsed_ms: u64) -> DueWork {
        self.tick_accumulator_ms += elapsed_ms;
        self.timer_accumulator_ms += elapsed_ms;

        let ticks = self.tick_accumulator_ms / TICK_INTERVAL_MS;
        self.tick_accumulator_ms %= TICK_INTERVAL_MS;
        let timer_steps = self.timer_accumulator_ms / TIMER_INTERVAL_MS;
        self.timer_accumulator_ms %= TIMER_INTERVAL_MS;

        DueWork {
            ticks: ticks as u32,
            timer_steps: timer_steps as u32,
        }
    }

    /// Forgets partial intervals (used when the simulation is paused).
    pub fn reset(&mut self) {
        self.tick_accumulator_ms = 0;
        self.timer_accumulator_ms = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_second_releases_ten_ticks_and_one_step() {
        let mut scheduler = Scheduler::new();
        assert_eq!(
            scheduler.advance(1000),
            DueWork {
                ticks: 10,
                timer_steps: 1
            }
        );
    }

    #[test]
    fn test_remainders_carry_over() {
        let mut scheduler = Scheduler::new();
        assert_eq!(scheduler.advance(150).ticks, 1);
        assert_eq!(scheduler.advance(50).ticks, 1);
        assert_eq!(scheduler.advance(799).timer_steps, 0);
        assert_eq!(scheduler.advance(1).timer_steps, 1);
    }

    #[test]
    fn test_reset_drops_partial_time() {
        let mut scheduler = Scheduler::new();
        scheduler.advance(90);
        scheduler.reset();
        assert_eq!(scheduler.advance(10).ticks, 0);
    }
}
