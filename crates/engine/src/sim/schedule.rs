use std::time::Duration;

use crate::config::TickConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepPlan {
    pub ticks_to_run: u32,
    pub remaining_accumulator: Duration,
    pub dropped_backlog: Duration,
}

pub fn plan_sim_steps(
    mut accumulator: Duration,
    fixed_dt: Duration,
    max_ticks_per_frame: u32,
) -> StepPlan {
    let mut ticks_to_run = 0u32;

    while accumulator >= fixed_dt && ticks_to_run < max_ticks_per_frame {
        accumulator = accumulator.saturating_sub(fixed_dt);
        ticks_to_run = ticks_to_run.saturating_add(1);
    }

    if accumulator >= fixed_dt {
        StepPlan {
            ticks_to_run,
            remaining_accumulator: Duration::ZERO,
            dropped_backlog: accumulator,
        }
    } else {
        StepPlan {
            ticks_to_run,
            remaining_accumulator: accumulator,
            dropped_backlog: Duration::ZERO,
        }
    }
}

/// Two independent fixed-rate schedules fed from the same frame deltas: the
/// movement tick (capped per frame) and the countdown tick (never capped).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickScheduler {
    movement_dt: Duration,
    countdown_interval: Duration,
    max_movement_ticks: u32,
    movement_accumulator: Duration,
    countdown_accumulator: Duration,
}

impl TickScheduler {
    pub fn from_config(config: &TickConfig) -> Self {
        Self {
            movement_dt: config.movement_dt(),
            countdown_interval: config.countdown_interval(),
            max_movement_ticks: config.max_movement_ticks_per_frame(),
            movement_accumulator: Duration::ZERO,
            countdown_accumulator: Duration::ZERO,
        }
    }

    pub fn plan_movement(&mut self, dt: Duration) -> StepPlan {
        let accumulator = self.movement_accumulator.saturating_add(dt);
        let plan = plan_sim_steps(accumulator, self.movement_dt, self.max_movement_ticks);
        self.movement_accumulator = plan.remaining_accumulator;
        plan
    }

    /// Number of countdown intervals completed by `active_dt`. Only time the
    /// clock was running should be fed here.
    pub fn countdown_ticks(&mut self, active_dt: Duration) -> u32 {
        let mut ticks = 0u32;
        self.countdown_accumulator = self.countdown_accumulator.saturating_add(active_dt);
        while self.countdown_accumulator >= self.countdown_interval {
            self.countdown_accumulator = self
                .countdown_accumulator
                .saturating_sub(self.countdown_interval);
            ticks = ticks.saturating_add(1);
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduler() -> TickScheduler {
        TickScheduler::from_config(&TickConfig {
            movement_tps: 50,
            countdown_interval_ms: 1000,
            max_frame_delta_ms: 250,
            max_movement_ticks_per_frame: 5,
        })
    }

    #[test]
    fn plan_sim_steps_runs_expected_ticks_without_drop() {
        let fixed_dt = Duration::from_millis(16);
        let result = plan_sim_steps(Duration::from_millis(48), fixed_dt, 5);

        assert_eq!(result.ticks_to_run, 3);
        assert_eq!(result.remaining_accumulator, Duration::ZERO);
        assert_eq!(result.dropped_backlog, Duration::ZERO);
    }

    #[test]
    fn plan_sim_steps_drops_backlog_when_tick_cap_hit() {
        let fixed_dt = Duration::from_millis(16);
        let result = plan_sim_steps(Duration::from_millis(120), fixed_dt, 3);

        assert_eq!(result.ticks_to_run, 3);
        assert_eq!(result.remaining_accumulator, Duration::ZERO);
        assert_eq!(result.dropped_backlog, Duration::from_millis(72));
    }

    #[test]
    fn movement_remainder_carries_between_frames() {
        let mut scheduler = scheduler();
        assert_eq!(scheduler.plan_movement(Duration::from_millis(30)).ticks_to_run, 1);
        assert_eq!(scheduler.plan_movement(Duration::from_millis(10)).ticks_to_run, 1);
        assert_eq!(scheduler.plan_movement(Duration::from_millis(10)).ticks_to_run, 0);
    }

    #[test]
    fn countdown_is_never_capped() {
        let mut scheduler = scheduler();
        assert_eq!(scheduler.countdown_ticks(Duration::from_millis(999)), 0);
        assert_eq!(scheduler.countdown_ticks(Duration::from_millis(1)), 1);
        assert_eq!(scheduler.countdown_ticks(Duration::from_secs(12)), 12);
    }
}
