use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_TIME_LIMIT_SECONDS: u32 = 300;
pub const DEFAULT_TOTAL_TASK_COUNT: u32 = 9;

/// Options fixed when a session is created. The menu decides `sound_enabled`
/// and `show_mini_map`; the engine only carries them for its collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub sound_enabled: bool,
    pub show_mini_map: bool,
    pub time_limit_seconds: u32,
    pub total_task_count: u32,
    pub ticks: TickConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            show_mini_map: true,
            time_limit_seconds: DEFAULT_TIME_LIMIT_SECONDS,
            total_task_count: DEFAULT_TOTAL_TASK_COUNT,
            ticks: TickConfig::default(),
        }
    }
}

impl SessionConfig {
    pub fn time_limit(&self) -> Duration {
        Duration::from_secs(u64::from(self.time_limit_seconds))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickConfig {
    pub movement_tps: u32,
    pub countdown_interval_ms: u64,
    pub max_frame_delta_ms: u64,
    pub max_movement_ticks_per_frame: u32,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            movement_tps: 60,
            countdown_interval_ms: 1000,
            max_frame_delta_ms: 250,
            max_movement_ticks_per_frame: 5,
        }
    }
}

impl TickConfig {
    pub fn movement_dt(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.movement_tps.max(1)))
    }

    pub fn countdown_interval(&self) -> Duration {
        normalize_non_zero_duration(
            Duration::from_millis(self.countdown_interval_ms),
            Duration::from_secs(1),
        )
    }

    pub fn max_frame_delta(&self) -> Duration {
        normalize_non_zero_duration(
            Duration::from_millis(self.max_frame_delta_ms),
            Duration::from_millis(250),
        )
    }

    pub fn max_movement_ticks_per_frame(&self) -> u32 {
        self.max_movement_ticks_per_frame.max(1)
    }
}

fn normalize_non_zero_duration(value: Duration, fallback: Duration) -> Duration {
    if value.is_zero() {
        fallback
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults_for_missing_fields() {
        let config: SessionConfig =
            serde_json::from_str(r#"{ "sound_enabled": false, "ticks": { "movement_tps": 30 } }"#)
                .expect("config");

        assert!(!config.sound_enabled);
        assert!(config.show_mini_map);
        assert_eq!(config.time_limit_seconds, 300);
        assert_eq!(config.total_task_count, 9);
        assert_eq!(config.ticks.movement_tps, 30);
        assert_eq!(config.ticks.countdown_interval_ms, 1000);
    }

    #[test]
    fn zero_durations_fall_back() {
        let ticks = TickConfig {
            movement_tps: 0,
            countdown_interval_ms: 0,
            max_frame_delta_ms: 0,
            max_movement_ticks_per_frame: 0,
        };

        assert_eq!(ticks.movement_dt(), Duration::from_secs(1));
        assert_eq!(ticks.countdown_interval(), Duration::from_secs(1));
        assert_eq!(ticks.max_frame_delta(), Duration::from_millis(250));
        assert_eq!(ticks.max_movement_ticks_per_frame(), 1);
    }

    #[test]
    fn sixty_tps_is_about_sixteen_ms() {
        let dt = TickConfig::default().movement_dt();
        assert!((dt.as_secs_f64() - 1.0 / 60.0).abs() < 0.000_001);
    }
}
