//! Configuration of a complete scene: the obstacle rig, the visualiser and the tick rate.

use std::time::Duration;

use crate::error::{Error, Result};
use crate::oscillator::{OscillatorConfig, DEFAULT_SECONDARY_BASE_POSITION};
use crate::series::SeriesConfig;
use crate::types::Vec2;

/// Ticks per second when nothing else is configured.
pub const DEFAULT_TICK_RATE: f64 = 60.0;

/// Whether one obstacle oscillates or two oscillate in antiphase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObstacleLayout {
    Single,
    Pair { secondary_base: Vec2 },
}

impl ObstacleLayout {
    pub fn pair() -> Self {
        ObstacleLayout::Pair {
            secondary_base: DEFAULT_SECONDARY_BASE_POSITION,
        }
    }
}

/// Whether the visualiser draws one trace or a sine/cosine pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TraceLayout {
    Single,
    Paired { distance: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub oscillator: OscillatorConfig,
    pub obstacles: ObstacleLayout,
    pub series: SeriesConfig,
    pub traces: TraceLayout,
    /// Ticks per second.
    pub tick_rate: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            oscillator: OscillatorConfig::default(),
            obstacles: ObstacleLayout::Single,
            series: SeriesConfig::default(),
            traces: TraceLayout::Single,
            tick_rate: DEFAULT_TICK_RATE,
        }
    }
}

impl Config {
    /// Wall-clock duration of one tick.
    pub fn tick_duration(&self) -> Result<Duration> {
        if !(self.tick_rate > 0.0 && self.tick_rate.is_finite()) {
            return Err(Error::InvalidConfiguration(format!(
                "tick rate must be positive, got {}",
                self.tick_rate
            )));
        }

        Ok(Duration::from_secs_f64(1.0 / self.tick_rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_duration() {
        let config = Config::default();
        assert_eq!(config.tick_duration().unwrap(), Duration::from_secs_f64(1.0 / 60.0));

        let config = Config { tick_rate: 4.0, ..Default::default() };
        assert_eq!(config.tick_duration().unwrap(), Duration::from_millis(250));

        for tick_rate in [0.0, -1.0, f64::NAN] {
            let config = Config { tick_rate, ..Default::default() };
            assert!(matches!(config.tick_duration(), Err(Error::InvalidConfiguration(_))));
        }
    }
}
