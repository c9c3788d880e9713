//! Oscillators driving the position, and optionally the size, of moving obstacles.

use crate::error::{Error, Result};
use crate::functions::{cosine_wave, sine_wave};
use crate::params::{parse_hertz, parse_scalar};
use crate::signal::Signal;
use crate::types::*;

/// Centre of the first obstacle when nothing else is configured.
pub const DEFAULT_BASE_POSITION: Vec2 = Vec2::new(-5.0, 0.0);

/// Centre of the second obstacle of a pair when nothing else is configured.
pub const DEFAULT_SECONDARY_BASE_POSITION: Vec2 = Vec2::new(5.0, 0.0);

/// How the vertical axis of an oscillator moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalMotion {
    /// The vertical axis stays at the base position.
    #[default]
    Fixed,
    /// The vertical axis follows `amplitude * sin(θ)`, tracing a circle together with the
    /// horizontal cosine.
    Sine,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OscillatorConfig {
    /// Oscillation frequency in whole hertz.
    pub frequency_hz: u32,
    /// Peak deviation from the base position.
    pub amplitude: f64,
    /// Constant phase added to the angle, in radians.
    pub phase_offset: f64,
    pub base_position: Vec2,
    pub vertical: VerticalMotion,
    /// Drive the obstacle size with the same cosine that drives its position.
    pub change_scale: bool,
    /// Static obstacle size, used when `change_scale` is off.
    pub obstacle_size: Vec2,
    /// Hold the last frame and ask the driver to freeze time.
    pub pause_object: bool,
}

impl Default for OscillatorConfig {
    fn default() -> Self {
        Self {
            frequency_hz: 0,
            amplitude: 0.0,
            phase_offset: 0.0,
            base_position: DEFAULT_BASE_POSITION,
            vertical: VerticalMotion::Fixed,
            change_scale: false,
            obstacle_size: Vec2::ZERO,
            pause_object: false,
        }
    }
}

impl OscillatorConfig {
    fn validate(&self) -> Result<()> {
        let finite = [
            ("amplitude", self.amplitude),
            ("phase offset", self.phase_offset),
            ("base position x", self.base_position.x),
            ("base position y", self.base_position.y),
            ("obstacle size x", self.obstacle_size.x),
            ("obstacle size y", self.obstacle_size.y),
        ];

        for (name, value) in finite {
            if !value.is_finite() {
                return Err(Error::InvalidConfiguration(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }

        Ok(())
    }
}

/// The geometry of one obstacle for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleFrame {
    /// Centre of the obstacle: the base position plus `offset`.
    pub position: Vec2,
    /// The oscillating term alone, relative to the base position.
    pub offset: Vec2,
    pub size: Vec2,
    /// Set while the oscillator is paused; the driver should stop advancing time.
    pub request_time_freeze: bool,
}

/// A single oscillating obstacle.
#[derive(Debug, Clone, Default)]
pub struct Oscillator {
    config: OscillatorConfig,
    last_frame: Option<ObstacleFrame>,
}

impl Oscillator {
    /// Create a new oscillator, failing if any parameter is non-finite.
    pub fn new(config: OscillatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            last_frame: None,
        })
    }

    pub fn config(&self) -> &OscillatorConfig {
        &self.config
    }

    /// Compute the obstacle geometry at time `time`.
    ///
    /// While `pause_object` is set this returns the last computed frame unchanged (computing one
    /// first if there is none yet) with `request_time_freeze` raised.
    pub fn evaluate(&mut self, time: Time) -> ObstacleFrame {
        if self.config.pause_object {
            let frame = match self.last_frame {
                Some(frame) => frame,
                None => self.compute(time),
            };
            self.last_frame = Some(frame);

            return ObstacleFrame {
                request_time_freeze: true,
                ..frame
            };
        }

        let frame = self.compute(time);
        self.last_frame = Some(frame);
        frame
    }

    fn compute(&self, time: Time) -> ObstacleFrame {
        let config = &self.config;
        let frequency = f64::from(config.frequency_hz);
        let swing = config.amplitude * cosine_wave(time, frequency, config.phase_offset);

        let offset = match config.vertical {
            VerticalMotion::Fixed => Vec2::new(swing, 0.0),
            VerticalMotion::Sine => Vec2::new(
                swing,
                config.amplitude * sine_wave(time, frequency, config.phase_offset),
            ),
        };

        // Position and size share the same cosine, so both peak together.
        let size = if config.change_scale {
            Vec2::splat(swing)
        } else {
            config.obstacle_size
        };

        ObstacleFrame {
            position: config.base_position + offset,
            offset,
            size,
            request_time_freeze: false,
        }
    }

    /// Set the frequency from text, e.g. from a UI input field.
    pub fn set_hertz(&mut self, text: &str) -> Result<()> {
        self.config.frequency_hz = parse_hertz(text)?;
        log::debug!("Oscillator frequency set to {}Hz", self.config.frequency_hz);
        Ok(())
    }

    /// Set the amplitude from text.
    pub fn set_amplitude(&mut self, text: &str) -> Result<()> {
        self.config.amplitude = parse_scalar("amplitude", text)?;
        log::debug!("Oscillator amplitude set to {}", self.config.amplitude);
        Ok(())
    }

    /// Set a uniform (square) static obstacle size from text.
    pub fn set_obstacle_size(&mut self, text: &str) -> Result<()> {
        let size = parse_scalar("obstacle size", text)?;
        self.config.obstacle_size = Vec2::splat(size);
        Ok(())
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.config.pause_object = paused;
    }

    pub fn set_change_scale(&mut self, change_scale: bool) {
        self.config.change_scale = change_scale;
    }

    pub fn is_paused(&self) -> bool {
        self.config.pause_object
    }
}

impl Signal<Time, ObstacleFrame> for Oscillator {
    fn evaluate(&mut self, time: Time) -> ObstacleFrame {
        Oscillator::evaluate(self, time)
    }
}

/// Two obstacles moving in antiphase.
///
/// Both share the primary oscillator's frequency and amplitude. The secondary obstacle runs at a
/// phase offset of π from the primary, which is evaluated as the exact negation of the primary's
/// oscillating term, so `secondary.offset == -primary.offset` holds bit for bit.
#[derive(Debug, Clone)]
pub struct OscillatorPair {
    primary: Oscillator,
    secondary_base: Vec2,
    secondary_size: Vec2,
}

impl Default for OscillatorPair {
    fn default() -> Self {
        Self {
            primary: Oscillator::default(),
            secondary_base: DEFAULT_SECONDARY_BASE_POSITION,
            secondary_size: Vec2::ZERO,
        }
    }
}

impl OscillatorPair {
    pub fn new(config: OscillatorConfig, secondary_base: Vec2) -> Result<Self> {
        check_secondary_base(secondary_base)?;

        let secondary_size = config.obstacle_size;
        Ok(Self {
            primary: Oscillator::new(config)?,
            secondary_base,
            secondary_size,
        })
    }

    pub fn primary(&self) -> &Oscillator {
        &self.primary
    }

    pub fn primary_mut(&mut self) -> &mut Oscillator {
        &mut self.primary
    }

    pub fn secondary_base(&self) -> Vec2 {
        self.secondary_base
    }

    /// Move the second obstacle's centre, failing if it is non-finite.
    pub fn set_secondary_base(&mut self, base: Vec2) -> Result<()> {
        check_secondary_base(base)?;
        self.secondary_base = base;
        Ok(())
    }

    /// Compute both obstacles' geometry at time `time`.
    pub fn evaluate(&mut self, time: Time) -> [ObstacleFrame; 2] {
        let first = self.primary.evaluate(time);

        let offset = -first.offset;
        let size = if self.primary.config().change_scale {
            -first.size
        } else {
            self.secondary_size
        };

        let second = ObstacleFrame {
            position: self.secondary_base + offset,
            offset,
            size,
            request_time_freeze: first.request_time_freeze,
        };

        [first, second]
    }

    pub fn set_hertz(&mut self, text: &str) -> Result<()> {
        self.primary.set_hertz(text)
    }

    pub fn set_amplitude(&mut self, text: &str) -> Result<()> {
        self.primary.set_amplitude(text)
    }

    /// Set the first obstacle's static size from text.
    pub fn set_obstacle_size1(&mut self, text: &str) -> Result<()> {
        self.primary.set_obstacle_size(text)
    }

    /// Set the second obstacle's static size from text.
    pub fn set_obstacle_size2(&mut self, text: &str) -> Result<()> {
        let size = parse_scalar("obstacle size", text)?;
        self.secondary_size = Vec2::splat(size);
        Ok(())
    }
}

fn check_secondary_base(base: Vec2) -> Result<()> {
    if !(base.x.is_finite() && base.y.is_finite()) {
        return Err(Error::InvalidConfiguration(format!(
            "secondary base position must be finite, got {base:?}"
        )));
    }
    Ok(())
}

impl Signal<Time, [ObstacleFrame; 2]> for OscillatorPair {
    fn evaluate(&mut self, time: Time) -> [ObstacleFrame; 2] {
        OscillatorPair::evaluate(self, time)
    }
}
