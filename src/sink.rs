//! Interfaces to the collaborators a driver feeds each tick: the physics host receiving obstacle
//! geometry, the renderer receiving draw commands and the audio analyser supplying spectra.

use crate::render::DrawCommand;
use crate::types::Vec2;

/// Receives obstacle geometry, e.g. a physics simulation.
pub trait ObstacleSink {
    /// Write the geometry of obstacle `index` for this tick.
    fn set_obstacle(&mut self, index: usize, position: Vec2, size: Vec2);

    /// Whether the host is paused itself. A paused host freezes time just like a paused
    /// oscillator.
    fn is_paused(&self) -> bool {
        false
    }
}

/// Receives the draw commands for one tick.
pub trait RenderSink {
    /// Called once per tick before any commands are drawn.
    fn start_layer(&mut self);

    fn draw(&mut self, command: DrawCommand);
}

/// Supplies spectral magnitudes, refreshed once per tick.
pub trait SpectrumSource {
    /// Overwrite `magnitudes` with the current spectrum.
    fn fill_spectrum(&mut self, magnitudes: &mut [f64]);
}

/// Writes everything it receives to the log.
#[derive(Debug, Default)]
pub struct LogSink {
    commands: usize,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ObstacleSink for LogSink {
    fn set_obstacle(&mut self, index: usize, position: Vec2, size: Vec2) {
        log::debug!(
            "Obstacle {index}: centre ({:.3}, {:.3}) size ({:.3}, {:.3})",
            position.x,
            position.y,
            size.x,
            size.y
        );
    }
}

impl RenderSink for LogSink {
    fn start_layer(&mut self) {
        if self.commands > 0 {
            log::trace!("Previous layer held {} draw commands", self.commands);
        }
        self.commands = 0;
    }

    fn draw(&mut self, command: DrawCommand) {
        self.commands += 1;
        log::trace!("{command:?}");
    }
}

/// A spectrum source that never hears anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSpectrum;

impl SpectrumSource for SilentSpectrum {
    fn fill_spectrum(&mut self, magnitudes: &mut [f64]) {
        magnitudes.fill(0.0);
    }
}
