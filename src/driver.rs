//! Explicit per-tick driver: owns the clock, evaluates the obstacle rig and the visualiser once per
//! tick and forwards the results to the collaborators.

use crate::config::{Config, ObstacleLayout, TraceLayout};
use crate::control::Command;
use crate::error::{Error, Result};
use crate::oscillator::{ObstacleFrame, Oscillator, OscillatorPair};
use crate::render::DrawCommand;
use crate::series::{PairedTraces, SampleSeriesGenerator, SampleSource};
use crate::signal::Signal;
use crate::sink::{ObstacleSink, RenderSink, SpectrumSource};
use crate::types::Time;

/// The driver's time source. Time only advances while the time scale is non-zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Clock {
    time: Time,
    time_scale: f64,
}

impl Default for Clock {
    fn default() -> Self {
        Self {
            time: 0.0,
            time_scale: 1.0,
        }
    }
}

impl Clock {
    pub fn time(&self) -> Time {
        self.time
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn set_time_scale(&mut self, time_scale: f64) {
        self.time_scale = time_scale;
    }

    /// Advance by `dt` seconds of wall-clock time, scaled by the time scale.
    pub fn advance(&mut self, dt: f64) {
        self.time += dt * self.time_scale;
    }
}

/// One oscillating obstacle, or two in antiphase.
#[derive(Debug, Clone)]
pub enum ObstacleRig {
    Single(Oscillator),
    Pair(OscillatorPair),
}

impl ObstacleRig {
    fn primary_mut(&mut self) -> &mut Oscillator {
        match self {
            ObstacleRig::Single(oscillator) => oscillator,
            ObstacleRig::Pair(pair) => pair.primary_mut(),
        }
    }

    pub fn is_paused(&self) -> bool {
        match self {
            ObstacleRig::Single(oscillator) => oscillator.is_paused(),
            ObstacleRig::Pair(pair) => pair.primary().is_paused(),
        }
    }

    pub fn set_hertz(&mut self, text: &str) -> Result<()> {
        self.primary_mut().set_hertz(text)
    }

    pub fn set_amplitude(&mut self, text: &str) -> Result<()> {
        self.primary_mut().set_amplitude(text)
    }

    /// Set the static size of obstacle 1 or 2 from text.
    pub fn set_obstacle_size(&mut self, obstacle: usize, text: &str) -> Result<()> {
        match (self, obstacle) {
            (ObstacleRig::Single(oscillator), 1) => oscillator.set_obstacle_size(text),
            (ObstacleRig::Pair(pair), 1) => pair.set_obstacle_size1(text),
            (ObstacleRig::Pair(pair), 2) => pair.set_obstacle_size2(text),
            _ => Err(Error::InvalidConfiguration(format!("no obstacle {obstacle}"))),
        }
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.primary_mut().set_paused(paused);
    }

    pub fn set_change_scale(&mut self, change_scale: bool) {
        self.primary_mut().set_change_scale(change_scale);
    }
}

impl Signal<Time, Vec<ObstacleFrame>> for ObstacleRig {
    fn evaluate(&mut self, time: Time) -> Vec<ObstacleFrame> {
        match self {
            ObstacleRig::Single(oscillator) => vec![oscillator.evaluate(time)],
            ObstacleRig::Pair(pair) => pair.evaluate(time).to_vec(),
        }
    }
}

/// A single trace or a sine/cosine pair.
#[derive(Debug, Clone)]
pub enum Visualizer {
    Single(SampleSeriesGenerator),
    Paired(PairedTraces),
}

impl Visualizer {
    pub fn source(&self) -> SampleSource {
        match self {
            Visualizer::Single(generator) => generator.source(),
            Visualizer::Paired(traces) => traces.source(),
        }
    }

    pub fn show_audio_file(&mut self, show: bool) {
        match self {
            Visualizer::Single(generator) => generator.show_audio_file(show),
            Visualizer::Paired(traces) => traces.show_audio_file(show),
        }
    }

    fn spectrum_mut(&mut self) -> &mut [f64] {
        match self {
            Visualizer::Single(generator) => generator.spectrum_mut(),
            Visualizer::Paired(traces) => traces.spectrum_mut(),
        }
    }

    pub fn draw_commands(&self, time: Time) -> Result<Vec<DrawCommand>> {
        match self {
            Visualizer::Single(generator) => generator.draw_commands(time),
            Visualizer::Paired(traces) => traces.draw_commands(time),
        }
    }
}

/// What happened during one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// The time the tick was evaluated at.
    pub time: Time,
    /// Whether time was frozen, either by a paused oscillator or a paused host.
    pub frozen: bool,
    pub draw_commands: usize,
}

pub struct Driver {
    clock: Clock,
    rig: ObstacleRig,
    visualizer: Visualizer,
}

impl Driver {
    pub fn new(config: &Config) -> Result<Self> {
        let rig = match config.obstacles {
            ObstacleLayout::Single => ObstacleRig::Single(Oscillator::new(config.oscillator.clone())?),
            ObstacleLayout::Pair { secondary_base } => {
                ObstacleRig::Pair(OscillatorPair::new(config.oscillator.clone(), secondary_base)?)
            }
        };

        let generator = SampleSeriesGenerator::new(config.series.clone());
        // Fail on a bad point radius now rather than on the first tick.
        generator.sample_count()?;

        let visualizer = match config.traces {
            TraceLayout::Single => Visualizer::Single(generator),
            TraceLayout::Paired { distance } => {
                Visualizer::Paired(PairedTraces::new(config.series.clone(), distance))
            }
        };

        Ok(Self {
            clock: Clock::default(),
            rig,
            visualizer,
        })
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn rig(&self) -> &ObstacleRig {
        &self.rig
    }

    pub fn visualizer(&self) -> &Visualizer {
        &self.visualizer
    }

    pub fn visualizer_mut(&mut self) -> &mut Visualizer {
        &mut self.visualizer
    }

    /// Apply a parameter change. Rejected input leaves every parameter as it was.
    pub fn apply(&mut self, command: &Command) -> Result<()> {
        match command {
            Command::Hertz(text) => self.rig.set_hertz(text),
            Command::Amplitude(text) => self.rig.set_amplitude(text),
            Command::ObstacleSize(obstacle, text) => self.rig.set_obstacle_size(*obstacle, text),
            Command::Pause => {
                self.rig.set_paused(true);
                Ok(())
            }
            Command::Resume => {
                self.rig.set_paused(false);
                Ok(())
            }
            Command::ChangeScale(change_scale) => {
                self.rig.set_change_scale(*change_scale);
                Ok(())
            }
            Command::ShowAudioFile(show) => {
                self.visualizer.show_audio_file(*show);
                Ok(())
            }
        }
    }

    /// Run one tick, then advance the clock by `dt` seconds.
    ///
    /// The draw commands are generated before anything is written, so a failing tick leaves the
    /// sinks and the clock untouched.
    pub fn tick(
        &mut self,
        dt: f64,
        obstacles: &mut dyn ObstacleSink,
        renderer: &mut dyn RenderSink,
        spectrum: &mut dyn SpectrumSource,
    ) -> Result<TickReport> {
        let time = self.clock.time();

        if self.visualizer.source() == SampleSource::ExternalSpectrum {
            spectrum.fill_spectrum(self.visualizer.spectrum_mut());
        }
        let commands = self.visualizer.draw_commands(time)?;

        let frozen = if obstacles.is_paused() {
            true
        } else {
            let frames = self.rig.evaluate(time);
            let frozen = frames.iter().any(|frame| frame.request_time_freeze);
            if !frozen {
                for (index, frame) in frames.iter().enumerate() {
                    obstacles.set_obstacle(index, frame.position, frame.size);
                }
            }
            frozen
        };

        if frozen != (self.clock.time_scale() == 0.0) {
            log::info!("Time {}", if frozen { "frozen" } else { "resumed" });
        }
        self.clock.set_time_scale(if frozen { 0.0 } else { 1.0 });

        let draw_commands = commands.len();
        renderer.start_layer();
        for command in commands {
            renderer.draw(command);
        }

        self.clock.advance(dt);

        Ok(TickReport {
            time,
            frozen,
            draw_commands,
        })
    }
}
