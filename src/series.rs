//! Generation of sample series for waveform and spectrum visualisation.
//!
//! A series is regenerated from scratch on every call. Closed-form samples depend only on the
//! sample index, the time and the configuration; spectrum samples are copied from the most
//! recently supplied magnitude buffer.

use std::f64::consts::PI;

use crate::error::{Error, Result};
use crate::functions::Wave;
use crate::render::{Color, DrawCommand};
use crate::types::*;

/// Number of magnitudes in a spectrum buffer.
pub const SPECTRUM_SIZE: usize = 512;

/// Upper bound on the number of samples in a closed-form series.
pub const MAX_SAMPLES: usize = 1 << 20;

/// Added to every spectrum bar height so silent bins still draw as a thin bar.
pub const SPECTRUM_BIAS: f64 = 0.05;

/// Where the samples of a series come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleSource {
    ClosedFormSine,
    ClosedFormCosine,
    ExternalSpectrum,
}

/// How the argument of a closed-form wave is derived from the sample index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sweep {
    /// `trig(i + t * frequency)`: the wave scrolls as time advances.
    Scrolling { frequency: Frequency },
    /// `trig(2π * i * wave_length)`: a static wave independent of time.
    Wavelength { wave_length: f64 },
}

impl Default for Sweep {
    fn default() -> Self {
        Sweep::Scrolling { frequency: 1.0 }
    }
}

impl Sweep {
    fn argument(self, index: f64, time: Time) -> f64 {
        match self {
            Sweep::Scrolling { frequency } => index + time * frequency,
            Sweep::Wavelength { wave_length } => index * wave_length * PI * 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesConfig {
    /// Horizontal extent of the series, centred on zero for closed-form waves.
    pub length: f64,
    /// Spacing between consecutive closed-form samples, also their drawn radius.
    pub point_radius: f64,
    pub amplitude: f64,
    pub wave: Wave,
    pub sweep: Sweep,
    /// Constant added to every closed-form sample's vertical position.
    pub vertical_offset: f64,
    /// Scale applied to spectrum magnitudes.
    pub max_scale: f64,
    /// Draw the external spectrum instead of the closed-form wave.
    pub show_audio_file: bool,
    pub point_color: Color,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            length: 10.0,
            point_radius: 0.1,
            amplitude: 1.0,
            wave: Wave::Sine,
            sweep: Sweep::default(),
            vertical_offset: 0.0,
            max_scale: 10.0,
            show_audio_file: false,
            point_color: Color::WHITE,
        }
    }
}

impl SeriesConfig {
    fn validate(&self) -> Result<()> {
        if !(self.point_radius > 0.0 && self.point_radius.is_finite()) {
            return Err(Error::InvalidConfiguration(format!(
                "point radius must be positive, got {}",
                self.point_radius
            )));
        }

        if !(self.length >= 0.0 && self.length.is_finite()) {
            return Err(Error::InvalidConfiguration(format!(
                "length must not be negative, got {}",
                self.length
            )));
        }

        Ok(())
    }
}

/// Generates one series of sample positions per call.
#[derive(Debug, Clone)]
pub struct SampleSeriesGenerator {
    config: SeriesConfig,
    spectrum: Vec<f64>,
}

impl SampleSeriesGenerator {
    pub fn new(config: SeriesConfig) -> Self {
        Self {
            config,
            spectrum: vec![0.0; SPECTRUM_SIZE],
        }
    }

    pub fn config(&self) -> &SeriesConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut SeriesConfig {
        &mut self.config
    }

    /// The generation path the next call to [`generate`](Self::generate) will take.
    pub fn source(&self) -> SampleSource {
        match (self.config.show_audio_file, self.config.wave) {
            (true, _) => SampleSource::ExternalSpectrum,
            (false, Wave::Sine) => SampleSource::ClosedFormSine,
            (false, Wave::Cosine) => SampleSource::ClosedFormCosine,
        }
    }

    /// Switch between the spectrum and the configured closed-form wave.
    pub fn show_audio_file(&mut self, show: bool) {
        if self.config.show_audio_file != show {
            log::info!("Switching series source to {}", if show { "spectrum" } else { "closed form" });
        }
        self.config.show_audio_file = show;
    }

    /// Number of samples a closed-form series has: `floor(length / point_radius)`, which must
    /// not exceed [`MAX_SAMPLES`].
    pub fn sample_count(&self) -> Result<usize> {
        self.config.validate()?;

        let count = (self.config.length / self.config.point_radius).floor();
        if !(count <= MAX_SAMPLES as f64) {
            return Err(Error::InvalidConfiguration(format!(
                "length {} over point radius {} gives {count} samples, more than {MAX_SAMPLES}",
                self.config.length, self.config.point_radius
            )));
        }

        Ok(count as usize)
    }

    /// Replace the spectrum buffer with `magnitudes`, which must hold exactly
    /// [`SPECTRUM_SIZE`] values.
    pub fn update_spectrum(&mut self, magnitudes: &[f64]) -> Result<()> {
        if magnitudes.len() != SPECTRUM_SIZE {
            return Err(Error::InvalidConfiguration(format!(
                "spectrum must hold {SPECTRUM_SIZE} magnitudes, got {}",
                magnitudes.len()
            )));
        }

        self.spectrum.copy_from_slice(magnitudes);
        Ok(())
    }

    /// Mutable access to the spectrum buffer, for a collaborator to fill in place.
    pub fn spectrum_mut(&mut self) -> &mut [f64] {
        &mut self.spectrum
    }

    /// Generate the series of sample positions at time `time`.
    pub fn generate(&self, time: Time) -> Result<Vec<Vec2>> {
        let count = self.sample_count()?;

        let series: Vec<Vec2> = match self.source() {
            SampleSource::ExternalSpectrum => {
                let width = self.bar_width();
                self.spectrum
                    .iter()
                    .enumerate()
                    .map(|(i, magnitude)| {
                        Vec2::new(i as f64 * width, magnitude * self.config.max_scale + SPECTRUM_BIAS)
                    })
                    .collect()
            }
            SampleSource::ClosedFormSine | SampleSource::ClosedFormCosine => {
                let config = &self.config;
                let half_length = config.length / 2.0;
                (0..count)
                    .map(|i| {
                        let index = i as f64;
                        let value = config.wave.at(config.sweep.argument(index, time)) * config.amplitude;
                        Vec2::new(index * config.point_radius - half_length, value + config.vertical_offset)
                    })
                    .collect()
            }
        };

        Ok(series)
    }

    /// Generate the series at time `time` as draw commands: points for closed-form waves, bars
    /// rising from the baseline for the spectrum.
    pub fn draw_commands(&self, time: Time) -> Result<Vec<DrawCommand>> {
        let series = self.generate(time)?;
        let color = self.config.point_color;

        let commands: Vec<DrawCommand> = match self.source() {
            SampleSource::ExternalSpectrum => {
                let width = self.bar_width();
                series
                    .into_iter()
                    .map(|p| DrawCommand::quad(Vec2::new(p.x, 0.0), Vec2::new(width, p.y), color))
                    .collect()
            }
            _ => series
                .into_iter()
                .map(|p| DrawCommand::point(p, self.config.point_radius, color))
                .collect(),
        };

        Ok(commands)
    }

    fn bar_width(&self) -> f64 {
        self.config.length / SPECTRUM_SIZE as f64
    }
}

/// A sine trace above a cosine trace, separated vertically by `distance`.
#[derive(Debug, Clone)]
pub struct PairedTraces {
    upper: SampleSeriesGenerator,
    lower: SampleSeriesGenerator,
    distance: f64,
}

impl PairedTraces {
    /// Build both traces from one configuration. Its `wave` and `vertical_offset` are replaced:
    /// the sine sits at `+distance / 2`, the cosine at `-distance / 2`.
    pub fn new(config: SeriesConfig, distance: f64) -> Self {
        let upper = SeriesConfig {
            wave: Wave::Sine,
            vertical_offset: distance / 2.0,
            ..config.clone()
        };
        let lower = SeriesConfig {
            wave: Wave::Cosine,
            vertical_offset: -distance / 2.0,
            ..config
        };

        Self {
            upper: SampleSeriesGenerator::new(upper),
            lower: SampleSeriesGenerator::new(lower),
            distance,
        }
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn upper(&self) -> &SampleSeriesGenerator {
        &self.upper
    }

    pub fn lower(&self) -> &SampleSeriesGenerator {
        &self.lower
    }

    pub fn show_audio_file(&mut self, show: bool) {
        self.upper.show_audio_file(show);
        self.lower.show_audio_file(show);
    }

    pub fn source(&self) -> SampleSource {
        self.upper.source()
    }

    /// The spectrum is held by the upper trace only; in spectrum mode it is the sole series.
    pub fn update_spectrum(&mut self, magnitudes: &[f64]) -> Result<()> {
        self.upper.update_spectrum(magnitudes)
    }

    pub fn spectrum_mut(&mut self) -> &mut [f64] {
        self.upper.spectrum_mut()
    }

    /// Generate the sine and cosine traces at time `time`, or the single spectrum series when
    /// showing the audio file.
    pub fn generate(&self, time: Time) -> Result<Vec<Vec<Vec2>>> {
        if self.source() == SampleSource::ExternalSpectrum {
            return Ok(vec![self.upper.generate(time)?]);
        }

        Ok(vec![self.upper.generate(time)?, self.lower.generate(time)?])
    }

    /// Both traces as draw commands, or a single spectrum when showing the audio file.
    pub fn draw_commands(&self, time: Time) -> Result<Vec<DrawCommand>> {
        let mut commands = self.upper.draw_commands(time)?;
        if self.source() != SampleSource::ExternalSpectrum {
            commands.extend(self.lower.draw_commands(time)?);
        }
        Ok(commands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::render::Shape;

    fn generator(length: f64, point_radius: f64) -> SampleSeriesGenerator {
        SampleSeriesGenerator::new(SeriesConfig {
            length,
            point_radius,
            ..Default::default()
        })
    }

    #[test]
    fn test_sample_count() {
        let cases = [(10.0, 0.1), (10.0, 0.3), (7.0, 2.0), (1.0, 5.0), (0.0, 1.0), (100.0, 0.25)];
        for (length, point_radius) in cases {
            let gen = generator(length, point_radius);
            let expected = (length / point_radius).floor() as usize;
            assert_eq!(gen.generate(1.5).unwrap().len(), expected);
        }

        assert_eq!(generator(7.0, 2.0).generate(0.0).unwrap().len(), 3);
        assert_eq!(generator(1.0, 5.0).generate(0.0).unwrap().len(), 0);
    }

    #[test]
    fn test_invalid_point_radius() {
        for point_radius in [0.0, -0.5, f64::NAN, f64::INFINITY] {
            let gen = generator(10.0, point_radius);
            assert!(matches!(gen.generate(0.0), Err(Error::InvalidConfiguration(_))));
            assert!(matches!(gen.draw_commands(0.0), Err(Error::InvalidConfiguration(_))));
        }

        let gen = generator(-1.0, 0.5);
        assert!(matches!(gen.generate(0.0), Err(Error::InvalidConfiguration(_))));
    }

    #[test]
    fn test_closed_form_sine() {
        let gen = SampleSeriesGenerator::new(SeriesConfig {
            length: 4.0,
            point_radius: 0.5,
            amplitude: 2.0,
            sweep: Sweep::Scrolling { frequency: 3.0 },
            ..Default::default()
        });
        assert_eq!(gen.source(), SampleSource::ClosedFormSine);

        let time = 0.4;
        let series = gen.generate(time).unwrap();
        assert_eq!(series.len(), 8);
        for (i, p) in series.iter().enumerate() {
            let index = i as f64;
            assert_relative_eq!(p.x, index * 0.5 - 2.0);
            assert_relative_eq!(p.y, f64::sin(index + time * 3.0) * 2.0, epsilon = 10e-10);
        }
    }

    #[test]
    fn test_closed_form_cosine_with_offset() {
        let gen = SampleSeriesGenerator::new(SeriesConfig {
            length: 3.0,
            point_radius: 1.0,
            amplitude: 0.5,
            wave: Wave::Cosine,
            vertical_offset: -1.0,
            sweep: Sweep::Scrolling { frequency: 0.0 },
            ..Default::default()
        });
        assert_eq!(gen.source(), SampleSource::ClosedFormCosine);

        let series = gen.generate(123.0).unwrap();
        assert_eq!(series[0], Vec2::new(-1.5, -0.5));
        assert_relative_eq!(series[2].y, f64::cos(2.0) * 0.5 - 1.0, epsilon = 10e-10);
    }

    #[test]
    fn test_wavelength_sweep_ignores_time() {
        let gen = SampleSeriesGenerator::new(SeriesConfig {
            length: 2.0,
            point_radius: 0.25,
            sweep: Sweep::Wavelength { wave_length: 0.25 },
            ..Default::default()
        });

        let early = gen.generate(0.0).unwrap();
        assert_eq!(early, gen.generate(42.0).unwrap());

        // A quarter wavelength per sample peaks at index 1.
        assert_relative_eq!(early[1].y, 1.0, epsilon = 10e-10);
        assert_relative_eq!(early[3].y, -1.0, epsilon = 10e-10);
    }

    #[test]
    fn test_generate_is_idempotent() {
        let gen = generator(10.0, 0.1);
        for i in 0..10 {
            let time = f64::from(i) * 0.77;
            assert_eq!(gen.generate(time).unwrap(), gen.generate(time).unwrap());
        }

        let mut gen = generator(10.0, 1.0);
        gen.show_audio_file(true);
        assert_eq!(gen.generate(3.0).unwrap(), gen.generate(3.0).unwrap());
    }

    #[test]
    fn test_silent_spectrum_is_bias() {
        let mut gen = SampleSeriesGenerator::new(SeriesConfig {
            length: 512.0,
            max_scale: 10.0,
            show_audio_file: true,
            ..Default::default()
        });
        gen.update_spectrum(&[0.0; SPECTRUM_SIZE]).unwrap();
        assert_eq!(gen.source(), SampleSource::ExternalSpectrum);

        let series = gen.generate(0.0).unwrap();
        assert_eq!(series.len(), SPECTRUM_SIZE);
        for (i, p) in series.iter().enumerate() {
            assert_eq!(p.y, SPECTRUM_BIAS);
            assert_eq!(p.x, i as f64);
        }
    }

    #[test]
    fn test_spectrum_scaling_and_bars() {
        let mut gen = SampleSeriesGenerator::new(SeriesConfig {
            length: 256.0,
            max_scale: 4.0,
            show_audio_file: true,
            ..Default::default()
        });

        let mut magnitudes = [0.0; SPECTRUM_SIZE];
        magnitudes[3] = 0.5;
        gen.update_spectrum(&magnitudes).unwrap();

        let series = gen.generate(0.0).unwrap();
        assert_eq!(series[3], Vec2::new(1.5, 2.0 + SPECTRUM_BIAS));

        let commands = gen.draw_commands(0.0).unwrap();
        assert_eq!(commands.len(), SPECTRUM_SIZE);
        assert_eq!(commands[3].position, Vec2::new(1.5, 0.0));
        assert_eq!(commands[3].shape, Shape::Quad { size: Vec2::new(0.5, 2.0 + SPECTRUM_BIAS) });
    }

    #[test]
    fn test_spectrum_length_mismatch() {
        let mut gen = generator(10.0, 1.0);
        assert!(matches!(gen.update_spectrum(&[1.0; 12]), Err(Error::InvalidConfiguration(_))));

        // The previous buffer is untouched.
        assert!(gen.spectrum_mut().iter().all(|m| *m == 0.0));
    }

    #[test]
    fn test_mode_switch_takes_effect_immediately() {
        let mut gen = generator(10.0, 1.0);
        gen.spectrum_mut()[0] = 1.0;

        assert_eq!(gen.generate(0.0).unwrap().len(), 10);

        gen.show_audio_file(true);
        let spectrum = gen.generate(0.0).unwrap();
        assert_eq!(spectrum.len(), SPECTRUM_SIZE);
        assert_eq!(spectrum[0].y, 10.0 + SPECTRUM_BIAS);

        gen.show_audio_file(false);
        let wave = gen.generate(0.0).unwrap();
        assert_eq!(wave, generator(10.0, 1.0).generate(0.0).unwrap());
    }

    #[test]
    fn test_point_commands() {
        let gen = generator(2.0, 0.5);
        let commands = gen.draw_commands(0.0).unwrap();
        assert_eq!(commands.len(), 4);
        for (command, position) in commands.iter().zip(gen.generate(0.0).unwrap()) {
            assert_eq!(command.position, position);
            assert_eq!(command.shape, Shape::Point { radius: 0.5 });
            assert_eq!(command.color, Color::WHITE);
        }
    }

    #[test]
    fn test_paired_traces() {
        let config = SeriesConfig {
            length: 6.0,
            point_radius: 0.5,
            amplitude: 1.0,
            ..Default::default()
        };
        let mut traces = PairedTraces::new(config, 4.0);
        assert_eq!(traces.distance(), 4.0);

        let traces_at_zero = traces.generate(0.0).unwrap();
        assert_eq!(traces_at_zero.len(), 2);
        let (upper, lower) = (&traces_at_zero[0], &traces_at_zero[1]);
        assert_eq!(upper.len(), 12);
        assert_eq!(lower.len(), 12);

        // Sine above the baseline, cosine below it.
        assert_eq!(upper[0].y, 2.0);
        assert_eq!(lower[0].y, -1.0);
        assert_eq!(traces.upper().source(), SampleSource::ClosedFormSine);
        assert_eq!(traces.lower().source(), SampleSource::ClosedFormCosine);
        assert_eq!(traces.draw_commands(0.0).unwrap().len(), 24);

        traces.show_audio_file(true);
        traces.update_spectrum(&[0.0; SPECTRUM_SIZE]).unwrap();
        assert_eq!(traces.source(), SampleSource::ExternalSpectrum);
        assert_eq!(traces.draw_commands(0.0).unwrap().len(), SPECTRUM_SIZE);
    }

    #[test]
    fn test_paired_traces_share_one_spectrum() {
        let config = SeriesConfig {
            length: 512.0,
            max_scale: 10.0,
            ..Default::default()
        };
        let mut traces = PairedTraces::new(config, 2.0);
        traces.show_audio_file(true);
        traces.update_spectrum(&[1.0; SPECTRUM_SIZE]).unwrap();

        let series = traces.generate(0.0).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].len(), SPECTRUM_SIZE);
        for p in &series[0] {
            assert_eq!(p.y, 10.0 + SPECTRUM_BIAS);
        }

        // Back to the closed-form pair.
        traces.show_audio_file(false);
        assert_eq!(traces.generate(0.0).unwrap().len(), 2);
    }

    #[test]
    fn test_sample_count_overflow() {
        let gen = generator(10.0, 1e-300);
        assert!(matches!(gen.sample_count(), Err(Error::InvalidConfiguration(_))));
        assert!(matches!(gen.generate(0.0), Err(Error::InvalidConfiguration(_))));
        assert!(matches!(gen.draw_commands(0.0), Err(Error::InvalidConfiguration(_))));

        assert_eq!(generator(MAX_SAMPLES as f64, 1.0).sample_count(), Ok(MAX_SAMPLES));
        assert!(generator(MAX_SAMPLES as f64 + 1.0, 1.0).sample_count().is_err());
    }

    #[test]
    fn test_config_mut_is_checked_on_generate() {
        let mut gen = generator(4.0, 1.0);
        assert_eq!(gen.generate(0.0).unwrap().len(), 4);

        gen.config_mut().point_radius = 0.0;
        assert!(matches!(gen.generate(0.0), Err(Error::InvalidConfiguration(_))));

        gen.config_mut().point_radius = 2.0;
        assert_eq!(gen.config().point_radius, 2.0);
        assert_eq!(gen.generate(0.0).unwrap().len(), 2);
    }
}
