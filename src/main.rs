use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use std::{error::Error, thread::sleep};

use clap::Parser;

use wavedrive::config::{Config, ObstacleLayout, TraceLayout, DEFAULT_TICK_RATE};
use wavedrive::control::{parse_command, Command};
use wavedrive::driver::Driver;
use wavedrive::functions::Wave;
use wavedrive::oscillator::{OscillatorConfig, VerticalMotion};
use wavedrive::series::{SeriesConfig, Sweep};
use wavedrive::sink::{LogSink, SilentSpectrum};

#[derive(Parser, Debug)]
#[command(about = "Drive oscillating obstacles and a waveform visualiser at a fixed tick rate")]
struct Args {
    /// Obstacle oscillation frequency in hertz.
    #[arg(long, default_value_t = 1)]
    hertz: u32,
    /// Obstacle oscillation amplitude.
    #[arg(long, default_value_t = 1.0)]
    amplitude: f64,
    /// Obstacle phase offset in radians.
    #[arg(long, default_value_t = 0.0)]
    phase: f64,
    /// Move a second obstacle in antiphase with the first.
    #[arg(long)]
    pair: bool,
    /// Drive the obstacle size with its position.
    #[arg(long)]
    change_scale: bool,
    /// Move the obstacle vertically as well, tracing a circle.
    #[arg(long)]
    circular: bool,
    /// Width of the visualised wave.
    #[arg(long, default_value_t = 10.0)]
    length: f64,
    /// Spacing and radius of the visualised points.
    #[arg(long, default_value_t = 0.1)]
    point_radius: f64,
    /// Visualised wave amplitude.
    #[arg(long, default_value_t = 1.0)]
    wave_amplitude: f64,
    /// Visualised wave scroll frequency.
    #[arg(long, default_value_t = 1.0)]
    frequency: f64,
    /// Visualise a cosine instead of a sine.
    #[arg(long)]
    cosine: bool,
    /// Draw a sine above a cosine, this far apart.
    #[arg(long)]
    distance: Option<f64>,
    /// Visualise the audio spectrum instead of a wave.
    #[arg(long)]
    spectrum: bool,
    /// Scale applied to spectrum magnitudes.
    #[arg(long, default_value_t = 10.0)]
    max_scale: f64,
    /// Ticks per second.
    #[arg(long, default_value_t = DEFAULT_TICK_RATE)]
    tick_rate: f64,
    /// Stop after this many ticks.
    #[arg(long)]
    ticks: Option<u64>,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            oscillator: OscillatorConfig {
                frequency_hz: self.hertz,
                amplitude: self.amplitude,
                phase_offset: self.phase,
                vertical: if self.circular { VerticalMotion::Sine } else { VerticalMotion::Fixed },
                change_scale: self.change_scale,
                ..Default::default()
            },
            obstacles: if self.pair { ObstacleLayout::pair() } else { ObstacleLayout::Single },
            series: SeriesConfig {
                length: self.length,
                point_radius: self.point_radius,
                amplitude: self.wave_amplitude,
                wave: if self.cosine { Wave::Cosine } else { Wave::Sine },
                sweep: Sweep::Scrolling { frequency: self.frequency },
                max_scale: self.max_scale,
                show_audio_file: self.spectrum,
                ..Default::default()
            },
            traces: match self.distance {
                Some(distance) => TraceLayout::Paired { distance },
                None => TraceLayout::Single,
            },
            tick_rate: self.tick_rate,
        }
    }
}

/// Start the tick loop, reading parameter commands from stdin.
fn main() -> Result<(), Box<dyn Error>> {
    // Initialise logging.
    env_logger::init();

    let args = Args::parse();
    let config = args.config();
    let tick = config.tick_duration()?;
    let mut driver = Driver::new(&config)?;

    // Create mpsc channel for parameter commands.
    let (sender, receiver) = std::sync::mpsc::channel::<Command>();
    spawn_command_reader(sender);

    // Register ctrl-c handler for clean exit.
    let should_exit = Arc::new(AtomicBool::new(false));
    signal_on_ctrlc(should_exit.clone())?;

    let mut sink = LogSink::new();
    let mut renderer = LogSink::new();
    let mut spectrum = SilentSpectrum;

    log::info!("Running at {}Hz... press ctrl-C to exit.", config.tick_rate);
    let mut ticks = 0;
    while !should_exit.load(Ordering::Relaxed) && args.ticks.map_or(true, |limit| ticks < limit) {
        apply_commands(&mut driver, &receiver);

        let report = driver.tick(tick.as_secs_f64(), &mut sink, &mut renderer, &mut spectrum)?;
        log::debug!(
            "Tick {ticks} at t={:.3}: {} draw commands{}",
            report.time,
            report.draw_commands,
            if report.frozen { ", frozen" } else { "" }
        );

        ticks += 1;
        sleep(tick);
    }

    log::info!("Exit requested after {ticks} ticks");
    Ok(())
}

/// Read commands from stdin on a background thread, one per line.
fn spawn_command_reader(sender: Sender<Command>) {
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            match parse_command(&line) {
                Some(command) => {
                    if sender.send(command).is_err() {
                        break;
                    }
                }
                None => log::warn!("Unknown command: {line:?}"),
            }
        }
    });
}

/// Apply every command received since the last tick.
fn apply_commands(driver: &mut Driver, receiver: &Receiver<Command>) {
    while let Ok(command) = receiver.try_recv() {
        match driver.apply(&command) {
            Ok(()) => log::info!("Applied {command:?}"),
            Err(err) => log::warn!("Rejected {command:?}: {err}"),
        }
    }
}

/// Adds a handler for ctrl-c that signals that it has been pressed using the given AtomicBool.
fn signal_on_ctrlc(ctrlc_sent: Arc<AtomicBool>) -> Result<(), Box<dyn Error>> {
    ctrlc_sent.store(false, Ordering::Relaxed);

    ctrlc::set_handler(move || {
        if !ctrlc_sent.load(Ordering::Relaxed) {
            // If this is the first time, signal for exit.
            ctrlc_sent.store(true, Ordering::Relaxed);
        }
        else {
            // If ctrl-c is sent more than once, exit immediately.
            log::info!("Immediate exit requested");
            std::process::exit(1);
        }
    })?;

    Ok(())
}
