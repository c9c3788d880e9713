//! Periodic motion for oscillating obstacles and sample series for waveform and spectrum
//! visualisation, evaluated once per tick by an explicit driver.

pub mod config;
pub mod control;
pub mod driver;
pub mod error;
pub mod functions;
pub mod oscillator;
pub mod params;
pub mod render;
pub mod series;
pub mod signal;
pub mod sink;
pub mod types;

pub use error::{Error, Result};
