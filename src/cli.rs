#![allow(clippy::missing_errors_doc)]

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::{
    domain::weather::{Location, WeatherCategory},
    scene::clock_face::ClockLayout,
};

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum LayoutArg {
    /// Six digits, no separators
    Compact,
    /// HH:MM:SS
    Punctuated,
}

impl From<LayoutArg> for ClockLayout {
    fn from(value: LayoutArg) -> Self {
        match value {
            LayoutArg::Compact => ClockLayout::Compact,
            LayoutArg::Punctuated => ClockLayout::Punctuated,
        }
    }
}

#[derive(Debug, Parser, Clone)]
#[command(
    name = "skyclock",
    version,
    about = "Terminal clock floating in a live weather scene"
)]
pub struct Cli {
    /// Target FPS (15..60) [default: 30]
    #[arg(long, value_parser = clap::value_parser!(u8).range(15..=60))]
    pub fps: Option<u8>,

    /// Digit layout
    #[arg(long, value_enum)]
    pub layout: Option<LayoutArg>,

    /// Fixed weather category, disables the conditions lookup
    #[arg(long)]
    pub weather: Option<String>,

    /// Direct latitude (requires --lon)
    #[arg(long, allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Direct longitude (requires --lat)
    #[arg(long, allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// Conditions refresh interval in seconds [default: 600]
    #[arg(long)]
    pub refresh_interval: Option<u64>,

    /// Camera orbit speed in radians per millisecond
    #[arg(long)]
    pub camera_speed: Option<f64>,

    /// Seed for particle placement
    #[arg(long)]
    pub seed: Option<u64>,

    /// JSON glyph file replacing the built-in digits
    #[arg(long)]
    pub glyphs: Option<PathBuf>,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Override the conditions endpoint
    #[arg(long)]
    pub conditions_url: Option<String>,

    /// Freeze particles and camera
    #[arg(long)]
    pub no_animation: bool,

    /// Write the effective settings back to disk
    #[arg(long)]
    pub save_settings: bool,
}

impl Cli {
    pub fn validate(&self) -> anyhow::Result<()> {
        match (self.lat, self.lon) {
            (Some(_), None) | (None, Some(_)) => {
                anyhow::bail!("--lat and --lon must be provided together")
            }
            (Some(lat), Some(lon))
                if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) =>
            {
                anyhow::bail!("--lat/--lon out of range: {lat}, {lon}")
            }
            _ => {}
        }
        if let Some(speed) = self.camera_speed
            && !speed.is_finite()
        {
            anyhow::bail!("--camera-speed must be finite");
        }
        Ok(())
    }

    #[must_use]
    pub fn explicit_location(&self) -> Option<Location> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(Location::from_coords(lat, lon)),
            _ => None,
        }
    }

    /// Resolves `--weather`. Unknown names fall back to sunny.
    #[must_use]
    pub fn fixed_weather(&self) -> Option<WeatherCategory> {
        self.weather.as_deref().map(WeatherCategory::from_name)
    }
}
