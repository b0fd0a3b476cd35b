use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::{
    cli::Cli,
    domain::weather::{Location, WeatherCategory},
    scene::{
        EngineConfig,
        camera::DEFAULT_ANGULAR_SPEED,
        clock_face::ClockLayout,
        precipitation::FieldDensity,
    },
};

pub const CONFIG_DIR_ENV: &str = "SKYCLOCK_CONFIG_DIR";

const DEFAULT_FPS: u8 = 30;
const DEFAULT_REFRESH_SECS: u64 = 600;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeSettings {
    pub fps: u8,
    pub refresh_interval_secs: u64,
    pub layout: ClockLayout,
    pub camera_speed: f64,
    pub density: FieldDensity,
    pub animate: bool,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub glyph_file: Option<PathBuf>,
    pub weather: Option<WeatherCategory>,
    pub seed: Option<u64>,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            refresh_interval_secs: DEFAULT_REFRESH_SECS,
            layout: ClockLayout::default(),
            camera_speed: DEFAULT_ANGULAR_SPEED,
            density: FieldDensity::default(),
            animate: true,
            latitude: None,
            longitude: None,
            glyph_file: None,
            weather: None,
            seed: None,
        }
    }
}

impl RuntimeSettings {
    pub fn from_cli_defaults(cli: &Cli) -> Self {
        let mut settings = Self::default();
        settings.apply_cli(cli);
        settings
    }

    /// Copies every flag the user actually set on top of `self`.
    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(fps) = cli.fps {
            self.fps = fps;
        }
        if let Some(secs) = cli.refresh_interval {
            self.refresh_interval_secs = secs;
        }
        if let Some(layout) = cli.layout {
            self.layout = layout.into();
        }
        if let Some(speed) = cli.camera_speed {
            self.camera_speed = speed;
        }
        if cli.no_animation {
            self.animate = false;
        }
        if let (Some(lat), Some(lon)) = (cli.lat, cli.lon) {
            self.latitude = Some(lat);
            self.longitude = Some(lon);
        }
        if let Some(path) = &cli.glyphs {
            self.glyph_file = Some(path.clone());
        }
        if let Some(category) = cli.fixed_weather() {
            self.weather = Some(category);
        }
        if cli.seed.is_some() {
            self.seed = cli.seed;
        }
    }

    #[must_use]
    pub fn location(&self) -> Option<Location> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(Location::from_coords(lat, lon)),
            _ => None,
        }
    }

    #[must_use]
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            layout: self.layout,
            density: self.density,
            angular_speed: if self.animate { self.camera_speed } else { 0.0 },
            seed: self.seed,
            ..EngineConfig::default()
        }
    }
}

pub fn load_runtime_settings(cli: &Cli, enable_disk: bool) -> (RuntimeSettings, Option<PathBuf>) {
    if !enable_disk {
        return (RuntimeSettings::from_cli_defaults(cli), None);
    }
    match settings_path() {
        Some(path) => (load_runtime_settings_from(cli, &path), Some(path)),
        None => (RuntimeSettings::from_cli_defaults(cli), None),
    }
}

/// Saved values first, then explicit flags on top.
pub fn load_runtime_settings_from(cli: &Cli, path: &Path) -> RuntimeSettings {
    let mut settings = match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<RuntimeSettings>(&content) {
            Ok(saved) => saved,
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "ignoring unreadable settings");
                RuntimeSettings::default()
            }
        },
        Err(_) => RuntimeSettings::default(),
    };
    settings.apply_cli(cli);
    settings
}

pub fn save_runtime_settings(path: &Path, settings: &RuntimeSettings) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("creating settings directory failed")?;
    }
    let payload =
        serde_json::to_string_pretty(settings).context("serializing settings payload failed")?;
    fs::write(path, payload).context("writing settings file failed")
}

pub fn config_dir() -> Option<PathBuf> {
    if let Some(base) = std::env::var_os(CONFIG_DIR_ENV) {
        return Some(PathBuf::from(base));
    }
    let home = std::env::var_os("HOME")?;
    Some(PathBuf::from(home).join(".config").join("skyclock"))
}

pub fn settings_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("settings.json"))
}
