//! The scene root.
//!
//! `SceneUpdateEngine` owns every entity in the scene and exposes the three
//! entry points the host drives: a per-frame tick, a 1 Hz clock tick and a
//! weather classification. Each runs to completion and only touches the
//! entities it owns, so the three can arrive in any order.

use glam::Vec3;
use rand::{SeedableRng, rngs::StdRng};

use crate::{
    domain::{
        time::TimeSample,
        weather::{Rgb, WeatherCategory},
    },
    scene::{
        camera::{CameraOrbit, CameraTransform, DEFAULT_ANGULAR_SPEED},
        clock_face::{ClockFace, ClockLayout, DigitMesh, DigitSlot},
        glyphs::GlyphAtlas,
        precipitation::{FieldDensity, PrecipitationField},
        resources::{ResourceKind, ResourceLedger},
        sky::SkyParams,
        weather_state::{Transition, WeatherState},
    },
};

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub layout: ClockLayout,
    pub digit_color: Rgb,
    pub warning_color: Rgb,
    pub density: FieldDensity,
    pub sky: SkyParams,
    pub angular_speed: f64,
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            layout: ClockLayout::Compact,
            digit_color: Rgb::from_hex(0xF5_F5_F5),
            warning_color: Rgb::from_hex(0xFF_45_00),
            density: FieldDensity::default(),
            sky: SkyParams::default(),
            angular_speed: DEFAULT_ANGULAR_SPEED,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubUpdate {
    Precipitation,
    Camera,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub skipped: Vec<SubUpdate>,
}

impl FrameReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Read-only snapshot handed to the render surface.
#[derive(Debug, Clone, Copy)]
pub struct SceneView<'a> {
    pub background: Rgb,
    pub category: Option<WeatherCategory>,
    pub digits: &'a [DigitMesh],
    pub glyphs: &'a GlyphAtlas,
    pub field: Option<&'a PrecipitationField>,
    pub sun: Option<Vec3>,
    pub camera: CameraTransform,
}

#[derive(Debug)]
pub struct SceneUpdateEngine {
    ledger: ResourceLedger,
    clock: ClockFace,
    weather: WeatherState,
    camera: CameraOrbit,
    glyphs: GlyphAtlas,
    rng: StdRng,
    frames: u64,
    skipped_updates: u64,
}

impl SceneUpdateEngine {
    pub fn new(config: &EngineConfig, glyphs: GlyphAtlas) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        Self {
            ledger: ResourceLedger::new(),
            clock: ClockFace::new(config.layout, config.digit_color, config.warning_color),
            weather: WeatherState::new(config.density, config.sky),
            camera: CameraOrbit::new(config.angular_speed),
            glyphs,
            rng,
            frames: 0,
            skipped_updates: 0,
        }
    }

    /// Advances the simulation by one frame. A failing sub-update is logged
    /// and skipped; the rest of the frame still runs.
    pub fn on_frame(&mut self, elapsed_ms: f64) -> FrameReport {
        let mut report = FrameReport::default();
        self.frames = self.frames.saturating_add(1);

        if let Some(field) = self.weather.field_mut()
            && let Err(err) = field.advance()
        {
            tracing::warn!(%err, frame = self.frames, "skipping precipitation update");
            report.skipped.push(SubUpdate::Precipitation);
        }

        if let Err(err) = self.camera.update(elapsed_ms) {
            tracing::warn!(%err, frame = self.frames, "skipping camera update");
            report.skipped.push(SubUpdate::Camera);
        }

        self.skipped_updates += report.skipped.len() as u64;
        report
    }

    pub fn on_second_tick(&mut self, now: TimeSample) -> Vec<DigitSlot> {
        self.clock.tick(now, &mut self.ledger)
    }

    pub fn on_weather_classified(&mut self, category: WeatherCategory) -> Transition {
        self.weather.apply(category, &mut self.ledger, &mut self.rng)
    }

    pub fn view(&self) -> SceneView<'_> {
        SceneView {
            background: self.weather.background(),
            category: self.weather.category(),
            digits: self.clock.meshes(),
            glyphs: &self.glyphs,
            field: self.weather.field(),
            sun: self.weather.sky().sun(),
            camera: self.camera.transform(),
        }
    }

    /// Releases every scene resource. The engine can be driven again
    /// afterwards; the next ticks rebuild what they need.
    pub fn shutdown(&mut self) {
        self.clock.clear(&mut self.ledger);
        self.weather.teardown(&mut self.ledger);
        tracing::info!(
            frames = self.frames,
            skipped = self.skipped_updates,
            geometry = self.ledger.live_of(ResourceKind::Geometry),
            material = self.ledger.live_of(ResourceKind::Material),
            "scene released"
        );
    }

    pub fn ledger(&self) -> &ResourceLedger {
        &self.ledger
    }

    pub fn weather(&self) -> &WeatherState {
        &self.weather
    }

    pub fn clock(&self) -> &ClockFace {
        &self.clock
    }

    pub fn camera(&self) -> &CameraOrbit {
        &self.camera
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[cfg(test)]
    pub(crate) fn weather_mut(&mut self) -> &mut WeatherState {
        &mut self.weather
    }
}
