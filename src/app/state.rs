use std::time::Instant;

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;

use crate::{
    app::{
        events::{AppEvent, start_clock_task, start_frame_task, start_weather_task},
        settings::RuntimeSettings,
    },
    data::conditions::ConditionReport,
    domain::{
        time::TimeSample,
        weather::{Location, WeatherCategory},
    },
    scene::{
        FrameReport, SceneUpdateEngine, glyphs::GlyphAtlas, scheduler::FrameScheduler,
        weather_state::Transition,
    },
};

mod lookup;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Loading,
    Ready,
    Quit,
}

#[derive(Debug)]
pub struct AppState {
    pub mode: AppMode,
    pub running: bool,
    pub engine: SceneUpdateEngine,
    pub scheduler: FrameScheduler,
    pub settings: RuntimeSettings,
    /// Last resolved location, for display.
    pub location: Option<Location>,
    pub last_report: Option<ConditionReport>,
    pub last_frame: FrameReport,
    pub last_error: Option<String>,
    pub fetch_in_flight: bool,
    conditions_url: Option<String>,
    geoip_url: Option<String>,
}

impl AppState {
    /// Builds the scene in its initial state: sunny, with the current time
    /// on the clock face.
    pub fn new(settings: RuntimeSettings, glyphs: GlyphAtlas) -> Self {
        let mut engine = SceneUpdateEngine::new(&settings.engine_config(), glyphs);
        engine.on_weather_classified(WeatherCategory::Sunny);
        engine.on_second_tick(TimeSample::now());

        Self {
            mode: AppMode::Loading,
            running: true,
            engine,
            scheduler: FrameScheduler::new(Instant::now()),
            location: settings.location(),
            settings,
            last_report: None,
            last_frame: FrameReport::default(),
            last_error: None,
            fetch_in_flight: false,
            conditions_url: None,
            geoip_url: None,
        }
    }

    #[must_use]
    pub fn with_conditions_url(mut self, url: Option<String>) -> Self {
        self.conditions_url = url;
        self
    }

    #[must_use]
    pub fn with_geoip_url(mut self, url: Option<String>) -> Self {
        self.geoip_url = url;
        self
    }

    pub async fn handle_event(
        &mut self,
        event: AppEvent,
        tx: &mpsc::Sender<AppEvent>,
    ) -> Result<()> {
        match event {
            AppEvent::Bootstrap => self.bootstrap(tx),
            AppEvent::TickFrame => {
                if self.settings.animate {
                    let tick = self.scheduler.tick(Instant::now());
                    self.last_frame = self.engine.on_frame(tick.elapsed_ms);
                }
            }
            AppEvent::TickSecond => {
                self.engine.on_second_tick(TimeSample::now());
            }
            AppEvent::RefreshWeather => self.start_lookup(tx),
            AppEvent::WeatherClassified(report) => {
                self.fetch_in_flight = false;
                self.last_error = None;
                self.location = Some(report.location.clone());
                self.mode = AppMode::Ready;
                if let Transition::Applied { from, to } =
                    self.engine.on_weather_classified(report.category)
                {
                    tracing::debug!(
                        ?from,
                        ?to,
                        description = %report.description,
                        "conditions changed"
                    );
                }
                self.last_report = Some(report);
            }
            AppEvent::WeatherFailed(err) => {
                self.fetch_in_flight = false;
                self.mode = AppMode::Ready;
                tracing::warn!(%err, "weather lookup failed, keeping current scene");
                self.last_error = Some(err);
            }
            AppEvent::Input(event) => self.handle_input(event, tx).await?,
            AppEvent::Quit => {
                self.mode = AppMode::Quit;
            }
        }

        Ok(())
    }

    fn bootstrap(&mut self, tx: &mpsc::Sender<AppEvent>) {
        start_frame_task(tx.clone(), self.settings.fps);
        start_clock_task(tx.clone());
        match self.settings.weather {
            Some(category) => {
                tracing::info!(category = category.name(), "weather pinned, lookup disabled");
                self.engine.on_weather_classified(category);
                self.mode = AppMode::Ready;
            }
            None => start_weather_task(tx.clone(), self.settings.refresh_interval_secs),
        }
    }

    async fn handle_input(&mut self, event: Event, tx: &mpsc::Sender<AppEvent>) -> Result<()> {
        let Event::Key(key) = event else {
            return Ok(());
        };
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            tx.send(AppEvent::Quit).await?;
            return Ok(());
        }
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                tx.send(AppEvent::Quit).await?;
            }
            KeyCode::Char('r') => {
                tx.send(AppEvent::RefreshWeather).await?;
            }
            KeyCode::Char(ch) => {
                if let Some(category) = WeatherCategory::from_debug_key(ch) {
                    tracing::info!(category = category.name(), "debug weather selected");
                    self.engine.on_weather_classified(category);
                }
            }
            _ => {}
        }
        Ok(())
    }

    pub fn category(&self) -> Option<WeatherCategory> {
        self.engine.weather().category()
    }
}

#[cfg(test)]
mod tests;
