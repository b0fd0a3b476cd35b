use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use tokio::{
    sync::mpsc::Sender,
    time::{MissedTickBehavior, interval},
};

use crate::data::conditions::ConditionReport;

#[derive(Debug)]
pub enum AppEvent {
    Bootstrap,
    TickFrame,
    TickSecond,
    RefreshWeather,
    WeatherClassified(ConditionReport),
    WeatherFailed(String),
    Input(Event),
    Quit,
}

pub fn spawn_input_task() -> impl futures::Stream<Item = Event> {
    EventStream::new().filter_map(|event| async move { event.ok() })
}

pub fn start_frame_task(tx: Sender<AppEvent>, fps: u8) {
    let fps = fps.clamp(15, 60);
    spawn_ticker(tx, Duration::from_millis(1000_u64 / u64::from(fps)), || {
        AppEvent::TickFrame
    });
}

/// Ticks once per wall-clock second. A late tick is dropped rather than
/// replayed, so the digits never race through a backlog.
pub fn start_clock_task(tx: Sender<AppEvent>) {
    spawn_ticker(tx, Duration::from_secs(1), || AppEvent::TickSecond);
}

/// First refresh fires immediately, then every `refresh_secs`.
pub fn start_weather_task(tx: Sender<AppEvent>, refresh_secs: u64) {
    spawn_ticker(tx, Duration::from_secs(refresh_secs.max(10)), || {
        AppEvent::RefreshWeather
    });
}

fn spawn_ticker(tx: Sender<AppEvent>, period: Duration, make: fn() -> AppEvent) {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            if tx.send(make()).await.is_err() {
                break;
            }
        }
    });
}
