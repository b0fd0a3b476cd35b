use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;

use super::{AppMode, AppState};
use crate::{
    app::{events::AppEvent, settings::RuntimeSettings},
    data::conditions::report_for,
    domain::weather::{Location, WeatherCategory},
    scene::glyphs::GlyphAtlas,
};

fn test_state() -> AppState {
    let settings = RuntimeSettings {
        seed: Some(3),
        ..RuntimeSettings::default()
    };
    AppState::new(settings, GlyphAtlas::builtin())
}

fn key(code: KeyCode) -> AppEvent {
    AppEvent::Input(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
}

#[test]
fn starts_sunny_with_digits_on_screen() {
    let state = test_state();
    assert_eq!(state.category(), Some(WeatherCategory::Sunny));
    assert_eq!(state.engine.view().digits.len(), 6);
    assert!(state.engine.view().sun.is_some());
    assert_eq!(state.mode, AppMode::Loading);
}

#[tokio::test]
async fn classified_report_drives_scene() {
    let mut state = test_state();
    let (tx, _rx) = mpsc::channel(8);
    state.fetch_in_flight = true;
    let report = report_for(Location::fallback(), 65);
    state
        .handle_event(AppEvent::WeatherClassified(report), &tx)
        .await
        .expect("event");

    assert_eq!(state.category(), Some(WeatherCategory::HeavyRain));
    assert!(!state.fetch_in_flight);
    assert_eq!(state.mode, AppMode::Ready);
    assert_eq!(state.location, Some(Location::fallback()));
    assert_eq!(state.engine.view().field.map(|f| f.len()), Some(3000));
}

#[tokio::test]
async fn fallback_location_is_not_kept_for_the_next_cycle() {
    let mut state = test_state();
    let (tx, _rx) = mpsc::channel(8);
    state
        .handle_event(
            AppEvent::WeatherClassified(report_for(Location::fallback(), 0)),
            &tx,
        )
        .await
        .expect("event");

    assert_eq!(state.location, Some(Location::fallback()));
    assert_eq!(state.configured_location(), None);
}

#[test]
fn configured_coordinates_are_used_for_every_cycle() {
    let settings = RuntimeSettings {
        latitude: Some(59.3293),
        longitude: Some(18.0686),
        ..RuntimeSettings::default()
    };
    let state = AppState::new(settings, GlyphAtlas::builtin());
    assert_eq!(
        state.configured_location(),
        Some(Location::from_coords(59.3293, 18.0686))
    );
}

#[tokio::test]
async fn failed_lookup_keeps_previous_scene() {
    let mut state = test_state();
    let (tx, _rx) = mpsc::channel(8);
    state
        .handle_event(
            AppEvent::WeatherClassified(report_for(Location::fallback(), 71)),
            &tx,
        )
        .await
        .expect("event");
    state
        .handle_event(AppEvent::WeatherFailed("timeout".to_string()), &tx)
        .await
        .expect("event");

    assert_eq!(state.category(), Some(WeatherCategory::LightSnow));
    assert_eq!(state.last_error.as_deref(), Some("timeout"));
}

#[tokio::test]
async fn debug_keys_select_categories_directly() {
    let mut state = test_state();
    let (tx, _rx) = mpsc::channel(8);
    for (digit, expected) in [
        ('8', WeatherCategory::HeavySnow),
        ('2', WeatherCategory::PartlyCloudy),
        ('5', WeatherCategory::LightRain),
    ] {
        state
            .handle_event(key(KeyCode::Char(digit)), &tx)
            .await
            .expect("key");
        assert_eq!(state.category(), Some(expected));
    }
}

#[tokio::test]
async fn unbound_keys_are_ignored() {
    let mut state = test_state();
    let (tx, mut rx) = mpsc::channel(8);
    for code in [KeyCode::Char('9'), KeyCode::Char('0'), KeyCode::Left] {
        state.handle_event(key(code), &tx).await.expect("key");
    }
    assert_eq!(state.category(), Some(WeatherCategory::Sunny));
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn key_release_is_ignored() {
    let mut state = test_state();
    let (tx, _rx) = mpsc::channel(8);
    let mut release = KeyEvent::new(KeyCode::Char('6'), KeyModifiers::NONE);
    release.kind = KeyEventKind::Release;
    state
        .handle_event(AppEvent::Input(Event::Key(release)), &tx)
        .await
        .expect("key");
    assert_eq!(state.category(), Some(WeatherCategory::Sunny));
}

#[tokio::test]
async fn quit_and_refresh_keys_emit_events() {
    let mut state = test_state();
    let (tx, mut rx) = mpsc::channel(8);
    state.handle_event(key(KeyCode::Char('r')), &tx).await.expect("key");
    state.handle_event(key(KeyCode::Esc), &tx).await.expect("key");
    assert!(matches!(rx.recv().await, Some(AppEvent::RefreshWeather)));
    assert!(matches!(rx.recv().await, Some(AppEvent::Quit)));

    state.handle_event(AppEvent::Quit, &tx).await.expect("quit");
    assert_eq!(state.mode, AppMode::Quit);
}

#[tokio::test]
async fn lookup_is_skipped_while_in_flight_or_pinned() {
    let (tx, _rx) = mpsc::channel(8);

    let mut state = test_state();
    state.fetch_in_flight = true;
    state.start_lookup(&tx);
    assert!(state.fetch_in_flight);

    let mut pinned = AppState::new(
        RuntimeSettings {
            weather: Some(WeatherCategory::Overcast),
            ..RuntimeSettings::default()
        },
        GlyphAtlas::builtin(),
    );
    pinned.start_lookup(&tx);
    assert!(!pinned.fetch_in_flight);
}

#[tokio::test]
async fn bootstrap_applies_pinned_weather() {
    let mut state = AppState::new(
        RuntimeSettings {
            weather: Some(WeatherCategory::LightSnow),
            ..RuntimeSettings::default()
        },
        GlyphAtlas::builtin(),
    );
    let (tx, _rx) = mpsc::channel(64);
    state
        .handle_event(AppEvent::Bootstrap, &tx)
        .await
        .expect("bootstrap");
    assert_eq!(state.category(), Some(WeatherCategory::LightSnow));
    assert_eq!(state.mode, AppMode::Ready);
}

#[tokio::test]
async fn frame_ticks_are_ignored_without_animation() {
    let mut state = AppState::new(
        RuntimeSettings {
            animate: false,
            ..RuntimeSettings::default()
        },
        GlyphAtlas::builtin(),
    );
    let (tx, _rx) = mpsc::channel(8);
    state
        .handle_event(AppEvent::TickFrame, &tx)
        .await
        .expect("frame");
    assert_eq!(state.engine.frames(), 0);
}
