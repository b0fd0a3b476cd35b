#![allow(dead_code)]

use skyclock::{
    app::{settings::RuntimeSettings, state::AppState},
    domain::weather::Location,
    scene::glyphs::GlyphAtlas,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

pub fn stockholm_location() -> Location {
    Location::from_coords(59.3293, 18.0686)
}

pub fn seeded_settings() -> RuntimeSettings {
    RuntimeSettings {
        seed: Some(17),
        latitude: Some(59.3293),
        longitude: Some(18.0686),
        ..RuntimeSettings::default()
    }
}

pub fn seeded_state() -> AppState {
    AppState::new(seeded_settings(), GlyphAtlas::builtin())
}

/// No configured coordinates, so every lookup goes through detection.
pub fn unlocated_state() -> AppState {
    let settings = RuntimeSettings {
        seed: Some(17),
        ..RuntimeSettings::default()
    };
    AppState::new(settings, GlyphAtlas::builtin())
}

pub const GEOIP_BODY: &str = r#"{"ip":"192.0.2.1","city":"Stockholm","country_name":"Sweden","latitude":59.3293,"longitude":18.0686}"#;

pub async fn geoip_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(GEOIP_BODY, "application/json"))
        .mount(&server)
        .await;
    server
}

pub fn geoip_endpoint(server: &MockServer) -> String {
    format!("{}/json/", server.uri())
}

pub fn conditions_body(code: u8) -> String {
    format!(
        r#"{{"latitude":59.33,"longitude":18.07,"current_units":{{"weather_code":"wmo code"}},"current":{{"time":"2026-02-12T10:00","interval":900,"weather_code":{code}}}}}"#
    )
}

/// Serves `code` for any conditions request at `/v1/forecast`.
pub async fn conditions_server(code: u8) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("current", "weather_code"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(conditions_body(code), "application/json"),
        )
        .mount(&server)
        .await;
    server
}

pub fn endpoint(server: &MockServer) -> String {
    format!("{}/v1/forecast", server.uri())
}
