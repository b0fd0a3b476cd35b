use reqwest::Client;
use serde::Deserialize;

use crate::domain::weather::Location;

const GEOIP_URL: &str = "https://ipapi.co/json/";

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    city: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

pub async fn detect_location() -> Option<Location> {
    detect_location_from(GEOIP_URL).await
}

pub async fn detect_location_from(url: &str) -> Option<Location> {
    let client = Client::builder()
        .timeout(std::time::Duration::from_secs(5))
        .build()
        .ok()?;
    let response: IpApiResponse = client
        .get(url)
        .send()
        .await
        .ok()?
        .json()
        .await
        .ok()?;
    let latitude = response.latitude?;
    let longitude = response.longitude?;
    let name = response
        .city
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| format!("{latitude:.4}, {longitude:.4}"));
    Some(Location {
        name,
        latitude,
        longitude,
    })
}

/// Picks the location to query: explicit coordinates win, then IP
/// geolocation, then the fixed fallback.
pub async fn resolve_location(explicit: Option<Location>) -> Location {
    resolve_location_from(explicit, GEOIP_URL).await
}

pub async fn resolve_location_from(explicit: Option<Location>, geoip_url: &str) -> Location {
    if let Some(location) = explicit {
        return location;
    }
    if let Some(location) = detect_location_from(geoip_url).await {
        tracing::info!(name = %location.name, "location detected");
        return location;
    }
    let fallback = Location::fallback();
    tracing::warn!(name = %fallback.name, "location unavailable, using fallback");
    fallback
}
