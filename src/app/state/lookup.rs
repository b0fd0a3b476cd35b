use tokio::sync::mpsc;

use super::AppState;
use crate::{
    app::events::AppEvent,
    data::{
        conditions::ConditionsClient,
        geoip::{resolve_location, resolve_location_from},
    },
    domain::weather::Location,
};

impl AppState {
    /// The location a cycle queries without detection. A resolved
    /// fallback is never promoted to this, so every cycle retries detection.
    pub fn configured_location(&self) -> Option<Location> {
        self.settings.location()
    }

    /// Starts one classification cycle in the background. At most one cycle
    /// runs at a time; a pinned category never starts one.
    pub(crate) fn start_lookup(&mut self, tx: &mpsc::Sender<AppEvent>) {
        if self.fetch_in_flight || self.settings.weather.is_some() {
            return;
        }
        self.fetch_in_flight = true;

        let client = match &self.conditions_url {
            Some(url) => ConditionsClient::with_base_url(url.clone()),
            None => ConditionsClient::new(),
        };
        let configured = self.configured_location();
        let geoip_url = self.geoip_url.clone();
        let tx2 = tx.clone();
        tokio::spawn(async move {
            let location = match geoip_url {
                Some(url) => resolve_location_from(configured, &url).await,
                None => resolve_location(configured).await,
            };
            let event = match client.fetch(&location).await {
                Ok(report) => AppEvent::WeatherClassified(report),
                Err(err) => AppEvent::WeatherFailed(format!("{err:#}")),
            };
            let _ = tx2.send(event).await;
        });
    }
}
