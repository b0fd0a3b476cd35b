//! Weather-driven scene dressing.
//!
//! `apply` tears down whatever the previous category put into the scene
//! before building the next one, all within the same call, so a frame can
//! only ever observe the old set or the new set. The sky and the
//! precipitation field are never alive at the same time.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    domain::weather::{Rgb, WeatherCategory},
    scene::{
        precipitation::{FieldDensity, PrecipitationField},
        resources::ResourceLedger,
        sky::{SkyBackdrop, SkyParams},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Unchanged,
    Applied {
        from: Option<WeatherCategory>,
        to: WeatherCategory,
    },
}

#[derive(Debug)]
pub struct WeatherState {
    category: Option<WeatherCategory>,
    background: Rgb,
    sky: SkyBackdrop,
    field: Option<PrecipitationField>,
    density: FieldDensity,
    transitions: u64,
}

impl WeatherState {
    pub fn new(density: FieldDensity, sky: SkyParams) -> Self {
        Self {
            category: None,
            background: WeatherCategory::Sunny.background(),
            sky: SkyBackdrop::new(sky),
            field: None,
            density,
            transitions: 0,
        }
    }

    pub fn apply(
        &mut self,
        category: WeatherCategory,
        ledger: &mut ResourceLedger,
        rng: &mut StdRng,
    ) -> Transition {
        if self.category == Some(category) {
            return Transition::Unchanged;
        }

        if let Some(field) = self.field.take() {
            field.destroy(ledger);
        }

        if category == WeatherCategory::Sunny {
            self.sky.enable(ledger);
        } else {
            self.sky.disable(ledger);
            if let Some((kind, intensity)) = category.precipitation() {
                let field_rng = StdRng::seed_from_u64(rng.random());
                self.field = Some(PrecipitationField::create(
                    kind,
                    intensity,
                    self.density,
                    field_rng,
                    ledger,
                ));
            }
        }

        let from = self.category.replace(category);
        self.background = category.background();
        self.transitions += 1;
        tracing::info!(
            from = from.map_or("none", WeatherCategory::name),
            to = category.name(),
            background = %self.background,
            "weather applied"
        );
        Transition::Applied { from, to: category }
    }

    /// Releases everything this state owns.
    pub fn teardown(&mut self, ledger: &mut ResourceLedger) {
        if let Some(field) = self.field.take() {
            field.destroy(ledger);
        }
        self.sky.disable(ledger);
        self.category = None;
    }

    pub fn category(&self) -> Option<WeatherCategory> {
        self.category
    }

    pub fn background(&self) -> Rgb {
        self.background
    }

    pub fn sky(&self) -> &SkyBackdrop {
        &self.sky
    }

    pub fn field(&self) -> Option<&PrecipitationField> {
        self.field.as_ref()
    }

    pub fn field_mut(&mut self) -> Option<&mut PrecipitationField> {
        self.field.as_mut()
    }

    pub fn transitions(&self) -> u64 {
        self.transitions
    }
}
