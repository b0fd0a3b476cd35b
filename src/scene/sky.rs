use glam::Vec3;

use crate::scene::resources::{GpuHandle, ResourceKind, ResourceLedger};

const SKY_LABEL: &str = "sky";

/// Atmospheric scattering parameters for the clear-weather sky.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyParams {
    pub turbidity: f32,
    pub rayleigh: f32,
    pub mie_coefficient: f32,
    pub mie_directional_g: f32,
    pub elevation_deg: f32,
    pub azimuth_deg: f32,
}

impl Default for SkyParams {
    fn default() -> Self {
        Self {
            turbidity: 10.0,
            rayleigh: 2.0,
            mie_coefficient: 0.005,
            mie_directional_g: 0.8,
            elevation_deg: 2.0,
            azimuth_deg: 180.0,
        }
    }
}

/// Unit vector toward the sun. Uses the polar angle `phi = 90° - elevation`
/// and `theta = azimuth`, with y up.
#[must_use]
pub fn sun_direction(elevation_deg: f32, azimuth_deg: f32) -> Vec3 {
    let phi = (90.0 - elevation_deg).to_radians();
    let theta = azimuth_deg.to_radians();
    Vec3::new(
        phi.sin() * theta.sin(),
        phi.cos(),
        phi.sin() * theta.cos(),
    )
}

#[derive(Debug)]
struct SkyDome {
    geometry: GpuHandle,
    material: GpuHandle,
    sun: Vec3,
}

#[derive(Debug, Default)]
pub struct SkyBackdrop {
    params: SkyParams,
    dome: Option<SkyDome>,
}

impl SkyBackdrop {
    pub fn new(params: SkyParams) -> Self {
        Self { params, dome: None }
    }

    /// Returns `false` when the sky was already up.
    pub fn enable(&mut self, ledger: &mut ResourceLedger) -> bool {
        if self.dome.is_some() {
            return false;
        }
        self.dome = Some(SkyDome {
            geometry: ledger.allocate(ResourceKind::Geometry, SKY_LABEL),
            material: ledger.allocate(ResourceKind::Material, SKY_LABEL),
            sun: sun_direction(self.params.elevation_deg, self.params.azimuth_deg),
        });
        true
    }

    /// Returns `false` when there was nothing to release.
    pub fn disable(&mut self, ledger: &mut ResourceLedger) -> bool {
        let Some(dome) = self.dome.take() else {
            return false;
        };
        ledger.release(dome.geometry);
        ledger.release(dome.material);
        true
    }

    pub fn is_enabled(&self) -> bool {
        self.dome.is_some()
    }

    pub fn sun(&self) -> Option<Vec3> {
        self.dome.as_ref().map(|dome| dome.sun)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sun_on_horizon_points_along_azimuth() {
        let south = sun_direction(0.0, 180.0);
        assert!(south.abs_diff_eq(Vec3::new(0.0, 0.0, -1.0), 1e-6));
        let east = sun_direction(0.0, 90.0);
        assert!(east.abs_diff_eq(Vec3::new(1.0, 0.0, 0.0), 1e-6));
    }

    #[test]
    fn sun_at_zenith_points_up() {
        assert!(sun_direction(90.0, 37.0).abs_diff_eq(Vec3::Y, 1e-6));
    }

    #[test]
    fn default_sun_sits_just_above_horizon() {
        let params = SkyParams::default();
        let sun = sun_direction(params.elevation_deg, params.azimuth_deg);
        assert!((sun.length() - 1.0).abs() < 1e-5);
        assert!(sun.y > 0.0 && sun.y < 0.1);
    }

    #[test]
    fn enable_and_disable_are_idempotent() {
        let mut ledger = ResourceLedger::new();
        let mut sky = SkyBackdrop::default();

        assert!(!sky.disable(&mut ledger), "disable before enable is a no-op");
        assert!(sky.enable(&mut ledger));
        assert!(!sky.enable(&mut ledger));
        assert_eq!(ledger.live_count(), 2);
        assert!(sky.sun().is_some());

        assert!(sky.disable(&mut ledger));
        assert!(!sky.disable(&mut ledger));
        assert_eq!(ledger.live_count(), 0);
        assert!(!sky.is_enabled());
    }
}
