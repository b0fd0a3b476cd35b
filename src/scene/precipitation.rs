//! Falling rain or snow.
//!
//! Particles are stored as flat buffers (xyz triples plus per-particle size)
//! in the layout a vertex buffer expects. Each step moves every particle down
//! by the same speed; anything that drops below the floor is re-seeded above
//! the view in that same step, so the effect loops forever with a fixed
//! budget.

use std::ops::Range;

use rand::{Rng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    domain::weather::{Intensity, PrecipitationKind},
    scene::{
        error::SceneError,
        resources::{GpuHandle, ResourceKind, ResourceLedger},
    },
};

pub const FLOOR_Y: f32 = -20.0;
pub const CEILING_Y: f32 = 30.0;
pub const SPAWN_Y: Range<f32> = 20.0..CEILING_Y;
pub const SEED_Y: Range<f32> = FLOOR_Y..CEILING_Y;
pub const X_RANGE: Range<f32> = -50.0..50.0;
pub const Z_RANGE: Range<f32> = -25.0..25.0;

const FIELD_LABEL: &str = "precipitation";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDensity {
    pub light: usize,
    pub heavy: usize,
}

impl Default for FieldDensity {
    fn default() -> Self {
        Self {
            light: 1500,
            heavy: 3000,
        }
    }
}

impl FieldDensity {
    pub fn count_for(&self, intensity: Intensity) -> usize {
        match intensity {
            Intensity::Light => self.light,
            Intensity::Heavy => self.heavy,
        }
    }
}

#[must_use]
pub fn fall_speed(kind: PrecipitationKind, intensity: Intensity) -> f32 {
    match (kind, intensity) {
        (PrecipitationKind::Rain, Intensity::Light) => 0.30,
        (PrecipitationKind::Rain, Intensity::Heavy) => 0.55,
        (PrecipitationKind::Snow, Intensity::Light) => 0.05,
        (PrecipitationKind::Snow, Intensity::Heavy) => 0.10,
    }
}

fn size_range(kind: PrecipitationKind) -> Range<f32> {
    match kind {
        PrecipitationKind::Rain => 0.08..0.15,
        PrecipitationKind::Snow => 0.20..0.45,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: [f32; 3],
    pub size: f32,
    pub birth_height: f32,
}

#[derive(Debug)]
pub struct PrecipitationField {
    kind: PrecipitationKind,
    intensity: Intensity,
    speed: f32,
    positions: Vec<f32>,
    sizes: Vec<f32>,
    birth_heights: Vec<f32>,
    rng: StdRng,
    steps: u64,
    recycled: u64,
    position_buffer: GpuHandle,
    size_buffer: GpuHandle,
    material: GpuHandle,
}

impl PrecipitationField {
    pub fn create(
        kind: PrecipitationKind,
        intensity: Intensity,
        density: FieldDensity,
        mut rng: StdRng,
        ledger: &mut ResourceLedger,
    ) -> Self {
        let count = density.count_for(intensity);
        let sizes_range = size_range(kind);
        let mut positions = Vec::with_capacity(count * 3);
        let mut sizes = Vec::with_capacity(count);
        let mut birth_heights = Vec::with_capacity(count);
        for _ in 0..count {
            let y = rng.random_range(SEED_Y);
            positions.extend_from_slice(&[
                rng.random_range(X_RANGE),
                y,
                rng.random_range(Z_RANGE),
            ]);
            sizes.push(rng.random_range(sizes_range.clone()));
            birth_heights.push(y);
        }

        tracing::debug!(?kind, ?intensity, count, "precipitation field created");
        Self {
            kind,
            intensity,
            speed: fall_speed(kind, intensity),
            positions,
            sizes,
            birth_heights,
            rng,
            steps: 0,
            recycled: 0,
            position_buffer: ledger.allocate(ResourceKind::Geometry, FIELD_LABEL),
            size_buffer: ledger.allocate(ResourceKind::Geometry, FIELD_LABEL),
            material: ledger.allocate(ResourceKind::Material, FIELD_LABEL),
        }
    }

    /// One simulation step. Fails only if the buffers disagree on the
    /// particle count, in which case nothing is moved.
    pub fn advance(&mut self) -> Result<(), SceneError> {
        if self.positions.len() != self.sizes.len() * 3 {
            return Err(SceneError::FieldCorrupted {
                positions: self.positions.len() / 3,
                sizes: self.sizes.len(),
            });
        }

        for (idx, xyz) in self.positions.chunks_exact_mut(3).enumerate() {
            xyz[1] -= self.speed;
            if xyz[1] < FLOOR_Y {
                let y = self.rng.random_range(SPAWN_Y);
                xyz[0] = self.rng.random_range(X_RANGE);
                xyz[1] = y;
                xyz[2] = self.rng.random_range(Z_RANGE);
                self.birth_heights[idx] = y;
                self.recycled += 1;
            }
        }
        self.steps += 1;
        Ok(())
    }

    pub fn destroy(self, ledger: &mut ResourceLedger) {
        ledger.release(self.position_buffer);
        ledger.release(self.size_buffer);
        ledger.release(self.material);
        tracing::debug!(
            kind = ?self.kind,
            steps = self.steps,
            recycled = self.recycled,
            "precipitation field destroyed"
        );
    }

    pub fn kind(&self) -> PrecipitationKind {
        self.kind
    }

    pub fn intensity(&self) -> Intensity {
        self.intensity
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    #[cfg(test)]
    pub(crate) fn recycled(&self) -> u64 {
        self.recycled
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }

    pub fn particle(&self, idx: usize) -> Option<Particle> {
        let xyz = self.positions.get(idx * 3..idx * 3 + 3)?;
        Some(Particle {
            position: [xyz[0], xyz[1], xyz[2]],
            size: *self.sizes.get(idx)?,
            birth_height: *self.birth_heights.get(idx)?,
        })
    }

    pub fn particles(&self) -> impl Iterator<Item = Particle> + '_ {
        (0..self.len()).filter_map(|idx| self.particle(idx))
    }

    #[cfg(test)]
    pub(crate) fn corrupt_for_test(&mut self) {
        self.sizes.pop();
    }
}
