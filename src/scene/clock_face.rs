//! Digit row for the current time.
//!
//! Every tick throws the whole row away and builds a fresh one: meshes are
//! never mutated in place, so nothing from the previous second survives.
//! Slot widths are fixed per unit rather than measured from the glyph, which
//! keeps the row from jittering as digits change.

use serde::{Deserialize, Serialize};

use crate::{
    domain::{time::TimeSample, weather::Rgb},
    scene::resources::{GpuHandle, ResourceKind, ResourceLedger},
};

pub const WARNING_THRESHOLD: u32 = 50;
pub const DIGIT_WIDTH: f32 = 1.2;
pub const SEPARATOR_WIDTH: f32 = 0.5;
pub const SLOT_SPACING: f32 = 0.3;
pub const DIGIT_HEIGHT: f32 = 2.0;

const DIGIT_LABEL: &str = "digit";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockLayout {
    #[default]
    Compact,
    Punctuated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitSlot {
    pub glyph: char,
    pub slot_index: usize,
    pub emphasis: bool,
}

impl DigitSlot {
    pub fn is_separator(&self) -> bool {
        self.glyph == ':'
    }

    pub fn width(&self) -> f32 {
        if self.is_separator() {
            SEPARATOR_WIDTH
        } else {
            DIGIT_WIDTH
        }
    }
}

#[derive(Debug)]
pub struct DigitMesh {
    pub slot: DigitSlot,
    pub center_x: f32,
    pub width: f32,
    pub color: Rgb,
    geometry: GpuHandle,
    material: GpuHandle,
}

impl DigitMesh {
    fn release(self, ledger: &mut ResourceLedger) {
        ledger.release(self.geometry);
        ledger.release(self.material);
    }
}

#[must_use]
pub fn is_warning(seconds: u32) -> bool {
    seconds >= WARNING_THRESHOLD
}

#[must_use]
pub fn digit_slots(now: TimeSample, layout: ClockLayout) -> Vec<DigitSlot> {
    let digits = now.digits();
    let warning = is_warning(now.seconds());
    let mut glyphs: Vec<(char, bool)> = digits
        .chars()
        .enumerate()
        .map(|(idx, ch)| (ch, idx >= 4 && warning))
        .collect();
    if layout == ClockLayout::Punctuated {
        glyphs.insert(4, (':', false));
        glyphs.insert(2, (':', false));
    }
    glyphs
        .into_iter()
        .enumerate()
        .map(|(slot_index, (glyph, emphasis))| DigitSlot {
            glyph,
            slot_index,
            emphasis,
        })
        .collect()
}

#[must_use]
pub fn row_width(slots: &[DigitSlot]) -> f32 {
    let widths: f32 = slots.iter().map(DigitSlot::width).sum();
    widths + SLOT_SPACING * slots.len().saturating_sub(1) as f32
}

/// Center x of each slot, with the row spanning `[-total/2, total/2]`.
#[must_use]
pub fn slot_centers(slots: &[DigitSlot]) -> Vec<f32> {
    let mut cursor = -row_width(slots) / 2.0;
    slots
        .iter()
        .map(|slot| {
            let center = cursor + slot.width() / 2.0;
            cursor += slot.width() + SLOT_SPACING;
            center
        })
        .collect()
}

#[derive(Debug)]
pub struct ClockFace {
    layout: ClockLayout,
    normal_color: Rgb,
    warning_color: Rgb,
    meshes: Vec<DigitMesh>,
}

impl ClockFace {
    pub fn new(layout: ClockLayout, normal_color: Rgb, warning_color: Rgb) -> Self {
        Self {
            layout,
            normal_color,
            warning_color,
            meshes: Vec::new(),
        }
    }

    pub fn tick(&mut self, now: TimeSample, ledger: &mut ResourceLedger) -> Vec<DigitSlot> {
        self.clear(ledger);

        let slots = digit_slots(now, self.layout);
        let centers = slot_centers(&slots);
        self.meshes = slots
            .iter()
            .zip(centers)
            .map(|(slot, center_x)| DigitMesh {
                slot: *slot,
                center_x,
                width: slot.width(),
                color: if slot.emphasis {
                    self.warning_color
                } else {
                    self.normal_color
                },
                geometry: ledger.allocate(ResourceKind::Geometry, DIGIT_LABEL),
                material: ledger.allocate(ResourceKind::Material, DIGIT_LABEL),
            })
            .collect();
        tracing::trace!(digits = %now.digits(), "clock face rebuilt");
        slots
    }

    pub fn clear(&mut self, ledger: &mut ResourceLedger) {
        for mesh in self.meshes.drain(..) {
            mesh.release(ledger);
        }
    }

    pub fn meshes(&self) -> &[DigitMesh] {
        &self.meshes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgb = Rgb(255, 255, 255);
    const RED: Rgb = Rgb(255, 69, 0);

    fn sample(h: u32, m: u32, s: u32) -> TimeSample {
        TimeSample::new(h, m, s).unwrap()
    }

    fn emphasis_at(seconds: u32) -> bool {
        digit_slots(sample(12, 0, seconds), ClockLayout::Compact)
            .iter()
            .any(|slot| slot.emphasis)
    }

    #[test]
    fn compact_layout_has_six_digits() {
        let slots = digit_slots(sample(7, 3, 9), ClockLayout::Compact);
        let glyphs: String = slots.iter().map(|slot| slot.glyph).collect();
        assert_eq!(glyphs, "070309");
        assert!(slots.iter().enumerate().all(|(i, s)| s.slot_index == i));
    }

    #[test]
    fn punctuated_layout_adds_two_separators() {
        let slots = digit_slots(sample(23, 59, 1), ClockLayout::Punctuated);
        let glyphs: String = slots.iter().map(|slot| slot.glyph).collect();
        assert_eq!(glyphs, "23:59:01");
        assert_eq!(slots.iter().filter(|s| s.is_separator()).count(), 2);
    }

    #[test]
    fn emphasis_flips_at_threshold() {
        assert!(!emphasis_at(49));
        assert!(emphasis_at(50));
        assert!(emphasis_at(59));
        assert!(!emphasis_at(0));
    }

    #[test]
    fn emphasis_only_marks_seconds() {
        let slots = digit_slots(sample(5, 55, 55), ClockLayout::Punctuated);
        let flagged: Vec<usize> = slots
            .iter()
            .filter(|slot| slot.emphasis)
            .map(|slot| slot.slot_index)
            .collect();
        assert_eq!(flagged, vec![6, 7]);
    }

    #[test]
    fn row_is_centered_regardless_of_digits() {
        for layout in [ClockLayout::Compact, ClockLayout::Punctuated] {
            for now in [sample(0, 0, 0), sample(11, 11, 11), sample(23, 59, 59)] {
                let slots = digit_slots(now, layout);
                let centers = slot_centers(&slots);
                let left = centers[0] - slots[0].width() / 2.0;
                let last = slots.len() - 1;
                let right = centers[last] + slots[last].width() / 2.0;
                assert!((left + right).abs() < 1e-5, "{layout:?} {left} {right}");
                assert!((right - left - row_width(&slots)).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn layout_is_identical_for_different_digits() {
        let a = slot_centers(&digit_slots(sample(11, 11, 11), ClockLayout::Compact));
        let b = slot_centers(&digit_slots(sample(8, 8, 8), ClockLayout::Compact));
        assert_eq!(a, b);
    }

    #[test]
    fn tick_replaces_meshes_without_growth() {
        let mut ledger = ResourceLedger::new();
        let mut face = ClockFace::new(ClockLayout::Compact, WHITE, RED);
        face.tick(sample(10, 0, 0), &mut ledger);
        let after_first = ledger.live_count();
        assert_eq!(after_first, 12);

        for s in 1..60 {
            face.tick(sample(10, 0, s), &mut ledger);
        }
        assert_eq!(ledger.live_count(), after_first);
        assert_eq!(ledger.released_total(), 59 * 12);

        face.clear(&mut ledger);
        assert_eq!(ledger.live_count(), 0);
    }

    #[test]
    fn emphasis_changes_color_not_position() {
        let mut ledger = ResourceLedger::new();
        let mut face = ClockFace::new(ClockLayout::Compact, WHITE, RED);
        face.tick(sample(10, 0, 49), &mut ledger);
        let calm: Vec<(f32, Rgb)> = face.meshes().iter().map(|m| (m.center_x, m.color)).collect();
        face.tick(sample(10, 0, 50), &mut ledger);
        let warn: Vec<(f32, Rgb)> = face.meshes().iter().map(|m| (m.center_x, m.color)).collect();

        for (before, after) in calm.iter().zip(&warn) {
            assert_eq!(before.0, after.0);
        }
        assert_eq!(warn[5].1, RED);
        assert_eq!(warn[0].1, WHITE);
        assert_eq!(calm[5].1, WHITE);
    }
}
