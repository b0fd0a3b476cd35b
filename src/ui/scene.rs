#![allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]

use glam::Vec3;

use crate::{
    domain::weather::{PrecipitationKind, Rgb},
    scene::{
        SceneView,
        clock_face::{DIGIT_HEIGHT, DigitMesh},
        glyphs::GlyphAtlas,
        precipitation::PrecipitationField,
    },
    ui::{
        canvas::Canvas,
        projection::{Projector, ScreenPoint},
    },
};

const SUN_DISTANCE: f32 = 60.0;
const SUN_COLOR: Rgb = Rgb::from_hex(0xFF_D7_00);
const RAIN_COLOR: Rgb = Rgb::from_hex(0xB0_C4_DE);
const SNOW_COLOR: Rgb = Rgb::from_hex(0xFF_FF_FF);
const SNOW_FLAKE_SIZE: f32 = 0.3;
/// Samples per glyph pixel along each axis.
const GLYPH_SUBSAMPLES: usize = 4;

pub fn draw_scene(view: &SceneView<'_>, width: u16, height: u16) -> Canvas {
    let mut canvas = Canvas::new(width, height, view.background);
    let projector = Projector::new(view.camera, width, height);

    if let Some(sun) = view.sun {
        paint_sky_gradient(&mut canvas, view.background);
        paint_sun(&mut canvas, &projector, sun);
    }
    if let Some(field) = view.field {
        paint_precipitation(&mut canvas, &projector, field);
    }
    for mesh in view.digits {
        paint_digit(&mut canvas, &projector, view.glyphs, mesh);
    }
    canvas
}

fn cell_of(point: ScreenPoint) -> (isize, isize) {
    (point.col.floor() as isize, point.row.floor() as isize)
}

fn paint_sky_gradient(canvas: &mut Canvas, horizon: Rgb) {
    let zenith = scale(horizon, 0.55);
    let rows = canvas.height().max(1);
    for y in 0..canvas.height() {
        let t = y as f32 / rows as f32;
        canvas.fill_row_bg(y, mix(zenith, horizon, t));
    }
}

fn paint_sun(canvas: &mut Canvas, projector: &Projector, direction: Vec3) {
    if let Some(point) = projector.project(direction * SUN_DISTANCE) {
        let (x, y) = cell_of(point);
        canvas.paint(x, y, '●', SUN_COLOR);
    }
}

fn paint_precipitation(canvas: &mut Canvas, projector: &Projector, field: &PrecipitationField) {
    let kind = field.kind();
    for (position, size) in field.positions().chunks_exact(3).zip(field.sizes()) {
        let Some(point) = projector.project(Vec3::from_slice(position)) else {
            continue;
        };
        let (x, y) = cell_of(point);
        match kind {
            PrecipitationKind::Rain => canvas.paint(x, y, '│', RAIN_COLOR),
            PrecipitationKind::Snow if *size >= SNOW_FLAKE_SIZE => {
                canvas.paint(x, y, '*', SNOW_COLOR);
            }
            PrecipitationKind::Snow => canvas.paint(x, y, '·', SNOW_COLOR),
        }
    }
}

/// Forward-samples every filled glyph pixel over the slot's quad at z = 0.
fn paint_digit(
    canvas: &mut Canvas,
    projector: &Projector,
    glyphs: &GlyphAtlas,
    mesh: &DigitMesh,
) {
    let glyph = glyphs.get(mesh.slot.glyph);
    let (gw, gh) = (glyph.width() as f32, glyph.height() as f32);
    if gw == 0.0 || gh == 0.0 {
        return;
    }
    let left = mesh.center_x - mesh.width / 2.0;
    let top = DIGIT_HEIGHT / 2.0;
    let step = 1.0 / GLYPH_SUBSAMPLES as f32;

    for row in 0..glyph.height() {
        for col in 0..glyph.width() {
            if !glyph.filled(col, row) {
                continue;
            }
            for sy in 0..GLYPH_SUBSAMPLES {
                for sx in 0..GLYPH_SUBSAMPLES {
                    let u = (col as f32 + (sx as f32 + 0.5) * step) / gw;
                    let v = (row as f32 + (sy as f32 + 0.5) * step) / gh;
                    let world = Vec3::new(left + u * mesh.width, top - v * DIGIT_HEIGHT, 0.0);
                    if let Some(point) = projector.project(world) {
                        let (x, y) = cell_of(point);
                        canvas.paint(x, y, '█', mesh.color);
                    }
                }
            }
        }
    }
}

fn scale(color: Rgb, factor: f32) -> Rgb {
    let channel = |c: u8| (f32::from(c) * factor).round().clamp(0.0, 255.0) as u8;
    Rgb(channel(color.0), channel(color.1), channel(color.2))
}

fn mix(a: Rgb, b: Rgb, t: f32) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let channel = |x: u8, y: u8| {
        (f32::from(x) + (f32::from(y) - f32::from(x)) * t)
            .round()
            .clamp(0.0, 255.0) as u8
    };
    Rgb(channel(a.0, b.0), channel(a.1, b.1), channel(a.2, b.2))
}
