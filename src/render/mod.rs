// Copyright (c) 2026, Trace Draw contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Raster replay of the annotation log.
//!
//! Rendering is a pure function of the accumulated model: clear the
//! surface, optionally fill a solid background for lossy export, replay
//! every stroke with its own stored width and cap, then draw the text
//! label. Full redraw every time; surfaces are small and renders are
//! user-gesture-triggered.

use crate::models::annotation::{AnnotationLog, CapStyle, Point, Stroke, TextAnnotation};
use ab_glyph::{Font, FontArc, ScaleFont};
use anyhow::{anyhow, Context};
use image::{Rgba, RgbaImage};

const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Rendering options that are not stored per annotation.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Fill the surface white instead of leaving it transparent. JPEG has
    /// no alpha channel, so lossy export wants this on.
    pub white_background: bool,
    /// Current font size for the text label.
    pub font_size: f32,
}

/// Font for exported text, taken from egui's bundled font data so the
/// binary needs no extra asset.
pub fn embedded_font() -> anyhow::Result<FontArc> {
    let definitions = egui::FontDefinitions::default();
    let data = definitions
        .font_data
        .get("Ubuntu-Light")
        .or_else(|| definitions.font_data.values().next())
        .ok_or_else(|| anyhow!("egui ships no font data"))?;
    FontArc::try_from_vec(data.font.clone().into_owned()).context("failed to parse bundled font")
}

/// Replay the whole log onto a fresh square surface of the given backing
/// dimension.
pub fn render(
    log: &AnnotationLog,
    dimension: u32,
    options: &RenderOptions,
    font: &FontArc,
) -> RgbaImage {
    let background = if options.white_background {
        WHITE
    } else {
        TRANSPARENT
    };
    let mut surface = RgbaImage::from_pixel(dimension.max(1), dimension.max(1), background);

    for stroke in log.strokes() {
        draw_stroke(&mut surface, stroke);
    }
    if let Some(annotation) = log.text() {
        draw_text(&mut surface, annotation, options.font_size, font);
    }
    surface
}

/// Stamp a stroke's polyline onto the surface. Each segment is sampled
/// densely and a brush footprint is stamped at every sample; the footprint
/// shape is what makes the cap style visible.
fn draw_stroke(surface: &mut RgbaImage, stroke: &Stroke) {
    let half = (stroke.line_width / 2.0).max(0.5);
    match stroke.points.as_slice() {
        [] => {}
        [only] => stamp(surface, *only, half, stroke.cap),
        points => {
            for pair in points.windows(2) {
                stamp_segment(surface, pair[0], pair[1], half, stroke.cap);
            }
        }
    }
}

fn stamp_segment(surface: &mut RgbaImage, from: Point, to: Point, half: f32, cap: CapStyle) {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let len = (dx * dx + dy * dy).sqrt();
    let steps = ((len * 2.0) as i32).max(1);
    for i in 0..=steps {
        let t = i as f64 / steps as f64;
        stamp(
            surface,
            Point::new(from.x + dx * t, from.y + dy * t),
            half,
            cap,
        );
    }
}

fn stamp(surface: &mut RgbaImage, center: Point, half: f32, cap: CapStyle) {
    let (w, h) = (surface.width() as i32, surface.height() as i32);
    let cx = center.x.round() as i32;
    let cy = center.y.round() as i32;
    let reach = half.round() as i32;
    for oy in -reach..=reach {
        for ox in -reach..=reach {
            if cap == CapStyle::Rounded && (ox * ox + oy * oy) as f32 > half * half {
                continue;
            }
            let px = cx + ox;
            let py = cy + oy;
            if px >= 0 && px < w && py >= 0 && py < h {
                surface.put_pixel(px as u32, py as u32, INK);
            }
        }
    }
}

/// Draw the label with its baseline one font-height below the stored
/// position, matching how it is anchored on screen.
fn draw_text(surface: &mut RgbaImage, annotation: &TextAnnotation, font_size: f32, font: &FontArc) {
    let scaled = font.as_scaled(font_size);
    let baseline_y = annotation.position.y as f32 + font_size;
    let mut cursor_x = annotation.position.x as f32;
    let mut previous: Option<ab_glyph::GlyphId> = None;

    for ch in annotation.text.chars() {
        let glyph_id = font.glyph_id(ch);
        if let Some(prev) = previous {
            cursor_x += scaled.kern(prev, glyph_id);
        }
        let glyph = glyph_id.with_scale_and_position(font_size, ab_glyph::point(cursor_x, baseline_y));
        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|px, py, coverage| {
                let x = bounds.min.x + px as f32;
                let y = bounds.min.y + py as f32;
                if x >= 0.0 && y >= 0.0 && (x as u32) < surface.width() && (y as u32) < surface.height()
                {
                    let alpha = (coverage * 255.0).round().min(255.0) as u8;
                    blend_ink(surface, x as u32, y as u32, alpha);
                }
            });
        }
        cursor_x += scaled.h_advance(glyph_id);
        previous = Some(glyph_id);
    }
}

/// Source-over blend of black ink with the given alpha onto one pixel.
fn blend_ink(surface: &mut RgbaImage, x: u32, y: u32, alpha: u8) {
    if alpha == 0 {
        return;
    }
    let Rgba([br, bg, bb, ba]) = *surface.get_pixel(x, y);
    let a = alpha as f32 / 255.0;
    let blended = Rgba([
        (br as f32 * (1.0 - a)) as u8,
        (bg as f32 * (1.0 - a)) as u8,
        (bb as f32 * (1.0 - a)) as u8,
        (ba as f32 + (255.0 - ba as f32) * a) as u8,
    ]);
    surface.put_pixel(x, y, blended);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_font() -> FontArc {
        embedded_font().expect("bundled font should load")
    }

    fn options() -> RenderOptions {
        RenderOptions {
            white_background: false,
            font_size: 60.0,
        }
    }

    #[test]
    fn test_empty_log_renders_transparent_surface() {
        let log = AnnotationLog::new();
        let surface = render(&log, 100, &options(), &test_font());
        assert_eq!(surface.dimensions(), (100, 100));
        assert_eq!(surface.get_pixel(50, 50), &TRANSPARENT);
    }

    #[test]
    fn test_white_background_option() {
        let log = AnnotationLog::new();
        let opts = RenderOptions {
            white_background: true,
            font_size: 60.0,
        };
        let surface = render(&log, 100, &opts, &test_font());
        assert_eq!(surface.get_pixel(0, 0), &WHITE);
        assert_eq!(surface.get_pixel(99, 99), &WHITE);
    }

    #[test]
    fn test_stroke_inks_its_path() {
        let mut log = AnnotationLog::new();
        log.begin_stroke(Point::new(10.0, 50.0), 5.0, CapStyle::Rounded);
        log.extend_stroke(Point::new(90.0, 50.0));
        log.end_stroke();

        let surface = render(&log, 100, &options(), &test_font());
        for x in [10u32, 50, 90] {
            assert_eq!(surface.get_pixel(x, 50), &INK, "missing ink at x={x}");
        }
        // Far from the stroke, the surface stays clear.
        assert_eq!(surface.get_pixel(50, 10), &TRANSPARENT);
    }

    #[test]
    fn test_cap_style_changes_the_brush_footprint() {
        let mut rounded = AnnotationLog::new();
        rounded.begin_stroke(Point::new(20.0, 20.0), 8.0, CapStyle::Rounded);
        rounded.end_stroke();
        let mut squared = AnnotationLog::new();
        squared.begin_stroke(Point::new(20.0, 20.0), 8.0, CapStyle::Squared);
        squared.end_stroke();

        let round_surface = render(&rounded, 100, &options(), &test_font());
        let square_surface = render(&squared, 100, &options(), &test_font());

        // The footprint corner is inked only by the squared brush.
        assert_eq!(round_surface.get_pixel(24, 24), &TRANSPARENT);
        assert_eq!(square_surface.get_pixel(24, 24), &INK);
        // Both ink the center.
        assert_eq!(round_surface.get_pixel(20, 20), &INK);
        assert_eq!(square_surface.get_pixel(20, 20), &INK);
    }

    #[test]
    fn test_text_label_is_rendered() {
        let mut log = AnnotationLog::new();
        log.place_or_edit_text("X", Point::new(10.0, 10.0));

        let surface = render(&log, 200, &options(), &test_font());
        let inked = surface.pixels().filter(|p| p.0[3] > 0).count();
        assert!(inked > 0, "text should ink at least one pixel");
    }

    #[test]
    fn test_replay_uses_per_stroke_width() {
        let mut log = AnnotationLog::new();
        log.begin_stroke(Point::new(50.0, 20.0), 2.0, CapStyle::Rounded);
        log.end_stroke();
        log.begin_stroke(Point::new(50.0, 70.0), 20.0, CapStyle::Rounded);
        log.end_stroke();

        let surface = render(&log, 100, &options(), &test_font());
        // Thin stroke: 6 px away is clear. Thick stroke: 6 px away is inked.
        assert_eq!(surface.get_pixel(56, 20), &TRANSPARENT);
        assert_eq!(surface.get_pixel(56, 70), &INK);
    }
}
