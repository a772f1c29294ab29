// Copyright (c) 2026, Trace Draw contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing canvas.
//!
//! Shows the cropped image as a tracing underlay on a square canvas of the
//! configured backing dimension, replays the annotation log on top of it,
//! and reports pointer gestures to the app. Only the strokes and the text
//! label end up in the export; the underlay is screen-only.

use crate::app::Mode;
use crate::models::annotation::{AnnotationLog, CapStyle, Point};
use crate::util::geometry;

/// Result of drawing canvas interaction.
pub enum DrawAction {
    None,
    StrokeBegun(Point),
    StrokeMoved(Point),
    StrokeEnded,
    TextMoved(Point),
}

/// Display the drawing canvas and translate pointer input into canvas-space
/// gesture events.
pub fn show(
    ui: &mut egui::Ui,
    underlay: Option<&egui::TextureHandle>,
    log: &AnnotationLog,
    mode: Mode,
    dimension: u32,
    font_size: f32,
) -> DrawAction {
    let mut action = DrawAction::None;
    let available_size = ui.available_size();

    egui::Frame::canvas(ui.style()).show(ui, |ui| {
        ui.set_min_size(available_size);

        // The canvas is always square; fit it like a square image.
        let canvas_rect = geometry::fit_rect(ui.min_rect(), dimension, dimension);
        let painter = ui.painter().with_clip_rect(canvas_rect);

        painter.rect_filled(canvas_rect, 0.0, egui::Color32::WHITE);
        if let Some(texture) = underlay {
            painter.image(
                texture.id(),
                canvas_rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        }

        replay(&painter, log, canvas_rect, dimension, font_size);

        let response = ui.allocate_rect(canvas_rect, egui::Sense::click_and_drag());
        let pointer_pos = response
            .interact_pointer_pos()
            .or_else(|| response.hover_pos());

        if let Some(pos) = pointer_pos {
            let point = geometry::screen_to_canvas(pos, canvas_rect, dimension, dimension);
            let held = response.is_pointer_button_down_on();
            let pressed_now = ui.input(|i| i.pointer.primary_pressed());
            match mode {
                Mode::PlaceText => {
                    if pressed_now && canvas_rect.contains(pos) {
                        action = DrawAction::TextMoved(point);
                    }
                }
                Mode::Draw => {
                    if held && !log.is_drawing() && canvas_rect.contains(pos) {
                        action = DrawAction::StrokeBegun(point);
                    } else if log.is_drawing() {
                        if held && canvas_rect.contains(pos) {
                            // Append only on actual movement, not every frame.
                            let moved = log
                                .strokes()
                                .last()
                                .and_then(|s| s.points.last())
                                .map_or(true, |last| *last != point);
                            if moved {
                                action = DrawAction::StrokeMoved(point);
                            }
                        } else {
                            action = DrawAction::StrokeEnded;
                        }
                    }
                }
            }
        } else if log.is_drawing() {
            action = DrawAction::StrokeEnded;
        }
    });

    ui.separator();
    ui.horizontal(|ui| {
        ui.label(match mode {
            Mode::Draw => "Drag to draw",
            Mode::PlaceText => "Click to place the text",
        });
        ui.separator();
        ui.label(format!(
            "{} strokes, canvas {}x{}",
            log.strokes().len(),
            dimension,
            dimension
        ));
    });

    action
}

/// Replay the model through the egui painter, mirroring the raster
/// renderer used for export.
fn replay(
    painter: &egui::Painter,
    log: &AnnotationLog,
    canvas_rect: egui::Rect,
    dimension: u32,
    font_size: f32,
) {
    let scale = canvas_rect.width() / dimension as f32;

    for stroke in log.strokes() {
        let screen_points: Vec<egui::Pos2> = stroke
            .points
            .iter()
            .map(|p| geometry::canvas_to_screen(*p, canvas_rect, dimension, dimension))
            .collect();

        let width = (stroke.line_width * scale).max(1.0);
        let ink = egui::Stroke::new(width, egui::Color32::BLACK);
        for pair in screen_points.windows(2) {
            painter.line_segment([pair[0], pair[1]], ink);
        }
        if stroke.cap == CapStyle::Rounded {
            for point in &screen_points {
                painter.circle_filled(*point, width / 2.0, egui::Color32::BLACK);
            }
        } else if screen_points.len() == 1 {
            let half = width / 2.0;
            painter.rect_filled(
                egui::Rect::from_center_size(screen_points[0], egui::vec2(half * 2.0, half * 2.0)),
                0.0,
                egui::Color32::BLACK,
            );
        }
    }

    if let Some(annotation) = log.text() {
        let pos = geometry::canvas_to_screen(annotation.position, canvas_rect, dimension, dimension);
        painter.text(
            pos,
            egui::Align2::LEFT_TOP,
            &annotation.text,
            egui::FontId::proportional(font_size * scale),
            egui::Color32::BLACK,
        );
    }
}
