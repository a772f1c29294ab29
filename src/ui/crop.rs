// Copyright (c) 2026, Trace Draw contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Crop selection canvas.
//!
//! Displays the uploaded image with the dashed square selection outline
//! and reports pointer gestures back to the app, which feeds them into the
//! crop state machine. The outline is redrawn over the image every frame.

use crate::models::annotation::Point;
use crate::models::crop::CropInteraction;
use crate::util::geometry;

/// Result of crop canvas interaction.
pub enum CropAction {
    None,
    DragBegun(Point),
    DragMoved(Point),
    DragEnded(Point),
}

/// Display the crop canvas and translate pointer input into image-space
/// gesture events.
pub fn show(
    ui: &mut egui::Ui,
    texture: Option<&egui::TextureHandle>,
    interaction: &CropInteraction,
) -> CropAction {
    let mut action = CropAction::None;
    let available_size = ui.available_size();

    egui::Frame::canvas(ui.style()).show(ui, |ui| {
        ui.set_min_size(available_size);

        let Some(texture) = texture else {
            ui.centered_and_justified(|ui| {
                ui.label(egui::RichText::new("Loading image...").color(egui::Color32::WHITE));
            });
            return;
        };

        let (image_width, image_height) = interaction.image_size();
        let image_rect = geometry::fit_rect(ui.min_rect(), image_width, image_height);

        ui.painter().image(
            texture.id(),
            image_rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );

        let response = ui.allocate_rect(image_rect, egui::Sense::click_and_drag());
        let pointer_pos = response
            .interact_pointer_pos()
            .or_else(|| response.hover_pos())
            .or_else(|| ui.input(|i| i.pointer.latest_pos()));

        if let Some(pos) = pointer_pos {
            let point = geometry::screen_to_canvas(pos, image_rect, image_width, image_height);
            let held = response.is_pointer_button_down_on();
            if held && !interaction.is_dragging() && image_rect.contains(pos) {
                action = CropAction::DragBegun(point);
            } else if interaction.is_dragging() {
                // Releasing the button or leaving the surface both end the
                // gesture, like mouseup/mouseleave.
                if held && image_rect.contains(pos) {
                    action = CropAction::DragMoved(point);
                } else {
                    action = CropAction::DragEnded(point);
                }
            }
        }

        draw_selection_outline(ui.painter(), interaction, image_rect);
    });

    ui.separator();
    ui.horizontal(|ui| {
        let region = interaction.region();
        ui.label(format!(
            "Selection: {:.0}x{:.0} at ({:.0}, {:.0})",
            region.size, region.size, region.x, region.y
        ));
        ui.separator();
        ui.label("Click to place the square, drag to resize it");
    });

    action
}

/// Dashed green square over the restored image, scaled with the display.
fn draw_selection_outline(
    painter: &egui::Painter,
    interaction: &CropInteraction,
    image_rect: egui::Rect,
) {
    let (image_width, image_height) = interaction.image_size();
    let region = interaction.region();

    let min = geometry::canvas_to_screen(
        Point::new(region.x, region.y),
        image_rect,
        image_width,
        image_height,
    );
    let max = geometry::canvas_to_screen(
        Point::new(region.x + region.size, region.y + region.size),
        image_rect,
        image_width,
        image_height,
    );

    let scale = image_rect.width() / image_width as f32;
    let line_width = (interaction.outline_width() * scale).max(1.0);
    let dash = 3.0 * line_width;

    let corners = [
        min,
        egui::pos2(max.x, min.y),
        max,
        egui::pos2(min.x, max.y),
        min,
    ];
    painter.extend(egui::Shape::dashed_line(
        &corners,
        egui::Stroke::new(line_width, egui::Color32::GREEN),
        dash,
        dash,
    ));
}
