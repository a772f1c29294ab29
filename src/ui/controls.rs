// Copyright (c) 2026, Trace Draw contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Footer control bars for the crop and drawing stages.

use crate::app::Mode;
use crate::io::export::ExportFormat;
use crate::models::session::Settings;

/// Result of the crop footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropControlsAction {
    None,
    ConfirmCrop,
}

/// Footer for the crop stage: canvas dimension input and the Done button.
pub fn crop_controls(ui: &mut egui::Ui, settings: &mut Settings) -> CropControlsAction {
    let mut action = CropControlsAction::None;
    ui.horizontal(|ui| {
        ui.label("Width and height in pixels:");
        ui.add(
            egui::TextEdit::singleline(&mut settings.dimension_input).desired_width(80.0),
        );
        ui.separator();
        if ui.button("Done").clicked() {
            action = CropControlsAction::ConfirmCrop;
        }
    });
    action
}

/// Result of the drawing footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawControlsAction {
    None,
    ToggleTextMode,
    TextEdited,
    Revert,
    Export(ExportFormat),
}

/// Footer for the drawing stage. Which inputs appear depends on the mode,
/// like the original toolbar: stroke settings while drawing, text and font
/// settings while placing text.
pub fn draw_controls(
    ui: &mut egui::Ui,
    settings: &mut Settings,
    mode: Mode,
    text_buffer: &mut String,
) -> DrawControlsAction {
    let mut action = DrawControlsAction::None;
    ui.horizontal(|ui| {
        match mode {
            Mode::PlaceText => {
                let edited = ui
                    .add(egui::TextEdit::singleline(text_buffer).desired_width(160.0))
                    .changed();
                ui.label("Font size:");
                ui.add(
                    egui::TextEdit::singleline(&mut settings.font_size_input).desired_width(50.0),
                );
                if edited {
                    action = DrawControlsAction::TextEdited;
                }
            }
            Mode::Draw => {
                ui.label("Stroke width:");
                ui.add(
                    egui::TextEdit::singleline(&mut settings.line_width_input).desired_width(50.0),
                );
                ui.checkbox(&mut settings.rounded_caps, "Rounded caps");
            }
        }

        ui.separator();
        let toggle_label = match mode {
            Mode::PlaceText => "Draw",
            Mode::Draw => "Add Text",
        };
        if ui.button(toggle_label).clicked() {
            action = DrawControlsAction::ToggleTextMode;
        }
        if ui.button("Revert").clicked() {
            action = DrawControlsAction::Revert;
        }

        ui.separator();
        ui.checkbox(&mut settings.white_background, "White background for JPEG");
        if ui.button("Export PNG").clicked() {
            action = DrawControlsAction::Export(ExportFormat::Png);
        }
        if ui.button("Export JPEG").clicked() {
            action = DrawControlsAction::Export(ExportFormat::Jpeg);
        }
    });
    action
}
