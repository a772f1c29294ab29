// Copyright (c) 2026, Trace Draw contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module owns the session and drives the three stages of the tool:
//! pick an image, crop it to a square, then trace over it and export the
//! drawing. UI panels are pure functions returning action enums that are
//! applied here.

use crate::io::export::ExportFormat;
use crate::models::annotation::AnnotationLog;
use crate::models::crop::CropInteraction;
use crate::models::session::SessionState;
use crate::render::{self, RenderOptions};
use crate::ui::{controls, crop, draw};
use ab_glyph::FontArc;
use image::RgbaImage;
use std::sync::mpsc::{channel, Receiver};
use std::time::Instant;

/// Which view fills the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Upload,
    Crop,
    Annotate,
}

/// Pointer behavior on the drawing canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Draw,
    PlaceText,
}

/// Main application state.
pub struct TraceDrawApp {
    stage: Stage,
    mode: Mode,

    /// Uploaded/cropped images and user settings
    session: SessionState,

    /// Crop selection over the uploaded image
    crop: Option<CropInteraction>,

    /// Everything drawn in the current annotation session
    annotations: AnnotationLog,

    /// Live contents of the text label input
    text_buffer: String,

    /// Textures for display
    uploaded_texture: Option<egui::TextureHandle>,
    derived_texture: Option<egui::TextureHandle>,

    /// Font used when rasterizing exports, loaded on first use
    export_font: Option<FontArc>,

    /// Receiver for background image decoding. Picking a new file replaces
    /// the receiver, so a stale decode result is dropped instead of
    /// overwriting the newer selection.
    image_loader: Option<Receiver<Result<RgbaImage, String>>>,

    /// Loading state message
    loading_message: Option<String>,
}

impl Default for TraceDrawApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TraceDrawApp {
    /// Create a new trace-draw application instance.
    pub fn new() -> Self {
        Self {
            stage: Stage::Upload,
            mode: Mode::Draw,
            session: SessionState::new(),
            crop: None,
            annotations: AnnotationLog::new(),
            text_buffer: String::new(),
            uploaded_texture: None,
            derived_texture: None,
            export_font: None,
            image_loader: None,
            loading_message: None,
        }
    }

    /// Open the file picker and decode the chosen image on a background
    /// thread.
    fn pick_image(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"])
            .pick_file()
        else {
            return;
        };

        let (sender, receiver) = channel();
        self.image_loader = Some(receiver);
        self.loading_message = Some("Loading image...".to_string());

        std::thread::spawn(move || {
            let result = crate::io::media::load_image(&path)
                .map_err(|e| format!("Failed to load image: {e:#}"));
            if let Ok(ref image) = result {
                log::info!(
                    "Loaded image: {} ({}x{})",
                    path.display(),
                    image.width(),
                    image.height()
                );
            }
            let _ = sender.send(result);
        });
    }

    /// Consume a finished background decode, if any.
    fn poll_image_loader(&mut self, ctx: &egui::Context) {
        let Some(receiver) = &self.image_loader else {
            return;
        };
        let Ok(result) = receiver.try_recv() else {
            return;
        };
        self.image_loader = None;
        self.loading_message = None;

        match result {
            Ok(image) => {
                self.crop = Some(CropInteraction::new(image.width(), image.height()));
                self.uploaded_texture = Some(texture_from(ctx, "uploaded_image", &image));
                self.derived_texture = None;
                self.session.uploaded = Some(image);
                self.session.derived = None;
                self.annotations.clear();
                self.text_buffer.clear();
                self.mode = Mode::Draw;
                self.stage = Stage::Crop;
            }
            Err(e) => {
                // Leave whatever stage we were in showing its last state.
                log::error!("{e}");
            }
        }
    }

    /// Extract the selected square, making it the drawing underlay.
    fn confirm_crop(&mut self, ctx: &egui::Context) {
        let (Some(interaction), Some(uploaded)) = (&self.crop, &self.session.uploaded) else {
            return;
        };
        let derived = interaction.extract(uploaded);
        log::info!(
            "Cropped to {}x{} at ({:.0}, {:.0})",
            derived.width(),
            derived.height(),
            interaction.region().x,
            interaction.region().y
        );
        self.derived_texture = Some(texture_from(ctx, "derived_image", &derived));
        self.session.derived = Some(derived);
        self.annotations.clear();
        self.text_buffer.clear();
        self.mode = Mode::Draw;
        self.stage = Stage::Annotate;
    }

    /// Flip between freehand drawing and text placement. Entering text
    /// mode creates the label at the origin if none exists yet.
    fn toggle_text_mode(&mut self) {
        self.mode = match self.mode {
            Mode::Draw => {
                if self.annotations.text().is_none() {
                    self.annotations.edit_text(self.text_buffer.clone());
                }
                Mode::PlaceText
            }
            Mode::PlaceText => Mode::Draw,
        };
    }

    fn ensure_font(&mut self) -> anyhow::Result<FontArc> {
        if let Some(font) = &self.export_font {
            return Ok(font.clone());
        }
        let font = render::embedded_font()?;
        self.export_font = Some(font.clone());
        Ok(font)
    }

    /// Rasterize the annotation log and save it where the user chooses.
    fn export_drawing(&mut self, format: ExportFormat) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter(format.extension(), &[format.extension()])
            .set_file_name(format.default_file_name())
            .save_file()
        else {
            return;
        };

        let font = match self.ensure_font() {
            Ok(font) => font,
            Err(e) => {
                log::error!("Failed to load export font: {e:#}");
                return;
            }
        };

        let options = RenderOptions {
            white_background: self.session.settings.white_background
                && format == ExportFormat::Jpeg,
            font_size: self.session.settings.font_size(),
        };
        let surface = render::render(
            &self.annotations,
            self.session.settings.canvas_dimension(),
            &options,
            &font,
        );
        if let Err(e) = crate::io::export::save(&surface, format, &path) {
            log::error!("Failed to export drawing: {e:#}");
        }
    }

    fn apply_crop_action(&mut self, action: crop::CropAction) {
        let Some(interaction) = &mut self.crop else {
            return;
        };
        let now = Instant::now();
        match action {
            crop::CropAction::DragBegun(point) => interaction.begin_drag(point, now),
            crop::CropAction::DragMoved(point) => interaction.update_drag(point),
            crop::CropAction::DragEnded(point) => interaction.end_drag(point, now),
            crop::CropAction::None => {}
        }
    }

    fn apply_draw_action(&mut self, action: draw::DrawAction) {
        match action {
            draw::DrawAction::StrokeBegun(point) => {
                let settings = &self.session.settings;
                self.annotations
                    .begin_stroke(point, settings.line_width(), settings.cap_style());
            }
            draw::DrawAction::StrokeMoved(point) => self.annotations.extend_stroke(point),
            draw::DrawAction::StrokeEnded => {
                self.annotations.end_stroke();
                log::info!("Finished stroke, total: {}", self.annotations.strokes().len());
            }
            draw::DrawAction::TextMoved(point) => self.annotations.move_text(point),
            draw::DrawAction::None => {}
        }
    }

    fn menu_bar(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Open Image...").clicked() {
                    self.pick_image();
                    ui.close_menu();
                }
                ui.separator();
                let can_export = self.stage == Stage::Annotate;
                if ui
                    .add_enabled(can_export, egui::Button::new("Export as PNG..."))
                    .clicked()
                {
                    self.export_drawing(ExportFormat::Png);
                    ui.close_menu();
                }
                if ui
                    .add_enabled(can_export, egui::Button::new("Export as JPEG..."))
                    .clicked()
                {
                    self.export_drawing(ExportFormat::Jpeg);
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Quit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("Edit", |ui| {
                let can_revert =
                    self.stage == Stage::Annotate && !self.annotations.strokes().is_empty();
                if ui
                    .add_enabled(can_revert, egui::Button::new("Revert Stroke (Ctrl+Z)"))
                    .clicked()
                {
                    self.annotations.revert_last_stroke();
                    ui.close_menu();
                }
            });
        });
    }

    fn loading_overlay(ui: &mut egui::Ui, message: &str) {
        ui.centered_and_justified(|ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(20.0);
                ui.spinner();
                ui.add_space(10.0);
                ui.label(
                    egui::RichText::new(message)
                        .size(16.0)
                        .color(egui::Color32::from_gray(200)),
                );
            });
        });
    }

    fn upload_view(&mut self, ui: &mut egui::Ui) {
        ui.centered_and_justified(|ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(20.0);
                ui.heading(
                    egui::RichText::new("Trace Draw")
                        .size(32.0)
                        .color(egui::Color32::from_gray(200)),
                );
                ui.label(
                    egui::RichText::new("Crop an image, trace over it, export the drawing")
                        .size(14.0)
                        .color(egui::Color32::from_gray(150)),
                );
                ui.add_space(20.0);
                if ui.button("Choose an image...").clicked() {
                    self.pick_image();
                }
            });
        });
    }
}

impl eframe::App for TraceDrawApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_image_loader(ctx);

        // Request repaint if still loading (to update spinner)
        if self.loading_message.is_some() {
            ctx.request_repaint();
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            self.menu_bar(ui, ctx);
        });

        // Ctrl+Z pops the latest stroke; only one kind of history exists.
        if self.stage == Stage::Annotate
            && !ctx.wants_keyboard_input()
            && ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::Z))
        {
            self.annotations.revert_last_stroke();
        }

        // Stage footer
        match self.stage {
            Stage::Upload => {}
            Stage::Crop => {
                let action = egui::TopBottomPanel::bottom("crop_controls")
                    .show(ctx, |ui| {
                        controls::crop_controls(ui, &mut self.session.settings)
                    })
                    .inner;
                if action == controls::CropControlsAction::ConfirmCrop {
                    self.confirm_crop(ctx);
                }
            }
            Stage::Annotate => {
                let action = egui::TopBottomPanel::bottom("draw_controls")
                    .show(ctx, |ui| {
                        controls::draw_controls(
                            ui,
                            &mut self.session.settings,
                            self.mode,
                            &mut self.text_buffer,
                        )
                    })
                    .inner;
                match action {
                    controls::DrawControlsAction::ToggleTextMode => self.toggle_text_mode(),
                    controls::DrawControlsAction::TextEdited => {
                        self.annotations.edit_text(self.text_buffer.clone());
                    }
                    controls::DrawControlsAction::Revert => self.annotations.revert_last_stroke(),
                    controls::DrawControlsAction::Export(format) => self.export_drawing(format),
                    controls::DrawControlsAction::None => {}
                }
            }
        }

        // Main canvas (center)
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(message) = self.loading_message.clone() {
                Self::loading_overlay(ui, &message);
                return;
            }
            match self.stage {
                Stage::Upload => self.upload_view(ui),
                Stage::Crop => {
                    if let Some(interaction) = &self.crop {
                        let action = crop::show(ui, self.uploaded_texture.as_ref(), interaction);
                        self.apply_crop_action(action);
                    }
                }
                Stage::Annotate => {
                    let action = draw::show(
                        ui,
                        self.derived_texture.as_ref(),
                        &self.annotations,
                        self.mode,
                        self.session.settings.canvas_dimension(),
                        self.session.settings.font_size(),
                    );
                    self.apply_draw_action(action);
                }
            }
        });
    }
}

/// Create an egui texture from decoded RGBA pixels.
fn texture_from(ctx: &egui::Context, name: &str, image: &RgbaImage) -> egui::TextureHandle {
    let size = [image.width() as usize, image.height() as usize];
    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw());
    ctx.load_texture(name, color_image, egui::TextureOptions::LINEAR)
}
