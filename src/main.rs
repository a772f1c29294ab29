// Copyright (c) 2026, Trace Draw contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Trace Draw
//!
//! A desktop tool for tracing over images: upload a picture, crop it to a
//! square, draw strokes and a text label over it, then export the drawing
//! as PNG or JPEG.

mod app;
mod io;
mod models;
mod render;
mod ui;
mod util;

use anyhow::Result;
use app::TraceDrawApp;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 800.0])
            .with_min_inner_size([640.0, 480.0])
            .with_title("Trace Draw"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Trace Draw",
        options,
        Box::new(|_cc| Ok(Box::new(TraceDrawApp::new()))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
