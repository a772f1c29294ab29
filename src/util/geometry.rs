// Copyright (c) 2026, Trace Draw contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module converts pointer positions between screen space and the
//! backing pixel space of a canvas, and fits images into the available
//! panel area.

use crate::models::annotation::Point;

/// Map a pointer position on a displayed surface to backing pixel
/// coordinates, using the surface's on-screen rectangle and backing size.
/// Each axis scales independently.
pub fn screen_to_canvas(
    pos: egui::Pos2,
    display: egui::Rect,
    backing_width: u32,
    backing_height: u32,
) -> Point {
    let x_rate = (pos.x - display.min.x) as f64 / display.width() as f64;
    let y_rate = (pos.y - display.min.y) as f64 / display.height() as f64;
    Point {
        x: x_rate * backing_width as f64,
        y: y_rate * backing_height as f64,
    }
}

/// Map backing pixel coordinates back to a screen position on the
/// displayed surface.
pub fn canvas_to_screen(
    point: Point,
    display: egui::Rect,
    backing_width: u32,
    backing_height: u32,
) -> egui::Pos2 {
    egui::pos2(
        display.min.x + (point.x / backing_width as f64) as f32 * display.width(),
        display.min.y + (point.y / backing_height as f64) as f32 * display.height(),
    )
}

/// Largest aspect-preserving rectangle for an image inside the available
/// area, centered on both axes.
pub fn fit_rect(available: egui::Rect, image_width: u32, image_height: u32) -> egui::Rect {
    let img_aspect = image_width as f32 / image_height as f32;
    let available_aspect = available.width() / available.height();

    let (display_width, display_height) = if img_aspect > available_aspect {
        // Image is wider - fit to width
        let width = available.width();
        (width, width / img_aspect)
    } else {
        // Image is taller - fit to height
        let height = available.height();
        (height * img_aspect, height)
    };

    let x_offset = (available.width() - display_width) / 2.0;
    let y_offset = (available.height() - display_height) / 2.0;

    egui::Rect::from_min_size(
        available.min + egui::vec2(x_offset, y_offset),
        egui::vec2(display_width, display_height),
    )
}
