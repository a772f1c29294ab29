// Copyright (c) 2026, Trace Draw contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Crop region selection state machine.
//!
//! A single square region is dragged to resize or clicked to reposition
//! over the uploaded image. A pointer-down/up pair shorter than the click
//! threshold moves the square to the pointer; a longer one is a resize
//! driven by the horizontal drag distance.

use crate::models::annotation::Point;
use image::RgbaImage;
use std::time::{Duration, Instant};

/// Smallest allowed region size, as a fraction of the image width.
pub const MIN_REGION_FRACTION: f64 = 0.05;

/// Pointer-down/up pairs shorter than this count as a click-to-place
/// gesture instead of a resize drag.
pub const CLICK_MAX_DURATION: Duration = Duration::from_millis(200);

/// A square region within the source image's pixel bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropRegion {
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

impl CropRegion {
    /// Default region for a freshly loaded image: the largest square that
    /// fits, anchored at the origin.
    pub fn initial(image_width: u32, image_height: u32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            size: image_width.min(image_height) as f64,
        }
    }
}

/// An in-progress resize/reposition gesture.
#[derive(Debug, Clone, Copy)]
struct DragStart {
    origin: Point,
    start_size: f64,
    started_at: Instant,
}

/// Live crop selection over one source image.
#[derive(Debug)]
pub struct CropInteraction {
    region: CropRegion,
    image_width: u32,
    image_height: u32,
    drag: Option<DragStart>,
}

impl CropInteraction {
    pub fn new(image_width: u32, image_height: u32) -> Self {
        Self {
            region: CropRegion::initial(image_width, image_height),
            image_width,
            image_height,
            drag: None,
        }
    }

    pub fn region(&self) -> CropRegion {
        self.region
    }

    pub fn image_size(&self) -> (u32, u32) {
        (self.image_width, self.image_height)
    }

    /// Width of the dashed selection outline, derived from the image size
    /// so it stays visible on large photos.
    pub fn outline_width(&self) -> f32 {
        let min_dim = self.image_width.min(self.image_height) as f32;
        (min_dim / 200.0).floor().max(1.0)
    }

    /// Pointer-down inside the image: record where and when the gesture
    /// started and the region size at that moment.
    pub fn begin_drag(&mut self, point: Point, now: Instant) {
        self.drag = Some(DragStart {
            origin: point,
            start_size: self.region.size,
            started_at: now,
        });
    }

    /// Pointer-move while held: resize the square from the horizontal drag
    /// distance, clamped to [5% of the image width, min image dimension].
    pub fn update_drag(&mut self, point: Point) {
        let Some(drag) = self.drag else {
            return;
        };
        let min_size = self.image_width as f64 * MIN_REGION_FRACTION;
        let max_size = self.image_width.min(self.image_height) as f64;
        let next = (drag.start_size + point.x - drag.origin.x).clamp(min_size, max_size);
        self.region.size = next;
        self.clamp_origin();
    }

    /// Pointer-up/leave: a quick gesture recenters the square on the
    /// release point; a slow one keeps the size from the drag.
    pub fn end_drag(&mut self, point: Point, now: Instant) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        let was_click = now.duration_since(drag.started_at) < CLICK_MAX_DURATION;
        if was_click {
            self.region.x = point.x - self.region.size / 2.0;
            self.region.y = point.y - self.region.size / 2.0;
            self.clamp_origin();
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Keep the square inside the image bounds on both axes.
    fn clamp_origin(&mut self) {
        let max_x = (self.image_width as f64 - self.region.size).max(0.0);
        let max_y = (self.image_height as f64 - self.region.size).max(0.0);
        self.region.x = self.region.x.clamp(0.0, max_x);
        self.region.y = self.region.y.clamp(0.0, max_y);
    }

    /// Copy the pixel block under the region out of the source image.
    pub fn extract(&self, source: &RgbaImage) -> RgbaImage {
        let size = (self.region.size.round() as u32).max(1);
        let x = (self.region.x.round() as u32).min(source.width().saturating_sub(size));
        let y = (self.region.y.round() as u32).min(source.height().saturating_sub(size));
        image::imageops::crop_imm(source, x, y, size, size).to_image()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn click_instant() -> Instant {
        Instant::now()
    }

    #[test]
    fn test_initial_region_is_min_dimension_square_at_origin() {
        let interaction = CropInteraction::new(2000, 1000);
        let region = interaction.region();
        assert_eq!(region.x, 0.0);
        assert_eq!(region.y, 0.0);
        assert_eq!(region.size, 1000.0);
    }

    #[test]
    fn test_drag_resize_follows_horizontal_delta() {
        let mut interaction = CropInteraction::new(1000, 1000);
        let t0 = click_instant();
        interaction.begin_drag(Point::new(100.0, 100.0), t0);
        interaction.update_drag(Point::new(40.0, 500.0));
        // 1000 + (40 - 100) = 940, square on both axes.
        assert_eq!(interaction.region().size, 940.0);
        interaction.end_drag(Point::new(40.0, 500.0), t0 + Duration::from_millis(300));
        // A slow gesture keeps the dragged size and does not recenter.
        assert_eq!(interaction.region().size, 940.0);
        assert_eq!(interaction.region().x, 0.0);
    }

    #[test]
    fn test_region_size_never_shrinks_below_five_percent() {
        let mut interaction = CropInteraction::new(1000, 1000);
        let t0 = click_instant();
        interaction.begin_drag(Point::new(900.0, 0.0), t0);
        interaction.update_drag(Point::new(-5000.0, 0.0));
        assert_eq!(interaction.region().size, 50.0);
    }

    #[test]
    fn test_region_size_never_exceeds_image() {
        let mut interaction = CropInteraction::new(800, 600);
        let t0 = click_instant();
        interaction.begin_drag(Point::new(0.0, 0.0), t0);
        interaction.update_drag(Point::new(5000.0, 0.0));
        assert_eq!(interaction.region().size, 600.0);
    }

    #[test]
    fn test_click_recenters_region_on_pointer() {
        let mut interaction = CropInteraction::new(100, 100);
        interaction.region.size = 20.0;
        let t0 = click_instant();
        interaction.begin_drag(Point::new(50.0, 50.0), t0);
        interaction.end_drag(Point::new(50.0, 50.0), t0 + Duration::from_millis(50));
        assert_eq!(interaction.region().x, 40.0);
        assert_eq!(interaction.region().y, 40.0);
    }

    #[test]
    fn test_click_near_edge_is_clamped_into_bounds() {
        let mut interaction = CropInteraction::new(100, 100);
        interaction.region.size = 20.0;
        let t0 = click_instant();
        interaction.begin_drag(Point::new(98.0, 1.0), t0);
        interaction.end_drag(Point::new(98.0, 1.0), t0 + Duration::from_millis(50));
        let region = interaction.region();
        assert_eq!(region.x, 80.0);
        assert_eq!(region.y, 0.0);
        assert!(region.x >= 0.0 && region.x + region.size <= 100.0);
        assert!(region.y >= 0.0 && region.y + region.size <= 100.0);
    }

    #[test]
    fn test_end_without_begin_is_noop() {
        let mut interaction = CropInteraction::new(100, 100);
        let before = interaction.region();
        interaction.end_drag(Point::new(10.0, 10.0), click_instant());
        assert_eq!(interaction.region(), before);
    }

    #[test]
    fn test_extract_yields_region_sized_image() {
        let source = RgbaImage::from_pixel(2000, 1000, image::Rgba([10, 20, 30, 255]));
        let interaction = CropInteraction::new(2000, 1000);
        let cropped = interaction.extract(&source);
        assert_eq!(cropped.dimensions(), (1000, 1000));
        assert_eq!(cropped.get_pixel(0, 0), &image::Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn test_extract_copies_the_selected_block() {
        let mut source = RgbaImage::from_pixel(100, 100, image::Rgba([0, 0, 0, 255]));
        source.put_pixel(60, 70, image::Rgba([255, 0, 0, 255]));
        let mut interaction = CropInteraction::new(100, 100);
        interaction.region = CropRegion {
            x: 50.0,
            y: 60.0,
            size: 30.0,
        };
        let cropped = interaction.extract(&source);
        assert_eq!(cropped.dimensions(), (30, 30));
        assert_eq!(cropped.get_pixel(10, 10), &image::Rgba([255, 0, 0, 255]));
    }
}
