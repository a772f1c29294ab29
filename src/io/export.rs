// Copyright (c) 2026, Trace Draw contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Encoding the drawing surface to PNG or JPEG files.

use anyhow::Context;
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::io::Cursor;
use std::path::Path;

/// Supported export encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Jpeg,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpeg",
        }
    }

    /// Default download name offered in the save dialog.
    pub fn default_file_name(self) -> String {
        format!("trace-draw.{}", self.extension())
    }

    fn image_format(self) -> ImageFormat {
        match self {
            ExportFormat::Png => ImageFormat::Png,
            ExportFormat::Jpeg => ImageFormat::Jpeg,
        }
    }
}

/// Encode the surface into an in-memory byte stream. JPEG carries no alpha
/// channel, so it is flattened to RGB first.
pub fn encode(surface: &RgbaImage, format: ExportFormat) -> anyhow::Result<Vec<u8>> {
    let mut bytes = Vec::new();
    let mut cursor = Cursor::new(&mut bytes);
    match format {
        ExportFormat::Png => {
            DynamicImage::ImageRgba8(surface.clone()).write_to(&mut cursor, ImageFormat::Png)?
        }
        ExportFormat::Jpeg => DynamicImage::ImageRgba8(surface.clone())
            .to_rgb8()
            .write_to(&mut cursor, format.image_format())?,
    }
    Ok(bytes)
}

/// Encode and write the surface to the chosen path.
pub fn save(surface: &RgbaImage, format: ExportFormat, path: &Path) -> anyhow::Result<()> {
    let bytes = encode(surface, format)?;
    std::fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))?;
    log::info!(
        "Exported {}x{} {} to {}",
        surface.width(),
        surface.height(),
        format.extension(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::annotation::{AnnotationLog, CapStyle, Point};
    use crate::render::{self, RenderOptions};

    fn drawn_surface(white_background: bool) -> RgbaImage {
        let mut log = AnnotationLog::new();
        log.begin_stroke(Point::new(10.0, 50.0), 8.0, CapStyle::Rounded);
        log.extend_stroke(Point::new(90.0, 50.0));
        log.end_stroke();
        let options = RenderOptions {
            white_background,
            font_size: 60.0,
        };
        let font = render::embedded_font().unwrap();
        render::render(&log, 100, &options, &font)
    }

    #[test]
    fn test_default_file_names() {
        assert_eq!(ExportFormat::Png.default_file_name(), "trace-draw.png");
        assert_eq!(ExportFormat::Jpeg.default_file_name(), "trace-draw.jpeg");
    }

    #[test]
    fn test_png_roundtrip_is_lossless() {
        let surface = drawn_surface(false);
        let bytes = encode(&surface, ExportFormat::Png).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded, surface);
    }

    #[test]
    fn test_jpeg_is_approximately_right() {
        let surface = drawn_surface(true);
        let bytes = encode(&surface, ExportFormat::Jpeg).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (100, 100));

        // Stroke-covered pixels come back near black, background near white.
        let ink = decoded.get_pixel(50, 50);
        assert!(ink.0.iter().all(|&c| c < 80), "ink too light: {ink:?}");
        let background = decoded.get_pixel(50, 10);
        assert!(
            background.0.iter().all(|&c| c > 200),
            "background too dark: {background:?}"
        );
    }

    #[test]
    fn test_save_writes_decodable_file() {
        let dir = std::env::temp_dir().join("trace-draw-test-export");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(ExportFormat::Png.default_file_name());

        let surface = drawn_surface(false);
        save(&surface, ExportFormat::Png, &path).unwrap();
        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded, surface);

        std::fs::remove_file(&path).ok();
    }
}
