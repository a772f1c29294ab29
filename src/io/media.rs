// Copyright (c) 2026, Trace Draw contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Image file loading.
//!
//! Decodes whatever the image crate can decode into RGBA8 suitable both
//! for an egui texture and for pixel extraction. No validation happens
//! before the decode attempt; an unreadable file is simply an error.

use anyhow::Context;
use image::RgbaImage;
use std::path::Path;

/// Decode the image at `path` into an owned RGBA8 buffer.
pub fn load_image(path: &Path) -> anyhow::Result<RgbaImage> {
    let image = image::open(path)
        .with_context(|| format!("failed to decode {}", path.display()))?
        .to_rgba8();
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_roundtrips_a_written_png() {
        let dir = std::env::temp_dir().join("trace-draw-test-media");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("load_roundtrip.png");

        let original = RgbaImage::from_pixel(8, 4, image::Rgba([1, 2, 3, 255]));
        original.save(&path).unwrap();

        let loaded = load_image(&path).unwrap();
        assert_eq!(loaded.dimensions(), (8, 4));
        assert_eq!(loaded, original);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_rejects_non_image_bytes() {
        let dir = std::env::temp_dir().join("trace-draw-test-media");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("not_an_image.png");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"definitely not a png").unwrap();

        assert!(load_image(&path).is_err());

        std::fs::remove_file(&path).ok();
    }
}
