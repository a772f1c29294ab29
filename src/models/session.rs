// Copyright (c) 2026, Trace Draw contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Session state shared by the upload, crop and drawing views.
//!
//! Everything lives in memory for the lifetime of the window. The egui
//! event loop is single-threaded, so plain `&mut` access is enough.

use crate::models::annotation::CapStyle;
use crate::util::input::parse_with_fallback;
use image::RgbaImage;

/// Fallback drawing canvas dimension when the text input is not a number.
pub const DEFAULT_CANVAS_DIMENSION: u32 = 1000;
/// Fallback stroke width.
pub const DEFAULT_LINE_WIDTH: f32 = 5.0;
/// Fallback font size for the text label.
pub const DEFAULT_FONT_SIZE: f32 = 60.0;

/// User-tunable parameters, kept as the raw text the user typed.
///
/// Numeric fields are parsed on read; anything unparsable silently falls
/// back to the documented default rather than being rejected.
#[derive(Debug, Clone)]
pub struct Settings {
    pub dimension_input: String,
    pub line_width_input: String,
    pub font_size_input: String,
    pub rounded_caps: bool,
    pub white_background: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dimension_input: DEFAULT_CANVAS_DIMENSION.to_string(),
            line_width_input: (DEFAULT_LINE_WIDTH as u32).to_string(),
            font_size_input: (DEFAULT_FONT_SIZE as u32).to_string(),
            rounded_caps: true,
            white_background: false,
        }
    }
}

impl Settings {
    /// Backing size (width and height) of the square drawing canvas.
    pub fn canvas_dimension(&self) -> u32 {
        parse_with_fallback(&self.dimension_input, DEFAULT_CANVAS_DIMENSION).max(1)
    }

    pub fn line_width(&self) -> f32 {
        parse_with_fallback(&self.line_width_input, DEFAULT_LINE_WIDTH as u32).max(1) as f32
    }

    pub fn font_size(&self) -> f32 {
        parse_with_fallback(&self.font_size_input, DEFAULT_FONT_SIZE as u32).max(1) as f32
    }

    pub fn cap_style(&self) -> CapStyle {
        if self.rounded_caps {
            CapStyle::Rounded
        } else {
            CapStyle::Squared
        }
    }
}

/// Images owned by the current session.
///
/// `uploaded` is replaced on every file pick; confirming a crop hands a
/// freshly extracted image to `derived`, replacing any prior value.
#[derive(Debug, Default)]
pub struct SessionState {
    pub uploaded: Option<RgbaImage>,
    pub derived: Option<RgbaImage>,
    pub settings: Settings,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.canvas_dimension(), 1000);
        assert_eq!(settings.line_width(), 5.0);
        assert_eq!(settings.font_size(), 60.0);
        assert_eq!(settings.cap_style(), CapStyle::Rounded);
        assert!(!settings.white_background);
    }

    #[test]
    fn test_garbage_input_falls_back() {
        let settings = Settings {
            dimension_input: "not a number".into(),
            line_width_input: "".into(),
            font_size_input: "12.5.3".into(),
            ..Settings::default()
        };
        assert_eq!(settings.canvas_dimension(), 1000);
        assert_eq!(settings.line_width(), 5.0);
        assert_eq!(settings.font_size(), 60.0);
    }

    #[test]
    fn test_valid_input_is_used() {
        let settings = Settings {
            dimension_input: "800".into(),
            line_width_input: "12".into(),
            font_size_input: "48".into(),
            rounded_caps: false,
            ..Settings::default()
        };
        assert_eq!(settings.canvas_dimension(), 800);
        assert_eq!(settings.line_width(), 12.0);
        assert_eq!(settings.font_size(), 48.0);
        assert_eq!(settings.cap_style(), CapStyle::Squared);
    }

    #[test]
    fn test_zero_dimension_is_lifted_to_one() {
        let settings = Settings {
            dimension_input: "0".into(),
            ..Settings::default()
        };
        assert_eq!(settings.canvas_dimension(), 1);
    }
}
