// Copyright (c) 2026, Trace Draw contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Stroke and text annotation data structures.
//!
//! This module defines the drawing model: freehand strokes accumulated
//! from pointer drags, and the single editable text label.

/// A 2D point in canvas pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// How the ends of stroke segments are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapStyle {
    Rounded,
    Squared,
}

/// A freehand stroke: an ordered polyline with its own width and cap style.
///
/// Width and cap are captured when the stroke begins so that replaying the
/// log reproduces the historical appearance even after the user changes the
/// current defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub points: Vec<Point>,
    pub line_width: f32,
    pub cap: CapStyle,
}

/// The single text label placed on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct TextAnnotation {
    pub text: String,
    pub position: Point,
}

/// Ordered log of everything the user has drawn this session.
///
/// Strokes accumulate in drawing order. The text label is an explicit
/// optional handle: there is exactly zero or one, and edits always target
/// it directly.
#[derive(Debug, Default)]
pub struct AnnotationLog {
    strokes: Vec<Stroke>,
    text: Option<TextAnnotation>,
    /// True between begin_stroke and end_stroke.
    drawing: bool,
}

impl AnnotationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new stroke with a single initial point.
    pub fn begin_stroke(&mut self, point: Point, line_width: f32, cap: CapStyle) {
        self.strokes.push(Stroke {
            points: vec![point],
            line_width,
            cap,
        });
        self.drawing = true;
    }

    /// Append a point to the open stroke. No-op when no stroke is open.
    pub fn extend_stroke(&mut self, point: Point) {
        if !self.drawing {
            return;
        }
        if let Some(stroke) = self.strokes.last_mut() {
            stroke.points.push(point);
        }
    }

    /// Close drawing mode. The stroke data itself is unchanged.
    pub fn end_stroke(&mut self) {
        self.drawing = false;
    }

    /// Remove the most recent stroke. Safe no-op on an empty log;
    /// repeated calls keep popping.
    pub fn revert_last_stroke(&mut self) {
        if self.strokes.pop().is_some() {
            self.drawing = false;
            log::info!("Reverted stroke, {} remaining", self.strokes.len());
        }
    }

    /// Create the text label if absent, otherwise update it in place.
    pub fn place_or_edit_text(&mut self, text: impl Into<String>, position: Point) {
        match &mut self.text {
            Some(annotation) => {
                annotation.text = text.into();
                annotation.position = position;
            }
            None => {
                self.text = Some(TextAnnotation {
                    text: text.into(),
                    position,
                });
            }
        }
    }

    /// Update only the label's content, creating it at the origin if absent.
    pub fn edit_text(&mut self, text: impl Into<String>) {
        match &mut self.text {
            Some(annotation) => annotation.text = text.into(),
            None => self.place_or_edit_text(text, Point::new(0.0, 0.0)),
        }
    }

    /// Update only the label's position, creating an empty label if absent.
    pub fn move_text(&mut self, position: Point) {
        match &mut self.text {
            Some(annotation) => annotation.position = position,
            None => self.place_or_edit_text("", position),
        }
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn text(&self) -> Option<&TextAnnotation> {
        self.text.as_ref()
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Drop everything, e.g. when a new image is cropped.
    pub fn clear(&mut self) {
        self.strokes.clear();
        self.text = None;
        self.drawing = false;
    }
}
