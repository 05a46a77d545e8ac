//! CPU tessellation of canvas primitives.
//!
//! Every [`Canvas`] call is turned into colored triangles in pixel space and
//! appended to one vertex list, which the renderer uploads once per frame.

use std::f32::consts::TAU;

use glam::Vec2;

use crate::canvas::{Canvas, Color};
use crate::shader::ShapeVertex;

const MIN_SEGMENTS: u32 = 12;
const MAX_SEGMENTS: u32 = 64;

/// Segment count for an ellipse of the given radius.
fn segments_for(radius: f32) -> u32 {
    ((radius * 1.5) as u32).clamp(MIN_SEGMENTS, MAX_SEGMENTS)
}

/// Triangle list built from canvas calls.
#[derive(Debug)]
pub struct ShapeBatch {
    vertices: Vec<ShapeVertex>,
    clear_color: Color,
    stroke: Option<Color>,
    fill: Option<Color>,
    stroke_weight: f32,
}

impl Default for ShapeBatch {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeBatch {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            clear_color: Color::BLACK,
            stroke: Some(Color::BLACK),
            fill: Some(Color::WHITE),
            stroke_weight: 1.0,
        }
    }

    pub fn vertices(&self) -> &[ShapeVertex] {
        &self.vertices
    }

    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    fn triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Color) {
        let color = color.to_array();
        for p in [a, b, c] {
            self.vertices.push(ShapeVertex {
                position: p.to_array(),
                color,
            });
        }
    }

    fn quad(&mut self, a: Vec2, b: Vec2, c: Vec2, d: Vec2, color: Color) {
        self.triangle(a, b, c, color);
        self.triangle(a, c, d, color);
    }

    /// Thick segment as a quad `width` pixels across.
    fn segment(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        let Some(dir) = (to - from).try_normalize() else {
            return;
        };
        let n = dir.perp() * (width / 2.0);
        self.quad(from + n, to + n, to - n, from - n, color);
    }
}

impl Canvas for ShapeBatch {
    fn clear(&mut self, color: Color) {
        self.vertices.clear();
        self.clear_color = color;
    }

    fn set_stroke(&mut self, color: Color) {
        self.stroke = Some(color);
    }

    fn no_stroke(&mut self) {
        self.stroke = None;
    }

    fn set_fill(&mut self, color: Color) {
        self.fill = Some(color);
    }

    fn no_fill(&mut self) {
        self.fill = None;
    }

    fn set_stroke_weight(&mut self, weight: f32) {
        self.stroke_weight = weight.max(0.0);
    }

    fn ellipse(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let center = Vec2::new(x, y);
        let radii = Vec2::new(w / 2.0, h / 2.0);
        let n = segments_for(radii.max_element());
        let at = |r: Vec2, i: u32| {
            let t = i as f32 / n as f32 * TAU;
            center + Vec2::new(t.cos() * r.x, t.sin() * r.y)
        };

        if let Some(fill) = self.fill {
            for i in 0..n {
                self.triangle(center, at(radii, i), at(radii, i + 1), fill);
            }
        }

        if let Some(stroke) = self.stroke {
            let half = self.stroke_weight / 2.0;
            let inner = (radii - Vec2::splat(half)).max(Vec2::ZERO);
            let outer = radii + Vec2::splat(half);
            for i in 0..n {
                self.quad(at(inner, i), at(outer, i), at(outer, i + 1), at(inner, i + 1), stroke);
            }
        }
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        if let Some(stroke) = self.stroke {
            self.segment(Vec2::new(x1, y1), Vec2::new(x2, y2), self.stroke_weight, stroke);
        }
    }

    fn point(&mut self, x: f32, y: f32) {
        if let Some(stroke) = self.stroke {
            let c = Vec2::new(x, y);
            let h = (self.stroke_weight / 2.0).max(0.5);
            self.quad(
                c + Vec2::new(-h, -h),
                c + Vec2::new(h, -h),
                c + Vec2::new(h, h),
                c + Vec2::new(-h, h),
                stroke,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_is_one_quad_of_stroke_width() {
        let mut batch = ShapeBatch::new();
        batch.set_stroke(Color::WHITE);
        batch.set_stroke_weight(2.0);
        batch.line(0.0, 0.0, 10.0, 0.0);

        let v = batch.vertices();
        assert_eq!(v.len(), 6);
        for vertex in v {
            assert_eq!(vertex.color, Color::WHITE.to_array());
            assert!((vertex.position[1].abs() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_no_stroke_skips_lines_and_points() {
        let mut batch = ShapeBatch::new();
        batch.no_stroke();
        batch.line(0.0, 0.0, 5.0, 5.0);
        batch.point(1.0, 1.0);
        assert!(batch.is_empty());
    }

    #[test]
    fn test_zero_length_line_is_skipped() {
        let mut batch = ShapeBatch::new();
        batch.line(3.0, 3.0, 3.0, 3.0);
        assert!(batch.is_empty());
    }

    #[test]
    fn test_ellipse_fill_and_ring() {
        let mut batch = ShapeBatch::new();
        batch.set_fill(Color::BLACK);
        batch.no_stroke();
        batch.ellipse(50.0, 50.0, 20.0, 20.0);
        let n = segments_for(10.0) as usize;
        assert_eq!(batch.vertices().len(), 3 * n);
        for v in batch.vertices() {
            let d = Vec2::from(v.position).distance(Vec2::new(50.0, 50.0));
            assert!(d <= 10.0 + 1e-3);
        }

        batch.set_stroke(Color::WHITE);
        batch.no_fill();
        batch.ellipse(50.0, 50.0, 20.0, 20.0);
        assert_eq!(batch.vertices().len(), 3 * n + 6 * n);
    }

    #[test]
    fn test_clear_drops_geometry_and_sets_background() {
        let mut batch = ShapeBatch::new();
        batch.point(1.0, 1.0);
        assert!(!batch.is_empty());
        let bg = Color::rgb(0.1, 0.2, 0.3);
        batch.clear(bg);
        assert!(batch.is_empty());
        assert_eq!(batch.clear_color(), bg);
    }
}
