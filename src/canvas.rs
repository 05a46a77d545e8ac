//! Drawing surface abstraction.
//!
//! Chain drives never talk to the GPU directly. They draw through the
//! [`Canvas`] trait, which mirrors a small immediate-mode 2D API: a current
//! stroke and fill, a stroke weight, and ellipse/line/point primitives.
//!
//! Two implementations ship with the crate:
//! - `ShapeBatch` (in the renderer) tessellates primitives into triangles
//!   for wgpu.
//! - [`Recorder`] keeps the calls as a list of [`DrawCommand`]s, which is what
//!   the tests inspect.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// RGBA color, each channel in 0.0-1.0.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(default = "opaque")]
    pub a: f32,
}

fn opaque() -> f32 {
    1.0
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// How a dashed line marks each "on" sub-segment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashStyle {
    /// A short line per dash.
    #[default]
    Dash,
    /// A single point at the start of each dash.
    Dot,
    /// A filled circle, half a dash across, at the start of each dash.
    Round,
}

/// Primitive drawing operations a chain drive needs.
///
/// Coordinates are pixels with the origin at the top-left corner.
pub trait Canvas {
    /// Wipe everything drawn so far and paint the background.
    fn clear(&mut self, color: Color);
    fn set_stroke(&mut self, color: Color);
    fn no_stroke(&mut self);
    fn set_fill(&mut self, color: Color);
    fn no_fill(&mut self);
    fn set_stroke_weight(&mut self, weight: f32);
    /// Ellipse centered at `(x, y)` with the given diameters.
    fn ellipse(&mut self, x: f32, y: f32, w: f32, h: f32);
    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32);
    fn point(&mut self, x: f32, y: f32);
}

/// Draw a dashed line from `from` to `to` using the current stroke.
///
/// The line is cut into sub-segments of length `dash`; even ones are drawn
/// and odd ones skipped. The last dash is clamped to `to`.
pub fn line_dash<C: Canvas + ?Sized>(canvas: &mut C, from: Vec2, to: Vec2, dash: f32, style: DashStyle) {
    let distance = from.distance(to);
    if !(dash > 0.0) || distance <= 0.0 {
        return;
    }
    let dash_count = distance / dash;
    let step = (to - from) / dash_count;

    let mut i = 0.0_f32;
    while i < dash_count {
        let start = from + step * i;
        let end = from + step * (i + 1.0).min(dash_count);
        match style {
            DashStyle::Dash => canvas.line(start.x, start.y, end.x, end.y),
            DashStyle::Dot => canvas.point(start.x, start.y),
            DashStyle::Round => canvas.ellipse(start.x, start.y, dash / 2.0, dash / 2.0),
        }
        i += 2.0;
    }
}

/// A single recorded canvas call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Stroke(Option<Color>),
    Fill(Option<Color>),
    StrokeWeight(f32),
    Ellipse { center: Vec2, w: f32, h: f32 },
    Line { from: Vec2, to: Vec2 },
    Point(Vec2),
}

/// Headless canvas that records every call.
#[derive(Debug, Default)]
pub struct Recorder {
    commands: Vec<DrawCommand>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn lines(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Line { from, to } => Some((*from, *to)),
            _ => None,
        })
    }

    pub fn ellipses(&self) -> impl Iterator<Item = (Vec2, f32, f32)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Ellipse { center, w, h } => Some((*center, *w, *h)),
            _ => None,
        })
    }

    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Canvas for Recorder {
    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn set_stroke(&mut self, color: Color) {
        self.commands.push(DrawCommand::Stroke(Some(color)));
    }

    fn no_stroke(&mut self) {
        self.commands.push(DrawCommand::Stroke(None));
    }

    fn set_fill(&mut self, color: Color) {
        self.commands.push(DrawCommand::Fill(Some(color)));
    }

    fn no_fill(&mut self) {
        self.commands.push(DrawCommand::Fill(None));
    }

    fn set_stroke_weight(&mut self, weight: f32) {
        self.commands.push(DrawCommand::StrokeWeight(weight));
    }

    fn ellipse(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.commands.push(DrawCommand::Ellipse {
            center: Vec2::new(x, y),
            w,
            h,
        });
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.commands.push(DrawCommand::Line {
            from: Vec2::new(x1, y1),
            to: Vec2::new(x2, y2),
        });
    }

    fn point(&mut self, x: f32, y: f32) {
        self.commands.push(DrawCommand::Point(Vec2::new(x, y)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashes_alternate_and_stay_on_segment() {
        let mut rec = Recorder::new();
        line_dash(&mut rec, Vec2::new(0.0, 0.0), Vec2::new(50.0, 0.0), 2.5, DashStyle::Dash);
        let lines: Vec<_> = rec.lines().collect();
        // 20 sub-segments, every other one drawn
        assert_eq!(lines.len(), 10);
        for (k, (from, to)) in lines.iter().enumerate() {
            assert!((from.x - 5.0 * k as f32).abs() < 1e-3);
            assert!((to.x - from.x - 2.5).abs() < 1e-3);
            assert!(to.x <= 50.0 + 1e-3);
            assert_eq!(from.y, 0.0);
        }
    }

    #[test]
    fn test_last_dash_is_clamped() {
        let mut rec = Recorder::new();
        line_dash(&mut rec, Vec2::new(0.0, 0.0), Vec2::new(0.0, 7.0), 3.0, DashStyle::Dash);
        let lines: Vec<_> = rec.lines().collect();
        // sub-segments start at 0 and 6; the second is cut at 7
        assert_eq!(lines.len(), 2);
        assert!((lines[1].0.y - 6.0).abs() < 1e-4);
        assert!((lines[1].1.y - 7.0).abs() < 1e-4);
    }

    #[test]
    fn test_zero_length_line_draws_nothing() {
        let mut rec = Recorder::new();
        let p = Vec2::new(3.0, 4.0);
        line_dash(&mut rec, p, p, 2.0, DashStyle::Dash);
        line_dash(&mut rec, p, Vec2::new(10.0, 4.0), 0.0, DashStyle::Dash);
        assert!(rec.commands().is_empty());
    }

    #[test]
    fn test_dot_and_round_styles() {
        let mut rec = Recorder::new();
        line_dash(&mut rec, Vec2::ZERO, Vec2::new(8.0, 0.0), 2.0, DashStyle::Dot);
        let points = rec
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Point(_)))
            .count();
        assert_eq!(points, 2);

        let mut rec = Recorder::new();
        line_dash(&mut rec, Vec2::ZERO, Vec2::new(8.0, 0.0), 2.0, DashStyle::Round);
        let rounds: Vec<_> = rec.ellipses().collect();
        assert_eq!(rounds.len(), 2);
        assert_eq!(rounds[0].1, 1.0);
    }

    #[test]
    fn test_color_deserialize_defaults_alpha() {
        let c: Color = serde_json::from_str(r#"{"r":1.0,"g":0.5,"b":0.0}"#).unwrap();
        assert_eq!(c, Color::rgb(1.0, 0.5, 0.0));
    }
}
