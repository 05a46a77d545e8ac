//! Square grid laid over the viewport.
//!
//! The viewport is packed with as many `cell_size x cell_size` squares as fit,
//! and the leftover space is split evenly between opposing edges so the grid
//! sits centered. Chain drives only ever stop on the corners of these squares.

use glam::Vec2;
use rand::Rng;

/// A grid-aligned point, in pixels.
pub type Vertex = Vec2;

/// Slack used when comparing float coordinates against grid bounds.
const EPSILON: f32 = 1e-3;

/// Largest grid [`Grid::build`] will enumerate. Anything denser is refused.
pub const MAX_VERTICES: u64 = 1 << 22;

/// Number of whole cells that fit in `viewport`, before any are built.
///
/// Saturates instead of overflowing, so absurd inputs compare as huge.
pub fn vertex_count(cell_size: f32, viewport: Viewport) -> u64 {
    if !(cell_size.is_finite() && cell_size > 0.0) || viewport.is_degenerate() {
        return 0;
    }
    let columns = (viewport.width / cell_size).floor() as u64;
    let rows = (viewport.height / cell_size).floor() as u64;
    columns.saturating_mul(rows)
}

/// Dimensions of the drawing surface, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// `true` when either side is zero or negative (minimized window).
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Inclusive rectangle a chain drive is allowed to walk in.
///
/// Spans from the centering offset to the opposite offset, so the outer
/// border corners of the last row and column are reachable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x - EPSILON
            && point.x <= self.max.x + EPSILON
            && point.y >= self.min.y - EPSILON
            && point.y <= self.max.y + EPSILON
    }
}

/// Cell origins of a centered square grid plus the geometry used to build it.
#[derive(Clone, Debug)]
pub struct Grid {
    vertices: Vec<Vertex>,
    cell_size: f32,
    horizontal_offset: f32,
    vertical_offset: f32,
    viewport: Viewport,
}

impl Grid {
    /// Partition `viewport` into `cell_size` squares.
    ///
    /// Vertices are produced row by row, top to bottom and left to right.
    /// Rows or columns whose far edge would poke past the viewport are
    /// skipped. A viewport smaller than one cell, or a cell size that is not
    /// a positive finite number, gives an empty grid. So does a grid that
    /// would hold more than [`MAX_VERTICES`] vertices.
    pub fn build(cell_size: f32, viewport: Viewport) -> Self {
        let count = vertex_count(cell_size, viewport);
        if count == 0 {
            return Self::empty(cell_size, viewport);
        }
        if count > MAX_VERTICES {
            log::warn!(
                "{}px cells over {}x{} would need {} vertices (limit {}); leaving the grid empty",
                cell_size,
                viewport.width,
                viewport.height,
                count,
                MAX_VERTICES
            );
            return Self::empty(cell_size, viewport);
        }

        let num_horizontal = (viewport.width / cell_size).floor();
        let horizontal_offset = (viewport.width - cell_size * num_horizontal) / 2.0;
        let num_vertical = (viewport.height / cell_size).floor();
        let vertical_offset = (viewport.height - cell_size * num_vertical) / 2.0;

        let mut vertices = Vec::with_capacity(count as usize);

        // Step by index rather than accumulating so rows stay exact multiples.
        let mut row = 0u32;
        loop {
            let y = vertical_offset + row as f32 * cell_size;
            if y >= viewport.height {
                break;
            }
            row += 1;
            if y + cell_size > viewport.height {
                continue;
            }
            let mut col = 0u32;
            loop {
                let x = horizontal_offset + col as f32 * cell_size;
                if x >= viewport.width {
                    break;
                }
                col += 1;
                if x + cell_size > viewport.width {
                    continue;
                }
                vertices.push(Vec2::new(x, y));
            }
        }

        Self {
            vertices,
            cell_size,
            horizontal_offset,
            vertical_offset,
            viewport,
        }
    }

    fn empty(cell_size: f32, viewport: Viewport) -> Self {
        Self {
            vertices: Vec::new(),
            cell_size,
            horizontal_offset: 0.0,
            vertical_offset: 0.0,
            viewport,
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn horizontal_offset(&self) -> f32 {
        self.horizontal_offset
    }

    pub fn vertical_offset(&self) -> f32 {
        self.vertical_offset
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The walkable rectangle for entities living on this grid.
    pub fn bounds(&self) -> Bounds {
        Bounds {
            min: Vec2::new(self.horizontal_offset, self.vertical_offset),
            max: Vec2::new(
                self.viewport.width - self.horizontal_offset,
                self.viewport.height - self.vertical_offset,
            ),
        }
    }

    /// Whether `point` lies inside [`Grid::bounds`].
    pub fn contains(&self, point: Vec2) -> bool {
        self.bounds().contains(point)
    }

    /// Pick a vertex uniformly at random. `None` for an empty grid.
    pub fn random_vertex<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Vertex> {
        if self.vertices.is_empty() {
            return None;
        }
        Some(self.vertices[rng.gen_range(0..self.vertices.len())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_exact_fit_has_no_offset() {
        let grid = Grid::build(50.0, Viewport::new(500.0, 500.0));
        assert_eq!(grid.len(), 100);
        assert_eq!(grid.horizontal_offset(), 0.0);
        assert_eq!(grid.vertical_offset(), 0.0);
        assert_eq!(grid.vertices()[0], Vec2::new(0.0, 0.0));
        assert_eq!(grid.vertices()[99], Vec2::new(450.0, 450.0));
    }

    #[test]
    fn test_leftover_space_is_split_evenly() {
        let grid = Grid::build(50.0, Viewport::new(515.0, 230.0));
        assert!((grid.horizontal_offset() - 7.5).abs() < 1e-4);
        assert!((grid.vertical_offset() - 15.0).abs() < 1e-4);
        // 10 columns, 4 rows
        assert_eq!(grid.len(), 40);
    }

    #[test]
    fn test_row_major_order() {
        let grid = Grid::build(10.0, Viewport::new(30.0, 20.0));
        let expected = [
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(20.0, 0.0),
            Vec2::new(0.0, 10.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(20.0, 10.0),
        ];
        assert_eq!(grid.vertices(), &expected);
    }

    #[test]
    fn test_vertices_within_offsets_and_evenly_spaced() {
        for &(w, h, s) in &[(800.0, 600.0, 50.0), (1013.0, 377.0, 37.0), (99.0, 51.0, 50.0)] {
            let grid = Grid::build(s, Viewport::new(w, h));
            let hx = grid.horizontal_offset();
            let vy = grid.vertical_offset();
            for v in grid.vertices() {
                assert!(v.x >= hx && v.x <= w - hx);
                assert!(v.y >= vy && v.y <= h - vy);
            }
            for pair in grid.vertices().windows(2) {
                if pair[0].y == pair[1].y {
                    assert!((pair[1].x - pair[0].x - s).abs() < 1e-3);
                }
            }
        }
    }

    #[test]
    fn test_viewport_smaller_than_cell_is_empty() {
        let grid = Grid::build(50.0, Viewport::new(40.0, 300.0));
        assert!(grid.is_empty());
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(grid.random_vertex(&mut rng).is_none());
    }

    #[test]
    fn test_invalid_cell_size_is_empty() {
        assert!(Grid::build(0.0, Viewport::new(100.0, 100.0)).is_empty());
        assert!(Grid::build(-5.0, Viewport::new(100.0, 100.0)).is_empty());
        assert!(Grid::build(f32::NAN, Viewport::new(100.0, 100.0)).is_empty());
    }

    #[test]
    fn test_oversized_grid_is_refused() {
        let viewport = Viewport::new(1280.0, 720.0);
        assert!(vertex_count(0.001, viewport) > MAX_VERTICES);
        let grid = Grid::build(0.001, viewport);
        assert!(grid.is_empty());
        assert_eq!(grid.horizontal_offset(), 0.0);

        assert_eq!(vertex_count(f32::MIN_POSITIVE, viewport), u64::MAX);
        assert!(Grid::build(f32::MIN_POSITIVE, viewport).is_empty());
    }

    #[test]
    fn test_vertex_count_matches_build() {
        let viewport = Viewport::new(515.0, 230.0);
        assert_eq!(vertex_count(50.0, viewport), 40);
        assert_eq!(vertex_count(50.0, viewport) as usize, Grid::build(50.0, viewport).len());
        assert_eq!(vertex_count(0.0, viewport), 0);
    }

    #[test]
    fn test_bounds_include_far_border() {
        let grid = Grid::build(50.0, Viewport::new(500.0, 500.0));
        assert!(grid.contains(Vec2::new(500.0, 500.0)));
        assert!(grid.contains(Vec2::new(0.0, 250.0)));
        assert!(!grid.contains(Vec2::new(550.0, 0.0)));
        assert!(!grid.contains(Vec2::new(0.0, -50.0)));
    }

    #[test]
    fn test_random_vertex_can_pick_first_vertex() {
        let grid = Grid::build(10.0, Viewport::new(20.0, 10.0));
        assert_eq!(grid.len(), 2);
        let mut rng = SmallRng::seed_from_u64(7);
        let first = grid.vertices()[0];
        let hit = (0..200).any(|_| grid.random_vertex(&mut rng) == Some(first));
        assert!(hit);
    }
}
