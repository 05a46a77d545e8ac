//! A single chain drive: a head walking the grid with a trail of links.
//!
//! The head glides `unit_distance` pixels per update toward the next grid
//! vertex. Once it is within one step it snaps onto the vertex, the vertex
//! is pushed onto the body, and a fresh heading is picked among the
//! directions that stay on the grid. Reversals are allowed.

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;

use crate::canvas::{line_dash, Canvas, Color, DashStyle};
use crate::config::SimulationConfig;
use crate::direction::Direction;
use crate::grid::{Bounds, Grid, Vertex};

/// Per-entity constants, copied out of [`SimulationConfig`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DriveParams {
    pub radius: f32,
    pub unit_distance: f32,
    pub chain_length: usize,
    pub dash_min: f32,
    pub dash_max: f32,
    pub dash_step: f32,
    pub dash_style: DashStyle,
    pub stroke: Color,
    pub fill: Color,
    pub stroke_weight: f32,
}

impl From<&SimulationConfig> for DriveParams {
    fn from(config: &SimulationConfig) -> Self {
        Self {
            radius: config.radius,
            unit_distance: config.unit_distance,
            chain_length: config.chain_length,
            dash_min: config.dash_min,
            dash_max: config.dash_max,
            dash_step: config.dash_step,
            dash_style: config.dash_style,
            stroke: config.stroke,
            fill: config.fill,
            stroke_weight: config.stroke_weight,
        }
    }
}

impl Default for DriveParams {
    fn default() -> Self {
        Self::from(&SimulationConfig::default())
    }
}

/// Vertex one cell away from `from` along `velocity`.
///
/// Only one axis is considered; vertical wins if both are set.
fn project(from: Vertex, velocity: Vec2, cell_size: f32) -> Vertex {
    match Direction::from_velocity(velocity) {
        Some(dir) => from + dir.unit() * cell_size,
        None => from,
    }
}

#[derive(Clone, Debug)]
pub struct ChainDrive {
    head: Vec2,
    velocity: Vec2,
    next_target: Vertex,
    body: VecDeque<Vertex>,
    dash_phase: f32,
    frozen: bool,
    cell_size: f32,
    bounds: Bounds,
    params: DriveParams,
}

impl ChainDrive {
    /// Create a chain drive at `origin` heading `direction`.
    ///
    /// If that heading would leave `bounds`, another one is picked among the
    /// ones that stay inside. With none available the drive starts frozen.
    pub fn new<R: Rng + ?Sized>(
        origin: Vertex,
        direction: Direction,
        cell_size: f32,
        bounds: Bounds,
        params: DriveParams,
        rng: &mut R,
    ) -> Self {
        let mut body = VecDeque::with_capacity(params.chain_length + 1);
        body.push_back(origin);

        let mut drive = Self {
            head: origin,
            velocity: direction.velocity(params.unit_distance),
            next_target: origin,
            body,
            dash_phase: params.dash_max,
            frozen: false,
            cell_size,
            bounds,
            params,
        };

        let target = project(origin, drive.velocity, cell_size);
        if bounds.contains(target) {
            drive.next_target = target;
        } else {
            drive.choose_heading(rng);
        }
        drive
    }

    /// Spawn on `origin` of `grid` with a coin-flipped heading.
    pub fn spawn<R: Rng + ?Sized>(origin: Vertex, grid: &Grid, params: DriveParams, rng: &mut R) -> Self {
        let direction = Direction::random_initial(rng);
        Self::new(origin, direction, grid.cell_size(), grid.bounds(), params, rng)
    }

    pub fn head(&self) -> Vec2 {
        self.head
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn direction(&self) -> Option<Direction> {
        Direction::from_velocity(self.velocity)
    }

    pub fn next_target(&self) -> Vertex {
        self.next_target
    }

    /// Visited vertices, oldest first.
    pub fn body(&self) -> &VecDeque<Vertex> {
        &self.body
    }

    pub fn dash_phase(&self) -> f32 {
        self.dash_phase
    }

    /// `true` once the drive ran out of on-grid headings.
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn params(&self) -> &DriveParams {
        &self.params
    }

    /// Advance one frame. Returns `true` if the head reached its target.
    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        let arrived = if self.frozen {
            false
        } else {
            self.head += self.velocity;
            self.check_arrival(rng)
        };

        self.dash_phase -= self.params.dash_step;
        if self.dash_phase < self.params.dash_min {
            self.dash_phase = self.params.dash_max;
        }
        arrived
    }

    fn check_arrival<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.head.distance(self.next_target) > self.params.unit_distance {
            return false;
        }

        let reached = self.next_target;
        self.head = reached;
        self.choose_heading(rng);

        self.body.push_back(reached);
        while self.body.len() > self.params.chain_length {
            self.body.pop_front();
        }
        true
    }

    /// Try the four headings once, in random order, and take the first whose
    /// target stays in bounds.
    fn choose_heading<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let from = self.head;
        let found = Direction::shuffled(rng).into_iter().find_map(|dir| {
            let velocity = dir.velocity(self.params.unit_distance);
            let target = project(from, velocity, self.cell_size);
            self.bounds.contains(target).then_some((velocity, target))
        });

        match found {
            Some((velocity, target)) => {
                self.velocity = velocity;
                self.next_target = target;
            }
            None => {
                log::warn!(
                    "chain drive at ({}, {}) has no on-grid heading; freezing",
                    from.x,
                    from.y
                );
                self.next_target = from;
                self.frozen = true;
            }
        }
    }

    /// Consecutive body pairs, then the newest body vertex to the head.
    ///
    /// Yields links from the first frame on, even while the body holds a
    /// single vertex. Coincident endpoints are skipped by [`ChainDrive::draw`].
    pub fn links(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        let pairs = self.body.iter().zip(self.body.iter().skip(1)).map(|(a, b)| (*a, *b));
        let to_head = self.body.back().map(|last| (*last, self.head));
        pairs.chain(to_head)
    }

    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        let weight = self.params.stroke_weight;
        canvas.set_stroke(self.params.stroke);
        canvas.set_fill(self.params.fill);

        canvas.set_stroke_weight(weight * 2.0);
        self.draw_node(canvas, self.head);

        canvas.set_stroke_weight(weight);
        for vertex in &self.body {
            self.draw_node(canvas, *vertex);
        }

        canvas.set_stroke(self.params.stroke);
        for (from, to) in self.links() {
            self.draw_link(canvas, from, to);
        }
        canvas.no_stroke();
    }

    /// Outline ring at `radius`, inner disc at half that.
    fn draw_node<C: Canvas + ?Sized>(&self, canvas: &mut C, at: Vec2) {
        let d = self.params.radius * 2.0;
        canvas.ellipse(at.x, at.y, d, d);
        canvas.ellipse(at.x, at.y, d / 2.0, d / 2.0);
    }

    /// Three parallel dashed strokes: both flanks, then the centerline.
    fn draw_link<C: Canvas + ?Sized>(&self, canvas: &mut C, from: Vec2, to: Vec2) {
        let r = self.params.radius;
        let flank = if from.x != to.x {
            Vec2::new(0.0, r)
        } else if from.y != to.y {
            Vec2::new(r, 0.0)
        } else {
            return;
        };

        for shift in [-flank, flank, Vec2::ZERO] {
            line_dash(canvas, from + shift, to + shift, self.dash_phase, self.params.dash_style);
        }
    }
}
