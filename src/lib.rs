//! # chaindrive
//!
//! Chain drives wandering a square grid.
//!
//! A chain drive is a head node that walks from grid vertex to grid vertex,
//! picking a random heading at every corner, and drags a short body of the
//! vertices it recently visited. Consecutive body vertices are joined by
//! three dashed rails whose dash length pulses over time.
//!
//! ## Quick Start
//!
//! ```ignore
//! use chaindrive::SimulationConfig;
//!
//! fn main() -> Result<(), chaindrive::SimulationError> {
//!     chaindrive::run(SimulationConfig::default())
//! }
//! ```
//!
//! ## Headless use
//!
//! The simulation draws through the [`Canvas`] trait, so it runs without a
//! window. [`Recorder`] captures the calls:
//!
//! ```
//! use chaindrive::{Recorder, Simulation, SimulationConfig, Viewport};
//!
//! let mut sim = Simulation::with_seed(SimulationConfig::default(), Viewport::new(500.0, 500.0), 1).unwrap();
//! let mut canvas = Recorder::new();
//! sim.tick(&mut canvas);
//! assert_eq!(sim.grid().len(), 100);
//! ```
//!
//! ## Controls
//!
//! | Input | Effect |
//! |-------|--------|
//! | Left click | New epoch with a random number of drives |
//! | Resize | Rebuild the grid for the new window size |
//! | Escape | Quit |

pub mod canvas;
pub mod chain_drive;
pub mod config;
pub mod direction;
mod error;
mod gpu;
pub mod grid;
pub mod input;
mod shader;
mod simulation;
pub mod time;
mod window;

pub use canvas::{line_dash, Canvas, Color, DashStyle, DrawCommand, Recorder};
pub use chain_drive::{ChainDrive, DriveParams};
pub use config::SimulationConfig;
pub use direction::Direction;
pub use error::{ConfigError, GpuError, SimulationError};
pub use glam::Vec2;
pub use gpu::ShapeBatch;
pub use grid::{Bounds, Grid, Vertex, Viewport};
pub use shader::{ShapeVertex, SHADER_SOURCE};
pub use simulation::Simulation;
pub use window::run;
