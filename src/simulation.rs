//! Simulation driver.
//!
//! Owns the grid and every chain drive living on it. The host feeds it three
//! kinds of events: a frame tick, a reset (pointer click) and a resize. Reset
//! and resize throw the whole population away and start a new epoch on a
//! freshly built grid.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::canvas::Canvas;
use crate::chain_drive::{ChainDrive, DriveParams};
use crate::config::SimulationConfig;
use crate::error::ConfigError;
use crate::grid::{Grid, Viewport};

pub struct Simulation {
    config: SimulationConfig,
    viewport: Viewport,
    grid: Grid,
    drives: Vec<ChainDrive>,
    rng: SmallRng,
    epoch: u64,
}

impl Simulation {
    /// Build the first epoch for `viewport`.
    ///
    /// Uses `config.seed` when set, otherwise seeds from OS entropy. The
    /// config is validated first; a rejected value is returned as an error.
    pub fn new(config: SimulationConfig, viewport: Viewport) -> Result<Self, ConfigError> {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self::with_rng(config, viewport, rng)
    }

    /// Same as [`Simulation::new`] with an explicit seed.
    pub fn with_seed(config: SimulationConfig, viewport: Viewport, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, viewport, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(config: SimulationConfig, viewport: Viewport, mut rng: SmallRng) -> Result<Self, ConfigError> {
        config.validate()?;

        let count = match config.initial_entity_count {
            Some(count) => count,
            None => rng.gen_range(config.entity_count_range.clone()),
        };
        let mut sim = Self {
            grid: Grid::build(config.cell_size, viewport),
            config,
            viewport,
            drives: Vec::new(),
            rng,
            epoch: 0,
        };
        sim.populate(count);
        Ok(sim)
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn drives(&self) -> &[ChainDrive] {
        &self.drives
    }

    pub fn entity_count(&self) -> usize {
        self.drives.len()
    }

    /// Number of rebuilds since construction.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Drop every chain drive and start over with a new random count.
    pub fn reset(&mut self) {
        // Non-empty: the config was validated on construction.
        let count = self.rng.gen_range(self.config.entity_count_range.clone());
        self.grid = Grid::build(self.config.cell_size, self.viewport);
        self.epoch += 1;
        self.populate(count);
    }

    /// Adopt a new viewport, then [`reset`](Simulation::reset).
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.reset();
    }

    /// Place `count` drives on random vertices of the current grid.
    fn populate(&mut self, count: u32) {
        self.drives.clear();

        if self.grid.is_empty() {
            log::warn!(
                "viewport {}x{} is smaller than one {}px cell; no chain drives this epoch",
                self.viewport.width,
                self.viewport.height,
                self.config.cell_size
            );
            return;
        }

        let params = DriveParams::from(&self.config);
        for _ in 0..count {
            if let Some(origin) = self.grid.random_vertex(&mut self.rng) {
                let drive = ChainDrive::spawn(origin, &self.grid, params, &mut self.rng);
                self.drives.push(drive);
            }
        }

        log::info!(
            "epoch {}: {} chain drives on {} vertices ({}x{}, offsets {}, {})",
            self.epoch,
            self.drives.len(),
            self.grid.len(),
            self.viewport.width,
            self.viewport.height,
            self.grid.horizontal_offset(),
            self.grid.vertical_offset()
        );
    }

    /// Advance every drive one frame.
    pub fn update(&mut self) {
        for drive in &mut self.drives {
            drive.update(&mut self.rng);
        }
    }

    /// One frame: clear, then update and draw each drive in order.
    pub fn tick<C: Canvas + ?Sized>(&mut self, canvas: &mut C) {
        canvas.clear(self.config.background);
        for drive in &mut self.drives {
            drive.update(&mut self.rng);
            drive.draw(canvas);
        }
    }
}
