//! Simulation settings.
//!
//! Every field has a default, so a JSON file only needs to name what it
//! changes:
//!
//! ```json
//! { "cell_size": 40.0, "chain_length": 12, "dash_style": "dot" }
//! ```

use std::fs;
use std::ops::Range;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::canvas::{Color, DashStyle};
use crate::error::ConfigError;
use crate::grid::{self, Viewport};

/// Smallest accepted grid cell, in pixels.
pub const MIN_CELL_SIZE: f32 = 1.0;

/// Tunables for the grid, the chain drives and the window.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Side length of one grid square, in pixels.
    pub cell_size: f32,
    /// Radius of the inner disc drawn at each node.
    pub radius: f32,
    /// Distance the head moves per frame.
    pub unit_distance: f32,
    /// Maximum number of vertices kept in a body.
    pub chain_length: usize,
    /// Entity count for the first epoch. `None` rolls one from `entity_count_range`.
    pub initial_entity_count: Option<u32>,
    /// Half-open range entity counts are rolled from on reset.
    pub entity_count_range: Range<u32>,
    /// Longest dash length; the dash phase starts and wraps here.
    pub dash_max: f32,
    /// Dash phase wraps back to `dash_max` once it falls below this.
    pub dash_min: f32,
    /// Amount the dash phase shrinks per update.
    pub dash_step: f32,
    pub dash_style: DashStyle,
    pub background: Color,
    pub stroke: Color,
    pub fill: Color,
    /// Stroke weight for body nodes and links; the head uses twice this.
    pub stroke_weight: f32,
    pub window_width: u32,
    pub window_height: u32,
    /// Fixed RNG seed, mainly for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            cell_size: 50.0,
            radius: 10.0,
            unit_distance: 10.0,
            chain_length: 7,
            initial_entity_count: Some(20),
            entity_count_range: 1..20,
            dash_max: 3.0,
            dash_min: 2.0,
            dash_step: 0.1,
            dash_style: DashStyle::Dash,
            background: Color::BLACK,
            stroke: Color::WHITE,
            fill: Color::BLACK,
            stroke_weight: 1.0,
            window_width: 1280,
            window_height: 720,
            seed: None,
        }
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be a positive number, got {}", value),
        })
    }
}

impl SimulationConfig {
    pub fn with_cell_size(mut self, cell_size: f32) -> Self {
        self.cell_size = cell_size;
        self
    }

    pub fn with_chain_length(mut self, chain_length: usize) -> Self {
        self.chain_length = chain_length;
        self
    }

    /// Fix the first epoch's population instead of rolling it.
    pub fn with_entity_count(mut self, count: u32) -> Self {
        self.initial_entity_count = Some(count);
        self
    }

    pub fn with_dash_style(mut self, style: DashStyle) -> Self {
        self.dash_style = style;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Read and validate a JSON settings file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would stall or break the animation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("cell_size", self.cell_size)?;
        positive("radius", self.radius)?;
        positive("unit_distance", self.unit_distance)?;
        positive("dash_min", self.dash_min)?;
        positive("dash_max", self.dash_max)?;
        positive("dash_step", self.dash_step)?;
        positive("stroke_weight", self.stroke_weight)?;

        if self.cell_size < MIN_CELL_SIZE {
            return Err(ConfigError::Invalid {
                field: "cell_size",
                reason: format!("must be at least {} pixel, got {}", MIN_CELL_SIZE, self.cell_size),
            });
        }
        for (field, value) in [("window_width", self.window_width), ("window_height", self.window_height)] {
            if value == 0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "window must not be empty".to_string(),
                });
            }
        }
        let window = Viewport::new(self.window_width as f32, self.window_height as f32);
        let vertices = grid::vertex_count(self.cell_size, window);
        if vertices > grid::MAX_VERTICES {
            return Err(ConfigError::Invalid {
                field: "cell_size",
                reason: format!(
                    "{} vertices at {}x{} exceeds the limit of {}",
                    vertices,
                    self.window_width,
                    self.window_height,
                    grid::MAX_VERTICES
                ),
            });
        }

        if self.dash_min >= self.dash_max {
            return Err(ConfigError::Invalid {
                field: "dash_min",
                reason: format!("must be below dash_max ({})", self.dash_max),
            });
        }
        if self.chain_length == 0 {
            return Err(ConfigError::Invalid {
                field: "chain_length",
                reason: "must keep at least one vertex".to_string(),
            });
        }
        if self.initial_entity_count == Some(0) {
            return Err(ConfigError::Invalid {
                field: "initial_entity_count",
                reason: "must place at least one chain drive".to_string(),
            });
        }
        if self.entity_count_range.start == 0 {
            return Err(ConfigError::Invalid {
                field: "entity_count_range",
                reason: "must start at 1 or above".to_string(),
            });
        }
        if self.entity_count_range.is_empty() {
            return Err(ConfigError::Invalid {
                field: "entity_count_range",
                reason: format!(
                    "{}..{} contains no counts",
                    self.entity_count_range.start, self.entity_count_range.end
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.chain_length, 7);
        assert_eq!(config.entity_count_range, 1..20);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = SimulationConfig::from_json(r#"{ "cell_size": 40.0, "dash_style": "round" }"#)
            .expect("valid config");
        assert_eq!(config.cell_size, 40.0);
        assert_eq!(config.dash_style, DashStyle::Round);
        assert_eq!(config.radius, 10.0);
    }

    #[test]
    fn test_json_round_trip() {
        let mut config = SimulationConfig::default();
        config.seed = Some(99);
        config.initial_entity_count = None;
        let text = config.to_json().unwrap();
        assert_eq!(SimulationConfig::from_json(&text).unwrap(), config);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = SimulationConfig::from_json(r#"{ "cell_size": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "cell_size", .. }));

        let err = SimulationConfig::from_json(r#"{ "dash_min": 4.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "dash_min", .. }));

        let err = SimulationConfig::from_json(r#"{ "chain_length": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "chain_length", .. }));

        let err = SimulationConfig::from_json(
            r#"{ "entity_count_range": { "start": 5, "end": 5 } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "entity_count_range", .. }));
    }

    #[test]
    fn test_rejects_tiny_cells() {
        let err = SimulationConfig::from_json(r#"{ "cell_size": 0.001 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "cell_size", .. }));

        // Above the floor but still too dense for a huge window.
        let err = SimulationConfig::from_json(
            r#"{ "cell_size": 1.0, "window_width": 100000, "window_height": 100000 }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "cell_size", .. }));

        assert!(SimulationConfig::default().with_cell_size(MIN_CELL_SIZE).validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_counts_and_sizes() {
        let err = SimulationConfig::default().with_entity_count(0).validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "initial_entity_count", .. }));

        let err = SimulationConfig::from_json(r#"{ "entity_count_range": { "start": 0, "end": 4 } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "entity_count_range", .. }));

        let err = SimulationConfig::from_json(r#"{ "window_width": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "window_width", .. }));

        let err = SimulationConfig::from_json(r#"{ "window_height": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "window_height", .. }));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = SimulationConfig::from_json("{ cell_size: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
