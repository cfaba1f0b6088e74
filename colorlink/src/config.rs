// config.rs - Tunable engine settings, loadable from JSON

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Tile footprint and the shrink-and-retry policy of the layout solver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub tile_width: f32,
    pub tile_height: f32,
    /// Clearance kept around a candidate tile while placing it
    pub padding: f32,
    pub shrink_factor: f32,
    pub max_layout_attempts: u32,
    /// Smallest footprint side the solver will try before giving up
    pub min_tile_size: f32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            tile_width: 310.0,
            tile_height: 190.0,
            padding: 10.0,
            shrink_factor: 0.9,
            max_layout_attempts: 30,
            min_tile_size: 8.0,
        }
    }
}

/// Upper bound on `InputSettings::chord_count`; every committed path stores this many chords
pub const MAX_CHORD_COUNT: usize = 1024;

/// Hit testing and path validation radii, in pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    /// Half side of the square hit region around a tile center
    pub touch_radius: f32,
    /// Per-axis distance from the anchor before a gesture counts as a drag
    pub move_threshold: f32,
    /// Paths may not come this close to another unconnected tile center
    pub clearance_radius: f32,
    /// Chords used to approximate committed paths in crossing checks
    pub chord_count: usize,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            touch_radius: 100.0,
            move_threshold: 10.0,
            clearance_radius: 45.0,
            chord_count: 20,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub layout: LayoutSettings,
    pub input: InputSettings,
}

impl GameSettings {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: GameSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        let layout = &self.layout;
        let input = &self.input;
        let positive = [
            ("layout.tile_width", layout.tile_width),
            ("layout.tile_height", layout.tile_height),
            ("layout.min_tile_size", layout.min_tile_size),
            ("input.touch_radius", input.touch_radius),
            ("input.clearance_radius", input.clearance_radius),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(format!("{name} must be a positive number, got {value}")));
            }
        }
        if !(layout.padding.is_finite() && layout.padding >= 0.0) {
            return Err(invalid(format!("layout.padding must be >= 0, got {}", layout.padding)));
        }
        if !(input.move_threshold.is_finite() && input.move_threshold >= 0.0) {
            return Err(invalid(format!(
                "input.move_threshold must be >= 0, got {}",
                input.move_threshold
            )));
        }
        if !(layout.shrink_factor > 0.0 && layout.shrink_factor < 1.0) {
            return Err(invalid(format!(
                "layout.shrink_factor must be in (0, 1), got {}",
                layout.shrink_factor
            )));
        }
        if layout.max_layout_attempts == 0 {
            return Err(invalid("layout.max_layout_attempts must be at least 1".to_string()));
        }
        if !(1..=MAX_CHORD_COUNT).contains(&input.chord_count) {
            return Err(invalid(format!(
                "input.chord_count must be in 1..={MAX_CHORD_COUNT}, got {}",
                input.chord_count
            )));
        }
        Ok(())
    }
}

fn invalid(reason: String) -> EngineError {
    EngineError::InvalidSettings { reason }
}
