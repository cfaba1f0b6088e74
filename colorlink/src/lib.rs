// lib.rs - Library exports for colorlink-engine
// Level generation, tile layout and path validation for the word/meaning link puzzle

pub mod board;
pub mod config;
pub mod error;
pub mod geometry;
pub mod input;
pub mod label;
pub mod layout;
pub mod level;
pub mod palette;
pub mod vocabulary;

// Re-export commonly used types
pub use board::{BoardSnapshot, CandidatePath, CommittedPath, GameBoard, PathOutcome, Rejection};
pub use config::{GameSettings, InputSettings, LayoutSettings};
pub use error::{EngineError, Result};
pub use geometry::{Point, Rect, Segment};
pub use input::{InputPhase, InputSample};
pub use layout::{Layout, Tile, TileId, TileRole};
pub use level::{LevelCatalog, LevelConfig, Pair, LAST_LEVEL, TUTORIAL_LEVEL};
pub use palette::{BoardStyle, Color, ColorId};
