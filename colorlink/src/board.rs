// board.rs - Live board state and path validation
//
// The board owns the tiles of the current level, the committed paths and the
// path being drawn. Invalid gestures are silent rejections: they return a
// `Rejection` and leave the board untouched.

use linked_hash_map::LinkedHashMap;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::config::GameSettings;
use crate::error::{EngineError, Result};
use crate::geometry::{
    chains_intersect, point_to_segment_distance, polyline_segments, resample_chords, Point, Segment,
};
use crate::input::{InputPhase, InputSample};
use crate::layout::{self, Layout, Tile, TileId};
use crate::level::{LevelCatalog, LevelConfig, LAST_LEVEL, TUTORIAL_LEVEL};
use crate::palette::ColorId;

// ============================================================================
// PATHS
// ============================================================================

/// Path being drawn, anchored on the center of its start tile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidatePath {
    pub start: TileId,
    pub color: ColorId,
    pub anchor: Point,
    pub samples: Vec<Point>,
    /// Set once any sample leaves the move threshold around the anchor
    pub moved: bool,
}

impl CandidatePath {
    fn new(start: &Tile) -> Self {
        Self {
            start: start.id,
            color: start.color,
            anchor: start.center,
            samples: Vec::new(),
            moved: false,
        }
    }

    fn push(&mut self, point: Point, move_threshold: f32) {
        if (point.x - self.anchor.x).abs() > move_threshold
            || (point.y - self.anchor.y).abs() > move_threshold
        {
            self.moved = true;
        }
        self.samples.push(point);
    }

    /// Anchor followed by every sample, in drawing order
    pub fn points(&self) -> Vec<Point> {
        let mut points = Vec::with_capacity(self.samples.len() + 1);
        points.push(self.anchor);
        points.extend_from_slice(&self.samples);
        points
    }

    /// Samples minus the first and the last one
    fn interior_samples(&self) -> &[Point] {
        if self.samples.len() < 3 {
            &[]
        } else {
            &self.samples[1..self.samples.len() - 1]
        }
    }
}

/// Accepted connection between the two tiles of a pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommittedPath {
    pub color: ColorId,
    pub start: TileId,
    pub end: TileId,
    /// Start center, raw samples, end center
    pub points: Vec<Point>,
    #[serde(skip)]
    chords: Vec<Segment>,
}

impl CommittedPath {
    fn new(color: ColorId, start: &Tile, end: &Tile, samples: &[Point], chord_count: usize) -> Self {
        let mut points = Vec::with_capacity(samples.len() + 2);
        points.push(start.center);
        points.extend_from_slice(samples);
        points.push(end.center);
        let chords = resample_chords(&points, chord_count);
        Self {
            color,
            start: start.id,
            end: end.id,
            points,
            chords,
        }
    }

    /// Equal-arc-length approximation used for crossing checks
    pub fn chords(&self) -> &[Segment] {
        &self.chords
    }
}

// ============================================================================
// OUTCOMES
// ============================================================================

/// Why a finished gesture did not connect anything
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    /// Released without ever leaving the start tile
    Tap,
    NoEndTile,
    SameTile,
    ColorMismatch,
    EndAlreadyConnected,
    CrossesPath(ColorId),
    PassesThroughTile(TileId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PathOutcome {
    /// No path was being drawn
    Idle,
    Rejected(Rejection),
    Connected { color: ColorId, level_complete: bool },
}

// ============================================================================
// SNAPSHOT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateSnapshot {
    pub color: ColorId,
    pub points: Vec<Point>,
}

/// Read-only copy of everything a renderer draws in one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardSnapshot {
    pub level: u32,
    pub complete: bool,
    pub layout_pending: bool,
    pub tile_width: f32,
    pub tile_height: f32,
    pub tiles: Vec<Tile>,
    pub candidate: Option<CandidateSnapshot>,
    pub committed: Vec<CommittedPath>,
}

// ============================================================================
// BOARD
// ============================================================================

type LevelCompleteCallback = Box<dyn Fn(u32) + Send + Sync>;

pub struct GameBoard {
    settings: GameSettings,
    catalog: LevelCatalog,
    rng: StdRng,

    level: u32,
    config: LevelConfig,
    dimensions: Option<(f32, f32)>,
    layout_pending: bool,

    tiles: Vec<Tile>,
    tile_width: f32,
    tile_height: f32,
    committed: LinkedHashMap<ColorId, CommittedPath>,
    candidate: Option<CandidatePath>,
    complete: bool,

    level_complete_callback: Option<LevelCompleteCallback>,
}

impl GameBoard {
    /// Board on the tutorial level, laid out once dimensions are known
    pub fn new(settings: GameSettings) -> Self {
        Self::with_rng(settings, StdRng::from_entropy())
    }

    /// Same as [`GameBoard::new`] with reproducible tile layouts
    pub fn with_seed(settings: GameSettings, seed: u64) -> Self {
        Self::with_rng(settings, StdRng::seed_from_u64(seed))
    }

    fn with_rng(settings: GameSettings, rng: StdRng) -> Self {
        let catalog = LevelCatalog::new();
        let config = catalog.get(TUTORIAL_LEVEL).clone();
        let tile_width = settings.layout.tile_width;
        let tile_height = settings.layout.tile_height;
        Self {
            settings,
            catalog,
            rng,
            level: TUTORIAL_LEVEL,
            config,
            dimensions: None,
            layout_pending: true,
            tiles: Vec::new(),
            tile_width,
            tile_height,
            committed: LinkedHashMap::new(),
            candidate: None,
            complete: false,
            level_complete_callback: None,
        }
    }

    /// Called once each time a level becomes complete
    pub fn set_level_complete_callback<F>(&mut self, callback: F)
    where
        F: Fn(u32) + Send + Sync + 'static,
    {
        self.level_complete_callback = Some(Box::new(callback));
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    pub fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn dimensions(&self) -> Option<(f32, f32)> {
        self.dimensions
    }

    pub fn is_layout_pending(&self) -> bool {
        self.layout_pending
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id)
    }

    /// First tile whose label matches, case-insensitive
    pub fn tile_by_label(&self, label: &str) -> Option<&Tile> {
        self.tiles
            .iter()
            .find(|tile| tile.label.eq_ignore_ascii_case(label.trim()))
    }

    pub fn candidate(&self) -> Option<&CandidatePath> {
        self.candidate.as_ref()
    }

    pub fn committed_path(&self, color: ColorId) -> Option<&CommittedPath> {
        self.committed.get(&color)
    }

    /// Committed paths in the order they were accepted
    pub fn committed_paths(&self) -> impl Iterator<Item = &CommittedPath> {
        self.committed.values()
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            level: self.level,
            complete: self.complete,
            layout_pending: self.layout_pending,
            tile_width: self.tile_width,
            tile_height: self.tile_height,
            tiles: self.tiles.clone(),
            candidate: self.candidate.as_ref().map(|candidate| CandidateSnapshot {
                color: candidate.color,
                points: candidate.points(),
            }),
            committed: self.committed.values().cloned().collect(),
        }
    }

    // ------------------------------------------------------------------------
    // Level lifecycle
    // ------------------------------------------------------------------------

    /// Record the board size in pixels; runs a deferred layout if one is waiting
    pub fn set_board_size(&mut self, width: f32, height: f32) -> Result<()> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(EngineError::InvalidDimensions { width, height });
        }
        self.dimensions = Some((width, height));
        if self.layout_pending {
            self.layout_current_level()?;
        }
        Ok(())
    }

    /// Start `level` from scratch. Levels outside the catalog load the
    /// tutorial. Before the board size is known the layout is deferred until
    /// [`GameBoard::set_board_size`].
    pub fn setup_level(&mut self, level: u32) -> Result<()> {
        self.load_config(level);
        match self.dimensions {
            Some(_) => self.layout_current_level(),
            None => {
                log::debug!("Level {} waiting for board dimensions", self.level);
                self.layout_pending = true;
                Ok(())
            }
        }
    }

    /// Start `level` on a layout computed elsewhere, e.g. a recorded session
    pub fn setup_level_with_layout(&mut self, level: u32, layout: Layout) -> Result<()> {
        self.load_config(level);
        if layout.tiles.len() != self.config.tile_count() {
            self.layout_pending = true;
            return Err(EngineError::LayoutFailure {
                placed: layout.tiles.len(),
                required: self.config.tile_count(),
                attempts: layout.attempts,
                tile_width: layout.tile_width,
                tile_height: layout.tile_height,
            });
        }
        self.install_layout(layout);
        Ok(())
    }

    /// Clear every connection and lay the current level out again
    pub fn reset_level(&mut self) -> Result<()> {
        self.setup_level(self.level)
    }

    /// Move on to the next level, wrapping to the tutorial after the last one
    pub fn advance_level(&mut self) -> Result<u32> {
        if self.level == LAST_LEVEL {
            log::info!("All {} levels complete, starting over", LAST_LEVEL);
        }
        let next = self.catalog.next_level(self.level);
        self.setup_level(next)?;
        Ok(next)
    }

    fn load_config(&mut self, level: u32) {
        let config = self.catalog.get(level).clone();
        self.level = config.level;
        self.config = config;
        self.clear_state();
        log::info!(
            "Setting up level {} ({} pairs on a {}x{} grid)",
            self.level,
            self.config.pairs.len(),
            self.config.grid_size,
            self.config.grid_size
        );
    }

    fn clear_state(&mut self) {
        self.tiles.clear();
        self.committed.clear();
        self.candidate = None;
        self.complete = false;
        self.tile_width = self.settings.layout.tile_width;
        self.tile_height = self.settings.layout.tile_height;
    }

    fn layout_current_level(&mut self) -> Result<()> {
        let Some((width, height)) = self.dimensions else {
            self.layout_pending = true;
            return Ok(());
        };
        match layout::place(&self.config, width, height, &self.settings.layout, &mut self.rng) {
            Ok(layout) => {
                self.install_layout(layout);
                Ok(())
            }
            Err(err) => {
                self.layout_pending = true;
                Err(err)
            }
        }
    }

    fn install_layout(&mut self, layout: Layout) {
        self.clear_state();
        self.tiles = layout.tiles;
        for (id, tile) in self.tiles.iter_mut().enumerate() {
            tile.id = id;
            tile.connected = false;
        }
        self.tile_width = layout.tile_width;
        self.tile_height = layout.tile_height;
        self.layout_pending = false;
    }

    // ------------------------------------------------------------------------
    // Path drawing
    // ------------------------------------------------------------------------

    /// Tile whose square hit region contains `point`; closest one wins
    fn find_tile_near(&self, point: Point) -> Option<TileId> {
        let radius = self.settings.input.touch_radius;
        self.tiles
            .iter()
            .filter_map(|tile| {
                let dx = (tile.center.x - point.x).abs();
                let dy = (tile.center.y - point.y).abs();
                (dx < radius && dy < radius).then_some((tile.id, dx.max(dy)))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    /// Start drawing from the tile under `point`. Returns `None` when no
    /// unconnected tile is there or the level is already complete.
    pub fn begin_path(&mut self, point: Point) -> Option<TileId> {
        self.candidate = None;
        if self.complete {
            return None;
        }
        let Some(id) = self.find_tile_near(point) else {
            log::debug!("No tile under ({:.1}, {:.1})", point.x, point.y);
            return None;
        };
        let tile = &self.tiles[id];
        if tile.connected {
            log::debug!("Tile {} ({}) is already connected", id, tile.label);
            return None;
        }
        self.candidate = Some(CandidatePath::new(tile));
        Some(id)
    }

    pub fn extend_path(&mut self, point: Point) {
        let threshold = self.settings.input.move_threshold;
        if let Some(candidate) = self.candidate.as_mut() {
            candidate.push(point, threshold);
        }
    }

    pub fn cancel_path(&mut self) {
        self.candidate = None;
    }

    /// Release the path over `point` and commit it if every rule holds
    pub fn end_path(&mut self, point: Point) -> PathOutcome {
        let Some(candidate) = self.candidate.take() else {
            return PathOutcome::Idle;
        };
        match self.validate(&candidate, point) {
            Ok(end) => self.commit(candidate, end),
            Err(reason) => {
                log::debug!(
                    "Rejected path from tile {} ({}): {:?}",
                    candidate.start,
                    self.tiles[candidate.start].label,
                    reason
                );
                PathOutcome::Rejected(reason)
            }
        }
    }

    fn validate(&self, candidate: &CandidatePath, point: Point) -> std::result::Result<TileId, Rejection> {
        if !candidate.moved {
            return Err(Rejection::Tap);
        }
        let end_id = self.find_tile_near(point).ok_or(Rejection::NoEndTile)?;
        if end_id == candidate.start {
            return Err(Rejection::SameTile);
        }
        let end = &self.tiles[end_id];
        if end.color != candidate.color {
            return Err(Rejection::ColorMismatch);
        }
        if end.connected {
            return Err(Rejection::EndAlreadyConnected);
        }

        let mut points = candidate.points();
        points.push(end.center);
        let chain = polyline_segments(&points);
        if let Some(path) = self
            .committed
            .values()
            .find(|path| chains_intersect(&chain, path.chords()))
        {
            return Err(Rejection::CrossesPath(path.color));
        }

        let clearance = self.settings.input.clearance_radius;
        let interior = candidate.interior_samples();
        for tile in &self.tiles {
            if tile.id == candidate.start || tile.id == end_id || tile.connected {
                continue;
            }
            let grazes = interior.iter().any(|sample| {
                point_to_segment_distance(tile.center, &Segment::degenerate(*sample)) < clearance
            });
            if grazes {
                return Err(Rejection::PassesThroughTile(tile.id));
            }
        }

        Ok(end_id)
    }

    fn commit(&mut self, candidate: CandidatePath, end: TileId) -> PathOutcome {
        let path = CommittedPath::new(
            candidate.color,
            &self.tiles[candidate.start],
            &self.tiles[end],
            &candidate.samples,
            self.settings.input.chord_count,
        );
        self.committed.insert(candidate.color, path);
        self.tiles[candidate.start].connected = true;
        self.tiles[end].connected = true;
        log::debug!(
            "Connected {} -> {}",
            self.tiles[candidate.start].label,
            self.tiles[end].label
        );

        let was_complete = self.complete;
        self.complete = !self.tiles.is_empty() && self.tiles.iter().all(|tile| tile.connected);
        if self.complete && !was_complete {
            log::info!("Level {} complete", self.level);
            if let Some(callback) = &self.level_complete_callback {
                callback(self.level);
            }
        }

        PathOutcome::Connected {
            color: candidate.color,
            level_complete: self.complete,
        }
    }

    /// Feed one sample from the input adapter. Only `end` samples produce an
    /// outcome; everything is ignored once the level is complete.
    pub fn handle_input(&mut self, sample: &InputSample) -> Option<PathOutcome> {
        if self.complete {
            return None;
        }
        let point = sample.point();
        match sample.phase {
            InputPhase::Start => {
                self.begin_path(point);
                None
            }
            InputPhase::Move => {
                self.extend_path(point);
                None
            }
            InputPhase::End => Some(self.end_path(point)),
            InputPhase::Cancel => {
                self.cancel_path();
                None
            }
        }
    }
}
