// layout.rs - Places tile rectangles on the board without overlaps
//
// Each attempt draws grid cells at random and keeps a cell only when the
// candidate tile, grown by the padding margin, stays clear of every tile
// already placed. When an attempt cannot seat every tile the footprint shrinks
// and the whole placement starts over, up to a fixed number of attempts.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::LayoutSettings;
use crate::error::{EngineError, Result};
use crate::geometry::{rectangles_overlap, Point, Rect};
use crate::level::{GridPosition, LevelConfig};
use crate::palette::ColorId;

pub type TileId = usize;

/// Which half of a pair a tile shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileRole {
    Word,
    Meaning,
}

/// A placed tile; `center` is in board pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub center: Point,
    pub color: ColorId,
    pub label: String,
    pub pair_index: usize,
    pub role: TileRole,
    pub connected: bool,
}

impl Tile {
    pub fn new(
        id: TileId,
        center: Point,
        color: ColorId,
        label: impl Into<String>,
        pair_index: usize,
        role: TileRole,
    ) -> Self {
        Self {
            id,
            center,
            color,
            label: label.into(),
            pair_index,
            role,
            connected: false,
        }
    }

    pub fn rect(&self, width: f32, height: f32) -> Rect {
        Rect::centered(self.center, width, height)
    }
}

/// Solver output: the tiles plus the footprint that made them fit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub tiles: Vec<Tile>,
    pub tile_width: f32,
    pub tile_height: f32,
    pub attempts: u32,
}

impl Layout {
    pub fn tile_rect(&self, tile: &Tile) -> Rect {
        tile.rect(self.tile_width, self.tile_height)
    }

    /// First pair of tiles whose rectangles overlap, if any
    pub fn find_overlap(&self) -> Option<(TileId, TileId)> {
        for (i, a) in self.tiles.iter().enumerate() {
            for b in &self.tiles[i + 1..] {
                if rectangles_overlap(&self.tile_rect(a), &self.tile_rect(b)) {
                    return Some((a.id, b.id));
                }
            }
        }
        None
    }
}

/// Pixel pitch of the grid; one margin cell is reserved on every edge
#[derive(Debug, Clone, Copy, PartialEq)]
struct CellPitch {
    width: f32,
    height: f32,
}

impl CellPitch {
    fn new(board_width: f32, board_height: f32, grid_size: u32) -> Self {
        let cells = grid_size as f32 + 1.0;
        Self {
            width: board_width / cells,
            height: board_height / cells,
        }
    }

    fn center(&self, position: GridPosition) -> Point {
        Point::new(position.col as f32 * self.width, position.row as f32 * self.height)
    }
}

struct Attempt<'a, R: Rng> {
    pitch: CellPitch,
    tile_width: f32,
    tile_height: f32,
    padding: f32,
    pool: Vec<GridPosition>,
    tiles: Vec<Tile>,
    rng: &'a mut R,
}

impl<'a, R: Rng> Attempt<'a, R> {
    fn new(grid_size: u32, pitch: CellPitch, width: f32, height: f32, padding: f32, rng: &'a mut R) -> Self {
        let mut pool = Vec::with_capacity((grid_size * grid_size) as usize);
        for col in 1..=grid_size {
            for row in 1..=grid_size {
                pool.push(GridPosition::new(col, row));
            }
        }
        Self {
            pitch,
            tile_width: width,
            tile_height: height,
            padding,
            pool,
            tiles: Vec::new(),
            rng,
        }
    }

    fn would_overlap(&self, center: Point) -> bool {
        let candidate = Rect::centered(center, self.tile_width, self.tile_height).inflate(self.padding);
        self.tiles
            .iter()
            .any(|tile| rectangles_overlap(&candidate, &tile.rect(self.tile_width, self.tile_height)))
    }

    /// Draw cells uniformly until one fits, removing it from the pool
    fn find_valid_position(&mut self) -> Option<GridPosition> {
        let mut remaining = self.pool.clone();
        while !remaining.is_empty() {
            let index = self.rng.gen_range(0..remaining.len());
            let position = remaining.remove(index);
            if !self.would_overlap(self.pitch.center(position)) {
                self.pool.retain(|p| *p != position);
                return Some(position);
            }
        }
        None
    }

    fn place_tile(&mut self, color: ColorId, label: &str, pair_index: usize, role: TileRole) -> bool {
        match self.find_valid_position() {
            Some(position) => {
                let id = self.tiles.len();
                let center = self.pitch.center(position);
                self.tiles.push(Tile::new(id, center, color, label, pair_index, role));
                true
            }
            None => false,
        }
    }

    /// Seat every tile of `config`; on failure returns how many were placed
    fn run(mut self, config: &LevelConfig) -> std::result::Result<Vec<Tile>, usize> {
        for (pair_index, pair) in config.pairs.iter().enumerate() {
            if !self.place_tile(pair.color, &pair.word, pair_index, TileRole::Word) {
                return Err(self.tiles.len());
            }
            if !self.place_tile(pair.color, &pair.meaning, pair_index, TileRole::Meaning) {
                return Err(self.tiles.len());
            }
        }
        Ok(self.tiles)
    }
}

/// Place every tile of `config` on a `board_width x board_height` board.
///
/// Starts from the configured footprint and shrinks it by
/// `settings.shrink_factor` after each failed attempt. Fails with
/// [`EngineError::LayoutFailure`] once `settings.max_layout_attempts` attempts
/// are used up or the footprint would drop under `settings.min_tile_size`.
pub fn place<R: Rng>(
    config: &LevelConfig,
    board_width: f32,
    board_height: f32,
    settings: &LayoutSettings,
    rng: &mut R,
) -> Result<Layout> {
    if !(board_width.is_finite() && board_height.is_finite() && board_width > 0.0 && board_height > 0.0) {
        return Err(EngineError::InvalidDimensions {
            width: board_width,
            height: board_height,
        });
    }

    let pitch = CellPitch::new(board_width, board_height, config.grid_size);
    let required = config.tile_count();
    let mut tile_width = settings.tile_width;
    let mut tile_height = settings.tile_height;
    let mut best_placed = 0;
    let mut attempts = 0;

    while attempts < settings.max_layout_attempts
        && tile_width >= settings.min_tile_size
        && tile_height >= settings.min_tile_size
    {
        attempts += 1;
        let attempt = Attempt::new(config.grid_size, pitch, tile_width, tile_height, settings.padding, &mut *rng);
        match attempt.run(config) {
            Ok(tiles) => {
                log::debug!(
                    "Level {} laid out {} tiles at {:.1}x{:.1} after {} attempt(s)",
                    config.level,
                    tiles.len(),
                    tile_width,
                    tile_height,
                    attempts
                );
                return Ok(Layout {
                    tiles,
                    tile_width,
                    tile_height,
                    attempts,
                });
            }
            Err(placed) => {
                log::debug!(
                    "Level {} attempt {}: placed {}/{} tiles at {:.1}x{:.1}, shrinking",
                    config.level,
                    attempts,
                    placed,
                    required,
                    tile_width,
                    tile_height
                );
                best_placed = best_placed.max(placed);
                tile_width *= settings.shrink_factor;
                tile_height *= settings.shrink_factor;
            }
        }
    }

    Err(EngineError::LayoutFailure {
        placed: best_placed,
        required,
        attempts,
        tile_width,
        tile_height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{generate, tutorial};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_tutorial_fits_without_shrinking() {
        let mut rng = StdRng::seed_from_u64(7);
        let layout = place(&tutorial(), 1600.0, 1600.0, &LayoutSettings::default(), &mut rng).unwrap();
        assert_eq!(layout.tiles.len(), 6);
        assert_eq!(layout.attempts, 1);
        assert_eq!(layout.tile_width, 310.0);
        assert!(layout.find_overlap().is_none());
    }

    #[test]
    fn test_tiles_follow_pair_order() {
        let mut rng = StdRng::seed_from_u64(11);
        let config = tutorial();
        let layout = place(&config, 1600.0, 1600.0, &LayoutSettings::default(), &mut rng).unwrap();
        for (i, pair) in config.pairs.iter().enumerate() {
            let word = &layout.tiles[i * 2];
            let meaning = &layout.tiles[i * 2 + 1];
            assert_eq!(word.label, pair.word);
            assert_eq!(word.role, TileRole::Word);
            assert_eq!(meaning.label, pair.meaning);
            assert_eq!(meaning.role, TileRole::Meaning);
            assert_eq!(word.color, meaning.color);
            assert_eq!(word.id, i * 2);
            assert!(!word.connected && !meaning.connected);
        }
    }

    #[test]
    fn test_centers_sit_on_grid_cells() {
        let mut rng = StdRng::seed_from_u64(3);
        let layout = place(&tutorial(), 1600.0, 1600.0, &LayoutSettings::default(), &mut rng).unwrap();
        for tile in &layout.tiles {
            let col = tile.center.x / 400.0;
            let row = tile.center.y / 400.0;
            assert_eq!(col.fract(), 0.0);
            assert_eq!(row.fract(), 0.0);
            assert!((1.0..=3.0).contains(&col) && (1.0..=3.0).contains(&row));
        }
    }

    #[test]
    fn test_small_board_shrinks_footprint() {
        // 6x6 grid on a 500px board: at most four default tiles can ever fit
        let mut rng = StdRng::seed_from_u64(5);
        let layout = place(&generate(12), 500.0, 500.0, &LayoutSettings::default(), &mut rng).unwrap();
        assert!(layout.attempts > 1);
        assert!(layout.tile_width < 310.0);
        assert!(layout.find_overlap().is_none());
    }

    #[test]
    fn test_every_level_lays_out() {
        let mut rng = StdRng::seed_from_u64(99);
        for level in 1..=100 {
            let config = generate(level);
            let layout = place(&config, 1080.0, 1920.0, &LayoutSettings::default(), &mut rng).unwrap();
            assert_eq!(layout.tiles.len(), config.tile_count());
            assert!(layout.find_overlap().is_none(), "level {level} overlaps");
        }
    }

    #[test]
    fn test_exhaustion_reports_failure() {
        let settings = LayoutSettings {
            max_layout_attempts: 3,
            ..LayoutSettings::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        let err = place(&generate(20), 200.0, 200.0, &settings, &mut rng).unwrap_err();
        match err {
            EngineError::LayoutFailure { required, attempts, .. } => {
                assert_eq!(required, generate(20).tile_count());
                assert_eq!(attempts, 3);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_min_tile_size_floor_stops_retries() {
        let settings = LayoutSettings {
            min_tile_size: 180.0,
            ..LayoutSettings::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        let err = place(&generate(20), 200.0, 200.0, &settings, &mut rng).unwrap_err();
        assert!(matches!(err, EngineError::LayoutFailure { attempts: 1, .. }));
    }

    #[test]
    fn test_rejects_unusable_dimensions() {
        let mut rng = StdRng::seed_from_u64(1);
        let settings = LayoutSettings::default();
        assert!(matches!(
            place(&tutorial(), 0.0, 100.0, &settings, &mut rng),
            Err(EngineError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            place(&tutorial(), f32::NAN, 100.0, &settings, &mut rng),
            Err(EngineError::InvalidDimensions { .. })
        ));
    }
}
