// palette.rs - Pair colors and immutable style descriptors for renderers
// The engine never holds drawing state; a renderer reads `BoardStyle` and a
// `BoardSnapshot` and paints from those alone.

use serde::{Deserialize, Serialize};

use crate::layout::Tile;

// ============================================================================
// COLOR TYPE
// ============================================================================

/// RGBA color, components in 0..=1
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub fn to_hex(self) -> String {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02X}{:02X}{:02X}", channel(self.r), channel(self.g), channel(self.b))
    }
}

pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
pub const YELLOW: Color = Color::rgb(1.0, 1.0, 0.0);
pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
pub const MAGENTA: Color = Color::rgb(1.0, 0.0, 1.0);
pub const CYAN: Color = Color::rgb(0.0, 1.0, 1.0);
// #FFA500
pub const ORANGE: Color = Color::rgb(1.0, 165.0 / 255.0, 0.0);
pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
// #444444
pub const DARK_GRAY: Color = Color::rgb(68.0 / 255.0, 68.0 / 255.0, 68.0 / 255.0);

/// Pair colors in assignment order; pair `i` takes `PALETTE[i % len]`
pub const PALETTE: [Color; 7] = [RED, BLUE, YELLOW, GREEN, MAGENTA, CYAN, ORANGE];

/// Index into [`PALETTE`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorId(pub u8);

impl ColorId {
    /// Color for the `pair_index`-th pair of a level; cycles through the palette
    pub fn for_pair(pair_index: usize) -> Self {
        ColorId((pair_index % PALETTE.len()) as u8)
    }

    pub fn color(self) -> Color {
        PALETTE[self.0 as usize % PALETTE.len()]
    }
}

// ============================================================================
// STYLE DESCRIPTORS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileStyle {
    pub fill: Color,
    pub text: Color,
}

/// Fixed drawing parameters for the board
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoardStyle {
    pub path_stroke_width: f32,
    pub tile_corner_radius: f32,
    pub label_text_size: f32,
    pub title_text_size: f32,
    pub idle_fill: Color,
    pub idle_text: Color,
    pub connected_text: Color,
}

impl Default for BoardStyle {
    fn default() -> Self {
        Self {
            path_stroke_width: 20.0,
            tile_corner_radius: 10.0,
            label_text_size: 25.0,
            title_text_size: 60.0,
            idle_fill: WHITE,
            idle_text: DARK_GRAY,
            connected_text: BLACK,
        }
    }
}

impl BoardStyle {
    /// Connected tiles are filled with their pair color, idle tiles stay white
    pub fn tile_style(&self, tile: &Tile) -> TileStyle {
        if tile.connected {
            TileStyle {
                fill: tile.color.color(),
                text: self.connected_text,
            }
        } else {
            TileStyle {
                fill: self.idle_fill,
                text: self.idle_text,
            }
        }
    }

    /// Stroke color for a path of `color`
    pub fn path_color(&self, color: ColorId) -> Color {
        color.color()
    }
}
