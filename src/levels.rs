//! Level layouts and block types
//!
//! A layout is a grid of block codes: 0 is empty, anything else indexes the
//! block-type table. The table is immutable once validated.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::consts::SCORE_PER_BLOCK;
use crate::error::{ConfigError, ConfigResult};

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const ORANGE: Rgb = Rgb(255, 165, 0);
    pub const YELLOW: Rgb = Rgb(255, 255, 0);
    pub const GREEN: Rgb = Rgb(0, 255, 0);
    pub const BLUE: Rgb = Rgb(0, 0, 255);
    pub const PURPLE: Rgb = Rgb(128, 0, 128);
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    /// Subtract `step` from every channel, flooring at 0
    pub fn darken(self, step: u8) -> Rgb {
        Rgb(
            self.0.saturating_sub(step),
            self.1.saturating_sub(step),
            self.2.saturating_sub(step),
        )
    }
}

/// Properties shared by every block with the same code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockType {
    pub color: Rgb,
    pub points: u32,
    /// Hits needed to destroy
    pub strength: u8,
}

/// Rows of block codes
pub type Layout = Vec<Vec<u8>>;

/// Ordered layouts plus the code → block type mapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelTable {
    layouts: Vec<Layout>,
    block_types: BTreeMap<u8, BlockType>,
}

impl LevelTable {
    /// Build a table, checking layouts against the block-type codes.
    ///
    /// Geometry checks need a [`GameConfig`]; see [`LevelTable::validate`].
    pub fn new(layouts: Vec<Layout>, block_types: BTreeMap<u8, BlockType>) -> ConfigResult<Self> {
        let table = Self {
            layouts,
            block_types,
        };
        table.check_codes()?;
        Ok(table)
    }

    /// Parse a JSON level table (`{"layouts": [...], "block_types": {"1": {...}}}`)
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let table: Self = serde_json::from_str(json)?;
        table.check_codes()?;
        Ok(table)
    }

    /// The four built-in levels
    pub fn standard() -> Self {
        let layouts = vec![
            // Stripes
            vec![
                vec![1, 1, 1, 1, 1, 1, 1, 1],
                vec![2, 2, 2, 2, 2, 2, 2, 2],
                vec![3, 3, 3, 3, 3, 3, 3, 3],
                vec![0, 0, 0, 0, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 0, 0, 0, 0],
            ],
            // Pyramid
            vec![
                vec![0, 0, 1, 1, 1, 1, 0, 0],
                vec![0, 2, 2, 2, 2, 2, 2, 0],
                vec![3, 3, 3, 3, 3, 3, 3, 3],
                vec![4, 4, 4, 0, 0, 4, 4, 4],
                vec![5, 5, 0, 0, 0, 0, 5, 5],
            ],
            // Alternating, some armored
            vec![
                vec![2, 1, 2, 1, 2, 1, 2, 1],
                vec![3, 0, 3, 0, 3, 0, 3, 0],
                vec![4, 4, 4, 4, 4, 4, 4, 4],
                vec![0, 5, 0, 5, 0, 5, 0, 5],
                vec![6, 6, 6, 6, 6, 6, 6, 6],
            ],
            // Wall of durable blocks
            vec![
                vec![7, 7, 7, 7, 7, 7, 7, 7],
                vec![6, 6, 6, 6, 6, 6, 6, 6],
                vec![5, 5, 5, 5, 5, 5, 5, 5],
                vec![4, 4, 4, 4, 4, 4, 4, 4],
                vec![3, 3, 3, 3, 3, 3, 3, 3],
            ],
        ];

        let colors = [
            Rgb::RED,
            Rgb::ORANGE,
            Rgb::YELLOW,
            Rgb::GREEN,
            Rgb::BLUE,
            Rgb::PURPLE,
            Rgb::WHITE,
        ];
        let strengths = [1, 1, 1, 2, 2, 3, 3];
        let block_types = (1u8..=7)
            .zip(colors.into_iter().zip(strengths))
            .map(|(code, (color, strength))| {
                let block = BlockType {
                    color,
                    points: SCORE_PER_BLOCK * code as u32,
                    strength,
                };
                (code, block)
            })
            .collect();

        Self {
            layouts,
            block_types,
        }
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    /// Layout for `level`, wrapping past the last one
    pub fn layout(&self, level: usize) -> &Layout {
        &self.layouts[self.wrap(level)]
    }

    /// Map any level index onto a defined layout
    pub fn wrap(&self, level: usize) -> usize {
        level % self.layouts.len().max(1)
    }

    pub fn block_type(&self, code: u8) -> Option<&BlockType> {
        self.block_types.get(&code)
    }

    /// Number of blocks a layout produces
    pub fn block_count(&self, level: usize) -> usize {
        self.layout(level)
            .iter()
            .flatten()
            .filter(|&&code| code != 0)
            .count()
    }

    /// Full check: codes, non-empty levels, every block on screen
    pub fn validate(&self, config: &GameConfig) -> ConfigResult<()> {
        self.check_codes()?;

        let (pitch_x, pitch_y) = config.block_pitch();
        for (level, layout) in self.layouts.iter().enumerate() {
            for (row, cells) in layout.iter().enumerate() {
                for (col, &code) in cells.iter().enumerate() {
                    if code == 0 {
                        continue;
                    }
                    let left = col as f32 * pitch_x;
                    let top = config.block_top_offset + row as f32 * pitch_y;
                    let right = left + config.block_width;
                    let bottom = top + config.block_height;
                    let inside = left >= 0.0
                        && top >= 0.0
                        && right <= config.screen_width
                        && bottom <= config.screen_height;
                    if !inside {
                        return Err(ConfigError::BlockOutOfBounds { level, row, col });
                    }
                }
            }
        }
        Ok(())
    }

    fn check_codes(&self) -> ConfigResult<()> {
        if self.layouts.is_empty() {
            return Err(ConfigError::NoLevels);
        }
        if let Some((&code, _)) = self.block_types.iter().find(|(_, t)| t.strength == 0) {
            return Err(ConfigError::ZeroStrength { code });
        }

        for (level, layout) in self.layouts.iter().enumerate() {
            let mut blocks = 0usize;
            for (row, cells) in layout.iter().enumerate() {
                for (col, &code) in cells.iter().enumerate() {
                    if code == 0 {
                        continue;
                    }
                    if !self.block_types.contains_key(&code) {
                        return Err(ConfigError::UnknownBlockType {
                            level,
                            row,
                            col,
                            code,
                        });
                    }
                    blocks += 1;
                }
            }
            if blocks == 0 {
                return Err(ConfigError::EmptyLevel { level });
            }
        }
        Ok(())
    }
}

impl Default for LevelTable {
    fn default() -> Self {
        Self::standard()
    }
}
