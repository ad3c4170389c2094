//! Map file parsing
//!
//! ```text
//! 3 2          <- width height
//! 1 0 5        <- `height` rows of 1-indexed sprite indices (0 = empty)
//! 2 2 1
//! g g h        <- `height` rows of sprite keys, one per column
//! w w g
//! ```
//!
//! Tokens are separated by any whitespace. Trailing blank lines are ignored;
//! any other line count than `2 * height + 1` is an error.

use std::str::FromStr;

use super::SpriteKey;
use crate::error::{AssetError, MapError, MapFormatError};

/// One grid cell as written in the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// 1-indexed position in the sheet, 0 for an empty cell
    pub index: u32,
    pub sprite: SpriteKey,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        self.index == 0
    }
}

/// A parsed map, not yet bound to any texture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapFile {
    width: usize,
    height: usize,
    rows: Vec<Vec<Cell>>,
}

impl MapFile {
    pub fn parse(text: &str) -> Result<Self, MapError> {
        let mut lines: Vec<&str> = text.lines().collect();
        while lines.last().is_some_and(|line| line.trim().is_empty()) {
            lines.pop();
        }
        let Some(header) = lines.first() else {
            return Err(MapFormatError::Empty.into());
        };

        let sizes: Vec<usize> = parse_numbers(header, 1)?;
        let [width, height] = sizes[..] else {
            return Err(MapFormatError::BadHeader {
                found: header.trim().to_string(),
            }
            .into());
        };
        if width == 0 || height == 0 {
            return Err(MapFormatError::ZeroSize { width, height }.into());
        }

        let expected = height.saturating_mul(2).saturating_add(1);
        if lines.len() != expected {
            return Err(MapFormatError::LineCount {
                expected,
                found: lines.len(),
                height,
            }
            .into());
        }

        let mut rows = Vec::with_capacity(height);
        for row in 0..height {
            let index_line = lines[1 + row];
            let sprite_line = lines[1 + height + row];

            let indices: Vec<u32> = parse_numbers(index_line, Self::index_line(row))?;
            let sprites = parse_sprites(sprite_line, Self::sprite_line(row, height))?;

            if indices.len() != width || sprites.len() != width {
                return Err(MapFormatError::RowLength {
                    row,
                    indices: index_line.trim().to_string(),
                    index_count: indices.len(),
                    sprites: sprite_line.trim().to_string(),
                    sprite_count: sprites.len(),
                    width,
                }
                .into());
            }

            rows.push(
                indices
                    .into_iter()
                    .zip(sprites)
                    .map(|(index, sprite)| Cell { index, sprite })
                    .collect(),
            );
        }

        Ok(Self {
            width,
            height,
            rows,
        })
    }

    /// 1-based file line holding the indices of grid row `row`
    pub fn index_line(row: usize) -> usize {
        row + 2
    }

    /// 1-based file line holding the sprite keys of grid row `row`
    pub fn sprite_line(row: usize, height: usize) -> usize {
        row + height + 2
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    #[cfg(test)]
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.rows.get(row)?.get(col).copied()
    }
}

fn parse_numbers<T: FromStr>(line: &str, line_no: usize) -> Result<Vec<T>, MapFormatError> {
    line.split_whitespace()
        .map(|token| {
            token.parse().map_err(|_| MapFormatError::InvalidNumber {
                line: line_no,
                token: token.to_string(),
            })
        })
        .collect()
}

fn parse_sprites(line: &str, line_no: usize) -> Result<Vec<SpriteKey>, AssetError> {
    line.split_whitespace()
        .map(|token| {
            SpriteKey::from_token(token).ok_or_else(|| AssetError::UnknownSprite {
                line: line_no,
                token: token.to_string(),
            })
        })
        .collect()
}
