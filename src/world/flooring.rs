//! Flooring - the tile grid behind the player

use std::path::Path;

use macroquad::prelude::{vec2, Rect, WHITE};

use super::map_file::Cell;
use super::{MapFile, SpriteKey, TextureCache, TextureId, TILE_SIZE};
use crate::error::{AssetError, MapError};
use crate::game::Actor;
use crate::platform::Platform;

/// One drawable tile: a region of a cached sheet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    pub texture: TextureId,
    pub src: Rect,
}

/// Source rectangle of the tile at `col`, `row` of a sheet
pub fn tile_region(col: u32, row: u32) -> Rect {
    let size = TILE_SIZE as f32;
    Rect::new(col as f32 * size, row as f32 * size, size, size)
}

/// Tiles drawn at one cell, back to front
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TileStack(Vec<Tile>);

impl TileStack {
    pub fn tiles(&self) -> &[Tile] {
        &self.0
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Rows of stacks, every row as wide as the map
#[derive(Debug, Clone, PartialEq)]
pub struct TileGrid {
    rows: Vec<Vec<TileStack>>,
}

impl TileGrid {
    #[cfg(test)]
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    #[cfg(test)]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    #[cfg(test)]
    pub fn get(&self, row: usize, col: usize) -> Option<&TileStack> {
        self.rows.get(row)?.get(col)
    }

    /// Every stack with its row and column, row-major
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, &TileStack)> {
        self.rows.iter().enumerate().flat_map(|(row, stacks)| {
            stacks
                .iter()
                .enumerate()
                .map(move |(col, stack)| (row, col, stack))
        })
    }
}

/// The background actor: a tile grid plus the sheets it draws from
pub struct Flooring<T> {
    grid: TileGrid,
    textures: TextureCache<T>,
}

impl<T> Flooring<T> {
    /// Read, parse and resolve a map file
    pub fn load<P>(map_path: &Path, asset_dir: &Path, platform: &mut P) -> Result<Self, MapError>
    where
        P: Platform<Texture = T>,
    {
        let text = std::fs::read_to_string(map_path).map_err(|source| AssetError::Io {
            path: map_path.to_path_buf(),
            source,
        })?;
        let map = MapFile::parse(&text)?;
        let flooring = Self::build(&map, asset_dir, platform)?;
        log::info!(
            "Loaded map {} ({}x{}, {} sheets)",
            map_path.display(),
            map.width(),
            map.height(),
            flooring.textures.len()
        );
        Ok(flooring)
    }

    /// Resolve every cell of `map` against the sheets in `asset_dir`
    ///
    /// On failure every sheet loaded so far is released again.
    pub fn build<P>(map: &MapFile, asset_dir: &Path, platform: &mut P) -> Result<Self, AssetError>
    where
        P: Platform<Texture = T>,
    {
        let mut textures = TextureCache::new(asset_dir);
        match resolve_rows(map, &mut textures, platform) {
            Ok(rows) => Ok(Self {
                grid: TileGrid { rows },
                textures,
            }),
            Err(e) => {
                textures.release(platform);
                Err(e)
            }
        }
    }

    #[cfg(test)]
    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    #[cfg(test)]
    pub fn textures(&self) -> &TextureCache<T> {
        &self.textures
    }
}

fn resolve_rows<P: Platform>(
    map: &MapFile,
    textures: &mut TextureCache<P::Texture>,
    platform: &mut P,
) -> Result<Vec<Vec<TileStack>>, AssetError> {
    let mut rows = Vec::with_capacity(map.height());
    for (row, cells) in map.rows().iter().enumerate() {
        let line = MapFile::index_line(row);
        let mut stacks = Vec::with_capacity(cells.len());
        for cell in cells {
            stacks.push(resolve_cell(cell, line, textures, platform)?);
        }
        rows.push(stacks);
    }
    Ok(rows)
}

fn resolve_cell<P: Platform>(
    cell: &Cell,
    line: usize,
    textures: &mut TextureCache<P::Texture>,
    platform: &mut P,
) -> Result<TileStack, AssetError> {
    if cell.is_empty() {
        return Ok(TileStack::default());
    }
    let Cell { index, sprite: key } = *cell;

    let no_sheet = |source: AssetError| AssetError::Sheet {
        line,
        token: key.token().to_string(),
        source: Box::new(source),
    };

    let id = textures.resolve(key, platform).map_err(&no_sheet)?;
    let mut tiles = Vec::with_capacity(2);

    if key.is_structure() {
        let ground = textures
            .resolve(SpriteKey::GROUND, platform)
            .map_err(&no_sheet)?;
        tiles.push(Tile {
            texture: ground,
            src: tile_region(0, 0),
        });
    }

    let (columns, rows, position) = match textures.get(id) {
        Some(sheet) => (sheet.columns, sheet.rows, sheet.locate(index)),
        None => (0, 0, None),
    };
    let (col, row) = position.ok_or_else(|| AssetError::IndexOutOfSheet {
        line,
        index,
        key: key.token().to_string(),
        columns,
        rows,
    })?;
    tiles.push(Tile {
        texture: id,
        src: tile_region(col, row),
    });

    Ok(TileStack(tiles))
}

impl<P: Platform> Actor<P> for Flooring<P::Texture> {
    fn input(&mut self, _platform: &P) {}

    fn update(&mut self, _tick: u32, _platform: &mut P) {}

    fn draw(&self, platform: &mut P) {
        let size = TILE_SIZE as f32;
        // Tiles hang from their bottom-right corner, the same anchoring the
        // player uses, so cell (0, 0) covers world (-16, -16)..(0, 0)
        let origin = vec2(size, size);
        for (row, col, stack) in self.grid.cells() {
            let dest = Rect::new(col as f32 * size, row as f32 * size, size, size);
            for tile in stack.tiles() {
                if let Some(sheet) = self.textures.get(tile.texture) {
                    platform.draw_texture_region(
                        &sheet.texture,
                        tile.src,
                        dest,
                        origin,
                        0.0,
                        WHITE,
                    );
                }
            }
        }
    }

    fn quit(&mut self, platform: &mut P) {
        self.textures.release(platform);
    }
}
