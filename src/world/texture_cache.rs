//! Texture cache - one load per sprite sheet
//!
//! Sheets are kept in an arena and handed out as [`TextureId`] indices, so
//! any number of tiles can share a sheet while the cache stays its only
//! owner. Releasing the cache unloads every sheet exactly once.

use std::collections::HashMap;
use std::path::PathBuf;

use super::{SpriteKey, TILE_SIZE};
use crate::error::AssetError;
use crate::platform::Platform;

/// Index of a sheet inside a [`TextureCache`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(usize);

/// A loaded sheet and its size in tile units
#[derive(Debug)]
pub struct SpriteSheet<T> {
    pub texture: T,
    pub columns: u32,
    pub rows: u32,
}

impl<T> SpriteSheet<T> {
    /// Column and row of the 1-indexed `index`, reading the sheet
    /// left-to-right, top-to-bottom. `None` for 0 or past the last row.
    pub fn locate(&self, index: u32) -> Option<(u32, u32)> {
        let (col, row) = sheet_position(index, self.columns)?;
        (row < self.rows).then_some((col, row))
    }
}

/// Column and row of the 1-indexed `index` in a sheet `columns` tiles wide
pub fn sheet_position(index: u32, columns: u32) -> Option<(u32, u32)> {
    if index == 0 || columns == 0 {
        return None;
    }
    let n = index - 1;
    Some((n % columns, n / columns))
}

#[derive(Debug)]
pub struct TextureCache<T> {
    asset_dir: PathBuf,
    sheets: Vec<SpriteSheet<T>>,
    by_key: HashMap<SpriteKey, TextureId>,
}

impl<T> TextureCache<T> {
    pub fn new(asset_dir: impl Into<PathBuf>) -> Self {
        Self {
            asset_dir: asset_dir.into(),
            sheets: Vec::new(),
            by_key: HashMap::new(),
        }
    }

    /// Id of the sheet for `key`, loading it on first use
    pub fn resolve<P>(
        &mut self,
        key: SpriteKey,
        platform: &mut P,
    ) -> Result<TextureId, AssetError>
    where
        P: Platform<Texture = T>,
    {
        if let Some(id) = self.by_key.get(&key) {
            return Ok(*id);
        }

        let path = self.asset_dir.join(key.sheet_path());
        let texture = platform.load_texture(&path)?;
        let (width, height) = platform.texture_size(&texture);
        let (columns, rows) = (width / TILE_SIZE, height / TILE_SIZE);
        if columns == 0 || rows == 0 {
            platform.unload_texture(texture);
            return Err(AssetError::SheetTooSmall {
                path,
                tile: TILE_SIZE,
                width,
                height,
            });
        }

        log::debug!("Sprite sheet {:?} is {}x{} tiles", key, columns, rows);
        let id = TextureId(self.sheets.len());
        self.sheets.push(SpriteSheet {
            texture,
            columns,
            rows,
        });
        self.by_key.insert(key, id);
        Ok(id)
    }

    pub fn get(&self, id: TextureId) -> Option<&SpriteSheet<T>> {
        self.sheets.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Unload every sheet. Ids handed out before are dangling afterwards.
    pub fn release<P>(&mut self, platform: &mut P)
    where
        P: Platform<Texture = T>,
    {
        self.by_key.clear();
        for sheet in self.sheets.drain(..) {
            platform.unload_texture(sheet.texture);
        }
    }
}
