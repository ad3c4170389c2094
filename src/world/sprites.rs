//! Sprite-key table
//!
//! Map files name sprite sheets by one-letter keys. The set is fixed; an
//! unknown key is an error, never silently skipped.

use std::fmt;
use std::path::PathBuf;

/// Directory of the tile sheets, relative to the asset root
const TILESETS_DIR: &str = "Sprout Lands - Sprites - premium pack/tilesets";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SpriteKey {
    Grass,
    Hills,
    Fences,
    Houses,
    Water,
    Dirt,
}

impl SpriteKey {
    #[cfg(test)]
    pub const ALL: [SpriteKey; 6] = [
        SpriteKey::Grass,
        SpriteKey::Hills,
        SpriteKey::Fences,
        SpriteKey::Houses,
        SpriteKey::Water,
        SpriteKey::Dirt,
    ];

    /// Drawn under every structure tile
    pub const GROUND: SpriteKey = SpriteKey::Grass;

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "g" => Some(SpriteKey::Grass),
            "l" => Some(SpriteKey::Hills),
            "f" => Some(SpriteKey::Fences),
            "h" => Some(SpriteKey::Houses),
            "w" => Some(SpriteKey::Water),
            "t" => Some(SpriteKey::Dirt),
            _ => None,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            SpriteKey::Grass => "g",
            SpriteKey::Hills => "l",
            SpriteKey::Fences => "f",
            SpriteKey::Houses => "h",
            SpriteKey::Water => "w",
            SpriteKey::Dirt => "t",
        }
    }

    /// Sheet file relative to the asset root
    pub fn sheet_path(self) -> PathBuf {
        let file = match self {
            SpriteKey::Grass => "Grass.png",
            SpriteKey::Hills => "Hills.png",
            SpriteKey::Fences => "Building parts/Fences.png",
            SpriteKey::Houses => "Building parts/Wooden House.png",
            SpriteKey::Water => "Water.png",
            SpriteKey::Dirt => "Tilled Dirt.png",
        };
        PathBuf::from(TILESETS_DIR).join(file)
    }

    /// Structures have transparent gaps and need ground drawn beneath them
    pub fn is_structure(self) -> bool {
        matches!(self, SpriteKey::Fences | SpriteKey::Houses)
    }
}

impl fmt::Display for SpriteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip() {
        for key in SpriteKey::ALL {
            assert_eq!(SpriteKey::from_token(key.token()), Some(key));
        }
    }

    #[test]
    fn test_unknown_tokens() {
        assert_eq!(SpriteKey::from_token("x"), None);
        assert_eq!(SpriteKey::from_token(""), None);
        assert_eq!(SpriteKey::from_token("G"), None);
        assert_eq!(SpriteKey::from_token("gg"), None);
    }

    #[test]
    fn test_structures() {
        let structures: Vec<_> = SpriteKey::ALL.into_iter().filter(|k| k.is_structure()).collect();
        assert_eq!(structures, vec![SpriteKey::Fences, SpriteKey::Houses]);
        assert!(!SpriteKey::GROUND.is_structure());
    }

    #[test]
    fn test_sheet_paths_are_distinct() {
        let mut paths: Vec<_> = SpriteKey::ALL.iter().map(|k| k.sheet_path()).collect();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), SpriteKey::ALL.len());
    }
}
