//! Error types
//!
//! Everything that can go wrong happens during startup: reading settings,
//! parsing the map, or loading a sheet / music stream. The run loop itself
//! has no failure paths.

use std::path::PathBuf;

/// Bad settings file or flag values
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unable to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("invalid setting `{name}`: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// A file or sprite that could not be turned into something drawable/playable
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("unable to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unable to decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },
    #[error("line {line}: unknown sprite key {token:?}")]
    UnknownSprite { line: usize, token: String },
    #[error("sprite sheet {path} is smaller than one {tile}px tile ({width}x{height}px)")]
    SheetTooSmall {
        path: PathBuf,
        tile: u32,
        width: u32,
        height: u32,
    },
    #[error("line {line}: sprite key {token:?} has no usable sheet: {source}")]
    Sheet {
        line: usize,
        token: String,
        #[source]
        source: Box<AssetError>,
    },
    #[error("line {line}: sprite index {index} is outside sheet {key:?} ({columns}x{rows} tiles)")]
    IndexOutOfSheet {
        line: usize,
        index: u32,
        key: String,
        columns: u32,
        rows: u32,
    },
}

/// Structural problems in a map file
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MapFormatError {
    #[error("map file has no lines")]
    Empty,
    #[error("line 1: expected `width height`, found {found:?}")]
    BadHeader { found: String },
    #[error("line 1: map dimensions must be positive, found {width}x{height}")]
    ZeroSize { width: usize, height: usize },
    #[error("line {line}: invalid number {token:?}")]
    InvalidNumber { line: usize, token: String },
    #[error("expected {expected} lines for a map {height} rows high, found {found}")]
    LineCount {
        expected: usize,
        found: usize,
        height: usize,
    },
    #[error(
        "row {row}: index row {indices:?} has {index_count} columns and sprite row {sprites:?} has {sprite_count}, expected {width}"
    )]
    RowLength {
        row: usize,
        indices: String,
        index_count: usize,
        sprites: String,
        sprite_count: usize,
        width: usize,
    },
}

/// Anything that stops a map file from becoming a tile grid
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error(transparent)]
    Format(#[from] MapFormatError),
    #[error(transparent)]
    Asset(#[from] AssetError),
}

/// Failure to bring up the game
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("a game is already running in this process")]
    AlreadyRunning,
    #[error("failed to load map {path}: {source}")]
    Map {
        path: PathBuf,
        #[source]
        source: MapError,
    },
    #[error(transparent)]
    Asset(#[from] AssetError),
}
