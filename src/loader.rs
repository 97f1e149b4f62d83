//! Text loaders for layout and setup files.
//!
//! These sit outside the engine: they turn text into the [`BoardSpec`] and
//! [`GameSetup`] that [`Game::new`](crate::game::Game::new) consumes.

mod layout;
mod setup;

pub use layout::parse_layout;
pub use setup::{UNUSED, WALKWAY, parse_setup, parse_setup_records};

use std::fs;
use std::path::Path;

use crate::board::BoardSpec;
use crate::error::LoadError;
use crate::game::GameSetup;

/// Layout of the built-in board.
pub const CLASSIC_LAYOUT: &str = include_str!("../data/ClueLayout.csv");

/// Setup of the built-in board.
pub const CLASSIC_SETUP: &str = include_str!("../data/ClueSetup.txt");

/// Parse a layout and the setup that declares its rooms.
///
/// # Errors
///
/// Returns the first setup or layout error encountered.
pub fn parse(layout: &str, setup: &str) -> Result<(BoardSpec, GameSetup), LoadError> {
    let setup = parse_setup(setup)?;
    let spec = parse_layout(layout, &setup.rooms)?;
    Ok((spec, setup))
}

/// Read and parse a layout file and a setup file.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if a file cannot be read, otherwise the first
/// parse error.
pub fn load_files(layout: &Path, setup: &Path) -> Result<(BoardSpec, GameSetup), LoadError> {
    let read = |path: &Path| {
        fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })
    };
    let setup_text = read(setup)?;
    let layout_text = read(layout)?;
    tracing::debug!(layout = %layout.display(), setup = %setup.display(), "loaded board files");
    parse(&layout_text, &setup_text)
}

/// The built-in nine-room board and its six-player setup.
///
/// # Errors
///
/// Only fails if the embedded files are malformed.
pub fn classic() -> Result<(BoardSpec, GameSetup), LoadError> {
    parse(CLASSIC_LAYOUT, CLASSIC_SETUP)
}
