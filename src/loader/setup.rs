//! Setup file parsing.
//!
//! One record per line, comma separated. Blank lines and `//` comments are
//! skipped.

use crate::board::Coord;
use crate::error::{LoadError, SetupLineError};
use crate::game::{GameSetup, Seat, SetupRecord};

/// Initial reserved for walkway tiles.
pub const WALKWAY: char = 'W';
/// Initial reserved for unused tiles.
pub const UNUSED: char = 'X';

/// Parse setup text into typed records.
///
/// # Errors
///
/// Returns [`LoadError::Setup`] with the 1-based line number of the first
/// malformed record.
pub fn parse_setup_records(text: &str) -> Result<Vec<SetupRecord>, LoadError> {
    let mut records = Vec::new();
    let mut initials = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with("//") {
            continue;
        }
        let record =
            parse_line(line, &mut initials).map_err(|kind| LoadError::Setup { line: i + 1, kind })?;
        records.push(record);
    }
    Ok(records)
}

/// Parse setup text into a [`GameSetup`].
///
/// # Errors
///
/// See [`parse_setup_records`].
pub fn parse_setup(text: &str) -> Result<GameSetup, LoadError> {
    parse_setup_records(text).map(GameSetup::from_records)
}

fn parse_line(line: &str, initials: &mut Vec<char>) -> Result<SetupRecord, SetupLineError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let expect = |expected: usize| {
        if fields.len() == expected {
            Ok(())
        } else {
            Err(SetupLineError::WrongFieldCount {
                record: fields[0].to_string(),
                expected,
                found: fields.len(),
            })
        }
    };

    match fields[0] {
        "Room" => {
            expect(3)?;
            let initial = single_char(fields[2])?;
            if initial == WALKWAY || initial == UNUSED {
                return Err(SetupLineError::ReservedInitial(initial));
            }
            if initials.contains(&initial) {
                return Err(SetupLineError::DuplicateInitial(initial));
            }
            initials.push(initial);
            Ok(SetupRecord::Room {
                name: fields[1].to_string(),
                initial,
            })
        }
        "Space" => {
            expect(3)?;
            let initial = single_char(fields[2])?;
            if initial != WALKWAY && initial != UNUSED {
                return Err(SetupLineError::BadInitial(fields[2].to_string()));
            }
            Ok(SetupRecord::Space {
                name: fields[1].to_string(),
                initial,
            })
        }
        "Weapon" => {
            expect(2)?;
            Ok(SetupRecord::Weapon {
                name: fields[1].to_string(),
            })
        }
        kind @ ("Player" | "NPC") => {
            expect(5)?;
            Ok(SetupRecord::Player(Seat {
                name: fields[1].to_string(),
                color: fields[2].to_string(),
                start: Coord::new(number(fields[3])?, number(fields[4])?),
                computer: kind == "NPC",
            }))
        }
        other => Err(SetupLineError::UnknownRecord(other.to_string())),
    }
}

fn single_char(field: &str) -> Result<char, SetupLineError> {
    let mut chars = field.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(SetupLineError::BadInitial(field.to_string())),
    }
}

fn number(field: &str) -> Result<u16, SetupLineError> {
    field
        .parse()
        .map_err(|_| SetupLineError::BadNumber(field.to_string()))
}
