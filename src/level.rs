//! Brick layout loading
//!
//! A level is a rectangular grid of characters, one line per brick row and one
//! character per brick column:
//!
//! ```text
//! X = empty cell    P = pink    R = red    G = green    B = blue    W = white
//! ```
//!
//! Cells are addressed 1-indexed as `(row, column)`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{BRICK_COLUMNS, BRICK_ROWS};

/// Errors raised while loading a level definition
#[derive(Debug, Error)]
pub enum LevelError {
    /// A cell character outside the palette
    #[error("level {level}: unknown cell {cell:?} at row {row}, column {column}")]
    UnknownCell {
        level: u32,
        row: usize,
        column: usize,
        cell: char,
    },
    /// Rows of differing length
    #[error("level {level}: row {row} has {found} cells, expected {expected}")]
    RaggedRows {
        level: u32,
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("level {level} has no rows")]
    Empty { level: u32 },
    /// More rows or columns than the brick field holds
    #[error("level {level}: {rows}x{columns} grid exceeds the {max_rows}x{max_columns} brick field")]
    TooLarge {
        level: u32,
        rows: usize,
        columns: usize,
        max_rows: usize,
        max_columns: usize,
    },
    #[error("failed to read level file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Brick palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BrickColor {
    Pink,
    Red,
    Green,
    Blue,
    White,
}

impl BrickColor {
    /// Look up a layout character. `Some(None)` is an empty cell, `None` is
    /// a character outside the palette.
    pub fn from_cell(cell: char) -> Option<Option<BrickColor>> {
        match cell {
            'X' => Some(None),
            'P' => Some(Some(BrickColor::Pink)),
            'R' => Some(Some(BrickColor::Red)),
            'G' => Some(Some(BrickColor::Green)),
            'B' => Some(Some(BrickColor::Blue)),
            'W' => Some(Some(BrickColor::White)),
            _ => None,
        }
    }

    /// Display color as RGB
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            BrickColor::Pink => (255, 102, 153),
            BrickColor::Red => (230, 0, 0),
            BrickColor::Green => (71, 209, 71),
            BrickColor::Blue => (0, 102, 255),
            BrickColor::White => (255, 255, 255),
        }
    }
}

/// A parsed brick layout
///
/// Serialized as its raw rows; the cell mapping is rebuilt on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "LevelRows", try_from = "LevelRows")]
pub struct Level {
    /// Level number (1-based)
    pub index: u32,
    pub name: String,
    rows: Vec<String>,
    mapping: BTreeMap<(usize, usize), Option<BrickColor>>,
}

#[derive(Serialize, Deserialize)]
struct LevelRows {
    index: u32,
    name: String,
    rows: Vec<String>,
}

impl From<Level> for LevelRows {
    fn from(level: Level) -> Self {
        Self {
            index: level.index,
            name: level.name,
            rows: level.rows,
        }
    }
}

impl TryFrom<LevelRows> for Level {
    type Error = LevelError;

    fn try_from(data: LevelRows) -> Result<Self, Self::Error> {
        Level::parse(data.index, data.name, &data.rows.join("\n"))
    }
}

impl Level {
    /// Parse a layout from text. Trailing line terminators are stripped.
    pub fn parse(index: u32, name: impl Into<String>, text: &str) -> Result<Self, LevelError> {
        let rows: Vec<String> = text.lines().map(str::to_owned).collect();

        let mut mapping = BTreeMap::new();
        for (i, row) in rows.iter().enumerate() {
            for (j, cell) in row.chars().enumerate() {
                let color = BrickColor::from_cell(cell).ok_or(LevelError::UnknownCell {
                    level: index,
                    row: i + 1,
                    column: j + 1,
                    cell,
                })?;
                mapping.insert((i + 1, j + 1), color);
            }
        }

        Ok(Self {
            index,
            name: name.into(),
            rows,
            mapping,
        })
    }

    /// Read and parse a layout file
    pub fn load(index: u32, name: impl Into<String>, path: &Path) -> Result<Self, LevelError> {
        let text = std::fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(index, name, &text)
    }

    /// Whether every row has the same length as the first
    pub fn validate(&self) -> bool {
        self.check().is_ok()
    }

    /// Like [`Level::validate`], but reports the offending row
    pub fn check(&self) -> Result<(), LevelError> {
        let Some(first) = self.rows.first() else {
            return Err(LevelError::Empty { level: self.index });
        };
        let expected = first.chars().count();
        for (i, row) in self.rows.iter().enumerate() {
            let found = row.chars().count();
            if found != expected {
                return Err(LevelError::RaggedRows {
                    level: self.index,
                    row: i + 1,
                    expected,
                    found,
                });
            }
        }
        Ok(())
    }

    /// Fail unless the grid fits a `max_rows` x `max_columns` field
    pub fn check_fits(&self, max_rows: usize, max_columns: usize) -> Result<(), LevelError> {
        let (rows, columns) = (self.row_count(), self.column_count());
        if rows > max_rows || columns > max_columns {
            return Err(LevelError::TooLarge {
                level: self.index,
                rows,
                columns,
                max_rows,
                max_columns,
            });
        }
        Ok(())
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.rows.first().map(|r| r.chars().count()).unwrap_or(0)
    }

    /// Color at a 1-indexed cell (`None` for empty or out-of-range cells)
    pub fn color_at(&self, row: usize, column: usize) -> Option<BrickColor> {
        self.mapping.get(&(row, column)).copied().flatten()
    }

    /// Full `(row, column) -> color` mapping, including empty cells
    pub fn mapping(&self) -> &BTreeMap<(usize, usize), Option<BrickColor>> {
        &self.mapping
    }

    /// Occupied cells in row-major order
    pub fn bricks(&self) -> impl Iterator<Item = ((usize, usize), BrickColor)> + '_ {
        self.mapping
            .iter()
            .filter_map(|(&cell, color)| color.map(|c| (cell, c)))
    }
}

/// Level names, indexed by level number - 1
const LEVEL_NAMES: [&str; 3] = ["Heart", "Box", "Hourglass"];

/// Built-in layouts, indexed by level number - 1
const BUILTIN_LAYOUTS: [&str; 3] = [
    include_str!("../levels/level_1.txt"),
    include_str!("../levels/level_2.txt"),
    include_str!("../levels/level_3.txt"),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
enum LevelSource {
    Builtin,
    Directory(PathBuf),
}

/// The ordered set of playable levels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelCatalog {
    source: LevelSource,
}

impl Default for LevelCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LevelCatalog {
    /// Levels compiled into the binary
    pub fn builtin() -> Self {
        Self {
            source: LevelSource::Builtin,
        }
    }

    /// Levels read from `level_N.txt` files in `dir`
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            source: LevelSource::Directory(dir.into()),
        }
    }

    /// Highest level number
    pub fn max_level(&self) -> u32 {
        LEVEL_NAMES.len() as u32
    }

    pub fn name(&self, level_number: u32) -> Option<&'static str> {
        level_number
            .checked_sub(1)
            .and_then(|i| LEVEL_NAMES.get(i as usize))
            .copied()
    }

    /// Load and validate a level. `Ok(None)` once past the last level.
    pub fn load(&self, level_number: u32) -> Result<Option<Level>, LevelError> {
        let Some(name) = self.name(level_number) else {
            return Ok(None);
        };

        let level = match &self.source {
            LevelSource::Builtin => {
                Level::parse(level_number, name, BUILTIN_LAYOUTS[level_number as usize - 1])?
            }
            LevelSource::Directory(dir) => {
                let path = dir.join(format!("level_{level_number}.txt"));
                Level::load(level_number, name, &path)?
            }
        };
        level.check()?;
        level.check_fits(BRICK_ROWS, BRICK_COLUMNS)?;

        Ok(Some(level))
    }
}
