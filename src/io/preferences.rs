//! Persistence of the last used grid size per puzzle
//!
//! Level selection reads these values back; generation itself never does,
//! so a failed write is reported but does not fail the generation.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::io::configuration::{GRID_COLS_KEY_SUFFIX, GRID_ROWS_KEY_SUFFIX};
use crate::io::error::{PuzzleError, Result};

/// Integer key/value store for player preferences
pub trait PreferenceStore {
    /// Stored value for `key`
    fn get_int(&self, key: &str) -> Option<i64>;

    /// Store `value` under `key`
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written
    fn set_int(&mut self, key: &str, value: i64) -> Result<()>;
}

/// Preferences kept in memory only
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    values: BTreeMap<String, i64>,
}

impl MemoryPreferences {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get_int(&self, key: &str) -> Option<i64> {
        self.values.get(key).copied()
    }

    fn set_int(&mut self, key: &str, value: i64) -> Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Preferences stored as a JSON object on disk
///
/// Every write rewrites the whole file.
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
    values: BTreeMap<String, i64>,
}

impl FilePreferences {
    /// Load preferences from `path`, starting empty if the file is missing
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let values = if path.exists() {
            let content =
                std::fs::read_to_string(&path).map_err(|source| PuzzleError::FileSystem {
                    path: path.clone(),
                    operation: "read preferences",
                    source,
                })?;
            serde_json::from_str(&content).map_err(|source| PuzzleError::Serialization {
                path: path.clone(),
                source,
            })?
        } else {
            BTreeMap::new()
        };

        Ok(Self { path, values })
    }

    /// File backing this store
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<()> {
        let content =
            serde_json::to_string_pretty(&self.values).map_err(|source| PuzzleError::Serialization {
                path: self.path.clone(),
                source,
            })?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| PuzzleError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source,
            })?;
        }

        std::fs::write(&self.path, content).map_err(|source| PuzzleError::FileSystem {
            path: self.path.clone(),
            operation: "write preferences",
            source,
        })
    }
}

impl PreferenceStore for FilePreferences {
    fn get_int(&self, key: &str) -> Option<i64> {
        self.values.get(key).copied()
    }

    fn set_int(&mut self, key: &str, value: i64) -> Result<()> {
        self.values.insert(key.to_string(), value);
        self.save()
    }
}

/// Preference keys holding the column and row count of a puzzle
pub fn grid_size_keys(puzzle_name: &str) -> (String, String) {
    (
        format!("{puzzle_name}{GRID_COLS_KEY_SUFFIX}"),
        format!("{puzzle_name}{GRID_ROWS_KEY_SUFFIX}"),
    )
}

/// Store the grid size used for a puzzle
///
/// # Errors
///
/// Returns an error if the store cannot be written
pub fn remember_grid_size(
    store: &mut dyn PreferenceStore,
    puzzle_name: &str,
    cols: usize,
    rows: usize,
) -> Result<()> {
    let (cols_key, rows_key) = grid_size_keys(puzzle_name);
    store.set_int(&cols_key, cols as i64)?;
    store.set_int(&rows_key, rows as i64)
}

/// Grid size last used for a puzzle, if both values are stored
pub fn recall_grid_size(store: &dyn PreferenceStore, puzzle_name: &str) -> Option<(usize, usize)> {
    let (cols_key, rows_key) = grid_size_keys(puzzle_name);
    let cols = usize::try_from(store.get_int(&cols_key)?).ok()?;
    let rows = usize::try_from(store.get_int(&rows_key)?).ok()?;
    Some((cols, rows))
}
