//! Table storage API.

use crate::table::FluidTable;
use crate::{TablesError, TablesResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const INDEX_STEM: &str = "index";
const INDEX_FILE: &str = "index.json";

/// Reject keys that would not map to a single table file in the root dir.
pub(crate) fn check_key(key: &str) -> TablesResult<()> {
    let bad = key.is_empty()
        || key == INDEX_STEM
        || key == "."
        || key == ".."
        || key.contains(['/', '\\'])
        || Path::new(key).components().count() != 1;
    if bad {
        return Err(TablesError::InvalidKey {
            key: key.to_string(),
        });
    }
    Ok(())
}

/// Listing of every table present in an output directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FluidIndex {
    pub fluids: Vec<String>,
}

/// Output directory holding `<key>.json` tables and `index.json`.
#[derive(Debug, Clone)]
pub struct TableStore {
    root_dir: PathBuf,
}

impl TableStore {
    /// The directory is created on first write, not here.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn table_path(&self, key: &str) -> PathBuf {
        self.root_dir.join(format!("{key}.json"))
    }

    pub fn index_path(&self) -> PathBuf {
        self.root_dir.join(INDEX_FILE)
    }

    pub fn has_table(&self, key: &str) -> bool {
        self.table_path(key).is_file()
    }

    /// Validate and write one table, replacing any previous file.
    pub fn save_table(&self, table: &FluidTable) -> TablesResult<PathBuf> {
        check_key(&table.fluid_key)?;
        let json = table.to_json()?;
        fs::create_dir_all(&self.root_dir)?;
        let path = self.table_path(&table.fluid_key);
        fs::write(&path, json)?;
        Ok(path)
    }

    pub fn load_table(&self, key: &str) -> TablesResult<FluidTable> {
        check_key(key)?;
        let path = self.table_path(key);
        if !path.is_file() {
            return Err(TablesError::TableNotFound {
                key: key.to_string(),
            });
        }
        let content = fs::read_to_string(path)?;
        FluidTable::from_json(&content)
    }

    /// Keys of all tables on disk, sorted ascending.
    pub fn list_keys(&self) -> TablesResult<Vec<String>> {
        let mut keys = Vec::new();

        if !self.root_dir.is_dir() {
            return Ok(keys);
        }

        for entry in fs::read_dir(&self.root_dir)? {
            let path = entry?.path();
            if !path.is_file() || path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str())
                && stem != INDEX_STEM
            {
                keys.push(stem.to_string());
            }
        }

        keys.sort();
        Ok(keys)
    }

    /// Rebuild `index.json` from the tables currently on disk.
    pub fn write_index(&self) -> TablesResult<FluidIndex> {
        let index = FluidIndex {
            fluids: self.list_keys()?,
        };
        fs::create_dir_all(&self.root_dir)?;
        fs::write(self.index_path(), serde_json::to_string(&index)?)?;
        Ok(index)
    }

    pub fn load_index(&self) -> TablesResult<FluidIndex> {
        let content = fs::read_to_string(self.index_path())?;
        Ok(serde_json::from_str(&content)?)
    }
}
