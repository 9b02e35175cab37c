//! Flat-file JSON persistence for the game registry.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Serialize, de::DeserializeOwned};
use tracing::warn;

use crate::registry::GamesData;

pub struct JsonStore {
    base_dir: PathBuf,
    games_file: String,
}

impl JsonStore {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("arcadr");
        fs::create_dir_all(&base_dir)?;
        Ok(Self {
            base_dir,
            games_file: "games.json".to_string(),
        })
    }

    /// Point the store at an explicit games file (the `--games` flag).
    pub fn with_games_path(path: &Path) -> Result<Self> {
        let base_dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&base_dir)?;
        let games_file = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "games.json".to_string());
        Ok(Self {
            base_dir,
            games_file,
        })
    }

    #[allow(dead_code)] // Used by integration tests
    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self {
            base_dir,
            games_file: "games.json".to_string(),
        })
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    fn load<T: DeserializeOwned + Default>(&self, name: &str) -> T {
        let path = self.file_path(name);
        if !path.exists() {
            return T::default();
        }
        match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(data) => data,
                Err(err) => {
                    warn!(file = %path.display(), %err, "unreadable data file, starting empty");
                    T::default()
                }
            },
            Err(err) => {
                warn!(file = %path.display(), %err, "failed to read data file");
                T::default()
            }
        }
    }

    /// Atomic save: write to a temp file, fsync, rename over the target.
    fn save<T: Serialize>(&self, name: &str, data: &T) -> Result<()> {
        let path = self.file_path(name);
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(data)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    pub fn load_games(&self) -> GamesData {
        self.load(&self.games_file)
    }

    pub fn save_games(&self, data: &GamesData) -> Result<()> {
        self.save(&self.games_file, data)
    }
}
