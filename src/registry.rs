//! The game registry: the ordered list of installed games backing the
//! card grid, persisted through the JSON store on every mutation.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::input::dispatcher::Catalog;
use crate::store::JsonStore;

pub type GameId = u32;

pub const GAMES_SCHEMA_VERSION: u32 = 1;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub title: String,
    pub executable: PathBuf,
    #[serde(default)]
    pub args: Vec<String>,
    /// Embedded games keep their child handle tracked; the shell suspends
    /// navigation while one runs.
    #[serde(default)]
    pub embedded: bool,
    #[serde(default = "Utc::now")]
    pub added_at: DateTime<Utc>,
}

impl Game {
    pub fn new(id: GameId, title: &str, executable: PathBuf) -> Self {
        Self {
            id,
            title: title.to_string(),
            executable,
            args: Vec::new(),
            embedded: false,
            added_at: Utc::now(),
        }
    }
}

/// Versioned on-disk envelope for the game list.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GamesData {
    pub schema_version: u32,
    pub games: Vec<Game>,
}

pub struct Registry {
    games: Vec<Game>,
    store: Option<JsonStore>,
}

impl Registry {
    pub fn load(store: Option<JsonStore>) -> Self {
        let games = store
            .as_ref()
            .map(|s| s.load_games().games)
            .unwrap_or_default();
        Self { games, store }
    }

    pub fn in_memory(games: Vec<Game>) -> Self {
        Self { games, store: None }
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn add(
        &mut self,
        title: &str,
        executable: PathBuf,
        args: Vec<String>,
        embedded: bool,
    ) -> GameId {
        let id = self.games.iter().map(|g| g.id).max().unwrap_or(0) + 1;
        let mut game = Game::new(id, title, executable);
        game.args = args;
        game.embedded = embedded;
        self.games.push(game);
        self.persist();
        id
    }

    /// Replace the record with the same id. Returns false if unknown.
    pub fn replace(&mut self, game: Game) -> bool {
        match self.games.iter_mut().find(|g| g.id == game.id) {
            Some(slot) => {
                *slot = game;
                self.persist();
                true
            }
            None => false,
        }
    }

    /// Remove by id. Returns false if unknown.
    pub fn remove(&mut self, id: GameId) -> bool {
        let before = self.games.len();
        self.games.retain(|g| g.id != id);
        let removed = self.games.len() != before;
        if removed {
            self.persist();
        }
        removed
    }

    /// Force a write-through, propagating the error. Mutations persist
    /// best-effort; this is for the shutdown path where failure matters.
    pub fn flush(&self) -> anyhow::Result<()> {
        if let Some(ref store) = self.store {
            store.save_games(&GamesData {
                schema_version: GAMES_SCHEMA_VERSION,
                games: self.games.clone(),
            })?;
        }
        Ok(())
    }

    fn persist(&self) {
        if let Err(err) = self.flush() {
            warn!(%err, "failed to persist game registry");
        }
    }
}

impl Catalog for Registry {
    fn game(&self, id: GameId) -> Option<&Game> {
        self.games.iter().find(|g| g.id == id)
    }

    fn games(&self) -> &[Game] {
        &self.games
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::JsonStore;
    use tempfile::TempDir;

    #[test]
    fn test_add_assigns_increasing_ids() {
        let mut registry = Registry::in_memory(Vec::new());
        let a = registry.add("Pac-Man", "/opt/games/pacman".into(), Vec::new(), false);
        let b = registry.add("Galaga", "/opt/games/galaga".into(), Vec::new(), false);
        assert_eq!(a, 1);
        assert_eq!(b, 2);

        registry.remove(a);
        // Ids never reuse a live maximum.
        let c = registry.add("Dig Dug", "/opt/games/digdug".into(), Vec::new(), false);
        assert_eq!(c, 3);
    }

    #[test]
    fn test_lookup_by_id() {
        let registry = Registry::in_memory(vec![
            Game::new(5, "Pac-Man", "/opt/games/pacman".into()),
            Game::new(9, "Galaga", "/opt/games/galaga".into()),
        ]);
        assert_eq!(registry.game(9).map(|g| g.title.as_str()), Some("Galaga"));
        assert!(registry.game(1).is_none());
    }

    #[test]
    fn test_replace_unknown_id_is_rejected() {
        let mut registry = Registry::in_memory(Vec::new());
        assert!(!registry.replace(Game::new(1, "Ghost", "/nowhere".into())));
    }

    #[test]
    fn test_mutations_persist_through_store() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        let mut registry = Registry::load(Some(store));
        registry.add("Pac-Man", "/opt/games/pacman".into(), Vec::new(), true);

        let reopened = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        let reloaded = Registry::load(Some(reopened));
        assert_eq!(reloaded.len(), 1);
        assert!(reloaded.games()[0].embedded);
    }
}
