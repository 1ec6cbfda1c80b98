//! The session store.
//!
//! One record per running game: the character, the game state, and the
//! timestamps the recency listing sorts by. The store is an explicit
//! object constructed at process start and passed by reference; the engine
//! never reaches for ambient storage, so concurrent sessions and tests
//! cannot interfere with each other.
//!
//! The pipeline itself never depends on the store: it computes in memory
//! and the caller persists afterward. Store failures surface as explicit
//! [`EngineError`] values, never as lost game state.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::character::Character;
use crate::error::{EngineError, Result};
use crate::state::GameData;
use crate::types::SessionId;

/// One stored session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    /// The session's id.
    pub id: SessionId,
    /// The character, as last saved.
    pub character: Character,
    /// The game state, as last saved.
    pub game: GameData,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// When the session was last written. Drives the recency listing.
    pub updated_at: DateTime<Utc>,
}

/// Serializable document holding every session, for backup and restore.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionExport {
    /// Export format version.
    pub version: u32,
    /// When the export was taken.
    pub exported_at: DateTime<Utc>,
    /// All sessions.
    pub sessions: Vec<SessionRecord>,
}

const EXPORT_VERSION: u32 = 1;

/// In-memory session store, safe to share across threads.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<BTreeMap<uuid::Uuid, SessionRecord>>,
}

impl SessionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session from a fresh character and game state.
    pub fn create_session(&self, character: Character, game: GameData) -> SessionId {
        let id = SessionId::new();
        let now = Utc::now();
        let record = SessionRecord {
            id,
            character,
            game,
            created_at: now,
            updated_at: now,
        };
        self.sessions.write().insert(id.0, record);
        debug!(%id, "session created");
        id
    }

    /// Fetch a session by id.
    pub fn get_session(&self, id: SessionId) -> Result<SessionRecord> {
        self.sessions
            .read()
            .get(&id.0)
            .cloned()
            .ok_or(EngineError::SessionNotFound(id))
    }

    /// Overwrite a session's character and game state, bumping the
    /// recency timestamp.
    pub fn update_session(
        &self,
        id: SessionId,
        character: Character,
        game: GameData,
    ) -> Result<()> {
        let mut sessions = self.sessions.write();
        let record = sessions
            .get_mut(&id.0)
            .ok_or(EngineError::SessionNotFound(id))?;
        record.character = character;
        record.game = game;
        record.updated_at = Utc::now();
        Ok(())
    }

    /// Delete a session.
    pub fn delete_session(&self, id: SessionId) -> Result<()> {
        self.sessions
            .write()
            .remove(&id.0)
            .map(|_| ())
            .ok_or(EngineError::SessionNotFound(id))
    }

    /// All sessions, most recently updated first.
    #[must_use]
    pub fn list_sessions(&self) -> Vec<SessionRecord> {
        let mut records: Vec<SessionRecord> =
            self.sessions.read().values().cloned().collect();
        records.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        records
    }

    /// Number of stored sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    /// Export every session as one JSON document.
    pub fn export(&self) -> Result<String> {
        let export = SessionExport {
            version: EXPORT_VERSION,
            exported_at: Utc::now(),
            sessions: self.list_sessions(),
        };
        serde_json::to_string_pretty(&export)
            .map_err(|e| EngineError::Serialization(e.to_string()))
    }

    /// Import a previously exported document. Imported sessions replace
    /// any existing session with the same id; others are untouched.
    pub fn import(&self, document: &str) -> Result<usize> {
        let export: SessionExport = serde_json::from_str(document)
            .map_err(|e| EngineError::Serialization(e.to_string()))?;
        let count = export.sessions.len();
        let mut sessions = self.sessions.write();
        for record in export.sessions {
            sessions.insert(record.id.0, record);
        }
        debug!(count, "sessions imported");
        Ok(count)
    }

    /// Export to a file.
    pub fn export_to_file(&self, path: &Path) -> Result<()> {
        let document = self.export()?;
        std::fs::write(path, document)?;
        Ok(())
    }

    /// Import from a file.
    pub fn import_from_file(&self, path: &Path) -> Result<usize> {
        let document = std::fs::read_to_string(path)?;
        self.import(&document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Tribe;

    fn fresh() -> (Character, GameData) {
        (
            Character::new("Cinder", Tribe::Emberwing, true),
            GameData::new("Ashfall Peaks"),
        )
    }

    #[test]
    fn create_then_get_round_trips() {
        let store = SessionStore::new();
        let (character, game) = fresh();
        let id = store.create_session(character, game);

        let record = store.get_session(id).expect("session exists");
        assert_eq!(record.id, id);
        assert_eq!(record.character.name, "Cinder");
        assert_eq!(record.game.turn, 0);
    }

    #[test]
    fn missing_session_is_an_explicit_error() {
        let store = SessionStore::new();
        let err = store.get_session(SessionId::new()).unwrap_err();
        assert!(matches!(err, EngineError::SessionNotFound(_)));
    }

    #[test]
    fn update_bumps_recency() {
        let store = SessionStore::new();
        let (character, game) = fresh();
        let id = store.create_session(character.clone(), game.clone());
        let before = store.get_session(id).expect("exists").updated_at;

        let mut advanced = game;
        advanced.turn = 5;
        store
            .update_session(id, character, advanced)
            .expect("update");

        let record = store.get_session(id).expect("exists");
        assert_eq!(record.game.turn, 5);
        assert!(record.updated_at >= before);
    }

    #[test]
    fn list_orders_by_recency() {
        let store = SessionStore::new();
        let (c1, g1) = fresh();
        let (c2, g2) = fresh();
        let first = store.create_session(c1.clone(), g1);
        let second = store.create_session(c2, g2);

        // Touch the first session so it becomes the most recent.
        let mut advanced = GameData::new("Galehowl Pass");
        advanced.turn = 1;
        store.update_session(first, c1, advanced).expect("update");

        let listed: Vec<SessionId> = store.list_sessions().iter().map(|r| r.id).collect();
        assert_eq!(listed, vec![first, second]);
    }

    #[test]
    fn delete_removes_the_session() {
        let store = SessionStore::new();
        let (character, game) = fresh();
        let id = store.create_session(character, game);
        store.delete_session(id).expect("delete");
        assert!(store.is_empty());
        assert!(store.delete_session(id).is_err());
    }

    #[test]
    fn export_import_round_trips_all_sessions() {
        let store = SessionStore::new();
        let (c1, g1) = fresh();
        let mut c2 = Character::new("Rime", Tribe::Frostwing, false);
        c2.set_soul(40.0);
        store.create_session(c1, g1);
        store.create_session(c2, GameData::new("The Glass Caldera"));

        let document = store.export().expect("export");

        let restored = SessionStore::new();
        let count = restored.import(&document).expect("import");
        assert_eq!(count, 2);
        assert_eq!(restored.len(), 2);

        let names: Vec<String> = restored
            .list_sessions()
            .iter()
            .map(|r| r.character.name.clone())
            .collect();
        assert!(names.contains(&"Cinder".to_string()));
        assert!(names.contains(&"Rime".to_string()));
    }

    #[test]
    fn import_rejects_garbage() {
        let store = SessionStore::new();
        let err = store.import("not a document").unwrap_err();
        assert!(matches!(err, EngineError::Serialization(_)));
    }
}
