//! In-memory agent repository for tests.

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, Mutex},
};

use crate::{Error, Result, ports::AgentRepository, q_learning::SavedAgent};

/// Repository backed by a shared in-memory map instead of the file system.
///
/// Values are stored encoded, so the serde path is exercised exactly as with
/// durable storage. Clones share the same underlying map.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    storage: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of agents currently stored.
    pub fn count(&self) -> usize {
        self.storage.lock().unwrap().len()
    }

    /// Whether something is stored at `path`.
    pub fn contains(&self, path: &Path) -> bool {
        let key = path.to_string_lossy().to_string();
        self.storage.lock().unwrap().contains_key(&key)
    }

    /// Store raw bytes at `path`, bypassing serialization. Lets tests plant
    /// corrupt data.
    pub fn insert_raw(&self, path: &Path, bytes: Vec<u8>) {
        let key = path.to_string_lossy().to_string();
        self.storage.lock().unwrap().insert(key, bytes);
    }
}

impl AgentRepository for InMemoryRepository {
    fn save(&self, agent: &SavedAgent, path: &Path) -> Result<()> {
        let key = path.to_string_lossy().to_string();

        let bytes = rmp_serde::to_vec(agent).map_err(|e| Error::SerializationContext {
            operation: "serialize agent for in-memory storage".to_string(),
            message: e.to_string(),
        })?;

        self.storage.lock().unwrap().insert(key, bytes);
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<SavedAgent> {
        let key = path.to_string_lossy().to_string();
        let storage = self.storage.lock().unwrap();

        let bytes = storage.get(&key).ok_or_else(|| Error::Io {
            operation: format!("load agent from in-memory storage at {path:?}"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "key not found"),
        })?;

        rmp_serde::from_slice(bytes).map_err(|e| Error::SerializationContext {
            operation: "deserialize agent from in-memory storage".to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        game::Variant,
        q_learning::{AgentParams, QLearningAgent},
    };

    fn sample() -> SavedAgent {
        let agent =
            QLearningAgent::new(Variant::TicTacToe, AgentParams::default().with_seed(1)).unwrap();
        SavedAgent::from_agent(&agent)
    }

    #[test]
    fn test_save_and_load() {
        let repo = InMemoryRepository::new();
        let path = Path::new("agent");

        assert_eq!(repo.count(), 0);
        repo.save(&sample(), path).unwrap();
        assert!(repo.contains(path));

        let loaded = repo.load(path).unwrap();
        assert_eq!(loaded.variant(), Variant::TicTacToe);
    }

    #[test]
    fn test_load_missing_is_not_found() {
        let repo = InMemoryRepository::new();
        match repo.load(Path::new("missing")).unwrap_err() {
            Error::Io { source, .. } => {
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected Io error, got {other}"),
        }
    }

    #[test]
    fn test_corrupt_bytes_fail_to_decode() {
        let repo = InMemoryRepository::new();
        let path = Path::new("corrupt");
        repo.insert_raw(path, vec![0xDE, 0xAD, 0xBE, 0xEF]);
        assert!(matches!(
            repo.load(path).unwrap_err(),
            Error::SerializationContext { .. }
        ));
    }

    #[test]
    fn test_clones_share_storage() {
        let repo = InMemoryRepository::new();
        let other = repo.clone();
        repo.save(&sample(), Path::new("shared")).unwrap();
        assert!(other.contains(Path::new("shared")));
    }
}
