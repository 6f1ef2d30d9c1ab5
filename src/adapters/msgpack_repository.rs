//! MessagePack implementation of the agent repository.

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use crate::{Error, Result, ports::AgentRepository, q_learning::SavedAgent};

/// Durable agent storage using the MessagePack binary format via rmp_serde.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use kinrow::adapters::MsgPackRepository;
/// use kinrow::ports::AgentRepository;
///
/// let repo = MsgPackRepository::new();
/// let saved = repo.load(Path::new("trained.mpk"))?;
/// # Ok::<(), kinrow::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackRepository;

impl MsgPackRepository {
    pub fn new() -> Self {
        Self
    }
}

impl AgentRepository for MsgPackRepository {
    fn save(&self, agent: &SavedAgent, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        rmp_serde::encode::write(&mut writer, agent).map_err(|e| Error::SerializationContext {
            operation: "serialize agent to MessagePack".to_string(),
            message: e.to_string(),
        })?;

        Ok(())
    }

    fn load(&self, path: &Path) -> Result<SavedAgent> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;
        let reader = BufReader::new(file);

        rmp_serde::decode::from_read(reader).map_err(|e| Error::SerializationContext {
            operation: "deserialize agent from MessagePack".to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::{
        game::Variant,
        q_learning::{AgentParams, QLearningAgent},
    };

    fn sample_saved_agent() -> SavedAgent {
        let params = AgentParams::default().with_seed(2);
        let mut agent = QLearningAgent::new(Variant::TicTacToe, params).unwrap();
        let state = crate::game::Board::new(3).key();
        agent.learn(state.clone(), 0, 1.0, &state, &[]);
        SavedAgent::from_agent(&agent)
    }

    #[test]
    fn test_msgpack_roundtrip() {
        let tmp = TempDir::new().expect("temp dir");
        let path = tmp.path().join("agent.mpk");

        let repo = MsgPackRepository::new();
        let saved = sample_saved_agent();
        repo.save(&saved, &path).expect("save");

        let loaded = repo.load(&path).expect("load");
        assert_eq!(loaded.version, saved.version);
        assert_eq!(loaded.variant(), Variant::TicTacToe);
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let tmp = TempDir::new().expect("temp dir");
        let err = MsgPackRepository::new()
            .load(&tmp.path().join("nothing.mpk"))
            .unwrap_err();
        match err {
            Error::Io { source, .. } => {
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected Io error, got {other}"),
        }
    }

    #[test]
    fn test_load_garbage_is_serialization_error() {
        let tmp = TempDir::new().expect("temp dir");
        let path = tmp.path().join("garbage.mpk");
        std::fs::write(&path, b"not a msgpack agent").unwrap();

        let err = MsgPackRepository::new().load(&path).unwrap_err();
        assert!(matches!(err, Error::SerializationContext { .. }));
    }
}
