//! Persistent form of a trained agent.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    game::Variant,
    ports::AgentRepository,
    q_learning::agent::{AgentParams, AgentSnapshot, QLearningAgent},
};

/// Outcome of [`SavedAgent::load_or_default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// A saved agent was found and restored.
    Loaded,
    /// Nothing was stored at the path; a fresh agent was created.
    NotFound,
    /// The stored data could not be decoded; a fresh agent was created.
    Corrupt,
}

/// Versioned, serializable container for a trained agent.
///
/// The on-disk format is the Q-table keyed by state, plus the exploration
/// schedule needed to resume training where it left off.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedAgent {
    pub version: u32,
    state: AgentSnapshot,
}

impl SavedAgent {
    pub const VERSION: u32 = 1;

    /// Capture an agent for storage.
    pub fn from_agent(agent: &QLearningAgent) -> Self {
        Self {
            version: Self::VERSION,
            state: agent.export_snapshot(),
        }
    }

    /// Restore the agent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for an unsupported format
    /// version.
    pub fn into_agent(self) -> Result<QLearningAgent> {
        if self.version != Self::VERSION {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "unsupported agent save format version {} (expected {})",
                    self.version,
                    Self::VERSION
                ),
            });
        }
        Ok(QLearningAgent::from_snapshot(self.state))
    }

    /// The variant the stored agent was trained on.
    pub fn variant(&self) -> Variant {
        self.state.variant
    }

    /// Load an agent from `repo`, falling back to a fresh one.
    ///
    /// A missing file and a corrupt file both degrade to a new agent built
    /// from `variant` and `params`; the returned status tells the caller
    /// which case occurred. A stored agent for a *different* variant is
    /// treated as corrupt, since its state keys would never match.
    ///
    /// # Errors
    ///
    /// Returns an error only when even the fallback agent cannot be built
    /// (invalid `params`).
    pub fn load_or_default<R: AgentRepository>(
        repo: &R,
        path: &Path,
        variant: Variant,
        params: AgentParams,
    ) -> Result<(QLearningAgent, LoadStatus)> {
        match repo.load(path) {
            Ok(saved) if saved.variant() == variant => match saved.into_agent() {
                Ok(agent) => Ok((agent, LoadStatus::Loaded)),
                Err(_) => Ok((QLearningAgent::new(variant, params)?, LoadStatus::Corrupt)),
            },
            Ok(_) => Ok((QLearningAgent::new(variant, params)?, LoadStatus::Corrupt)),
            Err(Error::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
                Ok((QLearningAgent::new(variant, params)?, LoadStatus::NotFound))
            }
            Err(_) => Ok((QLearningAgent::new(variant, params)?, LoadStatus::Corrupt)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryRepository;
    use crate::ports::AgentRepository as _;

    fn trained_agent() -> QLearningAgent {
        let params = AgentParams::default().with_seed(11);
        let mut agent = QLearningAgent::new(Variant::TicTacToe, params).unwrap();
        let state = crate::game::Board::new(3).key();
        agent.learn(state.clone(), 4, 1.0, &state, &[]);
        agent
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let agent = trained_agent();
        let saved = SavedAgent::from_agent(&agent);
        let bytes = rmp_serde::to_vec(&saved).unwrap();
        let decoded: SavedAgent = rmp_serde::from_slice(&bytes).unwrap();
        let restored = decoded.into_agent().unwrap();

        assert_eq!(restored.variant(), agent.variant());
        assert_eq!(restored.epsilon(), agent.epsilon());
        assert_eq!(
            restored.q_table().entry_count(),
            agent.q_table().entry_count()
        );
    }

    #[test]
    fn test_unsupported_version_rejected() {
        let mut saved = SavedAgent::from_agent(&trained_agent());
        saved.version = 99;
        assert!(saved.into_agent().is_err());
    }

    #[test]
    fn test_load_or_default_not_found() {
        let repo = InMemoryRepository::new();
        let (agent, status) = SavedAgent::load_or_default(
            &repo,
            Path::new("missing"),
            Variant::TicTacToe,
            AgentParams::default(),
        )
        .unwrap();
        assert_eq!(status, LoadStatus::NotFound);
        assert!(agent.q_table().is_empty());
    }

    #[test]
    fn test_load_or_default_loaded() {
        let repo = InMemoryRepository::new();
        let path = Path::new("trained");
        repo.save(&SavedAgent::from_agent(&trained_agent()), path)
            .unwrap();

        let (agent, status) = SavedAgent::load_or_default(
            &repo,
            path,
            Variant::TicTacToe,
            AgentParams::default(),
        )
        .unwrap();
        assert_eq!(status, LoadStatus::Loaded);
        assert_eq!(agent.q_table().entry_count(), 1);
    }

    #[test]
    fn test_load_or_default_variant_mismatch_is_corrupt() {
        let repo = InMemoryRepository::new();
        let path = Path::new("five");
        repo.save(&SavedAgent::from_agent(&trained_agent()), path)
            .unwrap();

        let (agent, status) = SavedAgent::load_or_default(
            &repo,
            path,
            Variant::FiveInARow,
            AgentParams::default(),
        )
        .unwrap();
        assert_eq!(status, LoadStatus::Corrupt);
        assert!(agent.q_table().is_empty());
        assert_eq!(agent.variant(), Variant::FiveInARow);
    }
}
