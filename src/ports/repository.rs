//! Repository port for agent persistence.

use std::path::Path;

use crate::{Result, q_learning::SavedAgent};

/// Port for storing and retrieving trained agents.
///
/// Abstracts the storage mechanism so the learning core never touches
/// serialization formats or the file system directly.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use kinrow::ports::AgentRepository;
/// use kinrow::q_learning::SavedAgent;
///
/// fn persist<R: AgentRepository>(repo: &R, saved: &SavedAgent) -> kinrow::Result<()> {
///     repo.save(saved, Path::new("agent.mpk"))
/// }
/// ```
pub trait AgentRepository {
    /// Save an agent to persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error when the path cannot be written or serialization
    /// fails.
    fn save(&self, agent: &SavedAgent, path: &Path) -> Result<()>;

    /// Load an agent from persistent storage.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] with a `NotFound` source when nothing is stored
    /// at `path` (callers distinguish this case in `load_or_default`), and a
    /// serialization error for undecodable data.
    ///
    /// [`Error::Io`]: crate::Error::Io
    fn load(&self, path: &Path) -> Result<SavedAgent>;
}
