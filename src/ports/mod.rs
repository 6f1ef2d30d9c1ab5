//! Ports (trait boundaries) for external dependencies.
//!
//! These traits are owned by the domain and implemented by adapters: move
//! selection ([`MovePolicy`]), training telemetry ([`Observer`]), and agent
//! persistence ([`AgentRepository`]).

pub mod observer;
pub mod policy;
pub mod repository;

pub use observer::Observer;
pub use policy::MovePolicy;
pub use repository::AgentRepository;
