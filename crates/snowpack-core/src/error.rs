use thiserror::Error;

use crate::types::ActorId;

/// Errors that can occur while building or driving a snow simulation.
#[derive(Debug, Error, PartialEq)]
pub enum SnowpackError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown actor {0}: update called before register_actor or after unregister_actor")]
    UnknownActor(ActorId),
}
