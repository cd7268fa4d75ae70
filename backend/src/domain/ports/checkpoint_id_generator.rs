//! Port for minting checkpoint identifiers.

use crate::domain::CheckpointId;

/// Source of fresh checkpoint identifiers.
#[cfg_attr(test, mockall::automock)]
pub trait CheckpointIdGenerator: Send + Sync {
    fn next_id(&self) -> CheckpointId;
}

/// Random UUID v4 identifiers.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidCheckpointIdGenerator;

impl CheckpointIdGenerator for UuidCheckpointIdGenerator {
    fn next_id(&self) -> CheckpointId {
        CheckpointId::random()
    }
}
