use thiserror::Error;

/// Errors that can arise in the progression core or its save store.
#[derive(Debug, Error)]
pub enum GameError {
    /// Attempt to start a level beyond the unlocked frontier.
    #[error("level {requested} is locked (highest unlocked level is {frontier})")]
    LevelLocked { requested: u8, frontier: u8 },

    /// Complete-task called with no active level or no remaining tasks.
    #[error("no active task to complete")]
    NoActiveTask,

    /// Catalog lookup miss.
    #[error("unknown level: {0}")]
    UnknownLevel(u8),

    /// Returned when deserializing a snapshot with an unexpected schema version.
    #[error("schema mismatch for snapshot: expected {expected}, got {found}")]
    SchemaMismatch { expected: u8, found: u8 },

    /// Wrapper around sled's error type.
    #[error("sled error: {0}")]
    Sled(#[from] sled::Error),

    /// Wrapper around bincode serialization and deserialization errors.
    #[error("serialization error: {0}")]
    Bincode(#[from] bincode::Error),

    /// Wrapper around IO errors (directory creation, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
