//! Error types for dungeon layout generation

use thiserror::Error;

/// Errors that can occur during dungeon generation or queries
///
/// Expected outcomes of the algorithms are not errors: an unreachable
/// corridor target is `None` from the pathfinder, and a spanning tree over a
/// disconnected graph is simply partial.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// Configuration validation failed
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Requested room ID does not exist
    #[error("room not found: {0}")]
    RoomNotFound(usize),
}

/// Result type alias for layout operations
pub type Result<T> = std::result::Result<T, LayoutError>;
