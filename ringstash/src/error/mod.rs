use std::path::PathBuf;

/// Errors surfaced by construction, restore, and explicit saves.
///
/// Runtime overflow and underflow are deliberately not represented here:
/// enqueuing into a full buffer overwrites the oldest unread slot and
/// dequeuing an empty buffer returns stale data, both silently. The only
/// user-visible failures are at construction/restore time and on an
/// explicitly requested checkpoint.
#[derive(Debug, thiserror::Error)]
pub enum RingError {
  /// Capacity must be greater than zero.
  #[error("capacity must be greater than zero")]
  Capacity,

  /// No snapshot exists at the given path.
  #[error("no snapshot found at {0}")]
  NotFound(PathBuf),

  /// The snapshot could not be decoded, or its cursors violate the
  /// in-range invariant.
  #[error("corrupt snapshot: {0}")]
  CorruptSnapshot(String),

  /// Buffer state could not be serialized.
  #[error("snapshot encoding failed: {0}")]
  Codec(#[from] serde_cbor::Error),

  /// The snapshot file could not be read or written.
  #[error("snapshot io error: {0}")]
  Io(#[from] std::io::Error),
}
