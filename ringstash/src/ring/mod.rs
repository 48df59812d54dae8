//! # Ring Module
//!
//! The public facade: a fixed-capacity circular queue whose full state is
//! snapshotted to disk after every mutation, so pending items survive a
//! process restart.
//!
//! ## Architecture
//!
//! - **State**: [`BufferState`] holds the backing slots and both cursors;
//!   all cursor arithmetic lives there.
//! - **Concurrency**: a readers-writer lock is the sole ordering authority.
//!   `enqueue` and `dequeue` take the write lock and form one global
//!   sequential order; `peek` and `save` take the read lock and may overlap
//!   each other but never a mutation.
//! - **Persistence**: each mutation signals a background
//!   [`SnapshotSaver`] after releasing its lock; the worker coalesces
//!   bursts and rewrites the snapshot file in full. `save` is the
//!   synchronous variant for callers that need the durability result, e.g.
//!   before shutdown.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let buffer = RingBuffer::new(5, "/var/lib/app/jobs.ring")?;
//! buffer.enqueue([job_a, job_b]);
//! let next = buffer.dequeue();
//!
//! // After a restart:
//! let buffer: RingBuffer<Job> = RingBuffer::open("/var/lib/app/jobs.ring")?;
//! ```


use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::RingError;
use crate::saver::SnapshotSaver;
use crate::snapshot::SnapshotPersister;
use crate::state::BufferState;

/// A persistent circular queue with fixed capacity.
///
/// Overflow and underflow are silent: enqueuing past capacity overwrites
/// the oldest unread item, and dequeuing an empty buffer returns stale (or
/// default) data. `read_index == write_index` means either empty or full;
/// the two are indistinguishable by design.
///
/// Each instance is self-contained (capacity, cursors, snapshot path);
/// clones of the handle are not supported, but the instance itself may be
/// shared across threads behind an `Arc`.
#[derive(Debug)]
pub struct RingBuffer<T> {
  capacity: usize,
  state: Arc<RwLock<BufferState<T>>>,
  persister: SnapshotPersister,
  saver: SnapshotSaver,
}

impl<T> RingBuffer<T>
where
  T: Clone + Default + Serialize + DeserializeOwned + Send + Sync + 'static,
{
  /// Creates an empty buffer with `capacity` default-valued slots, backed
  /// by the snapshot file at `path`.
  ///
  /// Nothing is written until the first mutation or explicit [`save`].
  ///
  /// # Errors
  /// [`RingError::Capacity`] if `capacity` is zero.
  ///
  /// [`save`]: RingBuffer::save
  pub fn new(capacity: usize, path: impl Into<PathBuf>) -> Result<Self, RingError> {
    if capacity == 0 {
      return Err(RingError::Capacity);
    }

    let state = Arc::new(RwLock::new(BufferState::new(capacity)));
    let persister = SnapshotPersister::new(path);
    let saver = SnapshotSaver::spawn(Arc::clone(&state), persister.clone());

    Ok(Self {
      capacity,
      state,
      persister,
      saver,
    })
  }

  /// Restores a buffer from the snapshot at `path`.
  ///
  /// Capacity is derived from the decoded contents length alone; both
  /// cursors are rebuilt from their persisted values.
  ///
  /// # Errors
  /// * [`RingError::NotFound`] - no snapshot at the path
  /// * [`RingError::CorruptSnapshot`] - the blob failed to decode or a
  ///   cursor is out of range
  /// * [`RingError::Io`] - the file exists but could not be read
  pub fn open(path: impl Into<PathBuf>) -> Result<Self, RingError> {
    let persister = SnapshotPersister::new(path);
    let restored: BufferState<T> = persister.load()?;
    let capacity = restored.capacity();

    let state = Arc::new(RwLock::new(restored));
    let saver = SnapshotSaver::spawn(Arc::clone(&state), persister.clone());

    Ok(Self {
      capacity,
      state,
      persister,
      saver,
    })
  }

  /// Appends each item in order under a single write-lock acquisition,
  /// then schedules one background snapshot.
  ///
  /// No overflow error: past capacity, the oldest unread items are
  /// silently overwritten.
  pub fn enqueue(&self, items: impl IntoIterator<Item = T>) {
    {
      let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
      for item in items {
        state.enqueue_one(item);
      }
    }
    self.saver.notify();
  }

  /// Removes and returns the next item, then schedules a background
  /// snapshot.
  ///
  /// No underflow error: on an empty buffer this returns stale (or
  /// default) data.
  pub fn dequeue(&self) -> T {
    let item = self
      .state
      .write()
      .unwrap_or_else(PoisonError::into_inner)
      .dequeue_one();
    self.saver.notify();
    item
  }

  /// Returns a copy of the next item without dequeuing it.
  pub fn peek(&self) -> T {
    self
      .state
      .read()
      .unwrap_or_else(PoisonError::into_inner)
      .peek()
  }

  /// Writes a snapshot synchronously and propagates the result.
  ///
  /// Unlike the automatic post-mutation trigger, this gives the caller a
  /// durability guarantee: when it returns `Ok`, the current state has been
  /// renamed into place and synced.
  pub fn save(&self) -> Result<(), RingError> {
    let snapshot = self
      .state
      .read()
      .unwrap_or_else(PoisonError::into_inner)
      .clone();
    self.persister.save(&snapshot)
  }

  pub fn capacity(&self) -> usize {
    self.capacity
  }

  /// Path of the snapshot file backing this buffer.
  pub fn path(&self) -> &Path {
    self.persister.path()
  }

  /// Takes the most recent background-save failure, if any.
  ///
  /// Background failures never propagate to mutating callers; this hook is
  /// the only way to observe them besides the log.
  pub fn last_save_error(&self) -> Option<RingError> {
    self.saver.take_last_error()
  }

  /// Current read cursor, for diagnostics.
  pub fn read_index(&self) -> usize {
    self
      .state
      .read()
      .unwrap_or_else(PoisonError::into_inner)
      .read_index()
  }

  /// Current write cursor, for diagnostics.
  pub fn write_index(&self) -> usize {
    self
      .state
      .read()
      .unwrap_or_else(PoisonError::into_inner)
      .write_index()
  }
}
