mod __test__;

use serde::{Deserialize, Serialize};

/// The complete persistable state of a circular buffer: a fixed-length
/// backing sequence plus a read and a write cursor.
///
/// Both cursors always stay in `[0, capacity)`. There is no pending-count
/// field, so a full buffer and an empty buffer are indistinguishable (both
/// have `read_index == write_index`). The consequences are deliberate:
/// enqueuing into a full buffer silently overwrites the oldest unread slot,
/// and dequeuing an empty buffer returns whatever the slot last held.
///
/// `BufferState` is pure indexing logic. Locking lives in
/// [`crate::ring::RingBuffer`] and persistence in
/// [`crate::snapshot::SnapshotPersister`].
///
/// # Type Parameters
/// * `T` - The element type. Must implement `Clone`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BufferState<T> {
  /// Backing storage, fixed at `capacity` slots
  contents: Vec<T>,

  /// Next slot to dequeue from
  read_index: usize,

  /// Next slot to enqueue into
  write_index: usize,
}

impl<T: Clone + Default> BufferState<T> {
  /// Creates an empty state with `capacity` default-valued slots and both
  /// cursors at zero.
  ///
  /// # Example
  /// ```rust
  /// use ringstash::state::BufferState;
  ///
  /// let state: BufferState<u32> = BufferState::new(4);
  /// assert_eq!(state.capacity(), 4);
  /// ```
  pub fn new(capacity: usize) -> Self {
    Self {
      contents: vec![T::default(); capacity],
      read_index: 0,
      write_index: 0,
    }
  }
}

impl<T: Clone> BufferState<T> {
  /// Writes `item` at the write cursor and advances it modulo capacity.
  ///
  /// No check against the read cursor is made; on a full buffer this
  /// overwrites the oldest unread slot.
  pub fn enqueue_one(&mut self, item: T) {
    self.contents[self.write_index] = item;
    self.write_index = self.increment(self.write_index);
  }

  /// Reads the slot at the read cursor and advances it modulo capacity.
  ///
  /// No check against the write cursor is made; on an empty buffer this
  /// returns stale (or default) data rather than an error.
  pub fn dequeue_one(&mut self) -> T {
    let item = self.contents[self.read_index].clone();
    self.read_index = self.increment(self.read_index);
    item
  }

  /// Returns a copy of the next item without advancing the read cursor.
  pub fn peek(&self) -> T {
    self.contents[self.read_index].clone()
  }

  /// Shared cursor-advance primitive: `(idx + 1) % capacity`.
  fn increment(&self, idx: usize) -> usize {
    (idx + 1) % self.contents.len()
  }

  /// Number of slots. Restored states derive this from the decoded
  /// contents length alone.
  pub fn capacity(&self) -> usize {
    self.contents.len()
  }

  pub fn read_index(&self) -> usize {
    self.read_index
  }

  pub fn write_index(&self) -> usize {
    self.write_index
  }

  /// Checks the cursor invariant: non-zero capacity and both cursors in
  /// `[0, capacity)`. A decoded snapshot failing this is corrupt.
  pub fn cursors_in_range(&self) -> bool {
    !self.contents.is_empty()
      && self.read_index < self.contents.len()
      && self.write_index < self.contents.len()
  }
}
