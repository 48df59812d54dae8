#[cfg(test)]
mod tests {
  use crate::state::BufferState;

  #[test]
  fn test_new_state() {
    let state: BufferState<u32> = BufferState::new(4);
    assert_eq!(state.capacity(), 4);
    assert_eq!(state.read_index(), 0);
    assert_eq!(state.write_index(), 0);
    assert!(state.cursors_in_range());
  }

  #[test]
  fn test_fifo_order() {
    let mut state = BufferState::new(5);

    for i in 0..5 {
      state.enqueue_one(i);
    }
    for i in 0..5 {
      assert_eq!(state.dequeue_one(), i);
    }
  }

  #[test]
  fn test_wraparound_keeps_order() {
    let mut state = BufferState::new(3);

    // Push the cursors past the end a few times
    for round in 0..4 {
      for i in 0..3 {
        state.enqueue_one(round * 10 + i);
      }
      for i in 0..3 {
        assert_eq!(state.dequeue_one(), round * 10 + i);
      }
    }

    assert!(state.read_index() < 3);
    assert!(state.write_index() < 3);
  }

  #[test]
  fn test_cursor_advances_mod_capacity() {
    let mut state = BufferState::new(3);

    state.enqueue_one(1);
    state.enqueue_one(2);
    state.enqueue_one(3);
    assert_eq!(state.write_index(), 0); // wrapped

    state.dequeue_one();
    assert_eq!(state.read_index(), 1);
  }

  #[test]
  fn test_peek_does_not_advance() {
    let mut state = BufferState::new(3);
    state.enqueue_one(42);

    assert_eq!(state.peek(), 42);
    assert_eq!(state.peek(), 42);
    assert_eq!(state.read_index(), 0);

    assert_eq!(state.dequeue_one(), 42);
    assert_eq!(state.read_index(), 1);
  }

  #[test]
  fn test_overflow_overwrites_oldest() {
    let mut state = BufferState::new(3);

    // Four enqueues into three slots: slot 0 now holds 4, and the read
    // cursor (still at 0) has been lapped.
    for i in 1..=4 {
      state.enqueue_one(i);
    }

    assert_eq!(state.write_index(), 1);
    assert_eq!(state.dequeue_one(), 4);
  }

  #[test]
  fn test_underflow_returns_stale_data() {
    let mut state: BufferState<u32> = BufferState::new(2);

    // Empty buffer: dequeue returns the default slot values, no error.
    assert_eq!(state.dequeue_one(), 0);
    assert_eq!(state.dequeue_one(), 0);

    state.enqueue_one(7);
    state.enqueue_one(8);
    state.dequeue_one();
    state.dequeue_one();

    // Empty again, but the slots still hold the old items.
    assert_eq!(state.dequeue_one(), 7);
  }

  #[test]
  fn test_full_and_empty_are_indistinguishable() {
    let mut state = BufferState::new(3);
    assert_eq!(state.read_index(), state.write_index());

    for i in 0..3 {
      state.enqueue_one(i);
    }
    // Full buffer: cursors coincide again.
    assert_eq!(state.read_index(), state.write_index());
  }
}
