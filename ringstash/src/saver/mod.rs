
use crossbeam_channel::Sender;
use serde::Serialize;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::thread;

use crate::error::RingError;
use crate::snapshot::SnapshotPersister;
use crate::state::BufferState;

/// Signal sent to the saver thread after a mutation releases its lock.
#[derive(Debug)]
pub enum SaveSignal {
  /// Buffer state changed; the latest state should reach disk
  StateChanged,
}

/// Background worker that turns state-change signals into snapshot writes.
///
/// One dedicated thread owns the persistence loop. Mutations signal it
/// through a `bounded(1)` channel via `try_send`: when the slot is already
/// occupied a save is pending anyway and will pick up the latest state, so
/// superseded signals are dropped rather than queued. Rapid mutation bursts
/// therefore coalesce into a bounded number of writes instead of an
/// unbounded pile of in-flight serializations.
///
/// Failures never reach or block the mutating caller. They are logged and
/// parked in a last-error slot that [`crate::ring::RingBuffer`] exposes for
/// callers that want to observe them.
///
/// Dropping the handle closes the channel; the worker drains any pending
/// signal and exits, making the final save best-effort.
#[derive(Debug)]
pub struct SnapshotSaver {
  /// Channel into the worker thread
  sender: Sender<SaveSignal>,
  /// Most recent swallowed save failure, if any
  last_error: Arc<Mutex<Option<RingError>>>,
}

impl SnapshotSaver {
  /// Spawns the worker thread for `state`, persisting through `persister`.
  pub fn spawn<T>(state: Arc<RwLock<BufferState<T>>>, persister: SnapshotPersister) -> Self
  where
    T: Clone + Serialize + Send + Sync + 'static,
  {
    let (sender, receiver) = crossbeam_channel::bounded::<SaveSignal>(1);
    let last_error = Arc::new(Mutex::new(None));

    let worker_error = Arc::clone(&last_error);
    thread::spawn(move || Self::save_loop(receiver, state, persister, worker_error));

    Self { sender, last_error }
  }

  /// Notifies the worker that the state changed.
  ///
  /// Non-blocking: a full channel means a save is already pending, so the
  /// signal is dropped and that save will carry the latest state.
  pub fn notify(&self) {
    let _ = self.sender.try_send(SaveSignal::StateChanged);
  }

  /// Takes the most recent background-save failure, if one occurred since
  /// the last call.
  pub fn take_last_error(&self) -> Option<RingError> {
    self
      .last_error
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .take()
  }

  /// Worker loop: receive a signal, clone the state under the read lock,
  /// write the snapshot. Exits when every sender is gone.
  fn save_loop<T: Clone + Serialize>(
    receiver: crossbeam_channel::Receiver<SaveSignal>,
    state: Arc<RwLock<BufferState<T>>>,
    persister: SnapshotPersister,
    last_error: Arc<Mutex<Option<RingError>>>,
  ) {
    while let Ok(SaveSignal::StateChanged) = receiver.recv() {
      let snapshot = state
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone();

      if let Err(e) = persister.save(&snapshot) {
        tracing::warn!(
          path = %persister.path().display(),
          error = %e,
          "background snapshot failed"
        );
        *last_error.lock().unwrap_or_else(PoisonError::into_inner) = Some(e);
      }
    }
  }
}
