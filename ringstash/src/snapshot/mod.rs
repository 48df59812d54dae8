
use lz4::block::{compress, decompress, CompressionMode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::RingError;
use crate::state::BufferState;

/// Saves and restores a [`BufferState`] as one opaque blob at a fixed path.
///
/// The blob is CBOR-serialized, LZ4-compressed, and written atomically:
/// the bytes go to `<path>.tmp`, are synced to disk, and the temp file is
/// then renamed over the target. A reader never observes a partially
/// written snapshot, and a crash mid-write leaves the previous snapshot
/// intact.
///
/// Each save rewrites the file in full; there is no incremental or append
/// persistence.
#[derive(Debug, Clone)]
pub struct SnapshotPersister {
  /// Target path of the snapshot blob
  path: PathBuf,
}

impl SnapshotPersister {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Serialize `state` to CBOR, compress it with LZ4, and write it
  /// atomically, replacing any prior snapshot.
  ///
  /// # Errors
  /// * [`RingError::Codec`] - serialization failed
  /// * [`RingError::Io`] - compression or any file operation failed
  pub fn save<T: Serialize>(&self, state: &BufferState<T>) -> Result<(), RingError> {
    let cbor = serde_cbor::to_vec(state)?;
    let compressed = compress(&cbor, Some(CompressionMode::DEFAULT), true)?;

    let tmp = self.tmp_path();
    {
      let mut f = File::create(&tmp)?;
      f.write_all(&compressed)?;
      f.sync_all()?;
    }
    fs::rename(&tmp, &self.path)?;

    tracing::debug!(
      path = %self.path.display(),
      bytes = compressed.len(),
      "snapshot written"
    );
    Ok(())
  }

  /// Read the blob at the path, decompress, decode, and validate the
  /// cursor invariant.
  ///
  /// # Errors
  /// * [`RingError::NotFound`] - no file at the path
  /// * [`RingError::CorruptSnapshot`] - decompression or decoding failed,
  ///   or a cursor is out of range
  /// * [`RingError::Io`] - any other read failure
  pub fn load<T: DeserializeOwned + Clone>(&self) -> Result<BufferState<T>, RingError> {
    let raw = fs::read(&self.path).map_err(|e| {
      if e.kind() == io::ErrorKind::NotFound {
        RingError::NotFound(self.path.clone())
      } else {
        RingError::Io(e)
      }
    })?;

    let cbor = decompress(&raw, None)
      .map_err(|e| RingError::CorruptSnapshot(format!("decompression failed: {}", e)))?;
    let state: BufferState<T> = serde_cbor::from_slice(&cbor)
      .map_err(|e| RingError::CorruptSnapshot(format!("decoding failed: {}", e)))?;

    if !state.cursors_in_range() {
      return Err(RingError::CorruptSnapshot(format!(
        "cursor out of range (read={}, write={}, capacity={})",
        state.read_index(),
        state.write_index(),
        state.capacity()
      )));
    }

    Ok(state)
  }

  // Sibling of the target so the rename never crosses a filesystem.
  fn tmp_path(&self) -> PathBuf {
    let mut tmp = self.path.clone().into_os_string();
    tmp.push(".tmp");
    PathBuf::from(tmp)
  }
}
