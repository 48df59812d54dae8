pub mod error;
pub mod ring;
pub mod saver;
pub mod snapshot;
pub mod state;

pub use error::RingError;
pub use ring::RingBuffer;
