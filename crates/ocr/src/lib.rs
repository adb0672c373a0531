//! Batch text recognition over user-drawn image crops.
//!
//! Crops are spooled to uniquely named temp files, the external recognition
//! engine is invoked once per batch with every path as a discrete argument,
//! and its line-oriented output is correlated back to the caller-supplied
//! identities. Temp files are deleted on every exit path.

pub mod correlate;
pub mod dispatcher;
pub mod engine;
pub mod error;
pub mod spool;

pub use correlate::{Recognized, correlate};
pub use dispatcher::{BatchItem, Dispatcher};
pub use engine::{Engine, EngineConfig};
pub use error::OcrError;
pub use spool::{SpooledImage, TempSpool};
