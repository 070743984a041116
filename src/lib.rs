//! # Data Stream
//!
//! `data-stream` provides [`ByteSource`], a byte-producing abstraction where
//! implementors supply a single primitive read and inherit the buffered
//! read, skipping, bulk reads and transfers built on top of it.
//!
//! The buffered read validates its arguments in a fixed order: an absent
//! buffer is reported as [`StreamError::NullReference`] before offset and
//! length are checked.
//!
//! ```
//! use data_stream::{sources::RepeatSource, ByteSource, StreamError};
//!
//! let mut source = RepeatSource::new(0);
//! let result = source.read_into(None, -1, 1);
//! assert!(matches!(result, Err(StreamError::NullReference(_))));
//! ```

use std::sync::Once;

pub mod config;
mod errors;
pub mod io;
pub mod source;
pub mod sources;

pub use config::BufferConfig;
pub use errors::{Result, StreamError};
pub use io::IoReader;
pub use source::ByteSource;

pub static INIT: Once = Once::new();

/// Installs the `env_logger` backend once; later calls do nothing.
pub fn initialize() {
    INIT.call_once(|| {
        let _ = env_logger::try_init();
        log::info!("Initializing data-stream");
    });
}
