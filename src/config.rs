use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{Result, StreamError};

pub const KILOBYTE: usize = 1024;
pub const MEGABYTE: usize = 1024 * KILOBYTE;

/// Chunk size used by `transfer_to` and the default capacity of
/// [`BufferedSource`](crate::sources::BufferedSource).
pub const DEFAULT_BUFFER_CAPACITY: usize = 8 * KILOBYTE;
/// Upper bound for the scratch buffer allocated by `skip`.
pub const MAX_SKIP_BUFFER_SIZE: usize = 2 * KILOBYTE;
pub const DEFAULT_MAX_CAPACITY: usize = MEGABYTE;

/// Sizing of the internal buffer of a
/// [`BufferedSource`](crate::sources::BufferedSource).
///
/// `max_capacity` caps how far the buffer may grow to honour a large
/// `mark` read limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferConfig {
    pub capacity: usize,
    pub max_capacity: usize,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_BUFFER_CAPACITY,
            max_capacity: DEFAULT_MAX_CAPACITY,
        }
    }
}

impl BufferConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        log::debug!("Loading buffer config from {}", path.as_ref().display());

        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(StreamError::InvalidArgument(
                "buffer capacity must be positive".to_owned(),
            ));
        }
        if self.max_capacity < self.capacity {
            return Err(StreamError::InvalidArgument(format!(
                "max capacity {} is below capacity {}",
                self.max_capacity, self.capacity
            )));
        }
        Ok(())
    }
}
