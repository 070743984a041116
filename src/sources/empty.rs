use crate::source::check_region;
use crate::{ByteSource, Result, StreamError};

/// Source without any data. Once closed, every operation fails with
/// [`StreamError::Closed`].
#[derive(Debug, Default)]
pub struct EmptySource {
    closed: bool,
}

impl EmptySource {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(StreamError::Closed);
        }
        Ok(())
    }
}

impl ByteSource for EmptySource {
    fn read_byte(&mut self) -> Result<Option<u8>> {
        self.ensure_open()?;
        Ok(None)
    }

    fn read_into(
        &mut self,
        buffer: Option<&mut [u8]>,
        offset: i64,
        length: i64,
    ) -> Result<Option<usize>> {
        let region = check_region(buffer, offset, length)?;
        self.ensure_open()?;
        if region.is_empty() {
            return Ok(Some(0));
        }
        Ok(None)
    }

    fn skip(&mut self, _n: i64) -> Result<u64> {
        self.ensure_open()?;
        Ok(0)
    }

    fn available(&self) -> Result<usize> {
        self.ensure_open()?;
        Ok(0)
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }
}
