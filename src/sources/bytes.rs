use std::io::Write;

use crate::source::check_region;
use crate::{ByteSource, Result};

/// In-memory source over an owned byte vector.
///
/// Supports `mark`/`reset`; the read limit given to `mark` is ignored since
/// the whole vector stays available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BytesSource {
    data: Vec<u8>,
    position: usize,
    mark: usize,
}

impl BytesSource {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            position: 0,
            mark: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }
}

impl ByteSource for BytesSource {
    fn read_byte(&mut self) -> Result<Option<u8>> {
        let byte = self.data.get(self.position).copied();
        if byte.is_some() {
            self.position += 1;
        }
        Ok(byte)
    }

    fn read_into(
        &mut self,
        buffer: Option<&mut [u8]>,
        offset: i64,
        length: i64,
    ) -> Result<Option<usize>> {
        let region = check_region(buffer, offset, length)?;
        if region.is_empty() {
            return Ok(Some(0));
        }
        if self.remaining() == 0 {
            return Ok(None);
        }

        let count = region.len().min(self.remaining());
        let start = self.position;
        region[..count].copy_from_slice(&self.data[start..start + count]);
        self.position += count;
        Ok(Some(count))
    }

    fn read_all_bytes(&mut self) -> Result<Vec<u8>> {
        let bytes = self.data[self.position..].to_vec();
        self.position = self.data.len();
        Ok(bytes)
    }

    fn skip(&mut self, n: i64) -> Result<u64> {
        if n <= 0 {
            return Ok(0);
        }
        let skipped = (n as u64).min(self.remaining() as u64);
        self.position += skipped as usize;
        Ok(skipped)
    }

    fn transfer_to(&mut self, out: &mut dyn Write) -> Result<u64> {
        let rest = &self.data[self.position..];
        out.write_all(rest)?;
        let transferred = rest.len() as u64;
        self.position = self.data.len();
        Ok(transferred)
    }

    fn available(&self) -> Result<usize> {
        Ok(self.remaining())
    }

    fn mark(&mut self, _read_limit: usize) {
        self.mark = self.position;
    }

    fn reset(&mut self) -> Result<()> {
        self.position = self.mark;
        Ok(())
    }

    fn mark_supported(&self) -> bool {
        true
    }
}
