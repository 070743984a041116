use std::io::Write;

use crate::config::{DEFAULT_BUFFER_CAPACITY, MAX_SKIP_BUFFER_SIZE};
use crate::{Result, StreamError};

/// A source of bytes produced on demand.
///
/// Implementors supply [`read_byte`](ByteSource::read_byte); every other
/// operation has a default built on top of it. Sources that can do better
/// (bulk copies, cheap skips) override the defaults but must keep the
/// argument checks of [`check_region`].
pub trait ByteSource {
    /// Reads one byte, or `None` at the end of data.
    fn read_byte(&mut self) -> Result<Option<u8>>;

    /// Reads up to `length` bytes into `buffer[offset..offset + length]`.
    ///
    /// Returns the number of bytes stored, or `None` if the source was
    /// already exhausted. An absent buffer is reported as
    /// [`StreamError::NullReference`] before `offset` and `length` are
    /// looked at.
    fn read_into(
        &mut self,
        buffer: Option<&mut [u8]>,
        offset: i64,
        length: i64,
    ) -> Result<Option<usize>> {
        fill_region(self, buffer, offset, length)
    }

    /// Reads up to `buffer.len()` bytes into the whole buffer.
    fn read(&mut self, buffer: Option<&mut [u8]>) -> Result<Option<usize>> {
        let buffer = buffer.ok_or(StreamError::NullReference("buffer"))?;
        let length = buffer.len() as i64;
        self.read_into(Some(buffer), 0, length)
    }

    /// Keeps reading until `length` bytes are stored or the data runs out.
    /// Returns the number of bytes stored, `0` at the end of data.
    fn read_fully(
        &mut self,
        buffer: Option<&mut [u8]>,
        offset: i64,
        length: i64,
    ) -> Result<usize> {
        let region = check_region(buffer, offset, length)?;
        let mut filled = 0;
        while filled < region.len() {
            let remaining = (region.len() - filled) as i64;
            match self.read_into(Some(&mut region[filled..]), 0, remaining)? {
                Some(0) | None => break,
                Some(read) => filled += read,
            }
        }
        Ok(filled)
    }

    /// Reads at most `length` bytes into a new vector.
    fn read_n_bytes(&mut self, length: i64) -> Result<Vec<u8>> {
        let length = usize::try_from(length).map_err(|_| {
            StreamError::InvalidArgument(format!("length {length} is negative"))
        })?;

        let mut bytes = Vec::new();
        let mut chunk = vec![0u8; DEFAULT_BUFFER_CAPACITY.min(length)];
        while bytes.len() < length {
            let wanted = (length - bytes.len()).min(chunk.len());
            let read = self.read_fully(Some(&mut chunk[..]), 0, wanted as i64)?;
            bytes.extend_from_slice(&chunk[..read]);
            if read < wanted {
                break;
            }
        }
        Ok(bytes)
    }

    /// Reads everything that is left. Never returns for endless sources.
    fn read_all_bytes(&mut self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        let mut chunk = vec![0u8; DEFAULT_BUFFER_CAPACITY];
        loop {
            match self.read(Some(&mut chunk[..]))? {
                Some(0) | None => break,
                Some(read) => bytes.extend_from_slice(&chunk[..read]),
            }
        }
        log::trace!("{} bytes have been read", bytes.len());
        Ok(bytes)
    }

    /// Discards up to `n` bytes and returns how many were discarded.
    fn skip(&mut self, n: i64) -> Result<u64> {
        if n <= 0 {
            return Ok(0);
        }

        let requested = n as u64;
        let size = (MAX_SKIP_BUFFER_SIZE as u64).min(requested) as usize;
        let mut scratch = vec![0u8; size];
        let mut remaining = requested;
        while remaining > 0 {
            let wanted = remaining.min(size as u64) as i64;
            match self.read_into(Some(&mut scratch[..]), 0, wanted)? {
                Some(0) | None => break,
                Some(read) => remaining -= read as u64,
            }
        }
        Ok(requested - remaining)
    }

    /// Discards exactly `n` bytes, failing with
    /// [`StreamError::UnexpectedEnd`] if the data runs out first.
    fn skip_exact(&mut self, n: i64) -> Result<()> {
        let mut remaining = n;
        while remaining > 0 {
            match self.skip(remaining)? {
                0 => match self.read_byte()? {
                    Some(_) => remaining -= 1,
                    None => return Err(StreamError::UnexpectedEnd),
                },
                skipped => remaining -= skipped as i64,
            }
        }
        Ok(())
    }

    /// Copies the remaining bytes into `out`.
    fn transfer_to(&mut self, out: &mut dyn Write) -> Result<u64> {
        let mut chunk = vec![0u8; DEFAULT_BUFFER_CAPACITY];
        let mut transferred: u64 = 0;
        loop {
            match self.read(Some(&mut chunk[..]))? {
                Some(0) | None => break,
                Some(read) => {
                    out.write_all(&chunk[..read])?;
                    transferred += read as u64;
                }
            }
        }
        Ok(transferred)
    }

    /// Number of bytes that can be read without blocking. A lower bound.
    fn available(&self) -> Result<usize> {
        Ok(0)
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }

    fn mark(&mut self, _read_limit: usize) {}

    fn reset(&mut self) -> Result<()> {
        Err(StreamError::MarkUnsupported)
    }

    fn mark_supported(&self) -> bool {
        false
    }
}

/// Validates the arguments of a buffered read and returns the addressed
/// region of `buffer`.
///
/// Presence of the buffer is checked first, then the bounds.
pub fn check_region(
    buffer: Option<&mut [u8]>,
    offset: i64,
    length: i64,
) -> Result<&mut [u8]> {
    let buffer = buffer.ok_or(StreamError::NullReference("buffer"))?;
    let capacity = buffer.len();
    let out_of_bounds = || StreamError::OutOfBounds {
        offset,
        length,
        capacity,
    };

    let start = usize::try_from(offset).map_err(|_| out_of_bounds())?;
    let len = usize::try_from(length).map_err(|_| out_of_bounds())?;
    let end = start
        .checked_add(len)
        .filter(|end| *end <= capacity)
        .ok_or_else(out_of_bounds)?;
    Ok(&mut buffer[start..end])
}

/// The buffered read every source gets for free: validates the arguments,
/// then fills the region one [`read_byte`](ByteSource::read_byte) at a time.
///
/// A failure on the first byte is returned to the caller. A failure after
/// that ends the read early and the bytes stored so far are reported.
pub fn fill_region<S: ByteSource + ?Sized>(
    source: &mut S,
    buffer: Option<&mut [u8]>,
    offset: i64,
    length: i64,
) -> Result<Option<usize>> {
    let region = check_region(buffer, offset, length)?;
    if region.is_empty() {
        return Ok(Some(0));
    }

    match source.read_byte()? {
        Some(byte) => region[0] = byte,
        None => return Ok(None),
    }

    let mut filled = 1;
    while filled < region.len() {
        match source.read_byte() {
            Ok(Some(byte)) => {
                region[filled] = byte;
                filled += 1;
            }
            Ok(None) => break,
            Err(e) => {
                log::debug!("Read stopped after {} bytes: {}", filled, e);
                break;
            }
        }
    }
    Ok(Some(filled))
}

macro_rules! forward_byte_source {
    () => {
        fn read_byte(&mut self) -> Result<Option<u8>> {
            (**self).read_byte()
        }

        fn read_into(
            &mut self,
            buffer: Option<&mut [u8]>,
            offset: i64,
            length: i64,
        ) -> Result<Option<usize>> {
            (**self).read_into(buffer, offset, length)
        }

        fn read(
            &mut self,
            buffer: Option<&mut [u8]>,
        ) -> Result<Option<usize>> {
            (**self).read(buffer)
        }

        fn read_fully(
            &mut self,
            buffer: Option<&mut [u8]>,
            offset: i64,
            length: i64,
        ) -> Result<usize> {
            (**self).read_fully(buffer, offset, length)
        }

        fn read_n_bytes(&mut self, length: i64) -> Result<Vec<u8>> {
            (**self).read_n_bytes(length)
        }

        fn read_all_bytes(&mut self) -> Result<Vec<u8>> {
            (**self).read_all_bytes()
        }

        fn skip(&mut self, n: i64) -> Result<u64> {
            (**self).skip(n)
        }

        fn skip_exact(&mut self, n: i64) -> Result<()> {
            (**self).skip_exact(n)
        }

        fn transfer_to(&mut self, out: &mut dyn Write) -> Result<u64> {
            (**self).transfer_to(out)
        }

        fn available(&self) -> Result<usize> {
            (**self).available()
        }

        fn close(&mut self) -> Result<()> {
            (**self).close()
        }

        fn mark(&mut self, read_limit: usize) {
            (**self).mark(read_limit)
        }

        fn reset(&mut self) -> Result<()> {
            (**self).reset()
        }

        fn mark_supported(&self) -> bool {
            (**self).mark_supported()
        }
    };
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    forward_byte_source!();
}

impl<S: ByteSource + ?Sized> ByteSource for Box<S> {
    forward_byte_source!();
}
