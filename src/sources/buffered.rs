use crate::config::BufferConfig;
use crate::source::check_region;
use crate::{ByteSource, Result, StreamError};

/// Buffering wrapper around another [`ByteSource`].
///
/// The inner source is read in chunks of `BufferConfig::capacity` bytes
/// through its `read_into`. Marks are supported: after `mark(limit)` up to
/// `limit` bytes are retained so `reset` can rewind, growing the buffer up
/// to `BufferConfig::max_capacity` if needed.
#[derive(Debug)]
pub struct BufferedSource<S> {
    inner: S,
    buffer: Vec<u8>,
    /// Number of valid bytes in `buffer`.
    count: usize,
    position: usize,
    mark_position: Option<usize>,
    mark_limit: usize,
    max_capacity: usize,
    closed: bool,
}

impl<S: ByteSource> BufferedSource<S> {
    pub fn new(inner: S) -> Self {
        Self::build(inner, BufferConfig::default())
    }

    pub fn with_config(inner: S, config: BufferConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(inner, config))
    }

    fn build(inner: S, config: BufferConfig) -> Self {
        Self {
            inner,
            buffer: vec![0; config.capacity],
            count: 0,
            position: 0,
            mark_position: None,
            mark_limit: 0,
            max_capacity: config.max_capacity,
            closed: false,
        }
    }

    pub fn get_ref(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    /// Bytes currently held in the buffer and not yet read.
    pub fn buffered(&self) -> usize {
        self.count - self.position
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(StreamError::Closed);
        }
        Ok(())
    }

    /// Makes room at the end of the buffer, keeping the marked bytes, then
    /// reads from the inner source once.
    fn fill(&mut self) -> Result<()> {
        match self.mark_position {
            None => self.position = 0,
            Some(mark) if self.position >= self.buffer.len() => {
                if mark > 0 {
                    self.buffer.copy_within(mark..self.position, 0);
                    self.position -= mark;
                    self.mark_position = Some(0);
                } else if self.buffer.len() >= self.mark_limit
                    || self.buffer.len() >= self.max_capacity
                {
                    log::trace!(
                        "Dropping mark, read limit of {} bytes exceeded",
                        self.mark_limit
                    );
                    self.mark_position = None;
                    self.position = 0;
                } else {
                    let grown = (self.position * 2)
                        .min(self.mark_limit)
                        .min(self.max_capacity);
                    log::trace!("Growing buffer to {} bytes", grown);
                    self.buffer.resize(grown, 0);
                }
            }
            Some(_) => {}
        }

        self.count = self.position;
        let start = self.position;
        let wanted = (self.buffer.len() - start) as i64;
        if let Some(read) =
            self.inner
                .read_into(Some(&mut self.buffer[start..]), 0, wanted)?
        {
            self.count += read;
        }
        Ok(())
    }

    /// Reads at most once from the buffer or, for large reads without a
    /// mark, directly from the inner source.
    fn read_once(&mut self, region: &mut [u8]) -> Result<Option<usize>> {
        if self.buffered() == 0 {
            if region.len() >= self.buffer.len() && self.mark_position.is_none()
            {
                let length = region.len() as i64;
                return self.inner.read_into(Some(region), 0, length);
            }
            self.fill()?;
            if self.buffered() == 0 {
                return Ok(None);
            }
        }

        let count = self.buffered().min(region.len());
        let start = self.position;
        region[..count].copy_from_slice(&self.buffer[start..start + count]);
        self.position += count;
        Ok(Some(count))
    }
}

impl<S: ByteSource> ByteSource for BufferedSource<S> {
    fn read_byte(&mut self) -> Result<Option<u8>> {
        self.ensure_open()?;
        if self.buffered() == 0 {
            self.fill()?;
            if self.buffered() == 0 {
                return Ok(None);
            }
        }
        let byte = self.buffer[self.position];
        self.position += 1;
        Ok(Some(byte))
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

        let mut filled = 0;
        loop {
            match self.read_once(&mut region[filled..])? {
                Some(read) if read > 0 => filled += read,
                _ => return Ok((filled > 0).then_some(filled)),
            }
            if filled >= region.len() || self.inner.available()? == 0 {
                return Ok(Some(filled));
            }
        }
    }

    fn skip(&mut self, n: i64) -> Result<u64> {
        self.ensure_open()?;
        if n <= 0 {
            return Ok(0);
        }

        if self.buffered() == 0 {
            if self.mark_position.is_none() {
                return self.inner.skip(n);
            }
            self.fill()?;
            if self.buffered() == 0 {
                return Ok(0);
            }
        }

        let skipped = (n as u64).min(self.buffered() as u64);
        self.position += skipped as usize;
        Ok(skipped)
    }

    fn available(&self) -> Result<usize> {
        self.ensure_open()?;
        Ok(self.buffered().saturating_add(self.inner.available()?))
    }

    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.buffer = Vec::new();
        self.count = 0;
        self.position = 0;
        self.mark_position = None;
        self.inner.close()
    }

    fn mark(&mut self, read_limit: usize) {
        self.mark_limit = read_limit;
        self.mark_position = Some(self.position);
    }

    fn reset(&mut self) -> Result<()> {
        self.ensure_open()?;
        match self.mark_position {
            Some(mark) => {
                self.position = mark;
                Ok(())
            }
            None => Err(StreamError::InvalidMark),
        }
    }

    fn mark_supported(&self) -> bool {
        true
    }
}
