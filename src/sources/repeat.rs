use crate::{ByteSource, Result};

/// Endless source yielding the same byte on every read.
///
/// It only supplies the primitive read, so every other operation runs the
/// default algorithms of [`ByteSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepeatSource {
    value: u8,
}

impl RepeatSource {
    pub fn new(value: u8) -> Self {
        Self { value }
    }

    pub fn value(&self) -> u8 {
        self.value
    }
}

impl ByteSource for RepeatSource {
    fn read_byte(&mut self) -> Result<Option<u8>> {
        Ok(Some(self.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StreamError;

    #[test]
    fn absent_buffer_with_negative_offset() {
        let mut source = RepeatSource::new(0);
        let result = source.read_into(None, -1, 1);
        assert!(matches!(result, Err(StreamError::NullReference(_))));
    }

    #[test]
    fn fills_requested_region() {
        let mut source = RepeatSource::new(0xAB);
        let mut buffer = [0u8; 6];
        let read = source.read_into(Some(&mut buffer[..]), 2, 3).unwrap();
        assert_eq!(read, Some(3));
        assert_eq!(buffer, [0, 0, 0xAB, 0xAB, 0xAB, 0]);
        assert_eq!(source.read_n_bytes(4).unwrap(), vec![0xAB; 4]);
        assert_eq!(source.skip(10_000).unwrap(), 10_000);
    }
}
