use std::io::Read;

use crate::ByteSource;

/// Exposes a [`ByteSource`] as a [`std::io::Read`].
///
/// End of data reads as `Ok(0)`; source errors are converted with
/// `From<StreamError> for std::io::Error`.
#[derive(Debug)]
pub struct IoReader<S> {
    source: S,
}

impl<S: ByteSource> IoReader<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn get_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn into_inner(self) -> S {
        self.source
    }
}

impl<S: ByteSource> Read for IoReader<S> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let length = buf.len() as i64;
        Ok(self.source.read_into(Some(buf), 0, length)?.unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::{BytesSource, EmptySource, RepeatSource};
    use std::io::ErrorKind;

    #[test]
    fn reads_to_end() {
        let mut reader = IoReader::new(BytesSource::new("plain bytes"));
        let mut text = String::new();
        reader.read_to_string(&mut text).unwrap();
        assert_eq!(text, "plain bytes");
        assert_eq!(reader.into_inner().remaining(), 0);
    }

    #[test]
    fn take_from_endless_source() {
        let mut bytes = Vec::new();
        IoReader::new(RepeatSource::new(b'z'))
            .take(5)
            .read_to_end(&mut bytes)
            .unwrap();
        assert_eq!(bytes, b"zzzzz");
    }

    #[test]
    fn closed_source_becomes_io_error() {
        let mut reader = IoReader::new(EmptySource::new());
        reader.get_mut().close().unwrap();
        let mut buf = [0u8; 4];
        let err = reader.read(&mut buf).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Other);
    }
}
