use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

use crate::source::check_region;
use crate::{ByteSource, Result};

/// Adapts any [`std::io::Read`] into a [`ByteSource`].
///
/// Interrupted reads are retried, other I/O errors surface as
/// [`StreamError::Io`](crate::StreamError::Io).
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
}

impl ReaderSource<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        log::debug!("Opening byte source at {}", path.as_ref().display());

        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: Read> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    fn read_some(&mut self, region: &mut [u8]) -> Result<usize> {
        loop {
            match self.reader.read(region) {
                Ok(read) => return Ok(read),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

impl<R: Read> ByteSource for ReaderSource<R> {
    fn read_byte(&mut self) -> Result<Option<u8>> {
        let mut byte = [0u8; 1];
        match self.read_some(&mut byte)? {
            0 => Ok(None),
            _ => Ok(Some(byte[0])),
        }
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
        match self.read_some(region)? {
            0 => Ok(None),
            read => Ok(Some(read)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StreamError;
    use std::io::Write;
    use tempdir::TempDir;

    /// Interrupts every other call, then delegates.
    struct Flaky<R> {
        inner: R,
        interrupt: bool,
    }

    impl<R: Read> Read for Flaky<R> {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            self.interrupt = !self.interrupt;
            if self.interrupt {
                return Err(std::io::Error::from(ErrorKind::Interrupted));
            }
            self.inner.read(buf)
        }
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(ErrorKind::PermissionDenied, "denied"))
        }
    }

    #[test]
    fn reads_from_file() {
        let dir = TempDir::new("reader_source").unwrap();
        let path = dir.path().join("data.bin");
        let mut file = File::create(&path).unwrap();
        file.write_all(b"file contents").unwrap();
        drop(file);

        let mut source = ReaderSource::open(&path).unwrap();
        assert!(matches!(
            source.read_into(None, -1, 1).unwrap_err(),
            StreamError::NullReference(_)
        ));
        assert_eq!(source.read_byte().unwrap(), Some(b'f'));
        assert_eq!(source.read_all_bytes().unwrap(), b"ile contents");
        assert_eq!(source.read_byte().unwrap(), None);

        let err = ReaderSource::open(dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, StreamError::Io(_)));
    }

    #[test]
    fn retries_interrupted_reads() {
        let mut source = ReaderSource::new(Flaky {
            inner: &b"abc"[..],
            interrupt: false,
        });
        let mut buffer = [0u8; 3];
        assert_eq!(source.read_byte().unwrap(), Some(b'a'));
        assert_eq!(
            source.read_into(Some(&mut buffer[..]), 1, 2).unwrap(),
            Some(2)
        );
        assert_eq!(&buffer[1..], b"bc");
        assert_eq!(source.read(Some(&mut buffer[..])).unwrap(), None);
    }

    #[test]
    fn surfaces_io_errors() {
        let mut source = ReaderSource::new(Broken);
        let err = source.read_byte().unwrap_err();
        match err {
            StreamError::Io(e) => {
                assert_eq!(e.kind(), ErrorKind::PermissionDenied)
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
