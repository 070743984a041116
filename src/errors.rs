use std::io::ErrorKind;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StreamError>;

#[derive(Error, Debug)]
pub enum StreamError {
    #[error("Null reference: {0} must be present")]
    NullReference(&'static str),
    #[error("Range [{offset}, {offset} + {length}) out of bounds for length {capacity}")]
    OutOfBounds {
        offset: i64,
        length: i64,
        capacity: usize,
    },
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Stream closed")]
    Closed,
    #[error("mark/reset not supported")]
    MarkUnsupported,
    #[error("Resetting to invalid mark")]
    InvalidMark,
    #[error("Unexpected end of data")]
    UnexpectedEnd,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parsing error")]
    Parse,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<serde_json::Error> for StreamError {
    fn from(_: serde_json::Error) -> Self {
        Self::Parse
    }
}

impl From<StreamError> for std::io::Error {
    fn from(e: StreamError) -> Self {
        let kind = match &e {
            StreamError::Io(inner) => inner.kind(),
            StreamError::NullReference(_)
            | StreamError::OutOfBounds { .. }
            | StreamError::InvalidArgument(_) => ErrorKind::InvalidInput,
            StreamError::UnexpectedEnd => ErrorKind::UnexpectedEof,
            _ => ErrorKind::Other,
        };
        std::io::Error::new(kind, e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_kinds() {
        let err: std::io::Error = StreamError::NullReference("buffer").into();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);

        let err: std::io::Error = StreamError::UnexpectedEnd.into();
        assert_eq!(err.kind(), ErrorKind::UnexpectedEof);

        let inner = std::io::Error::new(ErrorKind::BrokenPipe, "pipe");
        let err: std::io::Error = StreamError::Io(inner).into();
        assert_eq!(err.kind(), ErrorKind::BrokenPipe);

        let err: std::io::Error = StreamError::Closed.into();
        assert_eq!(err.kind(), ErrorKind::Other);
    }

    #[test]
    fn bounds_message() {
        let err = StreamError::OutOfBounds {
            offset: -1,
            length: 1,
            capacity: 4,
        };
        assert_eq!(
            err.to_string(),
            "Range [-1, -1 + 1) out of bounds for length 4"
        );
    }
}
