mod buffered;
mod bytes;
mod empty;
mod reader;
mod repeat;

pub use buffered::BufferedSource;
pub use bytes::BytesSource;
pub use empty::EmptySource;
pub use reader::ReaderSource;
pub use repeat::RepeatSource;
