use std::{
    io,
    result,
};

pub type Result<T> = result::Result<T, Error>;

/// Why the width of a terminal could not be determined.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("stream is not attached to a terminal")]
    NotATerminal,

    #[error("stream has no usable handle")]
    InvalidHandle,

    #[error("failed to query terminal geometry")]
    Query(#[source] io::Error),

    #[error("terminal reported a window without columns")]
    Empty,

    #[error("terminal geometry cannot be queried on this platform")]
    Unsupported,
}
