//! Queries the column width of the terminal attached to standard error.
//!
//! ```no_run
//! let width = match consolewidth::get_console_width() {
//!     0 => 80,
//!     width => width,
//! };
//! ```

use std::num::NonZeroU16;

mod error;
pub use error::*;

mod ffi;

#[cfg(unix)]
mod unix;
#[cfg(unix)]
use unix as sys;

#[cfg(windows)]
mod windows;
#[cfg(windows)]
use windows as sys;

#[cfg(not(any(unix, windows)))]
mod unsupported;
#[cfg(not(any(unix, windows)))]
use unsupported as sys;

/// A stream whose terminal geometry can be queried.
///
/// Implemented for every `AsFd` on Unix and every `AsHandle` on Windows.
pub trait Console {
    /// Returns the number of columns of the terminal behind this stream.
    ///
    /// Nothing is cached, every call issues a fresh query.
    fn columns(&self) -> Result<NonZeroU16>;
}

/// Returns the column width of the terminal attached to standard error, or the
/// reason it could not be determined.
pub fn console_width() -> Result<NonZeroU16> {
    sys::stderr_columns()
}

/// Returns the column width of the terminal attached to standard error.
///
/// Returns `0` when the width cannot be determined, for example when standard
/// error is redirected to a file or a pipe. Zero is never a real width, callers
/// should substitute their own default for it.
pub fn get_console_width() -> u16 {
    console_width().map_or(0, NonZeroU16::get)
}
