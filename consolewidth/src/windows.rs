use std::{
    io,
    mem,
    num::NonZeroU16,
    os::windows::io::{
        AsHandle,
        AsRawHandle as _,
    },
};

use windows_sys::Win32::{
    Foundation::{
        HANDLE,
        INVALID_HANDLE_VALUE,
    },
    System::Console::{
        CONSOLE_SCREEN_BUFFER_INFO,
        GetConsoleScreenBufferInfo,
        GetStdHandle,
        SMALL_RECT,
        STD_ERROR_HANDLE,
    },
};

use crate::{
    Console,
    Error,
    Result,
};

impl<T: AsHandle> Console for T {
    fn columns(&self) -> Result<NonZeroU16> {
        columns_of(self.as_handle().as_raw_handle() as HANDLE)
    }
}

pub fn stderr_columns() -> Result<NonZeroU16> {
    // SAFETY: GetStdHandle has no preconditions.
    let handle = unsafe { GetStdHandle(STD_ERROR_HANDLE) };

    columns_of(handle)
}

fn columns_of(handle: HANDLE) -> Result<NonZeroU16> {
    if handle.is_null() || handle == INVALID_HANDLE_VALUE {
        return Err(Error::InvalidHandle);
    }

    // SAFETY: CONSOLE_SCREEN_BUFFER_INFO is plain old data.
    let mut info: CONSOLE_SCREEN_BUFFER_INFO = unsafe { mem::zeroed() };

    // SAFETY: `handle` is non-null and `info` is a valid out pointer.
    let status = unsafe { GetConsoleScreenBufferInfo(handle, &mut info) };

    // The BOOL is nonzero on success and zero on failure.
    let succeeded = status != 0;

    if !succeeded {
        return Err(Error::Query(io::Error::last_os_error()));
    }

    window_columns(info.srWindow)
}

fn window_columns(window: SMALL_RECT) -> Result<NonZeroU16> {
    // Left and right are both inclusive.
    let columns = i32::from(window.Right) - i32::from(window.Left) + 1;

    u16::try_from(columns)
        .ok()
        .and_then(NonZeroU16::new)
        .ok_or(Error::Empty)
}
