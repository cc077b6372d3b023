use std::{
    io,
    num::NonZeroU16,
    os::fd::{
        AsFd,
        AsRawFd as _,
        BorrowedFd,
    },
};

use crate::{
    Console,
    Error,
    Result,
};

impl<T: AsFd> Console for T {
    fn columns(&self) -> Result<NonZeroU16> {
        columns_of(self.as_fd())
    }
}

pub fn stderr_columns() -> Result<NonZeroU16> {
    io::stderr().columns()
}

fn columns_of(fd: BorrowedFd<'_>) -> Result<NonZeroU16> {
    let mut size = libc::winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };

    // SAFETY: `fd` is open for the duration of the borrow and `size` is a
    // valid `winsize` for TIOCGWINSZ to write into.
    let status = unsafe { libc::ioctl(fd.as_raw_fd(), libc::TIOCGWINSZ, &mut size) };

    // ioctl reports success with 0 and failure with -1.
    let succeeded = status == 0;

    if !succeeded {
        let error = io::Error::last_os_error();

        return Err(match error.raw_os_error() {
            Some(libc::ENOTTY) => Error::NotATerminal,
            _ => Error::Query(error),
        });
    }

    NonZeroU16::new(size.ws_col).ok_or(Error::Empty)
}

#[cfg(test)]
mod tests {
    use std::{
        fs,
        io,
        os::fd::{
            AsFd,
            AsRawFd as _,
        },
        thread,
    };

    use nix::pty::{
        self,
        OpenptyResult,
        Winsize,
    };

    use super::*;

    fn size(columns: u16) -> Winsize {
        Winsize {
            ws_row: 24,
            ws_col: columns,
            ws_xpixel: 0,
            ws_ypixel: 0,
        }
    }

    fn open_pty(columns: u16) -> Option<OpenptyResult> {
        match pty::openpty(&size(columns), None) {
            Ok(pty) => Some(pty),
            Err(error) => {
                eprintln!("skipping, no pseudo-terminal available: {error}");
                None
            },
        }
    }

    fn resize(terminal: impl AsFd, columns: u16) {
        let size = size(columns);

        // SAFETY: `terminal` is open for the duration of the borrow and `size`
        // is a valid `winsize` for TIOCSWINSZ to read from.
        let status =
            unsafe { libc::ioctl(terminal.as_fd().as_raw_fd(), libc::TIOCSWINSZ, &size) };

        assert_eq!(status, 0, "{}", io::Error::last_os_error());
    }

    #[test]
    fn reports_pty_width() {
        let Some(pty) = open_pty(80) else {
            return;
        };

        assert_eq!(pty.slave.columns().unwrap().get(), 80);
    }

    #[test]
    fn agrees_with_terminal_size() {
        let Some(pty) = open_pty(97) else {
            return;
        };

        let (terminal_size::Width(expected), _) =
            terminal_size::terminal_size_of(&pty.slave).unwrap();

        assert_eq!(pty.slave.columns().unwrap().get(), expected);
    }

    #[test]
    fn follows_resizes() {
        let Some(pty) = open_pty(80) else {
            return;
        };

        assert_eq!(pty.slave.columns().unwrap().get(), 80);
        assert_eq!(pty.slave.columns().unwrap().get(), 80);

        resize(&pty.master, 132);
        assert_eq!(pty.slave.columns().unwrap().get(), 132);

        resize(&pty.master, 40);
        assert_eq!(pty.slave.columns().unwrap().get(), 40);
    }

    #[test]
    fn zero_columns_is_empty() {
        let Some(pty) = open_pty(0) else {
            return;
        };

        assert!(matches!(pty.slave.columns(), Err(Error::Empty)));
    }

    #[test]
    fn concurrent_queries_agree() {
        let Some(pty) = open_pty(120) else {
            return;
        };

        thread::scope(|scope| {
            let handles = (0..8)
                .map(|_| {
                    scope.spawn(|| {
                        (0..64)
                            .map(|_| pty.slave.columns().unwrap().get())
                            .collect::<Vec<_>>()
                    })
                })
                .collect::<Vec<_>>();

            for handle in handles {
                assert!(handle.join().unwrap().iter().all(|&columns| columns == 120));
            }
        });
    }

    #[test]
    fn regular_file_is_not_a_terminal() {
        let file = tempfile::tempfile().unwrap();

        assert!(matches!(file.columns(), Err(Error::NotATerminal)));
    }

    #[test]
    fn pipe_is_not_a_terminal() {
        let (reader, writer) = io::pipe().unwrap();

        assert!(matches!(reader.columns(), Err(Error::NotATerminal)));
        assert!(matches!(writer.columns(), Err(Error::NotATerminal)));
    }

    #[test]
    fn dev_null_is_not_a_terminal() {
        let null = fs::File::open("/dev/null").unwrap();

        assert!(matches!(null.columns(), Err(Error::NotATerminal)));
    }
}
