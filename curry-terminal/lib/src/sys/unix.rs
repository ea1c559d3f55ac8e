//! POSIX backend: a file descriptor, termios, and ANSI escape sequences.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::os::unix::io::AsRawFd;

use crate::color::Rgb;
use crate::context::{CursorPosition, CursorStyle, NativeHandle};
use crate::error::{Result, TermError};
use crate::escape_codes;

pub(crate) fn acquire_handle() -> Result<NativeHandle> {
    acquire_descriptor(libc::STDOUT_FILENO)
}

pub(crate) fn acquire_descriptor(fd: i32) -> Result<NativeHandle> {
    // F_GETFD fails with EBADF when the descriptor is closed
    if unsafe { libc::fcntl(fd, libc::F_GETFD) } == -1 {
        let err = io::Error::last_os_error();
        tracing::debug!(fd, error = %err, "acquire_handle(): descriptor unusable");
        return Err(TermError::init_failed(format!(
            "output descriptor {fd} is not open: {err}"
        )));
    }

    tracing::debug!(fd, "acquire_handle(): using output descriptor");
    Ok(NativeHandle::Descriptor(fd))
}

fn descriptor(handle: &NativeHandle) -> Result<i32> {
    handle
        .descriptor()
        .ok_or_else(|| TermError::invalid_state("context does not hold a file descriptor"))
}

fn emit(out: &mut dyn Write, sequence: &str, what: &str) -> Result<()> {
    out.write_all(sequence.as_bytes())
        .and_then(|_| out.flush())
        .map_err(|e| TermError::io(what, e))
}

pub(crate) fn apply_color(handle: &NativeHandle, rgb: Rgb, out: &mut dyn Write) -> Result<()> {
    descriptor(handle)?;
    emit(out, &escape_codes::foreground_rgb(rgb), "failed to write color sequence")
}

pub(crate) fn reset_color(handle: &NativeHandle, out: &mut dyn Write) -> Result<()> {
    descriptor(handle)?;
    emit(out, escape_codes::RESET, "failed to write reset sequence")
}

/// Toggles the termios `ECHO` flag on the input terminal.
///
/// Echo belongs to the terminal keystrokes come from, not to the output
/// descriptor held in the context: standard input when it is a TTY,
/// otherwise the controlling terminal. A process with neither has nothing
/// that echoes, so the request is tracked without a system call.
pub(crate) fn set_echo(handle: &NativeHandle, enabled: bool) -> Result<()> {
    descriptor(handle)?;

    let stdin = libc::STDIN_FILENO;
    if unsafe { libc::isatty(stdin) } == 1 {
        return set_termios_echo(stdin, enabled);
    }

    match OpenOptions::new().read(true).write(true).open("/dev/tty") {
        Ok(tty) => set_termios_echo(tty.as_raw_fd(), enabled),
        Err(e) => {
            tracing::debug!(enabled, error = %e, "set_echo(): no input terminal, tracking only");
            Ok(())
        }
    }
}

fn set_termios_echo(fd: i32, enabled: bool) -> Result<()> {
    let mut termios: libc::termios = unsafe { std::mem::zeroed() };
    if unsafe { libc::tcgetattr(fd, &mut termios) } != 0 {
        return Err(TermError::invalid_state(format!(
            "tcgetattr failed on descriptor {fd}: {}",
            io::Error::last_os_error()
        )));
    }

    if enabled {
        termios.c_lflag |= libc::ECHO;
    } else {
        termios.c_lflag &= !libc::ECHO;
    }

    if unsafe { libc::tcsetattr(fd, libc::TCSANOW, &termios) } != 0 {
        return Err(TermError::invalid_state(format!(
            "tcsetattr failed on descriptor {fd}: {}",
            io::Error::last_os_error()
        )));
    }

    tracing::debug!(fd, enabled, "set_echo(): updated termios");
    Ok(())
}

pub(crate) fn set_mouse(handle: &NativeHandle, enabled: bool, out: &mut dyn Write) -> Result<()> {
    descriptor(handle)?;
    let sequence = if enabled {
        escape_codes::ENABLE_MOUSE
    } else {
        escape_codes::DISABLE_MOUSE
    };
    emit(out, sequence, "failed to write mouse tracking sequence")
}

pub(crate) fn set_cursor_visible(
    handle: &NativeHandle,
    visible: bool,
    out: &mut dyn Write,
) -> Result<()> {
    descriptor(handle)?;
    let sequence = if visible {
        escape_codes::SHOW_CURSOR
    } else {
        escape_codes::HIDE_CURSOR
    };
    emit(out, sequence, "failed to write cursor visibility sequence")
}

pub(crate) fn move_cursor(
    handle: &NativeHandle,
    position: CursorPosition,
    out: &mut dyn Write,
) -> Result<()> {
    descriptor(handle)?;
    emit(
        out,
        &escape_codes::cursor_position(position),
        "failed to write cursor position sequence",
    )
}

pub(crate) fn set_cursor_style(
    handle: &NativeHandle,
    style: CursorStyle,
    out: &mut dyn Write,
) -> Result<()> {
    descriptor(handle)?;
    emit(
        out,
        &escape_codes::cursor_style(style),
        "failed to write cursor style sequence",
    )
}

/// POSIX terminals interpret escape sequences natively; only the flag changes.
pub(crate) fn set_virtual_terminal(handle: &NativeHandle, enabled: bool) -> Result<()> {
    let fd = descriptor(handle)?;
    tracing::debug!(fd, enabled, "set_virtual_terminal(): no native call on POSIX");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquires_stdout_descriptor() {
        let handle = acquire_handle().unwrap();
        assert_eq!(handle, NativeHandle::Descriptor(libc::STDOUT_FILENO));
    }

    #[test]
    fn rejects_non_descriptor_handles() {
        let mut out = Vec::new();
        let err = apply_color(&NativeHandle::None, Rgb::new(1, 2, 3), &mut out).unwrap_err();
        assert_eq!(err.code(), crate::error::ErrorCode::InvalidState);
        assert!(out.is_empty());
    }

    #[test]
    fn color_is_written_and_flushed() {
        let mut out = Vec::new();
        apply_color(&NativeHandle::Descriptor(1), Rgb::new(255, 0, 0), &mut out).unwrap();
        assert_eq!(out, b"\x1b[38;2;255;0;0m");
    }

    /// A pseudoterminal pair; the slave behaves like a real input terminal.
    struct Pty {
        master: i32,
        slave: i32,
    }

    impl Pty {
        fn open() -> Self {
            let (mut master, mut slave) = (0, 0);
            let rc = unsafe {
                libc::openpty(
                    &mut master,
                    &mut slave,
                    std::ptr::null_mut(),
                    std::ptr::null(),
                    std::ptr::null(),
                )
            };
            assert_eq!(rc, 0, "openpty: {}", io::Error::last_os_error());
            Self { master, slave }
        }

        fn echoes(&self) -> bool {
            let mut termios: libc::termios = unsafe { std::mem::zeroed() };
            assert_eq!(unsafe { libc::tcgetattr(self.slave, &mut termios) }, 0);
            termios.c_lflag & libc::ECHO != 0
        }
    }

    impl Drop for Pty {
        fn drop(&mut self) {
            unsafe {
                libc::close(self.slave);
                libc::close(self.master);
            }
        }
    }

    #[test]
    #[serial_test::serial]
    fn termios_echo_toggles_on_a_pty() {
        let pty = Pty::open();

        set_termios_echo(pty.slave, false).unwrap();
        assert!(!pty.echoes());

        set_termios_echo(pty.slave, true).unwrap();
        assert!(pty.echoes());
    }

    #[test]
    #[serial_test::serial]
    fn termios_echo_on_a_pipe_is_invalid_state() {
        let mut fds = [0; 2];
        assert_eq!(unsafe { libc::pipe(fds.as_mut_ptr()) }, 0);

        let result = set_termios_echo(fds[0], false);

        unsafe {
            libc::close(fds[0]);
            libc::close(fds[1]);
        }
        assert_eq!(result.unwrap_err().code(), crate::error::ErrorCode::InvalidState);
    }

    /// Swaps fd 0 for a pty slave so the output descriptor and the input
    /// terminal differ, as they do when stdout is redirected.
    #[test]
    #[serial_test::serial]
    fn echo_targets_the_input_terminal_not_stdout() {
        let pty = Pty::open();
        let saved_stdin = unsafe { libc::dup(libc::STDIN_FILENO) };
        assert!(saved_stdin >= 0);
        assert_eq!(unsafe { libc::dup2(pty.slave, libc::STDIN_FILENO) }, libc::STDIN_FILENO);

        let mut fds = [0; 2];
        assert_eq!(unsafe { libc::pipe(fds.as_mut_ptr()) }, 0);
        let redirected_stdout = NativeHandle::Descriptor(fds[1]);

        let disabled = set_echo(&redirected_stdout, false);
        let echo_after_disable = pty.echoes();
        let enabled = set_echo(&redirected_stdout, true);
        let echo_after_enable = pty.echoes();

        unsafe {
            libc::dup2(saved_stdin, libc::STDIN_FILENO);
            libc::close(saved_stdin);
            libc::close(fds[0]);
            libc::close(fds[1]);
        }

        disabled.unwrap();
        enabled.unwrap();
        assert!(!echo_after_disable);
        assert!(echo_after_enable);
    }

    #[test]
    fn closed_descriptor_fails_to_acquire() {
        let err = acquire_descriptor(-1).unwrap_err();
        assert_eq!(err.code(), crate::error::ErrorCode::InitFailed);
        assert!(err.message().contains("not open"), "{}", err.message());
    }

    #[test]
    fn write_failures_become_invalid_state() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let err = reset_color(&NativeHandle::Descriptor(1), &mut Broken).unwrap_err();
        assert_eq!(err.code(), crate::error::ErrorCode::InvalidState);
        assert!(err.message().contains("closed"));
    }
}
