//! Native backends, selected at compile time.
//!
//! Every backend exposes the same functions:
//!
//! - `acquire_handle() -> Result<NativeHandle>`
//! - `apply_color` / `reset_color`
//! - `set_echo`, `set_mouse`, `set_cursor_visible`
//! - `move_cursor`, `set_cursor_style`
//! - `set_virtual_terminal`
//!
//! Writers passed to a backend receive escape sequences on POSIX targets;
//! the Windows backend talks to the console API instead and ignores them.

#[cfg(unix)]
mod unix;
#[cfg(unix)]
pub(crate) use unix::*;

#[cfg(windows)]
mod win32;
#[cfg(windows)]
pub(crate) use win32::*;

#[cfg(not(any(unix, windows)))]
mod unsupported;
#[cfg(not(any(unix, windows)))]
pub(crate) use unsupported::*;
