//! # curry-terminal
//!
//! Query and mutate terminal state through one platform-independent API.
//!
//! A [`Context`] describes one terminal session. [`init`] detects the
//! platform and acquires the native handle (a Win32 console handle or the
//! POSIX standard output descriptor); every other operation then translates
//! a uniform request into the right system call or escape sequence:
//!
//! - **Geometry**: [`get_size`], [`set_size`], [`sync_size`]
//! - **Color**: [`set_color`], [`set_color_checked`], [`reset_color`]
//! - **Attributes**: [`get_attribute`], [`set_attribute`] for echo, cursor
//!   visibility, mouse tracking and color depth
//! - **Cursor**: [`set_cursor_position`], [`set_cursor_style`]
//! - **VT flags**: [`get_vt_mode`], [`set_vt_mode`]
//!
//! ## Quick Start
//!
//! ```no_run
//! use curry_terminal::{Attribute, Context, init, set_attribute, set_color, term_print};
//!
//! let mut ctx = Context::default();
//! if let Err(e) = init(&mut ctx) {
//!     eprintln!("Error initializing terminal: {}", e.message());
//!     return;
//! }
//!
//! set_color(&mut ctx, [255u8, 0, 0]).ok();
//! term_print!("This should be red!\n").ok();
//!
//! set_attribute(&mut ctx, Attribute::MouseEnabled, true).ok();
//! ```
//!
//! ## Concurrency
//!
//! Operations are synchronous and never read terminal input. A `Context`
//! is mutated through `&mut` only; share one across threads behind a
//! `Mutex`. The standard output stream itself is shared with every other
//! writer in the process and is not locked between calls.
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events (`info` on init, `debug` for native
//! calls) and never installs a subscriber.

pub mod color;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod escape_codes;
pub mod platform;
mod sys;

pub use color::{ColorDepth, Rgb};
pub use config::InitOptions;
pub use context::{
    Attribute, AttributeValue, ConsoleHandle, Context, CursorPosition, CursorShape, CursorStyle,
    NativeHandle, State, VtMode, VtModes,
};
pub use dispatch::{
    color_depth, get_attribute, get_size, get_state, get_vt_mode, init, init_with, print,
    print_to, reset_color, reset_color_to, set_attribute, set_attribute_to, set_color,
    set_color_checked, set_color_checked_to, set_color_to, set_cursor_position,
    set_cursor_position_to, set_cursor_style, set_cursor_style_to, set_size, set_vt_mode,
    sync_size,
};
pub use error::{ErrorCode, Result, TermError};
pub use platform::Platform;

/// Formats and writes to standard output, flushing immediately.
///
/// Returns [`Result<()>`](crate::Result).
///
/// ```no_run
/// use curry_terminal::term_print;
///
/// term_print!("{} x {}\n", 80, 24)?;
/// # Ok::<(), curry_terminal::TermError>(())
/// ```
#[macro_export]
macro_rules! term_print {
    ($($arg:tt)*) => {
        $crate::dispatch::print(::std::format_args!($($arg)*))
    };
}
