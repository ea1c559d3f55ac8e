//! ANSI escape sequences emitted by the POSIX backend.

use crate::color::Rgb;
use crate::context::{CursorPosition, CursorShape, CursorStyle};

/// SGR reset: `\x1b[0m`
pub const RESET: &str = "\x1b[0m";

/// DECTCEM show cursor: `\x1b[?25h`
pub const SHOW_CURSOR: &str = "\x1b[?25h";

/// DECTCEM hide cursor: `\x1b[?25l`
pub const HIDE_CURSOR: &str = "\x1b[?25l";

/// Enables click tracking (1000), drag tracking (1002) and SGR extended
/// mouse reports (1006).
pub const ENABLE_MOUSE: &str = "\x1b[?1000h\x1b[?1002h\x1b[?1006h";

/// Disables the modes of [`ENABLE_MOUSE`] in reverse order.
pub const DISABLE_MOUSE: &str = "\x1b[?1006l\x1b[?1002l\x1b[?1000l";

/// 24-bit foreground color: `\x1b[38;2;<r>;<g>;<b>m`
///
/// ## Examples
///
/// ```
/// use curry_terminal::color::Rgb;
/// use curry_terminal::escape_codes::foreground_rgb;
///
/// assert_eq!(foreground_rgb(Rgb::new(255, 0, 0)), "\x1b[38;2;255;0;0m");
/// ```
pub fn foreground_rgb(rgb: Rgb) -> String {
    format!("\x1b[38;2;{};{};{}m", rgb.r, rgb.g, rgb.b)
}

/// Cursor position (CUP). The terminal is 1-based, `position` is 0-based.
pub fn cursor_position(position: CursorPosition) -> String {
    format!(
        "\x1b[{};{}H",
        u64::from(position.y) + 1,
        u64::from(position.x) + 1
    )
}

/// Cursor shape (DECSCUSR): `\x1b[<n> q`
pub fn cursor_style(style: CursorStyle) -> String {
    let n = match (style.shape, style.blinking) {
        (CursorShape::Block, true) => 1,
        (CursorShape::Block, false) => 2,
        (CursorShape::Underline, true) => 3,
        (CursorShape::Underline, false) => 4,
        (CursorShape::Bar, true) => 5,
        (CursorShape::Bar, false) => 6,
    };
    format!("\x1b[{n} q")
}
