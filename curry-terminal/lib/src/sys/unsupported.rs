//! Fallback for targets with neither a console API nor POSIX descriptors.

use std::io::Write;

use crate::color::Rgb;
use crate::context::{CursorPosition, CursorStyle, NativeHandle};
use crate::error::{Result, TermError};

fn unsupported<T>(operation: &str) -> Result<T> {
    Err(TermError::unknown_platform(format!(
        "{operation}: no terminal backend for target '{}'",
        std::env::consts::OS
    )))
}

pub(crate) fn acquire_handle() -> Result<NativeHandle> {
    unsupported("acquire_handle")
}

pub(crate) fn apply_color(_: &NativeHandle, _: Rgb, _: &mut dyn Write) -> Result<()> {
    unsupported("apply_color")
}

pub(crate) fn reset_color(_: &NativeHandle, _: &mut dyn Write) -> Result<()> {
    unsupported("reset_color")
}

pub(crate) fn set_echo(_: &NativeHandle, _: bool) -> Result<()> {
    unsupported("set_echo")
}

pub(crate) fn set_mouse(_: &NativeHandle, _: bool, _: &mut dyn Write) -> Result<()> {
    unsupported("set_mouse")
}

pub(crate) fn set_cursor_visible(_: &NativeHandle, _: bool, _: &mut dyn Write) -> Result<()> {
    unsupported("set_cursor_visible")
}

pub(crate) fn move_cursor(_: &NativeHandle, _: CursorPosition, _: &mut dyn Write) -> Result<()> {
    unsupported("move_cursor")
}

pub(crate) fn set_cursor_style(_: &NativeHandle, _: CursorStyle, _: &mut dyn Write) -> Result<()> {
    unsupported("set_cursor_style")
}

pub(crate) fn set_virtual_terminal(_: &NativeHandle, _: bool) -> Result<()> {
    unsupported("set_virtual_terminal")
}
