//! Windows backend: the Win32 console API.

use std::io::Write;

use ::windows::Win32::Foundation::HANDLE;
use ::windows::Win32::System::Console::{
    CONSOLE_CHARACTER_ATTRIBUTES, CONSOLE_CURSOR_INFO, CONSOLE_MODE, CONSOLE_SCREEN_BUFFER_INFO,
    COORD, ENABLE_ECHO_INPUT, ENABLE_EXTENDED_FLAGS, ENABLE_LINE_INPUT, ENABLE_MOUSE_INPUT,
    ENABLE_QUICK_EDIT_MODE, ENABLE_VIRTUAL_TERMINAL_PROCESSING, GetConsoleCursorInfo,
    GetConsoleMode, GetConsoleScreenBufferInfo, GetStdHandle, STD_HANDLE, STD_INPUT_HANDLE,
    STD_OUTPUT_HANDLE, SetConsoleCursorInfo, SetConsoleCursorPosition, SetConsoleMode,
    SetConsoleTextAttribute,
};

use crate::color::{Rgb, console_attribute};
use crate::context::{ConsoleHandle, CursorPosition, CursorShape, CursorStyle, NativeHandle};
use crate::error::{Result, TermError};

/// Gray on black, the console default when the buffer cannot be queried.
const FALLBACK_ATTRIBUTES: u16 = 0x0007;

fn std_handle(which: STD_HANDLE, name: &str) -> std::result::Result<HANDLE, String> {
    let handle = unsafe { GetStdHandle(which) }
        .map_err(|e| format!("GetStdHandle({name}) failed: {e}"))?;
    if handle.is_invalid() || handle.0.is_null() {
        return Err(format!("process has no {name} console handle"));
    }
    Ok(handle)
}

pub(crate) fn acquire_handle() -> Result<NativeHandle> {
    let handle = std_handle(STD_OUTPUT_HANDLE, "STD_OUTPUT_HANDLE").map_err(TermError::init_failed)?;

    let mut info = CONSOLE_SCREEN_BUFFER_INFO::default();
    let default_attributes = match unsafe { GetConsoleScreenBufferInfo(handle, &mut info) } {
        Ok(()) => info.wAttributes.0,
        Err(e) => {
            tracing::debug!(error = %e, "acquire_handle(): no screen buffer info, using gray on black");
            FALLBACK_ATTRIBUTES
        }
    };

    let quick_edit = std_handle(STD_INPUT_HANDLE, "STD_INPUT_HANDLE")
        .ok()
        .and_then(console_mode)
        .is_some_and(|mode| mode.0 & ENABLE_QUICK_EDIT_MODE.0 != 0);

    tracing::debug!(
        handle = ?handle.0,
        default_attributes = format_args!("0x{default_attributes:04X}"),
        quick_edit,
        "acquire_handle(): using console output handle"
    );
    Ok(NativeHandle::Console(ConsoleHandle::new(
        handle.0,
        default_attributes,
        quick_edit,
    )))
}

fn output(handle: &NativeHandle) -> Result<(HANDLE, u16)> {
    handle
        .console()
        .map(|console| (HANDLE(console.as_raw()), console.default_attributes()))
        .ok_or_else(|| TermError::invalid_state("context does not hold a console handle"))
}

/// The current mode, or `None` when `handle` is not a console (a pipe or file).
fn console_mode(handle: HANDLE) -> Option<CONSOLE_MODE> {
    let mut mode = CONSOLE_MODE(0);
    unsafe { GetConsoleMode(handle, &mut mode) }.ok().map(|_| mode)
}

/// Sets `set` and clears `clear` in a console handle's mode.
///
/// Redirected handles have no mode, so the request is tracked only.
fn update_mode(handle: HANDLE, set: u32, clear: u32, what: &str) -> Result<()> {
    let Some(mode) = console_mode(handle) else {
        tracing::debug!("{what}: not a console, tracking only");
        return Ok(());
    };

    let new_mode = CONSOLE_MODE((mode.0 & !clear) | set);
    unsafe { SetConsoleMode(handle, new_mode) }
        .map_err(|e| TermError::invalid_state(format!("{what}: SetConsoleMode failed: {e}")))?;

    tracing::debug!(
        old_mode = format_args!("0x{:08X}", mode.0),
        new_mode = format_args!("0x{:08X}", new_mode.0),
        "{what}: console mode updated"
    );
    Ok(())
}

fn update_input_mode(set: u32, clear: u32, what: &str) -> Result<()> {
    let input = std_handle(STD_INPUT_HANDLE, "STD_INPUT_HANDLE").map_err(TermError::invalid_state)?;
    update_mode(input, set, clear, what)
}

fn set_text_attribute(handle: HANDLE, attribute: u16, what: &str) -> Result<()> {
    if console_mode(handle).is_none() {
        tracing::debug!("{what}: not a console, tracking only");
        return Ok(());
    }
    unsafe { SetConsoleTextAttribute(handle, CONSOLE_CHARACTER_ATTRIBUTES(attribute)) }
        .map_err(|e| TermError::invalid_state(format!("{what}: SetConsoleTextAttribute failed: {e}")))
}

/// Quantizes `rgb` to the nearest of the 16 console colors.
pub(crate) fn apply_color(handle: &NativeHandle, rgb: Rgb, _out: &mut dyn Write) -> Result<()> {
    let (console, base) = output(handle)?;
    let attribute = console_attribute(rgb, base);
    tracing::debug!(%rgb, attribute = format_args!("0x{attribute:04X}"), "apply_color(): console attribute");
    set_text_attribute(console, attribute, "apply_color")
}

pub(crate) fn reset_color(handle: &NativeHandle, _out: &mut dyn Write) -> Result<()> {
    let (console, base) = output(handle)?;
    set_text_attribute(console, base, "reset_color")
}

/// Echo requires line input, so enabling echo enables both.
pub(crate) fn set_echo(handle: &NativeHandle, enabled: bool) -> Result<()> {
    output(handle)?;
    if enabled {
        update_input_mode(ENABLE_ECHO_INPUT.0 | ENABLE_LINE_INPUT.0, 0, "set_echo")
    } else {
        update_input_mode(0, ENABLE_ECHO_INPUT.0, "set_echo")
    }
}

/// Input-mode bits to `(set, clear)` for a mouse request.
///
/// Quick-edit swallows mouse events, so it is off while the mouse is
/// enabled and returns to its state at acquisition afterwards.
fn mouse_mode_bits(enabled: bool, quick_edit: bool) -> (u32, u32) {
    let quick = ENABLE_QUICK_EDIT_MODE.0;
    match (enabled, quick_edit) {
        (true, _) => (ENABLE_MOUSE_INPUT.0 | ENABLE_EXTENDED_FLAGS.0, quick),
        (false, true) => (ENABLE_EXTENDED_FLAGS.0 | quick, ENABLE_MOUSE_INPUT.0),
        (false, false) => (ENABLE_EXTENDED_FLAGS.0, ENABLE_MOUSE_INPUT.0 | quick),
    }
}

pub(crate) fn set_mouse(handle: &NativeHandle, enabled: bool, _out: &mut dyn Write) -> Result<()> {
    let quick_edit = handle
        .console()
        .map(ConsoleHandle::quick_edit)
        .ok_or_else(|| TermError::invalid_state("context does not hold a console handle"))?;
    let (set, clear) = mouse_mode_bits(enabled, quick_edit);
    update_input_mode(set, clear, "set_mouse")
}

fn update_cursor_info(
    handle: &NativeHandle,
    what: &str,
    apply: impl FnOnce(&mut CONSOLE_CURSOR_INFO),
) -> Result<()> {
    let (console, _) = output(handle)?;
    if console_mode(console).is_none() {
        tracing::debug!("{what}: not a console, tracking only");
        return Ok(());
    }
    let mut info = CONSOLE_CURSOR_INFO::default();
    unsafe { GetConsoleCursorInfo(console, &mut info) }
        .map_err(|e| TermError::invalid_state(format!("{what}: GetConsoleCursorInfo failed: {e}")))?;
    apply(&mut info);
    unsafe { SetConsoleCursorInfo(console, &info) }
        .map_err(|e| TermError::invalid_state(format!("{what}: SetConsoleCursorInfo failed: {e}")))
}

pub(crate) fn set_cursor_visible(
    handle: &NativeHandle,
    visible: bool,
    _out: &mut dyn Write,
) -> Result<()> {
    update_cursor_info(handle, "set_cursor_visible", |info| {
        info.bVisible = visible.into();
    })
}

/// The console cursor is a horizontal bar filling 1-100% of the cell.
/// Bars are drawn as underlines and blinking is not configurable.
pub(crate) fn set_cursor_style(
    handle: &NativeHandle,
    style: CursorStyle,
    _out: &mut dyn Write,
) -> Result<()> {
    let percent = match style.shape {
        CursorShape::Block => 100,
        CursorShape::Underline | CursorShape::Bar => 25,
    };
    update_cursor_info(handle, "set_cursor_style", |info| {
        info.dwSize = percent;
    })
}

pub(crate) fn move_cursor(
    handle: &NativeHandle,
    position: CursorPosition,
    _out: &mut dyn Write,
) -> Result<()> {
    let (console, _) = output(handle)?;
    let coord = match (i16::try_from(position.x), i16::try_from(position.y)) {
        (Ok(x), Ok(y)) => COORD { X: x, Y: y },
        _ => {
            return Err(TermError::invalid_size(format!(
                "cursor position ({}, {}) exceeds the console coordinate range",
                position.x, position.y
            )));
        }
    };
    if console_mode(console).is_none() {
        tracing::debug!("move_cursor: not a console, tracking only");
        return Ok(());
    }
    unsafe { SetConsoleCursorPosition(console, coord) }
        .map_err(|e| TermError::invalid_state(format!("move_cursor: SetConsoleCursorPosition failed: {e}")))
}

pub(crate) fn set_virtual_terminal(handle: &NativeHandle, enabled: bool) -> Result<()> {
    let (console, _) = output(handle)?;
    if enabled {
        update_mode(console, ENABLE_VIRTUAL_TERMINAL_PROCESSING.0, 0, "set_virtual_terminal")
    } else {
        update_mode(console, 0, ENABLE_VIRTUAL_TERMINAL_PROCESSING.0, "set_virtual_terminal")
    }
}
