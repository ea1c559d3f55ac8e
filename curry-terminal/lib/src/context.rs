//! The terminal session record.
//!
//! A [`Context`] starts zero-valued (Uninitialized) and is populated in place
//! by [`init`](crate::dispatch::init). Every other operation requires the
//! Initialized state. Fields are read through accessors; all mutation goes
//! through the dispatcher so that `size == width * height` always holds.

use std::ffi::c_void;

use serde::{Deserialize, Serialize};

use crate::color::{ColorDepth, Rgb};
use crate::platform::Platform;

/// Geometry used by `init` when none is set.
pub const DEFAULT_WIDTH: u32 = 80;
/// Geometry used by `init` when none is set.
pub const DEFAULT_HEIGHT: u32 = 24;

/// Selects one capability for [`get_attribute`](crate::dispatch::get_attribute)
/// and [`set_attribute`](crate::dispatch::set_attribute).
///
/// Each variant names a distinct property; this is not a bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    EchoOn,
    EchoOff,
    CursorVisible,
    MouseEnabled,
    MouseDisabled,
    ColorDepth,
}

/// The value of an [`Attribute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeValue {
    /// A boolean capability flag
    Flag(bool),
    /// The `ColorDepth` scalar
    Depth(ColorDepth),
}

impl AttributeValue {
    pub fn as_flag(self) -> Option<bool> {
        match self {
            AttributeValue::Flag(flag) => Some(flag),
            AttributeValue::Depth(_) => None,
        }
    }

    pub fn as_depth(self) -> Option<ColorDepth> {
        match self {
            AttributeValue::Depth(depth) => Some(depth),
            AttributeValue::Flag(_) => None,
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(flag: bool) -> Self {
        AttributeValue::Flag(flag)
    }
}

impl From<ColorDepth> for AttributeValue {
    fn from(depth: ColorDepth) -> Self {
        AttributeValue::Depth(depth)
    }
}

/// A Win32 console handle plus the text attributes it had at `init`.
///
/// The raw handle is pointer-sized and stored as such.
#[derive(Debug, PartialEq, Eq)]
pub struct ConsoleHandle {
    raw: *mut c_void,
    default_attributes: u16,
    quick_edit: bool,
}

// The handle is an opaque OS token; the console serializes access to it.
unsafe impl Send for ConsoleHandle {}

impl ConsoleHandle {
    #[cfg_attr(not(windows), allow(dead_code))]
    pub(crate) fn new(raw: *mut c_void, default_attributes: u16, quick_edit: bool) -> Self {
        Self {
            raw,
            default_attributes,
            quick_edit,
        }
    }

    /// The raw `HANDLE` value.
    pub fn as_raw(&self) -> *mut c_void {
        self.raw
    }

    /// Console text attributes captured when the handle was acquired.
    pub fn default_attributes(&self) -> u16 {
        self.default_attributes
    }

    /// Whether the input console had quick-edit on when the handle was
    /// acquired; disabling the mouse restores this.
    pub fn quick_edit(&self) -> bool {
        self.quick_edit
    }
}

/// The OS-level handle a context drives.
///
/// Owned exclusively by [`State`]; deliberately neither `Clone` nor `Copy`.
#[derive(Debug, Default, PartialEq, Eq)]
pub enum NativeHandle {
    /// Not yet acquired
    #[default]
    None,
    /// Windows console output handle
    Console(ConsoleHandle),
    /// POSIX file descriptor
    Descriptor(i32),
}

impl NativeHandle {
    /// Whether this variant is the one `platform` uses.
    pub fn matches(&self, platform: Platform) -> bool {
        match self {
            NativeHandle::None => false,
            NativeHandle::Console(_) => platform == Platform::Windows,
            NativeHandle::Descriptor(fd) => *fd >= 0 && platform.is_posix(),
        }
    }

    /// The file descriptor, if this is a POSIX handle.
    pub fn descriptor(&self) -> Option<i32> {
        match self {
            NativeHandle::Descriptor(fd) => Some(*fd),
            _ => None,
        }
    }

    /// The console handle, if this is a Windows handle.
    pub fn console(&self) -> Option<&ConsoleHandle> {
        match self {
            NativeHandle::Console(console) => Some(console),
            _ => None,
        }
    }
}

/// Zero-based cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CursorPosition {
    pub x: u32,
    pub y: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CursorShape {
    #[default]
    Block,
    Underline,
    Bar,
}

/// Cursor shape and blink; the default is a blinking block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CursorStyle {
    pub shape: CursorShape,
    pub blinking: bool,
}

impl Default for CursorStyle {
    fn default() -> Self {
        Self {
            shape: CursorShape::Block,
            blinking: true,
        }
    }
}

/// Terminal emulation levels tracked as flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VtMode {
    /// Virtual terminal sequence processing
    Vt,
    Vt100,
    Vt200,
    Vt300,
    Vt400,
}

/// Enable/disable flags for each [`VtMode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VtModes {
    pub vt: bool,
    pub vt100: bool,
    pub vt200: bool,
    pub vt300: bool,
    pub vt400: bool,
}

impl VtModes {
    pub fn get(&self, mode: VtMode) -> bool {
        match mode {
            VtMode::Vt => self.vt,
            VtMode::Vt100 => self.vt100,
            VtMode::Vt200 => self.vt200,
            VtMode::Vt300 => self.vt300,
            VtMode::Vt400 => self.vt400,
        }
    }

    pub fn set(&mut self, mode: VtMode, enabled: bool) {
        let flag = match mode {
            VtMode::Vt => &mut self.vt,
            VtMode::Vt100 => &mut self.vt100,
            VtMode::Vt200 => &mut self.vt200,
            VtMode::Vt300 => &mut self.vt300,
            VtMode::Vt400 => &mut self.vt400,
        };
        *flag = enabled;
    }
}

/// Mutable session record.
#[derive(Debug, Default)]
pub struct State {
    pub(crate) handle: NativeHandle,
    pub(crate) initialized: bool,
    pub(crate) input_echo: bool,
    pub(crate) cursor_visible: bool,
    pub(crate) mouse_enabled: bool,
    pub(crate) mouse_pressed: bool,
    pub(crate) color_depth: ColorDepth,
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) size: u64,
    pub(crate) cursor: CursorPosition,
    pub(crate) cursor_style: CursorStyle,
    pub(crate) vt: VtModes,
    pub(crate) foreground: Option<Rgb>,
}

impl State {
    pub fn handle(&self) -> &NativeHandle {
        &self.handle
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Whether typed input is echoed back.
    pub fn input_echo(&self) -> bool {
        self.input_echo
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    pub fn mouse_enabled(&self) -> bool {
        self.mouse_enabled
    }

    pub fn mouse_pressed(&self) -> bool {
        self.mouse_pressed
    }

    pub fn color_depth(&self) -> ColorDepth {
        self.color_depth
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of cells: always `width * height`.
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn cursor(&self) -> CursorPosition {
        self.cursor
    }

    pub fn cursor_style(&self) -> CursorStyle {
        self.cursor_style
    }

    pub fn vt_modes(&self) -> VtModes {
        self.vt
    }

    /// The last foreground color applied, if any.
    pub fn foreground(&self) -> Option<Rgb> {
        self.foreground
    }

    pub(crate) fn set_geometry(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.size = u64::from(width) * u64::from(height);
    }
}

/// The caller-visible handle on one terminal session.
///
/// ## Examples
///
/// ```
/// use curry_terminal::{Context, Platform};
///
/// let ctx = Context::default();
/// assert_eq!(ctx.platform(), Platform::Unknown);
/// assert!(!ctx.is_initialized());
/// ```
#[derive(Debug, Default)]
pub struct Context {
    pub(crate) platform: Platform,
    pub(crate) state: State,
}

impl Context {
    /// A zero-valued, Uninitialized context.
    pub fn new() -> Self {
        Self::default()
    }

    /// An Uninitialized context whose geometry `init` will keep.
    ///
    /// A zero dimension leaves geometry unset, so `init` applies its defaults.
    pub fn with_geometry(width: u32, height: u32) -> Self {
        let mut ctx = Self::default();
        if width > 0 && height > 0 {
            ctx.state.set_geometry(width, height);
        }
        ctx
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn is_initialized(&self) -> bool {
        self.state.initialized
    }

    pub fn width(&self) -> u32 {
        self.state.width
    }

    pub fn height(&self) -> u32 {
        self.state.height
    }
}
