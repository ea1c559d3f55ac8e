//! Platform dispatcher: the operations that read and mutate a [`Context`].
//!
//! A context moves from Uninitialized to Initialized exactly once, through
//! [`init`]. Every other operation fails with
//! [`ErrorCode::InvalidState`](crate::ErrorCode::InvalidState) before that.
//! Mutators either apply their full effect or leave the context untouched:
//! the native call happens first and state is written only on success.
//!
//! Operations that emit escape sequences come in pairs: the plain form
//! writes to standard output, the `_to` form writes to any [`Write`]r.
//!
//! ## Examples
//!
//! ```no_run
//! use curry_terminal::{Context, init, set_color, set_size, get_size};
//!
//! let mut ctx = Context::default();
//! init(&mut ctx)?;
//! set_size(&mut ctx, 80, 24)?;
//! assert_eq!(get_size(&ctx)?, 1920);
//! set_color(&mut ctx, [255u8, 0, 0])?;
//! # Ok::<(), curry_terminal::TermError>(())
//! ```

use std::fmt;
use std::io::{self, Write};

use terminal_size::{Height, Width, terminal_size};

use crate::color::{ColorDepth, Rgb, detect_color_depth};
use crate::config::InitOptions;
use crate::context::{
    Attribute, AttributeValue, Context, CursorPosition, CursorStyle, NativeHandle, State, VtMode,
};
use crate::error::{Result, TermError};
use crate::platform::{Platform, detect_platform};
use crate::sys;

/// The handle of an Initialized context.
fn initialized<'a>(ctx: &'a Context, operation: &str) -> Result<&'a NativeHandle> {
    if !ctx.state.initialized {
        return Err(TermError::not_initialized(operation));
    }
    if !ctx.state.handle.matches(ctx.platform) {
        return Err(TermError::invalid_state(format!(
            "{operation}: native handle does not match platform {}",
            ctx.platform
        )));
    }
    Ok(&ctx.state.handle)
}

fn window_size() -> Option<(u32, u32)> {
    terminal_size()
        .map(|(Width(w), Height(h))| (u32::from(w), u32::from(h)))
        .filter(|(w, h)| *w > 0 && *h > 0)
}

/// Initializes `ctx` with the default [`InitOptions`].
///
/// Detects the platform, acquires the standard output handle, enables echo
/// and cursor visibility, disables the mouse, detects the color depth, and
/// sets an 80x24 geometry unless the context already has one.
///
/// ## Errors
///
/// - `UnknownPlatform` when the compile target is not a supported platform
/// - `InitFailed` when the standard output handle is invalid
pub fn init(ctx: &mut Context) -> Result<()> {
    init_with(ctx, &InitOptions::default())
}

/// Initializes `ctx` using `options` for geometry and color depth.
///
/// Calling this on an Initialized context is a no-op.
pub fn init_with(ctx: &mut Context, options: &InitOptions) -> Result<()> {
    init_from(ctx, options, sys::acquire_handle)
}

fn init_from(
    ctx: &mut Context,
    options: &InitOptions,
    acquire: impl FnOnce() -> Result<NativeHandle>,
) -> Result<()> {
    if ctx.state.initialized {
        tracing::debug!(platform = %ctx.platform, "init(): context already initialized");
        return Ok(());
    }

    let platform = detect_platform();
    if platform == Platform::Unknown {
        return Err(TermError::unknown_platform(format!(
            "no supported terminal platform for target '{}'",
            std::env::consts::OS
        )));
    }

    let handle = acquire()?;
    if !handle.matches(platform) {
        return Err(TermError::init_failed(format!(
            "acquired handle {handle:?} is not valid for {platform}"
        )));
    }

    let (width, height, geometry_source) = if ctx.state.width > 0 && ctx.state.height > 0 {
        (ctx.state.width, ctx.state.height, "context")
    } else if let Some((w, h)) = options.query_size.then(window_size).flatten() {
        (w, h, "window")
    } else {
        let (w, h) = options.fallback_geometry();
        (w, h, "default")
    };

    let (color_depth, depth_source) = match options.color_depth {
        Some(depth) => (depth, "options"),
        None => (detect_color_depth(), "detected"),
    };

    ctx.platform = platform;
    ctx.state = State {
        handle,
        initialized: true,
        input_echo: true,
        cursor_visible: true,
        mouse_enabled: false,
        mouse_pressed: false,
        color_depth,
        cursor: CursorPosition::default(),
        cursor_style: CursorStyle::default(),
        vt: Default::default(),
        foreground: None,
        width: 0,
        height: 0,
        size: 0,
    };
    ctx.state.set_geometry(width, height);

    tracing::info!(
        %platform,
        width,
        height,
        geometry_source,
        ?color_depth,
        depth_source,
        "Terminal context initialized"
    );
    Ok(())
}

/// The session record of an Initialized context.
pub fn get_state(ctx: &Context) -> Result<&State> {
    initialized(ctx, "get_state")?;
    Ok(&ctx.state)
}

/// The current value of `attribute`.
///
/// `EchoOff` and `MouseDisabled` read as the negation of `EchoOn` and
/// `MouseEnabled`; `ColorDepth` returns the stored depth.
pub fn get_attribute(ctx: &Context, attribute: Attribute) -> Result<AttributeValue> {
    initialized(ctx, "get_attribute")?;
    let state = &ctx.state;
    Ok(match attribute {
        Attribute::EchoOn => AttributeValue::Flag(state.input_echo),
        Attribute::EchoOff => AttributeValue::Flag(!state.input_echo),
        Attribute::CursorVisible => AttributeValue::Flag(state.cursor_visible),
        Attribute::MouseEnabled => AttributeValue::Flag(state.mouse_enabled),
        Attribute::MouseDisabled => AttributeValue::Flag(!state.mouse_enabled),
        Attribute::ColorDepth => AttributeValue::Depth(state.color_depth),
    })
}

/// Sets `attribute`, issuing the native call the platform requires.
pub fn set_attribute(
    ctx: &mut Context,
    attribute: Attribute,
    value: impl Into<AttributeValue>,
) -> Result<()> {
    set_attribute_to(ctx, attribute, value, &mut io::stdout())
}

/// [`set_attribute`], writing any escape sequences to `out`.
///
/// ## Errors
///
/// `InvalidState` when the context is Uninitialized, when `value` has the
/// wrong kind for `attribute` (a depth for a flag or vice versa), or when
/// the native call fails.
pub fn set_attribute_to(
    ctx: &mut Context,
    attribute: Attribute,
    value: impl Into<AttributeValue>,
    out: &mut dyn Write,
) -> Result<()> {
    let handle = initialized(ctx, "set_attribute")?;

    let flag = match (attribute, value.into()) {
        (Attribute::ColorDepth, AttributeValue::Depth(depth)) => {
            ctx.state.color_depth = depth;
            tracing::debug!(?depth, "set_attribute(): color depth stored");
            return Ok(());
        }
        (Attribute::ColorDepth, AttributeValue::Flag(_)) => {
            return Err(TermError::invalid_state(
                "set_attribute: ColorDepth expects a color depth value",
            ));
        }
        (_, AttributeValue::Depth(_)) => {
            return Err(TermError::invalid_state(format!(
                "set_attribute: {attribute:?} expects a boolean value"
            )));
        }
        (_, AttributeValue::Flag(flag)) => flag,
    };

    match attribute {
        Attribute::EchoOn | Attribute::EchoOff => {
            let echo = if attribute == Attribute::EchoOn { flag } else { !flag };
            sys::set_echo(handle, echo)?;
            ctx.state.input_echo = echo;
        }
        Attribute::MouseEnabled | Attribute::MouseDisabled => {
            let mouse = if attribute == Attribute::MouseEnabled { flag } else { !flag };
            sys::set_mouse(handle, mouse, out)?;
            ctx.state.mouse_enabled = mouse;
            if !mouse {
                ctx.state.mouse_pressed = false;
            }
        }
        Attribute::CursorVisible => {
            sys::set_cursor_visible(handle, flag, out)?;
            ctx.state.cursor_visible = flag;
        }
        Attribute::ColorDepth => {}
    }

    tracing::debug!(?attribute, value = flag, "set_attribute(): applied");
    Ok(())
}

/// Number of cells (`width * height`) of the logical terminal.
pub fn get_size(ctx: &Context) -> Result<u64> {
    initialized(ctx, "get_size")?;
    Ok(ctx.state.size)
}

/// Sets the logical geometry. The OS window is not resized.
///
/// ## Errors
///
/// `InvalidSize` when either dimension is zero; the context is unchanged.
pub fn set_size(ctx: &mut Context, width: u32, height: u32) -> Result<()> {
    initialized(ctx, "set_size")?;
    if width == 0 || height == 0 {
        return Err(TermError::invalid_size(format!(
            "width and height must be positive (got {width}x{height})"
        )));
    }
    ctx.state.set_geometry(width, height);
    tracing::debug!(width, height, size = ctx.state.size, "set_size(): geometry stored");
    Ok(())
}

/// Replaces the logical geometry with the real window size.
///
/// When the output is not a terminal the current geometry is kept.
/// Returns the resulting `(width, height)`.
pub fn sync_size(ctx: &mut Context) -> Result<(u32, u32)> {
    initialized(ctx, "sync_size")?;
    match window_size() {
        Some((width, height)) => {
            ctx.state.set_geometry(width, height);
            tracing::debug!(width, height, "sync_size(): geometry read from window");
        }
        None => tracing::debug!("sync_size(): window size unavailable, keeping logical size"),
    }
    Ok((ctx.state.width, ctx.state.height))
}

/// Sets the foreground color.
///
/// POSIX targets receive a 24-bit `ESC[38;2;R;G;Bm` sequence; Windows
/// consoles get the nearest of their 16 colors.
pub fn set_color(ctx: &mut Context, rgb: impl Into<Rgb>) -> Result<()> {
    set_color_to(ctx, rgb, &mut io::stdout())
}

/// [`set_color`], writing the escape sequence to `out`.
pub fn set_color_to(ctx: &mut Context, rgb: impl Into<Rgb>, out: &mut dyn Write) -> Result<()> {
    let handle = initialized(ctx, "set_color")?;
    let rgb = rgb.into();
    sys::apply_color(handle, rgb, out)?;
    ctx.state.foreground = Some(rgb);
    tracing::debug!(%rgb, "set_color(): applied");
    Ok(())
}

/// [`set_color`] from signed channels.
///
/// ## Errors
///
/// `InvalidColor` unless `channels` holds exactly three values in `0..=255`.
pub fn set_color_checked(ctx: &mut Context, channels: &[i32]) -> Result<()> {
    set_color_checked_to(ctx, channels, &mut io::stdout())
}

/// [`set_color_checked`], writing the escape sequence to `out`.
pub fn set_color_checked_to(ctx: &mut Context, channels: &[i32], out: &mut dyn Write) -> Result<()> {
    initialized(ctx, "set_color")?;
    let rgb = Rgb::try_from(channels)?;
    set_color_to(ctx, rgb, out)
}

/// Restores the default colors.
pub fn reset_color(ctx: &mut Context) -> Result<()> {
    reset_color_to(ctx, &mut io::stdout())
}

pub fn reset_color_to(ctx: &mut Context, out: &mut dyn Write) -> Result<()> {
    let handle = initialized(ctx, "reset_color")?;
    sys::reset_color(handle, out)?;
    ctx.state.foreground = None;
    Ok(())
}

/// Moves the cursor to zero-based cell `(x, y)`.
///
/// ## Errors
///
/// `InvalidSize` when the position lies outside the logical geometry.
pub fn set_cursor_position(ctx: &mut Context, x: u32, y: u32) -> Result<()> {
    set_cursor_position_to(ctx, x, y, &mut io::stdout())
}

pub fn set_cursor_position_to(ctx: &mut Context, x: u32, y: u32, out: &mut dyn Write) -> Result<()> {
    let handle = initialized(ctx, "set_cursor_position")?;
    if x >= ctx.state.width || y >= ctx.state.height {
        return Err(TermError::invalid_size(format!(
            "cursor position ({x}, {y}) is outside the {}x{} terminal",
            ctx.state.width, ctx.state.height
        )));
    }
    let position = CursorPosition { x, y };
    sys::move_cursor(handle, position, out)?;
    ctx.state.cursor = position;
    Ok(())
}

pub fn set_cursor_style(ctx: &mut Context, style: CursorStyle) -> Result<()> {
    set_cursor_style_to(ctx, style, &mut io::stdout())
}

pub fn set_cursor_style_to(ctx: &mut Context, style: CursorStyle, out: &mut dyn Write) -> Result<()> {
    let handle = initialized(ctx, "set_cursor_style")?;
    sys::set_cursor_style(handle, style, out)?;
    ctx.state.cursor_style = style;
    Ok(())
}

/// Whether `mode` is flagged as enabled.
pub fn get_vt_mode(ctx: &Context, mode: VtMode) -> Result<bool> {
    initialized(ctx, "get_vt_mode")?;
    Ok(ctx.state.vt.get(mode))
}

/// Flags `mode` as enabled or disabled.
///
/// Only [`VtMode::Vt`] reaches the OS (Windows virtual terminal
/// processing); the numbered levels are bookkeeping.
pub fn set_vt_mode(ctx: &mut Context, mode: VtMode, enabled: bool) -> Result<()> {
    let handle = initialized(ctx, "set_vt_mode")?;
    if mode == VtMode::Vt {
        sys::set_virtual_terminal(handle, enabled)?;
    }
    ctx.state.vt.set(mode, enabled);
    tracing::debug!(?mode, enabled, "set_vt_mode(): flag stored");
    Ok(())
}

/// Writes formatted text to standard output and flushes it.
///
/// See also [`term_print!`](crate::term_print).
pub fn print(args: fmt::Arguments<'_>) -> Result<()> {
    print_to(&mut io::stdout().lock(), args)
}

pub fn print_to(out: &mut dyn Write, args: fmt::Arguments<'_>) -> Result<()> {
    out.write_fmt(args)
        .and_then(|_| out.flush())
        .map_err(|e| TermError::io("failed to write output", e))
}

/// The color depth stored in the context, for callers choosing a palette.
pub fn color_depth(ctx: &Context) -> Result<ColorDepth> {
    initialized(ctx, "color_depth")?;
    Ok(ctx.state.color_depth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn ready() -> Context {
        let mut ctx = Context::default();
        let options = InitOptions::new().color_depth(ColorDepth::TrueColor);
        init_with(&mut ctx, &options).unwrap();
        ctx
    }

    #[test]
    fn uninitialized_context_is_rejected_everywhere() {
        let mut ctx = Context::default();
        let mut out = Vec::new();

        assert_eq!(ErrorCode::of(&get_state(&ctx)), ErrorCode::InvalidState);

        let results = [
            ErrorCode::of(&get_attribute(&ctx, Attribute::EchoOn)),
            ErrorCode::of(&set_attribute_to(&mut ctx, Attribute::MouseEnabled, true, &mut out)),
            ErrorCode::of(&get_size(&ctx)),
            ErrorCode::of(&set_size(&mut ctx, 80, 24)),
            ErrorCode::of(&sync_size(&mut ctx)),
            ErrorCode::of(&set_color_to(&mut ctx, Rgb::new(1, 2, 3), &mut out)),
            ErrorCode::of(&set_color_checked_to(&mut ctx, &[1, 2, 3], &mut out)),
            ErrorCode::of(&reset_color_to(&mut ctx, &mut out)),
            ErrorCode::of(&set_cursor_position_to(&mut ctx, 0, 0, &mut out)),
            ErrorCode::of(&set_cursor_style_to(&mut ctx, CursorStyle::default(), &mut out)),
            ErrorCode::of(&get_vt_mode(&ctx, VtMode::Vt)),
            ErrorCode::of(&set_vt_mode(&mut ctx, VtMode::Vt100, true)),
            ErrorCode::of(&color_depth(&ctx)),
        ];

        assert!(results.iter().all(|code| *code == ErrorCode::InvalidState), "{results:?}");
        assert!(out.is_empty());
        assert_eq!(ctx.state().size(), 0);
        assert!(!ctx.is_initialized());
    }

    #[test]
    fn init_populates_defaults() {
        let ctx = ready();
        assert_ne!(ctx.platform(), Platform::Unknown);
        assert!(ctx.is_initialized());
        assert!(ctx.state().handle().matches(ctx.platform()));
        assert_eq!((ctx.width(), ctx.height()), (80, 24));
        assert_eq!(get_size(&ctx).unwrap(), 1920);
        assert_eq!(color_depth(&ctx).unwrap(), ColorDepth::TrueColor);
    }

    #[test]
    #[serial_test::serial]
    fn init_keeps_preset_geometry() {
        let mut ctx = Context::with_geometry(100, 30);
        init(&mut ctx).unwrap();
        assert_eq!(get_size(&ctx).unwrap(), 3000);
    }

    #[test]
    fn init_uses_configured_default_size() {
        let mut ctx = Context::default();
        let options = InitOptions::new().default_size(132, 43).color_depth(ColorDepth::Basic);
        init_with(&mut ctx, &options).unwrap();
        assert_eq!((ctx.width(), ctx.height()), (132, 43));
    }

    #[test]
    #[serial_test::serial]
    fn init_twice_is_a_no_op() {
        let mut ctx = ready();
        set_size(&mut ctx, 10, 10).unwrap();
        init(&mut ctx).unwrap();
        assert_eq!(get_size(&ctx).unwrap(), 100);
    }

    #[cfg(unix)]
    #[test]
    fn invalid_output_descriptor_is_init_failed() {
        let mut ctx = Context::default();
        let options = InitOptions::new().color_depth(ColorDepth::Basic);

        let err = init_from(&mut ctx, &options, || sys::acquire_descriptor(-1)).unwrap_err();

        assert_eq!(err.code(), ErrorCode::InitFailed);
        assert!(!err.message().is_empty());
        assert!(!ctx.is_initialized());
        assert_eq!(ctx.platform(), Platform::Unknown);
        assert_eq!(ErrorCode::of(&get_size(&ctx)), ErrorCode::InvalidState);
    }

    #[test]
    fn attribute_defaults_after_init() {
        let ctx = ready();
        assert_eq!(get_attribute(&ctx, Attribute::EchoOn).unwrap(), AttributeValue::Flag(true));
        assert_eq!(get_attribute(&ctx, Attribute::EchoOff).unwrap(), AttributeValue::Flag(false));
        assert_eq!(get_attribute(&ctx, Attribute::CursorVisible).unwrap(), AttributeValue::Flag(true));
        assert_eq!(get_attribute(&ctx, Attribute::MouseEnabled).unwrap(), AttributeValue::Flag(false));
        assert_eq!(get_attribute(&ctx, Attribute::MouseDisabled).unwrap(), AttributeValue::Flag(true));
        assert_eq!(
            get_attribute(&ctx, Attribute::ColorDepth).unwrap(),
            AttributeValue::Depth(ColorDepth::TrueColor)
        );
    }

    #[test]
    fn set_size_rejects_zero_and_keeps_previous() {
        let mut ctx = ready();
        set_size(&mut ctx, 100, 50).unwrap();

        for (w, h) in [(0, 10), (10, 0), (0, 0)] {
            let err = set_size(&mut ctx, w, h).unwrap_err();
            assert_eq!(err.code(), ErrorCode::InvalidSize);
            assert!(!err.message().is_empty());
        }
        assert_eq!(get_size(&ctx).unwrap(), 5000);
    }

    #[test]
    fn mismatched_attribute_values_leave_state_alone() {
        let mut ctx = ready();
        let mut out = Vec::new();

        let err = set_attribute_to(&mut ctx, Attribute::ColorDepth, true, &mut out).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidState);

        let err = set_attribute_to(&mut ctx, Attribute::MouseEnabled, ColorDepth::Basic, &mut out)
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidState);

        assert!(out.is_empty());
        assert_eq!(color_depth(&ctx).unwrap(), ColorDepth::TrueColor);
        assert!(!ctx.state().mouse_enabled());
    }

    #[test]
    fn color_depth_round_trips() {
        let mut ctx = ready();
        let mut out = Vec::new();
        set_attribute_to(&mut ctx, Attribute::ColorDepth, ColorDepth::Enhanced, &mut out).unwrap();
        assert_eq!(
            get_attribute(&ctx, Attribute::ColorDepth).unwrap(),
            AttributeValue::Depth(ColorDepth::Enhanced)
        );
        assert!(out.is_empty());
    }

    #[test]
    fn signed_color_out_of_range_is_invalid() {
        let mut ctx = ready();
        let mut out = Vec::new();
        let cases: [&[i32]; 4] = [&[-1, 0, 0], &[0, 256, 0], &[0, 0], &[]];
        for channels in cases {
            let err = set_color_checked_to(&mut ctx, channels, &mut out).unwrap_err();
            assert_eq!(err.code(), ErrorCode::InvalidColor, "{channels:?}");
        }
        assert!(out.is_empty());
        assert_eq!(ctx.state().foreground(), None);
    }

    #[test]
    fn cursor_position_is_bounded_by_geometry() {
        let mut ctx = ready();
        let mut out = Vec::new();
        let err = set_cursor_position_to(&mut ctx, 80, 0, &mut out).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidSize);
        assert!(out.is_empty());
        assert_eq!(ctx.state().cursor(), CursorPosition::default());
    }

    #[test]
    fn numbered_vt_modes_are_flags_only() {
        let mut ctx = ready();
        set_vt_mode(&mut ctx, VtMode::Vt200, true).unwrap();
        assert!(get_vt_mode(&ctx, VtMode::Vt200).unwrap());
        assert!(!get_vt_mode(&ctx, VtMode::Vt300).unwrap());

        set_vt_mode(&mut ctx, VtMode::Vt200, false).unwrap();
        assert!(!get_vt_mode(&ctx, VtMode::Vt200).unwrap());
    }

    #[test]
    #[serial_test::serial]
    fn echo_round_trips() {
        let mut ctx = ready();
        let mut out = Vec::new();

        set_attribute_to(&mut ctx, Attribute::EchoOff, true, &mut out).unwrap();
        let echo_on = get_attribute(&ctx, Attribute::EchoOn).unwrap();
        let echo_off = get_attribute(&ctx, Attribute::EchoOff).unwrap();
        set_attribute_to(&mut ctx, Attribute::EchoOn, true, &mut out).unwrap();

        assert_eq!(echo_on, AttributeValue::Flag(false));
        assert_eq!(echo_off, AttributeValue::Flag(true));
        assert!(ctx.state().input_echo());
        assert!(out.is_empty());
    }

    #[test]
    fn print_to_writes_and_flushes() {
        let mut out = Vec::new();
        print_to(&mut out, format_args!("{} cells", 1920)).unwrap();
        assert_eq!(out, b"1920 cells");
    }

    #[cfg(unix)]
    mod posix {
        use super::*;

        #[test]
        fn color_emits_one_truecolor_sequence() {
            let mut ctx = ready();
            let mut out = Vec::new();
            set_color_to(&mut ctx, [255u8, 0, 0], &mut out).unwrap();
            assert_eq!(out, b"\x1b[38;2;255;0;0m");
            assert_eq!(ctx.state().foreground(), Some(Rgb::new(255, 0, 0)));

            out.clear();
            reset_color_to(&mut ctx, &mut out).unwrap();
            assert_eq!(out, b"\x1b[0m");
            assert_eq!(ctx.state().foreground(), None);
        }

        #[test]
        fn mouse_round_trips_and_emits_tracking_modes() {
            let mut ctx = ready();
            let mut out = Vec::new();

            set_attribute_to(&mut ctx, Attribute::MouseEnabled, true, &mut out).unwrap();
            assert_eq!(out, crate::escape_codes::ENABLE_MOUSE.as_bytes());
            assert_eq!(get_attribute(&ctx, Attribute::MouseEnabled).unwrap(), AttributeValue::Flag(true));
            assert_eq!(get_attribute(&ctx, Attribute::MouseDisabled).unwrap(), AttributeValue::Flag(false));

            out.clear();
            set_attribute_to(&mut ctx, Attribute::MouseDisabled, true, &mut out).unwrap();
            assert_eq!(out, crate::escape_codes::DISABLE_MOUSE.as_bytes());
            assert_eq!(get_attribute(&ctx, Attribute::MouseEnabled).unwrap(), AttributeValue::Flag(false));
        }

        #[test]
        fn cursor_visibility_round_trips() {
            let mut ctx = ready();
            let mut out = Vec::new();
            set_attribute_to(&mut ctx, Attribute::CursorVisible, false, &mut out).unwrap();
            assert_eq!(out, b"\x1b[?25l");
            assert_eq!(get_attribute(&ctx, Attribute::CursorVisible).unwrap(), AttributeValue::Flag(false));
        }

        #[test]
        fn cursor_moves_within_geometry() {
            let mut ctx = ready();
            let mut out = Vec::new();
            set_cursor_position_to(&mut ctx, 79, 23, &mut out).unwrap();
            assert_eq!(out, b"\x1b[24;80H");
            assert_eq!(ctx.state().cursor(), CursorPosition { x: 79, y: 23 });
        }
    }
}
