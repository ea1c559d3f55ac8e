//! Colors, color depth, and console color quantization.

use std::env;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use termini::{NumberCapability, TermInfo};

use crate::error::TermError;

/// How many colors the terminal can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ColorDepth {
    /// no color support
    #[default]
    None,
    /// 8 colors
    Minimal,
    /// 16 colors (8 normal plus "bright" variants)
    Basic,
    /// 256 color palette (8 bit)
    Enhanced,
    /// 16 million colors (24 bit)
    TrueColor,
}

impl ColorDepth {
    /// The number of distinct colors at this depth.
    pub fn colors(self) -> u32 {
        match self {
            ColorDepth::None => 0,
            ColorDepth::Minimal => 8,
            ColorDepth::Basic => 16,
            ColorDepth::Enhanced => 256,
            ColorDepth::TrueColor => 16_777_216,
        }
    }

    /// The deepest level that fits within `colors` (e.g. a terminfo `colors` value).
    pub fn from_colors(colors: u32) -> ColorDepth {
        match colors {
            d if d >= 16_777_216 => ColorDepth::TrueColor,
            d if d >= 256 => ColorDepth::Enhanced,
            d if d >= 16 => ColorDepth::Basic,
            d if d >= 8 => ColorDepth::Minimal,
            _ => ColorDepth::None,
        }
    }
}

impl fmt::Display for ColorDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorDepth::None => write!(f, "none"),
            ColorDepth::Minimal => write!(f, "8"),
            ColorDepth::Basic => write!(f, "16"),
            ColorDepth::Enhanced => write!(f, "256"),
            ColorDepth::TrueColor => write!(f, "truecolor"),
        }
    }
}

impl FromStr for ColorDepth {
    type Err = TermError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "0" => Ok(ColorDepth::None),
            "8" => Ok(ColorDepth::Minimal),
            "16" => Ok(ColorDepth::Basic),
            "256" => Ok(ColorDepth::Enhanced),
            "truecolor" | "24bit" | "16777216" => Ok(ColorDepth::TrueColor),
            other => Err(TermError::invalid_color(format!(
                "unrecognized color depth '{other}'"
            ))),
        }
    }
}

/// RGB color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    fn distance_sq(&self, other: &Rgb) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl TryFrom<[i32; 3]> for Rgb {
    type Error = TermError;

    fn try_from(channels: [i32; 3]) -> Result<Self, Self::Error> {
        let [r, g, b] = channels;
        Ok(Self {
            r: channel("red", r)?,
            g: channel("green", g)?,
            b: channel("blue", b)?,
        })
    }
}

impl TryFrom<&[i32]> for Rgb {
    type Error = TermError;

    fn try_from(channels: &[i32]) -> Result<Self, Self::Error> {
        let channels: [i32; 3] = channels.try_into().map_err(|_| {
            TermError::invalid_color(format!(
                "expected 3 color channels, got {}",
                channels.len()
            ))
        })?;
        Rgb::try_from(channels)
    }
}

fn channel(name: &str, value: i32) -> Result<u8, TermError> {
    u8::try_from(value).map_err(|_| {
        TermError::invalid_color(format!(
            "{name} channel {value} is outside the range 0-255"
        ))
    })
}

/// The standard 16-color ANSI/VGA palette, indexed by ANSI color number.
pub const ANSI_PALETTE: [Rgb; 16] = [
    Rgb::new(0, 0, 0),       // Black
    Rgb::new(205, 49, 49),   // Red
    Rgb::new(13, 188, 121),  // Green
    Rgb::new(229, 229, 16),  // Yellow
    Rgb::new(36, 114, 200),  // Blue
    Rgb::new(188, 63, 188),  // Magenta
    Rgb::new(17, 168, 205),  // Cyan
    Rgb::new(229, 229, 229), // White
    Rgb::new(102, 102, 102), // Bright Black (Gray)
    Rgb::new(241, 76, 76),   // Bright Red
    Rgb::new(35, 209, 139),  // Bright Green
    Rgb::new(245, 245, 67),  // Bright Yellow
    Rgb::new(59, 142, 234),  // Bright Blue
    Rgb::new(214, 112, 214), // Bright Magenta
    Rgb::new(41, 184, 219),  // Bright Cyan
    Rgb::new(255, 255, 255), // Bright White
];

/// Index (0-15) of the palette entry closest to `rgb`.
///
/// Ties go to the lower index.
pub fn nearest_ansi_index(rgb: Rgb) -> u8 {
    let mut best = 0usize;
    let mut best_distance = u32::MAX;
    for (index, candidate) in ANSI_PALETTE.iter().enumerate() {
        let distance = rgb.distance_sq(candidate);
        if distance < best_distance {
            best = index;
            best_distance = distance;
        }
    }
    best as u8
}

/// Converts an ANSI color index into Win32 console foreground bits.
///
/// ANSI orders the bits red=1, green=2, blue=4; the console uses
/// blue=1, green=2, red=4. Bit 3 (bright / intensity) is shared.
pub fn ansi_to_console_foreground(index: u8) -> u16 {
    let index = (index & 0x0f) as u16;
    ((index & 0x1) << 2) | (index & 0x2) | ((index & 0x4) >> 2) | (index & 0x8)
}

/// Console text attribute for `rgb`, keeping the non-foreground bits of `base`.
pub fn console_attribute(rgb: Rgb, base: u16) -> u16 {
    (base & !0x000f) | ansi_to_console_foreground(nearest_ansi_index(rgb))
}

/// Detects the color depth of the attached terminal.
///
/// 1. `COLORTERM` of `truecolor` / `24bit`
/// 2. terminfo `colors` for `$TERM`
/// 3. the platform fallback: 16 colors on Windows consoles, none elsewhere
pub fn detect_color_depth() -> ColorDepth {
    if let Ok(colorterm) = env::var("COLORTERM") {
        let colorterm_lower = colorterm.to_lowercase();
        if colorterm_lower == "truecolor" || colorterm_lower == "24bit" {
            tracing::debug!(
                color_depth = ?ColorDepth::TrueColor,
                source = "COLORTERM",
                colorterm = %colorterm,
                "Detected truecolor support from COLORTERM env var"
            );
            return ColorDepth::TrueColor;
        }
    }

    match TermInfo::from_env() {
        Ok(term_info) => {
            let colors = term_info
                .number_cap(NumberCapability::MaxColors)
                .map(|n| n.max(0) as u32)
                .unwrap_or(0);
            let color_depth = ColorDepth::from_colors(colors);
            tracing::debug!(?color_depth, source = "terminfo", "Detected color depth from terminfo");
            color_depth
        }
        Err(e) => {
            let color_depth = if cfg!(windows) {
                ColorDepth::Basic
            } else {
                ColorDepth::None
            };
            tracing::debug!(
                ?color_depth,
                source = "fallback",
                error = %e,
                "Failed to query terminfo, using platform fallback"
            );
            color_depth
        }
    }
}
