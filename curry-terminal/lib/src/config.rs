//! Options for [`init_with`](crate::dispatch::init_with).
//!
//! ## Examples
//!
//! ```
//! use curry_terminal::{ColorDepth, InitOptions};
//!
//! let options = InitOptions::new()
//!     .default_size(132, 43)
//!     .color_depth(ColorDepth::Enhanced);
//! assert_eq!(options.default_width, 132);
//! ```

use std::env;

use serde::{Deserialize, Serialize};

use crate::color::ColorDepth;
use crate::context::{DEFAULT_HEIGHT, DEFAULT_WIDTH};

/// Overrides the default width (positive integer).
pub const ENV_WIDTH: &str = "CURRY_TERM_WIDTH";
/// Overrides the default height (positive integer).
pub const ENV_HEIGHT: &str = "CURRY_TERM_HEIGHT";
/// `1`/`true`/`yes`/`on` to read the real window size at init.
pub const ENV_QUERY_SIZE: &str = "CURRY_TERM_QUERY_SIZE";
/// Forces a color depth (`none`, `8`, `16`, `256`, `truecolor`).
pub const ENV_COLOR_DEPTH: &str = "CURRY_TERM_COLOR_DEPTH";

/// How `init` fills in geometry and color depth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitOptions {
    /// Width used when the context has no geometry yet
    pub default_width: u32,
    /// Height used when the context has no geometry yet
    pub default_height: u32,
    /// Read the real window size instead of using the defaults
    pub query_size: bool,
    /// Fixed color depth; `None` detects it from the environment
    pub color_depth: Option<ColorDepth>,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            default_width: DEFAULT_WIDTH,
            default_height: DEFAULT_HEIGHT,
            query_size: false,
            color_depth: None,
        }
    }
}

impl InitOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options from the `CURRY_TERM_*` environment variables.
    ///
    /// Unset variables keep their defaults; malformed ones are ignored
    /// with a warning.
    pub fn from_env() -> Self {
        let mut options = Self::default();

        if let Some(width) = positive_var(ENV_WIDTH) {
            options.default_width = width;
        }
        if let Some(height) = positive_var(ENV_HEIGHT) {
            options.default_height = height;
        }
        if let Ok(value) = env::var(ENV_QUERY_SIZE) {
            match value.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => options.query_size = true,
                "0" | "false" | "no" | "off" | "" => options.query_size = false,
                _ => tracing::warn!(var = ENV_QUERY_SIZE, %value, "Ignoring malformed boolean"),
            }
        }
        if let Ok(value) = env::var(ENV_COLOR_DEPTH) {
            match value.parse::<ColorDepth>() {
                Ok(depth) => options.color_depth = Some(depth),
                Err(e) => tracing::warn!(var = ENV_COLOR_DEPTH, error = %e, "Ignoring malformed color depth"),
            }
        }

        options
    }

    /// Geometry for contexts that have none. Zero dimensions are ignored.
    pub fn default_size(mut self, width: u32, height: u32) -> Self {
        if width > 0 && height > 0 {
            self.default_width = width;
            self.default_height = height;
        }
        self
    }

    pub fn query_size(mut self, query: bool) -> Self {
        self.query_size = query;
        self
    }

    pub fn color_depth(mut self, depth: ColorDepth) -> Self {
        self.color_depth = Some(depth);
        self
    }

    /// The configured default geometry, falling back to 80x24 when a
    /// deserialized value is zero.
    pub(crate) fn fallback_geometry(&self) -> (u32, u32) {
        if self.default_width > 0 && self.default_height > 0 {
            (self.default_width, self.default_height)
        } else {
            (DEFAULT_WIDTH, DEFAULT_HEIGHT)
        }
    }
}

fn positive_var(name: &str) -> Option<u32> {
    let value = env::var(name).ok()?;
    match value.trim().parse::<u32>() {
        Ok(n) if n > 0 => Some(n),
        _ => {
            tracing::warn!(var = name, %value, "Ignoring non-positive or malformed dimension");
            None
        }
    }
}
