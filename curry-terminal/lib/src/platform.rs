//! Operating system detection.
//!
//! ## Examples
//!
//! ```
//! use curry_terminal::platform::{detect_platform, Platform};
//!
//! match detect_platform() {
//!     Platform::Windows => println!("console handles"),
//!     Platform::Unknown => println!("no backend for this target"),
//!     other => println!("file descriptors on {other}"),
//! }
//! ```

use std::env;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The platform family a terminal context is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Platform {
    /// Not yet detected, or not a supported target
    #[default]
    Unknown,
    /// Microsoft Windows (Win32 console)
    Windows,
    /// Linux, including Android userlands
    Linux,
    /// Apple macOS
    MacOS,
    /// FreeBSD, NetBSD, OpenBSD and DragonFly BSD
    BSD,
}

impl Platform {
    /// Whether the platform is driven through a POSIX file descriptor.
    pub fn is_posix(self) -> bool {
        matches!(self, Platform::Linux | Platform::MacOS | Platform::BSD)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Unknown => write!(f, "Unknown"),
            Platform::Windows => write!(f, "Windows"),
            Platform::Linux => write!(f, "Linux"),
            Platform::MacOS => write!(f, "macOS"),
            Platform::BSD => write!(f, "BSD"),
        }
    }
}

/// Maps a `std::env::consts::OS` value onto a [`Platform`].
pub fn platform_from_os(os: &str) -> Platform {
    match os {
        "windows" => Platform::Windows,
        "linux" | "android" => Platform::Linux,
        "macos" => Platform::MacOS,
        "freebsd" | "netbsd" | "openbsd" | "dragonfly" => Platform::BSD,
        _ => Platform::Unknown,
    }
}

/// Detect the platform of the compile target.
pub fn detect_platform() -> Platform {
    platform_from_os(env::consts::OS)
}
