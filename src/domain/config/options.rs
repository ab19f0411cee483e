//! Enumerated config options

use std::fmt;
use std::str::FromStr;

use crate::domain::error::InvalidOptionError;

/// Which clipboard-change source the daemon uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WatcherKind {
    /// OS clipboard-change notifications
    #[default]
    Native,
    /// Periodic sampling, for sessions without a notification hook
    Poll,
}

impl WatcherKind {
    pub const VALID: &'static str = "native, poll";

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::Poll => "poll",
        }
    }
}

impl FromStr for WatcherKind {
    type Err = InvalidOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "native" => Ok(Self::Native),
            "poll" | "polling" => Ok(Self::Poll),
            _ => Err(InvalidOptionError {
                option: "watcher",
                input: s.to_string(),
                valid: Self::VALID,
            }),
        }
    }
}

impl fmt::Display for WatcherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which adapter reads and writes clipboard text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClipboardBackend {
    #[default]
    Arboard,
    /// wl-paste / wl-copy
    Wayland,
}

impl ClipboardBackend {
    pub const VALID: &'static str = "arboard, wayland";

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Arboard => "arboard",
            Self::Wayland => "wayland",
        }
    }
}

impl FromStr for ClipboardBackend {
    type Err = InvalidOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "arboard" => Ok(Self::Arboard),
            "wayland" => Ok(Self::Wayland),
            _ => Err(InvalidOptionError {
                option: "clipboard backend",
                input: s.to_string(),
                valid: Self::VALID,
            }),
        }
    }
}

impl fmt::Display for ClipboardBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
