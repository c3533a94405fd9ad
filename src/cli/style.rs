//! CLI styling utilities
//!
//! Semantic styling via the [`Stylize`] trait with automatic terminal
//! color support detection (delegated to `owo-colors`).
//!
//! | Method       | Color  | Stream | Semantic Use                      |
//! |--------------|--------|--------|-----------------------------------|
//! | `.accent()`  | Cyan   | stdout | Primary info: ids, labels, counts |
//! | `.success()` | Green  | stdout | Completion: checkmarks, done      |
//! | `.error()`   | Red    | stderr | Failures, error messages          |
//! | `.warn()`    | Yellow | stderr | Validation problems               |
//! | `.muted()`   | Dim    | stdout | Secondary: dates, metadata        |
//! | `.emphasis()`| Bold   | stdout | Headers, group titles             |

use std::fmt::{self, Display};

pub use owo_colors::Stream;
use owo_colors::{OwoColorize, Style};

const ACCENT: Style = Style::new().cyan();
const SUCCESS: Style = Style::new().green();
const ERROR: Style = Style::new().red();
const WARN: Style = Style::new().yellow();
const MUTED: Style = Style::new().dimmed();
const EMPHASIS: Style = Style::new().bold();

/// A value with semantic styling applied.
///
/// Implements [`Display`] to render with ANSI codes when supported.
/// Color support detection is handled by `owo-colors` (respects `NO_COLOR`,
/// `CLICOLOR`, `CLICOLOR_FORCE`, and TTY detection).
#[derive(Clone, Debug)]
pub struct Styled<T> {
    value: T,
    style: Style,
    stream: Stream,
}

impl<T: Display> Display for Styled<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.value
                .if_supports_color(self.stream, |v| v.style(self.style))
        )
    }
}

/// Extension trait for semantic terminal styling.
///
/// Automatically implemented for all [`Display`] types. Methods take
/// `&self` so borrowed data can be styled without moving it.
pub trait Stylize: Display {
    /// Accent color (cyan) for primary information.
    fn accent(&self) -> Styled<&Self> {
        Styled {
            value: self,
            style: ACCENT,
            stream: Stream::Stdout,
        }
    }

    /// Success color (green) for completion states.
    fn success(&self) -> Styled<&Self> {
        Styled {
            value: self,
            style: SUCCESS,
            stream: Stream::Stdout,
        }
    }

    /// Error color (red) for failures. Default stream: stderr.
    fn error(&self) -> Styled<&Self> {
        Styled {
            value: self,
            style: ERROR,
            stream: Stream::Stderr,
        }
    }

    /// Warning color (yellow) for validation problems. Default stream: stderr.
    fn warn(&self) -> Styled<&Self> {
        Styled {
            value: self,
            style: WARN,
            stream: Stream::Stderr,
        }
    }

    /// Muted style (dim) for secondary information.
    fn muted(&self) -> Styled<&Self> {
        Styled {
            value: self,
            style: MUTED,
            stream: Stream::Stdout,
        }
    }

    /// Emphasis style (bold) for headers and group titles.
    fn emphasis(&self) -> Styled<&Self> {
        Styled {
            value: self,
            style: EMPHASIS,
            stream: Stream::Stdout,
        }
    }
}

// Blanket implementation for all Display types
impl<T: Display + ?Sized> Stylize for T {}

/// Success checkmark
pub const CHECK: &str = "✓";

/// Error/failure cross
pub const CROSS: &str = "✗";

/// Green checkmark for success states.
#[inline]
pub fn check() -> Styled<&'static str> {
    Styled {
        value: CHECK,
        style: SUCCESS,
        stream: Stream::Stdout,
    }
}

/// Red cross for error/failure states (renders to stderr by default).
#[inline]
pub fn cross() -> Styled<&'static str> {
    Styled {
        value: CROSS,
        style: ERROR,
        stream: Stream::Stderr,
    }
}
