//! Terminal styling helpers
//!
//! Colors are always emitted; `anstream::println!` strips them when stdout
//! is not a terminal or `NO_COLOR` is set.

use owo_colors::OwoColorize;
use std::fmt::Display;

/// Check mark
pub const CHECK: &str = "✓";

/// Cross mark
pub const CROSS: &str = "✗";

/// Semantic styles for CLI output
pub trait Stylize: Display + Sized {
    /// Headings and key words
    fn emphasis(&self) -> String {
        self.bold().to_string()
    }

    /// Names: branches, repos, PR numbers
    fn accent(&self) -> String {
        self.cyan().to_string()
    }

    /// Secondary information
    fn muted(&self) -> String {
        self.dimmed().to_string()
    }

    /// Things that went right
    fn success(&self) -> String {
        self.green().to_string()
    }

    /// Things that need attention
    fn warn(&self) -> String {
        self.yellow().to_string()
    }

    /// Things that went wrong
    fn failure(&self) -> String {
        self.red().to_string()
    }
}

impl<T: Display> Stylize for T {}

/// Green check mark
pub fn check() -> String {
    CHECK.success()
}

/// Red cross
pub fn cross() -> String {
    CROSS.failure()
}

/// Arrow for "from -> to" lines
pub fn arrow() -> String {
    "→".muted()
}
