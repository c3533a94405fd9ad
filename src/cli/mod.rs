//! CLI commands
//!
//! Command implementations for the `qpress` binary.

mod issues;
mod style;
mod submit;

pub use issues::run_issues;
pub use submit::run_submit;
