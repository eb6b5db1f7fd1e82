//! Roadnet CLI library.
//!
//! This crate turns the line-oriented command language (`addRoad;A;B;10;2000`,
//! `newRoute;1;A;B`, ...) into calls on the roadnet library and formats the
//! results.

pub mod commands;
pub mod output;

pub use commands::{parse_line, Command, CommandOutput, ParseError, Session, SessionSummary};
pub use output::OutputFormat;
