//! Thin harness for driving external command-line scanners: option parsing,
//! binary invocation with pass-through flags, line-streamed output capture,
//! and plain-text or JSON input reading.

pub mod arguments;
pub mod error;
pub mod input;
pub mod options;
pub mod runner;
pub mod scanner;

pub use arguments::Arguments;
pub use error::{InputError, RunError};
pub use input::{Lines, Records, read_lines, read_records};
pub use options::Options;
pub use runner::Runner;
pub use scanner::{Scanner, help_note, show_scanner_help};
