//! Line-oriented listing shell.
//!
//! The shell reads commands from standard input, forwards them to a running
//! listing session, and renders every snapshot the session publishes:
//! - [`command`]: Parsing of shell commands
//! - [`output`]: Snapshot rendering for grid and table views
//! - [`shell`]: The read/render loop
//! - [`text_width`]: Display-width aware truncation and padding

pub mod command;
pub mod output;
pub mod shell;
pub mod text_width;
