//! # CLI Behavior
//!
//! One possible UI client for adminboard. For the overall architecture see
//! the library docs.
//!
//! ## Naked Execution
//!
//! Running `adminboard` with no subcommand starts a session, the same as
//! `adminboard shell`. A session starts on the Dashboard.
//!
//! ## Scripted Sessions
//!
//! Every line on stdin is one interaction, so a session can be replayed:
//!
//! ```text
//! printf 'goto /threads\nsearch Thread #1\nnext\n' | adminboard
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.
//!
//! ## Output
//!
//! `--output text` (default) renders styled text; colors are dropped when
//! stdout is not a terminal. `--output json` prints each result as JSON.
//!
//! ## Structure
//!
//! - `setup.rs`: clap definitions for the binary and for session lines
//! - `commands.rs`: context wiring, one-shot commands, the session loop
//! - `render.rs` + `templates/`: text output
//! - `styles.rs`: the style theme

mod commands;
mod render;
mod setup;
mod styles;
mod templates;

pub use commands::run;
