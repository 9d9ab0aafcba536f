//! # Adminboard CLI
//!
//! The binary is thin: the CLI lives in `cli/`, and this file only invokes
//! `cli::run()` and handles process termination.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (src/adminboard/cli/)                            │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Context wiring, one-shot commands, session loop          │
//! │    (commands.rs)                                            │
//! │  - Terminal rendering via minijinja templates (render.rs)   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//!                   adminboard::api::AdminApi
//! ```
//!
//! The default command is `shell`: an interactive session that reads one
//! interaction per line from stdin, so scripted sessions can be piped in.
//! Diagnostics go to stderr through `tracing`; stdout carries only rendered
//! output.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
