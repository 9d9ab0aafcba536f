//! # Adminboard Architecture
//!
//! Adminboard is the core of an admin dashboard for a small social forum: two
//! record lists (threads and users) with search, exact filtering, sorting,
//! pagination and an add-record form, plus a summary dashboard, a settings
//! form and the shell that routes between them.
//!
//! Like any UI-agnostic core, it is a library that happens to have a CLI
//! client, not the other way around.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments and session lines, renders output       │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns session state, dispatches by active route           │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One interaction per call: mutate, then invalidate views  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core: store/, query.rs, paginate.rs, view.rs, workflow.rs  │
//! │  - DataStore trait with an in-memory backend                │
//! │  - Pure query pipeline and clamping paginator               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Derived Views
//!
//! A list screen is always `page(sort(filter(search(records))))`. Nothing is
//! cached: every render recomputes from the store, so a mutation is visible
//! on the next render without any bookkeeping beyond resetting the page.
//!
//! ## Testing Strategy
//!
//! 1. **Core and commands**: thorough unit tests over `InMemoryStore` fixtures.
//! 2. **API** (`api.rs`): dispatch tests.
//! 3. **CLI**: integration tests in `tests/` drive the binary over stdin.
//!
//! ## Module Overview
//!
//! - [`api`]: the facade every UI talks to
//! - [`commands`]: one module per interaction group
//! - [`model`]: `Thread`, `User`, the `Record` trait, sort keys and patches
//! - [`store`]: the `DataStore` trait and `InMemoryStore`
//! - [`query`]: search, filter and sort
//! - [`paginate`]: pages and the clamping paginator
//! - [`view`]: per-list query and page state
//! - [`workflow`]: the add-record state machine
//! - [`shell`]: routes, sidebar and loading state
//! - [`dashboard`]: summary numbers and chart series
//! - [`settings`]: the mock settings form
//! - [`seed`]: deterministic mock data
//! - [`config`]: layered configuration
//! - [`error`]: error types

pub mod api;
pub mod commands;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod model;
pub mod paginate;
pub mod query;
pub mod seed;
pub mod settings;
pub mod shell;
pub mod store;
pub mod view;
pub mod workflow;
