//! # Roster Architecture
//!
//! Roster is a **UI-agnostic user-management library**. This is not a CLI
//! application that happens to have some library code—it's a library that
//! happens to have a CLI client.
//!
//! This distinction drives the entire architecture and should guide all
//! development.
//!
//! ## The Layered Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (args.rs, wired by main.rs)                      │
//! │  - Parses arguments, renders tables, prints notifications   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Mutation coordinator: pending guard, notifications       │
//! │  - Owns the generation-counted record cache                 │
//! │  - Invalidates and refetches after every successful write   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Validate-then-call business logic per verb               │
//! │  - Operates on Rust types, returns Rust types               │
//! │  - No I/O assumptions whatsoever                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract UserStore trait                                 │
//! │  - HttpStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Beside the stack sits the **view pipeline** (`view.rs`): a pure function
//! from (fetched records, view state) to the visible page. It never touches
//! the network and is recomputed whenever either input changes.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward (API, commands, storage), code:
//! - Takes regular Rust function arguments
//! - Returns regular Rust types (`Result<CmdResult>`)
//! - **Never** writes to stdout/stderr
//! - **Never** calls `std::process::exit`
//! - **Never** assumes a terminal environment
//!
//! This means the same core could serve a REST API, a desktop app, or any
//! other UI. The only push-style output is the notification channel, and
//! whoever holds the receiver decides how to render it.
//!
//! ## Consistency Model
//!
//! The remote service owns the data. After every successful create, update,
//! or delete, the cached collection is discarded and re-fetched wholesale
//! (never patched in place), so the derived view can't drift from server
//! truth. The cache carries a generation counter; a consumer holding a view
//! from an old generation discards it and recomputes.
//!
//! ## Testing Strategy
//!
//! 1. **View pipeline** (`view.rs`): thorough unit tests of the
//!    filter/sort/paginate properties. This is where the lion's share of
//!    testing lives.
//! 2. **Commands** (`commands/*.rs`): business logic against
//!    `InMemoryStore`.
//! 3. **API** (`api.rs`): coordinator behavior: cache generations,
//!    pending guard, notification publishing.
//! 4. **HTTP store** (`store/http.rs`): wire-shape tests against a mock
//!    server.
//! 5. **CLI** (`tests/`): end-to-end runs of the binary.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade and mutation coordinator
//! - [`commands`]: Business logic for each verb
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`UserRecord`, `UserDraft`)
//! - [`view`]: The pure filter/sort/paginate pipeline and `ViewState`
//! - [`cache`]: Generation-counted record cache
//! - [`validate`]: Client-side form validation
//! - [`notify`]: Notification payloads for the coordinator's channel
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod cache;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod notify;
pub mod store;
pub mod validate;
pub mod view;
