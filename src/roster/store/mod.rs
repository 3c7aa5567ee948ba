//! # Storage Layer
//!
//! The [`UserStore`] trait abstracts the remote user collection so the rest
//! of the crate never talks HTTP directly.
//!
//! ## Design Rationale
//!
//! Storage is abstracted behind a trait to:
//! - Enable **testing** with `InMemoryStore` (no network needed)
//! - Keep the command and coordinator layers **decoupled** from transport
//!   details
//!
//! ## Implementations
//!
//! - [`http::HttpStore`]: production client for the REST collection
//!   resource (`GET/POST /users`, `GET/PUT/DELETE /users/{id}`, JSON bodies)
//! - [`memory::InMemoryStore`]: in-memory stand-in for tests; assigns ids
//!   the way the server would and can simulate outages
//!
//! ## Failure Contract
//!
//! Every operation normalizes its failures (connection errors, non-2xx
//! statuses, malformed bodies) into [`RosterError::Transport`] carrying a
//! generic human-readable message. The raw cause goes to the diagnostic log
//! and is never surfaced to the end user.

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{UserDraft, UserRecord};

pub mod http;
pub mod memory;

/// Abstract interface to the remote user collection, one operation per verb.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fetch the full collection, in server-defined order.
    async fn list_users(&self) -> Result<Vec<UserRecord>>;

    /// Fetch a single user by id.
    async fn get_user(&self, id: i64) -> Result<UserRecord>;

    /// Create a user from the editable fields. The server assigns the id.
    async fn create_user(&self, draft: &UserDraft) -> Result<UserRecord>;

    /// Replace a user wholesale with the draft's fields.
    async fn update_user(&self, id: i64, draft: &UserDraft) -> Result<UserRecord>;

    /// Remove a user.
    async fn delete_user(&self, id: i64) -> Result<()>;
}
