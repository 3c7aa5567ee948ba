//! # API Facade / Mutation Coordinator
//!
//! [`RosterApi`] is the single entry point for all roster operations,
//! regardless of the UI driving it. It owns three pieces of state:
//!
//! - the **record cache**: the last fetched user collection, replaced
//!   wholesale on every refresh (never patched), with a generation counter
//!   so consumers can detect stale derived views;
//! - the **pending set**: one in-flight key per logical mutation target,
//!   rejecting duplicate submits against the same target while allowing
//!   distinct mutations to overlap;
//! - the **notification channel**: the coordinator publishes success and
//!   failure notifications; the presentation layer drains the receiver.
//!
//! Every mutation follows the same contract: validate before anything is
//! in flight, mark the target pending, call the command, then either
//! publish success and refetch the whole collection, or publish the error
//! and leave the cache untouched so the next rendered view still shows
//! server truth. Either way the target returns to idle and the caller's
//! input is preserved for retry.
//!
//! The api is generic over [`UserStore`]: production uses
//! `RosterApi<HttpStore>`, tests use `RosterApi<InMemoryStore>`.

use std::collections::HashSet;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use crate::cache::RecordCache;
use crate::commands::{self, CmdResult};
use crate::error::{Result, RosterError};
use crate::model::UserDraft;
use crate::notify::Notification;
use crate::store::UserStore;
use crate::validate;
use crate::view::{build_view, ViewPage, ViewState};

/// Logical target of an in-flight mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum MutationKey {
    Create,
    Update(i64),
    Delete(i64),
}

impl MutationKey {
    fn describe(&self) -> String {
        match self {
            MutationKey::Create => "A create".to_string(),
            MutationKey::Update(id) => format!("An update of user {}", id),
            MutationKey::Delete(id) => format!("A delete of user {}", id),
        }
    }
}

pub struct RosterApi<S: UserStore> {
    store: S,
    cache: RwLock<RecordCache>,
    pending: Mutex<HashSet<MutationKey>>,
    notifier: UnboundedSender<Notification>,
}

impl<S: UserStore> RosterApi<S> {
    /// Build the api together with the receiving end of its notification
    /// channel.
    pub fn new(store: S) -> (Self, UnboundedReceiver<Notification>) {
        let (notifier, notifications) = mpsc::unbounded_channel();
        (
            Self {
                store,
                cache: RwLock::new(RecordCache::new()),
                pending: Mutex::new(HashSet::new()),
                notifier,
            },
            notifications,
        )
    }

    /// Re-read the full collection and replace the cache wholesale.
    /// Returns the new cache generation. On failure the cache is
    /// invalidated: the old data can no longer be trusted to be current.
    pub async fn refresh(&self) -> Result<u64> {
        match self.store.list_users().await {
            Ok(users) => {
                let generation = self.cache.write().await.populate(users);
                debug!("record cache refreshed, generation {}", generation);
                Ok(generation)
            }
            Err(e) => {
                self.cache.write().await.invalidate();
                Err(e)
            }
        }
    }

    /// Derive the visible page from the cached collection. Fails if no
    /// valid fetch has happened yet.
    pub async fn view(&self, state: &ViewState) -> Result<ViewPage> {
        let cache = self.cache.read().await;
        match cache.records() {
            Some(records) => Ok(build_view(records, state)),
            None => Err(RosterError::Api(
                "User list has not been fetched; refresh first".to_string(),
            )),
        }
    }

    pub async fn generation(&self) -> u64 {
        self.cache.read().await.generation()
    }

    /// Whether a view derived at `generation` may still be shown.
    pub async fn is_current(&self, generation: u64) -> bool {
        self.cache.read().await.is_current(generation)
    }

    pub async fn create_user(&self, draft: &UserDraft) -> Result<CmdResult> {
        // Validation failures are field-level and rendered inline; they
        // never become pending and never reach the notification channel.
        validate::validate_draft(draft)?;

        self.begin(MutationKey::Create).await?;
        let outcome = commands::create::run(&self.store, draft).await;
        self.settle(MutationKey::Create, outcome).await
    }

    pub async fn update_user(&self, id: i64, draft: &UserDraft) -> Result<CmdResult> {
        validate::validate_draft(draft)?;

        self.begin(MutationKey::Update(id)).await?;
        let outcome = commands::update::run(&self.store, id, draft).await;
        self.settle(MutationKey::Update(id), outcome).await
    }

    pub async fn delete_user(&self, id: i64) -> Result<CmdResult> {
        self.begin(MutationKey::Delete(id)).await?;
        let outcome = commands::delete::run(&self.store, id).await;
        self.settle(MutationKey::Delete(id), outcome).await
    }

    pub async fn get_user(&self, id: i64) -> Result<CmdResult> {
        commands::get::run(&self.store, id).await
    }

    /// Mark a mutation target pending, rejecting a duplicate submit.
    async fn begin(&self, key: MutationKey) -> Result<()> {
        let mut pending = self.pending.lock().await;
        if !pending.insert(key) {
            return Err(RosterError::Api(format!(
                "{} is already in progress",
                key.describe()
            )));
        }
        Ok(())
    }

    /// Return the target to idle and finish the success or failure path.
    async fn settle(&self, key: MutationKey, outcome: Result<CmdResult>) -> Result<CmdResult> {
        self.pending.lock().await.remove(&key);

        match outcome {
            Ok(result) => {
                for message in &result.messages {
                    self.notify(message.clone());
                }
                self.refetch_after_mutation().await;
                Ok(result)
            }
            Err(e) => {
                self.notify(Notification::error(e.to_string()));
                Err(e)
            }
        }
    }

    /// Invalidate-and-refetch after a successful write. A failed refetch
    /// leaves the cache invalidated and downgrades to a warning: the
    /// mutation itself succeeded.
    async fn refetch_after_mutation(&self) {
        self.cache.write().await.invalidate();
        match self.store.list_users().await {
            Ok(users) => {
                self.cache.write().await.populate(users);
            }
            Err(e) => {
                self.notify(Notification::warning(format!(
                    "User list could not be refreshed: {}",
                    e
                )));
            }
        }
    }

    /// Publishing to a dropped receiver is a no-op: a mutation completing
    /// after the consumer has gone away must not crash.
    fn notify(&self, notification: Notification) {
        let _ = self.notifier.send(notification);
    }
}
