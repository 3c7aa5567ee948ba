//! In-memory [`UserStore`] for testing and development.
//!
//! Behaves like the remote service: assigns ids on create, replaces records
//! wholesale on update, and fails with the same generic transport messages
//! the HTTP store would produce. `set_offline` simulates an outage;
//! `set_latency` inserts an await point so in-flight overlap is testable.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::UserStore;
use crate::error::{Result, RosterError};
use crate::model::{UserDraft, UserRecord};

#[derive(Debug, Default)]
struct Inner {
    users: Vec<UserRecord>,
    next_id: i64,
    offline: bool,
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: Mutex<Inner>,
    latency: Mutex<Option<Duration>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing records; ids continue after the highest
    /// seeded one.
    pub fn with_users(users: Vec<UserRecord>) -> Self {
        let next_id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        Self {
            inner: Mutex::new(Inner {
                users,
                next_id,
                offline: false,
            }),
            latency: Mutex::new(None),
        }
    }

    /// While offline, every operation fails with a transport error.
    pub fn set_offline(&self, offline: bool) {
        self.lock().offline = offline;
    }

    /// Delay every operation, simulating a slow network.
    pub fn set_latency(&self, latency: Duration) {
        *self
            .latency
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(latency);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    async fn simulate(&self, action: &str) -> Result<()> {
        let latency = *self
            .latency
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        if self.lock().offline {
            return Err(RosterError::Transport(format!(
                "Failed to {}. Please try again later.",
                action
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn list_users(&self) -> Result<Vec<UserRecord>> {
        self.simulate("fetch users").await?;
        Ok(self.lock().users.clone())
    }

    async fn get_user(&self, id: i64) -> Result<UserRecord> {
        self.simulate("fetch user").await?;
        self.lock()
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| {
                RosterError::Transport("Failed to fetch user. Please try again later.".into())
            })
    }

    async fn create_user(&self, draft: &UserDraft) -> Result<UserRecord> {
        self.simulate("create user").await?;
        let mut inner = self.lock();
        let id = inner.next_id.max(1);
        inner.next_id = id + 1;
        let user = draft.to_record(id);
        inner.users.push(user.clone());
        Ok(user)
    }

    async fn update_user(&self, id: i64, draft: &UserDraft) -> Result<UserRecord> {
        self.simulate("update user").await?;
        let mut inner = self.lock();
        let slot = inner.users.iter_mut().find(|u| u.id == id).ok_or_else(|| {
            RosterError::Transport("Failed to update user. Please try again later.".into())
        })?;
        *slot = draft.to_record(id);
        Ok(slot.clone())
    }

    async fn delete_user(&self, id: i64) -> Result<()> {
        self.simulate("delete user").await?;
        let mut inner = self.lock();
        let before = inner.users.len();
        inner.users.retain(|u| u.id != id);
        if inner.users.len() == before {
            return Err(RosterError::Transport(
                "Failed to delete user. Please try again later.".into(),
            ));
        }
        Ok(())
    }
}
