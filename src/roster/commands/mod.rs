use crate::model::UserRecord;
use crate::notify::Notification;

pub mod create;
pub mod delete;
pub mod get;
pub mod update;

/// Structured result of a command: the records it touched or produced, plus
/// the notifications describing what happened. No I/O, no formatting.
#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_users: Vec<UserRecord>,
    pub listed_users: Vec<UserRecord>,
    pub messages: Vec<Notification>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: Notification) {
        self.messages.push(message);
    }

    pub fn with_affected_users(mut self, users: Vec<UserRecord>) -> Self {
        self.affected_users = users;
        self
    }

    pub fn with_listed_users(mut self, users: Vec<UserRecord>) -> Self {
        self.listed_users = users;
        self
    }
}
