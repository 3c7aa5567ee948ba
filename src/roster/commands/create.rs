use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::UserDraft;
use crate::notify::Notification;
use crate::store::UserStore;
use crate::validate;

/// Validate the draft and create the user. Validation failures never reach
/// the store.
pub async fn run<S: UserStore>(store: &S, draft: &UserDraft) -> Result<CmdResult> {
    validate::validate_draft(draft)?;

    let user = store.create_user(draft).await?;
    let mut result = CmdResult::default();
    result.add_message(Notification::success(format!(
        "User created (#{}): {}",
        user.id, user.name
    )));
    result.affected_users.push(user);
    Ok(result)
}
