use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::UserDraft;
use crate::notify::Notification;
use crate::store::UserStore;
use crate::validate;

/// Validate the draft and replace the user wholesale.
pub async fn run<S: UserStore>(store: &S, id: i64, draft: &UserDraft) -> Result<CmdResult> {
    validate::validate_draft(draft)?;

    let user = store.update_user(id, draft).await?;
    let mut result = CmdResult::default();
    result.add_message(Notification::success(format!(
        "User updated (#{}): {}",
        user.id, user.name
    )));
    result.affected_users.push(user);
    Ok(result)
}
