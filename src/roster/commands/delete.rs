use crate::commands::CmdResult;
use crate::error::Result;
use crate::notify::Notification;
use crate::store::UserStore;

pub async fn run<S: UserStore>(store: &S, id: i64) -> Result<CmdResult> {
    store.delete_user(id).await?;
    let mut result = CmdResult::default();
    result.add_message(Notification::success(format!("User deleted (#{})", id)));
    Ok(result)
}
