use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::UserStore;

pub async fn run<S: UserStore>(store: &S, id: i64) -> Result<CmdResult> {
    let user = store.get_user(id).await?;
    Ok(CmdResult::default().with_listed_users(vec![user]))
}
