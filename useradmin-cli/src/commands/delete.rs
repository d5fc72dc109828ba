use anyhow::{Context, Result};
use useradmin::prelude::*;

use super::{AppContext, GlobalArgs, Reported};
use crate::ui::prompts::{self, DialoguerConfirmer};

pub async fn execute(global: &GlobalArgs, id: UserId, yes: bool) -> Result<()> {
    let ctx = AppContext::load(global)?;
    let api = ctx.api()?;
    let notifier = ctx.notifier();

    if !yes && !prompts::is_interactive() {
        anyhow::bail!("Refusing to delete without a terminal to confirm on; pass --yes");
    }

    let user = api
        .get_user(&id)
        .await
        .with_context(|| format!("Could not load user {id}"))?;

    let confirmer: Option<&dyn Confirmer> = if yes { None } else { Some(&DialoguerConfirmer) };
    match delete_user(api.as_ref(), notifier.as_ref(), &user, confirmer).await {
        DeleteOutcome::Deleted => Ok(()),
        DeleteOutcome::Cancelled => {
            crate::ui::info("Nothing was deleted");
            Ok(())
        }
        DeleteOutcome::Failed => Err(Reported(messages::DELETE_FAILED.to_string()).into()),
    }
}
