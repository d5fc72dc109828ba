use anyhow::{Context, Result};
use useradmin::views::{messages, UserListView};

use super::{AppContext, GlobalArgs, Reported};
use crate::ui::table;

pub async fn execute(global: &GlobalArgs, json: bool) -> Result<()> {
    let ctx = AppContext::load(global)?;
    let mut view = UserListView::new(ctx.api()?, ctx.notifier());
    let loaded = view.reload().await;

    if json {
        if loaded {
            let out = serde_json::to_string_pretty(view.users())
                .context("Failed to serialize users")?;
            println!("{out}");
        }
    } else {
        println!("{}", table::render_users(&view.rows(), view.empty_message()));
    }

    if !loaded {
        return Err(Reported(messages::LOAD_FAILED.to_string()).into());
    }
    Ok(())
}
