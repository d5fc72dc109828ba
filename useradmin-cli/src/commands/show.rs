use anyhow::{Context, Result};
use useradmin::prelude::*;

use super::{AppContext, GlobalArgs};
use crate::ui::table;

pub async fn execute(global: &GlobalArgs, id: UserId, json: bool) -> Result<()> {
    let ctx = AppContext::load(global)?;
    let api = ctx.api()?;

    let user = api
        .get_user(&id)
        .await
        .with_context(|| format!("Could not load user {id}"))?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&user).context("Failed to serialize user")?
        );
    } else {
        println!("{}", table::render_user(&UserRow::from(&user)));
    }

    Ok(())
}
