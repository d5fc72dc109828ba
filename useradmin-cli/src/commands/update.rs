use anyhow::{Context, Result};
use std::time::Duration;
use useradmin::prelude::*;

use super::{run_form, AppContext, FormArgs, GlobalArgs, Reported, SubmitTo};
use crate::ui::prompts;

pub async fn execute(global: &GlobalArgs, id: UserId, fields: FormArgs) -> Result<()> {
    let ctx = AppContext::load(global)?;
    let api = ctx.api()?;
    let notifier = ctx.notifier();

    let user = api
        .get_user(&id)
        .await
        .with_context(|| format!("Could not load user {id}"))?;

    let Ok(mut form) = UserForm::edit(&user) else {
        notifier.error(messages::MISSING_ID);
        return Err(Reported(messages::MISSING_ID.to_string()).into());
    };
    fields.apply(&mut form);

    let target = SubmitTo::Api {
        api: api.as_ref(),
        notifier: notifier.as_ref(),
    };
    let saved = run_form(
        target,
        &mut form,
        Duration::ZERO,
        fields.is_empty(),
        prompts::is_interactive(),
    )
    .await?;

    if !saved {
        return Err(Reported("user was not updated".to_string()).into());
    }
    Ok(())
}
