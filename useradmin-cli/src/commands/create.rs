use anyhow::Result;
use std::time::Duration;
use useradmin::views::UserForm;

use super::{run_form, AppContext, FormArgs, GlobalArgs, Reported, SubmitTo};
use crate::ui::prompts;

pub async fn execute(global: &GlobalArgs, fields: FormArgs) -> Result<()> {
    let ctx = AppContext::load(global)?;
    let api = ctx.api()?;
    let notifier = ctx.notifier();

    let mut form = UserForm::create();
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
        return Err(Reported("user was not registered".to_string()).into());
    }
    Ok(())
}
