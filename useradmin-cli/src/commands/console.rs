use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Select};

use super::{run_form, AppContext, GlobalArgs, SubmitTo};
use crate::ui::{self, prompts, table};
use useradmin::views::UserListView;

const ACTIONS: [&str; 5] = ["Reload", "Register user", "Edit user", "Delete user", "Quit"];

pub async fn execute(global: &GlobalArgs) -> Result<()> {
    let ctx = AppContext::load(global)?;

    if !prompts::is_interactive() {
        anyhow::bail!("The console needs a terminal; use `useradmin list` in scripts");
    }

    let close_delay = ctx.config.ui.close_delay();
    let mut view = UserListView::new(ctx.api()?, ctx.notifier());
    view.reload().await;

    let theme = ColorfulTheme::default();
    loop {
        ui::section("Users");
        println!("{}", table::render_users(&view.rows(), view.empty_message()));

        let action = Select::with_theme(&theme)
            .with_prompt("Action")
            .items(&ACTIONS)
            .default(0)
            .interact_opt()?;

        match action {
            Some(0) => {
                view.reload().await;
            }
            Some(1) => {
                let mut form = view.create_form();
                run_form(SubmitTo::List(&mut view), &mut form, close_delay, true, true).await?;
            }
            Some(2) => {
                if view.is_empty() {
                    ui::info(view.empty_message());
                    continue;
                }
                let Some(user) = prompts::pick_user(view.users(), "Edit which user?")?.cloned()
                else {
                    continue;
                };
                if let Some(mut form) = view.edit_form(&user) {
                    run_form(SubmitTo::List(&mut view), &mut form, close_delay, true, true).await?;
                }
            }
            Some(3) => {
                if view.is_empty() {
                    ui::info(view.empty_message());
                    continue;
                }
                let Some(user) = prompts::pick_user(view.users(), "Delete which user?")?.cloned()
                else {
                    continue;
                };
                view.delete(&user, &prompts::DialoguerConfirmer).await;
            }
            _ => break,
        }
    }

    Ok(())
}
