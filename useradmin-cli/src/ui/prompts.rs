use anyhow::Result;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Confirm, FuzzySelect, Input, Select};
use useradmin::prelude::*;

use super::warning;

/// Whether prompts can be shown at all
pub fn is_interactive() -> bool {
    console::user_attended() && console::user_attended_stderr()
}

/// Prompt for each field of `form`, pre-filled with its current value
///
/// With `only_missing`, fields that already hold a value are left alone.
pub fn fill_form(form: &mut UserForm, only_missing: bool) -> Result<()> {
    let theme = ColorfulTheme::default();

    if !only_missing {
        println!("\n{}", form.title().bold().cyan());
    }

    for field in Field::ALL {
        if only_missing && !form.value(field).trim().is_empty() {
            continue;
        }

        let value: String = Input::with_theme(&theme)
            .with_prompt(field.label())
            .with_initial_text(form.value(field))
            .validate_with(move |input: &String| check_field(field, input))
            .interact_text()?;

        form.set(field, value);
    }

    Ok(())
}

/// Ask whether to edit the form again after a failed submission
pub fn retry() -> Result<bool> {
    Ok(Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("Edit and submit again?")
        .default(true)
        .interact()?)
}

/// Let the operator pick one of `users`; `None` if they backed out
pub fn pick_user<'a>(users: &'a [User], prompt: &str) -> Result<Option<&'a User>> {
    let items: Vec<String> = users
        .iter()
        .map(|u| format!("{} <{}>", u.display_name(), u.email))
        .collect();

    let choice = FuzzySelect::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(&items)
        .default(0)
        .interact_opt()?;

    Ok(choice.and_then(|idx| users.get(idx)))
}

/// Confirmation dialog on the terminal
///
/// Defaults to the cancel option; a dialog that cannot be shown counts as
/// cancelled.
pub struct DialoguerConfirmer;

impl Confirmer for DialoguerConfirmer {
    fn confirm(&self, prompt: &ConfirmPrompt) -> bool {
        warning(&prompt.text);

        let answer = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(&prompt.title)
            .items(&[prompt.confirm_label.as_str(), prompt.cancel_label.as_str()])
            .default(1)
            .interact_opt();

        match answer {
            Ok(choice) => choice == Some(0),
            Err(e) => {
                tracing::warn!(error = %e, "Confirmation prompt failed");
                false
            }
        }
    }
}
