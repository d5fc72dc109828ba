use anyhow::{Context as _, Result};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use useradmin::prelude::*;

use crate::ui;
use crate::ui::notifier::TerminalNotifier;
use crate::ui::prompts;

pub mod config;
pub mod console;
pub mod create;
pub mod delete;
pub mod list;
pub mod setup;
pub mod show;
pub mod update;

/// Options shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Read configuration from this file instead of the search path
    #[arg(long, global = true, value_name = "FILE", env = "USERADMIN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Backend base URL, overrides configuration
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Field values given on the command line
#[derive(Args, Debug, Clone, Default)]
pub struct FormArgs {
    /// Full name
    #[arg(long, value_name = "NAME")]
    pub full_name: Option<String>,

    /// Email address
    #[arg(long, value_name = "EMAIL")]
    pub email: Option<String>,

    /// Phone number
    #[arg(long, value_name = "PHONE")]
    pub phone: Option<String>,
}

impl FormArgs {
    fn values(&self) -> [(Field, Option<&String>); 3] {
        [
            (Field::FullName, self.full_name.as_ref()),
            (Field::Email, self.email.as_ref()),
            (Field::Phone, self.phone.as_ref()),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.values().iter().all(|(_, value)| value.is_none())
    }

    /// Copy the given values into `form`
    pub fn apply(&self, form: &mut UserForm) {
        for (field, value) in self.values() {
            if let Some(value) = value {
                form.set(field, value.as_str());
            }
        }
    }
}

/// Failure the operator has already been shown; exits 1 without printing
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct Reported(pub String);

/// Resolved configuration for one invocation
pub struct AppContext {
    pub config: Config,
}

/// Load configuration and apply command-line overrides
pub fn resolve_config(global: &GlobalArgs) -> Result<Config> {
    let mut config = match &global.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => Config::load().context("Failed to load configuration")?,
    };
    apply_overrides(&mut config, global);
    Ok(config)
}

/// `--base-url` and `-v` win over files and environment
pub fn apply_overrides(config: &mut Config, global: &GlobalArgs) {
    if let Some(url) = &global.base_url {
        config.api.base_url = Some(url.clone());
    }

    if global.verbose > 0 {
        config.log.level = match global.verbose {
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
        .to_string();
    }
}

impl AppContext {
    /// Resolve configuration and start tracing
    pub fn load(global: &GlobalArgs) -> Result<Self> {
        let config = resolve_config(global)?;
        init_tracing(&config.log);
        Ok(Self { config })
    }

    pub fn api(&self) -> Result<Arc<ApiClient>> {
        let client = ApiClient::from_config(&self.config.api)
            .context("Failed to set up the API client")?;
        tracing::debug!(url = %client.users_url(), "Using users endpoint");
        Ok(Arc::new(client))
    }

    pub fn notifier(&self) -> Arc<TerminalNotifier> {
        Arc::new(TerminalNotifier::new())
    }
}

/// Where a form is submitted
pub enum SubmitTo<'a> {
    /// Through the table, which refetches after a save
    List(&'a mut UserListView),
    /// Straight to the API; nothing is refetched
    Api {
        api: &'a dyn UserApi,
        notifier: &'a dyn Notifier,
    },
}

impl SubmitTo<'_> {
    async fn submit(&mut self, form: &mut UserForm) -> SubmitOutcome {
        match self {
            Self::List(view) => view.submit(form).await,
            Self::Api { api, notifier } => form.submit(*api, *notifier).await,
        }
    }
}

/// Fill and submit `form` until it saves or the operator gives up
///
/// Returns whether the form was saved. Fields are prompted for only when
/// `interactive`; otherwise a single attempt is made. Unless `prompt_all`
/// is set, the first round only asks for empty fields.
pub async fn run_form(
    mut target: SubmitTo<'_>,
    form: &mut UserForm,
    close_delay: Duration,
    prompt_all: bool,
    interactive: bool,
) -> Result<bool> {
    let mut only_missing = !prompt_all;

    loop {
        if interactive {
            prompts::fill_form(form, only_missing)?;
            only_missing = false;
        }

        match target.submit(form).await {
            SubmitOutcome::Saved(_) => {
                tokio::time::sleep(close_delay).await;
                return Ok(true);
            }
            SubmitOutcome::Invalid(errors) => ui::field_errors(&errors),
            SubmitOutcome::Failed(_) => {}
        }

        if !interactive || !prompts::retry()? {
            form.cancel();
            return Ok(false);
        }
    }
}
