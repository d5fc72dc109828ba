use anyhow::{Context, Result};
use clap::{CommandFactory, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::ui;
use crate::Cli;

const BIN_NAME: &str = "useradmin";

#[derive(Subcommand)]
pub enum SetupCommands {
    /// Generate and install shell completions
    Completions {
        /// Shell to generate completions for (auto-detected if not specified)
        #[arg(short, long, value_name = "SHELL")]
        shell: Option<Shell>,

        /// Output to stdout instead of installing
        #[arg(long)]
        stdout: bool,
    },
}

pub async fn execute(command: SetupCommands) -> Result<()> {
    match command {
        SetupCommands::Completions { shell, stdout } => {
            let shell = match shell {
                Some(s) => s,
                None => detect_shell()?,
            };

            if stdout {
                generate(shell, &mut Cli::command(), BIN_NAME, &mut io::stdout());
                Ok(())
            } else {
                install(shell)
            }
        }
    }
}

/// Where completions for one shell live and what the shell needs to load them
struct Target {
    dir: PathBuf,
    file: String,
    setup: &'static [&'static str],
}

impl Target {
    fn for_shell(shell: Shell, home: &Path) -> Result<Self> {
        let target = match shell {
            Shell::Bash => Target {
                dir: home.join(".local/share/bash-completion/completions"),
                file: BIN_NAME.to_string(),
                setup: &[],
            },
            Shell::Zsh => Target {
                dir: home.join(".zfunc"),
                file: format!("_{BIN_NAME}"),
                setup: &[
                    "Add to ~/.zshrc:",
                    "  fpath=(~/.zfunc $fpath)",
                    "  autoload -Uz compinit && compinit",
                ],
            },
            Shell::Fish => Target {
                dir: home.join(".config/fish/completions"),
                file: format!("{BIN_NAME}.fish"),
                setup: &[],
            },
            Shell::PowerShell => Target {
                dir: home.join("Documents/PowerShell/Completions"),
                file: format!("{BIN_NAME}.ps1"),
                setup: &["Dot-source the file from your PowerShell profile ($PROFILE)"],
            },
            Shell::Elvish => Target {
                dir: home.join(".config/elvish/lib"),
                file: format!("{BIN_NAME}.elv"),
                setup: &["Add to ~/.config/elvish/rc.elv:", "  use useradmin"],
            },
            other => anyhow::bail!("Unsupported shell: {:?}", other),
        };
        Ok(target)
    }
}

/// Detect the user's current shell from $SHELL
fn detect_shell() -> Result<Shell> {
    let shell_path = env::var("SHELL")
        .context("Failed to detect shell. $SHELL not set. Use --shell to specify explicitly.")?;

    Shell::from_shell_path(&shell_path).with_context(|| {
        format!(
            "Unsupported shell: {shell_path}. Supported shells: bash, zsh, fish, powershell, elvish.\n\
             Use --shell to specify explicitly."
        )
    })
}

fn install(shell: Shell) -> Result<()> {
    let home = dirs::home_dir().context("Failed to find home directory")?;
    let target = Target::for_shell(shell, &home)?;

    fs::create_dir_all(&target.dir)
        .with_context(|| format!("Failed to create directory: {}", target.dir.display()))?;

    let path = target.dir.join(&target.file);
    let mut file = fs::File::create(&path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;
    generate(shell, &mut Cli::command(), BIN_NAME, &mut file);

    ui::success(&format!(
        "Completions installed for {}",
        format!("{shell:?}").cyan()
    ));
    println!("  {}", path.display().to_string().dimmed());

    if target.setup.is_empty() {
        println!("\nCompletions load automatically in new shells.");
    } else {
        println!("\n{}", "Required setup:".yellow().bold());
        for line in target.setup {
            println!("  {line}");
        }
    }

    Ok(())
}
