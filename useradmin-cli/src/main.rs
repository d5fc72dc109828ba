use clap::{Parser, Subcommand};
use colored::Colorize;

mod commands;
mod ui;

use commands::config::ConfigCommands;
use commands::setup::SetupCommands;
use commands::{FormArgs, GlobalArgs, Reported};
use useradmin::ids::UserId;

/// useradmin - Manage user records on a REST backend
#[derive(Parser)]
#[command(name = "useradmin")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    /// Without a command the interactive console starts
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive table with create, edit and delete actions
    Console,
    /// Print all users
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print a single user
    Show {
        /// User uuid or numeric id
        #[arg(value_name = "ID")]
        id: UserId,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Register a new user
    Create {
        #[command(flatten)]
        fields: FormArgs,
    },
    /// Edit an existing user
    Update {
        /// User uuid or numeric id
        #[arg(value_name = "ID")]
        id: UserId,

        #[command(flatten)]
        fields: FormArgs,
    },
    /// Delete a user after confirmation
    Delete {
        /// User uuid or numeric id
        #[arg(value_name = "ID")]
        id: UserId,

        /// Skip the confirmation dialog
        #[arg(short, long)]
        yes: bool,
    },
    /// Configuration commands
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Setup and configuration commands
    Setup {
        #[command(subcommand)]
        command: SetupCommands,
    },
}

#[tokio::main]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();
    let global = cli.global;

    // Execute command
    let result = match cli.command.unwrap_or(Commands::Console) {
        Commands::Console => commands::console::execute(&global).await,
        Commands::List { json } => commands::list::execute(&global, json).await,
        Commands::Show { id, json } => commands::show::execute(&global, id, json).await,
        Commands::Create { fields } => commands::create::execute(&global, fields).await,
        Commands::Update { id, fields } => commands::update::execute(&global, id, fields).await,
        Commands::Delete { id, yes } => commands::delete::execute(&global, id, yes).await,
        Commands::Config { command } => commands::config::execute(&global, command).await,
        Commands::Setup { command } => commands::setup::execute(command).await,
    };

    // Handle result
    match result {
        Ok(()) => std::process::exit(0),
        // Already shown as a notification
        Err(e) if e.is::<Reported>() => std::process::exit(1),
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);

            // Show context if available
            if let Some(source) = e.source() {
                eprintln!("\n{} {}", "Caused by:".yellow(), source);
            }

            std::process::exit(1);
        }
    }
}
