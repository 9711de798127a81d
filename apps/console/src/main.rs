use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{ControllerState, HttpUserApi, UserApi, UserListController};
use shared::domain::{NewUser, UserId};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod render;

use config::{load_settings, resolve_server_url};
use render::StateView;

#[derive(Parser, Debug)]
#[command(name = "user-console", about = "List, add and delete users through the user API")]
struct Cli {
    /// Base URL of the user API, overriding console.toml and the environment.
    #[arg(long)]
    server_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    List,
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    Delete {
        #[arg(long)]
        id: i64,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let (settings, config_warning) = load_settings();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.log_filter))
        .with_writer(io::stderr)
        .init();
    if let Some(warning) = config_warning {
        warn!("{warning}");
    }

    let server_url = resolve_server_url(&settings, cli.server_url.as_deref())?;
    debug!(%server_url, "using user api");
    let mut controller = UserListController::new(HttpUserApi::new(server_url));

    let mut input = io::stdin().lock();
    let mut output = io::stdout().lock();
    let outcome = run(&mut controller, cli.command, &mut input, &mut output).await;
    write!(output, "{}", StateView(controller.state()))?;
    outcome
}

async fn run<A: UserApi>(
    controller: &mut UserListController<A>,
    command: Command,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<()> {
    match command {
        Command::List => controller.fetch_users().await?,
        Command::Add { name, email } => {
            // A failed refresh keeps its alert; the add still runs.
            let fetched = controller.fetch_users().await;
            controller.toggle_add_form();
            controller.state_mut().new_user = NewUser::new(name, email);
            controller.add_user().await?;
            fetched?;
        }
        Command::Delete { id, yes } => {
            controller.fetch_users().await?;
            let user_id = UserId(id);
            let user_name = controller
                .state()
                .users
                .iter()
                .find(|user| user.id == user_id)
                .map(|user| user.name.clone())
                .with_context(|| format!("no user with id {user_id}"))?;

            controller.show_delete_confirmation(user_id, &user_name);
            if yes || prompt_confirmation(controller.state(), input, output)? {
                controller.confirm_deletion().await?;
            } else {
                controller.cancel_deletion();
            }
        }
    }
    Ok(())
}

fn prompt_confirmation(
    state: &ControllerState,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<bool> {
    write!(output, "{}: {} [y/N] ", state.modal_title, state.modal_message)?;
    output.flush()?;

    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .context("failed to read confirmation")?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
