mod api;
mod cli;
mod config;
mod controller;
mod error;
mod logging;
mod shell;
mod ui;

use anyhow::{Result, bail};
use clap::Parser;

use api::{FormDraft, RecordClient};
use cli::{Cli, Command};
use config::RosterConfig;
use controller::ViewController;
use error::RosterError;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let config = RosterConfig::load(cli.config.as_deref())?.with_api_url(cli.api_url.clone())?;
    tracing::debug!(api_url = %config.api_url, "configuration loaded");

    let client = RecordClient::new(&config.api_url).map_err(RosterError::from)?;
    let ctrl = ViewController::new(client);

    match cli.resolved_command() {
        Command::List => {
            ui::with_spinner("Loading...", ctrl.refresh()).await;
        }
        Command::Add { name, email } => {
            let draft = FormDraft::new(name, email);
            if let Some(field) = draft.missing_field() {
                bail!("Please fill out the {field} field.");
            }
            ctrl.set_draft(draft);
            ui::with_spinner("Adding...", ctrl.submit()).await;
        }
        Command::Delete { id } => {
            ui::with_spinner("Deleting...", ctrl.remove(id)).await;
        }
        Command::Shell => {
            shell::run(&ctrl).await?;
            return Ok(());
        }
    }

    println!("{}", ui::render(&ctrl.state(), &ctrl.draft()));
    Ok(())
}
