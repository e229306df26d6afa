mod actions;
mod cli;
mod config;
mod error;
mod models;
mod player;
mod render;
mod window;

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use actions::Action;
use cli::{App, Cli, Commands, report_error};

fn main() -> ExitCode {
    // Initialize logging. Stdout belongs to the editor.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let json = cli.json;

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report_error(json, &e),
    }
}

fn run(cli: Cli) -> Result<()> {
    let app = App::new(cli.config_path.as_deref(), cli.json)?;

    match cli.command {
        Commands::Action { name, value } => {
            app.action_by_name(&name, value.as_deref())?;
        }
        Commands::Toggle => {
            app.action(Action::Toggle, None)?;
        }
        Commands::Play => {
            app.action(Action::Play, None)?;
        }
        Commands::Pause => {
            app.action(Action::Pause, None)?;
        }
        Commands::Stop => {
            app.action(Action::Stop, None)?;
        }
        Commands::Next => {
            app.action(Action::Next, None)?;
        }
        Commands::Previous => {
            app.action(Action::Prev, None)?;
        }
        Commands::Show => {
            app.action(Action::Show, None)?;
        }
        Commands::Status => {
            app.action(Action::Status, None)?;
        }
        Commands::Volume { value } => {
            app.action(Action::Volume, value.as_deref())?;
        }
        Commands::Shuffle { value } => {
            app.action(Action::Shuffle, value.as_deref())?;
        }
        Commands::Time { value } => {
            app.action(Action::Time, value.as_deref())?;
        }
        Commands::Render {
            cycle,
            snapshot,
            config_json,
        } => {
            app.render(cycle, snapshot.as_deref(), config_json.as_deref())?;
        }
        Commands::Metadata => {
            app.metadata()?;
        }
        Commands::Snapshot => {
            app.snapshot()?;
        }
        Commands::Complete { lead } => {
            app.complete(&lead)?;
        }
        Commands::Config => {
            app.show_config()?;
        }
    }

    Ok(())
}
