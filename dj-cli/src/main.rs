mod cli;
mod cli_modes;
mod codec;
mod common;
mod render;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command, ListArgs};
use dj_core::{Config, Journal};
use render::{RenderOptions, Renderer, use_color};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("dj: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("DJ_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let config = Config::load()?;
    let short_mode = matches!(&cli.command, Some(Command::List(args)) if args.short);
    let renderer = Renderer::new(Some(RenderOptions {
        date_format: config.date_format.clone(),
        use_color: use_color(cli.color),
        short_mode,
    }));

    if cli.path {
        renderer.print_info(&format!("{}", config.data_dir.display()));
        return Ok(());
    }

    debug!(data_dir = %config.data_dir.display(), "opening journal");
    let mut journal = Journal::with_config(&config)?;

    match cli.command {
        Some(Command::New(args)) => cli_modes::new_mode(&args, &config, &renderer, &mut journal),
        Some(Command::Edit(args)) => cli_modes::edit_mode(&args, &config, &renderer, &mut journal),
        Some(Command::Rm { id, yes }) => cli_modes::delete_mode(&id, yes, &renderer, &mut journal),
        Some(Command::List(args)) => cli_modes::list_mode(&args, &config, &renderer, &journal),
        Some(Command::Show { id }) => cli_modes::show_mode(&id, &renderer, &journal),
        Some(Command::Export { out }) => cli_modes::export_mode(out.as_deref(), &renderer, &journal),
        Some(Command::Import { file, yes }) => {
            cli_modes::import_mode(&file, yes, &renderer, &mut journal)
        }
        Some(Command::Usage) => cli_modes::usage_mode(&renderer, &journal),
        None => cli_modes::list_mode(&ListArgs::default(), &config, &renderer, &journal),
    }
}
