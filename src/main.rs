use std::env;
use std::path::Path;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use console::style;

use obs_pack::cli::{Cli, Commands};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        // Bad invocations print usage but still exit 0.
        Err(e) => {
            e.print()?;
            return Ok(());
        }
    };

    let output_dir = match cli.output_dir {
        Some(dir) => dir,
        None => env::current_dir()?,
    };

    dispatch(cli.command, &output_dir)
}

fn dispatch(command: Commands, output_dir: &Path) -> Result<()> {
    match command {
        Commands::Pack { scenes } => {
            let report = obs_pack::cli::pack::run(&scenes, output_dir)?;
            eprintln!("  References: {}", style(report.references).bold());
            eprintln!("  Assets: {}", style(report.assets.len()).bold());
            eprintln!("  Archive: {}", style(report.archive.display()).dim());
        }
        Commands::Unpack { archive } => {
            let report = obs_pack::cli::unpack::run(&archive, output_dir)?;
            eprintln!("  Restored: {}", style(report.restored).bold());
            eprintln!("  Folder: {}", style(report.directory.display()).dim());
        }
    }
    Ok(())
}
