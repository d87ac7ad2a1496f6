//! Point d'entrée CLI pour verts-dash

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

mod cli;
mod export;
mod filter;
mod history;
mod inspect;
mod presentation;

use cli::Commands;

/// Tableau de bord des espaces verts parisiens, côté moteur
#[derive(Parser)]
#[command(name = "verts-dash")]
#[command(author, version)]
#[command(about = "Normaliser, filtrer et exporter le jeu de données des espaces verts parisiens")]
struct Cli {
    /// Augmenter la verbosité (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Mode silencieux
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Configurer le logging
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Normalize {
            input,
            output,
            report,
        } => {
            info!(input = %input.display(), "Normalize");
            cli::cmd_normalize(&input, &output, report.as_deref())?;
        }
        Commands::Inspect { input } => {
            cli::cmd_inspect(&input)?;
        }
        Commands::Export {
            input,
            output,
            categories,
            arrondissements,
            min_surface,
            open_24h,
            enclosure,
            with_coords,
            geojson,
        } => {
            info!(input = %input.display(), "Export filtered view");
            cli::cmd_export(
                &input,
                &output,
                categories,
                arrondissements,
                min_surface,
                open_24h,
                enclosure,
                with_coords,
                geojson.as_deref(),
            )?;
        }
        Commands::History {
            input,
            year,
            output,
        } => {
            info!(year, "Historical view");
            cli::cmd_history(&input, year, &output)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::WARN,
        (_, 0) => Level::INFO,
        (_, 1) => Level::DEBUG,
        (_, _) => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .init();
}
