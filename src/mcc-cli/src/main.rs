mod cli;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::*;
use commands::configure::ConfigureArgs;
use commands::convert::ConvertArgs;

fn init_tracing(verbose: bool) {
    let default = if verbose { "mcc=debug" } else { "mcc=info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Analyze { input, json } => {
            commands::analyze::handle(&input, json)?;
        }

        Commands::Convert {
            input,
            output,
            namespace,
            target,
            force,
            json,
        } => {
            commands::convert::handle(ConvertArgs {
                input,
                output,
                namespace,
                target,
                force,
                json,
            })?;
        }

        Commands::Models {
            resourcepack,
            namespace,
        } => {
            commands::models::handle(&resourcepack, &namespace)?;
        }

        Commands::Configure {
            namespace,
            seat_offset,
            layer_marker,
            accents,
            show,
        } => {
            commands::configure::handle(
                ConfigureArgs {
                    namespace,
                    seat_offset,
                    layer_marker,
                    accents,
                },
                show,
            )?;
        }
    }

    Ok(())
}
