//! Core CLI definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mcc")]
#[command(about = "ItemsAdder to CraftEngine pack converter", long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Conversion target schema
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Target {
    #[default]
    Craftengine,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Detect plugin formats and content in an extracted pack
    #[command(visible_alias = "a")]
    Analyze {
        /// Extracted pack directory
        input: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert an extracted ItemsAdder pack
    #[command(visible_alias = "c")]
    Convert {
        /// Extracted pack directory
        input: PathBuf,

        /// Output directory (receives configuration/ and resourcepack/)
        #[arg(short, long)]
        output: PathBuf,

        /// Namespace for converted items (defaults to the pack's own)
        #[arg(short, long, env = "MCC_NAMESPACE")]
        namespace: Option<String>,

        /// Target schema
        #[arg(short, long, value_enum, default_value_t = Target::Craftengine)]
        target: Target,

        /// Convert even if no ItemsAdder content is detected or the output
        /// directory is not empty
        #[arg(short, long)]
        force: bool,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate missing item models in a CraftEngine resource pack
    #[command(visible_alias = "m")]
    Models {
        /// Resource pack root (contains assets/)
        resourcepack: PathBuf,

        /// Namespace folder under assets/
        #[arg(short, long)]
        namespace: String,
    },

    /// Configure default settings
    Configure {
        /// Set default namespace
        #[arg(long)]
        namespace: Option<String>,

        /// Set seat height offset subtracted from sit heights
        #[arg(long)]
        seat_offset: Option<f64>,

        /// Set file name fragment marking armor layer textures
        #[arg(long)]
        layer_marker: Option<String>,

        /// Add a name accent color (NAMESPACE_PATTERN=COLOR, repeatable)
        #[arg(long = "accent", value_name = "PATTERN=COLOR")]
        accents: Vec<String>,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_convert() {
        let cli = Cli::parse_from([
            "mcc", "convert", "pack", "-o", "out", "-n", "mypack", "--force",
        ]);
        match cli.command {
            Commands::Convert {
                input,
                output,
                namespace,
                target,
                force,
                json,
            } => {
                assert_eq!(input, PathBuf::from("pack"));
                assert_eq!(output, PathBuf::from("out"));
                assert_eq!(namespace.as_deref(), Some("mypack"));
                assert_eq!(target, Target::Craftengine);
                assert!(force);
                assert!(!json);
            }
            _ => panic!("expected convert"),
        }
    }

    #[test]
    fn test_parse_configure_accents() {
        let cli = Cli::parse_from([
            "mcc",
            "configure",
            "--accent",
            "elite=<#FFCF20>",
            "--accent",
            "gold=<gold>",
        ]);
        match cli.command {
            Commands::Configure { accents, show, .. } => {
                assert_eq!(accents, vec!["elite=<#FFCF20>", "gold=<gold>"]);
                assert!(!show);
            }
            _ => panic!("expected configure"),
        }
    }
}
