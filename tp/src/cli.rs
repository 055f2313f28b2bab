//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Trip Planner - plan a city itinerary with optimized routes
#[derive(Parser)]
#[command(
    name = "tp",
    about = "Plan your perfect city itinerary with optimized routes",
    version = env!("GIT_DESCRIBE"),
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Planning service base address (overrides config)
    #[arg(long = "base-url", global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Subcommand to execute; the interactive form runs when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Plan a trip for a city and print the itinerary
    Plan {
        /// City name
        city: String,

        /// Also download the KML file into the download directory
        #[arg(short, long)]
        download: bool,
    },

    /// Download a KML file by its server-relative path
    Download {
        /// Path returned by the service, e.g. /files/paris.kml
        #[arg(value_name = "KML_PATH")]
        kml_path: String,

        /// Output file (default: download dir + file name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_tui() {
        let cli = Cli::try_parse_from(["tp"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_plan_with_global_base_url() {
        let cli = Cli::try_parse_from(["tp", "plan", "New York", "--base-url", "http://10.0.0.5:8000"]).unwrap();
        assert_eq!(cli.base_url.as_deref(), Some("http://10.0.0.5:8000"));
        match cli.command {
            Some(Command::Plan { city, download }) => {
                assert_eq!(city, "New York");
                assert!(!download);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_download_output() {
        let cli = Cli::try_parse_from(["tp", "download", "/files/paris.kml", "-o", "paris.kml"]).unwrap();
        match cli.command {
            Some(Command::Download { kml_path, output }) => {
                assert_eq!(kml_path, "/files/paris.kml");
                assert_eq!(output, Some(PathBuf::from("paris.kml")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
