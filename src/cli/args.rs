//! CLI argument definitions using clap
//!
//! Commands:
//! - suggestd serve [--config <path>] [--file <path>] [--period <min>] [--port <n>] [--timeout <sec>]
//! - suggestd check --file <path>

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// suggestd - ranked suggestions from a periodically reloaded dataset
#[derive(Parser, Debug)]
#[command(name = "suggestd")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve suggestions over HTTP, reloading the dataset periodically
    Serve(ServeArgs),

    /// Parse a dataset file, report its size and exit
    Check {
        /// Path to the dataset file
        #[arg(long, default_value = "suggestions.json")]
        file: PathBuf,
    },
}

/// Flags for `serve`. Anything left unset falls back to the config file,
/// then to built-in defaults.
#[derive(Args, Debug, Default, Clone)]
pub struct ServeArgs {
    /// Path to a JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// File with suggestions data
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Reload period in minutes
    #[arg(long)]
    pub period: Option<u64>,

    /// Listening port
    #[arg(long)]
    pub port: Option<u16>,

    /// Listening host
    #[arg(long)]
    pub host: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_flags() {
        let cli = Cli::try_parse_from([
            "suggestd", "serve", "--file", "data.json", "--period", "5", "--port", "9000",
            "--timeout", "3",
        ])
        .unwrap();

        match cli.command {
            Command::Serve(args) => {
                assert_eq!(args.file, Some(PathBuf::from("data.json")));
                assert_eq!(args.period, Some(5));
                assert_eq!(args.port, Some(9000));
                assert_eq!(args.timeout, Some(3));
                assert_eq!(args.config, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_check_default_file() {
        let cli = Cli::try_parse_from(["suggestd", "check"]).unwrap();
        match cli.command {
            Command::Check { file } => assert_eq!(file, PathBuf::from("suggestions.json")),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
