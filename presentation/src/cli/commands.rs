//! CLI command definitions

use buildcrew_domain::OutputFormat;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for a finished build
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
    /// Phase results and a file listing
    Summary,
    /// Every generated file with its content
    Files,
    /// The whole project state as JSON
    Json,
}

impl From<OutputArg> for OutputFormat {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Summary => OutputFormat::Summary,
            OutputArg::Files => OutputFormat::Files,
            OutputArg::Json => OutputFormat::Json,
        }
    }
}

/// CLI arguments for buildcrew
#[derive(Parser, Debug)]
#[command(name = "buildcrew")]
#[command(author, version, about = "A crew of AI agents turns a requirement into a project")]
#[command(long_about = r#"
buildcrew turns a one-line requirement into an architecture, frontend and
backend designs, a data model, source files and a deployment configuration.

The crew works in a fixed order:
1. Architect designs the system
2. Frontend and Backend designers work in parallel
3. Data Modeler derives the schema from the backend models
4. Code Generator writes one file per selected component and model
5. DevOps Engineer prepares the deployment files

Configuration files are loaded from (in priority order):
1. BUILDCREW_* environment variables
2. --config <path>           Explicit config file
3. ./buildcrew.toml          Project-level config
4. ~/.config/buildcrew/config.toml   Global config

Example:
  buildcrew "A todo app with user accounts"
  buildcrew --output files "A URL shortener"
  buildcrew --fixtures demos/todo.json "A todo app"
"#)]
pub struct Cli {
    /// The requirement to build (not required with --show-config)
    pub requirement: Option<String>,

    /// Answer from a JSON fixture file instead of calling the API
    #[arg(long, value_name = "PATH")]
    pub fixtures: Option<PathBuf>,

    /// Output format (defaults to the config file, then summary)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputArg>,

    /// Write diagnostic logs to this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_full_invocation() {
        let cli = Cli::try_parse_from([
            "buildcrew",
            "--output",
            "json",
            "--fixtures",
            "todo.json",
            "-vv",
            "-q",
            "A todo app",
        ])
        .unwrap();

        assert_eq!(cli.requirement.as_deref(), Some("A todo app"));
        assert_eq!(cli.output, Some(OutputArg::Json));
        assert_eq!(cli.fixtures, Some(PathBuf::from("todo.json")));
        assert_eq!(cli.verbose, 2);
        assert!(cli.quiet);
        assert!(!cli.no_config);
    }

    #[test]
    fn test_output_defaults_to_none() {
        let cli = Cli::try_parse_from(["buildcrew", "A blog"]).unwrap();
        assert!(cli.output.is_none());
        assert_eq!(OutputFormat::from(OutputArg::Files), OutputFormat::Files);
    }

    #[test]
    fn test_rejects_unknown_output() {
        assert!(Cli::try_parse_from(["buildcrew", "--output", "full", "x"]).is_err());
    }
}
