//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// pomgate -- fail the build when Maven dependencies carry known vulnerabilities.
///
/// Use `pomgate <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "pomgate", version, about, long_about = None)]
pub struct Cli {
    /// Path to the pomgate.toml configuration file.
    #[arg(short, long, default_value = "pomgate.toml")]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Report whether the scan component is active (an API token is configured).
    Detect,

    /// Scan a project's Maven manifests and gate the build on the result.
    Scan(ScanArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- scan ----

/// Scan a project directory.
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Project root to scan (default: current directory).
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Minimum severity to report (low, medium, high).
    #[arg(long)]
    pub severity_threshold: Option<String>,

    /// Report vulnerabilities without failing the build.
    #[arg(long)]
    pub no_fail: bool,

    /// Organization passed to the scan service.
    #[arg(long)]
    pub org: Option<String>,
}

// ---- config ----

/// Manage pomgate configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (defaults + file + service binding + env).
    Show {
        /// Show only a specific section (general, scan).
        #[arg(long)]
        section: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse_detect() {
        let cli = Cli::try_parse_from(["pomgate", "detect"]).expect("parse succeeded");
        assert!(matches!(cli.command, Commands::Detect));
        assert_eq!(cli.config, PathBuf::from("pomgate.toml"));
    }

    #[test]
    fn test_cli_parse_scan_defaults() {
        let cli = Cli::try_parse_from(["pomgate", "scan"]).expect("parse succeeded");
        match cli.command {
            Commands::Scan(scan_args) => {
                assert_eq!(scan_args.path, PathBuf::from("."));
                assert!(scan_args.severity_threshold.is_none());
                assert!(!scan_args.no_fail, "no_fail should default to false");
                assert!(scan_args.org.is_none());
            }
            _ => panic!("expected Scan command"),
        }
    }

    #[test]
    fn test_cli_parse_scan_all_flags() {
        let cli = Cli::try_parse_from([
            "pomgate",
            "scan",
            "/path/to/project",
            "--severity-threshold",
            "high",
            "--no-fail",
            "--org",
            "acme",
        ])
        .expect("parse succeeded");
        match cli.command {
            Commands::Scan(scan_args) => {
                assert_eq!(scan_args.path, PathBuf::from("/path/to/project"));
                assert_eq!(scan_args.severity_threshold.as_deref(), Some("high"));
                assert!(scan_args.no_fail);
                assert_eq!(scan_args.org.as_deref(), Some("acme"));
            }
            _ => panic!("expected Scan command"),
        }
    }

    #[test]
    fn test_cli_parse_config_validate() {
        let cli = Cli::try_parse_from(["pomgate", "config", "validate"]).expect("parse succeeded");
        match cli.command {
            Commands::Config(config_args) => {
                assert!(matches!(config_args.action, ConfigAction::Validate));
            }
            _ => panic!("expected Config command"),
        }
    }

    #[test]
    fn test_cli_parse_config_show_section() {
        let cli = Cli::try_parse_from(["pomgate", "config", "show", "--section", "scan"])
            .expect("parse succeeded");
        match cli.command {
            Commands::Config(config_args) => match config_args.action {
                ConfigAction::Show { section } => {
                    assert_eq!(section.as_deref(), Some("scan"));
                }
                _ => panic!("expected Show action"),
            },
            _ => panic!("expected Config command"),
        }
    }

    #[test]
    fn test_cli_parse_custom_config_path() {
        let cli = Cli::try_parse_from(["pomgate", "-c", "/custom/config.toml", "detect"])
            .expect("parse succeeded");
        assert_eq!(cli.config, PathBuf::from("/custom/config.toml"));
    }

    #[test]
    fn test_cli_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "pomgate",
            "scan",
            "--output",
            "json",
            "--log-level",
            "debug",
        ])
        .expect("parse succeeded");
        assert!(matches!(cli.output, OutputFormat::Json));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_cli_parse_invalid_output_format() {
        let result = Cli::try_parse_from(["pomgate", "--output", "yaml", "detect"]);
        assert!(result.is_err(), "yaml is not a supported output format");
    }

    #[test]
    fn test_cli_parse_missing_subcommand() {
        let result = Cli::try_parse_from(["pomgate"]);
        assert!(result.is_err(), "a subcommand is required");
    }

    #[test]
    fn test_cli_command_definition_is_valid() {
        Cli::command().debug_assert();
    }
}
