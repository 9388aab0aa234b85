//! Command-line interface definitions using clap derive macros.
//!
//! Contains the top-level [`Cli`] parser, the [`Commands`] enum for
//! subcommands (run, validate, init, patterns), and their associated
//! argument structs. Flags have environment variable equivalents for
//! container deployments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "pubrelay",
    version,
    about = "Configuration-driven XSUB/XPUB message broker",
    propagate_version = true,
    after_help = "\x1b[1mQuick start:\x1b[0m\n  \
        pubrelay init                        Create a starter config\n  \
        pubrelay run relay.yaml              Start from a config file\n  \
        pubrelay run --from-env              Start from PATTERN, SUB_ADDR, PUB_ADDR, ..."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the broker
    Run(RunArgs),

    /// Validate configuration without binding any sockets
    Validate(ValidateArgs),

    /// Generate a starter config file
    Init(InitArgs),

    /// List the forwarding patterns this build supports
    Patterns,
}

/// Where configuration comes from: a file, or the process environment.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Config file path (.yaml, .json, .toml)
    #[arg(env = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Read PATTERN, SUB_* and PUB_* environment variables instead of a file
    #[arg(long, env = "RELAY_FROM_ENV", conflicts_with = "config")]
    pub from_env: bool,
}

impl SourceArgs {
    /// Human-readable name of the selected source, for reports.
    #[must_use]
    pub fn label(&self) -> String {
        match &self.config {
            Some(path) => path.display().to_string(),
            None => "environment".to_string(),
        }
    }
}

#[derive(Args)]
#[command(after_help = "\x1b[1mExamples:\x1b[0m\n  \
        pubrelay run relay.yaml                    Config file\n  \
        pubrelay run relay.json --pretty -l debug  Local dev mode\n  \
        PATTERN=XSUB_XPUB SUB_ADDR=tcp://*:5555 PUB_ADDR=tcp://*:5556 pubrelay run --from-env")]
pub struct RunArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    // -- Logging --
    /// Log level
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: LogLevel,

    /// Force pretty (human-readable) log output
    #[arg(long)]
    pub pretty: bool,

    /// Force JSON log output (overrides TTY detection)
    #[arg(long, conflicts_with = "pretty")]
    pub json: bool,

    // -- Observability --
    /// Sentry DSN (enables error tracking)
    #[cfg(feature = "sentry-integration")]
    #[arg(long, env = "SENTRY_DSN", help_heading = "Observability")]
    pub sentry_dsn: Option<String>,

    /// Sentry environment tag
    #[cfg(feature = "sentry-integration")]
    #[arg(long, env = "SENTRY_ENVIRONMENT", help_heading = "Observability")]
    pub sentry_environment: Option<String>,
}

#[derive(Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: ValidateFormat,
}

#[derive(Args)]
#[command(after_help = "\x1b[1mExamples:\x1b[0m\n  \
        pubrelay init                          Minimal relay.yaml\n  \
        pubrelay init -f json -o broker.json   JSON, custom path\n  \
        pubrelay init --full                   Every field, with defaults")]
pub struct InitArgs {
    /// Output format
    #[arg(short, long, default_value = "yaml")]
    pub format: ConfigFormat,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write every field with its default value
    #[arg(long)]
    pub full: bool,
}

#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    #[must_use]
    pub const fn to_tracing_level(&self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

#[derive(Clone, Debug, ValueEnum)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

impl ConfigFormat {
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
            Self::Toml => "toml",
        }
    }
}

#[derive(Clone, Debug, ValueEnum)]
pub enum ValidateFormat {
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn run_accepts_positional_config() {
        let cli = Cli::try_parse_from(["pubrelay", "run", "relay.yaml"]).unwrap();
        match cli.command {
            Some(Commands::Run(args)) => {
                assert_eq!(args.source.config, Some(PathBuf::from("relay.yaml")));
                assert!(!args.source.from_env);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn file_and_env_sources_conflict() {
        let result = Cli::try_parse_from(["pubrelay", "run", "relay.yaml", "--from-env"]);
        assert!(result.is_err());
    }

    #[test]
    fn source_label_names_file_or_environment() {
        let file = SourceArgs {
            config: Some(PathBuf::from("relay.json")),
            from_env: false,
        };
        let env = SourceArgs {
            config: None,
            from_env: true,
        };
        assert_eq!(file.label(), "relay.json");
        assert_eq!(env.label(), "environment");
    }
}
