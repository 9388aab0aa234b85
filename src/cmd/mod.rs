//! Subcommand dispatch and execution.
//!
//! The [`dispatch`] function routes the parsed CLI to the appropriate
//! subcommand handler: [`run`], [`validate`], [`init`] or [`patterns`].
//! Each handler lives in its own submodule.

pub mod init;
pub mod patterns;
pub mod run;
pub mod validate;

use crate::cli::{Cli, Commands, SourceArgs};
use crate::config::sources::{create_file_source, env::EnvSource};
use crate::config::ConfigSource;
use crate::error::BrokerError;

pub async fn dispatch(cli: Cli) -> Result<(), BrokerError> {
    match cli.command {
        Some(Commands::Run(args)) => run::execute(args).await,
        Some(Commands::Validate(ref args)) => validate::execute(args).await,
        Some(Commands::Init(ref args)) => init::execute(args),
        Some(Commands::Patterns) => {
            patterns::execute();
            Ok(())
        }
        None => {
            print_welcome();
            Ok(())
        }
    }
}

/// Pick the config source named on the command line.
///
/// A missing source is always an error: the broker never starts with an
/// implicit configuration.
pub fn resolve_source(args: &SourceArgs) -> Result<Box<dyn ConfigSource>, BrokerError> {
    if let Some(path) = &args.config {
        return Ok(create_file_source(path)?);
    }

    if args.from_env {
        return Ok(Box::new(EnvSource::from_process()));
    }

    Err(BrokerError::NoConfigSource {
        hint: "Provide a config file path, or --from-env to read PATTERN, SUB_ADDR, PUB_ADDR.\n  \
               Run 'pubrelay init' to create a config file."
            .into(),
    })
}

fn print_welcome() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        "\n  pubrelay v{version} \u{2014} XSUB/XPUB message broker\n\n  \
         No command provided. To get started:\n\n    \
         pubrelay init                  Generate a starter config\n    \
         pubrelay run relay.yaml        Start the broker from a config file\n    \
         pubrelay run --from-env        Start the broker from environment variables\n    \
         pubrelay patterns              List supported patterns\n    \
         pubrelay --help                See all commands and options\n"
    );
}
