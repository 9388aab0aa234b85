//! `pubrelay validate`: check configuration without binding sockets.
//!
//! Runs the same load-and-validate path as `run`, then prints the resolved
//! settings (defaults filled in) as text or JSON.

use crate::broker::registry::PatternRegistry;
use crate::cli::{ValidateArgs, ValidateFormat};
use crate::config::{self, validation};
use crate::error::BrokerError;

use super::resolve_source;

pub async fn execute(args: &ValidateArgs) -> Result<(), BrokerError> {
    let label = args.source.label();
    let source = resolve_source(&args.source)?;

    let config = match config::load(&*source, PatternRegistry::builtin()).await {
        Ok(config) => config,
        Err(e) => {
            match args.format {
                ValidateFormat::Text => eprintln!("\u{2717} {label} is invalid\n"),
                ValidateFormat::Json => println!(
                    "{}",
                    serde_json::json!({
                        "valid": false,
                        "error": e.to_string(),
                    })
                ),
            }
            return Err(e.into());
        }
    };

    match args.format {
        ValidateFormat::Text => {
            println!(
                "\u{2713} {}",
                validation::format_validation_report(&label, &config)
            );
        }
        ValidateFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "valid": true,
                    "config": config,
                })
            );
        }
    }

    Ok(())
}
