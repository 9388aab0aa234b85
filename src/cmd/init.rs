//! `pubrelay init`: generate a starter configuration file.
//!
//! Writes a YAML, JSON or TOML config using either a minimal template
//! (pattern and the two addresses) or a full one listing every field with
//! its default value.

use std::path::PathBuf;

use crate::cli::{ConfigFormat, InitArgs};
use crate::error::BrokerError;

pub fn execute(args: &InitArgs) -> Result<(), BrokerError> {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("relay.{}", args.format.extension())));

    if output.exists() {
        return Err(BrokerError::FileExists { path: output });
    }

    std::fs::write(&output, template(&args.format, args.full))?;
    println!("Created {}", output.display());
    Ok(())
}

#[must_use]
pub fn template(format: &ConfigFormat, full: bool) -> &'static str {
    match (format, full) {
        (ConfigFormat::Yaml, false) => YAML_MINIMAL,
        (ConfigFormat::Yaml, true) => YAML_FULL,
        (ConfigFormat::Json, false) => JSON_MINIMAL,
        (ConfigFormat::Json, true) => JSON_FULL,
        (ConfigFormat::Toml, false) => TOML_MINIMAL,
        (ConfigFormat::Toml, true) => TOML_FULL,
    }
}

const YAML_MINIMAL: &str = r#"# pubrelay config

pattern: XSUB_XPUB

# Publishers connect here
sub:
  addr: "tcp://*:5555"

# Subscribers connect here
pub:
  addr: "tcp://*:5556"
"#;

const YAML_FULL: &str = r#"# pubrelay config
#
# hwm and timeo values <= 0, or omitted, fall back to the defaults shown.

# Forwarding pattern (see `pubrelay patterns`)
pattern: XSUB_XPUB

# Ingress: XSUB socket publishers connect to
sub:
  addr: "tcp://*:5555"
  hwm: 1000000     # receive high-water mark (messages)
  timeo: 100       # receive timeout (ms)

# Egress: XPUB socket subscribers connect to
pub:
  addr: "tcp://*:5556"
  hwm: 1000000     # send high-water mark (messages)
  timeo: 100       # send timeout (ms)
"#;

const JSON_MINIMAL: &str = r#"{
  "pattern": "XSUB_XPUB",
  "sub": { "addr": "tcp://*:5555" },
  "pub": { "addr": "tcp://*:5556" }
}
"#;

const JSON_FULL: &str = r#"{
  "pattern": "XSUB_XPUB",
  "sub": { "addr": "tcp://*:5555", "hwm": 1000000, "timeo": 100 },
  "pub": { "addr": "tcp://*:5556", "hwm": 1000000, "timeo": 100 }
}
"#;

const TOML_MINIMAL: &str = r#"# pubrelay config

pattern = "XSUB_XPUB"

[sub]
addr = "tcp://*:5555"

[pub]
addr = "tcp://*:5556"
"#;

const TOML_FULL: &str = r#"# pubrelay config
#
# hwm and timeo values <= 0, or omitted, fall back to the defaults shown.

pattern = "XSUB_XPUB"

# Ingress: XSUB socket publishers connect to
[sub]
addr = "tcp://*:5555"
hwm = 1000000     # receive high-water mark (messages)
timeo = 100       # receive timeout (ms)

# Egress: XPUB socket subscribers connect to
[pub]
addr = "tcp://*:5556"
hwm = 1000000     # send high-water mark (messages)
timeo = 100       # send timeout (ms)
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::broker::registry::PatternRegistry;
    use crate::config::sources::FileFormat;
    use crate::config::validation::resolve;

    fn check(format: ConfigFormat, full: bool) {
        let raw = FileFormat::from_extension(format.extension())
            .and_then(|parser| parser.parse(template(&format, full), "template"))
            .unwrap_or_else(|e| panic!("{format:?} full={full}: {e}"));
        let config = resolve(raw, PatternRegistry::builtin()).unwrap();
        assert_eq!(config.ingress_addr(), "tcp://*:5555");
        assert_eq!(config.egress_addr(), "tcp://*:5556");
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn yaml_templates_validate() {
        check(ConfigFormat::Yaml, false);
        check(ConfigFormat::Yaml, true);
    }

    #[cfg(feature = "json")]
    #[test]
    fn json_templates_validate() {
        check(ConfigFormat::Json, false);
        check(ConfigFormat::Json, true);
    }

    #[cfg(feature = "toml")]
    #[test]
    fn toml_templates_validate() {
        check(ConfigFormat::Toml, false);
        check(ConfigFormat::Toml, true);
    }

    #[test]
    fn refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("relay.yaml");
        std::fs::write(&path, "pattern: XSUB_XPUB\n").unwrap();

        let args = InitArgs {
            format: ConfigFormat::Yaml,
            output: Some(path.clone()),
            full: false,
        };
        assert!(matches!(
            execute(&args),
            Err(BrokerError::FileExists { .. })
        ));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "pattern: XSUB_XPUB\n"
        );
    }

    #[test]
    fn writes_requested_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broker.json");

        let args = InitArgs {
            format: ConfigFormat::Json,
            output: Some(path.clone()),
            full: true,
        };
        execute(&args).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), JSON_FULL);
    }
}
