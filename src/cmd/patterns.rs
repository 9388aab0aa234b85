//! `pubrelay patterns`: list registered forwarding patterns.

use crate::broker::registry::PatternRegistry;

pub fn execute() {
    print!("{}", listing(PatternRegistry::builtin()));
}

#[must_use]
pub fn listing(registry: &PatternRegistry) -> String {
    let mut out = String::new();
    for name in registry.names() {
        let describe = registry.resolve(name).map_or("", |s| s.describe());
        out.push_str(&format!("  {name:<12} {describe}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_builtin_pattern() {
        let out = listing(PatternRegistry::builtin());
        assert!(out.contains("XSUB_XPUB"));
        assert!(out.contains("subscriptions propagate upstream"));
    }
}
