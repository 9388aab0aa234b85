//! Pattern name to forwarding strategy lookup.
//!
//! [`PatternRegistry::builtin`] is the process-wide registry, built on first
//! use and never mutated. Additional patterns are added with
//! [`PatternRegistry::builder`]; the config loader and bootstrap only see
//! the registry, so neither changes when a pattern is added.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use super::{xsub_xpub, ForwardingStrategy};
use crate::error::UnknownPattern;

pub type StrategyFactory = fn() -> Box<dyn ForwardingStrategy>;

static BUILTIN: LazyLock<PatternRegistry> = LazyLock::new(|| {
    PatternRegistry::builder()
        .register(xsub_xpub::NAME, xsub_xpub::create)
        .build()
});

#[derive(Debug, Clone, Default)]
pub struct PatternRegistry {
    entries: BTreeMap<&'static str, StrategyFactory>,
}

impl PatternRegistry {
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    #[must_use]
    pub fn builder() -> PatternRegistryBuilder {
        PatternRegistryBuilder::default()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn check(&self, name: &str) -> Result<(), UnknownPattern> {
        if self.contains(name) {
            Ok(())
        } else {
            Err(self.unknown(name))
        }
    }

    /// Exact, case-sensitive lookup.
    pub fn resolve(&self, name: &str) -> Result<Box<dyn ForwardingStrategy>, UnknownPattern> {
        self.entries
            .get(name)
            .map(|factory| factory())
            .ok_or_else(|| self.unknown(name))
    }

    /// Registered names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.keys().copied().collect()
    }

    fn unknown(&self, name: &str) -> UnknownPattern {
        UnknownPattern {
            pattern: name.to_string(),
            known: self.names().into_iter().map(str::to_string).collect(),
        }
    }
}

#[derive(Debug, Default)]
pub struct PatternRegistryBuilder {
    entries: BTreeMap<&'static str, StrategyFactory>,
}

impl PatternRegistryBuilder {
    /// Register `factory` under `name`. A later registration replaces an
    /// earlier one with the same name.
    #[must_use]
    pub fn register(mut self, name: &'static str, factory: StrategyFactory) -> Self {
        self.entries.insert(name, factory);
        self
    }

    #[must_use]
    pub fn build(self) -> PatternRegistry {
        PatternRegistry {
            entries: self.entries,
        }
    }
}
