//! Tag registry and dispatch
//!
//! The registry is the only place where a tag name is turned into a
//! predicate. It is built once on first use and never mutated afterwards,
//! so it can be shared across threads without locking.
//!
//! Copyright (c) 2025 Shapetag Team
//! Licensed under the Apache-2.0 license

use crate::validation::error::{ConfigError, ConfigResult};
use crate::validation::predicates::Predicate;
use crate::validation::sink::AbortSignal;
use crate::validation::tag::TypeTag;
use crate::value::Value;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::debug;

static REGISTRY: OnceLock<Registry> = OnceLock::new();

/// One registered tag
#[derive(Debug, Clone, Copy)]
pub struct RegistryEntry {
    pub tag: TypeTag,
    pub predicate: Predicate,
}

/// Immutable name → predicate mapping for the whole vocabulary
#[derive(Debug)]
pub struct Registry {
    entries: HashMap<&'static str, RegistryEntry>,
}

impl Registry {
    fn build() -> Self {
        let entries = TypeTag::ALL
            .iter()
            .map(|&tag| {
                (
                    tag.as_str(),
                    RegistryEntry {
                        tag,
                        predicate: tag.predicate(),
                    },
                )
            })
            .collect();
        Self { entries }
    }

    /// The process-wide registry
    pub fn global() -> &'static Registry {
        REGISTRY.get_or_init(Registry::build)
    }

    pub fn get(&self, name: &str) -> Option<&RegistryEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Resolve a tag name, failing on names outside the vocabulary
    pub fn resolve(&self, name: &str) -> ConfigResult<TypeTag> {
        self.get(name).map(|entry| entry.tag).ok_or_else(|| {
            debug!(tag = name, "tag not found in registry");
            ConfigError::unknown_tag(name)
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered entries in vocabulary order
    pub fn iter(&self) -> impl Iterator<Item = &RegistryEntry> {
        TypeTag::ALL
            .iter()
            .filter_map(move |tag| self.entries.get(tag.as_str()))
    }
}

/// Apply a statically known tag to a value
pub fn dispatch(tag: TypeTag, value: &Value) -> bool {
    tag.check(value)
}

/// Apply a tag given by name, returning the configuration error for unknown names
pub fn try_dispatch(name: &str, value: &Value) -> ConfigResult<bool> {
    let tag = Registry::global().resolve(name)?;
    Ok(dispatch(tag, value))
}

/// Apply a tag given by name; an unknown name goes to `abort`, which does not return
pub fn dispatch_named<A: AbortSignal + ?Sized>(name: &str, value: &Value, abort: &A) -> bool {
    match try_dispatch(name, value) {
        Ok(result) => result,
        Err(error) => abort.abort(&error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    struct PanicAbort;

    impl AbortSignal for PanicAbort {
        fn abort(&self, error: &ConfigError) -> ! {
            panic!("aborted: {}", error)
        }
    }

    #[test]
    fn test_registry_covers_vocabulary() {
        let registry = Registry::global();
        assert_eq!(registry.len(), TypeTag::ALL.len());
        for tag in TypeTag::ALL {
            assert!(registry.contains(tag.as_str()));
            assert_eq!(registry.resolve(tag.as_str()), Ok(tag));
        }
        let order: Vec<_> = registry.iter().map(|entry| entry.tag).collect();
        assert_eq!(order, TypeTag::ALL.to_vec());
    }

    #[test]
    fn test_try_dispatch() {
        let value = Value::from(json!(["a"]));
        assert_eq!(try_dispatch("list_of_str", &value), Ok(true));
        assert_eq!(try_dispatch("list_of_int", &value), Ok(false));
        assert_eq!(
            try_dispatch("list_of_bool", &value),
            Err(ConfigError::unknown_tag("list_of_bool"))
        );
    }

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_dispatch_miss_is_logged_at_debug() {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let result = tracing::subscriber::with_default(subscriber, || {
            try_dispatch("list_of_bool", &Value::Seq(Vec::new()))
        });

        assert_eq!(result, Err(ConfigError::unknown_tag("list_of_bool")));
        let output = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("DEBUG"));
        assert!(output.contains("tag not found in registry"));
        assert!(output.contains("list_of_bool"));
    }

    #[test]
    fn test_dispatch_named_returns_predicate_result() {
        assert!(dispatch_named("int", &Value::Int(3), &PanicAbort));
        assert!(!dispatch_named("int", &Value::from("3"), &PanicAbort));
    }

    #[test]
    #[should_panic(expected = "aborted: Unknown data type for check 'bool'")]
    fn test_dispatch_named_unknown_tag_aborts() {
        dispatch_named("bool", &Value::Bool(true), &PanicAbort);
    }

    #[test]
    fn test_dispatch_is_deterministic() {
        let value = Value::from(json!({"a": {"x": 1}}));
        for tag in TypeTag::ALL {
            assert_eq!(dispatch(tag, &value), dispatch(tag, &value));
        }
        assert!(dispatch(TypeTag::DictStrDict, &value));
    }
}
