//! Record-level checking against field declarations
//!
//! A record is checked over the fields it actually carries: a declared field
//! missing from the record is neither checked nor reported. Requiredness is
//! the caller's concern.
//!
//! Copyright (c) 2025 Shapetag Team
//! Licensed under the Apache-2.0 license

use crate::validation::error::ConfigResult;
use crate::validation::registry::{dispatch, dispatch_named, try_dispatch, Registry};
use crate::validation::sink::{AbortSignal, ErrorSink, ProcessAbort};
use crate::validation::tag::TypeTag;
use crate::value::Map;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Ordered field → tag declaration with statically known tags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldDeclaration {
    fields: Vec<(String, TypeTag)>,
    index: HashMap<String, usize>,
}

impl FieldDeclaration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field; re-declaring replaces the tag and keeps the position
    pub fn field(mut self, name: impl Into<String>, tag: TypeTag) -> Self {
        self.insert(name, tag);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, tag: TypeTag) {
        upsert(&mut self.fields, &mut self.index, name.into(), tag);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, TypeTag)> {
        self.fields.iter().map(|(name, tag)| (name.as_str(), *tag))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<N: Into<String>> FromIterator<(N, TypeTag)> for FieldDeclaration {
    fn from_iter<I: IntoIterator<Item = (N, TypeTag)>>(iter: I) -> Self {
        let mut declaration = FieldDeclaration::new();
        for (name, tag) in iter {
            declaration.insert(name, tag);
        }
        declaration
    }
}

/// Replace the tag of a declared field in place, or append a new field
fn upsert<T>(fields: &mut Vec<(String, T)>, index: &mut HashMap<String, usize>, name: String, tag: T) {
    match index.get(&name) {
        Some(&position) => fields[position].1 = tag,
        None => {
            index.insert(name.clone(), fields.len());
            fields.push((name, tag));
        }
    }
}

/// Ordered field → tag-name declaration as loaded from configuration
///
/// Tag names are not checked on load; they are resolved when a record
/// actually carries the field, or all at once through [`RawDeclaration::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawDeclaration {
    fields: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl RawDeclaration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: impl Into<String>, tag: impl Into<String>) -> Self {
        self.insert(name, tag);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, tag: impl Into<String>) {
        upsert(&mut self.fields, &mut self.index, name.into(), tag.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(name, tag)| (name.as_str(), tag.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Resolve every tag name up front
    pub fn resolve(&self) -> ConfigResult<FieldDeclaration> {
        let registry = Registry::global();
        self.iter()
            .map(|(name, tag)| registry.resolve(tag).map(|tag| (name, tag)))
            .collect()
    }
}

impl<N: Into<String>, T: Into<String>> FromIterator<(N, T)> for RawDeclaration {
    fn from_iter<I: IntoIterator<Item = (N, T)>>(iter: I) -> Self {
        let mut declaration = RawDeclaration::new();
        for (name, tag) in iter {
            declaration.insert(name, tag);
        }
        declaration
    }
}

impl From<&FieldDeclaration> for RawDeclaration {
    fn from(declaration: &FieldDeclaration) -> Self {
        declaration.iter().map(|(name, tag)| (name, tag.as_str())).collect()
    }
}

struct RawDeclarationVisitor;

impl<'de> Visitor<'de> for RawDeclarationVisitor {
    type Value = RawDeclaration;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of field names to type tags")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<RawDeclaration, A::Error> {
        let mut declaration = RawDeclaration::new();
        while let Some((name, tag)) = access.next_entry::<String, String>()? {
            declaration.insert(name, tag);
        }
        Ok(declaration)
    }
}

impl<'de> Deserialize<'de> for RawDeclaration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RawDeclarationVisitor)
    }
}

impl Serialize for RawDeclaration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, tag) in &self.fields {
            map.serialize_entry(name, tag)?;
        }
        map.end()
    }
}

/// Names of the present fields that fail their declared shape, in declaration order
pub fn failed_fields(record: &Map, declaration: &FieldDeclaration) -> Vec<String> {
    declaration
        .iter()
        .filter_map(|(name, tag)| {
            let value = record.get(name)?;
            (!dispatch(tag, value)).then(|| name.to_string())
        })
        .collect()
}

/// Like [`failed_fields`], resolving tag names only for fields the record carries
pub fn try_failed_fields_named(record: &Map, declaration: &RawDeclaration) -> ConfigResult<Vec<String>> {
    let mut failed = Vec::new();
    for (name, tag) in declaration.iter() {
        if let Some(value) = record.get(name) {
            if !try_dispatch(tag, value)? {
                failed.push(name.to_string());
            }
        }
    }
    Ok(failed)
}

/// Check one record and report its failing fields, if any, to `sink`
pub fn check_params<S: ErrorSink + ?Sized>(
    record: &Map,
    declaration: &FieldDeclaration,
    label: &str,
    sink: &mut S,
) {
    let failed = failed_fields(record, declaration);
    report(sink, label, &failed);
}

/// Hand a non-empty failure list to the sink; returns whether it was reported
fn report<S: ErrorSink + ?Sized>(sink: &mut S, label: &str, failed: &[String]) -> bool {
    if failed.is_empty() {
        return false;
    }
    debug!(label, count = failed.len(), "record has fields with erroneous types");
    sink.report(label, failed);
    true
}

/// Validate-and-report checker bound to a sink and an abort signal
pub struct RecordChecker<S, A = ProcessAbort> {
    sink: S,
    abort: A,
}

impl<S: ErrorSink> RecordChecker<S> {
    /// Create a checker that exits the process on unknown tags
    pub fn new(sink: S) -> Self {
        Self::with_abort(sink, ProcessAbort)
    }
}

impl<S: ErrorSink, A: AbortSignal> RecordChecker<S, A> {
    pub fn with_abort(sink: S, abort: A) -> Self {
        Self { sink, abort }
    }

    /// Check against a typed declaration; cannot hit a configuration error
    pub fn check(&mut self, record: &Map, declaration: &FieldDeclaration, label: &str) {
        check_params(record, declaration, label, &mut self.sink);
    }

    /// Check against a declaration loaded at runtime; unknown tags abort
    pub fn check_named(&mut self, record: &Map, declaration: &RawDeclaration, label: &str) {
        let failed = self.named_failures(record, declaration);
        report(&mut self.sink, label, &failed);
    }

    /// Check labelled records in order against one runtime declaration
    ///
    /// Each failing record gets its own report. Returns the number of
    /// records reported.
    pub fn check_records_named<'a, I>(&mut self, records: I, declaration: &RawDeclaration) -> usize
    where
        I: IntoIterator<Item = (&'a str, &'a Map)>,
    {
        let mut reported = 0;
        for (label, record) in records {
            let failed = self.named_failures(record, declaration);
            if report(&mut self.sink, label, &failed) {
                reported += 1;
            }
        }
        reported
    }

    fn named_failures(&self, record: &Map, declaration: &RawDeclaration) -> Vec<String> {
        declaration
            .iter()
            .filter_map(|(name, tag)| {
                let value = record.get(name)?;
                (!dispatch_named(tag, value, &self.abort)).then(|| name.to_string())
            })
            .collect()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
