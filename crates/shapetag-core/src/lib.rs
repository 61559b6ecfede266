//! Shapetag Core - closed-vocabulary runtime shape checks
//!
//! Given a value decoded from JSON or YAML and a type tag naming the
//! expected shape, decide whether the value conforms; given a record and a
//! field declaration, report which fields do not.
//!
//! ## Quick Start
//!
//! ```rust
//! use shapetag_core::{failed_fields, FieldDeclaration, TypeTag, Value};
//! use serde_json::json;
//!
//! let record = match Value::from(json!({"name": "ok", "tags": [1, 2], "meta": 5})) {
//!     Value::Map(map) => map,
//!     _ => unreachable!(),
//! };
//! let declaration = FieldDeclaration::new()
//!     .field("name", TypeTag::Str)
//!     .field("tags", TypeTag::ListOfStr)
//!     .field("meta", TypeTag::DictStrStr)
//!     .field("missing", TypeTag::Str);
//!
//! assert_eq!(failed_fields(&record, &declaration), vec!["tags", "meta"]);
//! ```
//!
//! ## Vocabulary
//!
//! | Tag | Shape |
//! |---|---|
//! | `str` | string |
//! | `int` | integer (booleans excluded) |
//! | `list_of_int` / `list_of_str` / `list_of_float` | homogeneous list |
//! | `none_or_list_of_str` | null or list of strings |
//! | `dict_str_dict` | string keys, dict values (not inspected) |
//! | `dict_str_list_of_str` / `dict_str_list_of_float` | string keys, list values |
//! | `dict_str_str` | string keys, string values |
//! | `two_level_dict_str_str_str` | string keys, `dict_str_str` values |
//! | `two_level_dict_str_str_list-of-str` | string keys, `dict_str_list_of_str` values |
//!
//! ## Errors
//!
//! A value of the wrong shape is `false`, never an error. Referencing a tag
//! outside the vocabulary is a configuration error: typed declarations
//! cannot express one, and declarations loaded at runtime either surface it
//! as [`ConfigError`] or hand it to an [`AbortSignal`].
//!
//! Copyright (c) 2025 Shapetag Team
//! Licensed under the Apache-2.0 license

pub mod validation;
pub mod value;

// Re-export commonly used types for convenience
pub use validation::{
    check_params, dispatch, dispatch_named, failed_fields, try_dispatch,
    try_failed_fields_named, AbortSignal, ConfigError, ConfigResult, ErrorSink, FailureReport,
    FieldDeclaration, FnSink, ProcessAbort, RawDeclaration, RecordChecker, Registry,
    TracingSink, TypeTag,
};
pub use value::{Map, Value};
