//! Shape validation: predicates, the tag vocabulary, dispatch and
//! record-level checking
//!
//! Data flows one way: a declaration names a tag per field, the registry
//! resolves the tag to a predicate, the predicate answers for one value,
//! and the checker batches the failing field names into a single report.
//!
//! Copyright (c) 2025 Shapetag Team
//! Licensed under the Apache-2.0 license

pub mod checker;
pub mod error;
pub mod predicates;
pub mod registry;
pub mod sink;
pub mod tag;

// Re-export commonly used types
pub use checker::{
    check_params, failed_fields, try_failed_fields_named, FieldDeclaration, RawDeclaration,
    RecordChecker,
};
pub use error::{ConfigError, ConfigResult};
pub use predicates::Predicate;
pub use registry::{dispatch, dispatch_named, try_dispatch, Registry, RegistryEntry};
pub use sink::{AbortSignal, ErrorSink, FailureReport, FnSink, ProcessAbort, TracingSink};
pub use tag::TypeTag;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use serde_json::json;

    #[test]
    fn test_reexports_work_together() {
        let value = Value::from(json!({"fr": {"a": ["b"]}}));
        assert!(dispatch(TypeTag::TwoLevelDictStrStrListOfStr, &value));
        assert_eq!(try_dispatch("two_level_dict_str_str_list-of-str", &value), Ok(true));
    }
}
