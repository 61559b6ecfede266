//! The closed type-tag vocabulary
//!
//! Copyright (c) 2025 Shapetag Team
//! Licensed under the Apache-2.0 license

use crate::validation::error::ConfigError;
use crate::validation::predicates::{self, Predicate};
use crate::validation::registry::Registry;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A recognised shape, named on the wire by its tag string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TypeTag {
    #[serde(rename = "str")]
    Str,
    #[serde(rename = "int")]
    Int,
    #[serde(rename = "list_of_int")]
    ListOfInt,
    #[serde(rename = "list_of_str")]
    ListOfStr,
    #[serde(rename = "list_of_float")]
    ListOfFloat,
    #[serde(rename = "none_or_list_of_str")]
    NoneOrListOfStr,
    #[serde(rename = "dict_str_dict")]
    DictStrDict,
    #[serde(rename = "dict_str_list_of_float")]
    DictStrListOfFloat,
    #[serde(rename = "dict_str_list_of_str")]
    DictStrListOfStr,
    #[serde(rename = "dict_str_str")]
    DictStrStr,
    #[serde(rename = "two_level_dict_str_str_list-of-str")]
    TwoLevelDictStrStrListOfStr,
    #[serde(rename = "two_level_dict_str_str_str")]
    TwoLevelDictStrStrStr,
}

impl TypeTag {
    /// Every tag, in vocabulary order
    pub const ALL: [TypeTag; 12] = [
        TypeTag::Str,
        TypeTag::Int,
        TypeTag::ListOfInt,
        TypeTag::ListOfStr,
        TypeTag::ListOfFloat,
        TypeTag::NoneOrListOfStr,
        TypeTag::DictStrDict,
        TypeTag::DictStrListOfFloat,
        TypeTag::DictStrListOfStr,
        TypeTag::DictStrStr,
        TypeTag::TwoLevelDictStrStrListOfStr,
        TypeTag::TwoLevelDictStrStrStr,
    ];

    /// The wire name of this tag
    pub fn as_str(self) -> &'static str {
        match self {
            TypeTag::Str => "str",
            TypeTag::Int => "int",
            TypeTag::ListOfInt => "list_of_int",
            TypeTag::ListOfStr => "list_of_str",
            TypeTag::ListOfFloat => "list_of_float",
            TypeTag::NoneOrListOfStr => "none_or_list_of_str",
            TypeTag::DictStrDict => "dict_str_dict",
            TypeTag::DictStrListOfFloat => "dict_str_list_of_float",
            TypeTag::DictStrListOfStr => "dict_str_list_of_str",
            TypeTag::DictStrStr => "dict_str_str",
            TypeTag::TwoLevelDictStrStrListOfStr => "two_level_dict_str_str_list-of-str",
            TypeTag::TwoLevelDictStrStrStr => "two_level_dict_str_str_str",
        }
    }

    /// Human-readable shape, e.g. for `shapetag tags`
    pub fn description(self) -> &'static str {
        match self {
            TypeTag::Str => "string",
            TypeTag::Int => "integer (booleans excluded)",
            TypeTag::ListOfInt => "list<integer>",
            TypeTag::ListOfStr => "list<string>",
            TypeTag::ListOfFloat => "list<float>",
            TypeTag::NoneOrListOfStr => "null or list<string>",
            TypeTag::DictStrDict => "dict<string, dict> (inner dicts not inspected)",
            TypeTag::DictStrListOfFloat => "dict<string, list<float>>",
            TypeTag::DictStrListOfStr => "dict<string, list<string>>",
            TypeTag::DictStrStr => "dict<string, string>",
            TypeTag::TwoLevelDictStrStrListOfStr => "dict<string, dict<string, list<string>>>",
            TypeTag::TwoLevelDictStrStrStr => "dict<string, dict<string, string>>",
        }
    }

    /// The predicate implementing this shape
    pub fn predicate(self) -> Predicate {
        match self {
            TypeTag::Str => predicates::is_str,
            TypeTag::Int => predicates::is_int,
            TypeTag::ListOfInt => predicates::is_list_of_int,
            TypeTag::ListOfStr => predicates::is_list_of_str,
            TypeTag::ListOfFloat => predicates::is_list_of_float,
            TypeTag::NoneOrListOfStr => predicates::is_none_or_list_of_str,
            TypeTag::DictStrDict => predicates::is_dict_str_dict,
            TypeTag::DictStrListOfFloat => predicates::is_dict_str_list_of_float,
            TypeTag::DictStrListOfStr => predicates::is_dict_str_list_of_str,
            TypeTag::DictStrStr => predicates::is_dict_str_str,
            TypeTag::TwoLevelDictStrStrListOfStr => {
                predicates::is_two_level_dict_str_str_list_of_str
            }
            TypeTag::TwoLevelDictStrStrStr => predicates::is_two_level_dict_str_str_str,
        }
    }

    /// Apply this tag's predicate to a value
    pub fn check(self, value: &Value) -> bool {
        (self.predicate())(value)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeTag {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Registry::global().resolve(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_round_trip_through_from_str() {
        for tag in TypeTag::ALL {
            assert_eq!(tag.as_str().parse::<TypeTag>(), Ok(tag));
            assert_eq!(tag.to_string(), tag.as_str());
        }
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let tag: TypeTag = serde_json::from_str("\"two_level_dict_str_str_list-of-str\"").unwrap();
        assert_eq!(tag, TypeTag::TwoLevelDictStrStrListOfStr);
        assert_eq!(serde_json::to_string(&TypeTag::NoneOrListOfStr).unwrap(), "\"none_or_list_of_str\"");
        assert!(serde_json::from_str::<TypeTag>("\"list_of_bool\"").is_err());
    }

    #[test]
    fn test_unknown_name_is_config_error() {
        assert_eq!(
            "float".parse::<TypeTag>(),
            Err(ConfigError::unknown_tag("float"))
        );
    }

    #[test]
    fn test_check_uses_predicate() {
        assert!(TypeTag::Str.check(&Value::from("x")));
        assert!(!TypeTag::Int.check(&Value::Bool(false)));
        assert!(TypeTag::NoneOrListOfStr.check(&Value::Null));
    }
}
