//! Macro configuration.
//!
//! The core consumes one field of the user's configuration object:
//! `typeMap`, an insertion-ordered mapping of textual type expressions to
//! textual runtime expressions. Everything else in the object belongs to
//! the surrounding rewriter and is ignored here.

use indexmap::IndexMap;
use serde::Deserialize;

/// Configuration supplied once per macro invocation.
///
/// # Example
///
/// ```rust
/// use typelift_macro::MacroConfig;
///
/// let config: MacroConfig =
///     serde_json::from_str(r#"{ "typeMap": { "Types.ObjectId": "String" } }"#).unwrap();
/// assert_eq!(config.type_map.as_ref().unwrap().len(), 1);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroConfig {
    /// Textual type expression → textual runtime expression, applied
    /// before any structural dispatch. Absent means no overrides.
    #[serde(default)]
    pub type_map: Option<IndexMap<String, String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_map_preserves_insertion_order() {
        let config: MacroConfig = serde_json::from_str(
            r#"{ "typeMap": { "B": "Object", "A": "String" } }"#,
        )
        .unwrap();
        let keys: Vec<&str> = config
            .type_map
            .as_ref()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, ["B", "A"]);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let config: MacroConfig = serde_json::from_str(
            r#"{ "emitParameterDecorator": true, "addClassName": "downlevel" }"#,
        )
        .unwrap();
        assert!(config.type_map.is_none());
    }
}
