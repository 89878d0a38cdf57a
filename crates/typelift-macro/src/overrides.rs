//! User-supplied type overrides.
//!
//! An override maps a textual type expression to a textual runtime
//! expression (`{ "Types.ObjectId": "String" }`). The table is compiled
//! once per invocation: each key is parsed by embedding it in a synthetic
//! `var _: <key>;` declaration and extracting the annotation, each value
//! is parsed as a single expression statement. Both parses reuse the
//! invocation's interner so pattern symbols are comparable with the live
//! module's AST.
//!
//! Queries run before every structural-dispatch step in the reifier. A
//! live type matches a pattern by structural subset (spans never
//! participate; see [`crate::structural`]); the first matching entry in
//! insertion order wins.
//!
//! A key that does not parse as a type, or a value that does not parse as
//! one expression, is a configuration error and fails compilation — the
//! only hard failure in the core.

use indexmap::IndexMap;
use thiserror::Error;
use typelift_parser::ast::{Expression, Statement, Type};
use typelift_parser::{Interner, Parser};

use crate::config::MacroConfig;
use crate::structural;

/// Fatal configuration error raised while compiling the table.
#[derive(Debug, Error)]
pub enum OverrideError {
    /// The key is not a valid type expression.
    #[error("override key {key:?} is not a valid type expression: {message}")]
    InvalidKey {
        /// The offending key string
        key: String,
        /// First diagnostic from the embedded parse
        message: String,
    },

    /// The value is not a single runtime expression.
    #[error("override value {value:?} is not a single expression: {message}")]
    InvalidValue {
        /// The offending value string
        value: String,
        /// First diagnostic from the parse, or a shape description
        message: String,
    },
}

/// Compiled (pattern, replacement) pairs in insertion order.
#[derive(Debug, Default)]
pub struct OverrideTable {
    entries: Vec<(Type, Expression)>,
}

impl OverrideTable {
    /// A table with no entries; every query misses.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Compile the table from a configuration object, threading the
    /// interner through the embedded parses.
    pub fn from_config(
        config: &MacroConfig,
        interner: Interner,
    ) -> Result<(Self, Interner), OverrideError> {
        match &config.type_map {
            Some(type_map) => Self::compile(type_map, interner),
            None => Ok((Self::empty(), interner)),
        }
    }

    /// Compile a table from an ordered key → value mapping.
    pub fn compile(
        type_map: &IndexMap<String, String>,
        mut interner: Interner,
    ) -> Result<(Self, Interner), OverrideError> {
        let mut entries = Vec::with_capacity(type_map.len());
        for (key, value) in type_map {
            let (pattern, next) = parse_type_pattern(key, interner)?;
            let (replacement, next) = parse_replacement(value, next)?;
            interner = next;
            entries.push((pattern, replacement));
        }
        Ok((Self { entries }, interner))
    }

    /// First replacement whose pattern matches the live type, in
    /// insertion order.
    pub fn lookup(&self, ty: &Type) -> Option<&Expression> {
        self.entries
            .iter()
            .find(|(pattern, _)| structural::type_matches(ty, pattern))
            .map(|(_, replacement)| replacement)
    }

    /// Number of compiled entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse a key by embedding it in `var _: <key>;` and extracting the
/// resulting annotation.
fn parse_type_pattern(key: &str, interner: Interner) -> Result<(Type, Interner), OverrideError> {
    let invalid_key = |message: String| OverrideError::InvalidKey {
        key: key.to_owned(),
        message,
    };

    let source = format!("var _: {};", key);
    let parser = Parser::with_interner(&source, interner)
        .map_err(|errors| invalid_key(first_message(&errors)))?;
    let (module, interner) = parser
        .parse()
        .map_err(|errors| invalid_key(first_message(&errors)))?;

    match module.statements.first() {
        Some(Statement::VariableDecl(decl)) if module.statements.len() == 1 => {
            let annotation = decl.declarations[0]
                .type_annotation
                .clone()
                .ok_or_else(|| invalid_key("no type annotation produced".to_owned()))?;
            Ok((annotation.ty, interner))
        }
        _ => Err(invalid_key("expected a single type expression".to_owned())),
    }
}

/// Parse a value as exactly one expression statement.
fn parse_replacement(
    value: &str,
    interner: Interner,
) -> Result<(Expression, Interner), OverrideError> {
    let invalid_value = |message: String| OverrideError::InvalidValue {
        value: value.to_owned(),
        message,
    };

    let parser = Parser::with_interner(value, interner)
        .map_err(|errors| invalid_value(first_message(&errors)))?;
    let (mut module, interner) = parser
        .parse()
        .map_err(|errors| invalid_value(first_message(&errors)))?;

    if module.statements.len() != 1 {
        return Err(invalid_value(format!(
            "expected one expression, found {} statements",
            module.statements.len()
        )));
    }
    match module.statements.remove(0) {
        Statement::Expression(stmt) => Ok((stmt.expression, interner)),
        _ => Err(invalid_value("expected an expression statement".to_owned())),
    }
}

fn first_message<E: std::fmt::Display>(errors: &[E]) -> String {
    errors
        .first()
        .map(|e| e.to_string())
        .unwrap_or_else(|| "unknown parse error".to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use typelift_parser::ast::Statement;

    fn table_for(entries: &[(&str, &str)]) -> (OverrideTable, Interner) {
        let map: IndexMap<String, String> = entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        OverrideTable::compile(&map, Interner::new()).unwrap()
    }

    fn parse_live(source: &str, interner: Interner) -> (Type, Interner) {
        let full = format!("var _: {};", source);
        let (module, interner) = Parser::with_interner(&full, interner)
            .unwrap()
            .parse()
            .unwrap();
        let Statement::VariableDecl(decl) = &module.statements[0] else {
            panic!("expected variable declaration");
        };
        (
            decl.declarations[0].type_annotation.clone().unwrap().ty,
            interner,
        )
    }

    #[test]
    fn test_lookup_hits_matching_pattern() {
        let (table, interner) = table_for(&[("Types.ObjectId", "String")]);
        let (live, interner) = parse_live("Types.ObjectId", interner);

        let replacement = table.lookup(&live).expect("should match");
        let Expression::Identifier(id) = replacement else {
            panic!("expected identifier replacement");
        };
        assert_eq!(interner.resolve(id.name), "String");
    }

    #[test]
    fn test_first_match_wins_in_insertion_order() {
        // Both patterns match the live node: the bare one as a wildcard,
        // the instantiated one exactly. The earlier entry wins.
        let (table, interner) =
            table_for(&[("Types.ObjectId", "String"), ("Types.ObjectId<User>", "Object")]);
        let (live, interner) = parse_live("Types.ObjectId<User>", interner);

        let Expression::Identifier(id) = table.lookup(&live).unwrap() else {
            panic!("expected identifier");
        };
        assert_eq!(interner.resolve(id.name), "String");
    }

    #[test]
    fn test_miss_returns_none() {
        let (table, interner) = table_for(&[("Types.ObjectId", "String")]);
        let (live, _) = parse_live("Types.Decimal", interner);
        assert!(table.lookup(&live).is_none());
    }

    #[test]
    fn test_pattern_matches_generic_instantiation() {
        // Approximate matching: a bare pattern also matches the
        // instantiated form.
        let (table, interner) = table_for(&[("Types.ObjectId", "String")]);
        let (live, _) = parse_live("Types.ObjectId<User>", interner);
        assert!(table.lookup(&live).is_some());
    }

    #[test]
    fn test_invalid_key_is_fatal() {
        let map: IndexMap<String, String> =
            [("|||".to_string(), "String".to_string())].into_iter().collect();
        let err = OverrideTable::compile(&map, Interner::new()).unwrap_err();
        assert!(matches!(err, OverrideError::InvalidKey { .. }));
    }

    #[test]
    fn test_non_expression_value_is_fatal() {
        let map: IndexMap<String, String> =
            [("string".to_string(), "var x = 1".to_string())].into_iter().collect();
        let err = OverrideTable::compile(&map, Interner::new()).unwrap_err();
        assert!(matches!(err, OverrideError::InvalidValue { .. }));
    }

    #[test]
    fn test_empty_table_always_misses() {
        let table = OverrideTable::empty();
        let (live, _) = parse_live("string", Interner::new());
        assert!(table.lookup(&live).is_none());
    }
}
