//! Type annotation AST nodes
//!
//! This module defines the type syntax of the subset, including:
//! - Keyword types (string, number, boolean, null, undefined, ...)
//! - Type references with entity names (User, Types.ObjectId, Map<K, V>)
//! - Union and intersection types
//! - Array, tuple, function, and inline object types
//! - Literal types ("foo", 42, true, -1)
//! - Type queries (typeof value)

use super::*;
use crate::token::Span;

/// Type annotation (a type with its source span)
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAnnotation {
    pub ty: Type,
    pub span: Span,
}

/// Type
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    /// Keyword type: string, number, boolean, any, null, undefined, ...
    Keyword(KeywordType),

    /// Type reference: User, Types.ObjectId, Map<K, V>
    Reference(TypeReference),

    /// Union type: string | null
    Union(UnionType),

    /// Intersection type: A & B
    Intersection(IntersectionType),

    /// Array type: T[]
    Array(ArrayType),

    /// Tuple type: [number, string]
    Tuple(TupleType),

    /// Function type: (x: number) => number
    Function(FunctionType),

    /// Inline object type: { x: number; y?: string }
    Object(ObjectType),

    /// Literal type: "foo", 42, true, -1
    Literal(LiteralType),

    /// Type query: typeof value
    Query(TypeQuery),

    /// Parenthesized type: (string | null)
    Parenthesized(Box<TypeAnnotation>),
}

impl Type {
    /// Check if this type is a union
    pub fn is_union(&self) -> bool {
        matches!(self, Type::Union(_))
    }

    /// Check if this type is `null` or `undefined`.
    ///
    /// Union members of these kinds mark the whole annotation nullable.
    /// Parentheses are transparent, so `(null)` counts too.
    pub fn is_nullish(&self) -> bool {
        match self {
            Type::Keyword(KeywordType::Null) | Type::Keyword(KeywordType::Undefined) => true,
            Type::Parenthesized(inner) => inner.ty.is_nullish(),
            _ => false,
        }
    }

    /// Get the keyword type if this is one
    pub fn as_keyword(&self) -> Option<KeywordType> {
        match self {
            Type::Keyword(k) => Some(*k),
            _ => None,
        }
    }
}

// ============================================================================
// Keyword Types
// ============================================================================

/// Keyword type.
///
/// All of these lex as contextual identifiers except `null`; the parser
/// recognizes them by spelling in type position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordType {
    String,    // string
    Number,    // number
    Boolean,   // boolean
    BigInt,    // bigint
    Any,       // any
    Unknown,   // unknown
    Void,      // void
    Never,     // never
    Object,    // object
    Null,      // null
    Undefined, // undefined
}

impl KeywordType {
    /// Get the source spelling of this keyword type
    pub fn name(&self) -> &'static str {
        match self {
            KeywordType::String => "string",
            KeywordType::Number => "number",
            KeywordType::Boolean => "boolean",
            KeywordType::BigInt => "bigint",
            KeywordType::Any => "any",
            KeywordType::Unknown => "unknown",
            KeywordType::Void => "void",
            KeywordType::Never => "never",
            KeywordType::Object => "object",
            KeywordType::Null => "null",
            KeywordType::Undefined => "undefined",
        }
    }

    /// Look up a keyword type by spelling (`null` excluded; it has its
    /// own token).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(KeywordType::String),
            "number" => Some(KeywordType::Number),
            "boolean" => Some(KeywordType::Boolean),
            "bigint" => Some(KeywordType::BigInt),
            "any" => Some(KeywordType::Any),
            "unknown" => Some(KeywordType::Unknown),
            "void" => Some(KeywordType::Void),
            "never" => Some(KeywordType::Never),
            "object" => Some(KeywordType::Object),
            "undefined" => Some(KeywordType::Undefined),
            _ => None,
        }
    }
}

// ============================================================================
// Type Reference
// ============================================================================

/// Type reference: User, Types.ObjectId, Map<K, V>
#[derive(Debug, Clone, PartialEq)]
pub struct TypeReference {
    pub name: EntityName,
    pub type_args: Option<Vec<TypeAnnotation>>,
}

impl TypeReference {
    /// Create a simple type reference without type arguments
    pub fn simple(name: EntityName) -> Self {
        Self {
            name,
            type_args: None,
        }
    }

    /// Create a generic type reference with type arguments
    pub fn generic(name: EntityName, type_args: Vec<TypeAnnotation>) -> Self {
        Self {
            name,
            type_args: Some(type_args),
        }
    }

    /// Check if this reference carries type arguments
    pub fn is_generic(&self) -> bool {
        self.type_args.is_some()
    }
}

// ============================================================================
// Union & Intersection Types
// ============================================================================

/// Union type: string | null
#[derive(Debug, Clone, PartialEq)]
pub struct UnionType {
    pub types: Vec<TypeAnnotation>,
}

impl UnionType {
    /// Create a new union type
    pub fn new(types: Vec<TypeAnnotation>) -> Self {
        Self { types }
    }

    /// Get the number of members in this union
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if this union has no members
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Intersection type: A & B
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionType {
    pub types: Vec<TypeAnnotation>,
}

// ============================================================================
// Array & Tuple Types
// ============================================================================

/// Array type: T[]
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayType {
    pub element_type: Box<TypeAnnotation>,
}

impl ArrayType {
    /// Create a new array type
    pub fn new(element_type: TypeAnnotation) -> Self {
        Self {
            element_type: Box::new(element_type),
        }
    }
}

/// Tuple type: [number, string]
#[derive(Debug, Clone, PartialEq)]
pub struct TupleType {
    pub element_types: Vec<TypeAnnotation>,
}

// ============================================================================
// Function Type
// ============================================================================

/// Function type: (x: number, y: string) => number
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionType {
    pub params: Vec<FunctionTypeParam>,
    pub return_type: Box<TypeAnnotation>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionTypeParam {
    pub name: Identifier,
    pub optional: bool,
    pub ty: Option<TypeAnnotation>,
}

// ============================================================================
// Object Type
// ============================================================================

/// Inline object type: { x: number; y?: string }
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectType {
    pub members: Vec<ObjectTypeProperty>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectTypeProperty {
    pub name: Identifier,
    pub optional: bool,
    pub ty: TypeAnnotation,
    pub span: Span,
}

// ============================================================================
// Literal Type
// ============================================================================

/// Literal type: the annotation *is* a value.
///
/// Holds the literal as an expression so `"active"`, `42`, `true`, and
/// signed forms like `-1` share one representation with value-position
/// literals.
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralType {
    pub expression: Box<Expression>,
}

// ============================================================================
// Type Query
// ============================================================================

/// Type query: typeof value
#[derive(Debug, Clone, PartialEq)]
pub struct TypeQuery {
    pub expr_name: EntityName,
}

// ============================================================================
// Type Parameters (Generics)
// ============================================================================

/// Type parameter (generic): T, K extends string
#[derive(Debug, Clone, PartialEq)]
pub struct TypeParameter {
    pub name: Identifier,
    pub constraint: Option<TypeAnnotation>,
    pub default: Option<TypeAnnotation>,
    pub span: Span,
}

impl TypeParameter {
    /// Create a simple type parameter without constraint or default
    pub fn simple(name: Identifier, span: Span) -> Self {
        Self {
            name,
            constraint: None,
            default: None,
            span,
        }
    }
}
