use std::fmt;

use indexmap::IndexMap;
use itertools::Itertools;

/// The structural type system. Two `FeType` values compare
/// equal exactly when they have the same structure; records compare by
/// name as well as field structure.
///
/// `Unknown` is an inference placeholder that should never survive to the
/// end of type checking; `Error` is absorbing (invariant 4): any operation
/// touching it silently produces `Error` again instead of cascading
/// diagnostics.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub enum FeType {
    Integer,
    Real,
    Character,
    Str,
    Boolean,
    Array { element: Box<FeType>, dimensions: Vec<u32> },
    Record { name: String, fields: IndexMap<String, FeType> },
    Function { parameters: Vec<FeType>, return_type: Option<Box<FeType>> },
    Unknown,
    Error,
}

impl FeType {
    pub fn is_numeric(&self) -> bool {
        matches!(self, FeType::Integer | FeType::Real)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, FeType::Error)
    }
}

impl PartialEq for FeType {
    fn eq(&self, other: &Self) -> bool {
        use FeType::*;
        match (self, other) {
            (Integer, Integer) | (Real, Real) | (Character, Character) | (Str, Str) | (Boolean, Boolean) => true,
            (Array { element: e1, dimensions: d1 }, Array { element: e2, dimensions: d2 }) => e1 == e2 && d1 == d2,
            (Record { name: n1, fields: f1 }, Record { name: n2, fields: f2 }) => n1 == n2 && f1 == f2,
            (Function { parameters: p1, return_type: r1 }, Function { parameters: p2, return_type: r2 }) => p1 == p2 && r1 == r2,
            (Unknown, Unknown) | (Error, Error) => true,
            _ => false,
        }
    }
}

impl Eq for FeType {}

impl fmt::Display for FeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeType::Integer => write!(f, "integer"),
            FeType::Real => write!(f, "real"),
            FeType::Character => write!(f, "character"),
            FeType::Str => write!(f, "string"),
            FeType::Boolean => write!(f, "boolean"),
            FeType::Array { element, dimensions } => {
                if dimensions.is_empty() {
                    write!(f, "array of {element}")
                } else {
                    let dims = dimensions.iter().join(",");
                    write!(f, "array of {element}[{dims}]")
                }
            }
            FeType::Record { name, .. } => write!(f, "record {name}"),
            FeType::Function { parameters, return_type } => {
                let params = parameters.iter().join(", ");
                match return_type {
                    Some(r) => write!(f, "function({params}) -> {r}"),
                    None => write!(f, "procedure({params})"),
                }
            }
            FeType::Unknown => write!(f, "unknown"),
            FeType::Error => write!(f, "error"),
        }
    }
}
