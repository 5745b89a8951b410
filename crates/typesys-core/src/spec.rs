//! # Type Specs and Call Shapes
//!
//! A [`TypeSpec`] is the ordered list of types a decorator declares. A
//! [`CallShape`] says how that list lines up with a function's parameters:
//!
//! - `Positional` — entry `i` governs parameter `i`, whether it arrives by
//!   position or by keyword. Arguments beyond the last entry are not touched.
//! - `Variadic` — every element of the positional collector.
//! - `KeywordVariadic` — every value of the keyword collector.
//!
//! Both are fixed when the decorator is applied and never change afterwards.

use serde::{Deserialize, Serialize};

use crate::value::ValueType;

/// Ordered list of declared types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeSpec(Vec<ValueType>);

impl TypeSpec {
    /// Build a spec from declared types, in order.
    pub fn new(types: impl IntoIterator<Item = ValueType>) -> Self {
        Self(types.into_iter().collect())
    }

    /// Number of declared types.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no types were declared.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The type declared at `index`.
    pub fn get(&self, index: usize) -> Option<ValueType> {
        self.0.get(index).copied()
    }

    /// The declared types as a slice.
    pub fn as_slice(&self) -> &[ValueType] {
        &self.0
    }

    /// Iterate over declared types in order.
    pub fn iter(&self) -> impl Iterator<Item = ValueType> + '_ {
        self.0.iter().copied()
    }
}

impl From<Vec<ValueType>> for TypeSpec {
    fn from(types: Vec<ValueType>) -> Self {
        Self(types)
    }
}

impl<const N: usize> From<[ValueType; N]> for TypeSpec {
    fn from(types: [ValueType; N]) -> Self {
        Self(types.to_vec())
    }
}

impl From<ValueType> for TypeSpec {
    fn from(ty: ValueType) -> Self {
        Self(vec![ty])
    }
}

impl FromIterator<ValueType> for TypeSpec {
    fn from_iter<I: IntoIterator<Item = ValueType>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl std::fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.0.iter().map(ValueType::as_str).collect();
        write!(f, "({})", names.join(", "))
    }
}

/// How a function receives its arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CallShape {
    /// Ordinary parameters, named in declaration order.
    Positional {
        /// Parameter names.
        params: Vec<String>,
    },
    /// A single variadic positional collector (`*args`).
    Variadic,
    /// A single variadic keyword collector (`**kwargs`).
    KeywordVariadic,
}

impl CallShape {
    /// Ordinary parameters with the given names.
    pub fn positional<I, S>(params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Positional {
            params: params.into_iter().map(Into::into).collect(),
        }
    }

    /// Short name used in messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Positional { .. } => "positional",
            Self::Variadic => "variadic",
            Self::KeywordVariadic => "keyword-variadic",
        }
    }

    /// Declared parameter names; empty for the collector shapes.
    pub fn params(&self) -> &[String] {
        match self {
            Self::Positional { params } => params,
            Self::Variadic | Self::KeywordVariadic => &[],
        }
    }

    /// Position of the parameter called `name`.
    pub fn param_index(&self, name: &str) -> Option<usize> {
        self.params().iter().position(|p| p == name)
    }
}

impl std::fmt::Display for CallShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Positional { params } => write!(f, "({})", params.join(", ")),
            Self::Variadic => f.write_str("(*args)"),
            Self::KeywordVariadic => f.write_str("(**kwargs)"),
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
