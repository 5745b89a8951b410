//! # Call Arguments
//!
//! `CallArguments` captures what a caller passed: an ordered list of
//! positional values and a keyword mapping. Wrappers consume one and build
//! a fresh one before delegating, so the caller's values are never changed
//! in place.
//!
//! The binding helpers (`bind`, `require`, `ensure_*`) are for function
//! bodies. Decorators never check arity; a body that wants the usual
//! "too many arguments" and "missing argument" failures asks for them here.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CallError;
use crate::value::Value;

/// Identifies one argument of a call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParamRef {
    /// An ordinary parameter addressed by position.
    Positional {
        /// Zero-based position.
        index: usize,
        /// Declared parameter name, when the position is within the signature.
        name: Option<String>,
    },
    /// An element of a variadic positional collector.
    Element {
        /// Zero-based position within the collector.
        index: usize,
    },
    /// A keyword argument.
    Keyword {
        /// The keyword.
        name: String,
    },
}

impl std::fmt::Display for ParamRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Positional {
                index,
                name: Some(name),
            } => write!(f, "parameter `{name}` (position {index})"),
            Self::Positional { index, name: None } => write!(f, "positional argument {index}"),
            Self::Element { index } => write!(f, "variadic element {index}"),
            Self::Keyword { name } => write!(f, "keyword argument `{name}`"),
        }
    }
}

/// Positional and keyword arguments of a single call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallArguments {
    positional: Vec<Value>,
    keywords: BTreeMap<String, Value>,
}

impl CallArguments {
    /// An empty argument list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from positional values only.
    pub fn from_positional<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            positional: values.into_iter().map(Into::into).collect(),
            keywords: BTreeMap::new(),
        }
    }

    /// Build from keyword values only.
    pub fn from_keywords<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self {
            positional: Vec::new(),
            keywords: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Reassemble from parts, as taken apart by [`CallArguments::into_parts`].
    pub fn from_parts(positional: Vec<Value>, keywords: BTreeMap<String, Value>) -> Self {
        Self {
            positional,
            keywords,
        }
    }

    /// Append a positional argument.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Set a keyword argument, replacing any earlier value for the same name.
    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.keywords.insert(name.into(), value.into());
        self
    }

    /// Positional arguments in call order.
    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    /// Keyword arguments, ordered by name.
    pub fn keywords(&self) -> &BTreeMap<String, Value> {
        &self.keywords
    }

    /// Look up a keyword argument.
    pub fn keyword(&self, name: &str) -> Option<&Value> {
        self.keywords.get(name)
    }

    /// Total number of supplied arguments.
    pub fn len(&self) -> usize {
        self.positional.len() + self.keywords.len()
    }

    /// Whether no arguments were supplied.
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keywords.is_empty()
    }

    /// Take the arguments apart.
    pub fn into_parts(self) -> (Vec<Value>, BTreeMap<String, Value>) {
        (self.positional, self.keywords)
    }

    /// Bind the parameter at `index` named `name`: the positional argument at
    /// that index, else the keyword of that name, else `None`.
    ///
    /// # Errors
    ///
    /// Returns [`CallError::DuplicateArgument`] if both were supplied.
    pub fn bind(
        &self,
        function: &str,
        index: usize,
        name: &str,
    ) -> Result<Option<&Value>, CallError> {
        match (self.positional.get(index), self.keywords.get(name)) {
            (Some(_), Some(_)) => Err(CallError::DuplicateArgument {
                function: function.to_string(),
                name: name.to_string(),
            }),
            (Some(v), None) | (None, Some(v)) => Ok(Some(v)),
            (None, None) => Ok(None),
        }
    }

    /// Like [`CallArguments::bind`] but the parameter has no default.
    ///
    /// # Errors
    ///
    /// Returns [`CallError::MissingArgument`] if neither form was supplied.
    pub fn require(&self, function: &str, index: usize, name: &str) -> Result<&Value, CallError> {
        self.bind(function, index, name)?
            .ok_or_else(|| CallError::MissingArgument {
                function: function.to_string(),
                name: name.to_string(),
            })
    }

    /// Reject calls with more than `max` positional arguments.
    pub fn ensure_positional_at_most(&self, function: &str, max: usize) -> Result<(), CallError> {
        if self.positional.len() > max {
            return Err(CallError::TooManyPositional {
                function: function.to_string(),
                max,
                given: self.positional.len(),
            });
        }
        Ok(())
    }

    /// Reject keywords that name none of `params`.
    pub fn ensure_keywords_within(&self, function: &str, params: &[&str]) -> Result<(), CallError> {
        match self.keywords.keys().find(|k| !params.contains(&k.as_str())) {
            Some(unknown) => Err(CallError::UnexpectedKeyword {
                function: function.to_string(),
                name: unknown.clone(),
            }),
            None => Ok(()),
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
