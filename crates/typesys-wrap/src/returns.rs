//! # Return-Value Decorators
//!
//! Both decorators run the body first and then convert what it returned.
//! A failure here surfaces after the body's effects have happened.
//!
//! - [`ReturnCoercer`] tries an ordered list of candidate types and keeps
//!   the first conversion that succeeds. A single candidate is still a
//!   conversion, never a type check.
//! - [`ReturnValidator`] converts to exactly one type with no fallback.

use typesys_core::{
    CallArguments, CoercionPolicy, ConversionError, SpecError, TypeSpec, TypesysError, Value,
    ValueType,
};

use crate::decorator::Decorator;
use crate::function::{Callable, Function};

// ─── ReturnCoercer ───────────────────────────────────────────────────

const COERCER: &str = "ReturnCoercer";

/// Converts the return value to the first candidate type that accepts it.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnCoercer {
    candidates: TypeSpec,
    policy: CoercionPolicy,
}

impl ReturnCoercer {
    /// Candidates are tried in the order given.
    pub fn new(candidates: impl Into<TypeSpec>) -> Self {
        Self {
            candidates: candidates.into(),
            policy: CoercionPolicy::default(),
        }
    }

    /// Use `policy` for every conversion.
    pub fn with_policy(mut self, policy: CoercionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The candidate types, in preference order.
    pub fn candidates(&self) -> &TypeSpec {
        &self.candidates
    }
}

impl Decorator for ReturnCoercer {
    fn label(&self) -> String {
        format!("{COERCER}{}", self.candidates)
    }

    fn decorate(&self, target: Function) -> Result<Function, SpecError> {
        if self.candidates.is_empty() {
            return Err(SpecError::Empty {
                decorator: COERCER,
                function: target.name().to_string(),
            });
        }
        tracing::debug!(function = target.name(), candidates = %self.candidates, "return coercion applied");
        let layer = CoercingReturn {
            candidates: self.candidates.clone(),
            policy: self.policy,
            inner: target.clone(),
        };
        Ok(target.layered(self.label(), layer))
    }
}

struct CoercingReturn {
    candidates: TypeSpec,
    policy: CoercionPolicy,
    inner: Function,
}

impl Callable for CoercingReturn {
    fn call(&self, args: CallArguments) -> Result<Value, TypesysError> {
        let value = self.inner.call(args)?;
        let mut causes = Vec::with_capacity(self.candidates.len());
        for target in self.candidates.iter() {
            match target.convert(&value, &self.policy) {
                Ok(converted) => {
                    tracing::trace!(function = self.inner.name(), from = %value.value_type(), to = %target, "return coerced");
                    return Ok(converted);
                }
                Err(cause) => causes.push(cause),
            }
        }
        tracing::debug!(function = self.inner.name(), actual = %value.value_type(), "no return candidate accepted the value");
        Err(ConversionError::return_value(
            self.inner.name(),
            value,
            self.candidates.as_slice().to_vec(),
            causes,
        )
        .into())
    }
}

// ─── ReturnValidator ─────────────────────────────────────────────────

const VALIDATOR: &str = "ReturnValidator";

/// Converts the return value to one declared type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReturnValidator {
    target: ValueType,
    policy: CoercionPolicy,
}

impl ReturnValidator {
    /// Convert return values to `target` under the default policy.
    pub fn new(target: ValueType) -> Self {
        Self {
            target,
            policy: CoercionPolicy::default(),
        }
    }

    /// Use `policy` for the conversion.
    pub fn with_policy(mut self, policy: CoercionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The declared return type.
    pub fn target(&self) -> ValueType {
        self.target
    }
}

impl Decorator for ReturnValidator {
    fn label(&self) -> String {
        format!("{VALIDATOR}({})", self.target)
    }

    fn decorate(&self, target: Function) -> Result<Function, SpecError> {
        tracing::debug!(function = target.name(), target = %self.target, "return validation applied");
        let layer = ValidatingReturn {
            target: self.target,
            policy: self.policy,
            inner: target.clone(),
        };
        Ok(target.layered(self.label(), layer))
    }
}

struct ValidatingReturn {
    target: ValueType,
    policy: CoercionPolicy,
    inner: Function,
}

impl Callable for ValidatingReturn {
    fn call(&self, args: CallArguments) -> Result<Value, TypesysError> {
        let value = self.inner.call(args)?;
        match self.target.convert(&value, &self.policy) {
            Ok(converted) => Ok(converted),
            Err(cause) => {
                tracing::debug!(function = self.inner.name(), %cause, "return conversion failed");
                Err(ConversionError::return_value(
                    self.inner.name(),
                    value,
                    vec![self.target],
                    vec![cause],
                )
                .into())
            }
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
