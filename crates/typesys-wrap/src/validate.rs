//! # Argument Validation
//!
//! [`ArgumentValidator`] checks covered arguments against their declared
//! types and fails on the first mismatch. It never converts: the body
//! receives exactly what the caller passed.
//!
//! The check is exact. An `int` does not satisfy `float`, and a `bool` only
//! satisfies `int` when [`CoercionPolicy::bool_as_int`] is set. Under the
//! collector shapes the declared types form an accepted set, so
//! `ArgumentValidator(int, float)` on `mult(*numbers)` accepts `(2, 3, 4.5)`.

use typesys_core::{
    CallArguments, CoercionPolicy, ParamRef, SpecError, TypeMismatchError, TypeSpec, TypesysError,
    Value, ValueType,
};

use crate::decorator::{check_collector_nonempty, check_positional_fit, map_covered, Decorator};
use crate::function::{Callable, Function};

const NAME: &str = "ArgumentValidator";

/// Rejects arguments whose runtime type is not declared.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentValidator {
    spec: TypeSpec,
    policy: CoercionPolicy,
}

impl ArgumentValidator {
    /// Check arguments against `spec` under the default policy.
    pub fn new(spec: impl Into<TypeSpec>) -> Self {
        Self {
            spec: spec.into(),
            policy: CoercionPolicy::default(),
        }
    }

    /// Use `policy` to decide type equivalence.
    pub fn with_policy(mut self, policy: CoercionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The declared types.
    pub fn spec(&self) -> &TypeSpec {
        &self.spec
    }
}

impl Decorator for ArgumentValidator {
    fn label(&self) -> String {
        format!("{NAME}{}", self.spec)
    }

    fn decorate(&self, target: Function) -> Result<Function, SpecError> {
        check_positional_fit(NAME, &target, &self.spec)?;
        check_collector_nonempty(NAME, &target, &self.spec)?;
        tracing::debug!(function = target.name(), spec = %self.spec, "argument validation applied");
        let layer = ValidatingCall {
            spec: self.spec.clone(),
            policy: self.policy,
            inner: target.clone(),
        };
        Ok(target.layered(self.label(), layer))
    }
}

struct ValidatingCall {
    spec: TypeSpec,
    policy: CoercionPolicy,
    inner: Function,
}

impl ValidatingCall {
    fn check(&self, param: ParamRef, value: Value, accepted: &[ValueType]) -> Result<Value, TypesysError> {
        if accepted.iter().any(|ty| ty.admits(&value, &self.policy)) {
            tracing::trace!(function = self.inner.name(), %param, "validated");
            return Ok(value);
        }
        let actual = value.value_type();
        tracing::debug!(function = self.inner.name(), %param, %actual, "argument validation failed");
        Err(TypeMismatchError {
            function: self.inner.name().to_string(),
            parameter: param,
            actual,
            expected: accepted.to_vec(),
        }
        .into())
    }
}

impl Callable for ValidatingCall {
    fn call(&self, args: CallArguments) -> Result<Value, TypesysError> {
        let checked = map_covered(self.inner.shape(), &self.spec, args, |param, value, accepted| {
            self.check(param, value, accepted)
        })?;
        self.inner.call(checked)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
