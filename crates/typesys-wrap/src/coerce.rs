//! # Argument Coercion
//!
//! [`ArgumentCoercer`] converts every covered argument to its declared type
//! before the body runs. Under the collector shapes the type spec must hold
//! exactly one type, which is broadcast to every element.
//!
//! ```text
//! ArgumentCoercer(int, int) on add(a, b=0)
//!
//!   add("1", b="2")  ──▶  add(1, b=2)
//!   add("1")         ──▶  add(1)          b keeps its default, unconverted
//!   add("x")         ──▶  ConversionError (parameter `a`, str → int)
//! ```

use typesys_core::{
    CallArguments, CallShape, CoercionPolicy, ConversionError, ParamRef, SpecError, TypeSpec,
    TypesysError, Value, ValueType,
};

use crate::decorator::{check_positional_fit, map_covered, Decorator};
use crate::function::{Callable, Function};

const NAME: &str = "ArgumentCoercer";

/// Converts arguments to declared types before delegating.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentCoercer {
    spec: TypeSpec,
    policy: CoercionPolicy,
}

impl ArgumentCoercer {
    /// Coerce arguments to `spec` under the default policy.
    pub fn new(spec: impl Into<TypeSpec>) -> Self {
        Self {
            spec: spec.into(),
            policy: CoercionPolicy::default(),
        }
    }

    /// Use `policy` for every conversion.
    pub fn with_policy(mut self, policy: CoercionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The declared types.
    pub fn spec(&self) -> &TypeSpec {
        &self.spec
    }
}

impl Decorator for ArgumentCoercer {
    fn label(&self) -> String {
        format!("{NAME}{}", self.spec)
    }

    fn decorate(&self, target: Function) -> Result<Function, SpecError> {
        match target.shape() {
            CallShape::Positional { .. } => check_positional_fit(NAME, &target, &self.spec)?,
            shape @ (CallShape::Variadic | CallShape::KeywordVariadic) => {
                if self.spec.len() != 1 {
                    return Err(SpecError::Broadcast {
                        decorator: NAME,
                        function: target.name().to_string(),
                        shape: shape.kind(),
                        count: self.spec.len(),
                    });
                }
            }
        }
        tracing::debug!(function = target.name(), spec = %self.spec, "argument coercion applied");
        let layer = CoercingCall {
            spec: self.spec.clone(),
            policy: self.policy,
            inner: target.clone(),
        };
        Ok(target.layered(self.label(), layer))
    }
}

struct CoercingCall {
    spec: TypeSpec,
    policy: CoercionPolicy,
    inner: Function,
}

impl CoercingCall {
    fn coerce(&self, param: ParamRef, value: Value, target: ValueType) -> Result<Value, TypesysError> {
        match target.convert(&value, &self.policy) {
            Ok(converted) => {
                tracing::trace!(function = self.inner.name(), %param, from = %value.value_type(), to = %target, "coerced");
                Ok(converted)
            }
            Err(cause) => {
                tracing::debug!(function = self.inner.name(), %param, %cause, "argument coercion failed");
                Err(ConversionError::argument(self.inner.name(), param, value, target, cause).into())
            }
        }
    }
}

impl Callable for CoercingCall {
    fn call(&self, args: CallArguments) -> Result<Value, TypesysError> {
        let coerced = map_covered(self.inner.shape(), &self.spec, args, |param, value, types| {
            match types.first() {
                Some(&target) => self.coerce(param, value, target),
                None => Ok(value),
            }
        })?;
        self.inner.call(coerced)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
