//! # Decorator Trait and Argument Coverage
//!
//! [`Decorator`] is the one seam every wrapper implements. The helpers here
//! hold the rules both argument decorators share: which arguments a spec
//! covers under each call shape, and which specs a shape accepts.

use std::collections::BTreeMap;

use typesys_core::{
    CallArguments, CallShape, ParamRef, SpecError, TypeSpec, TypesysError, Value, ValueType,
};

use crate::function::Function;

/// Turns a function into a wrapped function.
pub trait Decorator {
    /// Label recorded in [`Function::layers`], e.g. `ArgumentCoercer(int, int)`.
    fn label(&self) -> String;

    /// Wrap `target`.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError`] if the declared types cannot apply to the
    /// target's call shape.
    fn decorate(&self, target: Function) -> Result<Function, SpecError>;
}

/// Reject positional specs longer than the parameter list.
pub(crate) fn check_positional_fit(
    decorator: &'static str,
    target: &Function,
    spec: &TypeSpec,
) -> Result<(), SpecError> {
    if let CallShape::Positional { params } = target.shape() {
        if spec.len() > params.len() {
            return Err(SpecError::TooManyTypes {
                decorator,
                function: target.name().to_string(),
                count: spec.len(),
                params: params.len(),
            });
        }
    }
    Ok(())
}

/// Reject an empty spec on a collector shape.
pub(crate) fn check_collector_nonempty(
    decorator: &'static str,
    target: &Function,
    spec: &TypeSpec,
) -> Result<(), SpecError> {
    let collector = !matches!(target.shape(), CallShape::Positional { .. });
    if collector && spec.is_empty() {
        return Err(SpecError::Empty {
            decorator,
            function: target.name().to_string(),
        });
    }
    Ok(())
}

/// Rebuild `args`, passing every argument the type spec covers through `apply`
/// together with the types that govern it. Uncovered arguments are moved
/// across untouched.
///
/// Under `Positional`, argument `i` (or the keyword naming parameter `i`) is
/// governed by `spec[i]` alone. Under the collector shapes, every element is
/// governed by the whole spec.
pub(crate) fn map_covered<F>(
    shape: &CallShape,
    spec: &TypeSpec,
    args: CallArguments,
    mut apply: F,
) -> Result<CallArguments, TypesysError>
where
    F: FnMut(ParamRef, Value, &[ValueType]) -> Result<Value, TypesysError>,
{
    let (positional, keywords) = args.into_parts();
    let declared = spec.as_slice();

    let (positional, keywords) = match shape {
        CallShape::Positional { params } => {
            let positional = positional
                .into_iter()
                .enumerate()
                .map(|(index, value)| match declared.get(index) {
                    Some(ty) => {
                        let param = ParamRef::Positional {
                            index,
                            name: params.get(index).cloned(),
                        };
                        apply(param, value, std::slice::from_ref(ty))
                    }
                    None => Ok(value),
                })
                .collect::<Result<Vec<_>, _>>()?;
            let mut rebuilt = BTreeMap::new();
            for (name, value) in keywords {
                let governing = shape.param_index(&name).and_then(|i| declared.get(i));
                let value = match governing {
                    Some(ty) => apply(
                        ParamRef::Keyword { name: name.clone() },
                        value,
                        std::slice::from_ref(ty),
                    )?,
                    None => value,
                };
                rebuilt.insert(name, value);
            }
            (positional, rebuilt)
        }
        CallShape::Variadic if !declared.is_empty() => {
            let positional = positional
                .into_iter()
                .enumerate()
                .map(|(index, value)| apply(ParamRef::Element { index }, value, declared))
                .collect::<Result<Vec<_>, _>>()?;
            (positional, keywords)
        }
        CallShape::KeywordVariadic if !declared.is_empty() => {
            let mut rebuilt = BTreeMap::new();
            for (name, value) in keywords {
                let value = apply(ParamRef::Keyword { name: name.clone() }, value, declared)?;
                rebuilt.insert(name, value);
            }
            (positional, rebuilt)
        }
        CallShape::Variadic | CallShape::KeywordVariadic => (positional, keywords),
    };

    Ok(CallArguments::from_parts(positional, keywords))
}

// ─── Tests ───────────────────────────────────────────────────────────
