//! # Functions and Callables
//!
//! A [`Function`] is a named, shaped, shareable callable. Plain bodies are
//! closures over [`CallArguments`]; decorator layers are [`Callable`]s that
//! own the function they wrap.

use std::sync::Arc;

use typesys_core::{CallArguments, CallError, CallShape, SpecError, TypesysError, Value};

use crate::decorator::Decorator;

/// Something that can be invoked with call arguments.
///
/// Implementations must not keep per-call state: the same callable may be
/// invoked from several threads at once.
pub trait Callable: Send + Sync {
    /// Invoke with `args`.
    fn call(&self, args: CallArguments) -> Result<Value, TypesysError>;
}

/// Adapts a body closure, lifting its `CallError` into `TypesysError`.
struct Body<F>(F);

impl<F> Callable for Body<F>
where
    F: Fn(CallArguments) -> Result<Value, CallError> + Send + Sync,
{
    fn call(&self, args: CallArguments) -> Result<Value, TypesysError> {
        (self.0)(args).map_err(TypesysError::from)
    }
}

/// A callable together with the name and call shape decorators need.
#[derive(Clone)]
pub struct Function {
    name: Arc<str>,
    shape: CallShape,
    /// Decorator labels, outermost first.
    layers: Vec<String>,
    body: Arc<dyn Callable>,
}

impl Function {
    /// An undecorated function with the given body.
    pub fn new<F>(name: impl Into<String>, shape: CallShape, body: F) -> Self
    where
        F: Fn(CallArguments) -> Result<Value, CallError> + Send + Sync + 'static,
    {
        Self::from_callable(name, shape, Body(body))
    }

    /// An undecorated function backed by an arbitrary [`Callable`].
    pub fn from_callable(
        name: impl Into<String>,
        shape: CallShape,
        callable: impl Callable + 'static,
    ) -> Self {
        let name: String = name.into();
        Self {
            name: Arc::from(name),
            shape,
            layers: Vec::new(),
            body: Arc::new(callable),
        }
    }

    /// The function's name, as used in error messages.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// How the function receives its arguments.
    pub fn shape(&self) -> &CallShape {
        &self.shape
    }

    /// Labels of the decorators applied so far, outermost first.
    pub fn layers(&self) -> &[String] {
        &self.layers
    }

    /// Invoke the function.
    pub fn call(&self, args: CallArguments) -> Result<Value, TypesysError> {
        self.body.call(args)
    }

    /// Apply `decorator`, yielding the wrapped function.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError`] if the decorator's spec does not fit this
    /// function's call shape.
    pub fn decorated(self, decorator: &impl Decorator) -> Result<Self, SpecError> {
        decorator.decorate(self)
    }

    /// A new function with the same name and shape whose body is `outer`.
    /// Used by decorators; `outer` is expected to own a clone of `self`.
    pub fn layered(&self, label: String, outer: impl Callable + 'static) -> Self {
        let mut layers = Vec::with_capacity(self.layers.len() + 1);
        layers.push(label);
        layers.extend(self.layers.iter().cloned());
        Self {
            name: Arc::clone(&self.name),
            shape: self.shape.clone(),
            layers,
            body: Arc::new(outer),
        }
    }
}

impl std::fmt::Debug for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("shape", &self.shape)
            .field("layers", &self.layers)
            .finish_non_exhaustive()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
