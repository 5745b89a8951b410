//! # Demonstration Catalog
//!
//! The functions `typesys call` can invoke. Each is a small arithmetic body
//! wrapped by one decorator, built under a caller-supplied policy.
//!
//! | Name | Shape | Decorator |
//! |------|-------|-----------|
//! | `add` | `(a, b=0)` | `ArgumentCoercer(int, int)` |
//! | `mult` | `(*numbers)` | `ArgumentCoercer(int)` |
//! | `kw_mult` | `(**kwargs)` | `ArgumentCoercer(int)` |
//! | `hint_add` | `(a, b)` | `ArgumentValidator(int, int)` |
//! | `def_add` | `(a, b=0)` | `ArgumentValidator(int, int)` |
//! | `hint_mult` | `(*numbers)` | `ArgumentValidator(int, float)` |
//! | `hint_kw_mult` | `(**kwargs)` | `ArgumentValidator(int, float)` |
//! | `ret_add` | `(x, y)` | `ReturnCoercer(int, float)` |
//! | `strict_ret_add` | `(x, y)` | `ReturnValidator(int)` |
//! | `returns_add` | `(x, y)` | `ReturnValidator(str)` |

use std::collections::BTreeMap;

use typesys_wrap::{
    ArgumentCoercer, ArgumentValidator, CallError, CallShape, CoercionPolicy, Decorator, Function,
    ReturnCoercer, ReturnValidator, SpecError, Value, ValueType,
};

use ValueType::{Float, Int, Str};

/// A catalog function and a one-line description.
#[derive(Debug, Clone)]
pub struct Entry {
    /// The decorated function.
    pub function: Function,
    /// Shown by `typesys list --describe`.
    pub summary: &'static str,
}

impl Entry {
    /// The function's name, which is also its catalog key.
    pub fn name(&self) -> &str {
        self.function.name()
    }
}

/// Named, decorated demonstration functions.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: BTreeMap<String, Entry>,
}

impl Catalog {
    /// The standard catalog, every decorator built with `policy`.
    pub fn standard(policy: CoercionPolicy) -> Result<Self, SpecError> {
        let mut catalog = Self::default();

        catalog.insert(
            add_body("add", Some(0)),
            &ArgumentCoercer::new([Int, Int]).with_policy(policy),
            "a + b, arguments coerced to int",
        )?;
        catalog.insert(
            product_body("mult"),
            &ArgumentCoercer::new([Int]).with_policy(policy),
            "product of all positional arguments, each coerced to int",
        )?;
        catalog.insert(
            keyword_product_body("kw_mult"),
            &ArgumentCoercer::new([Int]).with_policy(policy),
            "first * second * third, keywords coerced to int",
        )?;
        catalog.insert(
            add_body("hint_add", None),
            &ArgumentValidator::new([Int, Int]).with_policy(policy),
            "a + b, both must already be int",
        )?;
        catalog.insert(
            add_body("def_add", Some(0)),
            &ArgumentValidator::new([Int, Int]).with_policy(policy),
            "a + b with b defaulting to 0, both must be int",
        )?;
        catalog.insert(
            product_body("hint_mult"),
            &ArgumentValidator::new([Int, Float]).with_policy(policy),
            "product of positional arguments, each int or float",
        )?;
        catalog.insert(
            keyword_product_body("hint_kw_mult"),
            &ArgumentValidator::new([Int, Float]).with_policy(policy),
            "first * second * third, each int or float",
        )?;
        catalog.insert(
            xy_add("ret_add"),
            &ReturnCoercer::new([Int, Float]).with_policy(policy),
            "x + y, result coerced to int, else float",
        )?;
        catalog.insert(
            xy_add("strict_ret_add"),
            &ReturnValidator::new(Int).with_policy(policy),
            "x + y, result converted to int",
        )?;
        catalog.insert(
            xy_add("returns_add"),
            &ReturnValidator::new(Str).with_policy(policy),
            "x + y, result converted to str",
        )?;

        tracing::debug!(functions = catalog.len(), "catalog built");
        Ok(catalog)
    }

    fn insert(
        &mut self,
        body: Function,
        decorator: &impl Decorator,
        summary: &'static str,
    ) -> Result<(), SpecError> {
        let function = body.decorated(decorator)?;
        self.entries
            .insert(function.name().to_string(), Entry { function, summary });
        Ok(())
    }

    /// Look up a function by name.
    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.get(name)
    }

    /// Entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    /// Number of functions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the catalog holds no functions.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ─── Bodies ──────────────────────────────────────────────────────────

/// `a + b`; `b` falls back to `b_default` when omitted.
fn add_body(name: &'static str, b_default: Option<i64>) -> Function {
    Function::new(name, CallShape::positional(["a", "b"]), move |args| {
        args.ensure_positional_at_most(name, 2)?;
        args.ensure_keywords_within(name, &["a", "b"])?;
        let a = args.require(name, 0, "a")?;
        let b = match (args.bind(name, 1, "b")?, b_default) {
            (Some(b), _) => b.clone(),
            (None, Some(default)) => Value::Int(default),
            (None, None) => {
                return Err(CallError::MissingArgument {
                    function: name.to_string(),
                    name: "b".to_string(),
                })
            }
        };
        a.try_add(&b)
    })
}

fn product_body(name: &'static str) -> Function {
    Function::new(name, CallShape::Variadic, move |args| {
        if let Some(unexpected) = args.keywords().keys().next() {
            return Err(CallError::UnexpectedKeyword {
                function: name.to_string(),
                name: unexpected.clone(),
            });
        }
        Value::product(args.positional())
    })
}

fn keyword_product_body(name: &'static str) -> Function {
    Function::new(name, CallShape::KeywordVariadic, move |args| {
        args.ensure_positional_at_most(name, 0)?;
        let mut factors = Vec::with_capacity(3);
        for key in ["first", "second", "third"] {
            let factor = args
                .keyword(key)
                .ok_or_else(|| CallError::MissingArgument {
                    function: name.to_string(),
                    name: key.to_string(),
                })?;
            factors.push(factor);
        }
        Value::product(factors)
    })
}

fn xy_add(name: &'static str) -> Function {
    Function::new(name, CallShape::positional(["x", "y"]), move |args| {
        args.ensure_positional_at_most(name, 2)?;
        args.ensure_keywords_within(name, &["x", "y"])?;
        let x = args.require(name, 0, "x")?;
        let y = args.require(name, 1, "y")?;
        x.try_add(y)
    })
}
