//! End-to-end scenarios: decorated demonstration functions called the way a
//! dynamic caller would call them.

use typesys_wrap::{
    ArgumentCoercer, ArgumentValidator, CallArguments, CallError, CallShape, Function, ParamRef,
    ReturnCoercer, ReturnValidator, TypesysError, Value, ValueType,
};

use ValueType::{Float, Int, Str};

// ─── Catalog ─────────────────────────────────────────────────────────

/// `a + b` with `b` defaulting to 0.
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

/// Product of the positional arguments; keywords are rejected.
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

/// `first * second * third`, each read from keywords.
fn kw_product_body(name: &'static str) -> Function {
    Function::new(name, CallShape::KeywordVariadic, move |args| {
        args.ensure_positional_at_most(name, 0)?;
        let mut factors = Vec::with_capacity(3);
        for key in ["first", "second", "third"] {
            let factor = args.keyword(key).ok_or_else(|| CallError::MissingArgument {
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

fn add() -> Function {
    add_body("add", Some(0))
        .decorated(&ArgumentCoercer::new([Int, Int]))
        .unwrap()
}

fn mult() -> Function {
    product_body("mult")
        .decorated(&ArgumentCoercer::new([Int]))
        .unwrap()
}

fn kw_mult() -> Function {
    kw_product_body("kw_mult")
        .decorated(&ArgumentCoercer::new([Int]))
        .unwrap()
}

fn hint_add() -> Function {
    add_body("hint_add", None)
        .decorated(&ArgumentValidator::new([Int, Int]))
        .unwrap()
}

fn def_add() -> Function {
    add_body("def_add", Some(0))
        .decorated(&ArgumentValidator::new([Int, Int]))
        .unwrap()
}

fn hint_mult() -> Function {
    product_body("hint_mult")
        .decorated(&ArgumentValidator::new([Int, Float]))
        .unwrap()
}

fn hint_kw_mult() -> Function {
    kw_product_body("hint_kw_mult")
        .decorated(&ArgumentValidator::new([Int, Float]))
        .unwrap()
}

fn ret_add() -> Function {
    xy_add("ret_add")
        .decorated(&ReturnCoercer::new([Int, Float]))
        .unwrap()
}

fn strict_ret_add() -> Function {
    xy_add("strict_ret_add")
        .decorated(&ReturnValidator::new(Int))
        .unwrap()
}

fn returns_add() -> Function {
    xy_add("returns_add")
        .decorated(&ReturnValidator::new(Str))
        .unwrap()
}

fn pos<const N: usize>(values: [Value; N]) -> CallArguments {
    CallArguments::from_positional(values)
}

fn s(text: &str) -> Value {
    Value::from(text)
}

fn i(n: i64) -> Value {
    Value::Int(n)
}

// ─── ArgumentCoercer ─────────────────────────────────────────────────

#[test]
fn add_coerces_every_positional_and_keyword_form() {
    let add = add();
    let forms = [
        pos([i(1), i(2)]),
        pos([s("1"), i(2)]),
        pos([s("1"), s("2")]),
        pos([i(1)]).kwarg("b", 2i64),
        pos([s("1")]).kwarg("b", 2i64),
        pos([s("1")]).kwarg("b", "2"),
    ];
    for args in forms {
        assert_eq!(add.call(args).unwrap(), i(3));
    }
}

#[test]
fn add_leaves_default_alone() {
    assert_eq!(add().call(pos([s("5")])).unwrap(), i(5));
}

#[test]
fn add_rejects_unparseable_string() {
    let err = add().call(pos([s("one"), i(2)])).unwrap_err();
    let TypesysError::Conversion(err) = err else {
        panic!("expected conversion error");
    };
    assert_eq!(err.function, "add");
    assert_eq!(err.value, s("one"));
    assert_eq!(err.targets, vec![Int]);
}

#[test]
fn add_surplus_arguments_reach_the_body() {
    let err = add().call(pos([i(1), i(2), s("3")])).unwrap_err();
    assert!(matches!(
        err,
        TypesysError::Call(CallError::TooManyPositional { max: 2, given: 3, .. })
    ));
}

#[test]
fn mult_broadcasts_int() {
    let mult = mult();
    let forms = [
        pos([i(2), i(3), i(4)]),
        pos([s("2"), i(3), i(4)]),
        pos([s("2"), s("3"), i(4)]),
        pos([s("2"), s("3"), s("4")]),
    ];
    for args in forms {
        assert_eq!(mult.call(args).unwrap(), i(24));
    }
}

#[test]
fn kw_mult_broadcasts_int_over_keywords() {
    let kw_mult = kw_mult();
    let forms = [
        CallArguments::from_keywords([("first", i(2)), ("second", i(3)), ("third", i(4))]),
        CallArguments::from_keywords([("first", s("2")), ("second", i(3)), ("third", i(4))]),
        CallArguments::from_keywords([("first", s("2")), ("second", s("3")), ("third", i(4))]),
        CallArguments::from_keywords([("first", s("2")), ("second", s("3")), ("third", s("4"))]),
    ];
    for args in forms {
        assert_eq!(kw_mult.call(args).unwrap(), i(24));
    }
}

// ─── ArgumentValidator ───────────────────────────────────────────────

#[test]
fn hint_add_accepts_ints() {
    assert_eq!(hint_add().call(pos([i(1), i(2)])).unwrap(), i(3));
}

#[test]
fn hint_add_rejects_string() {
    let err = hint_add().call(pos([i(1), s("2")])).unwrap_err();
    let TypesysError::TypeMismatch(err) = err else {
        panic!("expected type mismatch");
    };
    assert_eq!(
        err.parameter,
        ParamRef::Positional {
            index: 1,
            name: Some("b".to_string())
        }
    );
    assert_eq!(err.actual, Str);
    assert_eq!(err.expected, vec![Int]);
}

#[test]
fn def_add_checks_keyword_argument() {
    let def_add = def_add();
    assert_eq!(def_add.call(pos([i(1)]).kwarg("b", 2i64)).unwrap(), i(3));
    assert_eq!(def_add.call(pos([i(1)])).unwrap(), i(1));

    let err = def_add.call(pos([i(1)]).kwarg("b", "2")).unwrap_err();
    let TypesysError::TypeMismatch(err) = err else {
        panic!("expected type mismatch");
    };
    assert_eq!(
        err.parameter,
        ParamRef::Keyword {
            name: "b".to_string()
        }
    );
}

#[test]
fn hint_mult_accepts_int_or_float() {
    let hint_mult = hint_mult();
    assert_eq!(hint_mult.call(pos([i(2), i(3), i(4)])).unwrap(), i(24));
    assert_eq!(
        hint_mult.call(pos([i(2), i(3), Value::Float(4.5)])).unwrap(),
        Value::Float(27.0)
    );
    let err = hint_mult.call(pos([i(2), i(3), s("4")])).unwrap_err();
    assert!(matches!(err, TypesysError::TypeMismatch(_)));
}

#[test]
fn hint_kw_mult_accepts_int_or_float() {
    let hint_kw_mult = hint_kw_mult();
    let ints = CallArguments::from_keywords([("first", i(2)), ("second", i(3)), ("third", i(4))]);
    assert_eq!(hint_kw_mult.call(ints).unwrap(), i(24));

    let mixed = CallArguments::from_keywords([("first", i(2)), ("second", i(3))])
        .kwarg("third", 4.5);
    assert_eq!(hint_kw_mult.call(mixed).unwrap(), Value::Float(27.0));

    let bad = CallArguments::from_keywords([("first", i(2)), ("second", i(3)), ("third", s("4"))]);
    let err = hint_kw_mult.call(bad).unwrap_err();
    let TypesysError::TypeMismatch(err) = err else {
        panic!("expected type mismatch");
    };
    assert_eq!(
        err.parameter,
        ParamRef::Keyword {
            name: "third".to_string()
        }
    );
}

#[test]
fn collector_bodies_reject_the_other_kind() {
    let err = mult().call(pos([i(2)]).kwarg("n", 3i64)).unwrap_err();
    assert!(matches!(
        err,
        TypesysError::Call(CallError::UnexpectedKeyword { .. })
    ));

    let args = CallArguments::from_keywords([("first", i(2)), ("second", i(3)), ("third", i(4))])
        .arg(5i64);
    let err = kw_mult().call(args).unwrap_err();
    assert!(matches!(
        err,
        TypesysError::Call(CallError::TooManyPositional { max: 0, given: 1, .. })
    ));
}

// ─── Return decorators ───────────────────────────────────────────────

#[test]
fn ret_add_prefers_int() {
    let ret_add = ret_add();
    assert_eq!(ret_add.call(pos([i(1), i(2)])).unwrap(), i(3));
    assert_eq!(
        ret_add.call(pos([Value::Float(1.5), Value::Float(2.5)])).unwrap(),
        i(4)
    );
}

#[test]
fn ret_add_body_failure_propagates() {
    let err = ret_add().call(pos([i(1), s("2")])).unwrap_err();
    assert!(matches!(
        err,
        TypesysError::Call(CallError::UnsupportedOperand { op: "+", .. })
    ));
}

#[test]
fn ret_add_body_checks_its_signature() {
    let err = ret_add().call(pos([i(1), i(2), i(3)])).unwrap_err();
    assert!(matches!(
        err,
        TypesysError::Call(CallError::TooManyPositional { max: 2, given: 3, .. })
    ));
    let err = ret_add().call(pos([i(1), i(2)]).kwarg("z", 3i64)).unwrap_err();
    assert!(matches!(
        err,
        TypesysError::Call(CallError::UnexpectedKeyword { .. })
    ));
}

#[test]
fn strict_ret_add_converts_to_int() {
    let strict = strict_ret_add();
    assert_eq!(strict.call(pos([i(1), i(2)])).unwrap(), i(3));
    assert_eq!(strict.call(pos([i(1), Value::Float(2.0)])).unwrap(), i(3));
}

#[test]
fn returns_add_yields_str() {
    let out = returns_add().call(pos([i(1), i(2)])).unwrap();
    assert_eq!(out, s("3"));
    assert_eq!(out.value_type(), Str);
}

// ─── Composition and sharing ─────────────────────────────────────────

#[test]
fn decorators_nest() {
    let f = xy_add("nested")
        .decorated(&ArgumentCoercer::new([Int, Int]))
        .unwrap()
        .decorated(&ReturnValidator::new(Str))
        .unwrap();
    assert_eq!(f.call(pos([s("20"), s("22")])).unwrap(), s("42"));
    assert_eq!(
        f.layers(),
        &[
            "ReturnValidator(str)".to_string(),
            "ArgumentCoercer(int, int)".to_string()
        ]
    );
}

#[test]
fn outer_validator_sees_raw_arguments() {
    // Validator outside the coercer: checks happen before any conversion.
    let f = xy_add("guarded")
        .decorated(&ArgumentCoercer::new([Int, Int]))
        .unwrap()
        .decorated(&ArgumentValidator::new([Str, Str]))
        .unwrap();
    assert_eq!(f.call(pos([s("1"), s("2")])).unwrap(), i(3));
    assert!(matches!(
        f.call(pos([i(1), i(2)])).unwrap_err(),
        TypesysError::TypeMismatch(_)
    ));
}

#[test]
fn concurrent_calls_share_one_function() {
    let mult = mult();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (1..=8i64)
            .map(|n| {
                let mult = &mult;
                scope.spawn(move || mult.call(pos([s(&n.to_string()), i(n)])))
            })
            .collect();
        for (n, handle) in (1..=8i64).zip(handles) {
            assert_eq!(handle.join().unwrap().unwrap(), i(n * n));
        }
    });
}
