//! The allow-listed operations user scripts may call.
//!
//! Nothing registered here touches the filesystem, the network, the process or the host's
//! reflection facilities. That keeps honest mistakes contained; it is not a sandbox.

use rhai::{Array, Dynamic, Engine, EvalAltResult, FLOAT, INT, ImmutableString, Map, Position};

type FnResult<T> = Result<T, Box<EvalAltResult>>;

/// Upper bound on the number of elements `range` will materialise.
pub const MAX_RANGE_LEN: usize = 1_000_000;

fn fail<T>(message: impl Into<String>) -> FnResult<T> {
    let message: String = message.into();
    Err(message.into())
}

/// Registers every builtin on `engine`.
///
/// Turns fast operators off: the checked float division below only overrides the
/// built-in operator when the engine looks up registered overloads first.
pub fn register(engine: &mut Engine) {
    engine.set_fast_operators(false);
    register_division(engine);
    register_numeric(engine);
    register_collections(engine);
    register_coercions(engine);
}

fn division_by_zero<T>(x: FLOAT, op: &str, y: FLOAT) -> FnResult<T> {
    let message = format!("Division by zero: {x} {op} {y}");
    Err(EvalAltResult::ErrorArithmetic(message, Position::NONE).into())
}

fn checked_div(x: FLOAT, y: FLOAT) -> FnResult<FLOAT> {
    if y == 0.0 {
        return division_by_zero(x, "/", y);
    }
    Ok(x / y)
}

fn checked_rem(x: FLOAT, y: FLOAT) -> FnResult<FLOAT> {
    if y == 0.0 {
        return division_by_zero(x, "%", y);
    }
    Ok(x % y)
}

/// Float `/` and `%` raise on a zero divisor instead of producing `inf`/`NaN`.
/// Integer division is already checked by the engine.
fn register_division(engine: &mut Engine) {
    engine
        .register_fn("/", checked_div)
        .register_fn("/", |x: INT, y: FLOAT| checked_div(x as FLOAT, y))
        .register_fn("/", |x: FLOAT, y: INT| checked_div(x, y as FLOAT))
        .register_fn("%", checked_rem)
        .register_fn("%", |x: INT, y: FLOAT| checked_rem(x as FLOAT, y))
        .register_fn("%", |x: FLOAT, y: INT| checked_rem(x, y as FLOAT));

    // Op-assignment on a float left-hand side has its own built-in path.
    engine
        .register_fn("/=", |x: &mut FLOAT, y: FLOAT| -> FnResult<()> {
            *x = checked_div(*x, y)?;
            Ok(())
        })
        .register_fn("/=", |x: &mut FLOAT, y: INT| -> FnResult<()> {
            *x = checked_div(*x, y as FLOAT)?;
            Ok(())
        })
        .register_fn("%=", |x: &mut FLOAT, y: FLOAT| -> FnResult<()> {
            *x = checked_rem(*x, y)?;
            Ok(())
        })
        .register_fn("%=", |x: &mut FLOAT, y: INT| -> FnResult<()> {
            *x = checked_rem(*x, y as FLOAT)?;
            Ok(())
        });
}

fn register_numeric(engine: &mut Engine) {
    engine
        .register_fn("abs", |x: INT| -> FnResult<INT> {
            x.checked_abs()
                .map_or_else(|| fail(format!("abs({x}) overflows")), Ok)
        })
        .register_fn("abs", |x: FLOAT| x.abs());

    engine
        .register_fn("min", |a: INT, b: INT| a.min(b))
        .register_fn("min", |a: FLOAT, b: FLOAT| a.min(b))
        .register_fn("min", |a: INT, b: FLOAT| (a as FLOAT).min(b))
        .register_fn("min", |a: FLOAT, b: INT| a.min(b as FLOAT))
        .register_fn("min", |items: &mut Array| fold_extreme(items, "min", |a, b| a < b))
        .register_fn("max", |a: INT, b: INT| a.max(b))
        .register_fn("max", |a: FLOAT, b: FLOAT| a.max(b))
        .register_fn("max", |a: INT, b: FLOAT| (a as FLOAT).max(b))
        .register_fn("max", |a: FLOAT, b: INT| a.max(b as FLOAT))
        .register_fn("max", |items: &mut Array| fold_extreme(items, "max", |a, b| a > b));

    engine
        .register_fn("min", |a: Dynamic, b: Dynamic, c: Dynamic| {
            fold_extreme(&mut vec![a, b, c], "min", |a, b| a < b)
        })
        .register_fn("min", |a: Dynamic, b: Dynamic, c: Dynamic, d: Dynamic| {
            fold_extreme(&mut vec![a, b, c, d], "min", |a, b| a < b)
        })
        .register_fn("max", |a: Dynamic, b: Dynamic, c: Dynamic| {
            fold_extreme(&mut vec![a, b, c], "max", |a, b| a > b)
        })
        .register_fn("max", |a: Dynamic, b: Dynamic, c: Dynamic, d: Dynamic| {
            fold_extreme(&mut vec![a, b, c, d], "max", |a, b| a > b)
        });

    engine.register_fn("sum", |items: &mut Array| sum(items));
}

fn register_collections(engine: &mut Engine) {
    engine
        .register_fn("len", |items: &mut Array| items.len() as INT)
        .register_fn("len", |s: ImmutableString| s.chars().count() as INT)
        .register_fn("len", |map: &mut Map| map.len() as INT);

    engine
        .register_fn("range", |end: INT| range(0, end, 1))
        .register_fn("range", |start: INT, end: INT| range(start, end, 1))
        .register_fn("range", range);
}

fn register_coercions(engine: &mut Engine) {
    engine
        .register_fn("float", |x: INT| x as FLOAT)
        .register_fn("float", |x: FLOAT| x)
        .register_fn("float", |s: ImmutableString| -> FnResult<FLOAT> {
            s.trim()
                .parse::<FLOAT>()
                .map_or_else(|_| fail(format!("cannot convert \"{s}\" to float")), Ok)
        });

    engine
        .register_fn("int", |x: INT| x)
        .register_fn("int", |x: FLOAT| -> FnResult<INT> {
            if !x.is_finite() || x.trunc() < INT::MIN as FLOAT || x.trunc() >= INT::MAX as FLOAT {
                return fail(format!("cannot convert {x} to int"));
            }
            Ok(x.trunc() as INT)
        })
        .register_fn("int", |s: ImmutableString| -> FnResult<INT> {
            s.trim()
                .parse::<INT>()
                .map_or_else(|_| fail(format!("cannot convert \"{s}\" to int")), Ok)
        });

    engine.register_fn("str", |value: Dynamic| value.to_string());
}

enum Number {
    Int(INT),
    Float(FLOAT),
}

impl Number {
    fn of(value: &Dynamic, op: &str) -> FnResult<Number> {
        if let Ok(i) = value.as_int() {
            Ok(Number::Int(i))
        } else if let Ok(f) = value.as_float() {
            Ok(Number::Float(f))
        } else {
            fail(format!("{op}() expects numbers, found {}", value.type_name()))
        }
    }

    fn as_float(&self) -> FLOAT {
        match *self {
            Number::Int(i) => i as FLOAT,
            Number::Float(f) => f,
        }
    }

    fn into_dynamic(self) -> Dynamic {
        match self {
            Number::Int(i) => Dynamic::from_int(i),
            Number::Float(f) => Dynamic::from_float(f),
        }
    }
}

/// Smallest or largest element, keeping the element's own numeric kind.
fn fold_extreme(items: &mut Array, op: &str, better: fn(FLOAT, FLOAT) -> bool) -> FnResult<Dynamic> {
    let mut best: Option<Number> = None;
    for item in items.iter() {
        let candidate = Number::of(item, op)?;
        best = match best {
            Some(current) if !better(candidate.as_float(), current.as_float()) => Some(current),
            _ => Some(candidate),
        };
    }
    match best {
        Some(n) => Ok(n.into_dynamic()),
        None => fail(format!("{op}() of an empty array")),
    }
}

/// Integer sum while every element is an integer, float sum otherwise.
fn sum(items: &mut Array) -> FnResult<Dynamic> {
    let mut total = Number::Int(0);
    for item in items.iter() {
        total = match (total, Number::of(item, "sum")?) {
            (Number::Int(a), Number::Int(b)) => match a.checked_add(b) {
                Some(s) => Number::Int(s),
                None => return fail("sum() overflows"),
            },
            (a, b) => Number::Float(a.as_float() + b.as_float()),
        };
    }
    Ok(total.into_dynamic())
}

fn range(start: INT, end: INT, step: INT) -> FnResult<Array> {
    if step == 0 {
        return fail("range() step must not be zero");
    }
    let span = if step > 0 {
        end.saturating_sub(start)
    } else {
        start.saturating_sub(end)
    };
    if span <= 0 {
        return Ok(Array::new());
    }
    let len = (span as u64).div_ceil(step.unsigned_abs());
    if len > MAX_RANGE_LEN as u64 {
        return fail(format!("range() would produce {len} elements"));
    }

    let mut items = Array::with_capacity(len as usize);
    let mut current = start;
    for _ in 0..len {
        items.push(Dynamic::from_int(current));
        current = current.wrapping_add(step);
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> Engine {
        let mut engine = Engine::new_raw();
        register(&mut engine);
        engine
    }

    fn eval<T: Clone + Send + Sync + 'static>(script: &str) -> T {
        engine()
            .eval::<T>(script)
            .unwrap_or_else(|e| panic!("{script}: {e}"))
    }

    fn eval_err(script: &str) -> String {
        match engine().eval::<Dynamic>(script) {
            Ok(v) => panic!("{script} unexpectedly returned {v}"),
            Err(e) => e.to_string(),
        }
    }

    #[test]
    fn abs_handles_both_kinds() {
        assert_eq!(eval::<INT>("abs(-3)"), 3);
        assert_eq!(eval::<FLOAT>("abs(-2.5)"), 2.5);
        assert!(eval_err("abs(-9223372036854775807 - 1)").contains("overflows"));
    }

    #[test]
    fn min_and_max_mix_kinds() {
        assert_eq!(eval::<INT>("min(3, 7)"), 3);
        assert_eq!(eval::<FLOAT>("max(3, 7.5)"), 7.5);
        assert_eq!(eval::<FLOAT>("min(2.0, 9)"), 2.0);
        assert_eq!(eval::<INT>("max([4, 9, 1])"), 9);
        assert_eq!(eval::<FLOAT>("min([4, 0.5, 1])"), 0.5);
        assert!(eval_err("max([])").contains("empty"));
        assert!(eval_err("min([1, \"x\"])").contains("expects numbers"));
    }

    #[test]
    fn min_and_max_take_up_to_four_scalars() {
        assert_eq!(eval::<INT>("max(3, 9, 4)"), 9);
        assert_eq!(eval::<FLOAT>("min(3, 0.5, 4)"), 0.5);
        assert_eq!(eval::<FLOAT>("max(1, 2.5, 2, 0)"), 2.5);
        assert_eq!(eval::<INT>("min(8, -1, 3, 7)"), -1);
        assert!(eval_err("max(1, \"x\", 2)").contains("expects numbers"));
    }

    #[test]
    fn float_division_by_zero_raises() {
        assert_eq!(eval::<FLOAT>("7.5 / 2.5"), 3.0);
        assert_eq!(eval::<FLOAT>("7 / 2.0"), 3.5);
        assert_eq!(eval::<FLOAT>("7.5 % 2"), 1.5);
        assert!(eval_err("1.5 / 0.0").contains("Division by zero"));
        assert!(eval_err("1 / 0.0").contains("Division by zero"));
        assert!(eval_err("1.5 / 0").contains("Division by zero"));
        assert!(eval_err("2.5 % 0.0").contains("Division by zero"));
        assert!(eval_err("let x = 3.0; x /= 0.0; x").contains("Division by zero"));
        assert!(eval_err("1 / 0").contains("Division by zero"));
    }

    #[test]
    fn sum_keeps_ints_until_a_float_appears() {
        assert_eq!(eval::<INT>("sum([1, 2, 3])"), 6);
        assert_eq!(eval::<FLOAT>("sum([1, 2.5])"), 3.5);
        assert_eq!(eval::<INT>("sum([])"), 0);
        assert!(eval_err("sum([true])").contains("expects numbers"));
    }

    #[test]
    fn len_counts_arrays_strings_and_maps() {
        assert_eq!(eval::<INT>("len([1, 2, 3])"), 3);
        assert_eq!(eval::<INT>("len(\"héllo\")"), 5);
        assert_eq!(eval::<INT>("len(#{a: 1, b: 2})"), 2);
    }

    #[test]
    fn range_variants() {
        assert_eq!(eval::<INT>("len(range(4))"), 4);
        assert_eq!(eval::<INT>("sum(range(1, 5))"), 10);
        assert_eq!(eval::<INT>("sum(range(10, 0, -3))"), 10 + 7 + 4 + 1);
        assert_eq!(eval::<INT>("len(range(5, 1))"), 0);
        assert!(eval_err("range(0, 10, 0)").contains("zero"));
        assert!(eval_err("range(0, 100000000)").contains("elements"));
    }

    #[test]
    fn coercions() {
        assert_eq!(eval::<FLOAT>("float(3)"), 3.0);
        assert_eq!(eval::<FLOAT>("float(\" 2.5 \")"), 2.5);
        assert_eq!(eval::<INT>("int(7.9)"), 7);
        assert_eq!(eval::<INT>("int(-7.9)"), -7);
        assert_eq!(eval::<INT>("int(\"42\")"), 42);
        assert_eq!(eval::<String>("str(12)"), "12");
        assert!(eval_err("float(\"abc\")").contains("cannot convert"));
        assert!(eval_err("int(\"4.5\")").contains("cannot convert"));
    }
}
