use crate::evaluator;
use crate::types::{Arity, LispInt, LispObject};
use std::collections::HashMap;
use std::fmt;

/// A primitive function. The evaluator checks `arity` and evaluates the
/// arguments in order before `fn_ptr` sees them.
pub struct PrimitiveFn {
    pub name: &'static str,
    pub arity: Arity,
    pub fn_ptr: fn(&[LispObject]) -> evaluator::Result,
}

impl fmt::Debug for PrimitiveFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "primitive function #<{}>", self.name)
    }
}

fn grab_ints(args: &[LispObject]) -> evaluator::Result<(LispInt, LispInt)> {
    Ok((args[0].as_int()?, args[1].as_int()?))
}

fn arithmetic_(
    args: &[LispObject],
    op: fn(LispInt, LispInt) -> Option<LispInt>,
) -> evaluator::Result {
    let (x, y) = grab_ints(args)?;
    op(x, y)
        .map(LispObject::Integer)
        .ok_or(evaluator::Error::IntegerOverflow)
}

const SUM: PrimitiveFn = PrimitiveFn {
    name: "+",
    fn_ptr: |args| arithmetic_(args, LispInt::checked_add),
    arity: Arity::exactly(2),
};

const SUB: PrimitiveFn = PrimitiveFn {
    name: "-",
    fn_ptr: |args| arithmetic_(args, LispInt::checked_sub),
    arity: Arity::exactly(2),
};

const MUL: PrimitiveFn = PrimitiveFn {
    name: "*",
    fn_ptr: |args| arithmetic_(args, LispInt::checked_mul),
    arity: Arity::exactly(2),
};

const DIV: PrimitiveFn = PrimitiveFn {
    name: "/",
    fn_ptr: div_,
    arity: Arity::exactly(2),
};

/// Quotient rounded towards negative infinity.
fn div_(args: &[LispObject]) -> evaluator::Result {
    match grab_ints(args)? {
        (_, 0) => Err(evaluator::Error::DivideByZero),
        (x, y) => {
            let quotient = x.checked_div(y).ok_or(evaluator::Error::IntegerOverflow)?;
            let adjust = x % y != 0 && ((x < 0) != (y < 0));
            Ok(LispObject::Integer(if adjust { quotient - 1 } else { quotient }))
        }
    }
}

const MOD: PrimitiveFn = PrimitiveFn {
    name: "mod",
    fn_ptr: mod_,
    arity: Arity::exactly(2),
};

/// Remainder with the sign of the divisor, matching `div_`.
fn mod_(args: &[LispObject]) -> evaluator::Result {
    match grab_ints(args)? {
        (_, 0) => Err(evaluator::Error::DivideByZero),
        (x, y) => {
            // i64::MIN % -1 overflows, but the answer is 0.
            let remainder = x.checked_rem(y).unwrap_or(0);
            let adjust = remainder != 0 && ((remainder < 0) != (y < 0));
            Ok(LispObject::Integer(if adjust {
                remainder + y
            } else {
                remainder
            }))
        }
    }
}

fn comparison_(args: &[LispObject], comp: fn(&LispInt, &LispInt) -> bool) -> evaluator::Result {
    let (x, y) = grab_ints(args)?;
    Ok(LispObject::Bool(comp(&x, &y)))
}

macro_rules! comparison_primitive {
    ($SYMBOL:tt, $NAME:ident) => {
        paste::item! {
            const $NAME: PrimitiveFn = PrimitiveFn {
                name: stringify!($SYMBOL),
                fn_ptr: |args: &[LispObject]| comparison_(args, LispInt:: [<$NAME:lower>]),
                arity: Arity::exactly(2),
            };
        }
    };
}

comparison_primitive!(<, LT);
comparison_primitive!(>, GT);

const ATOM_TEST: PrimitiveFn = PrimitiveFn {
    name: "atom",
    fn_ptr: atom_test_,
    arity: Arity::exactly(1),
};

fn atom_test_(args: &[LispObject]) -> evaluator::Result {
    Ok(LispObject::Bool(args[0].is_atom()))
}

const EQ: PrimitiveFn = PrimitiveFn {
    name: "eq",
    fn_ptr: eq_,
    arity: Arity::exactly(2),
};

/// Lists are never `eq`, not even to an identical list.
fn eq_(args: &[LispObject]) -> evaluator::Result {
    let (x, y) = (&args[0], &args[1]);
    Ok(LispObject::Bool(x.is_atom() && y.is_atom() && x == y))
}

const CONS: PrimitiveFn = PrimitiveFn {
    name: "cons",
    fn_ptr: cons_,
    arity: Arity::exactly(2),
};

fn cons_(args: &[LispObject]) -> evaluator::Result {
    let head = &args[0];
    let tail = args[1].as_list()?;

    let mut elements = Vec::with_capacity(tail.len() + 1);
    elements.push(head.clone());
    elements.extend(tail.iter().cloned());
    Ok(LispObject::wrap_list(elements))
}

const HEAD: PrimitiveFn = PrimitiveFn {
    name: "head",
    fn_ptr: head_,
    arity: Arity::exactly(1),
};

fn head_(args: &[LispObject]) -> evaluator::Result {
    args[0]
        .as_list()?
        .first()
        .cloned()
        .ok_or(evaluator::Error::EmptyList)
}

const TAIL: PrimitiveFn = PrimitiveFn {
    name: "tail",
    fn_ptr: tail_,
    arity: Arity::exactly(1),
};

fn tail_(args: &[LispObject]) -> evaluator::Result {
    let seq = args[0].as_list()?;
    let rest = seq.get(1..).unwrap_or(&[]);
    Ok(LispObject::wrap_list(rest.to_vec()))
}

const EMPTY_TEST: PrimitiveFn = PrimitiveFn {
    name: "empty",
    fn_ptr: empty_test_,
    arity: Arity::exactly(1),
};

fn empty_test_(args: &[LispObject]) -> evaluator::Result {
    Ok(LispObject::Bool(args[0].is_empty_list()))
}

const PRIMITIVES: &[PrimitiveFn] = &[
    // Arithmetic
    SUM,
    SUB,
    MUL,
    DIV,
    MOD,
    // Comparisons
    GT,
    LT,
    // Testing
    ATOM_TEST,
    EQ,
    EMPTY_TEST,
    // Working with lists
    CONS,
    HEAD,
    TAIL,
];

type Namespace = HashMap<&'static str, &'static PrimitiveFn>;
lazy_static! {
    pub static ref CORE: Namespace = PRIMITIVES.iter().map(|func| (func.name, func)).collect();
}
