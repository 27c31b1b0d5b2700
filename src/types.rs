extern crate derive_more;
use crate::environment::Environment;
use crate::printer;
use derive_more::{Deref, Display};
use std::fmt;
use std::fmt::Formatter;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

#[derive(Deref, Debug)]
pub struct LispList(pub Vec<LispObject>);
pub type LispInt = i64;

#[derive(Deref, Display, Debug, PartialEq, Eq, Hash, Clone)]
pub struct LispSymbol(pub String);

impl AsRef<str> for LispSymbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LispSymbol {
    fn from(name: &str) -> Self {
        LispSymbol(name.into())
    }
}

/// Fixed argument count of an operation. The language has no variadic forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity(usize);

#[derive(Debug, PartialEq, Eq)]
pub struct BadArgCount {
    pub name: &'static str,
    pub expected: usize,
    pub got: usize,
}

impl fmt::Display for BadArgCount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "When evaluating {} expected {} arguments, but received {} arguments",
            self.name, self.expected, self.got
        )
    }
}

impl Arity {
    pub(crate) const fn exactly(n: usize) -> Self {
        Self(n)
    }

    pub(crate) fn validate_for(&self, n: usize, name: &'static str) -> Result<(), BadArgCount> {
        match self.0 == n {
            true => Ok(()),
            false => Err(BadArgCount {
                name,
                expected: self.0,
                got: n,
            }),
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "exactly {}", self.0)
    }
}

pub struct Closure {
    pub parameters: Vec<LispSymbol>,
    pub body: LispObject,
    pub env: Rc<Environment>,
}

impl Closure {
    pub fn arity(&self) -> Arity {
        Arity::exactly(self.parameters.len())
    }
}

impl fmt::Debug for Closure {
    // Not derived because we want to skip the env: the env may well contain this Closure!
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Closure{{parameters: {:?}, body: {:?}}}",
            self.parameters, self.body
        )
    }
}

#[derive(Debug, Clone)]
pub enum LispObject {
    Integer(LispInt),
    Bool(bool),
    Symbol(LispSymbol),
    List(Rc<LispList>),
    Closure(Rc<Closure>),
}

/// `#f`, `0` and the empty list are false; everything else is true.
pub(crate) fn truthy(obj: &LispObject) -> bool {
    use LispObject::*;
    match obj {
        Bool(t) => *t,
        Integer(x) => *x != 0,
        List(items) => !items.is_empty(),
        Symbol(_) | Closure(_) => true,
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum TypeMismatch {
    NotAnInt,
    NotAList,
}

impl fmt::Display for TypeMismatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TypeMismatch::NotAnInt => write!(f, "expected an integer"),
            TypeMismatch::NotAList => write!(f, "expected a list"),
        }
    }
}

impl LispObject {
    pub(crate) fn as_int(&self) -> Result<LispInt, TypeMismatch> {
        match self {
            LispObject::Integer(x) => Ok(*x),
            _ => Err(TypeMismatch::NotAnInt),
        }
    }

    pub(crate) fn as_list(&self) -> Result<&[LispObject], TypeMismatch> {
        match self {
            LispObject::List(x) => Ok(x.as_slice()),
            _ => Err(TypeMismatch::NotAList),
        }
    }

    pub fn is_atom(&self) -> bool {
        !self.is_list()
    }

    pub fn is_list(&self) -> bool {
        matches!(self, LispObject::List(_))
    }

    pub fn is_empty_list(&self) -> bool {
        match self {
            LispObject::List(items) => items.is_empty(),
            _ => false,
        }
    }

    pub fn is_closure(&self) -> bool {
        matches!(self, LispObject::Closure(_))
    }
}

impl LispObject {
    pub fn new_list() -> Self {
        Self::List(Rc::new(LispList(Vec::new())))
    }
    pub fn wrap_list(elements: Vec<LispObject>) -> Self {
        Self::List(Rc::new(LispList(elements)))
    }
    pub fn new_symbol(name: &str) -> Self {
        Self::Symbol(LispSymbol::from(name))
    }
}

impl From<LispInt> for LispObject {
    fn from(value: LispInt) -> Self {
        LispObject::Integer(value)
    }
}

impl From<bool> for LispObject {
    fn from(value: bool) -> Self {
        LispObject::Bool(value)
    }
}

impl fmt::Display for LispObject {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", printer::unparse(self))
    }
}

/// Lists compare element-wise. Every closure is equal to every other closure,
/// whatever its parameters, body or environment; a closure never equals a
/// value of another kind. `eq` in the language relies on this.
impl PartialEq for LispObject {
    fn eq(&self, other: &Self) -> bool {
        use LispObject::*;
        match [self, other] {
            [Integer(x), Integer(y)] => x == y,
            [Bool(x), Bool(y)] => x == y,
            [Symbol(x), Symbol(y)] => x == y,
            [List(xs), List(ys)] => equal_sequences(xs, ys),
            [Closure(_), Closure(_)] => true,
            [_, _] => false,
        }
    }
}

fn equal_sequences(xs: &[LispObject], ys: &[LispObject]) -> bool {
    xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| x == y)
}

impl Eq for LispObject {}

impl Hash for LispObject {
    fn hash<H: Hasher>(&self, state: &mut H) {
        use LispObject::*;
        std::mem::discriminant(self).hash(state);
        match self {
            Integer(x) => x.hash(state),
            Bool(x) => x.hash(state),
            Symbol(x) => x.hash(state),
            List(xs) => xs.0.hash(state),
            // All closures are equal, so they must all hash alike.
            Closure(_) => "closure".hash(state),
        }
    }
}
