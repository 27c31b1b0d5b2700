use crate::core::{PrimitiveFn, CORE};
use crate::environment::{AlreadyDefined, Environment, UndefinedSymbol};
use crate::special_forms::SpecialForm;
use crate::types::{BadArgCount, Closure, LispObject, LispSymbol, TypeMismatch};
use itertools::Itertools;
use std::fmt;
use std::rc::Rc;

pub type Result<T = LispObject> = std::result::Result<T, Error>;
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    UndefinedSymbol(UndefinedSymbol),
    AlreadyDefined(AlreadyDefined),
    NotASymbol,
    InvalidParams,
    ArityMismatch(BadArgCount),
    TypeMismatch(TypeMismatch),
    EmptyList,
    NotCallable,
    DivideByZero,
    IntegerOverflow,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UndefinedSymbol(UndefinedSymbol(s)) => write!(f, "'{}' not found", s),
            Error::AlreadyDefined(AlreadyDefined(s)) => write!(f, "'{}' is already defined", s),
            Error::NotASymbol => write!(f, "define: name is not a symbol"),
            Error::InvalidParams => write!(f, "lambda: parameters must be a list of symbols"),
            Error::ArityMismatch(e) => write!(f, "{}", e),
            Error::TypeMismatch(e) => write!(f, "type mismatch: {}", e),
            Error::EmptyList => write!(f, "cannot take the head of an empty list"),
            Error::NotCallable => write!(f, "call position does not hold a function"),
            Error::DivideByZero => write!(f, "cannot divide by zero!"),
            Error::IntegerOverflow => write!(f, "integer overflow"),
        }
    }
}

impl From<TypeMismatch> for Error {
    fn from(t: TypeMismatch) -> Self {
        Self::TypeMismatch(t)
    }
}

impl From<UndefinedSymbol> for Error {
    fn from(e: UndefinedSymbol) -> Self {
        Self::UndefinedSymbol(e)
    }
}

impl From<AlreadyDefined> for Error {
    fn from(e: AlreadyDefined) -> Self {
        Self::AlreadyDefined(e)
    }
}

impl From<BadArgCount> for Error {
    fn from(e: BadArgCount) -> Self {
        Self::ArityMismatch(e)
    }
}

/// An entry of the operation table. Both kinds are handed the unevaluated
/// arguments of the call.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    Special(SpecialForm),
    Primitive(&'static PrimitiveFn),
}

impl Operation {
    pub fn lookup(name: &LispSymbol) -> Option<Self> {
        name.parse::<SpecialForm>()
            .ok()
            .map(Operation::Special)
            .or_else(|| CORE.get(name.as_str()).copied().map(Operation::Primitive))
    }

    pub fn invoke(&self, args: &[LispObject], env: &Rc<Environment>) -> Result {
        match self {
            Operation::Special(form) => form.apply(args, env),
            Operation::Primitive(func) => call_primitive(func, args, env),
        }
    }
}

pub fn evaluate(ast: &LispObject, env: &Rc<Environment>) -> Result {
    use LispObject::*;
    log::trace!("evaluate {}", ast);
    match ast {
        Integer(_) | Bool(_) | Closure(_) => Ok(ast.clone()),
        Symbol(s) => Ok(env.lookup(s)?),
        List(argv) => match argv.split_first() {
            None => Ok(ast.clone()),
            Some((head, args)) => apply(head, args, env),
        },
    }
}

fn apply(head: &LispObject, args: &[LispObject], env: &Rc<Environment>) -> Result {
    match head {
        LispObject::List(_) => {
            let operator = evaluate(head, env)?;
            log::trace!("call position evaluated to {}", operator);
            apply_operator(&operator, args, env)
        }
        _ => apply_operator(head, args, env),
    }
}

fn apply_operator(operator: &LispObject, args: &[LispObject], env: &Rc<Environment>) -> Result {
    match operator {
        LispObject::Symbol(name) => match Operation::lookup(name) {
            Some(op) => op.invoke(args, env),
            None => match env.lookup(name)? {
                LispObject::Closure(f) => apply_closure(&f, args, env),
                _ => Err(Error::NotCallable),
            },
        },
        LispObject::Closure(f) => apply_closure(f, args, env),
        _ => Err(Error::NotCallable),
    }
}

pub fn evaluate_sequence_elementwise(
    seq: &[LispObject],
    env: &Rc<Environment>,
) -> Result<Vec<LispObject>> {
    seq.iter().map(|obj| evaluate(obj, env)).collect()
}

pub(crate) fn pretty_print_args(args: &[LispObject]) -> String {
    match args.len() {
        0 => "no args".into(),
        1 => args[0].to_string(),
        _ => format!("\n\t{}", args.iter().join("\n\t")),
    }
}

/// Arguments are evaluated in the caller's environment; the body runs in a
/// copy of the environment the closure captured.
pub fn apply_closure(func: &Closure, args: &[LispObject], env: &Rc<Environment>) -> Result {
    let args = evaluate_sequence_elementwise(args, env)?;
    log::trace!("Call {:?} with {}", func, pretty_print_args(&args));
    func.arity().validate_for(args.len(), "closure")?;
    let bindings = func.parameters.iter().cloned().zip(args);
    let frame = Rc::new(func.env.extend(bindings));
    log::trace!("closure frame: {}", frame);
    evaluate(&func.body, &frame)
}

pub fn call_primitive(func: &PrimitiveFn, args: &[LispObject], env: &Rc<Environment>) -> Result {
    func.arity.validate_for(args.len(), func.name)?;
    let args = evaluate_sequence_elementwise(args, env)?;
    log::trace!("Call {} with {}", func.name, pretty_print_args(&args));
    let result = (func.fn_ptr)(&args);
    match &result {
        Ok(val) => log::trace!("Call to {} resulted in {}", func.name, val),
        Err(e) => log::trace!("Call to {} failed: {}", func.name, e),
    }
    result
}
