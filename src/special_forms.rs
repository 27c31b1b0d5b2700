use crate::types::{truthy, Arity, Closure, LispObject, LispSymbol};

use crate::environment::Environment;
use crate::evaluator::{evaluate, Error, Result};
use std::rc::Rc;
use std::str::FromStr;

/// Operators whose arguments are not evaluated before the form sees them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialForm {
    Quote,
    If,
    Define,
    Lambda,
}

#[derive(Debug, PartialEq, Eq)]
pub struct NotASpecialForm;

impl FromStr for SpecialForm {
    type Err = NotASpecialForm;

    fn from_str(name: &str) -> std::result::Result<Self, Self::Err> {
        match name {
            "quote" => Ok(SpecialForm::Quote),
            "if" => Ok(SpecialForm::If),
            "define" => Ok(SpecialForm::Define),
            "lambda" => Ok(SpecialForm::Lambda),
            _ => Err(NotASpecialForm),
        }
    }
}

impl SpecialForm {
    pub fn name(&self) -> &'static str {
        match self {
            SpecialForm::Quote => "quote",
            SpecialForm::If => "if",
            SpecialForm::Define => "define",
            SpecialForm::Lambda => "lambda",
        }
    }

    fn arity(&self) -> Arity {
        match self {
            SpecialForm::Quote => Arity::exactly(1),
            SpecialForm::If => Arity::exactly(3),
            SpecialForm::Define => Arity::exactly(2),
            SpecialForm::Lambda => Arity::exactly(2),
        }
    }

    pub fn apply(&self, args: &[LispObject], env: &Rc<Environment>) -> Result {
        self.arity().validate_for(args.len(), self.name())?;
        match self {
            SpecialForm::Quote => Ok(args[0].clone()),
            SpecialForm::If => apply_if(&args[0], &args[1], &args[2], env),
            SpecialForm::Define => apply_define(&args[0], &args[1], env),
            SpecialForm::Lambda => apply_lambda(&args[0], &args[1], env),
        }
    }
}

fn apply_if(
    condition: &LispObject,
    consequent: &LispObject,
    alternative: &LispObject,
    env: &Rc<Environment>,
) -> Result {
    let condition = evaluate(condition, env)?;
    if truthy(&condition) {
        evaluate(consequent, env)
    } else {
        evaluate(alternative, env)
    }
}

fn apply_define(key: &LispObject, value: &LispObject, env: &Rc<Environment>) -> Result {
    let key = match key {
        LispObject::Symbol(s) => Ok(s),
        _ => Err(Error::NotASymbol),
    }?;
    let value = evaluate(value, env)?;
    log::debug!("define {} as {}", key, value);
    env.set(key.clone(), value)?;
    Ok(LispObject::Symbol(key.clone()))
}

fn apply_lambda(parameters: &LispObject, body: &LispObject, env: &Rc<Environment>) -> Result {
    let parameters = parameters.as_list().or(Err(Error::InvalidParams))?;
    let extract_symbol = |obj: &LispObject| match obj {
        LispObject::Symbol(s) => Ok(s.clone()),
        _ => Err(Error::InvalidParams),
    };
    let parameters: Vec<LispSymbol> = parameters
        .iter()
        .map(extract_symbol)
        .collect::<Result<_>>()?;

    let closure = Closure {
        parameters,
        body: body.clone(),
        env: env.clone(),
    };
    Ok(LispObject::Closure(Rc::new(closure)))
}
