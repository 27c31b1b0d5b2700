use crate::environment::Environment;
use crate::{evaluator, printer, reader, LispObject};
use std::fmt;
use std::fs::read_to_string;
use std::path::Path;
use std::rc::Rc;

pub type Result<T = LispObject> = std::result::Result<T, Error>;
#[derive(Debug)]
pub enum Error {
    Read(reader::ReadError),
    Eval(evaluator::Error),
    IOError(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Read(e) => write!(f, "read error: {}", e),
            Error::Eval(e) => write!(f, "{}", e),
            Error::IOError(e) => write!(f, "io error: {}", e),
        }
    }
}

impl From<reader::ReadError> for Error {
    fn from(e: reader::ReadError) -> Self {
        Error::Read(e)
    }
}

impl From<evaluator::Error> for Error {
    fn from(e: evaluator::Error) -> Self {
        Error::Eval(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::IOError(e)
    }
}

pub fn read(line: &str) -> Result {
    Ok(reader::read_str(line)?)
}

pub fn eval(obj: &LispObject, env: &Rc<Environment>) -> Result {
    Ok(evaluator::evaluate(obj, env)?)
}

/// Evaluates every form in `source` in order and returns the last value, or
/// `None` if there were no forms. Stops at the first error.
pub fn eval_all(source: &str, env: &Rc<Environment>) -> Result<Option<LispObject>> {
    let mut last = None;
    for form in reader::read_all(source)? {
        last = Some(eval(&form, env)?);
    }
    Ok(last)
}

/// Read, evaluate and print: the printed value of the last form in `source`.
pub fn rep(source: &str, env: &Rc<Environment>) -> Result<String> {
    let value = eval_all(source, env)?;
    Ok(value.as_ref().map(printer::unparse).unwrap_or_default())
}

pub fn load_file<P: AsRef<Path>>(path: P, env: &Rc<Environment>) -> Result<Option<LispObject>> {
    let source = read_to_string(path)?;
    log::info!("loaded {} bytes of source", source.len());
    eval_all(&source, env)
}
