use crate::special_forms::SpecialForm;
use crate::tokens::{tokenize, Token, TokenizerError};
use crate::types::{LispInt, LispObject};
use std::fmt;
use std::iter::Peekable;
use std::slice;

type Reader<'a> = Peekable<slice::Iter<'a, Token<'a>>>;

#[derive(Debug, PartialEq, Eq)]
pub enum ReadError {
    Tokenizer(TokenizerError),
    Empty,
    UnclosedList,
    UnexpectedCloseBracket,
    MissingQuotedForm,
    TrailingTokens,
    BadInteger(String),
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadError::Tokenizer(e) => write!(f, "{}", e),
            ReadError::Empty => write!(f, "no expression to read"),
            ReadError::UnclosedList => write!(f, "incomplete expression: unclosed list"),
            ReadError::UnexpectedCloseBracket => write!(f, "unexpected ')'"),
            ReadError::MissingQuotedForm => write!(f, "nothing follows the quote"),
            ReadError::TrailingTokens => write!(f, "expected end of input after expression"),
            ReadError::BadInteger(chars) => write!(f, "cannot read '{}' as an integer", chars),
        }
    }
}

impl From<TokenizerError> for ReadError {
    fn from(e: TokenizerError) -> Self {
        ReadError::Tokenizer(e)
    }
}

pub type Result<T = LispObject> = std::result::Result<T, ReadError>;

/// Reads exactly one expression.
pub fn read_str(input: &str) -> Result {
    let tokens = tokenize(input)?;
    let mut reader = tokens.iter().peekable();
    let form = read_form(&mut reader)?;
    match reader.peek() {
        None => Ok(form),
        Some(_) => Err(ReadError::TrailingTokens),
    }
}

/// Reads every expression in the input, in order.
pub fn read_all(input: &str) -> Result<Vec<LispObject>> {
    let tokens = tokenize(input)?;
    let mut reader = tokens.iter().peekable();
    let mut forms = Vec::new();
    while reader.peek().is_some() {
        forms.push(read_form(&mut reader)?);
    }
    Ok(forms)
}

fn read_form(reader: &mut Reader) -> Result {
    match reader.next() {
        Some(Token::OpenBracket) => read_list(reader),
        Some(Token::CloseBracket) => Err(ReadError::UnexpectedCloseBracket),
        Some(Token::Quote) => {
            let quoted = match read_form(reader) {
                Err(ReadError::Empty) => Err(ReadError::MissingQuotedForm),
                other => other,
            }?;
            Ok(LispObject::wrap_list(vec![
                LispObject::new_symbol(SpecialForm::Quote.name()),
                quoted,
            ]))
        }
        Some(Token::PlainChars(chars)) => read_atom(chars),
        Some(Token::Comment(_)) => read_form(reader),
        None => Err(ReadError::Empty),
    }
}

fn read_list(reader: &mut Reader) -> Result {
    let mut elements = Vec::new();
    loop {
        match reader.peek() {
            Some(Token::CloseBracket) => {
                reader.next();
                break;
            }
            Some(_) => elements.push(read_form(reader).map_err(|e| match e {
                ReadError::Empty => ReadError::UnclosedList,
                e => e,
            })?),
            None => return Err(ReadError::UnclosedList),
        }
    }
    Ok(LispObject::wrap_list(elements))
}

fn read_atom(chars: &str) -> Result {
    match chars {
        "#t" => return Ok(LispObject::Bool(true)),
        "#f" => return Ok(LispObject::Bool(false)),
        _ => (),
    }
    if let Ok(value) = chars.parse::<LispInt>() {
        return Ok(LispObject::Integer(value));
    }
    match chars.chars().next() {
        Some(c) if c.is_ascii_digit() => Err(ReadError::BadInteger(String::from(chars))),
        _ => Ok(LispObject::new_symbol(chars)),
    }
}
