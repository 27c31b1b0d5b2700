use regex::Regex;
use std::fmt;

#[derive(Debug, PartialEq, Eq)]
pub enum Token<'a> {
    OpenBracket,
    CloseBracket,
    Quote,
    Comment(&'a str),
    PlainChars(&'a str),
}

#[derive(Debug, PartialEq, Eq)]
pub enum TokenizerError {
    NoFirstCharacter,
    NoCapture(String),
}

impl fmt::Display for TokenizerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tokenizer failed: {}",
            match self {
                TokenizerError::NoFirstCharacter => "no characters to parse token from",
                TokenizerError::NoCapture(_) => "token regex did not capture a token",
            }
        )
    }
}

fn create_token(captured: &str) -> Result<Token, TokenizerError> {
    let bytes = captured.as_bytes();
    let first_char = bytes.first().ok_or(TokenizerError::NoFirstCharacter)?;
    match first_char {
        b'(' => Ok(Token::OpenBracket),
        b')' => Ok(Token::CloseBracket),
        b'\'' => Ok(Token::Quote),
        // Note that ; is ASCII so safe to slice on bytes even if the rest of the string is
        // non ASCII.
        b';' => Ok(Token::Comment(&captured[1..])),
        _ => Ok(Token::PlainChars(captured)),
    }
}

/// Splits source text into tokens. Comments are dropped.
pub fn tokenize(input: &str) -> Result<Vec<Token>, TokenizerError> {
    lazy_static! {
        static ref TOKEN_RE: Regex = Regex::new(
            r#"(?x)                 # ignore whitespace in this pattern & allow comments
                ^(                  # token capture group, anchored at the start of the input
                    [()']           # brackets and the quote shorthand
                    |;[^\n]*        # comments run to the end of the line
                    |[^\s()';]+     # one or more plain characters
                )
            "#
        )
        .unwrap();
    }
    let mut input = input.trim_start();
    let mut tokens = Vec::new();
    while !input.is_empty() {
        let captured = TOKEN_RE
            .captures(input)
            .and_then(|caps| caps.get(1))
            .ok_or_else(|| TokenizerError::NoCapture(String::from(input)))?;
        match create_token(captured.as_str())? {
            Token::Comment(text) => log::trace!("skipping comment ;{}", text),
            token => tokens.push(token),
        }
        input = input[captured.end()..].trim_start();
    }
    Ok(tokens)
}
