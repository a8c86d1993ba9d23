use std::convert::TryFrom;
use std::fmt;
use std::iter::Peekable;
use std::str::{CharIndices, FromStr};

use serde::Deserialize;

use super::error::Error;
use super::utils::build_call_string;

/// A ground symbol: a cargo, plane or airport name.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(from = "String")]
pub struct Term(String);

impl Term {
    pub fn new(name: &str) -> Term {
        Term(name.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Term {
    fn from(name: &str) -> Self {
        Term::new(name)
    }
}

impl From<String> for Term {
    fn from(name: String) -> Self {
        Term(name)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A predicate applied to an ordered tuple of terms, e.g. `At(C1, SFO)`.
/// Two literals are the same atom iff predicate and arguments match exactly.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Literal {
    pub predicate: String,
    pub args: Vec<Term>,
}

/// Builds a [`Literal`] from bare identifiers: `lit!(At(C1, SFO))`.
#[macro_export]
macro_rules! lit {
    ( $p:ident ( $($t:ident),* ) ) => {
        $crate::strips::expression::Literal::new(
            stringify!($p),
            vec![$($crate::strips::expression::Term::from(stringify!($t))),*],
        )
    };
}

impl Literal {
    pub fn new(predicate: &str, args: Vec<Term>) -> Literal {
        Literal {
            predicate: predicate.to_string(),
            args,
        }
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", build_call_string(&self.predicate, &self.args))
    }
}

const EXPECTED_IDENTIFIER: &str = "Expected identifier.";
const EXPECTED_OPEN_PARENTHESIS: &str = "Expected '('.";
const EXPECTED_CLOSE_PARENTHESIS: &str = "Expected ',' or matched ')'.";

struct Cursor<'a> {
    text: &'a str,
    it: Peekable<CharIndices<'a>>,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            it: text.char_indices().peekable(),
        }
    }

    fn skip_whitespace(&mut self) {
        while self.it.next_if(|(_, c)| c.is_whitespace()).is_some() {}
    }

    // 1-based column of the next unread character
    fn col(&mut self) -> usize {
        self.it.peek().map(|(offset, _)| *offset).unwrap_or(self.text.len()) + 1
    }

    fn error(&mut self, message: &str) -> Error {
        Error::Syntax {
            col: self.col(),
            message: message.to_owned(),
        }
    }

    fn accept(&mut self, expected: char) -> bool {
        self.skip_whitespace();
        self.it.next_if(|(_, c)| *c == expected).is_some()
    }

    fn expect(&mut self, expected: char, message: &str) -> Result<(), Error> {
        if self.accept(expected) {
            Ok(())
        } else {
            Err(self.error(message))
        }
    }

    fn identifier(&mut self) -> Result<&'a str, Error> {
        self.skip_whitespace();
        let start = match self.it.peek() {
            Some((offset, c)) if c.is_alphanumeric() || *c == '_' => Some(*offset),
            _ => None,
        };
        let start = match start {
            Some(start) => start,
            None => return Err(self.error(EXPECTED_IDENTIFIER)),
        };
        let mut end = start;
        while let Some((offset, c)) = self.it.next_if(|(_, c)| c.is_alphanumeric() || *c == '_' || *c == '-') {
            end = offset + c.len_utf8();
        }
        Ok(&self.text[start..end])
    }

    fn finish(&mut self) -> Result<(), Error> {
        self.skip_whitespace();
        if self.it.peek().is_some() {
            Err(self.error("Unexpected input after literal."))
        } else {
            Ok(())
        }
    }
}

impl FromStr for Literal {
    type Err = Error;

    /// Parses `Pred(a, b)`. Whitespace between tokens is ignored.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut cursor = Cursor::new(text);
        let predicate = cursor.identifier()?;
        cursor.expect('(', EXPECTED_OPEN_PARENTHESIS)?;
        let mut args = Vec::new();
        if !cursor.accept(')') {
            loop {
                args.push(Term::from(cursor.identifier()?));
                if cursor.accept(',') {
                    continue;
                }
                cursor.expect(')', EXPECTED_CLOSE_PARENTHESIS)?;
                break;
            }
        }
        cursor.finish()?;
        Ok(Literal::new(predicate, args))
    }
}

impl TryFrom<String> for Literal {
    type Error = Error;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        text.parse()
    }
}
