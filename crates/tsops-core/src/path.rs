//! Path grammar for addressing nested records.
//!
//! ```text
//! path       := segment ("." segment)*
//! segment    := identifier index*
//! identifier := one or more chars other than '.', '[' and ']'
//! index      := "[" digit+ "]"
//! ```
//!
//! `a.b[2].c` parses to `[Key("a"), Key("b"), Index(2), Key("c")]`.
//! `Display` renders the same text back, so flattened field names and parsed
//! paths stay interchangeable.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Step {
    /// Object-key step.
    Key(String),
    /// Array-index step.
    Index(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("empty path")]
    Empty,

    #[error("empty identifier at offset {0}")]
    EmptyIdentifier(usize),

    #[error("unterminated index starting at offset {0}")]
    UnterminatedIndex(usize),

    #[error("invalid index {found:?} at offset {offset}")]
    InvalidIndex { offset: usize, found: String },

    #[error("unexpected '{ch}' at offset {offset}")]
    Unexpected { ch: char, offset: usize },
}

/// A parsed path: an ordered list of steps.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path {
    steps: Vec<Step>,
}

impl Path {
    pub fn parse(src: &str) -> Result<Self, PathError> {
        Parser::new(src).parse_path()
    }

    /// Single-key path; used by flatten for top-level fields.
    pub fn key(k: impl Into<String>) -> Self {
        Self {
            steps: vec![Step::Key(k.into())],
        }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn push_key(&mut self, k: impl Into<String>) {
        self.steps.push(Step::Key(k.into()));
    }

    pub fn push_index(&mut self, i: usize) {
        self.steps.push(Step::Index(i));
    }

    pub fn pop(&mut self) -> Option<Step> {
        self.steps.pop()
    }
}

impl FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Path::parse(s)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            match step {
                Step::Key(k) if i == 0 => f.write_str(k)?,
                Step::Key(k) => write!(f, ".{k}")?,
                Step::Index(idx) => write!(f, "[{idx}]")?,
            }
        }
        Ok(())
    }
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn parse_path(mut self) -> Result<Path, PathError> {
        if self.src.is_empty() {
            return Err(PathError::Empty);
        }
        let mut steps = Vec::new();
        loop {
            self.parse_segment(&mut steps)?;
            match self.bump() {
                None => break,
                Some('.') => continue,
                Some(ch) => {
                    return Err(PathError::Unexpected {
                        ch,
                        offset: self.pos - ch.len_utf8(),
                    })
                }
            }
        }
        Ok(Path { steps })
    }

    fn parse_segment(&mut self, steps: &mut Vec<Step>) -> Result<(), PathError> {
        let ident = self.parse_identifier()?;
        steps.push(Step::Key(ident));
        while self.peek() == Some('[') {
            let idx = self.parse_index()?;
            steps.push(Step::Index(idx));
        }
        Ok(())
    }

    fn parse_identifier(&mut self) -> Result<String, PathError> {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if matches!(ch, '.' | '[' | ']') {
                break;
            }
            self.bump();
        }
        if self.pos == start {
            return Err(PathError::EmptyIdentifier(start));
        }
        Ok(self.src[start..self.pos].to_string())
    }

    fn parse_index(&mut self) -> Result<usize, PathError> {
        let open = self.pos;
        self.bump(); // '['
        let start = self.pos;
        let close = self.src[start..]
            .find(']')
            .map(|rel| start + rel)
            .ok_or(PathError::UnterminatedIndex(open))?;
        let digits = &self.src[start..close];
        let invalid = || PathError::InvalidIndex {
            offset: start,
            found: digits.to_string(),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let idx = digits.parse::<usize>().map_err(|_| invalid())?;
        self.pos = close + 1;
        Ok(idx)
    }
}
