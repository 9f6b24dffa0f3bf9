//! Recursive-descent pattern compiler.
//!
//! Single pass over a cursor position, no backtracking: every choice
//! point is decided by the next literal character. Offsets in errors
//! are 0-based character positions (the grammar is ASCII).

use super::error::PatternSyntaxError;
use super::node::Node;
use std::sync::Arc;

/// Compile pattern source into an evaluator tree.
///
/// The whole string must be consumed; a stray `)` or `]` after a
/// complete pattern is reported rather than ignored.
pub fn parse(source: &str) -> Result<Node, PatternSyntaxError> {
    let mut parser = Parser::new(source);
    let root = parser.list()?;
    if parser.pos < source.len() {
        return Err(PatternSyntaxError::Expected {
            expected: "end of pattern",
            offset: parser.pos,
        });
    }
    Ok(root)
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    /// Consume `byte` if it is next.
    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, byte: u8, expected: &'static str) -> Result<(), PatternSyntaxError> {
        if self.eat(byte) {
            Ok(())
        } else {
            Err(PatternSyntaxError::Expected {
                expected,
                offset: self.pos,
            })
        }
    }

    /// Consume a run of ASCII digits, if any.
    fn digits(&mut self) -> Result<Option<usize>, PatternSyntaxError> {
        let start = self.pos;
        while matches!(self.peek(), Some(b) if b.is_ascii_digit()) {
            self.pos += 1;
        }
        if self.pos == start {
            return Ok(None);
        }
        self.src[start..self.pos]
            .parse::<usize>()
            .map(Some)
            .map_err(|_| PatternSyntaxError::InvalidRange { offset: start })
    }

    // list = or { ',' or }
    fn list(&mut self) -> Result<Node, PatternSyntaxError> {
        let first = self.alternative()?;
        if !self.eat(b',') {
            return Ok(first);
        }

        let mut children = vec![first];
        loop {
            children.push(self.alternative()?);
            if !self.eat(b',') {
                break;
            }
        }
        Ok(Node::Sequence(children))
    }

    // or = repeated { '|' repeated }
    fn alternative(&mut self) -> Result<Node, PatternSyntaxError> {
        let first = self.repeated()?;
        if !self.eat(b'|') {
            return Ok(first);
        }

        let mut children = vec![first];
        loop {
            children.push(self.repeated()?);
            if !self.eat(b'|') {
                break;
            }
        }
        Ok(Node::Alternative(children))
    }

    // repeated = term [ '[' range? ']' ]
    fn repeated(&mut self) -> Result<Node, PatternSyntaxError> {
        let node = self.term()?;
        if !self.eat(b'[') {
            return Ok(node);
        }

        let (min, max) = self.range()?;
        self.expect(b']', "]")?;
        Ok(Node::Repetition {
            node: Box::new(node),
            min,
            max,
        })
    }

    /// Bracket contents. Resolution, given leading digits `A`, a
    /// literal `..` and trailing digits `B`, all optional:
    ///
    /// | content | min | max |
    /// |---------|-----|-----|
    /// | (empty) | 1   | ∞   |
    /// | `A`     | A   | A   |
    /// | `A..`   | A   | ∞   |
    /// | `..B`   | 1   | B   |
    /// | `A..B`  | A   | B   |
    /// | `..`    | compile error |
    fn range(&mut self) -> Result<(usize, Option<usize>), PatternSyntaxError> {
        let lo = self.digits()?;
        let dots = self.dots();
        let hi = if dots { self.digits()? } else { None };

        match (lo, dots, hi) {
            (None, false, _) => Ok((1, None)),
            (Some(exact), false, _) => Ok((exact, Some(exact))),
            (Some(min), true, None) => Ok((min, None)),
            (None, true, Some(max)) => Ok((1, Some(max))),
            (Some(min), true, Some(max)) => Ok((min, Some(max))),
            (None, true, None) => Err(PatternSyntaxError::InvalidRange { offset: self.pos }),
        }
    }

    /// Consume a literal `..` if present. A single `.` is left in place
    /// for the closing-bracket check to report.
    fn dots(&mut self) -> bool {
        let bytes = self.src.as_bytes();
        if bytes.get(self.pos) == Some(&b'.') && bytes.get(self.pos + 1) == Some(&b'.') {
            self.pos += 2;
            true
        } else {
            false
        }
    }

    // term = '(' list ')' | leaf
    fn term(&mut self) -> Result<Node, PatternSyntaxError> {
        if self.eat(b'(') {
            let node = self.list()?;
            self.expect(b')', ")")?;
            return Ok(node);
        }
        self.leaf()
    }

    // leaf = ['~'] identifier ; identifier = [A-Za-z_][A-Za-z0-9_]*
    fn leaf(&mut self) -> Result<Node, PatternSyntaxError> {
        let structural = self.eat(b'~');

        let start = self.pos;
        match self.peek() {
            Some(b) if b.is_ascii_alphabetic() || b == b'_' => self.pos += 1,
            _ => return Err(PatternSyntaxError::ExpectedTypeName { offset: self.pos }),
        }
        while matches!(self.peek(), Some(b) if b.is_ascii_alphanumeric() || b == b'_') {
            self.pos += 1;
        }

        Ok(Node::Leaf {
            name: Arc::from(&self.src[start..self.pos]),
            structural,
        })
    }
}
