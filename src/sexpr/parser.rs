//! Single-pass s-expression parser.
//!
//! The parser runs on an explicit open-list stack, so document nesting
//! never translates into call-stack depth. `MAX_NESTING_DEPTH` bounds the
//! stack to keep downstream consumers (serialization, teardown) safe from
//! pathological inputs.

use std::fs;
use std::iter::Peekable;
use std::path::Path;
use std::str::Chars;

use tracing::debug;

use crate::sexpr::ast::Sexpr;
use crate::sexpr::error::{ParseError, ParseResult};

/// Hard cap on list nesting accepted from source text.
pub const MAX_NESTING_DEPTH: usize = 1024;

/// Parse exactly one top-level expression.
///
/// Whitespace and `;` line comments are trivia. Any non-trivia content
/// after the first complete expression is rejected.
pub fn parse_str(input: &str) -> ParseResult<Sexpr> {
    let mut scanner = Scanner::new(input);
    // Frames of lists whose ')' has not arrived yet.
    let mut open: Vec<Vec<Sexpr>> = Vec::new();
    let mut finished: Option<Sexpr> = None;

    loop {
        scanner.skip_trivia();
        let Some(ch) = scanner.peek() else { break };
        if finished.is_some() && ch != ')' {
            return Err(ParseError::TrailingContent {
                line: scanner.line,
                column: scanner.column,
            });
        }
        match ch {
            '(' => {
                if open.len() >= MAX_NESTING_DEPTH {
                    return Err(ParseError::NestingTooDeep {
                        line: scanner.line,
                        limit: MAX_NESTING_DEPTH,
                    });
                }
                scanner.bump();
                open.push(Vec::new());
            }
            ')' => {
                let (line, column) = (scanner.line, scanner.column);
                scanner.bump();
                let Some(children) = open.pop() else {
                    return Err(ParseError::UnbalancedClose { line, column });
                };
                place(Sexpr::List(children), &mut open, &mut finished);
            }
            '"' => {
                let value = scanner.read_string()?;
                place(Sexpr::String(value), &mut open, &mut finished);
            }
            _ => {
                let token = scanner.read_atom();
                place(classify_atom(token), &mut open, &mut finished);
            }
        }
    }

    if !open.is_empty() {
        return Err(ParseError::UnexpectedEof { open: open.len() });
    }
    finished.ok_or(ParseError::Empty)
}

/// Read a file and parse its single top-level expression.
pub fn parse_file(path: &Path) -> ParseResult<Sexpr> {
    debug!("parsing {}", path.display());
    let input = fs::read_to_string(path).map_err(|source| ParseError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_str(&input)
}

fn place(expr: Sexpr, open: &mut [Vec<Sexpr>], finished: &mut Option<Sexpr>) {
    match open.last_mut() {
        Some(parent) => parent.push(expr),
        None => *finished = Some(expr),
    }
}

fn classify_atom(token: String) -> Sexpr {
    if let Ok(value) = token.parse::<i64>() {
        return Sexpr::Integer(value);
    }
    if looks_numeric(&token) {
        if let Ok(value) = token.parse::<f64>() {
            return Sexpr::Double(value);
        }
    }
    Sexpr::Symbol(token)
}

/// Numeric shape test: keeps words like `inf` and `nan` as symbols even
/// though the float parser would accept them.
fn looks_numeric(token: &str) -> bool {
    match token.chars().next() {
        Some(ch) if ch.is_ascii_digit() => true,
        Some('+' | '-' | '.') => token.chars().any(|ch| ch.is_ascii_digit()),
        _ => false,
    }
}

struct Scanner<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.chars.next();
        match ch {
            Some('\n') => {
                self.line += 1;
                self.column = 1;
            }
            Some(_) => self.column += 1,
            None => {}
        }
        ch
    }

    fn skip_trivia(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.bump();
            } else if ch == ';' {
                while let Some(ch) = self.bump() {
                    if ch == '\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    fn read_atom(&mut self) -> String {
        let mut token = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() || matches!(ch, '(' | ')' | '"' | ';') {
                break;
            }
            token.push(ch);
            self.bump();
        }
        token
    }

    fn read_string(&mut self) -> ParseResult<String> {
        let start_line = self.line;
        self.bump();
        let mut value = String::new();
        loop {
            match self.bump() {
                None => return Err(ParseError::UnterminatedString { line: start_line }),
                Some('"') => return Ok(value),
                Some('\\') => match self.bump() {
                    None => return Err(ParseError::UnterminatedString { line: start_line }),
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some('r') => value.push('\r'),
                    Some('"') => value.push('"'),
                    Some('\\') => value.push('\\'),
                    // Unknown escapes are kept literally; serialization
                    // re-escapes them in canonical form.
                    Some(other) => {
                        value.push('\\');
                        value.push(other);
                    }
                },
                Some(other) => value.push(other),
            }
        }
    }
}
