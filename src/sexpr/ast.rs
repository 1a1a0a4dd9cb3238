//! Expression graph produced by the parser and consumed by the outline layer.

use std::fmt;

/// A parsed s-expression.
///
/// The outline layer only ever touches the variant tests, `children`,
/// `symbol` and the canonical `Display` form; it never re-inspects the
/// source text.
#[derive(Debug, Clone, PartialEq)]
pub enum Sexpr {
    /// Ordered children, including non-list atoms.
    List(Vec<Sexpr>),
    /// Bare token.
    Symbol(String),
    /// Integral numeric atom.
    Integer(i64),
    /// Non-integral numeric atom.
    Double(f64),
    /// Double-quoted atom.
    String(String),
}

impl Sexpr {
    pub fn is_list(&self) -> bool {
        matches!(self, Sexpr::List(_))
    }

    pub fn is_symbol(&self) -> bool {
        matches!(self, Sexpr::Symbol(_))
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Sexpr::Integer(_))
    }

    /// Direct children of a list, None for atoms.
    pub fn children(&self) -> Option<&[Sexpr]> {
        match self {
            Sexpr::List(children) => Some(children),
            _ => None,
        }
    }

    /// Symbol name, None for everything else.
    pub fn symbol(&self) -> Option<&str> {
        match self {
            Sexpr::Symbol(name) => Some(name),
            _ => None,
        }
    }

    /// Variant name for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Sexpr::List(_) => "list",
            Sexpr::Symbol(_) => "symbol",
            Sexpr::Integer(_) => "integer",
            Sexpr::Double(_) => "double",
            Sexpr::String(_) => "string",
        }
    }
}

/// Canonical text form: children joined by single spaces inside parens,
/// symbols verbatim, integers in decimal, strings quoted and escaped.
/// Parsing the output yields the original expression back.
impl fmt::Display for Sexpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        enum Step<'a> {
            Node(&'a Sexpr),
            Text(&'static str),
        }

        // Explicit work stack: formatting must not recurse on input nesting.
        let mut stack = vec![Step::Node(self)];
        while let Some(step) = stack.pop() {
            match step {
                Step::Text(text) => f.write_str(text)?,
                Step::Node(Sexpr::List(children)) => {
                    f.write_str("(")?;
                    stack.push(Step::Text(")"));
                    for (pos, child) in children.iter().enumerate().rev() {
                        stack.push(Step::Node(child));
                        if pos > 0 {
                            stack.push(Step::Text(" "));
                        }
                    }
                }
                Step::Node(Sexpr::Symbol(name)) => f.write_str(name)?,
                Step::Node(Sexpr::Integer(value)) => write!(f, "{value}")?,
                Step::Node(Sexpr::Double(value)) => write_double(f, *value)?,
                Step::Node(Sexpr::String(value)) => write_quoted(f, value)?,
            }
        }
        Ok(())
    }
}

/// Doubles keep their shortest form but never collapse into integer
/// syntax: `2.0` stays `2.0` so reparsing preserves the variant.
fn write_double(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    let text = value.to_string();
    if text.contains('.') || text.contains("inf") || text.contains("NaN") {
        f.write_str(&text)
    } else {
        write!(f, "{text}.0")
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    f.write_str("\"")?;
    for ch in value.chars() {
        match ch {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\r' => f.write_str("\\r")?,
            other => write!(f, "{other}")?,
        }
    }
    f.write_str("\"")
}
