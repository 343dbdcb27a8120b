// SPDX-License-Identifier: Apache-2.0

//! Rendering a [`Value`] tree back to JSON text.
//!
//! Two layouts are supported: compact (`{"a":[1,2]}`) through [`Display`],
//! and indented through [`Value::pretty`]. Like the parser, the printer keeps
//! its position in an explicit stack instead of recursing, so arbitrarily
//! deep trees print without growing the call stack.
//!
//! [`Display`]: core::fmt::Display

use core::fmt::{self, Write as _};
use std::io;

use crate::escape_processor::JsonStr;
use crate::Value;

/// Displays a fractional number so that it always reads back as one.
///
/// Integral values get a forced `.0`; non-finite values have no JSON spelling
/// and print as `null`.
pub(crate) struct Fractional<F>(pub F);

macro_rules! display_fractional {
    ($($t:ty),*) => {
        $(
            impl fmt::Display for Fractional<$t> {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    let v = self.0;
                    if !v.is_finite() {
                        f.write_str("null")
                    } else if v.trunc() == v {
                        write!(f, "{v:.1}")
                    } else {
                        write!(f, "{v}")
                    }
                }
            }
        )*
    };
}

display_fractional!(f32, f64);

/// Children of a container still to be printed.
enum Children<'a> {
    Array(core::slice::Iter<'a, Value>),
    Object(indexmap::map::Iter<'a, String, Value>),
}

impl<'a> Children<'a> {
    fn next(&mut self) -> Option<(Option<&'a str>, &'a Value)> {
        match self {
            Children::Array(items) => items.next().map(|v| (None, v)),
            Children::Object(entries) => entries.next().map(|(k, v)| (Some(k.as_str()), v)),
        }
    }

    fn closing_delimiter(&self) -> char {
        match self {
            Children::Array(_) => ']',
            Children::Object(_) => '}',
        }
    }
}

struct Printer<'w, 'i, W> {
    out: &'w mut W,
    /// `None` for compact output.
    indent: Option<&'i str>,
}

impl<W: fmt::Write> Printer<'_, '_, W> {
    fn newline(&mut self, depth: usize) -> fmt::Result {
        if let Some(unit) = self.indent {
            self.out.write_char('\n')?;
            for _ in 0..depth {
                self.out.write_str(unit)?;
            }
        }
        Ok(())
    }

    /// Writes a scalar, or the opening of a container. Returns the children
    /// of a non-empty container.
    fn open<'v>(&mut self, value: &'v Value) -> Result<Option<Children<'v>>, fmt::Error> {
        match value {
            Value::Null => self.out.write_str("null")?,
            Value::Boolean(b) => self.out.write_str(if *b { "true" } else { "false" })?,
            Value::Integer(i) => write!(self.out, "{i}")?,
            Value::Fractional(x) => write!(self.out, "{}", Fractional(*x))?,
            Value::String(s) => write!(self.out, "{}", JsonStr(s))?,
            Value::Array(items) if items.is_empty() => self.out.write_str("[]")?,
            Value::Object(entries) if entries.is_empty() => self.out.write_str("{}")?,
            Value::Array(items) => {
                self.out.write_char('[')?;
                return Ok(Some(Children::Array(items.iter())));
            }
            Value::Object(entries) => {
                self.out.write_char('{')?;
                return Ok(Some(Children::Object(entries.iter())));
            }
        }
        Ok(None)
    }

    fn print(&mut self, root: &Value) -> fmt::Result {
        // Each open container remembers whether it has printed a child yet
        let mut stack: Vec<(Children<'_>, bool)> = Vec::new();
        let mut next = Some(root);

        loop {
            if let Some(value) = next.take() {
                if let Some(children) = self.open(value)? {
                    stack.push((children, true));
                }
            }

            let depth = stack.len();
            let Some((children, first)) = stack.last_mut() else {
                return Ok(());
            };
            match children.next() {
                Some((key, child)) => {
                    if !*first {
                        self.out.write_char(',')?;
                    }
                    *first = false;
                    self.newline(depth)?;
                    if let Some(key) = key {
                        write!(self.out, "{}", JsonStr(key))?;
                        self.out
                            .write_str(if self.indent.is_some() { ": " } else { ":" })?;
                    }
                    next = Some(child);
                }
                None => {
                    let closing = children.closing_delimiter();
                    stack.pop();
                    self.newline(depth - 1)?;
                    self.out.write_char(closing)?;
                }
            }
        }
    }
}

/// Compact rendering.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Printer {
            out: f,
            indent: None,
        }
        .print(self)
    }
}

/// Indented rendering of a [`Value`], created by [`Value::pretty`].
pub struct Pretty<'a> {
    value: &'a Value,
    indent: &'a str,
}

impl fmt::Display for Pretty<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Printer {
            out: f,
            indent: Some(self.indent).filter(|unit| !unit.is_empty()),
        }
        .print(self.value)
    }
}

impl Value {
    /// Returns a [`Display`](fmt::Display) adapter that renders this value
    /// with one child per line, indented by `indent` per nesting level.
    ///
    /// An empty `indent` falls back to compact output.
    ///
    /// ```
    /// let value = zenjson::parse_json_str(r#"{"a":[1,2],"b":{}}"#).unwrap();
    /// assert_eq!(
    ///     value.pretty("  ").to_string(),
    ///     "{\n  \"a\": [\n    1,\n    2\n  ],\n  \"b\": {}\n}"
    /// );
    /// ```
    pub fn pretty<'a>(&'a self, indent: &'a str) -> Pretty<'a> {
        Pretty {
            value: self,
            indent,
        }
    }
}

/// Renders `value` on a single line.
pub fn to_string(value: &Value) -> String {
    value.to_string()
}

/// Renders `value` with `indent` per nesting level.
pub fn to_string_pretty(value: &Value, indent: &str) -> String {
    value.pretty(indent).to_string()
}

/// Streams the compact rendering of `value` to `out`.
pub fn print<W: io::Write>(value: &Value, out: &mut W) -> io::Result<()> {
    write!(out, "{value}")
}

/// Streams the indented rendering of `value` to `out`.
pub fn print_pretty<W: io::Write>(value: &Value, indent: &str, out: &mut W) -> io::Result<()> {
    write!(out, "{}", value.pretty(indent))
}
