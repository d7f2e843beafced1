use std::fmt::{self, Write};

/// A compact JSON token writer.
///
/// It knows nothing about nesting: callers are responsible for pairing
/// `begin_*`/`end_*` calls and for placing separators. [Node](crate::Node)
/// drives it when printing.
///
/// Example usage:
///
/// ```
/// let mut w = docz_model::TextWriter::new(String::new());
/// w.begin_object().unwrap();
/// w.write_key("pi").unwrap();
/// w.write_number(3.5).unwrap();
/// w.end_object().unwrap();
/// assert_eq!(w.into_inner(), r#"{"pi":3.5}"#);
/// ```
///
pub struct TextWriter<W> {
    out: W,
}

impl<W: Write> TextWriter<W> {
    /// Wraps any `fmt::Write` sink, such as a `String` or a `fmt::Formatter`.
    pub fn new(out: W) -> TextWriter<W> {
        TextWriter { out }
    }

    /// Consumes the writer and returns the sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Write the `null` literal.
    pub fn write_null(&mut self) -> fmt::Result {
        self.out.write_str("null")
    }

    /// Write `true` or `false`.
    pub fn write_bool(&mut self, value: bool) -> fmt::Result {
        self.out.write_str(if value { "true" } else { "false" })
    }

    /// Write a number. Integral values below 1e15 in magnitude are written
    /// without a fraction; JSON has no spelling for NaN or infinity, so those
    /// become `null`.
    pub fn write_number(&mut self, value: f64) -> fmt::Result {
        if !value.is_finite() {
            return self.write_null();
        }

        if value.fract() == 0.0 && value.abs() < 1.0e15 {
            write!(self.out, "{}", value as i64)
        } else {
            write!(self.out, "{}", value)
        }
    }

    /// Write a double-quoted, escaped string.
    pub fn write_string(&mut self, value: &str) -> fmt::Result {
        self.out.write_char('"')?;

        // Copy unescaped runs in one go
        let mut start = 0;
        for (i, ch) in value.char_indices() {
            let escaped = match ch {
                '"' => "\\\"",
                '\\' => "\\\\",
                '\x08' => "\\b",
                '\x0C' => "\\f",
                '\n' => "\\n",
                '\r' => "\\r",
                '\t' => "\\t",
                c if c < '\x20' => {
                    self.out.write_str(&value[start..i])?;
                    write!(self.out, "\\u{:04x}", c as u32)?;
                    start = i + 1;
                    continue;
                }
                _ => continue,
            };
            self.out.write_str(&value[start..i])?;
            self.out.write_str(escaped)?;
            start = i + 1;
        }

        self.out.write_str(&value[start..])?;
        self.out.write_char('"')
    }

    /// Write an object key followed by its `:`.
    pub fn write_key(&mut self, key: &str) -> fmt::Result {
        self.write_string(key)?;
        self.out.write_char(':')
    }

    /// Write the `,` between two array items or object members.
    pub fn write_separator(&mut self) -> fmt::Result {
        self.out.write_char(',')
    }

    pub fn begin_object(&mut self) -> fmt::Result {
        self.out.write_char('{')
    }

    pub fn end_object(&mut self) -> fmt::Result {
        self.out.write_char('}')
    }

    pub fn begin_array(&mut self) -> fmt::Result {
        self.out.write_char('[')
    }

    pub fn end_array(&mut self) -> fmt::Result {
        self.out.write_char(']')
    }
}

#[cfg(test)]
fn write_once(cb: fn(&mut TextWriter<String>) -> fmt::Result) -> String {
    let mut w = TextWriter::new(String::new());
    cb(&mut w).unwrap();
    w.into_inner()
}

#[test]
fn write_null() {
    assert_eq!(write_once(|w| w.write_null()), "null");
}

#[test]
fn write_bool() {
    assert_eq!(write_once(|w| w.write_bool(false)), "false");
    assert_eq!(write_once(|w| w.write_bool(true)), "true");
}

#[test]
fn write_number() {
    assert_eq!(write_once(|w| w.write_number(0.0)), "0");
    assert_eq!(write_once(|w| w.write_number(-0.0)), "0");
    assert_eq!(write_once(|w| w.write_number(42.0)), "42");
    assert_eq!(write_once(|w| w.write_number(-3.0)), "-3");
    assert_eq!(write_once(|w| w.write_number(1.5)), "1.5");
    assert_eq!(write_once(|w| w.write_number(0.1)), "0.1");
    assert_eq!(write_once(|w| w.write_number(-123.456)), "-123.456");
    assert_eq!(
        write_once(|w| w.write_number(999_999_999_999_999.0)),
        "999999999999999"
    );
    assert_eq!(write_once(|w| w.write_number(f64::NAN)), "null");
    assert_eq!(write_once(|w| w.write_number(f64::INFINITY)), "null");
    assert_eq!(write_once(|w| w.write_number(f64::NEG_INFINITY)), "null");
}

#[test]
fn write_string() {
    assert_eq!(write_once(|w| w.write_string("")), r#""""#);
    assert_eq!(write_once(|w| w.write_string("a")), r#""a""#);
    assert_eq!(write_once(|w| w.write_string("(x, /)")), r#""(x, /)""#);
    assert_eq!(write_once(|w| w.write_string("🍕")), "\"🍕\"");
    assert_eq!(write_once(|w| w.write_string("say \"hi\"")), r#""say \"hi\"""#);
    assert_eq!(write_once(|w| w.write_string("C:\\tmp")), r#""C:\\tmp""#);
    assert_eq!(
        write_once(|w| w.write_string("\u{8}\u{c}\n\r\t")),
        r#""\b\f\n\r\t""#
    );
    assert_eq!(
        write_once(|w| w.write_string("a\u{0}b\u{1f}c")),
        r#""a\u0000b\u001fc""#
    );
    assert_eq!(write_once(|w| w.write_string("/\u{7f}")), "\"/\u{7f}\"");
}

#[test]
fn write_key() {
    assert_eq!(write_once(|w| w.write_key("name")), r#""name":"#);
    assert_eq!(write_once(|w| w.write_key("")), r#""":"#);
}

#[test]
fn write_sequence() {
    let mut w = TextWriter::new(String::new());
    w.begin_array().unwrap();
    w.write_null().unwrap();
    w.write_separator().unwrap();
    w.begin_object().unwrap();
    w.write_key("k").unwrap();
    w.write_string("v").unwrap();
    w.end_object().unwrap();
    w.write_separator().unwrap();
    w.begin_array().unwrap();
    w.end_array().unwrap();
    w.end_array().unwrap();
    assert_eq!(w.into_inner(), r#"[null,{"k":"v"},[]]"#);
}
