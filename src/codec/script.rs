//! JavaScript module codec
//!
//! Reading a JS source never evaluates code. The decoder strips a
//! recognized export prologue (`module.exports =`, `export default`, an
//! optional `'use strict';` line) and parses the remaining expression as an
//! object literal, a superset of JSON allowing single-quoted strings,
//! unquoted identifier keys, trailing commas, and comments. Text with no
//! prologue at all is parsed as a plain literal, which is also how streamed
//! JS input is handled. The encoder produces the mirror-image module text.

use serde_json::{Map, Number, Value};

use crate::error::{TransformError, TransformResult};
use crate::options::{is_valid_identifier, CanonicalOptions};

/// Decode JS module text into a value.
///
/// A named export (`module.exports.NAME = …` / `export const NAME = …`)
/// decodes to an object with that single key, so a following `imports`
/// selection finds it.
pub fn decode(text: &str) -> TransformResult<Value> {
    let (body, name) = strip_module_wrapper(text);
    let mut parser = LiteralParser::new(body);
    let value = parser.parse_value()?;
    parser.skip_trivia();
    if !parser.at_end() {
        return Err(parser.error("trailing characters after exported value"));
    }
    match name {
        Some(name) => {
            let mut map = Map::new();
            map.insert(name, value);
            Ok(Value::Object(map))
        }
        None => Ok(value),
    }
}

/// Encode a value as a JS module per the resolved script-output knobs:
/// quote style, strict prologue, CommonJS vs ES module syntax, and an
/// optional named export.
pub fn encode(value: &Value, options: &CanonicalOptions) -> String {
    let quote = if options.double_quote { '"' } else { '\'' };
    let body = literal(value, options.indent, quote, 0);

    let mut out = String::new();
    if options.strict {
        out.push(quote);
        out.push_str("use strict");
        out.push(quote);
        out.push_str(";\n\n");
    }

    let statement = match (options.exports.as_deref(), options.es_module) {
        (Some(name), true) => format!("export const {} = {};", name, body),
        (Some(name), false) => format!("module.exports.{} = {};", name, body),
        (None, true) => format!("export default {};", body),
        (None, false) => format!("module.exports = {};", body),
    };
    out.push_str(&statement);
    out.push('\n');
    out
}

fn strip_module_wrapper(text: &str) -> (&str, Option<String>) {
    let mut rest = text.trim();
    for prologue in ["'use strict';", "\"use strict\";"] {
        if let Some(r) = rest.strip_prefix(prologue) {
            rest = r.trim_start();
            break;
        }
    }

    let mut name = None;
    let body = if let Some(r) = rest.strip_prefix("module.exports") {
        let r = match r.strip_prefix('.') {
            Some(named) => {
                let (ident, after) = split_identifier(named);
                name = Some(ident.to_string());
                after
            }
            None => r,
        };
        r.trim_start().strip_prefix('=').map(str::trim_start)
    } else if let Some(r) = rest.strip_prefix("export default") {
        Some(r.trim_start())
    } else if let Some(r) = rest.strip_prefix("export const") {
        let (ident, after) = split_identifier(r.trim_start());
        name = Some(ident.to_string());
        after.trim_start().strip_prefix('=').map(str::trim_start)
    } else {
        None
    };

    // no recognized wrapper: treat the whole text as a plain literal
    let name = if body.is_some() { name } else { None };
    let rest = body.unwrap_or(rest);

    (rest.strip_suffix(';').unwrap_or(rest).trim_end(), name)
}

fn split_identifier(s: &str) -> (&str, &str) {
    let end = s
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '$'))
        .unwrap_or(s.len());
    s.split_at(end)
}

/// Recursive-descent parser for JS object literals
struct LiteralParser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> LiteralParser<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn error(&self, message: &str) -> TransformError {
        TransformError::script_parse(format!("{} at offset {}", message, self.pos))
    }

    /// Skip whitespace and `//` / `/* */` comments
    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some('/') => {
                    let rest = &self.src[self.pos..];
                    if rest.starts_with("//") {
                        while let Some(c) = self.bump() {
                            if c == '\n' {
                                break;
                            }
                        }
                    } else if rest.starts_with("/*") {
                        self.pos += 2;
                        while !self.at_end() && !self.src[self.pos..].starts_with("*/") {
                            self.bump();
                        }
                        self.pos = (self.pos + 2).min(self.src.len());
                    } else {
                        break;
                    }
                }
                _ => break,
            }
        }
    }

    fn expect(&mut self, c: char) -> TransformResult<()> {
        if self.peek() == Some(c) {
            self.bump();
            Ok(())
        } else {
            Err(self.error(&format!("expected '{}'", c)))
        }
    }

    fn parse_value(&mut self) -> TransformResult<Value> {
        self.skip_trivia();
        match self.peek() {
            Some('{') => self.parse_object(),
            Some('[') => self.parse_array(),
            Some('"') | Some('\'') => Ok(Value::String(self.parse_string()?)),
            Some(c) if c == '-' || c == '+' || c.is_ascii_digit() => self.parse_number(),
            Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => self.parse_word(),
            _ => Err(self.error("expected a value")),
        }
    }

    fn parse_object(&mut self) -> TransformResult<Value> {
        self.expect('{')?;
        let mut map = Map::new();
        loop {
            self.skip_trivia();
            if self.peek() == Some('}') {
                self.bump();
                break;
            }
            let key = self.parse_key()?;
            self.skip_trivia();
            self.expect(':')?;
            let value = self.parse_value()?;
            map.insert(key, value);
            self.skip_trivia();
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some('}') => {
                    self.bump();
                    break;
                }
                _ => return Err(self.error("expected ',' or '}' in object")),
            }
        }
        Ok(Value::Object(map))
    }

    fn parse_key(&mut self) -> TransformResult<String> {
        match self.peek() {
            Some('"') | Some('\'') => self.parse_string(),
            Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {
                let start = self.pos;
                while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == '_' || c == '$')
                {
                    self.bump();
                }
                Ok(self.src[start..self.pos].to_string())
            }
            _ => Err(self.error("expected an object key")),
        }
    }

    fn parse_array(&mut self) -> TransformResult<Value> {
        self.expect('[')?;
        let mut items = Vec::new();
        loop {
            self.skip_trivia();
            if self.peek() == Some(']') {
                self.bump();
                break;
            }
            items.push(self.parse_value()?);
            self.skip_trivia();
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some(']') => {
                    self.bump();
                    break;
                }
                _ => return Err(self.error("expected ',' or ']' in array")),
            }
        }
        Ok(Value::Array(items))
    }

    fn parse_string(&mut self) -> TransformResult<String> {
        let quote = self.bump().ok_or_else(|| self.error("expected a string"))?;
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(self.error("unterminated string")),
                Some(c) if c == quote => break,
                Some('\\') => {
                    let esc = self
                        .bump()
                        .ok_or_else(|| self.error("unterminated escape sequence"))?;
                    match esc {
                        'n' => out.push('\n'),
                        't' => out.push('\t'),
                        'r' => out.push('\r'),
                        'b' => out.push('\u{0008}'),
                        'f' => out.push('\u{000C}'),
                        '0' => out.push('\0'),
                        'u' => out.push(self.parse_unicode_escape()?),
                        // escaped newline is a line continuation
                        '\n' => {}
                        other => out.push(other),
                    }
                }
                Some(c) => out.push(c),
            }
        }
        Ok(out)
    }

    /// `\uXXXX` and `\u{...}` forms
    fn parse_unicode_escape(&mut self) -> TransformResult<char> {
        let hex = if self.peek() == Some('{') {
            self.bump();
            let start = self.pos;
            while matches!(self.peek(), Some(c) if c != '}') {
                self.bump();
            }
            let hex = self.src[start..self.pos].to_string();
            self.expect('}')?;
            hex
        } else {
            let mut hex = String::new();
            for _ in 0..4 {
                hex.push(
                    self.bump()
                        .ok_or_else(|| self.error("unterminated unicode escape"))?,
                );
            }
            hex
        };
        u32::from_str_radix(&hex, 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| self.error("invalid unicode escape"))
    }

    fn parse_number(&mut self) -> TransformResult<Value> {
        let start = self.pos;
        if matches!(self.peek(), Some('+') | Some('-')) {
            self.bump();
        }
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == '.' || c == '+' || c == '-')
        {
            self.bump();
        }
        let text = &self.src[start..self.pos];
        let text = text.strip_prefix('+').unwrap_or(text);
        if let Ok(i) = text.parse::<i64>() {
            return Ok(Value::Number(i.into()));
        }
        let f: f64 = text.parse().map_err(|_| self.error("invalid number"))?;
        Number::from_f64(f)
            .map(Value::Number)
            .ok_or_else(|| self.error("number has no JSON representation"))
    }

    fn parse_word(&mut self) -> TransformResult<Value> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == '_' || c == '$') {
            self.bump();
        }
        match &self.src[start..self.pos] {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            "null" | "undefined" => Ok(Value::Null),
            word => Err(self.error(&format!("unexpected identifier '{}'", word))),
        }
    }
}

fn literal(value: &Value, indent: usize, quote: char, level: usize) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => quote_string(s, quote),
        Value::Array(items) => {
            if items.is_empty() {
                return "[]".to_string();
            }
            if indent == 0 {
                let inner: Vec<String> = items
                    .iter()
                    .map(|v| literal(v, indent, quote, level))
                    .collect();
                return format!("[{}]", inner.join(", "));
            }
            let pad = " ".repeat(indent * (level + 1));
            let close = " ".repeat(indent * level);
            let inner: Vec<String> = items
                .iter()
                .map(|v| format!("{}{}", pad, literal(v, indent, quote, level + 1)))
                .collect();
            format!("[\n{}\n{}]", inner.join(",\n"), close)
        }
        Value::Object(map) => {
            if map.is_empty() {
                return "{}".to_string();
            }
            if indent == 0 {
                let inner: Vec<String> = map
                    .iter()
                    .map(|(k, v)| format!("{}: {}", key_text(k, quote), literal(v, indent, quote, level)))
                    .collect();
                return format!("{{{}}}", inner.join(", "));
            }
            let pad = " ".repeat(indent * (level + 1));
            let close = " ".repeat(indent * level);
            let inner: Vec<String> = map
                .iter()
                .map(|(k, v)| {
                    format!(
                        "{}{}: {}",
                        pad,
                        key_text(k, quote),
                        literal(v, indent, quote, level + 1)
                    )
                })
                .collect();
            format!("{{\n{}\n{}}}", inner.join(",\n"), close)
        }
    }
}

/// Object keys stay unquoted when they are legal identifiers
fn key_text(key: &str, quote: char) -> String {
    if is_valid_identifier(key) {
        key.to_string()
    } else {
        quote_string(key, quote)
    }
}

fn quote_string(s: &str, quote: char) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}
