//! JSON form of property records.
//!
//! A property record is a JSON array of tokens, e.g.
//! `["Lcl Translation", "Lcl Translation", "", "A", 1, 2, 3]`. Strings
//! become quoted text tokens, numbers bare text tokens and booleans `0`/`1`.
//! An object `{"key": "...", "tokens": [...]}` produces an element with a
//! custom key. Every record gets the next line number so that decode
//! errors point somewhere meaningful.

use super::{Element, Scope, Token, TokenLocation, PROPERTY_KEY};
use crate::util::{Error, Result};
use serde_json::Value;

/// Key of the element holding an object's property records.
pub const PROPERTIES_KEY: &str = "Properties70";

/// Assigns sequential line numbers to records.
#[derive(Debug, Clone, Copy)]
pub struct LineCounter {
    next: u32,
}

impl LineCounter {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    fn advance(&mut self) -> u32 {
        let line = self.next;
        self.next += 1;
        line
    }
}

impl Default for LineCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert one JSON token.
pub fn token_from_json(value: &Value, line: u32) -> Result<Token> {
    match value {
        Value::String(s) => Ok(Token::quoted(s, line)),
        Value::Number(n) => Ok(Token::text(n.to_string(), line)),
        Value::Bool(b) => Ok(Token::text(if *b { "1" } else { "0" }, line)),
        other => Err(Error::invalid_scene(format!(
            "line {}: unsupported token {}",
            line, other
        ))),
    }
}

/// Convert one JSON record.
pub fn record_from_json(value: &Value, lines: &mut LineCounter) -> Result<Element> {
    let line = lines.advance();
    let (key, tokens) = match value {
        Value::Array(tokens) => (PROPERTY_KEY, tokens),
        Value::Object(map) => {
            let key = map.get("key").and_then(Value::as_str).unwrap_or(PROPERTY_KEY);
            let tokens = map
                .get("tokens")
                .and_then(Value::as_array)
                .ok_or_else(|| Error::invalid_scene(format!("line {}: record without tokens", line)))?;
            (key, tokens)
        }
        other => {
            return Err(Error::invalid_scene(format!(
                "line {}: expected record array, got {}",
                line, other
            )))
        }
    };

    let tokens = tokens
        .iter()
        .map(|t| token_from_json(t, line))
        .collect::<Result<Vec<_>>>()?;
    Ok(Element::new(key, TokenLocation::Line(line), tokens))
}

/// Convert a JSON array of records into a `Properties70` element.
pub fn properties_from_json(value: &Value, lines: &mut LineCounter) -> Result<Element> {
    let records = value
        .as_array()
        .ok_or_else(|| Error::invalid_scene("properties must be an array of records"))?;

    let header_line = lines.advance();
    let mut scope = Scope::new();
    for record in records {
        scope.push(record_from_json(record, lines)?);
    }

    Ok(Element::new(PROPERTIES_KEY, TokenLocation::Line(header_line), []).with_scope(scope))
}
