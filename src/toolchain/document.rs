//! Format-preserving JSON-with-comments document.
//!
//! [`ConfigDocument`] keeps the original source text and the byte spans of
//! the root object's members. Setting a key rewrites only the affected span,
//! so comments, unrelated keys, ordering and layout survive a round-trip.
//! Line and block comments and trailing commas are accepted.

use std::fmt;
use std::ops::Range;

use serde_json::{Map, Value};
use thiserror::Error;

const DEFAULT_INDENT: &str = "  ";

/// Error produced when a document cannot be parsed as an object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("{message} at line {line}, column {column}")]
    Syntax {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("expected an object at the top level, found {found}")]
    NotAnObject { found: &'static str },
}

/// A member of the root object.
#[derive(Debug, Clone)]
struct Member {
    key: String,
    key_start: usize,
    value: Range<usize>,
    /// Position just past the member's trailing comma, if it has one.
    comma_end: Option<usize>,
}

/// A parsed root object that can be edited without losing formatting.
#[derive(Debug, Clone)]
pub struct ConfigDocument {
    source: String,
    members: Vec<Member>,
    open_brace: usize,
    close_brace: usize,
    value: Map<String, Value>,
}

impl ConfigDocument {
    /// An empty object.
    pub fn empty() -> Self {
        Self {
            source: "{}\n".to_string(),
            members: Vec::new(),
            open_brace: 0,
            close_brace: 1,
            value: Map::new(),
        }
    }

    /// Parse `source`, which must contain a single object.
    pub fn parse(source: &str) -> Result<Self, DocumentError> {
        let mut parser = Parser::new(source);
        parser.skip_trivia()?;

        if parser.peek() != Some(b'{') {
            return match parser.parse_value() {
                Ok(value) => Err(DocumentError::NotAnObject {
                    found: kind_of(&value),
                }),
                Err(e) => Err(e),
            };
        }

        let open_brace = parser.pos;
        let mut members = Vec::new();
        let value = parser.parse_object(Some(&mut members))?;
        let close_brace = parser.pos - 1;

        parser.skip_trivia()?;
        if parser.peek().is_some() {
            return Err(parser.error("unexpected content after the document"));
        }

        Ok(Self {
            source: source.to_string(),
            members,
            open_brace,
            close_brace,
            value,
        })
    }

    /// Value of a top-level key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.value.get(key)
    }

    /// The document as a plain JSON object.
    pub fn to_value(&self) -> Value {
        Value::Object(self.value.clone())
    }

    /// Source text, including every edit.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Set or overwrite a top-level key.
    ///
    /// An existing member keeps its position and only its value changes. A
    /// new member is appended after the last one using the document's indent.
    pub fn set(&mut self, key: &str, value: &Value) -> Result<(), DocumentError> {
        let rendered = value.to_string();
        let mut source = self.source.clone();

        if let Some(member) = self.members.iter().rev().find(|m| m.key == key) {
            source.replace_range(member.value.clone(), &rendered);
        } else {
            let entry = format!("{}: {}", Value::String(key.to_string()), rendered);
            self.insert_member(&mut source, &entry);
        }

        *self = Self::parse(&source)?;
        Ok(())
    }

    fn insert_member(&self, source: &mut String, entry: &str) {
        let Some(last) = self.members.last() else {
            let interior = &self.source[self.open_brace + 1..self.close_brace];
            if interior.trim().is_empty() {
                source.replace_range(
                    self.open_brace + 1..self.close_brace,
                    &format!("\n{}{}\n", DEFAULT_INDENT, entry),
                );
            } else {
                source.insert_str(self.open_brace + 1, &format!("\n{}{},", DEFAULT_INDENT, entry));
            }
            return;
        };

        let multiline = self.source[self.open_brace..self.members[0].key_start].contains('\n');
        let anchor = last.comma_end.unwrap_or(last.value.end);

        if !multiline {
            match last.comma_end {
                Some(end) => source.insert_str(end, &format!(" {},", entry)),
                None => source.insert_str(last.value.end, &format!(", {}", entry)),
            }
            return;
        }

        let indent = self.indent_of(self.members[0].key_start);
        let insert_at = self.end_of_line_comment(anchor);
        match last.comma_end {
            Some(_) => source.insert_str(insert_at, &format!("\n{}{},", indent, entry)),
            None => {
                source.insert_str(insert_at, &format!("\n{}{}", indent, entry));
                source.insert(last.value.end, ',');
            }
        }
    }

    /// Leading whitespace of the line containing `pos`.
    fn indent_of(&self, pos: usize) -> &str {
        let line_start = self.source[..pos].rfind('\n').map_or(0, |i| i + 1);
        let prefix = &self.source[line_start..pos];
        if prefix.chars().all(|c| c == ' ' || c == '\t') {
            prefix
        } else {
            DEFAULT_INDENT
        }
    }

    /// Skip spaces and a trailing `//` comment on the same line.
    fn end_of_line_comment(&self, pos: usize) -> usize {
        let rest = &self.source[pos..];
        let spaces = rest.len() - rest.trim_start_matches([' ', '\t']).len();
        let after = &rest[spaces..];
        if after.starts_with("//") {
            pos + spaces + after.find('\n').unwrap_or(after.len())
        } else {
            pos
        }
    }
}

impl Default for ConfigDocument {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for ConfigDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

struct Parser<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn error(&self, message: &str) -> DocumentError {
        let consumed = &self.source[..self.pos.min(self.source.len())];
        let line = consumed.matches('\n').count() + 1;
        let column = consumed.len() - consumed.rfind('\n').map_or(0, |i| i + 1) + 1;
        DocumentError::Syntax {
            message: message.to_string(),
            line,
            column,
        }
    }

    fn expect(&mut self, byte: u8) -> Result<(), DocumentError> {
        if self.peek() == Some(byte) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(&format!("expected '{}'", byte as char)))
        }
    }

    /// Skip whitespace and comments.
    fn skip_trivia(&mut self) -> Result<(), DocumentError> {
        loop {
            match self.peek() {
                Some(b' ' | b'\t' | b'\n' | b'\r') => self.pos += 1,
                Some(b'/') => match self.bytes.get(self.pos + 1) {
                    Some(b'/') => {
                        while !matches!(self.peek(), None | Some(b'\n')) {
                            self.pos += 1;
                        }
                    }
                    Some(b'*') => {
                        let end = self.source[self.pos + 2..]
                            .find("*/")
                            .ok_or_else(|| self.error("unterminated block comment"))?;
                        self.pos += 2 + end + 2;
                    }
                    _ => return Err(self.error("unexpected '/'")),
                },
                // Byte order mark
                Some(0xEF) if self.source[self.pos..].starts_with('\u{feff}') => {
                    self.pos += '\u{feff}'.len_utf8();
                }
                _ => return Ok(()),
            }
        }
    }

    fn parse_value(&mut self) -> Result<Value, DocumentError> {
        match self.peek() {
            Some(b'{') => self.parse_object(None).map(Value::Object),
            Some(b'[') => self.parse_array(),
            Some(b'"') => self.parse_string().map(Value::String),
            Some(b't') => self.parse_literal("true", Value::Bool(true)),
            Some(b'f') => self.parse_literal("false", Value::Bool(false)),
            Some(b'n') => self.parse_literal("null", Value::Null),
            Some(b'-' | b'0'..=b'9') => self.parse_number(),
            Some(_) => Err(self.error("unexpected character")),
            None => Err(self.error("unexpected end of document")),
        }
    }

    /// Parse an object, recording member spans when `members` is given.
    fn parse_object(
        &mut self,
        mut members: Option<&mut Vec<Member>>,
    ) -> Result<Map<String, Value>, DocumentError> {
        self.expect(b'{')?;
        let mut map = Map::new();

        loop {
            self.skip_trivia()?;
            if self.peek() == Some(b'}') {
                self.pos += 1;
                return Ok(map);
            }
            if self.peek() != Some(b'"') {
                return Err(self.error("expected a string key"));
            }

            let key_start = self.pos;
            let key = self.parse_string()?;
            self.skip_trivia()?;
            self.expect(b':')?;
            self.skip_trivia()?;

            let value_start = self.pos;
            let value = self.parse_value()?;
            let value_end = self.pos;

            self.skip_trivia()?;
            let comma_end = match self.peek() {
                Some(b',') => {
                    self.pos += 1;
                    Some(self.pos)
                }
                Some(b'}') => None,
                _ => return Err(self.error("expected ',' or '}'")),
            };

            if let Some(members) = members.as_deref_mut() {
                members.push(Member {
                    key: key.clone(),
                    key_start,
                    value: value_start..value_end,
                    comma_end,
                });
            }
            map.insert(key, value);
        }
    }

    fn parse_array(&mut self) -> Result<Value, DocumentError> {
        self.expect(b'[')?;
        let mut items = Vec::new();

        loop {
            self.skip_trivia()?;
            if self.peek() == Some(b']') {
                self.pos += 1;
                return Ok(Value::Array(items));
            }
            items.push(self.parse_value()?);
            self.skip_trivia()?;
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b']') => {}
                _ => return Err(self.error("expected ',' or ']'")),
            }
        }
    }

    fn parse_string(&mut self) -> Result<String, DocumentError> {
        let start = self.pos;
        self.expect(b'"')?;
        loop {
            match self.peek() {
                Some(b'\\') => self.pos += 2,
                Some(b'"') => {
                    self.pos += 1;
                    break;
                }
                Some(_) => self.pos += 1,
                None => return Err(self.error("unterminated string")),
            }
        }
        serde_json::from_str(&self.source[start..self.pos])
            .map_err(|e| self.error(&format!("invalid string: {}", e)))
    }

    fn parse_number(&mut self) -> Result<Value, DocumentError> {
        let start = self.pos;
        while matches!(
            self.peek(),
            Some(b'-' | b'+' | b'.' | b'e' | b'E' | b'0'..=b'9')
        ) {
            self.pos += 1;
        }
        serde_json::from_str(&self.source[start..self.pos])
            .map_err(|_| self.error("invalid number"))
    }

    fn parse_literal(&mut self, literal: &str, value: Value) -> Result<Value, DocumentError> {
        if self.source[self.pos..].starts_with(literal) {
            self.pos += literal.len();
            Ok(value)
        } else {
            Err(self.error("unexpected identifier"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn extends(doc: &mut ConfigDocument, value: &str) {
        doc.set("extends", &json!(value)).unwrap();
    }

    #[test]
    fn empty_document_gains_member() {
        let mut doc = ConfigDocument::empty();
        extends(&mut doc, "astro/tsconfigs/base");
        assert_eq!(doc.as_str(), "{\n  \"extends\": \"astro/tsconfigs/base\"\n}\n");
    }

    #[test]
    fn parses_comments_and_trailing_commas() {
        let doc = ConfigDocument::parse(
            "// theme settings\n{\n  /* compiler */\n  \"compilerOptions\": { \"strict\": true, },\n  \"include\": [\"src\",],\n}\n",
        )
        .unwrap();
        assert_eq!(doc.get("compilerOptions"), Some(&json!({ "strict": true })));
        assert_eq!(doc.get("include"), Some(&json!(["src"])));
    }

    #[test]
    fn overwrite_keeps_position_and_comments() {
        let source = "{\n  // base preset\n  \"extends\": \"astro/tsconfigs/base\", // keep me\n  \"include\": [\"src\"]\n}\n";
        let mut doc = ConfigDocument::parse(source).unwrap();
        extends(&mut doc, "astro/tsconfigs/strictest");
        assert_eq!(
            doc.as_str(),
            "{\n  // base preset\n  \"extends\": \"astro/tsconfigs/strictest\", // keep me\n  \"include\": [\"src\"]\n}\n"
        );
    }

    #[test]
    fn append_after_last_member() {
        let source = "{\n    \"compilerOptions\": {\n        \"strict\": true\n    }\n}\n";
        let mut doc = ConfigDocument::parse(source).unwrap();
        extends(&mut doc, "astro/tsconfigs/strict");
        assert_eq!(
            doc.as_str(),
            "{\n    \"compilerOptions\": {\n        \"strict\": true\n    },\n    \"extends\": \"astro/tsconfigs/strict\"\n}\n"
        );
        assert_eq!(doc.get("compilerOptions"), Some(&json!({ "strict": true })));
    }

    #[test]
    fn append_preserves_trailing_comma_style() {
        let source = "{\n  \"include\": [\"src\"],\n}\n";
        let mut doc = ConfigDocument::parse(source).unwrap();
        extends(&mut doc, "astro/tsconfigs/strict");
        assert_eq!(
            doc.as_str(),
            "{\n  \"include\": [\"src\"],\n  \"extends\": \"astro/tsconfigs/strict\",\n}\n"
        );
    }

    #[test]
    fn append_after_line_comment() {
        let source = "{\n  \"include\": [\"src\"] // sources\n}\n";
        let mut doc = ConfigDocument::parse(source).unwrap();
        extends(&mut doc, "x");
        assert_eq!(
            doc.as_str(),
            "{\n  \"include\": [\"src\"], // sources\n  \"extends\": \"x\"\n}\n"
        );
    }

    #[test]
    fn append_on_single_line() {
        let mut doc = ConfigDocument::parse("{\"include\": [\"src\"]}").unwrap();
        extends(&mut doc, "x");
        assert_eq!(doc.as_str(), "{\"include\": [\"src\"], \"extends\": \"x\"}");
    }

    #[test]
    fn insert_into_object_with_only_comments() {
        let mut doc = ConfigDocument::parse("{\n  // nothing yet\n}\n").unwrap();
        extends(&mut doc, "x");
        assert_eq!(doc.get("extends"), Some(&json!("x")));
        assert!(doc.as_str().contains("// nothing yet"));
    }

    #[test]
    fn duplicate_keys_update_last() {
        let mut doc = ConfigDocument::parse("{\"extends\": \"a\", \"extends\": \"b\"}").unwrap();
        extends(&mut doc, "c");
        assert_eq!(doc.as_str(), "{\"extends\": \"a\", \"extends\": \"c\"}");
        assert_eq!(doc.get("extends"), Some(&json!("c")));
    }

    #[test]
    fn escaped_strings_are_decoded() {
        let doc = ConfigDocument::parse(r#"{"path": "a\"b\\cé"}"#).unwrap();
        assert_eq!(doc.get("path"), Some(&json!("a\"b\\cé")));
    }

    #[test]
    fn non_object_root_is_rejected() {
        assert_eq!(
            ConfigDocument::parse("[1, 2]").unwrap_err(),
            DocumentError::NotAnObject { found: "an array" }
        );
        assert!(matches!(
            ConfigDocument::parse("\"text\"").unwrap_err(),
            DocumentError::NotAnObject { .. }
        ));
    }

    #[test]
    fn syntax_errors_report_position() {
        let err = ConfigDocument::parse("{\n  \"a\": tru\n}").unwrap_err();
        match err {
            DocumentError::Syntax { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn truncated_document_is_error() {
        assert!(ConfigDocument::parse("{\"a\": 1").is_err());
        assert!(ConfigDocument::parse("{} {}").is_err());
        assert!(ConfigDocument::parse("{ /* open").is_err());
    }
}
