//! Variant list parsing for raw enum bodies.
//!
//! Handles:
//! - Unit variants: `A,`
//! - Tuple variants: `A(Foo)`, `A(Box<Foo>, u32)`, `A(Vec<(u8, u8)>)`
//! - Outer attributes and doc comments on variants
//! - A missing trailing comma after the last variant
//!
//! Best-effort policy: text that does not look like a variant is skipped up
//! to the next top-level comma and parsing continues. Struct-like variants
//! and explicit discriminants keep their name and carry no payload.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// One case of an enum.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariantDescriptor {
    /// Variant identifier
    pub name: String,
    /// Raw payload type text, trimmed; `None` for unit variants and `()`
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub payload_type: Option<String>,
}

impl VariantDescriptor {
    /// A variant without payload.
    pub fn unit(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            payload_type: None,
        }
    }

    /// A variant carrying `payload`.
    pub fn with_payload(name: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            payload_type: Some(payload.into()),
        }
    }
}

/// Variants of one enum, in source order.
pub type EnumDescriptor = Vec<VariantDescriptor>;

/// Block or line comment, whichever opens first.
fn comment_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    // SAFETY: This regex pattern is hardcoded and validated at compile-test time.
    REGEX.get_or_init(|| {
        Regex::new(r"(?s)/\*.*?\*/|//[^\n]*").expect("Hardcoded regex pattern is valid")
    })
}

fn type_name_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    // SAFETY: This regex pattern is hardcoded and validated at compile-test time.
    REGEX.get_or_init(|| {
        Regex::new(r"\b[A-Z][A-Za-z0-9_]*\b").expect("Hardcoded regex pattern is valid")
    })
}

/// Remove `/* */` (non-nesting) and `//` comments.
///
/// One left-to-right pass: a `/*` inside a line comment, or a `//` inside a
/// block comment, is part of that comment.
pub fn strip_comments(body: &str) -> String {
    comment_regex().replace_all(body, "").into_owned()
}

/// Parse the variant list of a raw enum body.
pub fn parse_variants(body: &str) -> EnumDescriptor {
    let cleaned = strip_comments(body);
    let mut scanner = VariantScanner::new(&cleaned);
    let mut variants = Vec::new();

    while let Some(variant) = scanner.next_variant() {
        variants.push(variant);
    }

    variants
}

/// Capitalized identifier tokens in a payload, first appearance first.
///
/// These are candidate type names; the resolver checks which of them are
/// actually enums.
pub fn payload_type_candidates(payload: &str) -> Vec<&str> {
    let mut seen = HashSet::new();
    type_name_regex()
        .find_iter(payload)
        .map(|m| m.as_str())
        .filter(|name| seen.insert(*name))
        .collect()
}

/// Single-pass scanner over a comment-free enum body.
///
/// Delimiters are ASCII and matched on bytes; identifiers are read by
/// `char`, so slice boundaries always fall on UTF-8 character boundaries.
struct VariantScanner<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> VariantScanner<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    fn peek_char(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn next_variant(&mut self) -> Option<VariantDescriptor> {
        loop {
            self.skip_whitespace();
            let byte = self.peek()?;

            if byte == b'#' {
                self.skip_attribute();
                continue;
            }

            if !self.peek_char().is_some_and(|c| c.is_alphabetic() || c == '_') {
                self.skip_past_separator();
                continue;
            }

            let name = self.read_identifier();
            self.skip_whitespace();

            let mut payload = None;
            if self.peek() == Some(b'(') {
                self.pos += 1;
                // Unclosed payload: nothing trustworthy remains.
                let inner = self.read_until_close(b'(', b')')?;
                let trimmed = inner.trim();
                if !trimmed.is_empty() {
                    payload = Some(trimmed.to_string());
                }
                self.skip_whitespace();
            }

            match self.peek() {
                None => {}
                Some(b',') => self.pos += 1,
                // Struct-like variant or explicit discriminant.
                Some(b'{') | Some(b'=') => self.skip_past_separator(),
                // Missing separator: the variant ends here.
                Some(_) => {}
            }

            return Some(VariantDescriptor {
                name: name.to_string(),
                payload_type: payload,
            });
        }
    }

    fn read_identifier(&mut self) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek_char().filter(|c| c.is_alphanumeric() || *c == '_') {
            self.pos += c.len_utf8();
        }
        &self.text[start..self.pos]
    }

    /// Consume text up to the `close` matching an already consumed `open`.
    ///
    /// Returns the enclosed text, or `None` if the text ends first.
    fn read_until_close(&mut self, open: u8, close: u8) -> Option<&'a str> {
        let start = self.pos;
        let mut depth = 1usize;

        while let Some(byte) = self.peek() {
            if byte == open {
                depth += 1;
            } else if byte == close {
                depth -= 1;
                if depth == 0 {
                    let inner = &self.text[start..self.pos];
                    self.pos += 1;
                    return Some(inner);
                }
            }
            self.pos += 1;
        }

        None
    }

    /// Skip `#[...]` or `#![...]`.
    fn skip_attribute(&mut self) {
        self.pos += 1;
        if self.peek() == Some(b'!') {
            self.pos += 1;
        }
        self.skip_whitespace();
        if self.peek() == Some(b'[') {
            self.pos += 1;
            if self.read_until_close(b'[', b']').is_none() {
                self.pos = self.text.len();
            }
        }
    }

    /// Skip to just past the next comma outside any bracket pair.
    fn skip_past_separator(&mut self) {
        let mut depth = 0usize;

        while let Some(byte) = self.peek() {
            self.pos += 1;
            match byte {
                b'(' | b'[' | b'{' => depth += 1,
                b')' | b']' | b'}' => depth = depth.saturating_sub(1),
                b',' if depth == 0 => return,
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(variants: &[VariantDescriptor]) -> Vec<&str> {
        variants.iter().map(|v| v.name.as_str()).collect()
    }

    #[test]
    fn test_unit_variants_in_order() {
        let variants = parse_variants(" First, Second, Third, ");
        assert_eq!(names(&variants), vec!["First", "Second", "Third"]);
        assert!(variants.iter().all(|v| v.payload_type.is_none()));
    }

    #[test]
    fn test_last_variant_without_comma() {
        let variants = parse_variants(" First, Second(Foo), Third ");
        assert_eq!(
            variants,
            vec![
                VariantDescriptor::unit("First"),
                VariantDescriptor::with_payload("Second", "Foo"),
                VariantDescriptor::unit("Third"),
            ]
        );
    }

    #[test]
    fn test_payload_kept_verbatim() {
        let variants = parse_variants("Open( Box<Foo> ),\nMove(i32, i32),");
        assert_eq!(variants[0].payload_type.as_deref(), Some("Box<Foo>"));
        assert_eq!(variants[1].payload_type.as_deref(), Some("i32, i32"));
    }

    #[test]
    fn test_nested_parentheses_in_payload() {
        let variants = parse_variants("Resize(Vec<(u8, u8)>),\nQuit,");
        assert_eq!(variants[0].payload_type.as_deref(), Some("Vec<(u8, u8)>"));
        assert_eq!(variants[1].name, "Quit");
    }

    #[test]
    fn test_empty_parentheses_have_no_payload() {
        let variants = parse_variants("Nothing(),\nSpaced(   ),");
        assert_eq!(
            variants,
            vec![
                VariantDescriptor::unit("Nothing"),
                VariantDescriptor::unit("Spaced"),
            ]
        );
    }

    #[test]
    fn test_comments_do_not_change_variants() {
        let plain = parse_variants("\n    A(Foo),\n    B,\n    C(Bar),\n");
        let commented = parse_variants(
            "\n    A(Foo), // trailing comment\n    /* block */\n    B,\n    /// doc comment\n    C(Bar), /* Fake(Thing), */\n",
        );
        assert_eq!(plain, commented);
    }

    #[test]
    fn test_strip_comments() {
        assert_eq!(strip_comments("A, // gone\nB"), "A, \nB");
        assert_eq!(strip_comments("A, /* x\n y */B"), "A, B");
        assert_eq!(strip_comments("/* // inside */A"), "A");
        assert_eq!(strip_comments("A, // see src/*.rs\nB, /* c */"), "A, \nB, ");
    }

    #[test]
    fn test_block_opener_inside_line_comment() {
        let plain = parse_variants("\n A,\n B,\n C,\n");
        let commented = parse_variants("\n A, // handles /* style input\n B,\n /* note */ C,\n");
        assert_eq!(plain, commented);
        assert_eq!(names(&commented), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_missing_separator_keeps_both_variants() {
        let variants = parse_variants("A(Foo) B, C,");
        assert_eq!(
            variants,
            vec![
                VariantDescriptor::with_payload("A", "Foo"),
                VariantDescriptor::unit("B"),
                VariantDescriptor::unit("C"),
            ]
        );
    }

    #[test]
    fn test_non_ascii_identifiers() {
        let variants = parse_variants("Café, Next, Über(Größe),");
        assert_eq!(names(&variants), vec!["Café", "Next", "Über"]);
        assert_eq!(variants[2].payload_type.as_deref(), Some("Größe"));
    }

    #[test]
    fn test_attributes_skipped() {
        let variants = parse_variants(
            "#[default]\nIdle,\n#[serde(rename = \"go\")]\nRun(Speed),",
        );
        assert_eq!(names(&variants), vec!["Idle", "Run"]);
        assert_eq!(variants[1].payload_type.as_deref(), Some("Speed"));
    }

    #[test]
    fn test_identifiers_with_digits_and_underscores() {
        let variants = parse_variants("F1, Key_2(u8),");
        assert_eq!(names(&variants), vec!["F1", "Key_2"]);
    }

    #[test]
    fn test_discriminants_keep_name() {
        let variants = parse_variants("Low = 1, High = 1 << 4,");
        assert_eq!(
            variants,
            vec![VariantDescriptor::unit("Low"), VariantDescriptor::unit("High")]
        );
    }

    #[test]
    fn test_struct_like_variant_keeps_name() {
        // Locator bodies end at the first `}`, so the struct fields are cut.
        let variants = parse_variants(" Click { x: i32 ");
        assert_eq!(variants, vec![VariantDescriptor::unit("Click")]);
    }

    #[test]
    fn test_unclosed_payload_is_dropped() {
        let variants = parse_variants("Ok, Broken(Foo<");
        assert_eq!(variants, vec![VariantDescriptor::unit("Ok")]);
    }

    #[test]
    fn test_garbage_is_skipped() {
        let variants = parse_variants("A, 42 junk, B,");
        assert_eq!(names(&variants), vec!["A", "B"]);
    }

    #[test]
    fn test_empty_body() {
        assert!(parse_variants("").is_empty());
        assert!(parse_variants("   \n // nothing\n").is_empty());
    }

    #[test]
    fn test_payload_type_candidates() {
        assert_eq!(
            payload_type_candidates("Box<Foo>, Option<Bar>, Foo, u32"),
            vec!["Box", "Foo", "Option", "Bar"]
        );
        assert_eq!(payload_type_candidates("A"), vec!["A"]);
        assert!(payload_type_candidates("u32, my_Type").is_empty());
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_string(&vec![
            VariantDescriptor::unit("Quit"),
            VariantDescriptor::with_payload("Open", "Path"),
        ])
        .unwrap();
        assert_eq!(
            json,
            r#"[{"name":"Quit"},{"name":"Open","type":"Path"}]"#
        );
    }
}
