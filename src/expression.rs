//! Symbolic expression accumulation and canonicalization
//!
//! An [`Expression`] collects a key (an asset characteristic or the first
//! word of a raw string) plus an underscore-joined chain of operator/operand
//! tokens, then canonicalizes the whole thing to its compact wire form:
//! long spellings become short tokens, separator runs collapse to a single
//! `_`, and user variable references (`$name`) pass through untouched.
//!
//! # Example
//!
//! ```
//! use mediatx::expression::Expression;
//!
//! let expr = Expression::width().add(5).multiply(2);
//! assert_eq!(expr.render(), "w_add_5_mul_2");
//!
//! let cond = Expression::from_raw("initialWidth > 500");
//! assert_eq!(cond.render(), "iw_gt_500");
//! ```

use std::sync::OnceLock;

use regex::Regex;

use crate::vocab::{Characteristic, Operator, SUBSTITUTIONS};

/// A user variable reference: `$` followed by a letter and any number of
/// alphanumerics. Text inside these spans is never rewritten.
fn variable_ref_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$[A-Za-z][A-Za-z0-9]*").expect("variable pattern is valid"))
}

fn is_separator(c: char) -> bool {
    c == ' ' || c == '_'
}

/// Substitute known long spellings and operator symbols with their short
/// tokens in a single segment that contains no variable references.
///
/// A table entry only matches as a whole word: the characters on both sides
/// must be separators (space/underscore) or the segment edge. Entries are
/// tried in table order, longest spellings first, so `initial_width` wins
/// over the `width` it contains.
fn substitute_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut rest = segment;
    let mut prev: Option<char> = None;

    'outer: while !rest.is_empty() {
        let at_boundary = prev.map_or(true, is_separator);
        if at_boundary {
            for (long, short) in SUBSTITUTIONS {
                if let Some(after) = rest.strip_prefix(long) {
                    let closed = after.chars().next().map_or(true, is_separator);
                    if closed {
                        out.push_str(short);
                        prev = long.chars().last();
                        rest = after;
                        continue 'outer;
                    }
                }
            }
        }
        let mut chars = rest.chars();
        match chars.next() {
            Some(c) => {
                out.push(c);
                prev = Some(c);
                rest = chars.as_str();
            }
            None => break,
        }
    }

    out
}

/// Collapse every run of spaces/underscores into a single `_`.
fn collapse_separators(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;
    for c in text.chars() {
        if is_separator(c) {
            if !in_run {
                out.push('_');
                in_run = true;
            }
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

/// Canonicalize expression text to its wire form.
///
/// Two passes: first locate every user variable reference span, then run
/// token substitution only on the segments between them, reassemble, and
/// finally collapse separator runs. Variable names come out byte-for-byte
/// intact even when they contain a characteristic spelling (`$width` stays
/// `$width`).
pub fn canonicalize(text: &str) -> String {
    let mut rewritten = String::with_capacity(text.len());
    let mut cursor = 0;
    for span in variable_ref_pattern().find_iter(text) {
        rewritten.push_str(&substitute_segment(&text[cursor..span.start()]));
        rewritten.push_str(span.as_str());
        cursor = span.end();
    }
    rewritten.push_str(&substitute_segment(&text[cursor..]));
    collapse_separators(&rewritten)
}

/// An accumulating symbolic expression: a key plus an underscore-joined
/// value chain of operator/operand tokens.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Expression {
    key: String,
    value: String,
    all_separator_prefix: bool,
}

impl Expression {
    /// Create an empty expression with no key and no value.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an expression from an asset characteristic.
    pub fn from_characteristic(characteristic: Characteristic) -> Self {
        Self {
            key: characteristic.name().to_string(),
            value: String::new(),
            all_separator_prefix: false,
        }
    }

    /// Start an expression from raw text.
    ///
    /// The first whitespace-delimited word becomes the key; the remaining
    /// words are rejoined with `_` as the value. Whether the text begins
    /// with separators only is recorded for the all-separator edge case in
    /// [`render`](Self::render).
    pub fn from_raw(text: &str) -> Self {
        let all_separator_prefix = !text.is_empty() && text.chars().all(is_separator);
        let mut words = text.split_whitespace();
        let key = words.next().unwrap_or_default().to_string();
        let value = words.collect::<Vec<_>>().join("_");
        Self {
            key,
            value,
            all_separator_prefix,
        }
    }

    pub fn width() -> Self {
        Self::from_characteristic(Characteristic::Width)
    }

    pub fn height() -> Self {
        Self::from_characteristic(Characteristic::Height)
    }

    pub fn initial_width() -> Self {
        Self::from_characteristic(Characteristic::InitialWidth)
    }

    pub fn initial_height() -> Self {
        Self::from_characteristic(Characteristic::InitialHeight)
    }

    pub fn aspect_ratio() -> Self {
        Self::from_characteristic(Characteristic::AspectRatio)
    }

    pub fn initial_aspect_ratio() -> Self {
        Self::from_characteristic(Characteristic::InitialAspectRatio)
    }

    pub fn page_count() -> Self {
        Self::from_characteristic(Characteristic::PageCount)
    }

    pub fn face_count() -> Self {
        Self::from_characteristic(Characteristic::FaceCount)
    }

    pub fn tags() -> Self {
        Self::from_characteristic(Characteristic::Tags)
    }

    pub fn page_x() -> Self {
        Self::from_characteristic(Characteristic::PageX)
    }

    pub fn page_y() -> Self {
        Self::from_characteristic(Characteristic::PageY)
    }

    pub fn current_page() -> Self {
        Self::from_characteristic(Characteristic::CurrentPage)
    }

    pub fn illustration_score() -> Self {
        Self::from_characteristic(Characteristic::IllustrationScore)
    }

    pub fn duration() -> Self {
        Self::from_characteristic(Characteristic::Duration)
    }

    pub fn initial_duration() -> Self {
        Self::from_characteristic(Characteristic::InitialDuration)
    }

    /// The accumulated key (long spelling; canonicalized at render time).
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The accumulated value chain (canonicalized at render time).
    pub fn value(&self) -> &str {
        &self.value
    }

    pub(crate) fn set_key(&mut self, key: String) {
        self.key = key;
    }

    pub(crate) fn set_value(&mut self, value: String) {
        self.value = value;
    }

    /// Append an operator and optional operand to the value chain, with a
    /// leading separator when the chain is non-empty.
    pub fn append_operator(mut self, operator: Operator, operand: Option<&str>) -> Self {
        if !self.value.is_empty() {
            self.value.push('_');
        }
        self.value.push_str(operator.short_token());
        if let Some(operand) = operand {
            self.value.push('_');
            self.value.push_str(operand);
        }
        self
    }

    /// Append raw text (an operand, a short token, or a pre-rendered
    /// fragment) to the value chain with a leading separator when the chain
    /// is non-empty.
    pub fn append_value(mut self, text: &str) -> Self {
        if !self.value.is_empty() && !text.is_empty() {
            self.value.push('_');
        }
        self.value.push_str(text);
        self
    }

    pub fn add(self, operand: impl ToString) -> Self {
        self.append_operator(Operator::Add, Some(&operand.to_string()))
    }

    pub fn subtract(self, operand: impl ToString) -> Self {
        self.append_operator(Operator::Subtract, Some(&operand.to_string()))
    }

    pub fn multiply(self, operand: impl ToString) -> Self {
        self.append_operator(Operator::Multiply, Some(&operand.to_string()))
    }

    pub fn divide(self, operand: impl ToString) -> Self {
        self.append_operator(Operator::Divide, Some(&operand.to_string()))
    }

    pub fn power(self, operand: impl ToString) -> Self {
        self.append_operator(Operator::Power, Some(&operand.to_string()))
    }

    /// Canonicalize to the compact wire form.
    ///
    /// With an empty key the result is `"_"` when the original raw text was
    /// separators only, else `""`. Otherwise the result is the canonical key
    /// alone, or `key_value` when the value chain is non-empty.
    pub fn render(&self) -> String {
        if self.key.is_empty() {
            return if self.all_separator_prefix {
                "_".to_string()
            } else {
                String::new()
            };
        }
        let key = canonicalize(&self.key);
        let value = canonicalize(&self.value);
        if value.is_empty() {
            key
        } else {
            format!("{}_{}", key, value)
        }
    }

    /// The canonical `(key, value)` pair, only when both are non-empty.
    /// A key-only parameter is never emitted this way.
    pub fn as_param_pair(&self) -> Option<(String, String)> {
        let key = canonicalize(&self.key);
        let value = canonicalize(&self.value);
        if key.is_empty() || value.is_empty() {
            None
        } else {
            Some((key, value))
        }
    }
}
