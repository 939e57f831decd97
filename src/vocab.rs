//! Wire vocabulary: long/short spellings of asset characteristics and
//! expression operators
//!
//! The tables here are closed and exhaustive. Short codes are stable wire
//! identifiers and are never renamed once shipped. Characteristics with two
//! public spellings (snake_case and camelCase) reduce to the same short
//! token.

/// A named, queryable property of the source asset, usable inside
/// expressions and conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Characteristic {
    Width,
    Height,
    InitialWidth,
    InitialHeight,
    AspectRatio,
    InitialAspectRatio,
    PageCount,
    FaceCount,
    Tags,
    PageX,
    PageY,
    CurrentPage,
    IllustrationScore,
    Duration,
    InitialDuration,
}

impl Characteristic {
    /// The canonical long spelling (camelCase, as accepted in raw input).
    pub fn name(&self) -> &'static str {
        match self {
            Characteristic::Width => "width",
            Characteristic::Height => "height",
            Characteristic::InitialWidth => "initialWidth",
            Characteristic::InitialHeight => "initialHeight",
            Characteristic::AspectRatio => "aspectRatio",
            Characteristic::InitialAspectRatio => "initialAspectRatio",
            Characteristic::PageCount => "pageCount",
            Characteristic::FaceCount => "faceCount",
            Characteristic::Tags => "tags",
            Characteristic::PageX => "pageX",
            Characteristic::PageY => "pageY",
            Characteristic::CurrentPage => "currentPage",
            Characteristic::IllustrationScore => "illustrationScore",
            Characteristic::Duration => "duration",
            Characteristic::InitialDuration => "initialDuration",
        }
    }

    /// The compact wire token.
    pub fn short_token(&self) -> &'static str {
        match self {
            Characteristic::Width => "w",
            Characteristic::Height => "h",
            Characteristic::InitialWidth => "iw",
            Characteristic::InitialHeight => "ih",
            Characteristic::AspectRatio => "ar",
            Characteristic::InitialAspectRatio => "iar",
            Characteristic::PageCount => "pc",
            Characteristic::FaceCount => "fc",
            Characteristic::Tags => "tags",
            Characteristic::PageX => "px",
            Characteristic::PageY => "py",
            Characteristic::CurrentPage => "cp",
            Characteristic::IllustrationScore => "ils",
            Characteristic::Duration => "du",
            Characteristic::InitialDuration => "idu",
        }
    }
}

/// An expression operator: boolean, arithmetic, or comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    And,
    Or,
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    Equal,
    NotEqual,
    LessThan,
    GreaterThan,
    LessOrEqual,
    GreaterOrEqual,
    In,
    NotIn,
}

impl Operator {
    /// The symbolic spelling accepted in raw input (`&&`, `>=`, `+`, ...).
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::And => "&&",
            Operator::Or => "||",
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::Power => "^",
            Operator::Equal => "=",
            Operator::NotEqual => "!=",
            Operator::LessThan => "<",
            Operator::GreaterThan => ">",
            Operator::LessOrEqual => "<=",
            Operator::GreaterOrEqual => ">=",
            Operator::In => "in",
            Operator::NotIn => "notInside",
        }
    }

    /// The compact wire token.
    pub fn short_token(&self) -> &'static str {
        match self {
            Operator::And => "and",
            Operator::Or => "or",
            Operator::Add => "add",
            Operator::Subtract => "sub",
            Operator::Multiply => "mul",
            Operator::Divide => "div",
            Operator::Power => "pow",
            Operator::Equal => "eq",
            Operator::NotEqual => "ne",
            Operator::LessThan => "lt",
            Operator::GreaterThan => "gt",
            Operator::LessOrEqual => "lte",
            Operator::GreaterOrEqual => "gte",
            Operator::In => "in",
            Operator::NotIn => "nin",
        }
    }
}

/// Every substitutable spelling paired with its short token, longest spelling
/// first so that a scan never matches `width` inside `initial_width`, or `>`
/// where `>=` applies.
///
/// Covers both public spellings of each characteristic plus every operator
/// symbol. Canonicalization (see `expression::canonicalize`) matches these
/// against whole separator-delimited words only.
pub const SUBSTITUTIONS: &[(&str, &str)] = &[
    ("initialAspectRatio", "iar"),
    ("initial_aspect_ratio", "iar"),
    ("illustrationScore", "ils"),
    ("illustration_score", "ils"),
    ("initialDuration", "idu"),
    ("initial_duration", "idu"),
    ("initialHeight", "ih"),
    ("initial_height", "ih"),
    ("initialWidth", "iw"),
    ("initial_width", "iw"),
    ("aspectRatio", "ar"),
    ("aspect_ratio", "ar"),
    ("currentPage", "cp"),
    ("current_page", "cp"),
    ("pageCount", "pc"),
    ("page_count", "pc"),
    ("faceCount", "fc"),
    ("face_count", "fc"),
    ("notInside", "nin"),
    ("duration", "du"),
    ("height", "h"),
    ("width", "w"),
    ("pageX", "px"),
    ("page_x", "px"),
    ("pageY", "py"),
    ("page_y", "py"),
    ("tags", "tags"),
    ("&&", "and"),
    ("||", "or"),
    ("<=", "lte"),
    (">=", "gte"),
    ("!=", "ne"),
    ("in", "in"),
    ("=", "eq"),
    ("<", "lt"),
    (">", "gt"),
    ("+", "add"),
    ("-", "sub"),
    ("*", "mul"),
    ("/", "div"),
    ("^", "pow"),
];

/// Look up the short token for a whole word (a long characteristic spelling
/// or an operator symbol). Returns `None` for anything else.
pub fn short_for(word: &str) -> Option<&'static str> {
    SUBSTITUTIONS
        .iter()
        .find(|(long, _)| *long == word)
        .map(|(_, short)| *short)
}
