//! User variable bindings (`$name_value`)
//!
//! A [`Variable`] pairs a `$name` with a scalar value or a `!a:b:c!`
//! collection. Names must match `$` + letter + alphanumerics; a bare
//! identifier gets the `$` prefix added for it. A name that still fails
//! validation makes the binding permanently invalid: it renders to empty
//! output and never panics or errors.

use std::sync::OnceLock;

use regex::Regex;

use crate::expression::canonicalize;

fn name_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\$[A-Za-z][A-Za-z0-9]*$").expect("name pattern is valid"))
}

/// A named user variable binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    name: String,
    value: String,
    valid: bool,
}

impl Variable {
    /// Bind a scalar value to a name.
    ///
    /// A value that itself looks like a variable reference (starts with `$`)
    /// is canonicalized like expression text; any other scalar is stored
    /// verbatim.
    pub fn new(name: &str, value: impl ToString) -> Self {
        let raw = value.to_string();
        let value = if raw.starts_with('$') {
            canonicalize(&raw)
        } else {
            raw
        };
        let (name, valid) = Self::coerce_name(name);
        Self { name, value, valid }
    }

    /// Bind a collection of values to a name. An empty collection produces
    /// an empty value; otherwise the values render as `!v1:v2:...:vn!`.
    pub fn with_values(name: &str, values: &[&str]) -> Self {
        let value = if values.is_empty() {
            String::new()
        } else {
            format!("!{}!", values.join(":"))
        };
        let (name, valid) = Self::coerce_name(name);
        Self { name, value, valid }
    }

    /// Add the `$` prefix when missing, then re-validate. A name that still
    /// fails the pattern stays as coerced but is marked invalid.
    fn coerce_name(name: &str) -> (String, bool) {
        let coerced = if name_pattern().is_match(name) {
            name.to_string()
        } else {
            format!("${}", name)
        };
        let valid = name_pattern().is_match(&coerced);
        (coerced, valid)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// `"{name}_{value}"`, or `""` when the name is invalid (fail-soft).
    pub fn render(&self) -> String {
        if !self.valid {
            return String::new();
        }
        format!("{}_{}", self.name, self.value)
    }

    /// The `(name, value)` pair, or `None` when the name is invalid.
    pub fn as_param_pair(&self) -> Option<(String, String)> {
        if !self.valid {
            return None;
        }
        Some((self.name.clone(), self.value.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_binding() {
        let var = Variable::new("xpos", "10");
        assert!(var.is_valid());
        assert_eq!(var.render(), "$xpos_10");
    }

    #[test]
    fn test_name_already_prefixed() {
        let var = Variable::new("$xpos", 10);
        assert_eq!(var.render(), "$xpos_10");
    }

    #[test]
    fn test_numeric_value() {
        let var = Variable::new("scale", 2.5);
        assert_eq!(var.render(), "$scale_2.5");
    }

    #[test]
    fn test_scalar_value_stored_verbatim() {
        // Only `$`-prefixed values go through canonicalization.
        let var = Variable::new("label", "width");
        assert_eq!(var.render(), "$label_width");
    }

    #[test]
    fn test_variable_reference_value_is_canonicalized() {
        let var = Variable::new("b", "$a  *  width");
        assert_eq!(var.render(), "$b_$a_mul_w");
    }

    #[test]
    fn test_collection_binding() {
        let var = Variable::with_values("list", &["one", "two", "three"]);
        assert_eq!(var.render(), "$list_!one:two:three!");
    }

    #[test]
    fn test_empty_collection() {
        let var = Variable::with_values("list", &[]);
        assert!(var.is_valid());
        assert_eq!(var.render(), "$list_");
    }

    #[test]
    fn test_invalid_name_renders_empty() {
        let var = Variable::new("$!bad", "10");
        assert!(!var.is_valid());
        assert_eq!(var.render(), "");
        assert_eq!(var.as_param_pair(), None);
    }

    #[test]
    fn test_name_with_underscore_is_invalid() {
        let var = Variable::new("snake_name", "1");
        assert!(!var.is_valid());
        assert_eq!(var.render(), "");
    }

    #[test]
    fn test_name_starting_with_digit_is_invalid() {
        let var = Variable::new("1abc", "1");
        assert!(!var.is_valid());
        assert_eq!(var.render(), "");
    }

    #[test]
    fn test_as_param_pair() {
        let var = Variable::new("w2", "100");
        assert_eq!(
            var.as_param_pair(),
            Some(("$w2".to_string(), "100".to_string()))
        );
    }
}
