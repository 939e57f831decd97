//! Condition predicates for conditional transformations
//!
//! Two independent dialects produce the `if_...` predicate a stage consumes:
//!
//! - [`ConditionExpression`] is the structured dialect built on
//!   [`Expression`]: comparison and boolean combinators with full
//!   canonicalization (long spellings and operator symbols become short
//!   tokens at render time).
//! - [`Condition`] is the flat dialect: literal underscore-joined strings
//!   with no canonicalization pass at all. Callers must already use short
//!   tokens.
//!
//! The dialects share nothing but the `if_` prefix convention and are kept
//! deliberately separate.

use crate::expression::Expression;
use crate::transformation::{Param, Transformation};
use crate::vocab::{Characteristic, Operator};

/// Structured condition builder over [`Expression`].
///
/// # Example
///
/// ```
/// use mediatx::condition::ConditionExpression;
///
/// let t = ConditionExpression::width()
///     .greater(500)
///     .and()
///     .aspect_ratio()
///     .less("1.0")
///     .then()
///     .width(300)
///     .crop("scale");
/// assert_eq!(t.render().unwrap(), "c_scale,if_w_gt_500_and_ar_lt_1.0,w_300");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConditionExpression {
    expr: Expression,
}

impl ConditionExpression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from raw text (`"width > 500"`); canonicalized at render time.
    pub fn from_raw(text: &str) -> Self {
        Self {
            expr: Expression::from_raw(text),
        }
    }

    pub fn from_characteristic(characteristic: Characteristic) -> Self {
        Self {
            expr: Expression::from_characteristic(characteristic),
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

    pub fn initial_aspect_ratio() -> Self {
        Self::from_characteristic(Characteristic::InitialAspectRatio)
    }

    pub fn page_count() -> Self {
        Self::from_characteristic(Characteristic::PageCount)
    }

    pub fn current_page() -> Self {
        Self::from_characteristic(Characteristic::CurrentPage)
    }

    pub fn page_x() -> Self {
        Self::from_characteristic(Characteristic::PageX)
    }

    pub fn page_y() -> Self {
        Self::from_characteristic(Characteristic::PageY)
    }

    pub fn illustration_score() -> Self {
        Self::from_characteristic(Characteristic::IllustrationScore)
    }

    pub fn initial_duration() -> Self {
        Self::from_characteristic(Characteristic::InitialDuration)
    }

    /// Append a characteristic to the predicate under construction. The
    /// associated constructors above start a fresh predicate instead.
    pub fn characteristic(self, characteristic: Characteristic) -> Self {
        self.value(characteristic.name())
    }

    pub fn aspect_ratio(self) -> Self {
        self.characteristic(Characteristic::AspectRatio)
    }

    pub fn face_count(self) -> Self {
        self.characteristic(Characteristic::FaceCount)
    }

    pub fn duration(self) -> Self {
        self.characteristic(Characteristic::Duration)
    }

    pub fn tags(self) -> Self {
        self.characteristic(Characteristic::Tags)
    }

    /// Append the boolean AND combinator.
    pub fn and(self) -> Self {
        self.boolean(Operator::And, None)
    }

    /// Append the boolean AND combinator followed by an operand.
    pub fn and_value(self, operand: impl ToString) -> Self {
        self.boolean(Operator::And, Some(operand.to_string()))
    }

    /// Append the boolean OR combinator.
    pub fn or(self) -> Self {
        self.boolean(Operator::Or, None)
    }

    /// Append the boolean OR combinator followed by an operand.
    pub fn or_value(self, operand: impl ToString) -> Self {
        self.boolean(Operator::Or, Some(operand.to_string()))
    }

    fn boolean(mut self, operator: Operator, operand: Option<String>) -> Self {
        self.expr = self.expr.append_operator(operator, operand.as_deref());
        self
    }

    fn comparison(mut self, operator: Operator, to: impl ToString) -> Self {
        self.expr = self
            .expr
            .append_operator(operator, Some(&to.to_string()));
        self
    }

    pub fn equal(self, to: impl ToString) -> Self {
        self.comparison(Operator::Equal, to)
    }

    pub fn not_equal(self, to: impl ToString) -> Self {
        self.comparison(Operator::NotEqual, to)
    }

    pub fn less(self, to: impl ToString) -> Self {
        self.comparison(Operator::LessThan, to)
    }

    pub fn greater(self, to: impl ToString) -> Self {
        self.comparison(Operator::GreaterThan, to)
    }

    pub fn less_or_equal(self, to: impl ToString) -> Self {
        self.comparison(Operator::LessOrEqual, to)
    }

    pub fn greater_or_equal(self, to: impl ToString) -> Self {
        self.comparison(Operator::GreaterOrEqual, to)
    }

    /// Append the `in` membership operator. A no-op when `expr` is empty.
    pub fn inside(self, expr: &str) -> Self {
        if expr.is_empty() {
            return self;
        }
        self.comparison(Operator::In, expr)
    }

    /// Append the `nin` membership operator. A no-op when `expr` is empty.
    pub fn not_inside(self, expr: &str) -> Self {
        if expr.is_empty() {
            return self;
        }
        self.comparison(Operator::NotIn, expr)
    }

    /// Merge another expression or raw string into the predicate.
    ///
    /// When the incoming text carries its own key and the receiver has none,
    /// the incoming key and value are copied wholesale. When neither side
    /// has a key, the whole incoming text becomes the receiver's key.
    /// Otherwise the incoming text (rendered) is appended to the receiver's
    /// value chain.
    pub fn value(mut self, text: impl ToString) -> Self {
        let text = text.to_string();
        let incoming = Expression::from_raw(&text);
        if !incoming.key().is_empty() && self.expr.key().is_empty() {
            self.expr.set_key(incoming.key().to_string());
            self.expr.set_value(incoming.value().to_string());
        } else if incoming.key().is_empty() && self.expr.key().is_empty() {
            self.expr.set_key(text);
        } else {
            let rendered = incoming.render();
            self.expr = self.expr.append_value(&rendered);
        }
        self
    }

    /// The canonical predicate text, without the `if_` prefix.
    pub fn render(&self) -> String {
        self.expr.render()
    }

    /// Finalize: start a [`Transformation`] whose current stage carries this
    /// predicate as its `if` parameter (serialized with the `if_` prefix).
    pub fn then(self) -> Transformation {
        Transformation::new().set(Param::If, self.render())
    }

    /// Attach the predicate to an existing transformation's current stage.
    pub fn then_on(self, transformation: Transformation) -> Transformation {
        transformation.set(Param::If, self.render())
    }
}

impl From<Expression> for ConditionExpression {
    fn from(expr: Expression) -> Self {
        Self { expr }
    }
}

/// Flat condition builder: literal underscore-joined predicate strings.
///
/// No canonicalization is applied; callers supply short tokens directly.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Condition {
    predicate: String,
}

impl Condition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the predicate to `"{characteristic}_{op}_{value}"`.
    pub fn set_condition(mut self, characteristic: &str, op: &str, value: impl ToString) -> Self {
        self.predicate = format!("{}_{}_{}", characteristic, op, value.to_string());
        self
    }

    /// Set the predicate to a tag membership test:
    /// `"if_!t1:t2!_{op}_tags"`.
    pub fn set_tags(mut self, tags: &[&str], op: &str) -> Self {
        self.predicate = format!("if_!{}!_{}_tags", tags.join(":"), op);
        self
    }

    /// Append `"_and_{text}"`.
    pub fn and(mut self, text: &str) -> Self {
        self.predicate.push_str("_and_");
        self.predicate.push_str(text);
        self
    }

    /// Append `"_or_{text}"`.
    pub fn or(mut self, text: &str) -> Self {
        self.predicate.push_str("_or_");
        self.predicate.push_str(text);
        self
    }

    /// The accumulated predicate string, exactly as built.
    pub fn render(&self) -> String {
        self.predicate.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comparison() {
        let cond = ConditionExpression::width().greater(500);
        assert_eq!(cond.render(), "w_gt_500");
    }

    #[test]
    fn test_boolean_combinators() {
        let cond = ConditionExpression::width()
            .greater_or_equal(400)
            .and()
            .value("faceCount")
            .not_equal(0);
        assert_eq!(cond.render(), "w_gte_400_and_fc_ne_0");
    }

    #[test]
    fn test_or_with_operand() {
        let cond = ConditionExpression::page_count()
            .greater(2)
            .or_value("faceCount = 0");
        assert_eq!(cond.render(), "pc_gt_2_or_fc_eq_0");
    }

    #[test]
    fn test_characteristic_append_methods() {
        let cond = ConditionExpression::width()
            .less(1000)
            .and()
            .aspect_ratio()
            .greater("1.5");
        assert_eq!(cond.render(), "w_lt_1000_and_ar_gt_1.5");
    }

    #[test]
    fn test_inside_and_not_inside() {
        let cond = ConditionExpression::from_raw("tags").inside("sale");
        assert_eq!(cond.render(), "tags_in_sale");
        let cond = ConditionExpression::from_raw("tags").not_inside("archive");
        assert_eq!(cond.render(), "tags_nin_archive");
    }

    #[test]
    fn test_inside_empty_operand_is_noop() {
        let cond = ConditionExpression::width().greater(10).inside("");
        assert_eq!(cond.render(), "w_gt_10");
        let cond = ConditionExpression::width().greater(10).not_inside("");
        assert_eq!(cond.render(), "w_gt_10");
    }

    #[test]
    fn test_value_copies_key_into_empty_receiver() {
        let cond = ConditionExpression::new().value("width > 200");
        assert_eq!(cond.render(), "w_gt_200");
    }

    #[test]
    fn test_value_appends_when_receiver_has_key() {
        let cond = ConditionExpression::width().greater(10).and().value("height > 20");
        assert_eq!(cond.render(), "w_gt_10_and_h_gt_20");
    }

    #[test]
    fn test_then_sets_if_param() {
        let t = ConditionExpression::width().less(200).then().crop("fill");
        assert_eq!(t.render().unwrap(), "c_fill,if_w_lt_200");
    }

    #[test]
    fn test_flat_set_condition() {
        let cond = Condition::new().set_condition("w", "lt", 200);
        assert_eq!(cond.render(), "w_lt_200");
    }

    #[test]
    fn test_flat_set_tags() {
        let cond = Condition::new().set_tags(&["sale", "new"], "in");
        assert_eq!(cond.render(), "if_!sale:new!_in_tags");
    }

    #[test]
    fn test_flat_combinators_append_literally() {
        let cond = Condition::new()
            .set_condition("w", "gt", 100)
            .and("h_gt_200")
            .or("ar_lt_1");
        assert_eq!(cond.render(), "w_gt_100_and_h_gt_200_or_ar_lt_1");
    }

    #[test]
    fn test_flat_dialect_never_canonicalizes() {
        let cond = Condition::new().set_condition("width", ">", 100);
        assert_eq!(cond.render(), "width_>_100");
    }
}
