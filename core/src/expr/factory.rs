//! The expression construction vocabulary.
//!
//! [`ExpressionFactory`] exposes one constructor per operation in the fixed
//! vocabulary; [`ExpressionOp`] is the same vocabulary as data, with the
//! string boundary (`FromStr`/`Display`) rejecting anything outside it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CriteriaError;
use crate::expr::{Expression, PropertyPath};

/// An operation name from the fixed expression vocabulary.
///
/// Parsing an unknown name fails with
/// [`CriteriaError::UndefinedOperation`]:
///
/// ```
/// use criteria_core::expr::ExpressionOp;
///
/// assert_eq!("startsWith".parse(), Ok(ExpressionOp::StartsWith));
/// assert!("bogusOp".parse::<ExpressionOp>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExpressionOp {
    And,
    Or,
    Not,
    #[serde(rename = "true")]
    AlwaysTrue,
    #[serde(rename = "false")]
    AlwaysFalse,
    Equals,
    NotEquals,
    Same,
    NotSame,
    GreaterThan,
    GreaterThanEqual,
    LessThan,
    LessThanEqual,
    In,
    Matches,
    StartsWith,
    EndsWith,
    Contains,
    Null,
    NotNull,
    IsEmpty,
    NotEmpty,
    IsInstanceOf,
    KeyExists,
    KeyNotExists,
    Key,
    Property,
    Method,
    All,
    AtLeast,
    AtMost,
    Exactly,
    Count,
}

impl ExpressionOp {
    /// Every operation in the vocabulary, in declaration order.
    pub const ALL: [ExpressionOp; 33] = [
        ExpressionOp::And,
        ExpressionOp::Or,
        ExpressionOp::Not,
        ExpressionOp::AlwaysTrue,
        ExpressionOp::AlwaysFalse,
        ExpressionOp::Equals,
        ExpressionOp::NotEquals,
        ExpressionOp::Same,
        ExpressionOp::NotSame,
        ExpressionOp::GreaterThan,
        ExpressionOp::GreaterThanEqual,
        ExpressionOp::LessThan,
        ExpressionOp::LessThanEqual,
        ExpressionOp::In,
        ExpressionOp::Matches,
        ExpressionOp::StartsWith,
        ExpressionOp::EndsWith,
        ExpressionOp::Contains,
        ExpressionOp::Null,
        ExpressionOp::NotNull,
        ExpressionOp::IsEmpty,
        ExpressionOp::NotEmpty,
        ExpressionOp::IsInstanceOf,
        ExpressionOp::KeyExists,
        ExpressionOp::KeyNotExists,
        ExpressionOp::Key,
        ExpressionOp::Property,
        ExpressionOp::Method,
        ExpressionOp::All,
        ExpressionOp::AtLeast,
        ExpressionOp::AtMost,
        ExpressionOp::Exactly,
        ExpressionOp::Count,
    ];

    /// The camelCase wire name of this operation.
    pub const fn as_str(self) -> &'static str {
        match self {
            ExpressionOp::And => "and",
            ExpressionOp::Or => "or",
            ExpressionOp::Not => "not",
            ExpressionOp::AlwaysTrue => "true",
            ExpressionOp::AlwaysFalse => "false",
            ExpressionOp::Equals => "equals",
            ExpressionOp::NotEquals => "notEquals",
            ExpressionOp::Same => "same",
            ExpressionOp::NotSame => "notSame",
            ExpressionOp::GreaterThan => "greaterThan",
            ExpressionOp::GreaterThanEqual => "greaterThanEqual",
            ExpressionOp::LessThan => "lessThan",
            ExpressionOp::LessThanEqual => "lessThanEqual",
            ExpressionOp::In => "in",
            ExpressionOp::Matches => "matches",
            ExpressionOp::StartsWith => "startsWith",
            ExpressionOp::EndsWith => "endsWith",
            ExpressionOp::Contains => "contains",
            ExpressionOp::Null => "null",
            ExpressionOp::NotNull => "notNull",
            ExpressionOp::IsEmpty => "isEmpty",
            ExpressionOp::NotEmpty => "notEmpty",
            ExpressionOp::IsInstanceOf => "isInstanceOf",
            ExpressionOp::KeyExists => "keyExists",
            ExpressionOp::KeyNotExists => "keyNotExists",
            ExpressionOp::Key => "key",
            ExpressionOp::Property => "property",
            ExpressionOp::Method => "method",
            ExpressionOp::All => "all",
            ExpressionOp::AtLeast => "atLeast",
            ExpressionOp::AtMost => "atMost",
            ExpressionOp::Exactly => "exactly",
            ExpressionOp::Count => "count",
        }
    }
}

impl FromStr for ExpressionOp {
    type Err = CriteriaError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        ExpressionOp::ALL
            .into_iter()
            .find(|op| op.as_str() == name)
            .ok_or_else(|| CriteriaError::UndefinedOperation(name.to_string()))
    }
}

impl fmt::Display for ExpressionOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Constructors for the whole expression vocabulary.
///
/// ```
/// use criteria_core::expr::ExpressionFactory;
/// use serde_json::json;
///
/// let expr = ExpressionFactory::new();
/// let condition = expr.property("author.name", expr.equals("Frank Herbert"))?;
/// assert!(condition.evaluate(&json!({"author": {"name": "Frank Herbert"}})));
/// # Ok::<(), criteria_core::CriteriaError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpressionFactory;

impl ExpressionFactory {
    pub const fn new() -> Self {
        ExpressionFactory
    }

    /// Conjunction of the given expressions. Empty input is always true.
    pub fn and(&self, exprs: impl IntoIterator<Item = Expression>) -> Expression {
        Expression::And(exprs.into_iter().collect())
    }

    /// Disjunction of the given expressions. Empty input is always false.
    pub fn or(&self, exprs: impl IntoIterator<Item = Expression>) -> Expression {
        Expression::Or(exprs.into_iter().collect())
    }

    pub fn not(&self, expr: Expression) -> Expression {
        Expression::Not(Box::new(expr))
    }

    /// The expression that matches everything.
    pub fn r#true(&self) -> Expression {
        Expression::AlwaysTrue
    }

    /// The expression that matches nothing.
    pub fn r#false(&self) -> Expression {
        Expression::AlwaysFalse
    }

    /// Loose equality: `1` equals `1.0`.
    pub fn equals(&self, value: impl Into<Value>) -> Expression {
        Expression::Equals(value.into())
    }

    pub fn not_equals(&self, value: impl Into<Value>) -> Expression {
        Expression::NotEquals(value.into())
    }

    /// Strict equality on the JSON representation.
    pub fn same(&self, value: impl Into<Value>) -> Expression {
        Expression::Same(value.into())
    }

    pub fn not_same(&self, value: impl Into<Value>) -> Expression {
        Expression::NotSame(value.into())
    }

    pub fn greater_than(&self, value: impl Into<Value>) -> Expression {
        Expression::GreaterThan(value.into())
    }

    pub fn greater_than_equal(&self, value: impl Into<Value>) -> Expression {
        Expression::GreaterThanEqual(value.into())
    }

    pub fn less_than(&self, value: impl Into<Value>) -> Expression {
        Expression::LessThan(value.into())
    }

    pub fn less_than_equal(&self, value: impl Into<Value>) -> Expression {
        Expression::LessThanEqual(value.into())
    }

    /// Membership in the given value list (strict comparison).
    pub fn r#in(&self, values: impl IntoIterator<Item = impl Into<Value>>) -> Expression {
        Expression::In(values.into_iter().map(Into::into).collect())
    }

    /// Regular-expression match on string subjects.
    ///
    /// Fails with [`CriteriaError::InvalidArgument`] if the pattern does not
    /// compile.
    pub fn matches(&self, pattern: impl Into<String>) -> crate::Result<Expression> {
        let pattern = pattern.into();
        regex::Regex::new(&pattern).map_err(|e| {
            CriteriaError::InvalidArgument(format!("invalid regex {pattern:?}: {e}"))
        })?;
        Ok(Expression::Matches(pattern))
    }

    pub fn starts_with(&self, prefix: impl Into<String>) -> Expression {
        Expression::StartsWith(prefix.into())
    }

    pub fn ends_with(&self, suffix: impl Into<String>) -> Expression {
        Expression::EndsWith(suffix.into())
    }

    /// Substring match on string subjects.
    pub fn contains(&self, needle: impl Into<String>) -> Expression {
        Expression::Contains(needle.into())
    }

    /// Shorthand for `same(null)`.
    pub fn null(&self) -> Expression {
        Expression::Same(Value::Null)
    }

    /// Shorthand for `notSame(null)`.
    pub fn not_null(&self) -> Expression {
        Expression::NotSame(Value::Null)
    }

    /// Null, empty string, empty array, empty object, or zero.
    pub fn is_empty(&self) -> Expression {
        Expression::IsEmpty
    }

    pub fn not_empty(&self) -> Expression {
        Expression::NotEmpty
    }

    /// JSON type check: `"null"`, `"bool"`, `"number"`, `"string"`,
    /// `"array"` or `"object"`.
    pub fn is_instance_of(&self, type_name: impl Into<String>) -> Expression {
        Expression::IsInstanceOf(type_name.into())
    }

    pub fn key_exists(&self, key: impl Into<String>) -> Expression {
        Expression::KeyExists(key.into())
    }

    pub fn key_not_exists(&self, key: impl Into<String>) -> Expression {
        Expression::KeyNotExists(key.into())
    }

    /// Selector: evaluate `expr` against the value under `key`.
    pub fn key(&self, key: impl Into<String>, expr: Expression) -> Expression {
        Expression::Key {
            key: key.into(),
            expr: Box::new(expr),
        }
    }

    /// Selector: evaluate `expr` against the value a property path resolves
    /// to. Fails with [`CriteriaError::InvalidArgument`] on a malformed path.
    pub fn property(&self, path: &str, expr: Expression) -> crate::Result<Expression> {
        Ok(self.property_path(path.parse()?, expr))
    }

    /// Selector over an already-parsed [`PropertyPath`].
    pub fn property_path(&self, path: PropertyPath, expr: Expression) -> Expression {
        Expression::Property {
            path,
            expr: Box::new(expr),
        }
    }

    /// Selector: evaluate `expr` against the member named `name`.
    ///
    /// Value subjects carry no callable methods, so the name resolves as a
    /// key on object subjects.
    pub fn method(&self, name: impl Into<String>, expr: Expression) -> Expression {
        Expression::Method {
            name: name.into(),
            expr: Box::new(expr),
        }
    }

    /// Every element of an array subject satisfies `expr`.
    pub fn all(&self, expr: Expression) -> Expression {
        Expression::All(Box::new(expr))
    }

    /// At least `count` elements of an array subject satisfy `expr`.
    pub fn at_least(&self, count: u64, expr: Expression) -> Expression {
        Expression::AtLeast {
            count,
            expr: Box::new(expr),
        }
    }

    /// At most `count` elements of an array subject satisfy `expr`.
    pub fn at_most(&self, count: u64, expr: Expression) -> Expression {
        Expression::AtMost {
            count,
            expr: Box::new(expr),
        }
    }

    /// Exactly `count` elements of an array subject satisfy `expr`.
    pub fn exactly(&self, count: u64, expr: Expression) -> Expression {
        Expression::Exactly {
            count,
            expr: Box::new(expr),
        }
    }

    /// Evaluate `expr` against the element count of the subject.
    pub fn count(&self, expr: Expression) -> Expression {
        Expression::Count(Box::new(expr))
    }
}
