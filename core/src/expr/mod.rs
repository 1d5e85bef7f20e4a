//! Boolean expression trees evaluated against `serde_json::Value` subjects.
//!
//! An [`Expression`] is plain data: it composes with `and`/`or`/`not`,
//! compares structurally via `PartialEq`, serializes under its operation
//! names, and evaluates in memory against any JSON value. Construction goes
//! through [`ExpressionFactory`] (the full vocabulary) or the combinators on
//! the type itself.

mod factory;
mod path;

pub use factory::{ExpressionFactory, ExpressionOp};
pub use path::{PathSegment, PropertyPath};

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A composable boolean condition over a JSON subject.
///
/// Pure predicates (`equals`, `matches`, ...) test the subject itself.
/// Selector variants (`key`, `property`, `method`, `all`, ...) derive a
/// sub-value or element set from the subject and evaluate a nested
/// expression against it; an unreachable selection evaluates to false.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Expression {
    #[serde(rename = "true")]
    AlwaysTrue,
    #[serde(rename = "false")]
    AlwaysFalse,
    And(Vec<Expression>),
    Or(Vec<Expression>),
    Not(Box<Expression>),

    Equals(Value),
    NotEquals(Value),
    Same(Value),
    NotSame(Value),
    GreaterThan(Value),
    GreaterThanEqual(Value),
    LessThan(Value),
    LessThanEqual(Value),
    In(Vec<Value>),
    Matches(String),
    StartsWith(String),
    EndsWith(String),
    Contains(String),

    IsEmpty,
    NotEmpty,
    IsInstanceOf(String),
    KeyExists(String),
    KeyNotExists(String),

    Key {
        key: String,
        expr: Box<Expression>,
    },
    Property {
        path: PropertyPath,
        expr: Box<Expression>,
    },
    Method {
        name: String,
        expr: Box<Expression>,
    },
    All(Box<Expression>),
    AtLeast {
        count: u64,
        expr: Box<Expression>,
    },
    AtMost {
        count: u64,
        expr: Box<Expression>,
    },
    Exactly {
        count: u64,
        expr: Box<Expression>,
    },
    Count(Box<Expression>),
}

impl Expression {
    /// Evaluate this expression against a subject.
    pub fn evaluate(&self, subject: &Value) -> bool {
        match self {
            Expression::AlwaysTrue => true,
            Expression::AlwaysFalse => false,
            Expression::And(exprs) => exprs.iter().all(|e| e.evaluate(subject)),
            Expression::Or(exprs) => exprs.iter().any(|e| e.evaluate(subject)),
            Expression::Not(expr) => !expr.evaluate(subject),

            Expression::Equals(value) => loose_eq(subject, value),
            Expression::NotEquals(value) => !loose_eq(subject, value),
            Expression::Same(value) => subject == value,
            Expression::NotSame(value) => subject != value,
            Expression::GreaterThan(value) => {
                compare_values(subject, value) == Some(Ordering::Greater)
            }
            Expression::GreaterThanEqual(value) => matches!(
                compare_values(subject, value),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Expression::LessThan(value) => compare_values(subject, value) == Some(Ordering::Less),
            Expression::LessThanEqual(value) => matches!(
                compare_values(subject, value),
                Some(Ordering::Less | Ordering::Equal)
            ),
            Expression::In(values) => values.contains(subject),
            Expression::Matches(pattern) => match subject {
                Value::String(s) => regex::Regex::new(pattern)
                    .map(|re| re.is_match(s))
                    .unwrap_or(false),
                _ => false,
            },
            Expression::StartsWith(prefix) => match subject {
                Value::String(s) => s.starts_with(prefix.as_str()),
                _ => false,
            },
            Expression::EndsWith(suffix) => match subject {
                Value::String(s) => s.ends_with(suffix.as_str()),
                _ => false,
            },
            Expression::Contains(needle) => match subject {
                Value::String(s) => s.contains(needle.as_str()),
                _ => false,
            },

            Expression::IsEmpty => is_empty_value(subject),
            Expression::NotEmpty => !is_empty_value(subject),
            Expression::IsInstanceOf(type_name) => json_type_name(subject) == type_name.as_str(),
            Expression::KeyExists(key) => lookup_key(subject, key).is_some(),
            Expression::KeyNotExists(key) => lookup_key(subject, key).is_none(),

            Expression::Key { key, expr } => match lookup_key(subject, key) {
                Some(value) => expr.evaluate(value),
                None => false,
            },
            Expression::Property { path, expr } => match path.resolve(subject) {
                Some(value) => expr.evaluate(value),
                None => false,
            },
            Expression::Method { name, expr } => match subject {
                Value::Object(map) => match map.get(name) {
                    Some(value) => expr.evaluate(value),
                    None => false,
                },
                _ => false,
            },

            Expression::All(expr) => match subject {
                Value::Array(items) => items.iter().all(|item| expr.evaluate(item)),
                _ => false,
            },
            Expression::AtLeast { count, expr } => match_count(subject, expr)
                .is_some_and(|matched| matched >= *count),
            Expression::AtMost { count, expr } => match_count(subject, expr)
                .is_some_and(|matched| matched <= *count),
            Expression::Exactly { count, expr } => match_count(subject, expr)
                .is_some_and(|matched| matched == *count),
            Expression::Count(expr) => match subject {
                Value::Array(items) => expr.evaluate(&Value::from(items.len() as u64)),
                Value::Object(map) => expr.evaluate(&Value::from(map.len() as u64)),
                _ => false,
            },
        }
    }

    /// The operation this node was built from.
    pub fn op(&self) -> ExpressionOp {
        match self {
            Expression::AlwaysTrue => ExpressionOp::AlwaysTrue,
            Expression::AlwaysFalse => ExpressionOp::AlwaysFalse,
            Expression::And(_) => ExpressionOp::And,
            Expression::Or(_) => ExpressionOp::Or,
            Expression::Not(_) => ExpressionOp::Not,
            Expression::Equals(_) => ExpressionOp::Equals,
            Expression::NotEquals(_) => ExpressionOp::NotEquals,
            Expression::Same(_) => ExpressionOp::Same,
            Expression::NotSame(_) => ExpressionOp::NotSame,
            Expression::GreaterThan(_) => ExpressionOp::GreaterThan,
            Expression::GreaterThanEqual(_) => ExpressionOp::GreaterThanEqual,
            Expression::LessThan(_) => ExpressionOp::LessThan,
            Expression::LessThanEqual(_) => ExpressionOp::LessThanEqual,
            Expression::In(_) => ExpressionOp::In,
            Expression::Matches(_) => ExpressionOp::Matches,
            Expression::StartsWith(_) => ExpressionOp::StartsWith,
            Expression::EndsWith(_) => ExpressionOp::EndsWith,
            Expression::Contains(_) => ExpressionOp::Contains,
            Expression::IsEmpty => ExpressionOp::IsEmpty,
            Expression::NotEmpty => ExpressionOp::NotEmpty,
            Expression::IsInstanceOf(_) => ExpressionOp::IsInstanceOf,
            Expression::KeyExists(_) => ExpressionOp::KeyExists,
            Expression::KeyNotExists(_) => ExpressionOp::KeyNotExists,
            Expression::Key { .. } => ExpressionOp::Key,
            Expression::Property { .. } => ExpressionOp::Property,
            Expression::Method { .. } => ExpressionOp::Method,
            Expression::All(_) => ExpressionOp::All,
            Expression::AtLeast { .. } => ExpressionOp::AtLeast,
            Expression::AtMost { .. } => ExpressionOp::AtMost,
            Expression::Exactly { .. } => ExpressionOp::Exactly,
            Expression::Count(_) => ExpressionOp::Count,
        }
    }

    /// Conjoin with another expression.
    ///
    /// Flattens nested conjunctions so `a.and(b).and(c)` stays a single
    /// three-clause `and`.
    pub fn and(self, other: Expression) -> Expression {
        match self {
            Expression::And(mut exprs) => {
                exprs.push(other);
                Expression::And(exprs)
            }
            expr => Expression::And(vec![expr, other]),
        }
    }

    /// Disjoin with another expression. Flattens like [`Expression::and`].
    pub fn or(self, other: Expression) -> Expression {
        match self {
            Expression::Or(mut exprs) => {
                exprs.push(other);
                Expression::Or(exprs)
            }
            expr => Expression::Or(vec![expr, other]),
        }
    }

    /// Negate this expression.
    pub fn negate(self) -> Expression {
        Expression::Not(Box::new(self))
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = self.op();
        match self {
            Expression::AlwaysTrue
            | Expression::AlwaysFalse
            | Expression::IsEmpty
            | Expression::NotEmpty => write!(f, "{op}()"),
            Expression::And(exprs) | Expression::Or(exprs) => {
                write!(f, "{op}(")?;
                for (i, expr) in exprs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{expr}")?;
                }
                write!(f, ")")
            }
            Expression::Not(expr)
            | Expression::All(expr)
            | Expression::Count(expr) => write!(f, "{op}({expr})"),
            Expression::Equals(value)
            | Expression::NotEquals(value)
            | Expression::Same(value)
            | Expression::NotSame(value)
            | Expression::GreaterThan(value)
            | Expression::GreaterThanEqual(value)
            | Expression::LessThan(value)
            | Expression::LessThanEqual(value) => write!(f, "{op}({value})"),
            Expression::In(values) => {
                write!(f, "{op}(")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{value}")?;
                }
                write!(f, ")")
            }
            Expression::Matches(s)
            | Expression::StartsWith(s)
            | Expression::EndsWith(s)
            | Expression::Contains(s)
            | Expression::IsInstanceOf(s)
            | Expression::KeyExists(s)
            | Expression::KeyNotExists(s) => write!(f, "{op}({s:?})"),
            Expression::Key { key, expr } => write!(f, "{op}({key:?}, {expr})"),
            Expression::Property { path, expr } => write!(f, "{op}(\"{path}\", {expr})"),
            Expression::Method { name, expr } => write!(f, "{op}({name:?}, {expr})"),
            Expression::AtLeast { count, expr }
            | Expression::AtMost { count, expr }
            | Expression::Exactly { count, expr } => write!(f, "{op}({count}, {expr})"),
        }
    }
}

/// Loose equality: numbers compare by numeric value across integer and
/// float representations, everything else strictly.
fn loose_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(fa), Some(fb)) => fa == fb,
            _ => a == b,
        },
        _ => left == right,
    }
}

/// Compare two JSON values, returning an ordering if the types are comparable.
///
/// Numbers compare as f64, strings lexicographically, booleans false < true.
/// Mismatched or unordered types return `None`.
fn compare_values(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Bool(_) => false,
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Key lookup on object subjects; numeric keys index into arrays.
fn lookup_key<'a>(subject: &'a Value, key: &str) -> Option<&'a Value> {
    match subject {
        Value::Object(map) => map.get(key),
        Value::Array(items) => items.get(key.parse::<usize>().ok()?),
        _ => None,
    }
}

/// Count array elements matching `expr`; `None` for non-array subjects.
fn match_count(subject: &Value, expr: &Expression) -> Option<u64> {
    match subject {
        Value::Array(items) => Some(items.iter().filter(|item| expr.evaluate(item)).count() as u64),
        _ => None,
    }
}
