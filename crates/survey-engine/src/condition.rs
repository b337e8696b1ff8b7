use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Comparison operators understood by rule conditions.
///
/// Unknown operator strings deserialize into [`Operator::Unknown`], which never matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Equals,
    NotEquals,
    Contains,
    NotContains,
    GreaterThan,
    LessThan,
    HasSelected,
    CountEq,
    CountGt,
    CountLt,
    #[serde(other)]
    Unknown,
}

impl Operator {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "equals" => Operator::Equals,
            "not_equals" => Operator::NotEquals,
            "contains" => Operator::Contains,
            "not_contains" => Operator::NotContains,
            "greater_than" => Operator::GreaterThan,
            "less_than" => Operator::LessThan,
            "has_selected" => Operator::HasSelected,
            "count_eq" => Operator::CountEq,
            "count_gt" => Operator::CountGt,
            "count_lt" => Operator::CountLt,
            _ => Operator::Unknown,
        }
    }
}

/// Ordinal values for smiley-rating answers so they compare against numeric thresholds.
const SMILEY_SCALE: [(&str, f64); 5] = [
    ("very_sad", 1.0),
    ("sad", 2.0),
    ("neutral", 3.0),
    ("happy", 4.0),
    ("very_happy", 5.0),
];

/// Evaluates `actual <operator> expected`.
///
/// `expected` is the author-entered value stored on the rule and `actual` is the
/// respondent's answer. The function is total: any input shape that cannot be
/// compared yields `false`.
pub fn evaluate(operator: Operator, expected: &Value, actual: &Value) -> bool {
    match operator {
        Operator::Equals | Operator::HasSelected => equals(expected, actual),
        Operator::NotEquals => !equals(expected, actual),
        Operator::Contains => contains(expected, actual),
        Operator::NotContains => !contains(expected, actual),
        Operator::GreaterThan => compare(expected, actual, |actual, expected| actual > expected),
        Operator::LessThan => compare(expected, actual, |actual, expected| actual < expected),
        Operator::CountEq => count(expected, actual, |len, expected| len == expected),
        Operator::CountGt => count(expected, actual, |len, expected| len > expected),
        Operator::CountLt => count(expected, actual, |len, expected| len < expected),
        Operator::Unknown => false,
    }
}

/// Attempts to read a value as a number, honouring the smiley ordinal table.
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64().filter(|n| n.is_finite()),
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return None;
            }
            let lowered = trimmed.to_lowercase();
            if let Some((_, ordinal)) = SMILEY_SCALE.iter().find(|(token, _)| *token == lowered) {
                return Some(*ordinal);
            }
            trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
        }
        _ => None,
    }
}

/// Trimmed, lowercased text form used for equality and containment.
pub fn normalize(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.trim().to_lowercase(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => match number.as_f64() {
            Some(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                format!("{}", n as i64)
            }
            _ => number.to_string(),
        },
        other => other.to_string().trim().to_lowercase(),
    }
}

fn equals(expected: &Value, actual: &Value) -> bool {
    match actual {
        Value::Array(items) => is_member(expected, items),
        _ => scalar_equals(expected, actual),
    }
}

fn scalar_equals(expected: &Value, actual: &Value) -> bool {
    match (coerce_number(expected), coerce_number(actual)) {
        (Some(expected), Some(actual)) => expected == actual,
        _ => normalize(expected) == normalize(actual),
    }
}

fn contains(expected: &Value, actual: &Value) -> bool {
    match actual {
        Value::Array(items) => is_member(expected, items),
        Value::Null => false,
        _ => normalize(actual).contains(&normalize(expected)),
    }
}

fn is_member(expected: &Value, items: &[Value]) -> bool {
    let needle = normalize(expected);
    items.iter().any(|item| normalize(item) == needle)
}

fn compare<F>(expected: &Value, actual: &Value, predicate: F) -> bool
where
    F: Fn(f64, f64) -> bool,
{
    match (coerce_number(actual), coerce_number(expected)) {
        (Some(actual), Some(expected)) => predicate(actual, expected),
        _ => false,
    }
}

fn count<F>(expected: &Value, actual: &Value, predicate: F) -> bool
where
    F: Fn(f64, f64) -> bool,
{
    let Some(expected) = coerce_number(expected) else {
        return false;
    };
    let len = actual.as_array().map_or(0, Vec::len);
    predicate(len as f64, expected)
}
