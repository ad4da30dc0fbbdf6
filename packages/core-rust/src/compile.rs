//! Constraint compiler: turns a valid [`Field`] into a [`FieldValidator`].
//!
//! Checking happens in three steps: the presence policy handles the "not
//! provided" state, the value is coerced to its [`ValueKind`] (a mismatch is
//! reported alone), then every rule runs and all failures are reported.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::field::Field;
use crate::literal::number_value;
use crate::rules::{FieldRules, Presence, Rule, ValueKind};

/// Email address shape: dot-separated local part, `@`, dotted domain,
/// alphabetic TLD. ASCII classes only, so a browser `RegExp` built from the
/// same source accepts exactly the same addresses.
pub const EMAIL: &str = r"^[A-Za-z0-9_%+'-]+(?:\.[A-Za-z0-9_%+'-]+)*@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$";

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL).expect("built-in email pattern compiles"));

/// Decimal places beyond which step checks stop scaling.
const MAX_STEP_PRECISION: usize = 12;

/// Largest magnitude at which every integer is an exact `f64`.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Tolerance of the quotient test used when scaling cannot be exact.
const STEP_EPSILON: f64 = 1e-9;

/// Compile one structurally valid field.
#[must_use]
pub fn compile(field: &Field) -> FieldValidator {
    let rules = FieldRules::for_field(field);
    debug!(
        field = %field.id,
        field_type = %field.field_type(),
        rules = rules.rules.len(),
        "compiled field validator"
    );
    FieldValidator { rules }
}

/// Compile one field and render its validator as literal source.
#[must_use]
pub fn compile_with_source(field: &Field) -> (FieldValidator, String) {
    let validator = compile(field);
    let source = validator.to_source();
    (validator, source)
}

/// Runtime check for one field's submitted value.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValidator {
    rules: FieldRules,
}

impl FieldValidator {
    #[must_use]
    pub fn field_id(&self) -> &str {
        &self.rules.field_id
    }

    #[must_use]
    pub fn rules(&self) -> &FieldRules {
        &self.rules
    }

    /// Check a submitted value; `None` means the key was absent.
    ///
    /// On success returns the coerced value, or `None` when an optional
    /// field was not provided.
    ///
    /// # Errors
    ///
    /// Every message explaining why the value was rejected (at least one).
    pub fn check(&self, value: Option<&Value>) -> Result<Option<Value>, Vec<String>> {
        let rules = &self.rules;
        let value = match (value.filter(|v| !is_blank(v)), &rules.presence) {
            (Some(v), _) => v.clone(),
            (None, Presence::Optional) => return Ok(None),
            (None, Presence::Required { message }) => return Err(vec![message.clone()]),
            (None, Presence::Defaulted) => rules.value_kind.empty_value(),
        };

        let Some(value) = coerce(rules.value_kind, value) else {
            return Err(vec![rules.type_message.clone()]);
        };

        let mut failures: Vec<String> = Vec::new();
        for rule in &rules.rules {
            if !rule.accepts(&value) && !failures.iter().any(|m| m == rule.message()) {
                failures.push(rule.message().to_string());
            }
        }
        if failures.is_empty() {
            Ok(Some(value))
        } else {
            Err(failures)
        }
    }

    /// Whether `value` would be accepted.
    #[must_use]
    pub fn accepts(&self, value: Option<&Value>) -> bool {
        self.check(value).is_ok()
    }

    /// Literal `zod` source of an equivalent validator.
    #[must_use]
    pub fn to_source(&self) -> String {
        self.rules.to_zod()
    }
}

/// `null` and `""` mean "not provided", the same as an absent key.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn coerce(kind: ValueKind, value: Value) -> Option<Value> {
    match (kind, value) {
        (ValueKind::Text | ValueKind::Choice, v @ Value::String(_))
        | (ValueKind::Boolean, v @ Value::Bool(_))
        | (ValueKind::MultiChoice, v @ Value::Array(_))
        | (ValueKind::Number, v @ Value::Number(_)) => Some(v),
        (ValueKind::Number, Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(number_value),
        _ => None,
    }
}

impl Rule {
    /// Whether a coerced value satisfies this rule.
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Rule::MinLength { min, .. } => value.as_str().is_some_and(|s| utf16_len(s) >= *min),
            Rule::MaxLength { max, .. } => value.as_str().is_some_and(|s| utf16_len(s) <= *max),
            Rule::Email { .. } => value.as_str().is_some_and(|s| EMAIL_REGEX.is_match(s)),
            Rule::Pattern { pattern, .. } => value.as_str().is_some_and(|s| pattern.is_match(s)),
            Rule::Min { min, .. } => value.as_f64().is_some_and(|n| n >= *min),
            Rule::Max { max, .. } => value.as_f64().is_some_and(|n| n <= *max),
            Rule::MultipleOf { step, .. } => {
                value.as_f64().is_some_and(|n| is_multiple_of(n, *step))
            }
            Rule::OneOf { values, .. } => value
                .as_str()
                .is_some_and(|s| values.iter().any(|v| v == s)),
            Rule::EachOneOf { values, .. } => value.as_array().is_some_and(|items| {
                items.iter().all(|item| {
                    item.as_str()
                        .is_some_and(|s| values.iter().any(|v| v == s))
                })
            }),
            Rule::NonEmpty { .. } => value.as_array().is_some_and(|items| !items.is_empty()),
            Rule::IsTrue { .. } => value.as_bool() == Some(true),
        }
    }
}

/// Length in UTF-16 code units, the unit a browser's `String.length` counts.
fn utf16_len(s: &str) -> u64 {
    s.encode_utf16().count() as u64
}

/// Exact decimal multiple test: both operands are scaled to integers by the
/// larger number of decimal places before taking the remainder, so
/// `0.3` is a multiple of `0.1`.
///
/// Operands with more than [`MAX_STEP_PRECISION`] places, or too large to
/// scale exactly, fall back to checking that `value / step` is within a
/// relative epsilon of an integer.
#[allow(clippy::float_cmp)]
fn is_multiple_of(value: f64, step: f64) -> bool {
    if step <= 0.0 {
        return false;
    }
    let places = decimal_places(value).max(decimal_places(step));
    if places <= MAX_STEP_PRECISION {
        let scale = 10f64.powi(i32::try_from(places).unwrap_or(0));
        let scaled_value = (value * scale).round();
        let scaled_step = (step * scale).round();
        if scaled_step != 0.0 && scaled_value.abs() <= MAX_EXACT_INTEGER {
            return scaled_value % scaled_step == 0.0;
        }
    }
    let quotient = value / step;
    (quotient - quotient.round()).abs() <= STEP_EPSILON * quotient.abs().max(1.0)
}

fn decimal_places(n: f64) -> usize {
    let text = n.to_string();
    text.split_once('.').map_or(0, |(_, fraction)| fraction.len())
}
