//! Declarative rule descriptors: what each field type accepts.
//!
//! [`FieldRules::for_field`] is the single per-type rule table. The executable
//! validator ([`crate::compile`]) and the literal source generator
//! ([`crate::codegen::zod`]) both consume its output and never consult the
//! field definition themselves, so the two cannot drift apart.

use serde_json::Value;

use crate::field::{
    ChoiceAttrs, Field, FieldKind, FieldType, LengthRules, NumericRules, Pattern, PatternRules,
};
use crate::messages;

/// Shape of a submitted value after coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// A string (`text`, `textarea`, `email`, `password`, `tel`).
    Text,
    /// A number; numeric strings are coerced (`number`, `range`).
    Number,
    /// A boolean (`checkbox`, `switch`).
    Boolean,
    /// One option value (`select`, `radio`).
    Choice,
    /// A list of option values (`checkbox-group`).
    MultiChoice,
}

impl ValueKind {
    /// Value substituted for "not provided" under [`Presence::Defaulted`].
    #[must_use]
    pub fn empty_value(self) -> Value {
        match self {
            ValueKind::Boolean => Value::Bool(false),
            ValueKind::MultiChoice => Value::Array(Vec::new()),
            ValueKind::Text | ValueKind::Choice => Value::String(String::new()),
            ValueKind::Number => Value::Null,
        }
    }
}

/// How a field treats the "not provided" state (absent key, `null`, or `""`).
#[derive(Debug, Clone, PartialEq)]
pub enum Presence {
    /// Not provided is accepted and the rules are skipped.
    Optional,
    /// Not provided is rejected with `message`.
    Required { message: String },
    /// Not provided becomes [`ValueKind::empty_value`] and the rules decide.
    /// Boolean and multi-choice fields fold required-ness into their rules.
    Defaulted,
}

/// One constraint on a coerced value.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    MinLength { min: u64, message: String },
    MaxLength { max: u64, message: String },
    Email { message: String },
    Pattern { pattern: Pattern, message: String },
    Min { min: f64, message: String },
    Max { max: f64, message: String },
    /// Exact decimal multiple of `step`.
    MultipleOf { step: f64, message: String },
    OneOf { values: Vec<String>, message: String },
    /// Every list element is one of `values`.
    EachOneOf { values: Vec<String>, message: String },
    /// The list has at least one element.
    NonEmpty { message: String },
    IsTrue { message: String },
}

impl Rule {
    /// Message reported when the rule rejects a value.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Rule::MinLength { message, .. }
            | Rule::MaxLength { message, .. }
            | Rule::Email { message }
            | Rule::Pattern { message, .. }
            | Rule::Min { message, .. }
            | Rule::Max { message, .. }
            | Rule::MultipleOf { message, .. }
            | Rule::OneOf { message, .. }
            | Rule::EachOneOf { message, .. }
            | Rule::NonEmpty { message }
            | Rule::IsTrue { message } => message,
        }
    }
}

/// Everything needed to check one field's submitted value.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRules {
    pub field_id: String,
    pub label: String,
    pub field_type: FieldType,
    pub value_kind: ValueKind,
    pub presence: Presence,
    /// Reported when the value has the wrong JSON type.
    pub type_message: String,
    /// Checked in order; every failing rule is reported.
    pub rules: Vec<Rule>,
}

impl FieldRules {
    /// Derive the rules of a structurally valid field.
    #[must_use]
    pub fn for_field(field: &Field) -> Self {
        let label = field.label.as_str();
        let required = field.is_required();
        let wrapped = || {
            if required {
                Presence::Required {
                    message: messages::required(label),
                }
            } else {
                Presence::Optional
            }
        };

        let (value_kind, presence, rules) = match &field.kind {
            FieldKind::Text(attrs) | FieldKind::Textarea(attrs) => (
                ValueKind::Text,
                wrapped(),
                length_rules(label, attrs.validation.as_ref()),
            ),
            FieldKind::Email(attrs) => (
                ValueKind::Text,
                wrapped(),
                email_rules(attrs.validation.as_ref()),
            ),
            FieldKind::Password(attrs) => (
                ValueKind::Text,
                wrapped(),
                password_rules(attrs.validation.as_ref()),
            ),
            FieldKind::Tel(attrs) => (
                ValueKind::Text,
                wrapped(),
                tel_rules(attrs.validation.as_ref()),
            ),
            FieldKind::Number(attrs) => (
                ValueKind::Number,
                wrapped(),
                attrs
                    .validation
                    .as_ref()
                    .map(numeric_rules)
                    .unwrap_or_default(),
            ),
            FieldKind::Range(attrs) => {
                let v = &attrs.validation;
                (
                    ValueKind::Number,
                    wrapped(),
                    numeric_rules(&NumericRules {
                        min: Some(v.min),
                        max: Some(v.max),
                        step: v.step,
                        message: v.message.clone(),
                    }),
                )
            }
            FieldKind::Select(attrs) | FieldKind::Radio(attrs) => (
                ValueKind::Choice,
                wrapped(),
                vec![Rule::OneOf {
                    values: attrs.values(),
                    message: messages::INVALID_SELECTION.to_string(),
                }],
            ),
            FieldKind::CheckboxGroup(attrs) => (
                ValueKind::MultiChoice,
                Presence::Defaulted,
                group_rules(label, required, attrs),
            ),
            FieldKind::Checkbox => (
                ValueKind::Boolean,
                Presence::Defaulted,
                toggle_rules(required, messages::must_be_checked(label)),
            ),
            FieldKind::Switch => (
                ValueKind::Boolean,
                Presence::Defaulted,
                toggle_rules(required, messages::must_be_on(label)),
            ),
        };

        let type_message = match value_kind {
            ValueKind::Text | ValueKind::Choice => messages::not_a_string(label),
            ValueKind::Number => messages::not_a_number(label),
            ValueKind::Boolean => messages::not_a_boolean(label),
            ValueKind::MultiChoice => messages::not_a_list(label),
        };

        FieldRules {
            field_id: field.id.clone(),
            label: label.to_string(),
            field_type: field.field_type(),
            value_kind,
            presence,
            type_message,
            rules,
        }
    }

    #[must_use]
    pub fn is_required(&self) -> bool {
        match &self.presence {
            Presence::Required { .. } => true,
            Presence::Optional => false,
            Presence::Defaulted => self
                .rules
                .iter()
                .any(|r| matches!(r, Rule::NonEmpty { .. } | Rule::IsTrue { .. })),
        }
    }
}

/// A field-level custom message replaces every constraint message.
fn message_or(custom: Option<&String>, default: impl Into<String>) -> String {
    custom.cloned().unwrap_or_else(|| default.into())
}

fn length_rules(label: &str, validation: Option<&LengthRules>) -> Vec<Rule> {
    let Some(v) = validation else {
        return Vec::new();
    };
    let custom = v.message.as_ref();
    let mut rules = Vec::new();
    if let Some(min) = v.min {
        rules.push(Rule::MinLength {
            min,
            message: message_or(custom, messages::min_length(label, min)),
        });
    }
    if let Some(max) = v.max {
        rules.push(Rule::MaxLength {
            max,
            message: message_or(custom, messages::max_length(label, max)),
        });
    }
    rules
}

fn email_rules(validation: Option<&PatternRules>) -> Vec<Rule> {
    let custom = validation.and_then(|v| v.message.as_ref());
    let mut rules = vec![Rule::Email {
        message: message_or(custom, messages::INVALID_EMAIL),
    }];
    if let Some(pattern) = validation.and_then(|v| v.pattern.as_ref()) {
        rules.push(Rule::Pattern {
            pattern: pattern.clone(),
            message: message_or(custom, messages::INVALID_FORMAT),
        });
    }
    rules
}

fn password_rules(validation: Option<&PatternRules>) -> Vec<Rule> {
    let custom = validation.and_then(|v| v.message.as_ref());
    match validation.and_then(|v| v.pattern.as_ref()) {
        Some(pattern) => vec![Rule::Pattern {
            pattern: pattern.clone(),
            message: message_or(custom, messages::INVALID_FORMAT),
        }],
        None => vec![Rule::MinLength {
            min: messages::PASSWORD_MIN_LENGTH,
            message: message_or(custom, messages::PASSWORD_TOO_SHORT),
        }],
    }
}

/// A custom pattern replaces the ten-digit default rather than adding to it.
fn tel_rules(validation: Option<&PatternRules>) -> Vec<Rule> {
    let custom = validation.and_then(|v| v.message.as_ref());
    let rule = match validation.and_then(|v| v.pattern.as_ref()) {
        Some(pattern) => Rule::Pattern {
            pattern: pattern.clone(),
            message: message_or(custom, messages::INVALID_PHONE),
        },
        None => Rule::Pattern {
            pattern: Pattern::ten_digits(),
            message: message_or(custom, messages::PHONE_TEN_DIGITS),
        },
    };
    vec![rule]
}

fn numeric_rules(v: &NumericRules) -> Vec<Rule> {
    let custom = v.message.as_ref();
    let mut rules = Vec::new();
    if let Some(min) = v.min {
        rules.push(Rule::Min {
            min,
            message: message_or(custom, messages::min_value(min)),
        });
    }
    if let Some(max) = v.max {
        rules.push(Rule::Max {
            max,
            message: message_or(custom, messages::max_value(max)),
        });
    }
    if let Some(step) = v.step {
        rules.push(Rule::MultipleOf {
            step,
            message: message_or(custom, messages::multiple_of(step)),
        });
    }
    rules
}

fn group_rules(label: &str, required: bool, attrs: &ChoiceAttrs) -> Vec<Rule> {
    let mut rules = Vec::new();
    if required {
        rules.push(Rule::NonEmpty {
            message: messages::select_at_least_one(label),
        });
    }
    rules.push(Rule::EachOneOf {
        values: attrs.values(),
        message: messages::INVALID_SELECTION.to_string(),
    });
    rules
}

fn toggle_rules(required: bool, message: String) -> Vec<Rule> {
    if required {
        vec![Rule::IsTrue { message }]
    } else {
        Vec::new()
    }
}
