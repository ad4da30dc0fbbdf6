//! Literal `zod` source for compiled field rules.
//!
//! Each field becomes `z.preprocess(<normalize>, <schema>)`. The normalizer
//! maps `""` and `null` onto the same "not provided" state the live
//! validator uses, and the schema chains one method per [`Rule`] in rule
//! order. Refinements only ever come last in a rule list, so the chain never
//! calls a type-specific method on a `ZodEffects`.

use crate::compile::EMAIL;
use crate::literal::{format_number, js_string, js_string_array};
use crate::rules::{FieldRules, Presence, Rule, ValueKind};

const BLANK_TO_UNDEFINED: &str = r#"(v) => (v === "" || v === null ? undefined : v)"#;
const BLANK_TO_NUMBER: &str = r#"(v) => (v === "" || v === null ? undefined : typeof v === "string" && v.trim() !== "" ? Number(v) : v)"#;
const BLANK_TO_FALSE: &str = r#"(v) => (v === "" || v === null || v === undefined ? false : v)"#;
const BLANK_TO_EMPTY_LIST: &str = r#"(v) => (v === "" || v === null || v === undefined ? [] : v)"#;

impl FieldRules {
    /// Render the rules as a `zod` schema expression.
    #[must_use]
    pub fn to_zod(&self) -> String {
        let mut schema = self.base_schema();
        for rule in &self.rules {
            schema.push_str(&rule_call(rule));
        }
        if self.presence == Presence::Optional {
            schema.push_str(".optional()");
        }
        format!("z.preprocess({}, {schema})", normalizer(self.value_kind))
    }

    fn base_schema(&self) -> String {
        let invalid = js_string(&self.type_message);
        let params = match &self.presence {
            Presence::Required { message } => format!(
                "{{ required_error: {}, invalid_type_error: {invalid} }}",
                js_string(message)
            ),
            Presence::Optional | Presence::Defaulted => {
                format!("{{ invalid_type_error: {invalid} }}")
            }
        };
        match self.value_kind {
            ValueKind::Text | ValueKind::Choice => format!("z.string({params})"),
            ValueKind::Number => format!("z.number({params})"),
            ValueKind::Boolean => format!("z.boolean({params})"),
            ValueKind::MultiChoice => format!("z.array(z.any(), {params})"),
        }
    }
}

fn normalizer(kind: ValueKind) -> &'static str {
    match kind {
        ValueKind::Text | ValueKind::Choice => BLANK_TO_UNDEFINED,
        ValueKind::Number => BLANK_TO_NUMBER,
        ValueKind::Boolean => BLANK_TO_FALSE,
        ValueKind::MultiChoice => BLANK_TO_EMPTY_LIST,
    }
}

fn rule_call(rule: &Rule) -> String {
    let message = format!("{{ message: {} }}", js_string(rule.message()));
    match rule {
        Rule::MinLength { min, .. } => format!(".min({min}, {message})"),
        Rule::MaxLength { max, .. } => format!(".max({max}, {message})"),
        Rule::Email { .. } => format!(".regex(new RegExp({}), {message})", js_string(EMAIL)),
        Rule::Pattern { pattern, .. } => format!(
            ".regex(new RegExp({}), {message})",
            js_string(pattern.as_str())
        ),
        Rule::Min { min, .. } => format!(".min({}, {message})", format_number(*min)),
        Rule::Max { max, .. } => format!(".max({}, {message})", format_number(*max)),
        Rule::MultipleOf { step, .. } => {
            format!(".multipleOf({}, {message})", format_number(*step))
        }
        Rule::NonEmpty { .. } => format!(".min(1, {message})"),
        Rule::OneOf { values, .. } => format!(
            ".refine((v) => {}.includes(v), {message})",
            js_string_array(values)
        ),
        Rule::EachOneOf { values, .. } => format!(
            ".refine((items) => items.every((item) => typeof item === \"string\" && {}.includes(item)), {message})",
            js_string_array(values)
        ),
        Rule::IsTrue { .. } => format!(".refine((v) => v === true, {message})"),
    }
}
