//! Field type grammar: the typed form document produced by schema validation.
//!
//! A [`FormDocument`] is only ever built by [`crate::schema::validate`] from
//! untrusted JSON. Once built it is immutable input to the compiler; nothing
//! downstream re-inspects the raw JSON it came from.
//!
//! Serializes back to the camelCase wire shape (`formTitle`, `type` tag,
//! kebab-case type names) so it can be embedded into generated code.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Serialize, Serializer};

use crate::error::UnknownFieldType;
use crate::literal::{serialize_number, serialize_opt_number};

// ---------------------------------------------------------------------------
// FieldType
// ---------------------------------------------------------------------------

/// Closed set of field type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Text,
    Email,
    Password,
    Number,
    Range,
    Tel,
    Select,
    Radio,
    Checkbox,
    CheckboxGroup,
    Textarea,
    Switch,
}

impl FieldType {
    /// Every field type, in wire-name order of the grammar table.
    pub const ALL: [FieldType; 12] = [
        FieldType::Text,
        FieldType::Email,
        FieldType::Password,
        FieldType::Number,
        FieldType::Range,
        FieldType::Tel,
        FieldType::Select,
        FieldType::Radio,
        FieldType::Checkbox,
        FieldType::CheckboxGroup,
        FieldType::Textarea,
        FieldType::Switch,
    ];

    /// Wire name used in the `type` property.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Email => "email",
            FieldType::Password => "password",
            FieldType::Number => "number",
            FieldType::Range => "range",
            FieldType::Tel => "tel",
            FieldType::Select => "select",
            FieldType::Radio => "radio",
            FieldType::Checkbox => "checkbox",
            FieldType::CheckboxGroup => "checkbox-group",
            FieldType::Textarea => "textarea",
            FieldType::Switch => "switch",
        }
    }

    /// Whether fields of this type may carry a `placeholder`.
    #[must_use]
    pub fn accepts_placeholder(self) -> bool {
        matches!(
            self,
            FieldType::Text
                | FieldType::Password
                | FieldType::Email
                | FieldType::Tel
                | FieldType::Textarea
                | FieldType::Select
                | FieldType::Number
        )
    }

    /// Whether fields of this type declare an `options` list.
    #[must_use]
    pub fn has_options(self) -> bool {
        matches!(
            self,
            FieldType::Select | FieldType::Radio | FieldType::CheckboxGroup
        )
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = UnknownFieldType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownFieldType(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Pattern
// ---------------------------------------------------------------------------

/// Exactly ten ASCII digits: the default `tel` pattern.
pub const TEN_DIGITS: &str = r"^[0-9]{10}$";

static TEN_DIGITS_PATTERN: LazyLock<Pattern> = LazyLock::new(|| {
    Pattern::new(TEN_DIGITS).expect("built-in tel pattern compiles")
});

/// A compiled regular expression that remembers its source text.
///
/// The shorthand classes `\d`, `\w` and `\b` (and their negations) match
/// ASCII only, the way a browser `RegExp` without the `u` flag reads them.
/// Serializes as the source string.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compile a pattern.
    ///
    /// # Errors
    ///
    /// Returns the regex error if `source` is not a valid pattern.
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&ascii_shorthands(source))?;
        Ok(Pattern {
            source: source.to_string(),
            regex,
        })
    }

    /// The default ten-digit telephone pattern.
    #[must_use]
    pub fn ten_digits() -> Self {
        TEN_DIGITS_PATTERN.clone()
    }

    /// Source text of the pattern.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether `text` matches anywhere (anchors are up to the pattern).
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// Rewrite `\d`, `\D`, `\w`, `\W`, `\b` and `\B` into ASCII-only forms.
/// Inside a class the replacement is a nested class, e.g. `[a\d]` becomes
/// `[a[0-9]]`. Everything else passes through untouched.
fn ascii_shorthands(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    // Nesting depth of `[...]` classes, and whether the class just opened
    // (a leading `]` or `^` is then literal or negation, not a close).
    let mut depth = 0usize;
    let mut class_start = false;
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let Some(next) = chars.next() else {
                    out.push(c);
                    break;
                };
                let in_class = depth > 0;
                match (next, in_class) {
                    ('d', _) => out.push_str("[0-9]"),
                    ('D', _) => out.push_str("[^0-9]"),
                    ('w', _) => out.push_str("[0-9A-Za-z_]"),
                    ('W', _) => out.push_str("[^0-9A-Za-z_]"),
                    ('b', false) => out.push_str(r"(?-u:\b)"),
                    ('B', false) => out.push_str(r"(?-u:\B)"),
                    _ => {
                        out.push(c);
                        out.push(next);
                    }
                }
                class_start = false;
            }
            '[' => {
                depth += 1;
                class_start = true;
                out.push(c);
                if chars.peek() == Some(&'^') {
                    out.push('^');
                    chars.next();
                }
            }
            ']' if depth > 0 && !class_start => {
                depth -= 1;
                out.push(c);
            }
            _ => {
                class_start = false;
                out.push(c);
            }
        }
    }
    out
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Variant attributes
// ---------------------------------------------------------------------------

/// Character-length bounds for `text` and `textarea`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LengthRules {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Custom pattern for `email`, `tel` and `password`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PatternRules {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<Pattern>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Optional numeric bounds for `number`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct NumericRules {
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_opt_number")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_opt_number")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_opt_number")]
    pub step: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Mandatory bounds for `range`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeRules {
    #[serde(serialize_with = "serialize_number")]
    pub min: f64,
    #[serde(serialize_with = "serialize_number")]
    pub max: f64,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_opt_number")]
    pub step: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// One selectable choice of a `select`, `radio` or `checkbox-group`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldOption {
    pub value: String,
    pub label: String,
}

impl FieldOption {
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TextAttrs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<LengthRules>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PatternAttrs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<PatternRules>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct NumberAttrs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<NumericRules>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeAttrs {
    pub validation: RangeRules,
}

/// Options plus an optional placeholder (only `select` ever carries one).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoiceAttrs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    pub options: Vec<FieldOption>,
}

impl ChoiceAttrs {
    /// Declared option values, in order.
    #[must_use]
    pub fn values(&self) -> Vec<String> {
        self.options.iter().map(|o| o.value.clone()).collect()
    }
}

// ---------------------------------------------------------------------------
// Field / FormDocument
// ---------------------------------------------------------------------------

/// Variant-specific part of a field, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum FieldKind {
    Text(TextAttrs),
    Textarea(TextAttrs),
    Email(PatternAttrs),
    Password(PatternAttrs),
    Tel(PatternAttrs),
    Number(NumberAttrs),
    Range(RangeAttrs),
    Select(ChoiceAttrs),
    Radio(ChoiceAttrs),
    CheckboxGroup(ChoiceAttrs),
    Checkbox,
    Switch,
}

/// One input definition of a form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    /// Unique within the document.
    pub id: String,
    pub label: String,
    /// Authored value; absent means not required.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl Field {
    /// The `type` tag of this field.
    #[must_use]
    pub fn field_type(&self) -> FieldType {
        match &self.kind {
            FieldKind::Text(_) => FieldType::Text,
            FieldKind::Textarea(_) => FieldType::Textarea,
            FieldKind::Email(_) => FieldType::Email,
            FieldKind::Password(_) => FieldType::Password,
            FieldKind::Tel(_) => FieldType::Tel,
            FieldKind::Number(_) => FieldType::Number,
            FieldKind::Range(_) => FieldType::Range,
            FieldKind::Select(_) => FieldType::Select,
            FieldKind::Radio(_) => FieldType::Radio,
            FieldKind::CheckboxGroup(_) => FieldType::CheckboxGroup,
            FieldKind::Checkbox => FieldType::Checkbox,
            FieldKind::Switch => FieldType::Switch,
        }
    }

    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(false)
    }

    #[must_use]
    pub fn placeholder(&self) -> Option<&str> {
        match &self.kind {
            FieldKind::Text(a) | FieldKind::Textarea(a) => a.placeholder.as_deref(),
            FieldKind::Email(a) | FieldKind::Password(a) | FieldKind::Tel(a) => {
                a.placeholder.as_deref()
            }
            FieldKind::Number(a) => a.placeholder.as_deref(),
            FieldKind::Select(a) | FieldKind::Radio(a) | FieldKind::CheckboxGroup(a) => {
                a.placeholder.as_deref()
            }
            FieldKind::Range(_) | FieldKind::Checkbox | FieldKind::Switch => None,
        }
    }

    /// Declared options; empty for types without options.
    #[must_use]
    pub fn options(&self) -> &[FieldOption] {
        match &self.kind {
            FieldKind::Select(a) | FieldKind::Radio(a) | FieldKind::CheckboxGroup(a) => {
                &a.options
            }
            _ => &[],
        }
    }

    /// Lower bound, upper bound and step for numeric inputs.
    #[must_use]
    pub fn numeric_bounds(&self) -> (Option<f64>, Option<f64>, Option<f64>) {
        match &self.kind {
            FieldKind::Number(NumberAttrs {
                validation: Some(v),
                ..
            }) => (v.min, v.max, v.step),
            FieldKind::Range(a) => (
                Some(a.validation.min),
                Some(a.validation.max),
                a.validation.step,
            ),
            _ => (None, None, None),
        }
    }
}

/// A structurally valid form schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDocument {
    pub form_title: String,
    pub form_description: String,
    /// Non-empty; order is rendering order.
    pub fields: Vec<Field>,
}

impl FormDocument {
    /// Look up a field by id.
    #[must_use]
    pub fn field(&self, id: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_type_wire_names_round_trip() {
        for t in FieldType::ALL {
            assert_eq!(t.as_str().parse::<FieldType>(), Ok(t));
        }
    }

    #[test]
    fn unknown_field_type_is_rejected() {
        let err = "color".parse::<FieldType>().unwrap_err();
        assert_eq!(err, UnknownFieldType("color".to_string()));
        assert!("Checkbox".parse::<FieldType>().is_err());
    }

    #[test]
    fn checkbox_group_uses_kebab_case() {
        assert_eq!(FieldType::CheckboxGroup.to_string(), "checkbox-group");
    }

    #[test]
    fn only_choice_types_have_options() {
        let with: Vec<_> = FieldType::ALL.into_iter().filter(|t| t.has_options()).collect();
        assert_eq!(
            with,
            vec![FieldType::Select, FieldType::Radio, FieldType::CheckboxGroup]
        );
        assert!(!FieldType::Checkbox.has_options());
    }

    #[test]
    fn pattern_compares_by_source() {
        let a = Pattern::new("^a+$").unwrap();
        let b = Pattern::new("^a+$").unwrap();
        assert_eq!(a, b);
        assert!(a.is_match("aaa"));
        assert!(!a.is_match("ab"));
    }

    #[test]
    fn ten_digits_pattern_matches_exactly_ten() {
        let p = Pattern::ten_digits();
        assert!(p.is_match("0123456789"));
        assert!(!p.is_match("012345678"));
        assert!(!p.is_match("01234567890"));
        assert!(!p.is_match("\u{661}\u{662}\u{663}\u{664}\u{665}\u{666}\u{667}\u{668}\u{669}\u{660}"));
        assert_eq!(p.as_str(), TEN_DIGITS);
    }

    #[test]
    fn shorthand_classes_are_ascii_only() {
        let digits = Pattern::new(r"^\d{3}$").unwrap();
        assert!(digits.is_match("123"));
        assert!(!digits.is_match("\u{661}\u{662}\u{663}"));
        assert_eq!(digits.as_str(), r"^\d{3}$");

        let word = Pattern::new(r"^\w+$").unwrap();
        assert!(word.is_match("abc_9"));
        assert!(!word.is_match("äbc"));

        let not_digit = Pattern::new(r"^\D$").unwrap();
        assert!(not_digit.is_match("\u{661}"));
        assert!(!not_digit.is_match("1"));

        let in_class = Pattern::new(r"^[A-Za-z\d]{4}$").unwrap();
        assert!(in_class.is_match("ab12"));
        assert!(!in_class.is_match("ab1\u{662}"));

        let boundary = Pattern::new(r"\bcat\b").unwrap();
        assert!(boundary.is_match("a cat sat"));
        assert!(boundary.is_match("écat"));
        assert!(!boundary.is_match("bobcat"));
    }

    #[test]
    fn shorthand_rewrite_leaves_other_syntax_alone() {
        assert_eq!(ascii_shorthands(r"^[^\d\]]\.x\\d$"), r"^[^[0-9]\]]\.x\\d$");
        assert_eq!(ascii_shorthands(r"[]\w]"), r"[][0-9A-Za-z_]]");
        assert!(Pattern::new(r"^[+]?[1-9]\d{1,14}$").unwrap().is_match("+14155552671"));
    }

    #[test]
    fn field_serializes_with_type_tag() {
        let field = Field {
            id: "age".to_string(),
            label: "Age".to_string(),
            required: Some(true),
            kind: FieldKind::Number(NumberAttrs {
                placeholder: None,
                validation: Some(NumericRules {
                    min: Some(0.0),
                    max: Some(120.0),
                    step: None,
                    message: None,
                }),
            }),
        };
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "age",
                "label": "Age",
                "required": true,
                "type": "number",
                "validation": { "min": 0, "max": 120 }
            })
        );
    }

    #[test]
    fn unit_variants_serialize_as_bare_tag() {
        let field = Field {
            id: "agree".to_string(),
            label: "Agree".to_string(),
            required: None,
            kind: FieldKind::CheckboxGroup(ChoiceAttrs {
                placeholder: None,
                options: vec![FieldOption::new("a", "A")],
            }),
        };
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["type"], "checkbox-group");
        assert!(json.get("required").is_none());

        let toggle = Field {
            kind: FieldKind::Switch,
            ..field
        };
        let json = serde_json::to_value(&toggle).unwrap();
        assert_eq!(json["type"], "switch");
    }

    #[test]
    fn document_serializes_camel_case() {
        let doc = FormDocument {
            form_title: "T".to_string(),
            form_description: "D".to_string(),
            fields: vec![Field {
                id: "a".to_string(),
                label: "A".to_string(),
                required: None,
                kind: FieldKind::Checkbox,
            }],
        };
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["formTitle"], "T");
        assert_eq!(json["formDescription"], "D");
        assert_eq!(json["fields"][0]["type"], "checkbox");
        assert!(doc.field("a").is_some());
        assert!(doc.field("b").is_none());
    }

    #[test]
    fn numeric_bounds_cover_number_and_range() {
        let range = Field {
            id: "r".to_string(),
            label: "R".to_string(),
            required: None,
            kind: FieldKind::Range(RangeAttrs {
                validation: RangeRules {
                    min: 1.0,
                    max: 5.0,
                    step: Some(1.0),
                    message: None,
                },
            }),
        };
        assert_eq!(range.numeric_bounds(), (Some(1.0), Some(5.0), Some(1.0)));
        assert_eq!(range.placeholder(), None);
        assert!(range.options().is_empty());
    }
}
