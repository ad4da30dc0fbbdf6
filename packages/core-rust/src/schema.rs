//! Schema validation: untrusted JSON in, typed [`FormDocument`] out.
//!
//! Two preconditions abort immediately with a single message: the candidate
//! must be an object, and `fields` must be a non-empty array. Every other
//! check runs to completion so one failure lists every defect, in document
//! order (title, description, then each field's properties in turn).

use std::collections::HashSet;

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{FormError, SchemaValidationError};
use crate::field::{
    ChoiceAttrs, Field, FieldKind, FieldOption, FieldType, FormDocument, LengthRules,
    NumberAttrs, NumericRules, Pattern, PatternAttrs, PatternRules, RangeAttrs, RangeRules,
    TextAttrs,
};

/// Parse raw JSON text and validate it.
///
/// # Errors
///
/// [`FormError::Json`] for malformed text, [`FormError::Schema`] for a
/// well-formed document that violates the grammar.
pub fn parse_document(text: &str) -> Result<FormDocument, FormError> {
    let candidate: Value = serde_json::from_str(text)?;
    Ok(validate(&candidate)?)
}

/// Validate a candidate document against the field grammar.
///
/// # Errors
///
/// Returns every structural defect found, or the single fatal precondition
/// that stopped validation early.
pub fn validate(candidate: &Value) -> Result<FormDocument, SchemaValidationError> {
    let Some(root) = candidate.as_object() else {
        return Err(SchemaValidationError::single("Schema must be an object"));
    };
    let entries = match root.get("fields") {
        Some(Value::Array(entries)) => entries,
        _ => return Err(SchemaValidationError::single("fields must be an array")),
    };
    if entries.is_empty() {
        return Err(SchemaValidationError::single("fields must not be empty"));
    }

    let mut pass = ValidationPass::default();
    let form_title = pass.document_text(root, "formTitle");
    let form_description = pass.document_text(root, "formDescription");
    let fields: Option<Vec<Field>> = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| pass.field(index, entry))
        .collect::<Vec<_>>()
        .into_iter()
        .collect();

    match (form_title, form_description, fields) {
        (Some(form_title), Some(form_description), Some(fields)) if pass.errors.is_empty() => {
            debug!(fields = fields.len(), "form schema accepted");
            Ok(FormDocument {
                form_title,
                form_description,
                fields,
            })
        }
        _ => {
            debug!(errors = pass.errors.len(), "form schema rejected");
            Err(SchemaValidationError {
                errors: pass.errors,
            })
        }
    }
}

// ---------------------------------------------------------------------------
// FieldName
// ---------------------------------------------------------------------------

/// How defects refer to a field: by id when it has a string id, else by index.
struct FieldName {
    index: usize,
    id: Option<String>,
}

impl FieldName {
    /// Sentence-initial form, e.g. `Field "email"`.
    fn subject(&self) -> String {
        match &self.id {
            Some(id) => format!("Field \"{id}\""),
            None => format!("Field at index {}", self.index),
        }
    }

    /// Mid-sentence form, e.g. `field "email"`.
    fn object(&self) -> String {
        match &self.id {
            Some(id) => format!("field \"{id}\""),
            None => format!("field at index {}", self.index),
        }
    }
}

// ---------------------------------------------------------------------------
// ValidationPass
// ---------------------------------------------------------------------------

/// State of one `validate` call: collected defects and the ids seen so far.
#[derive(Default)]
struct ValidationPass {
    errors: Vec<String>,
    seen_ids: HashSet<String>,
}

impl ValidationPass {
    fn push(&mut self, message: String) {
        self.errors.push(message);
    }

    /// Run `check`, returning its value only if it recorded no new defect.
    fn clean<T>(&mut self, check: impl FnOnce(&mut Self) -> T) -> Option<T> {
        let before = self.errors.len();
        let value = check(self);
        (self.errors.len() == before).then_some(value)
    }

    fn document_text(&mut self, root: &Map<String, Value>, key: &str) -> Option<String> {
        match root.get(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
            Some(Value::String(_)) => {
                self.push(format!("{key} must not be empty"));
                None
            }
            _ => {
                self.push(format!("{key} must be a string"));
                None
            }
        }
    }

    fn field(&mut self, index: usize, entry: &Value) -> Option<Field> {
        let Some(obj) = entry.as_object() else {
            self.push(format!("Field at index {index} must be an object"));
            return None;
        };

        let id = match obj.get("id") {
            Some(Value::String(id)) => {
                if !self.seen_ids.insert(id.clone()) {
                    self.push(format!("Duplicate field ID found: \"{id}\""));
                }
                Some(id.clone())
            }
            _ => {
                self.push(format!("Field at index {index} must have a string id"));
                None
            }
        };
        let name = FieldName {
            index,
            id: id.clone(),
        };

        let field_type = match obj.get("type") {
            None => {
                self.push(format!("{} is missing a type", name.subject()));
                None
            }
            Some(Value::String(t)) => t.parse::<FieldType>().ok(),
            Some(_) => None,
        };
        if let (None, Some(raw)) = (field_type, obj.get("type")) {
            self.push(format!(
                "Invalid field type {raw} for {}",
                name.object()
            ));
        }

        let label = match obj.get("label") {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
            Some(Value::String(_)) => {
                self.push(format!("{} label must not be empty", name.subject()));
                None
            }
            _ => {
                self.push(format!("{} must have a string label", name.subject()));
                None
            }
        };

        let required = match obj.get("required") {
            None => Some(None),
            Some(Value::Bool(b)) => Some(Some(*b)),
            Some(_) => {
                self.push(format!(
                    "{} required property must be a boolean",
                    name.subject()
                ));
                None
            }
        };

        let kind = field_type.and_then(|t| self.kind(t, obj, &name));

        Some(Field {
            id: id?,
            label: label?,
            required: required?,
            kind: kind?,
        })
    }

    /// Variant-specific checks. Returns the kind only if all of them passed.
    fn kind(
        &mut self,
        field_type: FieldType,
        obj: &Map<String, Value>,
        name: &FieldName,
    ) -> Option<FieldKind> {
        self.clean(|pass| {
            let placeholder = if field_type.accepts_placeholder() {
                pass.optional_string(obj, "placeholder", || {
                    format!("{} placeholder must be a string", name.subject())
                })
            } else {
                None
            };

            match field_type {
                FieldType::Text | FieldType::Textarea => {
                    let attrs = TextAttrs {
                        placeholder,
                        validation: pass.length_rules(obj, name),
                    };
                    if field_type == FieldType::Text {
                        Some(FieldKind::Text(attrs))
                    } else {
                        Some(FieldKind::Textarea(attrs))
                    }
                }
                FieldType::Email | FieldType::Tel | FieldType::Password => {
                    let attrs = PatternAttrs {
                        placeholder,
                        validation: pass.pattern_rules(obj, name),
                    };
                    Some(match field_type {
                        FieldType::Email => FieldKind::Email(attrs),
                        FieldType::Tel => FieldKind::Tel(attrs),
                        _ => FieldKind::Password(attrs),
                    })
                }
                FieldType::Number => Some(FieldKind::Number(NumberAttrs {
                    placeholder,
                    validation: pass.numeric_rules(obj, name),
                })),
                FieldType::Range => {
                    let rules = pass.numeric_rules(obj, name);
                    match rules {
                        Some(NumericRules {
                            min: Some(min),
                            max: Some(max),
                            step,
                            message,
                        }) => Some(FieldKind::Range(RangeAttrs {
                            validation: RangeRules {
                                min,
                                max,
                                step,
                                message,
                            },
                        })),
                        _ => {
                            if !range_bounds_present(obj) {
                                pass.push(format!(
                                    "{} of type range must have min and max values",
                                    name.subject()
                                ));
                            }
                            None
                        }
                    }
                }
                FieldType::Select | FieldType::Radio | FieldType::CheckboxGroup => {
                    let options = pass.options(obj, name)?;
                    let attrs = ChoiceAttrs {
                        placeholder,
                        options,
                    };
                    Some(match field_type {
                        FieldType::Select => FieldKind::Select(attrs),
                        FieldType::Radio => FieldKind::Radio(attrs),
                        _ => FieldKind::CheckboxGroup(attrs),
                    })
                }
                FieldType::Checkbox => Some(FieldKind::Checkbox),
                FieldType::Switch => Some(FieldKind::Switch),
            }
        })
        .flatten()
    }

    fn optional_string(
        &mut self,
        obj: &Map<String, Value>,
        key: &str,
        message: impl FnOnce() -> String,
    ) -> Option<String> {
        match obj.get(key) {
            None => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                self.push(message());
                None
            }
        }
    }

    fn optional_number(
        &mut self,
        obj: &Map<String, Value>,
        key: &str,
        name: &FieldName,
    ) -> Option<f64> {
        match obj.get(key) {
            None => None,
            Some(Value::Number(n)) => n.as_f64(),
            Some(_) => {
                self.push(format!("{} {key} value must be a number", name.subject()));
                None
            }
        }
    }

    fn optional_length(
        &mut self,
        obj: &Map<String, Value>,
        key: &str,
        name: &FieldName,
    ) -> Option<u64> {
        match obj.get(key) {
            None => None,
            Some(Value::Number(n)) if n.is_u64() => n.as_u64(),
            Some(Value::Number(_)) => {
                self.push(format!(
                    "{} {key} value must be a non-negative integer",
                    name.subject()
                ));
                None
            }
            Some(_) => {
                self.push(format!("{} {key} value must be a number", name.subject()));
                None
            }
        }
    }

    /// The `validation` block, if present. `null` counts as absent.
    fn validation_block<'a>(
        &mut self,
        obj: &'a Map<String, Value>,
        name: &FieldName,
    ) -> Option<&'a Map<String, Value>> {
        match obj.get("validation") {
            None | Some(Value::Null) => None,
            Some(Value::Object(block)) => Some(block),
            Some(_) => {
                self.push(format!("{} validation must be an object", name.subject()));
                None
            }
        }
    }

    fn message(&mut self, block: &Map<String, Value>, name: &FieldName) -> Option<String> {
        self.optional_string(block, "message", || {
            format!("{} validation message must be a string", name.subject())
        })
    }

    fn check_order<T: PartialOrd>(&mut self, min: Option<T>, max: Option<T>, name: &FieldName) {
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                self.push(format!(
                    "{} min value must be less than or equal to max value",
                    name.subject()
                ));
            }
        }
    }

    fn length_rules(&mut self, obj: &Map<String, Value>, name: &FieldName) -> Option<LengthRules> {
        let block = self.validation_block(obj, name)?;
        let min = self.optional_length(block, "min", name);
        let max = self.optional_length(block, "max", name);
        self.check_order(min, max, name);
        let message = self.message(block, name);
        Some(LengthRules { min, max, message })
    }

    fn pattern_rules(
        &mut self,
        obj: &Map<String, Value>,
        name: &FieldName,
    ) -> Option<PatternRules> {
        let block = self.validation_block(obj, name)?;
        let pattern = match block.get("pattern") {
            None => None,
            Some(Value::String(source)) => match Pattern::new(source) {
                Ok(pattern) => Some(pattern),
                Err(_) => {
                    self.push(format!(
                        "{} validation pattern is not a valid regular expression",
                        name.subject()
                    ));
                    None
                }
            },
            Some(_) => {
                self.push(format!(
                    "{} validation pattern must be a string",
                    name.subject()
                ));
                None
            }
        };
        let message = self.message(block, name);
        Some(PatternRules { pattern, message })
    }

    fn numeric_rules(
        &mut self,
        obj: &Map<String, Value>,
        name: &FieldName,
    ) -> Option<NumericRules> {
        let block = self.validation_block(obj, name)?;
        let min = self.optional_number(block, "min", name);
        let max = self.optional_number(block, "max", name);
        let step = self.optional_number(block, "step", name);
        if step.is_some_and(|s| s <= 0.0) {
            self.push(format!(
                "{} step value must be greater than 0",
                name.subject()
            ));
        }
        self.check_order(min, max, name);
        let message = self.message(block, name);
        Some(NumericRules {
            min,
            max,
            step,
            message,
        })
    }

    fn options(&mut self, obj: &Map<String, Value>, name: &FieldName) -> Option<Vec<FieldOption>> {
        let entries = match obj.get("options") {
            Some(Value::Array(entries)) if !entries.is_empty() => entries,
            _ => {
                self.push(format!(
                    "{} must have non-empty options array",
                    name.subject()
                ));
                return None;
            }
        };
        let mut options = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            match (
                entry.get("value").and_then(Value::as_str),
                entry.get("label").and_then(Value::as_str),
            ) {
                (Some(value), Some(label)) if entry.is_object() => {
                    options.push(FieldOption::new(value, label));
                }
                _ => self.push(format!(
                    "Invalid option at index {index} for {}",
                    name.object()
                )),
            }
        }
        Some(options)
    }
}

/// Whether a range field declares both numeric bounds. Used to avoid
/// reporting a missing bound on top of a mistyped one.
fn range_bounds_present(obj: &Map<String, Value>) -> bool {
    obj.get("validation")
        .and_then(Value::as_object)
        .is_some_and(|block| block.contains_key("min") && block.contains_key("max"))
}
