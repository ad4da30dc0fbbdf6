//! Form document assembler: one [`DocumentValidator`] per accepted document.

use serde_json::{Map, Value};
use tracing::debug;

use crate::compile::{compile, FieldValidator};
use crate::error::{FieldIssue, SubmissionError};
use crate::field::FormDocument;
use crate::literal::js_string;

/// A submission keyed by field id.
pub type FormData = Map<String, Value>;

/// Build the validator for a structurally valid document.
#[must_use]
pub fn assemble(document: &FormDocument) -> DocumentValidator {
    let fields = document.fields.iter().map(compile).collect();
    DocumentValidator { fields }
}

/// Every field validator of a document, in field order.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentValidator {
    fields: Vec<FieldValidator>,
}

impl DocumentValidator {
    /// Check a full submission.
    ///
    /// Every field is checked even after a failure. Keys that do not name a
    /// field are ignored and dropped from the result.
    ///
    /// # Errors
    ///
    /// Returns every issue of every rejected field, in field order.
    pub fn parse(&self, data: &FormData) -> Result<FormData, SubmissionError> {
        let mut typed = FormData::new();
        let mut issues = Vec::new();

        for field in &self.fields {
            match field.check(data.get(field.field_id())) {
                Ok(Some(value)) => {
                    typed.insert(field.field_id().to_string(), value);
                }
                Ok(None) => {}
                Err(messages) => issues.extend(messages.into_iter().map(|message| FieldIssue {
                    field_id: field.field_id().to_string(),
                    message,
                })),
            }
        }

        debug!(
            fields = self.fields.len(),
            issues = issues.len(),
            accepted = issues.is_empty(),
            "parsed submission"
        );

        if issues.is_empty() {
            Ok(typed)
        } else {
            Err(SubmissionError { issues })
        }
    }

    /// Check a submission given as any JSON value.
    ///
    /// # Errors
    ///
    /// A non-object submission is treated as empty, so every required field
    /// is reported.
    pub fn parse_value(&self, data: &Value) -> Result<FormData, SubmissionError> {
        match data {
            Value::Object(map) => self.parse(map),
            _ => self.parse(&FormData::new()),
        }
    }

    /// Validator of one field.
    #[must_use]
    pub fn field(&self, id: &str) -> Option<&FieldValidator> {
        self.fields.iter().find(|f| f.field_id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldValidator> {
        self.fields.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Literal `zod` object schema for the whole document.
    #[must_use]
    pub fn to_source(&self) -> String {
        self.to_source_indented(2)
    }

    /// Same as [`Self::to_source`] with a custom indent width.
    #[must_use]
    pub fn to_source_indented(&self, indent_width: usize) -> String {
        let pad = " ".repeat(indent_width);
        let mut out = String::from("z.object({\n");
        for field in &self.fields {
            out.push_str(&pad);
            out.push_str(&js_string(field.field_id()));
            out.push_str(": ");
            out.push_str(&field.to_source());
            out.push_str(",\n");
        }
        out.push_str("})");
        out
    }
}

impl<'a> IntoIterator for &'a DocumentValidator {
    type Item = &'a FieldValidator;
    type IntoIter = std::slice::Iter<'a, FieldValidator>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::schema::validate;

    fn document(fields: Value) -> FormDocument {
        validate(&json!({ "formTitle": "T", "formDescription": "D", "fields": fields })).unwrap()
    }

    fn data(value: Value) -> FormData {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    // ---- scenarios ----

    #[test]
    fn required_text_scenario() {
        let validator = assemble(&document(json!([
            { "id": "a", "type": "text", "label": "A", "required": true }
        ])));
        let err = validator.parse(&FormData::new()).unwrap_err();
        assert_eq!(err.messages_for("a"), vec!["A is required"]);
        assert_eq!(validator.parse(&data(json!({ "a": "x" }))).unwrap(), data(json!({ "a": "x" })));
    }

    #[test]
    fn optional_email_accepts_empty_and_missing() {
        let validator = assemble(&document(json!([
            { "id": "email", "type": "email", "label": "Email", "required": false }
        ])));
        assert_eq!(validator.parse(&data(json!({ "email": "" }))).unwrap(), FormData::new());
        assert_eq!(validator.parse(&FormData::new()).unwrap(), FormData::new());
        assert_eq!(validator.parse(&data(json!({ "email": null }))).unwrap(), FormData::new());
        assert!(validator.parse(&data(json!({ "email": "nope" }))).is_err());
    }

    #[test]
    fn number_step_scenario() {
        let validator = assemble(&document(json!([{
            "id": "age", "type": "number", "label": "Age",
            "validation": { "min": 0, "max": 120, "step": 1 }
        }])));
        let err = validator.parse(&data(json!({ "age": 25.5 }))).unwrap_err();
        assert_eq!(err.messages_for("age"), vec!["Value must be a multiple of 1"]);
        assert_eq!(validator.parse(&data(json!({ "age": 25 }))).unwrap(), data(json!({ "age": 25 })));
    }

    // ---- collection ----

    #[test]
    fn every_failing_field_is_reported() {
        let validator = assemble(&document(json!([
            { "id": "name", "type": "text", "label": "Name", "required": true },
            {
                "id": "email", "type": "email", "label": "Email", "required": true,
                "validation": {
                    "pattern": "^[^\\s@]+@[^\\s@]+\\.[^\\s@]+$",
                    "message": "Please enter a valid email address"
                }
            },
            { "id": "terms", "type": "checkbox", "label": "Terms", "required": true },
        ])));
        let err = validator.parse(&data(json!({ "email": "bad" }))).unwrap_err();
        assert_eq!(
            err.issues,
            vec![
                FieldIssue { field_id: "name".into(), message: "Name is required".into() },
                FieldIssue {
                    field_id: "email".into(),
                    message: "Please enter a valid email address".into(),
                },
                FieldIssue { field_id: "terms".into(), message: "Terms must be checked".into() },
            ]
        );
    }

    #[test]
    fn typed_output_coerces_and_defaults() {
        let validator = assemble(&document(json!([
            { "id": "age", "type": "number", "label": "Age" },
            { "id": "news", "type": "switch", "label": "News" },
            {
                "id": "tags", "type": "checkbox-group", "label": "Tags",
                "options": [{ "value": "a", "label": "A" }]
            },
            { "id": "bio", "type": "textarea", "label": "Bio" },
        ])));
        let typed = validator
            .parse(&data(json!({ "age": "42", "bio": "", "extra": 1 })))
            .unwrap();
        assert_eq!(typed, data(json!({ "age": 42, "news": false, "tags": [] })));
    }

    #[test]
    fn non_object_submission_counts_as_empty() {
        let validator = assemble(&document(json!([
            { "id": "a", "type": "text", "label": "A", "required": true }
        ])));
        let err = validator.parse_value(&json!([1, 2])).unwrap_err();
        assert!(err.has_field("a"));
    }

    // ---- lookup and source ----

    #[test]
    fn fields_keep_document_order() {
        let validator = assemble(&document(json!([
            { "id": "b", "type": "checkbox", "label": "B" },
            { "id": "a", "type": "switch", "label": "A" },
        ])));
        let ids: Vec<_> = validator.iter().map(FieldValidator::field_id).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(validator.len(), 2);
        assert!(validator.field("a").is_some());
        assert!(validator.field("c").is_none());
    }

    #[test]
    fn document_source_wraps_field_schemas() {
        let validator = assemble(&document(json!([
            { "id": "a", "type": "checkbox", "label": "A" },
            { "id": "b", "type": "text", "label": "B" },
        ])));
        let source = validator.to_source_indented(4);
        assert!(source.starts_with("z.object({\n    \"a\": "));
        assert!(source.contains("\n    \"b\": "));
        assert!(source.ends_with(",\n})"));
    }
}

#[cfg(test)]
mod proptests {
    use proptest::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::schema::validate;

    // -- Strategy helpers --

    fn arb_options() -> impl Strategy<Value = Vec<String>> {
        prop::collection::btree_set("[a-z]{1,6}", 1..5).prop_map(|set| set.into_iter().collect())
    }

    fn options_json(values: &[String]) -> Value {
        values
            .iter()
            .map(|v| json!({ "value": v, "label": v.to_uppercase() }))
            .collect()
    }

    /// A field definition paired with a value that satisfies it.
    fn arb_field(id: String) -> impl Strategy<Value = (Value, Value)> {
        let text = (any::<bool>(), 0u64..10, 1u64..10).prop_map({
            let id = id.clone();
            move |(required, min, extra)| {
                let field = json!({
                    "id": id, "type": "text", "label": "Text", "required": required,
                    "validation": { "min": min, "max": min + extra }
                });
                (field, json!("x".repeat(usize::try_from(min.max(1)).unwrap_or(1))))
            }
        });
        let number = (any::<bool>(), 1u32..6, -20i32..20, 0u32..10).prop_map({
            let id = id.clone();
            move |(required, step, k, span)| {
                let min = f64::from(k) * f64::from(step);
                let max = min + f64::from(span) * f64::from(step);
                let field = json!({
                    "id": id, "type": "number", "label": "Number", "required": required,
                    "validation": { "min": min, "max": max, "step": step }
                });
                (field, json!(min))
            }
        });
        let range = (any::<bool>(), 0i32..50, 1i32..50).prop_map({
            let id = id.clone();
            move |(required, min, span)| {
                let field = json!({
                    "id": id, "type": "range", "label": "Range", "required": required,
                    "validation": { "min": min, "max": min + span }
                });
                (field, json!(min + span))
            }
        });
        let choice = (any::<bool>(), prop_oneof![Just("select"), Just("radio")], arb_options())
            .prop_map({
                let id = id.clone();
                move |(required, kind, values)| {
                    let field = json!({
                        "id": id, "type": kind, "label": "Choice", "required": required,
                        "options": options_json(&values)
                    });
                    (field, json!(values[0]))
                }
            });
        let group = (any::<bool>(), arb_options()).prop_map({
            let id = id.clone();
            move |(required, values)| {
                let field = json!({
                    "id": id, "type": "checkbox-group", "label": "Group", "required": required,
                    "options": options_json(&values)
                });
                (field, json!([values[values.len() - 1]]))
            }
        });
        let toggle = (any::<bool>(), prop_oneof![Just("checkbox"), Just("switch")]).prop_map(
            move |(required, kind)| {
                let field = json!({ "id": id, "type": kind, "label": "Toggle", "required": required });
                (field, json!(true))
            },
        );
        prop_oneof![text, number, range, choice, group, toggle]
    }

    fn arb_document() -> impl Strategy<Value = (Value, FormData)> {
        (1usize..6)
            .prop_flat_map(|n| {
                (0..n)
                    .map(|i| arb_field(format!("f{i}")))
                    .collect::<Vec<_>>()
            })
            .prop_map(|pairs| {
                let mut fields = Vec::new();
                let mut submission = FormData::new();
                for (field, value) in pairs {
                    if let Some(id) = field["id"].as_str() {
                        submission.insert(id.to_string(), value);
                    }
                    fields.push(field);
                }
                let doc = json!({ "formTitle": "T", "formDescription": "D", "fields": fields });
                (doc, submission)
            })
    }

    fn single(field: Value) -> DocumentValidator {
        let doc = validate(&json!({ "formTitle": "T", "formDescription": "D", "fields": [field] }))
            .unwrap();
        assemble(&doc)
    }

    proptest! {
        #[test]
        fn constructed_submission_is_accepted((doc, submission) in arb_document()) {
            let document = validate(&doc).unwrap();
            let validator = assemble(&document);
            prop_assert!(validator.parse(&submission).is_ok());
        }

        #[test]
        fn duplicate_ids_are_rejected(id in "[a-z]{1,8}", kinds in (0usize..12, 0usize..12)) {
            let types = ["text", "email", "password", "number", "tel", "textarea", "checkbox", "switch", "text", "email", "tel", "password"];
            let doc = json!({
                "formTitle": "T",
                "formDescription": "D",
                "fields": [
                    { "id": id, "type": types[kinds.0], "label": "One" },
                    { "id": id, "type": types[kinds.1], "label": "Two" },
                ]
            });
            let err = validate(&doc).unwrap_err();
            let expected = format!("Duplicate field ID found: \"{id}\"");
            prop_assert!(err.mentions(&expected));
        }

        #[test]
        fn inverted_bounds_are_rejected(
            kind in prop_oneof![Just("number"), Just("range"), Just("text"), Just("textarea")],
            max in 0u32..100,
            gap in 1u32..100,
        ) {
            let doc = json!({
                "formTitle": "T",
                "formDescription": "D",
                "fields": [{
                    "id": "f", "type": kind, "label": "F",
                    "validation": { "min": max + gap, "max": max }
                }]
            });
            let err = validate(&doc).unwrap_err();
            prop_assert!(err.mentions("min value must be less than or equal to max value"));
        }

        #[test]
        fn required_toggles_need_true(
            kind in prop_oneof![Just("checkbox"), Just("switch")],
            required in any::<bool>(),
        ) {
            let validator = single(json!({ "id": "t", "type": kind, "label": "T", "required": required }));
            let off = validator.parse_value(&json!({ "t": false }));
            let on = validator.parse_value(&json!({ "t": true }));
            prop_assert!(on.is_ok());
            prop_assert_eq!(off.is_ok(), !required);
        }

        #[test]
        fn choice_accepts_only_declared_values(
            kind in prop_oneof![Just("select"), Just("radio")],
            required in any::<bool>(),
            values in arb_options(),
            candidate in "[a-z]{0,6}",
        ) {
            let validator = single(json!({
                "id": "c", "type": kind, "label": "C", "required": required,
                "options": options_json(&values)
            }));
            let expected = values.contains(&candidate) || (candidate.is_empty() && !required);
            prop_assert_eq!(validator.parse_value(&json!({ "c": candidate })).is_ok(), expected);
        }

        #[test]
        fn group_accepts_only_declared_members(
            required in any::<bool>(),
            values in arb_options(),
            picked in prop::collection::vec("[a-z]{1,6}", 0..4),
        ) {
            let validator = single(json!({
                "id": "g", "type": "checkbox-group", "label": "G", "required": required,
                "options": options_json(&values)
            }));
            let expected = picked.iter().all(|p| values.contains(p)) && !(required && picked.is_empty());
            prop_assert_eq!(validator.parse_value(&json!({ "g": picked })).is_ok(), expected);
        }
    }
}
