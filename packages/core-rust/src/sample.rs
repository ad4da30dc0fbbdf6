//! Built-in starter document.

use serde_json::{json, Value};

/// The "Project Requirements Survey" document as raw JSON.
#[must_use]
pub fn default_document() -> Value {
    json!({
        "formTitle": "Project Requirements Survey",
        "formDescription": "Please fill out this survey about your project needs",
        "fields": [
            {
                "id": "name",
                "type": "text",
                "label": "Full Name",
                "required": true,
                "placeholder": "Enter your full name"
            },
            {
                "id": "email",
                "type": "email",
                "label": "Email Address",
                "required": true,
                "placeholder": "you@example.com",
                "validation": {
                    "pattern": "^[^\\s@]+@[^\\s@]+\\.[^\\s@]+$",
                    "message": "Please enter a valid email address"
                }
            },
            {
                "id": "companySize",
                "type": "select",
                "label": "Company Size",
                "required": true,
                "options": [
                    { "value": "1-50", "label": "1-50 employees" },
                    { "value": "51-200", "label": "51-200 employees" },
                    { "value": "201-1000", "label": "201-1000 employees" },
                    { "value": "1000+", "label": "1000+ employees" }
                ]
            },
            {
                "id": "industry",
                "type": "radio",
                "label": "Industry",
                "required": true,
                "options": [
                    { "value": "tech", "label": "Technology" },
                    { "value": "healthcare", "label": "Healthcare" },
                    { "value": "finance", "label": "Finance" },
                    { "value": "retail", "label": "Retail" },
                    { "value": "other", "label": "Other" }
                ]
            },
            {
                "id": "timeline",
                "type": "select",
                "label": "Project Timeline",
                "required": true,
                "options": [
                    { "value": "immediate", "label": "Immediate (within 1 month)" },
                    { "value": "short", "label": "Short-term (1-3 months)" },
                    { "value": "medium", "label": "Medium-term (3-6 months)" },
                    { "value": "long", "label": "Long-term (6+ months)" }
                ]
            },
            {
                "id": "comments",
                "type": "textarea",
                "label": "Additional Comments",
                "required": false,
                "placeholder": "Any other details you'd like to share..."
            },
            {
                "id": "satisfaction",
                "type": "range",
                "label": "Satisfaction Level",
                "required": true,
                "validation": { "min": 0, "max": 10, "step": 1 }
            }
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemble::assemble;
    use crate::schema::validate;

    #[test]
    fn default_document_is_valid() {
        let document = validate(&default_document()).unwrap();
        assert_eq!(document.form_title, "Project Requirements Survey");
        assert_eq!(document.fields.len(), 7);
    }

    #[test]
    fn default_document_serializes_back_unchanged() {
        let document = validate(&default_document()).unwrap();
        assert_eq!(serde_json::to_value(&document).unwrap(), default_document());
    }

    #[test]
    fn default_document_reports_every_missing_answer() {
        let validator = assemble(&validate(&default_document()).unwrap());
        let err = validator
            .parse_value(&json!({ "email": "not-an-email", "satisfaction": 11 }))
            .unwrap_err();
        assert_eq!(
            err.messages_for("email"),
            vec!["Please enter a valid email address"]
        );
        assert_eq!(err.messages_for("satisfaction"), vec!["Maximum value is 10"]);
        for id in ["name", "companySize", "industry", "timeline"] {
            assert!(err.has_field(id), "{id} should be reported");
        }
        assert!(!err.has_field("comments"));
    }

    #[test]
    fn default_document_accepts_a_complete_answer() {
        let validator = assemble(&validate(&default_document()).unwrap());
        let typed = validator
            .parse_value(&json!({
                "name": "Ada",
                "email": "ada@example.com",
                "companySize": "51-200",
                "industry": "tech",
                "timeline": "short",
                "satisfaction": "8"
            }))
            .unwrap();
        assert_eq!(typed["satisfaction"], json!(8));
        assert!(!typed.contains_key("comments"));
    }
}
