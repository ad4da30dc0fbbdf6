//! Subcommand implementations.
//!
//! Commands take already-read text and return an [`Outcome`], so they can
//! be tested without touching the filesystem or the process exit code.

use std::process::ExitCode;

use anyhow::Context;
use formwright_core::{
    assemble, generate_form_code, parse_document, CodegenConfig, FormDocument, FormError,
};
use tracing::debug;

/// Success.
pub const EXIT_OK: u8 = 0;
/// Schema-structural or submission failure.
pub const EXIT_INVALID: u8 = 1;
/// Malformed JSON or unreadable input.
pub const EXIT_INPUT: u8 = 2;

/// Text for stdout plus the process exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub output: String,
    pub code: u8,
}

impl Outcome {
    fn ok(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            code: EXIT_OK,
        }
    }

    fn failed(output: impl Into<String>, code: u8) -> Self {
        Self {
            output: output.into(),
            code,
        }
    }

    /// Print the output and convert to a process exit code. Input errors go
    /// to stderr; results, defects and issues go to stdout.
    pub fn emit(self) -> ExitCode {
        if !self.output.is_empty() {
            if self.code != EXIT_INPUT {
                println!("{}", self.output);
            } else {
                eprintln!("{}", self.output);
            }
        }
        ExitCode::from(self.code)
    }
}

fn load(text: &str) -> Result<FormDocument, Outcome> {
    parse_document(text).map_err(|err| match err {
        FormError::Json(err) => Outcome::failed(format!("malformed JSON: {err}"), EXIT_INPUT),
        FormError::Schema(err) => Outcome::failed(err.errors.join("\n"), EXIT_INVALID),
    })
}

/// `formwright validate`
pub fn validate(text: &str) -> Outcome {
    match load(text) {
        Ok(document) => Outcome::ok(format!(
            "valid: {} ({} fields)",
            document.form_title,
            document.fields.len()
        )),
        Err(outcome) => outcome,
    }
}

/// `formwright check`
pub fn check(schema: &str, data: &str) -> Outcome {
    let document = match load(schema) {
        Ok(document) => document,
        Err(outcome) => return outcome,
    };
    let submission: serde_json::Value = match serde_json::from_str(data) {
        Ok(value) => value,
        Err(err) => return Outcome::failed(format!("malformed submission JSON: {err}"), EXIT_INPUT),
    };
    let Some(submission) = submission.as_object() else {
        return Outcome::failed("submission must be a JSON object", EXIT_INPUT);
    };

    match assemble(&document).parse(submission) {
        Ok(typed) => match serde_json::to_string_pretty(&typed) {
            Ok(text) => Outcome::ok(text),
            Err(err) => Outcome::failed(err.to_string(), EXIT_INPUT),
        },
        Err(err) => {
            debug!(issues = err.issues.len(), "submission rejected");
            let lines: Vec<String> = err
                .issues
                .iter()
                .map(|issue| format!("{}: {}", issue.field_id, issue.message))
                .collect();
            Outcome::failed(lines.join("\n"), EXIT_INVALID)
        }
    }
}

/// `formwright codegen`
///
/// # Errors
///
/// Fails if the document cannot be serialized into the generated source.
pub fn codegen(text: &str, config: &CodegenConfig) -> anyhow::Result<Outcome> {
    let document = match load(text) {
        Ok(document) => document,
        Err(outcome) => return Ok(outcome),
    };
    let code = generate_form_code(&document, config).context("failed to render form code")?;
    Ok(Outcome::ok(code.trim_end()))
}

/// `formwright sample`
///
/// # Errors
///
/// Fails if the sample document cannot be serialized.
pub fn sample() -> anyhow::Result<Outcome> {
    let text = serde_json::to_string_pretty(&formwright_core::sample::default_document())
        .context("failed to serialize sample document")?;
    Ok(Outcome::ok(text))
}
