//! Code generation configuration.

use std::fmt;
use std::str::FromStr;

/// Output produced by [`crate::codegen::generate_form_code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodeFlavor {
    /// React Hook Form component with plain HTML elements.
    #[default]
    Html,
    /// React Hook Form component built from shadcn/ui components.
    Shadcn,
    /// Only the `zod` object schema.
    Zod,
}

impl CodeFlavor {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CodeFlavor::Html => "html",
            CodeFlavor::Shadcn => "shadcn",
            CodeFlavor::Zod => "zod",
        }
    }
}

impl fmt::Display for CodeFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CodeFlavor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(CodeFlavor::Html),
            "shadcn" => Ok(CodeFlavor::Shadcn),
            "zod" => Ok(CodeFlavor::Zod),
            other => Err(format!(
                "unknown code flavor {other:?} (expected html, shadcn or zod)"
            )),
        }
    }
}

/// Settings for generated source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodegenConfig {
    pub flavor: CodeFlavor,
    /// Spaces per nesting level.
    pub indent_width: usize,
    /// Embed the form document as a JSON literal in component output.
    pub include_schema_literal: bool,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            flavor: CodeFlavor::Html,
            indent_width: 2,
            include_schema_literal: true,
        }
    }
}
