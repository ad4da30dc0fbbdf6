//! Source generation: `zod` validators and React Hook Form components.
//!
//! Presentation only. Generated text never feeds back into validation.

pub mod form;
pub mod zod;

pub use form::generate_form_code;

/// Line-oriented text builder with a configurable indent unit.
#[derive(Debug)]
pub(crate) struct SourceWriter {
    out: String,
    unit: String,
    depth: usize,
}

impl SourceWriter {
    pub(crate) fn new(indent_width: usize) -> Self {
        Self {
            out: String::new(),
            unit: " ".repeat(indent_width),
            depth: 0,
        }
    }

    /// Write one line at the current depth; an empty line carries no indent.
    pub(crate) fn line(&mut self, text: impl AsRef<str>) -> &mut Self {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.out.push_str(&self.unit);
            }
            self.out.push_str(text);
        }
        self.out.push('\n');
        self
    }

    /// Write multi-line text, indenting every line at the current depth.
    pub(crate) fn lines(&mut self, text: &str) -> &mut Self {
        for line in text.lines() {
            self.line(line);
        }
        self
    }

    pub(crate) fn indent(&mut self) -> &mut Self {
        self.depth += 1;
        self
    }

    pub(crate) fn dedent(&mut self) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }
}
