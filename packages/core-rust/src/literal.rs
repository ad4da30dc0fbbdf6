//! Literal rendering helpers shared by serialization and code generation.
//!
//! Numbers are rendered the way a JavaScript engine prints them: integral
//! values carry no fractional part (`10`, not `10.0`).

use serde::{Serialize, Serializer};
use serde_json::{Number, Value};

/// Largest magnitude that is rendered as an integer literal.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Render a number without a trailing `.0` when it is integral.
///
/// ```
/// use formwright_core::literal::format_number;
///
/// assert_eq!(format_number(10.0), "10");
/// assert_eq!(format_number(-2.5), "-2.5");
/// assert_eq!(format_number(0.1), "0.1");
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        (value as i64).to_string()
    } else {
        value.to_string()
    }
}

/// Convert a number into a JSON value, preferring the integer representation.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn number_value(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        Value::Number(Number::from(value as i64))
    } else {
        Number::from_f64(value).map_or(Value::Null, Value::Number)
    }
}

/// Render a string as a double-quoted, escaped JavaScript/JSON literal.
#[must_use]
pub fn js_string(value: &str) -> String {
    Value::String(value.to_owned()).to_string()
}

/// Render a list of strings as a JavaScript/JSON array literal.
#[must_use]
pub fn js_string_array(values: &[String]) -> String {
    Value::from(values.to_vec()).to_string()
}

/// Escape text for use inside an HTML/JSX attribute value or text node.
#[must_use]
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '{' => out.push_str("&#123;"),
            '}' => out.push_str("&#125;"),
            _ => out.push(ch),
        }
    }
    out
}

#[allow(clippy::trivially_copy_pass_by_ref)]
pub(crate) fn serialize_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    number_value(*value).serialize(serializer)
}

#[allow(clippy::ref_option)]
pub(crate) fn serialize_opt_number<S: Serializer>(
    value: &Option<f64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => serializer.serialize_some(&number_value(*v)),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_numbers_have_no_fraction() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(120.0), "120");
        assert_eq!(format_number(-7.0), "-7");
    }

    #[test]
    fn fractional_numbers_keep_their_digits() {
        assert_eq!(format_number(25.5), "25.5");
        assert_eq!(format_number(0.25), "0.25");
    }

    #[test]
    fn number_value_prefers_integers() {
        assert_eq!(number_value(25.0).to_string(), "25");
        assert_eq!(number_value(2.5).to_string(), "2.5");
    }

    #[test]
    fn js_string_escapes_quotes_and_backslashes() {
        assert_eq!(js_string(r#"say "hi""#), r#""say \"hi\"""#);
        assert_eq!(js_string(r"^\d{10}$"), r#""^\\d{10}$""#);
    }

    #[test]
    fn js_string_array_renders_json_array() {
        let values = vec!["a".to_string(), "b\"c".to_string()];
        assert_eq!(js_string_array(&values), r#"["a","b\"c"]"#);
    }

    #[test]
    fn escape_html_covers_markup_and_jsx_braces() {
        assert_eq!(escape_html("<b>\"x\" & {y}</b>"), "&lt;b&gt;&quot;x&quot; &amp; &#123;y&#125;&lt;/b&gt;");
    }
}
