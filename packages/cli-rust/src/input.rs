//! Reading command input from files or stdin.

use std::io::Read;
use std::path::Path;

use anyhow::Context;

/// Read a whole file, or stdin when `path` is `-`.
///
/// # Errors
///
/// Fails if the file or stdin cannot be read as UTF-8 text.
pub fn read_source(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
