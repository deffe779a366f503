//! YAML frontmatter extraction.
//!
//! A document carries frontmatter when its first line is exactly `---`. The
//! block runs to the next line that is exactly `---`; everything after that
//! line is the body. Line endings may be `\n` or `\r\n`, and a leading byte
//! order mark is ignored.
//!
//! ```text
//! ---
//! title: Row Level Security
//! description: Secure your data using Postgres RLS.
//! ---
//!
//! Body starts here.
//! ```

use docket_core::{Error, Result};
use serde::de::DeserializeOwned;
use yaml_serde::{Mapping, Value};

const DELIMITER: &str = "---";

/// A document split into frontmatter and body.
#[derive(Debug, Clone, PartialEq)]
pub struct FrontmatterResult<'a> {
    /// Parsed frontmatter, `None` when the document has no block.
    ///
    /// An empty block parses to an empty mapping.
    pub frontmatter: Option<Value>,
    /// Raw YAML between the delimiters.
    pub raw: Option<&'a str>,
    /// Everything after the closing delimiter line.
    pub body: &'a str,
}

impl FrontmatterResult<'_> {
    /// Whether the document opened a frontmatter block.
    pub fn has_frontmatter(&self) -> bool {
        self.frontmatter.is_some()
    }

    /// Frontmatter as a value, treating a missing block as an empty mapping.
    pub fn value_or_empty(&self) -> Value {
        self.frontmatter
            .clone()
            .unwrap_or_else(|| Value::Mapping(Mapping::new()))
    }

    /// Deserialize the frontmatter into a typed record.
    ///
    /// Returns `Ok(None)` when the document has no frontmatter block.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        match &self.frontmatter {
            Some(value) => yaml_serde::from_value(value.clone())
                .map(Some)
                .map_err(|e| Error::invalid_data(format!("frontmatter: {e}"))),
            None => Ok(None),
        }
    }
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end_matches(['\r', '\n']) == DELIMITER
}

/// Split `content` into frontmatter and body.
///
/// # Errors
///
/// Returns [`Error::InvalidData`] when a block is opened but never closed,
/// or when the block is not valid YAML.
///
/// # Example
///
/// ```
/// use docket_content::markdown::extract_frontmatter;
///
/// let doc = "---\ntitle: Auth\n---\nWelcome.";
/// let result = extract_frontmatter(doc).unwrap();
/// assert_eq!(result.frontmatter.unwrap()["title"].as_str(), Some("Auth"));
/// assert_eq!(result.body, "Welcome.");
/// ```
pub fn extract_frontmatter(content: &str) -> Result<FrontmatterResult<'_>> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut lines = content.split_inclusive('\n');
    let opening = match lines.next() {
        Some(line) if is_delimiter(line) => line,
        _ => {
            return Ok(FrontmatterResult {
                frontmatter: None,
                raw: None,
                body: content,
            });
        }
    };

    let block_start = opening.len();
    let mut offset = block_start;
    for line in lines {
        if is_delimiter(line) {
            let raw = &content[block_start..offset];
            let body = &content[offset + line.len()..];
            return Ok(FrontmatterResult {
                frontmatter: Some(parse_block(raw)?),
                raw: Some(raw),
                body,
            });
        }
        offset += line.len();
    }

    Err(Error::invalid_data(
        "frontmatter block opened with `---` but never closed",
    ))
}

fn parse_block(raw: &str) -> Result<Value> {
    if raw.trim().is_empty() {
        return Ok(Value::Mapping(Mapping::new()));
    }
    match yaml_serde::from_str::<Value>(raw) {
        Ok(Value::Null) => Ok(Value::Mapping(Mapping::new())),
        Ok(value) => Ok(value),
        Err(e) => Err(Error::invalid_data(format!("frontmatter YAML: {e}"))),
    }
}

/// Return the body of `content`, dropping any frontmatter block.
///
/// Unlike [`extract_frontmatter`] this never fails: a malformed or
/// unterminated block leaves the content unchanged.
pub fn strip_frontmatter(content: &str) -> &str {
    match extract_frontmatter(content) {
        Ok(result) => result.body,
        Err(_) => content,
    }
}
