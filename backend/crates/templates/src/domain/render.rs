//! Placeholder parsing and rendering
//!
//! A placeholder is `{{key}}` with optional spaces inside the braces, where
//! `key` is a valid field key. Anything else between braces is literal text.

use std::collections::HashMap;

use super::template::{DefectTemplate, FieldKind, is_valid_key};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    MissingValue { key: String, label: String },
    InvalidOption { key: String, label: String },
}

impl RenderError {
    pub fn message(&self) -> String {
        match self {
            RenderError::MissingValue { key, label } => {
                format!("Pole `{key}` ({label}) jest wymagane")
            }
            RenderError::InvalidOption { key, label } => {
                format!("Wartość pola `{key}` ({label}) spoza listy opcji")
            }
        }
    }
}

/// Walk `body`, yielding literal chunks and placeholder keys in order
fn segments(body: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut rest = body;

    while let Some(open) = rest.find("{{") {
        let after_open = &rest[open + 2..];
        let Some(close) = after_open.find("}}") else {
            break;
        };
        let key = after_open[..close].trim();

        if is_valid_key(key) {
            if open > 0 {
                out.push(Segment::Text(&rest[..open]));
            }
            out.push(Segment::Placeholder(key));
            rest = &after_open[close + 2..];
        } else {
            // Not a placeholder: emit the braces literally and keep scanning
            out.push(Segment::Text(&rest[..open + 2]));
            rest = after_open;
        }
    }

    if !rest.is_empty() {
        out.push(Segment::Text(rest));
    }
    out
}

enum Segment<'a> {
    Text(&'a str),
    Placeholder(&'a str),
}

/// Distinct placeholder keys in order of first appearance
pub fn placeholders(body: &str) -> Vec<&str> {
    let mut keys: Vec<&str> = Vec::new();
    for segment in segments(body) {
        if let Segment::Placeholder(key) = segment {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
    }
    keys
}

/// Fill `template.body` from `values`.
///
/// Blank values count as missing. Unknown keys are ignored; optional fields
/// without a value render as empty strings.
pub fn render(
    template: &DefectTemplate,
    values: &HashMap<String, String>,
) -> Result<String, RenderError> {
    for field in &template.fields {
        let value = values
            .get(&field.key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty());

        match value {
            None if field.required => {
                return Err(RenderError::MissingValue {
                    key: field.key.clone(),
                    label: field.label.clone(),
                });
            }
            Some(v) if field.kind == FieldKind::Select && !field.options.iter().any(|o| o == v) => {
                return Err(RenderError::InvalidOption {
                    key: field.key.clone(),
                    label: field.label.clone(),
                });
            }
            _ => {}
        }
    }

    let mut out = String::with_capacity(template.body.len());
    for segment in segments(&template.body) {
        match segment {
            Segment::Text(text) => out.push_str(text),
            Segment::Placeholder(key) => {
                if let Some(value) = values.get(key) {
                    out.push_str(value.trim());
                }
            }
        }
    }
    Ok(out)
}
