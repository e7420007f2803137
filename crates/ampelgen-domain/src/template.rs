//! CEL template binding.
//!
//! Templates use `{{.Name}}` placeholders (inner whitespace allowed). Binding
//! is strict: a placeholder without a value is an error, never left in the
//! output.

use std::collections::BTreeMap;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";
const AND: &str = " && ";

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BindError {
    #[error("template references {{{{.{name}}}}} but no value was supplied")]
    MissingParameter { name: String },

    #[error("malformed template: {reason}")]
    Malformed { reason: String },
}

enum Segment<'a> {
    Text(&'a str),
    Placeholder(&'a str),
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn parse(template: &str) -> Result<Vec<Segment<'_>>, BindError> {
    let mut segments = Vec::new();
    let mut rest = template;
    let mut offset = 0;

    while let Some(start) = rest.find(OPEN) {
        if start > 0 {
            segments.push(Segment::Text(&rest[..start]));
        }
        let after_open = &rest[start + OPEN.len()..];
        let Some(end) = after_open.find(CLOSE) else {
            return Err(BindError::Malformed {
                reason: format!("unterminated placeholder at byte {}", offset + start),
            });
        };

        let inner = after_open[..end].trim();
        let name = inner.strip_prefix('.').unwrap_or_default();
        if !is_identifier(name) {
            return Err(BindError::Malformed {
                reason: format!("invalid placeholder '{{{{{inner}}}}}' (expected {{{{.Name}}}})"),
            });
        }
        segments.push(Segment::Placeholder(name));

        let consumed = start + OPEN.len() + end + CLOSE.len();
        offset += consumed;
        rest = &rest[consumed..];
    }

    if !rest.is_empty() {
        segments.push(Segment::Text(rest));
    }
    Ok(segments)
}

/// Placeholder names in first-use order, without duplicates.
pub fn placeholders(template: &str) -> Result<Vec<String>, BindError> {
    let mut names: Vec<String> = Vec::new();
    for segment in parse(template)? {
        if let Segment::Placeholder(name) = segment
            && !names.iter().any(|n| n == name)
        {
            names.push(name.to_string());
        }
    }
    Ok(names)
}

/// Collapse a multi-line template into one line.
///
/// Each line is trimmed, blank lines are dropped, and the rest are joined
/// with single spaces.
pub fn fold(template: &str) -> String {
    template
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Bind `params` into `template`, producing a folded CEL fragment.
pub fn bind(template: &str, params: &BTreeMap<String, String>) -> Result<String, BindError> {
    let folded = fold(template);
    let mut out = String::with_capacity(folded.len());

    for segment in parse(&folded)? {
        match segment {
            Segment::Text(text) => out.push_str(text),
            Segment::Placeholder(name) => {
                let value = params
                    .get(name)
                    .ok_or_else(|| BindError::MissingParameter {
                        name: name.to_string(),
                    })?;
                out.push_str(value);
            }
        }
    }

    Ok(out)
}

/// Join fragments with `&&`.
///
/// A single fragment is returned as-is; two or more are each parenthesized
/// so the connective stays balanced regardless of fragment contents.
pub fn conjoin<S: AsRef<str>>(fragments: &[S]) -> String {
    match fragments {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        many => many
            .iter()
            .map(|f| format!("({})", f.as_ref()))
            .collect::<Vec<_>>()
            .join(AND),
    }
}
