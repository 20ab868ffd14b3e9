//! Key Template Module
//!
//! Splits a key template into literal text and `{placeholder}` segments.

use crate::error::ConfigError;

/// One piece of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text copied into the key as is
    Literal(String),
    /// A reference name to substitute
    Placeholder(String),
}

// == Parse Template ==
/// Parses `template` into segments.
///
/// `{{` and `}}` produce literal braces. Adjacent literal text is merged into
/// one segment.
pub fn parse_template(template: &str) -> Result<Vec<Segment>, ConfigError> {
    let malformed = |position: usize, reason: &'static str| ConfigError::MalformedTemplate {
        template: template.to_string(),
        position,
        reason,
    };

    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = template.char_indices().peekable();

    while let Some((position, c)) = chars.next() {
        match c {
            '{' if matches!(chars.peek(), Some((_, '{'))) => {
                chars.next();
                literal.push('{');
            }
            '}' if matches!(chars.peek(), Some((_, '}'))) => {
                chars.next();
                literal.push('}');
            }
            '}' => return Err(malformed(position, "unmatched '}'")),
            '{' => {
                let mut name = String::new();
                let mut closed = false;
                for (_, inner) in chars.by_ref() {
                    match inner {
                        '}' => {
                            closed = true;
                            break;
                        }
                        '{' => return Err(malformed(position, "nested '{' in placeholder")),
                        other => name.push(other),
                    }
                }
                if !closed {
                    return Err(malformed(position, "unterminated placeholder"));
                }
                let name = name.trim();
                if name.is_empty() {
                    return Err(malformed(position, "empty placeholder"));
                }
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Placeholder(name.to_string()));
            }
            other => literal.push(other),
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }

    Ok(segments)
}
