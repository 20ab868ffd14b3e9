//! Key Expression Module
//!
//! Parses the comma-separated parameter references that feed a key template
//! and resolves them against an [`ArgumentMap`].

use serde_json::Value;

use crate::error::ConfigError;
use crate::key::ArgumentMap;

/// Separator between references in an expression.
const REFERENCE_SEPARATOR: char = ',';

/// Separator between path segments inside one reference.
const PATH_SEPARATOR: char = '.';

// == Parameter Reference ==
/// One reference such as `id` or `user.address.city`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterRef {
    raw: String,
    parameter: String,
    path: Vec<String>,
}

impl ParameterRef {
    /// The reference as written, used to match template placeholders.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The parameter the reference starts from.
    pub fn parameter(&self) -> &str {
        &self.parameter
    }

    /// Resolves the reference to a value inside `args`.
    ///
    /// Object segments select fields; on arrays a segment must be an index.
    pub fn resolve<'a>(&self, args: &'a ArgumentMap) -> Result<&'a Value, ConfigError> {
        let mut current = args
            .get(&self.parameter)
            .ok_or_else(|| ConfigError::UnknownParameter(self.parameter.clone()))?;

        for segment in &self.path {
            let next = match current {
                Value::Object(fields) => fields.get(segment),
                Value::Array(items) => segment
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| items.get(index)),
                _ => None,
            };
            current = next.ok_or_else(|| ConfigError::UnresolvedPath(self.raw.clone()))?;
        }

        Ok(current)
    }
}

// == Parse Expression ==
/// Parses an expression into its references, in written order.
///
/// An empty or blank expression has no references.
pub fn parse_expression(expression: &str) -> Result<Vec<ParameterRef>, ConfigError> {
    if expression.trim().is_empty() {
        return Ok(Vec::new());
    }

    let malformed = |reason: String| ConfigError::MalformedExpression {
        expression: expression.to_string(),
        reason,
    };

    let mut refs: Vec<ParameterRef> = Vec::new();
    for raw in expression.split(REFERENCE_SEPARATOR).map(str::trim) {
        if raw.is_empty() {
            return Err(malformed("empty reference".to_string()));
        }

        let mut segments = Vec::new();
        for segment in raw.split(PATH_SEPARATOR) {
            if segment.is_empty() {
                return Err(malformed(format!("empty path segment in {raw:?}")));
            }
            if !segment.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(malformed(format!("illegal character in {raw:?}")));
            }
            segments.push(segment.to_string());
        }

        if refs.iter().any(|r| r.raw == raw) {
            return Err(malformed(format!("duplicate reference {raw:?}")));
        }

        let mut segments = segments.into_iter();
        let parameter = segments.next().unwrap_or_default();
        refs.push(ParameterRef {
            raw: raw.to_string(),
            parameter,
            path: segments.collect(),
        });
    }

    Ok(refs)
}

// == Render Value ==
/// Stable textual form of an argument value.
///
/// Strings are written raw apart from `\` and `:`, which get a backslash so a
/// value can never forge a key separator. Everything else is compact JSON.
/// Object keys come out sorted because `serde_json::Map` is ordered.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => escape_separators(s),
        other => other.to_string(),
    }
}

fn escape_separators(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '\\' || c == ':' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
