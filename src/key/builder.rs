//! Key Builder Module
//!
//! Combines a parsed template and expression into a cache key.

use crate::error::ConfigError;
use crate::key::expression::{parse_expression, render_value, ParameterRef};
use crate::key::template::{parse_template, Segment};
use crate::key::ArgumentMap;

/// Joins references that no placeholder consumed onto the key.
pub const KEY_SEPARATOR: char = ':';

// == Key Template ==
/// A template and expression parsed and cross-checked once.
///
/// Rendering is a pure function of the arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyTemplate {
    segments: Vec<Segment>,
    references: Vec<ParameterRef>,
    /// Indexes into `references` not used by any placeholder, in expression order
    trailing: Vec<usize>,
}

impl KeyTemplate {
    /// Parses both inputs and checks every placeholder is bound.
    pub fn parse(template: &str, expression: &str) -> Result<Self, ConfigError> {
        let references = parse_expression(expression)?;
        let segments = parse_template(template)?;

        let mut used = vec![false; references.len()];
        for segment in &segments {
            if let Segment::Placeholder(name) = segment {
                let index = references
                    .iter()
                    .position(|r| r.as_str() == name)
                    .ok_or_else(|| ConfigError::UnboundPlaceholder(name.clone()))?;
                used[index] = true;
            }
        }

        let trailing = used
            .iter()
            .enumerate()
            .filter(|(_, used)| !**used)
            .map(|(index, _)| index)
            .collect();

        Ok(Self {
            segments,
            references,
            trailing,
        })
    }

    // == Render ==
    /// Renders the key for one set of arguments.
    ///
    /// Every reference must resolve, including ones the template never uses.
    /// A missing parameter is reported ahead of any path that fails inside a
    /// present argument, since only the former is a declaration mistake.
    pub fn render(&self, args: &ArgumentMap) -> Result<String, ConfigError> {
        if let Some(missing) = self.references.iter().find(|r| !args.contains(r.parameter())) {
            return Err(ConfigError::UnknownParameter(missing.parameter().to_string()));
        }

        let values = self
            .references
            .iter()
            .map(|r| r.resolve(args).map(render_value))
            .collect::<Result<Vec<String>, ConfigError>>()?;

        let mut key = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => key.push_str(text),
                Segment::Placeholder(name) => {
                    // parse() guarantees every placeholder has a reference
                    if let Some(index) = self.references.iter().position(|r| r.as_str() == name) {
                        key.push_str(&values[index]);
                    }
                }
            }
        }

        for &index in &self.trailing {
            if !key.is_empty() {
                key.push(KEY_SEPARATOR);
            }
            key.push_str(&values[index]);
        }

        Ok(key)
    }
}

// == Build Key ==
/// Derives the cache key for `template` + `expression` over `args`.
pub fn build_key(template: &str, expression: &str, args: &ArgumentMap) -> Result<String, ConfigError> {
    KeyTemplate::parse(template, expression)?.render(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_key_single_placeholder() {
        let args = ArgumentMap::new().with("id", json!(42));
        assert_eq!(build_key("user:{id}", "id", &args).unwrap(), "user:42");
    }

    #[test]
    fn test_build_key_appends_unused_references() {
        let args = ArgumentMap::new()
            .with("id", json!(42))
            .with("region", json!("eu"));

        assert_eq!(build_key("users", "id", &args).unwrap(), "users:42");
        assert_eq!(
            build_key("users:{region}", "id, region", &args).unwrap(),
            "users:eu:42"
        );
        assert_eq!(build_key("", "region,id", &args).unwrap(), "eu:42");
    }

    #[test]
    fn test_build_key_without_expression() {
        let args = ArgumentMap::new().with("id", json!(42));
        assert_eq!(build_key("all-users", "", &args).unwrap(), "all-users");
    }

    #[test]
    fn test_build_key_nested_and_structured_values() {
        let args = ArgumentMap::new()
            .with("user", json!({"id": 7, "name": "Ann"}))
            .with("filter", json!({"sort": "asc", "limit": 10}));

        assert_eq!(
            build_key("u/{user.id}/{filter}", "user.id, filter", &args).unwrap(),
            r#"u/7/{"limit":10,"sort":"asc"}"#
        );
    }

    #[test]
    fn test_build_key_escaped_braces() {
        let args = ArgumentMap::new().with("id", json!(1));
        assert_eq!(build_key("{{v2}}:{id}", "id", &args).unwrap(), "{v2}:1");
    }

    #[test]
    fn test_build_key_unbound_placeholder() {
        let args = ArgumentMap::new().with("id", json!(1));
        assert_eq!(
            build_key("user:{id}", "", &args),
            Err(ConfigError::UnboundPlaceholder("id".to_string()))
        );
    }

    #[test]
    fn test_build_key_unknown_parameter() {
        let args = ArgumentMap::new().with("id", json!(1));
        assert_eq!(
            build_key("user:{name}", "name", &args),
            Err(ConfigError::UnknownParameter("name".to_string()))
        );
    }

    #[test]
    fn test_unknown_parameter_reported_before_unresolved_path() {
        let args = ArgumentMap::new().with("ids", json!([]));
        assert_eq!(
            build_key("orders:{ids.0}", "ids.0, region", &args),
            Err(ConfigError::UnknownParameter("region".to_string()))
        );
        assert_eq!(
            build_key("orders:{ids.0}", "ids.0", &args),
            Err(ConfigError::UnresolvedPath("ids.0".to_string()))
        );
    }

    #[test]
    fn test_key_template_reused_across_arguments() {
        let template = KeyTemplate::parse("order:{id}", "id").unwrap();

        let first = template.render(&ArgumentMap::new().with("id", json!(1))).unwrap();
        let second = template.render(&ArgumentMap::new().with("id", json!(2))).unwrap();
        let again = template.render(&ArgumentMap::new().with("id", json!(1))).unwrap();

        assert_eq!(first, "order:1");
        assert_eq!(second, "order:2");
        assert_eq!(first, again);
    }

    #[test]
    fn test_separator_inside_value_does_not_collide() {
        let left = ArgumentMap::new().with("a", json!("x:y")).with("b", json!("z"));
        let right = ArgumentMap::new().with("a", json!("x")).with("b", json!("y:z"));

        let left_key = build_key("", "a, b", &left).unwrap();
        let right_key = build_key("", "a, b", &right).unwrap();

        assert_eq!(left_key, r"x\:y:z");
        assert_eq!(right_key, r"x:y\:z");
        assert_ne!(left_key, right_key);
    }

    #[test]
    fn test_string_and_number_render_alike() {
        let numeric = ArgumentMap::new().with("id", json!(42));
        let textual = ArgumentMap::new().with("id", json!("42"));

        assert_eq!(
            build_key("user:{id}", "id", &numeric).unwrap(),
            build_key("user:{id}", "id", &textual).unwrap()
        );
    }
}
