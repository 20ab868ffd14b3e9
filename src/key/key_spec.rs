//! Cache Key Spec Module
//!
//! Per-call-site caching declaration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::key::KeyTemplate;

/// How one call site is cached: key template, references, and TTL.
///
/// `ttl_seconds == 0` selects the long-lived default expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheKeySpec {
    /// Key template, may contain `{reference}` placeholders
    pub template: String,
    /// Comma-separated parameter references
    #[serde(default)]
    pub expression: String,
    /// Time to live in seconds
    #[serde(default)]
    pub ttl_seconds: u64,
}

impl CacheKeySpec {
    pub fn new(template: impl Into<String>, expression: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            expression: expression.into(),
            ttl_seconds: 0,
        }
    }

    /// Sets the TTL in seconds.
    pub fn with_ttl(mut self, ttl_seconds: u64) -> Self {
        self.ttl_seconds = ttl_seconds;
        self
    }

    /// Parses the template and expression without any arguments.
    ///
    /// Lets a registration step fail before the first call, and lets every
    /// later call skip the parse.
    pub fn prepare(&self) -> Result<PreparedKeySpec, ConfigError> {
        Ok(PreparedKeySpec {
            key: KeyTemplate::parse(&self.template, &self.expression)?,
            spec: self.clone(),
        })
    }
}

// == Prepared Key Spec ==
/// A [`CacheKeySpec`] with its template already parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedKeySpec {
    spec: CacheKeySpec,
    key: KeyTemplate,
}

impl PreparedKeySpec {
    /// The declaration this was parsed from.
    pub fn spec(&self) -> &CacheKeySpec {
        &self.spec
    }

    pub fn key_template(&self) -> &KeyTemplate {
        &self.key
    }

    pub fn ttl_seconds(&self) -> u64 {
        self.spec.ttl_seconds
    }
}
