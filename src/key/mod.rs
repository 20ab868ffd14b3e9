//! Key Module
//!
//! Derives deterministic cache keys from a template, a parameter-reference
//! expression, and the named arguments of one invocation.
//!
//! ```
//! use cache_aside::key::{build_key, ArgumentMap};
//! use serde_json::json;
//!
//! let args = ArgumentMap::new().with("id", json!(42));
//! assert_eq!(build_key("user:{id}", "id", &args).unwrap(), "user:42");
//! ```

mod arguments;
mod builder;
mod expression;
mod key_spec;
mod template;


pub use arguments::ArgumentMap;
pub use builder::{build_key, KeyTemplate, KEY_SEPARATOR};
pub use expression::{parse_expression, render_value, ParameterRef};
pub use key_spec::{CacheKeySpec, PreparedKeySpec};
pub use template::{parse_template, Segment};
