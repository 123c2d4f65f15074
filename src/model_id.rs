use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{PredictError, PredictResult};

/// Model names end up as a path component under the models root, so only a
/// plain token is allowed: no separators, no dots.
static MODEL_NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("model name pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelId(String);

impl ModelId {
    pub fn parse(name: &str) -> PredictResult<Self> {
        if MODEL_NAME_PATTERN.is_match(name) {
            Ok(ModelId(name.to_string()))
        } else {
            Err(PredictError::InvalidModelName)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ModelId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
