//! Resolution options: missing sentinel, drop pass, non-container policy.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::resolved::Resolved;

/// What to do when a nested path meets a scalar.
///
/// This covers a scalar outer value and also scalar elements of a list
/// outer value, such as `tags:name` over `["a", "b"]`. A scalar has no
/// keys to descend into, so `inner` cannot be resolved against it.
///
/// This differs from a `Leaf` looked up in a non-record row, which
/// always yields null.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NonContainerPolicy {
    /// Keep the scalar as the row's value. A list of scalars is kept
    /// whole.
    #[default]
    PassThrough,
    /// Fail with [`ResolveError::NonContainer`](crate::ResolveError::NonContainer).
    Strict,
}

/// Options for a single `resolve` call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolveOptions {
    /// Substitute for absent values. `None` or `Some(Null)` leaves them null.
    pub missing: Option<Value>,
    /// Remove empty rows/entries instead of filling them.
    pub drop: bool,
    /// Handling of scalars met by nested paths.
    pub non_container: NonContainerPolicy,
}

impl ResolveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that fail on scalars met by nested paths.
    pub fn strict() -> Self {
        Self::default().with_non_container(NonContainerPolicy::Strict)
    }

    /// Set the missing sentinel.
    #[must_use]
    pub fn with_missing(mut self, missing: impl Into<Value>) -> Self {
        self.missing = Some(missing.into());
        self
    }

    /// Enable or disable the drop pass.
    #[must_use]
    pub fn with_drop(mut self, drop: bool) -> Self {
        self.drop = drop;
        self
    }

    /// Set the non-container policy.
    #[must_use]
    pub fn with_non_container(mut self, policy: NonContainerPolicy) -> Self {
        self.non_container = policy;
        self
    }

    /// The missing sentinel, if one is set.
    pub fn sentinel(&self) -> Option<&Value> {
        self.missing.as_ref().filter(|value| !value.is_null())
    }

    /// The result returned when nothing can be resolved at all.
    pub(crate) fn missing_result(&self) -> Resolved {
        self.sentinel()
            .map_or(Resolved::Missing, |sentinel| Resolved::Scalar(sentinel.clone()))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_defaults() {
        let options = ResolveOptions::default();
        assert!(options.sentinel().is_none());
        assert!(!options.drop);
        assert_eq!(options.non_container, NonContainerPolicy::PassThrough);
        assert_eq!(options.missing_result(), Resolved::Missing);
    }

    #[test]
    fn test_null_sentinel_is_unset() {
        let options = ResolveOptions::new().with_missing(Value::Null);
        assert!(options.sentinel().is_none());
    }

    #[test]
    fn test_falsy_sentinel_is_set() {
        let options = ResolveOptions::new().with_missing(0);
        assert_eq!(options.sentinel(), Some(&json!(0)));
        assert_eq!(options.missing_result(), Resolved::Scalar(json!(0)));
    }

    #[test]
    fn test_strict() {
        assert_eq!(ResolveOptions::strict().non_container, NonContainerPolicy::Strict);
    }
}
