//! Per-call processing context.

use std::collections::BTreeMap;

/// Metadata passed unchanged to both hooks for one [`process`] call.
///
/// The processor never inspects it. Hosts typically record the view being
/// rendered and that view's parameters.
///
/// [`process`]: crate::Processor::process
///
/// # Example
///
/// ```
/// use ecml_core::Context;
///
/// let ctx = Context::for_view("output/longtext").with_param("owner", "42");
/// assert_eq!(ctx.view(), Some("output/longtext"));
/// assert_eq!(ctx.param("owner"), Some("42"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    view: Option<String>,
    params: BTreeMap<String, String>,
}

impl Context {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context for the named view.
    #[must_use]
    pub fn for_view(view: impl Into<String>) -> Self {
        Self {
            view: Some(view.into()),
            params: BTreeMap::new(),
        }
    }

    /// Add a parameter.
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Replace all parameters.
    #[must_use]
    pub fn with_params(mut self, params: BTreeMap<String, String>) -> Self {
        self.params = params;
        self
    }

    /// Name of the view being rendered, if any.
    #[must_use]
    pub fn view(&self) -> Option<&str> {
        self.view.as_deref()
    }

    /// Get a parameter by name.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// All parameters, sorted by name.
    #[must_use]
    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_context() {
        let ctx = Context::new();
        assert_eq!(ctx.view(), None);
        assert!(ctx.params().is_empty());
    }

    #[test]
    fn test_with_params_replaces() {
        let mut params = BTreeMap::new();
        params.insert("b".to_owned(), "2".to_owned());
        let ctx = Context::for_view("v").with_param("a", "1").with_params(params);
        assert_eq!(ctx.param("a"), None);
        assert_eq!(ctx.param("b"), Some("2"));
    }
}
