//! Registry of views whose output is processed for tags.

use std::collections::BTreeMap;

/// View processed when nothing else is configured.
pub const DEFAULT_VIEW: &str = "output/longtext";

/// Description of [`DEFAULT_VIEW`].
pub const DEFAULT_VIEW_DESCRIPTION: &str = "Longtext Output";

/// Views whose text goes through the processor, with a human description.
///
/// The default registry holds only [`DEFAULT_VIEW`].
///
/// # Example
///
/// ```
/// use ecml_core::ViewRegistry;
///
/// let views = ViewRegistry::default().with_view("blog/body", "Blog post body");
/// assert!(views.contains("output/longtext"));
/// assert_eq!(views.description("blog/body"), Some("Blog post body"));
/// assert!(!views.contains("page/title"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRegistry {
    views: BTreeMap<String, String>,
}

impl Default for ViewRegistry {
    fn default() -> Self {
        Self::empty().with_view(DEFAULT_VIEW, DEFAULT_VIEW_DESCRIPTION)
    }
}

impl ViewRegistry {
    /// Create a registry with no views.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            views: BTreeMap::new(),
        }
    }

    /// Register a view.
    #[must_use]
    pub fn with_view(mut self, view: impl Into<String>, description: impl Into<String>) -> Self {
        self.register(view, description);
        self
    }

    /// Register a view, replacing the description if already present.
    pub fn register(&mut self, view: impl Into<String>, description: impl Into<String>) {
        self.views.insert(view.into(), description.into());
    }

    /// Whether the view is registered.
    #[must_use]
    pub fn contains(&self, view: &str) -> bool {
        self.views.contains_key(view)
    }

    /// Description of a registered view.
    #[must_use]
    pub fn description(&self, view: &str) -> Option<&str> {
        self.views.get(view).map(String::as_str)
    }

    /// Iterate `(view, description)` pairs sorted by view name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.views.iter().map(|(v, d)| (v.as_str(), d.as_str()))
    }

    /// Number of registered views.
    #[must_use]
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// Whether no views are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}

impl<V, D> FromIterator<(V, D)> for ViewRegistry
where
    V: Into<String>,
    D: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (V, D)>>(iter: I) -> Self {
        let mut registry = Self::empty();
        for (view, description) in iter {
            registry.register(view, description);
        }
        registry
    }
}
