//! Tag attribute parsing.
//!
//! Parses the attribute region of a tag: `[keyword name="value" flag other=1]`.

use std::fmt;

/// Separator between attributes.
pub(crate) const ATTR_SEPARATOR: char = ' ';

/// Switches from name to value.
pub(crate) const ATTR_OPERATOR: char = '=';

/// Characters trimmed from both ends of the attribute region.
pub(crate) const TRIM_CHARS: &[char] = &[' ', '\t', '\n', '\r', '\0', '\x0B'];

/// Value of a single tag attribute.
///
/// The literal values `true` and `false` are coerced to [`AttrValue::Bool`];
/// everything else stays a string.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum AttrValue {
    /// Plain string value.
    String(String),
    /// Boolean value (bare attribute, `true` or `false`).
    Bool(bool),
}

impl AttrValue {
    /// Coerce a parsed operand, turning `true`/`false` into booleans.
    fn coerce(operand: String) -> Self {
        match operand.as_str() {
            "true" => Self::Bool(true),
            "false" => Self::Bool(false),
            _ => Self::String(operand),
        }
    }

    /// String value, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            Self::Bool(_) => None,
        }
    }

    /// Boolean value, if this is a boolean.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::String(_) => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Insertion-ordered attribute map with unique names.
///
/// Inserting a name that already exists replaces its value in place, so the
/// position of the first occurrence is kept.
///
/// # Example
///
/// ```
/// use ecml_core::{AttrValue, Attributes};
///
/// let mut attrs = Attributes::new();
/// attrs.insert("src", "a.png");
/// attrs.insert("hidden", true);
/// attrs.insert("src", "b.png");
///
/// let names: Vec<_> = attrs.iter().map(|(name, _)| name).collect();
/// assert_eq!(names, ["src", "hidden"]);
/// assert_eq!(attrs.get_str("src"), Some("b.png"));
/// assert_eq!(attrs.get("hidden"), Some(&AttrValue::Bool(true)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, AttrValue)>,
}

impl Attributes {
    /// Create an empty attribute map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an attribute, overwriting an existing value with the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) {
        let name = name.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    /// Get an attribute value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }

    /// Get a string attribute by name.
    ///
    /// Returns `None` for missing and boolean attributes.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(AttrValue::as_str)
    }

    /// Get a boolean attribute by name.
    #[must_use]
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(AttrValue::as_bool)
    }

    /// Iterate attributes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<AttrValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        for (name, value) in iter {
            attrs.insert(name, value);
        }
        attrs
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Attributes {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Parse the attribute region of a tag.
///
/// Returns `None` when a quoted value is never closed. In that case the
/// whole tag has no attributes, even those that parsed before the quote.
///
/// A bare name at the very end of the region (not followed by a separator)
/// is dropped; only a pending `name=value` pair is flushed at the end.
pub(crate) fn parse_attributes(region: &str) -> Option<Attributes> {
    let region = region.trim_matches(TRIM_CHARS);
    let mut attributes = Attributes::new();

    if region.is_empty() {
        return Some(attributes);
    }

    // Name and value are assembled in `operand`; `=` moves it into `name`.
    let mut operand = String::new();
    let mut name = String::new();
    let mut chars = region.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' | '\'' => {
                let quote = c;
                loop {
                    match chars.next() {
                        None => return None,
                        Some(next) if next == quote => break,
                        Some('\\') if chars.peek() == Some(&quote) => {
                            chars.next();
                            operand.push(quote);
                        }
                        Some(next) => operand.push(next),
                    }
                }
            }
            ATTR_SEPARATOR => {
                if !name.is_empty() {
                    let value = AttrValue::coerce(std::mem::take(&mut operand));
                    attributes.insert(std::mem::take(&mut name), value);
                } else if !operand.is_empty() {
                    attributes.insert(std::mem::take(&mut operand), true);
                }
            }
            ATTR_OPERATOR => {
                name = std::mem::take(&mut operand);
            }
            _ => operand.push(c),
        }
    }

    if !name.is_empty() && !operand.is_empty() {
        attributes.insert(name, AttrValue::coerce(operand));
    }

    Some(attributes)
}
