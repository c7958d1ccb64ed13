//! Bracketed field name parsing.
//!
//! A field name such as `foo[bar][sub]` is made of a *container name*
//! (`foo`) followed by *sub-levels* (`bar`, `sub`). Together they form the
//! *name path* used to descend a nested value tree.
//!
//! # Invariants
//!
//! 1. `sub_levels()` is non-empty if and only if `container_name()` is
//!    `Some`.
//! 2. Parsing never fails. Unmatched or extra brackets are kept as text;
//!    each sub-level loses at most one trailing `]`.
//! 3. [`ElementName::reduce`] always re-parses the string it builds, so a
//!    malformed sub-level is handled exactly like top-level input.
//! 4. Names are values: two `ElementName`s built from the same string are
//!    equal, and no operation mutates an existing name.
//!
//! # Failure Modes
//!
//! | Input | Behavior |
//! |-------|----------|
//! | No `[` at all | Whole string is the name, no container |
//! | `foo[` | Container `foo`, one empty sub-level |
//! | `[bar]` | Empty container name, sub-level `bar` |
//! | `foo[bar]]` | Sub-level `bar]` (one `]` stripped) |

use core::convert::Infallible;
use core::fmt;
use core::str::FromStr;

/// A parsed form field name.
///
/// # Example
///
/// ```
/// use formkit_naming::ElementName;
///
/// let name = ElementName::parse("foo[bar][sub]");
/// assert_eq!(name.container_name(), Some("foo"));
/// assert_eq!(name.sub_levels(), ["bar", "sub"]);
/// assert_eq!(name.name_path(), ["foo", "bar", "sub"]);
/// assert_eq!(name.reduce().as_str(), "bar[sub]");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "String", from = "String")
)]
pub struct ElementName {
    name: String,
    container_name: Option<String>,
    sub_levels: Vec<String>,
}

impl ElementName {
    /// Parse a raw field name.
    #[must_use]
    pub fn parse(name: impl Into<String>) -> Self {
        let name = name.into();
        let Some(open) = name.find('[') else {
            return Self {
                name,
                container_name: None,
                sub_levels: Vec::new(),
            };
        };

        let container_name = Some(name[..open].to_owned());
        let sub_levels = name[open + 1..]
            .split('[')
            .map(|level| level.strip_suffix(']').unwrap_or(level).to_owned())
            .collect();

        Self {
            name,
            container_name,
            sub_levels,
        }
    }

    /// The original, unparsed name.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// Leading segment before the first `[`, if the name has brackets.
    #[inline]
    #[must_use]
    pub fn container_name(&self) -> Option<&str> {
        self.container_name.as_deref()
    }

    /// Bracketed segments after the container name, brackets stripped.
    #[inline]
    #[must_use]
    pub fn sub_levels(&self) -> &[String] {
        &self.sub_levels
    }

    /// Whether the name is nested under a container.
    #[inline]
    #[must_use]
    pub fn is_nested(&self) -> bool {
        self.container_name.is_some()
    }

    /// Ordered keys for descending a nested value tree.
    ///
    /// `[container, level1, level2, ...]` for a nested name, `[name]`
    /// otherwise.
    #[must_use]
    pub fn name_path(&self) -> Vec<&str> {
        match &self.container_name {
            Some(container) => std::iter::once(container.as_str())
                .chain(self.sub_levels.iter().map(String::as_str))
                .collect(),
            None => vec![self.name.as_str()],
        }
    }

    /// Strip exactly one nesting level.
    ///
    /// `foo` stays `foo`, `foo[bar]` becomes `bar`, `foo[bar][sub]`
    /// becomes `bar[sub]`.
    #[must_use]
    pub fn reduce(&self) -> Self {
        let Some((base, rest)) = self.sub_levels.split_first() else {
            return self.clone();
        };

        let mut reduced = base.clone();
        for level in rest {
            reduced.push('[');
            reduced.push_str(level);
            reduced.push(']');
        }
        Self::parse(reduced)
    }

    /// Consume the name, returning the original string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.name
    }
}

impl fmt::Display for ElementName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl AsRef<str> for ElementName {
    fn as_ref(&self) -> &str {
        &self.name
    }
}

impl From<&str> for ElementName {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

impl From<String> for ElementName {
    fn from(name: String) -> Self {
        Self::parse(name)
    }
}

impl From<ElementName> for String {
    fn from(name: ElementName) -> Self {
        name.name
    }
}

impl FromStr for ElementName {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// Parse a raw field name. Shorthand for [`ElementName::parse`].
#[must_use]
pub fn parse_name(name: &str) -> ElementName {
    ElementName::parse(name)
}

/// Reduce `name` by one nesting level.
///
/// Without a `container`, the name is always reduced. With one, it is
/// reduced only if its container name is exactly `container`; names nested
/// under some other container come back unchanged.
#[must_use]
pub fn reduce_name(name: &str, container: Option<&str>) -> String {
    let parsed = ElementName::parse(name);
    match container {
        Some(container) if parsed.container_name() != Some(container) => name.to_owned(),
        _ => parsed.reduce().into_string(),
    }
}

/// Container name of a raw field name, if it has one.
#[must_use]
pub fn container_name(name: &str) -> Option<String> {
    ElementName::parse(name).container_name
}

/// Prefix `name` with a container's name.
///
/// An absent name stays absent. An absent or empty container name leaves
/// `name` unchanged. Otherwise the result is `container[name]`, with the
/// container name used verbatim (it may itself be bracketed).
#[must_use]
pub fn generate_name(name: Option<&str>, container_name: Option<&str>) -> Option<String> {
    let name = name?;
    match container_name {
        Some(container) if !container.is_empty() => Some(format!("{container}[{name}]")),
        _ => Some(name.to_owned()),
    }
}

/// Something that may carry a name and prefixes the names of its children.
pub trait Named {
    /// The node's own (possibly bracketed) name.
    fn name(&self) -> Option<&str>;

    /// Name a child would be submitted under when nested in `self`.
    fn child_name(&self, name: Option<&str>) -> Option<String> {
        generate_name(name, self.name())
    }
}

impl Named for str {
    fn name(&self) -> Option<&str> {
        Some(self)
    }
}

impl Named for String {
    fn name(&self) -> Option<&str> {
        Some(self)
    }
}
