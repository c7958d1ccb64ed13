//! Containers: ordered trees of fields and nested groups.
//!
//! Children keep their *local* names. The name a field is submitted under
//! is composed on demand by prefixing the local name with every named
//! container above it (see [`generate_name`]); a bracketed local name keeps
//! its sub-levels as further brackets. Going the other way, a full
//! submitted name is reduced one container at a time (see [`reduce_name`])
//! until it matches a child's local name.
//!
//! # Invariants
//!
//! 1. Unnamed (or empty-named) containers add no prefix.
//! 2. Fields without a `name` attribute are never submitted, found or bound.
//! 3. `populate(values())` restores every field that has a value.
//! 4. Every name from `qualified_names` resolves through `find`, including
//!    local names the parser normalizes (`x[y` is submitted as `g[x][y]`).

use formkit_naming::{ElementName, Named, container_name, generate_name, reduce_name};
use serde_json::{Map, Value};

use crate::element::Element;
use crate::values::{assign, lookup};

/// A child of a [`Container`].
#[derive(Clone, Debug)]
pub enum Node {
    Field(Element),
    Group(Container),
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Field(element)
    }
}

impl From<Container> for Node {
    fn from(container: Container) -> Self {
        Self::Group(container)
    }
}

/// Submission name of a child whose local name is `local`.
///
/// The local container segment is prefixed with [`generate_name`] and the
/// local sub-levels follow it, so `x[y]` under `group` becomes
/// `group[x][y]` rather than `group[x[y]]`.
fn qualify(local: &str, prefix: Option<&str>) -> Option<String> {
    let local = ElementName::parse(local);
    let head = local.container_name().unwrap_or(local.as_str());
    let mut full = generate_name(Some(head), prefix)?;
    for level in local.sub_levels() {
        full.push('[');
        full.push_str(level);
        full.push(']');
    }
    Some(full)
}

/// Whether `field` is the field a reduced submission name points at.
///
/// Compares parsed name paths, so a local name the parser normalizes
/// (`x[y` or `a[`) still matches the name [`qualify`] built from it.
fn answers_to(field: &Element, local: &str) -> bool {
    field.name().is_some_and(|name| {
        ElementName::parse(name).name_path() == ElementName::parse(local).name_path()
    })
}

/// An element that owns an ordered list of children.
///
/// # Example
///
/// ```
/// use formkit::{Container, Element};
/// use serde_json::json;
///
/// let mut address = Container::named("address");
/// address.add(Element::named("city")).add(Element::named("zip"));
///
/// let mut root = Container::new();
/// root.add(Element::named("email")).add(address);
///
/// assert_eq!(root.qualified_names(), ["email", "address[city]", "address[zip]"]);
///
/// root.populate(&json!({"address": {"city": "Oslo"}}));
/// let city = root.find("address[city]").unwrap();
/// assert_eq!(city.value(), Some(&json!("Oslo")));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Container {
    element: Element,
    children: Vec<Node>,
}

impl Container {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn named(name: &str) -> Self {
        Self {
            element: Element::named(name),
            children: Vec::new(),
        }
    }

    /// The container's own attributes.
    #[must_use]
    pub fn element(&self) -> &Element {
        &self.element
    }

    pub fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.element.name()
    }

    /// Append a field or group.
    pub fn add(&mut self, child: impl Into<Node>) -> &mut Self {
        self.children.push(child.into());
        self
    }

    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Non-empty own name, used as a prefix for children.
    fn own_prefix(&self) -> Option<&str> {
        self.name().filter(|name| !name.is_empty())
    }

    /// Visit every named field with the name it is submitted under.
    fn walk<'s>(&'s self, outer: Option<&str>, visit: &mut impl FnMut(String, &'s Element)) {
        let prefix = match self.own_prefix() {
            Some(own) => qualify(own, outer),
            None => outer.map(str::to_owned),
        };
        for child in &self.children {
            match child {
                Node::Field(field) => {
                    let full = field
                        .name()
                        .and_then(|name| qualify(name, prefix.as_deref()));
                    if let Some(full) = full {
                        visit(full, field);
                    }
                }
                Node::Group(group) => group.walk(prefix.as_deref(), visit),
            }
        }
    }

    /// Full submission names of all named fields, in tree order.
    #[must_use]
    pub fn qualified_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.walk(None, &mut |full, _| names.push(full));
        names
    }

    /// Nested tree of every field value, keyed by submission name.
    #[must_use]
    pub fn values(&self) -> Value {
        let mut out = Value::Object(Map::new());
        self.walk(None, &mut |full, field| {
            if let Some(value) = field.value() {
                assign(&mut out, &ElementName::parse(full), value.clone());
            }
        });
        out
    }

    /// Strip this container's own name from the front of `full_name`.
    ///
    /// Returns `None` when `full_name` is not nested under this container.
    fn strip_own_prefix(&self, full_name: &str) -> Option<String> {
        let Some(own) = self.own_prefix() else {
            return Some(full_name.to_owned());
        };
        let own = ElementName::parse(own);
        let mut remaining = full_name.to_owned();
        for segment in own.name_path() {
            if container_name(&remaining).as_deref() != Some(segment) {
                return None;
            }
            remaining = reduce_name(&remaining, Some(segment));
        }
        Some(remaining)
    }

    /// Find a field by the full name it is submitted under.
    #[must_use]
    pub fn find(&self, full_name: &str) -> Option<&Element> {
        let local = self.strip_own_prefix(full_name)?;
        self.children.iter().find_map(|child| match child {
            Node::Field(field) if answers_to(field, &local) => Some(field),
            Node::Field(_) => None,
            Node::Group(group) => group.find(&local),
        })
    }

    /// Mutable variant of [`Container::find`].
    pub fn find_mut(&mut self, full_name: &str) -> Option<&mut Element> {
        let local = self.strip_own_prefix(full_name)?;
        self.children.iter_mut().find_map(|child| match child {
            Node::Field(field) if answers_to(field, &local) => Some(field),
            Node::Field(_) => None,
            Node::Group(group) => group.find_mut(&local),
        })
    }

    /// Bind submitted nested data onto fields.
    ///
    /// A named container first descends `data` along its own name path;
    /// each field then looks up its local name path inside that subtree.
    /// Fields with no matching key keep their current value. Returns the
    /// number of fields bound.
    pub fn populate(&mut self, data: &Value) -> usize {
        let _span = tracing::debug_span!("populate", container = self.name().unwrap_or(""))
            .entered();

        let scoped = match self.own_prefix() {
            Some(own) => lookup(data, &ElementName::parse(own)),
            None => Some(data),
        };
        let Some(scoped) = scoped else {
            return 0;
        };

        let mut bound = 0;
        for child in &mut self.children {
            match child {
                Node::Field(field) => {
                    let Some(name) = field.name().map(ElementName::parse) else {
                        continue;
                    };
                    if let Some(value) = lookup(scoped, &name) {
                        tracing::trace!(field = %name, "bound submitted value");
                        field.set_value(Some(value.clone()));
                        bound += 1;
                    }
                }
                Node::Group(group) => bound += group.populate(scoped),
            }
        }
        bound
    }
}

impl Named for Container {
    fn name(&self) -> Option<&str> {
        self.element.name()
    }
}
