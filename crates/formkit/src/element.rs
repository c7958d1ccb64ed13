//! Form elements: attribute storage guarded by a [`WatchedAttributes`]
//! registry, plus a bound value.
//!
//! # Invariants
//!
//! 1. Attribute names are stored lower-cased; lookups ignore ASCII case.
//! 2. Every attribute write goes through
//!    [`WatchedAttributes::handle_changed`] before it is committed. A
//!    rejected write leaves the attribute untouched and the error reaches
//!    the caller.
//! 3. Writing `None` removes the attribute.

use formkit_attrs::WatchedAttributes;
use formkit_naming::Named;
use indexmap::IndexMap;
use serde_json::Value;

use crate::error::Result;

/// A single form control.
///
/// # Example
///
/// ```
/// use formkit::Element;
///
/// let mut field = Element::named("email");
/// field.set_attribute("Type", Some("email")).unwrap();
/// field.make_readonly("type");
///
/// assert_eq!(field.attribute("type"), Some("email"));
/// assert!(field.set_attribute("type", Some("text")).is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Element {
    attributes: IndexMap<String, String>,
    guards: WatchedAttributes,
    value: Option<Value>,
}

impl Element {
    /// Create an element with no attributes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an element with its `name` attribute set.
    #[must_use]
    pub fn named(name: &str) -> Self {
        let mut element = Self::new();
        element
            .attributes
            .insert("name".to_owned(), name.to_owned());
        element
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// All attributes in the order they were first set.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Set (`Some`) or remove (`None`) an attribute.
    ///
    /// # Errors
    ///
    /// Fails if the attribute is read-only and the value would change.
    pub fn set_attribute(&mut self, name: &str, value: Option<&str>) -> Result<&mut Self> {
        let key = name.to_ascii_lowercase();
        let old = self.attributes.get(&key).map(String::as_str);
        self.guards.handle_changed(name, value, old)?;

        match value {
            Some(value) => {
                self.attributes.insert(key, value.to_owned());
            }
            None => {
                self.attributes.shift_remove(&key);
            }
        }
        Ok(self)
    }

    /// Apply several attribute writes in order, stopping at the first
    /// rejected one. Writes before the failure stay applied.
    ///
    /// # Errors
    ///
    /// The first rejected write's error.
    pub fn set_attributes<'a>(
        &mut self,
        attributes: impl IntoIterator<Item = (&'a str, Option<&'a str>)>,
    ) -> Result<&mut Self> {
        for (name, value) in attributes {
            self.set_attribute(name, value)?;
        }
        Ok(self)
    }

    /// # Errors
    ///
    /// Fails if the attribute is read-only and currently set.
    pub fn remove_attribute(&mut self, name: &str) -> Result<&mut Self> {
        self.set_attribute(name, None)
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.attribute("name")
    }

    /// # Errors
    ///
    /// Fails if `name` has been made read-only.
    pub fn set_name(&mut self, name: &str) -> Result<&mut Self> {
        self.set_attribute("name", Some(name))
    }

    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attribute("id")
    }

    /// # Errors
    ///
    /// Fails if `id` has been made read-only.
    pub fn set_id(&mut self, id: &str) -> Result<&mut Self> {
        self.set_attribute("id", Some(id))
    }

    /// Run `callback` with the new value whenever attribute `name` changes.
    pub fn watch(&mut self, name: &str, callback: impl Fn(Option<&str>) + 'static) -> &mut Self {
        self.guards.set_watched(name, callback);
        self
    }

    /// Reject further changes to attribute `name`.
    pub fn make_readonly(&mut self, name: &str) -> &mut Self {
        self.guards.set_readonly(name);
        self
    }

    /// Drop any watch or read-only guard on attribute `name`.
    pub fn unguard(&mut self, name: &str) -> &mut Self {
        self.guards.remove_attribute(name);
        self
    }

    /// Run `callback(name, old, new)` after every accepted attribute change.
    pub fn on_change(
        &mut self,
        callback: impl Fn(&str, Option<&str>, Option<&str>) + 'static,
    ) -> &mut Self {
        self.guards.set_change_callback(callback);
        self
    }

    #[must_use]
    pub fn watched_attributes(&self) -> &WatchedAttributes {
        &self.guards
    }

    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub fn set_value(&mut self, value: Option<Value>) -> &mut Self {
        self.value = value;
        self
    }
}

impl Named for Element {
    fn name(&self) -> Option<&str> {
        self.attribute("name")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formkit_attrs::ErrorCode;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn attributes_are_case_insensitive() {
        let mut el = Element::new();
        el.set_attribute("CLASS", Some("wide")).unwrap();
        assert_eq!(el.attribute("class"), Some("wide"));
        assert_eq!(el.attribute("Class"), Some("wide"));
        assert_eq!(el.attributes().collect::<Vec<_>>(), [("class", "wide")]);
    }

    #[test]
    fn none_removes_attribute() {
        let mut el = Element::named("foo");
        el.remove_attribute("name").unwrap();
        assert_eq!(el.name(), None);
        // Removing an absent attribute is fine.
        el.remove_attribute("name").unwrap();
    }

    #[test]
    fn readonly_write_is_not_committed() {
        let mut el = Element::new();
        el.set_id("a").unwrap().make_readonly("id");

        let err = el.set_id("b").unwrap_err();
        assert_eq!(
            err.as_attribute().map(|e| e.code()),
            Some(ErrorCode::ReadonlyAttribute)
        );
        assert_eq!(el.id(), Some("a"));
        assert!(el.remove_attribute("ID").is_err());
        assert_eq!(el.id(), Some("a"));

        // Same value is a no-op, not a violation.
        el.set_id("a").unwrap();
    }

    #[test]
    fn unguard_lifts_readonly() {
        let mut el = Element::new();
        el.make_readonly("id");
        assert!(el.set_id("x").is_err());
        el.unguard("id");
        el.set_id("x").unwrap();
        assert_eq!(el.id(), Some("x"));
    }

    #[test]
    fn set_attributes_stops_at_first_failure() {
        let mut el = Element::new();
        el.make_readonly("id");
        let result = el.set_attributes([
            ("class", Some("a")),
            ("id", Some("x")),
            ("title", Some("t")),
        ]);
        assert!(result.is_err());
        assert_eq!(el.attribute("class"), Some("a"));
        assert_eq!(el.attribute("title"), None);
    }

    #[test]
    fn watch_and_on_change_receive_values() {
        let log = Rc::new(RefCell::new(Vec::<String>::new()));
        let (watch_log, owner_log) = (Rc::clone(&log), Rc::clone(&log));

        let mut el = Element::new();
        el.watch("class", move |new| {
            watch_log.borrow_mut().push(format!("watch:{new:?}"));
        })
        .on_change(move |name, old, new| {
            owner_log
                .borrow_mut()
                .push(format!("change:{name}:{old:?}:{new:?}"));
        });

        el.set_attribute("class", Some("a")).unwrap();
        el.set_attribute("class", Some("a")).unwrap();
        el.set_attribute("class", Some("b")).unwrap();

        assert_eq!(
            *log.borrow(),
            [
                "watch:Some(\"a\")",
                "change:class:None:Some(\"a\")",
                "watch:Some(\"b\")",
                "change:class:Some(\"a\"):Some(\"b\")",
            ]
        );
    }

    #[test]
    fn value_is_independent_of_attributes() {
        let mut el = Element::named("age");
        el.set_value(Some(json!(42)));
        assert_eq!(el.value(), Some(&json!(42)));
        assert_eq!(el.attribute("value"), None);
    }

    #[test]
    fn named_trait_prefixes_children() {
        let group = Element::named("address");
        assert_eq!(
            Named::child_name(&group, Some("city")).as_deref(),
            Some("address[city]")
        );
        assert_eq!(Named::child_name(&Element::new(), Some("city")).as_deref(), Some("city"));
    }
}
