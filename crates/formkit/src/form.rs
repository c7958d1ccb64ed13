//! The root of a form tree.
//!
//! A [`Form`] is an unnamed [`Container`] whose `id` and `method`
//! attributes become read-only as soon as it is constructed.

use serde_json::Value;

use crate::container::{Container, Node};
use crate::element::Element;
use crate::error::Result;
use crate::options::FormOptions;

/// A form: root container plus guarded identity attributes.
///
/// # Example
///
/// ```
/// use formkit::{Element, Form, FormOptions, Method};
///
/// let mut form = Form::new(FormOptions::new("signup").method(Method::Post)).unwrap();
/// form.add(Element::named("email"));
///
/// assert_eq!(form.id(), Some("signup"));
/// assert!(form.set_attribute("method", Some("get")).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct Form {
    root: Container,
}

impl Form {
    /// Build a form from `options`.
    ///
    /// Extra attributes are written first, then `id`, `method` and
    /// `action`, so the dedicated options win over duplicates.
    ///
    /// # Errors
    ///
    /// Propagates a rejected attribute write.
    pub fn new(options: FormOptions) -> Result<Self> {
        let mut root = Container::new();
        let element = root.element_mut();
        for (name, value) in &options.attributes {
            element.set_attribute(name, Some(value.as_str()))?;
        }
        element
            .set_attribute("id", Some(options.id.as_str()))?
            .set_attribute("method", Some(options.method.as_str()))?;
        if let Some(action) = options.action.as_deref() {
            element.set_attribute("action", Some(action))?;
        }
        element.make_readonly("id").make_readonly("method");

        tracing::debug!(id = %options.id, method = %options.method, "form created");
        Ok(Self { root })
    }

    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.root.element().id()
    }

    #[must_use]
    pub fn method(&self) -> Option<&str> {
        self.root.element().attribute("method")
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.root.element().attribute(name)
    }

    /// Set or remove a form attribute. `id` and `method` are read-only.
    ///
    /// # Errors
    ///
    /// Fails if the attribute is read-only and the value would change.
    pub fn set_attribute(&mut self, name: &str, value: Option<&str>) -> Result<&mut Self> {
        self.root.element_mut().set_attribute(name, value)?;
        Ok(self)
    }

    /// The form's own element, for registering further guards.
    pub fn element_mut(&mut self) -> &mut Element {
        self.root.element_mut()
    }

    pub fn add(&mut self, child: impl Into<Node>) -> &mut Self {
        self.root.add(child);
        self
    }

    #[must_use]
    pub fn container(&self) -> &Container {
        &self.root
    }

    pub fn container_mut(&mut self) -> &mut Container {
        &mut self.root
    }

    #[must_use]
    pub fn find(&self, full_name: &str) -> Option<&Element> {
        self.root.find(full_name)
    }

    pub fn find_mut(&mut self, full_name: &str) -> Option<&mut Element> {
        self.root.find_mut(full_name)
    }

    /// Bind submitted data onto the form's fields. See [`Container::populate`].
    pub fn populate(&mut self, data: &Value) -> usize {
        self.root.populate(data)
    }

    #[must_use]
    pub fn qualified_names(&self) -> Vec<String> {
        self.root.qualified_names()
    }

    #[must_use]
    pub fn values(&self) -> Value {
        self.root.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Method;
    use formkit_attrs::ErrorCode;
    use serde_json::json;
    use tracing_test::traced_test;

    fn login() -> Form {
        let mut form = Form::new(
            FormOptions::new("login")
                .method(Method::Get)
                .action("/session")
                .attribute("class", "narrow")
                .attribute("id", "ignored"),
        )
        .unwrap();
        form.add(Element::named("user")).add(Element::named("password"));
        form
    }

    #[test]
    fn options_become_attributes() {
        let form = login();
        assert_eq!(form.id(), Some("login"));
        assert_eq!(form.method(), Some("get"));
        assert_eq!(form.attribute("action"), Some("/session"));
        assert_eq!(form.attribute("class"), Some("narrow"));
    }

    #[test]
    fn id_and_method_are_readonly() {
        let mut form = login();
        let err = form.set_attribute("ID", Some("other")).unwrap_err();
        assert_eq!(
            err.as_attribute().map(|e| e.code()),
            Some(ErrorCode::ReadonlyAttribute)
        );
        assert!(form.set_attribute("method", None).is_err());
        assert_eq!(form.id(), Some("login"));
        assert_eq!(form.method(), Some("get"));

        // Rewriting the current value is not a change.
        form.set_attribute("method", Some("get")).unwrap();
        assert_eq!(
            form.container().element().watched_attributes().readonly(),
            ["id", "method"]
        );
    }

    #[test]
    fn other_attributes_stay_writable() {
        let mut form = login();
        form.set_attribute("action", Some("/other"))
            .unwrap()
            .set_attribute("class", None)
            .unwrap();
        assert_eq!(form.attribute("action"), Some("/other"));
        assert_eq!(form.attribute("class"), None);
    }

    #[test]
    fn form_adds_no_name_prefix() {
        let mut form = login();
        assert_eq!(form.qualified_names(), ["user", "password"]);
        assert_eq!(form.populate(&json!({"user": "ann", "password": "pw"})), 2);
        assert_eq!(form.find("user").unwrap().value(), Some(&json!("ann")));
        assert_eq!(form.values(), json!({"user": "ann", "password": "pw"}));
    }

    #[test]
    #[traced_test]
    fn creation_is_logged() {
        let _ = login();
        assert!(logs_contain("form created"));
    }
}
