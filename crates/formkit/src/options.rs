//! Form configuration.
//!
//! [`FormOptions`] collects everything a [`Form`](crate::Form) needs at
//! construction time. With the `serde` feature it can be loaded from JSON:
//!
//! ```ignore
//! let options = FormOptions::from_json(r#"{"id": "login", "method": "get"}"#)?;
//! ```
//!
//! Missing keys fall back to [`FormOptions::default`].

use core::fmt;
use core::str::FromStr;

use crate::error::FormError;

/// HTTP method a form submits with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Method {
    Get,
    #[default]
    Post,
}

impl Method {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("get") {
            Ok(Self::Get)
        } else if s.eq_ignore_ascii_case("post") {
            Ok(Self::Post)
        } else {
            Err(FormError::InvalidMethod(s.to_owned()))
        }
    }
}

/// Construction-time settings for a form.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct FormOptions {
    /// Value of the form's `id` attribute. Read-only once the form exists.
    pub id: String,
    /// Value of the form's `method` attribute. Read-only once the form exists.
    pub method: Method,
    pub action: Option<String>,
    /// Extra attributes, applied before `id`, `method` and `action`.
    pub attributes: Vec<(String, String)>,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            id: "form".to_owned(),
            method: Method::default(),
            action: None,
            attributes: Vec::new(),
        }
    }
}

impl FormOptions {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    #[must_use]
    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Parse options from a JSON object.
    ///
    /// # Errors
    ///
    /// [`FormError::Options`] if the JSON is malformed or has the wrong shape.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
