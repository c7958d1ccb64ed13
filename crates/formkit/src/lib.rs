#![forbid(unsafe_code)]

//! formkit public facade.
//!
//! Forms are trees of [`Element`]s and [`Container`]s rooted in a [`Form`].
//! Two services do the real work underneath:
//!
//! - field naming ([`formkit_naming`]): parsing `foo[bar][sub]`, reducing a
//!   name by one container, prefixing children with their container's name;
//! - attribute guards ([`formkit_attrs`]): watched and read-only attributes
//!   with change callbacks.
//!
//! # Example
//!
//! ```
//! use formkit::prelude::*;
//! use serde_json::json;
//!
//! let mut address = Container::named("address");
//! address.add(Element::named("city"));
//!
//! let mut form = Form::new(FormOptions::new("signup")).unwrap();
//! form.add(Element::named("email")).add(address);
//!
//! form.populate(&json!({"email": "a@b.c", "address": {"city": "Oslo"}}));
//! assert_eq!(form.find("address[city]").unwrap().value(), Some(&json!("Oslo")));
//! assert!(form.set_attribute("id", Some("other")).is_err());
//! ```

pub mod container;
pub mod element;
pub mod error;
pub mod form;
pub mod options;
pub mod values;

pub use container::{Container, Node};
pub use element::Element;
pub use error::{FormError, Result};
pub use form::Form;
pub use options::{FormOptions, Method};

pub use formkit_attrs::{self as attrs, AttributeError, AttributeKind, ErrorCode, WatchedAttributes};
pub use formkit_naming::{
    self as naming, ElementName, Named, container_name, generate_name, parse_name, reduce_name,
};

pub mod prelude {
    //! Common imports for building forms.

    pub use crate::{
        AttributeError, Container, Element, ElementName, ErrorCode, Form, FormError, FormOptions,
        Method, Named, Node, WatchedAttributes,
    };
}
