#![forbid(unsafe_code)]

//! Field naming for formkit.
//!
//! Form fields are submitted under bracketed names (`user[address][city]`)
//! that address a nested value tree. This crate provides:
//!
//! - [`ElementName`]: an immutable, parsed view of such a name
//! - [`parse_name`], [`reduce_name`], [`container_name`]: parsing and
//!   one-level reduction helpers
//! - [`generate_name`] and the [`Named`] trait for prefixing a child's name
//!   with its container's name
//!
//! Every function here is total: malformed input never fails, absence is
//! modelled with `Option`.

pub mod name;

pub use name::{ElementName, Named, container_name, generate_name, parse_name, reduce_name};
