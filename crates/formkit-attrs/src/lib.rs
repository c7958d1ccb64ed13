#![forbid(unsafe_code)]

//! Attribute guards for formkit elements.
//!
//! An element owns one [`WatchedAttributes`] registry and routes every
//! attribute mutation through [`WatchedAttributes::handle_changed`] before
//! committing it. The registry classifies attribute names as
//!
//! - **watched**: the change goes through and a per-attribute callback runs;
//! - **readonly**: the change is rejected with [`AttributeError::Readonly`].
//!
//! An optional owner-wide callback observes every accepted change.

pub mod error;
pub mod watched;

pub use error::{AttributeError, ErrorCode, Result};
pub use watched::{AttributeKind, ChangeCallback, WatchCallback, WatchedAttributes};
