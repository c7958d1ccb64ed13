//! Watched / read-only attribute registry.
//!
//! # Invariants
//!
//! 1. Attribute names are case-insensitive: every read and write lower-cases
//!    the name (ASCII) before touching the map.
//! 2. A name has at most one classification. Re-registering overwrites it in
//!    place; the name keeps its original insertion position.
//! 3. [`WatchedAttributes::handle_changed`] reads classifications but never
//!    changes them.
//! 4. A write whose new value equals the old value is a no-op, even for
//!    read-only attributes. `None` and `Some("")` are different values.
//! 5. For an accepted change the per-attribute callback runs before the
//!    owner-wide callback. Both run synchronously on the caller's stack.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Read-only write | New value differs on a read-only name | `Err(AttributeError::Readonly)`, no callback |
//! | Callback panic | Panicking user callback | Propagates to the caller of `handle_changed` |
//! | Re-entrant write | Callback triggers another change | Recurses directly, no queueing |

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::error::{AttributeError, Result};

/// Per-attribute callback, receives the new value.
pub type WatchCallback = Rc<dyn Fn(Option<&str>)>;

/// Owner-wide callback, receives `(name, old_value, new_value)`.
pub type ChangeCallback = Rc<dyn Fn(&str, Option<&str>, Option<&str>)>;

/// Classification of a handled attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    /// Changes are allowed and reported to a callback.
    Watched,
    /// Changes are rejected.
    Readonly,
}

#[derive(Clone)]
enum Guard {
    Watched(WatchCallback),
    Readonly,
}

impl Guard {
    fn kind(&self) -> AttributeKind {
        match self {
            Self::Watched(_) => AttributeKind::Watched,
            Self::Readonly => AttributeKind::Readonly,
        }
    }
}

fn normalize(name: &str) -> String {
    name.to_ascii_lowercase()
}

/// Registry of watched and read-only attributes for a single element.
///
/// # Example
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use formkit_attrs::{ErrorCode, WatchedAttributes};
///
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&seen);
///
/// let mut attrs = WatchedAttributes::new();
/// attrs
///     .set_readonly("id")
///     .set_watched("class", move |value| {
///         sink.borrow_mut().push(value.map(str::to_owned));
///     });
///
/// attrs.handle_changed("class", Some("wide"), None).unwrap();
/// assert_eq!(*seen.borrow(), [Some("wide".to_owned())]);
///
/// let err = attrs.handle_changed("ID", Some("b"), Some("a")).unwrap_err();
/// assert_eq!(err.code(), ErrorCode::ReadonlyAttribute);
/// ```
#[derive(Clone, Default)]
pub struct WatchedAttributes {
    attributes: IndexMap<String, Guard>,
    change_callback: Option<ChangeCallback>,
}

impl WatchedAttributes {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify `name` as watched, with `callback` run on each change.
    pub fn set_watched(
        &mut self,
        name: &str,
        callback: impl Fn(Option<&str>) + 'static,
    ) -> &mut Self {
        self.insert(name, Guard::Watched(Rc::new(callback)))
    }

    /// Classify `name` as read-only.
    pub fn set_readonly(&mut self, name: &str) -> &mut Self {
        self.insert(name, Guard::Readonly)
    }

    fn insert(&mut self, name: &str, guard: Guard) -> &mut Self {
        let key = normalize(name);
        tracing::trace!(attribute = %key, kind = ?guard.kind(), "attribute classified");
        self.attributes.insert(key, guard);
        self
    }

    /// Drop any classification for `name`. No-op if it has none.
    pub fn remove_attribute(&mut self, name: &str) -> &mut Self {
        self.attributes.shift_remove(&normalize(name));
        self
    }

    /// Classification of `name`, if any.
    #[must_use]
    pub fn kind(&self, name: &str) -> Option<AttributeKind> {
        self.attributes.get(&normalize(name)).map(Guard::kind)
    }

    #[must_use]
    pub fn is_watched(&self, name: &str) -> bool {
        self.kind(name) == Some(AttributeKind::Watched)
    }

    #[must_use]
    pub fn is_readonly(&self, name: &str) -> bool {
        self.kind(name) == Some(AttributeKind::Readonly)
    }

    /// Whether `name` is watched or read-only.
    #[must_use]
    pub fn is_handled(&self, name: &str) -> bool {
        self.kind(name).is_some()
    }

    /// Watched names in registration order.
    #[must_use]
    pub fn watched(&self) -> Vec<&str> {
        self.names_of(AttributeKind::Watched)
    }

    /// Read-only names in registration order.
    #[must_use]
    pub fn readonly(&self) -> Vec<&str> {
        self.names_of(AttributeKind::Readonly)
    }

    fn names_of(&self, kind: AttributeKind) -> Vec<&str> {
        self.attributes
            .iter()
            .filter(|(_, guard)| guard.kind() == kind)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Install the owner-wide change callback, replacing any previous one.
    pub fn set_change_callback(
        &mut self,
        callback: impl Fn(&str, Option<&str>, Option<&str>) + 'static,
    ) -> &mut Self {
        self.change_callback = Some(Rc::new(callback));
        self
    }

    /// Whether an owner-wide change callback is installed.
    #[must_use]
    pub fn has_change_callback(&self) -> bool {
        self.change_callback.is_some()
    }

    /// Vet and announce a change of `name` from `old_value` to `new_value`.
    ///
    /// Must be called before the owner commits the new value. On `Err` the
    /// owner must leave the attribute untouched.
    ///
    /// # Errors
    ///
    /// [`AttributeError::Readonly`] if `name` is read-only and the value
    /// actually changes.
    pub fn handle_changed(
        &self,
        name: &str,
        new_value: Option<&str>,
        old_value: Option<&str>,
    ) -> Result<()> {
        if new_value == old_value {
            return Ok(());
        }

        match self.attributes.get(&normalize(name)) {
            Some(Guard::Readonly) => {
                tracing::debug!(attribute = name, "rejected write to read-only attribute");
                return Err(AttributeError::readonly(name));
            }
            Some(Guard::Watched(callback)) => {
                tracing::trace!(attribute = name, new = ?new_value, "watched attribute changed");
                let callback = Rc::clone(callback);
                callback(new_value);
            }
            None => {}
        }

        if let Some(callback) = self.change_callback.clone() {
            callback(name, old_value, new_value);
        }
        Ok(())
    }
}

impl fmt::Debug for WatchedAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchedAttributes")
            .field(
                "attributes",
                &self
                    .attributes
                    .iter()
                    .map(|(name, guard)| (name.as_str(), guard.kind()))
                    .collect::<Vec<_>>(),
            )
            .field("change_callback", &self.change_callback.is_some())
            .finish()
    }
}
