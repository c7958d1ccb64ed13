//! Property-based invariant tests for the attribute registry.
//!
//! 1. Classification lookups ignore ASCII case.
//! 2. Unchanged values never fail and never fire callbacks.
//! 3. Read-only names reject every real change.
//! 4. Listings preserve first-registration order.
//! 5. Every accepted change reaches the owner callback exactly once.

use std::cell::Cell;
use std::collections::HashSet;
use std::rc::Rc;

use formkit_attrs::{AttributeKind, ErrorCode, WatchedAttributes};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn attr_name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,10}"
}

fn value_strategy() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("[a-z0-9 ]{0,6}")
}

fn scramble_case(name: &str, mask: u64) -> String {
    name.chars()
        .enumerate()
        .map(|(i, c)| {
            if (mask >> (i % 64)) & 1 == 1 {
                c.to_ascii_uppercase()
            } else {
                c
            }
        })
        .collect()
}

proptest! {
    #[test]
    fn lookups_ignore_case(name in attr_name_strategy(), mask in any::<u64>(), readonly in any::<bool>()) {
        let mut attrs = WatchedAttributes::new();
        let registered = scramble_case(&name, mask);
        if readonly {
            attrs.set_readonly(&registered);
        } else {
            attrs.set_watched(&registered, |_| {});
        }
        let expected = if readonly { AttributeKind::Readonly } else { AttributeKind::Watched };
        prop_assert_eq!(attrs.kind(&name), Some(expected));
        prop_assert_eq!(attrs.kind(&name.to_ascii_uppercase()), Some(expected));
    }

    #[test]
    fn unchanged_value_is_silent(name in attr_name_strategy(), value in value_strategy()) {
        let fired = Rc::new(Cell::new(0u32));
        let (a, b) = (Rc::clone(&fired), Rc::clone(&fired));
        let mut attrs = WatchedAttributes::new();
        attrs
            .set_watched(&name, move |_| a.set(a.get() + 1))
            .set_change_callback(move |_, _, _| b.set(b.get() + 1));
        prop_assert!(attrs.handle_changed(&name, value.as_deref(), value.as_deref()).is_ok());

        attrs.set_readonly(&name);
        prop_assert!(attrs.handle_changed(&name, value.as_deref(), value.as_deref()).is_ok());
        prop_assert_eq!(fired.get(), 0);
    }

    #[test]
    fn readonly_rejects_changes(
        name in attr_name_strategy(),
        old in value_strategy(),
        new in value_strategy(),
    ) {
        prop_assume!(old != new);
        let mut attrs = WatchedAttributes::new();
        attrs.set_readonly(&name);
        let err = attrs.handle_changed(&name, new.as_deref(), old.as_deref()).unwrap_err();
        prop_assert_eq!(err.code(), ErrorCode::ReadonlyAttribute);
    }

    #[test]
    fn listing_preserves_first_registration(names in proptest::collection::vec(attr_name_strategy(), 0..12)) {
        let mut attrs = WatchedAttributes::new();
        for name in &names {
            attrs.set_watched(name, |_| {});
        }
        let mut seen = HashSet::new();
        let expected: Vec<&str> = names
            .iter()
            .map(String::as_str)
            .filter(|name| seen.insert(*name))
            .collect();
        prop_assert_eq!(attrs.watched(), expected);
        prop_assert!(attrs.readonly().is_empty());
    }

    #[test]
    fn owner_sees_each_accepted_change(
        writes in proptest::collection::vec((attr_name_strategy(), value_strategy(), value_strategy()), 0..16),
    ) {
        let seen = Rc::new(Cell::new(0usize));
        let counter = Rc::clone(&seen);
        let mut attrs = WatchedAttributes::new();
        attrs.set_change_callback(move |_, _, _| counter.set(counter.get() + 1));

        let mut expected = 0;
        for (name, new, old) in &writes {
            attrs.handle_changed(name, new.as_deref(), old.as_deref()).unwrap();
            if new != old {
                expected += 1;
            }
        }
        prop_assert_eq!(seen.get(), expected);
    }
}
