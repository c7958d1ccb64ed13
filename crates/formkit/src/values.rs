//! Addressing nested submitted data by field name.
//!
//! Submitted data arrives as a nested tree (`{"user": {"address": {"city":
//! ...}}}`) while fields are known by bracketed names (`user[address][city]`).
//! The name path of an [`ElementName`] is the list of keys leading to the
//! field's value.

use formkit_naming::ElementName;
use serde_json::{Map, Value};

/// Value stored under `name` in `data`, if every key on its path exists.
///
/// Objects are descended by key, arrays by numeric index. Any other node on
/// the way ends the lookup.
#[must_use]
pub fn lookup<'a>(data: &'a Value, name: &ElementName) -> Option<&'a Value> {
    name.name_path()
        .into_iter()
        .try_fold(data, |node, key| match node {
            Value::Object(map) => map.get(key),
            Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
}

/// Store `value` under `name` in `root`, creating intermediate objects.
///
/// Non-object nodes on the path are replaced by objects.
pub fn assign(root: &mut Value, name: &ElementName, value: Value) {
    let path = name.name_path();
    if !path.is_empty() {
        assign_path(root, &path, value);
    }
}

fn assign_path(node: &mut Value, path: &[&str], value: Value) {
    let Some((key, rest)) = path.split_first() else {
        *node = value;
        return;
    };
    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    if let Value::Object(map) = node {
        let child = map.entry((*key).to_owned()).or_insert(Value::Null);
        assign_path(child, rest, value);
    }
}
