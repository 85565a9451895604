//! Conversion between `serde_json::Value` and arena slots.

use indexmap::IndexMap;
use serde_json::{Map, Number, Value};

use super::{Arena, NodeId, Scalar, Slot};

/// Copies `value` into the arena, returning the id of the new subtree root.
pub(super) fn import(arena: &mut Arena, value: Value) -> NodeId {
    let slot = match value {
        Value::Null => Slot::Scalar(Scalar::Null),
        Value::Bool(b) => Slot::Scalar(Scalar::Bool(b)),
        Value::Number(n) => Slot::Scalar(number_to_scalar(&n)),
        Value::String(s) => Slot::Scalar(Scalar::String(s)),
        Value::Array(items) => {
            let ids = items.into_iter().map(|item| import(arena, item)).collect();
            Slot::Array(ids)
        }
        Value::Object(map) => {
            let mut children = IndexMap::with_capacity(map.len());
            for (key, item) in map {
                let id = import(arena, item);
                children.insert(key, id);
            }
            Slot::Object(children)
        }
    };
    arena.alloc(slot)
}

// Integers beyond the i64 range are kept as floats.
fn number_to_scalar(n: &Number) -> Scalar {
    match n.as_i64() {
        Some(i) => Scalar::Integer(i),
        None => Scalar::Float(n.as_f64().unwrap_or(f64::NAN)),
    }
}

/// Renders the subtree rooted at `id`. Comment nodes have no JSON form and are skipped.
pub(super) fn export(arena: &Arena, id: NodeId) -> Value {
    match arena.slot(id) {
        Slot::Scalar(scalar) => scalar_to_value(scalar),
        Slot::Comment(_) => Value::Null,
        Slot::Array(items) => Value::Array(
            items
                .iter()
                .filter(|child| !matches!(arena.slot(**child), Slot::Comment(_)))
                .map(|child| export(arena, *child))
                .collect(),
        ),
        Slot::Object(children) => {
            let mut map = Map::with_capacity(children.len());
            for (key, child) in children {
                if matches!(arena.slot(*child), Slot::Comment(_)) {
                    continue;
                }
                map.insert(key.clone(), export(arena, *child));
            }
            Value::Object(map)
        }
    }
}

fn scalar_to_value(scalar: &Scalar) -> Value {
    match scalar {
        Scalar::Null => Value::Null,
        Scalar::Bool(b) => Value::Bool(*b),
        Scalar::Integer(i) => Value::Number((*i).into()),
        Scalar::Float(x) => Number::from_f64(*x).map_or(Value::Null, Value::Number),
        Scalar::String(s) => Value::String(s.clone()),
        Scalar::Guid(g) => Value::String(g.hyphenated().to_string()),
    }
}
