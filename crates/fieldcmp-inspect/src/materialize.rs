use std::collections::BTreeMap;

use fieldcmp_types::Value;
use tracing::trace;

use crate::inspect::{Field, Inspect, Visitor};

/// Build an owned [`Value`] tree from any inspectable value.
///
/// Structs become [`Value::Record`] (hidden fields included), sequences
/// become lists, absent optionals become `Null`. A shared reference that
/// re-enters itself is replaced by [`Value::Circular`].
pub fn materialize(value: &dyn Inspect) -> Value {
    Materializer::new().value_of(value)
}

/// Visitor that assembles a [`Value`] bottom-up.
#[derive(Debug, Default)]
pub struct Materializer {
    visiting: Vec<usize>,
    out: Option<Value>,
}

impl Materializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with shared identities already on the traversal path, so that
    /// materializing a subtree still detects cycles back into its ancestors.
    pub fn with_visiting(visiting: Vec<usize>) -> Self {
        Self {
            visiting,
            out: None,
        }
    }

    /// Materialize `value` with the current traversal state.
    pub fn value_of(&mut self, value: &dyn Inspect) -> Value {
        value.accept(self);
        self.out.take().unwrap_or(Value::Null)
    }
}

impl Visitor for Materializer {
    fn visit_leaf(&mut self, value: Value) {
        self.out = Some(value);
    }

    fn visit_struct(&mut self, name: &str, fields: &[Field<'_>]) {
        let fields = fields
            .iter()
            .map(|field| (field.name.to_string(), self.value_of(field.value)))
            .collect();
        self.out = Some(Value::Record {
            name: name.to_string(),
            fields,
        });
    }

    fn visit_sequence(&mut self, elements: &[&dyn Inspect]) {
        let items = elements.iter().map(|e| self.value_of(*e)).collect();
        self.out = Some(Value::List(items));
    }

    fn visit_map(&mut self, entries: &[(String, &dyn Inspect)]) {
        let map: BTreeMap<String, Value> = entries
            .iter()
            .map(|(key, value)| (key.clone(), self.value_of(*value)))
            .collect();
        self.out = Some(Value::Map(map));
    }

    fn visit_optional(&mut self, inner: Option<&dyn Inspect>) {
        let value = match inner {
            Some(inner) => self.value_of(inner),
            None => Value::Null,
        };
        self.out = Some(value);
    }

    fn visit_shared(&mut self, identity: usize, target: &dyn Inspect) {
        if self.visiting.contains(&identity) {
            trace!(identity, "circular reference truncated during materialization");
            self.out = Some(Value::Circular);
            return;
        }
        self.visiting.push(identity);
        let value = self.value_of(target);
        self.visiting.pop();
        self.out = Some(value);
    }
}
