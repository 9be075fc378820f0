use fieldcmp_inspect::{Field, Inspect, Materializer, Visitor};
use fieldcmp_types::{is_leaf, ArrayIndex, FieldInfo, FieldMap, FieldPath, TypeDescriptor, Value};
use tracing::{debug, trace};

/// Flatten `value` into a [`FieldMap`].
///
/// Convenience for `PathWalker::new().walk(value)`.
pub fn walk(value: &dyn Inspect) -> FieldMap {
    PathWalker::new().walk(value)
}

/// Position the walker is currently recording into.
#[derive(Debug)]
struct Frame {
    path: FieldPath,
    indices: Vec<ArrayIndex>,
    /// Declared type at the point the path was entered. Optionals and shared
    /// references do not replace it, so `Option<T>` survives unwrapping.
    declared: TypeDescriptor,
    /// Value already materialized for this position by an enclosing dynamic
    /// sequence. Consumed by the first composite visit that can use it.
    sample: Option<Value>,
}

/// Single-use walker that flattens one value into path → field entries.
///
/// All traversal state (the frame stack and the set of shared references on
/// the current path) lives in the walker, so independent walks never
/// interfere.
///
/// Emission rules:
/// - absent optionals are stored as `Null` with their `Option<…>` type;
/// - structs with visible fields are descended into, structs without are
///   stored whole as a [`Value::Record`];
/// - sequences are always stored. Leaf sequences hold the whole list,
///   composite ones hold [`Value::Elements`] and each element is walked at
///   `parent[i]`. Empty sequences are stored as `Null`;
/// - maps are stored whole, `Null` when empty;
/// - re-entering a shared reference already on the current path stores
///   [`Value::Circular`] and stops.
///
/// A sequence whose element type contains `Dynamic` is materialized once to
/// classify it. The resulting values are handed down to the nested
/// positions, so nested dynamic sequences reuse them instead of
/// materializing their subtree again.
#[derive(Debug, Default)]
pub struct PathWalker {
    fields: FieldMap,
    frames: Vec<Frame>,
    visiting: Vec<usize>,
    circular: usize,
    materialized: usize,
}

impl PathWalker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk `value` from the root and return every emitted field.
    pub fn walk(mut self, value: &dyn Inspect) -> FieldMap {
        self.traverse(value);
        self.fields
    }

    fn traverse(&mut self, value: &dyn Inspect) {
        self.enter(FieldPath::root(), Vec::new(), value, None);
        debug!(
            fields = self.fields.len(),
            circular = self.circular,
            materialized = self.materialized,
            root_type = %value.declared_type(),
            "walk complete"
        );
    }

    fn enter(
        &mut self,
        path: FieldPath,
        indices: Vec<ArrayIndex>,
        value: &dyn Inspect,
        sample: Option<Value>,
    ) {
        self.frames.push(Frame {
            path,
            indices,
            declared: value.declared_type(),
            sample,
        });
        value.accept(self);
        self.frames.pop();
    }

    fn take_sample(&mut self) -> Option<Value> {
        self.frames.last_mut().and_then(|f| f.sample.take())
    }

    fn emit(&mut self, value: Value) {
        let Some(frame) = self.frames.last() else {
            return;
        };
        trace!(path = %frame.path, declared = %frame.declared, "emit field");
        self.fields.insert(FieldInfo::new(
            frame.path.clone(),
            value,
            frame.declared.clone(),
            frame.indices.clone(),
        ));
    }

    fn materializer(&self) -> Materializer {
        Materializer::with_visiting(self.visiting.clone())
    }

    fn current(&self) -> Option<(FieldPath, Vec<ArrayIndex>, TypeDescriptor)> {
        self.frames
            .last()
            .map(|f| (f.path.clone(), f.indices.clone(), f.declared.clone()))
    }
}

impl Visitor for PathWalker {
    fn visit_leaf(&mut self, value: Value) {
        self.emit(value);
    }

    fn visit_struct(&mut self, name: &str, fields: &[Field<'_>]) {
        let Some((path, indices, _)) = self.current() else {
            return;
        };
        let sample = match self.take_sample() {
            Some(Value::Record { fields: sampled, .. }) if sampled.len() == fields.len() => {
                Some(sampled)
            }
            _ => None,
        };

        if !fields.iter().any(|f| f.exported) {
            let fields = match sample {
                Some(sampled) => sampled,
                None => {
                    let mut materializer = self.materializer();
                    fields
                        .iter()
                        .map(|f| (f.name.to_string(), materializer.value_of(f.value)))
                        .collect()
                }
            };
            self.emit(Value::Record {
                name: name.to_string(),
                fields,
            });
            return;
        }

        let mut sampled = sample.map(|s| s.into_iter().map(|(_, value)| value));
        for field in fields {
            let field_sample = sampled.as_mut().and_then(Iterator::next);
            if field.exported {
                self.enter(path.child(field.name), indices.clone(), field.value, field_sample);
            }
        }
    }

    fn visit_sequence(&mut self, elements: &[&dyn Inspect]) {
        let Some((path, indices, declared)) = self.current() else {
            return;
        };

        let mut sampled = None;
        let leaf = if declared.contains_dynamic() {
            let items = match self.take_sample() {
                Some(Value::List(items)) if items.len() == elements.len() => items,
                _ => {
                    self.materialized += 1;
                    let mut materializer = self.materializer();
                    elements.iter().map(|e| materializer.value_of(*e)).collect()
                }
            };
            let items = Value::List(items);
            let leaf = is_leaf(&declared, Some(&items));
            sampled = Some(items);
            leaf
        } else {
            is_leaf(&declared, None)
        };

        if elements.is_empty() {
            self.emit(Value::Null);
            return;
        }

        if leaf {
            let items = match sampled {
                Some(items) => items,
                None => {
                    let mut materializer = self.materializer();
                    Value::List(elements.iter().map(|e| materializer.value_of(*e)).collect())
                }
            };
            self.emit(items);
            return;
        }

        self.emit(Value::Elements(elements.len()));
        let mut samples = match sampled {
            Some(Value::List(items)) => Some(items.into_iter()),
            _ => None,
        };
        for (i, element) in elements.iter().enumerate() {
            let mut element_indices = indices.clone();
            element_indices.push(ArrayIndex::new(path.as_str(), i));
            let sample = samples.as_mut().and_then(Iterator::next);
            self.enter(path.index(i), element_indices, *element, sample);
        }
    }

    fn visit_map(&mut self, entries: &[(String, &dyn Inspect)]) {
        if entries.is_empty() {
            self.emit(Value::Null);
            return;
        }
        if let Some(Value::Map(map)) = self.take_sample() {
            self.emit(Value::Map(map));
            return;
        }
        let mut materializer = self.materializer();
        let map = entries
            .iter()
            .map(|(key, value)| (key.clone(), materializer.value_of(*value)))
            .collect();
        self.emit(Value::Map(map));
    }

    fn visit_optional(&mut self, inner: Option<&dyn Inspect>) {
        match inner {
            Some(inner) => inner.accept(self),
            None => self.emit(Value::Null),
        }
    }

    fn visit_shared(&mut self, identity: usize, target: &dyn Inspect) {
        if self.visiting.contains(&identity) {
            self.circular += 1;
            if let Some(frame) = self.frames.last() {
                debug!(path = %frame.path, "circular reference truncated");
            }
            self.emit(Value::Circular);
            return;
        }
        self.visiting.push(identity);
        target.accept(self);
        self.visiting.pop();
    }
}
