use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::descriptor::TypeDescriptor;
use crate::path::{ArrayIndex, FieldPath};
use crate::value::Value;

/// One flattened field of a walked value.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldInfo {
    pub path: FieldPath,
    pub value: Value,
    /// Declared type, with `Option<…>` preserved.
    pub declared_type: TypeDescriptor,
    /// Sequence breadcrumbs from the root down to this field.
    pub array_indices: Vec<ArrayIndex>,
}

impl FieldInfo {
    pub fn new(
        path: FieldPath,
        value: Value,
        declared_type: TypeDescriptor,
        array_indices: Vec<ArrayIndex>,
    ) -> Self {
        Self {
            path,
            value,
            declared_type,
            array_indices,
        }
    }

    /// Move this field to `path`, recomputing its breadcrumbs from the new
    /// path.
    pub fn relocated(mut self, path: FieldPath) -> Self {
        self.array_indices = path.array_indices();
        self.path = path;
        self
    }
}

/// Flattened view of a value: path → field, iterated in path order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldMap {
    fields: BTreeMap<FieldPath, FieldInfo>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field under its own path, returning any field it replaced.
    pub fn insert(&mut self, info: FieldInfo) -> Option<FieldInfo> {
        self.fields.insert(info.path.clone(), info)
    }

    pub fn get(&self, path: &str) -> Option<&FieldInfo> {
        self.fields.get(path)
    }

    pub fn remove(&mut self, path: &str) -> Option<FieldInfo> {
        self.fields.remove(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.fields.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> btree_map::Values<'_, FieldPath, FieldInfo> {
        self.fields.values()
    }

    pub fn paths(&self) -> btree_map::Keys<'_, FieldPath, FieldInfo> {
        self.fields.keys()
    }

    /// Fields strictly below `ancestor`, in path order.
    pub fn descendants<'a>(
        &'a self,
        ancestor: &'a FieldPath,
    ) -> impl Iterator<Item = &'a FieldInfo> + 'a {
        self.fields
            .range::<FieldPath, _>(ancestor..)
            .skip_while(move |(path, _)| *path == ancestor)
            .take_while(move |(path, _)| path.as_str().starts_with(ancestor.as_str()))
            .filter(move |(path, _)| path.is_descendant_of(ancestor))
            .map(|(_, info)| info)
    }
}

impl FromIterator<FieldInfo> for FieldMap {
    fn from_iter<I: IntoIterator<Item = FieldInfo>>(iter: I) -> Self {
        let mut map = Self::new();
        for info in iter {
            map.insert(info);
        }
        map
    }
}

impl IntoIterator for FieldMap {
    type Item = FieldInfo;
    type IntoIter = btree_map::IntoValues<FieldPath, FieldInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_values()
    }
}

impl<'a> IntoIterator for &'a FieldMap {
    type Item = &'a FieldInfo;
    type IntoIter = btree_map::Values<'a, FieldPath, FieldInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.values()
    }
}
