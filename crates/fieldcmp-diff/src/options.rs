use std::collections::BTreeSet;

use fieldcmp_mapping::FieldMapping;

use crate::registry::{CustomComparerRegistry, CustomTypeComparer};

/// Settings for one comparator.
#[derive(Clone, Debug, Default)]
pub struct ComparisonOptions {
    /// Renames applied to the right-hand side before comparing.
    pub field_mappings: Vec<FieldMapping>,
    pub custom_comparers: CustomComparerRegistry,
    /// When `true`, an absent `Option<T>` equals the zero value of `T` and a
    /// present one compares by value against a plain `T`.
    pub pointer_agnostic: bool,
    /// Field names to skip. A path is skipped when its leaf name or any
    /// ancestor name is listed, or when the full path is listed.
    pub ignore_fields: BTreeSet<String>,
}

impl ComparisonOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mapping(mut self, mapping: FieldMapping) -> Self {
        self.field_mappings.push(mapping);
        self
    }

    pub fn with_comparer(mut self, name: impl Into<String>, comparer: CustomTypeComparer) -> Self {
        self.custom_comparers.register(name, comparer);
        self
    }

    pub fn with_pointer_agnostic(mut self, enabled: bool) -> Self {
        self.pointer_agnostic = enabled;
        self
    }

    pub fn ignoring(mut self, field: impl Into<String>) -> Self {
        self.ignore_fields.insert(field.into());
        self
    }
}
