use std::collections::BTreeSet;

use fieldcmp_mapping::apply_mappings;
use fieldcmp_types::{
    is_leaf, ComparisonResult, DiffKind, Difference, FieldInfo, FieldMap, FieldPath,
    TypeDescriptor,
};
use tracing::{debug, trace};

use crate::comparers::numbers_equal;
use crate::options::ComparisonOptions;
use crate::registry::Verdict;

/// Compare two walked field maps under `options`.
///
/// Convenience for `DiffEngine::new(options).compare(..)`.
pub fn diff_field_maps(
    case_name: &str,
    left: FieldMap,
    right: FieldMap,
    options: &ComparisonOptions,
) -> ComparisonResult {
    DiffEngine::new(options).compare(case_name, left, right)
}

/// Field-by-field comparison of two flattened values.
///
/// For each left path, in path order:
/// 1. skip it if it is ignored;
/// 2. report `ExtraLeft` if the right side lacks it;
/// 3. defer to a matching custom comparer, whose verdict is final;
/// 4. on a declared-type mismatch, compare by value if pointer-agnostic
///    mode covers the pair, otherwise report `TypeDiff`;
/// 5. report `ValueDiff` on unequal values.
///
/// Right paths never visited are reported as `ExtraRight`.
#[derive(Debug, Clone, Copy)]
pub struct DiffEngine<'a> {
    options: &'a ComparisonOptions,
}

impl<'a> DiffEngine<'a> {
    pub fn new(options: &'a ComparisonOptions) -> Self {
        Self { options }
    }

    /// Apply the configured mappings to `right`, then diff it against `left`.
    pub fn compare(&self, case_name: &str, left: FieldMap, right: FieldMap) -> ComparisonResult {
        let right = apply_mappings(right, &self.options.field_mappings);

        let (absorbed_left, absorbed_right) = if self.options.pointer_agnostic {
            absorb_absent_composites(&left, &right)
        } else {
            Default::default()
        };

        let mut differences = Vec::new();
        let mut visited: BTreeSet<&FieldPath> = BTreeSet::new();

        for l in &left {
            if self.is_ignored(&l.path) || absorbed_left.contains(&l.path) {
                continue;
            }
            match right.get(l.path.as_str()) {
                None => differences.push(extra_left(l)),
                Some(r) => {
                    visited.insert(&r.path);
                    if let Some(diff) = self.compare_pair(l, r) {
                        differences.push(diff);
                    }
                }
            }
        }

        for r in &right {
            if visited.contains(&r.path)
                || self.is_ignored(&r.path)
                || absorbed_right.contains(&r.path)
            {
                continue;
            }
            differences.push(extra_right(r));
        }

        for diff in &differences {
            trace!(kind = %diff.kind, path = ?diff.path(), "difference");
        }
        debug!(
            case = case_name,
            left_fields = left.len(),
            right_fields = right.len(),
            differences = differences.len(),
            "comparison complete"
        );

        ComparisonResult::new(case_name, differences)
    }

    fn is_ignored(&self, path: &FieldPath) -> bool {
        let ignore = &self.options.ignore_fields;
        !ignore.is_empty()
            && (ignore.contains(path.as_str()) || path.segment_names().any(|n| ignore.contains(n)))
    }

    fn compare_pair(&self, l: &FieldInfo, r: &FieldInfo) -> Option<Difference> {
        let registry = &self.options.custom_comparers;
        if !registry.is_empty() {
            let (left_name, right_name) = (comparer_type_name(l), comparer_type_name(r));
            if let Some((name, comparer)) = registry.lookup(&left_name, &right_name) {
                trace!(path = %l.path, comparer = name, "custom comparer selected");
                return match comparer.compare(&l.value, &r.value) {
                    Verdict::Equal => None,
                    Verdict::Differ(message) => Some(paired(
                        DiffKind::CustomDiff,
                        l,
                        r,
                        format!("custom comparer '{name}' reported a difference: {message}"),
                    )),
                };
            }
        }

        if declared_mismatch(l, r) {
            if self.options.pointer_agnostic && l.declared_type.is_optional_pair(&r.declared_type) {
                return (!optional_pair_equal(l, r)).then(|| value_diff(l, r));
            }
            return Some(paired(
                DiffKind::TypeDiff,
                l,
                r,
                format!("type differs: {} vs {}", l.declared_type, r.declared_type),
            ));
        }

        (!values_equal(l, r)).then(|| value_diff(l, r))
    }
}

/// Name a field's type is looked up under: the optional-stripped declared
/// name, or the runtime kind for dynamically typed values.
fn comparer_type_name(info: &FieldInfo) -> String {
    match info.declared_type.base() {
        TypeDescriptor::Dynamic => info.value.kind_name(),
        base => base.to_string(),
    }
}

/// Declared types disagree in a way that matters.
///
/// Differences between composite types are left to their children, except
/// that two empty sequences must agree on element type. Dynamic values are
/// compatible with anything and compared by value.
fn declared_mismatch(l: &FieldInfo, r: &FieldInfo) -> bool {
    let (lt, rt) = (&l.declared_type, &r.declared_type);
    if lt == rt {
        return false;
    }
    if *lt.base() == TypeDescriptor::Dynamic || *rt.base() == TypeDescriptor::Dynamic {
        return false;
    }
    if is_leaf(lt, Some(&l.value)) || is_leaf(rt, Some(&r.value)) {
        return true;
    }
    empty_sequences_incompatible(l, r)
}

fn empty_sequences_incompatible(l: &FieldInfo, r: &FieldInfo) -> bool {
    if !(l.value.is_null() && r.value.is_null()) {
        return false;
    }
    match (l.declared_type.element(), r.declared_type.element()) {
        (Some(a), Some(b)) => !elements_compatible(a.base(), b.base()),
        _ => false,
    }
}

fn elements_compatible(a: &TypeDescriptor, b: &TypeDescriptor) -> bool {
    match (a, b) {
        (TypeDescriptor::Struct { name: x, .. }, TypeDescriptor::Struct { name: y, .. }) => x == y,
        _ => a == b,
    }
}

/// `Option<T>` against `T`: absent equals the zero value of `T`, present
/// compares by value.
fn optional_pair_equal(l: &FieldInfo, r: &FieldInfo) -> bool {
    let left_absent = l.declared_type.is_optional() && l.value.is_null();
    let right_absent = r.declared_type.is_optional() && r.value.is_null();
    match (left_absent, right_absent) {
        (true, false) => r.value.is_zero(),
        (false, true) => l.value.is_zero(),
        _ => l.value == r.value,
    }
}

fn values_equal(l: &FieldInfo, r: &FieldInfo) -> bool {
    if l.value == r.value {
        return true;
    }
    let dynamic = l.declared_type.contains_dynamic() || r.declared_type.contains_dynamic();
    dynamic && numbers_equal(&l.value, &r.value)
}

/// Pointer-agnostic absorption of absent optional composites.
///
/// An absent `Option<Composite>` on one side whose path the other side only
/// has as descendants compares equal when every such descendant holds a
/// zero value. Returns the absorbed paths of each side.
fn absorb_absent_composites(
    left: &FieldMap,
    right: &FieldMap,
) -> (BTreeSet<FieldPath>, BTreeSet<FieldPath>) {
    let mut absorbed_left = BTreeSet::new();
    let mut absorbed_right = BTreeSet::new();
    absorb_into(left, right, &mut absorbed_left, &mut absorbed_right);
    absorb_into(right, left, &mut absorbed_right, &mut absorbed_left);
    (absorbed_left, absorbed_right)
}

fn absorb_into(
    absent_side: &FieldMap,
    present_side: &FieldMap,
    absent_paths: &mut BTreeSet<FieldPath>,
    present_paths: &mut BTreeSet<FieldPath>,
) {
    for info in absent_side {
        if !info.value.is_null()
            || !info.declared_type.is_optional()
            || is_leaf(&info.declared_type, None)
            || present_side.contains(info.path.as_str())
        {
            continue;
        }
        let descendants: Vec<&FieldInfo> = present_side.descendants(&info.path).collect();
        if descendants.is_empty() || !descendants.iter().all(|d| d.value.is_zero()) {
            continue;
        }
        trace!(
            path = %info.path,
            descendants = descendants.len(),
            "absent optional matches zero-valued counterpart"
        );
        absent_paths.insert(info.path.clone());
        present_paths.extend(descendants.into_iter().map(|d| d.path.clone()));
    }
}

// ---------------------------------------------------------------------------
// Difference construction
// ---------------------------------------------------------------------------

fn extra_left(l: &FieldInfo) -> Difference {
    Difference {
        kind: DiffKind::ExtraLeft,
        left_path: Some(l.path.clone()),
        right_path: None,
        left_value: Some(l.value.clone()),
        right_value: None,
        left_type: Some(l.declared_type.clone()),
        right_type: None,
        array_indices: l.array_indices.clone(),
        message: format!("field {} exists on the left but not on the right", l.path),
    }
}

fn extra_right(r: &FieldInfo) -> Difference {
    Difference {
        kind: DiffKind::ExtraRight,
        left_path: None,
        right_path: Some(r.path.clone()),
        left_value: None,
        right_value: Some(r.value.clone()),
        left_type: None,
        right_type: Some(r.declared_type.clone()),
        array_indices: r.array_indices.clone(),
        message: format!("field {} exists on the right but not on the left", r.path),
    }
}

fn value_diff(l: &FieldInfo, r: &FieldInfo) -> Difference {
    paired(
        DiffKind::ValueDiff,
        l,
        r,
        format!("value differs: {} vs {}", l.value, r.value),
    )
}

fn paired(kind: DiffKind, l: &FieldInfo, r: &FieldInfo, message: String) -> Difference {
    Difference {
        kind,
        left_path: Some(l.path.clone()),
        right_path: Some(r.path.clone()),
        left_value: Some(l.value.clone()),
        right_value: Some(r.value.clone()),
        left_type: Some(l.declared_type.clone()),
        right_type: Some(r.declared_type.clone()),
        array_indices: l.array_indices.clone(),
        message,
    }
}
