use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use std::time::Duration;

use chrono::{TimeDelta, TimeZone, Utc};
use proptest::prelude::*;
use uuid::Uuid;

use fieldcmp::{
    compare, inspect_enum, inspect_struct, string_form, time_tolerance, ComparisonConfig,
    ComparisonOptions, DiffKind, FieldMapping, Reporter, StructuralComparator, SummaryReporter,
    TextReporter, Value,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn strict() -> StructuralComparator {
    StructuralComparator::default()
}

// ---------------------------------------------------------------------------
// Basic scenarios
// ---------------------------------------------------------------------------

struct Simple {
    name: String,
    value: i32,
}

inspect_struct!(Simple { name as "Name", value as "Value" });

struct Named {
    name: String,
}

inspect_struct!(Named { name as "Name" });

struct WithExtra {
    name: String,
    extra: i32,
}

inspect_struct!(WithExtra { name as "Name", extra as "ExtraField" });

#[test]
fn identical_values_have_no_differences() {
    init_tracing();
    let left = Simple { name: "test".into(), value: 100 };
    let right = Simple { name: "test".into(), value: 100 };

    let result = strict().compare_named("identical", &left, &right);
    assert!(!result.has_diff);
    assert!(result.differences.is_empty());
}

#[test]
fn changed_string_is_one_value_diff() {
    let result = strict().compare(
        &Named { name: "test1".into() },
        &Named { name: "test2".into() },
    );
    assert_eq!(result.len(), 1);
    let diff = &result.differences[0];
    assert_eq!(diff.kind, DiffKind::ValueDiff);
    assert_eq!(diff.path().map(|p| p.as_str()), Some("Name"));
}

#[test]
fn field_missing_on_right_is_extra_left() {
    let result = strict().compare(
        &WithExtra { name: "n".into(), extra: 1 },
        &Named { name: "n".into() },
    );
    assert_eq!(result.len(), 1);
    let diff = &result.differences[0];
    assert_eq!(diff.kind, DiffKind::ExtraLeft);
    assert_eq!(diff.path().map(|p| p.as_str()), Some("ExtraField"));
}

struct IntItems {
    items: Vec<i32>,
}

struct StrItems {
    items: Vec<String>,
}

inspect_struct!(IntItems { items as "Items" });
inspect_struct!(StrItems { items as "Items" });

#[test]
fn sequence_element_type_change_is_type_diff() {
    let result = strict().compare(
        &IntItems { items: vec![1, 2, 3] },
        &StrItems { items: vec!["1".into(), "2".into(), "3".into()] },
    );
    assert_eq!(result.len(), 1);
    let diff = &result.differences[0];
    assert_eq!(diff.kind, DiffKind::TypeDiff);
    assert_eq!(diff.path().map(|p| p.as_str()), Some("Items"));
}

struct Stamped {
    at: chrono::DateTime<Utc>,
}

inspect_struct!(Stamped { at as "At" });

#[test]
fn time_comparer_tolerates_small_skew() {
    let mut options = ComparisonOptions::new();
    options.custom_comparers.register_pair(
        "DateTime<Utc>",
        "DateTime<Utc>",
        time_tolerance(["DateTime<Utc>"], Duration::from_secs(60)),
    );
    let comparator = StructuralComparator::new(options);
    let t0 = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();

    let close = comparator.compare(&Stamped { at: t0 }, &Stamped { at: t0 + TimeDelta::seconds(30) });
    assert!(!close.has_diff);

    let far = comparator.compare(&Stamped { at: t0 }, &Stamped { at: t0 + TimeDelta::minutes(2) });
    assert_eq!(far.len(), 1);
    assert_eq!(far.differences[0].kind, DiffKind::CustomDiff);
}

struct Event {
    name: String,
    note: String,
    at: chrono::DateTime<Utc>,
}

struct EventRow {
    name: String,
    note: String,
    at: String,
}

inspect_struct!(Event { name as "Name", note as "Note", at as "At" });
inspect_struct!(EventRow { name as "Name", note as "Note", at as "At" });

const CLOCK_CONFIG: &str = r#"
[[comparers]]
name = "clock"
kind = "time_tolerance"
types = ["DateTime<Utc>", "String"]
tolerance_secs = 60
"#;

#[test]
fn configured_time_comparer_bridges_rfc3339_strings() {
    let config = ComparisonConfig::from_toml_str(CLOCK_CONFIG).unwrap();
    let comparator = StructuralComparator::from_config(config).unwrap();
    let t0 = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let event = Event { name: "alice".into(), note: "checked in".into(), at: t0 };

    let close = EventRow {
        name: "alice".into(),
        note: "checked in".into(),
        at: (t0 + TimeDelta::seconds(30)).to_rfc3339(),
    };
    let result = comparator.compare(&event, &close);
    assert!(!result.has_diff, "unexpected: {:?}", result.differences);

    let far = EventRow {
        name: "alice".into(),
        note: "checked out".into(),
        at: (t0 + TimeDelta::minutes(2)).to_rfc3339(),
    };
    let result = comparator.compare(&event, &far);
    assert_eq!(result.len(), 2);
    assert_eq!(result.at_path("At").next().unwrap().kind, DiffKind::CustomDiff);
    assert_eq!(result.at_path("Note").next().unwrap().kind, DiffKind::ValueDiff);
}

#[test]
fn configured_time_comparer_handles_same_typed_times() {
    let config = ComparisonConfig::from_toml_str(CLOCK_CONFIG).unwrap();
    let comparator = StructuralComparator::from_config(config).unwrap();
    let t0 = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();

    let left = Event { name: "bob".into(), note: String::new(), at: t0 };
    let right = Event { name: "bob".into(), note: String::new(), at: t0 + TimeDelta::seconds(45) };
    assert!(!comparator.compare(&left, &right).has_diff);
}

// ---------------------------------------------------------------------------
// Mappings
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
struct Leaf {
    c: i32,
}

struct Mid {
    b: Vec<Leaf>,
}

struct Nested {
    a: Mid,
}

struct Item {
    y: i32,
}

struct Flat {
    x: Vec<Item>,
}

inspect_struct!(Leaf { c as "C" });
inspect_struct!(Mid { b as "B" });
inspect_struct!(Nested { a as "A" });
inspect_struct!(Item { y as "Y" });
inspect_struct!(Flat { x as "X" });

fn nested(values: &[i32]) -> Nested {
    Nested {
        a: Mid {
            b: values.iter().map(|&c| Leaf { c }).collect(),
        },
    }
}

fn flat(values: &[i32]) -> Flat {
    Flat {
        x: values.iter().map(|&y| Item { y }).collect(),
    }
}

fn wildcard_options() -> ComparisonOptions {
    ComparisonOptions::new()
        .with_mapping(FieldMapping::new("X", "A.B").unwrap())
        .with_mapping(FieldMapping::new("X[].Y", "A.B[].C").unwrap())
}

#[test]
fn wildcard_mapping_relocates_every_index() {
    let comparator = StructuralComparator::new(wildcard_options());
    let result = comparator.compare(&nested(&[1, 2, 3]), &flat(&[1, 2, 3]));
    assert!(!result.has_diff, "unexpected: {:?}", result.differences);

    let changed = comparator.compare(&nested(&[1, 2, 3]), &flat(&[1, 9, 3]));
    assert_eq!(changed.len(), 1);
    let diff = &changed.differences[0];
    assert_eq!(diff.kind, DiffKind::ValueDiff);
    assert_eq!(diff.left_path.as_ref().map(|p| p.as_str()), Some("A.B[1].C"));
    assert_eq!(diff.array_indices.len(), 1);
}

#[test]
fn mapped_sequence_length_change_reports_extras() {
    let comparator = StructuralComparator::new(wildcard_options());
    let result = comparator.compare(&nested(&[1, 2]), &flat(&[1, 2, 3]));

    let at_len = result.at_path("A.B").next().unwrap();
    assert_eq!(at_len.kind, DiffKind::ValueDiff);
    assert_eq!(at_len.left_value, Some(Value::Elements(2)));
    assert_eq!(at_len.right_value, Some(Value::Elements(3)));
    assert_eq!(result.at_path("A.B[2].C").next().unwrap().kind, DiffKind::ExtraRight);
}

#[test]
fn unmatched_mapping_surfaces_as_extras() {
    let options = ComparisonOptions::new().with_mapping(FieldMapping::new("Nope", "Name").unwrap());
    let result = compare(
        &Named { name: "n".into() },
        &WithExtra { name: "n".into(), extra: 1 },
        &options,
    );
    assert_eq!(result.len(), 1);
    assert_eq!(result.differences[0].kind, DiffKind::ExtraRight);
}

struct Two {
    a: i32,
    b: i32,
}

inspect_struct!(Two { a as "A", b as "B" });

#[test]
fn swap_mapping_exchanges_fields() {
    let options = ComparisonOptions::new()
        .with_mapping(FieldMapping::new("A", "B").unwrap())
        .with_mapping(FieldMapping::new("B", "A").unwrap());
    let result = compare(&Two { a: 1, b: 2 }, &Two { a: 2, b: 1 }, &options);
    assert!(!result.has_diff, "unexpected: {:?}", result.differences);
}

// ---------------------------------------------------------------------------
// Pointer-agnostic mode
// ---------------------------------------------------------------------------

struct Address {
    city: String,
    zip: u32,
}

inspect_struct!(Address { city as "City", zip as "Zip" });

struct OptionalSide {
    count: Option<i32>,
    address: Option<Address>,
}

struct PlainSide {
    count: i32,
    address: Address,
}

inspect_struct!(OptionalSide { count as "Count", address as "Address" });
inspect_struct!(PlainSide { count as "Count", address as "Address" });

fn zero_plain() -> PlainSide {
    PlainSide {
        count: 0,
        address: Address { city: String::new(), zip: 0 },
    }
}

#[test]
fn pointer_agnostic_mode_equates_absent_and_zero() {
    let left = OptionalSide { count: None, address: None };

    let lenient = StructuralComparator::new(ComparisonOptions::new().with_pointer_agnostic(true));
    let result = lenient.compare(&left, &zero_plain());
    assert!(!result.has_diff, "unexpected: {:?}", result.differences);

    let result = strict().compare(&left, &zero_plain());
    assert_eq!(result.count(DiffKind::TypeDiff), 1);
    assert_eq!(result.count(DiffKind::ExtraLeft), 1);
    assert_eq!(result.count(DiffKind::ExtraRight), 2);
}

#[test]
fn pointer_agnostic_mode_compares_present_values() {
    let lenient = StructuralComparator::new(ComparisonOptions::new().with_pointer_agnostic(true));
    let left = OptionalSide {
        count: Some(5),
        address: Some(Address { city: "Oslo".into(), zip: 150 }),
    };
    let same = PlainSide {
        count: 5,
        address: Address { city: "Oslo".into(), zip: 150 },
    };
    assert!(!lenient.compare(&left, &same).has_diff);

    let other = PlainSide { count: 6, ..same };
    let result = lenient.compare(&left, &other);
    assert_eq!(result.len(), 1);
    assert_eq!(result.differences[0].kind, DiffKind::ValueDiff);
}

// ---------------------------------------------------------------------------
// Empty collections
// ---------------------------------------------------------------------------

struct MaybeList {
    values: Option<Vec<i32>>,
}

struct MaybeMap {
    values: Option<BTreeMap<String, i32>>,
}

inspect_struct!(MaybeList { values as "Values" });
inspect_struct!(MaybeMap { values as "Values" });

#[test]
fn empty_and_absent_collections_are_equal() {
    let absent = MaybeList { values: None };
    let empty = MaybeList { values: Some(Vec::new()) };
    assert!(!strict().compare(&absent, &empty).has_diff);

    let absent = MaybeMap { values: None };
    let empty = MaybeMap { values: Some(BTreeMap::new()) };
    assert!(!strict().compare(&absent, &empty).has_diff);

    let full = MaybeMap {
        values: Some(BTreeMap::from([("a".to_string(), 1)])),
    };
    assert_eq!(strict().compare(&absent, &full).count(DiffKind::ValueDiff), 1);
}

#[test]
fn hash_and_btree_maps_compare_by_content() {
    let hashed: HashMap<String, i32> = HashMap::from([("b".into(), 2), ("a".into(), 1)]);
    let ordered: BTreeMap<String, i32> = BTreeMap::from([("a".into(), 1), ("b".into(), 2)]);
    assert!(!strict().compare(&hashed, &ordered).has_diff);
}

struct Line {
    sku: String,
}

struct Entry {
    sku: String,
}

struct LineList {
    items: Vec<Line>,
}

struct EntryList {
    items: Vec<Entry>,
}

inspect_struct!(Line { sku });
inspect_struct!(Entry { sku });
inspect_struct!(LineList { items as "Items" });
inspect_struct!(EntryList { items as "Items" });

#[test]
fn empty_sequences_still_compare_element_types() {
    let result = strict().compare(&IntItems { items: vec![] }, &StrItems { items: vec![] });
    assert_eq!(result.count(DiffKind::TypeDiff), 1);

    let result = strict().compare(&LineList { items: vec![] }, &EntryList { items: vec![] });
    assert_eq!(result.count(DiffKind::TypeDiff), 1);

    let result = strict().compare(&LineList { items: vec![] }, &LineList { items: vec![] });
    assert!(!result.has_diff);
}

// ---------------------------------------------------------------------------
// Graphs and visibility
// ---------------------------------------------------------------------------

struct Node {
    name: String,
    next: Option<Rc<RefCell<Node>>>,
}

inspect_struct!(Node { name as "Name", next as "Next" });

fn ring(names: [&str; 2]) -> Rc<RefCell<Node>> {
    let a = Rc::new(RefCell::new(Node { name: names[0].into(), next: None }));
    let b = Rc::new(RefCell::new(Node {
        name: names[1].into(),
        next: Some(Rc::clone(&a)),
    }));
    a.borrow_mut().next = Some(b);
    a
}

fn unlink(node: &Rc<RefCell<Node>>) {
    node.borrow_mut().next = None;
}

#[test]
fn cyclic_graphs_terminate_and_compare() {
    let left = ring(["a", "b"]);
    let right = ring(["a", "b"]);
    let other = ring(["a", "c"]);

    assert!(!strict().compare(&left, &right).has_diff);

    let result = strict().compare(&left, &other);
    assert_eq!(result.len(), 1);
    assert_eq!(result.differences[0].path().map(|p| p.as_str()), Some("Next.Name"));

    for node in [left, right, other] {
        unlink(&node);
    }
}

struct Account {
    id: u64,
    cache: Vec<u8>,
}

inspect_struct!(Account { id as "ID" } hidden { cache });

#[test]
fn hidden_fields_never_produce_differences() {
    let left = Account { id: 1, cache: vec![1, 2, 3] };
    let right = Account { id: 1, cache: vec![] };
    assert!(!strict().compare(&left, &right).has_diff);
}

#[derive(Debug)]
enum Status {
    Open,
    Closed,
}

inspect_enum!(Status);

struct Ticket {
    id: Uuid,
    status: Status,
}

struct TicketRow {
    id: String,
    status: Status,
}

inspect_struct!(Ticket { id as "ID", status as "Status" });
inspect_struct!(TicketRow { id as "ID", status as "Status" });

#[test]
fn cross_type_comparer_bridges_uuid_and_string() {
    let id = Uuid::from_u128(0x1234);
    let options = ComparisonOptions::new().with_comparer("ids", string_form(["Uuid", "String"]));
    let comparator = StructuralComparator::new(options);

    let left = Ticket { id, status: Status::Open };
    let right = TicketRow { id: id.to_string(), status: Status::Open };
    assert!(!comparator.compare(&left, &right).has_diff);

    let closed = TicketRow { id: id.to_string(), status: Status::Closed };
    let result = comparator.compare(&left, &closed);
    assert_eq!(result.len(), 1);
    assert_eq!(result.differences[0].path().map(|p| p.as_str()), Some("Status"));

    let result = strict().compare(&left, &right);
    assert_eq!(result.count(DiffKind::TypeDiff), 1);
}

// ---------------------------------------------------------------------------
// Configuration and reporting
// ---------------------------------------------------------------------------

#[test]
fn comparator_from_toml_file() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("compare.toml");
    std::fs::write(
        &path,
        r#"
IgnoreFields = ["Value"]

[[field_mappings]]
SourcePath = "X[].Y"
TargetPath = "A.B[].C"

[[field_mappings]]
source = "X"
target = "A.B"
"#,
    )
    .unwrap();

    let config = ComparisonConfig::load(&path).unwrap();
    let comparator = StructuralComparator::from_config(config).unwrap();

    assert!(!comparator.compare(&nested(&[4, 5]), &flat(&[4, 5])).has_diff);
    let simple = comparator.compare(
        &Simple { name: "a".into(), value: 1 },
        &Simple { name: "a".into(), value: 2 },
    );
    assert!(!simple.has_diff);
}

#[test]
fn reporters_render_comparison_results() {
    let result = strict().compare_named(
        "names",
        &Named { name: "test1".into() },
        &Named { name: "test2".into() },
    );

    let text = TextReporter::plain().render(&result).unwrap();
    assert!(text.starts_with("=== names ===\n"));
    assert!(text.contains("[1] value_diff Name"));
    assert!(text.contains("test[-1-]{+2+}"));

    let summary = SummaryReporter.render(&result).unwrap();
    assert!(summary.starts_with("names: 1 difference(s)"));
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
struct Sample {
    name: String,
    count: i32,
    tags: Vec<String>,
    score: Option<i64>,
    lines: Vec<Leaf>,
}

inspect_struct!(Sample {
    name as "Name",
    count as "Count",
    tags as "Tags",
    score as "Score",
    lines as "Lines",
});

fn arb_sample() -> impl Strategy<Value = Sample> {
    (
        "[a-c]{0,3}",
        -2i32..3,
        proptest::collection::vec("[xy]", 0..3),
        proptest::option::of(-2i64..3),
        proptest::collection::vec(-1i32..2, 0..3),
    )
        .prop_map(|(name, count, tags, score, lines)| Sample {
            name,
            count,
            tags,
            score,
            lines: lines.into_iter().map(|c| Leaf { c }).collect(),
        })
}

proptest! {
    #[test]
    fn value_equals_itself(sample in arb_sample(), agnostic in any::<bool>()) {
        let comparator = StructuralComparator::new(
            ComparisonOptions::new().with_pointer_agnostic(agnostic),
        );
        let result = comparator.compare(&sample, &sample.clone());
        prop_assert!(!result.has_diff, "unexpected: {:?}", result.differences);
    }

    #[test]
    fn swapping_sides_mirrors_differences(a in arb_sample(), b in arb_sample()) {
        let forward = strict().compare(&a, &b);
        let backward = strict().compare(&b, &a);

        prop_assert_eq!(forward.has_diff, backward.has_diff);
        prop_assert_eq!(forward.len(), backward.len());
        prop_assert_eq!(forward.count(DiffKind::ExtraLeft), backward.count(DiffKind::ExtraRight));
        prop_assert_eq!(forward.count(DiffKind::ExtraRight), backward.count(DiffKind::ExtraLeft));
        prop_assert_eq!(forward.count(DiffKind::ValueDiff), backward.count(DiffKind::ValueDiff));
        prop_assert_eq!(forward.count(DiffKind::TypeDiff), backward.count(DiffKind::TypeDiff));
    }
}
