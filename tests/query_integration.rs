//! Query strings through the URL-encoded adapter

use sluice::prelude::*;
use sluice::{assert_failures, assert_valid, ResultNode};

fn config() -> ContentConfiguration {
    ContentConfiguration::default()
}

fn search() -> Validations {
    let mut validations = Validations::new();
    validations.add("q", string::count(2..));
    validations.add_optional("page", number::min(1_u32));
    validations.add_optional("exact", Validator::<bool>::valid());
    validations
}

#[test]
fn scalars_are_parsed_leniently() {
    let report = search()
        .validate_query("q=rust&page=3&exact=on", &config())
        .unwrap();
    assert_valid!(report);
}

#[test]
fn leading_question_mark_is_ignored() {
    let report = search().validate_query("?q=rust", &config()).unwrap();
    assert_valid!(report);
    assert_eq!(
        report.get("page").and_then(ResultNode::as_outcome),
        Some(&Outcome::Skipped)
    );
}

#[test]
fn unparsable_scalars_are_type_mismatches() {
    let report = search()
        .validate_query("q=r&page=first&exact=maybe", &config())
        .unwrap();
    assert_failures!(
        report,
        [
            "q is less than minimum of 2 character(s)",
            "page is not a(n) u32",
            "exact is not a(n) bool",
        ]
    );
}

#[test]
fn empty_values_are_null_except_for_strings() {
    let mut validations = Validations::new();
    validations.add("nickname", (!string::empty()).nil_ignoring());
    validations.add("name", !string::empty());
    validations.add("age", Validator::<u8>::valid());
    let report = validations
        .validate_query("nickname=&name=&age=", &config())
        .unwrap();
    assert_failures!(report, ["name is empty", "age cannot be null"]);
}

#[test]
fn bracketed_names_build_nested_objects() {
    let mut validations = Validations::new();
    validations.add_nested("address", |address| {
        address.add("city", !string::empty());
        address.add("zip", string::count(4..=5));
    });
    let report = validations
        .validate_query("address[city]=Oslo&address[zip]=012", &config())
        .unwrap();
    assert_failures!(report, ["address.zip is less than minimum of 4 character(s)"]);
}

#[test]
fn repeated_names_build_arrays() {
    let mut validations = Validations::new();
    validations.add("tag", collection::count::<String>(1..=2));
    let report = validations
        .validate_query("tag=a&tag=b&tag=c", &config())
        .unwrap();
    assert_failures!(report, ["tag is greater than maximum of 2 item(s)"]);
}

#[test]
fn a_single_value_is_a_one_item_array() {
    let mut validations = Validations::new();
    validations.add("tag", collection::count::<String>(1..=2));
    let report = validations.validate_query("tag=a", &config()).unwrap();
    assert_valid!(report);
}

#[test]
fn nan_is_outside_every_bounded_range() {
    let mut validations = Validations::new();
    validations.add("score", number::range(0.0_f64..=1.0));
    let report = validations.validate_query("score=NaN", &config()).unwrap();
    assert_failures!(report, ["score is not comparable to 0"]);
}

#[test]
fn indexed_groups_are_checked_per_element() {
    let mut validations = Validations::new();
    validations.add_each("pets", |_, pet| {
        pet.add("name", !string::empty());
        pet.add("age", number::max(40_u8));
    });
    let report = validations
        .validate_query(
            "pets[1][name]=Tom&pets[1][age]=99&pets[0][name]=Rex&pets[0][age]=3",
            &config(),
        )
        .unwrap();
    assert_failures!(report, ["pets[1].age is greater than maximum of 40"]);
}

#[test]
fn pushed_groups_start_a_new_element_per_repeated_member() {
    let mut validations = Validations::new();
    validations.add_each("pets", |_, pet| {
        pet.add("name", string::count(3..));
    });
    let report = validations
        .validate_query("pets[][name]=Rex&pets[][name]=Al", &config())
        .unwrap();
    let pets = report.get("pets").and_then(ResultNode::as_sequence).unwrap();
    assert_eq!(pets.len(), 2);
    assert_failures!(report, ["pets[1].name is less than minimum of 3 character(s)"]);
}

#[test]
fn conflicting_shapes_abort_as_corrupted_input() {
    let err = search().validate_query("q=a&q[x]=b", &config()).unwrap_err();
    assert!(err.is_decode());
}

#[test]
fn sparse_indices_abort_as_corrupted_input() {
    let mut validations = Validations::new();
    validations.add_each("pets", |_, pet| {
        pet.add("name", !string::empty());
    });
    let err = validations
        .validate_query("pets[0][name]=Rex&pets[7][name]=", &config())
        .unwrap_err();
    assert!(err.is_decode());
}
