use docmatch::{Query, Value};
use serde_json::json;

fn filter(query: serde_json::Value, docs: &[serde_json::Value]) -> Vec<serde_json::Value> {
    let query = Query::new(query);
    docs.iter()
        .filter(|doc| query.matches(&Value::from((*doc).clone())))
        .cloned()
        .collect()
}

fn mixed_scalars() -> Vec<serde_json::Value> {
    vec![
        json!({"foo": 0}),
        json!({"foo": 1}),
        json!({"foo": 2}),
        json!({"foo": "0"}),
        json!({"foo": "1"}),
        json!({"foo": "2"}),
        json!({}),
        json!({"foo": "baz"}),
        json!({"foo": {"foo": "bar"}}),
        json!({"foo": null}),
    ]
}

// ============================================================================
// Numbers and strings
// ============================================================================

#[test]
fn test_numbers_do_not_compare_with_numeric_strings() {
    let docs = mixed_scalars();
    assert_eq!(filter(json!({"foo": {"$gt": 1}}), &docs), vec![json!({"foo": 2})]);
    assert_eq!(filter(json!({"foo": {"$gte": 1}}), &docs), vec![json!({"foo": 1}), json!({"foo": 2})]);
    assert_eq!(filter(json!({"foo": {"$lt": 1}}), &docs), vec![json!({"foo": 0})]);
    assert_eq!(filter(json!({"foo": {"$lte": 1}}), &docs), vec![json!({"foo": 0}), json!({"foo": 1})]);
}

#[test]
fn test_strings_compare_lexicographically() {
    let docs = vec![
        json!({"foo": 0}),
        json!({}),
        json!({"foo": "baa"}),
        json!({"foo": "bar"}),
        json!({"foo": "baz"}),
        json!({"foo": null}),
    ];
    assert_eq!(filter(json!({"foo": {"$gt": "bar"}}), &docs), vec![json!({"foo": "baz"})]);
    assert_eq!(
        filter(json!({"foo": {"$gte": "bar"}}), &docs),
        vec![json!({"foo": "bar"}), json!({"foo": "baz"})]
    );
    assert_eq!(filter(json!({"foo": {"$lt": "bar"}}), &docs), vec![json!({"foo": "baa"})]);
    assert_eq!(
        filter(json!({"foo": {"$gt": "1"}}), &docs),
        vec![json!({"foo": "baa"}), json!({"foo": "bar"}), json!({"foo": "baz"})]
    );
}

#[test]
fn test_mixed_numeric_kinds() {
    let docs = vec![json!({"foo": 1.5}), json!({"foo": 2}), json!({"foo": 2.5})];
    assert_eq!(filter(json!({"foo": {"$gt": 2}}), &docs), vec![json!({"foo": 2.5})]);
    assert_eq!(
        filter(json!({"foo": {"$lte": 2.0}}), &docs),
        vec![json!({"foo": 1.5}), json!({"foo": 2})]
    );
}

// ============================================================================
// Null and missing fields
// ============================================================================

#[test]
fn test_null_operand_asymmetry() {
    let docs = vec![
        json!({"foo": -1}),
        json!({"foo": 0}),
        json!({}),
        json!({"foo": "baz"}),
        json!({"foo": null}),
    ];
    assert!(filter(json!({"foo": {"$gt": null}}), &docs).is_empty());
    assert!(filter(json!({"foo": {"$lt": null}}), &docs).is_empty());
    assert_eq!(filter(json!({"foo": {"$gte": null}}), &docs), vec![json!({}), json!({"foo": null})]);
    assert_eq!(filter(json!({"foo": {"$lte": null}}), &docs), vec![json!({}), json!({"foo": null})]);
}

#[test]
fn test_missing_nested_field_against_null() {
    let query = Query::new(json!({"foo.bar": {"$gt": null}}));
    assert!(!query.matches(&Value::from(json!({"foo": {"bar": 1}}))));

    let query = Query::new(json!({"foo.bar": {"$gte": null}}));
    assert!(query.matches(&Value::from(json!({"foo": {"baz": 1}}))));
    assert!(query.matches(&Value::from(json!({"foo": null}))));
    assert!(!query.matches(&Value::from(json!({"foo": {"bar": []}}))));
}

// ============================================================================
// Paths and arrays
// ============================================================================

#[test]
fn test_intermediate_indexed_array() {
    let docs = vec![
        json!({"foo": [{}, {"bar": 2}]}),
        json!({"foo": [{"bar": 2}, {}]}),
        json!({}),
        json!({"foo": [{"bar": "baz"}]}),
    ];
    assert_eq!(filter(json!({"foo.1.bar": {"$gt": 1}}), &docs), vec![json!({"foo": [{}, {"bar": 2}]})]);
}

#[test]
fn test_leaf_array_any_element() {
    let docs = vec![json!({"foo": {"bar": [0, 1]}}), json!({"foo": {"bar": [1, 2]}}), json!({})];
    assert_eq!(filter(json!({"foo.bar": {"$gt": 1}}), &docs), vec![json!({"foo": {"bar": [1, 2]}})]);
    assert_eq!(filter(json!({"foo.bar": {"$lt": 1}}), &docs), vec![json!({"foo": {"bar": [0, 1]}})]);
}

#[test]
fn test_intermediate_arrays_without_index() {
    let docs = vec![
        json!({"a": [{"b": [{"c": 0}]}]}),
        json!({"a": [{"b": [{"c": [1]}]}]}),
        json!({"a": [{"b": [{"c": 2}]}]}),
        json!({"a": {"b": "bar"}}),
    ];
    assert_eq!(
        filter(json!({"a.b.c": {"$gte": 1}}), &docs),
        vec![json!({"a": [{"b": [{"c": [1]}]}]}), json!({"a": [{"b": [{"c": 2}]}]})]
    );
}

#[test]
fn test_whole_array_comparison() {
    let docs = vec![
        json!({"foo": {"bar": ["baa"]}}),
        json!({"foo": {"bar": ["bar"]}}),
        json!({"foo": {"bar": ["zzz"]}}),
        json!({"foo": {"bar": ["bar", "baz"]}}),
        json!({"foo": {"bar": ["baz", "bar"]}}),
        json!({"foo": {"bar": ["baa", "bzz"]}}),
        json!({"foo": {"bar": ["bzz", "baa"]}}),
        json!({"foo": {"bar": ["bar", "baz", "qux"]}}),
        json!({}),
        json!({"foo": {"bar": "baz"}}),
    ];

    assert_eq!(
        filter(json!({"foo.bar": {"$gt": ["bar", "baz"]}}), &docs),
        vec![
            json!({"foo": {"bar": ["zzz"]}}),
            json!({"foo": {"bar": ["baz", "bar"]}}),
            json!({"foo": {"bar": ["bzz", "baa"]}}),
            json!({"foo": {"bar": ["bar", "baz", "qux"]}}),
        ]
    );
    assert_eq!(
        filter(json!({"foo.bar": {"$lt": ["bar", "baz"]}}), &docs),
        vec![
            json!({"foo": {"bar": ["baa"]}}),
            json!({"foo": {"bar": ["bar"]}}),
            json!({"foo": {"bar": ["baa", "bzz"]}}),
        ]
    );
}

// ============================================================================
// Object ordering
// ============================================================================

fn object_docs() -> Vec<serde_json::Value> {
    vec![
        json!({"foo": {"bar": {}}}),
        json!({"foo": {"bar": {"a": "a"}}}),
        json!({"foo": {"bar": {"a": "b"}}}),
        json!({"foo": {"bar": {"a": "c"}}}),
        json!({"foo": {"bar": {"b": "a"}}}),
        json!({"foo": {"bar": {"a": "b", "b": "a"}}}),
        json!({"foo": {"bar": {"a": "b", "c": "c"}}}),
        json!({"foo": {"bar": {"a": "b", "c": "d"}}}),
        json!({"foo": {"bar": {"a": "b", "c": "e"}}}),
        json!({"foo": {"bar": {"a": "b", "d": "a"}}}),
        json!({"foo": {"bar": {"a": "b", "c": "d", "e": "f"}}}),
    ]
}

#[test]
fn test_object_ordering_gt() {
    assert_eq!(
        filter(json!({"foo.bar": {"$gt": {"a": "b", "c": "d"}}}), &object_docs()),
        vec![
            json!({"foo": {"bar": {"a": "c"}}}),
            json!({"foo": {"bar": {"b": "a"}}}),
            json!({"foo": {"bar": {"a": "b", "c": "e"}}}),
            json!({"foo": {"bar": {"a": "b", "d": "a"}}}),
            json!({"foo": {"bar": {"a": "b", "c": "d", "e": "f"}}}),
        ]
    );
}

#[test]
fn test_object_ordering_gte_includes_equal() {
    assert_eq!(
        filter(json!({"foo.bar": {"$gte": {"a": "b", "c": "d"}}}), &object_docs()),
        vec![
            json!({"foo": {"bar": {"a": "c"}}}),
            json!({"foo": {"bar": {"b": "a"}}}),
            json!({"foo": {"bar": {"a": "b", "c": "d"}}}),
            json!({"foo": {"bar": {"a": "b", "c": "e"}}}),
            json!({"foo": {"bar": {"a": "b", "d": "a"}}}),
            json!({"foo": {"bar": {"a": "b", "c": "d", "e": "f"}}}),
        ]
    );
}

#[test]
fn test_object_ordering_lt() {
    assert_eq!(
        filter(json!({"foo.bar": {"$lt": {"a": "b", "c": "d"}}}), &object_docs()),
        vec![
            json!({"foo": {"bar": {}}}),
            json!({"foo": {"bar": {"a": "a"}}}),
            json!({"foo": {"bar": {"a": "b"}}}),
            json!({"foo": {"bar": {"a": "b", "b": "a"}}}),
            json!({"foo": {"bar": {"a": "b", "c": "c"}}}),
        ]
    );
}

#[test]
fn test_empty_object_operand() {
    let docs = vec![
        json!({"foo": {"bar": {}}}),
        json!({"foo": {"bar": null}}),
        json!({"foo": {"bar": 1}}),
        json!({"foo": {"bar": {"baz": "qux"}}}),
        json!({}),
    ];
    assert_eq!(
        filter(json!({"foo.bar": {"$gt": {}}}), &docs),
        vec![json!({"foo": {"bar": {"baz": "qux"}}})]
    );
    assert_eq!(
        filter(json!({"foo.bar": {"$gte": {}}}), &docs),
        vec![json!({"foo": {"bar": {}}}), json!({"foo": {"bar": {"baz": "qux"}}})]
    );
    assert!(filter(json!({"foo.bar": {"$lt": {}}}), &docs).is_empty());
    assert_eq!(filter(json!({"foo.bar": {"$lte": {}}}), &docs), vec![json!({"foo": {"bar": {}}})]);
}

#[test]
fn test_range_on_one_field() {
    let docs = vec![json!({"foo": 0}), json!({"foo": 5}), json!({"foo": 10})];
    assert_eq!(filter(json!({"foo": {"$gt": 1, "$lt": 10}}), &docs), vec![json!({"foo": 5})]);
}
