//! Contract tests for the aggregation pipeline.
//!
//! These exercise the public API end to end over in-memory batches —
//! no services, no fixtures on disk. Input batches are built the way the
//! collaborator would hand them over: as deserialized JSON.

use tagweave_common::{AggregateOptions, PostRecord, TagWeaveError};
use tagweave_graph::{aggregate, zip_by_rank};

fn post(tag: &str, associated: &[&str], sentiment: f64, place: &str) -> PostRecord {
    PostRecord {
        tag: tag.to_string(),
        associated_tags: associated.iter().map(|s| s.to_string()).collect(),
        sentiment,
        place: place.to_string(),
        text: None,
    }
}

// =========================================================================
// Graph shape
// =========================================================================

#[test]
fn node_count_equals_distinct_nonempty_tags() {
    let posts = vec![
        post("rust", &[], 0.1, ""),
        post("rust", &[], 0.2, ""),
        post("wasm", &[], 0.3, ""),
        post("", &[], 0.4, ""),
        post("tokio", &[], -0.5, ""),
    ];
    let result = aggregate(&posts, &AggregateOptions::default()).unwrap();
    assert_eq!(result.nodes.len(), 3);
}

#[test]
fn node_count_for_each_tag_is_exact() {
    let posts = vec![
        post("rust", &[], 0.0, ""),
        post("wasm", &[], 0.0, ""),
        post("rust", &[], 0.0, ""),
        post("rust", &[], 0.0, ""),
    ];
    let result = aggregate(&posts, &AggregateOptions::default()).unwrap();
    let rust = result.nodes.iter().find(|n| n.id == "rust").unwrap();
    let wasm = result.nodes.iter().find(|n| n.id == "wasm").unwrap();
    assert_eq!(rust.count, 3);
    assert_eq!(wasm.count, 1);
}

#[test]
fn edge_set_has_no_duplicate_pairs_and_exact_counts() {
    // (rust, wasm) co-occurs in 3 posts, through different posts each time.
    let posts = vec![
        post("rust", &["wasm", "tokio"], 0.0, ""),
        post("rust", &["wasm"], 0.0, ""),
        post("rust", &["wasm"], 0.0, ""),
        post("wasm", &["rust"], 0.0, ""),
    ];
    let result = aggregate(&posts, &AggregateOptions::default()).unwrap();

    let mut pairs: Vec<(&str, &str)> = result
        .edges
        .iter()
        .map(|e| (e.source.as_str(), e.target.as_str()))
        .collect();
    let before = pairs.len();
    pairs.sort();
    pairs.dedup();
    assert_eq!(before, pairs.len(), "duplicate (source, target) pair emitted");

    let rust_wasm = result
        .edges
        .iter()
        .find(|e| e.source == "rust" && e.target == "wasm")
        .unwrap();
    assert_eq!(rust_wasm.count, 3);
    let wasm_rust = result
        .edges
        .iter()
        .find(|e| e.source == "wasm" && e.target == "rust")
        .unwrap();
    assert_eq!(wasm_rust.count, 1);
}

#[test]
fn mean_sentiment_weight_within_tolerance() {
    let posts = vec![
        post("rust", &[], 0.2, ""),
        post("rust", &[], -0.4, ""),
        post("rust", &[], 1.0, ""),
    ];
    let result = aggregate(&posts, &AggregateOptions::default()).unwrap();
    assert!((result.nodes[0].weight - 26.666_666_666_666_664).abs() < 1e-6);
}

#[test]
fn untagged_record_contributes_no_node_or_edge() {
    let posts = vec![post("", &["rust", "wasm"], 0.9, "Berlin")];
    let result = aggregate(&posts, &AggregateOptions::default()).unwrap();
    assert!(result.nodes.is_empty());
    assert!(result.edges.is_empty());
    // The untagged post still counts toward the location table.
    assert_eq!(result.location_table.len(), 1);
    assert_eq!(result.location_table[0].label, "Berlin");
}

// =========================================================================
// Tables
// =========================================================================

#[test]
fn all_empty_places_yield_zero_location_rows() {
    let posts = vec![post("a", &[], 0.0, ""), post("b", &[], 0.0, "")];
    let result = aggregate(&posts, &AggregateOptions::default()).unwrap();
    assert!(result.location_table.is_empty());
}

#[test]
fn tag_table_truncates_to_top_five_descending() {
    let mut posts = Vec::new();
    for (i, tag) in ["t1", "t2", "t3", "t4", "t5", "t6", "t7"].iter().enumerate() {
        for _ in 0..(7 - i) {
            posts.push(post(tag, &[], 0.0, ""));
        }
    }
    let result = aggregate(&posts, &AggregateOptions::default()).unwrap();
    assert_eq!(result.tag_table.len(), 5);
    let counts: Vec<u64> = result.tag_table.iter().map(|e| e.count).collect();
    assert_eq!(counts, vec![7, 6, 5, 4, 3]);
}

#[test]
fn rank_zip_table_has_equal_length_columns() {
    let posts = vec![
        post("rust", &[], 0.0, "Berlin"),
        post("wasm", &[], 0.0, ""),
        post("tokio", &[], 0.0, ""),
    ];
    let result = aggregate(&posts, &AggregateOptions::default()).unwrap();
    // 1 location row, 3 tag rows — the zip must pad, not fail.
    let table = zip_by_rank(&result.location_table, &result.tag_table);
    assert_eq!(table.locations.len(), 3);
    assert_eq!(table.location_counts.len(), 3);
    assert_eq!(table.tags.len(), 3);
    assert_eq!(table.tag_counts.len(), 3);
    assert_eq!(table.locations[0], "Berlin");
    assert_eq!(table.locations[1], "");
}

// =========================================================================
// Whole-call behavior
// =========================================================================

#[test]
fn empty_batch_never_fails() {
    let result = aggregate(&[], &AggregateOptions::default()).unwrap();
    assert!(result.nodes.is_empty());
    assert!(result.edges.is_empty());
    assert!(result.location_table.is_empty());
    assert!(result.tag_table.is_empty());
}

#[test]
fn validation_failure_names_record_and_field() {
    let posts = vec![post("ok", &[], 0.0, ""), post("bad", &[], f64::NAN, "")];
    let err = aggregate(&posts, &AggregateOptions::default()).unwrap_err();
    match err {
        TagWeaveError::Validation { index, field, .. } => {
            assert_eq!(index, 1);
            assert_eq!(field, "sentiment");
        }
        other => panic!("expected validation error, got {other}"),
    }
}

#[test]
fn json_batch_flows_through_to_render_elements() {
    let raw = r#"[
        {"tag": "rustlang", "associated_tags": ["wasm"], "sentiment": 0.6, "place": "Berlin"},
        {"tag": "rustlang", "associated_tags": ["wasm"], "sentiment": 0.2, "place": ""},
        {"tag": "wasm", "associated_tags": [], "sentiment": -0.1, "place": "Lagos"}
    ]"#;
    let posts: Vec<PostRecord> = serde_json::from_str(raw).unwrap();
    let result = aggregate(&posts, &AggregateOptions::default()).unwrap();

    let els = result.elements();
    assert_eq!(els.len(), 3); // 2 nodes + 1 merged edge

    let json = serde_json::to_value(&els).unwrap();
    assert_eq!(json[0]["data"]["id"], "rustlang");
    assert_eq!(json[0]["data"]["size"], 6);
    assert!((json[0]["data"]["weight"].as_f64().unwrap() - 40.0).abs() < 1e-9);
    assert_eq!(json[2]["data"]["source"], "rustlang");
    assert_eq!(json[2]["data"]["count"], 2);
}
