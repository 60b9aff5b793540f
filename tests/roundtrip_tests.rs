//! Round-trip guarantees between the parser and the serializer.
//!
//! Two properties are exercised: a parsed tree serializes back to a
//! document that parses to the same tree, and serializer output is a
//! fixed point (serializing the reparse reproduces it byte for byte).

use yamlite::{node, parse, to_string, Node};

fn assert_tree_stable(doc: &str) {
    let tree = parse(doc).unwrap();
    let rendered = to_string(&tree);
    let reparsed = parse(&rendered).unwrap_or_else(|e| {
        panic!("rendered output failed to parse: {e}\n---\n{rendered}");
    });
    assert_eq!(tree, reparsed, "tree changed across render\n---\n{rendered}");
    assert_eq!(rendered, to_string(&reparsed), "render is not a fixed point");
}

#[test]
fn canonical_output_reparses_unchanged() {
    assert_tree_stable("name: demo\nitems:\n  - a\n  - b\n");
    assert_tree_stable("server:\n  host: localhost\n  port: 8080\n");
    assert_tree_stable("mixed:\n  - 1\n  - true\n  - null\n  - plain\n");
}

#[test]
fn flow_input_survives_as_block_output() {
    let tree = parse("xs: [1, 2, 3]\nm: {a: 1}\n").unwrap();
    let rendered = to_string(&tree);
    assert_eq!(rendered, "xs:\n  - 1\n  - 2\n  - 3\nm:\n  a: 1\n");
    assert_eq!(parse(&rendered).unwrap(), tree);
}

#[test]
fn block_scalars_round_trip_as_quoted_strings() {
    let tree = parse("script: |\n  echo one\n  echo two\n").unwrap();
    let rendered = to_string(&tree);
    assert_eq!(rendered, "script: \"echo one\\necho two\\n\"\n");
    assert_eq!(parse(&rendered).unwrap(), tree);
}

#[test]
fn strings_resembling_other_types_stay_strings() {
    let tree = node!({
        "a": "true",
        "b": "123",
        "c": "null",
        "d": "1_000",
        "e": ".inf",
    });
    let reparsed = parse(&to_string(&tree)).unwrap();
    assert_eq!(reparsed, tree);
    assert_eq!(reparsed["a"].as_str(), Some("true"));
    assert_eq!(reparsed["b"].as_str(), Some("123"));
}

#[test]
fn strings_with_syntax_characters_round_trip() {
    let tree = node!({
        "colon": "key: value",
        "hash": "a # b",
        "brackets": "[not, a, list]",
        "quotes": "she said \"hi\"",
        "newline": "first\nsecond",
        "empty": "",
    });
    assert_eq!(parse(&to_string(&tree)).unwrap(), tree);
}

#[test]
fn unicode_round_trips() {
    let tree = node!({"greeting": "héllo wörld", "cjk": "配置"});
    assert_eq!(parse(&to_string(&tree)).unwrap(), tree);
}

#[test]
fn numbers_round_trip() {
    let tree = Node::List(vec![
        Node::from(0),
        Node::from(-1),
        Node::from(42),
        Node::from(2.5),
        Node::from(-0.125),
        Node::from(1e20),
        Node::from(1e-9),
    ]);
    let reparsed = parse(&to_string(&tree)).unwrap();
    assert_eq!(reparsed, tree);
}

#[test]
fn special_floats_round_trip() {
    let mut tree = Node::Nil;
    tree["pos"] = Node::from(f64::INFINITY);
    tree["neg"] = Node::from(f64::NEG_INFINITY);
    assert_eq!(parse(&to_string(&tree)).unwrap(), tree);

    let mut nan_tree = Node::Nil;
    nan_tree["v"] = Node::from(f64::NAN);
    let back = parse(&to_string(&nan_tree)).unwrap();
    assert!(back["v"].as_f64().unwrap().is_nan());
}

#[test]
fn empty_containers_round_trip() {
    let tree = node!({"list": [], "dict": {}});
    let rendered = to_string(&tree);
    assert_eq!(rendered, "list: []\ndict: {}\n");
    assert_eq!(parse(&rendered).unwrap(), tree);
}

#[test]
fn nil_values_round_trip() {
    let tree = node!({"present": 1, "absent": null});
    let rendered = to_string(&tree);
    assert_eq!(rendered, "present: 1\nabsent: null\n");
    assert_eq!(parse(&rendered).unwrap(), tree);
}

#[test]
fn deep_nesting_round_trips() {
    let mut tree = Node::Nil;
    tree["a"]["b"]["c"][0]["d"] = Node::from("leaf");
    tree["a"]["b"]["c"][1] = Node::from(7);
    assert_eq!(parse(&to_string(&tree)).unwrap(), tree);
}

#[test]
fn key_order_is_preserved() {
    let doc = "zebra: 1\nalpha: 2\nmiddle: 3\n";
    let tree = parse(doc).unwrap();
    assert_eq!(to_string(&tree), doc);
}
