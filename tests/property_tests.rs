//! Property-based tests over generated documents and trees.

use proptest::prelude::*;
use yamlite::{parse, to_string, Node, NodeMap};

fn scalar_node() -> impl Strategy<Value = Node> {
    prop_oneof![
        Just(Node::Nil),
        any::<bool>().prop_map(Node::Bool),
        (-1_000_000i64..1_000_000).prop_map(|n| Node::Number(n as f64)),
        (-1e9f64..1e9).prop_map(Node::Number),
        "[a-zA-Z0-9 _.:#-]{0,16}".prop_map(Node::String),
    ]
}

fn tree_node() -> impl Strategy<Value = Node> {
    scalar_node().prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Node::List),
            prop::collection::vec(("[a-z][a-z0-9]{0,7}", inner), 0..6).prop_map(|entries| {
                let mut map = NodeMap::new();
                for (key, value) in entries {
                    map.insert(key, value);
                }
                Node::Dict(map)
            }),
        ]
    })
}

proptest! {
    // Serializing any tree yields a document that parses back to the
    // same tree.
    #[test]
    fn prop_tree_roundtrip(tree in tree_node()) {
        let rendered = to_string(&tree);
        let reparsed = parse(&rendered);
        prop_assert!(reparsed.is_ok(), "failed on:\n{}\n{:?}", rendered, reparsed);
        prop_assert_eq!(reparsed.unwrap(), tree);
    }

    // The serializer is a fixed point after one cycle.
    #[test]
    fn prop_render_is_stable(tree in tree_node()) {
        let rendered = to_string(&tree);
        let again = to_string(&parse(&rendered).unwrap());
        prop_assert_eq!(rendered, again);
    }

    // A `#` inside a quoted value is content in every position.
    #[test]
    fn prop_hash_in_quotes_is_never_a_comment(prefix in "[a-zA-Z0-9]{0,8}", suffix in "[a-zA-Z0-9]{0,8}") {
        let expected = format!("{prefix} # {suffix}");

        let double = format!("key: \"{expected}\"\n");
        let parsed = parse(&double).unwrap();
        prop_assert_eq!(parsed["key"].as_str(), Some(expected.as_str()));

        let single = format!("key: '{expected}'\n");
        let parsed = parse(&single).unwrap();
        prop_assert_eq!(parsed["key"].as_str(), Some(expected.as_str()));

        let flow = format!("key: [\"{expected}\"]\n");
        let parsed = parse(&flow).unwrap();
        prop_assert_eq!(parsed["key"][0].as_str(), Some(expected.as_str()));
    }

    // Scalar resolution is idempotent through a full cycle: whatever a
    // plain token resolves to, rendering and reparsing keeps its type.
    #[test]
    fn prop_scalar_resolution_is_idempotent(token in "[a-zA-Z0-9._+-]{1,12}") {
        let doc = format!("v: {token}\n");
        if let Ok(tree) = parse(&doc) {
            let reparsed = parse(&to_string(&tree)).unwrap();
            prop_assert_eq!(
                reparsed["v"].kind(), tree["v"].kind(),
                "token {} changed type", token
            );
        }
    }

    // Parsing arbitrary printable garbage never panics; it returns a
    // tree or a positioned error.
    #[test]
    fn prop_parser_never_panics(doc in "[ -~\n\t]{0,200}") {
        let _ = parse(&doc);
    }
}
