//! Dynamic tree value.
//!
//! This module provides the [`Node`] enum, a recursive, dynamically-typed
//! value produced by the parser and consumed by the serializer. It is
//! also usable as a plain builder type for configuration trees.
//!
//! ## Core behaviors
//!
//! - **Typed access**: predicates (`is_dict`, `is_number`, ...) and
//!   getters (`as_str`, `as_f64`, ...) that return `Option`.
//! - **Auto-vivification**: write-indexing a [`Node::Nil`] with a string
//!   key upgrades it to a dictionary; indexing with a position upgrades
//!   it to a list. Downstream code relies on this to build nested trees
//!   with plain assignments.
//! - **Shared nil**: read-indexing a missing key yields a reference to a
//!   single static [`Node::Nil`], so lookups can be chained without
//!   panicking.
//!
//! ## Examples
//!
//! ```rust
//! use yamlite::Node;
//!
//! let mut root = Node::Nil;
//! root["server"]["port"] = Node::from(8080);
//! root["server"]["hosts"][0] = Node::from("localhost");
//!
//! assert_eq!(root["server"]["port"].as_i64(), Some(8080));
//! assert!(root["no"]["such"]["key"].is_nil());
//! ```

use std::fmt;
use std::ops::{Index, IndexMut};

use serde::de::{self, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::NodeMap;

/// A dynamically-typed tree value: the result of parsing a document and
/// the input of serializing one.
///
/// Containers own their children by value; the tree is never cyclic and
/// a node carries no back-reference to its parent.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Node {
    #[default]
    Nil,
    Bool(bool),
    Number(f64),
    String(String),
    List(Vec<Node>),
    Dict(NodeMap),
}

static NIL: Node = Node::Nil;

impl Node {
    /// The shared nil instance returned by failed lookups. Never mutated.
    #[must_use]
    pub fn nil() -> &'static Node {
        &NIL
    }

    /// Returns `true` if the node is nil.
    #[inline]
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        matches!(self, Node::Nil)
    }

    /// Returns `true` if the node is a boolean.
    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Node::Bool(_))
    }

    /// Returns `true` if the node is a number.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Node::Number(_))
    }

    /// Returns `true` if the node is a string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Node::String(_))
    }

    /// Returns `true` if the node is a list.
    #[inline]
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Node::List(_))
    }

    /// Returns `true` if the node is a dictionary.
    #[inline]
    #[must_use]
    pub const fn is_dict(&self) -> bool {
        matches!(self, Node::Dict(_))
    }

    /// The name of this node's kind, for diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Node::Nil => "nil",
            Node::Bool(_) => "bool",
            Node::Number(_) => "number",
            Node::String(_) => "string",
            Node::List(_) => "list",
            Node::Dict(_) => "dict",
        }
    }

    /// If the node is a boolean, returns it.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Node::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the node is a number, returns it as `f64`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Node::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// If the node is a number without a fractional part that fits in
    /// `i64`, returns it as an integer. This is the contract surfaced by
    /// language bindings: whole numbers come out as integers.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Node::Number(n)
                if n.fract() == 0.0 && *n >= i64::MIN as f64 && *n <= i64::MAX as f64 =>
            {
                Some(*n as i64)
            }
            _ => None,
        }
    }

    /// If the node is a string, returns it.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the node is a list, returns it.
    #[inline]
    #[must_use]
    pub fn as_list(&self) -> Option<&Vec<Node>> {
        match self {
            Node::List(items) => Some(items),
            _ => None,
        }
    }

    /// If the node is a list, returns it mutably.
    #[inline]
    #[must_use]
    pub fn as_list_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::List(items) => Some(items),
            _ => None,
        }
    }

    /// If the node is a dictionary, returns it.
    #[inline]
    #[must_use]
    pub fn as_dict(&self) -> Option<&NodeMap> {
        match self {
            Node::Dict(map) => Some(map),
            _ => None,
        }
    }

    /// If the node is a dictionary, returns it mutably.
    #[inline]
    #[must_use]
    pub fn as_dict_mut(&mut self) -> Option<&mut NodeMap> {
        match self {
            Node::Dict(map) => Some(map),
            _ => None,
        }
    }

    /// Dictionary lookup that never panics; `None` for missing keys and
    /// non-dictionary nodes.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_dict().and_then(|map| map.get(key))
    }

    /// List lookup that never panics.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&Node> {
        self.as_list().and_then(|items| items.get(index))
    }
}

impl Index<&str> for Node {
    type Output = Node;

    /// Read access by key. A missing key, or a non-dictionary receiver,
    /// yields the shared nil.
    fn index(&self, key: &str) -> &Node {
        self.get(key).unwrap_or(&NIL)
    }
}

impl IndexMut<&str> for Node {
    /// Write access by key. A nil receiver upgrades to an empty
    /// dictionary first; a missing key is inserted as nil.
    ///
    /// # Panics
    ///
    /// Panics when the receiver is neither nil nor a dictionary.
    fn index_mut(&mut self, key: &str) -> &mut Node {
        if self.is_nil() {
            *self = Node::Dict(NodeMap::new());
        }
        match self {
            Node::Dict(map) => map.entry(key.to_string()).or_insert(Node::Nil),
            other => panic!("cannot index {} node with a key", other.kind()),
        }
    }
}

impl Index<usize> for Node {
    type Output = Node;

    /// Read access by position. Out of range, or a non-list receiver,
    /// yields the shared nil.
    fn index(&self, index: usize) -> &Node {
        self.get_index(index).unwrap_or(&NIL)
    }
}

impl IndexMut<usize> for Node {
    /// Write access by position. A nil receiver upgrades to an empty
    /// list first; the list grows with nil elements up to `index`.
    ///
    /// # Panics
    ///
    /// Panics when the receiver is neither nil nor a list.
    fn index_mut(&mut self, index: usize) -> &mut Node {
        if self.is_nil() {
            *self = Node::List(Vec::new());
        }
        match self {
            Node::List(items) => {
                if index >= items.len() {
                    items.resize(index + 1, Node::Nil);
                }
                &mut items[index]
            }
            other => panic!("cannot index {} node with a position", other.kind()),
        }
    }
}

impl fmt::Display for Node {
    /// Renders the canonical block-style serialization of this node.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::ser::write_node(f, self, 0)
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Node::Bool(value)
    }
}

impl From<i8> for Node {
    fn from(value: i8) -> Self {
        Node::Number(value as f64)
    }
}

impl From<i16> for Node {
    fn from(value: i16) -> Self {
        Node::Number(value as f64)
    }
}

impl From<i32> for Node {
    fn from(value: i32) -> Self {
        Node::Number(value as f64)
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Node::Number(value as f64)
    }
}

impl From<u8> for Node {
    fn from(value: u8) -> Self {
        Node::Number(value as f64)
    }
}

impl From<u16> for Node {
    fn from(value: u16) -> Self {
        Node::Number(value as f64)
    }
}

impl From<u32> for Node {
    fn from(value: u32) -> Self {
        Node::Number(value as f64)
    }
}

impl From<f32> for Node {
    fn from(value: f32) -> Self {
        Node::Number(value as f64)
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Node::Number(value)
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::String(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::String(value.to_string())
    }
}

impl From<Vec<Node>> for Node {
    fn from(value: Vec<Node>) -> Self {
        Node::List(value)
    }
}

impl From<NodeMap> for Node {
    fn from(value: NodeMap) -> Self {
        Node::Dict(value)
    }
}

impl TryFrom<Node> for bool {
    type Error = crate::Error;

    fn try_from(node: Node) -> crate::Result<Self> {
        match node {
            Node::Bool(b) => Ok(b),
            other => Err(crate::Error::structural(
                0,
                0,
                format!("expected bool, found {}", other.kind()),
            )),
        }
    }
}

impl TryFrom<Node> for f64 {
    type Error = crate::Error;

    fn try_from(node: Node) -> crate::Result<Self> {
        match node {
            Node::Number(n) => Ok(n),
            other => Err(crate::Error::structural(
                0,
                0,
                format!("expected number, found {}", other.kind()),
            )),
        }
    }
}

impl TryFrom<Node> for i64 {
    type Error = crate::Error;

    fn try_from(node: Node) -> crate::Result<Self> {
        match node.as_i64() {
            Some(i) => Ok(i),
            None => Err(crate::Error::structural(
                0,
                0,
                format!("expected integer, found {}", node.kind()),
            )),
        }
    }
}

impl TryFrom<Node> for String {
    type Error = crate::Error;

    fn try_from(node: Node) -> crate::Result<Self> {
        match node {
            Node::String(s) => Ok(s),
            other => Err(crate::Error::structural(
                0,
                0,
                format!("expected string, found {}", other.kind()),
            )),
        }
    }
}

impl Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Node::Nil => serializer.serialize_unit(),
            Node::Bool(b) => serializer.serialize_bool(*b),
            // Whole numbers surface as integers, matching the contract
            // the language bindings expose.
            Node::Number(n) => match self.as_i64() {
                Some(i) => serializer.serialize_i64(i),
                None => serializer.serialize_f64(*n),
            },
            Node::String(s) => serializer.serialize_str(s),
            Node::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Node::Dict(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map.iter() {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NodeVisitor;

        impl<'de> Visitor<'de> for NodeVisitor {
            type Value = Node;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any tree value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Node, E> {
                Ok(Node::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Node, E> {
                Ok(Node::Number(value as f64))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Node, E> {
                Ok(Node::Number(value as f64))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Node, E> {
                Ok(Node::Number(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Node, E> {
                Ok(Node::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Node, E> {
                Ok(Node::String(value))
            }

            fn visit_unit<E>(self) -> Result<Node, E> {
                Ok(Node::Nil)
            }

            fn visit_none<E>(self) -> Result<Node, E> {
                Ok(Node::Nil)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Node, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Node, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut items = Vec::new();
                while let Some(item) = seq.next_element()? {
                    items.push(item);
                }
                Ok(Node::List(items))
            }

            fn visit_map<A>(self, mut access: A) -> Result<Node, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut map = NodeMap::new();
                while let Some((key, value)) = access.next_entry()? {
                    map.insert(key, value);
                }
                Ok(Node::Dict(map))
            }
        }

        deserializer.deserialize_any(NodeVisitor)
    }
}
