use crate::{error::NodeError, writer::TextWriter};

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::fmt;
use std::mem;
use std::ops::Index;
use std::slice;

/// A node in a JSON document tree.
///
/// Containers own their children outright. Adding a child moves it into the
/// container, so a node can never be attached to two parents or be released
/// twice. Object members keep their insertion order and duplicate keys are
/// allowed; lookups by key see the first match. Printing and dropping walk
/// the tree without recursion, so nesting depth is bounded only by memory.
#[derive(Clone, PartialEq)]
pub enum Node {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Node>),
    Object(Vec<(String, Node)>),
}

/// The variant of a [Node](enum.Node.html), without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            NodeKind::Null => "null",
            NodeKind::Bool => "bool",
            NodeKind::Number => "number",
            NodeKind::String => "string",
            NodeKind::Array => "array",
            NodeKind::Object => "object",
        })
    }
}

impl Node {
    /// Creates an empty object.
    pub fn object() -> Node {
        Node::Object(Vec::new())
    }

    /// Creates an empty array.
    pub fn array() -> Node {
        Node::Array(Vec::new())
    }

    /// Creates a string node holding its own copy of `text`.
    pub fn string(text: impl Into<String>) -> Node {
        Node::String(text.into())
    }

    /// Creates a `null` node, for fields whose value is intentionally absent.
    pub fn null() -> Node {
        Node::Null
    }

    pub fn bool(value: bool) -> Node {
        Node::Bool(value)
    }

    pub fn number(value: f64) -> Node {
        Node::Number(value)
    }

    pub fn kind(&self) -> NodeKind {
        match *self {
            Node::Null => NodeKind::Null,
            Node::Bool(_) => NodeKind::Bool,
            Node::Number(_) => NodeKind::Number,
            Node::String(_) => NodeKind::String,
            Node::Array(_) => NodeKind::Array,
            Node::Object(_) => NodeKind::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(*self, Node::Null)
    }

    /// A convenience method to extract the value out of a [Bool](#variant.Bool).
    /// Returns `false` for other node kinds.
    pub fn as_bool(&self) -> bool {
        match *self {
            Node::Bool(value) => value,
            _ => false,
        }
    }

    /// A convenience method to extract the value out of a [Number](#variant.Number).
    /// Returns `0.0` for other node kinds.
    pub fn as_number(&self) -> f64 {
        match *self {
            Node::Number(value) => value,
            _ => 0.0,
        }
    }

    /// A convenience method to extract the text out of a [String](#variant.String).
    /// Returns `""` for other node kinds.
    pub fn as_string(&self) -> &str {
        match *self {
            Node::String(ref value) => value.as_str(),
            _ => "",
        }
    }

    /// A convenience method to get the items out of an [Array](#variant.Array).
    /// Returns an empty slice for other node kinds.
    pub fn as_array(&self) -> &[Node] {
        match *self {
            Node::Array(ref items) => items.as_slice(),
            _ => &[],
        }
    }

    /// A convenience method to get the members out of an [Object](#variant.Object),
    /// in insertion order. Returns an empty slice for other node kinds.
    pub fn members(&self) -> &[(String, Node)] {
        match *self {
            Node::Object(ref members) => members.as_slice(),
            _ => &[],
        }
    }

    /// The number of items in an array or members in an object. Returns `0`
    /// for other node kinds.
    pub fn len(&self) -> usize {
        match *self {
            Node::Array(ref items) => items.len(),
            Node::Object(ref members) => members.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Looks up the first member named `key` in an [Object](#variant.Object).
    /// Returns `None` for other node kinds or if the key isn't present.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.members()
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    /// Appends `(key, child)` to this object, taking ownership of `child`.
    /// Keys are not deduplicated.
    pub fn add_item_to_object(
        &mut self,
        key: impl Into<String>,
        child: Node,
    ) -> Result<(), NodeError> {
        match *self {
            Node::Object(ref mut members) => {
                members.push((key.into(), child));
                Ok(())
            }
            _ => Err(self.mismatch(NodeKind::Object)),
        }
    }

    /// Appends `child` to the end of this array, taking ownership of it.
    pub fn add_item_to_array(&mut self, child: Node) -> Result<(), NodeError> {
        match *self {
            Node::Array(ref mut items) => {
                items.push(child);
                Ok(())
            }
            _ => Err(self.mismatch(NodeKind::Array)),
        }
    }

    /// Replaces the value of the first member named `key` and hands the old
    /// value back. Appends a new member if there is no such key.
    pub fn replace_item_in_object(
        &mut self,
        key: impl Into<String>,
        child: Node,
    ) -> Result<Option<Node>, NodeError> {
        let key = key.into();
        match *self {
            Node::Object(ref mut members) => {
                match members.iter_mut().find(|(name, _)| *name == key) {
                    Some((_, slot)) => Ok(Some(mem::replace(slot, child))),
                    None => {
                        members.push((key, child));
                        Ok(None)
                    }
                }
            }
            _ => Err(self.mismatch(NodeKind::Object)),
        }
    }

    /// Removes the item at `index` from an array and returns it to the caller.
    pub fn detach_item_from_array(&mut self, index: usize) -> Option<Node> {
        match *self {
            Node::Array(ref mut items) if index < items.len() => Some(items.remove(index)),
            _ => None,
        }
    }

    /// Removes the first member named `key` from an object and returns its value.
    pub fn detach_item_from_object(&mut self, key: &str) -> Option<Node> {
        match *self {
            Node::Object(ref mut members) => {
                let index = members.iter().position(|(name, _)| name == key)?;
                Some(members.remove(index).1)
            }
            _ => None,
        }
    }

    /// Renders the tree as compact JSON with no insignificant whitespace.
    pub fn print_unformatted(&self) -> String {
        self.to_string()
    }

    /// Writes the tree to `w`. Nesting is tracked on a heap-allocated stack,
    /// so depth is limited by memory rather than by the call stack.
    pub fn print_to<W: fmt::Write>(&self, w: &mut TextWriter<W>) -> fmt::Result {
        let mut stack = vec![Frame::Value(self)];

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Value(node) => match *node {
                    Node::Null => w.write_null()?,
                    Node::Bool(value) => w.write_bool(value)?,
                    Node::Number(value) => w.write_number(value)?,
                    Node::String(ref value) => w.write_string(value)?,
                    Node::Array(ref items) => {
                        w.begin_array()?;
                        stack.push(Frame::Items(items.iter(), true));
                    }
                    Node::Object(ref members) => {
                        w.begin_object()?;
                        stack.push(Frame::Members(members.iter(), true));
                    }
                },

                Frame::Items(mut items, first) => match items.next() {
                    Some(item) => {
                        if !first {
                            w.write_separator()?;
                        }
                        stack.push(Frame::Items(items, false));
                        stack.push(Frame::Value(item));
                    }
                    None => w.end_array()?,
                },

                Frame::Members(mut members, first) => match members.next() {
                    Some((key, value)) => {
                        if !first {
                            w.write_separator()?;
                        }
                        w.write_key(key)?;
                        stack.push(Frame::Members(members, false));
                        stack.push(Frame::Value(value));
                    }
                    None => w.end_object()?,
                },
            }
        }

        Ok(())
    }

    /// Releases the whole subtree. This is the same teardown an ordinary drop
    /// performs, spelled out for callers that want the release to be explicit.
    pub fn destroy(self) {
        drop(self);
    }

    /// Moves the children of a container out into `pending`, leaving it empty.
    fn take_children(&mut self, pending: &mut Vec<Node>) {
        match *self {
            Node::Array(ref mut items) => pending.append(items),
            Node::Object(ref mut members) => {
                pending.extend(members.drain(..).map(|(_, value)| value));
            }
            _ => {}
        }
    }

    fn mismatch(&self, expected: NodeKind) -> NodeError {
        NodeError::InvalidNodeKind {
            expected,
            found: self.kind(),
        }
    }
}

/// Pending work for [Node::print_to](enum.Node.html#method.print_to). The bool
/// is true until the first child has been written.
enum Frame<'a> {
    Value(&'a Node),
    Items(slice::Iter<'a, Node>, bool),
    Members(slice::Iter<'a, (String, Node)>, bool),
}

/// Children are unlinked one level at a time onto a heap stack, so dropping
/// an arbitrarily deep tree never recurses more than one level.
impl Drop for Node {
    fn drop(&mut self) {
        if self.is_empty() {
            return;
        }

        let mut pending = Vec::new();
        self.take_children(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.take_children(&mut pending);
        }
    }
}

impl Index<usize> for Node {
    type Output = Node;

    /// A convenience method that adds support for `self[index]` expressions.
    /// It will panic if this node isn't an [Array](#variant.Array) or if the
    /// provided index is out of bounds.
    fn index(&self, index: usize) -> &Node {
        match *self {
            Node::Array(ref items) => &items[index],
            _ => panic!("cannot index into {}", self.kind()),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.print_to(&mut TextWriter::new(f))
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match *self {
            Node::Null => write!(f, "null"),
            Node::Bool(value) => fmt::Debug::fmt(&value, f),
            Node::Number(value) => fmt::Debug::fmt(&value, f),
            Node::String(ref value) => fmt::Debug::fmt(value, f),
            Node::Array(ref items) => fmt::Debug::fmt(items, f),

            Node::Object(ref members) => {
                let mut first = true;
                write!(f, "{{")?;

                for (key, value) in members {
                    if first {
                        first = false;
                    } else {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {:?}", key, value)?;
                }

                write!(f, "}}")
            }
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Node::Null => serializer.serialize_unit(),
            Node::Bool(value) => serializer.serialize_bool(value),
            Node::Number(value) if value.fract() == 0.0 && value.abs() < 1.0e15 => {
                serializer.serialize_i64(value as i64)
            }
            Node::Number(value) => serializer.serialize_f64(value),
            Node::String(ref value) => serializer.serialize_str(value),

            Node::Array(ref items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }

            Node::Object(ref members) => {
                let mut map = serializer.serialize_map(Some(members.len()))?;
                for (key, value) in members {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn function(name: &str, sig: Option<&str>) -> Node {
        let mut node = Node::object();
        node.add_item_to_object("name", Node::string(name)).unwrap();
        if let Some(sig) = sig {
            node.add_item_to_object("sig", Node::string(sig)).unwrap();
        }
        node
    }

    #[test]
    fn node_basic() {
        let mut value = Node::array();
        value.add_item_to_array(Node::null()).unwrap();
        value.add_item_to_array(Node::bool(true)).unwrap();
        value.add_item_to_array(Node::number(0.5)).unwrap();
        value.add_item_to_array(Node::string("abc")).unwrap();
        value.add_item_to_array(function("pi", None)).unwrap();

        assert_eq!(value.len(), 5);
        assert_eq!(value.kind(), NodeKind::Array);

        assert!(value[0].is_null());
        assert_eq!(value[1].as_bool(), true);
        assert_eq!(value[2].as_number(), 0.5);
        assert_eq!(value[3].as_string(), "abc");
        assert_eq!(value[4].get("name"), Some(&Node::string("pi")));
        assert_eq!(value.get("name"), None);

        assert_eq!(value[3].as_bool(), false);
        assert_eq!(value[3].as_number(), 0.0);
        assert_eq!(value[0].as_string(), "");
        assert!(value[0].as_array().is_empty());
        assert_eq!(value[0].len(), 0);

        assert_eq!(
            format!("{:?}", value),
            "[null, true, 0.5, \"abc\", {name: \"pi\"}]"
        );
    }

    #[test]
    fn node_add_item_to_object_keeps_order() {
        let mut value = Node::object();
        value.add_item_to_object("z", Node::number(1.0)).unwrap();
        value.add_item_to_object("a", Node::number(2.0)).unwrap();
        value.add_item_to_object("m", Node::number(3.0)).unwrap();

        let keys: Vec<&str> = value.members().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["z", "a", "m"]);
        assert_eq!(value.print_unformatted(), r#"{"z":1,"a":2,"m":3}"#);
    }

    #[test]
    fn node_duplicate_keys_are_kept() {
        let mut value = Node::object();
        value.add_item_to_object("x", Node::number(1.0)).unwrap();
        value.add_item_to_object("x", Node::number(2.0)).unwrap();

        assert_eq!(value.len(), 2);
        assert_eq!(value.get("x"), Some(&Node::number(1.0)));
        assert_eq!(value.print_unformatted(), r#"{"x":1,"x":2}"#);
    }

    #[test]
    fn node_invalid_kind() {
        let mut array = Node::array();
        assert_eq!(
            array.add_item_to_object("k", Node::null()),
            Err(NodeError::InvalidNodeKind {
                expected: NodeKind::Object,
                found: NodeKind::Array,
            })
        );
        assert!(array.is_empty());

        let mut text = Node::string("s");
        assert_eq!(
            text.add_item_to_array(Node::null()),
            Err(NodeError::InvalidNodeKind {
                expected: NodeKind::Array,
                found: NodeKind::String,
            })
        );
        assert_eq!(text, Node::string("s"));

        let mut object = Node::object();
        assert!(object.add_item_to_array(Node::null()).is_err());
        assert!(Node::null().replace_item_in_object("k", Node::null()).is_err());

        assert_eq!(
            object.add_item_to_array(Node::null()).unwrap_err().to_string(),
            "Invalid node kind: expected array, found object"
        );
    }

    #[test]
    fn node_replace_item_in_object() {
        let mut value = Node::object();
        value.add_item_to_object("x", Node::number(1.0)).unwrap();
        value.add_item_to_object("y", Node::number(2.0)).unwrap();

        let old = value.replace_item_in_object("x", Node::string("one")).unwrap();
        assert_eq!(old, Some(Node::number(1.0)));
        assert_eq!(value.print_unformatted(), r#"{"x":"one","y":2}"#);

        let old = value.replace_item_in_object("z", Node::null()).unwrap();
        assert_eq!(old, None);
        assert_eq!(value.print_unformatted(), r#"{"x":"one","y":2,"z":null}"#);
    }

    #[test]
    fn node_detach() {
        let mut items = Node::array();
        items.add_item_to_array(function("sqrt", Some("(x, /)"))).unwrap();
        items.add_item_to_array(function("pi", None)).unwrap();

        let sqrt = items.detach_item_from_array(0).unwrap();
        assert_eq!(sqrt.get("sig").map(Node::as_string), Some("(x, /)"));
        assert_eq!(items.len(), 1);
        assert_eq!(items.detach_item_from_array(5), None);

        // A detached node can be attached somewhere else
        let mut module = Node::object();
        module.add_item_to_object("first", sqrt).unwrap();
        assert_eq!(module.detach_item_from_object("missing"), None);
        assert_eq!(
            module.detach_item_from_object("first"),
            Some(function("sqrt", Some("(x, /)")))
        );
        assert!(module.is_empty());
        assert_eq!(Node::null().detach_item_from_object("first"), None);
    }

    #[test]
    fn node_print_unformatted() {
        let mut module = Node::object();
        module.add_item_to_object("name", Node::string("math")).unwrap();

        let mut items = Node::array();
        items.add_item_to_array(function("sqrt", Some("(x, /)"))).unwrap();
        items.add_item_to_array(function("pi", None)).unwrap();
        module.add_item_to_object("items", items).unwrap();

        let expected =
            r#"{"name":"math","items":[{"name":"sqrt","sig":"(x, /)"},{"name":"pi"}]}"#;
        assert_eq!(module.print_unformatted(), expected);

        // Printing is restartable: every pass walks the tree again
        assert_eq!(module.print_unformatted(), expected);
        assert_eq!(format!("{}", module), expected);
    }

    #[test]
    fn node_print_scalars_and_empties() {
        assert_eq!(Node::null().print_unformatted(), "null");
        assert_eq!(Node::bool(false).print_unformatted(), "false");
        assert_eq!(Node::number(-7.0).print_unformatted(), "-7");
        assert_eq!(Node::string("a\"b").print_unformatted(), r#""a\"b""#);
        assert_eq!(Node::object().print_unformatted(), "{}");
        assert_eq!(Node::array().print_unformatted(), "[]");

        let mut nested = Node::array();
        nested.add_item_to_array(Node::array()).unwrap();
        nested.add_item_to_array(Node::object()).unwrap();
        assert_eq!(nested.print_unformatted(), "[[],{}]");
    }

    #[test]
    fn node_deep_nesting() {
        const DEPTH: usize = 100_000;

        let mut node = Node::array();
        for _ in 0..DEPTH {
            let mut parent = Node::array();
            parent.add_item_to_array(node).unwrap();
            node = parent;
        }

        let text = node.print_unformatted();
        assert_eq!(text.len(), 2 * (DEPTH + 1));
        assert!(text.starts_with("[[[["));
        assert!(text.ends_with("]]]]"));

        node.destroy();
    }

    #[test]
    fn node_deep_nesting_plain_drop() {
        const DEPTH: usize = 1_000_000;

        let mut node = Node::object();
        for _ in 0..DEPTH {
            let mut parent = Node::object();
            parent.add_item_to_object("child", node).unwrap();
            node = parent;
        }
        assert_eq!(node.len(), 1);

        drop(node);
    }

    #[test]
    fn node_clone_is_independent() {
        let mut original = function("pi", None);
        let copy = original.clone();
        original
            .replace_item_in_object("name", Node::string("tau"))
            .unwrap();

        assert_eq!(copy.get("name").map(Node::as_string), Some("pi"));
        assert_eq!(original.get("name").map(Node::as_string), Some("tau"));
    }

    #[test]
    #[should_panic]
    fn node_index_non_array() {
        let _ = &Node::object()[0];
    }
}
