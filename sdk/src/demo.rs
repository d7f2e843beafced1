//! The documents and payloads the `dz` demos print.

use docz_model::{Node, NodeError};

/// The zlib demo payload, including its NUL terminator.
pub const ZLIB_SAMPLE: &[u8] = b"Hello, zlib compression!\0";

/// Builds the description of a small `math` module:
///
/// ```
/// let module = docz::demo::math_module().unwrap();
/// assert_eq!(
///     module.print_unformatted(),
///     r#"{"name":"math","items":[{"name":"sqrt","sig":"(x, /)"},{"name":"pi"}]}"#
/// );
/// ```
pub fn math_module() -> Result<Node, NodeError> {
    let mut module = Node::object();
    module.add_item_to_object("name", Node::string("math"))?;

    let mut items = Node::array();

    let mut sqrt = Node::object();
    sqrt.add_item_to_object("name", Node::string("sqrt"))?;
    sqrt.add_item_to_object("sig", Node::string("(x, /)"))?;
    items.add_item_to_array(sqrt)?;

    let mut pi = Node::object();
    pi.add_item_to_object("name", Node::string("pi"))?;
    items.add_item_to_array(pi)?;

    module.add_item_to_object("items", items)?;
    Ok(module)
}
