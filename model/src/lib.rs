//! An owned JSON document tree with builder operations and a compact text
//! emitter. Every node has exactly one owner: adding a child moves it into its
//! parent, and duplicating a subtree takes an explicit `clone()`.
//!
//! ```
//! use docz_model::*;
//!
//! let mut module = Node::object();
//! module.add_item_to_object("name", Node::string("math")).unwrap();
//!
//! let mut items = Node::array();
//! items.add_item_to_array(Node::null()).unwrap();
//! module.add_item_to_object("items", items).unwrap();
//!
//! assert_eq!(module.print_unformatted(), r#"{"name":"math","items":[null]}"#);
//! assert_eq!(module.get("name").map(Node::as_string), Some("math"));
//! module.destroy();
//! ```

pub mod error;
pub mod node;
pub mod writer;

pub use error::*;
pub use node::*;
pub use writer::*;
