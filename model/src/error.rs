use crate::node::NodeKind;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeError {
    #[error("Invalid node kind: expected {expected}, found {found}")]
    InvalidNodeKind {
        expected: NodeKind,
        found:    NodeKind,
    },
}
