use miette::Diagnostic;

use crate::{
    schema::{Attribute, NodeType},
    value::ValueType,
};

/// Errors reported by node construction, attribute access and the host marshaller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Diagnostic)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    #[diagnostic(code(asp_ast::invalid_argument))]
    InvalidArgument(String),
    #[error("`{node_type}` has no attribute `{attribute}`")]
    #[diagnostic(
        code(asp_ast::unknown_attribute),
        help("use `Node::attributes` to list the attributes of a node type")
    )]
    UnknownAttribute {
        node_type: NodeType,
        attribute: Attribute,
    },
    #[error("Type mismatch: expected {expected}, found {found}")]
    #[diagnostic(code(asp_ast::type_mismatch))]
    TypeMismatch { expected: ValueType, found: ValueType },
    #[error("Invalid node: {0}")]
    #[diagnostic(code(asp_ast::invalid_node))]
    InvalidNode(String),
    #[error("Index {index} out of bounds for list of length {len}")]
    #[diagnostic(code(asp_ast::index_out_of_bounds))]
    IndexOutOfBounds { index: usize, len: usize },
}

impl Error {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
