//! `asp-ast` provides the abstract syntax tree of answer set programs together
//! with generic traversal, copy-on-write rewriting, pool expansion and a JSON
//! host representation.
//!
//! ## Examples
//!
//! ```rust
//! use asp_ast::{Attribute, Location, Sign, build};
//!
//! let loc = Location::default();
//! let atom = |name: &str| {
//!     build::literal(
//!         loc,
//!         Sign::NoSign,
//!         build::symbolic_atom(build::function(loc, name, Vec::new(), false)),
//!     )
//! };
//!
//! let rule = build::rule(loc, atom("a"), Vec::new());
//! assert_eq!(rule.to_string(), "a.");
//!
//! // Handles share their instance.
//! let alias = rule.clone();
//! alias.node_list(Attribute::Body).unwrap().push(atom("b")).unwrap();
//! assert_eq!(rule.to_string(), "a :- b.");
//!
//! // Rewrites leave the input untouched.
//! let renamed = asp_ast::transform_ast(&rule, |child| child.clone());
//! assert!(renamed.ptr_eq(&rule));
//!
//! // Pools expand into several statements.
//! let pooled = build::rule(
//!     loc,
//!     build::literal(
//!         loc,
//!         Sign::NoSign,
//!         build::symbolic_atom(build::function(
//!             loc,
//!             "p",
//!             vec![build::pool(loc, vec![build::variable(loc, "X"), build::variable(loc, "Y")])],
//!             false,
//!         )),
//!     ),
//!     Vec::new(),
//! );
//! let rules = pooled.unpool(true, true);
//! assert_eq!(asp_ast::program_to_string(&rules), "p(X).\np(Y).");
//! ```
mod code;
mod error;
#[cfg(feature = "host")]
mod host;
mod list;
mod location;
mod node;
mod operators;
mod program;
mod schema;
mod symbol;
mod text;
mod transform;
mod unpool;
mod value;
mod visit;

pub use error::{Error, Result};
#[cfg(feature = "host")]
pub use host::{child_keys, from_host, symbol_from_host, symbol_to_host, to_host};
pub use list::{ElementRef, ListElement, ListView, NodeList, NodeRef, TextList, TextRef};
pub use location::{Location, Position};
pub use node::Node;
pub use operators::{
    AggregateFunction, BinaryOperator, ComparisonOperator, Sign, TheoryAtomType,
    TheoryOperatorType, TheorySequenceType, UnaryOperator,
};
pub use program::{
    ProgramBuilder, StatementSource, UnpoolingBuilder, program_to_string, transfer,
};
pub use schema::{Attribute, AttributeSpec, IntDomain, NodeType, build};
pub use symbol::Symbol;
pub use text::Text;
pub use transform::{Transformer, rewrite_ast, transform_ast, try_transform_ast};
pub use unpool::{UnpoolOptions, unpool};
pub use value::{NodeValue, ValueType, ValueVisitor};
pub use visit::{visit_ast, visit_attributes};
