use crate::{node::Node, schema::Attribute, value::NodeValue};

/// Calls `f` once for every attribute of `node`, in schema order.
pub fn visit_attributes<F>(node: &Node, mut f: F)
where
    F: FnMut(Attribute, &NodeValue),
{
    for (attribute, value) in node.items() {
        f(attribute, &value);
    }
}

/// Walks `node` and the nodes below it depth-first in pre-order.
///
/// Children are reached through `Ast`, `OptionalAst` and `AstList` attributes
/// in schema order. Returning `false` from `visitor` skips the children of the
/// node just visited.
pub fn visit_ast<F>(node: &Node, mut visitor: F)
where
    F: FnMut(&Node) -> bool,
{
    let mut stack = vec![node.clone()];

    while let Some(current) = stack.pop() {
        if visitor(&current) {
            stack.extend(current.children().into_iter().rev());
        }
    }
}
