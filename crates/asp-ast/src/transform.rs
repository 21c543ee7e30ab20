//! Copy-on-write rewriting.
//!
//! Rewrites never mutate their input. A node is rebuilt only if at least one of
//! its children was replaced by a different instance; otherwise the original
//! handle is returned, so untouched subtrees stay shared between the old and
//! the new tree.
use std::convert::Infallible;

use tracing::trace;

use crate::{
    node::{Node, Values},
    value::NodeValue,
};

/// Applies `f` to every direct child of `node`.
///
/// Returns `node` itself when `f` returned every child unchanged, otherwise a
/// single new instance holding the replaced children.
pub fn transform_ast<F>(node: &Node, mut f: F) -> Node
where
    F: FnMut(&Node) -> Node,
{
    match try_transform_ast(node, |child| Ok::<_, Infallible>(f(child))) {
        Ok(node) => node,
        Err(never) => match never {},
    }
}

/// Fallible twin of [`transform_ast`]. The first error aborts the rewrite.
pub fn try_transform_ast<F, E>(node: &Node, mut f: F) -> Result<Node, E>
where
    F: FnMut(&Node) -> Result<Node, E>,
{
    Ok(rewrite_children(node, &mut f)?.unwrap_or_else(|| node.clone()))
}

/// Rewrites the whole tree bottom-up: children first, then `f` on the node
/// rebuilt from them. `f` sees `node` itself last.
pub fn rewrite_ast<F>(node: &Node, mut f: F) -> Node
where
    F: FnMut(&Node) -> Node,
{
    rewrite_with(node, &mut f)
}

fn rewrite_with<F>(node: &Node, f: &mut F) -> Node
where
    F: FnMut(&Node) -> Node,
{
    let node = transform_ast(node, |child| rewrite_with(child, f));
    f(&node)
}

/// A per-node rewrite hook.
///
/// The default implementation keeps the node and recurses into its children,
/// so implementors only override [`Transformer::transform`] for the node types
/// they care about and call [`Transformer::transform_children`] for the rest.
pub trait Transformer {
    fn transform(&mut self, node: &Node) -> Node {
        self.transform_children(node)
    }

    fn transform_children(&mut self, node: &Node) -> Node {
        transform_ast(node, |child| self.transform(child))
    }
}

fn rewrite_children<F, E>(node: &Node, f: &mut F) -> Result<Option<Node>, E>
where
    F: FnMut(&Node) -> Result<Node, E>,
{
    let values = node.snapshot();
    let mut rewritten: Option<Values> = None;

    for (index, value) in values.iter().enumerate() {
        let replacement = match value {
            NodeValue::Ast(child) => {
                let new = f(child)?;
                (!new.ptr_eq(child)).then_some(NodeValue::Ast(new))
            }
            NodeValue::OptionalAst(Some(child)) => {
                let new = f(child)?;
                (!new.ptr_eq(child)).then_some(NodeValue::OptionalAst(Some(new)))
            }
            NodeValue::AstList(children) => rewrite_list(children, f)?.map(NodeValue::AstList),
            _ => None,
        };

        if let Some(replacement) = replacement {
            rewritten.get_or_insert_with(|| values.clone())[index] = replacement;
        }
    }

    Ok(rewritten.map(|values| {
        trace!(node_type = %node.node_type(), "rebuilding node with rewritten children");
        Node::from_parts(node.node_type(), values)
    }))
}

fn rewrite_list<F, E>(children: &[Node], f: &mut F) -> Result<Option<Vec<Node>>, E>
where
    F: FnMut(&Node) -> Result<Node, E>,
{
    let mut rewritten: Option<Vec<Node>> = None;

    for (index, child) in children.iter().enumerate() {
        let new = f(child)?;
        match rewritten.as_mut() {
            Some(list) => list.push(new),
            None if !new.ptr_eq(child) => {
                let mut list = Vec::with_capacity(children.len());
                list.extend_from_slice(&children[..index]);
                list.push(new);
                rewritten = Some(list);
            }
            None => {}
        }
    }

    Ok(rewritten)
}
