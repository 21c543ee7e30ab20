//! Pool expansion.
//!
//! A pool `(a;b)` stands for several alternatives. Unpooling replaces a node by
//! the list of nodes obtained by choosing one alternative for every pool below
//! it, except inside set-like lists (aggregate elements, conditional literals)
//! where the alternatives are spliced side by side into the same list.
use itertools::Itertools;
use tracing::debug;

use crate::{
    node::{Node, Values},
    schema::{Attribute, NodeType},
    value::NodeValue,
};

/// Selects the regions in which pools are expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnpoolOptions {
    /// Expand pools outside of `condition` attributes.
    pub other: bool,
    /// Expand pools inside `condition` attributes.
    pub condition: bool,
}

impl Default for UnpoolOptions {
    fn default() -> Self {
        UnpoolOptions {
            other: true,
            condition: true,
        }
    }
}

/// Expands the pools below `node`.
///
/// A node without pools in an expanding region yields a single element: the
/// very same handle.
pub fn unpool(node: &Node, options: UnpoolOptions) -> Vec<Node> {
    let unpooler = Unpooler { options };
    match unpooler.expand(node, options.other) {
        Some(alternatives) => {
            debug!(
                node_type = %node.node_type(),
                alternatives = alternatives.len(),
                "expanded pools"
            );
            alternatives
        }
        None => vec![node.clone()],
    }
}

impl Node {
    pub fn unpool(&self, other: bool, condition: bool) -> Vec<Node> {
        unpool(self, UnpoolOptions { other, condition })
    }
}

struct Unpooler {
    options: UnpoolOptions,
}

impl Unpooler {
    /// `None` means `node` stands for itself alone.
    fn expand(&self, node: &Node, enabled: bool) -> Option<Vec<Node>> {
        if enabled && node.node_type() == NodeType::Pool {
            let arguments = node.get_as::<Vec<Node>>(Attribute::Arguments).ok()?;
            return Some(
                arguments
                    .iter()
                    .flat_map(|argument| self.expand_or_keep(argument, enabled))
                    .collect(),
            );
        }

        let values = node.snapshot();
        let slots = node
            .attributes()
            .zip(&values)
            .map(|(attribute, value)| {
                let enabled = if is_condition(node.node_type(), attribute) {
                    self.options.condition
                } else {
                    enabled
                };
                self.expand_value(node.node_type(), attribute, value, enabled)
            })
            .collect::<Vec<_>>();

        if slots.iter().all(Option::is_none) {
            return None;
        }

        let slots = slots
            .into_iter()
            .zip(values)
            .map(|(alternatives, value)| alternatives.unwrap_or_else(|| vec![value]));

        Some(
            product(slots)
                .into_iter()
                .map(|values| Node::from_parts(node.node_type(), values.into_iter().collect::<Values>()))
                .collect(),
        )
    }

    fn expand_or_keep(&self, node: &Node, enabled: bool) -> Vec<Node> {
        self.expand(node, enabled)
            .unwrap_or_else(|| vec![node.clone()])
    }

    fn expand_value(
        &self,
        node_type: NodeType,
        attribute: Attribute,
        value: &NodeValue,
        enabled: bool,
    ) -> Option<Vec<NodeValue>> {
        match value {
            NodeValue::Ast(child) => self
                .expand(child, enabled)
                .map(|alternatives| alternatives.into_iter().map(NodeValue::Ast).collect()),
            NodeValue::OptionalAst(Some(child)) => self.expand(child, enabled).map(|alternatives| {
                alternatives
                    .into_iter()
                    .map(|child| NodeValue::OptionalAst(Some(child)))
                    .collect()
            }),
            NodeValue::AstList(items) => self
                .expand_list(is_set_like(node_type, attribute), items, enabled)
                .map(|lists| lists.into_iter().map(NodeValue::AstList).collect()),
            _ => None,
        }
    }

    /// Every item contributes a set of choices; each choice is the segment
    /// it puts into the resulting list.
    fn expand_list(&self, set_like: bool, items: &[Node], enabled: bool) -> Option<Vec<Vec<Node>>> {
        let expanded = items
            .iter()
            .map(|item| self.expand(item, enabled))
            .collect::<Vec<_>>();

        if expanded.iter().all(Option::is_none) {
            return None;
        }

        let choices = items.iter().zip(expanded).map(|(item, alternatives)| {
            match alternatives {
                None => vec![vec![item.clone()]],
                Some(alternatives) if set_like || item.node_type() == NodeType::ConditionalLiteral => {
                    vec![alternatives]
                }
                Some(alternatives) => alternatives.into_iter().map(|alt| vec![alt]).collect(),
            }
        });

        Some(
            product(choices)
                .into_iter()
                .map(|segments| segments.into_iter().flatten().collect())
                .collect(),
        )
    }
}

/// The `condition` of a head aggregate element is a conditional literal whose
/// own literal sits in the head, so only its inner condition list counts.
fn is_condition(node_type: NodeType, attribute: Attribute) -> bool {
    attribute == Attribute::Condition && node_type != NodeType::HeadAggregateElement
}

fn is_set_like(node_type: NodeType, attribute: Attribute) -> bool {
    attribute == Attribute::Elements
        && matches!(
            node_type,
            NodeType::Aggregate
                | NodeType::BodyAggregate
                | NodeType::HeadAggregate
                | NodeType::Disjunction
                | NodeType::Disjoint
                | NodeType::TheoryAtom
        )
}

/// Cartesian product with the first factor varying slowest.
fn product<T, I>(factors: I) -> Vec<Vec<T>>
where
    T: Clone,
    I: IntoIterator<Item = Vec<T>>,
{
    let factors = factors.into_iter().collect::<Vec<_>>();
    if factors.is_empty() {
        return vec![Vec::new()];
    }

    factors
        .into_iter()
        .map(Vec::into_iter)
        .multi_cartesian_product()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        build,
        location::Location,
        operators::{AggregateFunction, Sign},
        symbol::Symbol,
    };
    use rstest::rstest;

    fn loc() -> Location {
        Location::default()
    }

    fn num(n: i32) -> Node {
        build::symbolic_term(loc(), Symbol::number(n))
    }

    fn pool(items: Vec<Node>) -> Node {
        build::pool(loc(), items)
    }

    fn literal(name: &str, arguments: Vec<Node>) -> Node {
        build::literal(
            loc(),
            Sign::NoSign,
            build::symbolic_atom(build::function(loc(), name, arguments, false)),
        )
    }

    fn conditional(literal: Node, condition: Vec<Node>) -> Node {
        build::conditional_literal(loc(), literal, condition)
    }

    fn printed(nodes: &[Node]) -> Vec<String> {
        nodes.iter().map(Node::to_string).collect()
    }

    #[test]
    fn test_without_pools_returns_same_handle() {
        let rule = build::rule(loc(), literal("a", vec![num(1)]), vec![literal("b", Vec::new())]);
        let result = rule.unpool(true, true);
        assert_eq!(result.len(), 1);
        assert!(result[0].ptr_eq(&rule));
    }

    #[test]
    fn test_pool_in_head() {
        let rule = build::rule(loc(), literal("p", vec![pool(vec![num(1), num(2)])]), Vec::new());
        assert_eq!(printed(&rule.unpool(true, true)), vec!["p(1).", "p(2)."]);
    }

    #[test]
    fn test_leftmost_pool_varies_slowest() {
        let rule = build::rule(
            loc(),
            literal(
                "p",
                vec![pool(vec![num(1), num(2)]), pool(vec![num(3), num(4)])],
            ),
            Vec::new(),
        );
        assert_eq!(
            printed(&rule.unpool(true, true)),
            vec!["p(1,3).", "p(1,4).", "p(2,3).", "p(2,4)."]
        );
    }

    #[rstest]
    #[case(vec![2], 2)]
    #[case(vec![2, 3], 6)]
    #[case(vec![1, 2, 3], 6)]
    #[case(vec![3, 3, 2], 18)]
    fn test_cardinality_is_product(#[case] sizes: Vec<i32>, #[case] expected: usize) {
        let arguments = sizes
            .iter()
            .map(|size| pool((0..*size).map(num).collect()))
            .collect();
        let rule = build::rule(loc(), literal("p", arguments), Vec::new());
        assert_eq!(rule.unpool(true, true).len(), expected);
    }

    #[test]
    fn test_body_literal_multiplies_rules() {
        let rule = build::rule(
            loc(),
            literal("a", Vec::new()),
            vec![literal("b", vec![pool(vec![num(1), num(2)])]), literal("c", Vec::new())],
        );
        assert_eq!(
            printed(&rule.unpool(true, true)),
            vec!["a :- b(1); c.", "a :- b(2); c."]
        );
    }

    #[test]
    fn test_conditional_literal_splices() {
        let rule = build::rule(
            loc(),
            literal("a", Vec::new()),
            vec![conditional(
                literal("b", Vec::new()),
                vec![literal("c", vec![pool(vec![num(1), num(2)])])],
            )],
        );

        let expanded = rule.unpool(true, true);
        assert_eq!(printed(&expanded), vec!["a :- b: c(1); b: c(2)."]);

        let kept = rule.unpool(true, false);
        assert_eq!(kept.len(), 1);
        assert!(kept[0].ptr_eq(&rule));
    }

    #[test]
    fn test_aggregate_elements_splice() {
        let head = build::aggregate(
            loc(),
            None,
            vec![conditional(literal("p", vec![pool(vec![num(1), num(2)])]), Vec::new())],
            None,
        );
        let rule = build::rule(loc(), head, Vec::new());
        assert_eq!(printed(&rule.unpool(true, true)), vec!["{ p(1); p(2) }."]);
    }

    #[test]
    fn test_regions_are_independent() {
        let rule = build::rule(
            loc(),
            literal("a", vec![pool(vec![num(1), num(2)])]),
            vec![conditional(
                literal("b", Vec::new()),
                vec![literal("c", vec![pool(vec![num(3), num(4)])])],
            )],
        );

        assert_eq!(
            printed(&rule.unpool(false, true)),
            vec!["a((1;2)) :- b: c(3); b: c(4)."]
        );
        assert_eq!(
            printed(&rule.unpool(true, false)),
            vec!["a(1) :- b: c((3;4)).", "a(2) :- b: c((3;4))."]
        );
        assert_eq!(rule.unpool(false, false)[0], rule);
    }

    #[test]
    fn test_head_aggregate_element_literal_is_not_a_condition() {
        let element = build::head_aggregate_element(
            vec![num(0)],
            conditional(
                literal("p", vec![pool(vec![num(1), num(2)])]),
                vec![literal("q", Vec::new())],
            ),
        );
        let head = build::head_aggregate(loc(), None, AggregateFunction::Count, vec![element], None);
        let rule = build::rule(loc(), head, Vec::new());

        assert_eq!(
            printed(&rule.unpool(true, false)),
            vec!["#count { 0: p(1): q; 0: p(2): q }."]
        );
        let kept = rule.unpool(false, true);
        assert_eq!(kept.len(), 1);
        assert!(kept[0].ptr_eq(&rule));
    }

    #[test]
    fn test_head_aggregate_element_condition_follows_condition_flag() {
        let element = build::head_aggregate_element(
            vec![num(0)],
            conditional(
                literal("p", Vec::new()),
                vec![literal("q", vec![pool(vec![num(1), num(2)])])],
            ),
        );
        let head = build::head_aggregate(loc(), None, AggregateFunction::Count, vec![element], None);
        let rule = build::rule(loc(), head, Vec::new());

        assert_eq!(
            printed(&rule.unpool(false, true)),
            vec!["#count { 0: p: q(1); 0: p: q(2) }."]
        );
        assert!(rule.unpool(true, false)[0].ptr_eq(&rule));
    }

    #[test]
    fn test_nested_pools_flatten() {
        let term = pool(vec![num(1), pool(vec![num(2), num(3)])]);
        let rule = build::rule(loc(), literal("p", vec![term]), Vec::new());
        assert_eq!(
            printed(&rule.unpool(true, true)),
            vec!["p(1).", "p(2).", "p(3)."]
        );
    }

    #[test]
    fn test_product_of_nothing() {
        assert_eq!(product(Vec::<Vec<i32>>::new()), vec![Vec::<i32>::new()]);
        assert_eq!(
            product(vec![vec![1, 2], vec![3]]),
            vec![vec![1, 3], vec![2, 3]]
        );
    }
}
