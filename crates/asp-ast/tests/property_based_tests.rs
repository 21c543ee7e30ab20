//! Property-based tests for node construction, rewriting and pool expansion.
use asp_ast::{
    Attribute, BinaryOperator, Location, Node, NodeType, Sign, Symbol, UnaryOperator, build,
    rewrite_ast, transform_ast, visit_ast,
};
use proptest::prelude::*;

mod strategies {
    use super::*;

    pub fn location() -> impl Strategy<Value = Location> {
        ("[a-z]{1,6}\\.lp", 1usize..100, 1usize..80, 1usize..80)
            .prop_map(|(file, line, begin, end)| Location::span(&file, line, begin, end))
    }

    pub fn name() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9_]{0,6}"
    }

    pub fn variable_name() -> impl Strategy<Value = String> {
        "[A-Z][A-Za-z0-9_]{0,6}"
    }

    /// Ground or non-ground terms without pools.
    pub fn term() -> impl Strategy<Value = Node> {
        let leaf = prop_oneof![
            (location(), variable_name()).prop_map(|(loc, name)| build::variable(loc, &name)),
            (location(), -1000i32..1000)
                .prop_map(|(loc, n)| build::symbolic_term(loc, Symbol::number(n))),
            (location(), name()).prop_map(|(loc, n)| build::symbolic_term(loc, Symbol::id(&n))),
        ];

        leaf.prop_recursive(4, 32, 4, |inner| {
            prop_oneof![
                (location(), inner.clone(), inner.clone()).prop_map(|(loc, l, r)| {
                    build::binary_operation(loc, BinaryOperator::Plus, l, r)
                }),
                (location(), inner.clone())
                    .prop_map(|(loc, t)| build::unary_operation(loc, UnaryOperator::Minus, t)),
                (location(), name(), prop::collection::vec(inner.clone(), 0..3)).prop_map(
                    |(loc, n, args)| build::function(loc, &n, args, false)
                ),
                (location(), inner.clone(), inner)
                    .prop_map(|(loc, l, r)| build::interval(loc, l, r)),
            ]
        })
    }

    pub fn literal() -> impl Strategy<Value = Node> {
        (
            location(),
            prop::sample::select(vec![Sign::NoSign, Sign::Negation, Sign::DoubleNegation]),
            name(),
            prop::collection::vec(term(), 0..3),
        )
            .prop_map(|(loc, sign, n, args)| {
                build::literal(
                    loc,
                    sign,
                    build::symbolic_atom(build::function(loc, &n, args, false)),
                )
            })
    }

    pub fn rule() -> impl Strategy<Value = Node> {
        (location(), literal(), prop::collection::vec(literal(), 0..4))
            .prop_map(|(loc, head, body)| build::rule(loc, head, body))
    }

    /// A fact whose arguments are pools of the given sizes.
    pub fn pooled_fact() -> impl Strategy<Value = (Node, usize)> {
        prop::collection::vec(1usize..4, 0..4).prop_map(|sizes| {
            let loc = Location::default();
            let arguments = sizes
                .iter()
                .map(|size| {
                    build::pool(
                        loc,
                        (0..*size as i32)
                            .map(|n| build::symbolic_term(loc, Symbol::number(n)))
                            .collect(),
                    )
                })
                .collect();
            let fact = build::rule(
                loc,
                build::literal(
                    loc,
                    Sign::NoSign,
                    build::symbolic_atom(build::function(loc, "p", arguments, false)),
                ),
                Vec::new(),
            );
            (fact, sizes.iter().product())
        })
    }
}

fn count_nodes(node: &Node) -> usize {
    1 + node.children().iter().map(count_nodes).sum::<usize>()
}

fn relocate(node: &Node, location: Location) -> Node {
    rewrite_ast(node, |node| {
        if node.has_attribute(Attribute::Location) {
            node.update([(Attribute::Location, location)]).unwrap()
        } else {
            node.clone()
        }
    })
}

proptest! {
    #[test]
    fn test_identity_transform_keeps_instance(rule in strategies::rule()) {
        prop_assert!(transform_ast(&rule, |child| child.clone()).ptr_eq(&rule));
    }

    #[test]
    fn test_deep_copy_is_equal_but_distinct(rule in strategies::rule()) {
        let copy = rule.deep_copy();
        prop_assert_eq!(&copy, &rule);
        prop_assert!(!copy.ptr_eq(&rule));
        prop_assert_eq!(copy.to_string(), rule.to_string());
    }

    #[test]
    fn test_location_does_not_affect_equality(
        rule in strategies::rule(),
        location in strategies::location(),
    ) {
        let moved = relocate(&rule, location);
        prop_assert_eq!(moved.location(), Some(location));
        prop_assert_eq!(&moved, &rule);
        prop_assert_eq!(moved.cmp(&rule), std::cmp::Ordering::Equal);
    }

    #[test]
    fn test_visit_ast_reaches_every_node(rule in strategies::rule()) {
        let mut visited = 0;
        visit_ast(&rule, |_| {
            visited += 1;
            true
        });
        prop_assert_eq!(visited, count_nodes(&rule));
    }

    #[test]
    fn test_unpool_cardinality_is_product((fact, expected) in strategies::pooled_fact()) {
        let expanded = fact.unpool(true, true);
        prop_assert_eq!(expanded.len(), expected);
        for statement in &expanded {
            let mut pools = 0;
            visit_ast(statement, |node| {
                pools += usize::from(node.node_type() == NodeType::Pool);
                true
            });
            prop_assert_eq!(pools, 0);
        }
    }

    #[test]
    fn test_rules_without_pools_unpool_to_themselves(rule in strategies::rule()) {
        let expanded = rule.unpool(true, true);
        prop_assert_eq!(expanded.len(), 1);
        prop_assert!(expanded[0].ptr_eq(&rule));
    }

    #[test]
    fn test_ordering_is_consistent(
        lhs in strategies::rule(),
        rhs in strategies::rule(),
    ) {
        prop_assert_eq!(lhs.cmp(&rhs), rhs.cmp(&lhs).reverse());
        prop_assert_eq!(lhs == rhs, lhs.cmp(&rhs) == std::cmp::Ordering::Equal);
    }
}

#[cfg(feature = "host")]
proptest! {
    #[test]
    fn test_host_round_trip(rule in strategies::rule()) {
        let decoded = asp_ast::from_host(&asp_ast::to_host(&rule)).unwrap();
        prop_assert_eq!(&decoded, &rule);
        prop_assert_eq!(decoded.location(), rule.location());
    }
}
