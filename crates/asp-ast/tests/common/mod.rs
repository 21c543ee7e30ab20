#![allow(dead_code)]

use asp_ast::{
    AggregateFunction, BinaryOperator, ComparisonOperator, Location, Node, Sign, Symbol,
    TheoryAtomType, TheoryOperatorType, TheorySequenceType, UnaryOperator, build,
};

/// Routes `tracing` events to the test output; set `RUST_LOG` to see them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn loc() -> Location {
    Location::span("sample.lp", 1, 1, 10)
}

pub fn num(n: i32) -> Node {
    build::symbolic_term(loc(), Symbol::number(n))
}

pub fn var(name: &str) -> Node {
    build::variable(loc(), name)
}

pub fn constant(name: &str) -> Node {
    build::symbolic_term(loc(), Symbol::id(name))
}

pub fn function(name: &str, arguments: Vec<Node>) -> Node {
    build::function(loc(), name, arguments, false)
}

pub fn atom(name: &str, arguments: Vec<Node>) -> Node {
    build::symbolic_atom(function(name, arguments))
}

pub fn literal(name: &str, arguments: Vec<Node>) -> Node {
    build::literal(loc(), Sign::NoSign, atom(name, arguments))
}

pub fn fact(name: &str, arguments: Vec<Node>) -> Node {
    build::rule(loc(), literal(name, arguments), Vec::new())
}

pub fn guard(comparison: ComparisonOperator, term: Node) -> Node {
    build::aggregate_guard(comparison, term)
}

/// One instance of every node type.
pub fn samples() -> Vec<Node> {
    let unparsed = build::theory_unparsed_term(
        loc(),
        vec![
            build::theory_unparsed_term_element(&[], var("X")),
            build::theory_unparsed_term_element(&["-"], var("Y")),
        ],
    );
    let theory_element = build::theory_atom_element(vec![unparsed.clone()], vec![literal("p", Vec::new())]);
    let operator_definition =
        build::theory_operator_definition(loc(), "-", 2, TheoryOperatorType::Unary);
    let term_definition = build::theory_term_definition(loc(), "term", vec![operator_definition.clone()]);
    let guard_definition = build::theory_guard_definition(&["<=", "="], "term");
    let atom_definition = build::theory_atom_definition(
        loc(),
        TheoryAtomType::Body,
        "diff",
        0,
        "term",
        Some(guard_definition.clone()),
    );
    let csp_guard = build::csp_guard(loc(), ComparisonOperator::LessEqual, num(3));
    let conditional = build::conditional_literal(loc(), literal("a", Vec::new()), vec![literal("b", Vec::new())]);
    let body_element = build::body_aggregate_element(vec![var("X")], vec![literal("p", vec![var("X")])]);
    let head_element = build::head_aggregate_element(vec![var("X")], conditional.clone());
    let disjoint_element = build::disjoint_element(
        loc(),
        vec![var("X")],
        build::csp_sum(loc(), vec![build::csp_product(loc(), num(1), Some(var("X")))]),
        vec![literal("q", vec![var("X")])],
    );

    vec![
        build::id(loc(), "k"),
        var("X"),
        build::symbolic_term(
            loc(),
            Symbol::function("f", vec![Symbol::number(1), Symbol::string("s")], true),
        ),
        build::unary_operation(loc(), UnaryOperator::Minus, var("X")),
        build::binary_operation(loc(), BinaryOperator::Plus, var("X"), num(1)),
        build::interval(loc(), num(1), num(3)),
        function("f", vec![var("X"), num(2)]),
        build::pool(loc(), vec![num(1), num(2)]),
        build::csp_product(loc(), num(2), Some(var("X"))),
        build::csp_sum(loc(), vec![build::csp_product(loc(), num(2), None)]),
        csp_guard.clone(),
        build::boolean_constant(false),
        atom("a", vec![num(1)]),
        build::comparison(ComparisonOperator::NotEqual, var("X"), var("Y")),
        build::csp_literal(loc(), build::csp_sum(loc(), Vec::new()), vec![csp_guard]),
        guard(ComparisonOperator::GreaterThan, num(0)),
        conditional.clone(),
        build::aggregate(
            loc(),
            Some(guard(ComparisonOperator::LessEqual, num(1))),
            vec![conditional.clone()],
            None,
        ),
        body_element.clone(),
        build::body_aggregate(
            loc(),
            None,
            AggregateFunction::Sum,
            vec![body_element],
            Some(guard(ComparisonOperator::LessThan, num(10))),
        ),
        head_element.clone(),
        build::head_aggregate(loc(), None, AggregateFunction::Max, vec![head_element], None),
        build::disjunction(loc(), vec![conditional.clone(), conditional]),
        disjoint_element.clone(),
        build::disjoint(loc(), vec![disjoint_element]),
        build::theory_sequence(loc(), TheorySequenceType::List, vec![num(1), num(2)]),
        build::theory_function(loc(), "+", vec![num(1), var("X")]),
        build::theory_unparsed_term_element(&["-", "~"], num(1)),
        unparsed,
        build::theory_guard("<=", num(5)),
        theory_element.clone(),
        build::theory_atom(
            loc(),
            function("diff", Vec::new()),
            vec![theory_element],
            Some(build::theory_guard("<=", num(5))),
        ),
        build::literal(loc(), Sign::Negation, atom("b", Vec::new())),
        operator_definition,
        term_definition.clone(),
        guard_definition,
        atom_definition.clone(),
        build::rule(loc(), literal("a", vec![var("X")]), vec![literal("b", vec![var("X")])]),
        build::definition(loc(), "n", num(3), false),
        build::show_signature(loc(), "p", 1, true, false),
        build::show_term(loc(), var("X"), vec![literal("p", vec![var("X")])], false),
        build::minimize(loc(), var("X"), num(1), vec![var("X")], vec![literal("p", vec![var("X")])]),
        build::script(loc(), "python", "#script (python)\ndef f(x): return x\n#end."),
        build::program(loc(), "step", vec![build::id(loc(), "t")]),
        build::external(loc(), atom("e", Vec::new()), Vec::new(), constant("false")),
        build::edge(loc(), constant("a"), constant("b"), vec![literal("c", Vec::new())]),
        build::heuristic(
            loc(),
            atom("a", Vec::new()),
            Vec::new(),
            num(1),
            num(0),
            constant("level"),
        ),
        build::project_atom(loc(), atom("a", Vec::new()), vec![literal("b", Vec::new())]),
        build::project_signature(loc(), "p", 2, false),
        build::defined(loc(), "q", 0, true),
        build::theory_definition(loc(), "diff", vec![term_definition], vec![atom_definition]),
    ]
}
