use asp_ast::{
    Location, Node, NodeType, Sign, Symbol, Transformer, UnpoolOptions, build, transform_ast,
    unpool,
};

fn main() {
    divan::main();
}

fn literal(name: &str, arguments: Vec<Node>) -> Node {
    let loc = Location::default();
    build::literal(
        loc,
        Sign::NoSign,
        build::symbolic_atom(build::function(loc, name, arguments, false)),
    )
}

fn program(n: usize) -> Vec<Node> {
    let loc = Location::default();
    (0..n)
        .map(|i| {
            build::rule(
                loc,
                literal("p", vec![build::variable(loc, "X"), build::symbolic_term(loc, Symbol::number(i as i32))]),
                vec![
                    literal("q", vec![build::variable(loc, "X")]),
                    literal("r", vec![build::variable(loc, "Y")]),
                ],
            )
        })
        .collect()
}

fn pooled(sizes: &[i32]) -> Node {
    let loc = Location::default();
    let arguments = sizes
        .iter()
        .map(|size| {
            build::pool(
                loc,
                (0..*size)
                    .map(|n| build::symbolic_term(loc, Symbol::number(n)))
                    .collect(),
            )
        })
        .collect();
    build::rule(loc, literal("p", arguments), Vec::new())
}

struct RenameX;

impl Transformer for RenameX {
    fn transform(&mut self, node: &Node) -> Node {
        if node.node_type() == NodeType::Variable && node.to_string() == "X" {
            build::variable(Location::default(), "Z")
        } else {
            self.transform_children(node)
        }
    }
}

#[divan::bench(args = [100, 1_000])]
fn identity_transform(bencher: divan::Bencher, n: usize) {
    let program = program(n);
    bencher.bench(|| {
        program
            .iter()
            .map(|rule| transform_ast(rule, |child| child.clone()))
            .collect::<Vec<_>>()
    });
}

#[divan::bench(args = [100, 1_000])]
fn rename_variables(bencher: divan::Bencher, n: usize) {
    let program = program(n);
    bencher.bench(|| {
        program
            .iter()
            .map(|rule| RenameX.transform(rule))
            .collect::<Vec<_>>()
    });
}

#[divan::bench(name = "unpool_4x4x4")]
fn unpool_product(bencher: divan::Bencher) {
    let rule = pooled(&[4, 4, 4]);
    bencher.bench(|| unpool(&rule, UnpoolOptions::default()));
}

#[divan::bench(args = [100, 1_000])]
fn deep_copy(bencher: divan::Bencher, n: usize) {
    let program = program(n);
    bencher.bench(|| program.iter().map(Node::deep_copy).collect::<Vec<_>>());
}

#[divan::bench(args = [100])]
fn to_string(bencher: divan::Bencher, n: usize) {
    let program = program(n);
    bencher.bench(|| asp_ast::program_to_string(&program));
}

#[cfg(feature = "host")]
#[divan::bench(args = [100])]
fn host_round_trip(bencher: divan::Bencher, n: usize) {
    let program = program(n);
    bencher.bench(|| {
        program
            .iter()
            .map(|rule| asp_ast::from_host(&asp_ast::to_host(rule)))
            .collect::<Result<Vec<_>, _>>()
    });
}
