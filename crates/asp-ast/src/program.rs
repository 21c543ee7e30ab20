//! Boundaries towards the components that produce and consume statements.
use itertools::Itertools;
use tracing::debug;

use crate::{
    error::Result,
    node::Node,
    unpool::{UnpoolOptions, unpool},
};

/// Consumes top-level statements, one at a time.
pub trait ProgramBuilder {
    fn add(&mut self, statement: Node) -> Result<()>;
}

impl ProgramBuilder for Vec<Node> {
    fn add(&mut self, statement: Node) -> Result<()> {
        self.push(statement);
        Ok(())
    }
}

impl<B: ProgramBuilder + ?Sized> ProgramBuilder for &mut B {
    fn add(&mut self, statement: Node) -> Result<()> {
        (**self).add(statement)
    }
}

/// Produces top-level statements, e.g. a parser.
pub trait StatementSource {
    fn for_each_statement<F>(self, callback: F) -> Result<()>
    where
        F: FnMut(Node) -> Result<()>;
}

impl StatementSource for Vec<Node> {
    fn for_each_statement<F>(self, callback: F) -> Result<()>
    where
        F: FnMut(Node) -> Result<()>,
    {
        self.into_iter().try_for_each(callback)
    }
}

impl StatementSource for &[Node] {
    fn for_each_statement<F>(self, mut callback: F) -> Result<()>
    where
        F: FnMut(Node) -> Result<()>,
    {
        self.iter().try_for_each(|statement| callback(statement.clone()))
    }
}

/// Forwards the unpooled alternatives of every statement to `inner`.
#[derive(Debug)]
pub struct UnpoolingBuilder<B> {
    inner: B,
    options: UnpoolOptions,
}

impl<B: ProgramBuilder> UnpoolingBuilder<B> {
    pub fn new(inner: B) -> Self {
        Self::with_options(inner, UnpoolOptions::default())
    }

    pub fn with_options(inner: B, options: UnpoolOptions) -> Self {
        UnpoolingBuilder { inner, options }
    }

    pub fn into_inner(self) -> B {
        self.inner
    }
}

impl<B: ProgramBuilder> ProgramBuilder for UnpoolingBuilder<B> {
    fn add(&mut self, statement: Node) -> Result<()> {
        unpool(&statement, self.options)
            .into_iter()
            .try_for_each(|statement| self.inner.add(statement))
    }
}

/// Feeds every statement of `source` into `builder`. Returns the number of
/// statements read from `source`.
pub fn transfer<S, B>(source: S, builder: &mut B) -> Result<usize>
where
    S: StatementSource,
    B: ProgramBuilder + ?Sized,
{
    let mut count = 0;
    source.for_each_statement(|statement| {
        count += 1;
        builder.add(statement)
    })?;
    debug!(statements = count, "transferred statements");
    Ok(count)
}

/// Renders statements in surface syntax, one per line.
pub fn program_to_string<'a, I>(statements: I) -> String
where
    I: IntoIterator<Item = &'a Node>,
{
    statements.into_iter().join("\n")
}
