use std::{
    cmp::Ordering,
    fmt::{self, Display, Formatter},
};

use itertools::Itertools;

use crate::text::Text;

/// A ground term as it appears in a `SymbolicTerm` node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    Infimum,
    Number(i32),
    String(Text),
    Function {
        name: Text,
        arguments: Vec<Symbol>,
        positive: bool,
    },
    Supremum,
}

impl Symbol {
    pub fn number(n: i32) -> Self {
        Symbol::Number(n)
    }

    pub fn string(s: &str) -> Self {
        Symbol::String(Text::new(s))
    }

    /// A constant, i.e. a positive function without arguments.
    pub fn id(name: &str) -> Self {
        Self::function(name, Vec::new(), true)
    }

    pub fn function(name: &str, arguments: Vec<Symbol>, positive: bool) -> Self {
        Symbol::Function {
            name: Text::new(name),
            arguments,
            positive,
        }
    }

    pub fn tuple(arguments: Vec<Symbol>) -> Self {
        Self::function("", arguments, true)
    }

    pub fn is_tuple(&self) -> bool {
        matches!(self, Symbol::Function { name, .. } if name.is_empty())
    }

    fn rank(&self) -> u8 {
        match self {
            Symbol::Infimum => 0,
            Symbol::Number(_) => 1,
            Symbol::Function { arguments, .. } if arguments.is_empty() => 2,
            Symbol::String(_) => 3,
            Symbol::Function { .. } => 4,
            Symbol::Supremum => 5,
        }
    }
}

impl Ord for Symbol {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Symbol::Number(a), Symbol::Number(b)) => a.cmp(b),
            (Symbol::String(a), Symbol::String(b)) => a.cmp(b),
            (
                Symbol::Function {
                    name: name_a,
                    arguments: args_a,
                    positive: pos_a,
                },
                Symbol::Function {
                    name: name_b,
                    arguments: args_b,
                    positive: pos_b,
                },
            ) => args_a
                .len()
                .cmp(&args_b.len())
                .then_with(|| pos_b.cmp(pos_a))
                .then_with(|| name_a.cmp(name_b))
                .then_with(|| args_a.cmp(args_b)),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Symbol {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

pub(crate) fn escape_string(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            c => escaped.push(c),
        }
    }
    escaped
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Infimum => write!(f, "#inf"),
            Symbol::Supremum => write!(f, "#sup"),
            Symbol::Number(n) => write!(f, "{}", n),
            Symbol::String(s) => s.resolve_with(|s| write!(f, "\"{}\"", escape_string(s))),
            Symbol::Function {
                name,
                arguments,
                positive,
            } => {
                if !positive {
                    write!(f, "-")?;
                }
                write!(f, "{}", name)?;
                let is_tuple = name.is_empty();
                if !arguments.is_empty() || is_tuple {
                    write!(f, "({}", arguments.iter().join(","))?;
                    if is_tuple && arguments.len() == 1 {
                        write!(f, ",")?;
                    }
                    write!(f, ")")?;
                }
                Ok(())
            }
        }
    }
}
