use std::fmt::{self, Display, Formatter};

use itertools::Itertools;
use strum::EnumIter;

use crate::{error::Error, location::Location, node::Node, symbol::Symbol, text::Text};

/// The shape of a value held by a node attribute.
///
/// The declaration order is stable; it is the order in which values of
/// different shapes are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, EnumIter)]
pub enum ValueType {
    #[strum(to_string = "int")]
    Int,
    #[strum(to_string = "symbol")]
    Symbol,
    #[strum(to_string = "location")]
    Location,
    #[strum(to_string = "string")]
    Str,
    #[strum(to_string = "ast")]
    Ast,
    #[strum(to_string = "optional ast")]
    OptionalAst,
    #[strum(to_string = "string list")]
    StrList,
    #[strum(to_string = "ast list")]
    AstList,
}

/// The value of a single node attribute.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeValue {
    Int(i32),
    Symbol(Symbol),
    Location(Location),
    Str(Text),
    Ast(Node),
    OptionalAst(Option<Node>),
    StrList(Vec<Text>),
    AstList(Vec<Node>),
}

/// Double dispatch over the active alternative of a [`NodeValue`].
pub trait ValueVisitor {
    type Output;

    fn visit_int(&mut self, value: i32) -> Self::Output;
    fn visit_symbol(&mut self, value: &Symbol) -> Self::Output;
    fn visit_location(&mut self, value: &Location) -> Self::Output;
    fn visit_str(&mut self, value: &Text) -> Self::Output;
    fn visit_ast(&mut self, value: &Node) -> Self::Output;
    fn visit_optional_ast(&mut self, value: Option<&Node>) -> Self::Output;
    fn visit_str_list(&mut self, value: &[Text]) -> Self::Output;
    fn visit_ast_list(&mut self, value: &[Node]) -> Self::Output;
}

impl NodeValue {
    pub fn value_type(&self) -> ValueType {
        match self {
            NodeValue::Int(_) => ValueType::Int,
            NodeValue::Symbol(_) => ValueType::Symbol,
            NodeValue::Location(_) => ValueType::Location,
            NodeValue::Str(_) => ValueType::Str,
            NodeValue::Ast(_) => ValueType::Ast,
            NodeValue::OptionalAst(_) => ValueType::OptionalAst,
            NodeValue::StrList(_) => ValueType::StrList,
            NodeValue::AstList(_) => ValueType::AstList,
        }
    }

    pub fn accept<V: ValueVisitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            NodeValue::Int(v) => visitor.visit_int(*v),
            NodeValue::Symbol(v) => visitor.visit_symbol(v),
            NodeValue::Location(v) => visitor.visit_location(v),
            NodeValue::Str(v) => visitor.visit_str(v),
            NodeValue::Ast(v) => visitor.visit_ast(v),
            NodeValue::OptionalAst(v) => visitor.visit_optional_ast(v.as_ref()),
            NodeValue::StrList(v) => visitor.visit_str_list(v),
            NodeValue::AstList(v) => visitor.visit_ast_list(v),
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            NodeValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<Text> {
        match self {
            NodeValue::Str(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            NodeValue::Ast(v) => Some(v),
            NodeValue::OptionalAst(v) => v.as_ref(),
            _ => None,
        }
    }

    pub fn as_nodes(&self) -> Option<&[Node]> {
        match self {
            NodeValue::AstList(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_texts(&self) -> Option<&[Text]> {
        match self {
            NodeValue::StrList(v) => Some(v),
            _ => None,
        }
    }

    /// Child nodes held by this value, in order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        let (single, list): (Option<&Node>, &[Node]) = match self {
            NodeValue::Ast(node) => (Some(node), &[]),
            NodeValue::OptionalAst(node) => (node.as_ref(), &[]),
            NodeValue::AstList(nodes) => (None, nodes),
            _ => (None, &[]),
        };
        single.into_iter().chain(list.iter())
    }

    pub(crate) fn mismatch(&self, expected: ValueType) -> Error {
        Error::TypeMismatch {
            expected,
            found: self.value_type(),
        }
    }
}

impl Display for NodeValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            NodeValue::Int(v) => write!(f, "{}", v),
            NodeValue::Symbol(v) => write!(f, "{}", v),
            NodeValue::Location(v) => write!(f, "{}", v),
            NodeValue::Str(v) => write!(f, "{}", v),
            NodeValue::Ast(v) => write!(f, "{}", v),
            NodeValue::OptionalAst(Some(v)) => write!(f, "{}", v),
            NodeValue::OptionalAst(None) => Ok(()),
            NodeValue::StrList(v) => write!(f, "[{}]", v.iter().join(", ")),
            NodeValue::AstList(v) => write!(f, "[{}]", v.iter().join(", ")),
        }
    }
}

impl From<i32> for NodeValue {
    fn from(value: i32) -> Self {
        NodeValue::Int(value)
    }
}

impl From<u16> for NodeValue {
    fn from(value: u16) -> Self {
        NodeValue::Int(i32::from(value))
    }
}

impl From<bool> for NodeValue {
    fn from(value: bool) -> Self {
        NodeValue::Int(value as i32)
    }
}

impl From<Symbol> for NodeValue {
    fn from(value: Symbol) -> Self {
        NodeValue::Symbol(value)
    }
}

impl From<Location> for NodeValue {
    fn from(value: Location) -> Self {
        NodeValue::Location(value)
    }
}

impl From<Text> for NodeValue {
    fn from(value: Text) -> Self {
        NodeValue::Str(value)
    }
}

impl From<&str> for NodeValue {
    fn from(value: &str) -> Self {
        NodeValue::Str(Text::new(value))
    }
}

impl From<String> for NodeValue {
    fn from(value: String) -> Self {
        NodeValue::Str(Text::new(&value))
    }
}

impl From<Node> for NodeValue {
    fn from(value: Node) -> Self {
        NodeValue::Ast(value)
    }
}

impl From<Option<Node>> for NodeValue {
    fn from(value: Option<Node>) -> Self {
        NodeValue::OptionalAst(value)
    }
}

impl From<Vec<Node>> for NodeValue {
    fn from(value: Vec<Node>) -> Self {
        NodeValue::AstList(value)
    }
}

impl From<Vec<Text>> for NodeValue {
    fn from(value: Vec<Text>) -> Self {
        NodeValue::StrList(value)
    }
}

impl From<&[&str]> for NodeValue {
    fn from(value: &[&str]) -> Self {
        NodeValue::StrList(value.iter().map(|s| Text::new(s)).collect())
    }
}

macro_rules! try_from_value {
    ($ty:ty, $variant:ident) => {
        impl TryFrom<NodeValue> for $ty {
            type Error = Error;

            fn try_from(value: NodeValue) -> Result<Self, Self::Error> {
                match value {
                    NodeValue::$variant(v) => Ok(v),
                    other => Err(other.mismatch(ValueType::$variant)),
                }
            }
        }
    };
}

try_from_value!(i32, Int);
try_from_value!(Symbol, Symbol);
try_from_value!(Location, Location);
try_from_value!(Text, Str);
try_from_value!(Node, Ast);
try_from_value!(Option<Node>, OptionalAst);
try_from_value!(Vec<Text>, StrList);
try_from_value!(Vec<Node>, AstList);

impl TryFrom<NodeValue> for bool {
    type Error = Error;

    fn try_from(value: NodeValue) -> Result<Self, Self::Error> {
        match i32::try_from(value)? {
            0 => Ok(false),
            1 => Ok(true),
            v => Err(Error::invalid_argument(format!("{} is not a boolean", v))),
        }
    }
}
