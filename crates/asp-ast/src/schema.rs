//! The node schema: which attributes each node type owns, in which order, and
//! which value shape every slot holds.
//!
//! The schema table below is the single source of truth. It generates the
//! [`NodeType`] enumeration, the static per-type attribute lists returned by
//! [`NodeType::attributes`], and one typed factory per node type in [`build`].
use paste::paste;
use strum::{Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

use crate::{
    error::{Error, Result},
    location::Location,
    node::Node,
    operators::{
        AggregateFunction, BinaryOperator, ComparisonOperator, Sign, TheoryAtomType,
        TheoryOperatorType, TheorySequenceType, UnaryOperator,
    },
    symbol::Symbol,
    value::{NodeValue, ValueType},
};

/// A named slot of a node.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    EnumCount,
    IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum Attribute {
    Argument,
    Arguments,
    Arity,
    Atom,
    Atoms,
    AtomType,
    Bias,
    Body,
    Code,
    Coefficient,
    Comparison,
    Condition,
    Csp,
    Elements,
    External,
    ExternalType,
    Function,
    Guard,
    Guards,
    Head,
    IsDefault,
    Left,
    LeftGuard,
    Literal,
    Location,
    Modifier,
    Name,
    NodeU,
    NodeV,
    OperatorName,
    OperatorType,
    Operators,
    Parameters,
    Positive,
    Priority,
    Right,
    RightGuard,
    SequenceType,
    Sign,
    Symbol,
    Term,
    Terms,
    Value,
    Variable,
    Weight,
}

impl Attribute {
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// The integers an `Int` slot accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntDomain {
    Any,
    Bool,
    Unsigned,
    Enum { name: &'static str, count: usize },
}

impl IntDomain {
    pub fn contains(self, value: i32) -> bool {
        match self {
            IntDomain::Any => true,
            IntDomain::Bool => value == 0 || value == 1,
            IntDomain::Unsigned => value >= 0,
            IntDomain::Enum { count, .. } => usize::try_from(value).is_ok_and(|v| v < count),
        }
    }
}

/// One entry of a node type's schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeSpec {
    pub attribute: Attribute,
    pub value_type: ValueType,
    pub domain: IntDomain,
}

macro_rules! slot_param {
    (Location) => { Location };
    (Symbol) => { Symbol };
    (Int) => { i32 };
    (Unsigned) => { u16 };
    (Bool) => { bool };
    (Str) => { &str };
    (StrList) => { &[&str] };
    (Ast) => { Node };
    (OptAst) => { Option<Node> };
    (AstList) => { Vec<Node> };
    ($enum:ident) => { $enum };
}

macro_rules! slot_type {
    (Location) => { ValueType::Location };
    (Symbol) => { ValueType::Symbol };
    (Str) => { ValueType::Str };
    (StrList) => { ValueType::StrList };
    (Ast) => { ValueType::Ast };
    (OptAst) => { ValueType::OptionalAst };
    (AstList) => { ValueType::AstList };
    ($int:ident) => { ValueType::Int };
}

macro_rules! slot_domain {
    (Int) => { IntDomain::Any };
    (Unsigned) => { IntDomain::Unsigned };
    (Bool) => { IntDomain::Bool };
    (Location) => { IntDomain::Any };
    (Symbol) => { IntDomain::Any };
    (Str) => { IntDomain::Any };
    (StrList) => { IntDomain::Any };
    (Ast) => { IntDomain::Any };
    (OptAst) => { IntDomain::Any };
    (AstList) => { IntDomain::Any };
    ($enum:ident) => {
        IntDomain::Enum {
            name: stringify!($enum),
            count: <$enum as EnumCount>::COUNT,
        }
    };
}

macro_rules! node_types {
    ($( $variant:ident { $( $field:ident : $kind:ident ),* $(,)? } )*) => {
        paste! {
            /// The closed set of node shapes.
            #[derive(
                Debug,
                Clone,
                Copy,
                PartialEq,
                Eq,
                Hash,
                PartialOrd,
                Ord,
                Display,
                EnumString,
                EnumIter,
                EnumCount,
                IntoStaticStr,
            )]
            pub enum NodeType {
                $( $variant, )*
            }

            impl NodeType {
                /// The attributes owned by this node type, in schema order.
                pub fn attributes(self) -> &'static [AttributeSpec] {
                    match self {
                        $(
                            NodeType::$variant => {
                                static ATTRIBUTES: &[AttributeSpec] = &[
                                    $(
                                        AttributeSpec {
                                            attribute: Attribute::[<$field:camel>],
                                            value_type: slot_type!($kind),
                                            domain: slot_domain!($kind),
                                        },
                                    )*
                                ];
                                ATTRIBUTES
                            }
                        )*
                    }
                }
            }

            pub mod build {
                //! Typed node factories, one per [`NodeType`](super::NodeType).
                //!
                //! Argument order follows the schema. The signatures encode every
                //! slot's shape, so these factories cannot fail; untyped input goes
                //! through [`Node::new`](crate::Node::new) instead.
                use super::*;

                $(
                    #[doc = "Creates a `" $variant "` node."]
                    pub fn [<$variant:snake>]( $( $field: slot_param!($kind) ),* ) -> Node {
                        Node::from_parts(
                            NodeType::$variant,
                            smallvec::smallvec![ $( NodeValue::from($field) ),* ],
                        )
                    }
                )*
            }
        }
    };
}

node_types! {
    Id { location: Location, name: Str }
    Variable { location: Location, name: Str }
    SymbolicTerm { location: Location, symbol: Symbol }
    UnaryOperation { location: Location, operator_type: UnaryOperator, argument: Ast }
    BinaryOperation { location: Location, operator_type: BinaryOperator, left: Ast, right: Ast }
    Interval { location: Location, left: Ast, right: Ast }
    Function { location: Location, name: Str, arguments: AstList, external: Bool }
    Pool { location: Location, arguments: AstList }
    CspProduct { location: Location, coefficient: Ast, variable: OptAst }
    CspSum { location: Location, terms: AstList }
    CspGuard { location: Location, comparison: ComparisonOperator, term: Ast }
    BooleanConstant { value: Bool }
    SymbolicAtom { symbol: Ast }
    Comparison { comparison: ComparisonOperator, left: Ast, right: Ast }
    CspLiteral { location: Location, term: Ast, guards: AstList }
    AggregateGuard { comparison: ComparisonOperator, term: Ast }
    ConditionalLiteral { location: Location, literal: Ast, condition: AstList }
    Aggregate { location: Location, left_guard: OptAst, elements: AstList, right_guard: OptAst }
    BodyAggregateElement { terms: AstList, condition: AstList }
    BodyAggregate {
        location: Location,
        left_guard: OptAst,
        function: AggregateFunction,
        elements: AstList,
        right_guard: OptAst,
    }
    HeadAggregateElement { terms: AstList, condition: Ast }
    HeadAggregate {
        location: Location,
        left_guard: OptAst,
        function: AggregateFunction,
        elements: AstList,
        right_guard: OptAst,
    }
    Disjunction { location: Location, elements: AstList }
    DisjointElement { location: Location, terms: AstList, term: Ast, condition: AstList }
    Disjoint { location: Location, elements: AstList }
    TheorySequence { location: Location, sequence_type: TheorySequenceType, terms: AstList }
    TheoryFunction { location: Location, name: Str, arguments: AstList }
    TheoryUnparsedTermElement { operators: StrList, term: Ast }
    TheoryUnparsedTerm { location: Location, elements: AstList }
    TheoryGuard { operator_name: Str, term: Ast }
    TheoryAtomElement { terms: AstList, condition: AstList }
    TheoryAtom { location: Location, term: Ast, elements: AstList, guard: OptAst }
    Literal { location: Location, sign: Sign, atom: Ast }
    TheoryOperatorDefinition {
        location: Location,
        name: Str,
        priority: Unsigned,
        operator_type: TheoryOperatorType,
    }
    TheoryTermDefinition { location: Location, name: Str, operators: AstList }
    TheoryGuardDefinition { operators: StrList, term: Str }
    TheoryAtomDefinition {
        location: Location,
        atom_type: TheoryAtomType,
        name: Str,
        arity: Unsigned,
        term: Str,
        guard: OptAst,
    }
    Rule { location: Location, head: Ast, body: AstList }
    Definition { location: Location, name: Str, value: Ast, is_default: Bool }
    ShowSignature { location: Location, name: Str, arity: Unsigned, positive: Bool, csp: Bool }
    ShowTerm { location: Location, term: Ast, body: AstList, csp: Bool }
    Minimize { location: Location, weight: Ast, priority: Ast, terms: AstList, body: AstList }
    Script { location: Location, name: Str, code: Str }
    Program { location: Location, name: Str, parameters: AstList }
    External { location: Location, atom: Ast, body: AstList, external_type: Ast }
    Edge { location: Location, node_u: Ast, node_v: Ast, body: AstList }
    Heuristic {
        location: Location,
        atom: Ast,
        body: AstList,
        bias: Ast,
        priority: Ast,
        modifier: Ast,
    }
    ProjectAtom { location: Location, atom: Ast, body: AstList }
    ProjectSignature { location: Location, name: Str, arity: Unsigned, positive: Bool }
    Defined { location: Location, name: Str, arity: Unsigned, positive: Bool }
    TheoryDefinition { location: Location, name: Str, terms: AstList, atoms: AstList }
}

impl NodeType {
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Position of `attribute` in this type's schema.
    pub fn attribute_index(self, attribute: Attribute) -> Option<usize> {
        self.attributes()
            .iter()
            .position(|spec| spec.attribute == attribute)
    }

    pub fn has_attribute(self, attribute: Attribute) -> bool {
        self.attribute_index(attribute).is_some()
    }

    pub(crate) fn spec(self, attribute: Attribute) -> Result<(usize, &'static AttributeSpec)> {
        self.attributes()
            .iter()
            .enumerate()
            .find(|(_, spec)| spec.attribute == attribute)
            .ok_or(Error::UnknownAttribute {
                node_type: self,
                attribute,
            })
    }

    /// Checks a complete, schema-ordered value list for this node type.
    pub fn check_values(self, values: &[NodeValue]) -> Result<()> {
        let specs = self.attributes();
        if specs.len() != values.len() {
            return Err(Error::invalid_argument(format!(
                "`{}` expects {} arguments, got {}",
                self,
                specs.len(),
                values.len()
            )));
        }

        specs
            .iter()
            .zip(values)
            .try_for_each(|(spec, value)| self.check_value(spec, value))
    }

    pub(crate) fn check_value(self, spec: &AttributeSpec, value: &NodeValue) -> Result<()> {
        if value.value_type() != spec.value_type {
            return Err(Error::invalid_argument(format!(
                "`{}` attribute `{}` expects {}, got {}",
                self,
                spec.attribute,
                spec.value_type,
                value.value_type()
            )));
        }

        self.check_domain(spec, value)
    }

    pub(crate) fn check_domain(self, spec: &AttributeSpec, value: &NodeValue) -> Result<()> {
        match value {
            NodeValue::Int(v) if !spec.domain.contains(*v) => {
                Err(Error::invalid_argument(format!(
                    "`{}` attribute `{}` does not accept {}{}",
                    self,
                    spec.attribute,
                    v,
                    match spec.domain {
                        IntDomain::Enum { name, .. } => format!(" as {}", name),
                        IntDomain::Bool => " as a boolean".to_string(),
                        IntDomain::Unsigned => " as an unsigned value".to_string(),
                        IntDomain::Any => String::new(),
                    }
                )))
            }
            _ => Ok(()),
        }
    }
}
