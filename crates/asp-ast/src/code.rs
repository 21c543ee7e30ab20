use std::fmt::{self, Display, Formatter, Write};

use itertools::Itertools;

use crate::{
    node::{Node, Values},
    operators::{
        AggregateFunction, BinaryOperator, ComparisonOperator, Sign, TheoryAtomType,
        TheoryOperatorType, TheorySequenceType, UnaryOperator,
    },
    schema::{Attribute, NodeType},
    symbol::Symbol,
    text::Text,
    value::NodeValue,
};

/// Typed access to a snapshot of a node's values while printing.
struct Fields {
    node_type: NodeType,
    values: Values,
}

impl Fields {
    fn value(&self, attribute: Attribute) -> Result<&NodeValue, fmt::Error> {
        self.node_type
            .attribute_index(attribute)
            .map(|index| &self.values[index])
            .ok_or(fmt::Error)
    }

    fn node(&self, attribute: Attribute) -> Result<&Node, fmt::Error> {
        match self.value(attribute)? {
            NodeValue::Ast(node) => Ok(node),
            _ => Err(fmt::Error),
        }
    }

    fn optional(&self, attribute: Attribute) -> Result<Option<&Node>, fmt::Error> {
        match self.value(attribute)? {
            NodeValue::OptionalAst(node) => Ok(node.as_ref()),
            _ => Err(fmt::Error),
        }
    }

    fn nodes(&self, attribute: Attribute) -> Result<&[Node], fmt::Error> {
        self.value(attribute)?.as_nodes().ok_or(fmt::Error)
    }

    fn text(&self, attribute: Attribute) -> Result<Text, fmt::Error> {
        self.value(attribute)?.as_text().ok_or(fmt::Error)
    }

    fn texts(&self, attribute: Attribute) -> Result<&[Text], fmt::Error> {
        self.value(attribute)?.as_texts().ok_or(fmt::Error)
    }

    fn int(&self, attribute: Attribute) -> Result<i32, fmt::Error> {
        self.value(attribute)?.as_int().ok_or(fmt::Error)
    }

    fn flag(&self, attribute: Attribute) -> Result<bool, fmt::Error> {
        Ok(self.int(attribute)? != 0)
    }

    fn enumeration<E: TryFrom<i32>>(&self, attribute: Attribute) -> Result<E, fmt::Error> {
        E::try_from(self.int(attribute)?).map_err(|_| fmt::Error)
    }

    fn symbol(&self, attribute: Attribute) -> Result<&Symbol, fmt::Error> {
        match self.value(attribute)? {
            NodeValue::Symbol(symbol) => Ok(symbol),
            _ => Err(fmt::Error),
        }
    }
}

fn write_body<W: Write>(buf: &mut W, body: &[Node]) -> fmt::Result {
    if !body.is_empty() {
        write!(buf, " : {}", body.iter().join("; "))?;
    }
    Ok(())
}

fn write_condition<W: Write>(buf: &mut W, condition: &[Node]) -> fmt::Result {
    if !condition.is_empty() {
        write!(buf, ": {}", condition.iter().join(", "))?;
    }
    Ok(())
}

fn write_elements<W: Write>(buf: &mut W, elements: &[Node]) -> fmt::Result {
    if elements.is_empty() {
        buf.write_str("{ }")
    } else {
        write!(buf, "{{ {} }}", elements.iter().join("; "))
    }
}

fn write_guards<W: Write>(
    buf: &mut W,
    left: Option<&Node>,
    right: Option<&Node>,
    inner: impl FnOnce(&mut W) -> fmt::Result,
) -> fmt::Result {
    if let Some(guard) = left {
        let fields = Fields::of(guard);
        let op = fields.enumeration::<ComparisonOperator>(Attribute::Comparison)?;
        write!(buf, "{} {} ", fields.node(Attribute::Term)?, op)?;
    }
    inner(buf)?;
    if let Some(guard) = right {
        let fields = Fields::of(guard);
        let op = fields.enumeration::<ComparisonOperator>(Attribute::Comparison)?;
        write!(buf, " {} {}", op, fields.node(Attribute::Term)?)?;
    }
    Ok(())
}

fn write_signature<W: Write>(buf: &mut W, fields: &Fields) -> fmt::Result {
    if !fields.flag(Attribute::Positive)? {
        buf.write_char('-')?;
    }
    write!(
        buf,
        "{}/{}",
        fields.text(Attribute::Name)?,
        fields.int(Attribute::Arity)?
    )
}

impl Fields {
    fn of(node: &Node) -> Self {
        Fields {
            node_type: node.node_type(),
            values: node.snapshot(),
        }
    }
}

impl Node {
    /// Renders the node in logic-program surface syntax.
    pub fn to_code(&self) -> String {
        self.to_string()
    }

    fn format_to_code<W: Write>(&self, buf: &mut W) -> fmt::Result {
        let fields = Fields::of(self);

        match self.node_type() {
            NodeType::Id | NodeType::Variable => write!(buf, "{}", fields.text(Attribute::Name)?),
            NodeType::SymbolicTerm => write!(buf, "{}", fields.symbol(Attribute::Symbol)?),
            NodeType::UnaryOperation => {
                let argument = fields.node(Attribute::Argument)?;
                match fields.enumeration::<UnaryOperator>(Attribute::OperatorType)? {
                    UnaryOperator::Absolute => write!(buf, "|{}|", argument),
                    op => write!(buf, "{}{}", op, argument),
                }
            }
            NodeType::BinaryOperation => write!(
                buf,
                "({}{}{})",
                fields.node(Attribute::Left)?,
                fields.enumeration::<BinaryOperator>(Attribute::OperatorType)?,
                fields.node(Attribute::Right)?
            ),
            NodeType::Interval => {
                write!(buf, "({}..{})", fields.node(Attribute::Left)?, fields.node(Attribute::Right)?)
            }
            NodeType::Function => {
                let name = fields.text(Attribute::Name)?;
                let arguments = fields.nodes(Attribute::Arguments)?;
                if fields.flag(Attribute::External)? {
                    buf.write_char('@')?;
                }
                write!(buf, "{}", name)?;
                let is_tuple = name.is_empty();
                if !arguments.is_empty() || is_tuple {
                    write!(buf, "({}", arguments.iter().join(","))?;
                    if is_tuple && arguments.len() == 1 {
                        buf.write_char(',')?;
                    }
                    buf.write_char(')')?;
                }
                Ok(())
            }
            NodeType::Pool => write!(buf, "({})", fields.nodes(Attribute::Arguments)?.iter().join(";")),
            NodeType::CspProduct => {
                write!(buf, "{}", fields.node(Attribute::Coefficient)?)?;
                if let Some(variable) = fields.optional(Attribute::Variable)? {
                    write!(buf, "$*${}", variable)?;
                }
                Ok(())
            }
            NodeType::CspSum => {
                let terms = fields.nodes(Attribute::Terms)?;
                if terms.is_empty() {
                    buf.write_char('0')
                } else {
                    write!(buf, "{}", terms.iter().join("$+"))
                }
            }
            NodeType::CspGuard => write!(
                buf,
                "${}{}",
                fields.enumeration::<ComparisonOperator>(Attribute::Comparison)?,
                fields.node(Attribute::Term)?
            ),
            NodeType::BooleanConstant => {
                buf.write_str(if fields.flag(Attribute::Value)? { "#true" } else { "#false" })
            }
            NodeType::SymbolicAtom => write!(buf, "{}", fields.node(Attribute::Symbol)?),
            NodeType::Comparison => write!(
                buf,
                "{}{}{}",
                fields.node(Attribute::Left)?,
                fields.enumeration::<ComparisonOperator>(Attribute::Comparison)?,
                fields.node(Attribute::Right)?
            ),
            NodeType::CspLiteral => write!(
                buf,
                "{}{}",
                fields.node(Attribute::Term)?,
                fields.nodes(Attribute::Guards)?.iter().join("")
            ),
            NodeType::AggregateGuard => write!(
                buf,
                "{} {}",
                fields.enumeration::<ComparisonOperator>(Attribute::Comparison)?,
                fields.node(Attribute::Term)?
            ),
            NodeType::ConditionalLiteral => {
                write!(buf, "{}", fields.node(Attribute::Literal)?)?;
                write_condition(buf, fields.nodes(Attribute::Condition)?)
            }
            NodeType::Aggregate => write_guards(
                buf,
                fields.optional(Attribute::LeftGuard)?,
                fields.optional(Attribute::RightGuard)?,
                |buf| write_elements(buf, fields.nodes(Attribute::Elements)?),
            ),
            NodeType::BodyAggregateElement | NodeType::TheoryAtomElement => {
                write!(buf, "{}", fields.nodes(Attribute::Terms)?.iter().join(","))?;
                write_condition(buf, fields.nodes(Attribute::Condition)?)
            }
            NodeType::BodyAggregate | NodeType::HeadAggregate => write_guards(
                buf,
                fields.optional(Attribute::LeftGuard)?,
                fields.optional(Attribute::RightGuard)?,
                |buf| {
                    write!(buf, "{} ", fields.enumeration::<AggregateFunction>(Attribute::Function)?)?;
                    write_elements(buf, fields.nodes(Attribute::Elements)?)
                },
            ),
            NodeType::HeadAggregateElement => write!(
                buf,
                "{}: {}",
                fields.nodes(Attribute::Terms)?.iter().join(","),
                fields.node(Attribute::Condition)?
            ),
            NodeType::Disjunction => write!(buf, "{}", fields.nodes(Attribute::Elements)?.iter().join("; ")),
            NodeType::DisjointElement => {
                write!(
                    buf,
                    "{}: {}",
                    fields.nodes(Attribute::Terms)?.iter().join(","),
                    fields.node(Attribute::Term)?
                )?;
                write_condition(buf, fields.nodes(Attribute::Condition)?)
            }
            NodeType::Disjoint => {
                buf.write_str("#disjoint ")?;
                write_elements(buf, fields.nodes(Attribute::Elements)?)
            }
            NodeType::TheorySequence => {
                let sequence_type = fields.enumeration::<TheorySequenceType>(Attribute::SequenceType)?;
                let terms = fields.nodes(Attribute::Terms)?;
                let (open, close) = sequence_type.delimiters();
                write!(buf, "{}{}", open, terms.iter().join(","))?;
                if sequence_type == TheorySequenceType::Tuple && terms.len() == 1 {
                    buf.write_char(',')?;
                }
                buf.write_str(close)
            }
            NodeType::TheoryFunction => {
                write!(buf, "{}", fields.text(Attribute::Name)?)?;
                let arguments = fields.nodes(Attribute::Arguments)?;
                if !arguments.is_empty() {
                    write!(buf, "({})", arguments.iter().join(","))?;
                }
                Ok(())
            }
            NodeType::TheoryUnparsedTermElement => {
                for operator in fields.texts(Attribute::Operators)? {
                    write!(buf, "{} ", operator)?;
                }
                write!(buf, "{}", fields.node(Attribute::Term)?)
            }
            NodeType::TheoryUnparsedTerm => {
                let elements = fields.nodes(Attribute::Elements)?;
                if elements.len() == 1 {
                    write!(buf, "{}", elements[0])
                } else {
                    write!(buf, "({})", elements.iter().join(" "))
                }
            }
            NodeType::TheoryGuard => write!(
                buf,
                "{} {}",
                fields.text(Attribute::OperatorName)?,
                fields.node(Attribute::Term)?
            ),
            NodeType::TheoryAtom => {
                write!(buf, "&{} ", fields.node(Attribute::Term)?)?;
                write_elements(buf, fields.nodes(Attribute::Elements)?)?;
                if let Some(guard) = fields.optional(Attribute::Guard)? {
                    write!(buf, " {}", guard)?;
                }
                Ok(())
            }
            NodeType::Literal => write!(
                buf,
                "{}{}",
                fields.enumeration::<Sign>(Attribute::Sign)?,
                fields.node(Attribute::Atom)?
            ),
            NodeType::TheoryOperatorDefinition => write!(
                buf,
                "{} : {}, {}",
                fields.text(Attribute::Name)?,
                fields.int(Attribute::Priority)?,
                fields.enumeration::<TheoryOperatorType>(Attribute::OperatorType)?
            ),
            NodeType::TheoryTermDefinition => {
                write!(buf, "{} ", fields.text(Attribute::Name)?)?;
                write_elements(buf, fields.nodes(Attribute::Operators)?)
            }
            NodeType::TheoryGuardDefinition => write!(
                buf,
                "{{ {} }}, {}",
                fields.texts(Attribute::Operators)?.iter().join(", "),
                fields.text(Attribute::Term)?
            ),
            NodeType::TheoryAtomDefinition => {
                write!(
                    buf,
                    "&{}/{} : {}, ",
                    fields.text(Attribute::Name)?,
                    fields.int(Attribute::Arity)?,
                    fields.text(Attribute::Term)?
                )?;
                if let Some(guard) = fields.optional(Attribute::Guard)? {
                    write!(buf, "{}, ", guard)?;
                }
                write!(buf, "{}", fields.enumeration::<TheoryAtomType>(Attribute::AtomType)?)
            }
            NodeType::Rule => {
                let head = fields.node(Attribute::Head)?;
                let body = fields.nodes(Attribute::Body)?;
                write!(buf, "{}", head)?;
                if !body.is_empty() {
                    write!(buf, " :- {}", body.iter().join("; "))?;
                }
                buf.write_char('.')
            }
            NodeType::Definition => {
                write!(
                    buf,
                    "#const {} = {}.",
                    fields.text(Attribute::Name)?,
                    fields.node(Attribute::Value)?
                )?;
                if !fields.flag(Attribute::IsDefault)? {
                    buf.write_str(" [override]")?;
                }
                Ok(())
            }
            NodeType::ShowSignature => {
                buf.write_str("#show ")?;
                if fields.flag(Attribute::Csp)? {
                    buf.write_char('$')?;
                }
                write_signature(buf, &fields)?;
                buf.write_char('.')
            }
            NodeType::ShowTerm => {
                buf.write_str("#show ")?;
                if fields.flag(Attribute::Csp)? {
                    buf.write_char('$')?;
                }
                write!(buf, "{}", fields.node(Attribute::Term)?)?;
                write_body(buf, fields.nodes(Attribute::Body)?)?;
                buf.write_char('.')
            }
            NodeType::Minimize => {
                buf.write_str(":~")?;
                let body = fields.nodes(Attribute::Body)?;
                if !body.is_empty() {
                    write!(buf, " {}", body.iter().join("; "))?;
                }
                write!(
                    buf,
                    ". [{}@{}",
                    fields.node(Attribute::Weight)?,
                    fields.node(Attribute::Priority)?
                )?;
                for term in fields.nodes(Attribute::Terms)? {
                    write!(buf, ",{}", term)?;
                }
                buf.write_char(']')
            }
            NodeType::Script => write!(buf, "{}", fields.text(Attribute::Code)?),
            NodeType::Program => {
                write!(buf, "#program {}", fields.text(Attribute::Name)?)?;
                let parameters = fields.nodes(Attribute::Parameters)?;
                if !parameters.is_empty() {
                    write!(buf, "({})", parameters.iter().join(","))?;
                }
                buf.write_char('.')
            }
            NodeType::External => {
                write!(buf, "#external {}", fields.node(Attribute::Atom)?)?;
                write_body(buf, fields.nodes(Attribute::Body)?)?;
                write!(buf, ". [{}]", fields.node(Attribute::ExternalType)?)
            }
            NodeType::Edge => {
                write!(
                    buf,
                    "#edge ({},{})",
                    fields.node(Attribute::NodeU)?,
                    fields.node(Attribute::NodeV)?
                )?;
                write_body(buf, fields.nodes(Attribute::Body)?)?;
                buf.write_char('.')
            }
            NodeType::Heuristic => {
                write!(buf, "#heuristic {}", fields.node(Attribute::Atom)?)?;
                write_body(buf, fields.nodes(Attribute::Body)?)?;
                write!(
                    buf,
                    ". [{}@{},{}]",
                    fields.node(Attribute::Bias)?,
                    fields.node(Attribute::Priority)?,
                    fields.node(Attribute::Modifier)?
                )
            }
            NodeType::ProjectAtom => {
                write!(buf, "#project {}", fields.node(Attribute::Atom)?)?;
                write_body(buf, fields.nodes(Attribute::Body)?)?;
                buf.write_char('.')
            }
            NodeType::ProjectSignature => {
                buf.write_str("#project ")?;
                write_signature(buf, &fields)?;
                buf.write_char('.')
            }
            NodeType::Defined => {
                buf.write_str("#defined ")?;
                write_signature(buf, &fields)?;
                buf.write_char('.')
            }
            NodeType::TheoryDefinition => {
                write!(buf, "#theory {} ", fields.text(Attribute::Name)?)?;
                let items = fields
                    .nodes(Attribute::Terms)?
                    .iter()
                    .chain(fields.nodes(Attribute::Atoms)?)
                    .cloned()
                    .collect::<Vec<_>>();
                write_elements(buf, &items)?;
                buf.write_char('.')
            }
        }
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.format_to_code(f)
    }
}
