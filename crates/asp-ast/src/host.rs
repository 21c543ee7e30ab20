//! Conversion between nodes and their host representation.
//!
//! The host representation is a JSON object carrying the node type name under
//! `"type"` and one field per attribute:
//!
//! ```json
//! {"type": "Variable", "location": {...}, "name": "X"}
//! ```
//!
//! Decoding is strict. Unknown node types, missing or unexpected fields and
//! values of the wrong kind are rejected with [`Error::InvalidArgument`], and
//! every node is built through [`Node::new`], so integer domains are checked as
//! well.
use std::{str::FromStr, sync::LazyLock};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use strum::IntoEnumIterator;
use tracing::trace;

use crate::{
    error::{Error, Result},
    location::Location,
    node::Node,
    schema::{Attribute, AttributeSpec, NodeType},
    symbol::Symbol,
    text::Text,
    value::{NodeValue, ValueType},
};

const TYPE_KEY: &str = "type";

static CHILD_KEYS: LazyLock<FxHashMap<NodeType, Vec<&'static str>>> = LazyLock::new(|| {
    NodeType::iter()
        .map(|node_type| {
            let keys = node_type
                .attributes()
                .iter()
                .filter(|spec| spec.attribute != Attribute::Location)
                .map(|spec| spec.attribute.name())
                .collect();
            (node_type, keys)
        })
        .collect()
});

/// Names of the host fields of `node_type`, excluding `location`.
pub fn child_keys(node_type: NodeType) -> &'static [&'static str] {
    CHILD_KEYS
        .get(&node_type)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

pub fn to_host(node: &Node) -> Value {
    let mut object = Map::new();
    object.insert(
        TYPE_KEY.to_string(),
        Value::String(node.node_type().name().to_string()),
    );
    for (attribute, value) in node.items() {
        object.insert(attribute.name().to_string(), value_to_host(&value));
    }
    Value::Object(object)
}

fn value_to_host(value: &NodeValue) -> Value {
    match value {
        NodeValue::Int(v) => Value::from(*v),
        NodeValue::Symbol(symbol) => symbol_to_host(symbol),
        NodeValue::Location(location) => location_to_host(location),
        NodeValue::Str(text) => Value::String(text.as_str()),
        NodeValue::Ast(node) => to_host(node),
        NodeValue::OptionalAst(node) => node.as_ref().map(to_host).unwrap_or(Value::Null),
        NodeValue::StrList(texts) => texts.iter().map(|t| Value::String(t.as_str())).collect(),
        NodeValue::AstList(nodes) => nodes.iter().map(to_host).collect(),
    }
}

fn location_to_host(location: &Location) -> Value {
    let position = |p: &crate::location::Position| {
        let mut object = Map::new();
        object.insert("filename".to_string(), Value::String(p.filename.as_str()));
        object.insert("line".to_string(), Value::from(p.line));
        object.insert("column".to_string(), Value::from(p.column));
        Value::Object(object)
    };

    let mut object = Map::new();
    object.insert("begin".to_string(), position(&location.begin));
    object.insert("end".to_string(), position(&location.end));
    Value::Object(object)
}

pub fn symbol_to_host(symbol: &Symbol) -> Value {
    let tagged = |tag: &str, value: Value| {
        let mut object = Map::new();
        object.insert(tag.to_string(), value);
        Value::Object(object)
    };

    match symbol {
        Symbol::Infimum => Value::String("infimum".to_string()),
        Symbol::Supremum => Value::String("supremum".to_string()),
        Symbol::Number(n) => tagged("number", Value::from(*n)),
        Symbol::String(s) => tagged("string", Value::String(s.as_str())),
        Symbol::Function {
            name,
            arguments,
            positive,
        } => {
            let mut function = Map::new();
            function.insert("name".to_string(), Value::String(name.as_str()));
            function.insert(
                "arguments".to_string(),
                arguments.iter().map(symbol_to_host).collect(),
            );
            function.insert("positive".to_string(), Value::Bool(*positive));
            tagged("function", Value::Object(function))
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn unexpected(what: &str, expected: &str, found: &Value) -> Error {
    Error::invalid_argument(format!(
        "{}: expected {}, found {}",
        what,
        expected,
        kind(found)
    ))
}

pub fn from_host(value: &Value) -> Result<Node> {
    let object = value
        .as_object()
        .ok_or_else(|| unexpected("node", "object", value))?;

    let tag = match object.get(TYPE_KEY) {
        Some(Value::String(tag)) => tag,
        Some(other) => return Err(unexpected("node `type`", "string", other)),
        None => return Err(Error::invalid_argument("node without `type` field")),
    };
    let node_type = NodeType::from_str(tag)
        .map_err(|_| Error::invalid_argument(format!("unknown node type `{}`", tag)))?;
    trace!(%node_type, "decoding node");

    let specs = node_type.attributes();
    if let Some(key) = object
        .keys()
        .find(|key| *key != TYPE_KEY && !specs.iter().any(|spec| spec.attribute.name() == *key))
    {
        return Err(Error::invalid_argument(format!(
            "`{}` has no field `{}`",
            node_type, key
        )));
    }

    let values = specs
        .iter()
        .map(|spec| {
            let field = object.get(spec.attribute.name()).ok_or_else(|| {
                Error::invalid_argument(format!(
                    "`{}` is missing field `{}`",
                    node_type, spec.attribute
                ))
            })?;
            value_from_host(node_type, spec, field)
        })
        .collect::<Result<Vec<_>>>()?;

    Node::new(node_type, values)
}

fn value_from_host(node_type: NodeType, spec: &AttributeSpec, field: &Value) -> Result<NodeValue> {
    let what = format!("`{}` field `{}`", node_type, spec.attribute);

    match spec.value_type {
        ValueType::Int => match field {
            Value::Bool(b) => Ok(NodeValue::from(*b)),
            Value::Number(n) => n
                .as_i64()
                .and_then(|n| i32::try_from(n).ok())
                .map(NodeValue::Int)
                .ok_or_else(|| {
                    Error::invalid_argument(format!("{}: {} is not a 32-bit integer", what, n))
                }),
            other => Err(unexpected(&what, "integer", other)),
        },
        ValueType::Symbol => symbol_from_host(field).map(NodeValue::Symbol),
        ValueType::Location => Location::deserialize(field)
            .map(NodeValue::Location)
            .map_err(|e| Error::invalid_argument(format!("{}: {}", what, e))),
        ValueType::Str => field
            .as_str()
            .map(NodeValue::from)
            .ok_or_else(|| unexpected(&what, "string", field)),
        ValueType::Ast => from_host(field).map(NodeValue::Ast),
        ValueType::OptionalAst => match field {
            Value::Null => Ok(NodeValue::OptionalAst(None)),
            other => from_host(other).map(|node| NodeValue::OptionalAst(Some(node))),
        },
        ValueType::StrList => field
            .as_array()
            .ok_or_else(|| unexpected(&what, "array", field))?
            .iter()
            .map(|item| {
                item.as_str()
                    .map(Text::new)
                    .ok_or_else(|| unexpected(&what, "string", item))
            })
            .collect::<Result<Vec<_>>>()
            .map(NodeValue::StrList),
        ValueType::AstList => field
            .as_array()
            .ok_or_else(|| unexpected(&what, "array", field))?
            .iter()
            .map(from_host)
            .collect::<Result<Vec<_>>>()
            .map(NodeValue::AstList),
    }
}

pub fn symbol_from_host(value: &Value) -> Result<Symbol> {
    match value {
        Value::String(s) if s == "infimum" => Ok(Symbol::Infimum),
        Value::String(s) if s == "supremum" => Ok(Symbol::Supremum),
        Value::Object(object) if object.len() == 1 => {
            let (tag, inner) = object
                .iter()
                .next()
                .ok_or_else(|| Error::invalid_argument("empty symbol"))?;
            match (tag.as_str(), inner) {
                ("number", Value::Number(n)) => n
                    .as_i64()
                    .and_then(|n| i32::try_from(n).ok())
                    .map(Symbol::Number)
                    .ok_or_else(|| {
                        Error::invalid_argument(format!("symbol number {} out of range", n))
                    }),
                ("string", Value::String(s)) => Ok(Symbol::string(s)),
                ("function", Value::Object(function)) => {
                    let name = match function.get("name") {
                        Some(Value::String(name)) => name,
                        Some(other) => return Err(unexpected("symbol name", "string", other)),
                        None => return Err(Error::invalid_argument("symbol function without name")),
                    };
                    let arguments = match function.get("arguments") {
                        Some(Value::Array(arguments)) => arguments
                            .iter()
                            .map(symbol_from_host)
                            .collect::<Result<Vec<_>>>()?,
                        Some(other) => {
                            return Err(unexpected("symbol arguments", "array", other));
                        }
                        None => Vec::new(),
                    };
                    let positive = match function.get("positive") {
                        Some(Value::Bool(positive)) => *positive,
                        Some(other) => return Err(unexpected("symbol sign", "boolean", other)),
                        None => true,
                    };
                    Ok(Symbol::function(name, arguments, positive))
                }
                (tag, inner) => Err(Error::invalid_argument(format!(
                    "invalid symbol `{}` with {} payload",
                    tag,
                    kind(inner)
                ))),
            }
        }
        other => Err(unexpected("symbol", "tagged object", other)),
    }
}

impl Node {
    pub fn to_host(&self) -> Value {
        to_host(self)
    }

    pub fn from_host(value: &Value) -> Result<Node> {
        from_host(value)
    }

    pub fn to_json(&self) -> String {
        to_host(self).to_string()
    }

    pub fn from_json(json: &str) -> Result<Node> {
        let value = serde_json::from_str::<Value>(json)
            .map_err(|e| Error::invalid_argument(format!("malformed JSON: {}", e)))?;
        from_host(&value)
    }
}

impl Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        to_host(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        from_host(&value).map_err(serde::de::Error::custom)
    }
}
