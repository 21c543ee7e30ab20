use std::{
    cmp::Ordering,
    fmt::{self, Debug, Formatter},
    hash::{Hash, Hasher},
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use smallvec::SmallVec;

use crate::{
    error::{Error, Result},
    location::Location,
    schema::{Attribute, NodeType},
    value::NodeValue,
};

pub(crate) type Values = SmallVec<[NodeValue; 4]>;

struct NodeInner {
    node_type: NodeType,
    values: RwLock<Values>,
}

/// A shared handle to an AST node.
///
/// Cloning the handle shares the underlying instance, so an attribute written
/// through one handle is visible through all of them. Use [`Node::update`] or
/// [`Node::deep_copy`] to obtain a distinct instance.
///
/// Equality, ordering and hashing are structural and ignore `location`
/// attributes at every depth.
///
/// Dropping a tree is iterative. Printing, comparison, hashing,
/// [`Node::deep_copy`] and host conversion recurse, so the nesting depth they
/// accept is bounded by the calling thread's stack.
#[derive(Clone)]
pub struct Node(Arc<NodeInner>);

impl Node {
    /// Creates a node from schema-ordered values, checking arity, value shapes
    /// and integer domains before anything is allocated.
    pub fn new(node_type: NodeType, values: Vec<NodeValue>) -> Result<Node> {
        node_type.check_values(&values)?;
        Ok(Self::from_parts(node_type, values.into_iter().collect()))
    }

    pub(crate) fn from_parts(node_type: NodeType, values: Values) -> Node {
        debug_assert!(node_type.check_values(&values).is_ok());
        Node(Arc::new(NodeInner {
            node_type,
            values: RwLock::new(values),
        }))
    }

    fn read(&self) -> RwLockReadGuard<'_, Values> {
        self.0.values.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Values> {
        self.0.values.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn snapshot(&self) -> Values {
        self.read().clone()
    }

    pub(crate) fn slot(&self, index: usize) -> NodeValue {
        self.read()[index].clone()
    }

    pub(crate) fn with_slot<R>(&self, index: usize, f: impl FnOnce(&NodeValue) -> R) -> R {
        f(&self.read()[index])
    }

    /// Runs `f` with exclusive access to one slot. `f` must not touch `self`.
    pub(crate) fn with_slot_mut<R>(&self, index: usize, f: impl FnOnce(&mut NodeValue) -> R) -> R {
        f(&mut self.write()[index])
    }

    #[inline(always)]
    pub fn node_type(&self) -> NodeType {
        self.0.node_type
    }

    pub fn get(&self, attribute: Attribute) -> Result<NodeValue> {
        let (index, _) = self.node_type().spec(attribute)?;
        Ok(self.slot(index))
    }

    /// Reads an attribute converted to one of the [`NodeValue`] alternatives or
    /// to an operator enumeration.
    pub fn get_as<T>(&self, attribute: Attribute) -> Result<T>
    where
        T: TryFrom<NodeValue, Error = Error>,
    {
        T::try_from(self.get(attribute)?)
    }

    pub fn set(&self, attribute: Attribute, value: impl Into<NodeValue>) -> Result<()> {
        let value = value.into();
        let (index, spec) = self.node_type().spec(attribute)?;
        if value.value_type() != spec.value_type {
            return Err(value.mismatch(spec.value_type));
        }
        self.node_type().check_domain(spec, &value)?;

        let previous = std::mem::replace(&mut self.write()[index], value);
        drop(previous);
        Ok(())
    }

    pub fn location(&self) -> Option<Location> {
        self.read().iter().find_map(|value| match value {
            NodeValue::Location(location) => Some(*location),
            _ => None,
        })
    }

    pub fn has_attribute(&self, attribute: Attribute) -> bool {
        self.node_type().has_attribute(attribute)
    }

    /// Attribute names in schema order.
    pub fn attributes(&self) -> impl Iterator<Item = Attribute> + use<> {
        self.node_type().attributes().iter().map(|spec| spec.attribute)
    }

    pub fn values(&self) -> Vec<NodeValue> {
        self.snapshot().into_vec()
    }

    /// A snapshot of `(attribute, value)` pairs in schema order.
    pub fn items(&self) -> Vec<(Attribute, NodeValue)> {
        self.attributes().zip(self.snapshot()).collect()
    }

    /// Direct child nodes in schema order.
    pub fn children(&self) -> Vec<Node> {
        self.snapshot()
            .iter()
            .flat_map(|value| value.nodes().cloned())
            .collect()
    }

    pub fn ptr_eq(&self, other: &Node) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Number of handles sharing this instance.
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.0)
    }

    /// Returns a new instance with the given attributes replaced. Values that
    /// are not replaced, child nodes included, are shared with `self`.
    pub fn update<I, V>(&self, changes: I) -> Result<Node>
    where
        I: IntoIterator<Item = (Attribute, V)>,
        V: Into<NodeValue>,
    {
        let node_type = self.node_type();
        let mut values = self.snapshot();

        for (attribute, value) in changes {
            let value = value.into();
            let (index, spec) = node_type.spec(attribute)?;
            if value.value_type() != spec.value_type {
                return Err(value.mismatch(spec.value_type));
            }
            node_type.check_domain(spec, &value)?;
            values[index] = value;
        }

        Ok(Self::from_parts(node_type, values))
    }

    /// Duplicates this node and every node reachable from it.
    pub fn deep_copy(&self) -> Node {
        let values = self
            .snapshot()
            .into_iter()
            .map(|value| match value {
                NodeValue::Ast(node) => NodeValue::Ast(node.deep_copy()),
                NodeValue::OptionalAst(node) => {
                    NodeValue::OptionalAst(node.map(|node| node.deep_copy()))
                }
                NodeValue::AstList(nodes) => {
                    NodeValue::AstList(nodes.iter().map(Node::deep_copy).collect())
                }
                value => value,
            })
            .collect();

        Self::from_parts(self.node_type(), values)
    }

    fn structural(values: &Values) -> impl Iterator<Item = &NodeValue> {
        values
            .iter()
            .filter(|value| !matches!(value, NodeValue::Location(_)))
    }
}

impl Drop for NodeInner {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach_children(self.values.get_mut().unwrap_or_else(PoisonError::into_inner), &mut pending);
        while let Some(node) = pending.pop() {
            if let Some(mut inner) = Arc::into_inner(node.0) {
                detach_children(inner.values.get_mut().unwrap_or_else(PoisonError::into_inner), &mut pending);
            }
        }
    }
}

/// Moves the child handles out of `values` so their release does not nest.
fn detach_children(values: &mut Values, pending: &mut Vec<Node>) {
    for value in values.drain(..) {
        match value {
            NodeValue::Ast(node) | NodeValue::OptionalAst(Some(node)) => pending.push(node),
            NodeValue::AstList(nodes) => pending.extend(nodes),
            _ => {}
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        if self.node_type() != other.node_type() {
            return false;
        }

        let (lhs, rhs) = (self.snapshot(), other.snapshot());
        Self::structural(&lhs).eq(Self::structural(&rhs))
    }
}

impl Eq for Node {}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.ptr_eq(other) {
            return Ordering::Equal;
        }

        self.node_type().cmp(&other.node_type()).then_with(|| {
            let (lhs, rhs) = (self.snapshot(), other.snapshot());
            Self::structural(&lhs).cmp(Self::structural(&rhs))
        })
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.node_type().hash(state);
        Self::structural(&self.snapshot()).for_each(|value| value.hash(state));
    }
}

impl Debug for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple(self.node_type().name())
            .field(&self.to_string())
            .finish()
    }
}
