//! Live views over list-valued attributes.
//!
//! A view does not own any elements. It remembers the node and the attribute it
//! was created for and forwards every operation to that node, so all views on
//! the same attribute observe each other's mutations.
use std::{
    fmt::{self, Debug, Display, Formatter},
    marker::PhantomData,
};

use itertools::Itertools;

use crate::{
    error::{Error, Result},
    node::Node,
    schema::Attribute,
    text::Text,
    value::{NodeValue, ValueType},
};

/// An element type that can live in a list attribute.
pub trait ListElement: Clone + Display + Sized {
    const VALUE_TYPE: ValueType;

    fn list(value: &NodeValue) -> Option<&[Self]>;
    fn list_mut(value: &mut NodeValue) -> Option<&mut Vec<Self>>;
}

impl ListElement for Node {
    const VALUE_TYPE: ValueType = ValueType::AstList;

    fn list(value: &NodeValue) -> Option<&[Self]> {
        value.as_nodes()
    }

    fn list_mut(value: &mut NodeValue) -> Option<&mut Vec<Self>> {
        match value {
            NodeValue::AstList(nodes) => Some(nodes),
            _ => None,
        }
    }
}

impl ListElement for Text {
    const VALUE_TYPE: ValueType = ValueType::StrList;

    fn list(value: &NodeValue) -> Option<&[Self]> {
        value.as_texts()
    }

    fn list_mut(value: &mut NodeValue) -> Option<&mut Vec<Self>> {
        match value {
            NodeValue::StrList(texts) => Some(texts),
            _ => None,
        }
    }
}

pub struct ListView<T> {
    node: Node,
    attribute: Attribute,
    index: usize,
    _marker: PhantomData<fn() -> T>,
}

pub type NodeList = ListView<Node>;
pub type TextList = ListView<Text>;

impl<T> Clone for ListView<T> {
    fn clone(&self) -> Self {
        ListView {
            node: self.node.clone(),
            attribute: self.attribute,
            index: self.index,
            _marker: PhantomData,
        }
    }
}

impl<T: ListElement> ListView<T> {
    pub(crate) fn new(node: &Node, attribute: Attribute) -> Result<Self> {
        let (index, spec) = node.node_type().spec(attribute)?;
        if spec.value_type != T::VALUE_TYPE {
            return Err(Error::TypeMismatch {
                expected: T::VALUE_TYPE,
                found: spec.value_type,
            });
        }

        Ok(ListView {
            node: node.clone(),
            attribute,
            index,
            _marker: PhantomData,
        })
    }

    pub fn node(&self) -> &Node {
        &self.node
    }

    pub fn attribute(&self) -> Attribute {
        self.attribute
    }

    fn with_list<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        self.node
            .with_slot(self.index, |value| f(T::list(value).unwrap_or_default()))
    }

    fn with_list_mut<R>(&self, f: impl FnOnce(&mut Vec<T>) -> Result<R>) -> Result<R> {
        self.node.with_slot_mut(self.index, |value| match T::list_mut(value) {
            Some(list) => f(list),
            None => Err(value.mismatch(T::VALUE_TYPE)),
        })
    }

    pub fn len(&self) -> usize {
        self.with_list(<[T]>::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<T> {
        self.with_list(|list| list.get(index).cloned())
    }

    pub fn at(&self, index: usize) -> Result<T> {
        self.with_list(|list| {
            list.get(index).cloned().ok_or(Error::IndexOutOfBounds {
                index,
                len: list.len(),
            })
        })
    }

    pub fn first(&self) -> Option<T> {
        self.get(0)
    }

    pub fn last(&self) -> Option<T> {
        self.with_list(|list| list.last().cloned())
    }

    /// Replaces the element at `index`, returning the previous one.
    pub fn set(&self, index: usize, element: impl Into<T>) -> Result<T> {
        let element = element.into();
        self.with_list_mut(|list| {
            let len = list.len();
            list.get_mut(index)
                .map(|slot| std::mem::replace(slot, element))
                .ok_or(Error::IndexOutOfBounds { index, len })
        })
    }

    pub fn insert(&self, index: usize, element: impl Into<T>) -> Result<()> {
        let element = element.into();
        self.with_list_mut(|list| {
            if index > list.len() {
                return Err(Error::IndexOutOfBounds {
                    index,
                    len: list.len(),
                });
            }
            list.insert(index, element);
            Ok(())
        })
    }

    pub fn remove(&self, index: usize) -> Result<T> {
        self.with_list_mut(|list| {
            if index >= list.len() {
                return Err(Error::IndexOutOfBounds {
                    index,
                    len: list.len(),
                });
            }
            Ok(list.remove(index))
        })
    }

    pub fn push(&self, element: impl Into<T>) -> Result<()> {
        let element = element.into();
        self.with_list_mut(|list| {
            list.push(element);
            Ok(())
        })
    }

    pub fn pop(&self) -> Result<Option<T>> {
        self.with_list_mut(|list| Ok(list.pop()))
    }

    pub fn extend<I>(&self, elements: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<T>,
    {
        let elements = elements.into_iter().map(Into::into).collect::<Vec<_>>();
        self.with_list_mut(|list| {
            list.extend(elements);
            Ok(())
        })
    }

    /// Removes all elements and returns them.
    pub fn clear(&self) -> Result<Vec<T>> {
        self.with_list_mut(|list| Ok(std::mem::take(list)))
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.with_list(<[T]>::to_vec)
    }

    /// Iterates over a snapshot of the list taken now.
    pub fn iter(&self) -> std::vec::IntoIter<T> {
        self.to_vec().into_iter()
    }

    /// A reference to the element currently at `index`, re-resolved on every
    /// access.
    pub fn element(&self, index: usize) -> Result<ElementRef<T>> {
        let len = self.len();
        if index >= len {
            return Err(Error::IndexOutOfBounds { index, len });
        }

        Ok(ElementRef {
            list: self.clone(),
            index,
        })
    }
}

impl<T: ListElement> IntoIterator for &ListView<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: ListElement + PartialEq> PartialEq<[T]> for ListView<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.with_list(|list| list == other)
    }
}

impl<T: ListElement> Display for ListView<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.to_vec().iter().join(", "))
    }
}

impl<T: ListElement + Debug> Debug for ListView<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.to_vec()).finish()
    }
}

/// A position inside a list attribute.
pub struct ElementRef<T> {
    list: ListView<T>,
    index: usize,
}

pub type NodeRef = ElementRef<Node>;
pub type TextRef = ElementRef<Text>;

impl<T> Clone for ElementRef<T> {
    fn clone(&self) -> Self {
        ElementRef {
            list: self.list.clone(),
            index: self.index,
        }
    }
}

impl<T: ListElement> ElementRef<T> {
    pub fn index(&self) -> usize {
        self.index
    }

    fn stale(&self) -> Error {
        Error::InvalidNode(format!(
            "element {} of `{}` no longer exists",
            self.index, self.list.attribute
        ))
    }

    pub fn get(&self) -> Result<T> {
        self.list.get(self.index).ok_or_else(|| self.stale())
    }

    pub fn set(&self, element: impl Into<T>) -> Result<T> {
        self.list.set(self.index, element).map_err(|e| match e {
            Error::IndexOutOfBounds { .. } => self.stale(),
            e => e,
        })
    }
}

impl<T: ListElement + Debug> Debug for ElementRef<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementRef")
            .field("attribute", &self.list.attribute)
            .field("index", &self.index)
            .field("element", &self.list.get(self.index))
            .finish()
    }
}

impl Node {
    /// A live view of an `AstList` attribute.
    pub fn node_list(&self, attribute: Attribute) -> Result<NodeList> {
        ListView::new(self, attribute)
    }

    /// A live view of a `StrList` attribute.
    pub fn text_list(&self, attribute: Attribute) -> Result<TextList> {
        ListView::new(self, attribute)
    }
}
