use std::rc::Rc;

use crate::dom::{
    element::ElementRef,
    node::{NodeConnection, NodeRef},
};

/// Implementation of [NodeList](https://www.w3.org/TR/2004/REC-DOM-Level-3-Core-20040407/DOM3-Core.html#core-ID-536297177)
/// interface on [1.4 Fundamental Interfaces: Core Module](https://www.w3.org/TR/2004/REC-DOM-Level-3-Core-20040407/DOM3-Core.html#core-ID-BBACDC08)
///
/// # Specification
/// ```text
/// The NodeList interface provides the abstraction of an ordered collection of nodes,
/// without defining or constraining how this collection is implemented. NodeList objects
/// in the DOM are live.
///
/// The items in the NodeList are accessible via an integral index, starting from 0.
/// ```
pub trait NodeList {
    type Output;

    /// Implementation of [item](https://www.w3.org/TR/2004/REC-DOM-Level-3-Core-20040407/DOM3-Core.html#core-ID-844377136) method.
    ///
    /// Returns `None` if `index` is out of range.
    fn item(&self, index: usize) -> Option<Self::Output>;
    /// Implementation of [length](https://www.w3.org/TR/2004/REC-DOM-Level-3-Core-20040407/DOM3-Core.html#core-ID-203510337) attribute.
    fn length(&self) -> usize;
}

/// A [NodeList] that [`Node::child_nodes`](crate::dom::node::Node::child_nodes) returns.
///
/// This list only holds its owner node, so both [`item`](`ChildNodesList::item`) and
/// [`length`](`ChildNodesList::length`) always reflect the current children.
pub struct ChildNodesList {
    owner_node: NodeRef,
}

impl ChildNodesList {
    pub(super) fn new(owner_node: NodeRef) -> Self {
        Self { owner_node }
    }
}

impl NodeList for ChildNodesList {
    type Output = NodeRef;

    fn item(&self, index: usize) -> Option<Self::Output> {
        self.owner_node.links().children.get(index).cloned()
    }

    fn length(&self) -> usize {
        self.owner_node.links().children.len()
    }
}

/// A [NodeList] of the descendant elements of a node that have a given tag name.
///
/// The subtree is walked on each request.
pub struct FilteredSubtreeElementsList {
    root: NodeRef,
    tag_name: Rc<str>,
}

impl FilteredSubtreeElementsList {
    pub(super) fn new(root: NodeRef, tag_name: Rc<str>) -> Self {
        Self { root, tag_name }
    }

    fn matches(&self, elem: &ElementRef) -> bool {
        self.tag_name.as_ref() == "*" || elem.tag_name() == self.tag_name
    }

    /// If the `index`-th matching element is found, wrap it with `Ok` and return it.
    /// Otherwise, wrap the found count with `Err` and return it.
    fn seek(&self, index: usize) -> Result<ElementRef, usize> {
        let mut cnt = 0;
        let mut stack = self
            .root
            .links()
            .children
            .iter()
            .rev()
            .cloned()
            .collect::<Vec<_>>();
        while let Some(now) = stack.pop() {
            if let Some(elem) = now.as_element().filter(|elem| self.matches(elem)) {
                if cnt == index {
                    return Ok(elem);
                }
                cnt += 1;
            }
            stack.extend(now.links().children.iter().rev().cloned());
        }
        Err(cnt)
    }
}

impl NodeList for FilteredSubtreeElementsList {
    type Output = ElementRef;

    fn item(&self, index: usize) -> Option<Self::Output> {
        self.seek(index).ok()
    }

    fn length(&self) -> usize {
        self.seek(usize::MAX).err().unwrap_or(usize::MAX)
    }
}
