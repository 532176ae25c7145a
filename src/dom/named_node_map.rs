use std::{cell::RefCell, collections::HashMap, rc::Rc};

use super::{attr::AttrRef, element::ElementRef};

/// The attributes of an element as plain name/value pairs.
///
/// Names are unique and the insertion order is kept,
/// so that serialization is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeTable {
    entries: Vec<(Rc<str>, Rc<str>)>,
}

impl AttributeTable {
    /// Create new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the value of `name` if it exists.
    pub fn get(&self, name: &str) -> Option<Rc<str>> {
        self.entries
            .iter()
            .find(|(key, _)| key.as_ref() == name)
            .map(|(_, value)| value.clone())
    }

    /// Set `value` to `name`.
    ///
    /// An existing entry is overwritten in place, otherwise the entry is appended.
    pub fn set(&mut self, name: impl Into<Rc<str>>, value: impl Into<Rc<str>>) {
        let name: Rc<str> = name.into();
        let value: Rc<str> = value.into();
        if !self.replace_existing(&name, value.clone()) {
            self.entries.push((name, value));
        }
    }

    /// Overwrite the value of `name` only if the entry exists.
    ///
    /// Return `true` if an entry is overwritten.
    pub(super) fn replace_existing(&mut self, name: &str, value: Rc<str>) -> bool {
        if let Some((_, old)) = self.entries.iter_mut().find(|(key, _)| key.as_ref() == name) {
            *old = value;
            true
        } else {
            false
        }
    }

    /// Remove the entry of `name` and return its value if it exists.
    pub fn remove(&mut self, name: &str) -> Option<Rc<str>> {
        let pos = self.entries.iter().position(|(key, _)| key.as_ref() == name)?;
        Some(self.entries.remove(pos).1)
    }

    /// The number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if this table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Rc<str>, &Rc<str>)> {
        self.entries.iter().map(|(name, value)| (name, value))
    }

    pub(super) fn entries(&self) -> &[(Rc<str>, Rc<str>)] {
        &self.entries
    }
}

impl<K: Into<Rc<str>>, V: Into<Rc<str>>> FromIterator<(K, V)> for AttributeTable {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut table = Self::new();
        for (name, value) in iter {
            table.set(name, value);
        }
        table
    }
}

/// Implementation of [NamedNodeMap](https://www.w3.org/TR/2004/REC-DOM-Level-3-Core-20040407/DOM3-Core.html#core-ID-1780488922)
/// interface on [1.4 Fundamental Interfaces: Core Module](https://www.w3.org/TR/2004/REC-DOM-Level-3-Core-20040407/DOM3-Core.html#core-ID-BBACDC08)
///
/// Since the data is shared by [`Rc`], [`clone`](NamedNodeMap::clone) means shallow copy,
/// not deep copy.\
/// The map of an element is regenerated each time
/// [`ElementRef::set_attribute`] or [`ElementRef::remove_attribute`] is called,
/// and the regeneration is visible through every clone of the map.
/// [`AttrRef`]s retrieved before the regeneration are detached from the map,
/// but still write their value through to the element.
#[derive(Clone, Default)]
pub struct NamedNodeMap {
    index: Rc<RefCell<HashMap<Rc<str>, usize>>>,
    data: Rc<RefCell<Vec<AttrRef>>>,
}

impl NamedNodeMap {
    /// Create new empty [`NamedNodeMap`]
    pub(super) fn new() -> Self {
        Self::default()
    }

    /// Replace all items with new [`AttrRef`]s generated from `entries`.
    pub(super) fn rebuild(&self, owner: &ElementRef, entries: &[(Rc<str>, Rc<str>)]) {
        let mut data = Vec::with_capacity(entries.len());
        let mut index = HashMap::with_capacity(entries.len());
        for (i, (name, value)) in entries.iter().enumerate() {
            data.push(AttrRef::new(name.clone(), value.clone(), Some(owner)));
            index.insert(name.clone(), i);
        }
        *self.data.borrow_mut() = data;
        *self.index.borrow_mut() = index;
    }

    /// Implementation of `length` attribute.
    pub fn len(&self) -> usize {
        self.data.borrow().len()
    }

    /// Check if this list is empty.\
    /// In other words, check `self.len() == 0` is satisfied.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Implementation of [`getNamedItem`](https://www.w3.org/TR/2004/REC-DOM-Level-3-Core-20040407/DOM3-Core.html#core-ID-1074577549) method.
    ///
    /// # Specification
    /// ```text
    /// Retrieves a node specified by name.
    ///
    /// Parameters
    ///     name of type DOMString
    ///         The nodeName of a node to retrieve.
    ///
    /// Return Value
    ///     Node A Node (of any type) with the specified nodeName,
    ///          or null if it does not identify any node in this map.
    /// ```
    pub fn get_named_item(&self, name: &str) -> Option<AttrRef> {
        let index = *self.index.borrow().get(name)?;
        self.data.borrow().get(index).cloned()
    }

    /// Implementation of [`item`](https://www.w3.org/TR/2004/REC-DOM-Level-3-Core-20040407/DOM3-Core.html#core-ID-349467F9) method.
    pub fn item(&self, index: usize) -> Option<AttrRef> {
        self.data.borrow().get(index).cloned()
    }
}

#[cfg(test)]
mod tests {
    use crate::dom::{document::DocumentRef, node::Node};

    use super::*;

    #[test]
    fn attribute_table_keeps_insertion_order() {
        let mut table: AttributeTable = [("b", "1"), ("a", "2"), ("c", "3")].into_iter().collect();
        table.set("a", "4");
        assert_eq!(table.len(), 3);
        let names = table.iter().map(|(k, _)| k.to_string()).collect::<Vec<_>>();
        assert_eq!(names, ["b", "a", "c"]);
        assert_eq!(table.get("a").as_deref(), Some("4"));
        assert_eq!(table.remove("b").as_deref(), Some("1"));
        assert!(table.remove("b").is_none());
        assert!(table.get("b").is_none());
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn named_node_map_lookup() {
        let doc = DocumentRef::new();
        let mut elem = doc.create_element("rect");
        elem.set_attribute("width", "10");
        elem.set_attribute("height", "20");
        let map = elem.attributes().unwrap();
        assert_eq!(map.len(), 2);
        assert!(!map.is_empty());
        assert_eq!(&*map.get_named_item("height").unwrap().value(), "20");
        assert!(map.get_named_item("depth").is_none());
        assert_eq!(&*map.item(0).unwrap().name(), "width");
        assert!(map.item(2).is_none());
    }

    #[test]
    fn named_node_map_follows_element_mutation() {
        let doc = DocumentRef::new();
        let mut elem = doc.create_element("rect");
        elem.set_attribute("width", "10");
        let map = elem.attributes().unwrap();
        let old = map.get_named_item("width").unwrap();

        elem.set_attribute("x", "1");
        assert_eq!(map.len(), 2);
        assert_eq!(&*map.item(1).unwrap().name(), "x");
        // regenerated instances replace the old ones
        assert!(!map.get_named_item("width").unwrap().is_same_node(&old.into()));

        elem.remove_attribute("width");
        assert_eq!(map.len(), 1);
        assert!(map.get_named_item("width").is_none());
        assert_eq!(&*map.item(0).unwrap().name(), "x");
    }
}
