//! Variables, properties, and the transient binding paths used while a
//! pattern or member chain is being reduced.
//!
//! `Variable` and `Property` obey the same merge law: combining two
//! values of the same name unions their reference lists in order and
//! recursively merges their property maps. Merging different names is a
//! traversal bug and panics.

use indexmap::IndexMap;
use jsscope_ast::NodeId;
use rustc_hash::FxBuildHasher;
use serde::Serialize;
use smallvec::SmallVec;

use crate::declaration::Declaration;
use crate::reference::Reference;

/// Insertion-order-preserving map of property name to `Property`.
/// Ordering is load-bearing: consumers rely on first-seen order.
pub type PropertyMap = IndexMap<String, Property, FxBuildHasher>;

/// A member-access chain segment attached to a variable or to another
/// property: `a.b.c` yields property `b` on variable `a`, and property
/// `c` nested under `b`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    pub name: String,
    pub references: Vec<Reference>,
    pub properties: PropertyMap,
}

impl Property {
    pub fn new(name: impl Into<String>) -> Property {
        Property {
            name: name.into(),
            references: Vec::new(),
            properties: PropertyMap::default(),
        }
    }

    pub fn with_references(name: impl Into<String>, references: Vec<Reference>) -> Property {
        Property {
            name: name.into(),
            references,
            properties: PropertyMap::default(),
        }
    }

    /// Monoidal append over properties of the same name.
    pub fn merge(mut self, other: Property) -> Property {
        if self.name != other.name {
            panic!(
                "merging property named {} into property named {}",
                other.name, self.name
            );
        }
        self.references.extend(other.references);
        self.properties = merge_property_maps(self.properties, other.properties);
        self
    }

    pub fn add_reference(mut self, reference: Reference) -> Property {
        self.references.push(reference);
        self
    }
}

/// A resolved (or still-free) variable: every reference and declaration
/// of one name within one scope, plus the property accesses observed
/// through it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Variable {
    pub name: String,
    pub references: Vec<Reference>,
    pub declarations: Vec<Declaration>,
    pub properties: PropertyMap,
}

impl Variable {
    pub fn new(name: impl Into<String>) -> Variable {
        Variable {
            name: name.into(),
            references: Vec::new(),
            declarations: Vec::new(),
            properties: PropertyMap::default(),
        }
    }

    /// Monoidal append over variables of the same name.
    pub fn merge(mut self, other: Variable) -> Variable {
        if self.name != other.name {
            panic!(
                "merging variable named {} into variable named {}",
                other.name, self.name
            );
        }
        self.references.extend(other.references);
        self.declarations.extend(other.declarations);
        self.properties = merge_property_maps(self.properties, other.properties);
        self
    }

    pub fn add_reference(mut self, reference: Reference) -> Variable {
        self.references.push(reference);
        self
    }
}

/// Key-by-key merge of two property maps, preserving first-seen key
/// order (left's order, then right's new keys).
pub fn merge_property_maps(mut left: PropertyMap, right: PropertyMap) -> PropertyMap {
    for (name, property) in right {
        match left.shift_remove(&name) {
            Some(existing) => {
                left.insert(name, existing.merge(property));
            }
            None => {
                left.insert(name, property);
            }
        }
    }
    left
}

/// A pending route to a binding or assignment target discovered while
/// reducing a pattern or member chain: the dotted `path` locates the
/// Variable/Property node a later reference or forwarded property set
/// should attach to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Binding {
    pub name: String,
    pub path: String,
    pub node: NodeId,
    pub is_rest: bool,
    pub accept_properties: bool,
}

impl Binding {
    pub fn new(name: impl Into<String>, node: NodeId) -> Binding {
        let name = name.into();
        Binding {
            path: name.clone(),
            name,
            node,
            is_rest: false,
            accept_properties: true,
        }
    }

    /// Descend one member level: `a.b` moved to `c` becomes the binding
    /// for `a.b.c`.
    pub fn move_to(&self, child_name: impl Into<String>, node: NodeId) -> Binding {
        let child_name = child_name.into();
        Binding {
            path: format!("{}.{}", self.path, child_name),
            name: child_name,
            node,
            is_rest: false,
            accept_properties: true,
        }
    }

    pub fn set_rest(mut self) -> Binding {
        self.is_rest = true;
        self
    }

    pub fn reject_properties(mut self) -> Binding {
        self.accept_properties = false;
        self
    }
}

/// One slot of a `BindingList`: a leaf binding, or a nested pattern's
/// own list (array destructuring inside array destructuring).
#[derive(Debug, Clone, PartialEq)]
pub enum BindingItem {
    Single(Binding),
    Group(BindingList),
}

/// Ordered bindings pending consumption by a parent node, with the
/// nesting needed to pair array-pattern slots against array-literal
/// sources positionally.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BindingList {
    pub items: Vec<BindingItem>,
    /// Set when this whole group is a rest target (`...[a, b]`).
    pub is_rest: bool,
}

impl BindingList {
    pub fn new() -> BindingList {
        BindingList::default()
    }

    pub fn single(binding: Binding) -> BindingList {
        BindingList {
            items: vec![BindingItem::Single(binding)],
            is_rest: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn push(&mut self, binding: Binding) {
        self.items.push(BindingItem::Single(binding));
    }

    pub fn push_group(&mut self, group: BindingList) {
        self.items.push(BindingItem::Group(group));
    }

    /// List concatenation; the monoid append for pending bindings.
    pub fn merge(mut self, other: BindingList) -> BindingList {
        self.items.extend(other.items);
        self.is_rest |= other.is_rest;
        self
    }

    /// Every leaf binding, depth first, in order.
    pub fn iter_flat(&self) -> impl Iterator<Item = &Binding> {
        let mut out: SmallVec<[&Binding; 8]> = SmallVec::new();
        fn walk<'a>(items: &'a [BindingItem], out: &mut SmallVec<[&'a Binding; 8]>) {
            for item in items {
                match item {
                    BindingItem::Single(b) => out.push(b),
                    BindingItem::Group(g) => walk(&g.items, out),
                }
            }
        }
        walk(&self.items, &mut out);
        out.into_iter()
    }

    pub fn first(&self) -> Option<&Binding> {
        self.iter_flat().next()
    }

    /// Mark the final slot as a rest target. A trailing nested pattern
    /// becomes a rest group; a trailing leaf becomes a rest binding.
    pub fn set_rest_on_last(mut self) -> BindingList {
        match self.items.last_mut() {
            Some(BindingItem::Single(b)) => b.is_rest = true,
            Some(BindingItem::Group(g)) => g.is_rest = true,
            None => {}
        }
        self
    }

    /// Rewrite every leaf with `f`.
    pub fn map_leaves(mut self, f: &impl Fn(Binding) -> Binding) -> BindingList {
        self.items = self
            .items
            .into_iter()
            .map(|item| match item {
                BindingItem::Single(b) => BindingItem::Single(f(b)),
                BindingItem::Group(g) => BindingItem::Group(g.map_leaves(f)),
            })
            .collect();
        self
    }
}

/// The data-property payload an object or array literal hands to the
/// destructuring pattern on the other side of an assignment: one map
/// per object literal, one nested list per array literal.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyCarry {
    Map(PropertyMap),
    List(Vec<PropertyCarry>),
}

impl PropertyCarry {
    pub fn empty() -> PropertyCarry {
        PropertyCarry::Map(PropertyMap::default())
    }

    pub fn as_map(&self) -> Option<&PropertyMap> {
        match self {
            PropertyCarry::Map(m) => Some(m),
            PropertyCarry::List(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::Accessibility;

    fn reference(id: u32) -> Reference {
        Reference::new(NodeId(id), Accessibility::READ)
    }

    #[test]
    fn property_merge_unions_references_in_order() {
        let a = Property::with_references("p", vec![reference(0), reference(1)]);
        let b = Property::with_references("p", vec![reference(2)]);
        let merged = a.merge(b);
        let nodes: Vec<u32> = merged.references.iter().map(|r| r.node.0).collect();
        assert_eq!(nodes, vec![0, 1, 2]);
    }

    #[test]
    fn property_merge_recurses_into_property_maps() {
        let mut a = Property::new("p");
        a.properties
            .insert("x".to_string(), Property::with_references("x", vec![reference(0)]));
        let mut b = Property::new("p");
        b.properties
            .insert("x".to_string(), Property::with_references("x", vec![reference(1)]));
        b.properties.insert("y".to_string(), Property::new("y"));

        let merged = a.merge(b);
        assert_eq!(merged.properties.len(), 2);
        assert_eq!(merged.properties["x"].references.len(), 2);
        let keys: Vec<&String> = merged.properties.keys().collect();
        assert_eq!(keys, vec!["x", "y"]);
    }

    #[test]
    #[should_panic(expected = "merging property named")]
    fn property_merge_panics_on_name_mismatch() {
        let _ = Property::new("a").merge(Property::new("b"));
    }

    #[test]
    #[should_panic(expected = "merging variable named")]
    fn variable_merge_panics_on_name_mismatch() {
        let _ = Variable::new("a").merge(Variable::new("b"));
    }

    #[test]
    fn variable_merge_unions_declarations() {
        use crate::declaration::{Declaration, DeclarationKind};
        let mut a = Variable::new("v");
        a.declarations
            .push(Declaration::new(NodeId(0), DeclarationKind::Var));
        let mut b = Variable::new("v");
        b.declarations
            .push(Declaration::new(NodeId(1), DeclarationKind::Let));
        let merged = a.merge(b);
        assert_eq!(merged.declarations.len(), 2);
    }

    #[test]
    fn binding_move_to_extends_path() {
        let b = Binding::new("a", NodeId(0));
        assert_eq!(b.path, "a");
        let c = b.move_to("b", NodeId(1));
        assert_eq!(c.path, "a.b");
        assert_eq!(c.name, "b");
        let d = c.move_to("c", NodeId(2));
        assert_eq!(d.path, "a.b.c");
    }

    #[test]
    fn binding_list_flattens_depth_first() {
        let mut inner = BindingList::new();
        inner.push(Binding::new("b", NodeId(1)));
        inner.push(Binding::new("c", NodeId(2)));
        let mut outer = BindingList::new();
        outer.push(Binding::new("a", NodeId(0)));
        outer.push_group(inner);
        let names: Vec<&str> = outer.iter_flat().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn set_rest_on_last_marks_group_or_leaf() {
        let mut list = BindingList::new();
        list.push(Binding::new("a", NodeId(0)));
        let list = list.set_rest_on_last();
        assert!(matches!(&list.items[0], BindingItem::Single(b) if b.is_rest));

        let mut outer = BindingList::new();
        outer.push(Binding::new("a", NodeId(0)));
        outer.push_group(BindingList::single(Binding::new("r", NodeId(1))));
        let outer = outer.set_rest_on_last();
        assert!(matches!(&outer.items[1], BindingItem::Group(g) if g.is_rest));
    }
}
