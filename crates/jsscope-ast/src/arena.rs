//! Flat node storage and handles.

use crate::node::Node;

/// Handle to a node in a `NodeArena`.
///
/// Handles are only meaningful with the arena that produced them. Two
/// handles are the same node exactly when they are equal, which is what
/// the analyzer's output relies on (references and declarations point
/// back into the program by handle).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Owns every node of one program.
#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    pub fn with_capacity(capacity: usize) -> NodeArena {
        NodeArena {
            nodes: Vec::with_capacity(capacity),
        }
    }

    pub fn add(&mut self, node: Node) -> NodeId {
        let id = NodeId(u32::try_from(self.nodes.len()).expect("node arena overflow"));
        self.nodes.push(node);
        id
    }

    /// Panics on a handle from another arena that is out of range;
    /// handles are never invalidated, so in-range lookups always hit.
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_get_round_trip() {
        let mut arena = NodeArena::new();
        let id = arena.add(Node::IdentifierExpression {
            name: "x".to_string(),
        });
        assert_eq!(id, NodeId(0));
        assert_eq!(arena.len(), 1);
        match arena.get(id) {
            Node::IdentifierExpression { name } => assert_eq!(name, "x"),
            other => panic!("unexpected node {}", other.kind_name()),
        }
    }

    #[test]
    fn handles_are_sequential() {
        let mut arena = NodeArena::new();
        let a = arena.add(Node::EmptyStatement);
        let b = arena.add(Node::DebuggerStatement);
        assert_eq!(a, NodeId(0));
        assert_eq!(b, NodeId(1));
        assert_ne!(a, b);
    }
}
