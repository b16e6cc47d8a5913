//! Reference classification: how a use site touches a name.

use jsscope_ast::NodeId;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

bitflags::bitflags! {
    /// How a reference accesses its variable or property.
    ///
    /// Base flags compose into the eight meaningful combinations
    /// (read / write / read-write / delete, each optionally
    /// property-qualified). The analyzer only ever constructs those.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Accessibility: u8 {
        const READ = 1 << 0;
        const WRITE = 1 << 1;
        const DELETE = 1 << 2;
        const PROPERTY = 1 << 3;
    }
}

impl Accessibility {
    pub const READWRITE: Accessibility = Accessibility::READ.union(Accessibility::WRITE);
    pub const PROPERTY_READ: Accessibility = Accessibility::READ.union(Accessibility::PROPERTY);
    pub const PROPERTY_WRITE: Accessibility = Accessibility::WRITE.union(Accessibility::PROPERTY);
    pub const PROPERTY_READWRITE: Accessibility =
        Accessibility::READWRITE.union(Accessibility::PROPERTY);
    pub const PROPERTY_DELETE: Accessibility =
        Accessibility::DELETE.union(Accessibility::PROPERTY);

    pub fn is_read(self) -> bool {
        self.contains(Accessibility::READ)
    }

    pub fn is_write(self) -> bool {
        self.contains(Accessibility::WRITE)
    }

    pub fn is_read_write(self) -> bool {
        self.contains(Accessibility::READWRITE)
    }

    pub fn is_delete(self) -> bool {
        self.contains(Accessibility::DELETE)
    }

    pub fn is_property(self) -> bool {
        self.contains(Accessibility::PROPERTY)
    }
}

impl Serialize for Accessibility {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Accessibility", 4)?;
        s.serialize_field("isRead", &self.is_read())?;
        s.serialize_field("isWrite", &self.is_write())?;
        s.serialize_field("isDelete", &self.is_delete())?;
        s.serialize_field("isProperty", &self.is_property())?;
        s.end()
    }
}

/// One use of a name: the AST node it occurred at and how it accessed
/// the binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Reference {
    pub node: NodeId,
    pub accessibility: Accessibility,
}

impl Reference {
    pub fn new(node: NodeId, accessibility: Accessibility) -> Reference {
        Reference {
            node,
            accessibility,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composed_flags() {
        assert!(Accessibility::READWRITE.is_read());
        assert!(Accessibility::READWRITE.is_write());
        assert!(!Accessibility::READWRITE.is_delete());
        assert!(Accessibility::PROPERTY_DELETE.is_delete());
        assert!(Accessibility::PROPERTY_DELETE.is_property());
        assert!(!Accessibility::READ.is_property());
    }
}
