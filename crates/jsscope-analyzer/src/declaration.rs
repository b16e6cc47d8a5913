//! Declaration sites and their binding kinds.

use jsscope_ast::NodeId;
use serde::Serialize;

/// What form introduced a binding.
///
/// `FunctionVarDeclaration` is synthetic: it marks a block-level
/// function declaration additionally hoisted as a function-scoped
/// binding under Annex B.3.3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DeclarationKind {
    Var,
    Const,
    Let,
    FunctionDeclaration,
    FunctionVarDeclaration,
    FunctionName,
    ClassDeclaration,
    ClassName,
    Parameter,
    CatchParameter,
    Import,
}

impl DeclarationKind {
    /// Whether the binding is lexical (block-scoped) rather than
    /// hoisted to the enclosing function/script scope. Function
    /// declarations count as block-scoped here; their top-level
    /// var-like behavior is handled separately during `finish`.
    pub fn is_block_scoped(self) -> bool {
        match self {
            DeclarationKind::Var
            | DeclarationKind::FunctionVarDeclaration
            | DeclarationKind::Parameter => false,
            DeclarationKind::Const
            | DeclarationKind::Let
            | DeclarationKind::FunctionDeclaration
            | DeclarationKind::FunctionName
            | DeclarationKind::ClassDeclaration
            | DeclarationKind::ClassName
            | DeclarationKind::CatchParameter
            | DeclarationKind::Import => true,
        }
    }

    pub fn from_var_decl_kind(kind: jsscope_ast::VariableDeclarationKind) -> DeclarationKind {
        match kind {
            jsscope_ast::VariableDeclarationKind::Var => DeclarationKind::Var,
            jsscope_ast::VariableDeclarationKind::Let => DeclarationKind::Let,
            jsscope_ast::VariableDeclarationKind::Const => DeclarationKind::Const,
        }
    }
}

/// One site that introduces a binding: the binding identifier node and
/// the kind of form that declared it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Declaration {
    pub node: NodeId,
    pub kind: DeclarationKind,
}

impl Declaration {
    pub fn new(node: NodeId, kind: DeclarationKind) -> Declaration {
        Declaration { node, kind }
    }
}

/// Insertion-ordered multimap of binding name to declaration sites.
///
/// A key may exist with an empty list (the synthesized `arguments`
/// binding); merge is per-key list concatenation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeclarationMultiMap {
    entries: indexmap::IndexMap<String, Vec<Declaration>, rustc_hash::FxBuildHasher>,
}

impl DeclarationMultiMap {
    pub fn new() -> DeclarationMultiMap {
        DeclarationMultiMap::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn add(&mut self, name: impl Into<String>, declaration: Declaration) {
        self.entries.entry(name.into()).or_default().push(declaration);
    }

    /// Ensure `name` has an entry, possibly with no declaration sites.
    pub fn ensure(&mut self, name: impl Into<String>) {
        self.entries.entry(name.into()).or_default();
    }

    pub fn extend(&mut self, other: &DeclarationMultiMap) {
        for (name, declarations) in &other.entries {
            self.entries
                .entry(name.clone())
                .or_default()
                .extend_from_slice(declarations);
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<Vec<Declaration>> {
        self.entries.shift_remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&[Declaration]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<Declaration>)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multimap_preserves_insertion_order_and_concats_per_key() {
        let mut a = DeclarationMultiMap::new();
        a.add("x", Declaration::new(NodeId(0), DeclarationKind::Var));
        a.add("y", Declaration::new(NodeId(1), DeclarationKind::Var));
        let mut b = DeclarationMultiMap::new();
        b.add("x", Declaration::new(NodeId(2), DeclarationKind::Var));
        a.extend(&b);
        let keys: Vec<&String> = a.keys().collect();
        assert_eq!(keys, vec!["x", "y"]);
        assert_eq!(a.get("x").unwrap().len(), 2);
    }

    #[test]
    fn ensure_creates_empty_entry() {
        let mut m = DeclarationMultiMap::new();
        m.ensure("arguments");
        assert!(m.contains("arguments"));
        assert_eq!(m.get("arguments").unwrap().len(), 0);
    }

    #[test]
    fn block_scoping_per_kind() {
        assert!(!DeclarationKind::Var.is_block_scoped());
        assert!(!DeclarationKind::Parameter.is_block_scoped());
        assert!(!DeclarationKind::FunctionVarDeclaration.is_block_scoped());
        assert!(DeclarationKind::Let.is_block_scoped());
        assert!(DeclarationKind::Const.is_block_scoped());
        assert!(DeclarationKind::FunctionDeclaration.is_block_scoped());
        assert!(DeclarationKind::CatchParameter.is_block_scoped());
        assert!(DeclarationKind::Import.is_block_scoped());
    }
}
