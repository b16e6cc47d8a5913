//! Static scope analysis for ECMAScript programs.
//!
//! Given a [`jsscope_ast::NodeArena`] and the handle of a `Script` or
//! `Module`, [`analyze`] produces the program's scope tree: every
//! variable, every declaration and reference of it, the free names
//! passing `through` each scope, dynamic-scope taint from `with` and
//! direct `eval`, and the property accesses observed on each tracked
//! binding.
//!
//! The analysis is a single bottom-up fold. Each node reduces to a
//! [`state::ScopeState`]; states of siblings combine monoidally, and
//! scope-introducing constructs seal the accumulated facts into
//! [`Scope`] values. Semantics follow ECMAScript's static scoping
//! rules, including the Annex B.3.3 legacy function hoisting in sloppy
//! mode, the B.3.5 simple catch binding exception, and the `arguments`
//! object of non-arrow functions.

pub mod analyzer;
pub mod declaration;
pub mod reference;
pub mod scope;
pub mod state;
pub mod strictness;
pub mod variable;

use jsscope_ast::{Node, NodeArena, NodeId};

pub use analyzer::{ScopeAnalyzer, DYNAMIC_PROPERTY};
pub use declaration::{Declaration, DeclarationKind, DeclarationMultiMap};
pub use reference::{Accessibility, Reference};
pub use scope::{GlobalScope, Scope, ScopeType, VariableMap};
pub use variable::{Property, PropertyMap, Variable};

/// The root node handed to the analyzer was not a program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyzeError {
    UnsupportedRoot { kind: &'static str },
}

impl std::fmt::Display for AnalyzeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalyzeError::UnsupportedRoot { kind } => {
                write!(f, "cannot analyze a {kind} node; expected Script or Module")
            }
        }
    }
}

impl std::error::Error for AnalyzeError {}

/// Analyze `program`, which must be a `Script` or `Module` node.
///
/// # Panics
///
/// Panics when `program` is any other node kind; use [`try_analyze`]
/// when the root is not known to be a program.
pub fn analyze(arena: &NodeArena, program: NodeId) -> GlobalScope {
    match try_analyze(arena, program) {
        Ok(global) => global,
        Err(error) => panic!("{error}"),
    }
}

/// Analyze `program`, reporting a non-program root as an error.
pub fn try_analyze(arena: &NodeArena, program: NodeId) -> Result<GlobalScope, AnalyzeError> {
    match arena.get(program) {
        Node::Script { .. } | Node::Module { .. } => {
            Ok(ScopeAnalyzer::new(arena, program).run(program))
        }
        other => Err(AnalyzeError::UnsupportedRoot {
            kind: other.kind_name(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_program_roots() {
        let mut arena = NodeArena::new();
        let expr = arena.ident_expr("x");
        let error = try_analyze(&arena, expr).unwrap_err();
        assert_eq!(
            error,
            AnalyzeError::UnsupportedRoot {
                kind: "IdentifierExpression"
            }
        );
        assert!(error.to_string().contains("IdentifierExpression"));
    }

    #[test]
    fn accepts_empty_script() {
        let mut arena = NodeArena::new();
        let program = arena.script(vec![]);
        let global = analyze(&arena, program);
        assert!(global.is_global());
        assert!(global.is_dynamic);
        assert_eq!(global.children.len(), 1);
        assert_eq!(global.children[0].scope_type, ScopeType::Script);
    }

    #[test]
    fn accepts_empty_module() {
        let mut arena = NodeArena::new();
        let program = arena.module(vec![]);
        let global = analyze(&arena, program);
        assert!(global.is_global());
        assert_eq!(global.children.len(), 1);
        assert_eq!(global.children[0].scope_type, ScopeType::Module);
    }
}
