//! The output tree: scopes, their variables, and their through sets.

use indexmap::IndexMap;
use jsscope_ast::NodeId;
use rustc_hash::FxBuildHasher;
use serde::Serialize;

use crate::variable::Variable;

/// Insertion-ordered name table used for both `variables` and `through`.
pub type VariableMap = IndexMap<String, Variable, FxBuildHasher>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ScopeType {
    Global,
    Module,
    Script,
    ArrowFunction,
    Function,
    FunctionName,
    ClassName,
    Parameters,
    ParameterExpression,
    With,
    Catch,
    Block,
}

/// A lexical region and everything resolved inside it. Immutable once
/// built by `ScopeState::finish`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scope {
    pub node: NodeId,
    pub scope_type: ScopeType,
    /// True when bindings in this scope cannot be statically enumerated
    /// (direct `eval`, `with`, the global object).
    pub is_dynamic: bool,
    pub children: Vec<Scope>,
    /// Variables owned by this scope, in resolution order.
    pub variables: VariableMap,
    /// Free references crossing this scope boundary unresolved, keyed by
    /// name; each value carries the escaping references.
    pub through: VariableMap,
}

impl Scope {
    pub(crate) fn new(
        node: NodeId,
        scope_type: ScopeType,
        is_dynamic: bool,
        children: Vec<Scope>,
        variables: Vec<Variable>,
        through: VariableMap,
    ) -> Scope {
        let mut table = VariableMap::default();
        for variable in variables {
            match table.shift_remove(&variable.name) {
                Some(existing) => {
                    let name = variable.name.clone();
                    table.insert(name, existing.merge(variable));
                }
                None => {
                    table.insert(variable.name.clone(), variable);
                }
            }
        }
        Scope {
            node,
            scope_type,
            is_dynamic: is_dynamic || scope_type == ScopeType::With,
            children,
            variables: table,
            through,
        }
    }

    /// Build the root scope. Always dynamic: anything can be attached to
    /// the global object at runtime. Free identifiers no scope resolved
    /// become declaration-less variables here, and also stay visible in
    /// `through`.
    pub(crate) fn new_global(
        node: NodeId,
        children: Vec<Scope>,
        variables: Vec<Variable>,
        through: VariableMap,
    ) -> Scope {
        let mut scope = Scope::new(node, ScopeType::Global, true, children, variables, through);
        let unresolved: Vec<(String, Variable)> = scope
            .through
            .iter()
            .map(|(name, free)| (name.clone(), free.clone()))
            .collect();
        for (name, free) in unresolved {
            if !scope.variables.contains_key(&name) {
                scope.variables.insert(name, free);
            }
        }
        scope
    }

    pub fn is_global(&self) -> bool {
        self.scope_type == ScopeType::Global
    }

    pub fn lookup_variable(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    /// Variables in resolution order.
    pub fn variable_list(&self) -> impl Iterator<Item = &Variable> {
        self.variables.values()
    }
}

/// The root of the scope tree, as handed to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GlobalScope {
    scope: Scope,
}

impl GlobalScope {
    pub(crate) fn from_scope(scope: Scope) -> GlobalScope {
        debug_assert!(scope.is_global());
        GlobalScope { scope }
    }
}

impl std::ops::Deref for GlobalScope {
    type Target = Scope;

    fn deref(&self) -> &Scope {
        &self.scope
    }
}
