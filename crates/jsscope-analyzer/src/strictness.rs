//! Sloppy-mode detection.
//!
//! Annex B.3.3 hoisting only applies inside sloppy-mode functions, so
//! before reduction we walk the tree once and record every
//! function-like node whose body is not strict. Modules and class
//! bodies are always strict; a `"use strict"` directive makes a script
//! or function body (and everything nested) strict.

use jsscope_ast::{for_each_child, Node, NodeArena, NodeId};
use rustc_hash::FxHashSet;
use tracing::debug;

fn has_use_strict(arena: &NodeArena, directives: &[NodeId]) -> bool {
    directives.iter().any(|&id| {
        matches!(arena.get(id), Node::Directive { raw_value } if raw_value == "use strict")
    })
}

/// Every function-like node (function declaration or expression, arrow,
/// method, getter, setter) whose body runs in sloppy mode.
pub fn sloppy_function_set(arena: &NodeArena, program: NodeId) -> FxHashSet<NodeId> {
    let mut sloppy = FxHashSet::default();
    match arena.get(program) {
        Node::Script {
            directives,
            statements,
        } => {
            let strict = has_use_strict(arena, directives);
            for &statement in statements {
                walk(arena, statement, strict, &mut sloppy);
            }
        }
        // Module code is always strict.
        Node::Module { .. } => {}
        _ => {}
    }
    debug!(count = sloppy.len(), "collected sloppy functions");
    sloppy
}

fn walk(arena: &NodeArena, id: NodeId, strict: bool, sloppy: &mut FxHashSet<NodeId>) {
    match arena.get(id) {
        Node::FunctionDeclaration { params, body, name, .. }
        | Node::FunctionExpression { params, body, name: Some(name), .. } => {
            enter_function(arena, id, *name, Some(*params), *body, strict, sloppy);
        }
        Node::FunctionExpression {
            params,
            body,
            name: None,
            ..
        } => {
            enter_function_body(arena, id, Some(*params), *body, strict, sloppy);
        }
        Node::Method { name, params, body, .. } => {
            walk(arena, *name, strict, sloppy);
            enter_function_body(arena, id, Some(*params), *body, strict, sloppy);
        }
        Node::Getter { name, body } => {
            walk(arena, *name, strict, sloppy);
            enter_function_body(arena, id, None, *body, strict, sloppy);
        }
        Node::Setter { name, param, body } => {
            walk(arena, *name, strict, sloppy);
            let param = *param;
            let body = *body;
            let body_strict = strict || body_is_strict(arena, body);
            if !body_strict {
                sloppy.insert(id);
            }
            walk(arena, param, body_strict, sloppy);
            walk_body(arena, body, body_strict, sloppy);
        }
        Node::ArrowExpression { params, body, .. } => {
            // An expression-bodied arrow has no directive prologue.
            let body_strict = strict || body_is_strict(arena, *body);
            if !body_strict {
                sloppy.insert(id);
            }
            walk(arena, *params, body_strict, sloppy);
            walk_body(arena, *body, body_strict, sloppy);
        }
        Node::ClassDeclaration { .. } | Node::ClassExpression { .. } => {
            for_each_child(arena, id, &mut |child| walk(arena, child, true, sloppy));
        }
        _ => {
            for_each_child(arena, id, &mut |child| walk(arena, child, strict, sloppy));
        }
    }
}

fn enter_function(
    arena: &NodeArena,
    id: NodeId,
    name: NodeId,
    params: Option<NodeId>,
    body: NodeId,
    strict: bool,
    sloppy: &mut FxHashSet<NodeId>,
) {
    walk(arena, name, strict, sloppy);
    enter_function_body(arena, id, params, body, strict, sloppy);
}

fn enter_function_body(
    arena: &NodeArena,
    id: NodeId,
    params: Option<NodeId>,
    body: NodeId,
    strict: bool,
    sloppy: &mut FxHashSet<NodeId>,
) {
    let body_strict = strict || body_is_strict(arena, body);
    if !body_strict {
        sloppy.insert(id);
    }
    if let Some(params) = params {
        walk(arena, params, body_strict, sloppy);
    }
    walk_body(arena, body, body_strict, sloppy);
}

fn body_is_strict(arena: &NodeArena, body: NodeId) -> bool {
    match arena.get(body) {
        Node::FunctionBody { directives, .. } => has_use_strict(arena, directives),
        _ => false,
    }
}

fn walk_body(arena: &NodeArena, body: NodeId, strict: bool, sloppy: &mut FxHashSet<NodeId>) {
    match arena.get(body) {
        Node::FunctionBody { statements, .. } => {
            for &statement in statements {
                walk(arena, statement, strict, sloppy);
            }
        }
        // Expression-bodied arrow.
        _ => walk(arena, body, strict, sloppy),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sloppy_script_functions_are_recorded() {
        let mut arena = NodeArena::new();
        let f = arena.simple_function_decl("f", vec![]);
        let program = arena.script(vec![f]);
        let sloppy = sloppy_function_set(&arena, program);
        assert!(sloppy.contains(&f));
    }

    #[test]
    fn use_strict_script_has_no_sloppy_functions() {
        let mut arena = NodeArena::new();
        let f = arena.simple_function_decl("f", vec![]);
        let use_strict = arena.directive("use strict");
        let program = arena.script_with_directives(vec![use_strict], vec![f]);
        assert!(sloppy_function_set(&arena, program).is_empty());
    }

    #[test]
    fn use_strict_body_opts_a_single_function_out() {
        let mut arena = NodeArena::new();
        let inner = arena.simple_function_decl("g", vec![]);
        let name = arena.binding_ident("f");
        let params = arena.formal_params(vec![], None);
        let use_strict = arena.directive("use strict");
        let body = arena.function_body_with_directives(vec![use_strict], vec![inner]);
        let f = arena.function_decl(name, params, body);
        let sibling = arena.simple_function_decl("h", vec![]);
        let program = arena.script(vec![f, sibling]);

        let sloppy = sloppy_function_set(&arena, program);
        assert!(!sloppy.contains(&f));
        assert!(!sloppy.contains(&inner));
        assert!(sloppy.contains(&sibling));
    }

    #[test]
    fn module_functions_are_strict() {
        let mut arena = NodeArena::new();
        let f = arena.simple_function_decl("f", vec![]);
        let program = arena.module(vec![f]);
        assert!(sloppy_function_set(&arena, program).is_empty());
    }

    #[test]
    fn methods_of_sloppy_code_are_sloppy() {
        let mut arena = NodeArena::new();
        let name = arena.static_prop_name("m");
        let params = arena.formal_params(vec![], None);
        let body = arena.function_body(vec![]);
        let method = arena.add(Node::Method {
            name,
            is_async: false,
            is_generator: false,
            params,
            body,
        });
        let object = arena.object_expr(vec![method]);
        let statement = arena.expr_stmt(object);
        let program = arena.script(vec![statement]);
        assert!(sloppy_function_set(&arena, program).contains(&method));
    }
}
