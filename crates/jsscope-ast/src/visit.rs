//! Generic child enumeration, for passes that walk the tree without
//! caring about node-specific semantics.

use crate::arena::{NodeArena, NodeId};
use crate::node::Node;

/// Call `f` with every direct child of `id`, in source order.
pub fn for_each_child(arena: &NodeArena, id: NodeId, f: &mut impl FnMut(NodeId)) {
    let each = |ids: &[NodeId], f: &mut dyn FnMut(NodeId)| {
        for &child in ids {
            f(child);
        }
    };
    let each_opt = |ids: &[Option<NodeId>], f: &mut dyn FnMut(NodeId)| {
        for child in ids.iter().flatten() {
            f(*child);
        }
    };
    match arena.get(id) {
        Node::Script {
            directives,
            statements,
        } => {
            each(directives, f);
            each(statements, f);
        }
        Node::Module { directives, items } => {
            each(directives, f);
            each(items, f);
        }
        Node::FunctionBody {
            directives,
            statements,
        } => {
            each(directives, f);
            each(statements, f);
        }
        Node::Block { statements } => each(statements, f),
        Node::BlockStatement { block } => f(*block),
        Node::VariableDeclarationStatement { declaration } => f(*declaration),
        Node::VariableDeclaration { declarators, .. } => each(declarators, f),
        Node::VariableDeclarator { binding, init } => {
            f(*binding);
            if let Some(init) = init {
                f(*init);
            }
        }
        Node::ExpressionStatement { expression }
        | Node::ThrowStatement { expression }
        | Node::SpreadElement { expression }
        | Node::SpreadProperty { expression }
        | Node::ComputedPropertyName { expression }
        | Node::YieldGeneratorExpression { expression }
        | Node::AwaitExpression { expression } => f(*expression),
        Node::IfStatement {
            test,
            consequent,
            alternate,
        } => {
            f(*test);
            f(*consequent);
            if let Some(alternate) = alternate {
                f(*alternate);
            }
        }
        Node::ForStatement {
            init,
            test,
            update,
            body,
        } => {
            for child in [init, test, update].into_iter().flatten() {
                f(*child);
            }
            f(*body);
        }
        Node::ForInStatement { left, right, body }
        | Node::ForOfStatement { left, right, body }
        | Node::ForAwaitStatement { left, right, body } => {
            f(*left);
            f(*right);
            f(*body);
        }
        Node::WhileStatement { test, body } => {
            f(*test);
            f(*body);
        }
        Node::DoWhileStatement { body, test } => {
            f(*body);
            f(*test);
        }
        Node::SwitchStatement {
            discriminant,
            cases,
        } => {
            f(*discriminant);
            each(cases, f);
        }
        Node::SwitchStatementWithDefault {
            discriminant,
            pre_default_cases,
            default_case,
            post_default_cases,
        } => {
            f(*discriminant);
            each(pre_default_cases, f);
            f(*default_case);
            each(post_default_cases, f);
        }
        Node::SwitchCase { test, consequent } => {
            f(*test);
            each(consequent, f);
        }
        Node::SwitchDefault { consequent } => each(consequent, f),
        Node::LabeledStatement { body, .. } => f(*body),
        Node::ReturnStatement { expression } | Node::YieldExpression { expression } => {
            if let Some(expression) = expression {
                f(*expression);
            }
        }
        Node::TryCatchStatement { body, catch_clause } => {
            f(*body);
            f(*catch_clause);
        }
        Node::TryFinallyStatement {
            body,
            catch_clause,
            finalizer,
        } => {
            f(*body);
            if let Some(catch_clause) = catch_clause {
                f(*catch_clause);
            }
            f(*finalizer);
        }
        Node::CatchClause { binding, body } => {
            f(*binding);
            f(*body);
        }
        Node::WithStatement { object, body } => {
            f(*object);
            f(*body);
        }
        Node::FunctionDeclaration {
            name, params, body, ..
        } => {
            f(*name);
            f(*params);
            f(*body);
        }
        Node::FunctionExpression {
            name, params, body, ..
        } => {
            if let Some(name) = name {
                f(*name);
            }
            f(*params);
            f(*body);
        }
        Node::ArrowExpression { params, body, .. } => {
            f(*params);
            f(*body);
        }
        Node::FormalParameters { items, rest } => {
            each(items, f);
            if let Some(rest) = rest {
                f(*rest);
            }
        }
        Node::Method {
            name, params, body, ..
        } => {
            f(*name);
            f(*params);
            f(*body);
        }
        Node::Getter { name, body } => {
            f(*name);
            f(*body);
        }
        Node::Setter { name, param, body } => {
            f(*name);
            f(*param);
            f(*body);
        }
        Node::ClassDeclaration {
            name,
            super_class,
            elements,
        } => {
            f(*name);
            if let Some(super_class) = super_class {
                f(*super_class);
            }
            each(elements, f);
        }
        Node::ClassExpression {
            name,
            super_class,
            elements,
        } => {
            for child in [name, super_class].into_iter().flatten() {
                f(*child);
            }
            each(elements, f);
        }
        Node::ClassElement { method, .. } => f(*method),
        Node::Import {
            default_binding,
            named_imports,
            ..
        } => {
            if let Some(default_binding) = default_binding {
                f(*default_binding);
            }
            each(named_imports, f);
        }
        Node::ImportNamespace {
            default_binding,
            namespace_binding,
            ..
        } => {
            if let Some(default_binding) = default_binding {
                f(*default_binding);
            }
            f(*namespace_binding);
        }
        Node::ImportSpecifier { binding, .. } => f(*binding),
        Node::ExportFrom { named_exports, .. } | Node::ExportLocals { named_exports } => {
            each(named_exports, f);
        }
        Node::ExportLocalSpecifier { name, .. } => f(*name),
        Node::Export { declaration } => f(*declaration),
        Node::ExportDefault { body } => f(*body),
        Node::ObjectExpression { properties } => each(properties, f),
        Node::DataProperty { name, expression } => {
            f(*name);
            f(*expression);
        }
        Node::ShorthandProperty { name } => f(*name),
        Node::TemplateExpression { tag, elements } => {
            if let Some(tag) = tag {
                f(*tag);
            }
            each(elements, f);
        }
        Node::ArrayExpression { elements } => each_opt(elements, f),
        Node::CallExpression { callee, arguments } | Node::NewExpression { callee, arguments } => {
            f(*callee);
            each(arguments, f);
        }
        Node::StaticMemberExpression { object, .. }
        | Node::StaticMemberAssignmentTarget { object, .. } => f(*object),
        Node::ComputedMemberExpression { object, expression }
        | Node::ComputedMemberAssignmentTarget { object, expression } => {
            f(*object);
            f(*expression);
        }
        Node::AssignmentExpression {
            binding,
            expression,
        }
        | Node::CompoundAssignmentExpression {
            binding,
            expression,
            ..
        } => {
            f(*binding);
            f(*expression);
        }
        Node::BinaryExpression { left, right, .. } => {
            f(*left);
            f(*right);
        }
        Node::UnaryExpression { operand, .. } | Node::UpdateExpression { operand, .. } => {
            f(*operand);
        }
        Node::ConditionalExpression {
            test,
            consequent,
            alternate,
        } => {
            f(*test);
            f(*consequent);
            f(*alternate);
        }
        Node::BindingWithDefault { binding, init }
        | Node::AssignmentTargetWithDefault { binding, init } => {
            f(*binding);
            f(*init);
        }
        Node::ArrayBinding { elements, rest } | Node::ArrayAssignmentTarget { elements, rest } => {
            each_opt(elements, f);
            if let Some(rest) = rest {
                f(*rest);
            }
        }
        Node::ObjectBinding { properties, rest }
        | Node::ObjectAssignmentTarget { properties, rest } => {
            each(properties, f);
            if let Some(rest) = rest {
                f(*rest);
            }
        }
        Node::BindingPropertyIdentifier { binding, init }
        | Node::AssignmentTargetPropertyIdentifier { binding, init } => {
            f(*binding);
            if let Some(init) = init {
                f(*init);
            }
        }
        Node::BindingPropertyProperty { name, binding }
        | Node::AssignmentTargetPropertyProperty { name, binding } => {
            f(*name);
            f(*binding);
        }
        Node::Directive { .. }
        | Node::EmptyStatement
        | Node::BreakStatement { .. }
        | Node::ContinueStatement { .. }
        | Node::DebuggerStatement
        | Node::ExportAllFrom { .. }
        | Node::ExportFromSpecifier { .. }
        | Node::StaticPropertyName { .. }
        | Node::IdentifierExpression { .. }
        | Node::ThisExpression
        | Node::NewTargetExpression
        | Node::SuperExpression
        | Node::LiteralStringExpression { .. }
        | Node::LiteralNumericExpression { .. }
        | Node::LiteralBooleanExpression { .. }
        | Node::LiteralNullExpression
        | Node::LiteralInfinityExpression
        | Node::LiteralRegExpExpression { .. }
        | Node::TemplateElement { .. }
        | Node::BindingIdentifier { .. }
        | Node::AssignmentTargetIdentifier { .. } => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visits_children_in_source_order() {
        let mut arena = NodeArena::new();
        let a = arena.ident_expr("a");
        let b = arena.ident_expr("b");
        let cond = arena.ident_expr("c");
        let node = arena.add(Node::ConditionalExpression {
            test: cond,
            consequent: a,
            alternate: b,
        });
        let mut seen = Vec::new();
        for_each_child(&arena, node, &mut |child| seen.push(child));
        assert_eq!(seen, vec![cond, a, b]);
    }

    #[test]
    fn skips_array_holes() {
        let mut arena = NodeArena::new();
        let a = arena.ident_expr("a");
        let node = arena.add(Node::ArrayExpression {
            elements: vec![None, Some(a), None],
        });
        let mut seen = Vec::new();
        for_each_child(&arena, node, &mut |child| seen.push(child));
        assert_eq!(seen, vec![a]);
    }
}
