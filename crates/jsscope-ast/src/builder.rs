//! Typed construction methods on `NodeArena`.
//!
//! Mirrors how external producers (a parser, a test) assemble programs
//! without spelling out every enum variant. Each method adds one node
//! and returns its handle; children must already be in the arena.

use crate::arena::{NodeArena, NodeId};
use crate::node::{
    BinaryOperator, CompoundAssignmentOperator, Node, UnaryOperator, UpdateOperator,
    VariableDeclarationKind,
};

impl NodeArena {
    // Programs

    pub fn script(&mut self, statements: Vec<NodeId>) -> NodeId {
        self.add(Node::Script {
            directives: Vec::new(),
            statements,
        })
    }

    pub fn script_with_directives(
        &mut self,
        directives: Vec<NodeId>,
        statements: Vec<NodeId>,
    ) -> NodeId {
        self.add(Node::Script {
            directives,
            statements,
        })
    }

    pub fn module(&mut self, items: Vec<NodeId>) -> NodeId {
        self.add(Node::Module {
            directives: Vec::new(),
            items,
        })
    }

    pub fn directive(&mut self, raw_value: &str) -> NodeId {
        self.add(Node::Directive {
            raw_value: raw_value.to_string(),
        })
    }

    // Identifiers and literals

    pub fn ident_expr(&mut self, name: &str) -> NodeId {
        self.add(Node::IdentifierExpression {
            name: name.to_string(),
        })
    }

    pub fn binding_ident(&mut self, name: &str) -> NodeId {
        self.add(Node::BindingIdentifier {
            name: name.to_string(),
        })
    }

    pub fn target_ident(&mut self, name: &str) -> NodeId {
        self.add(Node::AssignmentTargetIdentifier {
            name: name.to_string(),
        })
    }

    pub fn num(&mut self, value: f64) -> NodeId {
        self.add(Node::LiteralNumericExpression { value })
    }

    pub fn string(&mut self, value: &str) -> NodeId {
        self.add(Node::LiteralStringExpression {
            value: value.to_string(),
        })
    }

    pub fn bool_lit(&mut self, value: bool) -> NodeId {
        self.add(Node::LiteralBooleanExpression { value })
    }

    pub fn null_lit(&mut self) -> NodeId {
        self.add(Node::LiteralNullExpression)
    }

    // Statements

    pub fn expr_stmt(&mut self, expression: NodeId) -> NodeId {
        self.add(Node::ExpressionStatement { expression })
    }

    pub fn block(&mut self, statements: Vec<NodeId>) -> NodeId {
        self.add(Node::Block { statements })
    }

    pub fn block_stmt(&mut self, statements: Vec<NodeId>) -> NodeId {
        let block = self.block(statements);
        self.add(Node::BlockStatement { block })
    }

    pub fn var_declarator(&mut self, binding: NodeId, init: Option<NodeId>) -> NodeId {
        self.add(Node::VariableDeclarator { binding, init })
    }

    pub fn var_declaration(
        &mut self,
        kind: VariableDeclarationKind,
        declarators: Vec<NodeId>,
    ) -> NodeId {
        self.add(Node::VariableDeclaration { kind, declarators })
    }

    pub fn var_decl_stmt(&mut self, declaration: NodeId) -> NodeId {
        self.add(Node::VariableDeclarationStatement { declaration })
    }

    /// `kind name;` or `kind name = init;` with a single declarator.
    pub fn simple_var_stmt(
        &mut self,
        kind: VariableDeclarationKind,
        name: &str,
        init: Option<NodeId>,
    ) -> NodeId {
        let binding = self.binding_ident(name);
        let declarator = self.var_declarator(binding, init);
        let declaration = self.var_declaration(kind, vec![declarator]);
        self.var_decl_stmt(declaration)
    }

    pub fn if_stmt(
        &mut self,
        test: NodeId,
        consequent: NodeId,
        alternate: Option<NodeId>,
    ) -> NodeId {
        self.add(Node::IfStatement {
            test,
            consequent,
            alternate,
        })
    }

    pub fn for_of(&mut self, left: NodeId, right: NodeId, body: NodeId) -> NodeId {
        self.add(Node::ForOfStatement { left, right, body })
    }

    pub fn for_in(&mut self, left: NodeId, right: NodeId, body: NodeId) -> NodeId {
        self.add(Node::ForInStatement { left, right, body })
    }

    pub fn labeled(&mut self, label: &str, body: NodeId) -> NodeId {
        self.add(Node::LabeledStatement {
            label: label.to_string(),
            body,
        })
    }

    pub fn with_stmt(&mut self, object: NodeId, body: NodeId) -> NodeId {
        self.add(Node::WithStatement { object, body })
    }

    pub fn catch_clause(&mut self, binding: NodeId, body: NodeId) -> NodeId {
        self.add(Node::CatchClause { binding, body })
    }

    pub fn try_catch(&mut self, body: NodeId, catch_clause: NodeId) -> NodeId {
        self.add(Node::TryCatchStatement { body, catch_clause })
    }

    pub fn switch_case(&mut self, test: NodeId, consequent: Vec<NodeId>) -> NodeId {
        self.add(Node::SwitchCase { test, consequent })
    }

    pub fn switch_stmt(&mut self, discriminant: NodeId, cases: Vec<NodeId>) -> NodeId {
        self.add(Node::SwitchStatement {
            discriminant,
            cases,
        })
    }

    pub fn return_stmt(&mut self, expression: Option<NodeId>) -> NodeId {
        self.add(Node::ReturnStatement { expression })
    }

    // Functions

    pub fn formal_params(&mut self, items: Vec<NodeId>, rest: Option<NodeId>) -> NodeId {
        self.add(Node::FormalParameters { items, rest })
    }

    pub fn function_body(&mut self, statements: Vec<NodeId>) -> NodeId {
        self.add(Node::FunctionBody {
            directives: Vec::new(),
            statements,
        })
    }

    pub fn function_body_with_directives(
        &mut self,
        directives: Vec<NodeId>,
        statements: Vec<NodeId>,
    ) -> NodeId {
        self.add(Node::FunctionBody {
            directives,
            statements,
        })
    }

    pub fn function_decl(&mut self, name: NodeId, params: NodeId, body: NodeId) -> NodeId {
        self.add(Node::FunctionDeclaration {
            name,
            is_async: false,
            is_generator: false,
            params,
            body,
        })
    }

    /// `function name() { statements }` with no parameters.
    pub fn simple_function_decl(&mut self, name: &str, statements: Vec<NodeId>) -> NodeId {
        let name = self.binding_ident(name);
        let params = self.formal_params(Vec::new(), None);
        let body = self.function_body(statements);
        self.function_decl(name, params, body)
    }

    pub fn function_expr(
        &mut self,
        name: Option<NodeId>,
        params: NodeId,
        body: NodeId,
    ) -> NodeId {
        self.add(Node::FunctionExpression {
            name,
            is_async: false,
            is_generator: false,
            params,
            body,
        })
    }

    pub fn arrow_expr(&mut self, params: NodeId, body: NodeId) -> NodeId {
        self.add(Node::ArrowExpression {
            is_async: false,
            params,
            body,
        })
    }

    // Expressions

    pub fn call(&mut self, callee: NodeId, arguments: Vec<NodeId>) -> NodeId {
        self.add(Node::CallExpression { callee, arguments })
    }

    pub fn new_expr(&mut self, callee: NodeId, arguments: Vec<NodeId>) -> NodeId {
        self.add(Node::NewExpression { callee, arguments })
    }

    pub fn static_member(&mut self, object: NodeId, property: &str) -> NodeId {
        self.add(Node::StaticMemberExpression {
            object,
            property: property.to_string(),
        })
    }

    pub fn computed_member(&mut self, object: NodeId, expression: NodeId) -> NodeId {
        self.add(Node::ComputedMemberExpression { object, expression })
    }

    pub fn assign(&mut self, binding: NodeId, expression: NodeId) -> NodeId {
        self.add(Node::AssignmentExpression {
            binding,
            expression,
        })
    }

    pub fn compound_assign(
        &mut self,
        operator: CompoundAssignmentOperator,
        binding: NodeId,
        expression: NodeId,
    ) -> NodeId {
        self.add(Node::CompoundAssignmentExpression {
            operator,
            binding,
            expression,
        })
    }

    pub fn binary(&mut self, operator: BinaryOperator, left: NodeId, right: NodeId) -> NodeId {
        self.add(Node::BinaryExpression {
            operator,
            left,
            right,
        })
    }

    pub fn unary(&mut self, operator: UnaryOperator, operand: NodeId) -> NodeId {
        self.add(Node::UnaryExpression { operator, operand })
    }

    pub fn update(
        &mut self,
        is_prefix: bool,
        operator: UpdateOperator,
        operand: NodeId,
    ) -> NodeId {
        self.add(Node::UpdateExpression {
            is_prefix,
            operator,
            operand,
        })
    }

    // Object and array literals

    pub fn object_expr(&mut self, properties: Vec<NodeId>) -> NodeId {
        self.add(Node::ObjectExpression { properties })
    }

    pub fn static_prop_name(&mut self, value: &str) -> NodeId {
        self.add(Node::StaticPropertyName {
            value: value.to_string(),
        })
    }

    pub fn computed_prop_name(&mut self, expression: NodeId) -> NodeId {
        self.add(Node::ComputedPropertyName { expression })
    }

    pub fn data_property(&mut self, name: NodeId, expression: NodeId) -> NodeId {
        self.add(Node::DataProperty { name, expression })
    }

    /// `name: expression` with a static name.
    pub fn data_prop(&mut self, name: &str, expression: NodeId) -> NodeId {
        let name = self.static_prop_name(name);
        self.data_property(name, expression)
    }

    pub fn shorthand_prop(&mut self, name: &str) -> NodeId {
        let name = self.ident_expr(name);
        self.add(Node::ShorthandProperty { name })
    }

    pub fn array_expr(&mut self, elements: Vec<Option<NodeId>>) -> NodeId {
        self.add(Node::ArrayExpression { elements })
    }

    pub fn spread(&mut self, expression: NodeId) -> NodeId {
        self.add(Node::SpreadElement { expression })
    }

    // Binding patterns

    pub fn binding_with_default(&mut self, binding: NodeId, init: NodeId) -> NodeId {
        self.add(Node::BindingWithDefault { binding, init })
    }

    pub fn array_binding(&mut self, elements: Vec<Option<NodeId>>, rest: Option<NodeId>) -> NodeId {
        self.add(Node::ArrayBinding { elements, rest })
    }

    pub fn object_binding(&mut self, properties: Vec<NodeId>, rest: Option<NodeId>) -> NodeId {
        self.add(Node::ObjectBinding { properties, rest })
    }

    pub fn binding_prop_ident(&mut self, binding: NodeId, init: Option<NodeId>) -> NodeId {
        self.add(Node::BindingPropertyIdentifier { binding, init })
    }

    pub fn binding_prop_property(&mut self, name: NodeId, binding: NodeId) -> NodeId {
        self.add(Node::BindingPropertyProperty { name, binding })
    }

    // Assignment targets

    pub fn static_member_target(&mut self, object: NodeId, property: &str) -> NodeId {
        self.add(Node::StaticMemberAssignmentTarget {
            object,
            property: property.to_string(),
        })
    }

    pub fn computed_member_target(&mut self, object: NodeId, expression: NodeId) -> NodeId {
        self.add(Node::ComputedMemberAssignmentTarget { object, expression })
    }

    pub fn array_target(&mut self, elements: Vec<Option<NodeId>>, rest: Option<NodeId>) -> NodeId {
        self.add(Node::ArrayAssignmentTarget { elements, rest })
    }

    pub fn object_target(&mut self, properties: Vec<NodeId>, rest: Option<NodeId>) -> NodeId {
        self.add(Node::ObjectAssignmentTarget { properties, rest })
    }

    pub fn target_prop_ident(&mut self, binding: NodeId, init: Option<NodeId>) -> NodeId {
        self.add(Node::AssignmentTargetPropertyIdentifier { binding, init })
    }

    pub fn target_prop_property(&mut self, name: NodeId, binding: NodeId) -> NodeId {
        self.add(Node::AssignmentTargetPropertyProperty { name, binding })
    }

    pub fn target_with_default(&mut self, binding: NodeId, init: NodeId) -> NodeId {
        self.add(Node::AssignmentTargetWithDefault { binding, init })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_var_stmt_builds_full_chain() {
        let mut arena = NodeArena::new();
        let zero = arena.num(0.0);
        let stmt = arena.simple_var_stmt(VariableDeclarationKind::Var, "v", Some(zero));
        let Node::VariableDeclarationStatement { declaration } = arena.get(stmt) else {
            panic!("expected VariableDeclarationStatement");
        };
        let Node::VariableDeclaration { kind, declarators } = arena.get(*declaration) else {
            panic!("expected VariableDeclaration");
        };
        assert_eq!(*kind, VariableDeclarationKind::Var);
        assert_eq!(declarators.len(), 1);
    }

    #[test]
    fn builders_preserve_child_order() {
        let mut arena = NodeArena::new();
        let callee = arena.ident_expr("f");
        let arg = arena.ident_expr("x");
        let call = arena.call(callee, vec![arg]);
        let Node::CallExpression { callee: c, arguments } = arena.get(call) else {
            panic!("expected CallExpression");
        };
        assert_eq!(*c, callee);
        assert_eq!(arguments, &vec![arg]);
    }
}
