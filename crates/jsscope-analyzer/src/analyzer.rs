//! The reduction over the AST.
//!
//! One method per node family: each node's state is the concatenation
//! of its children's states, adjusted for what the node itself means
//! (declarations, references, scope boundaries, property routes).

use jsscope_ast::{Node, NodeArena, NodeId, UnaryOperator};
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::declaration::DeclarationKind;
use crate::reference::{Accessibility, Reference};
use crate::scope::{GlobalScope, ScopeType};
use crate::state::{FinishOptions, ScopeState};
use crate::strictness;
use crate::variable::{Binding, BindingList, Property, PropertyCarry};

/// Key recorded for property accesses whose name cannot be determined
/// statically.
pub const DYNAMIC_PROPERTY: &str = "*dynamic*";

/// Name of the unnameable `export default` function/class binding.
const DEFAULT_EXPORT: &str = "*default*";

pub struct ScopeAnalyzer<'a> {
    arena: &'a NodeArena,
    /// Function-like nodes whose bodies run in sloppy mode; only these
    /// participate in Annex B.3.3 hoisting.
    sloppy: FxHashSet<NodeId>,
}

impl<'a> ScopeAnalyzer<'a> {
    pub fn new(arena: &'a NodeArena, program: NodeId) -> ScopeAnalyzer<'a> {
        ScopeAnalyzer {
            arena,
            sloppy: strictness::sloppy_function_set(arena, program),
        }
    }

    /// Bypass the strictness pre-pass; used by callers that already
    /// know the mode of every function.
    pub fn with_sloppy_set(arena: &'a NodeArena, sloppy: FxHashSet<NodeId>) -> ScopeAnalyzer<'a> {
        ScopeAnalyzer { arena, sloppy }
    }

    pub(crate) fn run(&self, program: NodeId) -> GlobalScope {
        debug!(nodes = self.arena.len(), "analyzing program");
        let state = self.reduce(program);
        let mut children = state.children;
        assert_eq!(
            children.len(),
            1,
            "a program reduces to exactly one root scope"
        );
        GlobalScope::from_scope(children.remove(0))
    }

    fn fold(&self, ids: &[NodeId]) -> ScopeState {
        ids.iter()
            .fold(ScopeState::empty(), |state, &id| {
                state.concat(self.reduce(id))
            })
    }

    fn reduce_opt(&self, id: Option<NodeId>) -> ScopeState {
        id.map_or_else(ScopeState::empty, |id| self.reduce(id))
    }

    fn reduce(&self, id: NodeId) -> ScopeState {
        match self.arena.get(id) {
            // Programs
            Node::Script {
                directives,
                statements,
            } => {
                let should_b33 = !self.has_use_strict(directives);
                self.fold(statements).finish(
                    self.arena,
                    id,
                    ScopeType::Script,
                    FinishOptions {
                        should_b33,
                        ..FinishOptions::default()
                    },
                )
            }
            Node::Module { items, .. } => self.fold(items).finish(
                self.arena,
                id,
                ScopeType::Module,
                FinishOptions::default(),
            ),

            // Statements
            Node::Block { statements } => {
                let hoistable = self.unnested_function_names(statements);
                self.fold(statements)
                    .with_potential_var_functions(hoistable)
                    .finish(self.arena, id, ScopeType::Block, FinishOptions::default())
            }
            Node::BlockStatement { block } => self.reduce(*block),
            Node::VariableDeclarationStatement { declaration } => {
                self.reduce(*declaration).without_bindings_for_parent()
            }
            Node::VariableDeclaration { kind, declarators } => self
                .fold(declarators)
                .add_declarations(DeclarationKind::from_var_decl_kind(*kind), true),
            Node::VariableDeclarator { binding, init } => {
                let state = self.reduce(*binding);
                match init {
                    Some(init) => state
                        .concat(self.reduce(*init))
                        .add_references(Accessibility::WRITE, true)
                        .merge_free_properties(),
                    None => state,
                }
            }
            Node::ExpressionStatement { expression } => self.reduce(*expression),
            Node::IfStatement {
                test,
                consequent,
                alternate,
            } => {
                // B.3.4: a bare function declaration as a branch acts
                // as if wrapped in a block.
                let state = self
                    .reduce(*test)
                    .concat(self.reduce_branch(*consequent));
                match alternate {
                    Some(alternate) => state.concat(self.reduce_branch(*alternate)),
                    None => state,
                }
            }
            Node::ForStatement {
                init,
                test,
                update,
                body,
            } => {
                let init_state = match init {
                    Some(init) => self.reduce(*init).without_bindings_for_parent(),
                    None => ScopeState::empty(),
                };
                init_state
                    .concat(self.reduce_opt(*test))
                    .concat(self.reduce_opt(*update))
                    .concat(self.reduce(*body))
                    .finish(self.arena, id, ScopeType::Block, FinishOptions::default())
            }
            Node::ForInStatement { left, right, body }
            | Node::ForOfStatement { left, right, body }
            | Node::ForAwaitStatement { left, right, body } => self
                .reduce(*left)
                .add_references(Accessibility::WRITE, false)
                .concat(self.reduce(*right))
                .concat(self.reduce(*body))
                .finish(self.arena, id, ScopeType::Block, FinishOptions::default()),
            Node::WhileStatement { test, body } => {
                self.reduce(*test).concat(self.reduce(*body))
            }
            Node::DoWhileStatement { body, test } => {
                self.reduce(*body).concat(self.reduce(*test))
            }
            Node::SwitchStatement {
                discriminant,
                cases,
            } => {
                let discriminant = self.reduce(*discriminant);
                let hoistable = self.case_function_names(cases.iter().copied());
                self.fold(cases)
                    .with_potential_var_functions(hoistable)
                    .finish(self.arena, id, ScopeType::Block, FinishOptions::default())
                    .concat(discriminant)
            }
            Node::SwitchStatementWithDefault {
                discriminant,
                pre_default_cases,
                default_case,
                post_default_cases,
            } => {
                let discriminant = self.reduce(*discriminant);
                let cases: Vec<NodeId> = pre_default_cases
                    .iter()
                    .copied()
                    .chain(std::iter::once(*default_case))
                    .chain(post_default_cases.iter().copied())
                    .collect();
                let hoistable = self.case_function_names(cases.iter().copied());
                self.fold(&cases)
                    .with_potential_var_functions(hoistable)
                    .finish(self.arena, id, ScopeType::Block, FinishOptions::default())
                    .concat(discriminant)
            }
            Node::SwitchCase { test, consequent } => {
                self.reduce(*test).concat(self.fold(consequent))
            }
            Node::SwitchDefault { consequent } => self.fold(consequent),
            Node::LabeledStatement { body, .. } => self.reduce(*body),
            Node::ReturnStatement { expression } | Node::YieldExpression { expression } => {
                self.reduce_opt(*expression)
            }
            Node::ThrowStatement { expression }
            | Node::YieldGeneratorExpression { expression }
            | Node::AwaitExpression { expression } => self.reduce(*expression),
            Node::TryCatchStatement { body, catch_clause } => {
                self.reduce(*body).concat(self.reduce(*catch_clause))
            }
            Node::TryFinallyStatement {
                body,
                catch_clause,
                finalizer,
            } => self
                .reduce(*body)
                .concat(self.reduce_opt(*catch_clause))
                .concat(self.reduce(*finalizer)),
            Node::CatchClause { binding, body } => self
                .reduce(*binding)
                .add_declarations(DeclarationKind::CatchParameter, false)
                .concat(self.reduce(*body))
                .finish(self.arena, id, ScopeType::Catch, FinishOptions::default()),
            Node::WithStatement { object, body } => {
                let body = self.reduce(*body).finish(
                    self.arena,
                    id,
                    ScopeType::With,
                    FinishOptions::default(),
                );
                self.reduce(*object).concat(body)
            }

            // Functions and classes
            Node::FunctionDeclaration {
                name, params, body, ..
            } => {
                let function =
                    self.finish_function(id, self.reduce(*params), self.reduce(*body));
                self.reduce(*name)
                    .concat(function)
                    .add_function_declaration()
            }
            Node::FunctionExpression {
                name, params, body, ..
            } => {
                let function =
                    self.finish_function(id, self.reduce(*params), self.reduce(*body));
                match name {
                    // A named function expression sees its own name in
                    // a scope of its own.
                    Some(name) => self
                        .reduce(*name)
                        .concat(function)
                        .add_declarations(DeclarationKind::FunctionName, false)
                        .finish(
                            self.arena,
                            id,
                            ScopeType::FunctionName,
                            FinishOptions::default(),
                        ),
                    None => function,
                }
            }
            Node::ArrowExpression { params, body, .. } => {
                self.finish_function(id, self.reduce(*params), self.reduce(*body))
            }
            Node::FunctionBody { statements, .. } => self.fold(statements),
            Node::FormalParameters { items, rest } => {
                let mut state = self.reduce_opt(*rest);
                for &item in items {
                    let mut item_state = self.reduce(item);
                    if item_state.has_parameter_expressions {
                        item_state = item_state.finish(
                            self.arena,
                            item,
                            ScopeType::ParameterExpression,
                            FinishOptions::default(),
                        );
                    }
                    state = state.concat(item_state);
                }
                state.add_declarations(DeclarationKind::Parameter, false)
            }
            Node::Method {
                name, params, body, ..
            } => {
                let function =
                    self.finish_function(id, self.reduce(*params), self.reduce(*body));
                self.reduce(*name).concat(function)
            }
            Node::Getter { name, body } => {
                let body = self.reduce(*body).finish(
                    self.arena,
                    id,
                    ScopeType::Function,
                    FinishOptions {
                        should_resolve_arguments: true,
                        should_b33: self.sloppy.contains(&id),
                        param_names_blocking_b33: Vec::new(),
                    },
                );
                self.reduce(*name).concat(body)
            }
            Node::Setter { name, param, body } => {
                let mut param_state = self.reduce(*param);
                if param_state.has_parameter_expressions {
                    param_state = param_state.finish(
                        self.arena,
                        id,
                        ScopeType::ParameterExpression,
                        FinishOptions::default(),
                    );
                }
                let param_state = param_state.add_declarations(DeclarationKind::Parameter, false);
                let function = self.finish_function(id, param_state, self.reduce(*body));
                self.reduce(*name).concat(function)
            }
            Node::ClassDeclaration {
                name,
                super_class,
                elements,
            } => {
                let inner = self
                    .reduce(*name)
                    .concat(self.reduce_opt(*super_class))
                    .concat(self.fold(elements))
                    .add_declarations(DeclarationKind::ClassName, false)
                    .finish(
                        self.arena,
                        id,
                        ScopeType::ClassName,
                        FinishOptions::default(),
                    );
                inner.concat(
                    self.reduce(*name)
                        .add_declarations(DeclarationKind::ClassDeclaration, false),
                )
            }
            Node::ClassExpression {
                name,
                super_class,
                elements,
            } => self
                .reduce_opt(*name)
                .concat(self.reduce_opt(*super_class))
                .concat(self.fold(elements))
                .add_declarations(DeclarationKind::ClassName, false)
                .finish(
                    self.arena,
                    id,
                    ScopeType::ClassName,
                    FinishOptions::default(),
                ),
            Node::ClassElement { method, .. } => self.reduce(*method),

            // Modules
            Node::Import {
                default_binding,
                named_imports,
                ..
            } => self
                .reduce_opt(*default_binding)
                .concat(self.fold(named_imports))
                .add_declarations(DeclarationKind::Import, false),
            Node::ImportNamespace {
                default_binding,
                namespace_binding,
                ..
            } => self
                .reduce_opt(*default_binding)
                .concat(self.reduce(*namespace_binding))
                .add_declarations(DeclarationKind::Import, false),
            Node::ImportSpecifier { binding, .. } => self.reduce(*binding),
            Node::ExportLocals { named_exports } => self.fold(named_exports),
            Node::ExportLocalSpecifier { name, .. } => self.reduce(*name),
            Node::Export { declaration } => self.reduce(*declaration),
            Node::ExportDefault { body } => self.reduce(*body),

            // Object and array literals
            Node::ObjectExpression { properties } => {
                self.fold(properties).wrap_free_properties()
            }
            Node::DataProperty { name, expression } => {
                let name_state = self.reduce(*name);
                let mut value_state = self.reduce(*expression);
                let key = self
                    .property_name_key(*name)
                    .unwrap_or_else(|| DYNAMIC_PROPERTY.to_string());
                let mut property = Property::new(key);
                if matches!(self.arena.get(*expression), Node::ObjectExpression { .. }) {
                    if let [PropertyCarry::Map(map)] = value_state.prp_for_parent.as_slice() {
                        property.properties = map.clone();
                    }
                }
                value_state.prp_for_parent.clear();
                name_state.concat(value_state).add_data_property(property)
            }
            Node::ShorthandProperty { name } => {
                let state = self.reduce(*name);
                match self.arena.get(*name) {
                    Node::IdentifierExpression { name } => {
                        let key = name.clone();
                        state.add_data_property(Property::new(key))
                    }
                    _ => state,
                }
            }
            Node::SpreadProperty { expression } => {
                let mut state = self.reduce(*expression);
                // Spread keys are unknowable; the payload is dropped.
                state.prp_for_parent.clear();
                state
            }
            Node::ComputedPropertyName { expression } => self.reduce(*expression),
            Node::ArrayExpression { elements } => {
                let mut state = ScopeState::empty();
                let mut carries = Vec::with_capacity(elements.len());
                for element in elements {
                    let Some(element) = element else {
                        carries.push(PropertyCarry::empty());
                        continue;
                    };
                    let mut element_state = self.reduce(*element);
                    let carry = match self.arena.get(*element) {
                        Node::ObjectExpression { .. } => {
                            match element_state.prp_for_parent.as_slice() {
                                [PropertyCarry::Map(map)] => PropertyCarry::Map(map.clone()),
                                _ => PropertyCarry::empty(),
                            }
                        }
                        Node::ArrayExpression { .. } => {
                            PropertyCarry::List(element_state.prp_for_parent.clone())
                        }
                        _ => PropertyCarry::empty(),
                    };
                    element_state.prp_for_parent.clear();
                    element_state.is_array_expr = false;
                    carries.push(carry);
                    state = state.concat(element_state);
                }
                state.prp_for_parent = carries;
                state.is_array_expr = true;
                state
            }
            Node::SpreadElement { expression } => self.reduce(*expression),

            // Expressions
            Node::IdentifierExpression { name } => {
                ScopeState::from_identifier_reference(name, id)
            }
            Node::CallExpression { callee, arguments } => {
                let mut state = self.reduce(*callee).concat(self.fold(arguments));
                // A call result is not a trackable receiver: `f().x`
                // says nothing about properties of `f`.
                state.last_binding = None;
                // Only a direct `eval(...)` makes enclosing scopes
                // dynamic; `window.eval` and aliases do not.
                let direct_eval = matches!(
                    self.arena.get(*callee),
                    Node::IdentifierExpression { name } if name == "eval"
                );
                if direct_eval {
                    state.taint()
                } else {
                    state
                }
            }
            Node::NewExpression { callee, arguments } => {
                let mut state = self.reduce(*callee).concat(self.fold(arguments));
                state.last_binding = None;
                state
            }
            Node::StaticMemberExpression { object, property } => {
                let property = Property::with_references(
                    property,
                    vec![Reference::new(id, Accessibility::PROPERTY_READ)],
                );
                self.reduce(*object).add_property(property, id)
            }
            Node::ComputedMemberExpression { object, expression } => {
                let key = self
                    .computed_key(*expression)
                    .unwrap_or_else(|| DYNAMIC_PROPERTY.to_string());
                let property = Property::with_references(
                    key,
                    vec![Reference::new(id, Accessibility::PROPERTY_READ)],
                );
                self.reduce(*object)
                    .concat(self.reduce(*expression))
                    .add_property(property, id)
                    .with_parameter_expressions()
            }
            Node::AssignmentExpression {
                binding,
                expression,
            } => self
                .reduce(*binding)
                .add_references(Accessibility::WRITE, true)
                .concat(self.reduce(*expression))
                .merge_object_assignment()
                .merge_free_properties()
                .without_ats_for_parent(),
            Node::CompoundAssignmentExpression {
                binding,
                expression,
                ..
            } => self
                .reduce(*binding)
                .add_references(Accessibility::READWRITE, false)
                .concat(self.reduce(*expression)),
            Node::UnaryExpression {
                operator: UnaryOperator::Delete,
                operand,
            } => match self.arena.get(*operand) {
                Node::IdentifierExpression { name } => {
                    ScopeState::from_identifier_delete(name, *operand)
                }
                node if node.is_member_expression() => {
                    self.reduce(*operand).mark_last_property_deleted()
                }
                _ => self.reduce(*operand),
            },
            Node::UnaryExpression { operand, .. } => self.reduce(*operand),
            Node::UpdateExpression { operand, .. } => self
                .reduce(*operand)
                .add_references(Accessibility::READWRITE, false),
            Node::BinaryExpression { left, right, .. } => {
                self.reduce(*left).concat(self.reduce(*right))
            }
            Node::ConditionalExpression {
                test,
                consequent,
                alternate,
            } => self
                .reduce(*test)
                .concat(self.reduce(*consequent))
                .concat(self.reduce(*alternate)),
            Node::TemplateExpression { tag, elements } => {
                self.reduce_opt(*tag).concat(self.fold(elements))
            }

            // Binding patterns
            Node::BindingIdentifier { name } => {
                if name == DEFAULT_EXPORT {
                    return ScopeState::empty();
                }
                let mut state = ScopeState::empty();
                state.bindings_for_parent = BindingList::single(Binding::new(name, id));
                state
            }
            Node::BindingWithDefault { binding, init } => self
                .reduce(*binding)
                .concat(self.reduce(*init))
                .with_parameter_expressions(),
            Node::ArrayBinding { elements, rest } => {
                self.reduce_array_pattern(elements, *rest, PatternSide::Binding)
            }
            Node::ObjectBinding { properties, rest } => {
                let mut state = self.fold(properties);
                if let Some(rest) = rest {
                    let mut rest_state = self.reduce(*rest);
                    rest_state.bindings_for_parent = rest_state
                        .bindings_for_parent
                        .map_leaves(&|binding| binding.set_rest());
                    state = state.concat(rest_state);
                }
                // Property forwarding through object binding patterns
                // is not tracked; see merge_object_assignment for the
                // assignment-target form.
                state.bindings_for_parent = state
                    .bindings_for_parent
                    .map_leaves(&|binding| binding.reject_properties());
                state
            }
            Node::BindingPropertyIdentifier { binding, init } => {
                let state = self.reduce(*binding).concat(self.reduce_opt(*init));
                if init.is_some() {
                    state.with_parameter_expressions()
                } else {
                    state
                }
            }
            Node::BindingPropertyProperty { name, binding } => {
                let state = self.reduce(*name).concat(self.reduce(*binding));
                if matches!(self.arena.get(*name), Node::ComputedPropertyName { .. }) {
                    state.with_parameter_expressions()
                } else {
                    state
                }
            }

            // Assignment targets
            Node::AssignmentTargetIdentifier { name } => {
                let mut state = ScopeState::empty();
                state.ats_for_parent = BindingList::single(Binding::new(name, id));
                state
            }
            Node::StaticMemberAssignmentTarget { object, property } => {
                let mut state = self
                    .reduce(*object)
                    .add_property(Property::new(property), id);
                if let Some(last) = state.last_binding.clone() {
                    state.ats_for_parent.push(last);
                }
                state
            }
            Node::ComputedMemberAssignmentTarget { object, expression } => {
                let key = self
                    .computed_key(*expression)
                    .unwrap_or_else(|| DYNAMIC_PROPERTY.to_string());
                let property = Property::with_references(
                    key,
                    vec![Reference::new(id, Accessibility::PROPERTY_WRITE)],
                );
                self.reduce(*object)
                    .concat(self.reduce(*expression))
                    .add_property(property, id)
                    .with_parameter_expressions()
            }
            Node::ArrayAssignmentTarget { elements, rest } => {
                self.reduce_array_pattern(elements, *rest, PatternSide::Target)
            }
            Node::ObjectAssignmentTarget { properties, rest } => {
                let mut state = self.fold(properties);
                if let Some(rest) = rest {
                    let mut rest_state = self.reduce(*rest);
                    rest_state.ats_for_parent = rest_state
                        .ats_for_parent
                        .map_leaves(&|binding| binding.set_rest());
                    state = state.concat(rest_state);
                }
                state.is_object_at = true;
                state
            }
            Node::AssignmentTargetPropertyIdentifier { binding, init } => {
                self.reduce(*binding).concat(self.reduce_opt(*init))
            }
            Node::AssignmentTargetPropertyProperty { name, binding } => {
                self.reduce(*name).concat(self.reduce(*binding))
            }
            Node::AssignmentTargetWithDefault { binding, init } => {
                self.reduce(*binding).concat(self.reduce(*init))
            }

            // Leaves with no scope effect
            Node::Directive { .. }
            | Node::EmptyStatement
            | Node::DebuggerStatement
            | Node::BreakStatement { .. }
            | Node::ContinueStatement { .. }
            | Node::ExportAllFrom { .. }
            | Node::ExportFrom { .. }
            | Node::ExportFromSpecifier { .. }
            | Node::StaticPropertyName { .. }
            | Node::ThisExpression
            | Node::NewTargetExpression
            | Node::SuperExpression
            | Node::LiteralStringExpression { .. }
            | Node::LiteralNumericExpression { .. }
            | Node::LiteralBooleanExpression { .. }
            | Node::LiteralNullExpression
            | Node::LiteralInfinityExpression
            | Node::LiteralRegExpExpression { .. }
            | Node::TemplateElement { .. } => ScopeState::empty(),
        }
    }

    /// `finishFunction`: close a function's parameter and body scopes.
    /// Parameter expressions force the split arrangement where the body
    /// scope nests inside a parameter scope; otherwise parameters and
    /// body share one scope.
    fn finish_function(
        &self,
        fn_node: NodeId,
        params: ScopeState,
        body: ScopeState,
    ) -> ScopeState {
        let is_arrow = matches!(self.arena.get(fn_node), Node::ArrowExpression { .. });
        let fn_type = if is_arrow {
            ScopeType::ArrowFunction
        } else {
            ScopeType::Function
        };
        let should_b33 = self.sloppy.contains(&fn_node);
        if params.has_parameter_expressions {
            let blocking = params.function_scoped_declaration_names();
            let body = body.finish(
                self.arena,
                fn_node,
                fn_type,
                FinishOptions {
                    should_resolve_arguments: false,
                    should_b33,
                    param_names_blocking_b33: blocking,
                },
            );
            params.without_parameter_expressions().concat(body).finish(
                self.arena,
                fn_node,
                ScopeType::Parameters,
                FinishOptions {
                    should_resolve_arguments: !is_arrow,
                    ..FinishOptions::default()
                },
            )
        } else {
            params.concat(body).finish(
                self.arena,
                fn_node,
                fn_type,
                FinishOptions {
                    should_resolve_arguments: !is_arrow,
                    should_b33,
                    param_names_blocking_b33: Vec::new(),
                },
            )
        }
    }

    /// Shared reduction of array binding patterns and array assignment
    /// targets: flat leaf slots, nested patterns grouped so positional
    /// property pairing can recurse, rest slot marked.
    fn reduce_array_pattern(
        &self,
        elements: &[Option<NodeId>],
        rest: Option<NodeId>,
        side: PatternSide,
    ) -> ScopeState {
        let mut state = ScopeState::empty();
        let mut slots = BindingList::new();
        for element in elements.iter().flatten() {
            let mut element_state = self.reduce(*element);
            let pending = side.take_pending(&mut element_state);
            if element_state.is_array_at || element_state.is_object_at {
                element_state.is_array_at = false;
                element_state.is_object_at = false;
                slots.push_group(pending);
            } else {
                slots = slots.merge(pending);
            }
            state = state.concat(element_state);
        }
        if let Some(rest) = rest {
            let mut rest_state = self.reduce(rest);
            let pending = side.take_pending(&mut rest_state);
            if rest_state.is_array_at || rest_state.is_object_at {
                rest_state.is_array_at = false;
                rest_state.is_object_at = false;
                let mut group = pending;
                group.is_rest = true;
                slots.push_group(group);
            } else {
                // A plain rest target takes the array remainder, which
                // carries no statically known properties.
                slots = slots.merge(
                    pending.map_leaves(&|binding| binding.set_rest().reject_properties()),
                );
            }
            state = state.concat(rest_state);
        }
        side.put_pending(&mut state, slots);
        state.is_array_at = true;
        state
    }

    fn has_use_strict(&self, directives: &[NodeId]) -> bool {
        directives.iter().any(|&id| {
            matches!(
                self.arena.get(id),
                Node::Directive { raw_value } if raw_value == "use strict"
            )
        })
    }

    /// The name of `statement` if it is a plain (non-generator,
    /// non-async) function declaration, looking through labels.
    fn as_simple_function_declaration(&self, statement: NodeId) -> Option<(String, NodeId)> {
        match self.arena.get(statement) {
            Node::FunctionDeclaration {
                name,
                is_async: false,
                is_generator: false,
                ..
            } => match self.arena.get(*name) {
                Node::BindingIdentifier { name: text } => Some((text.clone(), *name)),
                _ => None,
            },
            Node::LabeledStatement { body, .. } => self.as_simple_function_declaration(*body),
            _ => None,
        }
    }

    /// B.3.3 candidates among `statements`: plain function declarations
    /// whose name appears exactly once at this level.
    fn unnested_function_names(&self, statements: &[NodeId]) -> Vec<(String, NodeId)> {
        let all: Vec<(String, NodeId)> = statements
            .iter()
            .filter_map(|&statement| self.as_simple_function_declaration(statement))
            .collect();
        all.iter()
            .filter(|(name, _)| all.iter().filter(|(other, _)| other == name).count() == 1)
            .cloned()
            .collect()
    }

    fn case_function_names(
        &self,
        cases: impl Iterator<Item = NodeId>,
    ) -> Vec<(String, NodeId)> {
        let mut statements = Vec::new();
        for case in cases {
            match self.arena.get(case) {
                Node::SwitchCase { consequent, .. } | Node::SwitchDefault { consequent } => {
                    statements.extend_from_slice(consequent);
                }
                _ => {}
            }
        }
        self.unnested_function_names(&statements)
    }

    fn reduce_branch(&self, statement: NodeId) -> ScopeState {
        match self.as_simple_function_declaration(statement) {
            Some(hoistable) => self
                .reduce(statement)
                .with_potential_var_functions(vec![hoistable])
                .finish(
                    self.arena,
                    statement,
                    ScopeType::Block,
                    FinishOptions::default(),
                ),
            None => self.reduce(statement),
        }
    }

    /// Statically known key of a computed access, normalized the way
    /// the runtime would stringify it. `None` means dynamic.
    fn computed_key(&self, expression: NodeId) -> Option<String> {
        match self.arena.get(expression) {
            Node::LiteralStringExpression { value } => Some(value.clone()),
            Node::LiteralNumericExpression { value } => Some(number_to_string(*value)),
            Node::LiteralBooleanExpression { value } => Some(value.to_string()),
            Node::LiteralNullExpression => Some("null".to_string()),
            Node::LiteralInfinityExpression => Some("Infinity".to_string()),
            _ => None,
        }
    }

    fn property_name_key(&self, name: NodeId) -> Option<String> {
        match self.arena.get(name) {
            Node::StaticPropertyName { value } => Some(value.clone()),
            Node::ComputedPropertyName { expression } => self.computed_key(*expression),
            _ => None,
        }
    }
}

/// Which pending list an array pattern populates.
#[derive(Clone, Copy)]
enum PatternSide {
    Binding,
    Target,
}

impl PatternSide {
    fn take_pending(self, state: &mut ScopeState) -> BindingList {
        match self {
            PatternSide::Binding => std::mem::take(&mut state.bindings_for_parent),
            PatternSide::Target => std::mem::take(&mut state.ats_for_parent),
        }
    }

    fn put_pending(self, state: &mut ScopeState, slots: BindingList) {
        match self {
            PatternSide::Binding => state.bindings_for_parent = slots,
            PatternSide::Target => state.ats_for_parent = slots,
        }
    }
}

/// ECMAScript number-to-string for the keys that appear in computed
/// accesses; integral values print without a fraction.
fn number_to_string(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_keys_normalize_like_the_runtime() {
        assert_eq!(number_to_string(55.0), "55");
        assert_eq!(number_to_string(-3.0), "-3");
        assert_eq!(number_to_string(0.0), "0");
        assert_eq!(number_to_string(-0.0), "0");
        assert_eq!(number_to_string(1.5), "1.5");
        assert_eq!(number_to_string(f64::INFINITY), "Infinity");
    }
}
