//! The closed sum type of ECMAScript AST node shapes.
//!
//! One variant per Shift-grammar node kind the analyzer handles. Child
//! links are `NodeId` handles into the owning `NodeArena`; lists keep
//! source order, and array patterns use `Option<NodeId>` slots so holes
//! (`[a, , b]`) survive.

use crate::arena::NodeId;

/// `var` / `let` / `const` on a variable declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableDeclarationKind {
    Var,
    Let,
    Const,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Plus,
    Minus,
    LogicalNot,
    BitwiseNot,
    TypeOf,
    Void,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOperator {
    Increment,
    Decrement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
    Equals,
    NotEquals,
    StrictEquals,
    StrictNotEquals,
    LessThan,
    LessThanEqual,
    GreaterThan,
    GreaterThanEqual,
    In,
    Instanceof,
    LeftShift,
    RightShift,
    UnsignedRightShift,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    LogicalAnd,
    LogicalOr,
    Coalesce,
    Comma,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompoundAssignmentOperator {
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    RemAssign,
    PowAssign,
    LeftShiftAssign,
    RightShiftAssign,
    UnsignedRightShiftAssign,
    BitwiseAndAssign,
    BitwiseOrAssign,
    BitwiseXorAssign,
    LogicalAndAssign,
    LogicalOrAssign,
    CoalesceAssign,
}

/// An ECMAScript AST node.
///
/// Statement/expression/binding/assignment-target kinds are separate
/// variants (Shift style), so scope analysis can dispatch on the node
/// alone. All child references are arena handles.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    // Programs
    Script {
        directives: Vec<NodeId>,
        statements: Vec<NodeId>,
    },
    Module {
        directives: Vec<NodeId>,
        items: Vec<NodeId>,
    },
    Directive {
        raw_value: String,
    },

    // Statements
    BlockStatement {
        block: NodeId,
    },
    Block {
        statements: Vec<NodeId>,
    },
    VariableDeclarationStatement {
        declaration: NodeId,
    },
    VariableDeclaration {
        kind: VariableDeclarationKind,
        declarators: Vec<NodeId>,
    },
    VariableDeclarator {
        binding: NodeId,
        init: Option<NodeId>,
    },
    EmptyStatement,
    ExpressionStatement {
        expression: NodeId,
    },
    IfStatement {
        test: NodeId,
        consequent: NodeId,
        alternate: Option<NodeId>,
    },
    ForStatement {
        init: Option<NodeId>,
        test: Option<NodeId>,
        update: Option<NodeId>,
        body: NodeId,
    },
    ForInStatement {
        left: NodeId,
        right: NodeId,
        body: NodeId,
    },
    ForOfStatement {
        left: NodeId,
        right: NodeId,
        body: NodeId,
    },
    ForAwaitStatement {
        left: NodeId,
        right: NodeId,
        body: NodeId,
    },
    WhileStatement {
        test: NodeId,
        body: NodeId,
    },
    DoWhileStatement {
        body: NodeId,
        test: NodeId,
    },
    SwitchStatement {
        discriminant: NodeId,
        cases: Vec<NodeId>,
    },
    SwitchStatementWithDefault {
        discriminant: NodeId,
        pre_default_cases: Vec<NodeId>,
        default_case: NodeId,
        post_default_cases: Vec<NodeId>,
    },
    SwitchCase {
        test: NodeId,
        consequent: Vec<NodeId>,
    },
    SwitchDefault {
        consequent: Vec<NodeId>,
    },
    LabeledStatement {
        label: String,
        body: NodeId,
    },
    ReturnStatement {
        expression: Option<NodeId>,
    },
    BreakStatement {
        label: Option<String>,
    },
    ContinueStatement {
        label: Option<String>,
    },
    ThrowStatement {
        expression: NodeId,
    },
    TryCatchStatement {
        body: NodeId,
        catch_clause: NodeId,
    },
    TryFinallyStatement {
        body: NodeId,
        catch_clause: Option<NodeId>,
        finalizer: NodeId,
    },
    CatchClause {
        binding: NodeId,
        body: NodeId,
    },
    WithStatement {
        object: NodeId,
        body: NodeId,
    },
    DebuggerStatement,
    FunctionDeclaration {
        name: NodeId,
        is_async: bool,
        is_generator: bool,
        params: NodeId,
        body: NodeId,
    },
    ClassDeclaration {
        name: NodeId,
        super_class: Option<NodeId>,
        elements: Vec<NodeId>,
    },
    ClassExpression {
        name: Option<NodeId>,
        super_class: Option<NodeId>,
        elements: Vec<NodeId>,
    },
    ClassElement {
        is_static: bool,
        method: NodeId,
    },

    // Modules
    Import {
        module_specifier: String,
        default_binding: Option<NodeId>,
        named_imports: Vec<NodeId>,
    },
    ImportNamespace {
        module_specifier: String,
        default_binding: Option<NodeId>,
        namespace_binding: NodeId,
    },
    ImportSpecifier {
        name: Option<String>,
        binding: NodeId,
    },
    ExportAllFrom {
        module_specifier: String,
    },
    ExportFrom {
        named_exports: Vec<NodeId>,
        module_specifier: String,
    },
    ExportFromSpecifier {
        name: String,
        exported_name: Option<String>,
    },
    ExportLocals {
        named_exports: Vec<NodeId>,
    },
    ExportLocalSpecifier {
        name: NodeId,
        exported_name: Option<String>,
    },
    Export {
        declaration: NodeId,
    },
    ExportDefault {
        body: NodeId,
    },

    // Functions
    FunctionExpression {
        name: Option<NodeId>,
        is_async: bool,
        is_generator: bool,
        params: NodeId,
        body: NodeId,
    },
    ArrowExpression {
        is_async: bool,
        params: NodeId,
        body: NodeId,
    },
    FunctionBody {
        directives: Vec<NodeId>,
        statements: Vec<NodeId>,
    },
    FormalParameters {
        items: Vec<NodeId>,
        rest: Option<NodeId>,
    },
    Method {
        name: NodeId,
        is_async: bool,
        is_generator: bool,
        params: NodeId,
        body: NodeId,
    },
    Getter {
        name: NodeId,
        body: NodeId,
    },
    Setter {
        name: NodeId,
        param: NodeId,
        body: NodeId,
    },

    // Object literals
    ObjectExpression {
        properties: Vec<NodeId>,
    },
    DataProperty {
        name: NodeId,
        expression: NodeId,
    },
    ShorthandProperty {
        name: NodeId,
    },
    SpreadProperty {
        expression: NodeId,
    },
    StaticPropertyName {
        value: String,
    },
    ComputedPropertyName {
        expression: NodeId,
    },

    // Expressions
    IdentifierExpression {
        name: String,
    },
    ThisExpression,
    NewTargetExpression,
    SuperExpression,
    LiteralStringExpression {
        value: String,
    },
    LiteralNumericExpression {
        value: f64,
    },
    LiteralBooleanExpression {
        value: bool,
    },
    LiteralNullExpression,
    LiteralInfinityExpression,
    LiteralRegExpExpression {
        pattern: String,
        flags: String,
    },
    TemplateExpression {
        tag: Option<NodeId>,
        elements: Vec<NodeId>,
    },
    TemplateElement {
        raw_value: String,
    },
    ArrayExpression {
        elements: Vec<Option<NodeId>>,
    },
    SpreadElement {
        expression: NodeId,
    },
    CallExpression {
        callee: NodeId,
        arguments: Vec<NodeId>,
    },
    NewExpression {
        callee: NodeId,
        arguments: Vec<NodeId>,
    },
    StaticMemberExpression {
        object: NodeId,
        property: String,
    },
    ComputedMemberExpression {
        object: NodeId,
        expression: NodeId,
    },
    AssignmentExpression {
        binding: NodeId,
        expression: NodeId,
    },
    CompoundAssignmentExpression {
        operator: CompoundAssignmentOperator,
        binding: NodeId,
        expression: NodeId,
    },
    BinaryExpression {
        operator: BinaryOperator,
        left: NodeId,
        right: NodeId,
    },
    UnaryExpression {
        operator: UnaryOperator,
        operand: NodeId,
    },
    UpdateExpression {
        is_prefix: bool,
        operator: UpdateOperator,
        operand: NodeId,
    },
    ConditionalExpression {
        test: NodeId,
        consequent: NodeId,
        alternate: NodeId,
    },
    YieldExpression {
        expression: Option<NodeId>,
    },
    YieldGeneratorExpression {
        expression: NodeId,
    },
    AwaitExpression {
        expression: NodeId,
    },

    // Binding patterns
    BindingIdentifier {
        name: String,
    },
    BindingWithDefault {
        binding: NodeId,
        init: NodeId,
    },
    ArrayBinding {
        elements: Vec<Option<NodeId>>,
        rest: Option<NodeId>,
    },
    ObjectBinding {
        properties: Vec<NodeId>,
        rest: Option<NodeId>,
    },
    BindingPropertyIdentifier {
        binding: NodeId,
        init: Option<NodeId>,
    },
    BindingPropertyProperty {
        name: NodeId,
        binding: NodeId,
    },

    // Assignment targets
    AssignmentTargetIdentifier {
        name: String,
    },
    StaticMemberAssignmentTarget {
        object: NodeId,
        property: String,
    },
    ComputedMemberAssignmentTarget {
        object: NodeId,
        expression: NodeId,
    },
    ArrayAssignmentTarget {
        elements: Vec<Option<NodeId>>,
        rest: Option<NodeId>,
    },
    ObjectAssignmentTarget {
        properties: Vec<NodeId>,
        rest: Option<NodeId>,
    },
    AssignmentTargetPropertyIdentifier {
        binding: NodeId,
        init: Option<NodeId>,
    },
    AssignmentTargetPropertyProperty {
        name: NodeId,
        binding: NodeId,
    },
    AssignmentTargetWithDefault {
        binding: NodeId,
        init: NodeId,
    },
}

impl Node {
    /// Variant name, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Script { .. } => "Script",
            Node::Module { .. } => "Module",
            Node::Directive { .. } => "Directive",
            Node::BlockStatement { .. } => "BlockStatement",
            Node::Block { .. } => "Block",
            Node::VariableDeclarationStatement { .. } => "VariableDeclarationStatement",
            Node::VariableDeclaration { .. } => "VariableDeclaration",
            Node::VariableDeclarator { .. } => "VariableDeclarator",
            Node::EmptyStatement => "EmptyStatement",
            Node::ExpressionStatement { .. } => "ExpressionStatement",
            Node::IfStatement { .. } => "IfStatement",
            Node::ForStatement { .. } => "ForStatement",
            Node::ForInStatement { .. } => "ForInStatement",
            Node::ForOfStatement { .. } => "ForOfStatement",
            Node::ForAwaitStatement { .. } => "ForAwaitStatement",
            Node::WhileStatement { .. } => "WhileStatement",
            Node::DoWhileStatement { .. } => "DoWhileStatement",
            Node::SwitchStatement { .. } => "SwitchStatement",
            Node::SwitchStatementWithDefault { .. } => "SwitchStatementWithDefault",
            Node::SwitchCase { .. } => "SwitchCase",
            Node::SwitchDefault { .. } => "SwitchDefault",
            Node::LabeledStatement { .. } => "LabeledStatement",
            Node::ReturnStatement { .. } => "ReturnStatement",
            Node::BreakStatement { .. } => "BreakStatement",
            Node::ContinueStatement { .. } => "ContinueStatement",
            Node::ThrowStatement { .. } => "ThrowStatement",
            Node::TryCatchStatement { .. } => "TryCatchStatement",
            Node::TryFinallyStatement { .. } => "TryFinallyStatement",
            Node::CatchClause { .. } => "CatchClause",
            Node::WithStatement { .. } => "WithStatement",
            Node::DebuggerStatement => "DebuggerStatement",
            Node::FunctionDeclaration { .. } => "FunctionDeclaration",
            Node::ClassDeclaration { .. } => "ClassDeclaration",
            Node::ClassExpression { .. } => "ClassExpression",
            Node::ClassElement { .. } => "ClassElement",
            Node::Import { .. } => "Import",
            Node::ImportNamespace { .. } => "ImportNamespace",
            Node::ImportSpecifier { .. } => "ImportSpecifier",
            Node::ExportAllFrom { .. } => "ExportAllFrom",
            Node::ExportFrom { .. } => "ExportFrom",
            Node::ExportFromSpecifier { .. } => "ExportFromSpecifier",
            Node::ExportLocals { .. } => "ExportLocals",
            Node::ExportLocalSpecifier { .. } => "ExportLocalSpecifier",
            Node::Export { .. } => "Export",
            Node::ExportDefault { .. } => "ExportDefault",
            Node::FunctionExpression { .. } => "FunctionExpression",
            Node::ArrowExpression { .. } => "ArrowExpression",
            Node::FunctionBody { .. } => "FunctionBody",
            Node::FormalParameters { .. } => "FormalParameters",
            Node::Method { .. } => "Method",
            Node::Getter { .. } => "Getter",
            Node::Setter { .. } => "Setter",
            Node::ObjectExpression { .. } => "ObjectExpression",
            Node::DataProperty { .. } => "DataProperty",
            Node::ShorthandProperty { .. } => "ShorthandProperty",
            Node::SpreadProperty { .. } => "SpreadProperty",
            Node::StaticPropertyName { .. } => "StaticPropertyName",
            Node::ComputedPropertyName { .. } => "ComputedPropertyName",
            Node::IdentifierExpression { .. } => "IdentifierExpression",
            Node::ThisExpression => "ThisExpression",
            Node::NewTargetExpression => "NewTargetExpression",
            Node::SuperExpression => "SuperExpression",
            Node::LiteralStringExpression { .. } => "LiteralStringExpression",
            Node::LiteralNumericExpression { .. } => "LiteralNumericExpression",
            Node::LiteralBooleanExpression { .. } => "LiteralBooleanExpression",
            Node::LiteralNullExpression => "LiteralNullExpression",
            Node::LiteralInfinityExpression => "LiteralInfinityExpression",
            Node::LiteralRegExpExpression { .. } => "LiteralRegExpExpression",
            Node::TemplateExpression { .. } => "TemplateExpression",
            Node::TemplateElement { .. } => "TemplateElement",
            Node::ArrayExpression { .. } => "ArrayExpression",
            Node::SpreadElement { .. } => "SpreadElement",
            Node::CallExpression { .. } => "CallExpression",
            Node::NewExpression { .. } => "NewExpression",
            Node::StaticMemberExpression { .. } => "StaticMemberExpression",
            Node::ComputedMemberExpression { .. } => "ComputedMemberExpression",
            Node::AssignmentExpression { .. } => "AssignmentExpression",
            Node::CompoundAssignmentExpression { .. } => "CompoundAssignmentExpression",
            Node::BinaryExpression { .. } => "BinaryExpression",
            Node::UnaryExpression { .. } => "UnaryExpression",
            Node::UpdateExpression { .. } => "UpdateExpression",
            Node::ConditionalExpression { .. } => "ConditionalExpression",
            Node::YieldExpression { .. } => "YieldExpression",
            Node::YieldGeneratorExpression { .. } => "YieldGeneratorExpression",
            Node::AwaitExpression { .. } => "AwaitExpression",
            Node::BindingIdentifier { .. } => "BindingIdentifier",
            Node::BindingWithDefault { .. } => "BindingWithDefault",
            Node::ArrayBinding { .. } => "ArrayBinding",
            Node::ObjectBinding { .. } => "ObjectBinding",
            Node::BindingPropertyIdentifier { .. } => "BindingPropertyIdentifier",
            Node::BindingPropertyProperty { .. } => "BindingPropertyProperty",
            Node::AssignmentTargetIdentifier { .. } => "AssignmentTargetIdentifier",
            Node::StaticMemberAssignmentTarget { .. } => "StaticMemberAssignmentTarget",
            Node::ComputedMemberAssignmentTarget { .. } => "ComputedMemberAssignmentTarget",
            Node::ArrayAssignmentTarget { .. } => "ArrayAssignmentTarget",
            Node::ObjectAssignmentTarget { .. } => "ObjectAssignmentTarget",
            Node::AssignmentTargetPropertyIdentifier { .. } => "AssignmentTargetPropertyIdentifier",
            Node::AssignmentTargetPropertyProperty { .. } => "AssignmentTargetPropertyProperty",
            Node::AssignmentTargetWithDefault { .. } => "AssignmentTargetWithDefault",
        }
    }

    pub fn is_member_expression(&self) -> bool {
        matches!(
            self,
            Node::StaticMemberExpression { .. } | Node::ComputedMemberExpression { .. }
        )
    }

    /// True for every literal expression kind. Used when classifying
    /// computed member keys.
    pub fn is_literal_expression(&self) -> bool {
        matches!(
            self,
            Node::LiteralStringExpression { .. }
                | Node::LiteralNumericExpression { .. }
                | Node::LiteralBooleanExpression { .. }
                | Node::LiteralNullExpression
                | Node::LiteralInfinityExpression
                | Node::LiteralRegExpExpression { .. }
        )
    }
}
