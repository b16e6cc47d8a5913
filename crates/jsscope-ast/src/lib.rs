//! Arena-allocated ECMAScript AST for the jsscope analyzer.
//!
//! This crate provides the tree the scope analyzer consumes:
//! - `NodeId` - A cheap, copyable handle into the arena
//! - `NodeArena` - Flat storage for all nodes of one program
//! - `Node` - The closed sum type of ECMAScript node shapes
//!
//! The node grammar follows the Shift AST: statements, expressions,
//! binding patterns, and assignment targets are distinct node kinds, so
//! a consumer can match exhaustively without re-deriving syntactic
//! context. Producing this tree from source text (parsing) is out of
//! scope here; the arena exposes typed construction methods instead.

pub mod arena;
pub mod node;
pub mod visit;

mod builder;

pub use arena::{NodeArena, NodeId};
pub use visit::for_each_child;
pub use node::{
    BinaryOperator, CompoundAssignmentOperator, Node, UnaryOperator, UpdateOperator,
    VariableDeclarationKind,
};
