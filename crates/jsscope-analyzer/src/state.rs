//! The bottom-up accumulator.
//!
//! Every AST node reduces to a `ScopeState`; sibling states combine with
//! [`ScopeState::concat`], and scope-introducing nodes seal the
//! accumulated facts into a [`Scope`] with [`ScopeState::finish`].
//! `concat` is associative with [`ScopeState::empty`] as identity, so
//! reduction order within a node never changes the result beyond the
//! documented insertion ordering.

use jsscope_ast::{Node, NodeArena, NodeId};
use tracing::debug;

use crate::declaration::{Declaration, DeclarationKind, DeclarationMultiMap};
use crate::reference::{Accessibility, Reference};
use crate::scope::{Scope, ScopeType, VariableMap};
use crate::variable::{
    merge_property_maps, Binding, BindingItem, BindingList, Property, PropertyCarry, PropertyMap,
    Variable,
};

/// Carried into `finish` by the function machinery.
#[derive(Debug, Clone, Default)]
pub(crate) struct FinishOptions {
    /// Synthesize an `arguments` binding in this scope.
    pub should_resolve_arguments: bool,
    /// Annex B.3.3: hoist eligible block-level function declarations
    /// into this scope.
    pub should_b33: bool,
    /// Parameter names that shadow, and therefore block, B.3.3 hoisting
    /// for same-named candidates.
    pub param_names_blocking_b33: Vec<String>,
}

/// Everything known about the subtree reduced so far.
///
/// Fields ending in `_for_parent` are handshakes: a child publishes
/// pending bindings, assignment targets, or data properties, and the
/// nearest interested ancestor consumes and clears them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScopeState {
    /// Identifier uses not yet matched to a declaration, keyed by name.
    /// Values are declaration-less `Variable`s carrying references and
    /// observed properties.
    pub free_identifiers: VariableMap,
    /// Data properties of an object literal, pending `wrap_free_properties`.
    pub free_properties: PropertyMap,
    pub function_scoped_declarations: DeclarationMultiMap,
    pub block_scoped_declarations: DeclarationMultiMap,
    /// Function declarations, kept apart so `finish` can weigh them for
    /// Annex B.3.3.
    pub function_declarations: DeclarationMultiMap,
    /// B.3.3 candidates flowing upward until a conflicting declaration
    /// kills them or a function-level scope adopts them.
    pub potentially_var_scoped_function_declarations: DeclarationMultiMap,
    /// Fully built scopes of already-finished subtrees.
    pub children: Vec<Scope>,
    /// Direct `eval` was seen somewhere in this subtree.
    pub dynamic: bool,
    /// Bindings from declaration patterns awaiting a declaring ancestor.
    pub bindings_for_parent: BindingList,
    /// Assignment targets awaiting the assignment that writes them.
    pub ats_for_parent: BindingList,
    pub has_parameter_expressions: bool,
    /// Route to the innermost object of the member chain currently
    /// being reduced; `add_property` extends it one level at a time.
    pub last_binding: Option<Binding>,
    /// Property payloads an object/array literal offers to a
    /// destructuring consumer, one carry per literal (or per array
    /// element, for `is_array_expr` states).
    pub prp_for_parent: Vec<PropertyCarry>,
    /// Shape tags for pairing decisions in the property-merge step.
    pub is_array_at: bool,
    pub is_array_expr: bool,
    pub is_object_at: bool,
}

impl ScopeState {
    pub fn empty() -> ScopeState {
        ScopeState::default()
    }

    /// Monoid append. Pointwise union of every accumulator; insertion
    /// orders follow `self` then `other`, and `last_binding` keeps the
    /// first non-empty side.
    pub fn concat(mut self, other: ScopeState) -> ScopeState {
        for (name, variable) in other.free_identifiers {
            match self.free_identifiers.shift_remove(&name) {
                Some(existing) => {
                    self.free_identifiers.insert(name, existing.merge(variable));
                }
                None => {
                    self.free_identifiers.insert(name, variable);
                }
            }
        }
        self.free_properties = merge_property_maps(self.free_properties, other.free_properties);
        self.function_scoped_declarations
            .extend(&other.function_scoped_declarations);
        self.block_scoped_declarations
            .extend(&other.block_scoped_declarations);
        self.function_declarations
            .extend(&other.function_declarations);
        self.potentially_var_scoped_function_declarations
            .extend(&other.potentially_var_scoped_function_declarations);
        self.children.extend(other.children);
        self.dynamic |= other.dynamic;
        self.bindings_for_parent = self.bindings_for_parent.merge(other.bindings_for_parent);
        self.ats_for_parent = self.ats_for_parent.merge(other.ats_for_parent);
        self.has_parameter_expressions |= other.has_parameter_expressions;
        if self.last_binding.is_none() {
            self.last_binding = other.last_binding;
        }
        self.prp_for_parent.extend(other.prp_for_parent);
        self.is_array_at |= other.is_array_at;
        self.is_array_expr |= other.is_array_expr;
        self.is_object_at |= other.is_object_at;
        self
    }

    /// A state holding one free identifier use.
    pub(crate) fn from_identifier_reference(name: &str, node: NodeId) -> ScopeState {
        let mut state = ScopeState::empty();
        state.free_identifiers.insert(
            name.to_string(),
            Variable::new(name).add_reference(Reference::new(node, Accessibility::READ)),
        );
        state.last_binding = Some(Binding::new(name, node));
        state
    }

    /// A state holding one `delete identifier` use.
    pub(crate) fn from_identifier_delete(name: &str, node: NodeId) -> ScopeState {
        let mut state = ScopeState::empty();
        state.free_identifiers.insert(
            name.to_string(),
            Variable::new(name).add_reference(Reference::new(node, Accessibility::DELETE)),
        );
        state
    }

    /// Declare every pending binding with `kind`, into the block-scoped
    /// or function-scoped table as the kind dictates. `keep_bindings`
    /// leaves the bindings published for a further consumer (the
    /// surrounding `for-in`/`for-of`, or an initializer's write).
    pub fn add_declarations(mut self, kind: DeclarationKind, keep_bindings: bool) -> ScopeState {
        let block_scoped = kind.is_block_scoped();
        for binding in self.bindings_for_parent.iter_flat() {
            let declaration = Declaration::new(binding.node, kind);
            if block_scoped {
                self.block_scoped_declarations
                    .add(binding.name.clone(), declaration);
            } else {
                self.function_scoped_declarations
                    .add(binding.name.clone(), declaration);
            }
        }
        if !keep_bindings {
            self.bindings_for_parent = BindingList::new();
        }
        self
    }

    /// Record a function declaration under its name. No pending binding
    /// means `export default function () {}`; nothing to declare.
    pub fn add_function_declaration(mut self) -> ScopeState {
        if let Some(binding) = self.bindings_for_parent.first() {
            self.function_declarations.add(
                binding.name.clone(),
                Declaration::new(binding.node, DeclarationKind::FunctionDeclaration),
            );
            self.bindings_for_parent = BindingList::new();
        }
        self
    }

    /// Add a reference with `accessibility` for every pending binding
    /// and assignment target, routed through each binding's path.
    pub fn add_references(mut self, accessibility: Accessibility, keep: bool) -> ScopeState {
        for binding in self.bindings_for_parent.iter_flat() {
            add_reference_at_path(
                &mut self.free_identifiers,
                binding,
                Reference::new(binding.node, accessibility),
            );
        }
        for binding in self.ats_for_parent.iter_flat() {
            add_reference_at_path(
                &mut self.free_identifiers,
                binding,
                Reference::new(binding.node, accessibility),
            );
        }
        if !keep {
            self.bindings_for_parent = BindingList::new();
            self.ats_for_parent = BindingList::new();
        }
        self
    }

    /// Attach one member-chain segment under `last_binding` and advance
    /// the chain to it. A receiver that is not a trackable binding
    /// (`f().x`, `(5).x`) has no route; the segment is dropped.
    pub fn add_property(mut self, property: Property, node: NodeId) -> ScopeState {
        let Some(last) = self.last_binding.take() else {
            return self;
        };
        let name = property.name.clone();
        let properties = property_map_of(property);
        attach_properties_at_path(&mut self.free_identifiers, &last.path, properties);
        self.last_binding = Some(last.move_to(name, node));
        self
    }

    /// Record a data property of the object literal being reduced.
    pub fn add_data_property(mut self, property: Property) -> ScopeState {
        self.free_properties = merge_property_maps(self.free_properties, property_map_of(property));
        self
    }

    /// Close an object literal: its accumulated data properties become
    /// one carry offered to whatever consumes the literal. Shape tags
    /// of inner expressions are spent at this boundary.
    pub fn wrap_free_properties(mut self) -> ScopeState {
        self.prp_for_parent = vec![PropertyCarry::Map(std::mem::take(&mut self.free_properties))];
        self.is_array_expr = false;
        self.is_array_at = false;
        self
    }

    /// `delete` on a member chain: the just-added property reference
    /// becomes a property delete.
    pub(crate) fn mark_last_property_deleted(mut self) -> ScopeState {
        let Some(last) = self.last_binding.clone() else {
            return self;
        };
        let mut segments = last.path.split('.');
        let root = segments.next().unwrap_or_default();
        let rest: Vec<&str> = segments.collect();
        if rest.is_empty() {
            return self;
        }
        let Some(variable) = self.free_identifiers.get_mut(root) else {
            return self;
        };
        let mut properties = &mut variable.properties;
        for segment in &rest[..rest.len() - 1] {
            let Some(property) = properties.get_mut(*segment) else {
                return self;
            };
            properties = &mut property.properties;
        }
        if let Some(leaf) = properties.get_mut(rest[rest.len() - 1]) {
            assert_eq!(
                leaf.references.len(),
                1,
                "delete target should carry exactly one reference"
            );
            leaf.references[0].accessibility = Accessibility::PROPERTY_DELETE;
        }
        self
    }

    /// Pair pending assignment targets and bindings against the carried
    /// property payloads, positionally, and attach what matches. Shapes
    /// that cannot be paired (a scalar target against an array payload,
    /// a group against a plain map, a binding that rejects properties)
    /// are skipped, not errored. When the pattern side was an array
    /// target, the payload is consumed.
    pub fn merge_free_properties(mut self) -> ScopeState {
        if self.prp_for_parent.is_empty() {
            return self;
        }
        // An array literal carries one payload per element; a scalar
        // consumer must see the array as a single (unpairable) value.
        let sources: Vec<PropertyCarry> = if self.is_array_expr && !self.is_array_at {
            vec![PropertyCarry::List(self.prp_for_parent.clone())]
        } else {
            self.prp_for_parent.clone()
        };
        if !self.ats_for_parent.is_empty() {
            pair_bindings_with_carries(&mut self.free_identifiers, &self.ats_for_parent, &sources);
        }
        if !self.bindings_for_parent.is_empty() {
            pair_bindings_with_carries(
                &mut self.free_identifiers,
                &self.bindings_for_parent,
                &sources,
            );
        }
        if self.is_array_at {
            self.prp_for_parent = Vec::new();
        }
        self
    }

    /// `({a, b, ...rest} = objectLiteral)`: named targets receive the
    /// matching data property's own properties, a trailing rest target
    /// receives everything left over. No-op unless the pattern side is
    /// an object assignment target and the payload is a single object
    /// literal.
    pub fn merge_object_assignment(mut self) -> ScopeState {
        if !self.is_object_at {
            return self;
        }
        self.is_object_at = false;
        let Some(source) = single_map_carry(&self.prp_for_parent) else {
            return self;
        };
        let mut remaining = source.clone();
        let leaves: Vec<Binding> = self.ats_for_parent.iter_flat().cloned().collect();
        for binding in &leaves {
            if binding.is_rest {
                continue;
            }
            if let Some(property) = remaining.shift_remove(&binding.name) {
                attach_properties_at_path(
                    &mut self.free_identifiers,
                    &binding.path,
                    property.properties,
                );
            }
        }
        if let Some(rest) = leaves.iter().find(|binding| binding.is_rest) {
            attach_properties_at_path(&mut self.free_identifiers, &rest.path, remaining);
        }
        self.ats_for_parent = BindingList::new();
        self.prp_for_parent = Vec::new();
        self
    }

    /// Direct `eval`: every enclosing scope up to the next function
    /// boundary becomes dynamic.
    pub fn taint(mut self) -> ScopeState {
        self.dynamic = true;
        self
    }

    /// Register B.3.3 hoisting candidates by their name node.
    pub fn with_potential_var_functions(mut self, names: Vec<(String, NodeId)>) -> ScopeState {
        for (name, node) in names {
            self.potentially_var_scoped_function_declarations.add(
                name,
                Declaration::new(node, DeclarationKind::FunctionVarDeclaration),
            );
        }
        self
    }

    pub fn without_bindings_for_parent(mut self) -> ScopeState {
        self.bindings_for_parent = BindingList::new();
        self
    }

    pub fn without_ats_for_parent(mut self) -> ScopeState {
        self.ats_for_parent = BindingList::new();
        self
    }

    pub fn with_parameter_expressions(mut self) -> ScopeState {
        self.has_parameter_expressions = true;
        self
    }

    pub fn without_parameter_expressions(mut self) -> ScopeState {
        self.has_parameter_expressions = false;
        self
    }

    /// Seal this subtree into a scope of `scope_type` rooted at `node`.
    ///
    /// Declarations visible at this boundary consume matching free
    /// identifiers; everything unresolved flows upward in the returned
    /// state. Block-level scopes resolve only lexical declarations and
    /// pass `var`s through; function-level scopes resolve both, handle
    /// the synthesized `arguments`, and settle Annex B.3.3 hoisting.
    /// `Script` and `Module` additionally split into the two-tier
    /// global arrangement.
    pub(crate) fn finish(
        self,
        arena: &NodeArena,
        node: NodeId,
        scope_type: ScopeType,
        options: FinishOptions,
    ) -> ScopeState {
        let mut free = self.free_identifiers;
        let mut pvsfd = self.potentially_var_scoped_function_declarations;
        let mut children = self.children;
        let mut variables: Vec<Variable> = Vec::new();
        let mut function_scoped = DeclarationMultiMap::new();

        // B.3.5: a lexical declaration kills a same-named hoisting
        // candidate, except the simple catch binding itself.
        let simple_catch_binding = match (scope_type, arena.get(node)) {
            (ScopeType::Catch, Node::CatchClause { binding, .. })
                if matches!(arena.get(*binding), Node::BindingIdentifier { .. }) =>
            {
                Some(*binding)
            }
            _ => None,
        };
        for (name, declarations) in self.block_scoped_declarations.iter() {
            if let Some(catch_binding) = simple_catch_binding {
                if declarations.len() == 1 && declarations[0].node == catch_binding {
                    continue;
                }
            }
            pvsfd.remove(name);
        }

        // tc39/ecma262#913: between function boundaries, a candidate
        // survives only while it is the sole declaration of its name.
        if !matches!(
            scope_type,
            ScopeType::Script | ScopeType::Function | ScopeType::ArrowFunction
        ) {
            for (name, declarations) in self.function_declarations.iter() {
                let Some(candidates) = pvsfd.remove(name) else {
                    continue;
                };
                if declarations.len() == 1 {
                    if let Some(same) = candidates
                        .iter()
                        .find(|candidate| candidate.node == declarations[0].node)
                    {
                        pvsfd.add(name.clone(), *same);
                    }
                }
            }
        }
        for (name, declarations) in self.function_scoped_declarations.iter() {
            if pvsfd.contains(name)
                && declarations
                    .iter()
                    .any(|declaration| declaration.kind == DeclarationKind::Parameter)
            {
                pvsfd.remove(name);
            }
        }

        let mut declarations = DeclarationMultiMap::new();
        match scope_type {
            ScopeType::Block
            | ScopeType::Catch
            | ScopeType::With
            | ScopeType::FunctionName
            | ScopeType::ClassName
            | ScopeType::ParameterExpression => {
                declarations.extend(&self.block_scoped_declarations);
                declarations.extend(&self.function_declarations);
                variables = resolve_declarations(&mut free, &declarations);
                // var-like declarations cross this boundary untouched.
                function_scoped.extend(&self.function_scoped_declarations);
            }
            ScopeType::Parameters
            | ScopeType::ArrowFunction
            | ScopeType::Function
            | ScopeType::Module
            | ScopeType::Script => {
                if scope_type == ScopeType::Script {
                    // Lexical declarations live in a child scope of the
                    // global; vars and functions go on the global itself.
                    let script_variables =
                        resolve_declarations(&mut free, &self.block_scoped_declarations);
                    children = vec![Scope::new(
                        node,
                        ScopeType::Script,
                        self.dynamic,
                        children,
                        script_variables,
                        free.clone(),
                    )];
                } else {
                    declarations.extend(&self.block_scoped_declarations);
                }
                if options.should_resolve_arguments {
                    declarations.ensure("arguments");
                }
                declarations.extend(&self.function_scoped_declarations);
                declarations.extend(&self.function_declarations);
                if options.should_b33 {
                    for name in &options.param_names_blocking_b33 {
                        pvsfd.remove(name);
                    }
                    declarations.extend(&pvsfd);
                }
                pvsfd = DeclarationMultiMap::new();
                variables = resolve_declarations(&mut free, &declarations);
                if scope_type == ScopeType::Module {
                    children = vec![Scope::new(
                        node,
                        ScopeType::Module,
                        self.dynamic,
                        children,
                        variables,
                        free.clone(),
                    )];
                    variables = Vec::new();
                }
            }
            ScopeType::Global => unreachable!("the global scope is not finished explicitly"),
        }

        debug!(
            scope = ?scope_type,
            variables = variables.len(),
            through = free.len(),
            "finished scope"
        );

        let scope = if matches!(scope_type, ScopeType::Script | ScopeType::Module) {
            Scope::new_global(node, children, variables, free.clone())
        } else {
            Scope::new(
                node,
                scope_type,
                self.dynamic,
                children,
                variables,
                free.clone(),
            )
        };

        ScopeState {
            free_identifiers: free,
            function_scoped_declarations: function_scoped,
            children: vec![scope],
            bindings_for_parent: self.bindings_for_parent,
            potentially_var_scoped_function_declarations: pvsfd,
            has_parameter_expressions: self.has_parameter_expressions,
            ..ScopeState::default()
        }
    }

    /// Names declared function-scoped here, for B.3.3 blocking.
    pub(crate) fn function_scoped_declaration_names(&self) -> Vec<String> {
        self.function_scoped_declarations.keys().cloned().collect()
    }
}

fn property_map_of(property: Property) -> PropertyMap {
    let mut map = PropertyMap::default();
    map.insert(property.name.clone(), property);
    map
}

/// Match each name in `declarations` against the free identifiers:
/// a hit takes the free variable's references and properties, a miss
/// synthesizes an unreferenced variable. Resolved names leave the free
/// set.
fn resolve_declarations(
    free: &mut VariableMap,
    declarations: &DeclarationMultiMap,
) -> Vec<Variable> {
    let mut variables = Vec::new();
    for (name, sites) in declarations.iter() {
        let mut variable = free
            .shift_remove(name)
            .unwrap_or_else(|| Variable::new(name));
        variable.declarations = sites.clone();
        variables.push(variable);
    }
    variables
}

/// Append `reference` to the variable or property `binding.path` names.
/// Intermediate segments must already exist; the leaf is created on
/// first use.
fn add_reference_at_path(free: &mut VariableMap, binding: &Binding, reference: Reference) {
    let mut segments = binding.path.split('.');
    let root = segments.next().unwrap_or_default();
    let rest: Vec<&str> = segments.collect();
    if rest.is_empty() {
        free.entry(root.to_string())
            .or_insert_with(|| Variable::new(root))
            .references
            .push(reference);
        return;
    }
    let Some(variable) = free.get_mut(root) else {
        panic!("could not resolve binding path {}", binding.path);
    };
    let mut properties = &mut variable.properties;
    for segment in &rest[..rest.len() - 1] {
        let Some(property) = properties.get_mut(*segment) else {
            panic!("could not resolve binding path {}", binding.path);
        };
        properties = &mut property.properties;
    }
    let leaf = rest[rest.len() - 1];
    properties
        .entry(leaf.to_string())
        .or_insert_with(|| Property::new(leaf))
        .references
        .push(reference);
}

/// Merge `incoming` into the property map of the node `path` names.
/// Skips silently when the path no longer resolves; destructuring can
/// legally outrun what was tracked.
fn attach_properties_at_path(free: &mut VariableMap, path: &str, incoming: PropertyMap) {
    if incoming.is_empty() {
        return;
    }
    let mut segments = path.split('.');
    let root = segments.next().unwrap_or_default();
    let Some(variable) = free.get_mut(root) else {
        return;
    };
    let rest: Vec<&str> = segments.collect();
    if rest.is_empty() {
        variable.properties =
            merge_property_maps(std::mem::take(&mut variable.properties), incoming);
        return;
    }
    let mut properties = &mut variable.properties;
    for segment in &rest[..rest.len() - 1] {
        let Some(property) = properties.get_mut(*segment) else {
            return;
        };
        properties = &mut property.properties;
    }
    if let Some(leaf) = properties.get_mut(rest[rest.len() - 1]) {
        leaf.properties = merge_property_maps(std::mem::take(&mut leaf.properties), incoming);
    }
}

fn single_map_carry(carries: &[PropertyCarry]) -> Option<&PropertyMap> {
    match carries {
        [PropertyCarry::Map(map)] => Some(map),
        _ => None,
    }
}

/// Positional pairing of pattern slots against property payloads.
///
/// Standard zip stops at the shorter side; a trailing rest slot instead
/// absorbs every remaining payload. A rest group over fewer payload
/// slots than the flat payload list regroups the tail so the trees
/// balance (`[a, ...[r1, r2]] = [x, y, z]`).
fn pair_bindings_with_carries(
    free: &mut VariableMap,
    targets: &BindingList,
    sources: &[PropertyCarry],
) {
    let mut sources: Vec<PropertyCarry> = sources.to_vec();
    if let Some(BindingItem::Group(group)) = targets.items.last() {
        if group.is_rest && targets.len() <= sources.len() {
            let split = targets.len() - 1;
            let tail_len = group.len().min(sources.len() - split);
            let tail: Vec<PropertyCarry> = sources[split..split + tail_len].to_vec();
            sources.truncate(split);
            sources.push(PropertyCarry::List(tail));
        }
    }

    let last_is_rest = match targets.items.last() {
        Some(BindingItem::Single(binding)) => binding.is_rest,
        Some(BindingItem::Group(group)) => group.is_rest,
        None => false,
    };
    let pair_count = if last_is_rest {
        sources.len()
    } else {
        targets.len().min(sources.len())
    };

    for index in 0..pair_count {
        let target = &targets.items[index.min(targets.len() - 1)];
        let source = &sources[index];
        match (target, source) {
            (BindingItem::Group(group), PropertyCarry::List(inner)) => {
                pair_bindings_with_carries(free, group, inner);
            }
            (BindingItem::Single(binding), PropertyCarry::Map(map)) => {
                if binding.accept_properties {
                    attach_properties_at_path(free, &binding.path, map.clone());
                }
            }
            // A scalar against an array payload, or a nested pattern
            // against a plain map: nothing sensible to attach.
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_state(name: &str, id: u32) -> ScopeState {
        ScopeState::from_identifier_reference(name, NodeId(id))
    }

    #[test]
    fn empty_is_concat_identity() {
        let state = read_state("a", 0);
        assert_eq!(ScopeState::empty().concat(state.clone()), state.clone());
        assert_eq!(state.clone().concat(ScopeState::empty()), state);
    }

    #[test]
    fn concat_is_associative() {
        let a = read_state("a", 0);
        let b = read_state("b", 1);
        let c = read_state("a", 2);
        let left = a.clone().concat(b.clone()).concat(c.clone());
        let right = a.concat(b.concat(c));
        assert_eq!(left, right);
    }

    #[test]
    fn concat_merges_same_name_free_identifiers() {
        let merged = read_state("x", 0).concat(read_state("x", 1));
        assert_eq!(merged.free_identifiers.len(), 1);
        assert_eq!(merged.free_identifiers["x"].references.len(), 2);
    }

    #[test]
    fn concat_keeps_first_last_binding() {
        let merged = read_state("a", 0).concat(read_state("b", 1));
        assert_eq!(merged.last_binding.as_ref().map(|b| b.name.as_str()), Some("a"));
    }

    #[test]
    fn add_property_extends_member_chain() {
        let state = read_state("a", 0)
            .add_property(Property::new("b"), NodeId(1))
            .add_property(Property::new("c"), NodeId(2));
        let a = &state.free_identifiers["a"];
        assert!(a.properties.contains_key("b"));
        assert!(a.properties["b"].properties.contains_key("c"));
        assert_eq!(state.last_binding.as_ref().map(|b| b.path.as_str()), Some("a.b.c"));
    }

    #[test]
    fn add_property_without_receiver_is_dropped() {
        let state = ScopeState::empty().add_property(Property::new("x"), NodeId(0));
        assert!(state.free_identifiers.is_empty());
    }

    #[test]
    fn add_references_creates_leaf_variables() {
        let mut state = ScopeState::empty();
        state.ats_for_parent = BindingList::single(Binding::new("x", NodeId(0)));
        let state = state.add_references(Accessibility::WRITE, false);
        assert!(state.ats_for_parent.is_empty());
        let x = &state.free_identifiers["x"];
        assert_eq!(x.references.len(), 1);
        assert!(x.references[0].accessibility.is_write());
    }

    #[test]
    #[should_panic(expected = "could not resolve binding path")]
    fn add_references_panics_on_dangling_path() {
        let mut binding = Binding::new("a", NodeId(0));
        binding = binding.move_to("b", NodeId(1));
        let mut state = ScopeState::empty();
        state.ats_for_parent = BindingList::single(binding);
        let _ = state.add_references(Accessibility::WRITE, false);
    }

    #[test]
    fn merge_free_properties_pairs_positionally() {
        // [a, b] = [{x: 1}, {y: 2}]
        let mut state = read_state("a", 0).concat(read_state("b", 1));
        let mut ats = BindingList::new();
        ats.push(Binding::new("a", NodeId(0)));
        ats.push(Binding::new("b", NodeId(1)));
        state.ats_for_parent = ats;
        state.is_array_at = true;
        state.is_array_expr = true;
        let mut first = PropertyMap::default();
        first.insert("x".to_string(), Property::new("x"));
        let mut second = PropertyMap::default();
        second.insert("y".to_string(), Property::new("y"));
        state.prp_for_parent = vec![PropertyCarry::Map(first), PropertyCarry::Map(second)];

        let state = state.merge_free_properties();
        assert!(state.free_identifiers["a"].properties.contains_key("x"));
        assert!(state.free_identifiers["b"].properties.contains_key("y"));
        assert!(state.prp_for_parent.is_empty());
    }

    #[test]
    fn scalar_target_skips_array_payload() {
        // a = [{b: 1}]
        let mut state = read_state("a", 0);
        state.ats_for_parent = BindingList::single(Binding::new("a", NodeId(0)));
        state.is_array_expr = true;
        let mut map = PropertyMap::default();
        map.insert("b".to_string(), Property::new("b"));
        state.prp_for_parent = vec![PropertyCarry::Map(map)];

        let state = state.merge_free_properties();
        assert!(state.free_identifiers["a"].properties.is_empty());
    }

    #[test]
    fn rest_group_absorbs_remaining_payloads() {
        // [a, ...[r1, r2]] = [{x}, {y}, {z}]
        let mut state = read_state("a", 0)
            .concat(read_state("r1", 1))
            .concat(read_state("r2", 2));
        let mut group = BindingList::new();
        group.push(Binding::new("r1", NodeId(1)));
        group.push(Binding::new("r2", NodeId(2)));
        group.is_rest = true;
        let mut ats = BindingList::new();
        ats.push(Binding::new("a", NodeId(0)));
        ats.push_group(group);
        state.ats_for_parent = ats;
        state.is_array_at = true;
        state.is_array_expr = true;
        state.prp_for_parent = ["x", "y", "z"]
            .iter()
            .map(|name| {
                let mut map = PropertyMap::default();
                map.insert((*name).to_string(), Property::new(*name));
                PropertyCarry::Map(map)
            })
            .collect();

        let state = state.merge_free_properties();
        assert!(state.free_identifiers["a"].properties.contains_key("x"));
        assert!(state.free_identifiers["r1"].properties.contains_key("y"));
        assert!(state.free_identifiers["r2"].properties.contains_key("z"));
    }

    #[test]
    fn object_assignment_routes_named_and_rest() {
        // ({a, ...rest} = {a: {q: 1}, b: 2})
        let mut state = read_state("a", 0).concat(read_state("rest", 1));
        let mut ats = BindingList::new();
        ats.push(Binding::new("a", NodeId(0)));
        ats.push(Binding::new("rest", NodeId(1)).set_rest());
        state.ats_for_parent = ats;
        state.is_object_at = true;
        let mut inner = PropertyMap::default();
        inner.insert("q".to_string(), Property::new("q"));
        let mut source = PropertyMap::default();
        source.insert(
            "a".to_string(),
            Property {
                name: "a".to_string(),
                references: Vec::new(),
                properties: inner,
            },
        );
        source.insert("b".to_string(), Property::new("b"));
        state.prp_for_parent = vec![PropertyCarry::Map(source)];

        let state = state.merge_object_assignment();
        assert!(state.free_identifiers["a"].properties.contains_key("q"));
        assert!(state.free_identifiers["rest"].properties.contains_key("b"));
        assert!(!state.free_identifiers["rest"].properties.contains_key("a"));
        assert!(state.ats_for_parent.is_empty());
        assert!(!state.is_object_at);
    }
}
