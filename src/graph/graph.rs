//! The in-memory source graph.
//!
//! Declarations and references live in arenas with stable indices; all
//! cross-links are ids. Secondary indices are maintained by the indexer and
//! the mutator passes through the methods here, not checked on every
//! mutation; the debug validator confirms the invariants between passes.

use std::ops::{Index, IndexMut};
use std::path::Path;

use indexmap::IndexSet;
use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;
use tracing::trace;

use crate::base::{Kind, Location};
use crate::error::{Error, Result};

use super::declaration::Declaration;
use super::entity::{DeclarationId, Parent, ReferenceId};
use super::reference::Reference;

type NodeKey = (Kind, SmolStr, Location);

/// Mutable container for the declaration/reference graph and its indices.
#[derive(Debug, Default)]
pub struct SourceGraph {
    declarations: Vec<Option<Declaration>>,
    references: Vec<Option<Reference>>,

    /// Top-level declarations (parent is a module container or absent).
    roots: IndexSet<DeclarationId>,

    // Idempotence keys: one node per (kind, usr, location).
    declaration_keys: FxHashMap<NodeKey, DeclarationId>,
    reference_keys: FxHashMap<NodeKey, ReferenceId>,

    by_usr: FxHashMap<SmolStr, DeclarationId>,
    by_kind_name: FxHashMap<(Kind, SmolStr), Vec<DeclarationId>>,
    /// Extensions grouped by the USR of the type they extend.
    by_extended_usr: FxHashMap<SmolStr, Vec<DeclarationId>>,
    /// Conforming type declarations grouped by protocol USR.
    conformances: FxHashMap<SmolStr, Vec<DeclarationId>>,
    /// Incoming edges grouped by target USR.
    incoming: FxHashMap<SmolStr, Vec<ReferenceId>>,

    /// Synthetic per-module containers for top-level symbols.
    module_containers: FxHashMap<SmolStr, DeclarationId>,

    /// Declarations suppressed by comment directive.
    ignored: FxHashSet<DeclarationId>,
    /// Functions whose unused parameters are suppressed.
    ignored_parameters: FxHashSet<DeclarationId>,
    /// Members retained as potential witnesses of external protocols.
    foreign_witnesses: FxHashSet<DeclarationId>,
    /// Properties found assign-only by the analyzer.
    assign_only: FxHashSet<DeclarationId>,

    /// Override links: subclass method -> nearest overridden base method.
    override_of: FxHashMap<DeclarationId, DeclarationId>,
    overridden_by: FxHashMap<DeclarationId, Vec<DeclarationId>>,
}

impl SourceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Insertion
    // ------------------------------------------------------------------

    /// Add a declaration. Idempotent on `(kind, usr, location)`: re-adding
    /// returns the existing id. A USR already bound to a different kind is
    /// a provider contract violation.
    pub fn add_declaration(&mut self, declaration: Declaration) -> Result<DeclarationId> {
        let key = (
            declaration.kind,
            declaration.usr.clone(),
            declaration.location.clone(),
        );
        if let Some(existing) = self.declaration_keys.get(&key) {
            trace!(usr = %declaration.usr, "duplicate definition de-duplicated");
            return Ok(*existing);
        }
        if let Some(existing) = self.by_usr.get(&declaration.usr) {
            let existing_kind = self[*existing].kind;
            if existing_kind != declaration.kind {
                return Err(Error::inconsistency(format!(
                    "usr {} defined as both {} and {} ({})",
                    declaration.usr, existing_kind, declaration.kind, declaration.location
                )));
            }
            // Same symbol indexed again from another unit at a different
            // location; keep the first materialization.
            trace!(usr = %declaration.usr, "re-definition folded into existing declaration");
            return Ok(*existing);
        }

        let id = DeclarationId(self.declarations.len() as u32);
        self.by_usr.insert(declaration.usr.clone(), id);
        if let Some(name) = &declaration.name {
            self.by_kind_name
                .entry((declaration.kind, name.clone()))
                .or_default()
                .push(id);
        }
        self.declaration_keys.insert(key, id);
        self.declarations.push(Some(declaration));
        Ok(id)
    }

    /// Add a reference. Idempotent on `(kind, usr, location)`.
    pub fn add_reference(&mut self, reference: Reference) -> ReferenceId {
        let key = (
            reference.kind,
            reference.usr.clone(),
            reference.location.clone(),
        );
        if let Some(existing) = self.reference_keys.get(&key) {
            return *existing;
        }
        let id = ReferenceId(self.references.len() as u32);
        self.incoming
            .entry(reference.usr.clone())
            .or_default()
            .push(id);
        self.reference_keys.insert(key, id);
        self.references.push(Some(reference));
        id
    }

    /// Register a top-level declaration.
    pub fn add_root(&mut self, id: DeclarationId) {
        self.roots.insert(id);
    }

    /// Attach `child` under `parent`, replacing any previous parent link.
    pub fn add_child(&mut self, parent: DeclarationId, child: DeclarationId) {
        self.detach_from_parent(child);
        self[child].parent = Some(Parent::Declaration(parent));
        let children = &mut self[parent].declarations;
        if !children.contains(&child) {
            children.push(child);
        }
        self.roots.shift_remove(&child);
    }

    /// Attach a reference under its container. Related edges land in the
    /// container's `related` list, use edges in `references`.
    pub fn attach_reference(&mut self, parent: Parent, reference: ReferenceId) {
        self[reference].parent = Some(parent);
        match parent {
            Parent::Declaration(decl) => {
                let related = self[reference].is_related;
                let list = if related {
                    &mut self[decl].related
                } else {
                    &mut self[decl].references
                };
                if !list.contains(&reference) {
                    list.push(reference);
                }
            }
            Parent::Reference(outer) => {
                let list = &mut self[outer].references;
                if !list.contains(&reference) {
                    list.push(reference);
                }
            }
        }
    }

    /// The synthetic container for a module's top-level symbols, created on
    /// first use.
    pub fn module_container(&mut self, module: &str) -> Result<DeclarationId> {
        if let Some(id) = self.module_containers.get(module) {
            return Ok(*id);
        }
        let usr = SmolStr::new(format!("module:{module}"));
        let location = Location::new(format!("<{module}>"), 0, 0);
        let mut container = Declaration::new(Kind::Module, usr, module, location).with_name(module);
        container.is_implicit = true;
        let id = self.add_declaration(container)?;
        self.module_containers.insert(SmolStr::new(module), id);
        self.add_root(id);
        Ok(id)
    }

    // ------------------------------------------------------------------
    // Secondary index maintenance
    // ------------------------------------------------------------------

    /// Record that `extension` extends the type identified by `usr`.
    pub fn index_extension(&mut self, extended_usr: &SmolStr, extension: DeclarationId) {
        let entry = self.by_extended_usr.entry(extended_usr.clone()).or_default();
        if !entry.contains(&extension) {
            entry.push(extension);
        }
    }

    /// Record that `conforming` conforms to the protocol identified by `usr`.
    pub fn index_conformance(&mut self, protocol_usr: &SmolStr, conforming: DeclarationId) {
        let entry = self.conformances.entry(protocol_usr.clone()).or_default();
        if !entry.contains(&conforming) {
            entry.push(conforming);
        }
    }

    // ------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------

    pub fn get_declaration(&self, id: DeclarationId) -> Option<&Declaration> {
        self.declarations.get(id.index()).and_then(|d| d.as_ref())
    }

    pub fn get_reference(&self, id: ReferenceId) -> Option<&Reference> {
        self.references.get(id.index()).and_then(|r| r.as_ref())
    }

    /// Iterate live declarations in id order.
    pub fn declarations(&self) -> impl Iterator<Item = (DeclarationId, &Declaration)> {
        self.declarations
            .iter()
            .enumerate()
            .filter_map(|(i, d)| d.as_ref().map(|d| (DeclarationId(i as u32), d)))
    }

    /// Iterate live references in id order.
    pub fn references(&self) -> impl Iterator<Item = (ReferenceId, &Reference)> {
        self.references
            .iter()
            .enumerate()
            .filter_map(|(i, r)| r.as_ref().map(|r| (ReferenceId(i as u32), r)))
    }

    pub fn declaration_count(&self) -> usize {
        self.declarations.iter().filter(|d| d.is_some()).count()
    }

    pub fn reference_count(&self) -> usize {
        self.references.iter().filter(|r| r.is_some()).count()
    }

    pub fn root_declarations(&self) -> impl Iterator<Item = DeclarationId> + '_ {
        self.roots.iter().copied()
    }

    pub fn declaration_by_usr(&self, usr: &str) -> Option<DeclarationId> {
        self.by_usr.get(usr).copied()
    }

    pub fn declarations_by_kind_name(&self, kind: Kind, name: &str) -> &[DeclarationId] {
        self.by_kind_name
            .get(&(kind, SmolStr::new(name)))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Extensions of the type identified by `usr`.
    pub fn extensions_of(&self, usr: &str) -> &[DeclarationId] {
        self.by_extended_usr.get(usr).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Types conforming to the protocol identified by `usr`.
    pub fn conforming_declarations(&self, usr: &str) -> &[DeclarationId] {
        self.conformances.get(usr).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All incoming edges naming `usr`, resolved or not.
    pub fn references_to(&self, usr: &str) -> &[ReferenceId] {
        self.incoming.get(usr).map(Vec::as_slice).unwrap_or(&[])
    }

    // ------------------------------------------------------------------
    // Traversal
    // ------------------------------------------------------------------

    /// The nearest enclosing declaration, skipping over reference parents.
    pub fn parent_declaration(&self, id: DeclarationId) -> Option<DeclarationId> {
        let mut parent = self.get_declaration(id)?.parent;
        while let Some(link) = parent {
            match link {
                Parent::Declaration(decl) => return Some(decl),
                Parent::Reference(reference) => parent = self.get_reference(reference)?.parent,
            }
        }
        None
    }

    /// Enclosing declarations from nearest to outermost.
    pub fn ancestors(&self, id: DeclarationId) -> Vec<DeclarationId> {
        let mut out = Vec::new();
        let mut current = self.parent_declaration(id);
        while let Some(ancestor) = current {
            if out.contains(&ancestor) {
                break;
            }
            out.push(ancestor);
            current = self.parent_declaration(ancestor);
        }
        out
    }

    /// All transitive child declarations, preorder.
    pub fn descendants(&self, id: DeclarationId) -> Vec<DeclarationId> {
        let mut out = Vec::new();
        let mut stack: Vec<DeclarationId> = match self.get_declaration(id) {
            Some(decl) => decl.declarations.iter().rev().copied().collect(),
            None => return out,
        };
        while let Some(next) = stack.pop() {
            if let Some(decl) = self.get_declaration(next) {
                out.push(next);
                stack.extend(decl.declarations.iter().rev().copied());
            }
        }
        out
    }

    /// The declaration's resolved superclass, if any.
    pub fn superclass_of(&self, id: DeclarationId) -> Option<DeclarationId> {
        let decl = self.get_declaration(id)?;
        decl.related.iter().find_map(|r| {
            let reference = self.get_reference(*r)?;
            if reference.kind == Kind::Class {
                self.resolved_target(reference)
            } else {
                None
            }
        })
    }

    /// Superclasses from nearest to root, cycle-guarded.
    pub fn superclass_chain(&self, id: DeclarationId) -> Vec<DeclarationId> {
        let mut out = Vec::new();
        let mut current = self.superclass_of(id);
        while let Some(class) = current {
            if out.contains(&class) {
                break;
            }
            out.push(class);
            current = self.superclass_of(class);
        }
        out
    }

    /// Related edges naming protocols (the conformance clause).
    pub fn conformance_references(&self, id: DeclarationId) -> Vec<ReferenceId> {
        match self.get_declaration(id) {
            Some(decl) => decl
                .related
                .iter()
                .copied()
                .filter(|r| {
                    self.get_reference(*r)
                        .is_some_and(|r| r.kind == Kind::Protocol)
                })
                .collect(),
            None => Vec::new(),
        }
    }

    /// Transitive closure of inherited-type edges: superclasses and
    /// protocol conformances, following resolved targets.
    pub fn inherited_type_references(&self, id: DeclarationId) -> Vec<ReferenceId> {
        let mut out = Vec::new();
        let mut seen_decls = FxHashSet::default();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if !seen_decls.insert(current) {
                continue;
            }
            let Some(decl) = self.get_declaration(current) else {
                continue;
            };
            for r in &decl.related {
                let Some(reference) = self.get_reference(*r) else {
                    continue;
                };
                if !matches!(reference.kind, Kind::Class | Kind::Protocol) {
                    continue;
                }
                if !out.contains(r) {
                    out.push(*r);
                }
                if let Some(target) = self.resolved_target(reference) {
                    stack.push(target);
                }
            }
        }
        out
    }

    /// The in-graph declaration a reference resolves to: same USR, same
    /// kind. `None` for externals and kind conflicts.
    pub fn resolved_target(&self, reference: &Reference) -> Option<DeclarationId> {
        let id = self.declaration_by_usr(&reference.usr)?;
        (self.get_declaration(id)?.kind == reference.kind).then_some(id)
    }

    /// Whether any declaration lives in a file whose basename is `name`.
    pub fn has_file_named(&self, name: &str) -> bool {
        self.declarations()
            .any(|(_, d)| d.location.path().file_name().is_some_and(|f| f == Path::new(name).as_os_str()))
    }

    // ------------------------------------------------------------------
    // Marking
    // ------------------------------------------------------------------

    pub fn mark_retained(&mut self, id: DeclarationId) {
        self[id].is_retained = true;
    }

    pub fn is_retained(&self, id: DeclarationId) -> bool {
        self.get_declaration(id).is_some_and(|d| d.is_retained)
    }

    pub fn ignore(&mut self, id: DeclarationId) {
        self.ignored.insert(id);
    }

    pub fn is_ignored(&self, id: DeclarationId) -> bool {
        self.ignored.contains(&id)
    }

    pub fn ignore_parameters(&mut self, function: DeclarationId) {
        self.ignored_parameters.insert(function);
    }

    pub fn parameters_ignored(&self, function: DeclarationId) -> bool {
        self.ignored_parameters.contains(&function)
    }

    pub fn mark_foreign_witness(&mut self, id: DeclarationId) {
        self.foreign_witnesses.insert(id);
    }

    pub fn is_foreign_witness(&self, id: DeclarationId) -> bool {
        self.foreign_witnesses.contains(&id)
    }

    pub fn mark_assign_only(&mut self, id: DeclarationId) {
        self.assign_only.insert(id);
    }

    pub fn is_assign_only(&self, id: DeclarationId) -> bool {
        self.assign_only.contains(&id)
    }

    /// Link an overriding method to the base method it overrides.
    pub fn set_override(&mut self, overriding: DeclarationId, base: DeclarationId) {
        self.override_of.insert(overriding, base);
        let entry = self.overridden_by.entry(base).or_default();
        if !entry.contains(&overriding) {
            entry.push(overriding);
        }
    }

    pub fn override_base(&self, overriding: DeclarationId) -> Option<DeclarationId> {
        self.override_of.get(&overriding).copied()
    }

    pub fn overriding_declarations(&self, base: DeclarationId) -> &[DeclarationId] {
        self.overridden_by.get(&base).map(Vec::as_slice).unwrap_or(&[])
    }

    // ------------------------------------------------------------------
    // Removal
    // ------------------------------------------------------------------

    /// Remove a declaration and its whole subtree, maintaining every index.
    pub fn remove_declaration(&mut self, id: DeclarationId) {
        let mut doomed = vec![id];
        doomed.extend(self.descendants(id));

        self.detach_from_parent(id);

        // Children first so parent lists never dangle mid-removal.
        for decl_id in doomed.into_iter().rev() {
            let Some(decl) = self.declarations[decl_id.index()].take() else {
                continue;
            };
            for reference in decl.references.iter().chain(&decl.related) {
                self.remove_reference(*reference);
            }
            self.declaration_keys
                .remove(&(decl.kind, decl.usr.clone(), decl.location.clone()));
            if self.by_usr.get(&decl.usr) == Some(&decl_id) {
                self.by_usr.remove(&decl.usr);
            }
            if let Some(name) = &decl.name {
                if let Some(ids) = self.by_kind_name.get_mut(&(decl.kind, name.clone())) {
                    ids.retain(|d| *d != decl_id);
                }
            }
            self.roots.shift_remove(&decl_id);
            self.ignored.remove(&decl_id);
            self.ignored_parameters.remove(&decl_id);
            self.foreign_witnesses.remove(&decl_id);
            self.assign_only.remove(&decl_id);
            if let Some(base) = self.override_of.remove(&decl_id) {
                if let Some(subs) = self.overridden_by.get_mut(&base) {
                    subs.retain(|d| *d != decl_id);
                }
            }
            self.overridden_by.remove(&decl_id);
            for ids in self.by_extended_usr.values_mut() {
                ids.retain(|d| *d != decl_id);
            }
            for ids in self.conformances.values_mut() {
                ids.retain(|d| *d != decl_id);
            }
        }
    }

    /// Remove a reference and its nested subtree.
    pub fn remove_reference(&mut self, id: ReferenceId) {
        let Some(reference) = self.references[id.index()].take() else {
            return;
        };
        if let Some(Parent::Declaration(parent)) = reference.parent {
            if let Some(decl) = self.declarations[parent.index()].as_mut() {
                decl.references.retain(|r| *r != id);
                decl.related.retain(|r| *r != id);
            }
        }
        if let Some(Parent::Reference(parent)) = reference.parent {
            if let Some(outer) = self.references[parent.index()].as_mut() {
                outer.references.retain(|r| *r != id);
            }
        }
        if let Some(ids) = self.incoming.get_mut(&reference.usr) {
            ids.retain(|r| *r != id);
        }
        self.reference_keys
            .remove(&(reference.kind, reference.usr.clone(), reference.location.clone()));
        for nested in reference.references {
            self.remove_reference(nested);
        }
        for nested in reference.declarations {
            self.remove_declaration(nested);
        }
    }

    fn detach_from_parent(&mut self, id: DeclarationId) {
        let Some(parent) = self.get_declaration(id).and_then(|d| d.parent) else {
            return;
        };
        match parent {
            Parent::Declaration(decl) => {
                if let Some(parent_decl) = self.declarations[decl.index()].as_mut() {
                    parent_decl.declarations.retain(|c| *c != id);
                }
            }
            Parent::Reference(reference) => {
                if let Some(parent_ref) = self.references[reference.index()].as_mut() {
                    parent_ref.declarations.retain(|c| *c != id);
                }
            }
        }
        self[id].parent = None;
    }

    pub(crate) fn declaration_mut(&mut self, id: DeclarationId) -> &mut Declaration {
        &mut self[id]
    }
}

impl Index<DeclarationId> for SourceGraph {
    type Output = Declaration;

    fn index(&self, id: DeclarationId) -> &Declaration {
        match self.declarations.get(id.index()) {
            Some(Some(decl)) => decl,
            _ => panic!("declaration {id:?} has been removed from the graph"),
        }
    }
}

impl IndexMut<DeclarationId> for SourceGraph {
    fn index_mut(&mut self, id: DeclarationId) -> &mut Declaration {
        match self.declarations.get_mut(id.index()) {
            Some(Some(decl)) => decl,
            _ => panic!("declaration {id:?} has been removed from the graph"),
        }
    }
}

impl Index<ReferenceId> for SourceGraph {
    type Output = Reference;

    fn index(&self, id: ReferenceId) -> &Reference {
        match self.references.get(id.index()) {
            Some(Some(reference)) => reference,
            _ => panic!("reference {id:?} has been removed from the graph"),
        }
    }
}

impl IndexMut<ReferenceId> for SourceGraph {
    fn index_mut(&mut self, id: ReferenceId) -> &mut Reference {
        match self.references.get_mut(id.index()) {
            Some(Some(reference)) => reference,
            _ => panic!("reference {id:?} has been removed from the graph"),
        }
    }
}
