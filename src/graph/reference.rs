//! References: edges from use-sites to symbols.

use smol_str::SmolStr;

use crate::base::{Kind, Location};

use super::entity::{DeclarationId, Entity, Parent, ReferenceId};

/// An edge from a use-site to a referenced symbol.
///
/// The target is identified by USR; after indexer resolution a reference
/// either matches an in-graph declaration of the same kind or represents an
/// external symbol. `is_related` distinguishes structural edges
/// (inheritance, conformance, alias targets) from ordinary uses, which the
/// analyzer treats differently.
#[derive(Clone, Debug)]
pub struct Reference {
    pub kind: Kind,
    pub name: Option<SmolStr>,
    /// USR of the referenced symbol.
    pub usr: SmolStr,
    pub location: Location,
    pub parent: Option<Parent>,
    /// Declarations owned by this reference (rare; e.g. implicit members
    /// materialized at a use-site).
    pub declarations: Vec<DeclarationId>,
    /// Nested references.
    pub references: Vec<ReferenceId>,
    /// Structural edge (superclass, conformance, alias target).
    pub is_related: bool,
    /// The use-site is an assignment to the target. Only meaningful for
    /// references to variables; drives the assign-only property rule.
    pub is_write: bool,
}

impl Reference {
    pub fn new(kind: Kind, usr: impl Into<SmolStr>, location: Location) -> Self {
        Self {
            kind,
            name: None,
            usr: usr.into(),
            location,
            parent: None,
            declarations: Vec::new(),
            references: Vec::new(),
            is_related: false,
            is_write: false,
        }
    }

    pub fn with_name(mut self, name: impl Into<SmolStr>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn related(mut self) -> Self {
        self.is_related = true;
        self
    }

    pub fn write(mut self) -> Self {
        self.is_write = true;
        self
    }
}

impl Entity for Reference {
    fn kind(&self) -> Kind {
        self.kind
    }

    fn name(&self) -> Option<&SmolStr> {
        self.name.as_ref()
    }

    fn usr(&self) -> &SmolStr {
        &self.usr
    }

    fn location(&self) -> &Location {
        &self.location
    }

    fn parent(&self) -> Option<Parent> {
        self.parent
    }
}
