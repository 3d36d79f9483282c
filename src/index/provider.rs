//! The index provider contract.
//!
//! A provider wraps whatever produced the compilation index (an index
//! store, a database, a test fixture) and yields occurrence records per
//! translation unit. The provider must be complete (every container USR
//! resolves to a definition emitted in the same run) and stable (the same
//! input yields the same stream).

use smol_str::SmolStr;

use crate::base::{Accessibility, Kind, Location};
use crate::error::Result;

/// How a symbol occurs at a location.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OccurrenceRole {
    /// The symbol is defined here.
    Definition,
    /// The symbol is used here.
    Reference,
    /// A structural edge: superclass, conformance, alias target.
    Related,
}

/// One record in a provider's stream.
#[derive(Clone, Debug)]
pub struct Occurrence {
    pub module: SmolStr,
    pub location: Location,
    pub kind: Kind,
    pub name: Option<SmolStr>,
    pub usr: SmolStr,
    pub role: OccurrenceRole,
    /// USR of the enclosing definition. Absent for top-level symbols.
    pub container_usr: Option<SmolStr>,
    pub attributes: Vec<SmolStr>,
    pub modifiers: Vec<SmolStr>,
    pub accessibility: Option<Accessibility>,
    /// Whether the access level was written in source.
    pub is_explicit_accessibility: bool,
    /// Definition synthesized by the compiler.
    pub is_implicit: bool,
    /// Reference is an assignment to the target.
    pub is_write: bool,
    /// Raw comment text immediately preceding a definition.
    pub comment: Option<String>,
}

impl Occurrence {
    fn new(
        module: impl Into<SmolStr>,
        kind: Kind,
        usr: impl Into<SmolStr>,
        location: Location,
        role: OccurrenceRole,
    ) -> Self {
        Self {
            module: module.into(),
            location,
            kind,
            name: None,
            usr: usr.into(),
            role,
            container_usr: None,
            attributes: Vec::new(),
            modifiers: Vec::new(),
            accessibility: None,
            is_explicit_accessibility: false,
            is_implicit: false,
            is_write: false,
            comment: None,
        }
    }

    /// A definition record.
    pub fn definition(
        module: impl Into<SmolStr>,
        kind: Kind,
        usr: impl Into<SmolStr>,
        location: Location,
    ) -> Self {
        Self::new(module, kind, usr, location, OccurrenceRole::Definition)
    }

    /// A use-edge record.
    pub fn reference(
        module: impl Into<SmolStr>,
        kind: Kind,
        usr: impl Into<SmolStr>,
        location: Location,
    ) -> Self {
        Self::new(module, kind, usr, location, OccurrenceRole::Reference)
    }

    /// A structural-edge record.
    pub fn related(
        module: impl Into<SmolStr>,
        kind: Kind,
        usr: impl Into<SmolStr>,
        location: Location,
    ) -> Self {
        Self::new(module, kind, usr, location, OccurrenceRole::Related)
    }

    pub fn with_name(mut self, name: impl Into<SmolStr>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_container(mut self, usr: impl Into<SmolStr>) -> Self {
        self.container_usr = Some(usr.into());
        self
    }

    pub fn with_attributes<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        self.attributes = attributes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_modifiers<I, S>(mut self, modifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        self.modifiers = modifiers.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_accessibility(mut self, accessibility: Accessibility, explicit: bool) -> Self {
        self.accessibility = Some(accessibility);
        self.is_explicit_accessibility = explicit;
        self
    }

    pub fn implicit(mut self) -> Self {
        self.is_implicit = true;
        self
    }

    pub fn write(mut self) -> Self {
        self.is_write = true;
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// Source of occurrence records for the indexer.
///
/// `Sync` so unit batches can be fetched in parallel; ingestion into the
/// graph is serialized by the indexer regardless.
pub trait IndexProvider: Sync {
    /// Names of every translation unit in the target module set, in a
    /// stable order.
    fn unit_names(&self) -> Result<Vec<SmolStr>>;

    /// The occurrence records of one unit, in a stable order.
    fn occurrences(&self, unit: &str) -> Result<Vec<Occurrence>>;
}
