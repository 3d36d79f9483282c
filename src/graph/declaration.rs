//! Declarations: defined symbols.

use indexmap::IndexSet;
use smol_str::SmolStr;

use crate::base::{CommentCommand, DeclaredAccessibility, Kind, Location};

use super::entity::{DeclarationId, Entity, Parent, ReferenceId};

/// A defined symbol in the analyzed module set.
///
/// Child lists own their members; `parent` is a back-edge. `is_retained`
/// and `unused_parameters` are analyzer output and start empty.
#[derive(Clone, Debug)]
pub struct Declaration {
    pub kind: Kind,
    /// Absent for anonymous declarations, e.g. unnamed extensions.
    pub name: Option<SmolStr>,
    /// Stable symbol id issued by the index provider.
    pub usr: SmolStr,
    /// The module this declaration belongs to.
    pub module: SmolStr,
    pub location: Location,
    pub accessibility: DeclaredAccessibility,
    /// Source annotations such as `objc`, `objcMembers`, `main`,
    /// `propertyWrapper`, `required`, `override`.
    pub attributes: IndexSet<SmolStr>,
    /// Declaration modifiers such as `final`, `lazy`, `weak`.
    pub modifiers: IndexSet<SmolStr>,
    pub parent: Option<Parent>,
    /// Child declarations, in indexing order.
    pub declarations: Vec<DeclarationId>,
    /// Outgoing use edges.
    pub references: Vec<ReferenceId>,
    /// Outgoing structural edges: superclass, conformances, alias targets.
    pub related: Vec<ReferenceId>,
    /// Suppression directives from the preceding comment.
    pub comment_commands: Vec<CommentCommand>,
    /// Synthesized by the compiler or by the implicit-member pass.
    pub is_implicit: bool,
    /// Analyzer output: reachable from an entry point under the rules.
    pub is_retained: bool,
    /// Analyzer output: parameter children found unused.
    pub unused_parameters: Vec<DeclarationId>,
}

impl Declaration {
    /// Create a declaration with empty edges and default accessibility.
    pub fn new(kind: Kind, usr: impl Into<SmolStr>, module: impl Into<SmolStr>, location: Location) -> Self {
        Self {
            kind,
            name: None,
            usr: usr.into(),
            module: module.into(),
            location,
            accessibility: DeclaredAccessibility::default(),
            attributes: IndexSet::new(),
            modifiers: IndexSet::new(),
            parent: None,
            declarations: Vec::new(),
            references: Vec::new(),
            related: Vec::new(),
            comment_commands: Vec::new(),
            is_implicit: false,
            is_retained: false,
            unused_parameters: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<SmolStr>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Whether the given attribute is present.
    pub fn has_attribute(&self, attribute: &str) -> bool {
        self.attributes.contains(attribute)
    }

    /// Whether the given modifier is present.
    pub fn has_modifier(&self, modifier: &str) -> bool {
        self.modifiers.contains(modifier)
    }

    /// Whether `override` was written on this declaration.
    pub fn is_override(&self) -> bool {
        self.has_attribute("override") || self.has_modifier("override")
    }

    /// The name, or `""` for anonymous declarations.
    pub fn name_or_empty(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

impl Entity for Declaration {
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
