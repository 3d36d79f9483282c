//! Arena identifiers and the polymorphic parent edge.

use smol_str::SmolStr;

use crate::base::{Kind, Location};

/// Stable index of a [`Declaration`](super::Declaration) in the graph arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclarationId(pub(crate) u32);

impl DeclarationId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Stable index of a [`Reference`](super::Reference) in the graph arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReferenceId(pub(crate) u32);

impl ReferenceId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// The parent of a declaration or reference.
///
/// A back-edge, never owning: ownership flows strictly downward through
/// `declarations`/`references` child lists, so cyclic use is representable
/// without reference counting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Parent {
    Declaration(DeclarationId),
    Reference(ReferenceId),
}

/// The interface shared by declarations and references.
///
/// Declarations and references stay distinct value types; the handful of
/// places that treat them uniformly (validation, tracing) go through this.
pub trait Entity {
    fn kind(&self) -> Kind;
    fn name(&self) -> Option<&SmolStr>;
    fn usr(&self) -> &SmolStr;
    fn location(&self) -> &Location;
    fn parent(&self) -> Option<Parent>;
}
