//! Foundation types for the analysis core.
//!
//! This module provides the value types used throughout the crate:
//! - [`Location`] - Canonical source positions, totally ordered
//! - [`Kind`] - Closed, string-backed symbol kind enumeration
//! - [`Accessibility`], [`DeclaredAccessibility`] - Ordered access levels
//! - [`CommentCommand`] - Parsed suppression directives
//!
//! This module has NO dependencies on other deadwood modules.

mod accessibility;
mod comment;
mod kind;
mod location;

pub use accessibility::{Accessibility, DeclaredAccessibility};
pub use comment::CommentCommand;
pub use kind::Kind;
pub use location::Location;
