//! # deadwood
//!
//! Dead-code analysis core for a statically-typed, object-oriented
//! language: given the symbol index of a compiled project, find the
//! declarations never transitively reached from the designated entry
//! points.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! scan      → one-shot driver: provider → indexer → mutators → analyzer → report
//! report    → structured results with stable ordering
//! analyze   → retention fixpoint, unused parameters, assign-only properties
//! mutate    → ordered graph transformation passes
//! index     → IndexProvider contract, two-pass indexer
//! graph     → arena-allocated source graph (declarations, references, indices)
//! base      → primitives (Location, Kind, Accessibility, comment directives)
//! ```
//!
//! The crate reasons only over the provider's occurrence stream: it does
//! not compile the analyzed language, resolve its types, or rewrite files.
//!
//! ## Example
//!
//! ```
//! use deadwood::{Configuration, MemoryIndexProvider, Scan};
//! use deadwood::{Kind, Location, Occurrence};
//!
//! let mut provider = MemoryIndexProvider::new();
//! provider.push(
//!     "main.swift",
//!     Occurrence::definition("App", Kind::Class, "c:App.Unused", Location::new("/main.swift", 1, 7))
//!         .with_name("Unused"),
//! );
//!
//! let configuration = Configuration::new();
//! let result = Scan::new(&configuration).perform(&provider)?;
//! assert_eq!(result.unreferenced.len(), 1);
//! # Ok::<(), deadwood::Error>(())
//! ```

// ============================================================================
// MODULES (dependency order: base → graph → index → mutate → analyze → report)
// ============================================================================

/// Foundation types: Location, Kind, Accessibility, comment directives
pub mod base;

/// The in-memory source graph and its indices
pub mod graph;

/// Index ingestion: provider contract and indexer
pub mod index;

/// Ordered graph transformation passes
pub mod mutate;

/// Retention analysis
pub mod analyze;

/// Structured scan results
pub mod report;

/// Analysis configuration
pub mod config;

/// Error types
pub mod error;

/// The one-shot analysis driver
pub mod scan;

// Re-export the common surface
pub use analyze::Analyzer;
pub use base::{Accessibility, CommentCommand, DeclaredAccessibility, Kind, Location};
pub use config::Configuration;
pub use error::{Error, Result};
pub use graph::{Declaration, DeclarationId, Entity, Parent, Reference, ReferenceId, SourceGraph};
pub use index::{IndexProvider, Indexer, MemoryIndexProvider, Occurrence, OccurrenceRole};
pub use report::{ScanItem, ScanReason, ScanResult};
pub use scan::Scan;
