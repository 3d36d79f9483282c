//! Structured scan results.
//!
//! The core returns data; rendering (terminal, JSON, editors) belongs to
//! the caller. Items are sorted by `(file, line, column, kind, name)` so
//! identical runs emit identical reports.

use smol_str::SmolStr;

use crate::base::{Kind, Location};
use crate::graph::SourceGraph;

/// Why a declaration appears in the report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ScanReason {
    /// Never reached from any entry point.
    Unused,
    /// Reached, but only ever written.
    AssignOnly,
    /// The enclosing function is live but never reads the parameter.
    UnusedParameter,
}

impl ScanReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unused => "unused",
            Self::AssignOnly => "assignOnly",
            Self::UnusedParameter => "unusedParameter",
        }
    }
}

/// One reported declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScanItem {
    pub location: Location,
    pub kind: Kind,
    pub name: Option<SmolStr>,
    pub reason: ScanReason,
}

/// The analysis output, split the way callers present it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScanResult {
    /// Declarations never reached from an entry point.
    pub unreferenced: Vec<ScanItem>,
    /// Stored properties that are only ever assigned.
    pub assign_only: Vec<ScanItem>,
    /// Unused parameters of live functions.
    pub unused_parameters: Vec<ScanItem>,
}

impl ScanResult {
    pub fn is_empty(&self) -> bool {
        self.unreferenced.is_empty()
            && self.assign_only.is_empty()
            && self.unused_parameters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.unreferenced.len() + self.assign_only.len() + self.unused_parameters.len()
    }
}

/// Build the report from an analyzed graph.
pub fn build(graph: &SourceGraph) -> ScanResult {
    let mut result = ScanResult::default();

    for (id, declaration) in graph.declarations() {
        if declaration.is_implicit || graph.is_ignored(id) {
            continue;
        }

        if graph.is_assign_only(id) {
            result.assign_only.push(ScanItem {
                location: declaration.location.clone(),
                kind: declaration.kind,
                name: declaration.name.clone(),
                reason: ScanReason::AssignOnly,
            });
            continue;
        }

        if !declaration.is_retained && reportable_as_unused(declaration.kind) {
            result.unreferenced.push(ScanItem {
                location: declaration.location.clone(),
                kind: declaration.kind,
                name: declaration.name.clone(),
                reason: ScanReason::Unused,
            });
        }

        for parameter in &declaration.unused_parameters {
            let Some(parameter) = graph.get_declaration(*parameter) else {
                continue;
            };
            result.unused_parameters.push(ScanItem {
                location: parameter.location.clone(),
                kind: parameter.kind,
                name: parameter.name.clone(),
                reason: ScanReason::UnusedParameter,
            });
        }
    }

    sort(&mut result.unreferenced);
    sort(&mut result.assign_only);
    sort(&mut result.unused_parameters);
    result
}

/// Kinds reported in their own right. Parameters go through the dedicated
/// analysis; accessors and generic type parameters are subsumed by their
/// owner; synthetic module containers are not user code.
fn reportable_as_unused(kind: Kind) -> bool {
    !matches!(kind, Kind::Module | Kind::VarParameter | Kind::GenericTypeParam)
        && !kind.is_accessor()
}

fn sort(items: &mut [ScanItem]) {
    items.sort_by(|a, b| {
        a.location
            .cmp(&b.location)
            .then(a.kind.cmp(&b.kind))
            .then(a.name.cmp(&b.name))
    });
}
