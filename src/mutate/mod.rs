//! Ordered graph transformation passes.
//!
//! Mutators run in a fixed order between indexing and analysis. Each is
//! idempotent: running the pipeline twice leaves the graph unchanged.

mod accessibility;
mod comment;
mod entry_point;
mod external_conformance;
mod implicit;
mod override_chains;

pub use accessibility::InferExtensionAccessibility;
pub use comment::ApplyCommentCommands;
pub use entry_point::MarkEntryPoints;
pub use external_conformance::MarkExternalConformanceWitnesses;
pub use implicit::SynthesizeImplicitMembers;
pub use override_chains::BuildOverrideChains;

use tracing::debug;

use crate::config::Configuration;
use crate::error::Result;
use crate::graph::SourceGraph;

/// A single transformation pass over the graph.
pub trait GraphMutator {
    fn name(&self) -> &'static str;
    fn mutate(&self, graph: &mut SourceGraph, configuration: &Configuration) -> Result<()>;
}

/// Run the full pipeline in its fixed order.
pub fn run_all(graph: &mut SourceGraph, configuration: &Configuration) -> Result<()> {
    let mutators: [&dyn GraphMutator; 6] = [
        &ApplyCommentCommands,
        &InferExtensionAccessibility,
        &SynthesizeImplicitMembers,
        &MarkExternalConformanceWitnesses,
        &BuildOverrideChains,
        &MarkEntryPoints,
    ];
    for mutator in mutators {
        debug!(pass = mutator.name(), "running mutator");
        mutator.mutate(graph, configuration)?;
        #[cfg(debug_assertions)]
        if let Err(message) = crate::graph::validator::validate(graph) {
            panic!("graph invariant violated after {}: {message}", mutator.name());
        }
    }
    Ok(())
}
