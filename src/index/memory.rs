//! An in-memory index provider.

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::error::{Error, Result};

use super::provider::{IndexProvider, Occurrence};

/// Provider over records already held in memory.
///
/// Preserves unit insertion order and record order, which makes it both the
/// canonical test double and a practical adapter for embedders that collect
/// records themselves.
#[derive(Clone, Debug, Default)]
pub struct MemoryIndexProvider {
    units: IndexMap<SmolStr, Vec<Occurrence>>,
}

impl MemoryIndexProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or extend) a translation unit.
    pub fn add_unit<I>(&mut self, name: impl Into<SmolStr>, occurrences: I) -> &mut Self
    where
        I: IntoIterator<Item = Occurrence>,
    {
        self.units
            .entry(name.into())
            .or_default()
            .extend(occurrences);
        self
    }

    /// Append a single record to a unit.
    pub fn push(&mut self, unit: impl Into<SmolStr>, occurrence: Occurrence) -> &mut Self {
        self.units.entry(unit.into()).or_default().push(occurrence);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl IndexProvider for MemoryIndexProvider {
    fn unit_names(&self) -> Result<Vec<SmolStr>> {
        Ok(self.units.keys().cloned().collect())
    }

    fn occurrences(&self, unit: &str) -> Result<Vec<Occurrence>> {
        self.units
            .get(unit)
            .cloned()
            .ok_or_else(|| Error::provider(format!("unknown translation unit: {unit}")))
    }
}
