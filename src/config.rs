//! Analysis configuration.
//!
//! Configuration is an explicit value passed through the mutator pipeline
//! and the analyzer. There is no process-global state; tests vary options
//! per scenario without leakage.

use smol_str::SmolStr;

/// Options controlling retention and reporting.
#[derive(Clone, Debug, Default)]
pub struct Configuration {
    /// Seed-retain all `public`/`open` declarations.
    pub retain_public: bool,
    /// Seed-retain `@objc`/`@objcMembers` annotated declarations.
    pub retain_objc_annotated: bool,
    /// Suppress the assign-only property rule.
    pub retain_assign_only_properties: bool,
    /// Retain all parameters of protocol requirements and their extensions.
    pub retain_unused_protocol_func_params: bool,
    /// File basenames treated as entry points; every top-level declaration
    /// in a matching file is retained.
    pub entry_point_filenames: Vec<SmolStr>,
    /// USRs of foreign test-harness base classes. Subclasses and their
    /// `test*`/`setUp`/`tearDown` methods are retained.
    pub external_test_base_class_usrs: Vec<SmolStr>,
    /// USRs of foreign codability protocols that trigger `CodingKeys`
    /// retention in conforming types.
    pub external_codable_usrs: Vec<SmolStr>,
    /// Lift the conservative handling of the documented edge cases (`lazy`
    /// stored properties; get/set-only protocol requirements with default
    /// implementations). Off by default.
    pub aggressive: bool,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_retain_public(mut self, retain: bool) -> Self {
        self.retain_public = retain;
        self
    }

    pub fn with_retain_objc_annotated(mut self, retain: bool) -> Self {
        self.retain_objc_annotated = retain;
        self
    }

    pub fn with_retain_assign_only_properties(mut self, retain: bool) -> Self {
        self.retain_assign_only_properties = retain;
        self
    }

    pub fn with_retain_unused_protocol_func_params(mut self, retain: bool) -> Self {
        self.retain_unused_protocol_func_params = retain;
        self
    }

    pub fn with_entry_point_filenames<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        self.entry_point_filenames = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_external_test_base_class_usrs<I, S>(mut self, usrs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        self.external_test_base_class_usrs = usrs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_external_codable_usrs<I, S>(mut self, usrs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        self.external_codable_usrs = usrs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_aggressive(mut self, aggressive: bool) -> Self {
        self.aggressive = aggressive;
        self
    }
}
