//! Access-control levels.

use std::fmt;

/// An access-control level, totally ordered from most to least restrictive:
/// `private < fileprivate < internal < public < open`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Accessibility {
    Private,
    FilePrivate,
    Internal,
    Public,
    Open,
}

impl Accessibility {
    /// Parse the provider's string spelling.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "private" => Some(Self::Private),
            "fileprivate" => Some(Self::FilePrivate),
            "internal" => Some(Self::Internal),
            "public" => Some(Self::Public),
            "open" => Some(Self::Open),
            _ => None,
        }
    }

    /// The source-level spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::FilePrivate => "fileprivate",
            Self::Internal => "internal",
            Self::Public => "public",
            Self::Open => "open",
        }
    }

    /// Whether this level is visible outside the declaring module.
    pub fn is_exported(&self) -> bool {
        matches!(self, Self::Public | Self::Open)
    }
}

impl fmt::Display for Accessibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An accessibility value together with whether it was written in source.
///
/// Inferred values may be rewritten by the extension-accessibility pass;
/// explicit values never are.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DeclaredAccessibility {
    pub value: Accessibility,
    pub is_explicit: bool,
}

impl DeclaredAccessibility {
    /// An explicitly written level.
    pub fn explicit(value: Accessibility) -> Self {
        Self {
            value,
            is_explicit: true,
        }
    }

    /// An inferred level.
    pub fn inferred(value: Accessibility) -> Self {
        Self {
            value,
            is_explicit: false,
        }
    }
}

impl Default for DeclaredAccessibility {
    fn default() -> Self {
        Self::inferred(Accessibility::Internal)
    }
}
