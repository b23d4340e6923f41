//! Opaque, stable identifiers for persons and works.
//!
//! Identifiers are canonical absolute resource locators in the source
//! system. The `www.` host prefix is a variant of the same resource, so it
//! is stripped on construction; after that, equality is exact string
//! equality and identifiers never change.

use std::fmt;

fn canonicalize(raw: String) -> String {
    if raw.contains("://www.") {
        raw.replacen("://www.", "://", 1)
    } else {
        raw
    }
}

/// Identifier of a person page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PersonId(String);

impl PersonId {
    /// Create an id from an absolute locator, canonicalizing the host.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(canonicalize(raw.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a work's cast-listing page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorkId(String);

impl WorkId {
    /// Create an id from an absolute locator, canonicalizing the host.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(canonicalize(raw.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A person as extracted from a work's cast listing.
///
/// Transient: produced during batch construction and dropped once the ids
/// have been folded into the next level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonRecord {
    pub name: String,
    pub id: PersonId,
}

/// A work as extracted from a person's filmography.
///
/// Transient, like [`PersonRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkRecord {
    pub title: String,
    pub id: WorkId,
}
