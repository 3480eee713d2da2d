//! Runtime entity metadata.
//!
//! The catalog owns these models; the codec only reads them to find the
//! identifying attribute of a target entity type.

///
/// EntityModel
/// Minimal runtime model for one entity type.
///

#[derive(Debug)]
pub struct EntityModel {
    /// Fully-qualified type path (for diagnostics).
    pub path: &'static str,
    /// Logical name used by type descriptors and catalog lookups.
    pub entity_name: &'static str,
    /// Identifying attribute names, in declaration order.
    pub identifiers: &'static [&'static str],
}

impl EntityModel {
    #[must_use]
    pub const fn new(
        path: &'static str,
        entity_name: &'static str,
        identifiers: &'static [&'static str],
    ) -> Self {
        Self {
            path,
            entity_name,
            identifiers,
        }
    }

    /// Ordered identifying attribute names.
    #[must_use]
    pub const fn identifier_names(&self) -> &'static [&'static str] {
        self.identifiers
    }

    /// Return the identifying attribute when exactly one is declared.
    #[must_use]
    pub const fn single_identifier(&self) -> Option<&'static str> {
        match self.identifiers {
            [name] => Some(*name),
            _ => None,
        }
    }
}
