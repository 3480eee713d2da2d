use crate::value::Value;
use serde::{Serialize, Serializer};
use std::fmt;

///
/// LazyRef
///
/// Deferred reference to one entity row: the target entity name plus its
/// identifier. Building one never touches storage; the row is only loaded
/// when a catalog resolves it.
///

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct LazyRef {
    entity_name: String,
    id: Value,
}

impl LazyRef {
    #[must_use]
    pub fn new(entity_name: impl Into<String>, id: Value) -> Self {
        Self {
            entity_name: entity_name.into(),
            id,
        }
    }

    #[must_use]
    pub fn entity_name(&self) -> &str {
        &self.entity_name
    }

    /// Return the referenced identifier.
    #[must_use]
    pub const fn id(&self) -> &Value {
        &self.id
    }

    #[must_use]
    pub fn into_id(self) -> Value {
        self.id
    }
}

impl fmt::Display for LazyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.entity_name, self.id)
    }
}

// A reference written back out is just its identifier.
impl Serialize for LazyRef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.id.serialize(serializer)
    }
}
