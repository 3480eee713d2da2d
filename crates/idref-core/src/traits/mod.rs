use crate::{error::InternalError, model::EntityModel, value::Value};

// ============================================================================
// PERSISTENCE COLLABORATOR
// ============================================================================
//
// The codec never talks to a concrete persistence layer; whatever owns the
// entity metadata and identity map implements this contract.
//

///
/// EntityCatalog
///
/// Metadata and lazy-reference provider for entity types.
///
/// ## Semantics
/// - `metadata_for` returns `None` for names the catalog does not know
/// - `reference_for` must not load or verify the row; a dangling identifier
///   yields a reference that only fails once it is resolved
///

pub trait EntityCatalog {
    type Reference;

    fn metadata_for(&self, entity_name: &str) -> Option<&EntityModel>;

    fn reference_for(&self, entity_name: &str, id: Value)
    -> Result<Self::Reference, InternalError>;
}

impl<C> EntityCatalog for &C
where
    C: EntityCatalog + ?Sized,
{
    type Reference = C::Reference;

    fn metadata_for(&self, entity_name: &str) -> Option<&EntityModel> {
        (**self).metadata_for(entity_name)
    }

    fn reference_for(
        &self,
        entity_name: &str,
        id: Value,
    ) -> Result<Self::Reference, InternalError> {
        (**self).reference_for(entity_name, id)
    }
}

// ============================================================================
// ENTITY VALUES
// ============================================================================

///
/// EntityAccessor
///
/// Capability implemented by entity instances so an attribute can be read
/// through its conventional accessor name (`getId`) without compile-time
/// knowledge of the concrete type.
///
/// Returns `None` when the entity has no accessor with that name.
///

pub trait EntityAccessor {
    fn call_accessor(&self, accessor: &str) -> Option<Value>;
}

impl<T> EntityAccessor for Box<T>
where
    T: EntityAccessor + ?Sized,
{
    fn call_accessor(&self, accessor: &str) -> Option<Value> {
        (**self).call_accessor(accessor)
    }
}
