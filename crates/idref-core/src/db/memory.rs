//! Module: db::memory
//! Responsibility: a process-local catalog holding entity models and rows,
//! handing out lazy references and resolving them on demand.
//! Does not own: persistence, indexing, or row mutation after insert.

use crate::{
    error::InternalError,
    model::EntityModel,
    traits::{EntityAccessor, EntityCatalog},
    types::LazyRef,
    value::Value,
};
use std::collections::BTreeMap;

///
/// MemoryCatalog
///

#[derive(Default)]
pub struct MemoryCatalog {
    models: BTreeMap<&'static str, &'static EntityModel>,
    rows: BTreeMap<(String, Value), Box<dyn EntityAccessor>>,
}

impl MemoryCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the model for one entity type.
    pub fn register_model(&mut self, model: &'static EntityModel) -> Result<(), InternalError> {
        if self.models.contains_key(model.entity_name) {
            return Err(InternalError::catalog_conflict(format!(
                "entity model already registered: '{}'",
                model.entity_name
            )));
        }
        self.models.insert(model.entity_name, model);

        Ok(())
    }

    /// Store one row under its identifier.
    pub fn insert<E>(
        &mut self,
        entity_name: &str,
        id: impl Into<Value>,
        row: E,
    ) -> Result<(), InternalError>
    where
        E: EntityAccessor + 'static,
    {
        if !self.models.contains_key(entity_name) {
            return Err(InternalError::unsupported_entity_name(entity_name));
        }

        let key = (entity_name.to_string(), id.into());
        if self.rows.contains_key(&key) {
            return Err(InternalError::catalog_conflict(format!(
                "entity already stored: {}#{}",
                key.0, key.1
            )));
        }
        self.rows.insert(key, Box::new(row));

        Ok(())
    }

    /// Load the row a reference points at.
    pub fn resolve(&self, reference: &LazyRef) -> Result<&dyn EntityAccessor, InternalError> {
        let key = (reference.entity_name().to_string(), reference.id().clone());

        self.rows
            .get(&key)
            .map(|row| &**row)
            .ok_or_else(|| InternalError::catalog_not_found(reference.entity_name(), reference.id()))
    }

    #[must_use]
    pub fn contains(&self, reference: &LazyRef) -> bool {
        self.rows.contains_key(&(
            reference.entity_name().to_string(),
            reference.id().clone(),
        ))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl EntityCatalog for MemoryCatalog {
    type Reference = LazyRef;

    fn metadata_for(&self, entity_name: &str) -> Option<&EntityModel> {
        self.models.get(entity_name).copied()
    }

    fn reference_for(&self, entity_name: &str, id: Value) -> Result<LazyRef, InternalError> {
        if !self.models.contains_key(entity_name) {
            return Err(InternalError::unsupported_entity_name(entity_name));
        }

        Ok(LazyRef::new(entity_name, id))
    }
}

///
/// TESTS
///
