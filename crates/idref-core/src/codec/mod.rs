//! Module: codec
//! Responsibility: represent an entity reference as its bare identifier on
//! write, and turn an identifier back into a deferred reference on read.
//! Does not own: entity metadata, reference construction, or row loading;
//! those belong to the injected `EntityCatalog`.
//!
//! Invariants:
//! - The target entity type declares exactly one identifying attribute.
//! - Decode never loads or verifies the referenced row.
//! - Encode validates the entity name before anything else, null included.

mod adapter;
mod error;

#[cfg(test)]
mod tests;

use crate::{
    ACCESSOR_PREFIX,
    config::CodecConfig,
    descriptor::{EntityName, TypeDescriptor},
    handler::{Direction, HandlerMethod, SubscribingHandler, Subscription},
    obs::sink::{self, CodecEvent},
    traits::{EntityAccessor, EntityCatalog},
    value::Value,
};
use std::fmt;

// re-exports
pub use adapter::{DecodeRefSeed, EncodeRef};
pub use error::{CodecError, CodecErrorKind};

///
/// RefSource
///
/// What the document walker hands the codec on the write path.
/// `Value` covers non-entity data reached through a dynamic document; it is
/// always rejected, but carries its kind into the error.
///

#[derive(Clone, Copy)]
pub enum RefSource<'a> {
    Null,
    Entity(&'a dyn EntityAccessor),
    Value(&'a Value),
}

impl<'a> RefSource<'a> {
    /// Build a source from an optional typed entity.
    pub fn from_entity<E>(entity: Option<&'a E>) -> Self
    where
        E: EntityAccessor,
    {
        match entity {
            Some(entity) => Self::Entity(entity),
            None => Self::Null,
        }
    }

    /// Build a source from a raw document value; `Null` maps to `Null`.
    #[must_use]
    pub const fn from_value(value: &'a Value) -> Self {
        match value {
            Value::Null => Self::Null,
            _ => Self::Value(value),
        }
    }
}

impl<'a> From<&'a dyn EntityAccessor> for RefSource<'a> {
    fn from(entity: &'a dyn EntityAccessor) -> Self {
        Self::Entity(entity)
    }
}

impl fmt::Debug for RefSource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Entity(_) => f.write_str("Entity(..)"),
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
        }
    }
}

/// Conventional accessor for an identifying attribute: `id` -> `getId`.
/// Only the first character is upper-cased.
#[must_use]
pub fn accessor_name(attribute: &str) -> String {
    let mut chars = attribute.chars();
    let mut out = String::with_capacity(ACCESSOR_PREFIX.len() + attribute.len());
    out.push_str(ACCESSOR_PREFIX);
    if let Some(first) = chars.next() {
        out.extend(first.to_uppercase());
        out.push_str(chars.as_str());
    }

    out
}

///
/// IdRefCodec
///
/// Entity-reference type handler. Holds the catalog for its whole lifetime
/// and only ever reads from it.
///

pub struct IdRefCodec<C> {
    catalog: C,
    config: CodecConfig,
}

impl<C> IdRefCodec<C>
where
    C: EntityCatalog,
{
    #[must_use]
    pub fn new(catalog: C) -> Self {
        Self::with_config(catalog, CodecConfig::default())
    }

    #[must_use]
    pub const fn with_config(catalog: C, config: CodecConfig) -> Self {
        Self { catalog, config }
    }

    #[must_use]
    pub const fn catalog(&self) -> &C {
        &self.catalog
    }

    #[must_use]
    pub const fn config(&self) -> &CodecConfig {
        &self.config
    }

    fn debug_log(&self, s: impl AsRef<str>) {
        if self.config.debug {
            println!("[debug] {}", s.as_ref());
        }
    }

    /// Encode an entity reference as the entity's identifier value.
    pub fn encode(&self, source: RefSource<'_>, ty: &TypeDescriptor) -> Result<Value, CodecError> {
        let direction = Direction::Serialization;
        let entity_name = Self::checked_entity_name(direction, ty)?;

        let entity = match source {
            RefSource::Null => {
                sink::record(CodecEvent::NullShortCircuit {
                    direction,
                    entity_name: Some(&entity_name),
                });
                self.debug_log(format!("encode {entity_name}: null"));

                return Ok(Value::Null);
            }
            RefSource::Entity(entity) => entity,
            RefSource::Value(value) => {
                let err = CodecError::InvalidEntityValue {
                    type_name: ty.name.clone(),
                    entity_name: entity_name.to_string(),
                    given: value.kind(),
                };

                return Err(Self::failed(direction, Some(&entity_name), err));
            }
        };

        self.read_identifier(&entity_name, entity)
            .inspect(|id| self.debug_log(format!("encode {entity_name}: {id}")))
            .map_err(|err| Self::failed(direction, Some(&entity_name), err))
    }

    /// Decode an identifier into a deferred reference from the catalog.
    /// Null short-circuits before the descriptor is looked at.
    pub fn decode(
        &self,
        id: Value,
        ty: &TypeDescriptor,
    ) -> Result<Option<C::Reference>, CodecError> {
        let direction = Direction::Deserialization;

        if id.is_null() {
            sink::record(CodecEvent::Call {
                direction,
                entity_name: None,
            });
            sink::record(CodecEvent::NullShortCircuit {
                direction,
                entity_name: None,
            });
            self.debug_log("decode: null");

            return Ok(None);
        }

        let entity_name = Self::checked_entity_name(direction, ty)?;

        self.reference(&entity_name, id)
            .inspect(|_| self.debug_log(format!("decode {entity_name}: deferred reference")))
            .map(Some)
            .map_err(|err| Self::failed(direction, Some(&entity_name), err))
    }

    /// Resolve the single identifying attribute name of an entity type.
    pub fn resolve_identifier(&self, entity_name: &str) -> Result<&'static str, CodecError> {
        let model = self.catalog.metadata_for(entity_name).ok_or_else(|| {
            CodecError::UnknownEntityType {
                entity_name: entity_name.to_string(),
            }
        })?;

        model
            .single_identifier()
            .ok_or_else(|| CodecError::UnsupportedCompositeIdentifier {
                entity_name: entity_name.to_string(),
                count: model.identifier_names().len(),
            })
    }

    /// Writer for one entity-reference field, usable anywhere serde expects
    /// a `Serialize` value.
    #[must_use]
    pub const fn encode_ref<'a>(
        &'a self,
        source: RefSource<'a>,
        ty: &'a TypeDescriptor,
    ) -> EncodeRef<'a, C> {
        EncodeRef::new(self, source, ty)
    }

    /// Seed that reads one identifier and decodes it into a reference.
    #[must_use]
    pub const fn decode_seed<'a>(&'a self, ty: &'a TypeDescriptor) -> DecodeRefSeed<'a, C> {
        DecodeRefSeed::new(self, ty)
    }

    // Validate the descriptor's entity name.
    fn entity_name(ty: &TypeDescriptor) -> Result<EntityName, CodecError> {
        ty.entity_name()
            .map_err(|source| CodecError::MissingEntityName {
                type_name: ty.name.clone(),
                source,
            })
    }

    // Validate the entity name and record the call. A descriptor without a
    // usable name still counts as a call, attributed to no entity.
    fn checked_entity_name(
        direction: Direction,
        ty: &TypeDescriptor,
    ) -> Result<EntityName, CodecError> {
        match Self::entity_name(ty) {
            Ok(entity_name) => {
                sink::record(CodecEvent::Call {
                    direction,
                    entity_name: Some(&entity_name),
                });

                Ok(entity_name)
            }
            Err(err) => {
                sink::record(CodecEvent::Call {
                    direction,
                    entity_name: None,
                });

                Err(Self::failed(direction, None, err))
            }
        }
    }

    // Read the identifier from an entity through its accessor.
    fn read_identifier(
        &self,
        entity_name: &EntityName,
        entity: &dyn EntityAccessor,
    ) -> Result<Value, CodecError> {
        let identifier = self.resolve_identifier(entity_name)?;
        let accessor = accessor_name(identifier);

        entity
            .call_accessor(&accessor)
            .ok_or_else(|| CodecError::MissingAccessor {
                entity_name: entity_name.to_string(),
                accessor,
            })
    }

    // Validate the identifier and request a deferred reference.
    fn reference(&self, entity_name: &EntityName, id: Value) -> Result<C::Reference, CodecError> {
        self.resolve_identifier(entity_name)?;

        if !id.is_scalar() {
            return Err(CodecError::InvalidIdentifierValue {
                entity_name: entity_name.to_string(),
                given: id.kind(),
            });
        }

        self.catalog
            .reference_for(entity_name, id)
            .map_err(|source| CodecError::Reference {
                entity_name: entity_name.to_string(),
                source,
            })
    }

    // Record a failure and hand the error back.
    fn failed(direction: Direction, entity_name: Option<&str>, err: CodecError) -> CodecError {
        sink::record(CodecEvent::Failed {
            direction,
            entity_name,
            kind: err.kind(),
        });

        err
    }
}

impl<C> SubscribingHandler for IdRefCodec<C>
where
    C: EntityCatalog,
{
    fn subscribing_methods(&self) -> Vec<Subscription> {
        vec![
            Subscription {
                direction: Direction::Serialization,
                format: self.config.format,
                type_name: self.config.type_name.clone(),
                method: HandlerMethod::SerializeEntityToId,
            },
            Subscription {
                direction: Direction::Deserialization,
                format: self.config.format,
                type_name: self.config.type_name.clone(),
                method: HandlerMethod::DeserializeIdToEntity,
            },
        ]
    }
}
