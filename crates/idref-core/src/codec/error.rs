use crate::{
    descriptor::EntityNameError,
    error::{ErrorClass, ErrorOrigin, InternalError},
    value::ValueKind,
};
use std::fmt;
use thiserror::Error as ThisError;

///
/// CodecError
///
/// Every variant is a caller-visible configuration or usage error.
/// None of them are transient, so nothing here is retried.
///

#[derive(Debug, ThisError)]
pub enum CodecError {
    #[error("you must specify the entity name in {type_name}<'entity:name'>: {source}")]
    MissingEntityName {
        type_name: String,
        source: EntityNameError,
    },

    #[error("value of {type_name}<'{entity_name}'> must be an entity or null, {given} given")]
    InvalidEntityValue {
        type_name: String,
        entity_name: String,
        given: ValueKind,
    },

    #[error("can't find metadata for entity '{entity_name}'")]
    UnknownEntityType { entity_name: String },

    #[error(
        "entity references support entities with only one identifier, '{entity_name}' declares {count} identifier(s)"
    )]
    UnsupportedCompositeIdentifier { entity_name: String, count: usize },

    #[error("entity '{entity_name}' has no accessor '{accessor}'")]
    MissingAccessor {
        entity_name: String,
        accessor: String,
    },

    #[error("identifier of '{entity_name}' must be a scalar, {given} given")]
    InvalidIdentifierValue {
        entity_name: String,
        given: ValueKind,
    },

    #[error("catalog could not reference '{entity_name}': {source}")]
    Reference {
        entity_name: String,
        source: InternalError,
    },
}

impl CodecError {
    /// Return a stable error kind independent of message text.
    #[must_use]
    pub const fn kind(&self) -> CodecErrorKind {
        match self {
            Self::MissingEntityName { .. } => CodecErrorKind::MissingEntityName,
            Self::InvalidEntityValue { .. } => CodecErrorKind::InvalidEntityValue,
            Self::UnknownEntityType { .. } => CodecErrorKind::UnknownEntityType,
            Self::UnsupportedCompositeIdentifier { .. } => {
                CodecErrorKind::UnsupportedCompositeIdentifier
            }
            Self::MissingAccessor { .. } => CodecErrorKind::MissingAccessor,
            Self::InvalidIdentifierValue { .. } => CodecErrorKind::InvalidIdentifierValue,
            Self::Reference { .. } => CodecErrorKind::Reference,
        }
    }

    const fn class(&self) -> ErrorClass {
        match self {
            Self::MissingEntityName { .. }
            | Self::InvalidEntityValue { .. }
            | Self::InvalidIdentifierValue { .. } => ErrorClass::InvalidInput,
            Self::UnknownEntityType { .. }
            | Self::UnsupportedCompositeIdentifier { .. }
            | Self::MissingAccessor { .. } => ErrorClass::Unsupported,
            Self::Reference { source, .. } => source.class,
        }
    }
}

impl From<CodecError> for InternalError {
    fn from(err: CodecError) -> Self {
        let origin = match &err {
            CodecError::Reference { source, .. } => source.origin,
            _ => ErrorOrigin::Codec,
        };

        Self::new(err.class(), origin, err.to_string())
    }
}

///
/// CodecErrorKind
///
/// Stable error-kind taxonomy for codec failures.
///

#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum CodecErrorKind {
    MissingEntityName,
    InvalidEntityValue,
    UnknownEntityType,
    UnsupportedCompositeIdentifier,
    MissingAccessor,
    InvalidIdentifierValue,
    Reference,
}

impl CodecErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingEntityName => "missing_entity_name",
            Self::InvalidEntityValue => "invalid_entity_value",
            Self::UnknownEntityType => "unknown_entity_type",
            Self::UnsupportedCompositeIdentifier => "unsupported_composite_identifier",
            Self::MissingAccessor => "missing_accessor",
            Self::InvalidIdentifierValue => "invalid_identifier_value",
            Self::Reference => "reference",
        }
    }
}

impl fmt::Display for CodecErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
