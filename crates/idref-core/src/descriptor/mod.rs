//! Module: descriptor
//! Responsibility: the type descriptor handed to a type handler, and
//! validation of the target entity name it carries.
//!
//! Invariants:
//! - The entity name is the first parameter, a string, and non-empty.
//! - An `EntityName` can only be built through validation.


use crate::ENTITY_ID_TYPE;
use derive_more::{Deref, Display};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// EntityNameError
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum EntityNameError {
    #[error("no type parameters given")]
    Missing,

    #[error("first type parameter is {kind}, expected a string")]
    NotText { kind: &'static str },

    #[error("entity name is empty")]
    Empty,
}

///
/// EntityName
///
/// Validated logical entity name taken from a type descriptor.
///

#[derive(Clone, Debug, Deref, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[deref(forward)]
pub struct EntityName(String);

impl EntityName {
    pub fn try_from_str(name: &str) -> Result<Self, EntityNameError> {
        if name.is_empty() {
            return Err(EntityNameError::Empty);
        }

        Ok(Self(name.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

///
/// TypeParam
///
/// One descriptor parameter. Parameters are usually quoted strings, but
/// integers and nested types are legal in type declarations too.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TypeParam {
    Text(String),
    Int(i64),
    Type(TypeDescriptor),
}

impl TypeParam {
    const fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Int(_) => "int",
            Self::Type(_) => "type",
        }
    }
}

impl From<&str> for TypeParam {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<i64> for TypeParam {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<TypeDescriptor> for TypeParam {
    fn from(v: TypeDescriptor) -> Self {
        Self::Type(v)
    }
}

///
/// TypeDescriptor
///
/// Type tag name plus ordered parameters, e.g. `EntityId<'Contact'>`.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TypeDescriptor {
    pub name: String,
    #[serde(default)]
    pub params: Vec<TypeParam>,
}

impl TypeDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
        }
    }

    /// Descriptor for the entity-reference type targeting `entity_name`.
    pub fn entity_id(entity_name: impl Into<String>) -> Self {
        Self::new(ENTITY_ID_TYPE).with_param(TypeParam::Text(entity_name.into()))
    }

    #[must_use]
    pub fn with_param(mut self, param: impl Into<TypeParam>) -> Self {
        self.params.push(param.into());
        self
    }

    /// Validate and return the target entity name (first parameter).
    pub fn entity_name(&self) -> Result<EntityName, EntityNameError> {
        match self.params.first() {
            None => Err(EntityNameError::Missing),
            Some(TypeParam::Text(name)) => EntityName::try_from_str(name),
            Some(other) => Err(EntityNameError::NotText { kind: other.kind() }),
        }
    }
}
