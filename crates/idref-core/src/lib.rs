//! Core runtime for IdRef: the entity-reference codec, the catalog and
//! accessor traits it consumes, scalar identifier values, and observability.
#![warn(unreachable_pub)]

#[macro_use]
mod macros;

// public exports are one module level down
pub mod codec;
pub mod config;
pub mod db;
pub mod descriptor;
pub mod error;
pub mod handler;
pub mod model;
pub mod obs;
pub mod traits;
pub mod types;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// CONSTANTS
///

/// Type tag the codec subscribes to unless configured otherwise.
pub const ENTITY_ID_TYPE: &str = "EntityId";

/// Prefix of the conventional identifier accessor (`getId`).
pub const ACCESSOR_PREFIX: &str = "get";

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, sinks, or registries are re-exported here.
///

pub mod prelude {
    pub use crate::{
        codec::{IdRefCodec, RefSource},
        descriptor::{TypeDescriptor, TypeParam},
        model::EntityModel,
        traits::{EntityAccessor, EntityCatalog},
        types::LazyRef,
        value::Value,
    };
}
