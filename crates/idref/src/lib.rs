//! ## Crate layout
//! - `core`: the entity-reference codec, catalog traits, values, and
//!   observability.
//!
//! The `prelude` module mirrors the surface an application needs to wire a
//! catalog into serde: the codec, its descriptor, and the traits entities and
//! catalogs implement.

pub use idref_core as core;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//
// Macros
//

pub use idref_core::entity_accessors;

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::core::{
        codec::{CodecError, IdRefCodec, RefSource},
        config::CodecConfig,
        db::memory::MemoryCatalog,
        descriptor::{TypeDescriptor, TypeParam},
        model::EntityModel,
        traits::{EntityAccessor, EntityCatalog},
        types::LazyRef,
        value::Value,
    };
    pub use serde::{Deserialize, Serialize, de::DeserializeSeed as _};
}
