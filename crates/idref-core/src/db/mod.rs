//! Catalog implementations shipped with the crate.

pub mod memory;
