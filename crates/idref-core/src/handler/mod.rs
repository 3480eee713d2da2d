//! Type-handler subscriptions.
//!
//! A handler declares which `(direction, format, type)` triples it serves;
//! the registry indexes those declarations so a document walker can find the
//! handler method for a declared field type.


use crate::error::{ErrorClass, ErrorOrigin, InternalError};
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};
use thiserror::Error as ThisError;

///
/// Direction
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Direction {
    Serialization,
    Deserialization,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Serialization => "serialization",
            Self::Deserialization => "deserialization",
        };
        write!(f, "{label}")
    }
}

///
/// Format
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Json,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
        }
    }
}

///
/// HandlerMethod
/// Entry point a subscription routes to.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HandlerMethod {
    SerializeEntityToId,
    DeserializeIdToEntity,
}

///
/// Subscription
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Subscription {
    pub direction: Direction,
    pub format: Format,
    pub type_name: String,
    pub method: HandlerMethod,
}

///
/// SubscribingHandler
///
/// Implemented by type handlers that register themselves for one or more
/// custom type tags.
///

pub trait SubscribingHandler {
    fn subscribing_methods(&self) -> Vec<Subscription>;
}

///
/// RegistryError
///

#[derive(Debug, ThisError)]
pub enum RegistryError {
    #[error("a handler is already registered for {direction}/{format}/'{type_name}'")]
    Duplicate {
        direction: Direction,
        format: Format,
        type_name: String,
    },
}

impl From<RegistryError> for InternalError {
    fn from(err: RegistryError) -> Self {
        Self::new(ErrorClass::Conflict, ErrorOrigin::Registry, err.to_string())
    }
}

type SubscriptionKey = (Direction, Format, String);

///
/// HandlerRegistry
///
/// Owns registered handlers and maps each subscribed triple to the handler
/// and method that serve it.
///

pub struct HandlerRegistry<H> {
    handlers: Vec<H>,
    routes: BTreeMap<SubscriptionKey, (usize, HandlerMethod)>,
}

///
/// HandlerRoute
/// Result of a successful lookup.
///

pub struct HandlerRoute<'a, H> {
    pub handler: &'a H,
    pub method: HandlerMethod,
}

impl<H> HandlerRegistry<H>
where
    H: SubscribingHandler,
{
    #[must_use]
    pub const fn new() -> Self {
        Self {
            handlers: Vec::new(),
            routes: BTreeMap::new(),
        }
    }

    /// Register a handler under every subscription it declares.
    /// Nothing is registered if any declared triple is already taken or
    /// declared twice by the same handler.
    pub fn register(&mut self, handler: H) -> Result<(), RegistryError> {
        let subscriptions = handler.subscribing_methods();
        let mut seen = BTreeSet::new();

        for sub in &subscriptions {
            let key = (sub.direction, sub.format, sub.type_name.clone());
            if self.routes.contains_key(&key) || !seen.insert(key) {
                return Err(RegistryError::Duplicate {
                    direction: sub.direction,
                    format: sub.format,
                    type_name: sub.type_name.clone(),
                });
            }
        }

        let index = self.handlers.len();
        self.handlers.push(handler);
        for sub in subscriptions {
            self.routes
                .insert((sub.direction, sub.format, sub.type_name), (index, sub.method));
        }

        Ok(())
    }

    #[must_use]
    pub fn lookup(
        &self,
        direction: Direction,
        format: Format,
        type_name: &str,
    ) -> Option<HandlerRoute<'_, H>> {
        let (index, method) = *self
            .routes
            .get(&(direction, format, type_name.to_string()))?;

        Some(HandlerRoute {
            handler: &self.handlers[index],
            method,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<H> Default for HandlerRegistry<H>
where
    H: SubscribingHandler,
{
    fn default() -> Self {
        Self::new()
    }
}
