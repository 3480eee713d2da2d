use crate::{
    ENTITY_ID_TYPE,
    error::{ErrorClass, ErrorOrigin, InternalError},
    handler::Format,
};
use serde::{Deserialize, Serialize};

///
/// CodecConfig
///
/// Construction-time settings for an `IdRefCodec`.
/// Every field has a default, so a partial JSON object is a valid config.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Type tag the codec subscribes to.
    pub type_name: String,
    /// Document format the subscriptions are registered for.
    pub format: Format,
    /// Print a `[debug]` trace line for every encode/decode.
    pub debug: bool,
}

impl CodecConfig {
    /// Parse a config from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, InternalError> {
        serde_json::from_str(json).map_err(|err| {
            InternalError::new(
                ErrorClass::InvalidInput,
                ErrorOrigin::Config,
                format!("invalid codec config: {err}"),
            )
        })
    }

    #[must_use]
    pub const fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            type_name: ENTITY_ID_TYPE.to_string(),
            format: Format::Json,
            debug: false,
        }
    }
}
