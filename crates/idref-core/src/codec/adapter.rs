use crate::{
    codec::{IdRefCodec, RefSource},
    descriptor::TypeDescriptor,
    traits::EntityCatalog,
    value::Value,
};
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, DeserializeSeed},
    ser,
};

///
/// EncodeRef
///
/// `Serialize` view of one entity-reference field. Runs the codec when
/// serialized and writes the identifier; codec errors abort the enclosing
/// serializer call.
///

pub struct EncodeRef<'a, C> {
    codec: &'a IdRefCodec<C>,
    source: RefSource<'a>,
    ty: &'a TypeDescriptor,
}

impl<'a, C> EncodeRef<'a, C> {
    pub(crate) const fn new(
        codec: &'a IdRefCodec<C>,
        source: RefSource<'a>,
        ty: &'a TypeDescriptor,
    ) -> Self {
        Self { codec, source, ty }
    }
}

impl<C> Serialize for EncodeRef<'_, C>
where
    C: EntityCatalog,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let id = self
            .codec
            .encode(self.source, self.ty)
            .map_err(<S::Error as ser::Error>::custom)?;

        id.serialize(serializer)
    }
}

///
/// DecodeRefSeed
///
/// Stateful deserialization seed: reads one identifier value and decodes it
/// into a catalog reference (or `None` for null).
///

pub struct DecodeRefSeed<'a, C> {
    codec: &'a IdRefCodec<C>,
    ty: &'a TypeDescriptor,
}

impl<'a, C> DecodeRefSeed<'a, C> {
    pub(crate) const fn new(codec: &'a IdRefCodec<C>, ty: &'a TypeDescriptor) -> Self {
        Self { codec, ty }
    }
}

impl<'de, C> DeserializeSeed<'de> for DecodeRefSeed<'_, C>
where
    C: EntityCatalog,
{
    type Value = Option<C::Reference>;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        let id = Value::deserialize(deserializer)?;

        self.codec.decode(id, self.ty).map_err(<D::Error as de::Error>::custom)
    }
}
