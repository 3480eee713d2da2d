use super::*;
use crate::{
    db::memory::MemoryCatalog,
    error::{ErrorClass, ErrorOrigin, InternalError},
    handler::{Format, HandlerRegistry},
    model::EntityModel,
    obs::{self, EventSink},
    test_fixtures::{Contact, Ledger, Tag, contact_catalog},
    types::LazyRef,
};
use std::{cell::Cell, cell::RefCell, rc::Rc};

// ---- helpers -----------------------------------------------------------

fn codec() -> IdRefCodec<MemoryCatalog> {
    IdRefCodec::new(contact_catalog())
}

fn contact_ty() -> TypeDescriptor {
    TypeDescriptor::entity_id("Contact")
}

///
/// CountingCatalog
/// Wraps a catalog and counts metadata lookups.
///

struct CountingCatalog {
    inner: MemoryCatalog,
    lookups: Cell<usize>,
}

impl EntityCatalog for CountingCatalog {
    type Reference = LazyRef;

    fn metadata_for(&self, entity_name: &str) -> Option<&EntityModel> {
        self.lookups.set(self.lookups.get() + 1);
        self.inner.metadata_for(entity_name)
    }

    fn reference_for(&self, entity_name: &str, id: Value) -> Result<LazyRef, InternalError> {
        self.inner.reference_for(entity_name, id)
    }
}

///
/// FailingCatalog
/// Knows the Contact model but refuses to build references.
///

struct FailingCatalog(MemoryCatalog);

impl EntityCatalog for FailingCatalog {
    type Reference = LazyRef;

    fn metadata_for(&self, entity_name: &str) -> Option<&EntityModel> {
        self.0.metadata_for(entity_name)
    }

    fn reference_for(&self, _: &str, _: Value) -> Result<LazyRef, InternalError> {
        Err(InternalError::new(
            ErrorClass::Internal,
            ErrorOrigin::Catalog,
            "identity map closed",
        ))
    }
}

///
/// CapturingSink
///

#[derive(Default)]
struct CapturingSink {
    events: RefCell<Vec<String>>,
}

impl EventSink for CapturingSink {
    fn record(&self, event: obs::CodecEvent<'_>) {
        self.events.borrow_mut().push(format!("{event:?}"));
    }
}

// ---- accessor naming ---------------------------------------------------

#[test]
fn accessor_name_capitalizes_first_char_only() {
    assert_eq!(accessor_name("id"), "getId");
    assert_eq!(accessor_name("accountId"), "getAccountId");
    assert_eq!(accessor_name("user_id"), "getUser_id");
    assert_eq!(accessor_name(""), "get");
}

// ---- encode ------------------------------------------------------------

#[test]
fn encode_contact_returns_bare_identifier() {
    let contact = Contact::new(123, "ada@example.com");
    let id = codec()
        .encode(RefSource::from_entity(Some(&contact)), &contact_ty())
        .unwrap();

    assert_eq!(id, Value::Int(123));
}

#[test]
fn encode_text_identifier_unchanged() {
    let tag = Tag {
        slug: "Mixed-Case Slug".to_string(),
    };
    let id = codec()
        .encode(RefSource::Entity(&tag), &TypeDescriptor::entity_id("Tag"))
        .unwrap();

    assert_eq!(id, Value::from("Mixed-Case Slug"));
}

#[test]
fn encode_null_short_circuits() {
    let id = codec().encode(RefSource::Null, &contact_ty()).unwrap();
    assert_eq!(id, Value::Null);

    let id = codec()
        .encode(RefSource::from_entity::<Contact>(None), &contact_ty())
        .unwrap();
    assert_eq!(id, Value::Null);
}

#[test]
fn encode_null_skips_metadata_lookup() {
    let catalog = CountingCatalog {
        inner: contact_catalog(),
        lookups: Cell::new(0),
    };
    let codec = IdRefCodec::new(&catalog);

    codec.encode(RefSource::Null, &contact_ty()).unwrap();
    assert_eq!(catalog.lookups.get(), 0);
}

#[test]
fn encode_scalar_is_invalid_entity_value() {
    let err = codec()
        .encode(RefSource::Value(&Value::Int(42)), &contact_ty())
        .unwrap_err();

    assert_eq!(err.kind(), CodecErrorKind::InvalidEntityValue);
    assert_eq!(
        err.to_string(),
        "value of EntityId<'Contact'> must be an entity or null, int given"
    );
}

#[test]
fn encode_list_is_invalid_entity_value() {
    let value = Value::from(vec![1u64, 2]);
    let err = codec()
        .encode(RefSource::from_value(&value), &contact_ty())
        .unwrap_err();

    assert!(matches!(
        err,
        CodecError::InvalidEntityValue {
            given: crate::value::ValueKind::List,
            ..
        }
    ));
}

#[test]
fn from_value_maps_null_to_null_source() {
    let id = codec()
        .encode(RefSource::from_value(&Value::Null), &contact_ty())
        .unwrap();

    assert_eq!(id, Value::Null);
}

#[test]
fn encode_without_entity_name_fails_before_lookup() {
    let catalog = CountingCatalog {
        inner: contact_catalog(),
        lookups: Cell::new(0),
    };
    let codec = IdRefCodec::new(&catalog);
    let contact = Contact::new(1, "a@example.com");

    let err = codec
        .encode(RefSource::Entity(&contact), &TypeDescriptor::new("EntityId"))
        .unwrap_err();

    assert_eq!(err.kind(), CodecErrorKind::MissingEntityName);
    assert_eq!(catalog.lookups.get(), 0);
}

#[test]
fn encode_null_still_requires_entity_name() {
    let err = codec()
        .encode(RefSource::Null, &TypeDescriptor::entity_id(""))
        .unwrap_err();

    assert_eq!(err.kind(), CodecErrorKind::MissingEntityName);
}

#[test]
fn encode_non_text_entity_name_fails() {
    let ty = TypeDescriptor::new("EntityId").with_param(5i64);
    let err = codec().encode(RefSource::Null, &ty).unwrap_err();

    assert_eq!(err.kind(), CodecErrorKind::MissingEntityName);
}

#[test]
fn encode_unknown_entity_type_fails() {
    let contact = Contact::new(1, "a@example.com");
    let err = codec()
        .encode(RefSource::Entity(&contact), &TypeDescriptor::entity_id("Ghost"))
        .unwrap_err();

    assert!(matches!(
        err,
        CodecError::UnknownEntityType { ref entity_name } if entity_name == "Ghost"
    ));
}

#[test]
fn encode_composite_identifier_reports_count() {
    let contact = Contact::new(1, "a@example.com");
    let err = codec()
        .encode(
            RefSource::Entity(&contact),
            &TypeDescriptor::entity_id("Membership"),
        )
        .unwrap_err();

    assert!(matches!(
        err,
        CodecError::UnsupportedCompositeIdentifier { count: 2, .. }
    ));
    assert_eq!(
        err.to_string(),
        "entity references support entities with only one identifier, 'Membership' declares 2 identifier(s)"
    );
}

#[test]
fn encode_zero_identifiers_is_unsupported() {
    let contact = Contact::new(1, "a@example.com");
    let err = codec()
        .encode(RefSource::Entity(&contact), &TypeDescriptor::entity_id("Audit"))
        .unwrap_err();

    assert!(matches!(
        err,
        CodecError::UnsupportedCompositeIdentifier { count: 0, .. }
    ));
}

#[test]
fn encode_missing_accessor_fails() {
    let err = codec()
        .encode(RefSource::Entity(&Ledger), &TypeDescriptor::entity_id("Ledger"))
        .unwrap_err();

    assert!(matches!(
        err,
        CodecError::MissingAccessor { ref accessor, .. } if accessor == "getAccountId"
    ));
}

// ---- decode ------------------------------------------------------------

#[test]
fn decode_returns_deferred_reference() {
    let codec = codec();
    let reference = codec
        .decode(Value::from(123u64), &contact_ty())
        .unwrap()
        .unwrap();

    assert_eq!(reference, LazyRef::new("Contact", Value::Int(123)));

    let row = codec.catalog().resolve(&reference).unwrap();
    assert_eq!(row.call_accessor("getEmail"), Some(Value::from("ada@example.com")));
}

#[test]
fn decode_null_short_circuits_without_descriptor() {
    let reference = codec()
        .decode(Value::Null, &TypeDescriptor::new("EntityId"))
        .unwrap();

    assert!(reference.is_none());
}

#[test]
fn decode_dangling_identifier_fails_only_on_resolve() {
    let codec = codec();
    let reference = codec
        .decode(Value::from(999u64), &contact_ty())
        .unwrap()
        .unwrap();

    let err = codec.catalog().resolve(&reference).err().unwrap();
    assert!(err.is_not_found());
}

#[test]
fn decode_unknown_entity_type_fails() {
    let err = codec()
        .decode(Value::Int(7), &TypeDescriptor::entity_id("Ghost"))
        .unwrap_err();

    assert_eq!(err.kind(), CodecErrorKind::UnknownEntityType);
}

#[test]
fn decode_composite_identifier_fails() {
    let err = codec()
        .decode(Value::Int(7), &TypeDescriptor::entity_id("Membership"))
        .unwrap_err();

    assert_eq!(err.kind(), CodecErrorKind::UnsupportedCompositeIdentifier);
}

#[test]
fn decode_missing_entity_name_fails() {
    let err = codec()
        .decode(Value::Int(7), &TypeDescriptor::new("EntityId"))
        .unwrap_err();

    assert_eq!(err.kind(), CodecErrorKind::MissingEntityName);
}

#[test]
fn decode_list_is_invalid_identifier() {
    let err = codec()
        .decode(Value::from(vec![1u64, 2]), &contact_ty())
        .unwrap_err();

    assert_eq!(err.kind(), CodecErrorKind::InvalidIdentifierValue);
}

#[test]
fn decode_catalog_failure_is_wrapped() {
    let codec = IdRefCodec::new(FailingCatalog(contact_catalog()));
    let err = codec.decode(Value::Int(1), &contact_ty()).unwrap_err();

    assert_eq!(err.kind(), CodecErrorKind::Reference);

    let internal = InternalError::from(err);
    assert_eq!(internal.class, ErrorClass::Internal);
    assert_eq!(internal.origin, ErrorOrigin::Catalog);
}

#[test]
fn round_trip_preserves_identifier() {
    let codec = codec();
    let contact = Contact::new(124, "alan@example.com");

    let id = codec
        .encode(RefSource::Entity(&contact), &contact_ty())
        .unwrap();
    let reference = codec.decode(id, &contact_ty()).unwrap().unwrap();

    assert_eq!(reference.id(), &Value::from(contact.id));
}

// ---- error conversion --------------------------------------------------

#[test]
fn codec_errors_convert_to_internal() {
    let err = codec()
        .encode(RefSource::Value(&Value::Bool(true)), &contact_ty())
        .unwrap_err();
    let internal = InternalError::from(err);

    assert_eq!(internal.class, ErrorClass::InvalidInput);
    assert_eq!(internal.origin, ErrorOrigin::Codec);
    assert!(internal.display_with_class().starts_with("codec:invalid_input:"));
}

// ---- registration ------------------------------------------------------

#[test]
fn subscribes_both_directions_for_entity_id() {
    let methods = codec().subscribing_methods();

    assert_eq!(methods.len(), 2);
    assert!(methods.iter().all(|sub| sub.type_name == "EntityId"));
    assert!(methods.iter().all(|sub| sub.format == Format::Json));
    assert_eq!(methods[0].method, HandlerMethod::SerializeEntityToId);
    assert_eq!(methods[1].method, HandlerMethod::DeserializeIdToEntity);
}

#[test]
fn registry_routes_to_codec_methods() {
    let mut registry = HandlerRegistry::new();
    registry.register(codec()).unwrap();

    let route = registry
        .lookup(Direction::Deserialization, Format::Json, "EntityId")
        .unwrap();
    assert_eq!(route.method, HandlerMethod::DeserializeIdToEntity);

    let reference = route
        .handler
        .decode(Value::Int(123), &contact_ty())
        .unwrap();
    assert!(reference.is_some());
}

#[test]
fn configured_type_name_changes_subscriptions() {
    let config = CodecConfig {
        type_name: "EntityRef".to_string(),
        ..CodecConfig::default()
    };
    let codec = IdRefCodec::with_config(contact_catalog(), config);

    let methods = codec.subscribing_methods();
    assert!(methods.iter().all(|sub| sub.type_name == "EntityRef"));
}

// ---- observability -----------------------------------------------------

#[test]
fn counters_track_calls_nulls_and_failures() {
    obs::event_reset_all();
    let codec = codec();
    let contact = Contact::new(123, "ada@example.com");

    codec
        .encode(RefSource::Entity(&contact), &contact_ty())
        .unwrap();
    codec.encode(RefSource::Null, &contact_ty()).unwrap();
    codec.decode(Value::Int(123), &contact_ty()).unwrap();
    codec.decode(Value::Null, &contact_ty()).unwrap();
    codec
        .decode(Value::Int(1), &TypeDescriptor::entity_id("Membership"))
        .unwrap_err();
    codec
        .encode(RefSource::Entity(&contact), &TypeDescriptor::new("EntityId"))
        .unwrap_err();
    codec
        .decode(Value::Int(1), &TypeDescriptor::new("EntityId"))
        .unwrap_err();

    let report = obs::event_report();
    assert_eq!(report.ops.encode_calls, 3);
    assert_eq!(report.ops.decode_calls, 4);
    assert_eq!(report.ops.null_short_circuits, 2);
    assert_eq!(report.ops.failures, 3);
    assert!(report.ops.failures <= report.ops.encode_calls + report.ops.decode_calls);
    assert_eq!(
        report
            .ops
            .failures_by_kind
            .get("unsupported_composite_identifier"),
        Some(&1)
    );
    assert_eq!(
        report.ops.failures_by_kind.get("missing_entity_name"),
        Some(&2)
    );

    let (name, contact_counters) = &report.entities[0];
    assert_eq!(name, "Contact");
    assert_eq!(contact_counters.encode_calls, 2);
    assert_eq!(contact_counters.decode_calls, 1);
}

#[test]
fn scoped_sink_receives_events_instead_of_counters() {
    obs::event_reset_all();
    let sink = Rc::new(CapturingSink::default());

    obs::with_event_sink(sink.clone(), || {
        codec().encode(RefSource::Null, &contact_ty()).unwrap();
    });

    assert_eq!(sink.events.borrow().len(), 2);
    assert_eq!(obs::event_report().ops.encode_calls, 0);

    codec().encode(RefSource::Null, &contact_ty()).unwrap();
    assert_eq!(obs::event_report().ops.encode_calls, 1);
}
