use crate::{db::memory::MemoryCatalog, model::EntityModel, traits::EntityAccessor, value::Value};

///
/// Models
///

pub(crate) static CONTACT_MODEL: EntityModel =
    EntityModel::new("app::entity::Contact", "Contact", &["id"]);

pub(crate) static TAG_MODEL: EntityModel = EntityModel::new("app::entity::Tag", "Tag", &["slug"]);

pub(crate) static MEMBERSHIP_MODEL: EntityModel = EntityModel::new(
    "app::entity::Membership",
    "Membership",
    &["contact", "group"],
);

pub(crate) static AUDIT_MODEL: EntityModel = EntityModel::new("app::entity::Audit", "Audit", &[]);

// declares `accountId`, but the entity type below exposes no matching accessor
pub(crate) static LEDGER_MODEL: EntityModel =
    EntityModel::new("app::entity::Ledger", "Ledger", &["accountId"]);

///
/// Contact
///

#[derive(Clone, Debug)]
pub(crate) struct Contact {
    pub(crate) id: u64,
    pub(crate) email: String,
}

impl Contact {
    pub(crate) fn new(id: u64, email: &str) -> Self {
        Self {
            id,
            email: email.to_string(),
        }
    }
}

entity_accessors!(Contact {
    "getId" => id,
    "getEmail" => email,
});

///
/// Tag
///

#[derive(Clone, Debug)]
pub(crate) struct Tag {
    pub(crate) slug: String,
}

entity_accessors!(Tag { "getSlug" => slug });

///
/// Ledger
///

pub(crate) struct Ledger;

impl EntityAccessor for Ledger {
    fn call_accessor(&self, accessor: &str) -> Option<Value> {
        (accessor == "getAccountid").then(|| Value::from(1u64))
    }
}

/// Catalog with every fixture model and two stored contacts.
pub(crate) fn contact_catalog() -> MemoryCatalog {
    let mut catalog = MemoryCatalog::new();
    for model in [
        &CONTACT_MODEL,
        &TAG_MODEL,
        &MEMBERSHIP_MODEL,
        &AUDIT_MODEL,
        &LEDGER_MODEL,
    ] {
        catalog.register_model(model).expect("fixture model registers");
    }

    catalog
        .insert("Contact", 123u64, Contact::new(123, "ada@example.com"))
        .expect("fixture row inserts");
    catalog
        .insert("Contact", 124u64, Contact::new(124, "alan@example.com"))
        .expect("fixture row inserts");

    catalog
}
