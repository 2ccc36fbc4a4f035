use std::collections::HashMap;
use std::sync::OnceLock;

use crate::error::{Result, ValueError};
use crate::hash::type_hash;
use crate::kind::{ValueKind, ARRAY_ID};
use crate::value::{ArrayValue, Value};

/// One row of the kind table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindEntry {
    pub kind: ValueKind,
    pub id: u32,
    pub type_name: Option<&'static str>,
    pub display_name: &'static str,
}

impl KindEntry {
    fn for_kind(kind: ValueKind) -> Self {
        let type_name = kind.type_name();
        Self {
            kind,
            id: type_name.map_or(ARRAY_ID, type_hash),
            type_name,
            display_name: kind.display_name(),
        }
    }
}

/// ID-keyed table of the value kinds this codec understands.
///
/// Both the property reader and writer map between persisted IDs and kinds
/// through this table, so the two directions cannot drift apart.
#[derive(Debug)]
pub struct TypeRegistry {
    entries: Vec<KindEntry>,
    by_id: HashMap<u32, ValueKind>,
}

impl TypeRegistry {
    /// The process-wide registry, built on first use.
    pub fn global() -> &'static TypeRegistry {
        static REGISTRY: OnceLock<TypeRegistry> = OnceLock::new();
        REGISTRY.get_or_init(TypeRegistry::build)
    }

    fn build() -> Self {
        let mut entries = Vec::with_capacity(ValueKind::ALL.len());
        let mut by_id = HashMap::with_capacity(ValueKind::ALL.len());

        for kind in ValueKind::ALL {
            let entry = KindEntry::for_kind(kind);
            let previous = by_id.insert(entry.id, kind);
            debug_assert!(
                previous.is_none(),
                "type id 0x{:08x} assigned twice",
                entry.id
            );
            entries.push(entry);
        }

        Self { entries, by_id }
    }

    /// Resolve a type ID read from a stream.
    pub fn resolve(&self, id: u32) -> Result<ValueKind> {
        self.by_id
            .get(&id)
            .copied()
            .ok_or(ValueError::UnknownType(id))
    }

    /// Persisted ID of a kind.
    pub fn id_of(&self, kind: ValueKind) -> u32 {
        self.entries[kind.index()].id
    }

    /// Table row of a kind.
    pub fn entry(&self, kind: ValueKind) -> &KindEntry {
        &self.entries[kind.index()]
    }

    /// Rows in declaration order.
    pub fn entries(&self) -> &[KindEntry] {
        &self.entries
    }

    /// Kinds in declaration order.
    pub fn kinds(&self) -> impl Iterator<Item = ValueKind> + '_ {
        self.entries.iter().map(|entry| entry.kind)
    }

    pub fn contains_id(&self, id: u32) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Default-valued instance of a non-array kind.
    ///
    /// Arrays need an item kind; use [`TypeRegistry::create_array`].
    pub fn create(&self, kind: ValueKind) -> Result<Value> {
        Value::default_of(kind).ok_or(ValueError::MissingItemKind)
    }

    /// Empty array holding `item_kind` items.
    pub fn create_array(&self, item_kind: ValueKind) -> Result<Value> {
        ArrayValue::new(item_kind).map(Value::Array)
    }

    /// Hash a prospective type name and make sure its ID is still free.
    ///
    /// New kinds must pass this check before they are added to the table.
    pub fn check_candidate(&self, type_name: &str) -> Result<u32> {
        let id = type_hash(type_name);
        match self.by_id.get(&id) {
            Some(&existing) => Err(ValueError::IdCollision {
                type_name: type_name.to_string(),
                id,
                existing,
            }),
            None => Ok(id),
        }
    }
}
