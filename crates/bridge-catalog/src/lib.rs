//! The Variable Catalog: a stable, immutable-after-construction table
//! mapping simulator variable names to a dense range of logical indices,
//! plus the metadata (kind, unit, access, flag, message id) that every
//! other component needs to interpret a given variable.

mod table;

use bridge_sdk::message_id_of;
use std::collections::HashMap;
use thiserror::Error;

/// The shape of a variable's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableKind {
    Scalar,
    Vec2,
    Vec3,
    Vec4,
    String,
    Opaque,
}

impl VariableKind {
    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            VariableKind::Scalar => "double",
            VariableKind::Vec2 => "vector2d",
            VariableKind::Vec3 => "vector3d",
            VariableKind::Vec4 => "vector4d",
            VariableKind::String => "string",
            VariableKind::Opaque => "opaque",
        }
    }

    /// Number of `f64` components carried by this kind, where applicable.
    #[must_use]
    pub fn component_count(self) -> Option<usize> {
        match self {
            VariableKind::Vec2 => Some(2),
            VariableKind::Vec3 => Some(3),
            VariableKind::Vec4 => Some(4),
            _ => None,
        }
    }
}

/// Who may read and/or write a variable over the network command channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    Read,
    Write,
    ReadWrite,
}

impl Access {
    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            Access::Read => "read",
            Access::Write => "write",
            Access::ReadWrite => "read_write",
        }
    }

    #[must_use]
    pub fn is_writable(self) -> bool {
        matches!(self, Access::Write | Access::ReadWrite)
    }
}

/// The primary semantic of a variable, used by inbound dispatch to pick a
/// handler and by the offsets descriptor to export derived booleans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableFlag {
    Value,
    Event,
    Toggle,
    /// Incoming values are deltas clamped into `[0, 1]`, not absolute settings.
    Step,
    Offset,
    Move,
    Active,
    None,
}

impl VariableFlag {
    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            VariableFlag::Value => "value",
            VariableFlag::Event => "event",
            VariableFlag::Toggle => "toggle",
            VariableFlag::Step => "step",
            VariableFlag::Offset => "offset",
            VariableFlag::Move => "move",
            VariableFlag::Active => "active",
            VariableFlag::None => "none",
        }
    }

    #[must_use]
    pub fn is_event(self) -> bool {
        matches!(self, VariableFlag::Event)
    }

    #[must_use]
    pub fn is_toggle(self) -> bool {
        matches!(self, VariableFlag::Toggle)
    }

    #[must_use]
    pub fn is_active_flag(self) -> bool {
        matches!(self, VariableFlag::Active)
    }

    #[must_use]
    pub fn is_value(self) -> bool {
        matches!(self, VariableFlag::Value)
    }

    #[must_use]
    pub fn is_step(self) -> bool {
        matches!(self, VariableFlag::Step)
    }
}

/// One catalog entry. Immutable once the catalog is constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: &'static str,
    pub logical_index: usize,
    pub kind: VariableKind,
    pub unit: &'static str,
    pub access: Access,
    pub flag: VariableFlag,
    pub message_id: u64,
}

impl Variable {
    /// The dotted-name prefix before the first `.`, used to group variables
    /// in the offsets descriptor (e.g. `"Aircraft"` from `"Aircraft.Altitude"`).
    #[must_use]
    pub fn group(&self) -> &str {
        self.name.split('.').next().unwrap_or(self.name)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate variable name in catalog: {0}")]
    DuplicateName(String),
    #[error("message id collision between {0:?} and {1:?}")]
    DuplicateMessageId(String, String),
}

/// The immutable, constructed-once catalog of every known simulator
/// variable.
#[derive(Debug)]
pub struct Catalog {
    entries: Vec<Variable>,
    by_name: HashMap<&'static str, usize>,
    by_message_id: HashMap<u64, usize>,
}

impl Catalog {
    /// Build the catalog from the static table in `table.rs`.
    ///
    /// # Errors
    /// Returns [`CatalogError`] if the static table contains a duplicate
    /// name or a message id collision — both are programmer errors in the
    /// table, not runtime conditions, so callers should treat this as fatal.
    pub fn new() -> Result<Self, CatalogError> {
        Self::from_rows(table::VARIABLE_TABLE)
    }

    fn from_rows(
        rows: &[(&'static str, VariableKind, &'static str, Access, VariableFlag)],
    ) -> Result<Self, CatalogError> {
        let mut entries = Vec::with_capacity(rows.len());
        let mut by_name = HashMap::with_capacity(rows.len());
        let mut by_message_id: HashMap<u64, usize> = HashMap::with_capacity(rows.len());

        for (logical_index, &(name, kind, unit, access, flag)) in rows.iter().enumerate() {
            if by_name.contains_key(name) {
                return Err(CatalogError::DuplicateName(name.to_owned()));
            }
            let message_id = message_id_of(name);
            if let Some(&existing) = by_message_id.get(&message_id) {
                let existing_name: &str = rows[existing].0;
                return Err(CatalogError::DuplicateMessageId(
                    existing_name.to_owned(),
                    name.to_owned(),
                ));
            }
            by_name.insert(name, logical_index);
            by_message_id.insert(message_id, logical_index);
            entries.push(Variable {
                name,
                logical_index,
                kind,
                unit,
                access,
                flag,
                message_id,
            });
        }

        Ok(Catalog {
            entries,
            by_name,
            by_message_id,
        })
    }

    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    #[must_use]
    pub fn entry(&self, index: usize) -> Option<&Variable> {
        self.entries.get(index)
    }

    #[must_use]
    pub fn entry_by_message_id(&self, message_id: u64) -> Option<&Variable> {
        self.by_message_id
            .get(&message_id)
            .and_then(|&i| self.entries.get(i))
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<(&'static str, usize)> {
        self.entries.iter().map(|v| (v.name, v.logical_index)).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_table_builds_without_error() {
        let catalog = Catalog::new().expect("static table must be well-formed");
        assert!(catalog.len() > 50, "catalog should hold a representative slice of the ~360 variable set");
    }

    #[test]
    fn name_and_logical_index_are_bijective() {
        let catalog = Catalog::new().unwrap();
        for entry in catalog.iter() {
            assert_eq!(catalog.index_of(entry.name), Some(entry.logical_index));
            assert_eq!(catalog.entry(entry.logical_index).unwrap().name, entry.name);
        }
    }

    #[test]
    fn message_ids_round_trip_to_the_same_entry() {
        let catalog = Catalog::new().unwrap();
        for entry in catalog.iter() {
            let looked_up = catalog.entry_by_message_id(entry.message_id).unwrap();
            assert_eq!(looked_up.name, entry.name);
        }
    }

    #[test]
    fn duplicate_name_is_a_construction_error() {
        let rows: &[(&str, VariableKind, &str, Access, VariableFlag)] = &[
            ("Aircraft.Altitude", VariableKind::Scalar, "m", Access::Read, VariableFlag::Value),
            ("Aircraft.Altitude", VariableKind::Scalar, "m", Access::Read, VariableFlag::Value),
        ];
        match Catalog::from_rows(rows) {
            Err(CatalogError::DuplicateName(name)) => assert_eq!(name, "Aircraft.Altitude"),
            other => panic!("expected DuplicateName error, got {other:?}"),
        }
    }

    #[test]
    fn group_is_derived_from_the_dotted_prefix() {
        let catalog = Catalog::new().unwrap();
        let entry = catalog.entry(catalog.index_of("Aircraft.Altitude").unwrap()).unwrap();
        assert_eq!(entry.group(), "Aircraft");
    }
}
