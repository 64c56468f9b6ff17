//! Registry of metadata set and item definitions.
//!
//! The registry models the set class hierarchy through parent links and is
//! finalised before use; a finalised model is immutable and can be shared
//! by any number of readers and writers.

use crate::error::MxfError;
use crate::prelude::*;
use crate::types::Ul;
use std::collections::HashMap;

pub mod avid;
pub mod keys;

mod baseline;

pub use avid::avid;
pub use baseline::baseline;

/// Declared value type of a metadata item.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ItemType {
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Int8,
    Int16,
    Int32,
    Int64,
    Boolean,
    /// Two bytes: major, minor.
    VersionType,
    Ul,
    Uuid,
    Umid,
    Rational,
    Timestamp,
    ProductVersion,
    /// i64 edit-unit position.
    Position,
    /// i64 edit-unit count.
    Length,
    Utf16String,
    StrongRef,
    WeakRef,
    StrongRefArray,
    WeakRefArray,
    UlBatch,
    UmidArray,
    Int32Array,
    UInt32Array,
    /// Opaque value, no conformance check.
    Bytes,
}

impl ItemType {
    /// Size of a scalar value, or of one array element for array types.
    /// `None` means variable.
    pub fn fixed_size(&self) -> Option<usize> {
        use ItemType::*;
        match self {
            UInt8 | Int8 | Boolean => Some(1),
            UInt16 | Int16 | VersionType => Some(2),
            UInt32 | Int32 => Some(4),
            UInt64 | Int64 | Position | Length | Rational | Timestamp => Some(8),
            ProductVersion => Some(10),
            Ul | Uuid | StrongRef | WeakRef => Some(16),
            Umid => Some(32),
            Utf16String | Bytes => None,
            StrongRefArray | WeakRefArray | UlBatch | UmidArray | Int32Array | UInt32Array => None,
        }
    }

    pub fn element_size(&self) -> Option<usize> {
        use ItemType::*;
        match self {
            StrongRefArray | WeakRefArray | UlBatch => Some(16),
            UmidArray => Some(32),
            Int32Array | UInt32Array => Some(4),
            _ => None,
        }
    }

    pub fn is_array(&self) -> bool {
        self.element_size().is_some()
    }

    pub fn is_strong_ref(&self) -> bool {
        matches!(self, ItemType::StrongRef | ItemType::StrongRefArray)
    }

    pub fn is_weak_ref(&self) -> bool {
        matches!(self, ItemType::WeakRef | ItemType::WeakRefArray)
    }
}

#[derive(Clone, Debug)]
pub struct SetDef {
    pub key: Ul,
    pub parent: Option<Ul>,
    pub name: &'static str,
}

#[derive(Clone, Debug)]
pub struct ItemDef {
    pub key: Ul,
    pub set_key: Ul,
    /// Static local tag, or 0 for items that take a dynamically
    /// allocated tag from the primer pack.
    pub local_tag: u16,
    pub item_type: ItemType,
    pub required: bool,
    pub name: &'static str,
}

#[derive(Default, Debug)]
pub struct DataModel {
    sets: HashMap<Ul, SetDef>,
    items: HashMap<Ul, ItemDef>,
    set_items: HashMap<Ul, Vec<Ul>>,
    finalised: bool,
}

impl DataModel {
    pub fn new() -> DataModel {
        DataModel::default()
    }

    pub fn register_set(
        &mut self,
        key: Ul,
        parent: Option<Ul>,
        name: &'static str,
    ) -> Result<()> {
        if self.finalised {
            return Err(MxfError::LogicError("data model already finalised"));
        }
        self.sets.insert(key, SetDef { key, parent, name });
        self.set_items.entry(key).or_default();
        Ok(())
    }

    pub fn register_item(
        &mut self,
        set_key: Ul,
        item_key: Ul,
        local_tag: u16,
        item_type: ItemType,
        required: bool,
        name: &'static str,
    ) -> Result<()> {
        if self.finalised {
            return Err(MxfError::LogicError("data model already finalised"));
        }
        if !self.sets.contains_key(&set_key) {
            return Err(MxfError::LogicError("item registered on unknown set"));
        }
        self.items.insert(
            item_key,
            ItemDef {
                key: item_key,
                set_key,
                local_tag,
                item_type,
                required,
                name,
            },
        );
        self.set_items.entry(set_key).or_default().push(item_key);
        Ok(())
    }

    /// Resolve all inheritance links. The model rejects mutation afterwards.
    pub fn finalise(&mut self) -> Result<()> {
        for def in self.sets.values() {
            if let Some(parent) = def.parent {
                if !self.sets.contains_key(&parent) {
                    return Err(MxfError::LogicError("set parent not registered"));
                }
            }
        }
        self.finalised = true;
        Ok(())
    }

    pub fn is_finalised(&self) -> bool {
        self.finalised
    }

    /// Look up a set definition; the registry version byte of `key` is
    /// not significant.
    pub fn set_def(&self, key: &Ul) -> Option<&SetDef> {
        if let Some(def) = self.sets.get(key) {
            return Some(def);
        }
        self.sets.values().find(|def| def.key.matches(key))
    }

    pub fn item_def(&self, key: &Ul) -> Option<&ItemDef> {
        if let Some(def) = self.items.get(key) {
            return Some(def);
        }
        self.items.values().find(|def| def.key.matches(key))
    }

    pub fn is_subclass_of(&self, child: &Ul, parent: &Ul) -> bool {
        let mut current = match self.set_def(child) {
            Some(def) => def,
            None => return false,
        };
        loop {
            if current.key.matches(parent) {
                return true;
            }
            match current.parent.and_then(|p| self.sets.get(&p)) {
                Some(def) => current = def,
                None => return false,
            }
        }
    }

    /// Find an item usable on `set_key`, walking up the class hierarchy.
    pub fn find_item(&self, set_key: &Ul, item_key: &Ul) -> Option<&ItemDef> {
        let def = self.item_def(item_key)?;
        if self.is_subclass_of(set_key, &def.set_key) {
            Some(def)
        } else {
            None
        }
    }

    /// Items of a set including inherited ones, ancestors first, each in
    /// registration order. This order drives deterministic serialisation.
    pub fn items_of(&self, set_key: &Ul) -> Vec<&ItemDef> {
        let mut chain = Vec::new();
        let mut current = self.set_def(set_key);
        while let Some(def) = current {
            chain.push(def.key);
            current = def.parent.and_then(|p| self.sets.get(&p));
        }
        let mut items = Vec::new();
        for key in chain.iter().rev() {
            if let Some(list) = self.set_items.get(key) {
                for item_key in list {
                    if let Some(def) = self.items.get(item_key) {
                        items.push(def);
                    }
                }
            }
        }
        items
    }

    /// Check a raw value against the declared type of `def`.
    pub fn validate_item(&self, def: &ItemDef, value: &[u8]) -> Result<()> {
        let mismatch = || MxfError::TypeMismatch {
            item: def.name,
            expected: type_name(def.item_type),
        };
        if let Some(size) = def.item_type.fixed_size() {
            if value.len() != size {
                return Err(mismatch());
            }
            return Ok(());
        }
        if let Some(elem) = def.item_type.element_size() {
            if value.len() < 8 {
                return Err(mismatch());
            }
            let count = u32::from_be_bytes([value[0], value[1], value[2], value[3]]) as usize;
            let size = u32::from_be_bytes([value[4], value[5], value[6], value[7]]) as usize;
            if size != elem || value.len() != 8 + count * elem {
                return Err(mismatch());
            }
            return Ok(());
        }
        if def.item_type == ItemType::Utf16String && value.len() % 2 != 0 {
            return Err(mismatch());
        }
        Ok(())
    }
}

fn type_name(item_type: ItemType) -> &'static str {
    use ItemType::*;
    match item_type {
        UInt8 => "uint8",
        UInt16 => "uint16",
        UInt32 => "uint32",
        UInt64 => "uint64",
        Int8 => "int8",
        Int16 => "int16",
        Int32 => "int32",
        Int64 => "int64",
        Boolean => "boolean",
        VersionType => "version",
        Ul => "ul",
        Uuid => "uuid",
        Umid => "umid",
        Rational => "rational",
        Timestamp => "timestamp",
        ProductVersion => "product version",
        Position => "position",
        Length => "length",
        Utf16String => "utf-16 string",
        StrongRef => "strong reference",
        WeakRef => "weak reference",
        StrongRefArray => "strong reference array",
        WeakRefArray => "weak reference array",
        UlBatch => "ul batch",
        UmidArray => "umid array",
        Int32Array => "int32 array",
        UInt32Array => "uint32 array",
        Bytes => "bytes",
    }
}

#[cfg(test)]
mod tests {
    use super::keys::*;
    use super::*;

    #[test]
    fn baseline_hierarchy() {
        let model = baseline();
        assert!(model.is_finalised());
        assert!(model.is_subclass_of(&MATERIAL_PACKAGE_SET_KEY, &GENERIC_PACKAGE_SET_KEY));
        assert!(model.is_subclass_of(&CDCI_DESCRIPTOR_SET_KEY, &FILE_DESCRIPTOR_SET_KEY));
        assert!(!model.is_subclass_of(&PREFACE_SET_KEY, &GENERIC_PACKAGE_SET_KEY));
    }

    #[test]
    fn inherited_item_resolves() {
        let model = baseline();
        // InstanceUID is defined on the interchange object root.
        assert!(model
            .find_item(&MATERIAL_PACKAGE_SET_KEY, &INSTANCE_UID_ITEM_KEY)
            .is_some());
        // Tracks is a package item, not available on the preface.
        assert!(model
            .find_item(&PREFACE_SET_KEY, &PACKAGE_TRACKS_ITEM_KEY)
            .is_none());
    }

    #[test]
    fn finalised_model_rejects_mutation() {
        let mut model = DataModel::new();
        model
            .register_set(PREFACE_SET_KEY, None, "Preface")
            .unwrap();
        model.finalise().unwrap();
        assert!(matches!(
            model.register_set(CONTENT_STORAGE_SET_KEY, None, "ContentStorage"),
            Err(MxfError::LogicError(_))
        ));
    }

    #[test]
    fn array_value_validation() {
        let model = baseline();
        let def = model
            .item_def(&PREFACE_ESSENCE_CONTAINERS_ITEM_KEY)
            .unwrap();
        let mut good = vec![0, 0, 0, 1, 0, 0, 0, 16];
        good.extend_from_slice(&[0u8; 16]);
        assert!(model.validate_item(def, &good).is_ok());
        assert!(model.validate_item(def, &good[..20]).is_err());
    }
}
