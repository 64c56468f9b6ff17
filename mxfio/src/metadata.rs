//! Header metadata: the typed, tag-indexed object graph of one partition.
//!
//! Sets reference each other by instance UID; pointers are never stored.
//! Resolution is a separate pass after all sets are loaded, so cyclic
//! graphs parse without special handling. Unknown set keys are preserved
//! verbatim as dark sets and re-emitted on write.

use crate::error::MxfError;
use crate::klv::KlvHeader;
use crate::model::{DataModel, ItemType};
use crate::prelude::*;
use crate::primer::PrimerPack;
use crate::types::{ProductVersion, Rational, Timestamp, Ul, Umid};
use crate::utils;
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::collections::{HashMap, HashSet};
use std::io::{Cursor, Read, Write};
use uuid::Uuid;

use crate::model::keys::INSTANCE_UID_ITEM_KEY;

#[derive(Debug)]
struct SetItem {
    key: Ul,
    value: Vec<u8>,
}

/// One metadata set: a set key, an instance UID and an ordered map of
/// item key to raw value bytes. Typed accessors parse on demand; the
/// declared types are enforced against the data model when the set is
/// serialised.
#[derive(Debug)]
pub struct MetadataSet {
    pub key: Ul,
    pub instance_uid: Uuid,
    items: Vec<SetItem>,
}

impl MetadataSet {
    pub fn new(key: Ul) -> MetadataSet {
        MetadataSet {
            key,
            instance_uid: Uuid::new_v4(),
            items: Vec::new(),
        }
    }

    pub fn has_item(&self, key: &Ul) -> bool {
        self.items.iter().any(|i| i.key == *key)
    }

    pub fn item_value(&self, key: &Ul) -> Option<&[u8]> {
        self.items
            .iter()
            .find(|i| i.key.matches(key))
            .map(|i| i.value.as_slice())
    }

    pub fn item_keys(&self) -> impl Iterator<Item = &Ul> {
        self.items.iter().map(|i| &i.key)
    }

    /// Insert or replace an item, preserving first-set order.
    pub fn set_item(&mut self, key: Ul, value: Vec<u8>) {
        if let Some(item) = self.items.iter_mut().find(|i| i.key == key) {
            item.value = value;
        } else {
            self.items.push(SetItem { key, value });
        }
    }

    pub fn remove_item(&mut self, key: &Ul) {
        self.items.retain(|i| i.key != *key);
    }

    // Typed setters.

    pub fn set_u8(&mut self, key: Ul, value: u8) {
        self.set_item(key, vec![value]);
    }

    pub fn set_u16(&mut self, key: Ul, value: u16) {
        self.set_item(key, value.to_be_bytes().to_vec());
    }

    pub fn set_u32(&mut self, key: Ul, value: u32) {
        self.set_item(key, value.to_be_bytes().to_vec());
    }

    pub fn set_i8(&mut self, key: Ul, value: i8) {
        self.set_item(key, value.to_be_bytes().to_vec());
    }

    pub fn set_i64(&mut self, key: Ul, value: i64) {
        self.set_item(key, value.to_be_bytes().to_vec());
    }

    pub fn set_bool(&mut self, key: Ul, value: bool) {
        self.set_item(key, vec![value as u8]);
    }

    pub fn set_version(&mut self, key: Ul, major: u8, minor: u8) {
        self.set_item(key, vec![major, minor]);
    }

    pub fn set_ul(&mut self, key: Ul, value: &Ul) {
        self.set_item(key, value.0.to_vec());
    }

    pub fn set_uuid(&mut self, key: Ul, value: &Uuid) {
        self.set_item(key, value.as_bytes().to_vec());
    }

    pub fn set_umid(&mut self, key: Ul, value: &Umid) {
        self.set_item(key, value.0.to_vec());
    }

    pub fn set_rational(&mut self, key: Ul, value: &Rational) {
        let mut bytes = Vec::with_capacity(8);
        value.write_to(&mut bytes).expect("vec write");
        self.set_item(key, bytes);
    }

    pub fn set_timestamp(&mut self, key: Ul, value: &Timestamp) {
        let mut bytes = Vec::with_capacity(8);
        value.write_to(&mut bytes).expect("vec write");
        self.set_item(key, bytes);
    }

    pub fn set_product_version(&mut self, key: Ul, value: &ProductVersion) {
        let mut bytes = Vec::with_capacity(10);
        value.write_to(&mut bytes).expect("vec write");
        self.set_item(key, bytes);
    }

    pub fn set_string(&mut self, key: Ul, value: &str) {
        self.set_item(key, utils::utf16_string_bytes(value));
    }

    pub fn set_strong_ref(&mut self, key: Ul, target: &Uuid) {
        self.set_uuid(key, target);
    }

    pub fn set_weak_ref(&mut self, key: Ul, target: &Uuid) {
        self.set_uuid(key, target);
    }

    pub fn set_ref_array(&mut self, key: Ul, targets: &[Uuid]) {
        let mut bytes = Vec::with_capacity(8 + targets.len() * 16);
        bytes.extend_from_slice(&(targets.len() as u32).to_be_bytes());
        bytes.extend_from_slice(&16u32.to_be_bytes());
        for target in targets {
            bytes.extend_from_slice(target.as_bytes());
        }
        self.set_item(key, bytes);
    }

    pub fn set_ul_batch(&mut self, key: Ul, labels: &[Ul]) {
        let mut bytes = Vec::with_capacity(8 + labels.len() * 16);
        bytes.extend_from_slice(&(labels.len() as u32).to_be_bytes());
        bytes.extend_from_slice(&16u32.to_be_bytes());
        for label in labels {
            bytes.extend_from_slice(&label.0);
        }
        self.set_item(key, bytes);
    }

    pub fn set_i32_array(&mut self, key: Ul, values: &[i32]) {
        let mut bytes = Vec::with_capacity(8 + values.len() * 4);
        bytes.extend_from_slice(&(values.len() as u32).to_be_bytes());
        bytes.extend_from_slice(&4u32.to_be_bytes());
        for value in values {
            bytes.extend_from_slice(&value.to_be_bytes());
        }
        self.set_item(key, bytes);
    }

    // Typed getters. `Ok(None)` means absent; a present item of the
    // wrong shape is a type mismatch.

    fn fixed(&self, key: &Ul, size: usize, name: &'static str) -> Result<Option<&[u8]>> {
        match self.item_value(key) {
            None => Ok(None),
            Some(v) if v.len() == size => Ok(Some(v)),
            Some(_) => Err(MxfError::TypeMismatch {
                item: name,
                expected: name,
            }),
        }
    }

    pub fn u8_item(&self, key: &Ul) -> Result<Option<u8>> {
        Ok(self.fixed(key, 1, "uint8")?.map(|v| v[0]))
    }

    pub fn u16_item(&self, key: &Ul) -> Result<Option<u16>> {
        Ok(self
            .fixed(key, 2, "uint16")?
            .map(|v| u16::from_be_bytes([v[0], v[1]])))
    }

    pub fn u32_item(&self, key: &Ul) -> Result<Option<u32>> {
        Ok(self
            .fixed(key, 4, "uint32")?
            .map(|v| u32::from_be_bytes([v[0], v[1], v[2], v[3]])))
    }

    pub fn i8_item(&self, key: &Ul) -> Result<Option<i8>> {
        Ok(self.fixed(key, 1, "int8")?.map(|v| v[0] as i8))
    }

    pub fn i64_item(&self, key: &Ul) -> Result<Option<i64>> {
        Ok(self.fixed(key, 8, "int64")?.map(|v| {
            i64::from_be_bytes([v[0], v[1], v[2], v[3], v[4], v[5], v[6], v[7]])
        }))
    }

    pub fn bool_item(&self, key: &Ul) -> Result<Option<bool>> {
        Ok(self.fixed(key, 1, "boolean")?.map(|v| v[0] != 0))
    }

    pub fn ul_item(&self, key: &Ul) -> Result<Option<Ul>> {
        Ok(self.fixed(key, 16, "ul")?.map(|v| {
            let mut bytes = [0u8; 16];
            bytes.copy_from_slice(v);
            Ul(bytes)
        }))
    }

    pub fn uuid_item(&self, key: &Ul) -> Result<Option<Uuid>> {
        Ok(self.fixed(key, 16, "uuid")?.map(|v| {
            let mut bytes = [0u8; 16];
            bytes.copy_from_slice(v);
            Uuid::from_bytes(bytes)
        }))
    }

    pub fn umid_item(&self, key: &Ul) -> Result<Option<Umid>> {
        Ok(self.fixed(key, 32, "umid")?.map(|v| {
            let mut bytes = [0u8; 32];
            bytes.copy_from_slice(v);
            Umid(bytes)
        }))
    }

    pub fn rational_item(&self, key: &Ul) -> Result<Option<Rational>> {
        match self.fixed(key, 8, "rational")? {
            None => Ok(None),
            Some(v) => Ok(Some(Rational::from_reader(&mut Cursor::new(v))?)),
        }
    }

    pub fn timestamp_item(&self, key: &Ul) -> Result<Option<Timestamp>> {
        match self.fixed(key, 8, "timestamp")? {
            None => Ok(None),
            Some(v) => Ok(Some(Timestamp::from_reader(&mut Cursor::new(v))?)),
        }
    }

    pub fn string_item(&self, key: &Ul) -> Result<Option<String>> {
        match self.item_value(key) {
            None => Ok(None),
            Some(v) => {
                let mut cursor = Cursor::new(v);
                Ok(Some(utils::read_utf16_string(&mut cursor, v.len())?))
            }
        }
    }

    pub fn ref_item(&self, key: &Ul) -> Result<Option<Uuid>> {
        self.uuid_item(key)
    }

    pub fn ref_array_item(&self, key: &Ul) -> Result<Option<Vec<Uuid>>> {
        match self.item_value(key) {
            None => Ok(None),
            Some(v) => Ok(Some(parse_array(v, 16, "reference array")?
                .chunks(16)
                .map(|c| {
                    let mut bytes = [0u8; 16];
                    bytes.copy_from_slice(c);
                    Uuid::from_bytes(bytes)
                })
                .collect())),
        }
    }

    pub fn ul_batch_item(&self, key: &Ul) -> Result<Option<Vec<Ul>>> {
        match self.item_value(key) {
            None => Ok(None),
            Some(v) => Ok(Some(parse_array(v, 16, "ul batch")?
                .chunks(16)
                .map(|c| {
                    let mut bytes = [0u8; 16];
                    bytes.copy_from_slice(c);
                    Ul(bytes)
                })
                .collect())),
        }
    }

    pub fn i32_array_item(&self, key: &Ul) -> Result<Option<Vec<i32>>> {
        match self.item_value(key) {
            None => Ok(None),
            Some(v) => Ok(Some(parse_array(v, 4, "int32 array")?
                .chunks(4)
                .map(|c| i32::from_be_bytes([c[0], c[1], c[2], c[3]]))
                .collect())),
        }
    }
}

fn parse_array<'a>(value: &'a [u8], elem: usize, name: &'static str) -> Result<&'a [u8]> {
    let mismatch = || MxfError::TypeMismatch {
        item: name,
        expected: name,
    };
    if value.len() < 8 {
        return Err(mismatch());
    }
    let count = u32::from_be_bytes([value[0], value[1], value[2], value[3]]) as usize;
    let size = u32::from_be_bytes([value[4], value[5], value[6], value[7]]) as usize;
    if size != elem || value.len() != 8 + count * elem {
        return Err(mismatch());
    }
    Ok(&value[8..])
}

/// A set whose key the data model does not know. The raw value bytes are
/// preserved so a read-modify-write cycle re-emits them verbatim; the
/// tag resolutions captured from the source primer keep the new primer
/// consistent.
#[derive(Debug)]
pub struct DarkSet {
    pub key: Ul,
    pub data: Vec<u8>,
    pub instance_uid: Option<Uuid>,
    resolutions: Vec<(u16, Ul)>,
}

/// All metadata sets of one partition plus the uid index.
#[derive(Debug)]
pub struct HeaderMetadata {
    model: &'static DataModel,
    sets: HashMap<Uuid, MetadataSet>,
    order: Vec<Uuid>,
    dark: Vec<DarkSet>,
    /// Sets were dropped by a read filter, so dangling strong
    /// references are intentional.
    filtered: bool,
}

impl HeaderMetadata {
    pub fn new(model: &'static DataModel) -> HeaderMetadata {
        HeaderMetadata {
            model,
            sets: HashMap::new(),
            order: Vec::new(),
            dark: Vec::new(),
            filtered: false,
        }
    }

    pub fn model(&self) -> &'static DataModel {
        self.model
    }

    pub fn add_set(&mut self, set: MetadataSet) -> Uuid {
        let uid = set.instance_uid;
        if self.sets.insert(uid, set).is_none() {
            self.order.push(uid);
        }
        uid
    }

    pub fn get(&self, uid: &Uuid) -> Option<&MetadataSet> {
        self.sets.get(uid)
    }

    pub fn get_mut(&mut self, uid: &Uuid) -> Option<&mut MetadataSet> {
        self.sets.get_mut(uid)
    }

    pub fn sets(&self) -> impl Iterator<Item = &MetadataSet> {
        self.order.iter().filter_map(|uid| self.sets.get(uid))
    }

    pub fn dark_sets(&self) -> &[DarkSet] {
        &self.dark
    }

    /// Sets whose key is `key` or a subclass of it.
    pub fn sets_of_type<'a>(&'a self, key: &'a Ul) -> impl Iterator<Item = &'a MetadataSet> {
        self.sets()
            .filter(move |set| self.model.is_subclass_of(&set.key, key))
    }

    /// The graph root. Exactly one preface must exist.
    pub fn preface(&self) -> Result<&MetadataSet> {
        let mut found = None;
        for set in self.sets() {
            if set.key.matches(&crate::model::keys::PREFACE_SET_KEY) {
                if found.is_some() {
                    return Err(MxfError::malformed(0, "multiple preface sets"));
                }
                found = Some(set);
            }
        }
        found.ok_or(MxfError::malformed(0, "no preface set"))
    }

    /// Serialise primer pack and sets. Returns the total bytes written.
    ///
    /// Sets reachable from the preface are emitted in depth-first order,
    /// children in item definition order; unreachable and dark sets
    /// follow in arena order.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<u64> {
        let mut primer = PrimerPack::new();
        let mut body: Vec<u8> = Vec::new();

        for uid in self.write_order()? {
            let set = &self.sets[&uid];
            self.write_set(set, &mut primer, &mut body)?;
        }
        for dark in &self.dark {
            for (tag, uid) in &dark.resolutions {
                primer.register_static(uid, *tag)?;
            }
            KlvHeader::new(dark.key, dark.data.len() as u64).write_to(&mut body)?;
            body.write_all(&dark.data)?;
        }

        primer.write_to(writer)?;
        writer.write_all(&body)?;
        Ok(primer.write_size() + body.len() as u64)
    }

    fn write_order(&self) -> Result<Vec<Uuid>> {
        let preface = self.preface()?;
        let mut order = Vec::new();
        let mut visited = HashSet::new();
        self.visit(&preface.instance_uid, &mut visited, &mut order);
        for uid in &self.order {
            if !visited.contains(uid) {
                order.push(*uid);
            }
        }
        Ok(order)
    }

    fn visit(&self, uid: &Uuid, visited: &mut HashSet<Uuid>, order: &mut Vec<Uuid>) {
        if !visited.insert(*uid) {
            return;
        }
        let set = match self.sets.get(uid) {
            Some(set) => set,
            None => return,
        };
        order.push(*uid);
        for def in self.model.items_of(&set.key) {
            if !def.item_type.is_strong_ref() {
                continue;
            }
            let targets = match def.item_type {
                ItemType::StrongRef => match set.ref_item(&def.key) {
                    Ok(Some(target)) => vec![target],
                    _ => continue,
                },
                _ => match set.ref_array_item(&def.key) {
                    Ok(Some(targets)) => targets,
                    _ => continue,
                },
            };
            for target in targets {
                self.visit(&target, visited, order);
            }
        }
    }

    fn write_set(
        &self,
        set: &MetadataSet,
        primer: &mut PrimerPack,
        body: &mut Vec<u8>,
    ) -> Result<()> {
        let mut value: Vec<u8> = Vec::new();
        // instance uid leads, remaining items in set order
        let mut ordered: Vec<&SetItem> = Vec::with_capacity(set.items.len() + 1);
        let uid_item = SetItem {
            key: INSTANCE_UID_ITEM_KEY,
            value: set.instance_uid.as_bytes().to_vec(),
        };
        ordered.push(&uid_item);
        for item in &set.items {
            if item.key != INSTANCE_UID_ITEM_KEY {
                ordered.push(item);
            }
        }

        for item in ordered {
            if item.value.len() > u16::MAX as usize {
                return Err(MxfError::CapacityExceeded("metadata item length"));
            }
            let tag = match self.model.find_item(&set.key, &item.key) {
                Some(def) => {
                    self.model.validate_item(def, &item.value)?;
                    if def.local_tag != 0 {
                        primer.register_static(&item.key, def.local_tag)?
                    } else {
                        primer.register(&item.key)?
                    }
                }
                None => primer.register(&item.key)?,
            };
            value.write_u16::<BigEndian>(tag)?;
            value.write_u16::<BigEndian>(item.value.len() as u16)?;
            value.write_all(&item.value)?;
        }

        KlvHeader::new(set.key, value.len() as u64).write_to(body)?;
        body.write_all(&value)?;
        Ok(())
    }

    /// Parse the primer pack and following sets from `reader`, consuming
    /// exactly `byte_count` bytes (the partition's header byte count).
    /// `keep` may drop sets during the parse to bound memory.
    pub fn read<R: Read>(
        reader: &mut R,
        model: &'static DataModel,
        byte_count: u64,
        mut keep: Option<&mut dyn FnMut(&Ul, &Uuid) -> bool>,
    ) -> Result<HeaderMetadata> {
        let mut consumed: u64 = 0;

        // primer pack first, fill permitting
        let primer = loop {
            let header = KlvHeader::from_reader(reader).map_err(|e| e.at_eof(consumed))?;
            consumed += header.header_size();
            if header.is_fill() {
                utils::skip(reader, header.len)?;
                consumed += header.len;
                continue;
            }
            if !header.key.matches(&crate::labels::PRIMER_PACK_KEY) {
                return Err(MxfError::malformed(consumed, "expected primer pack"));
            }
            let mut value = Cursor::new(utils::take(reader, header.len as usize)?);
            consumed += header.len;
            break PrimerPack::from_reader(&mut value)?;
        };

        let mut metadata = HeaderMetadata::new(model);
        while consumed < byte_count {
            let header = KlvHeader::from_reader(reader).map_err(|e| e.at_eof(consumed))?;
            consumed += header.header_size();
            if header.is_fill() {
                utils::skip(reader, header.len)?;
                consumed += header.len;
                continue;
            }
            let value = utils::take(reader, header.len as usize)
                .map_err(|e| MxfError::from(e).at_eof(consumed))?;
            consumed += header.len;

            let (items, resolutions, instance_uid) = parse_set_value(&value, &primer, consumed)?;
            if model.set_def(&header.key).is_some() {
                let uid = instance_uid
                    .ok_or(MxfError::malformed(consumed, "set without instance uid"))?;
                if let Some(keep) = keep.as_deref_mut() {
                    if !keep(&header.key, &uid) {
                        metadata.filtered = true;
                        continue;
                    }
                }
                let mut set = MetadataSet::new(header.key);
                set.instance_uid = uid;
                for (key, bytes) in items {
                    if key != INSTANCE_UID_ITEM_KEY {
                        set.items.push(SetItem { key, value: bytes });
                    }
                }
                metadata.add_set(set);
            } else {
                log::debug!("preserving dark set {}", header.key);
                metadata.dark.push(DarkSet {
                    key: header.key,
                    data: value,
                    instance_uid,
                    resolutions,
                });
            }
        }

        metadata.resolve_references()?;
        Ok(metadata)
    }

    /// Strong references must resolve after the parse; weak references
    /// are tolerated and reported.
    fn resolve_references(&self) -> Result<()> {
        let dark_uids: HashSet<Uuid> = self.dark.iter().filter_map(|d| d.instance_uid).collect();
        for set in self.sets() {
            for def in self.model.items_of(&set.key) {
                if !def.item_type.is_strong_ref() && !def.item_type.is_weak_ref() {
                    continue;
                }
                if set.item_value(&def.key).is_none() {
                    continue;
                }
                let targets = if def.item_type.fixed_size() == Some(16) {
                    match set.ref_item(&def.key)? {
                        Some(target) => vec![target],
                        None => continue,
                    }
                } else {
                    set.ref_array_item(&def.key)?.unwrap_or_default()
                };
                for target in targets {
                    let resolved =
                        self.sets.contains_key(&target) || dark_uids.contains(&target);
                    if resolved {
                        continue;
                    }
                    if def.item_type.is_strong_ref() && !self.filtered {
                        return Err(MxfError::BrokenReference(target));
                    }
                    log::warn!(
                        "unresolved {} reference {} in {} item {}",
                        if def.item_type.is_strong_ref() { "strong" } else { "weak" },
                        target,
                        set.key,
                        def.name
                    );
                }
            }
        }
        Ok(())
    }
}

fn parse_set_value(
    value: &[u8],
    primer: &PrimerPack,
    offset: u64,
) -> Result<(Vec<(Ul, Vec<u8>)>, Vec<(u16, Ul)>, Option<Uuid>)> {
    let mut cursor = Cursor::new(value);
    let mut items = Vec::new();
    let mut resolutions = Vec::new();
    let mut instance_uid = None;
    let len = value.len() as u64;

    while cursor.position() < len {
        if len - cursor.position() < 4 {
            return Err(MxfError::malformed(offset, "truncated set item"));
        }
        let tag = cursor.read_u16::<BigEndian>()?;
        let item_len = cursor.read_u16::<BigEndian>()? as usize;
        let bytes = utils::take(&mut cursor, item_len)
            .map_err(|_| MxfError::malformed(offset, "truncated set item value"))?;
        let key = *primer
            .lookup_uid(tag)
            .ok_or(MxfError::malformed(offset, "local tag not in primer"))?;
        if key.matches(&INSTANCE_UID_ITEM_KEY) {
            if bytes.len() != 16 {
                return Err(MxfError::malformed(offset, "bad instance uid"));
            }
            let mut uid = [0u8; 16];
            uid.copy_from_slice(&bytes);
            instance_uid = Some(Uuid::from_bytes(uid));
        }
        resolutions.push((tag, key));
        items.push((key, bytes));
    }
    Ok((items, resolutions, instance_uid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::{ul, DATA_DEF_PICTURE, OP_1A};
    use crate::model::keys::*;
    use crate::model::baseline;

    fn build_graph() -> HeaderMetadata {
        let mut hm = HeaderMetadata::new(baseline());

        let mut storage = MetadataSet::new(CONTENT_STORAGE_SET_KEY);
        let mut package = MetadataSet::new(MATERIAL_PACKAGE_SET_KEY);
        package.set_umid(PACKAGE_UID_ITEM_KEY, &Umid::generate());
        package.set_timestamp(PACKAGE_CREATION_DATE_ITEM_KEY, &Timestamp::default());
        package.set_timestamp(PACKAGE_MODIFIED_DATE_ITEM_KEY, &Timestamp::default());
        package.set_ref_array(PACKAGE_TRACKS_ITEM_KEY, &[]);
        let package_uid = package.instance_uid;
        storage.set_ref_array(CS_PACKAGES_ITEM_KEY, &[package_uid]);
        let storage_uid = storage.instance_uid;

        let mut preface = MetadataSet::new(PREFACE_SET_KEY);
        preface.set_timestamp(PREFACE_LAST_MODIFIED_DATE_ITEM_KEY, &Timestamp::default());
        preface.set_version(PREFACE_VERSION_ITEM_KEY, 1, 3);
        preface.set_ul(PREFACE_OPERATIONAL_PATTERN_ITEM_KEY, &OP_1A);
        preface.set_ul_batch(PREFACE_ESSENCE_CONTAINERS_ITEM_KEY, &[]);
        preface.set_ul_batch(PREFACE_DM_SCHEMES_ITEM_KEY, &[]);
        preface.set_strong_ref(PREFACE_CONTENT_STORAGE_ITEM_KEY, &storage_uid);

        hm.add_set(preface);
        hm.add_set(storage);
        hm.add_set(package);
        hm
    }

    #[test]
    fn graph_round_trip() {
        let hm = build_graph();
        let mut buf = Vec::new();
        let written = hm.write(&mut buf).unwrap();
        assert_eq!(written, buf.len() as u64);

        let mut cursor = Cursor::new(&buf);
        let back =
            HeaderMetadata::read(&mut cursor, baseline(), written, None).unwrap();

        let preface = back.preface().unwrap();
        assert_eq!(
            preface.ul_item(&PREFACE_OPERATIONAL_PATTERN_ITEM_KEY).unwrap(),
            Some(OP_1A)
        );
        let storage_uid = preface
            .ref_item(&PREFACE_CONTENT_STORAGE_ITEM_KEY)
            .unwrap()
            .unwrap();
        let storage = back.get(&storage_uid).unwrap();
        let packages = storage.ref_array_item(&CS_PACKAGES_ITEM_KEY).unwrap().unwrap();
        assert_eq!(packages.len(), 1);
        assert!(back.get(&packages[0]).is_some());
        assert_eq!(back.sets().count(), hm.sets().count());
    }

    #[test]
    fn broken_strong_reference_detected() {
        let mut hm = build_graph();
        let preface_uid = hm.preface().unwrap().instance_uid;
        hm.get_mut(&preface_uid)
            .unwrap()
            .set_strong_ref(PREFACE_CONTENT_STORAGE_ITEM_KEY, &Uuid::new_v4());
        let mut buf = Vec::new();
        let written = hm.write(&mut buf).unwrap();
        let mut cursor = Cursor::new(&buf);
        let err = HeaderMetadata::read(&mut cursor, baseline(), written, None).unwrap_err();
        assert!(matches!(err, MxfError::BrokenReference(_)));
    }

    #[test]
    fn dark_set_preserved_verbatim() {
        let dark_key: Ul =
            ul!(0x06 0x0e 0x2b 0x34 0x02 0x53 0x01 0x01 0x0e 0x04 0x01 0x01 0x01 0x01 0x7f 0x00);

        let hm = build_graph();
        let mut buf = Vec::new();
        let written = hm.write(&mut buf).unwrap();

        // append a dark set using a fresh tag consistent with the primer
        // by re-reading and re-writing through the engine
        let mut cursor = Cursor::new(&buf);
        let mut back = HeaderMetadata::read(&mut cursor, baseline(), written, None).unwrap();
        let mut dark_value = Vec::new();
        dark_value.extend_from_slice(&INSTANCE_UID_TAG.to_be_bytes());
        dark_value.extend_from_slice(&16u16.to_be_bytes());
        let dark_uid = Uuid::new_v4();
        dark_value.extend_from_slice(dark_uid.as_bytes());
        back.dark.push(DarkSet {
            key: dark_key,
            data: dark_value.clone(),
            instance_uid: Some(dark_uid),
            resolutions: vec![(INSTANCE_UID_TAG, INSTANCE_UID_ITEM_KEY)],
        });

        let mut buf2 = Vec::new();
        let written2 = back.write(&mut buf2).unwrap();
        let mut cursor = Cursor::new(&buf2);
        let round = HeaderMetadata::read(&mut cursor, baseline(), written2, None).unwrap();
        assert_eq!(round.dark_sets().len(), 1);
        assert_eq!(round.dark_sets()[0].key, dark_key);
        assert_eq!(round.dark_sets()[0].data, dark_value);
    }

    #[test]
    fn filter_drops_sets_during_parse() {
        let hm = build_graph();
        let mut buf = Vec::new();
        let written = hm.write(&mut buf).unwrap();
        let mut cursor = Cursor::new(&buf);
        let mut keep = |key: &Ul, _uid: &Uuid| !key.matches(&MATERIAL_PACKAGE_SET_KEY);
        // the dangling reference left by the filter is intentional
        let back =
            HeaderMetadata::read(&mut cursor, baseline(), written, Some(&mut keep)).unwrap();
        assert_eq!(back.sets_of_type(&MATERIAL_PACKAGE_SET_KEY).count(), 0);
        assert!(back.preface().is_ok());
    }

    #[test]
    fn unknown_item_in_known_set_is_preserved() {
        let vendor_item: Ul =
            ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x0e 0x0e 0x06 0x01 0x01 0x7f 0x00 0x00 0x00);
        let mut hm = build_graph();
        let preface_uid = hm.preface().unwrap().instance_uid;
        hm.get_mut(&preface_uid)
            .unwrap()
            .set_item(vendor_item, vec![1, 2, 3]);

        let mut buf = Vec::new();
        let written = hm.write(&mut buf).unwrap();
        let mut cursor = Cursor::new(&buf);
        let back = HeaderMetadata::read(&mut cursor, baseline(), written, None).unwrap();
        let preface = back.preface().unwrap();
        assert_eq!(preface.item_value(&vendor_item), Some(&[1u8, 2, 3][..]));
    }

    #[test]
    fn picture_data_def_is_distinct() {
        // guard against label table typos
        assert_ne!(DATA_DEF_PICTURE, crate::labels::DATA_DEF_SOUND);
    }
}
