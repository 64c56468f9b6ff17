use crate::error::MxfError;
use crate::klv::KlvHeader;
use crate::labels::PRIMER_PACK_KEY;
use crate::prelude::*;
use crate::types::Ul;
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::collections::HashMap;
use std::io::{Read, Write};

/// Bytes of one serialised entry: 2-byte tag plus 16-byte item key.
const ENTRY_SIZE: u32 = 18;

/// Dynamic tag allocation starts here by convention; anything non-zero
/// is acceptable on read.
const FIRST_DYNAMIC_TAG: u16 = 0x8000;

/// Per-partition mapping between 16-bit local tags and item keys.
///
/// Tag 0x0000 is reserved as "not assigned". Entries keep their
/// registration order so serialisation is deterministic.
#[derive(Default, Clone)]
pub struct PrimerPack {
    entries: Vec<(u16, Ul)>,
    by_tag: HashMap<u16, usize>,
    by_uid: HashMap<Ul, usize>,
    next_tag: u16,
}

impl PrimerPack {
    pub fn new() -> PrimerPack {
        PrimerPack {
            next_tag: FIRST_DYNAMIC_TAG,
            ..PrimerPack::default()
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Register `uid` under a static tag. An existing mapping for the
    /// same uid wins; a tag collision with a different uid is rejected.
    pub fn register_static(&mut self, uid: &Ul, tag: u16) -> Result<u16> {
        if tag == 0 {
            return self.register(uid);
        }
        if let Some(&i) = self.by_uid.get(uid) {
            return Ok(self.entries[i].0);
        }
        if let Some(&i) = self.by_tag.get(&tag) {
            if self.entries[i].1 != *uid {
                return Err(MxfError::LogicError("local tag already mapped"));
            }
            return Ok(tag);
        }
        self.insert(tag, *uid);
        Ok(tag)
    }

    /// Register `uid` under a dynamically allocated tag, skipping tags
    /// already taken by static registrations.
    pub fn register(&mut self, uid: &Ul) -> Result<u16> {
        if let Some(&i) = self.by_uid.get(uid) {
            return Ok(self.entries[i].0);
        }
        loop {
            let tag = self.next_tag;
            if tag == 0 {
                return Err(MxfError::CapacityExceeded("local tag space"));
            }
            self.next_tag = self.next_tag.wrapping_add(1);
            if !self.by_tag.contains_key(&tag) {
                self.insert(tag, *uid);
                return Ok(tag);
            }
        }
    }

    pub fn lookup_uid(&self, tag: u16) -> Option<&Ul> {
        self.by_tag.get(&tag).map(|&i| &self.entries[i].1)
    }

    pub fn lookup_tag(&self, uid: &Ul) -> Option<u16> {
        self.by_uid.get(uid).map(|&i| self.entries[i].0)
    }

    pub fn entries(&self) -> &[(u16, Ul)] {
        &self.entries
    }

    fn insert(&mut self, tag: u16, uid: Ul) {
        self.by_tag.insert(tag, self.entries.len());
        self.by_uid.insert(uid, self.entries.len());
        self.entries.push((tag, uid));
    }

    /// Serialised size including the KLV key and length.
    pub fn write_size(&self) -> u64 {
        let value = 8 + self.entries.len() as u64 * ENTRY_SIZE as u64;
        KlvHeader::new(PRIMER_PACK_KEY, value).header_size() + value
    }
}

impl Decode for PrimerPack {
    /// Reads the primer pack value (count-prefixed entry batch).
    /// Duplicate tags keep the first mapping.
    fn from_reader<R: Read>(reader: &mut R) -> Result<PrimerPack> {
        let count = reader.read_u32::<BigEndian>()?;
        let size = reader.read_u32::<BigEndian>()?;
        if size != ENTRY_SIZE {
            return Err(MxfError::malformed(0, "bad primer pack entry size"));
        }
        let mut primer = PrimerPack::new();
        for _ in 0..count {
            let tag = reader.read_u16::<BigEndian>()?;
            let uid = Ul::from_reader(reader)?;
            if tag == 0 {
                return Err(MxfError::malformed(0, "primer pack maps reserved tag 0"));
            }
            if primer.by_tag.contains_key(&tag) {
                log::warn!("duplicate primer entry for tag 0x{:04x}, keeping first", tag);
                continue;
            }
            if primer.by_uid.contains_key(&uid) {
                log::warn!("duplicate primer entry for key {}, keeping first", uid);
                continue;
            }
            primer.insert(tag, uid);
            if tag >= primer.next_tag {
                primer.next_tag = tag.wrapping_add(1);
            }
        }
        Ok(primer)
    }
}

impl Encode for PrimerPack {
    /// Writes the full KLV including key and length.
    fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        let value = 8 + self.entries.len() as u64 * ENTRY_SIZE as u64;
        KlvHeader::new(PRIMER_PACK_KEY, value).write_to(writer)?;
        writer.write_u32::<BigEndian>(self.entries.len() as u32)?;
        writer.write_u32::<BigEndian>(ENTRY_SIZE)?;
        for (tag, uid) in &self.entries {
            writer.write_u16::<BigEndian>(*tag)?;
            uid.write_to(writer)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::keys::{INSTANCE_UID_ITEM_KEY, INSTANCE_UID_TAG, PACKAGE_UID_ITEM_KEY};
    use std::io::Cursor;

    #[test]
    fn dynamic_tags_start_high_and_are_stable() {
        let mut primer = PrimerPack::new();
        let tag = primer.register(&PACKAGE_UID_ITEM_KEY).unwrap();
        assert_eq!(tag, 0x8000);
        assert_eq!(primer.register(&PACKAGE_UID_ITEM_KEY).unwrap(), 0x8000);
        let other = primer.register(&INSTANCE_UID_ITEM_KEY).unwrap();
        assert_eq!(other, 0x8001);
    }

    #[test]
    fn static_tag_collision_rejected() {
        let mut primer = PrimerPack::new();
        primer
            .register_static(&INSTANCE_UID_ITEM_KEY, INSTANCE_UID_TAG)
            .unwrap();
        assert!(primer
            .register_static(&PACKAGE_UID_ITEM_KEY, INSTANCE_UID_TAG)
            .is_err());
    }

    #[test]
    fn round_trip_keeps_bijection() {
        let mut primer = PrimerPack::new();
        primer
            .register_static(&INSTANCE_UID_ITEM_KEY, INSTANCE_UID_TAG)
            .unwrap();
        primer.register(&PACKAGE_UID_ITEM_KEY).unwrap();

        let mut buf = Vec::new();
        primer.write_to(&mut buf).unwrap();

        let mut cursor = Cursor::new(&buf);
        let header = KlvHeader::from_reader(&mut cursor).unwrap();
        assert_eq!(header.key, PRIMER_PACK_KEY);
        let back = PrimerPack::from_reader(&mut cursor).unwrap();
        assert_eq!(back.len(), 2);
        assert_eq!(back.lookup_tag(&INSTANCE_UID_ITEM_KEY), Some(INSTANCE_UID_TAG));
        assert_eq!(back.lookup_uid(0x8000), Some(&PACKAGE_UID_ITEM_KEY));
        // a new dynamic registration does not collide with read tags
        let mut back = back;
        let tag = back.register(&crate::labels::FILL_KEY).unwrap();
        assert_eq!(tag, 0x8001);
    }
}
