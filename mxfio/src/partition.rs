//! Partition packs, KAG alignment and the random index pack.

use crate::error::MxfError;
use crate::klv::{self, KlvHeader};
use crate::labels::{PARTITION_PACK_PREFIX, RANDOM_INDEX_PACK_KEY};
use crate::prelude::*;
use crate::types::Ul;
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use std::io::{Read, Write};

#[derive(Clone, Copy, PartialEq, Eq, Debug, FromPrimitive)]
pub enum PartitionKind {
    Header = 0x02,
    Body = 0x03,
    Footer = 0x04,
}

/// Open means the partition may still change; complete means the header
/// metadata was written without needing a later update.
#[derive(Clone, Copy, PartialEq, Eq, Debug, FromPrimitive)]
pub enum PartitionStatus {
    Open = 0x01,
    Closed = 0x02,
    OpenComplete = 0x03,
    ClosedComplete = 0x04,
    /// Body partition variant holding a generic stream.
    GenericStream = 0x11,
}

impl PartitionStatus {
    pub fn is_closed(&self) -> bool {
        matches!(self, PartitionStatus::Closed | PartitionStatus::ClosedComplete)
    }

    pub fn is_complete(&self) -> bool {
        matches!(
            self,
            PartitionStatus::OpenComplete | PartitionStatus::ClosedComplete
        )
    }

    pub fn closed(complete: bool) -> PartitionStatus {
        if complete {
            PartitionStatus::ClosedComplete
        } else {
            PartitionStatus::Closed
        }
    }
}

/// The partition pack record. Fixed-size encoding with a 4-byte BER
/// length so the pack can be rewritten in place at finalise.
#[derive(Clone, Debug)]
pub struct PartitionPack {
    pub kind: PartitionKind,
    pub status: PartitionStatus,
    pub major_version: u16,
    pub minor_version: u16,
    pub kag_size: u32,
    pub this_partition: u64,
    pub previous_partition: u64,
    pub footer_partition: u64,
    pub header_byte_count: u64,
    pub index_byte_count: u64,
    pub index_sid: u32,
    pub body_offset: u64,
    pub body_sid: u32,
    pub operational_pattern: Ul,
    pub essence_containers: Vec<Ul>,
}

pub const SUPPORTED_MAJOR_VERSION: u16 = 1;
pub const SUPPORTED_MINOR_VERSIONS: std::ops::RangeInclusive<u16> = 2..=3;

impl PartitionPack {
    pub fn new(kind: PartitionKind, status: PartitionStatus) -> PartitionPack {
        PartitionPack {
            kind,
            status,
            major_version: 1,
            minor_version: 3,
            kag_size: 1,
            this_partition: 0,
            previous_partition: 0,
            footer_partition: 0,
            header_byte_count: 0,
            index_byte_count: 0,
            index_sid: 0,
            body_offset: 0,
            body_sid: 0,
            operational_pattern: Ul::null(),
            essence_containers: Vec::new(),
        }
    }

    pub fn key(&self) -> Ul {
        let mut bytes = [0u8; 16];
        bytes[..13].copy_from_slice(&PARTITION_PACK_PREFIX);
        bytes[13] = self.kind as u8;
        bytes[14] = self.status as u8;
        Ul(bytes)
    }

    fn value_size(&self) -> u64 {
        // fixed fields + operational pattern + essence container batch
        2 + 2 + 4 + 8 * 5 + 4 + 8 + 4 + 16 + 8 + self.essence_containers.len() as u64 * 16
    }

    /// Total on-disk size including key and length.
    pub fn write_size(&self) -> u64 {
        16 + 4 + self.value_size()
    }

    /// Parse the pack from a KLV whose key has already been read.
    pub fn read_value<R: Read>(header: &KlvHeader, reader: &mut R) -> Result<PartitionPack> {
        let kind = PartitionKind::from_u8(header.key.0[13])
            .ok_or(MxfError::malformed(0, "unknown partition kind"))?;
        let status = PartitionStatus::from_u8(header.key.0[14])
            .ok_or(MxfError::malformed(0, "unknown partition status"))?;

        let major_version = reader.read_u16::<BigEndian>()?;
        let minor_version = reader.read_u16::<BigEndian>()?;
        if major_version != SUPPORTED_MAJOR_VERSION
            || !SUPPORTED_MINOR_VERSIONS.contains(&minor_version)
        {
            return Err(MxfError::UnsupportedVersion {
                major: major_version,
                minor: minor_version,
            });
        }
        let kag_size = reader.read_u32::<BigEndian>()?;
        let this_partition = reader.read_u64::<BigEndian>()?;
        let previous_partition = reader.read_u64::<BigEndian>()?;
        let footer_partition = reader.read_u64::<BigEndian>()?;
        let header_byte_count = reader.read_u64::<BigEndian>()?;
        let index_byte_count = reader.read_u64::<BigEndian>()?;
        let index_sid = reader.read_u32::<BigEndian>()?;
        let body_offset = reader.read_u64::<BigEndian>()?;
        let body_sid = reader.read_u32::<BigEndian>()?;
        let operational_pattern = Ul::from_reader(reader)?;

        let count = reader.read_u32::<BigEndian>()?;
        let size = reader.read_u32::<BigEndian>()?;
        if size != 16 {
            return Err(MxfError::malformed(0, "bad essence container batch"));
        }
        let mut essence_containers = Vec::with_capacity(count as usize);
        for _ in 0..count {
            essence_containers.push(Ul::from_reader(reader)?);
        }

        Ok(PartitionPack {
            kind,
            status,
            major_version,
            minor_version,
            kag_size,
            this_partition,
            previous_partition,
            footer_partition,
            header_byte_count,
            index_byte_count,
            index_sid,
            body_offset,
            body_sid,
            operational_pattern,
            essence_containers,
        })
    }
}

impl Encode for PartitionPack {
    fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        KlvHeader::with_llen(self.key(), 4, self.value_size()).write_to(writer)?;
        writer.write_u16::<BigEndian>(self.major_version)?;
        writer.write_u16::<BigEndian>(self.minor_version)?;
        writer.write_u32::<BigEndian>(self.kag_size)?;
        writer.write_u64::<BigEndian>(self.this_partition)?;
        writer.write_u64::<BigEndian>(self.previous_partition)?;
        writer.write_u64::<BigEndian>(self.footer_partition)?;
        writer.write_u64::<BigEndian>(self.header_byte_count)?;
        writer.write_u64::<BigEndian>(self.index_byte_count)?;
        writer.write_u32::<BigEndian>(self.index_sid)?;
        writer.write_u64::<BigEndian>(self.body_offset)?;
        writer.write_u32::<BigEndian>(self.body_sid)?;
        self.operational_pattern.write_to(writer)?;
        writer.write_u32::<BigEndian>(self.essence_containers.len() as u32)?;
        writer.write_u32::<BigEndian>(16)?;
        for ec in &self.essence_containers {
            ec.write_to(writer)?;
        }
        Ok(())
    }
}

/// Fill bytes needed to pad `used` bytes since the partition pack start
/// to a KAG multiple. A KAG of 0 or 1 disables alignment; a remainder
/// too small for a minimum filler rolls over to the next grid line.
pub fn kag_fill_size(used: u64, kag_size: u32) -> u64 {
    if kag_size <= 1 {
        return 0;
    }
    let kag = kag_size as u64;
    let mut fill = (kag - used % kag) % kag;
    if fill == 0 {
        return 0;
    }
    while fill < klv::MIN_FILL_SIZE {
        fill += kag;
    }
    fill
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RipEntry {
    pub body_sid: u32,
    pub offset: u64,
}

/// Random index pack: the final KLV of a file, listing every partition
/// offset. The last four value bytes give the overall pack length so a
/// reader can locate the pack from the end of the file.
#[derive(Default, Debug)]
pub struct RandomIndexPack {
    pub entries: Vec<RipEntry>,
}

impl RandomIndexPack {
    pub fn new() -> RandomIndexPack {
        RandomIndexPack::default()
    }

    pub fn add(&mut self, body_sid: u32, offset: u64) {
        self.entries.push(RipEntry { body_sid, offset });
    }

    fn value_size(&self) -> u64 {
        self.entries.len() as u64 * 12 + 4
    }

    pub fn write_size(&self) -> u64 {
        let value = self.value_size();
        KlvHeader::new(RANDOM_INDEX_PACK_KEY, value).header_size() + value
    }
}

impl Encode for RandomIndexPack {
    fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        let value = self.value_size();
        let header = KlvHeader::new(RANDOM_INDEX_PACK_KEY, value);
        header.write_to(writer)?;
        for entry in &self.entries {
            writer.write_u32::<BigEndian>(entry.body_sid)?;
            writer.write_u64::<BigEndian>(entry.offset)?;
        }
        writer.write_u32::<BigEndian>((header.header_size() + value) as u32)?;
        Ok(())
    }
}

impl RandomIndexPack {
    /// Parse the pack value (key and length already consumed).
    pub fn read_value<R: Read>(header: &KlvHeader, reader: &mut R) -> Result<RandomIndexPack> {
        if header.len < 4 || (header.len - 4) % 12 != 0 {
            return Err(MxfError::malformed(0, "bad random index pack size"));
        }
        let count = (header.len - 4) / 12;
        let mut rip = RandomIndexPack::new();
        for _ in 0..count {
            let body_sid = reader.read_u32::<BigEndian>()?;
            let offset = reader.read_u64::<BigEndian>()?;
            rip.add(body_sid, offset);
        }
        let overall = reader.read_u32::<BigEndian>()? as u64;
        if overall != header.header_size() + header.len {
            return Err(MxfError::malformed(0, "random index pack length mismatch"));
        }
        Ok(rip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::{EC_BWF_FRAME_WRAPPED, OP_1A};
    use std::io::Cursor;

    #[test]
    fn partition_pack_round_trip() {
        let mut pack = PartitionPack::new(PartitionKind::Header, PartitionStatus::Open);
        pack.kag_size = 0x200;
        pack.footer_partition = 0x1234;
        pack.header_byte_count = 0x800;
        pack.body_sid = 1;
        pack.operational_pattern = OP_1A;
        pack.essence_containers.push(EC_BWF_FRAME_WRAPPED);

        let mut buf = Vec::new();
        pack.write_to(&mut buf).unwrap();
        assert_eq!(buf.len() as u64, pack.write_size());

        let mut cursor = Cursor::new(&buf);
        let header = KlvHeader::from_reader(&mut cursor).unwrap();
        assert!(header.is_partition_pack());
        let back = PartitionPack::read_value(&header, &mut cursor).unwrap();
        assert_eq!(back.kind, PartitionKind::Header);
        assert_eq!(back.status, PartitionStatus::Open);
        assert_eq!(back.kag_size, 0x200);
        assert_eq!(back.footer_partition, 0x1234);
        assert_eq!(back.essence_containers, vec![EC_BWF_FRAME_WRAPPED]);
    }

    #[test]
    fn rewrite_keeps_size() {
        let mut pack = PartitionPack::new(PartitionKind::Header, PartitionStatus::Open);
        pack.essence_containers.push(EC_BWF_FRAME_WRAPPED);
        let mut open = Vec::new();
        pack.write_to(&mut open).unwrap();

        pack.status = PartitionStatus::ClosedComplete;
        pack.footer_partition = u64::MAX / 2;
        let mut closed = Vec::new();
        pack.write_to(&mut closed).unwrap();
        assert_eq!(open.len(), closed.len());
    }

    #[test]
    fn unsupported_version_rejected() {
        let pack = PartitionPack::new(PartitionKind::Header, PartitionStatus::Open);
        let mut buf = Vec::new();
        pack.write_to(&mut buf).unwrap();
        buf[20] = 9; // major version low byte
        let mut cursor = Cursor::new(&buf);
        let header = KlvHeader::from_reader(&mut cursor).unwrap();
        assert!(matches!(
            PartitionPack::read_value(&header, &mut cursor),
            Err(MxfError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn kag_fill_rules() {
        assert_eq!(kag_fill_size(100, 0), 0);
        assert_eq!(kag_fill_size(100, 1), 0);
        assert_eq!(kag_fill_size(512, 512), 0);
        assert_eq!(kag_fill_size(100, 512), 412);
        // remainder smaller than a minimum filler rolls to the next line
        assert_eq!(kag_fill_size(500, 512), 524);
    }

    #[test]
    fn rip_round_trip() {
        let mut rip = RandomIndexPack::new();
        rip.add(0, 0);
        rip.add(1, 0x8000);
        rip.add(0, 0x20000);
        let mut buf = Vec::new();
        rip.write_to(&mut buf).unwrap();
        assert_eq!(buf.len() as u64, rip.write_size());

        let mut cursor = Cursor::new(&buf);
        let header = KlvHeader::from_reader(&mut cursor).unwrap();
        assert_eq!(header.key, RANDOM_INDEX_PACK_KEY);
        let back = RandomIndexPack::read_value(&header, &mut cursor).unwrap();
        assert_eq!(back.entries, rip.entries);
        // the trailing u32 equals the total pack size
        let tail = u32::from_be_bytes(buf[buf.len() - 4..].try_into().unwrap());
        assert_eq!(tail as usize, buf.len());
    }
}
