//! Index table segments: CBE and VBE encode/decode, the writer-side
//! builder and the reader-side position resolution.

use crate::error::MxfError;
use crate::klv::KlvHeader;
use crate::labels::INDEX_TABLE_SEGMENT_KEY;
use crate::prelude::*;
use crate::types::{Position, Rational};
use crate::utils;
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Cursor, Read, Write};
use uuid::Uuid;

/// Hard ceiling on rows per segment.
pub const MAX_INDEX_ENTRIES: usize = 65536;
/// Rows that fit a segment's entry array within the 16-bit local set
/// length, the binding limit when writing.
pub const SEGMENT_ROW_LIMIT: usize = (u16::MAX as usize - 8) / 11;

pub const INDEX_FLAG_RANDOM_ACCESS: u8 = 0x80;
pub const INDEX_FLAG_SEQUENCE_HEADER: u8 = 0x40;
const PICTURE_TYPE_SHIFT: u8 = 4;
const PICTURE_TYPE_MASK: u8 = 0x30;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PictureType {
    I,
    P,
    B,
}

impl PictureType {
    pub fn to_flags(self) -> u8 {
        let bits = match self {
            PictureType::I => 0,
            PictureType::P => 1,
            PictureType::B => 2,
        };
        bits << PICTURE_TYPE_SHIFT
    }

    pub fn from_flags(flags: u8) -> PictureType {
        match (flags & PICTURE_TYPE_MASK) >> PICTURE_TYPE_SHIFT {
            0 => PictureType::I,
            1 => PictureType::P,
            _ => PictureType::B,
        }
    }
}

/// One VBE row. `temporal_offset` maps a presentation position to its
/// decode position; `key_frame_offset` points back (never forward) to
/// the closest random-access frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndexEntry {
    pub temporal_offset: i8,
    pub key_frame_offset: i8,
    pub flags: u8,
    pub stream_offset: u64,
}

// Index segments use well-known local tags independent of any primer.
const TAG_INSTANCE_UID: u16 = 0x3c0a;
const TAG_EDIT_RATE: u16 = 0x3f0b;
const TAG_START_POSITION: u16 = 0x3f0c;
const TAG_DURATION: u16 = 0x3f0d;
const TAG_EDIT_UNIT_BYTE_COUNT: u16 = 0x3f05;
const TAG_INDEX_SID: u16 = 0x3f06;
const TAG_BODY_SID: u16 = 0x3f07;
const TAG_SLICE_COUNT: u16 = 0x3f08;
const TAG_INDEX_ENTRIES: u16 = 0x3f0a;

#[derive(Clone, Debug)]
pub struct IndexTableSegment {
    pub instance_uid: Uuid,
    pub index_edit_rate: Rational,
    pub index_start_position: Position,
    pub index_duration: i64,
    /// Non-zero for constant bytes per edit unit; zero selects VBE.
    pub edit_unit_byte_count: u32,
    pub index_sid: u32,
    pub body_sid: u32,
    pub slice_count: u8,
    pub entries: Vec<IndexEntry>,
}

impl IndexTableSegment {
    pub fn new(index_sid: u32, body_sid: u32, edit_rate: Rational) -> IndexTableSegment {
        IndexTableSegment {
            instance_uid: Uuid::new_v4(),
            index_edit_rate: edit_rate,
            index_start_position: 0,
            index_duration: 0,
            edit_unit_byte_count: 0,
            index_sid,
            body_sid,
            slice_count: 0,
            entries: Vec::new(),
        }
    }

    pub fn is_cbe(&self) -> bool {
        self.entries.is_empty()
    }

    fn value_size(&self) -> u64 {
        let mut size = 0u64;
        size += 4 + 16; // instance uid
        size += 4 + 8; // edit rate
        size += 4 + 8; // start position
        size += 4 + 8; // duration
        size += 4 + 4; // edit unit byte count
        size += 4 + 4; // index sid
        size += 4 + 4; // body sid
        size += 4 + 1; // slice count
        if !self.entries.is_empty() {
            size += 4 + 8 + self.entries.len() as u64 * 11;
        }
        size
    }

    pub fn write_size(&self) -> u64 {
        let value = self.value_size();
        KlvHeader::new(INDEX_TABLE_SEGMENT_KEY, value).header_size() + value
    }

    /// Parse the segment value (key and length already consumed).
    pub fn read_value<R: Read>(header: &KlvHeader, reader: &mut R) -> Result<IndexTableSegment> {
        let value = utils::take(reader, header.len as usize)?;
        let mut cursor = Cursor::new(value.as_slice());
        let mut segment = IndexTableSegment::new(0, 0, Rational::new(0, 1));

        while (cursor.position() as usize) < value.len() {
            if value.len() - (cursor.position() as usize) < 4 {
                return Err(MxfError::malformed(0, "truncated index segment item"));
            }
            let tag = cursor.read_u16::<BigEndian>()?;
            let len = cursor.read_u16::<BigEndian>()? as usize;
            let mut item = Cursor::new(utils::take(&mut cursor, len)?);
            match tag {
                TAG_INSTANCE_UID => {
                    segment.instance_uid = crate::types::read_uuid(&mut item)?;
                }
                TAG_EDIT_RATE => segment.index_edit_rate = Rational::from_reader(&mut item)?,
                TAG_START_POSITION => {
                    segment.index_start_position = item.read_i64::<BigEndian>()?
                }
                TAG_DURATION => segment.index_duration = item.read_i64::<BigEndian>()?,
                TAG_EDIT_UNIT_BYTE_COUNT => {
                    segment.edit_unit_byte_count = item.read_u32::<BigEndian>()?
                }
                TAG_INDEX_SID => segment.index_sid = item.read_u32::<BigEndian>()?,
                TAG_BODY_SID => segment.body_sid = item.read_u32::<BigEndian>()?,
                TAG_SLICE_COUNT => segment.slice_count = item.read_u8()?,
                TAG_INDEX_ENTRIES => {
                    let count = item.read_u32::<BigEndian>()? as usize;
                    let entry_size = item.read_u32::<BigEndian>()? as usize;
                    if entry_size < 11 {
                        return Err(MxfError::malformed(0, "bad index entry size"));
                    }
                    if count > MAX_INDEX_ENTRIES {
                        return Err(MxfError::CapacityExceeded("index segment rows"));
                    }
                    for _ in 0..count {
                        let temporal_offset = item.read_i8()?;
                        let key_frame_offset = item.read_i8()?;
                        let flags = item.read_u8()?;
                        let stream_offset = item.read_u64::<BigEndian>()?;
                        // slice and pos-table extensions follow
                        utils::skip(&mut item, (entry_size - 11) as u64)?;
                        segment.entries.push(IndexEntry {
                            temporal_offset,
                            key_frame_offset,
                            flags,
                            stream_offset,
                        });
                    }
                }
                _ => {}
            }
        }
        Ok(segment)
    }
}

impl Encode for IndexTableSegment {
    fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        if self.entries.len() > MAX_INDEX_ENTRIES {
            return Err(MxfError::CapacityExceeded("index segment rows"));
        }
        KlvHeader::new(INDEX_TABLE_SEGMENT_KEY, self.value_size()).write_to(writer)?;

        let mut item = |writer: &mut W, tag: u16, len: u16| -> Result<()> {
            writer.write_u16::<BigEndian>(tag)?;
            writer.write_u16::<BigEndian>(len)?;
            Ok(())
        };

        item(writer, TAG_INSTANCE_UID, 16)?;
        crate::types::write_uuid(writer, &self.instance_uid)?;
        item(writer, TAG_EDIT_RATE, 8)?;
        self.index_edit_rate.write_to(writer)?;
        item(writer, TAG_START_POSITION, 8)?;
        writer.write_i64::<BigEndian>(self.index_start_position)?;
        item(writer, TAG_DURATION, 8)?;
        writer.write_i64::<BigEndian>(self.index_duration)?;
        item(writer, TAG_EDIT_UNIT_BYTE_COUNT, 4)?;
        writer.write_u32::<BigEndian>(self.edit_unit_byte_count)?;
        item(writer, TAG_INDEX_SID, 4)?;
        writer.write_u32::<BigEndian>(self.index_sid)?;
        item(writer, TAG_BODY_SID, 4)?;
        writer.write_u32::<BigEndian>(self.body_sid)?;
        item(writer, TAG_SLICE_COUNT, 1)?;
        writer.write_u8(self.slice_count)?;

        if !self.entries.is_empty() {
            let array_len = 8 + self.entries.len() * 11;
            if array_len > u16::MAX as usize {
                return Err(MxfError::CapacityExceeded("index entry array length"));
            }
            item(writer, TAG_INDEX_ENTRIES, array_len as u16)?;
            writer.write_u32::<BigEndian>(self.entries.len() as u32)?;
            writer.write_u32::<BigEndian>(11)?;
            for entry in &self.entries {
                writer.write_i8(entry.temporal_offset)?;
                writer.write_i8(entry.key_frame_offset)?;
                writer.write_u8(entry.flags)?;
                writer.write_u64::<BigEndian>(entry.stream_offset)?;
            }
        }
        Ok(())
    }
}

/// Writer-side accumulation of index information for one index stream.
pub struct IndexTableWriter {
    index_sid: u32,
    body_sid: u32,
    edit_rate: Rational,
    edit_unit_byte_count: u32,
    entries: Vec<IndexEntry>,
    duration: i64,
}

impl IndexTableWriter {
    pub fn new_cbe(
        index_sid: u32,
        body_sid: u32,
        edit_rate: Rational,
        edit_unit_byte_count: u32,
    ) -> IndexTableWriter {
        IndexTableWriter {
            index_sid,
            body_sid,
            edit_rate,
            edit_unit_byte_count,
            entries: Vec::new(),
            duration: 0,
        }
    }

    pub fn new_vbe(index_sid: u32, body_sid: u32, edit_rate: Rational) -> IndexTableWriter {
        IndexTableWriter {
            index_sid,
            body_sid,
            edit_rate,
            edit_unit_byte_count: 0,
            entries: Vec::new(),
            duration: 0,
        }
    }

    pub fn is_cbe(&self) -> bool {
        self.edit_unit_byte_count != 0
    }

    pub fn duration(&self) -> i64 {
        self.duration
    }

    /// Advance a CBE index by `count` edit units.
    pub fn extend_cbe(&mut self, count: i64) {
        debug_assert!(self.is_cbe());
        self.duration += count;
    }

    pub fn add_entry(
        &mut self,
        temporal_offset: i8,
        key_frame_offset: i8,
        flags: u8,
        stream_offset: u64,
    ) {
        self.entries.push(IndexEntry {
            temporal_offset,
            key_frame_offset,
            flags,
            stream_offset,
        });
        self.duration += 1;
    }

    /// Back-fill a temporal offset once the decode order of a frame
    /// becomes known (long-GOP reordering).
    pub fn update_temporal_offset(&mut self, position: Position, temporal_offset: i8) {
        if let Some(entry) = self.entries.get_mut(position as usize) {
            entry.temporal_offset = temporal_offset;
        }
    }

    pub fn update_flags(&mut self, position: Position, flags: u8) {
        if let Some(entry) = self.entries.get_mut(position as usize) {
            entry.flags = flags;
        }
    }

    /// Merge the accumulated information into segments bounded by the
    /// row and byte limits.
    pub fn segments(&self) -> Vec<IndexTableSegment> {
        if self.is_cbe() {
            let mut segment = IndexTableSegment::new(self.index_sid, self.body_sid, self.edit_rate);
            segment.edit_unit_byte_count = self.edit_unit_byte_count;
            segment.index_start_position = 0;
            segment.index_duration = self.duration;
            return vec![segment];
        }
        let mut segments = Vec::new();
        let mut start = 0usize;
        while start < self.entries.len() || segments.is_empty() {
            let end = (start + SEGMENT_ROW_LIMIT).min(self.entries.len());
            let mut segment = IndexTableSegment::new(self.index_sid, self.body_sid, self.edit_rate);
            segment.index_start_position = start as Position;
            segment.index_duration = (end - start) as i64;
            segment.entries = self.entries[start..end].to_vec();
            segments.push(segment);
            if end == self.entries.len() {
                break;
            }
            start = end;
        }
        segments
    }
}

/// Resolved information for one edit unit.
#[derive(Clone, Copy, Debug)]
pub struct IndexedEntry {
    pub stream_offset: u64,
    /// Edit unit size when the following entry bounds it.
    pub size: Option<u64>,
    pub temporal_offset: i8,
    pub key_frame_offset: i8,
    pub flags: u8,
}

/// Reader-side concatenation of segments for one index stream.
#[derive(Default)]
pub struct IndexSegments {
    segments: Vec<IndexTableSegment>,
    /// Stream offset at which each segment starts, derived for CBE runs.
    bases: Vec<u64>,
}

impl IndexSegments {
    pub fn new() -> IndexSegments {
        IndexSegments::default()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn add(&mut self, segment: IndexTableSegment) {
        let at = self
            .segments
            .partition_point(|s| s.index_start_position <= segment.index_start_position);
        // an equal start position replaces (footer repeats of body segments)
        if at > 0 && self.segments[at - 1].index_start_position == segment.index_start_position {
            self.segments[at - 1] = segment;
        } else {
            self.segments.insert(at, segment);
        }
        self.rebase();
    }

    fn rebase(&mut self) {
        self.bases.clear();
        let mut base = 0u64;
        for segment in &self.segments {
            self.bases.push(base);
            if segment.is_cbe() {
                base += segment.edit_unit_byte_count as u64 * segment.index_duration.max(0) as u64;
            } else if let Some(last) = segment.entries.last() {
                // next segment then starts after the last indexed unit;
                // its own entries carry absolute offsets
                base = last.stream_offset;
            }
        }
    }

    pub fn duration(&self) -> i64 {
        self.segments
            .iter()
            .map(|s| s.index_duration.max(0))
            .sum()
    }

    pub fn edit_rate(&self) -> Option<Rational> {
        self.segments.first().map(|s| s.index_edit_rate)
    }

    /// Stream offsets must be strictly monotonic with position.
    pub fn validate(&self) -> Result<()> {
        for segment in &self.segments {
            let mut previous: Option<u64> = None;
            for entry in &segment.entries {
                if let Some(p) = previous {
                    if entry.stream_offset <= p {
                        return Err(MxfError::malformed(0, "index stream offsets not monotonic"));
                    }
                }
                previous = Some(entry.stream_offset);
            }
        }
        Ok(())
    }

    fn segment_for(&self, position: Position) -> Option<(usize, &IndexTableSegment)> {
        let at = self
            .segments
            .partition_point(|s| s.index_start_position <= position);
        if at == 0 {
            return None;
        }
        let segment = &self.segments[at - 1];
        if position >= segment.index_start_position + segment.index_duration.max(0)
            && segment.index_duration > 0
        {
            return None;
        }
        Some((at - 1, segment))
    }

    /// Resolve a position to its stream offset and edit-unit size.
    pub fn entry(&self, position: Position) -> Result<IndexedEntry> {
        let (i, segment) = self
            .segment_for(position)
            .ok_or(MxfError::LogicError("position outside index"))?;
        let relative = position - segment.index_start_position;
        if segment.is_cbe() {
            let size = segment.edit_unit_byte_count as u64;
            return Ok(IndexedEntry {
                stream_offset: self.bases[i] + size * relative as u64,
                size: Some(size),
                temporal_offset: 0,
                key_frame_offset: 0,
                flags: INDEX_FLAG_RANDOM_ACCESS,
            });
        }
        let entry = segment
            .entries
            .get(relative as usize)
            .ok_or(MxfError::malformed(0, "index entry missing"))?;
        let next = segment
            .entries
            .get(relative as usize + 1)
            .map(|e| e.stream_offset)
            .or_else(|| {
                self.segments
                    .get(i + 1)
                    .and_then(|s| s.entries.first())
                    .map(|e| e.stream_offset)
            });
        Ok(IndexedEntry {
            stream_offset: entry.stream_offset,
            size: next.map(|n| n - entry.stream_offset),
            temporal_offset: entry.temporal_offset,
            key_frame_offset: entry.key_frame_offset,
            flags: entry.flags,
        })
    }

    /// Edit units before `position` required to decode it.
    pub fn precharge(&self, position: Position) -> i64 {
        match self.entry(position) {
            Ok(entry) => -(entry.key_frame_offset as i64),
            Err(_) => 0,
        }
    }

    /// Edit units after `position` required to decode it.
    pub fn rollout(&self, position: Position) -> i64 {
        match self.entry(position) {
            Ok(entry) => (entry.temporal_offset as i64).max(0),
            Err(_) => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_round_trip_vbe() {
        let mut segment = IndexTableSegment::new(1, 2, Rational::new(25, 1));
        segment.index_duration = 3;
        segment.entries = vec![
            IndexEntry {
                temporal_offset: 0,
                key_frame_offset: 0,
                flags: INDEX_FLAG_RANDOM_ACCESS | INDEX_FLAG_SEQUENCE_HEADER,
                stream_offset: 0,
            },
            IndexEntry {
                temporal_offset: 1,
                key_frame_offset: -1,
                flags: PictureType::B.to_flags(),
                stream_offset: 100,
            },
            IndexEntry {
                temporal_offset: -2,
                key_frame_offset: -2,
                flags: PictureType::P.to_flags(),
                stream_offset: 180,
            },
        ];

        let mut buf = Vec::new();
        segment.write_to(&mut buf).unwrap();
        assert_eq!(buf.len() as u64, segment.write_size());

        let mut cursor = Cursor::new(&buf);
        let header = KlvHeader::from_reader(&mut cursor).unwrap();
        assert_eq!(header.key, INDEX_TABLE_SEGMENT_KEY);
        let back = IndexTableSegment::read_value(&header, &mut cursor).unwrap();
        assert_eq!(back.index_sid, 1);
        assert_eq!(back.body_sid, 2);
        assert_eq!(back.entries, segment.entries);
        assert!(!back.is_cbe());
    }

    #[test]
    fn cbe_resolution() {
        let mut writer = IndexTableWriter::new_cbe(1, 1, Rational::new(25, 1), 250);
        writer.extend_cbe(100);
        let mut index = IndexSegments::new();
        for segment in writer.segments() {
            index.add(segment);
        }
        let entry = index.entry(40).unwrap();
        assert_eq!(entry.stream_offset, 10_000);
        assert_eq!(entry.size, Some(250));
        assert_eq!(index.duration(), 100);
        assert!(index.entry(100).is_err());
    }

    #[test]
    fn vbe_segmentation_and_monotonicity() {
        let mut writer = IndexTableWriter::new_vbe(1, 1, Rational::new(25, 1));
        for i in 0..(SEGMENT_ROW_LIMIT + 10) {
            writer.add_entry(0, 0, INDEX_FLAG_RANDOM_ACCESS, (i * 100) as u64);
        }
        let segments = writer.segments();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].entries.len(), SEGMENT_ROW_LIMIT);
        assert_eq!(segments[1].index_start_position, SEGMENT_ROW_LIMIT as i64);
        // every segment's entry array fits the 16-bit local set length
        for segment in &segments {
            let mut bytes = Vec::new();
            segment.write_to(&mut bytes).unwrap();
        }

        let mut index = IndexSegments::new();
        for segment in segments {
            index.add(segment);
        }
        index.validate().unwrap();
        let entry = index.entry(SEGMENT_ROW_LIMIT as i64 + 5).unwrap();
        assert_eq!(entry.stream_offset, (SEGMENT_ROW_LIMIT as u64 + 5) * 100);
    }

    #[test]
    fn precharge_and_rollout() {
        let mut writer = IndexTableWriter::new_vbe(1, 1, Rational::new(25, 1));
        // closed GOP: I B B P in presentation order
        writer.add_entry(0, 0, INDEX_FLAG_RANDOM_ACCESS, 0);
        writer.add_entry(1, -1, PictureType::B.to_flags(), 100);
        writer.add_entry(1, -2, PictureType::B.to_flags(), 200);
        writer.add_entry(-2, -3, PictureType::P.to_flags(), 300);
        let mut index = IndexSegments::new();
        for segment in writer.segments() {
            index.add(segment);
        }
        assert_eq!(index.precharge(0), 0);
        assert_eq!(index.precharge(2), 2);
        assert_eq!(index.rollout(1), 1);
        assert_eq!(index.rollout(3), 0);
    }

    #[test]
    fn picture_type_flags() {
        assert_eq!(PictureType::from_flags(PictureType::I.to_flags()), PictureType::I);
        assert_eq!(PictureType::from_flags(PictureType::P.to_flags()), PictureType::P);
        assert_eq!(
            PictureType::from_flags(PictureType::B.to_flags() | INDEX_FLAG_RANDOM_ACCESS),
            PictureType::B
        );
    }
}
