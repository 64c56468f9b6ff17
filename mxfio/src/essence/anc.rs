//! Ancillary data frame elements: packet list packaging with line
//! number, wrapping type, sample coding and a padded payload array.

use crate::error::MxfError;
use crate::prelude::*;
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Cursor, Read, Write};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AncPacket {
    pub line_number: u16,
    pub wrapping_type: u8,
    pub sample_coding: u8,
    pub sample_count: u16,
    pub data: Vec<u8>,
}

/// One frame's worth of ancillary packets.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct AncFrameElement {
    pub packets: Vec<AncPacket>,
}

impl AncFrameElement {
    pub fn new() -> AncFrameElement {
        AncFrameElement::default()
    }

    /// Payload arrays are padded to a 4-byte boundary.
    fn padded_len(len: usize) -> usize {
        len.div_ceil(4) * 4
    }

    pub fn write_size(&self) -> usize {
        2 + self
            .packets
            .iter()
            .map(|p| 14 + Self::padded_len(p.data.len()))
            .sum::<usize>()
    }
}

impl Decode for AncFrameElement {
    fn from_reader<R: Read>(reader: &mut R) -> Result<AncFrameElement> {
        let count = reader.read_u16::<BigEndian>()?;
        let mut packets = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let line_number = reader.read_u16::<BigEndian>()?;
            let wrapping_type = reader.read_u8()?;
            let sample_coding = reader.read_u8()?;
            let sample_count = reader.read_u16::<BigEndian>()?;
            let array_count = reader.read_u32::<BigEndian>()? as usize;
            let array_size = reader.read_u32::<BigEndian>()? as usize;
            if array_size != 1 {
                return Err(MxfError::malformed(0, "bad anc payload array"));
            }
            let padded = Self::padded_len(array_count);
            let mut data = crate::utils::take(reader, padded)?;
            data.truncate(array_count);
            packets.push(AncPacket {
                line_number,
                wrapping_type,
                sample_coding,
                sample_count,
                data,
            });
        }
        Ok(AncFrameElement { packets })
    }
}

impl Encode for AncFrameElement {
    fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        if self.packets.len() > u16::MAX as usize {
            return Err(MxfError::CapacityExceeded("anc packet count"));
        }
        writer.write_u16::<BigEndian>(self.packets.len() as u16)?;
        for packet in &self.packets {
            writer.write_u16::<BigEndian>(packet.line_number)?;
            writer.write_u8(packet.wrapping_type)?;
            writer.write_u8(packet.sample_coding)?;
            writer.write_u16::<BigEndian>(packet.sample_count)?;
            writer.write_u32::<BigEndian>(packet.data.len() as u32)?;
            writer.write_u32::<BigEndian>(1)?;
            writer.write_all(&packet.data)?;
            let pad = Self::padded_len(packet.data.len()) - packet.data.len();
            writer.write_all(&[0u8; 3][..pad])?;
        }
        Ok(())
    }
}

/// Parse an element from a byte slice.
pub fn parse_element(data: &[u8]) -> Result<AncFrameElement> {
    AncFrameElement::from_reader(&mut Cursor::new(data))
}
