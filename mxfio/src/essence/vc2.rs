//! VC-2 parsing: parse-info headers delimit the stream; the sequence
//! header carries version, profile and level for the sub-descriptor.

use super::{EssenceParser, FrameScan, FrameSize};
use crate::error::MxfError;
use crate::prelude::*;

const PARSE_INFO_PREFIX: [u8; 4] = [b'B', b'B', b'C', b'D'];
const PARSE_INFO_SIZE: usize = 13;

const PARSE_CODE_SEQUENCE_HEADER: u8 = 0x00;
const PARSE_CODE_END_OF_SEQUENCE: u8 = 0x10;

#[derive(Default, Clone, Copy, Debug)]
pub struct Vc2FrameInfo {
    pub major_version: u32,
    pub minor_version: u32,
    pub profile: u32,
    pub level: u32,
}

#[derive(Default)]
pub struct Vc2EssenceParser {
    pub info: Option<Vc2FrameInfo>,
    pub sequence_headers_identical: bool,
    last_header: Option<Vec<u8>>,
}

/// Interleaved exp-Golomb as used by the VC-2 stream syntax.
struct Vc2Bits<'a> {
    data: &'a [u8],
    byte: usize,
    bit: u8,
}

impl<'a> Vc2Bits<'a> {
    fn new(data: &'a [u8]) -> Vc2Bits<'a> {
        Vc2Bits { data, byte: 0, bit: 0 }
    }

    fn bit(&mut self) -> Result<u32> {
        let b = *self
            .data
            .get(self.byte)
            .ok_or(MxfError::malformed(0, "vc2 bitstream too short"))?;
        let bit = (b >> (7 - self.bit)) & 1;
        self.bit += 1;
        if self.bit == 8 {
            self.bit = 0;
            self.byte += 1;
        }
        Ok(bit as u32)
    }

    fn uint(&mut self) -> Result<u32> {
        let mut value: u32 = 1;
        while self.bit()? == 0 {
            value <<= 1;
            if self.bit()? == 1 {
                value |= 1;
            }
            if value > 1 << 30 {
                return Err(MxfError::malformed(0, "vc2 uint out of range"));
            }
        }
        Ok(value - 1)
    }
}

impl Vc2EssenceParser {
    pub fn new() -> Vc2EssenceParser {
        Vc2EssenceParser {
            sequence_headers_identical: true,
            ..Vc2EssenceParser::default()
        }
    }

    fn next_parse_offset(data: &[u8]) -> Result<usize> {
        Ok(u32::from_be_bytes(data[5..9].try_into().expect("slice length")) as usize)
    }

    fn parse_sequence_header(&mut self, payload: &[u8]) -> Result<()> {
        let mut bits = Vc2Bits::new(payload);
        let info = Vc2FrameInfo {
            major_version: bits.uint()?,
            minor_version: bits.uint()?,
            profile: bits.uint()?,
            level: bits.uint()?,
        };
        if let Some(last) = &self.last_header {
            let span = last.len().min(payload.len());
            if last[..span] != payload[..span] {
                self.sequence_headers_identical = false;
            }
        } else {
            self.last_header = Some(payload.to_vec());
        }
        self.info = Some(info);
        Ok(())
    }
}

impl EssenceParser for Vc2EssenceParser {
    fn parse_frame_start(&mut self, data: &[u8]) -> Result<FrameScan> {
        if data.len() < PARSE_INFO_SIZE {
            return Ok(FrameScan::Need(PARSE_INFO_SIZE - data.len()));
        }
        if data[..4] == PARSE_INFO_PREFIX {
            Ok(FrameScan::Found(0))
        } else {
            Err(MxfError::malformed(0, "vc2 stream not aligned to parse info"))
        }
    }

    /// One edit unit runs to the end-of-sequence parse info, chaining
    /// next_parse_offset links.
    fn parse_frame_size(&mut self, data: &[u8]) -> Result<FrameSize> {
        let mut at = 0;
        loop {
            if data.len() < at + PARSE_INFO_SIZE {
                return Ok(FrameSize::Need(at + PARSE_INFO_SIZE - data.len()));
            }
            if data[at..at + 4] != PARSE_INFO_PREFIX {
                return Err(MxfError::malformed(at as u64, "bad vc2 parse info"));
            }
            let code = data[at + 4];
            let next = Self::next_parse_offset(&data[at..])?;
            if code == PARSE_CODE_END_OF_SEQUENCE {
                return Ok(FrameSize::Size(at + PARSE_INFO_SIZE));
            }
            if next == 0 {
                return Err(MxfError::malformed(at as u64, "vc2 parse chain broken"));
            }
            at += next;
        }
    }

    fn parse_frame_info(&mut self, data: &[u8]) -> Result<()> {
        let mut at = 0;
        while data.len() >= at + PARSE_INFO_SIZE {
            if data[at..at + 4] != PARSE_INFO_PREFIX {
                break;
            }
            let code = data[at + 4];
            if code == PARSE_CODE_SEQUENCE_HEADER {
                self.parse_sequence_header(&data[at + PARSE_INFO_SIZE..])?;
            }
            let next = Self::next_parse_offset(&data[at..])?;
            if next == 0 || code == PARSE_CODE_END_OF_SEQUENCE {
                break;
            }
            at += next;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_info(code: u8, next: u32) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&PARSE_INFO_PREFIX);
        bytes.push(code);
        bytes.extend_from_slice(&next.to_be_bytes());
        bytes.extend_from_slice(&0u32.to_be_bytes()); // previous offset
        bytes
    }

    /// Interleaved exp-Golomb encodings of small values:
    /// 0 -> "1", 1 -> "001", 2 -> "011", 3 -> "00001".
    fn header_payload() -> Vec<u8> {
        // major 3, minor 0, profile 3, level 2:
        // 00001 1 00001 011 padded
        vec![0b0000_1100, 0b0010_1100, 0x00]
    }

    #[test]
    fn sequence_header_fields() {
        let mut stream = parse_info(PARSE_CODE_SEQUENCE_HEADER, 16);
        stream.extend(header_payload());
        let mut parser = Vc2EssenceParser::new();
        parser.parse_frame_info(&stream).unwrap();
        let info = parser.info.unwrap();
        assert_eq!(info.major_version, 3);
        assert_eq!(info.minor_version, 0);
        assert_eq!(info.profile, 3);
        assert_eq!(info.level, 2);
        assert!(parser.sequence_headers_identical);
    }

    #[test]
    fn frame_size_chains_parse_infos() {
        let mut stream = parse_info(PARSE_CODE_SEQUENCE_HEADER, 16);
        stream.extend(header_payload());
        stream.extend(parse_info(0xe8, 20)); // picture
        stream.extend(vec![0u8; 7]);
        stream.extend(parse_info(PARSE_CODE_END_OF_SEQUENCE, 0));
        let mut parser = Vc2EssenceParser::new();
        assert_eq!(parser.parse_frame_start(&stream).unwrap(), FrameScan::Found(0));
        let size = parser.parse_frame_size(&stream).unwrap();
        assert_eq!(size, FrameSize::Size(stream.len()));
    }
}
