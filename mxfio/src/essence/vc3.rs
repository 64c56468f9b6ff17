//! VC-3 (DNxHD) parsing: fixed frame sizes keyed by the compression id
//! in the frame header.

use super::{EssenceParser, FrameScan, FrameSize};
use crate::error::MxfError;
use crate::prelude::*;

const HEADER_PREFIX: [u8; 5] = [0x00, 0x00, 0x02, 0x80, 0x01];
const COMPRESSION_ID_OFFSET: usize = 40;
const MIN_HEADER_SIZE: usize = COMPRESSION_ID_OFFSET + 4;

struct CompressionEntry {
    id: u32,
    frame_size: usize,
    width: u32,
    height: u32,
    depth: u32,
}

const COMPRESSION_TABLE: &[CompressionEntry] = &[
    CompressionEntry { id: 1235, frame_size: 917_504, width: 1920, height: 1080, depth: 10 },
    CompressionEntry { id: 1237, frame_size: 606_208, width: 1920, height: 1080, depth: 8 },
    CompressionEntry { id: 1238, frame_size: 917_504, width: 1920, height: 1080, depth: 8 },
    CompressionEntry { id: 1241, frame_size: 917_504, width: 1920, height: 1080, depth: 10 },
    CompressionEntry { id: 1242, frame_size: 606_208, width: 1920, height: 1080, depth: 8 },
    CompressionEntry { id: 1243, frame_size: 917_504, width: 1920, height: 1080, depth: 8 },
    CompressionEntry { id: 1244, frame_size: 606_208, width: 1440, height: 1080, depth: 8 },
    CompressionEntry { id: 1250, frame_size: 458_752, width: 1280, height: 720, depth: 10 },
    CompressionEntry { id: 1251, frame_size: 458_752, width: 1280, height: 720, depth: 8 },
    CompressionEntry { id: 1252, frame_size: 303_104, width: 1280, height: 720, depth: 8 },
    CompressionEntry { id: 1253, frame_size: 188_416, width: 1920, height: 1080, depth: 8 },
    CompressionEntry { id: 1258, frame_size: 212_992, width: 960, height: 720, depth: 8 },
    CompressionEntry { id: 1259, frame_size: 417_792, width: 1440, height: 1080, depth: 8 },
    CompressionEntry { id: 1260, frame_size: 835_584, width: 1440, height: 1080, depth: 8 },
];

#[derive(Clone, Copy, Debug)]
pub struct Vc3FrameInfo {
    pub compression_id: u32,
    pub frame_size: usize,
    pub width: u32,
    pub height: u32,
    pub component_depth: u32,
}

#[derive(Default)]
pub struct Vc3EssenceParser {
    pub info: Option<Vc3FrameInfo>,
}

impl Vc3EssenceParser {
    pub fn new() -> Vc3EssenceParser {
        Vc3EssenceParser::default()
    }

    pub fn frame_size_for(compression_id: u32) -> Option<usize> {
        COMPRESSION_TABLE
            .iter()
            .find(|e| e.id == compression_id)
            .map(|e| e.frame_size)
    }

    fn lookup(data: &[u8]) -> Result<Vc3FrameInfo> {
        if data.len() < MIN_HEADER_SIZE {
            return Err(MxfError::malformed(0, "vc3 header too short"));
        }
        if data[..5] != HEADER_PREFIX {
            return Err(MxfError::malformed(0, "bad vc3 header prefix"));
        }
        let id = u32::from_be_bytes(
            data[COMPRESSION_ID_OFFSET..COMPRESSION_ID_OFFSET + 4]
                .try_into()
                .expect("slice length"),
        );
        let entry = COMPRESSION_TABLE
            .iter()
            .find(|e| e.id == id)
            .ok_or(MxfError::malformed(0, "unknown vc3 compression id"))?;
        Ok(Vc3FrameInfo {
            compression_id: id,
            frame_size: entry.frame_size,
            width: entry.width,
            height: entry.height,
            component_depth: entry.depth,
        })
    }
}

impl EssenceParser for Vc3EssenceParser {
    fn parse_frame_start(&mut self, data: &[u8]) -> Result<FrameScan> {
        if data.len() < HEADER_PREFIX.len() {
            return Ok(FrameScan::Need(HEADER_PREFIX.len() - data.len()));
        }
        if data[..5] == HEADER_PREFIX {
            Ok(FrameScan::Found(0))
        } else {
            Err(MxfError::malformed(0, "vc3 stream not aligned to a frame"))
        }
    }

    fn parse_frame_size(&mut self, data: &[u8]) -> Result<FrameSize> {
        if data.len() < MIN_HEADER_SIZE {
            return Ok(FrameSize::Need(MIN_HEADER_SIZE - data.len()));
        }
        Ok(FrameSize::Size(Self::lookup(data)?.frame_size))
    }

    fn parse_frame_info(&mut self, data: &[u8]) -> Result<()> {
        self.info = Some(Self::lookup(data)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(id: u32) -> Vec<u8> {
        let mut data = vec![0u8; MIN_HEADER_SIZE];
        data[..5].copy_from_slice(&HEADER_PREFIX);
        data[COMPRESSION_ID_OFFSET..COMPRESSION_ID_OFFSET + 4].copy_from_slice(&id.to_be_bytes());
        data
    }

    #[test]
    fn compression_id_lookup() {
        let mut parser = Vc3EssenceParser::new();
        assert_eq!(
            parser.parse_frame_size(&header(1237)).unwrap(),
            FrameSize::Size(606_208)
        );
        parser.parse_frame_info(&header(1253)).unwrap();
        let info = parser.info.unwrap();
        assert_eq!(info.width, 1920);
        assert_eq!(info.component_depth, 8);
    }

    #[test]
    fn unknown_id_rejected() {
        let mut parser = Vc3EssenceParser::new();
        assert!(parser.parse_frame_info(&header(9999)).is_err());
    }
}
