//! DV family parsing: classify the variant from the DIF header and VAUX
//! source pack, derive the frame size, aspect ratio and 525/625 system.

use super::{EssenceParser, FrameScan, FrameSize};
use crate::error::MxfError;
use crate::prelude::*;
use crate::types::Rational;

const DIF_BLOCK_SIZE: usize = 80;
/// Blocks per DIF sequence.
const DIF_SEQUENCE_BLOCKS: usize = 150;
const DIF_SEQUENCE_SIZE: usize = DIF_BLOCK_SIZE * DIF_SEQUENCE_BLOCKS;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DvVariant {
    Iec25,
    DvBased25,
    DvBased50,
    Dv100_1080,
    Dv100_720,
}

#[derive(Clone, Debug)]
pub struct DvFrameInfo {
    pub variant: DvVariant,
    /// 625/50 system when true, 525/60 otherwise.
    pub is_625: bool,
    pub aspect_ratio: Rational,
    pub frame_size: usize,
}

#[derive(Default)]
pub struct DvEssenceParser {
    pub info: Option<DvFrameInfo>,
}

impl DvEssenceParser {
    pub fn new() -> DvEssenceParser {
        DvEssenceParser::default()
    }

    pub fn frame_size(variant: DvVariant, is_625: bool) -> usize {
        let sequences = if is_625 { 12 } else { 10 };
        let channels = match variant {
            DvVariant::Iec25 | DvVariant::DvBased25 => 1,
            DvVariant::DvBased50 => 2,
            DvVariant::Dv100_720 => 2,
            DvVariant::Dv100_1080 => 4,
        };
        sequences * DIF_SEQUENCE_SIZE * channels
    }
}

/// Classify from the header DIF block and the VAUX source pack.
fn classify(data: &[u8]) -> Result<DvFrameInfo> {
    if data.len() < DIF_SEQUENCE_SIZE {
        return Err(MxfError::malformed(0, "dv frame shorter than a dif sequence"));
    }
    // header block: section type 0x1f in the id, DSF flag in byte 3
    if data[0] >> 5 != 0 {
        return Err(MxfError::malformed(0, "missing dv header dif block"));
    }
    let is_625 = data[3] & 0x80 != 0;
    let apt = data[4] & 0x07;

    // VAUX source pack (pack id 0x60) lives in the VAUX blocks, which
    // follow the header and subcode blocks
    let mut stype = None;
    let mut wide = false;
    for block in 3..6 {
        let at = block * DIF_BLOCK_SIZE + 3;
        let payload = &data[at..at + 77];
        for pack in payload.chunks(5) {
            if pack.len() < 5 {
                break;
            }
            match pack[0] {
                0x60 => stype = Some(pack[3] & 0x1f),
                0x61 => wide = pack[2] & 0x07 == 0x02,
                _ => {}
            }
        }
    }

    let stype = stype.ok_or(MxfError::malformed(0, "missing dv vaux source pack"))?;
    let variant = match stype {
        0x00 => {
            if apt == 0 {
                DvVariant::Iec25
            } else {
                DvVariant::DvBased25
            }
        }
        0x04 => DvVariant::DvBased50,
        0x14 => DvVariant::Dv100_1080,
        0x18 => DvVariant::Dv100_720,
        _ => return Err(MxfError::malformed(0, "unknown dv source type")),
    };

    let aspect_ratio = if wide || matches!(variant, DvVariant::Dv100_1080 | DvVariant::Dv100_720) {
        Rational::new(16, 9)
    } else {
        Rational::new(4, 3)
    };

    Ok(DvFrameInfo {
        variant,
        is_625,
        aspect_ratio,
        frame_size: DvEssenceParser::frame_size(variant, is_625),
    })
}

impl EssenceParser for DvEssenceParser {
    /// DV is byte aligned; a frame starts at a header DIF block.
    fn parse_frame_start(&mut self, data: &[u8]) -> Result<FrameScan> {
        if data.len() < DIF_BLOCK_SIZE {
            return Ok(FrameScan::Need(DIF_BLOCK_SIZE - data.len()));
        }
        if data[0] >> 5 == 0 {
            Ok(FrameScan::Found(0))
        } else {
            Err(MxfError::malformed(0, "dv stream not aligned to a frame"))
        }
    }

    fn parse_frame_size(&mut self, data: &[u8]) -> Result<FrameSize> {
        if data.len() < DIF_SEQUENCE_SIZE {
            return Ok(FrameSize::Need(DIF_SEQUENCE_SIZE - data.len()));
        }
        let info = classify(data)?;
        Ok(FrameSize::Size(info.frame_size))
    }

    fn parse_frame_info(&mut self, data: &[u8]) -> Result<()> {
        self.info = Some(classify(data)?);
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test_stream {
    use super::*;

    /// Build the first DIF sequence of a synthetic frame, padded to the
    /// full frame size for the variant.
    pub fn frame(stype: u8, apt: u8, is_625: bool, wide: bool) -> Vec<u8> {
        let mut header = vec![0u8; DIF_SEQUENCE_SIZE];
        header[3] = if is_625 { 0x80 } else { 0x00 };
        header[4] = apt & 0x07;
        // VAUX block 3 carries the source and source-control packs
        let at = 3 * DIF_BLOCK_SIZE + 3;
        header[at] = 0x60;
        header[at + 3] = stype;
        header[at + 5] = 0x61;
        header[at + 7] = if wide { 0x02 } else { 0x00 };

        let variant_size = {
            let info = super::classify(&header).unwrap();
            info.frame_size
        };
        header.resize(variant_size, 0);
        header
    }
}

#[cfg(test)]
mod tests {
    use super::test_stream::frame;
    use super::*;

    #[test]
    fn classify_iec_25() {
        let data = frame(0x00, 0, false, false);
        let mut parser = DvEssenceParser::new();
        parser.parse_frame_info(&data).unwrap();
        let info = parser.info.unwrap();
        assert_eq!(info.variant, DvVariant::Iec25);
        assert!(!info.is_625);
        assert_eq!(info.aspect_ratio, Rational::new(4, 3));
        assert_eq!(info.frame_size, 120_000);
    }

    #[test]
    fn classify_dv50_625() {
        let data = frame(0x04, 1, true, true);
        let mut parser = DvEssenceParser::new();
        parser.parse_frame_info(&data).unwrap();
        let info = parser.info.unwrap();
        assert_eq!(info.variant, DvVariant::DvBased50);
        assert!(info.is_625);
        assert_eq!(info.aspect_ratio, Rational::new(16, 9));
        assert_eq!(info.frame_size, 288_000);
    }

    #[test]
    fn classify_dv100() {
        let data = frame(0x14, 1, false, true);
        let mut parser = DvEssenceParser::new();
        let size = parser.parse_frame_size(&data).unwrap();
        assert_eq!(size, FrameSize::Size(480_000));
        let data = frame(0x18, 1, true, true);
        parser.parse_frame_info(&data).unwrap();
        assert_eq!(parser.info.unwrap().frame_size, 288_000);
    }
}
