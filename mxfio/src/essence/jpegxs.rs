//! JPEG XS codestream parsing: the picture header carries the profile,
//! level and frame geometry; the precinct structure sizes the elements.

use super::{EssenceParser, FrameScan, FrameSize};
use crate::error::MxfError;
use crate::prelude::*;

const MARKER_SOC: u16 = 0xff10;
const MARKER_EOC: u16 = 0xff11;
const MARKER_PIH: u16 = 0xff12;

#[derive(Default, Clone, Copy, Debug)]
pub struct JpegXsFrameInfo {
    /// Profile (Ppih).
    pub ppih: u16,
    /// Level (Plev).
    pub plev: u16,
    pub width: u16,
    pub height: u16,
    /// Precinct width in columns (Cw).
    pub cw: u16,
    /// Slice height in lines (Slh).
    pub slh: u16,
    pub component_count: u8,
}

#[derive(Default)]
pub struct JpegXsEssenceParser {
    pub info: Option<JpegXsFrameInfo>,
}

fn marker_at(data: &[u8], at: usize) -> Option<u16> {
    if data.len() < at + 2 {
        return None;
    }
    Some(u16::from_be_bytes([data[at], data[at + 1]]))
}

impl JpegXsEssenceParser {
    pub fn new() -> JpegXsEssenceParser {
        JpegXsEssenceParser::default()
    }

    fn parse_pih(&mut self, data: &[u8]) -> Result<()> {
        // Lpih(2) Lcod(4) Ppih(2) Plev(2) Wf(2) Hf(2) Cw(2) Slh(2) Bw(1) ...
        if data.len() < 19 {
            return Err(MxfError::malformed(0, "jpegxs picture header too short"));
        }
        let be16 = |at: usize| u16::from_be_bytes([data[at], data[at + 1]]);
        self.info = Some(JpegXsFrameInfo {
            ppih: be16(6),
            plev: be16(8),
            width: be16(10),
            height: be16(12),
            cw: be16(14),
            slh: be16(16),
            component_count: data[18],
        });
        Ok(())
    }
}

impl EssenceParser for JpegXsEssenceParser {
    fn parse_frame_start(&mut self, data: &[u8]) -> Result<FrameScan> {
        if data.len() < 2 {
            return Ok(FrameScan::Need(2 - data.len()));
        }
        if marker_at(data, 0) == Some(MARKER_SOC) {
            Ok(FrameScan::Found(0))
        } else {
            Err(MxfError::malformed(0, "jpegxs stream not aligned to soc"))
        }
    }

    fn parse_frame_size(&mut self, data: &[u8]) -> Result<FrameSize> {
        if marker_at(data, 0) != Some(MARKER_SOC) {
            return Err(MxfError::malformed(0, "jpegxs stream not aligned to soc"));
        }
        let mut at = 2;
        loop {
            match marker_at(data, at) {
                Some(MARKER_EOC) => return Ok(FrameSize::Size(at + 2)),
                Some(_) => at += 1,
                None => return Ok(FrameSize::Need(2)),
            }
        }
    }

    fn parse_frame_info(&mut self, data: &[u8]) -> Result<()> {
        if marker_at(data, 0) != Some(MARKER_SOC) {
            return Err(MxfError::malformed(0, "jpegxs stream not aligned to soc"));
        }
        let mut at = 2;
        while let Some(marker) = marker_at(data, at) {
            if marker == MARKER_PIH {
                self.parse_pih(&data[at + 2..])?;
                return Ok(());
            }
            if marker == MARKER_EOC {
                break;
            }
            let len = match marker_at(data, at + 2) {
                Some(len) => len as usize,
                None => break,
            };
            at += 2 + len;
        }
        Err(MxfError::malformed(0, "jpegxs picture header missing"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codestream() -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&MARKER_SOC.to_be_bytes());
        data.extend_from_slice(&MARKER_PIH.to_be_bytes());
        let mut pih = vec![0u8; 19];
        pih[1] = 19; // Lpih
        pih[6..8].copy_from_slice(&0x1500u16.to_be_bytes()); // Ppih
        pih[8..10].copy_from_slice(&0x2040u16.to_be_bytes()); // Plev
        pih[10..12].copy_from_slice(&1920u16.to_be_bytes());
        pih[12..14].copy_from_slice(&1080u16.to_be_bytes());
        pih[14..16].copy_from_slice(&120u16.to_be_bytes());
        pih[16..18].copy_from_slice(&16u16.to_be_bytes());
        pih[18] = 3;
        data.extend_from_slice(&pih);
        data.extend_from_slice(&[0xab; 6]);
        data.extend_from_slice(&MARKER_EOC.to_be_bytes());
        data
    }

    #[test]
    fn picture_header_fields() {
        let data = codestream();
        let mut parser = JpegXsEssenceParser::new();
        parser.parse_frame_info(&data).unwrap();
        let info = parser.info.unwrap();
        assert_eq!(info.ppih, 0x1500);
        assert_eq!(info.plev, 0x2040);
        assert_eq!(info.width, 1920);
        assert_eq!(info.height, 1080);
        assert_eq!(info.cw, 120);
        assert_eq!(info.slh, 16);
        assert_eq!(info.component_count, 3);
    }

    #[test]
    fn frame_runs_to_eoc() {
        let data = codestream();
        let mut parser = JpegXsEssenceParser::new();
        assert_eq!(
            parser.parse_frame_size(&data).unwrap(),
            FrameSize::Size(data.len())
        );
    }
}
