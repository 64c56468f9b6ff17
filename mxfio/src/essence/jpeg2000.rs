//! JPEG 2000 codestream parsing: SOC to EOC delimits a frame, the SIZ
//! marker fills the sub-descriptor.

use super::{EssenceParser, FrameScan, FrameSize};
use crate::error::MxfError;
use crate::prelude::*;

const MARKER_SOC: u16 = 0xff4f;
const MARKER_SIZ: u16 = 0xff51;
const MARKER_SOD: u16 = 0xff93;
const MARKER_EOC: u16 = 0xffd9;

#[derive(Default, Clone, Debug)]
pub struct Jpeg2000FrameInfo {
    pub rsiz: u16,
    pub xsiz: u32,
    pub ysiz: u32,
    pub xosiz: u32,
    pub yosiz: u32,
    pub components: Vec<(u8, u8, u8)>,
}

#[derive(Default)]
pub struct Jpeg2000EssenceParser {
    pub info: Option<Jpeg2000FrameInfo>,
}

fn marker_at(data: &[u8], at: usize) -> Option<u16> {
    if data.len() < at + 2 {
        return None;
    }
    Some(u16::from_be_bytes([data[at], data[at + 1]]))
}

impl Jpeg2000EssenceParser {
    pub fn new() -> Jpeg2000EssenceParser {
        Jpeg2000EssenceParser::default()
    }

    fn parse_siz(&mut self, data: &[u8]) -> Result<()> {
        if data.len() < 38 {
            return Err(MxfError::malformed(0, "jpeg2000 siz too short"));
        }
        let be16 = |at: usize| u16::from_be_bytes([data[at], data[at + 1]]);
        let be32 = |at: usize| {
            u32::from_be_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]])
        };
        let mut info = Jpeg2000FrameInfo {
            rsiz: be16(2),
            xsiz: be32(4),
            ysiz: be32(8),
            xosiz: be32(12),
            yosiz: be32(16),
            components: Vec::new(),
        };
        let csiz = be16(36) as usize;
        if data.len() < 38 + csiz * 3 {
            return Err(MxfError::malformed(0, "jpeg2000 siz component list truncated"));
        }
        for c in 0..csiz {
            let at = 38 + c * 3;
            info.components.push((data[at], data[at + 1], data[at + 2]));
        }
        self.info = Some(info);
        Ok(())
    }
}

impl EssenceParser for Jpeg2000EssenceParser {
    fn parse_frame_start(&mut self, data: &[u8]) -> Result<FrameScan> {
        if data.len() < 2 {
            return Ok(FrameScan::Need(2 - data.len()));
        }
        if marker_at(data, 0) == Some(MARKER_SOC) {
            Ok(FrameScan::Found(0))
        } else {
            Err(MxfError::malformed(0, "jpeg2000 stream not aligned to soc"))
        }
    }

    fn parse_frame_size(&mut self, data: &[u8]) -> Result<FrameSize> {
        if marker_at(data, 0) != Some(MARKER_SOC) {
            return Err(MxfError::malformed(0, "jpeg2000 stream not aligned to soc"));
        }
        let mut at = 2;
        loop {
            let marker = match marker_at(data, at) {
                Some(marker) => marker,
                None => return Ok(FrameSize::Need(2)),
            };
            match marker {
                MARKER_EOC => return Ok(FrameSize::Size(at + 2)),
                MARKER_SOD => {
                    // entropy data: scan for the next marker-like pair
                    at += 2;
                    loop {
                        match marker_at(data, at) {
                            Some(MARKER_EOC) => return Ok(FrameSize::Size(at + 2)),
                            Some(_) => at += 1,
                            None => return Ok(FrameSize::Need(2)),
                        }
                    }
                }
                MARKER_SOC => return Err(MxfError::malformed(at as u64, "nested soc")),
                _ => {
                    // segment markers carry a length
                    let len = match marker_at(data, at + 2) {
                        Some(len) => len as usize,
                        None => return Ok(FrameSize::Need(2)),
                    };
                    at += 2 + len;
                }
            }
        }
    }

    fn parse_frame_info(&mut self, data: &[u8]) -> Result<()> {
        if marker_at(data, 0) != Some(MARKER_SOC) {
            return Err(MxfError::malformed(0, "jpeg2000 stream not aligned to soc"));
        }
        let mut at = 2;
        while let Some(marker) = marker_at(data, at) {
            if marker == MARKER_SIZ {
                let len = marker_at(data, at + 2)
                    .ok_or(MxfError::malformed(at as u64, "jpeg2000 siz truncated"))?
                    as usize;
                self.parse_siz(&data[at + 2..at + 2 + len.min(data.len() - at - 2)])?;
                return Ok(());
            }
            if marker == MARKER_SOD || marker == MARKER_EOC {
                break;
            }
            let len = match marker_at(data, at + 2) {
                Some(len) => len as usize,
                None => break,
            };
            at += 2 + len;
        }
        Err(MxfError::malformed(0, "jpeg2000 siz marker missing"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codestream() -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&MARKER_SOC.to_be_bytes());
        data.extend_from_slice(&MARKER_SIZ.to_be_bytes());
        let mut siz = vec![0u8; 41];
        siz[0] = 0;
        siz[1] = 41; // Lsiz
        siz[2] = 0x01;
        siz[3] = 0x04; // Rsiz broadcast profile
        siz[4..8].copy_from_slice(&1920u32.to_be_bytes());
        siz[8..12].copy_from_slice(&1080u32.to_be_bytes());
        siz[36] = 0;
        siz[37] = 1; // one component
        siz[38] = 7; // Ssiz: 8-bit
        siz[39] = 1;
        siz[40] = 1;
        data.extend_from_slice(&siz);
        data.extend_from_slice(&MARKER_SOD.to_be_bytes());
        data.extend_from_slice(&[0x12, 0x34, 0x56]);
        data.extend_from_slice(&MARKER_EOC.to_be_bytes());
        data
    }

    #[test]
    fn siz_fields() {
        let data = codestream();
        let mut parser = Jpeg2000EssenceParser::new();
        parser.parse_frame_info(&data).unwrap();
        let info = parser.info.unwrap();
        assert_eq!(info.rsiz, 0x0104);
        assert_eq!(info.xsiz, 1920);
        assert_eq!(info.ysiz, 1080);
        assert_eq!(info.components.len(), 1);
    }

    #[test]
    fn frame_runs_to_eoc() {
        let data = codestream();
        let mut parser = Jpeg2000EssenceParser::new();
        assert_eq!(parser.parse_frame_start(&data).unwrap(), FrameScan::Found(0));
        assert_eq!(
            parser.parse_frame_size(&data).unwrap(),
            FrameSize::Size(data.len())
        );
    }
}
