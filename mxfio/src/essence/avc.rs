//! AVC / AVC-Intra elementary stream parsing: NAL walking, access unit
//! delimiters, SPS syntax for descriptors, and the AVC-Intra frame and
//! header geometry.

use super::{find_start_code, BitReader, EssenceParser, FrameScan, FrameSize};
use crate::error::MxfError;
use crate::prelude::*;
use crate::types::Rational;

pub const NAL_UNSPECIFIED: u8 = 0;
pub const NAL_SLICE_IDR: u8 = 5;
pub const NAL_SEI: u8 = 6;
pub const NAL_SPS: u8 = 7;
pub const NAL_PPS: u8 = 8;
pub const NAL_AUD: u8 = 9;
pub const NAL_FILLER: u8 = 12;

/// Size of the elementary stream header (AUD + SPS + PPS + filler) that
/// leads every AVC-Intra frame in some workflows.
pub const AVCI_HEADER_SIZE: usize = 512;

/// AVC-Intra class and resolution geometry.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AvciClass {
    Class50,
    Class100,
}

/// Frame size excluding the elementary header, derived from the class
/// and the coded height.
pub fn avci_frame_size(class: AvciClass, height: u32) -> Option<usize> {
    match (class, height) {
        (AvciClass::Class100, 1080) => Some(568_320),
        (AvciClass::Class100, 720) => Some(284_160),
        (AvciClass::Class50, 1080) => Some(284_160),
        (AvciClass::Class50, 720) => Some(142_080),
        _ => None,
    }
}

#[derive(Default, Clone, Debug)]
pub struct SpsInfo {
    pub profile: u8,
    pub profile_constraint: u8,
    pub level: u8,
    pub width: u32,
    pub height: u32,
    pub frame_mbs_only: bool,
}

#[derive(Default, Clone, Debug)]
pub struct AvcFrameInfo {
    pub have_aud: bool,
    pub have_sps: bool,
    pub have_pps: bool,
    pub idr: bool,
    pub sps: SpsInfo,
}

#[derive(Default)]
pub struct AvcEssenceParser {
    pub info: AvcFrameInfo,
}

fn nal_type(byte: u8) -> u8 {
    byte & 0x1f
}

/// Walk NAL units; yields (offset of start code, nal header offset).
/// A four-byte start code reports the position of its leading zero.
fn nal_units(data: &[u8]) -> impl Iterator<Item = (usize, usize)> + '_ {
    let mut at = 0;
    std::iter::from_fn(move || {
        let offset = find_start_code(data, at)?;
        let header = offset + 3;
        at = header;
        if header < data.len() {
            let start = if offset > 0 && data[offset - 1] == 0 {
                offset - 1
            } else {
                offset
            };
            Some((start, header))
        } else {
            None
        }
    })
}

impl AvcEssenceParser {
    pub fn new() -> AvcEssenceParser {
        AvcEssenceParser::default()
    }

    fn parse_sps(&mut self, rbsp: &[u8]) -> Result<()> {
        let mut bits = BitReader::new_rbsp(rbsp);
        let profile = bits.read_bits(8)? as u8;
        let constraint = bits.read_bits(8)? as u8;
        let level = bits.read_bits(8)? as u8;
        bits.ue()?; // seq_parameter_set_id
        if matches!(profile, 100 | 110 | 122 | 244 | 44 | 83 | 86 | 118 | 128) {
            let chroma_format = bits.ue()?;
            if chroma_format == 3 {
                bits.read_bit()?;
            }
            bits.ue()?; // bit_depth_luma_minus8
            bits.ue()?; // bit_depth_chroma_minus8
            bits.read_bit()?; // qpprime_y_zero_transform_bypass
            if bits.read_bit()? == 1 {
                // seq_scaling_matrix_present: skip the lists
                let count = if chroma_format == 3 { 12 } else { 8 };
                for _ in 0..count {
                    if bits.read_bit()? == 1 {
                        return Err(MxfError::malformed(0, "scaling lists not supported"));
                    }
                }
            }
        }
        bits.ue()?; // log2_max_frame_num_minus4
        let poc_type = bits.ue()?;
        if poc_type == 0 {
            bits.ue()?;
        } else if poc_type == 1 {
            bits.read_bit()?;
            bits.se()?;
            bits.se()?;
            let cycle = bits.ue()?;
            for _ in 0..cycle {
                bits.se()?;
            }
        }
        bits.ue()?; // max_num_ref_frames
        bits.read_bit()?; // gaps_in_frame_num_value_allowed
        let width_mbs = bits.ue()? + 1;
        let height_units = bits.ue()? + 1;
        let frame_mbs_only = bits.read_bit()? == 1;

        self.info.sps = SpsInfo {
            profile,
            profile_constraint: constraint,
            level,
            width: width_mbs * 16,
            height: height_units * 16 * if frame_mbs_only { 1 } else { 2 },
            frame_mbs_only,
        };
        self.info.have_sps = true;
        Ok(())
    }
}

impl EssenceParser for AvcEssenceParser {
    /// Frames start at an access unit delimiter.
    fn parse_frame_start(&mut self, data: &[u8]) -> Result<FrameScan> {
        for (offset, header) in nal_units(data) {
            if nal_type(data[header]) == NAL_AUD {
                return Ok(FrameScan::Found(offset));
            }
        }
        Ok(FrameScan::Need(4))
    }

    /// A frame runs from one access unit delimiter to the next.
    fn parse_frame_size(&mut self, data: &[u8]) -> Result<FrameSize> {
        let mut first = true;
        for (offset, header) in nal_units(data) {
            if nal_type(data[header]) != NAL_AUD {
                continue;
            }
            if first {
                if offset != 0 {
                    return Err(MxfError::malformed(0, "not at an access unit delimiter"));
                }
                first = false;
                continue;
            }
            return Ok(FrameSize::Size(offset));
        }
        Ok(FrameSize::Need(4))
    }

    fn parse_frame_info(&mut self, data: &[u8]) -> Result<()> {
        self.info.have_aud = false;
        self.info.have_pps = false;
        self.info.idr = false;
        for (_, header) in nal_units(data) {
            match nal_type(data[header]) {
                NAL_AUD => self.info.have_aud = true,
                NAL_SPS => {
                    let end = find_start_code(data, header + 1).unwrap_or(data.len());
                    self.parse_sps(&data[header + 1..end])?;
                }
                NAL_PPS => self.info.have_pps = true,
                NAL_SLICE_IDR => self.info.idr = true,
                _ => {}
            }
        }
        Ok(())
    }
}

/// True when the frame carries an SPS within its leading header-sized
/// span, i.e. the elementary header is present.
pub fn has_frame_header(data: &[u8]) -> bool {
    let span = data.len().min(AVCI_HEADER_SIZE);
    for (_, header) in nal_units(&data[..span]) {
        if nal_type(data[header]) == NAL_SPS {
            return true;
        }
    }
    false
}

/// Derive the image aspect ratio from coded dimensions.
pub fn aspect_ratio_for(width: u32, height: u32) -> Rational {
    if width == 0 || height == 0 {
        return Rational::new(1, 1);
    }
    if width * 3 == height * 4 {
        Rational::new(4, 3)
    } else {
        Rational::new(16, 9)
    }
}

#[cfg(test)]
pub(crate) mod test_stream {
    use super::*;

    pub fn aud() -> Vec<u8> {
        vec![0x00, 0x00, 0x00, 0x01, 0x09, 0x10]
    }

    /// Minimal SPS for high 4:2:2 intra, 1920x1080.
    pub fn sps() -> Vec<u8> {
        let mut bytes = vec![0x00, 0x00, 0x00, 0x01, 0x67];
        let mut bits = BitsOut::new();
        bits.put(8, 122); // profile_idc high 4:2:2
        bits.put(8, 0);
        bits.put(8, 41); // level_idc 4.1
        bits.ue(0); // sps id
        bits.ue(2); // chroma_format_idc 4:2:2
        bits.ue(2); // bit_depth_luma_minus8
        bits.ue(2); // bit_depth_chroma_minus8
        bits.put(1, 0); // transform bypass
        bits.put(1, 0); // scaling matrix
        bits.ue(4); // log2_max_frame_num_minus4
        bits.ue(2); // poc type
        bits.ue(0); // max_num_ref_frames
        bits.put(1, 0); // gaps allowed
        bits.ue(119); // width in mbs - 1
        bits.ue(67); // height in map units - 1 (1088 / 16 - 1)
        bits.put(1, 1); // frame_mbs_only
        bits.put(1, 1); // stop bit
        bytes.extend(bits.finish());
        bytes
    }

    pub struct BitsOut {
        bytes: Vec<u8>,
        bit: u8,
    }

    impl BitsOut {
        pub fn new() -> BitsOut {
            BitsOut {
                bytes: vec![0],
                bit: 0,
            }
        }

        pub fn put(&mut self, count: u32, value: u32) {
            for i in (0..count).rev() {
                let bit = (value >> i) & 1;
                let last = self.bytes.len() - 1;
                self.bytes[last] |= (bit as u8) << (7 - self.bit);
                self.bit += 1;
                if self.bit == 8 {
                    self.bit = 0;
                    self.bytes.push(0);
                }
            }
        }

        pub fn ue(&mut self, value: u32) {
            let code = value + 1;
            let len = 32 - code.leading_zeros();
            self.put(len - 1, 0);
            self.put(len, code);
        }

        pub fn finish(mut self) -> Vec<u8> {
            if self.bit == 0 {
                self.bytes.pop();
            }
            self.bytes
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_stream::*;
    use super::*;

    #[test]
    fn frame_boundaries_at_delimiters() {
        let mut stream = aud();
        stream.extend([0x00, 0x00, 0x01, 0x65, 0xaa, 0xbb]); // idr slice
        let first_len = stream.len();
        stream.extend(aud());

        let mut parser = AvcEssenceParser::new();
        assert_eq!(parser.parse_frame_start(&stream).unwrap(), FrameScan::Found(0));
        assert_eq!(
            parser.parse_frame_size(&stream).unwrap(),
            FrameSize::Size(first_len)
        );
    }

    #[test]
    fn sps_fields() {
        let mut frame = aud();
        frame.extend(sps());
        let mut parser = AvcEssenceParser::new();
        parser.parse_frame_info(&frame).unwrap();
        assert!(parser.info.have_aud);
        assert!(parser.info.have_sps);
        assert_eq!(parser.info.sps.profile, 122);
        assert_eq!(parser.info.sps.level, 41);
        assert_eq!(parser.info.sps.width, 1920);
        assert_eq!(parser.info.sps.height, 1088);
        assert!(has_frame_header(&frame));
    }

    #[test]
    fn avci_sizes() {
        assert_eq!(avci_frame_size(AvciClass::Class100, 1080), Some(568_320));
        assert_eq!(
            avci_frame_size(AvciClass::Class100, 1080).unwrap() + AVCI_HEADER_SIZE,
            568_832
        );
        assert_eq!(avci_frame_size(AvciClass::Class50, 720), Some(142_080));
    }
}
