//! MPEG-2 long-GOP elementary stream parsing: sequence, GOP and picture
//! headers, enough to build descriptors and drive the VBE index.

use super::{find_start_code, BitReader, EssenceParser, FrameScan, FrameSize};
use crate::error::MxfError;
use crate::prelude::*;
use crate::types::Rational;

const SEQUENCE_HEADER_CODE: u8 = 0xb3;
const EXTENSION_START_CODE: u8 = 0xb5;
const GOP_HEADER_CODE: u8 = 0xb8;
const PICTURE_START_CODE: u8 = 0x00;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PictureCoding {
    I,
    P,
    B,
}

/// Syntax of the most recently parsed frame.
#[derive(Default, Clone, Debug)]
pub struct Mpeg2FrameInfo {
    pub have_sequence_header: bool,
    pub have_extension: bool,
    pub horizontal_size: u32,
    pub vertical_size: u32,
    pub aspect_ratio: Rational,
    pub frame_rate: Rational,
    pub bit_rate: u32,
    pub profile_and_level: u8,
    pub progressive: bool,
    pub low_delay: bool,
    pub closed_gop: bool,
    pub have_gop_header: bool,
    pub temporal_reference: u16,
    pub picture_coding: Option<PictureCoding>,
}

#[derive(Default)]
pub struct Mpeg2EssenceParser {
    pub info: Mpeg2FrameInfo,
}

impl Mpeg2EssenceParser {
    pub fn new() -> Mpeg2EssenceParser {
        Mpeg2EssenceParser::default()
    }

    fn is_frame_boundary(code: u8) -> bool {
        code == SEQUENCE_HEADER_CODE || code == GOP_HEADER_CODE || code == PICTURE_START_CODE
    }

    fn parse_sequence_header(&mut self, data: &[u8]) -> Result<()> {
        let mut bits = BitReader::new(data);
        self.info.horizontal_size = bits.read_bits(12)?;
        self.info.vertical_size = bits.read_bits(12)?;
        let aspect_code = bits.read_bits(4)?;
        self.info.aspect_ratio = match aspect_code {
            2 => Rational::new(4, 3),
            3 => Rational::new(16, 9),
            4 => Rational::new(221, 100),
            _ => Rational::new(1, 1),
        };
        let rate_code = bits.read_bits(4)?;
        self.info.frame_rate = match rate_code {
            1 => Rational::new(24000, 1001),
            2 => Rational::new(24, 1),
            3 => Rational::new(25, 1),
            4 => Rational::new(30000, 1001),
            5 => Rational::new(30, 1),
            6 => Rational::new(50, 1),
            7 => Rational::new(60000, 1001),
            8 => Rational::new(60, 1),
            _ => return Err(MxfError::malformed(0, "reserved frame rate code")),
        };
        // bit rate in units of 400 bit/s
        self.info.bit_rate = bits.read_bits(18)? * 400;
        self.info.have_sequence_header = true;
        Ok(())
    }

    fn parse_sequence_extension(&mut self, data: &[u8]) -> Result<()> {
        let mut bits = BitReader::new(data);
        let ext_id = bits.read_bits(4)?;
        if ext_id != 1 {
            return Ok(());
        }
        self.info.profile_and_level = bits.read_bits(8)? as u8;
        self.info.progressive = bits.read_bit()? == 1;
        bits.read_bits(2)?; // chroma format
        bits.read_bits(2)?; // horizontal size extension
        bits.read_bits(2)?; // vertical size extension
        bits.read_bits(12)?; // bit rate extension
        bits.read_bit()?; // marker
        bits.read_bits(8)?; // vbv buffer size extension
        self.info.low_delay = bits.read_bit()? == 1;
        self.info.have_extension = true;
        Ok(())
    }

    fn parse_gop_header(&mut self, data: &[u8]) -> Result<()> {
        let mut bits = BitReader::new(data);
        bits.read_bits(25)?; // timecode
        self.info.closed_gop = bits.read_bit()? == 1;
        self.info.have_gop_header = true;
        Ok(())
    }

    fn parse_picture_header(&mut self, data: &[u8]) -> Result<()> {
        let mut bits = BitReader::new(data);
        self.info.temporal_reference = bits.read_bits(10)? as u16;
        self.info.picture_coding = match bits.read_bits(3)? {
            1 => Some(PictureCoding::I),
            2 => Some(PictureCoding::P),
            3 => Some(PictureCoding::B),
            _ => return Err(MxfError::malformed(0, "reserved picture coding type")),
        };
        Ok(())
    }
}

impl EssenceParser for Mpeg2EssenceParser {
    fn parse_frame_start(&mut self, data: &[u8]) -> Result<FrameScan> {
        let mut at = 0;
        while let Some(offset) = find_start_code(data, at) {
            if data.len() < offset + 4 {
                return Ok(FrameScan::Need(1));
            }
            if Self::is_frame_boundary(data[offset + 3]) {
                return Ok(FrameScan::Found(offset));
            }
            at = offset + 3;
        }
        Ok(FrameScan::Need(4))
    }

    /// A frame runs from one sequence/GOP/picture boundary to the next
    /// picture-delimiting boundary.
    fn parse_frame_size(&mut self, data: &[u8]) -> Result<FrameSize> {
        if data.len() < 4 || data[..3] != [0, 0, 1] || !Self::is_frame_boundary(data[3]) {
            return Err(MxfError::malformed(0, "not at a frame boundary"));
        }
        let mut seen_picture = data[3] == PICTURE_START_CODE;
        let mut at = 3;
        loop {
            let offset = match find_start_code(data, at) {
                Some(offset) => offset,
                None => return Ok(FrameSize::Need(4)),
            };
            if data.len() < offset + 4 {
                return Ok(FrameSize::Need(1));
            }
            let code = data[offset + 3];
            if Self::is_frame_boundary(code) {
                if seen_picture {
                    return Ok(FrameSize::Size(offset));
                }
                if code == PICTURE_START_CODE {
                    seen_picture = true;
                }
            }
            at = offset + 3;
        }
    }

    fn parse_frame_info(&mut self, data: &[u8]) -> Result<()> {
        self.info.have_sequence_header = false;
        self.info.have_gop_header = false;
        self.info.picture_coding = None;

        let mut at = 0;
        while let Some(offset) = find_start_code(data, at) {
            if data.len() < offset + 4 {
                break;
            }
            let code = data[offset + 3];
            let payload = &data[offset + 4..];
            match code {
                SEQUENCE_HEADER_CODE => self.parse_sequence_header(payload)?,
                EXTENSION_START_CODE => self.parse_sequence_extension(payload)?,
                GOP_HEADER_CODE => self.parse_gop_header(payload)?,
                PICTURE_START_CODE => {
                    self.parse_picture_header(payload)?;
                    break;
                }
                _ => {}
            }
            at = offset + 3;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test_stream {
    use super::*;

    /// Build a minimal picture header start code run.
    pub fn picture(temporal_reference: u16, coding: PictureCoding) -> Vec<u8> {
        let code = match coding {
            PictureCoding::I => 1u16,
            PictureCoding::P => 2,
            PictureCoding::B => 3,
        };
        // 10 bits temporal reference, 3 bits coding, 16 bits vbv delay, pad
        let word: u32 = ((temporal_reference as u32) << 22) | ((code as u32) << 19);
        let mut bytes = vec![0, 0, 1, 0];
        bytes.extend_from_slice(&word.to_be_bytes());
        bytes.extend_from_slice(&[0u8; 8]); // slice filler
        bytes
    }

    pub fn sequence_header() -> Vec<u8> {
        let mut bytes = vec![0, 0, 1, SEQUENCE_HEADER_CODE];
        let mut bits: u64 = 0;
        bits |= 1920 << 52; // horizontal
        bits |= 1080 << 40; // vertical
        bits |= 3 << 36; // 16:9
        bits |= 3 << 32; // 25 fps
        bits |= (125_000u64) << 14; // bit rate units
        bits |= 1 << 13; // marker
        bytes.extend_from_slice(&bits.to_be_bytes());
        bytes
    }

    pub fn gop_header(closed: bool) -> Vec<u8> {
        let mut bytes = vec![0, 0, 1, GOP_HEADER_CODE];
        let word: u32 = if closed { 1 << 6 } else { 0 };
        bytes.extend_from_slice(&word.to_be_bytes());
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::test_stream::*;
    use super::*;

    #[test]
    fn sequence_header_fields() {
        let mut frame = sequence_header();
        frame.extend(gop_header(true));
        frame.extend(picture(0, PictureCoding::I));

        let mut parser = Mpeg2EssenceParser::new();
        parser.parse_frame_info(&frame).unwrap();
        assert!(parser.info.have_sequence_header);
        assert_eq!(parser.info.horizontal_size, 1920);
        assert_eq!(parser.info.vertical_size, 1080);
        assert_eq!(parser.info.aspect_ratio, Rational::new(16, 9));
        assert_eq!(parser.info.frame_rate, Rational::new(25, 1));
        assert!(parser.info.closed_gop);
        assert_eq!(parser.info.picture_coding, Some(PictureCoding::I));
    }

    #[test]
    fn frame_boundaries() {
        let mut stream = sequence_header();
        stream.extend(gop_header(true));
        stream.extend(picture(0, PictureCoding::I));
        let first_len = stream.len();
        stream.extend(picture(2, PictureCoding::P));

        let mut parser = Mpeg2EssenceParser::new();
        assert_eq!(parser.parse_frame_start(&stream).unwrap(), FrameScan::Found(0));
        assert_eq!(
            parser.parse_frame_size(&stream).unwrap(),
            FrameSize::Size(first_len)
        );
    }

    #[test]
    fn picture_coding_parsed() {
        let frame = picture(5, PictureCoding::B);
        let mut parser = Mpeg2EssenceParser::new();
        parser.parse_frame_info(&frame).unwrap();
        assert_eq!(parser.info.temporal_reference, 5);
        assert_eq!(parser.info.picture_coding, Some(PictureCoding::B));
    }
}
