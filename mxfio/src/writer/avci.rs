//! AVC-Intra frame header handling. Frames may arrive with or without
//! the 512-byte elementary header; the mode decides what lands on disk.

use crate::error::MxfError;
use crate::essence::avc::{has_frame_header, AVCI_HEADER_SIZE};
use crate::prelude::*;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AvciMode {
    /// Frames are written as supplied.
    Pass,
    /// The header is stripped from every frame.
    StripAll,
    /// No frame carries a header, or every frame does; the first frame
    /// decides.
    NoneOrAll,
    /// Only the first frame carries a header.
    First,
    /// The first frame carries a header; the rest follow the second
    /// frame's state.
    FirstOrAll,
    /// Every frame carries a header.
    All,
}

pub struct AvciWriterHelper {
    mode: AvciMode,
    frame_size: usize,
    header: Option<Vec<u8>>,
    frame_count: i64,
    follow_state: Option<bool>,
}

impl AvciWriterHelper {
    /// `frame_size` is the coded frame size excluding the header.
    pub fn new(mode: AvciMode, frame_size: usize) -> AvciWriterHelper {
        AvciWriterHelper {
            mode,
            frame_size,
            header: None,
            frame_count: 0,
            follow_state: None,
        }
    }

    /// Supply the elementary header to prepend when input frames lack it.
    pub fn set_header(&mut self, header: &[u8]) -> Result<()> {
        if header.len() != AVCI_HEADER_SIZE {
            return Err(MxfError::LogicError("avci header must be 512 bytes"));
        }
        self.header = Some(header.to_vec());
        Ok(())
    }

    pub fn header(&self) -> Option<&[u8]> {
        self.header.as_deref()
    }

    pub fn mode(&self) -> AvciMode {
        self.mode
    }

    fn input_has_header(&self, data: &[u8]) -> Result<bool> {
        if data.len() == self.frame_size {
            return Ok(false);
        }
        if data.len() == self.frame_size + AVCI_HEADER_SIZE {
            if !has_frame_header(data) {
                return Err(MxfError::LogicError(
                    "frame header sized but no parameter sets found",
                ));
            }
            return Ok(true);
        }
        Err(MxfError::LogicError("avci frame has unexpected size"))
    }

    fn stripped(data: &[u8]) -> Vec<u8> {
        data[AVCI_HEADER_SIZE..].to_vec()
    }

    fn prepended(&self, data: &[u8]) -> Result<Vec<u8>> {
        let header = self
            .header
            .as_ref()
            .ok_or(MxfError::LogicError("no avci header available to prepend"))?;
        let mut out = Vec::with_capacity(header.len() + data.len());
        out.extend_from_slice(header);
        out.extend_from_slice(data);
        Ok(out)
    }

    /// Normalise one input frame to the configured mode. The returned
    /// bytes are what goes into the essence element.
    pub fn process_frame(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        let has_header = self.input_has_header(data)?;
        if has_header && self.header.is_none() {
            self.header = Some(data[..AVCI_HEADER_SIZE].to_vec());
        }
        let first = self.frame_count == 0;
        self.frame_count += 1;

        let out = match self.mode {
            AvciMode::Pass => data.to_vec(),
            AvciMode::StripAll => {
                if has_header {
                    Self::stripped(data)
                } else {
                    data.to_vec()
                }
            }
            AvciMode::First => {
                if first {
                    if has_header {
                        data.to_vec()
                    } else {
                        self.prepended(data)?
                    }
                } else if has_header {
                    Self::stripped(data)
                } else {
                    data.to_vec()
                }
            }
            AvciMode::All => {
                if has_header {
                    data.to_vec()
                } else {
                    self.prepended(data)?
                }
            }
            AvciMode::NoneOrAll => {
                let state = *self.follow_state.get_or_insert(has_header);
                match (state, has_header) {
                    (true, false) => self.prepended(data)?,
                    (false, true) => Self::stripped(data),
                    _ => data.to_vec(),
                }
            }
            AvciMode::FirstOrAll => {
                if first {
                    if has_header {
                        data.to_vec()
                    } else {
                        self.prepended(data)?
                    }
                } else {
                    let state = *self.follow_state.get_or_insert(has_header);
                    match (state, has_header) {
                        (true, false) => self.prepended(data)?,
                        (false, true) => Self::stripped(data),
                        _ => data.to_vec(),
                    }
                }
            }
        };
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: usize = 64;

    fn header_bytes() -> Vec<u8> {
        // access unit delimiter + sps + pps inside a 512-byte span
        let mut header = vec![0u8; AVCI_HEADER_SIZE];
        header[..6].copy_from_slice(&[0x00, 0x00, 0x00, 0x01, 0x09, 0x10]);
        header[6..11].copy_from_slice(&[0x00, 0x00, 0x00, 0x01, 0x67]);
        header[32..37].copy_from_slice(&[0x00, 0x00, 0x00, 0x01, 0x68]);
        header
    }

    fn frame_with_header() -> Vec<u8> {
        let mut frame = header_bytes();
        frame.extend(frame_body());
        frame
    }

    fn frame_body() -> Vec<u8> {
        let mut body = vec![0u8; FRAME];
        body[..6].copy_from_slice(&[0x00, 0x00, 0x00, 0x01, 0x09, 0x10]);
        body[6] = 0xee;
        body
    }

    #[test]
    fn strip_all_removes_and_caches() {
        let mut helper = AvciWriterHelper::new(AvciMode::StripAll, FRAME);
        let out = helper.process_frame(&frame_with_header()).unwrap();
        assert_eq!(out, frame_body());
        assert_eq!(helper.header().unwrap(), &header_bytes()[..]);
        // a bare frame passes through unchanged
        let out = helper.process_frame(&frame_body()).unwrap();
        assert_eq!(out.len(), FRAME);
    }

    #[test]
    fn first_mode_keeps_only_first_header() {
        let mut helper = AvciWriterHelper::new(AvciMode::First, FRAME);
        let out = helper.process_frame(&frame_with_header()).unwrap();
        assert_eq!(out.len(), FRAME + AVCI_HEADER_SIZE);
        let out = helper.process_frame(&frame_with_header()).unwrap();
        assert_eq!(out.len(), FRAME);
    }

    #[test]
    fn all_mode_prepends_cached_header() {
        let mut helper = AvciWriterHelper::new(AvciMode::All, FRAME);
        helper.process_frame(&frame_with_header()).unwrap();
        let out = helper.process_frame(&frame_body()).unwrap();
        assert_eq!(out.len(), FRAME + AVCI_HEADER_SIZE);
        assert_eq!(&out[..AVCI_HEADER_SIZE], &header_bytes()[..]);
    }

    #[test]
    fn all_mode_without_header_fails() {
        let mut helper = AvciWriterHelper::new(AvciMode::All, FRAME);
        assert!(helper.process_frame(&frame_body()).is_err());
    }

    #[test]
    fn none_or_all_follows_first_frame() {
        let mut helper = AvciWriterHelper::new(AvciMode::NoneOrAll, FRAME);
        helper.set_header(&header_bytes()).unwrap();
        let out = helper.process_frame(&frame_body()).unwrap();
        assert_eq!(out.len(), FRAME);
        // later frames with headers are normalised back to bare
        let out = helper.process_frame(&frame_with_header()).unwrap();
        assert_eq!(out.len(), FRAME);
    }

    #[test]
    fn bad_size_rejected() {
        let mut helper = AvciWriterHelper::new(AvciMode::Pass, FRAME);
        assert!(helper.process_frame(&vec![0u8; FRAME + 3]).is_err());
    }
}
