//! MPEG-2 long GOP index state: collects picture syntax per GOP and
//! emits presentation-ordered index entries with decode reordering.

use crate::error::MxfError;
use crate::essence::mpeg2::{Mpeg2EssenceParser, Mpeg2FrameInfo, PictureCoding};
use crate::essence::EssenceParser;
use crate::index::{PictureType, INDEX_FLAG_RANDOM_ACCESS, INDEX_FLAG_SEQUENCE_HEADER};
use crate::prelude::*;
use crate::types::Position;

/// One entry produced for the VBE index, in presentation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GopIndexEntry {
    pub position: Position,
    pub temporal_offset: i8,
    pub key_frame_offset: i8,
    pub flags: u8,
}

struct GopFrame {
    decode_offset: i64,
    temporal_reference: u16,
    coding: PictureCoding,
    sequence_header: bool,
}

#[derive(Default)]
pub struct Mpeg2IndexHelper {
    parser: Mpeg2EssenceParser,
    gop: Vec<GopFrame>,
    gop_start: i64,
    frame_count: i64,
    last_key_frame: i64,
    entries: Vec<GopIndexEntry>,
    pub low_delay: bool,
    pub closed_gop_only: bool,
    pub max_gop: u16,
    pub max_b_count: u16,
    pub single_sequence: bool,
}

impl Mpeg2IndexHelper {
    pub fn new() -> Mpeg2IndexHelper {
        Mpeg2IndexHelper {
            closed_gop_only: true,
            single_sequence: true,
            last_key_frame: -1,
            ..Mpeg2IndexHelper::default()
        }
    }

    pub fn info(&self) -> &Mpeg2FrameInfo {
        &self.parser.info
    }

    pub fn frame_count(&self) -> i64 {
        self.frame_count
    }

    /// Feed the next frame in stored (decode) order.
    pub fn add_frame(&mut self, data: &[u8]) -> Result<()> {
        self.parser.parse_frame_info(data)?;
        let info = self.parser.info.clone();
        let coding = info
            .picture_coding
            .ok_or(MxfError::malformed(0, "frame without picture header"))?;

        let starts_gop = info.have_gop_header
            || (info.have_sequence_header && coding == PictureCoding::I)
            || self.gop.is_empty();
        if starts_gop && !self.gop.is_empty() {
            self.flush_gop()?;
        }

        if info.low_delay {
            self.low_delay = true;
        }
        if info.have_gop_header && !info.closed_gop {
            self.closed_gop_only = false;
        }
        if self.frame_count > 0 && info.have_sequence_header {
            self.single_sequence = false;
        }

        self.gop.push(GopFrame {
            decode_offset: self.gop.len() as i64,
            temporal_reference: info.temporal_reference,
            coding,
            sequence_header: info.have_sequence_header,
        });
        self.frame_count += 1;
        Ok(())
    }

    /// Flush the pending GOP; call once after the final frame.
    pub fn finalise(&mut self) -> Result<()> {
        if !self.gop.is_empty() {
            self.flush_gop()?;
        }
        Ok(())
    }

    pub fn take_entries(&mut self) -> Vec<GopIndexEntry> {
        std::mem::take(&mut self.entries)
    }

    fn flush_gop(&mut self) -> Result<()> {
        let gop = std::mem::take(&mut self.gop);
        let gop_len = gop.len() as i64;
        if gop_len as u16 > self.max_gop {
            self.max_gop = gop_len as u16;
        }
        let b_run = gop
            .iter()
            .filter(|f| f.coding == PictureCoding::B)
            .count() as u16;
        if b_run > self.max_b_count {
            self.max_b_count = b_run;
        }

        let mut ordered: Vec<(i64, &GopFrame)> = Vec::with_capacity(gop.len());
        for frame in &gop {
            let display = self.gop_start + frame.temporal_reference as i64;
            ordered.push((display, frame));
        }
        ordered.sort_by_key(|(display, _)| *display);

        for (display, frame) in ordered {
            let decode = self.gop_start + frame.decode_offset;
            let temporal_offset = decode - display;
            if temporal_offset < i8::MIN as i64 || temporal_offset > i8::MAX as i64 {
                return Err(MxfError::CapacityExceeded("temporal offset"));
            }

            let mut flags = match frame.coding {
                PictureCoding::I => PictureType::I.to_flags(),
                PictureCoding::P => PictureType::P.to_flags(),
                PictureCoding::B => PictureType::B.to_flags(),
            };
            if frame.coding == PictureCoding::I {
                flags |= INDEX_FLAG_RANDOM_ACCESS;
                if frame.sequence_header {
                    flags |= INDEX_FLAG_SEQUENCE_HEADER;
                }
                self.last_key_frame = display;
            }
            let key_frame_offset = if self.last_key_frame < 0 {
                0
            } else {
                let offset = self.last_key_frame - display;
                if offset < i8::MIN as i64 {
                    return Err(MxfError::CapacityExceeded("key frame offset"));
                }
                offset
            };

            self.entries.push(GopIndexEntry {
                position: display,
                temporal_offset: temporal_offset as i8,
                key_frame_offset: key_frame_offset as i8,
                flags,
            });
        }

        self.gop_start += gop_len;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::essence::mpeg2::test_stream::{gop_header, picture, sequence_header};

    /// 15-frame closed GOP, display I B B P B B P B B P B B P B B.
    fn closed_gop_frames() -> Vec<Vec<u8>> {
        let mut frames = Vec::new();
        // decode order: I(0) P(3) B(1) B(2) P(6) B(4) B(5) ...
        let mut first = sequence_header();
        first.extend(gop_header(true));
        first.extend(picture(0, PictureCoding::I));
        frames.push(first);
        let mut refs = vec![(3u16, PictureCoding::P), (1, PictureCoding::B), (2, PictureCoding::B)];
        for base in [6u16, 9, 12] {
            refs.push((base, PictureCoding::P));
            refs.push((base - 2, PictureCoding::B));
            refs.push((base - 1, PictureCoding::B));
        }
        refs.push((13, PictureCoding::B));
        refs.push((14, PictureCoding::B));
        for (tref, coding) in refs {
            frames.push(picture(tref, coding));
        }
        frames
    }

    #[test]
    fn closed_gop_reordering() {
        let mut helper = Mpeg2IndexHelper::new();
        for frame in closed_gop_frames() {
            helper.add_frame(&frame).unwrap();
        }
        helper.finalise().unwrap();
        let entries = helper.take_entries();
        assert_eq!(entries.len(), 15);

        for (i, entry) in entries.iter().enumerate() {
            assert_eq!(entry.position, i as i64);
            assert_eq!(entry.key_frame_offset, -((i % 15) as i8));
            // decode position is always within the clip
            let decode = entry.position + entry.temporal_offset as i64;
            assert!(decode >= 0 && decode < 15);
        }
        // I frame leads and is a random access point
        assert_eq!(entries[0].temporal_offset, 0);
        assert!(entries[0].flags & INDEX_FLAG_RANDOM_ACCESS != 0);
        assert!(entries[0].flags & INDEX_FLAG_SEQUENCE_HEADER != 0);
        // B frames displayed before their forward reference decode later
        assert_eq!(entries[1].temporal_offset, 1);
        assert_eq!(entries[2].temporal_offset, 1);
        assert_eq!(entries[3].temporal_offset, -2);
        assert_eq!(PictureType::from_flags(entries[3].flags), PictureType::P);
    }

    #[test]
    fn two_gops_accumulate_positions() {
        let mut helper = Mpeg2IndexHelper::new();
        for _ in 0..2 {
            for frame in closed_gop_frames() {
                helper.add_frame(&frame).unwrap();
            }
        }
        helper.finalise().unwrap();
        let entries = helper.take_entries();
        assert_eq!(entries.len(), 30);
        assert_eq!(entries[15].position, 15);
        assert_eq!(entries[15].key_frame_offset, 0);
        assert_eq!(entries[29].key_frame_offset, -14);
        assert!(helper.closed_gop_only);
        assert_eq!(helper.max_gop, 15);
    }
}
