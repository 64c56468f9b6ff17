use mxfio::descriptor::EssenceKind;
use mxfio::essence::avc::AvciClass;
use mxfio::reader::ClipReader;
use mxfio::writer::{AvciMode, ClipWriter};
use mxfio::{MemoryFile, Rational};

const FRAME_SIZE: usize = 568_320;
const HEADER_SIZE: usize = 512;

/// MSB-first bit assembler for the synthetic parameter sets.
struct Bits {
    bytes: Vec<u8>,
    bit: u8,
}

impl Bits {
    fn new() -> Bits {
        Bits { bytes: vec![0], bit: 0 }
    }

    fn put(&mut self, count: u32, value: u32) {
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

    fn ue(&mut self, value: u32) {
        let code = value + 1;
        let len = 32 - code.leading_zeros();
        self.put(len - 1, 0);
        self.put(len, code);
    }

    fn finish(mut self) -> Vec<u8> {
        if self.bit == 0 {
            self.bytes.pop();
        }
        self.bytes
    }
}

/// High 4:2:2 intra SPS for 1920x1080.
fn sps_nal() -> Vec<u8> {
    let mut nal = vec![0x00, 0x00, 0x00, 0x01, 0x67];
    let mut bits = Bits::new();
    bits.put(8, 122);
    bits.put(8, 0);
    bits.put(8, 41);
    bits.ue(0); // sps id
    bits.ue(2); // chroma 4:2:2
    bits.ue(2); // luma depth - 8
    bits.ue(2); // chroma depth - 8
    bits.put(1, 0);
    bits.put(1, 0);
    bits.ue(4); // log2_max_frame_num_minus4
    bits.ue(2); // poc type
    bits.ue(0); // ref frames
    bits.put(1, 0);
    bits.ue(119); // width mbs - 1
    bits.ue(67); // height units - 1
    bits.put(1, 1); // frame_mbs_only
    bits.put(1, 1); // stop
    nal.extend(bits.finish());
    nal
}

fn elementary_header() -> Vec<u8> {
    let mut header = vec![0u8; HEADER_SIZE];
    header[..6].copy_from_slice(&[0x00, 0x00, 0x00, 0x01, 0x09, 0x10]);
    let sps = sps_nal();
    header[6..6 + sps.len()].copy_from_slice(&sps);
    let pps = [0x00, 0x00, 0x00, 0x01, 0x68, 0xce, 0x38, 0x80];
    header[64..64 + pps.len()].copy_from_slice(&pps);
    header
}

/// A coded frame body: access unit delimiter plus a deterministic fill.
fn frame_body(index: u8) -> Vec<u8> {
    let mut body = vec![0u8; FRAME_SIZE];
    body[..6].copy_from_slice(&[0x00, 0x00, 0x00, 0x01, 0x09, 0x10]);
    body[6] = 0x65;
    for (i, byte) in body[7..].iter_mut().enumerate() {
        *byte = (i as u8).wrapping_add(index).max(1);
    }
    body
}

fn frame_with_header(index: u8) -> Vec<u8> {
    let mut frame = elementary_header();
    frame.extend(frame_body(index));
    frame
}

#[test]
fn strip_then_prepend_restores_frames() {
    let mut writer = ClipWriter::new(MemoryFile::new(), Rational::new(25, 1));
    let video = writer.add_track(EssenceKind::AvcI(AvciClass::Class100));
    writer.track_mut(video).set_avci_mode(AvciMode::StripAll);
    {
        let picture = writer.track_mut(video).picture_mut();
        picture.stored_width = 1920;
        picture.stored_height = 1080;
        picture.aspect_ratio = Some(Rational::new(16, 9));
        picture.component_depth = 10;
        picture.horizontal_subsampling = 2;
        picture.vertical_subsampling = 1;
    }
    writer.prepare().expect("prepare");

    let originals: Vec<Vec<u8>> = (0..10).map(frame_with_header).collect();
    for frame in &originals {
        assert_eq!(frame.len(), 568_832);
        writer.write_samples(video, frame, 1).expect("write");
    }
    writer.complete().expect("complete");

    let mut reader = ClipReader::open(writer.into_file()).expect("open");
    assert_eq!(reader.duration(), 10);

    // on-disk frames are stripped to the coded size
    let entry = reader.index_entry(0).expect("entry");
    assert_eq!(entry.size, Some(20 + FRAME_SIZE as u64));

    // the elementary header was cached in the sub-descriptor
    let cached = reader.tracks()[0]
        .descriptor
        .frame_header
        .clone()
        .expect("cached header");
    assert_eq!(cached, elementary_header());

    {
        let mut track_reader = reader.track_reader(0);
        let stripped = track_reader.read(1).expect("read stripped");
        assert_eq!(stripped.len(), FRAME_SIZE);
        assert_eq!(stripped, frame_body(0));
    }

    // prepend mode restores byte-identical input frames
    let mut track_reader = reader.track_reader(0);
    track_reader.set_prepend_frame_header(true);
    track_reader.seek(0);
    for (i, original) in originals.iter().enumerate() {
        let frame = track_reader.read(1).expect("read");
        assert_eq!(frame.len(), 568_832);
        assert_eq!(&frame, original, "frame {i}");
    }
}

#[test]
fn first_or_all_keeps_uniform_headers() {
    let mut writer = ClipWriter::new(MemoryFile::new(), Rational::new(25, 1));
    let video = writer.add_track(EssenceKind::AvcI(AvciClass::Class100));
    {
        let picture = writer.track_mut(video).picture_mut();
        picture.stored_width = 1920;
        picture.stored_height = 1080;
    }
    writer.prepare().expect("prepare");

    // first frame carries the header, the rest arrive bare and follow
    // the second frame's state
    writer
        .write_samples(video, &frame_with_header(0), 1)
        .expect("write first");
    for i in 1..5u8 {
        writer
            .write_samples(video, &frame_body(i), 1)
            .expect("write bare");
    }
    writer.complete().expect("complete");

    let mut reader = ClipReader::open(writer.into_file()).expect("open");
    assert_eq!(reader.duration(), 5);
    // variable element sizes: frame 0 with header, others without
    let first = reader.index_entry(0).expect("entry 0");
    let second = reader.index_entry(1).expect("entry 1");
    assert_eq!(first.size, Some(20 + 568_832));
    assert_eq!(second.size, Some(20 + FRAME_SIZE as u64));
}
