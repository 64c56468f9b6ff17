use mxfio::descriptor::EssenceKind;
use mxfio::index::PictureType;
use mxfio::reader::ClipReader;
use mxfio::writer::ClipWriter;
use mxfio::{MemoryFile, Rational};

const SEQUENCE_HEADER_CODE: u8 = 0xb3;
const GOP_HEADER_CODE: u8 = 0xb8;

#[derive(Clone, Copy, PartialEq)]
enum Coding {
    I,
    P,
    B,
}

fn picture(temporal_reference: u16, coding: Coding) -> Vec<u8> {
    let code = match coding {
        Coding::I => 1u32,
        Coding::P => 2,
        Coding::B => 3,
    };
    let word: u32 = ((temporal_reference as u32) << 22) | (code << 19);
    let mut bytes = vec![0, 0, 1, 0];
    bytes.extend_from_slice(&word.to_be_bytes());
    bytes.extend_from_slice(&[0xaa; 8]);
    bytes
}

fn sequence_header() -> Vec<u8> {
    let mut bytes = vec![0, 0, 1, SEQUENCE_HEADER_CODE];
    let mut bits: u64 = 0;
    bits |= 1920 << 52;
    bits |= 1080 << 40;
    bits |= 3 << 36; // 16:9
    bits |= 3 << 32; // 25 fps
    bits |= 125_000 << 14; // bit rate in 400 bit/s units
    bits |= 1 << 13; // marker
    bytes.extend_from_slice(&bits.to_be_bytes());
    bytes
}

fn gop_header(closed: bool) -> Vec<u8> {
    let mut bytes = vec![0, 0, 1, GOP_HEADER_CODE];
    let word: u32 = if closed { 1 << 6 } else { 0 };
    bytes.extend_from_slice(&word.to_be_bytes());
    bytes
}

/// One closed 15-frame GOP in decode order; displayed I B B P B B P B B
/// P B B P B B.
fn gop_frames() -> Vec<Vec<u8>> {
    let mut frames = Vec::new();
    let mut first = sequence_header();
    first.extend(gop_header(true));
    first.extend(picture(0, Coding::I));
    frames.push(first);
    let mut refs = vec![(3u16, Coding::P), (1, Coding::B), (2, Coding::B)];
    for base in [6u16, 9, 12] {
        refs.push((base, Coding::P));
        refs.push((base - 2, Coding::B));
        refs.push((base - 1, Coding::B));
    }
    refs.push((13, Coding::B));
    refs.push((14, Coding::B));
    for (temporal_reference, coding) in refs {
        frames.push(picture(temporal_reference, coding));
    }
    frames
}

#[test]
fn long_gop_reorder_index() {
    let mut writer = ClipWriter::new(MemoryFile::new(), Rational::new(25, 1));
    let video = writer.add_track(EssenceKind::Mpeg2Lg);
    {
        let picture = writer.track_mut(video).picture_mut();
        picture.stored_width = 1920;
        picture.stored_height = 1080;
        picture.aspect_ratio = Some(Rational::new(16, 9));
    }
    writer.prepare().expect("prepare");

    for _ in 0..2 {
        for frame in gop_frames() {
            writer.write_samples(video, &frame, 1).expect("write");
        }
    }
    writer.complete().expect("complete");

    let mut reader = ClipReader::open(writer.into_file()).expect("open");
    assert_eq!(reader.duration(), 30);

    let mut previous_offset = None;
    for i in 0..30i64 {
        let entry = reader.index_entry(i).expect("entry");

        // key frame offsets point back to the GOP's I frame
        assert_eq!(entry.key_frame_offset as i64, -(i % 15), "position {i}");

        // decode order stays within the clip
        let decode = i + entry.temporal_offset as i64;
        assert!(decode >= 0 && decode < 30, "position {i}");

        // stream offsets are strictly monotonic
        if let Some(previous) = previous_offset {
            assert!(entry.stream_offset > previous, "position {i}");
        }
        previous_offset = Some(entry.stream_offset);

        let expected = match i % 15 {
            0 => PictureType::I,
            3 | 6 | 9 | 12 => PictureType::P,
            _ => PictureType::B,
        };
        assert_eq!(PictureType::from_flags(entry.flags), expected, "position {i}");
    }

    // B frames decode one unit late, anchors two early
    assert_eq!(reader.index_entry(1).expect("entry").temporal_offset, 1);
    assert_eq!(reader.index_entry(3).expect("entry").temporal_offset, -2);

    // pre-charge walks back to the I frame, roll-out covers reordering
    let mut track_reader = reader.track_reader(0);
    assert_eq!(track_reader.precharge(0), 0);
    assert_eq!(track_reader.precharge(7), 7);
    assert_eq!(track_reader.precharge(17), 2);
    assert_eq!(track_reader.rollout(1), 1);
    assert_eq!(track_reader.rollout(0), 0);

    // frames read back in stored order
    track_reader.seek(0);
    let first = track_reader.read(1).expect("read");
    assert_eq!(first, gop_frames()[0]);
}

#[test]
fn mpeg2_descriptor_statistics() {
    let mut writer = ClipWriter::new(MemoryFile::new(), Rational::new(25, 1));
    let video = writer.add_track(EssenceKind::Mpeg2Lg);
    {
        let picture = writer.track_mut(video).picture_mut();
        picture.stored_width = 1920;
        picture.stored_height = 1080;
    }
    writer.prepare().expect("prepare");
    for frame in gop_frames() {
        writer.write_samples(video, &frame, 1).expect("write");
    }
    writer.complete().expect("complete");

    let reader = ClipReader::open(writer.into_file()).expect("open");
    let track = &reader.tracks()[0];
    assert!(track.descriptor.is_picture);
    assert_eq!(track.descriptor.stored_width, Some(1920));
    assert_eq!(reader.duration(), 15);
}
