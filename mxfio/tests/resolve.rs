use mxfio::descriptor::EssenceKind;
use mxfio::partition::PartitionKind;
use mxfio::reader::{ClipReader, SequenceReader};
use mxfio::writer::{ClipWriter, ClipWriterConfig};
use mxfio::{MemoryFile, Rational};

const FRAME_SIZE: usize = 64;

fn frame(index: i64) -> Vec<u8> {
    let mut frame = vec![0u8; FRAME_SIZE];
    for (i, byte) in frame.iter_mut().enumerate() {
        *byte = ((index as usize).wrapping_mul(31) + i) as u8;
    }
    frame
}

fn write_clip(frames: std::ops::Range<i64>, partition_interval: i64) -> MemoryFile {
    let config = ClipWriterConfig {
        partition_interval,
        ..ClipWriterConfig::default()
    };
    let mut writer = ClipWriter::with_config(MemoryFile::new(), Rational::new(25, 1), config);
    let video = writer.add_track(EssenceKind::UncVideo);
    {
        let picture = writer.track_mut(video).picture_mut();
        picture.stored_width = 720;
        picture.stored_height = 576;
        picture.aspect_ratio = Some(Rational::new(4, 3));
        picture.component_depth = 8;
        picture.horizontal_subsampling = 2;
        picture.vertical_subsampling = 1;
    }
    writer.prepare().expect("prepare");
    for i in frames {
        writer.write_samples(video, &frame(i), 1).expect("write");
    }
    writer.complete().expect("complete");
    writer.into_file()
}

#[test]
fn random_access_across_partitions() {
    let file = write_clip(0..300, 100);
    let mut reader = ClipReader::open(file).expect("open");
    assert_eq!(reader.duration(), 300);

    let bodies: Vec<u64> = reader
        .partitions()
        .iter()
        .filter(|(_, p)| p.kind == PartitionKind::Body)
        .map(|(o, _)| *o)
        .collect();
    assert_eq!(bodies.len(), 3);

    // the body offset fields partition the essence stream evenly
    let unit = (20 + FRAME_SIZE) as u64;
    let body_offsets: Vec<u64> = reader
        .partitions()
        .iter()
        .filter(|(_, p)| p.kind == PartitionKind::Body)
        .map(|(_, p)| p.body_offset)
        .collect();
    assert_eq!(body_offsets, vec![0, 100 * unit, 200 * unit]);

    // resolve(250) lands in the third body partition
    let entry = reader.index_entry(250).expect("entry");
    assert_eq!(entry.stream_offset, 250 * unit);
    assert_eq!(entry.size, Some(unit));

    let mut track_reader = reader.track_reader(0);
    assert_eq!(track_reader.precharge(0), 0);
    track_reader.seek(250);
    assert_eq!(track_reader.read(1).expect("read"), frame(250));

    // sequential reads continue across the partition boundary
    track_reader.seek(99);
    let two = track_reader.read(2).expect("read pair");
    assert_eq!(&two[..FRAME_SIZE], frame(99).as_slice());
    assert_eq!(&two[FRAME_SIZE..], frame(100).as_slice());
}

#[test]
fn sequence_reader_spans_files() {
    let first = write_clip(0..10, 0);
    let second = write_clip(10..20, 0);

    let readers = vec![
        ClipReader::open(first).expect("open first"),
        ClipReader::open(second).expect("open second"),
    ];
    let mut sequence = SequenceReader::new(readers).expect("sequence");
    assert_eq!(sequence.duration(), 20);
    assert_eq!(sequence.edit_rate(), Rational::new(25, 1));

    // a read spanning the file boundary stitches both clips
    sequence.seek(0, 8).expect("seek");
    let data = sequence.read(0, 4).expect("read");
    assert_eq!(data.len(), 4 * FRAME_SIZE);
    for (n, expected) in (8..12).enumerate() {
        assert_eq!(
            &data[n * FRAME_SIZE..(n + 1) * FRAME_SIZE],
            frame(expected).as_slice(),
            "frame {expected}"
        );
    }

    // seeking picks the covering file
    let entry = sequence.index_entry(15).expect("entry");
    assert_eq!(entry.stream_offset, 5 * (20 + FRAME_SIZE) as u64);
}
