use mxfio::descriptor::EssenceKind;
use mxfio::partition::PartitionKind;
use mxfio::reader::ClipReader;
use mxfio::writer::{ClipWriter, ClipWriterConfig};
use mxfio::{MemoryFile, Rational};

fn ramp(bytes: usize) -> Vec<u8> {
    (0..bytes).map(|i| (i % 239) as u8).collect()
}

/// An aborted write leaves the last partition open and truncated; the
/// preceding complete partitions stay readable.
#[test]
fn salvage_scan_after_aborted_write() {
    let config = ClipWriterConfig {
        partition_interval: 10,
        ..ClipWriterConfig::default()
    };
    let mut writer = ClipWriter::with_config(MemoryFile::new(), Rational::new(25, 1), config);
    let audio = writer.add_track(EssenceKind::Pcm);
    writer.prepare().expect("prepare");

    // 30 edit units across three body partitions, then abort without
    // finalising
    let pcm = ramp(30 * 1920 * 2);
    writer.write_samples(audio, &pcm, 30 * 1920).expect("write");
    let mut file = writer.into_file();

    // truncate into the last partition's essence
    let size = file.data().len() as u64;
    file.truncate(size - 1000);

    let mut reader = ClipReader::open(file).expect("salvage open");
    assert!(reader.is_incomplete());

    // the open header partition and the body partitions were found by
    // the forward scan; no footer exists
    assert!(reader
        .partitions()
        .iter()
        .any(|(_, p)| p.kind == PartitionKind::Header));
    assert!(!reader
        .partitions()
        .iter()
        .any(|(_, p)| p.kind == PartitionKind::Footer));
    let bodies = reader
        .partitions()
        .iter()
        .filter(|(_, p)| p.kind == PartitionKind::Body)
        .count();
    assert_eq!(bodies, 3);

    // edit units in complete partitions are exposed
    assert_eq!(reader.duration(), 20);
    let mut track_reader = reader.track_reader(0);
    let back = track_reader.read(20 * 1920).expect("read salvage");
    assert_eq!(back, pcm[..20 * 1920 * 2].to_vec());

    // positions beyond the salvageable range fail without crashing
    assert!(reader.index_entry(25).is_err());
}

/// A cleanly finalised file with the same layout reads completely.
#[test]
fn complete_file_is_not_flagged() {
    let config = ClipWriterConfig {
        partition_interval: 10,
        ..ClipWriterConfig::default()
    };
    let mut writer = ClipWriter::with_config(MemoryFile::new(), Rational::new(25, 1), config);
    let audio = writer.add_track(EssenceKind::Pcm);
    writer.prepare().expect("prepare");
    let pcm = ramp(30 * 1920 * 2);
    writer.write_samples(audio, &pcm, 30 * 1920).expect("write");
    writer.complete().expect("complete");

    let mut reader = ClipReader::open(writer.into_file()).expect("open");
    assert!(!reader.is_incomplete());
    assert_eq!(reader.duration(), 30);

    // every partition's status is closed and complete, and the back
    // chain holds
    for (offset, pack) in reader.partitions() {
        assert!(pack.status.is_closed());
        assert!(pack.status.is_complete());
        assert_eq!(pack.this_partition, *offset);
    }
    let offsets: Vec<u64> = reader.partitions().iter().map(|(o, _)| *o).collect();
    for (offset, pack) in reader.partitions() {
        if *offset > 0 {
            assert!(offsets.contains(&pack.previous_partition));
            assert!(pack.previous_partition < *offset);
        }
    }

    let mut track_reader = reader.track_reader(0);
    assert_eq!(track_reader.read(30 * 1920).expect("read"), pcm);
}
