use mxfio::descriptor::EssenceKind;
use mxfio::labels::EC_AES3_FRAME_WRAPPED;
use mxfio::partition::PartitionKind;
use mxfio::reader::ClipReader;
use mxfio::writer::ClipWriter;
use mxfio::{DiskFile, MemoryFile, Rational};

fn ramp(bytes: usize) -> Vec<u8> {
    (0..bytes).map(|i| (i % 251) as u8).collect()
}

#[test]
fn empty_pcm_clip_finalise() {
    let mut writer = ClipWriter::new(MemoryFile::new(), Rational::new(48000, 1));
    writer.add_track(EssenceKind::Pcm);
    writer.prepare().expect("prepare");
    writer.complete().expect("complete");

    let mut reader = ClipReader::open(writer.into_file()).expect("open");
    assert_eq!(reader.duration(), 0);
    assert!(!reader.is_incomplete());

    // header and footer partitions only
    let kinds: Vec<PartitionKind> = reader.partitions().iter().map(|(_, p)| p.kind).collect();
    assert_eq!(kinds, vec![PartitionKind::Header, PartitionKind::Footer]);
    // partitions land on the key alignment grid
    for (offset, pack) in reader.partitions() {
        assert_eq!(offset % pack.kag_size as u64, 0);
    }

    let track = &reader.tracks()[0];
    assert_eq!(track.descriptor.sample_rate, Rational::new(48000, 1));
    assert_eq!(track.descriptor.sampling_rate, Some(Rational::new(48000, 1)));
    assert_eq!(track.descriptor.channel_count, Some(1));
    assert_eq!(track.descriptor.quantization_bits, Some(16));
    assert_eq!(track.duration, 0);

    let mut track_reader = reader.track_reader(0);
    assert!(track_reader.read(1).is_err());
}

#[test]
fn pcm_round_trip_with_padded_tail() {
    let mut writer = ClipWriter::new(MemoryFile::new(), Rational::new(25, 1));
    let audio = writer.add_track(EssenceKind::Pcm);
    writer.prepare().expect("prepare");

    // 2.5 edit units at 1920 samples per unit; the tail is padded
    let pcm = ramp(4800 * 2);
    writer.write_samples(audio, &pcm, 4800).expect("write");
    writer.complete().expect("complete");

    let mut reader = ClipReader::open(writer.into_file()).expect("open");
    assert_eq!(reader.duration(), 3);
    assert_eq!(reader.start_timecode().map(|tc| tc.base), Some(25));

    let mut track_reader = reader.track_reader(0);
    let back = track_reader.read(4800).expect("read");
    assert_eq!(back, pcm);
    // the padding reads back as silence
    let tail = track_reader.read(960).expect("tail");
    assert!(tail.iter().all(|&b| b == 0));
}

#[test]
fn ntsc_sample_sequence_on_disk() {
    let mut writer = ClipWriter::new(MemoryFile::new(), Rational::new(30000, 1001));
    let audio = writer.add_track(EssenceKind::Pcm);
    writer.prepare().expect("prepare");

    // exactly one sequence cycle: 1602+1601+1602+1601+1602 samples
    let pcm = ramp(8008 * 2);
    writer.write_samples(audio, &pcm, 8008).expect("write");
    writer.complete().expect("complete");

    let mut reader = ClipReader::open(writer.into_file()).expect("open");
    assert_eq!(reader.duration(), 5);
    // drop frame timecode for a 1001 denominator
    assert_eq!(reader.start_timecode().map(|tc| tc.drop_frame), Some(true));
    assert_eq!(reader.start_timecode().map(|tc| tc.base), Some(30));

    // element sizes alternate, so the index has one entry per unit
    let first = reader.index_entry(0).expect("entry 0");
    let second = reader.index_entry(1).expect("entry 1");
    assert_eq!(first.size, Some(20 + 1602 * 2));
    assert_eq!(second.size, Some(20 + 1601 * 2));

    let mut track_reader = reader.track_reader(0);
    assert_eq!(track_reader.read(8008).expect("read"), pcm);

    // a mid-stream seek lands on the right sample
    track_reader.seek(1602);
    let back = track_reader.read(2).expect("seeked read");
    assert_eq!(back, pcm[1602 * 2..1602 * 2 + 4].to_vec());
}

#[test]
fn clip_wrapped_pcm_back_patch() {
    let mut writer = ClipWriter::new(MemoryFile::new(), Rational::new(25, 1));
    let audio = writer.add_track(EssenceKind::Pcm);
    writer
        .track_mut(audio)
        .set_clip_wrapped(true)
        .expect("clip wrap");
    writer.prepare().expect("prepare");

    let pcm = ramp(1000 * 2);
    writer.write_samples(audio, &pcm[..1000], 500).expect("write");
    writer.write_samples(audio, &pcm[1000..], 500).expect("write");
    writer.complete().expect("complete");

    let mut reader = ClipReader::open(writer.into_file()).expect("open");
    let track = &reader.tracks()[0];
    assert!(track.clip_wrapped);
    assert_eq!(track.duration, 1000);
    assert_eq!(track.edit_rate, Rational::new(48000, 1));

    let mut track_reader = reader.track_reader(0);
    assert_eq!(track_reader.read(1000).expect("read"), pcm);
    track_reader.seek(500);
    assert_eq!(track_reader.read(1).expect("read"), pcm[1000..1002].to_vec());
}

#[test]
fn stereo_block_align() {
    let mut writer = ClipWriter::new(MemoryFile::new(), Rational::new(25, 1));
    let audio = writer.add_track(EssenceKind::Pcm);
    writer.track_mut(audio).sound_mut().channel_count = 2;
    writer.track_mut(audio).sound_mut().quantization_bits = 24;
    writer.prepare().expect("prepare");

    let pcm = ramp(1920 * 6);
    writer.write_samples(audio, &pcm, 1920).expect("write");
    writer.complete().expect("complete");

    let mut reader = ClipReader::open(writer.into_file()).expect("open");
    assert_eq!(reader.tracks()[0].descriptor.block_align, Some(6));
    assert_eq!(reader.duration(), 1);
    let mut track_reader = reader.track_reader(0);
    assert_eq!(track_reader.read(1920).expect("read"), pcm);
}

#[test]
fn aes3_track_wraps_pcm() {
    let mut writer = ClipWriter::new(MemoryFile::new(), Rational::new(25, 1));
    let audio = writer.add_track(EssenceKind::Aes3);
    writer.track_mut(audio).sound_mut().channel_count = 2;
    writer.prepare().expect("prepare");

    // one edit unit of stereo 16-bit samples
    let pcm = ramp(1920 * 4);
    writer.write_samples(audio, &pcm, 1920).expect("write");
    writer.complete().expect("complete");

    let mut reader = ClipReader::open(writer.into_file()).expect("open");
    assert_eq!(reader.duration(), 1);
    let track = &reader.tracks()[0];
    assert_eq!(track.descriptor.essence_container, EC_AES3_FRAME_WRAPPED);
    assert_eq!(track.descriptor.channel_count, Some(2));

    // the on-disk element carries the preamble and one 32-bit word per
    // channel per sample, not raw pcm
    let entry = reader.index_entry(0).expect("entry");
    assert_eq!(entry.size, Some(20 + 4 + 1920 * 2 * 4));

    // unpacking restores the input samples
    let mut track_reader = reader.track_reader(0);
    assert_eq!(track_reader.read(1920).expect("read"), pcm);
    track_reader.seek(100);
    assert_eq!(track_reader.read(1).expect("seeked"), pcm[400..404].to_vec());
}

#[test]
fn disk_file_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("clip.mxf");

    let file = DiskFile::create(&path).expect("create");
    let mut writer = ClipWriter::new(file, Rational::new(25, 1));
    let audio = writer.add_track(EssenceKind::Pcm);
    writer.prepare().expect("prepare");
    let pcm = ramp(1920 * 2);
    writer.write_samples(audio, &pcm, 1920).expect("write");
    writer.complete().expect("complete");
    drop(writer.into_file());

    let file = DiskFile::open_read(&path).expect("reopen");
    let mut reader = ClipReader::open(file).expect("open");
    assert_eq!(reader.duration(), 1);
    let mut track_reader = reader.track_reader(0);
    assert_eq!(track_reader.read(1920).expect("read"), pcm);
}
