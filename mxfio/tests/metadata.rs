use mxfio::descriptor::EssenceKind;
use mxfio::metadata::{HeaderMetadata, MetadataSet};
use mxfio::model::avid::{
    avid, AVID_TAGGED_VALUE_SET_KEY, PACKAGE_ATTRIBUTES_ITEM_KEY, TAGGED_VALUE_NAME_ITEM_KEY,
    TAGGED_VALUE_VALUE_ITEM_KEY,
};
use mxfio::model::baseline;
use mxfio::model::keys::*;
use mxfio::labels::OP_1A;
use mxfio::reader::ClipReader;
use mxfio::writer::{ClipWriter, ClipWriterConfig};
use mxfio::{MemoryFile, Rational, Timestamp, Umid};
use std::io::Cursor;

fn graph_with_tagged_value() -> HeaderMetadata {
    let mut hm = HeaderMetadata::new(avid());

    let mut tagged = MetadataSet::new(AVID_TAGGED_VALUE_SET_KEY);
    tagged.set_string(TAGGED_VALUE_NAME_ITEM_KEY, "project");
    tagged.set_item(TAGGED_VALUE_VALUE_ITEM_KEY, b"newsroom".to_vec());
    let tagged_uid = hm.add_set(tagged);

    let mut package = MetadataSet::new(MATERIAL_PACKAGE_SET_KEY);
    package.set_umid(PACKAGE_UID_ITEM_KEY, &Umid::generate());
    package.set_timestamp(PACKAGE_CREATION_DATE_ITEM_KEY, &Timestamp::default());
    package.set_timestamp(PACKAGE_MODIFIED_DATE_ITEM_KEY, &Timestamp::default());
    package.set_ref_array(PACKAGE_TRACKS_ITEM_KEY, &[]);
    package.set_ref_array(PACKAGE_ATTRIBUTES_ITEM_KEY, &[tagged_uid]);
    let package_uid = hm.add_set(package);

    let mut storage = MetadataSet::new(CONTENT_STORAGE_SET_KEY);
    storage.set_ref_array(CS_PACKAGES_ITEM_KEY, &[package_uid]);
    let storage_uid = hm.add_set(storage);

    let mut preface = MetadataSet::new(PREFACE_SET_KEY);
    preface.set_timestamp(PREFACE_LAST_MODIFIED_DATE_ITEM_KEY, &Timestamp::default());
    preface.set_version(PREFACE_VERSION_ITEM_KEY, 1, 3);
    preface.set_ul(PREFACE_OPERATIONAL_PATTERN_ITEM_KEY, &OP_1A);
    preface.set_ul_batch(PREFACE_ESSENCE_CONTAINERS_ITEM_KEY, &[]);
    preface.set_ul_batch(PREFACE_DM_SCHEMES_ITEM_KEY, &[]);
    preface.set_strong_ref(PREFACE_CONTENT_STORAGE_ITEM_KEY, &storage_uid);
    hm.add_set(preface);
    hm
}

/// Vendor sets are first class under the extended model and dark under
/// the baseline model.
#[test]
fn avid_sets_first_class_or_dark() {
    let hm = graph_with_tagged_value();
    let mut buf = Vec::new();
    let written = hm.write(&mut buf).expect("write");

    let mut cursor = Cursor::new(&buf);
    let extended = HeaderMetadata::read(&mut cursor, avid(), written, None).expect("read");
    assert_eq!(extended.dark_sets().len(), 0);
    let tagged: Vec<_> = extended
        .sets_of_type(&AVID_TAGGED_VALUE_SET_KEY)
        .collect();
    assert_eq!(tagged.len(), 1);
    assert_eq!(
        tagged[0]
            .string_item(&TAGGED_VALUE_NAME_ITEM_KEY)
            .expect("name"),
        Some("project".to_string())
    );

    let mut cursor = Cursor::new(&buf);
    let plain = HeaderMetadata::read(&mut cursor, baseline(), written, None).expect("read");
    assert_eq!(plain.dark_sets().len(), 1);
    assert_eq!(plain.dark_sets()[0].key, AVID_TAGGED_VALUE_SET_KEY);

    // the dark set round-trips byte for byte
    let mut buf2 = Vec::new();
    let written2 = plain.write(&mut buf2).expect("rewrite");
    let mut cursor = Cursor::new(&buf2);
    let again = HeaderMetadata::read(&mut cursor, avid(), written2, None).expect("reread");
    let tagged: Vec<_> = again.sets_of_type(&AVID_TAGGED_VALUE_SET_KEY).collect();
    assert_eq!(tagged.len(), 1);
    assert_eq!(
        tagged[0]
            .string_item(&TAGGED_VALUE_NAME_ITEM_KEY)
            .expect("name"),
        Some("project".to_string())
    );
}

/// A clip written under the extended model carries its vendor sets
/// first class; the baseline model still reads the file and keeps them
/// dark.
#[test]
fn avid_clip_round_trip() {
    let config = ClipWriterConfig {
        model: avid(),
        ..ClipWriterConfig::default()
    };
    let mut writer = ClipWriter::with_config(MemoryFile::new(), Rational::new(25, 1), config);
    let audio = writer.add_track(EssenceKind::Pcm);
    writer
        .add_package_attribute("project", "newsroom")
        .expect("attribute");
    writer.prepare().expect("prepare");
    let pcm = vec![0u8; 1920 * 2];
    writer.write_samples(audio, &pcm, 1920).expect("write");
    writer.complete().expect("complete");
    let data = writer.into_file().into_data();

    let mut reader =
        ClipReader::open_with_model(MemoryFile::from_data(data.clone()), avid()).expect("open");
    assert_eq!(reader.duration(), 1);
    assert_eq!(reader.metadata.dark_sets().len(), 0);
    let tagged: Vec<_> = reader
        .metadata
        .sets_of_type(&AVID_TAGGED_VALUE_SET_KEY)
        .collect();
    assert_eq!(tagged.len(), 1);
    assert_eq!(
        tagged[0]
            .string_item(&TAGGED_VALUE_NAME_ITEM_KEY)
            .expect("name"),
        Some("project".to_string())
    );
    assert_eq!(
        tagged[0]
            .string_item(&TAGGED_VALUE_VALUE_ITEM_KEY)
            .expect("value"),
        Some("newsroom".to_string())
    );
    let mut track_reader = reader.track_reader(0);
    assert_eq!(track_reader.read(1920).expect("read"), pcm);

    // the baseline model preserves the vendor set as dark metadata
    let reader = ClipReader::open(MemoryFile::from_data(data)).expect("open baseline");
    assert_eq!(reader.metadata.dark_sets().len(), 1);
    assert_eq!(reader.metadata.dark_sets()[0].key, AVID_TAGGED_VALUE_SET_KEY);

    // the baseline model has nowhere to put tagged values
    let mut plain = ClipWriter::new(MemoryFile::new(), Rational::new(25, 1));
    plain.add_track(EssenceKind::Pcm);
    assert!(plain.add_package_attribute("project", "newsroom").is_err());
}

#[test]
fn clip_configuration_round_trips() {
    let config = ClipWriterConfig {
        clip_name: Some("evening bulletin".to_string()),
        start_timecode: Some(9 * 60 * 60 * 25),
        ..ClipWriterConfig::default()
    };
    let mut writer = ClipWriter::with_config(MemoryFile::new(), Rational::new(25, 1), config);
    let audio = writer.add_track(EssenceKind::Pcm);
    writer.prepare().expect("prepare");
    let pcm = vec![0u8; 1920 * 2];
    writer.write_samples(audio, &pcm, 1920).expect("write");
    writer.complete().expect("complete");

    let reader = ClipReader::open(writer.into_file()).expect("open");
    let timecode = reader.start_timecode().expect("timecode");
    assert_eq!(timecode.start, 9 * 60 * 60 * 25);
    assert_eq!(timecode.base, 25);
    assert!(!timecode.drop_frame);
    assert!(!reader.material_umid().is_null());

    // track identity came through the file package
    let track = &reader.tracks()[0];
    assert_eq!(track.track_id, 2);
    assert_eq!(track.edit_rate, Rational::new(25, 1));
    assert!(track.descriptor.is_sound);
}
