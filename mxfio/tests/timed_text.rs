use mxfio::descriptor::EssenceKind;
use mxfio::essence::timed_text::{TimedTextAncillaryResource, TimedTextManifest};
use mxfio::reader::ClipReader;
use mxfio::writer::{ClipWriter, FIRST_GENERIC_STREAM_SID};
use mxfio::{MemoryFile, Rational};
use uuid::Uuid;

const DOCUMENT: &[u8] = b"<tt xmlns=\"http://www.w3.org/ns/ttml\"><body/></tt>";
const FONT: &[u8] = &[0x4f, 0x54, 0x54, 0x4f, 0x00, 0x01, 0x02, 0x03];

#[test]
fn timed_text_with_ancillary_resource() {
    let mut writer = ClipWriter::new(MemoryFile::new(), Rational::new(25, 1));
    let audio = writer.add_track(EssenceKind::Pcm);
    let text = writer.add_track(EssenceKind::TimedText);

    let mut manifest = TimedTextManifest::new("http://www.w3.org/ns/ttml");
    manifest.profile_designator = "http://www.imsc.org/profiles/text".to_string();
    manifest.languages = vec!["en".to_string(), "cy".to_string()];
    manifest.ancillary_resources.push(TimedTextAncillaryResource {
        resource_id: Uuid::new_v4(),
        mime_type: "application/x-font-opentype".to_string(),
        data: FONT.to_vec(),
    });
    writer
        .track_mut(text)
        .set_timed_text(manifest, DOCUMENT.to_vec())
        .expect("manifest");
    writer.prepare().expect("prepare");

    let pcm: Vec<u8> = (0..1920 * 2 * 2).map(|i| (i % 200) as u8).collect();
    writer.write_samples(audio, &pcm, 1920 * 2).expect("write");
    writer.complete().expect("complete");

    let mut reader = ClipReader::open(writer.into_file()).expect("open");
    assert_eq!(reader.duration(), 2);
    assert_eq!(reader.tracks().len(), 2);

    let text_track = reader
        .tracks()
        .iter()
        .position(|t| !t.descriptor.is_sound)
        .expect("text track");
    assert!(reader.tracks()[text_track].clip_wrapped);

    // the document is clip wrapped in its own body partition
    let mut track_reader = reader.track_reader(text_track);
    let document = track_reader.read(DOCUMENT.len() as u64).expect("document");
    assert_eq!(document, DOCUMENT);

    // the ancillary resource sits in a generic stream partition
    let font = reader
        .read_generic_stream(FIRST_GENERIC_STREAM_SID)
        .expect("font stream");
    assert_eq!(font, FONT);

    // the audio is unaffected by the extra partitions
    let mut track_reader = reader.track_reader(1 - text_track);
    assert_eq!(track_reader.read(1920 * 2).expect("audio"), pcm);
}
