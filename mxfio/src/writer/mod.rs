//! Clip writing: track coordination, content package interleave,
//! partition cadence and finalisation with back-patched sizes.

pub mod avci;
pub mod mpeg2;

pub use avci::{AvciMode, AvciWriterHelper};
pub use mpeg2::Mpeg2IndexHelper;

use crate::descriptor::{DescriptorBuilder, EssenceKind, PictureParams, SoundParams, SubDescriptorItem};
use crate::error::MxfError;
use crate::essence::avc::{avci_frame_size, AvcEssenceParser, AvciClass, AVCI_HEADER_SIZE};
use crate::essence::dv::DvEssenceParser;
use crate::essence::pcm::{pcm_to_aes3, sample_sequence};
use crate::essence::timed_text::TimedTextManifest;
use crate::essence::vc3::Vc3EssenceParser;
use crate::essence::EssenceParser;
use crate::file::{MemoryFile, MxfFile};
use crate::index::{IndexTableWriter, INDEX_FLAG_RANDOM_ACCESS};
use crate::klv::{self, KlvHeader};
use crate::labels::*;
use crate::metadata::{HeaderMetadata, MetadataSet};
use crate::model::avid::{
    AVID_TAGGED_VALUE_SET_KEY, PACKAGE_ATTRIBUTES_ITEM_KEY, TAGGED_VALUE_NAME_ITEM_KEY,
    TAGGED_VALUE_VALUE_ITEM_KEY,
};
use crate::model::keys::*;
use crate::model::{baseline, DataModel};
use crate::partition::{
    kag_fill_size, PartitionKind, PartitionPack, PartitionStatus, RandomIndexPack,
};
use crate::prelude::*;
use crate::types::{ProductVersion, Rational, Timestamp, Ul, Umid};
use std::collections::VecDeque;
use std::io::{SeekFrom, Write};
use uuid::Uuid;

/// Stream id of the interleaved essence body.
pub const BODY_SID: u32 = 1;
/// Stream id of the essence index.
pub const INDEX_SID: u32 = 2;
/// Stream id of a clip-wrapped timed text body.
pub const TIMED_TEXT_BODY_SID: u32 = 3;
/// First stream id used for generic stream partitions.
pub const FIRST_GENERIC_STREAM_SID: u32 = 10;

/// When to duplicate the header metadata into the footer partition.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FooterMetadata {
    Never,
    /// Only when the header partition could not be completed in place.
    IfOpenHeader,
    Always,
}

#[derive(Clone, Debug)]
pub struct ClipWriterConfig {
    /// Data model the header metadata is built against; the extended
    /// model makes vendor sets first class.
    pub model: &'static DataModel,
    pub kag_size: u32,
    /// Edit units per body partition; 0 keeps a single body partition.
    pub partition_interval: i64,
    pub footer_metadata: FooterMetadata,
    pub write_rip: bool,
    pub clip_name: Option<String>,
    /// Start timecode in edit units since midnight.
    pub start_timecode: Option<i64>,
    pub company_name: String,
    pub product_name: String,
    pub version_string: String,
    pub product_uid: Uuid,
    pub product_version: ProductVersion,
}

impl Default for ClipWriterConfig {
    fn default() -> ClipWriterConfig {
        ClipWriterConfig {
            model: baseline(),
            kag_size: 0x200,
            partition_interval: 0,
            footer_metadata: FooterMetadata::IfOpenHeader,
            write_rip: true,
            clip_name: None,
            start_timecode: None,
            company_name: "mxfio".to_string(),
            product_name: "mxfio".to_string(),
            version_string: env!("CARGO_PKG_VERSION").to_string(),
            product_uid: Uuid::from_bytes([
                0x9f, 0x2e, 0x5d, 0x11, 0x6b, 0x3a, 0x4c, 0x08, 0x8e, 0x51, 0x2b, 0x07, 0xd4,
                0x66, 0x01, 0x21,
            ]),
            product_version: ProductVersion {
                major: 0,
                minor: 1,
                patch: 0,
                build: 0,
                release: 1,
            },
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TrackHandle(usize);

#[derive(Clone, Copy, PartialEq, Eq)]
enum WriterState {
    Setup,
    Writing,
    Finalised,
}

/// What a duration-bearing metadata item is patched to at finalise.
enum DurationSource {
    Clip,
    TrackUnits(usize),
    TrackSamples(usize),
}

pub struct TrackWriter {
    kind: EssenceKind,
    pub descriptor: DescriptorBuilder,
    clip_wrapped: bool,
    avci_mode: AvciMode,
    avci_class: Option<AvciClass>,
    avci: Option<AvciWriterHelper>,
    mpeg2: Option<Mpeg2IndexHelper>,
    element_key: Ul,
    track_number: u32,
    track_id: u32,
    sequence: Vec<u32>,
    frames: VecDeque<Vec<u8>>,
    buffer: Vec<u8>,
    input_samples: i64,
    units_written: i64,
    samples_written: i64,
    fixed_unit_size: Option<usize>,
    timed_text: Option<(TimedTextManifest, Vec<u8>)>,
    clip_klv_offset: Option<u64>,
    avci_sub_uid: Option<Uuid>,
    mpeg2_descriptor_uid: Option<Uuid>,
}

impl TrackWriter {
    fn new(kind: EssenceKind, edit_rate: Rational) -> TrackWriter {
        TrackWriter {
            kind,
            descriptor: DescriptorBuilder::new(kind, edit_rate),
            clip_wrapped: matches!(kind, EssenceKind::TimedText),
            avci_mode: AvciMode::FirstOrAll,
            avci_class: match kind {
                EssenceKind::AvcI(class) => Some(class),
                _ => None,
            },
            avci: None,
            mpeg2: match kind {
                EssenceKind::Mpeg2Lg => Some(Mpeg2IndexHelper::new()),
                _ => None,
            },
            element_key: Ul::null(),
            track_number: 0,
            track_id: 0,
            sequence: Vec::new(),
            frames: VecDeque::new(),
            buffer: Vec::new(),
            input_samples: 0,
            units_written: 0,
            samples_written: 0,
            fixed_unit_size: None,
            timed_text: None,
            clip_klv_offset: None,
            avci_sub_uid: None,
            mpeg2_descriptor_uid: None,
        }
    }

    pub fn kind(&self) -> EssenceKind {
        self.kind
    }

    pub fn track_id(&self) -> u32 {
        self.track_id
    }

    pub fn set_avci_mode(&mut self, mode: AvciMode) {
        self.avci_mode = mode;
    }

    /// Supply the 512-byte elementary header for modes that may need to
    /// prepend it.
    pub fn set_avci_header(&mut self, header: &[u8]) -> Result<()> {
        let frame_size = self.avci_frame_size()?;
        let mode = self.avci_mode;
        self.avci
            .get_or_insert_with(|| AvciWriterHelper::new(mode, frame_size))
            .set_header(header)
    }

    /// Wrap the whole track in a single KLV instead of per-frame
    /// elements. Only PCM supports this, and only as the sole track.
    pub fn set_clip_wrapped(&mut self, clip_wrapped: bool) -> Result<()> {
        if clip_wrapped && !matches!(self.kind, EssenceKind::Pcm) {
            return Err(MxfError::LogicError("clip wrapping is limited to pcm"));
        }
        self.clip_wrapped = clip_wrapped;
        self.descriptor.clip_wrapped = clip_wrapped;
        Ok(())
    }

    /// The timed text document and manifest are supplied up front; the
    /// partitions are written at finalise.
    pub fn set_timed_text(&mut self, manifest: TimedTextManifest, document: Vec<u8>) -> Result<()> {
        if !matches!(self.kind, EssenceKind::TimedText) {
            return Err(MxfError::LogicError("not a timed text track"));
        }
        self.timed_text = Some((manifest, document));
        Ok(())
    }

    /// Attach a codec sub-descriptor to be written with the header
    /// metadata (JPEG 2000 / JPEG XS / VC-2 parameters).
    pub fn set_sub_descriptor(&mut self, key: Ul, items: Vec<SubDescriptorItem>) {
        self.descriptor.sub_descriptor_key = Some(key);
        self.descriptor.sub_descriptor_items = items;
    }

    pub fn picture_mut(&mut self) -> &mut PictureParams {
        &mut self.descriptor.picture
    }

    pub fn sound_mut(&mut self) -> &mut SoundParams {
        &mut self.descriptor.sound
    }

    fn avci_frame_size(&self) -> Result<usize> {
        let class = self
            .avci_class
            .ok_or(MxfError::LogicError("not an avci track"))?;
        avci_frame_size(class, self.descriptor.picture.stored_height)
            .ok_or(MxfError::LogicError("avci geometry not configured"))
    }

    fn block_align(&self) -> usize {
        self.descriptor.sound.block_align() as usize
    }

    /// Bytes an audio element carries in content package `cp`.
    fn audio_unit_bytes(&self, cp: i64) -> usize {
        if self.sequence.is_empty() {
            return 0;
        }
        let count = self.sequence[(cp % self.sequence.len() as i64) as usize] as usize;
        count * self.block_align()
    }

    fn has_unit(&self, cp: i64) -> bool {
        if self.kind.is_sound() {
            self.buffer.len() >= self.audio_unit_bytes(cp)
        } else {
            !self.frames.is_empty()
        }
    }

    /// Pull the next element payload. With `pad`, short audio is
    /// completed with silence.
    fn take_unit(&mut self, cp: i64, pad: bool) -> Option<Vec<u8>> {
        if self.kind.is_sound() {
            let needed = self.audio_unit_bytes(cp);
            if self.buffer.len() >= needed {
                let rest = self.buffer.split_off(needed);
                Some(std::mem::replace(&mut self.buffer, rest))
            } else if pad {
                let mut unit = std::mem::take(&mut self.buffer);
                unit.resize(needed, 0);
                Some(unit)
            } else {
                None
            }
        } else {
            self.frames.pop_front()
        }
    }

    fn is_frame_interleaved(&self) -> bool {
        !self.clip_wrapped && !matches!(self.kind, EssenceKind::TimedText)
    }
}

pub struct ClipWriter<F: MxfFile> {
    file: F,
    edit_rate: Rational,
    config: ClipWriterConfig,
    model: &'static DataModel,
    state: WriterState,
    tracks: Vec<TrackWriter>,
    metadata: Option<HeaderMetadata>,
    duration_items: Vec<(Uuid, Ul, DurationSource)>,
    attributes: Vec<(String, String)>,
    material_umid: Umid,
    file_package_umid: Umid,
    header_pack: Option<PartitionPack>,
    metadata_start: u64,
    metadata_len: u64,
    body_packs: Vec<(u64, PartitionPack)>,
    partition_start: u64,
    essence_stream_offset: u64,
    cp_offsets: Vec<u64>,
    cp_count: i64,
    cp_in_partition: i64,
}

impl<F: MxfFile> ClipWriter<F> {
    pub fn new(file: F, edit_rate: Rational) -> ClipWriter<F> {
        ClipWriter::with_config(file, edit_rate, ClipWriterConfig::default())
    }

    pub fn with_config(file: F, edit_rate: Rational, config: ClipWriterConfig) -> ClipWriter<F> {
        let model = config.model;
        ClipWriter {
            file,
            edit_rate,
            config,
            model,
            state: WriterState::Setup,
            tracks: Vec::new(),
            metadata: None,
            duration_items: Vec::new(),
            attributes: Vec::new(),
            material_umid: Umid::generate(),
            file_package_umid: Umid::generate(),
            header_pack: None,
            metadata_start: 0,
            metadata_len: 0,
            body_packs: Vec::new(),
            partition_start: 0,
            essence_stream_offset: 0,
            cp_offsets: Vec::new(),
            cp_count: 0,
            cp_in_partition: 0,
        }
    }

    pub fn edit_rate(&self) -> Rational {
        self.edit_rate
    }

    pub fn duration(&self) -> i64 {
        self.cp_count
    }

    pub fn material_umid(&self) -> Umid {
        self.material_umid
    }

    pub fn add_track(&mut self, kind: EssenceKind) -> TrackHandle {
        debug_assert!(self.state == WriterState::Setup);
        self.tracks.push(TrackWriter::new(kind, self.edit_rate));
        TrackHandle(self.tracks.len() - 1)
    }

    pub fn track_mut(&mut self, handle: TrackHandle) -> &mut TrackWriter {
        &mut self.tracks[handle.0]
    }

    /// Attach a name/value attribute to the material package as a
    /// tagged value. Requires a data model that defines the tagged
    /// value set (the extended model does).
    pub fn add_package_attribute(&mut self, name: &str, value: &str) -> Result<()> {
        if self.state != WriterState::Setup {
            return Err(MxfError::LogicError("attributes must precede prepare"));
        }
        if self.model.set_def(&AVID_TAGGED_VALUE_SET_KEY).is_none() {
            return Err(MxfError::LogicError("data model has no tagged value set"));
        }
        self.attributes.push((name.to_string(), value.to_string()));
        Ok(())
    }

    pub fn into_file(self) -> F {
        self.file
    }

    /// Build the header metadata and write the header partition. Tracks
    /// and their descriptor parameters must be configured first.
    pub fn prepare(&mut self) -> Result<()> {
        if self.state != WriterState::Setup {
            return Err(MxfError::LogicError("clip writer already prepared"));
        }
        if self.tracks.is_empty() {
            return Err(MxfError::LogicError("no tracks added"));
        }
        let clip_wrapped = self
            .tracks
            .iter()
            .filter(|t| t.clip_wrapped && !matches!(t.kind, EssenceKind::TimedText))
            .count();
        if clip_wrapped > 0 && self.interleaved_track_count() + clip_wrapped > 1 {
            return Err(MxfError::LogicError(
                "clip wrapping requires a single essence track",
            ));
        }

        self.assign_track_identities()?;
        self.build_metadata()?;
        self.write_header_partition()?;
        self.state = WriterState::Writing;
        Ok(())
    }

    fn interleaved_track_count(&self) -> usize {
        self.tracks.iter().filter(|t| t.is_frame_interleaved()).count()
    }

    fn assign_track_identities(&mut self) -> Result<()> {
        // element numbers count elements of the same item type in the
        // content package
        let mut totals: Vec<(u8, u8)> = Vec::new();
        for track in &self.tracks {
            let (key, _) = track.kind.element_key(1, 0);
            let item_type = key.0[12];
            match totals.iter_mut().find(|(t, _)| *t == item_type) {
                Some((_, n)) => *n += 1,
                None => totals.push((item_type, 1)),
            }
        }
        let mut seen: Vec<(u8, u8)> = Vec::new();
        let edit_rate = self.edit_rate;
        for (i, track) in self.tracks.iter_mut().enumerate() {
            let (key, _) = track.kind.element_key(1, 0);
            let item_type = key.0[12];
            let total = totals
                .iter()
                .find(|(t, _)| *t == item_type)
                .map(|(_, n)| *n)
                .unwrap_or(1);
            let index = match seen.iter_mut().find(|(t, _)| *t == item_type) {
                Some((_, n)) => {
                    let at = *n;
                    *n += 1;
                    at
                }
                None => {
                    seen.push((item_type, 1));
                    0
                }
            };
            let (element_key, track_number) = track.kind.element_key(total, index);
            track.element_key = element_key;
            track.track_number = track_number;
            track.track_id = i as u32 + 2; // track id 1 is the timecode track

            if track.kind.is_sound() {
                track.sequence = sample_sequence(edit_rate, track.descriptor.sound.sampling_rate)?;
            }
        }
        Ok(())
    }

    fn essence_containers(&self) -> Vec<Ul> {
        let mut labels: Vec<Ul> = Vec::new();
        for track in &self.tracks {
            let label = track.kind.essence_container(track.clip_wrapped);
            if !labels.contains(&label) {
                labels.push(label);
            }
        }
        labels
    }

    fn timecode_base(&self) -> u16 {
        ((self.edit_rate.num as i64 + self.edit_rate.den as i64 / 2) / self.edit_rate.den as i64)
            as u16
    }

    fn build_metadata(&mut self) -> Result<()> {
        let mut hm = HeaderMetadata::new(self.model);
        let now = Timestamp::default();

        let mut ident = MetadataSet::new(IDENTIFICATION_SET_KEY);
        ident.set_uuid(IDENT_THIS_GENERATION_UID_ITEM_KEY, &Uuid::new_v4());
        ident.set_string(IDENT_COMPANY_NAME_ITEM_KEY, &self.config.company_name);
        ident.set_string(IDENT_PRODUCT_NAME_ITEM_KEY, &self.config.product_name);
        ident.set_product_version(IDENT_PRODUCT_VERSION_ITEM_KEY, &self.config.product_version);
        ident.set_string(IDENT_VERSION_STRING_ITEM_KEY, &self.config.version_string);
        ident.set_uuid(IDENT_PRODUCT_UID_ITEM_KEY, &self.config.product_uid);
        ident.set_timestamp(IDENT_MODIFICATION_DATE_ITEM_KEY, &now);
        ident.set_string(IDENT_PLATFORM_ITEM_KEY, std::env::consts::OS);
        let ident_uid = hm.add_set(ident);

        let material_uid = self.build_package(&mut hm, true, now)?;
        let file_package_uid = self.build_package(&mut hm, false, now)?;

        let mut ecd_uids = Vec::new();
        let mut ecd = MetadataSet::new(ESSENCE_CONTAINER_DATA_SET_KEY);
        ecd.set_umid(ECD_LINKED_PACKAGE_UID_ITEM_KEY, &self.file_package_umid);
        ecd.set_u32(ECD_INDEX_SID_ITEM_KEY, INDEX_SID);
        ecd.set_u32(ECD_BODY_SID_ITEM_KEY, BODY_SID);
        ecd_uids.push(hm.add_set(ecd));
        if self
            .tracks
            .iter()
            .any(|t| matches!(t.kind, EssenceKind::TimedText))
        {
            let mut ecd = MetadataSet::new(ESSENCE_CONTAINER_DATA_SET_KEY);
            ecd.set_umid(ECD_LINKED_PACKAGE_UID_ITEM_KEY, &self.file_package_umid);
            ecd.set_u32(ECD_INDEX_SID_ITEM_KEY, 0);
            ecd.set_u32(ECD_BODY_SID_ITEM_KEY, TIMED_TEXT_BODY_SID);
            ecd_uids.push(hm.add_set(ecd));
        }

        let mut storage = MetadataSet::new(CONTENT_STORAGE_SET_KEY);
        storage.set_ref_array(CS_PACKAGES_ITEM_KEY, &[material_uid, file_package_uid]);
        storage.set_ref_array(CS_ESSENCE_CONTAINER_DATA_ITEM_KEY, &ecd_uids);
        let storage_uid = hm.add_set(storage);

        let mut preface = MetadataSet::new(PREFACE_SET_KEY);
        preface.set_timestamp(PREFACE_LAST_MODIFIED_DATE_ITEM_KEY, &now);
        preface.set_version(PREFACE_VERSION_ITEM_KEY, 1, 3);
        preface.set_ul(PREFACE_OPERATIONAL_PATTERN_ITEM_KEY, &OP_1A);
        preface.set_ul_batch(PREFACE_ESSENCE_CONTAINERS_ITEM_KEY, &self.essence_containers());
        preface.set_ul_batch(PREFACE_DM_SCHEMES_ITEM_KEY, &[]);
        preface.set_ref_array(PREFACE_IDENTIFICATIONS_ITEM_KEY, &[ident_uid]);
        preface.set_strong_ref(PREFACE_CONTENT_STORAGE_ITEM_KEY, &storage_uid);
        hm.add_set(preface);

        self.metadata = Some(hm);
        Ok(())
    }

    /// Build the material or file source package, its tracks and (for
    /// the file package) the descriptors.
    fn build_package(
        &mut self,
        hm: &mut HeaderMetadata,
        material: bool,
        now: Timestamp,
    ) -> Result<Uuid> {
        let umid = if material {
            self.material_umid
        } else {
            self.file_package_umid
        };
        let mut track_uids = Vec::new();

        if material {
            let mut component = MetadataSet::new(TIMECODE_COMPONENT_SET_KEY);
            component.set_ul(COMPONENT_DATA_DEFINITION_ITEM_KEY, &DATA_DEF_TIMECODE);
            component.set_i64(COMPONENT_DURATION_ITEM_KEY, -1);
            component.set_u16(TIMECODE_BASE_ITEM_KEY, self.timecode_base());
            component.set_i64(
                TIMECODE_START_ITEM_KEY,
                self.config.start_timecode.unwrap_or(0),
            );
            component.set_bool(TIMECODE_DROP_FRAME_ITEM_KEY, self.edit_rate.den == 1001);
            let component_uid = hm.add_set(component);
            self.duration_items.push((
                component_uid,
                COMPONENT_DURATION_ITEM_KEY,
                DurationSource::Clip,
            ));

            let sequence_uid = build_sequence(hm, DATA_DEF_TIMECODE, &[component_uid]);
            let mut track = MetadataSet::new(TIMELINE_TRACK_SET_KEY);
            track.set_u32(TRACK_ID_ITEM_KEY, 1);
            track.set_u32(TRACK_NUMBER_ITEM_KEY, 0);
            track.set_string(TRACK_NAME_ITEM_KEY, "TC1");
            track.set_rational(TRACK_EDIT_RATE_ITEM_KEY, &self.edit_rate);
            track.set_i64(TRACK_ORIGIN_ITEM_KEY, 0);
            track.set_strong_ref(TRACK_SEQUENCE_ITEM_KEY, &sequence_uid);
            track_uids.push(hm.add_set(track));
        }

        let mut descriptor_uids = Vec::new();
        for i in 0..self.tracks.len() {
            let (kind, track_id, track_number, clip_wrapped) = {
                let t = &self.tracks[i];
                (t.kind, t.track_id, t.track_number, t.clip_wrapped)
            };
            let data_def = kind.data_definition();

            let mut clip = MetadataSet::new(SOURCE_CLIP_SET_KEY);
            clip.set_ul(COMPONENT_DATA_DEFINITION_ITEM_KEY, &data_def);
            clip.set_i64(COMPONENT_DURATION_ITEM_KEY, -1);
            clip.set_i64(SOURCE_CLIP_START_POSITION_ITEM_KEY, 0);
            if material {
                clip.set_umid(SOURCE_CLIP_PACKAGE_ID_ITEM_KEY, &self.file_package_umid);
                clip.set_u32(SOURCE_CLIP_TRACK_ID_ITEM_KEY, track_id);
            } else {
                clip.set_umid(SOURCE_CLIP_PACKAGE_ID_ITEM_KEY, &Umid::null());
                clip.set_u32(SOURCE_CLIP_TRACK_ID_ITEM_KEY, 0);
            }
            let clip_uid = hm.add_set(clip);
            let duration_source = if kind.is_sound() && clip_wrapped && !material {
                DurationSource::TrackSamples(i)
            } else if material {
                DurationSource::Clip
            } else {
                DurationSource::TrackUnits(i)
            };
            self.duration_items
                .push((clip_uid, COMPONENT_DURATION_ITEM_KEY, duration_source));

            let sequence_uid = build_sequence(hm, data_def, &[clip_uid]);
            let mut track = MetadataSet::new(TIMELINE_TRACK_SET_KEY);
            track.set_u32(TRACK_ID_ITEM_KEY, track_id);
            track.set_u32(
                TRACK_NUMBER_ITEM_KEY,
                if material { 0 } else { track_number },
            );
            track.set_rational(TRACK_EDIT_RATE_ITEM_KEY, &self.track_rate(i, material));
            track.set_i64(TRACK_ORIGIN_ITEM_KEY, 0);
            track.set_strong_ref(TRACK_SEQUENCE_ITEM_KEY, &sequence_uid);
            track_uids.push(hm.add_set(track));

            if !material {
                let uid = self.build_descriptor(hm, i)?;
                let duration_source = if kind.is_sound() && clip_wrapped {
                    DurationSource::TrackSamples(i)
                } else {
                    DurationSource::TrackUnits(i)
                };
                self.duration_items
                    .push((uid, FD_CONTAINER_DURATION_ITEM_KEY, duration_source));
                descriptor_uids.push(uid);
            }
        }

        let mut attribute_uids = Vec::new();
        if material {
            for (name, value) in &self.attributes {
                let mut tagged = MetadataSet::new(AVID_TAGGED_VALUE_SET_KEY);
                tagged.set_string(TAGGED_VALUE_NAME_ITEM_KEY, name);
                tagged.set_string(TAGGED_VALUE_VALUE_ITEM_KEY, value);
                attribute_uids.push(hm.add_set(tagged));
            }
        }

        let mut package = MetadataSet::new(if material {
            MATERIAL_PACKAGE_SET_KEY
        } else {
            SOURCE_PACKAGE_SET_KEY
        });
        package.set_umid(PACKAGE_UID_ITEM_KEY, &umid);
        if material {
            if let Some(name) = &self.config.clip_name {
                package.set_string(PACKAGE_NAME_ITEM_KEY, name);
            }
            if !attribute_uids.is_empty() {
                package.set_ref_array(PACKAGE_ATTRIBUTES_ITEM_KEY, &attribute_uids);
            }
        }
        package.set_timestamp(PACKAGE_CREATION_DATE_ITEM_KEY, &now);
        package.set_timestamp(PACKAGE_MODIFIED_DATE_ITEM_KEY, &now);
        package.set_ref_array(PACKAGE_TRACKS_ITEM_KEY, &track_uids);

        if !material {
            let descriptor_uid = if descriptor_uids.len() == 1 {
                descriptor_uids[0]
            } else {
                let mut multi = MetadataSet::new(MULTIPLE_DESCRIPTOR_SET_KEY);
                multi.set_rational(FD_SAMPLE_RATE_ITEM_KEY, &self.edit_rate);
                multi.set_i64(FD_CONTAINER_DURATION_ITEM_KEY, -1);
                multi.set_ul(FD_ESSENCE_CONTAINER_ITEM_KEY, &EC_MULTIPLE_WRAPPINGS);
                multi.set_ref_array(MD_SUB_DESCRIPTOR_UIDS_ITEM_KEY, &descriptor_uids);
                let uid = hm.add_set(multi);
                self.duration_items.push((
                    uid,
                    FD_CONTAINER_DURATION_ITEM_KEY,
                    DurationSource::Clip,
                ));
                uid
            };
            package.set_strong_ref(PACKAGE_DESCRIPTOR_ITEM_KEY, &descriptor_uid);
        }

        Ok(hm.add_set(package))
    }

    fn track_rate(&self, i: usize, material: bool) -> Rational {
        let track = &self.tracks[i];
        if !material && track.kind.is_sound() && track.clip_wrapped {
            track.descriptor.sound.sampling_rate
        } else {
            self.edit_rate
        }
    }

    fn build_descriptor(&mut self, hm: &mut HeaderMetadata, i: usize) -> Result<Uuid> {
        let kind = self.tracks[i].kind;

        // placeholder sub-descriptor items filled at finalise; sizes must
        // not change so the metadata can be rewritten in place
        if let EssenceKind::AvcI(_) = kind {
            let descriptor = &mut self.tracks[i].descriptor;
            descriptor.sub_descriptor_key = Some(AVC_SUB_DESCRIPTOR_SET_KEY);
            descriptor.sub_descriptor_items = vec![
                SubDescriptorItem {
                    key: AVC_PROFILE_ITEM_KEY,
                    value: vec![0],
                },
                SubDescriptorItem {
                    key: AVC_PROFILE_CONSTRAINT_ITEM_KEY,
                    value: vec![0],
                },
                SubDescriptorItem {
                    key: AVC_LEVEL_ITEM_KEY,
                    value: vec![0],
                },
                SubDescriptorItem {
                    key: AVC_SPS_FLAG_ITEM_KEY,
                    value: vec![0],
                },
                SubDescriptorItem {
                    key: AVC_PPS_FLAG_ITEM_KEY,
                    value: vec![0],
                },
                SubDescriptorItem {
                    key: AVC_FRAME_HEADER_BYTES_ITEM_KEY,
                    value: vec![0; AVCI_HEADER_SIZE],
                },
            ];
        }
        if matches!(kind, EssenceKind::TimedText) && self.tracks[i].timed_text.is_none() {
            return Err(MxfError::LogicError("timed text document not set"));
        }

        let track_id = self.tracks[i].track_id;
        let uid = self.tracks[i].descriptor.build(hm, track_id, -1)?;

        match kind {
            EssenceKind::Mpeg2Lg => {
                if let Some(set) = hm.get_mut(&uid) {
                    set.set_bool(MPEG2_SINGLE_SEQUENCE_ITEM_KEY, true);
                    set.set_bool(MPEG2_CLOSED_GOP_ITEM_KEY, true);
                    set.set_bool(MPEG2_LOW_DELAY_ITEM_KEY, false);
                    set.set_u16(MPEG2_MAX_GOP_ITEM_KEY, 0);
                    set.set_u16(MPEG2_B_PICTURE_COUNT_ITEM_KEY, 0);
                    set.set_u8(MPEG2_PROFILE_AND_LEVEL_ITEM_KEY, 0);
                    set.set_u32(MPEG2_BIT_RATE_ITEM_KEY, 0);
                }
                self.tracks[i].mpeg2_descriptor_uid = Some(uid);
            }
            EssenceKind::TimedText => {
                let (manifest, _) = self.tracks[i].timed_text.clone().ok_or(
                    MxfError::LogicError("timed text document not set"),
                )?;
                if let Some(set) = hm.get_mut(&uid) {
                    set.set_uuid(TT_RESOURCE_ID_ITEM_KEY, &manifest.resource_id);
                    set.set_string(TT_UCS_ENCODING_ITEM_KEY, &manifest.encoding);
                    set.set_string(TT_NAMESPACE_URI_ITEM_KEY, &manifest.namespace_uri);
                    if !manifest.languages.is_empty() {
                        set.set_string(TT_LANGUAGES_ITEM_KEY, &manifest.language_tag_list());
                    }
                }
                let mut sub_uids = Vec::new();
                for (n, resource) in manifest.ancillary_resources.iter().enumerate() {
                    let mut sub =
                        MetadataSet::new(DC_TIMED_TEXT_RESOURCE_SUB_DESCRIPTOR_SET_KEY);
                    sub.set_uuid(TT_ANC_RESOURCE_ID_ITEM_KEY, &resource.resource_id);
                    sub.set_string(TT_ANC_MIME_TYPE_ITEM_KEY, &resource.mime_type);
                    sub.set_u32(
                        TT_ANC_STREAM_ID_ITEM_KEY,
                        FIRST_GENERIC_STREAM_SID + n as u32,
                    );
                    sub_uids.push(hm.add_set(sub));
                }
                if !sub_uids.is_empty() {
                    if let Some(set) = hm.get_mut(&uid) {
                        set.set_ref_array(DESCRIPTOR_SUB_DESCRIPTORS_ITEM_KEY, &sub_uids);
                    }
                }
            }
            EssenceKind::AvcI(_) => {
                let sub_uid = hm
                    .get(&uid)
                    .and_then(|set| {
                        set.ref_array_item(&DESCRIPTOR_SUB_DESCRIPTORS_ITEM_KEY)
                            .ok()
                            .flatten()
                    })
                    .and_then(|uids| uids.first().copied());
                self.tracks[i].avci_sub_uid = sub_uid;
            }
            _ => {}
        }
        Ok(uid)
    }

    fn write_header_partition(&mut self) -> Result<()> {
        let mut pack = PartitionPack::new(PartitionKind::Header, PartitionStatus::Open);
        pack.kag_size = self.config.kag_size;
        pack.operational_pattern = OP_1A;
        pack.essence_containers = self.essence_containers();

        let mut buffer = MemoryFile::new();
        let metadata_len = self
            .metadata
            .as_ref()
            .ok_or(MxfError::LogicError("metadata not built"))?
            .write(&mut buffer)?;

        let pack_size = pack.write_size();
        let fill = kag_fill_size(pack_size + metadata_len, self.config.kag_size);
        pack.header_byte_count = metadata_len + fill;

        pack.write_to(&mut self.file)?;
        self.metadata_start = pack_size;
        self.metadata_len = metadata_len;
        self.file.write_all(&buffer.into_data())?;
        if fill > 0 {
            klv::write_fill(&mut self.file, fill)?;
        }
        self.header_pack = Some(pack);
        Ok(())
    }

    fn previous_partition_offset(&self) -> u64 {
        self.body_packs.last().map(|(offset, _)| *offset).unwrap_or(0)
    }

    fn pad_partition_to_kag(&mut self) -> Result<()> {
        let position = self.file.position()?;
        let fill = kag_fill_size(position - self.partition_start, self.config.kag_size);
        if fill > 0 {
            klv::write_fill(&mut self.file, fill)?;
        }
        Ok(())
    }

    fn open_partition(&mut self, status: PartitionStatus, body_sid: u32, index_sid: u32) -> Result<()> {
        self.pad_partition_to_kag()?;
        let offset = self.file.position()?;
        let mut pack = PartitionPack::new(PartitionKind::Body, status);
        pack.kag_size = self.config.kag_size;
        pack.this_partition = offset;
        pack.previous_partition = self.previous_partition_offset();
        // only the interleaved essence body carries a running offset
        pack.body_offset = if body_sid == BODY_SID {
            self.essence_stream_offset
        } else {
            0
        };
        pack.body_sid = body_sid;
        pack.index_sid = index_sid;
        pack.operational_pattern = OP_1A;
        pack.essence_containers = self.essence_containers();
        pack.write_to(&mut self.file)?;

        let used = self.file.position()? - offset;
        let fill = kag_fill_size(used, self.config.kag_size);
        if fill > 0 {
            klv::write_fill(&mut self.file, fill)?;
        }
        self.partition_start = offset;
        self.body_packs.push((offset, pack));
        self.cp_in_partition = 0;
        Ok(())
    }

    fn open_body_partition(&mut self) -> Result<()> {
        self.open_partition(PartitionStatus::Open, BODY_SID, 0)
    }

    /// Append samples to a track. Picture and data tracks take whole
    /// frames; sound tracks take `count` PCM sample frames.
    pub fn write_samples(&mut self, handle: TrackHandle, data: &[u8], count: u32) -> Result<()> {
        if self.state != WriterState::Writing {
            return Err(MxfError::LogicError("clip writer not prepared"));
        }
        let i = handle.0;
        if matches!(self.tracks[i].kind, EssenceKind::TimedText) {
            return Err(MxfError::LogicError(
                "timed text is supplied through the manifest",
            ));
        }

        if self.tracks[i].kind.is_sound() {
            let block = self.tracks[i].block_align();
            if data.len() != count as usize * block {
                return Err(MxfError::LogicError("pcm data does not match sample count"));
            }
            self.tracks[i].buffer.extend_from_slice(data);
            self.tracks[i].input_samples += count as i64;
            if self.tracks[i].clip_wrapped {
                return self.write_clip_wrapped(i);
            }
        } else {
            if count == 0 {
                return Err(MxfError::LogicError("frame count must be positive"));
            }
            self.queue_frames(i, data, count)?;
        }
        self.process_content_packages(false)
    }

    /// Split incoming picture and data bytes into frames and run the
    /// per-codec hooks.
    fn queue_frames(&mut self, i: usize, data: &[u8], count: u32) -> Result<()> {
        if data.len() % count as usize != 0 {
            return Err(MxfError::LogicError("frames must be equally sized"));
        }
        let kind = self.tracks[i].kind;
        let size = data.len() / count as usize;
        match kind {
            EssenceKind::AvcI(_) => {
                for n in 0..count as usize {
                    self.queue_avci_frame(i, &data[n * size..(n + 1) * size])?;
                }
            }
            EssenceKind::Mpeg2Lg => {
                if count != 1 {
                    return Err(MxfError::LogicError(
                        "long gop frames are written one at a time",
                    ));
                }
                self.queue_mpeg2_frame(i, data)?;
            }
            _ => {
                for n in 0..count as usize {
                    let frame = &data[n * size..(n + 1) * size];
                    if self.tracks[i].fixed_unit_size.is_none() {
                        self.check_first_frame(i, frame)?;
                    }
                    if self.tracks[i].kind.is_cbe() {
                        if let Some(fixed) = self.tracks[i].fixed_unit_size {
                            if fixed != frame.len() {
                                return Err(MxfError::LogicError(
                                    "variable frame size on a cbe track",
                                ));
                            }
                        }
                    }
                    self.tracks[i].fixed_unit_size.get_or_insert(frame.len());
                    self.tracks[i].frames.push_back(frame.to_vec());
                    self.tracks[i].input_samples += 1;
                }
            }
        }
        Ok(())
    }

    /// Validate the first frame against the configured format.
    fn check_first_frame(&mut self, i: usize, frame: &[u8]) -> Result<()> {
        match self.tracks[i].kind {
            EssenceKind::Dv(variant) => {
                let mut parser = DvEssenceParser::new();
                parser.parse_frame_info(frame)?;
                let info = parser.info.as_ref().ok_or(MxfError::LogicError("no dv info"))?;
                if info.variant != variant || info.frame_size != frame.len() {
                    return Err(MxfError::LogicError("dv frame does not match track format"));
                }
            }
            EssenceKind::Vc3 => {
                let mut parser = Vc3EssenceParser::new();
                parser.parse_frame_info(frame)?;
                let info = parser.info.as_ref().ok_or(MxfError::LogicError("no vc3 info"))?;
                if info.frame_size != frame.len() {
                    return Err(MxfError::LogicError("vc3 frame size does not match its id"));
                }
            }
            EssenceKind::Anc => {
                crate::essence::anc::parse_element(frame)?;
            }
            _ => {}
        }
        Ok(())
    }

    fn queue_avci_frame(&mut self, i: usize, frame: &[u8]) -> Result<()> {
        if self.tracks[i].avci.is_none() {
            let frame_size = self.tracks[i].avci_frame_size()?;
            let mode = self.tracks[i].avci_mode;
            self.tracks[i].avci = Some(AvciWriterHelper::new(mode, frame_size));
        }
        let track = &mut self.tracks[i];
        let helper = track
            .avci
            .as_mut()
            .ok_or(MxfError::LogicError("avci helper missing"))?;
        let processed = helper.process_frame(frame)?;
        track.frames.push_back(processed);
        track.input_samples += 1;
        Ok(())
    }

    fn queue_mpeg2_frame(&mut self, i: usize, frame: &[u8]) -> Result<()> {
        let track = &mut self.tracks[i];
        let helper = track
            .mpeg2
            .as_mut()
            .ok_or(MxfError::LogicError("mpeg2 helper missing"))?;
        helper.add_frame(frame)?;
        track.frames.push_back(frame.to_vec());
        track.input_samples += 1;
        Ok(())
    }

    /// Clip-wrapped PCM goes straight to the file behind one KLV with a
    /// provisional long-form length.
    fn write_clip_wrapped(&mut self, i: usize) -> Result<()> {
        if self.body_packs.is_empty() {
            self.open_partition(PartitionStatus::Open, BODY_SID, 0)?;
        }
        if self.tracks[i].clip_klv_offset.is_none() {
            let offset = self.file.position()?;
            KlvHeader::with_llen(self.tracks[i].element_key, 9, 0).write_to(&mut self.file)?;
            self.tracks[i].clip_klv_offset = Some(offset);
            self.essence_stream_offset += 16 + 9;
        }
        let data = std::mem::take(&mut self.tracks[i].buffer);
        self.file.write_all(&data)?;
        self.essence_stream_offset += data.len() as u64;
        self.tracks[i].samples_written += data.len() as i64 / self.tracks[i].block_align() as i64;
        self.tracks[i].units_written = self.tracks[i].samples_written;
        Ok(())
    }

    /// Final element payload for one edit unit. AES-3 tracks wrap the
    /// raw PCM in the preamble words; everything else passes through.
    fn element_payload(&self, i: usize, unit: Vec<u8>) -> Result<Vec<u8>> {
        match self.tracks[i].kind {
            EssenceKind::Aes3 => {
                let sound = &self.tracks[i].descriptor.sound;
                pcm_to_aes3(&unit, sound.quantization_bits, sound.channel_count as u8)
            }
            _ => Ok(unit),
        }
    }

    /// Emit content packages while every interleaved track can
    /// contribute its element; with `flush`, remaining units drain and
    /// short audio is padded with silence.
    fn process_content_packages(&mut self, flush: bool) -> Result<()> {
        let interleaved: Vec<usize> = (0..self.tracks.len())
            .filter(|&i| self.tracks[i].is_frame_interleaved())
            .collect();
        if interleaved.is_empty() {
            return Ok(());
        }
        loop {
            let cp = self.cp_count;
            let all_ready = interleaved.iter().all(|&i| self.tracks[i].has_unit(cp));
            let any_frames = interleaved.iter().any(|&i| !self.tracks[i].frames.is_empty());
            let any_audio = interleaved
                .iter()
                .any(|&i| self.tracks[i].kind.is_sound() && !self.tracks[i].buffer.is_empty());
            let video_ready = interleaved
                .iter()
                .filter(|&&i| !self.tracks[i].kind.is_sound())
                .all(|&i| self.tracks[i].has_unit(cp));

            let emit = if flush {
                (any_frames || any_audio) && video_ready
            } else {
                all_ready
            };
            if !emit {
                if flush && any_audio && !video_ready {
                    log::warn!("dropping audio samples beyond the last video frame");
                    for &i in &interleaved {
                        self.tracks[i].buffer.clear();
                    }
                }
                return Ok(());
            }

            if self.body_packs.is_empty()
                || (self.config.partition_interval > 0
                    && self.cp_in_partition >= self.config.partition_interval)
            {
                self.open_body_partition()?;
            }

            self.cp_offsets.push(self.essence_stream_offset);
            for &i in &interleaved {
                let unit = self.tracks[i]
                    .take_unit(cp, flush)
                    .ok_or(MxfError::LogicError("content package under-run"))?;
                self.tracks[i].units_written += 1;
                if self.tracks[i].kind.is_sound() {
                    let block = self.tracks[i].block_align();
                    self.tracks[i].samples_written += (unit.len() / block) as i64;
                }
                let element = self.element_payload(i, unit)?;
                let key = self.tracks[i].element_key;
                KlvHeader::with_llen(key, 4, element.len() as u64).write_to(&mut self.file)?;
                self.file.write_all(&element)?;
                self.essence_stream_offset += 16 + 4 + element.len() as u64;
            }
            self.cp_count += 1;
            self.cp_in_partition += 1;
        }
    }

    /// Write the timed text body partition and its ancillary generic
    /// stream partitions.
    fn write_timed_text_partitions(&mut self) -> Result<()> {
        for i in 0..self.tracks.len() {
            let (manifest, document) = match &self.tracks[i].timed_text {
                Some((manifest, document)) => (manifest.clone(), document.clone()),
                None => continue,
            };

            self.open_partition(PartitionStatus::Closed, TIMED_TEXT_BODY_SID, 0)?;
            let key = self.tracks[i].element_key;
            KlvHeader::new(key, document.len() as u64).write_to(&mut self.file)?;
            self.file.write_all(&document)?;
            self.tracks[i].units_written = self.cp_count;

            for (n, resource) in manifest.ancillary_resources.iter().enumerate() {
                let sid = FIRST_GENERIC_STREAM_SID + n as u32;
                self.open_partition(PartitionStatus::GenericStream, sid, 0)?;
                KlvHeader::new(GENERIC_STREAM_DATA_KEY, resource.data.len() as u64)
                    .write_to(&mut self.file)?;
                self.file.write_all(&resource.data)?;
            }
        }
        Ok(())
    }

    fn build_index(&mut self) -> Result<IndexTableWriter> {
        // mpeg2 drives a reordered VBE index
        let edit_rate = self.edit_rate;
        if let Some(track) = self
            .tracks
            .iter_mut()
            .find(|t| matches!(t.kind, EssenceKind::Mpeg2Lg))
        {
            let helper = track
                .mpeg2
                .as_mut()
                .ok_or(MxfError::LogicError("mpeg2 helper missing"))?;
            helper.finalise()?;
            let entries = helper.take_entries();
            let mut index = IndexTableWriter::new_vbe(INDEX_SID, BODY_SID, edit_rate);
            for entry in entries {
                let offset = self
                    .cp_offsets
                    .get(entry.position as usize)
                    .copied()
                    .ok_or(MxfError::LogicError("index entry beyond essence"))?;
                index.add_entry(
                    entry.temporal_offset,
                    entry.key_frame_offset,
                    entry.flags,
                    offset,
                );
            }
            return Ok(index);
        }

        // clip-wrapped pcm indexes samples at the sampling rate
        if let Some(track) = self
            .tracks
            .iter()
            .find(|t| t.clip_wrapped && t.kind.is_sound())
        {
            let mut index = IndexTableWriter::new_cbe(
                INDEX_SID,
                BODY_SID,
                track.descriptor.sound.sampling_rate,
                track.block_align() as u32,
            );
            index.extend_cbe(track.samples_written);
            return Ok(index);
        }

        // constant spacing collapses to CBE, otherwise one VBE row per
        // content package
        let constant = self.cp_offsets.len() < 2
            || self
                .cp_offsets
                .windows(2)
                .all(|w| w[1] - w[0] == self.cp_offsets[1] - self.cp_offsets[0]);
        if constant {
            let unit = if self.cp_offsets.len() >= 2 {
                (self.cp_offsets[1] - self.cp_offsets[0]) as u32
            } else if self.cp_offsets.len() == 1 {
                (self.essence_stream_offset - self.cp_offsets[0]) as u32
            } else {
                0
            };
            let mut index = IndexTableWriter::new_cbe(INDEX_SID, BODY_SID, edit_rate, unit);
            index.extend_cbe(self.cp_count);
            Ok(index)
        } else {
            let mut index = IndexTableWriter::new_vbe(INDEX_SID, BODY_SID, edit_rate);
            for offset in &self.cp_offsets {
                index.add_entry(0, 0, INDEX_FLAG_RANDOM_ACCESS, *offset);
            }
            Ok(index)
        }
    }

    /// Update duration items and late descriptor items. All updated
    /// items are fixed size, so the in-place metadata rewrite cannot
    /// change the serialisation length.
    fn patch_metadata(&mut self) -> Result<()> {
        let mut clip_duration = self.cp_count;
        if clip_duration == 0 {
            // a clip-wrapped sound track carries the duration in samples
            if let Some(track) = self
                .tracks
                .iter()
                .find(|t| t.clip_wrapped && t.kind.is_sound())
            {
                let sampling = track.descriptor.sound.sampling_rate;
                let num = track.samples_written as i128
                    * self.edit_rate.num as i128
                    * sampling.den as i128;
                let den = sampling.num as i128 * self.edit_rate.den as i128;
                if den > 0 {
                    clip_duration = ((num + den - 1) / den) as i64;
                }
            }
        }
        let updates: Vec<(Uuid, Ul, i64)> = self
            .duration_items
            .iter()
            .map(|(uid, key, source)| {
                let value = match source {
                    DurationSource::Clip => clip_duration,
                    DurationSource::TrackUnits(i) => self.tracks[*i].units_written,
                    DurationSource::TrackSamples(i) => self.tracks[*i].samples_written,
                };
                (*uid, *key, value)
            })
            .collect();

        let hm = self
            .metadata
            .as_mut()
            .ok_or(MxfError::LogicError("no metadata"))?;
        for (uid, key, value) in updates {
            if let Some(set) = hm.get_mut(&uid) {
                set.set_i64(key, value);
            }
        }

        // sequences mirror their single component's duration
        let sequence_updates: Vec<(Uuid, i64)> = hm
            .sets()
            .filter(|set| set.key.matches(&SEQUENCE_SET_KEY))
            .filter_map(|set| {
                let components = set
                    .ref_array_item(&SEQUENCE_COMPONENTS_ITEM_KEY)
                    .ok()
                    .flatten()?;
                let duration = hm
                    .get(components.first()?)
                    .and_then(|c| c.i64_item(&COMPONENT_DURATION_ITEM_KEY).ok())
                    .flatten()?;
                Some((set.instance_uid, duration))
            })
            .collect();
        for (uid, duration) in sequence_updates {
            if let Some(set) = hm.get_mut(&uid) {
                set.set_i64(COMPONENT_DURATION_ITEM_KEY, duration);
            }
        }

        for i in 0..self.tracks.len() {
            if let Some(sub_uid) = self.tracks[i].avci_sub_uid {
                let header = self.tracks[i]
                    .avci
                    .as_ref()
                    .and_then(|helper| helper.header().map(|h| h.to_vec()));
                if let Some(header) = header {
                    let mut parser = AvcEssenceParser::new();
                    let sps = parser
                        .parse_frame_info(&header)
                        .ok()
                        .filter(|_| parser.info.have_sps)
                        .map(|_| parser.info.sps.clone());
                    let hm = self.metadata.as_mut().ok_or(MxfError::LogicError("no metadata"))?;
                    if let Some(set) = hm.get_mut(&sub_uid) {
                        set.set_item(AVC_FRAME_HEADER_BYTES_ITEM_KEY, header);
                        set.set_u8(AVC_SPS_FLAG_ITEM_KEY, 1);
                        set.set_u8(AVC_PPS_FLAG_ITEM_KEY, 1);
                        if let Some(sps) = sps {
                            set.set_u8(AVC_PROFILE_ITEM_KEY, sps.profile);
                            set.set_u8(AVC_PROFILE_CONSTRAINT_ITEM_KEY, sps.profile_constraint);
                            set.set_u8(AVC_LEVEL_ITEM_KEY, sps.level);
                        }
                    }
                }
            }
            if let Some(uid) = self.tracks[i].mpeg2_descriptor_uid {
                let (single, closed, low_delay, max_gop, b_count, profile, bit_rate) = {
                    let helper = self.tracks[i]
                        .mpeg2
                        .as_ref()
                        .ok_or(MxfError::LogicError("mpeg2 helper missing"))?;
                    (
                        helper.single_sequence,
                        helper.closed_gop_only,
                        helper.low_delay,
                        helper.max_gop,
                        helper.max_b_count,
                        helper.info().profile_and_level,
                        helper.info().bit_rate,
                    )
                };
                let hm = self.metadata.as_mut().ok_or(MxfError::LogicError("no metadata"))?;
                if let Some(set) = hm.get_mut(&uid) {
                    set.set_bool(MPEG2_SINGLE_SEQUENCE_ITEM_KEY, single);
                    set.set_bool(MPEG2_CLOSED_GOP_ITEM_KEY, closed);
                    set.set_bool(MPEG2_LOW_DELAY_ITEM_KEY, low_delay);
                    set.set_u16(MPEG2_MAX_GOP_ITEM_KEY, max_gop);
                    set.set_u16(MPEG2_B_PICTURE_COUNT_ITEM_KEY, b_count);
                    set.set_u8(MPEG2_PROFILE_AND_LEVEL_ITEM_KEY, profile);
                    set.set_u32(MPEG2_BIT_RATE_ITEM_KEY, bit_rate);
                }
            }
        }
        Ok(())
    }

    /// Finalise the clip: flush pending content packages, write the
    /// footer with the index (and metadata per policy), back-patch the
    /// header, and close all partition packs.
    pub fn complete(&mut self) -> Result<()> {
        if self.state != WriterState::Writing {
            return Err(MxfError::LogicError("clip writer not prepared"));
        }

        self.process_content_packages(true)?;

        let clip_patches: Vec<(u64, Ul, u64)> = self
            .tracks
            .iter()
            .filter(|t| t.kind.is_sound())
            .filter_map(|t| {
                t.clip_klv_offset.map(|offset| {
                    (
                        offset,
                        t.element_key,
                        t.samples_written as u64 * t.block_align() as u64,
                    )
                })
            })
            .collect();
        if !clip_patches.is_empty() && !self.file.is_seekable() {
            return Err(MxfError::LogicError("clip wrapping requires a seekable file"));
        }

        self.write_timed_text_partitions()?;

        let index = self.build_index()?;
        self.patch_metadata()?;

        // footer partition
        self.pad_partition_to_kag()?;
        let footer_offset = self.file.position()?;
        let mut footer = PartitionPack::new(PartitionKind::Footer, PartitionStatus::ClosedComplete);
        footer.kag_size = self.config.kag_size;
        footer.this_partition = footer_offset;
        footer.previous_partition = self.previous_partition_offset();
        footer.footer_partition = footer_offset;
        footer.index_sid = INDEX_SID;
        footer.operational_pattern = OP_1A;
        footer.essence_containers = self.essence_containers();

        let metadata_in_footer = match self.config.footer_metadata {
            FooterMetadata::Always => true,
            FooterMetadata::Never => false,
            FooterMetadata::IfOpenHeader => !self.file.is_seekable(),
        };

        let mut body = MemoryFile::new();
        let mut header_byte_count = 0;
        if metadata_in_footer {
            let len = self
                .metadata
                .as_ref()
                .ok_or(MxfError::LogicError("no metadata"))?
                .write(&mut body)?;
            let fill = kag_fill_size(footer.write_size() + len, self.config.kag_size);
            if fill > 0 {
                klv::write_fill(&mut body, fill)?;
            }
            header_byte_count = len + fill;
        }
        let mut index_byte_count = 0;
        for segment in index.segments() {
            let mut bytes = Vec::new();
            segment.write_to(&mut bytes)?;
            Write::write_all(&mut body, &bytes)?;
            index_byte_count += bytes.len() as u64;
        }
        let fill = kag_fill_size(
            footer.write_size() + header_byte_count + index_byte_count,
            self.config.kag_size,
        );
        if fill > 0 {
            klv::write_fill(&mut body, fill)?;
            index_byte_count += fill;
        }
        footer.header_byte_count = header_byte_count;
        footer.index_byte_count = index_byte_count;

        footer.write_to(&mut self.file)?;
        self.file.write_all(&body.into_data())?;

        if self.config.write_rip {
            let mut rip = RandomIndexPack::new();
            rip.add(0, 0);
            for (offset, pack) in &self.body_packs {
                rip.add(pack.body_sid, *offset);
            }
            rip.add(0, footer_offset);
            rip.write_to(&mut self.file)?;
        }

        if self.file.is_seekable() {
            self.back_patch(footer_offset, clip_patches)?;
        }

        self.state = WriterState::Finalised;
        Ok(())
    }

    fn back_patch(&mut self, footer_offset: u64, clip_patches: Vec<(u64, Ul, u64)>) -> Result<()> {
        for (offset, key, len) in clip_patches {
            self.file.seek(SeekFrom::Start(offset))?;
            KlvHeader::with_llen(key, 9, len).write_to(&mut self.file)?;
        }

        // rewrite the header metadata with the final durations; the
        // length must be unchanged because only fixed-size items changed
        let mut buffer = MemoryFile::new();
        let len = self
            .metadata
            .as_ref()
            .ok_or(MxfError::LogicError("no metadata"))?
            .write(&mut buffer)?;
        if len != self.metadata_len {
            return Err(MxfError::LogicError("metadata length changed at finalise"));
        }
        self.file.seek(SeekFrom::Start(self.metadata_start))?;
        self.file.write_all(&buffer.into_data())?;

        if let Some(pack) = self.header_pack.as_mut() {
            pack.status = PartitionStatus::ClosedComplete;
            pack.footer_partition = footer_offset;
            self.file.seek(SeekFrom::Start(0))?;
            pack.write_to(&mut self.file)?;
        }

        let mut body_packs = std::mem::take(&mut self.body_packs);
        for (offset, pack) in body_packs.iter_mut() {
            if pack.status != PartitionStatus::GenericStream {
                pack.status = PartitionStatus::ClosedComplete;
            }
            pack.footer_partition = footer_offset;
            self.file.seek(SeekFrom::Start(*offset))?;
            pack.write_to(&mut self.file)?;
        }
        self.body_packs = body_packs;

        self.file.seek(SeekFrom::End(0))?;
        self.file.flush()?;
        Ok(())
    }
}

fn build_sequence(hm: &mut HeaderMetadata, data_def: Ul, components: &[Uuid]) -> Uuid {
    let mut sequence = MetadataSet::new(SEQUENCE_SET_KEY);
    sequence.set_ul(COMPONENT_DATA_DEFINITION_ITEM_KEY, &data_def);
    sequence.set_i64(COMPONENT_DURATION_ITEM_KEY, -1);
    sequence.set_ref_array(SEQUENCE_COMPONENTS_ITEM_KEY, components);
    hm.add_set(sequence)
}
