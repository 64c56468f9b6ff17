//! Clip reading: partition discovery, essence chunk indexing, index
//! table resolution and per-track random access.

mod sequence;

pub use sequence::SequenceReader;

use crate::descriptor::{element_track_number, parse_file_descriptor, DescriptorInfo};
use crate::error::MxfError;
use crate::essence::avc::has_frame_header;
use crate::essence::pcm::{aes3_to_mc_pcm, sample_sequence, sequence_total};
use crate::index::{IndexSegments, IndexTableSegment, IndexedEntry};
use crate::klv::KlvHeader;
use crate::labels::*;
use crate::metadata::HeaderMetadata;
use crate::model::keys::*;
use crate::model::{baseline, DataModel};
use crate::partition::{PartitionKind, PartitionPack, RandomIndexPack};
use crate::prelude::*;
use crate::file::MxfFile;
use crate::types::{Position, Rational, Ul, Umid};
use crate::utils;
use std::collections::HashMap;
use std::io::{Cursor, Read, SeekFrom};

/// Longest permitted run-in before the header partition pack.
const MAX_RUN_IN: usize = 0x10000;

/// A contiguous run of essence element KLVs in one body partition.
#[derive(Clone, Debug)]
pub struct EssenceChunk {
    pub file_position: u64,
    pub essence_offset: u64,
    pub size: u64,
    pub is_complete: bool,
    pub partition_id: usize,
    pub element_key: Ul,
}

/// Chunks ordered by essence offset, translating stream offsets to file
/// positions.
#[derive(Default)]
pub struct EssenceChunkIndex {
    chunks: Vec<EssenceChunk>,
}

impl EssenceChunkIndex {
    pub fn chunks(&self) -> &[EssenceChunk] {
        &self.chunks
    }

    pub fn total_size(&self) -> u64 {
        self.chunks.iter().map(|c| c.size).sum()
    }

    pub fn complete_size(&self) -> u64 {
        self.chunks
            .iter()
            .filter(|c| c.is_complete)
            .map(|c| c.size)
            .sum()
    }

    fn append(&mut self, chunk: EssenceChunk) {
        self.chunks.push(chunk);
        self.chunks.sort_by_key(|c| c.essence_offset);
    }

    /// Translate an essence stream offset to a file position. A
    /// position exactly on a chunk boundary resolves to the later chunk
    /// when that chunk is complete.
    pub fn file_position(&self, essence_offset: u64) -> Result<(u64, &EssenceChunk)> {
        let at = self
            .chunks
            .partition_point(|c| c.essence_offset <= essence_offset);
        if at == 0 {
            return Err(MxfError::LogicError("essence offset before first chunk"));
        }
        let chunk = &self.chunks[at - 1];
        if essence_offset >= chunk.essence_offset + chunk.size {
            return Err(MxfError::LogicError("essence offset beyond indexed chunks"));
        }
        Ok((
            chunk.file_position + (essence_offset - chunk.essence_offset),
            chunk,
        ))
    }
}

/// Reader-facing description of one track.
#[derive(Clone, Debug)]
pub struct TrackInfo {
    pub track_id: u32,
    pub track_number: u32,
    pub track_name: Option<String>,
    pub edit_rate: Rational,
    pub origin: i64,
    pub duration: i64,
    pub data_definition: Ul,
    pub element_key: Ul,
    pub body_sid: u32,
    pub clip_wrapped: bool,
    pub descriptor: DescriptorInfo,
    /// Prepend the cached elementary header to frames that lack it.
    pub prepend_frame_header: bool,
    sample_sequence: Vec<u32>,
}

/// Start timecode of the material package.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StartTimecode {
    pub start: i64,
    pub base: u16,
    pub drop_frame: bool,
}

pub struct ClipReader<F: MxfFile> {
    file: F,
    pub metadata: HeaderMetadata,
    partitions: Vec<(u64, PartitionPack)>,
    chunks: HashMap<u32, EssenceChunkIndex>,
    index: IndexSegments,
    tracks: Vec<TrackInfo>,
    positions: Vec<Position>,
    duration: i64,
    edit_rate: Rational,
    material_umid: Umid,
    start_timecode: Option<StartTimecode>,
    incomplete: bool,
    body_sid: u32,
}

impl<F: MxfFile> ClipReader<F> {
    pub fn open(file: F) -> Result<ClipReader<F>> {
        ClipReader::open_with_model(file, baseline())
    }

    pub fn open_with_model(mut file: F, model: &'static DataModel) -> Result<ClipReader<F>> {
        let run_in = find_header_partition(&mut file)?;
        let mut incomplete = false;

        let partitions = match read_partitions_via_rip(&mut file, run_in) {
            Ok(Some(partitions)) => partitions,
            _ => {
                let (partitions, truncated) = scan_partitions(&mut file, run_in)?;
                incomplete = truncated;
                partitions
            }
        };
        if partitions.is_empty() {
            return Err(MxfError::malformed(run_in, "no partition packs found"));
        }
        if !partitions
            .iter()
            .any(|(_, p)| p.kind == PartitionKind::Footer)
        {
            incomplete = true;
        }

        let metadata = read_best_metadata(&mut file, model, &partitions)?;

        // essence stream ids from the essence container data sets
        let mut body_sid = 0;
        let mut index_sid = 0;
        for set in metadata.sets_of_type(&ESSENCE_CONTAINER_DATA_SET_KEY) {
            let sid = set.u32_item(&ECD_BODY_SID_ITEM_KEY)?.unwrap_or(0);
            let isid = set.u32_item(&ECD_INDEX_SID_ITEM_KEY)?.unwrap_or(0);
            if isid != 0 || body_sid == 0 {
                body_sid = sid;
            }
            if isid != 0 {
                index_sid = isid;
            }
        }
        if body_sid == 0 {
            body_sid = partitions
                .iter()
                .find(|(_, p)| p.kind == PartitionKind::Body && p.body_sid != 0)
                .map(|(_, p)| p.body_sid)
                .unwrap_or(1);
        }

        let (chunks, index, scan_truncated) =
            scan_essence_and_index(&mut file, &partitions, index_sid)?;
        if scan_truncated {
            incomplete = true;
        }

        let mut reader = ClipReader {
            file,
            metadata,
            partitions,
            chunks,
            index,
            tracks: Vec::new(),
            positions: Vec::new(),
            duration: 0,
            edit_rate: Rational::new(25, 1),
            material_umid: Umid::null(),
            start_timecode: None,
            incomplete,
            body_sid,
        };
        reader.build_tracks()?;
        reader.resolve_duration()?;
        reader.positions = vec![0; reader.tracks.len()];
        Ok(reader)
    }

    pub fn tracks(&self) -> &[TrackInfo] {
        &self.tracks
    }

    pub fn duration(&self) -> i64 {
        self.duration
    }

    pub fn edit_rate(&self) -> Rational {
        self.edit_rate
    }

    pub fn material_umid(&self) -> Umid {
        self.material_umid
    }

    pub fn start_timecode(&self) -> Option<StartTimecode> {
        self.start_timecode
    }

    /// True when the file ends in an open or truncated partition; the
    /// complete partitions remain readable.
    pub fn is_incomplete(&self) -> bool {
        self.incomplete
    }

    pub fn partitions(&self) -> &[(u64, PartitionPack)] {
        &self.partitions
    }

    pub fn track_reader(&mut self, track: usize) -> TrackReader<'_, F> {
        TrackReader { clip: self, track }
    }

    pub fn index_entry(&self, position: Position) -> Result<IndexedEntry> {
        self.index.entry(position)
    }

    fn build_tracks(&mut self) -> Result<()> {
        let material = self
            .metadata
            .sets_of_type(&MATERIAL_PACKAGE_SET_KEY)
            .next()
            .ok_or(MxfError::malformed(0, "no material package"))?;
        self.material_umid = material
            .umid_item(&PACKAGE_UID_ITEM_KEY)?
            .unwrap_or(Umid::null());
        let file_package = self
            .metadata
            .sets_of_type(&SOURCE_PACKAGE_SET_KEY)
            .next()
            .ok_or(MxfError::malformed(0, "no file source package"))?;

        // descriptors by linked track id
        let mut descriptors: HashMap<u32, DescriptorInfo> = HashMap::new();
        if let Some(descriptor_uid) = file_package.ref_item(&PACKAGE_DESCRIPTOR_ITEM_KEY)? {
            if let Some(descriptor) = self.metadata.get(&descriptor_uid) {
                if descriptor.key.matches(&MULTIPLE_DESCRIPTOR_SET_KEY) {
                    for uid in descriptor
                        .ref_array_item(&MD_SUB_DESCRIPTOR_UIDS_ITEM_KEY)?
                        .unwrap_or_default()
                    {
                        if let Some(sub) = self.metadata.get(&uid) {
                            let info = parse_file_descriptor(&self.metadata, sub)?;
                            if let Some(id) = info.linked_track_id {
                                descriptors.insert(id, info);
                            }
                        }
                    }
                } else {
                    let info = parse_file_descriptor(&self.metadata, descriptor)?;
                    descriptors.insert(info.linked_track_id.unwrap_or(0), info);
                }
            }
        }

        // the material package timecode track gives the start timecode
        for track_uid in material
            .ref_array_item(&PACKAGE_TRACKS_ITEM_KEY)?
            .unwrap_or_default()
        {
            let track = match self.metadata.get(&track_uid) {
                Some(track) => track,
                None => continue,
            };
            let sequence = match track
                .ref_item(&TRACK_SEQUENCE_ITEM_KEY)?
                .and_then(|uid| self.metadata.get(&uid))
            {
                Some(sequence) => sequence,
                None => continue,
            };
            for component_uid in sequence
                .ref_array_item(&SEQUENCE_COMPONENTS_ITEM_KEY)?
                .unwrap_or_default()
            {
                if let Some(component) = self.metadata.get(&component_uid) {
                    if component.key.matches(&TIMECODE_COMPONENT_SET_KEY) {
                        self.start_timecode = Some(StartTimecode {
                            start: component.i64_item(&TIMECODE_START_ITEM_KEY)?.unwrap_or(0),
                            base: component.u16_item(&TIMECODE_BASE_ITEM_KEY)?.unwrap_or(25),
                            drop_frame: component
                                .bool_item(&TIMECODE_DROP_FRAME_ITEM_KEY)?
                                .unwrap_or(false),
                        });
                    }
                }
            }
        }

        for track_uid in file_package
            .ref_array_item(&PACKAGE_TRACKS_ITEM_KEY)?
            .unwrap_or_default()
        {
            let track = match self.metadata.get(&track_uid) {
                Some(track) => track,
                None => continue,
            };
            if !track.key.matches(&TIMELINE_TRACK_SET_KEY) {
                continue;
            }
            let track_id = track.u32_item(&TRACK_ID_ITEM_KEY)?.unwrap_or(0);
            let track_number = track.u32_item(&TRACK_NUMBER_ITEM_KEY)?.unwrap_or(0);
            if track_number == 0 {
                continue; // timecode or descriptive track
            }
            let edit_rate = track
                .rational_item(&TRACK_EDIT_RATE_ITEM_KEY)?
                .ok_or(MxfError::malformed(0, "track missing edit rate"))?;
            let origin = track.i64_item(&TRACK_ORIGIN_ITEM_KEY)?.unwrap_or(0);
            let track_name = track.string_item(&TRACK_NAME_ITEM_KEY)?;

            let (data_definition, duration) = {
                let mut data_def = Ul::null();
                let mut duration = -1;
                if let Some(sequence) = track
                    .ref_item(&TRACK_SEQUENCE_ITEM_KEY)?
                    .and_then(|uid| self.metadata.get(&uid))
                {
                    data_def = sequence
                        .ul_item(&COMPONENT_DATA_DEFINITION_ITEM_KEY)?
                        .unwrap_or(Ul::null());
                    duration = sequence
                        .i64_item(&COMPONENT_DURATION_ITEM_KEY)?
                        .unwrap_or(-1);
                }
                (data_def, duration)
            };

            let descriptor = match descriptors.get(&track_id) {
                Some(info) => info.clone(),
                None => match descriptors.values().next() {
                    Some(info) if descriptors.len() == 1 => info.clone(),
                    _ => continue,
                },
            };

            let mut element_key = ESSENCE_ELEMENT_BASE_KEY;
            element_key.0[12..].copy_from_slice(&track_number.to_be_bytes());

            // clip wrapping is flagged in the essence container label
            let clip_wrapped = descriptor.essence_container.0[14] == 0x02
                || descriptor
                    .essence_container
                    .matches(&EC_TIMED_TEXT_CLIP_WRAPPED);
            let body_sid = if descriptor
                .essence_container
                .matches(&EC_TIMED_TEXT_CLIP_WRAPPED)
            {
                crate::writer::TIMED_TEXT_BODY_SID
            } else {
                self.body_sid
            };

            let sample_seq = if descriptor.is_sound && !clip_wrapped {
                let sampling = descriptor
                    .sampling_rate
                    .unwrap_or(Rational::new(48000, 1));
                sample_sequence(edit_rate, sampling).unwrap_or_default()
            } else {
                Vec::new()
            };

            self.tracks.push(TrackInfo {
                track_id,
                track_number,
                track_name,
                edit_rate,
                origin,
                duration,
                data_definition,
                element_key,
                body_sid,
                clip_wrapped,
                descriptor,
                prepend_frame_header: false,
                sample_sequence: sample_seq,
            });
        }

        if self.tracks.is_empty() {
            return Err(MxfError::malformed(0, "no essence tracks"));
        }
        self.edit_rate = self
            .tracks
            .iter()
            .find(|t| !t.clip_wrapped)
            .map(|t| t.edit_rate)
            .unwrap_or(self.tracks[0].edit_rate);
        Ok(())
    }

    /// Duration from the index, with a salvage fallback that derives a
    /// constant edit-unit size by scanning the first content package.
    fn resolve_duration(&mut self) -> Result<()> {
        if !self.index.is_empty() {
            self.index.validate()?;
            self.duration = self.index.duration();
            // clip-wrapped pcm indexes samples, not edit units
            if let Some(i) = self
                .tracks
                .iter()
                .position(|t| t.clip_wrapped && t.descriptor.is_sound)
            {
                let sampling = self.tracks[i]
                    .descriptor
                    .sampling_rate
                    .unwrap_or(Rational::new(48000, 1));
                let samples = self.duration;
                let edit_rate = self.tracks[i].edit_rate;
                self.tracks[i].duration = samples;
                self.duration = samples_to_units(samples, sampling, edit_rate);
            }
        } else if let Some(chunks) = self.chunks.get(&self.body_sid) {
            let first_position = chunks.chunks().first().map(|c| c.file_position);
            let complete_size = chunks.complete_size();
            if let Some(first_position) = first_position {
                let (unit, mut segment) = self.derive_cbe(first_position)?;
                if unit > 0 {
                    self.duration = complete_size as i64 / unit as i64;
                    segment.index_duration = self.duration;
                    self.index.add(segment);
                }
            }
        }

        for track in &mut self.tracks {
            if track.duration < 0 {
                track.duration = self.duration;
            }
        }
        Ok(())
    }

    /// Scan one content package and return its byte span as the derived
    /// constant edit unit size.
    fn derive_cbe(&mut self, start: u64) -> Result<(u32, IndexTableSegment)> {
        self.file.seek(SeekFrom::Start(start))?;
        let mut seen: Vec<Ul> = Vec::new();
        let mut size: u64 = 0;
        loop {
            let header = match KlvHeader::from_reader(&mut self.file) {
                Ok(header) => header,
                Err(_) => break,
            };
            if element_track_number(&header.key).is_none() || seen.contains(&header.key) {
                break;
            }
            seen.push(header.key);
            size += header.header_size() + header.len;
            self.file.seek(SeekFrom::Current(header.len as i64))?;
        }
        let mut segment = IndexTableSegment::new(0, self.body_sid, self.edit_rate);
        segment.edit_unit_byte_count = size as u32;
        Ok((size as u32, segment))
    }

    fn read_at(&mut self, position: u64, len: usize) -> Result<Vec<u8>> {
        self.file.seek(SeekFrom::Start(position))?;
        utils::take(&mut self.file, len)
            .map_err(|e| MxfError::from(e).at_eof(position))
    }

    /// Read one edit unit's element payload for `track`.
    fn read_element(&mut self, track: usize, position: Position) -> Result<Vec<u8>> {
        let entry = self.index.entry(position)?;
        let chunks = self
            .chunks
            .get(&self.tracks[track].body_sid)
            .ok_or(MxfError::LogicError("no essence for stream"))?;
        let (file_pos, chunk) = chunks.file_position(entry.stream_offset)?;
        let available = chunk.size - (file_pos - chunk.file_position);
        let span = entry.size.unwrap_or(available).min(available) as usize;
        let element_key = self.tracks[track].element_key;
        let bytes = self.read_at(file_pos, span)?;

        // walk the content package for this track's element
        let mut cursor = Cursor::new(bytes.as_slice());
        while (cursor.position() as usize) < span {
            let header = KlvHeader::from_reader(&mut cursor)?;
            let value_at = cursor.position() as usize;
            let value_end = value_at + header.len as usize;
            if value_end > span {
                return Err(MxfError::UnexpectedEof(file_pos + value_at as u64));
            }
            if header.key.matches(&element_key) {
                let mut data = bytes[value_at..value_end].to_vec();
                if self.tracks[track].prepend_frame_header {
                    if let Some(frame_header) = &self.tracks[track].descriptor.frame_header {
                        if !has_frame_header(&data) {
                            let mut full =
                                Vec::with_capacity(frame_header.len() + data.len());
                            full.extend_from_slice(frame_header);
                            full.extend_from_slice(&data);
                            data = full;
                        }
                    }
                }
                return Ok(data);
            }
            cursor.set_position(value_end as u64);
        }
        Err(MxfError::malformed(file_pos, "track element not in content package"))
    }

    /// Read a generic stream payload (e.g. a timed text ancillary
    /// resource) by its stream id.
    pub fn read_generic_stream(&mut self, body_sid: u32) -> Result<Vec<u8>> {
        let (file_position, size) = {
            let chunk = self
                .chunks
                .get(&body_sid)
                .and_then(|index| index.chunks().first())
                .ok_or(MxfError::LogicError("no such generic stream"))?;
            (chunk.file_position, chunk.size)
        };
        let bytes = self.read_at(file_position, size as usize)?;
        let mut cursor = Cursor::new(bytes.as_slice());
        let header = KlvHeader::from_reader(&mut cursor)?;
        let at = header.header_size() as usize;
        Ok(bytes[at..at + header.len as usize].to_vec())
    }

    /// Read `count` samples for a clip-wrapped track starting at the
    /// track cursor.
    fn read_clip_wrapped(&mut self, track: usize, position: i64, count: u64) -> Result<Vec<u8>> {
        let chunks = self
            .chunks
            .get(&self.tracks[track].body_sid)
            .ok_or(MxfError::LogicError("no essence for stream"))?;
        let chunk = chunks
            .chunks()
            .first()
            .ok_or(MxfError::LogicError("no essence for stream"))?;
        let chunk_pos = chunk.file_position;
        let chunk_size = chunk.size;

        let header_bytes = self.read_at(chunk_pos, 25)?;
        let header = KlvHeader::from_reader(&mut Cursor::new(&header_bytes))?;
        let value_start = chunk_pos + header.header_size();

        let unit = if self.tracks[track].descriptor.is_sound {
            self.tracks[track].descriptor.block_align.unwrap_or(1) as u64
        } else {
            1
        };
        let value_size = chunk_size.saturating_sub(header.header_size());
        let start_byte = position as u64 * unit;
        let len = (count * unit).min(value_size.saturating_sub(start_byte));
        self.read_at(value_start + start_byte, len as usize)
    }
}

/// Cursor over one track of an open clip.
pub struct TrackReader<'a, F: MxfFile> {
    clip: &'a mut ClipReader<F>,
    track: usize,
}

impl<'a, F: MxfFile> TrackReader<'a, F> {
    pub fn info(&self) -> &TrackInfo {
        &self.clip.tracks[self.track]
    }

    pub fn position(&self) -> Position {
        self.clip.positions[self.track]
    }

    pub fn seek(&mut self, position: Position) {
        self.clip.positions[self.track] = position;
    }

    pub fn set_prepend_frame_header(&mut self, enable: bool) {
        self.clip.tracks[self.track].prepend_frame_header = enable;
    }

    pub fn index_entry(&self, position: Position) -> Result<IndexedEntry> {
        self.clip.index.entry(position)
    }

    /// Edit units before `position` required for a correct decode.
    pub fn precharge(&self, position: Position) -> i64 {
        self.clip.index.precharge(position)
    }

    /// Edit units after `position` required for a correct decode.
    pub fn rollout(&self, position: Position) -> i64 {
        self.clip.index.rollout(position)
    }

    /// Read `count` samples from the track cursor: frames for picture
    /// and data tracks, PCM sample frames for sound tracks.
    pub fn read(&mut self, count: u64) -> Result<Vec<u8>> {
        let position = self.clip.positions[self.track];
        let info = &self.clip.tracks[self.track];

        if info.clip_wrapped {
            let data = self.clip.read_clip_wrapped(self.track, position, count)?;
            self.clip.positions[self.track] = position + count as i64;
            return Ok(data);
        }

        if info.descriptor.is_sound {
            let sequence = info.sample_sequence.clone();
            let block = info.descriptor.block_align.unwrap_or(1) as usize;
            let aes3 = info
                .descriptor
                .essence_container
                .matches(&EC_AES3_FRAME_WRAPPED);
            let bits = info.descriptor.quantization_bits.unwrap_or(16);
            let channels = info.descriptor.channel_count.unwrap_or(1) as u8;
            let mut out = Vec::new();
            let mut sample = position;
            let mut remaining = count as i64;
            while remaining > 0 {
                let (unit, unit_start) = unit_for_sample(&sequence, sample);
                let mut element = self.clip.read_element(self.track, unit)?;
                if aes3 {
                    element = aes3_to_mc_pcm(&element, bits, channels)?;
                }
                let in_unit = (sample - unit_start) as usize;
                let have = (element.len() / block).saturating_sub(in_unit);
                let take = (remaining as usize).min(have);
                if take == 0 {
                    return Err(MxfError::UnexpectedEof(0));
                }
                let at = in_unit * block;
                out.extend_from_slice(&element[at..at + take * block]);
                sample += take as i64;
                remaining -= take as i64;
            }
            self.clip.positions[self.track] = sample;
            return Ok(out);
        }

        let mut out = Vec::new();
        for p in position..position + count as i64 {
            out.extend(self.clip.read_element(self.track, p)?);
        }
        self.clip.positions[self.track] = position + count as i64;
        Ok(out)
    }
}

/// Edit unit containing `sample` plus that unit's first sample number.
fn unit_for_sample(sequence: &[u32], sample: i64) -> (Position, i64) {
    if sequence.is_empty() {
        return (sample, sample);
    }
    let total = sequence_total(sequence) as i64;
    let cycle_len = sequence.len() as i64;
    let cycle = sample / total;
    let mut unit = cycle * cycle_len;
    let mut start = cycle * total;
    loop {
        let size = sequence[(unit % cycle_len) as usize] as i64;
        if sample < start + size {
            return (unit, start);
        }
        start += size;
        unit += 1;
    }
}

fn samples_to_units(samples: i64, sampling: Rational, edit_rate: Rational) -> i64 {
    // ceil(samples * edit_rate / sampling)
    let num = samples as i128 * edit_rate.num as i128 * sampling.den as i128;
    let den = sampling.num as i128 * edit_rate.den as i128;
    ((num + den - 1) / den) as i64
}

/// Locate the header partition pack, tolerating a run-in.
fn find_header_partition<F: MxfFile>(file: &mut F) -> Result<u64> {
    file.seek(SeekFrom::Start(0))?;
    let mut buf = vec![0u8; MAX_RUN_IN + 16];
    let mut filled = 0;
    while filled < buf.len() {
        let n = file.read(&mut buf[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    buf.truncate(filled);
    if filled < 16 {
        return Err(MxfError::UnexpectedEof(filled as u64));
    }
    for at in 0..=filled.saturating_sub(16) {
        let key = Ul::new(buf[at..at + 16].try_into().expect("slice length"));
        if key.matches_prefix(&PARTITION_PACK_PREFIX) {
            return Ok(at as u64);
        }
    }
    Err(MxfError::malformed(0, "no partition pack key found"))
}

fn read_partition_at<F: MxfFile>(file: &mut F, offset: u64) -> Result<PartitionPack> {
    file.seek(SeekFrom::Start(offset))?;
    let header = KlvHeader::from_reader(file).map_err(|e| e.at_eof(offset))?;
    if !header.is_partition_pack() {
        return Err(MxfError::malformed(offset, "expected partition pack"));
    }
    PartitionPack::read_value(&header, file)
}

/// Enumerate partitions through the random index pack, verifying that
/// every listed offset holds a partition pack.
fn read_partitions_via_rip<F: MxfFile>(
    file: &mut F,
    run_in: u64,
) -> Result<Option<Vec<(u64, PartitionPack)>>> {
    if !file.is_seekable() {
        return Ok(None);
    }
    let size = file.size()?;
    if size < run_in + 4 {
        return Ok(None);
    }
    file.seek(SeekFrom::Start(size - 4))?;
    let mut tail = [0u8; 4];
    file.read_exact(&mut tail)?;
    let rip_len = u32::from_be_bytes(tail) as u64;
    if rip_len < 20 || rip_len > size - run_in {
        return Ok(None);
    }
    file.seek(SeekFrom::Start(size - rip_len))?;
    let header = KlvHeader::from_reader(file)?;
    if !header.key.matches(&RANDOM_INDEX_PACK_KEY) {
        return Ok(None);
    }
    let rip = RandomIndexPack::read_value(&header, file)?;

    let mut partitions = Vec::new();
    for entry in &rip.entries {
        let pack = read_partition_at(file, run_in + entry.offset)?;
        partitions.push((run_in + entry.offset, pack));
    }
    Ok(Some(partitions))
}

/// Forward scan over all KLVs, collecting partition packs. Returns the
/// partitions and whether the file ended mid-element.
fn scan_partitions<F: MxfFile>(
    file: &mut F,
    run_in: u64,
) -> Result<(Vec<(u64, PartitionPack)>, bool)> {
    let mut partitions = Vec::new();
    let mut offset = run_in;
    let size = file.size()?;
    let mut truncated = false;
    while offset < size {
        file.seek(SeekFrom::Start(offset))?;
        let header = match KlvHeader::from_reader(file) {
            Ok(header) => header,
            Err(_) => {
                truncated = true;
                break;
            }
        };
        if header.is_partition_pack() {
            match PartitionPack::read_value(&header, file) {
                Ok(pack) => partitions.push((offset, pack)),
                Err(_) => {
                    truncated = true;
                    break;
                }
            }
        }
        let next = offset + header.header_size() + header.len;
        if next > size {
            truncated = true;
            break;
        }
        offset = next;
    }
    Ok((partitions, truncated))
}

/// Pick the partition to load header metadata from: a closed header
/// partition, else a footer carrying metadata, else the header as-is.
fn read_best_metadata<F: MxfFile>(
    file: &mut F,
    model: &'static DataModel,
    partitions: &[(u64, PartitionPack)],
) -> Result<HeaderMetadata> {
    let header = partitions
        .iter()
        .find(|(_, p)| p.kind == PartitionKind::Header);
    let footer = partitions
        .iter()
        .find(|(_, p)| p.kind == PartitionKind::Footer && p.header_byte_count > 0);

    let (offset, pack) = match (header, footer) {
        (Some((o, p)), _) if p.status.is_closed() && p.header_byte_count > 0 => (*o, p),
        (_, Some((o, p))) => (*o, p),
        (Some((o, p)), None) if p.header_byte_count > 0 => (*o, p),
        _ => return Err(MxfError::malformed(0, "no header metadata in file")),
    };

    file.seek(SeekFrom::Start(offset))?;
    let klv = KlvHeader::from_reader(file)?;
    utils::skip(file, klv.len)?;
    HeaderMetadata::read(file, model, pack.header_byte_count, None)
}

/// One pass over every partition: index table segments for `index_sid`
/// and essence chunks per body stream id.
#[allow(clippy::type_complexity)]
fn scan_essence_and_index<F: MxfFile>(
    file: &mut F,
    partitions: &[(u64, PartitionPack)],
    index_sid: u32,
) -> Result<(HashMap<u32, EssenceChunkIndex>, IndexSegments, bool)> {
    let mut chunks: HashMap<u32, EssenceChunkIndex> = HashMap::new();
    let mut index = IndexSegments::new();
    let file_size = file.size()?;
    let mut truncated = false;

    for (id, (offset, pack)) in partitions.iter().enumerate() {
        let end = partitions
            .iter()
            .map(|(o, _)| *o)
            .filter(|o| o > offset)
            .min()
            .unwrap_or(file_size);

        file.seek(SeekFrom::Start(*offset))?;
        let pack_header = KlvHeader::from_reader(file)?;
        utils::skip(file, pack_header.len)?;
        let mut at = *offset + pack_header.header_size() + pack_header.len;

        let mut chunk: Option<EssenceChunk> = None;
        while at < end {
            file.seek(SeekFrom::Start(at))?;
            let header = match KlvHeader::from_reader(file) {
                Ok(header) => header,
                Err(_) => {
                    truncated = true;
                    break;
                }
            };
            let next = at + header.header_size() + header.len;

            if header.key.matches(&INDEX_TABLE_SEGMENT_KEY) {
                match IndexTableSegment::read_value(&header, file) {
                    Ok(segment) => {
                        if index_sid == 0 || segment.index_sid == index_sid {
                            index.add(segment);
                        }
                    }
                    Err(_) => {
                        truncated = true;
                        break;
                    }
                }
            } else if element_track_number(&header.key).is_some()
                || header.key.matches(&GENERIC_STREAM_DATA_KEY)
            {
                let complete = next <= file_size;
                let span = if complete {
                    header.header_size() + header.len
                } else {
                    file_size - at
                };
                match chunk.as_mut() {
                    Some(chunk) => {
                        chunk.size += span;
                        chunk.is_complete &= complete;
                    }
                    None => {
                        chunk = Some(EssenceChunk {
                            file_position: at,
                            essence_offset: pack.body_offset,
                            size: span,
                            is_complete: complete,
                            partition_id: id,
                            element_key: header.key,
                        });
                    }
                }
                if !complete {
                    truncated = true;
                    break;
                }
            }
            if next > end {
                if next > file_size {
                    truncated = true;
                }
                break;
            }
            at = next;
        }

        if let Some(chunk) = chunk {
            chunks.entry(pack.body_sid).or_default().append(chunk);
        }
    }
    Ok((chunks, index, truncated))
}
