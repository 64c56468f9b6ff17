//! Descriptor helpers: map codec parameters to file descriptor sets and
//! back, and pick essence container labels and element keys per kind.

use crate::error::MxfError;
use crate::essence::avc::AvciClass;
use crate::essence::dv::DvVariant;
use crate::labels::*;
use crate::metadata::{HeaderMetadata, MetadataSet};
use crate::model::keys::*;
use crate::prelude::*;
use crate::types::{Rational, TrackNumber, Ul};
use uuid::Uuid;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EssenceKind {
    AvcI(AvciClass),
    Mpeg2Lg,
    Dv(DvVariant),
    Vc2,
    Vc3,
    Jpeg2000,
    JpegXs,
    UncVideo,
    Pcm,
    Aes3,
    TimedText,
    Anc,
}

impl EssenceKind {
    pub fn is_picture(&self) -> bool {
        matches!(
            self,
            EssenceKind::AvcI(_)
                | EssenceKind::Mpeg2Lg
                | EssenceKind::Dv(_)
                | EssenceKind::Vc2
                | EssenceKind::Vc3
                | EssenceKind::Jpeg2000
                | EssenceKind::JpegXs
                | EssenceKind::UncVideo
        )
    }

    pub fn is_sound(&self) -> bool {
        matches!(self, EssenceKind::Pcm | EssenceKind::Aes3)
    }

    pub fn is_data(&self) -> bool {
        matches!(self, EssenceKind::TimedText | EssenceKind::Anc)
    }

    /// Edit units have a constant byte count for these kinds, so a CBE
    /// index suffices.
    pub fn is_cbe(&self) -> bool {
        !matches!(self, EssenceKind::Mpeg2Lg | EssenceKind::Vc2 | EssenceKind::Jpeg2000)
    }

    pub fn data_definition(&self) -> Ul {
        if self.is_picture() {
            DATA_DEF_PICTURE
        } else if self.is_sound() {
            DATA_DEF_SOUND
        } else {
            DATA_DEF_DATA
        }
    }

    pub fn essence_container(&self, clip_wrapped: bool) -> Ul {
        match self {
            EssenceKind::AvcI(_) => EC_AVC_FRAME_WRAPPED,
            EssenceKind::Mpeg2Lg => EC_MPEG_ES_FRAME_WRAPPED,
            EssenceKind::Dv(_) => {
                if clip_wrapped {
                    EC_DV_CLIP_WRAPPED
                } else {
                    EC_DV_FRAME_WRAPPED
                }
            }
            EssenceKind::Vc2 => EC_VC2_FRAME_WRAPPED,
            EssenceKind::Vc3 => EC_VC3_FRAME_WRAPPED,
            EssenceKind::Jpeg2000 => EC_JPEG2000_FRAME_WRAPPED,
            EssenceKind::JpegXs => EC_JPEGXS_FRAME_WRAPPED,
            EssenceKind::UncVideo => EC_UNC_FRAME_WRAPPED,
            EssenceKind::Pcm => {
                if clip_wrapped {
                    EC_BWF_CLIP_WRAPPED
                } else {
                    EC_BWF_FRAME_WRAPPED
                }
            }
            EssenceKind::Aes3 => EC_AES3_FRAME_WRAPPED,
            EssenceKind::TimedText => EC_TIMED_TEXT_CLIP_WRAPPED,
            EssenceKind::Anc => EC_ANC_FRAME_WRAPPED,
        }
    }

    /// Item and element type codes of the essence element key.
    fn element_type_codes(&self) -> (u8, u8) {
        match self {
            EssenceKind::Mpeg2Lg => (0x15, 0x05),
            EssenceKind::AvcI(_) => (0x15, 0x06),
            EssenceKind::Dv(_) => (0x18, 0x01),
            EssenceKind::UncVideo => (0x15, 0x02),
            EssenceKind::Jpeg2000 => (0x15, 0x08),
            EssenceKind::Vc3 => (0x15, 0x0c),
            EssenceKind::Vc2 => (0x15, 0x0d),
            EssenceKind::JpegXs => (0x15, 0x0e),
            EssenceKind::Pcm => (0x16, 0x01),
            EssenceKind::Aes3 => (0x16, 0x03),
            EssenceKind::Anc => (0x17, 0x02),
            EssenceKind::TimedText => (0x17, 0x0b),
        }
    }

    /// Build the element key and track number for the `index`-th element
    /// of `count` elements of this kind in the content package.
    pub fn element_key(&self, count: u8, index: u8) -> (Ul, u32) {
        let (item_type, element_type) = self.element_type_codes();
        let number = TrackNumber {
            item_type,
            element_count: count,
            element_type,
            element_number: index + 1,
        };
        let mut key = ESSENCE_ELEMENT_BASE_KEY;
        key.0[12..].copy_from_slice(&number.to_u32().to_be_bytes());
        (key, number.to_u32())
    }
}

/// Recognise an essence element key and extract its track number.
pub fn element_track_number(key: &Ul) -> Option<u32> {
    if !key.matches_prefix(&ESSENCE_ELEMENT_PREFIX) {
        return None;
    }
    Some(u32::from_be_bytes([key.0[12], key.0[13], key.0[14], key.0[15]]))
}

/// Picture geometry and coding parameters collected from the parser and
/// the caller before the descriptor is built.
#[derive(Clone, Debug, Default)]
pub struct PictureParams {
    pub coding: Option<Ul>,
    pub stored_width: u32,
    pub stored_height: u32,
    pub aspect_ratio: Option<Rational>,
    pub frame_layout: u8,
    pub component_depth: u32,
    pub horizontal_subsampling: u32,
    pub vertical_subsampling: u32,
    pub video_line_map: Vec<i32>,
}

#[derive(Clone, Debug)]
pub struct SoundParams {
    pub sampling_rate: Rational,
    pub channel_count: u32,
    pub quantization_bits: u32,
    pub locked: bool,
}

impl Default for SoundParams {
    fn default() -> SoundParams {
        SoundParams {
            sampling_rate: Rational::new(48000, 1),
            channel_count: 1,
            quantization_bits: 16,
            locked: true,
        }
    }
}

impl SoundParams {
    pub fn block_align(&self) -> u16 {
        (self.channel_count * ((self.quantization_bits + 7) / 8)) as u16
    }

    pub fn avg_bps(&self) -> u32 {
        (self.sampling_rate.num as i64 * self.block_align() as i64
            / self.sampling_rate.den as i64) as u32
    }
}

/// Extra items attached to a codec sub-descriptor set.
#[derive(Clone, Debug)]
pub struct SubDescriptorItem {
    pub key: Ul,
    pub value: Vec<u8>,
}

/// Builds the descriptor graph for one track.
pub struct DescriptorBuilder {
    pub kind: EssenceKind,
    pub edit_rate: Rational,
    pub clip_wrapped: bool,
    pub picture: PictureParams,
    pub sound: SoundParams,
    pub sub_descriptor_key: Option<Ul>,
    pub sub_descriptor_items: Vec<SubDescriptorItem>,
}

impl DescriptorBuilder {
    pub fn new(kind: EssenceKind, edit_rate: Rational) -> DescriptorBuilder {
        DescriptorBuilder {
            kind,
            edit_rate,
            clip_wrapped: false,
            picture: PictureParams::default(),
            sound: SoundParams::default(),
            sub_descriptor_key: None,
            sub_descriptor_items: Vec::new(),
        }
    }

    fn descriptor_set_key(&self) -> Ul {
        match self.kind {
            EssenceKind::Mpeg2Lg => MPEG2_VIDEO_DESCRIPTOR_SET_KEY,
            EssenceKind::AvcI(_)
            | EssenceKind::Dv(_)
            | EssenceKind::Vc2
            | EssenceKind::Vc3
            | EssenceKind::Jpeg2000
            | EssenceKind::JpegXs
            | EssenceKind::UncVideo => CDCI_DESCRIPTOR_SET_KEY,
            EssenceKind::Pcm => WAVE_AUDIO_DESCRIPTOR_SET_KEY,
            EssenceKind::Aes3 => AES3_AUDIO_DESCRIPTOR_SET_KEY,
            EssenceKind::TimedText => DC_TIMED_TEXT_DESCRIPTOR_SET_KEY,
            EssenceKind::Anc => ANC_DATA_DESCRIPTOR_SET_KEY,
        }
    }

    /// Create the descriptor set (and any sub-descriptor) in `metadata`
    /// and return the descriptor's instance uid.
    pub fn build(
        &self,
        metadata: &mut HeaderMetadata,
        linked_track_id: u32,
        container_duration: i64,
    ) -> Result<Uuid> {
        let mut descriptor = MetadataSet::new(self.descriptor_set_key());
        descriptor.set_u32(FD_LINKED_TRACK_ID_ITEM_KEY, linked_track_id);
        // a clip-wrapped sound track is described in sampling rate units
        let sample_rate = if self.kind.is_sound() && self.clip_wrapped {
            self.sound.sampling_rate
        } else {
            self.edit_rate
        };
        descriptor.set_rational(FD_SAMPLE_RATE_ITEM_KEY, &sample_rate);
        descriptor.set_i64(FD_CONTAINER_DURATION_ITEM_KEY, container_duration);
        descriptor.set_ul(
            FD_ESSENCE_CONTAINER_ITEM_KEY,
            &self.kind.essence_container(self.clip_wrapped),
        );

        if self.kind.is_picture() {
            let p = &self.picture;
            if p.stored_width == 0 || p.stored_height == 0 {
                return Err(MxfError::LogicError("picture geometry not set"));
            }
            descriptor.set_u8(PD_FRAME_LAYOUT_ITEM_KEY, p.frame_layout);
            descriptor.set_u32(PD_STORED_WIDTH_ITEM_KEY, p.stored_width);
            descriptor.set_u32(PD_STORED_HEIGHT_ITEM_KEY, p.stored_height);
            descriptor.set_rational(
                PD_ASPECT_RATIO_ITEM_KEY,
                &p.aspect_ratio.unwrap_or(Rational::new(16, 9)),
            );
            if let Some(coding) = p.coding {
                descriptor.set_ul(PD_PICTURE_CODING_ITEM_KEY, &coding);
            }
            if !p.video_line_map.is_empty() {
                descriptor.set_i32_array(PD_VIDEO_LINE_MAP_ITEM_KEY, &p.video_line_map);
            }
            if p.component_depth != 0 {
                descriptor.set_u32(CDCI_COMPONENT_DEPTH_ITEM_KEY, p.component_depth);
            }
            if p.horizontal_subsampling != 0 {
                descriptor.set_u32(CDCI_HORIZONTAL_SUBSAMPLING_ITEM_KEY, p.horizontal_subsampling);
                descriptor.set_u32(CDCI_VERTICAL_SUBSAMPLING_ITEM_KEY, p.vertical_subsampling.max(1));
            }
        } else if self.kind.is_sound() {
            let s = &self.sound;
            descriptor.set_rational(SD_AUDIO_SAMPLING_RATE_ITEM_KEY, &s.sampling_rate);
            descriptor.set_bool(SD_LOCKED_ITEM_KEY, s.locked);
            descriptor.set_u32(SD_CHANNEL_COUNT_ITEM_KEY, s.channel_count);
            descriptor.set_u32(SD_QUANTIZATION_BITS_ITEM_KEY, s.quantization_bits);
            descriptor.set_ul(SD_SOUND_COMPRESSION_ITEM_KEY, &SOUND_CODING_PCM);
            descriptor.set_u16(WAVE_BLOCK_ALIGN_ITEM_KEY, s.block_align());
            descriptor.set_u32(WAVE_AVG_BPS_ITEM_KEY, s.avg_bps());
        }

        let mut sub_uids = Vec::new();
        if let Some(sub_key) = self.sub_descriptor_key {
            let mut sub = MetadataSet::new(sub_key);
            for item in &self.sub_descriptor_items {
                sub.set_item(item.key, item.value.clone());
            }
            sub_uids.push(metadata.add_set(sub));
        }
        if !sub_uids.is_empty() {
            descriptor.set_ref_array(DESCRIPTOR_SUB_DESCRIPTORS_ITEM_KEY, &sub_uids);
        }

        Ok(metadata.add_set(descriptor))
    }
}

/// Descriptor fields a reader needs to expose a track.
#[derive(Clone, Debug)]
pub struct DescriptorInfo {
    pub linked_track_id: Option<u32>,
    pub sample_rate: Rational,
    pub container_duration: Option<i64>,
    pub essence_container: Ul,
    pub is_picture: bool,
    pub is_sound: bool,
    pub picture_coding: Option<Ul>,
    pub stored_width: Option<u32>,
    pub stored_height: Option<u32>,
    pub aspect_ratio: Option<Rational>,
    pub sampling_rate: Option<Rational>,
    pub channel_count: Option<u32>,
    pub quantization_bits: Option<u32>,
    pub block_align: Option<u16>,
    /// Cached elementary frame header from an AVC sub-descriptor.
    pub frame_header: Option<Vec<u8>>,
}

/// Extract reader-facing fields from a file descriptor set.
pub fn parse_file_descriptor(
    metadata: &HeaderMetadata,
    set: &MetadataSet,
) -> Result<DescriptorInfo> {
    let model = metadata.model();
    let mut info = DescriptorInfo {
        linked_track_id: set.u32_item(&FD_LINKED_TRACK_ID_ITEM_KEY)?,
        sample_rate: set
            .rational_item(&FD_SAMPLE_RATE_ITEM_KEY)?
            .ok_or(MxfError::malformed(0, "descriptor missing sample rate"))?,
        container_duration: set.i64_item(&FD_CONTAINER_DURATION_ITEM_KEY)?,
        essence_container: set
            .ul_item(&FD_ESSENCE_CONTAINER_ITEM_KEY)?
            .ok_or(MxfError::malformed(0, "descriptor missing essence container"))?,
        is_picture: model.is_subclass_of(&set.key, &GENERIC_PICTURE_DESCRIPTOR_SET_KEY),
        is_sound: model.is_subclass_of(&set.key, &GENERIC_SOUND_DESCRIPTOR_SET_KEY),
        picture_coding: set.ul_item(&PD_PICTURE_CODING_ITEM_KEY)?,
        stored_width: set.u32_item(&PD_STORED_WIDTH_ITEM_KEY)?,
        stored_height: set.u32_item(&PD_STORED_HEIGHT_ITEM_KEY)?,
        aspect_ratio: set.rational_item(&PD_ASPECT_RATIO_ITEM_KEY)?,
        sampling_rate: set.rational_item(&SD_AUDIO_SAMPLING_RATE_ITEM_KEY)?,
        channel_count: set.u32_item(&SD_CHANNEL_COUNT_ITEM_KEY)?,
        quantization_bits: set.u32_item(&SD_QUANTIZATION_BITS_ITEM_KEY)?,
        block_align: set.u16_item(&WAVE_BLOCK_ALIGN_ITEM_KEY)?,
        frame_header: None,
    };

    if let Some(sub_uids) = set.ref_array_item(&DESCRIPTOR_SUB_DESCRIPTORS_ITEM_KEY)? {
        for uid in sub_uids {
            if let Some(sub) = metadata.get(&uid) {
                if sub.key.matches(&AVC_SUB_DESCRIPTOR_SET_KEY) {
                    if let Some(header) = sub.item_value(&AVC_FRAME_HEADER_BYTES_ITEM_KEY) {
                        info.frame_header = Some(header.to_vec());
                    }
                }
            }
        }
    }

    Ok(info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::baseline;

    #[test]
    fn element_keys_carry_track_numbers() {
        let (key, number) = EssenceKind::Pcm.element_key(2, 1);
        assert_eq!(number, 0x16020102);
        assert_eq!(element_track_number(&key), Some(0x16020102));
        assert_eq!(element_track_number(&EC_BWF_FRAME_WRAPPED), None);
    }

    #[test]
    fn sound_descriptor_round_trip() {
        let mut metadata = HeaderMetadata::new(baseline());
        let mut builder = DescriptorBuilder::new(EssenceKind::Pcm, Rational::new(25, 1));
        builder.sound.channel_count = 2;
        builder.sound.quantization_bits = 24;
        let uid = builder.build(&mut metadata, 3, 100).unwrap();

        let set = metadata.get(&uid).unwrap();
        let info = parse_file_descriptor(&metadata, set).unwrap();
        assert!(info.is_sound);
        assert_eq!(info.sampling_rate, Some(Rational::new(48000, 1)));
        assert_eq!(info.channel_count, Some(2));
        assert_eq!(info.block_align, Some(6));
        assert_eq!(info.linked_track_id, Some(3));
        assert_eq!(info.container_duration, Some(100));
    }

    #[test]
    fn picture_descriptor_requires_geometry() {
        let mut metadata = HeaderMetadata::new(baseline());
        let builder = DescriptorBuilder::new(
            EssenceKind::AvcI(crate::essence::avc::AvciClass::Class100),
            Rational::new(25, 1),
        );
        assert!(builder.build(&mut metadata, 1, 0).is_err());
    }
}
