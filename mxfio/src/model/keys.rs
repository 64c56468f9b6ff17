//! Set and item keys for the baseline data model.
//!
//! Item constants also carry their static local tag where the mapping
//! defines one; items with tag 0 take a dynamically allocated tag from
//! the primer pack.

use crate::labels::ul;
use crate::types::Ul;

// Structural set keys. Byte 14 distinguishes the set within the
// structural metadata node.

pub const INTERCHANGE_OBJECT_SET_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x02 0x53 0x01 0x01 0x0d 0x01 0x01 0x01 0x01 0x01 0x01 0x00);
pub const PREFACE_SET_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x02 0x53 0x01 0x01 0x0d 0x01 0x01 0x01 0x01 0x01 0x2f 0x00);
pub const IDENTIFICATION_SET_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x02 0x53 0x01 0x01 0x0d 0x01 0x01 0x01 0x01 0x01 0x30 0x00);
pub const CONTENT_STORAGE_SET_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x02 0x53 0x01 0x01 0x0d 0x01 0x01 0x01 0x01 0x01 0x18 0x00);
pub const ESSENCE_CONTAINER_DATA_SET_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x02 0x53 0x01 0x01 0x0d 0x01 0x01 0x01 0x01 0x01 0x23 0x00);
pub const GENERIC_PACKAGE_SET_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x02 0x53 0x01 0x01 0x0d 0x01 0x01 0x01 0x01 0x01 0x34 0x00);
pub const MATERIAL_PACKAGE_SET_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x02 0x53 0x01 0x01 0x0d 0x01 0x01 0x01 0x01 0x01 0x36 0x00);
pub const SOURCE_PACKAGE_SET_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x02 0x53 0x01 0x01 0x0d 0x01 0x01 0x01 0x01 0x01 0x37 0x00);
pub const GENERIC_TRACK_SET_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x02 0x53 0x01 0x01 0x0d 0x01 0x01 0x01 0x01 0x01 0x38 0x00);
pub const STATIC_TRACK_SET_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x02 0x53 0x01 0x01 0x0d 0x01 0x01 0x01 0x01 0x01 0x3a 0x00);
pub const TIMELINE_TRACK_SET_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x02 0x53 0x01 0x01 0x0d 0x01 0x01 0x01 0x01 0x01 0x3b 0x00);
pub const STRUCTURAL_COMPONENT_SET_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x02 0x53 0x01 0x01 0x0d 0x01 0x01 0x01 0x01 0x01 0x02 0x00);
pub const SEQUENCE_SET_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x02 0x53 0x01 0x01 0x0d 0x01 0x01 0x01 0x01 0x01 0x0f 0x00);
pub const SOURCE_CLIP_SET_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x02 0x53 0x01 0x01 0x0d 0x01 0x01 0x01 0x01 0x01 0x11 0x00);
pub const TIMECODE_COMPONENT_SET_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x02 0x53 0x01 0x01 0x0d 0x01 0x01 0x01 0x01 0x01 0x14 0x00);

// Descriptor set keys.

pub const GENERIC_DESCRIPTOR_SET_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x02 0x53 0x01 0x01 0x0d 0x01 0x01 0x01 0x01 0x01 0x24 0x00);
pub const FILE_DESCRIPTOR_SET_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x02 0x53 0x01 0x01 0x0d 0x01 0x01 0x01 0x01 0x01 0x25 0x00);
pub const GENERIC_PICTURE_DESCRIPTOR_SET_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x02 0x53 0x01 0x01 0x0d 0x01 0x01 0x01 0x01 0x01 0x27 0x00);
pub const CDCI_DESCRIPTOR_SET_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x02 0x53 0x01 0x01 0x0d 0x01 0x01 0x01 0x01 0x01 0x28 0x00);
pub const RGBA_DESCRIPTOR_SET_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x02 0x53 0x01 0x01 0x0d 0x01 0x01 0x01 0x01 0x01 0x29 0x00);
pub const GENERIC_SOUND_DESCRIPTOR_SET_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x02 0x53 0x01 0x01 0x0d 0x01 0x01 0x01 0x01 0x01 0x42 0x00);
pub const GENERIC_DATA_DESCRIPTOR_SET_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x02 0x53 0x01 0x01 0x0d 0x01 0x01 0x01 0x01 0x01 0x43 0x00);
pub const MULTIPLE_DESCRIPTOR_SET_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x02 0x53 0x01 0x01 0x0d 0x01 0x01 0x01 0x01 0x01 0x44 0x00);
pub const WAVE_AUDIO_DESCRIPTOR_SET_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x02 0x53 0x01 0x01 0x0d 0x01 0x01 0x01 0x01 0x01 0x48 0x00);
pub const AES3_AUDIO_DESCRIPTOR_SET_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x02 0x53 0x01 0x01 0x0d 0x01 0x01 0x01 0x01 0x01 0x47 0x00);
pub const MPEG2_VIDEO_DESCRIPTOR_SET_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x02 0x53 0x01 0x01 0x0d 0x01 0x01 0x01 0x01 0x01 0x51 0x00);
pub const ANC_DATA_DESCRIPTOR_SET_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x02 0x53 0x01 0x01 0x0d 0x01 0x01 0x01 0x01 0x01 0x5c 0x00);
pub const VBI_DATA_DESCRIPTOR_SET_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x02 0x53 0x01 0x01 0x0d 0x01 0x01 0x01 0x01 0x01 0x5b 0x00);
pub const DC_TIMED_TEXT_DESCRIPTOR_SET_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x02 0x53 0x01 0x01 0x0d 0x01 0x01 0x01 0x01 0x01 0x64 0x00);
pub const DC_TIMED_TEXT_RESOURCE_SUB_DESCRIPTOR_SET_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x02 0x53 0x01 0x01 0x0d 0x01 0x01 0x01 0x01 0x01 0x65 0x00);
pub const SUB_DESCRIPTOR_SET_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x02 0x53 0x01 0x01 0x0d 0x01 0x01 0x01 0x01 0x01 0x59 0x00);
pub const JPEG2000_SUB_DESCRIPTOR_SET_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x02 0x53 0x01 0x01 0x0d 0x01 0x01 0x01 0x01 0x01 0x5a 0x00);
pub const AVC_SUB_DESCRIPTOR_SET_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x02 0x53 0x01 0x01 0x0d 0x01 0x01 0x01 0x01 0x01 0x6e 0x00);
pub const JPEGXS_SUB_DESCRIPTOR_SET_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x02 0x53 0x01 0x01 0x0d 0x01 0x01 0x01 0x01 0x01 0x6c 0x00);
pub const VC2_SUB_DESCRIPTOR_SET_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x02 0x53 0x01 0x01 0x0d 0x01 0x01 0x01 0x01 0x01 0x73 0x00);

// Interchange object items.

pub const INSTANCE_UID_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x01 0x01 0x01 0x15 0x02 0x00 0x00 0x00 0x00);
pub const INSTANCE_UID_TAG: u16 = 0x3c0a;
pub const GENERATION_UID_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x02 0x05 0x20 0x07 0x01 0x08 0x00 0x00 0x00);

// Preface items.

pub const PREFACE_LAST_MODIFIED_DATE_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x02 0x07 0x02 0x01 0x10 0x02 0x04 0x00 0x00);
pub const PREFACE_VERSION_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x02 0x03 0x01 0x02 0x01 0x05 0x00 0x00 0x00);
pub const PREFACE_OPERATIONAL_PATTERN_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x05 0x01 0x02 0x02 0x03 0x00 0x00 0x00 0x00);
pub const PREFACE_ESSENCE_CONTAINERS_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x05 0x01 0x02 0x02 0x10 0x02 0x01 0x00 0x00);
pub const PREFACE_DM_SCHEMES_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x05 0x01 0x02 0x02 0x10 0x02 0x02 0x00 0x00);
pub const PREFACE_IDENTIFICATIONS_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x02 0x06 0x01 0x01 0x04 0x06 0x04 0x00 0x00);
pub const PREFACE_CONTENT_STORAGE_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x02 0x06 0x01 0x01 0x04 0x02 0x01 0x00 0x00);

// Identification items.

pub const IDENT_THIS_GENERATION_UID_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x02 0x05 0x20 0x07 0x01 0x01 0x00 0x00 0x00);
pub const IDENT_COMPANY_NAME_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x02 0x05 0x20 0x07 0x01 0x02 0x01 0x00 0x00);
pub const IDENT_PRODUCT_NAME_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x02 0x05 0x20 0x07 0x01 0x03 0x01 0x00 0x00);
pub const IDENT_PRODUCT_VERSION_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x02 0x05 0x20 0x07 0x01 0x04 0x00 0x00 0x00);
pub const IDENT_VERSION_STRING_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x02 0x05 0x20 0x07 0x01 0x05 0x01 0x00 0x00);
pub const IDENT_PRODUCT_UID_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x02 0x05 0x20 0x07 0x01 0x07 0x00 0x00 0x00);
pub const IDENT_MODIFICATION_DATE_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x02 0x07 0x02 0x01 0x10 0x02 0x03 0x00 0x00);
pub const IDENT_TOOLKIT_VERSION_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x02 0x05 0x20 0x07 0x01 0x0a 0x00 0x00 0x00);
pub const IDENT_PLATFORM_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x02 0x05 0x20 0x07 0x01 0x06 0x01 0x00 0x00);

// Content storage items.

pub const CS_PACKAGES_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x02 0x06 0x01 0x01 0x04 0x05 0x01 0x00 0x00);
pub const CS_ESSENCE_CONTAINER_DATA_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x02 0x06 0x01 0x01 0x04 0x05 0x02 0x00 0x00);

// Essence container data items.

pub const ECD_LINKED_PACKAGE_UID_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x02 0x06 0x01 0x01 0x06 0x01 0x00 0x00 0x00);
pub const ECD_INDEX_SID_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x04 0x01 0x03 0x04 0x05 0x00 0x00 0x00 0x00);
pub const ECD_BODY_SID_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x04 0x01 0x03 0x04 0x04 0x00 0x00 0x00 0x00);

// Package items.

pub const PACKAGE_UID_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x01 0x01 0x01 0x15 0x10 0x00 0x00 0x00 0x00);
pub const PACKAGE_NAME_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x01 0x01 0x03 0x03 0x02 0x01 0x00 0x00 0x00);
pub const PACKAGE_CREATION_DATE_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x02 0x07 0x02 0x01 0x10 0x01 0x03 0x00 0x00);
pub const PACKAGE_MODIFIED_DATE_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x02 0x07 0x02 0x01 0x10 0x02 0x05 0x00 0x00);
pub const PACKAGE_TRACKS_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x02 0x06 0x01 0x01 0x04 0x06 0x05 0x00 0x00);
pub const PACKAGE_DESCRIPTOR_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x02 0x06 0x01 0x01 0x04 0x02 0x03 0x00 0x00);

// Track items.

pub const TRACK_ID_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x02 0x01 0x07 0x01 0x01 0x00 0x00 0x00 0x00);
pub const TRACK_NUMBER_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x02 0x01 0x04 0x01 0x03 0x00 0x00 0x00 0x00);
pub const TRACK_NAME_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x02 0x01 0x07 0x01 0x02 0x01 0x00 0x00 0x00);
pub const TRACK_SEQUENCE_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x02 0x06 0x01 0x01 0x04 0x02 0x04 0x00 0x00);
pub const TRACK_EDIT_RATE_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x02 0x05 0x30 0x04 0x05 0x00 0x00 0x00 0x00);
pub const TRACK_ORIGIN_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x02 0x07 0x02 0x01 0x03 0x01 0x03 0x00 0x00);

// Structural component items.

pub const COMPONENT_DATA_DEFINITION_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x02 0x04 0x07 0x01 0x00 0x00 0x00 0x00 0x00);
pub const COMPONENT_DURATION_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x02 0x07 0x02 0x02 0x01 0x01 0x03 0x00 0x00);
pub const SEQUENCE_COMPONENTS_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x02 0x06 0x01 0x01 0x04 0x06 0x09 0x00 0x00);
pub const SOURCE_CLIP_START_POSITION_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x02 0x07 0x02 0x01 0x03 0x01 0x04 0x00 0x00);
pub const SOURCE_CLIP_PACKAGE_ID_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x02 0x06 0x01 0x01 0x03 0x01 0x00 0x00 0x00);
pub const SOURCE_CLIP_TRACK_ID_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x02 0x06 0x01 0x01 0x03 0x02 0x00 0x00 0x00);
pub const TIMECODE_BASE_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x02 0x04 0x04 0x01 0x01 0x02 0x06 0x00 0x00);
pub const TIMECODE_START_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x02 0x07 0x02 0x01 0x03 0x01 0x05 0x00 0x00);
pub const TIMECODE_DROP_FRAME_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x01 0x04 0x04 0x01 0x01 0x05 0x00 0x00 0x00);

// Descriptor items.

pub const DESCRIPTOR_SUB_DESCRIPTORS_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x09 0x06 0x01 0x01 0x04 0x06 0x10 0x00 0x00);
pub const FD_LINKED_TRACK_ID_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x05 0x06 0x01 0x01 0x03 0x05 0x00 0x00 0x00);
pub const FD_SAMPLE_RATE_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x01 0x04 0x06 0x01 0x01 0x00 0x00 0x00 0x00);
pub const FD_CONTAINER_DURATION_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x01 0x04 0x06 0x01 0x02 0x00 0x00 0x00 0x00);
pub const FD_ESSENCE_CONTAINER_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x02 0x06 0x01 0x01 0x04 0x01 0x02 0x00 0x00);
pub const FD_CODEC_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x02 0x06 0x01 0x01 0x04 0x01 0x03 0x00 0x00);

pub const PD_FRAME_LAYOUT_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x01 0x04 0x01 0x03 0x01 0x04 0x00 0x00 0x00);
pub const PD_STORED_WIDTH_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x01 0x04 0x01 0x05 0x02 0x02 0x00 0x00 0x00);
pub const PD_STORED_HEIGHT_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x01 0x04 0x01 0x05 0x02 0x01 0x00 0x00 0x00);
pub const PD_DISPLAY_WIDTH_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x01 0x04 0x01 0x05 0x01 0x0c 0x00 0x00 0x00);
pub const PD_DISPLAY_HEIGHT_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x01 0x04 0x01 0x05 0x01 0x0b 0x00 0x00 0x00);
pub const PD_ASPECT_RATIO_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x01 0x04 0x01 0x01 0x01 0x01 0x00 0x00 0x00);
pub const PD_VIDEO_LINE_MAP_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x02 0x04 0x01 0x03 0x02 0x05 0x00 0x00 0x00);
pub const PD_PICTURE_CODING_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x02 0x04 0x01 0x06 0x01 0x00 0x00 0x00 0x00);
pub const PD_SIGNAL_STANDARD_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x05 0x04 0x05 0x01 0x13 0x00 0x00 0x00 0x00);

pub const CDCI_COMPONENT_DEPTH_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x02 0x04 0x01 0x05 0x03 0x0a 0x00 0x00 0x00);
pub const CDCI_HORIZONTAL_SUBSAMPLING_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x01 0x04 0x01 0x05 0x01 0x05 0x00 0x00 0x00);
pub const CDCI_VERTICAL_SUBSAMPLING_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x02 0x04 0x01 0x05 0x01 0x10 0x00 0x00 0x00);
pub const CDCI_COLOR_SITING_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x01 0x04 0x01 0x05 0x01 0x06 0x00 0x00 0x00);
pub const CDCI_BLACK_REF_LEVEL_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x01 0x04 0x01 0x05 0x03 0x03 0x00 0x00 0x00);
pub const CDCI_WHITE_REF_LEVEL_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x01 0x04 0x01 0x05 0x03 0x04 0x00 0x00 0x00);
pub const CDCI_COLOR_RANGE_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x02 0x04 0x01 0x05 0x03 0x05 0x00 0x00 0x00);

pub const SD_AUDIO_SAMPLING_RATE_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x05 0x04 0x02 0x03 0x01 0x01 0x01 0x00 0x00);
pub const SD_LOCKED_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x04 0x04 0x02 0x03 0x01 0x04 0x00 0x00 0x00);
pub const SD_AUDIO_REF_LEVEL_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x01 0x04 0x02 0x01 0x01 0x03 0x00 0x00 0x00);
pub const SD_CHANNEL_COUNT_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x05 0x04 0x02 0x01 0x01 0x04 0x00 0x00 0x00);
pub const SD_QUANTIZATION_BITS_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x04 0x04 0x02 0x03 0x03 0x04 0x00 0x00 0x00);
pub const SD_SOUND_COMPRESSION_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x02 0x04 0x02 0x04 0x02 0x00 0x00 0x00 0x00);

pub const WAVE_BLOCK_ALIGN_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x05 0x04 0x02 0x03 0x02 0x01 0x00 0x00 0x00);
pub const WAVE_SEQUENCE_OFFSET_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x05 0x04 0x02 0x03 0x02 0x02 0x00 0x00 0x00);
pub const WAVE_AVG_BPS_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x05 0x04 0x02 0x03 0x03 0x05 0x00 0x00 0x00);
pub const WAVE_CHANNEL_ASSIGNMENT_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x07 0x04 0x02 0x01 0x01 0x05 0x00 0x00 0x00);

pub const MD_SUB_DESCRIPTOR_UIDS_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x04 0x06 0x01 0x01 0x04 0x06 0x0b 0x00 0x00);

pub const DD_DATA_ESSENCE_CODING_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x05 0x04 0x03 0x03 0x02 0x00 0x00 0x00 0x00);

// MPEG-2 video descriptor items (dynamic tags).

pub const MPEG2_SINGLE_SEQUENCE_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x05 0x04 0x01 0x06 0x02 0x01 0x02 0x00 0x00);
pub const MPEG2_CONSTANT_B_FRAMES_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x05 0x04 0x01 0x06 0x02 0x01 0x03 0x00 0x00);
pub const MPEG2_CODED_CONTENT_TYPE_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x05 0x04 0x01 0x06 0x02 0x01 0x04 0x00 0x00);
pub const MPEG2_LOW_DELAY_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x05 0x04 0x01 0x06 0x02 0x01 0x05 0x00 0x00);
pub const MPEG2_CLOSED_GOP_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x05 0x04 0x01 0x06 0x02 0x01 0x06 0x00 0x00);
pub const MPEG2_IDENTICAL_GOP_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x05 0x04 0x01 0x06 0x02 0x01 0x07 0x00 0x00);
pub const MPEG2_MAX_GOP_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x05 0x04 0x01 0x06 0x02 0x01 0x08 0x00 0x00);
pub const MPEG2_B_PICTURE_COUNT_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x05 0x04 0x01 0x06 0x02 0x01 0x09 0x00 0x00);
pub const MPEG2_PROFILE_AND_LEVEL_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x05 0x04 0x01 0x06 0x02 0x01 0x0a 0x00 0x00);
pub const MPEG2_BIT_RATE_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x05 0x04 0x01 0x06 0x02 0x01 0x0b 0x00 0x00);

// AVC sub-descriptor items (dynamic tags).

pub const AVC_DECODING_DELAY_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x0a 0x04 0x01 0x06 0x06 0x01 0x0e 0x00 0x00);
pub const AVC_CODED_CONTENT_KIND_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x0a 0x04 0x01 0x06 0x06 0x01 0x04 0x00 0x00);
pub const AVC_CLOSED_GOP_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x0a 0x04 0x01 0x06 0x06 0x01 0x02 0x00 0x00);
pub const AVC_PROFILE_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x0a 0x04 0x01 0x06 0x06 0x01 0x0a 0x00 0x00);
pub const AVC_PROFILE_CONSTRAINT_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x0a 0x04 0x01 0x06 0x06 0x01 0x0b 0x00 0x00);
pub const AVC_LEVEL_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x0a 0x04 0x01 0x06 0x06 0x01 0x0d 0x00 0x00);
pub const AVC_MAX_BIT_RATE_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x0a 0x04 0x01 0x06 0x06 0x01 0x07 0x00 0x00);
pub const AVC_SPS_FLAG_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x0a 0x04 0x01 0x06 0x06 0x01 0x08 0x00 0x00);
pub const AVC_PPS_FLAG_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x0a 0x04 0x01 0x06 0x06 0x01 0x09 0x00 0x00);
/// Cached elementary-stream frame header, stripped from the essence and
/// restored on read when header prepending is requested.
pub const AVC_FRAME_HEADER_BYTES_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x0e 0x04 0x01 0x06 0x06 0x7f 0x01 0x00 0x00);

// JPEG 2000 sub-descriptor items (dynamic tags).

pub const J2K_RSIZ_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x0a 0x04 0x01 0x06 0x03 0x01 0x00 0x00 0x00);
pub const J2K_XSIZ_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x0a 0x04 0x01 0x06 0x03 0x02 0x00 0x00 0x00);
pub const J2K_YSIZ_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x0a 0x04 0x01 0x06 0x03 0x03 0x00 0x00 0x00);
pub const J2K_XOSIZ_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x0a 0x04 0x01 0x06 0x03 0x04 0x00 0x00 0x00);
pub const J2K_YOSIZ_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x0a 0x04 0x01 0x06 0x03 0x05 0x00 0x00 0x00);
pub const J2K_CSIZ_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x0a 0x04 0x01 0x06 0x03 0x06 0x00 0x00 0x00);

// VC-2 sub-descriptor items (dynamic tags).

pub const VC2_MAJOR_VERSION_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x0d 0x04 0x01 0x06 0x04 0x01 0x00 0x00 0x00);
pub const VC2_MINOR_VERSION_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x0d 0x04 0x01 0x06 0x04 0x02 0x00 0x00 0x00);
pub const VC2_PROFILE_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x0d 0x04 0x01 0x06 0x04 0x03 0x00 0x00 0x00);
pub const VC2_LEVEL_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x0d 0x04 0x01 0x06 0x04 0x04 0x00 0x00 0x00);
pub const VC2_SEQUENCE_HEADERS_IDENTICAL_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x0d 0x04 0x01 0x06 0x04 0x06 0x00 0x00 0x00);
pub const VC2_COMPLETE_SEQUENCES_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x0d 0x04 0x01 0x06 0x04 0x07 0x00 0x00 0x00);

// JPEG XS sub-descriptor items (dynamic tags).

pub const JXS_PPIH_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x0d 0x04 0x01 0x06 0x05 0x01 0x00 0x00 0x00);
pub const JXS_PLEV_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x0d 0x04 0x01 0x06 0x05 0x02 0x00 0x00 0x00);
pub const JXS_WF_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x0d 0x04 0x01 0x06 0x05 0x03 0x00 0x00 0x00);
pub const JXS_HF_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x0d 0x04 0x01 0x06 0x05 0x04 0x00 0x00 0x00);
pub const JXS_NC_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x0d 0x04 0x01 0x06 0x05 0x05 0x00 0x00 0x00);
pub const JXS_CW_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x0d 0x04 0x01 0x06 0x05 0x06 0x00 0x00 0x00);
pub const JXS_SLH_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x0d 0x04 0x01 0x06 0x05 0x07 0x00 0x00 0x00);

// Timed text descriptor items (dynamic tags).

pub const TT_RESOURCE_ID_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x0c 0x06 0x01 0x01 0x15 0x09 0x00 0x00 0x00);
pub const TT_UCS_ENCODING_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x0c 0x04 0x09 0x02 0x01 0x00 0x00 0x00 0x00);
pub const TT_NAMESPACE_URI_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x0c 0x04 0x09 0x01 0x01 0x00 0x00 0x00 0x00);
pub const TT_LANGUAGES_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x0c 0x03 0x01 0x01 0x02 0x02 0x15 0x00 0x00);
pub const TT_ANC_RESOURCE_ID_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x0c 0x06 0x01 0x01 0x15 0x0a 0x00 0x00 0x00);
pub const TT_ANC_MIME_TYPE_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x0c 0x04 0x09 0x03 0x01 0x00 0x00 0x00 0x00);
pub const TT_ANC_STREAM_ID_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x0c 0x01 0x03 0x04 0x07 0x00 0x00 0x00 0x00);
