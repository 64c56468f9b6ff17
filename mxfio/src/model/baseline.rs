//! Baseline data model: the standardised structural sets and descriptors.

use super::keys::*;
use super::{DataModel, ItemType};
use crate::prelude::*;
use once_cell::sync::Lazy;

macro_rules! set {
    ($m:ident, $key:expr, $parent:expr, $name:literal) => {
        $m.register_set($key, $parent, $name)?;
    };
}

macro_rules! item {
    ($m:ident, $set:expr, $key:expr, $tag:expr, $ty:ident, $req:expr, $name:literal) => {
        $m.register_item($set, $key, $tag, ItemType::$ty, $req, $name)?;
    };
}

static BASELINE: Lazy<DataModel> = Lazy::new(|| build().expect("baseline data model"));

/// The finalised baseline model, shared process-wide.
pub fn baseline() -> &'static DataModel {
    &BASELINE
}

pub(super) fn build() -> Result<DataModel> {
    let mut m = DataModel::new();
    register_all(&mut m)?;
    m.finalise()?;
    Ok(m)
}

pub(super) fn register_all(m: &mut DataModel) -> Result<()> {
    set!(m, INTERCHANGE_OBJECT_SET_KEY, None, "InterchangeObject");
    item!(m, INTERCHANGE_OBJECT_SET_KEY, INSTANCE_UID_ITEM_KEY, INSTANCE_UID_TAG, Uuid, true, "InstanceUID");
    item!(m, INTERCHANGE_OBJECT_SET_KEY, GENERATION_UID_ITEM_KEY, 0x0102, Uuid, false, "GenerationUID");

    set!(m, PREFACE_SET_KEY, Some(INTERCHANGE_OBJECT_SET_KEY), "Preface");
    item!(m, PREFACE_SET_KEY, PREFACE_LAST_MODIFIED_DATE_ITEM_KEY, 0x3b02, Timestamp, true, "LastModifiedDate");
    item!(m, PREFACE_SET_KEY, PREFACE_VERSION_ITEM_KEY, 0x3b05, VersionType, true, "Version");
    item!(m, PREFACE_SET_KEY, PREFACE_OPERATIONAL_PATTERN_ITEM_KEY, 0x3b09, Ul, true, "OperationalPattern");
    item!(m, PREFACE_SET_KEY, PREFACE_ESSENCE_CONTAINERS_ITEM_KEY, 0x3b0a, UlBatch, true, "EssenceContainers");
    item!(m, PREFACE_SET_KEY, PREFACE_DM_SCHEMES_ITEM_KEY, 0x3b0b, UlBatch, true, "DMSchemes");
    item!(m, PREFACE_SET_KEY, PREFACE_IDENTIFICATIONS_ITEM_KEY, 0x3b06, StrongRefArray, false, "Identifications");
    item!(m, PREFACE_SET_KEY, PREFACE_CONTENT_STORAGE_ITEM_KEY, 0x3b03, StrongRef, true, "ContentStorage");

    set!(m, IDENTIFICATION_SET_KEY, Some(INTERCHANGE_OBJECT_SET_KEY), "Identification");
    item!(m, IDENTIFICATION_SET_KEY, IDENT_THIS_GENERATION_UID_ITEM_KEY, 0x3c09, Uuid, true, "ThisGenerationUID");
    item!(m, IDENTIFICATION_SET_KEY, IDENT_COMPANY_NAME_ITEM_KEY, 0x3c01, Utf16String, true, "CompanyName");
    item!(m, IDENTIFICATION_SET_KEY, IDENT_PRODUCT_NAME_ITEM_KEY, 0x3c02, Utf16String, true, "ProductName");
    item!(m, IDENTIFICATION_SET_KEY, IDENT_PRODUCT_VERSION_ITEM_KEY, 0x3c03, ProductVersion, false, "ProductVersion");
    item!(m, IDENTIFICATION_SET_KEY, IDENT_VERSION_STRING_ITEM_KEY, 0x3c04, Utf16String, true, "VersionString");
    item!(m, IDENTIFICATION_SET_KEY, IDENT_PRODUCT_UID_ITEM_KEY, 0x3c05, Uuid, true, "ProductUID");
    item!(m, IDENTIFICATION_SET_KEY, IDENT_MODIFICATION_DATE_ITEM_KEY, 0x3c06, Timestamp, true, "ModificationDate");
    item!(m, IDENTIFICATION_SET_KEY, IDENT_TOOLKIT_VERSION_ITEM_KEY, 0x3c07, ProductVersion, false, "ToolkitVersion");
    item!(m, IDENTIFICATION_SET_KEY, IDENT_PLATFORM_ITEM_KEY, 0x3c08, Utf16String, false, "Platform");

    set!(m, CONTENT_STORAGE_SET_KEY, Some(INTERCHANGE_OBJECT_SET_KEY), "ContentStorage");
    item!(m, CONTENT_STORAGE_SET_KEY, CS_PACKAGES_ITEM_KEY, 0x1901, StrongRefArray, true, "Packages");
    item!(m, CONTENT_STORAGE_SET_KEY, CS_ESSENCE_CONTAINER_DATA_ITEM_KEY, 0x1902, StrongRefArray, false, "EssenceContainerData");

    set!(m, ESSENCE_CONTAINER_DATA_SET_KEY, Some(INTERCHANGE_OBJECT_SET_KEY), "EssenceContainerData");
    item!(m, ESSENCE_CONTAINER_DATA_SET_KEY, ECD_LINKED_PACKAGE_UID_ITEM_KEY, 0x2701, Umid, true, "LinkedPackageUID");
    item!(m, ESSENCE_CONTAINER_DATA_SET_KEY, ECD_INDEX_SID_ITEM_KEY, 0x3f06, UInt32, false, "IndexSID");
    item!(m, ESSENCE_CONTAINER_DATA_SET_KEY, ECD_BODY_SID_ITEM_KEY, 0x3f07, UInt32, true, "BodySID");

    set!(m, GENERIC_PACKAGE_SET_KEY, Some(INTERCHANGE_OBJECT_SET_KEY), "GenericPackage");
    item!(m, GENERIC_PACKAGE_SET_KEY, PACKAGE_UID_ITEM_KEY, 0x4401, Umid, true, "PackageUID");
    item!(m, GENERIC_PACKAGE_SET_KEY, PACKAGE_NAME_ITEM_KEY, 0x4402, Utf16String, false, "Name");
    item!(m, GENERIC_PACKAGE_SET_KEY, PACKAGE_CREATION_DATE_ITEM_KEY, 0x4405, Timestamp, true, "PackageCreationDate");
    item!(m, GENERIC_PACKAGE_SET_KEY, PACKAGE_MODIFIED_DATE_ITEM_KEY, 0x4404, Timestamp, true, "PackageModifiedDate");
    item!(m, GENERIC_PACKAGE_SET_KEY, PACKAGE_TRACKS_ITEM_KEY, 0x4403, StrongRefArray, true, "Tracks");

    set!(m, MATERIAL_PACKAGE_SET_KEY, Some(GENERIC_PACKAGE_SET_KEY), "MaterialPackage");

    set!(m, SOURCE_PACKAGE_SET_KEY, Some(GENERIC_PACKAGE_SET_KEY), "SourcePackage");
    item!(m, SOURCE_PACKAGE_SET_KEY, PACKAGE_DESCRIPTOR_ITEM_KEY, 0x4701, StrongRef, false, "Descriptor");

    set!(m, GENERIC_TRACK_SET_KEY, Some(INTERCHANGE_OBJECT_SET_KEY), "GenericTrack");
    item!(m, GENERIC_TRACK_SET_KEY, TRACK_ID_ITEM_KEY, 0x4801, UInt32, true, "TrackID");
    item!(m, GENERIC_TRACK_SET_KEY, TRACK_NUMBER_ITEM_KEY, 0x4804, UInt32, true, "TrackNumber");
    item!(m, GENERIC_TRACK_SET_KEY, TRACK_NAME_ITEM_KEY, 0x4802, Utf16String, false, "TrackName");
    item!(m, GENERIC_TRACK_SET_KEY, TRACK_SEQUENCE_ITEM_KEY, 0x4803, StrongRef, true, "Sequence");

    set!(m, STATIC_TRACK_SET_KEY, Some(GENERIC_TRACK_SET_KEY), "StaticTrack");

    set!(m, TIMELINE_TRACK_SET_KEY, Some(GENERIC_TRACK_SET_KEY), "TimelineTrack");
    item!(m, TIMELINE_TRACK_SET_KEY, TRACK_EDIT_RATE_ITEM_KEY, 0x4b01, Rational, true, "EditRate");
    item!(m, TIMELINE_TRACK_SET_KEY, TRACK_ORIGIN_ITEM_KEY, 0x4b02, Position, true, "Origin");

    set!(m, STRUCTURAL_COMPONENT_SET_KEY, Some(INTERCHANGE_OBJECT_SET_KEY), "StructuralComponent");
    item!(m, STRUCTURAL_COMPONENT_SET_KEY, COMPONENT_DATA_DEFINITION_ITEM_KEY, 0x0201, Ul, true, "DataDefinition");
    item!(m, STRUCTURAL_COMPONENT_SET_KEY, COMPONENT_DURATION_ITEM_KEY, 0x0202, Length, false, "Duration");

    set!(m, SEQUENCE_SET_KEY, Some(STRUCTURAL_COMPONENT_SET_KEY), "Sequence");
    item!(m, SEQUENCE_SET_KEY, SEQUENCE_COMPONENTS_ITEM_KEY, 0x1001, StrongRefArray, true, "StructuralComponents");

    set!(m, SOURCE_CLIP_SET_KEY, Some(STRUCTURAL_COMPONENT_SET_KEY), "SourceClip");
    item!(m, SOURCE_CLIP_SET_KEY, SOURCE_CLIP_START_POSITION_ITEM_KEY, 0x1201, Position, true, "StartPosition");
    item!(m, SOURCE_CLIP_SET_KEY, SOURCE_CLIP_PACKAGE_ID_ITEM_KEY, 0x1101, Umid, true, "SourcePackageID");
    item!(m, SOURCE_CLIP_SET_KEY, SOURCE_CLIP_TRACK_ID_ITEM_KEY, 0x1102, UInt32, true, "SourceTrackID");

    set!(m, TIMECODE_COMPONENT_SET_KEY, Some(STRUCTURAL_COMPONENT_SET_KEY), "TimecodeComponent");
    item!(m, TIMECODE_COMPONENT_SET_KEY, TIMECODE_BASE_ITEM_KEY, 0x1502, UInt16, true, "RoundedTimecodeBase");
    item!(m, TIMECODE_COMPONENT_SET_KEY, TIMECODE_START_ITEM_KEY, 0x1501, Position, true, "StartTimecode");
    item!(m, TIMECODE_COMPONENT_SET_KEY, TIMECODE_DROP_FRAME_ITEM_KEY, 0x1503, Boolean, true, "DropFrame");

    set!(m, GENERIC_DESCRIPTOR_SET_KEY, Some(INTERCHANGE_OBJECT_SET_KEY), "GenericDescriptor");
    item!(m, GENERIC_DESCRIPTOR_SET_KEY, DESCRIPTOR_SUB_DESCRIPTORS_ITEM_KEY, 0, StrongRefArray, false, "SubDescriptors");

    set!(m, FILE_DESCRIPTOR_SET_KEY, Some(GENERIC_DESCRIPTOR_SET_KEY), "FileDescriptor");
    item!(m, FILE_DESCRIPTOR_SET_KEY, FD_LINKED_TRACK_ID_ITEM_KEY, 0x3006, UInt32, false, "LinkedTrackID");
    item!(m, FILE_DESCRIPTOR_SET_KEY, FD_SAMPLE_RATE_ITEM_KEY, 0x3001, Rational, true, "SampleRate");
    item!(m, FILE_DESCRIPTOR_SET_KEY, FD_CONTAINER_DURATION_ITEM_KEY, 0x3002, Length, false, "ContainerDuration");
    item!(m, FILE_DESCRIPTOR_SET_KEY, FD_ESSENCE_CONTAINER_ITEM_KEY, 0x3004, Ul, true, "EssenceContainer");
    item!(m, FILE_DESCRIPTOR_SET_KEY, FD_CODEC_ITEM_KEY, 0x3005, Ul, false, "Codec");

    set!(m, GENERIC_PICTURE_DESCRIPTOR_SET_KEY, Some(FILE_DESCRIPTOR_SET_KEY), "GenericPictureEssenceDescriptor");
    item!(m, GENERIC_PICTURE_DESCRIPTOR_SET_KEY, PD_FRAME_LAYOUT_ITEM_KEY, 0x320c, UInt8, false, "FrameLayout");
    item!(m, GENERIC_PICTURE_DESCRIPTOR_SET_KEY, PD_STORED_WIDTH_ITEM_KEY, 0x3203, UInt32, false, "StoredWidth");
    item!(m, GENERIC_PICTURE_DESCRIPTOR_SET_KEY, PD_STORED_HEIGHT_ITEM_KEY, 0x3202, UInt32, false, "StoredHeight");
    item!(m, GENERIC_PICTURE_DESCRIPTOR_SET_KEY, PD_DISPLAY_WIDTH_ITEM_KEY, 0x3209, UInt32, false, "DisplayWidth");
    item!(m, GENERIC_PICTURE_DESCRIPTOR_SET_KEY, PD_DISPLAY_HEIGHT_ITEM_KEY, 0x3208, UInt32, false, "DisplayHeight");
    item!(m, GENERIC_PICTURE_DESCRIPTOR_SET_KEY, PD_ASPECT_RATIO_ITEM_KEY, 0x320e, Rational, false, "AspectRatio");
    item!(m, GENERIC_PICTURE_DESCRIPTOR_SET_KEY, PD_VIDEO_LINE_MAP_ITEM_KEY, 0x320d, Int32Array, false, "VideoLineMap");
    item!(m, GENERIC_PICTURE_DESCRIPTOR_SET_KEY, PD_PICTURE_CODING_ITEM_KEY, 0x3201, Ul, false, "PictureEssenceCoding");
    item!(m, GENERIC_PICTURE_DESCRIPTOR_SET_KEY, PD_SIGNAL_STANDARD_ITEM_KEY, 0x3215, UInt8, false, "SignalStandard");

    set!(m, CDCI_DESCRIPTOR_SET_KEY, Some(GENERIC_PICTURE_DESCRIPTOR_SET_KEY), "CDCIEssenceDescriptor");
    item!(m, CDCI_DESCRIPTOR_SET_KEY, CDCI_COMPONENT_DEPTH_ITEM_KEY, 0x3301, UInt32, false, "ComponentDepth");
    item!(m, CDCI_DESCRIPTOR_SET_KEY, CDCI_HORIZONTAL_SUBSAMPLING_ITEM_KEY, 0x3302, UInt32, false, "HorizontalSubsampling");
    item!(m, CDCI_DESCRIPTOR_SET_KEY, CDCI_VERTICAL_SUBSAMPLING_ITEM_KEY, 0x3308, UInt32, false, "VerticalSubsampling");
    item!(m, CDCI_DESCRIPTOR_SET_KEY, CDCI_COLOR_SITING_ITEM_KEY, 0x3303, UInt8, false, "ColorSiting");
    item!(m, CDCI_DESCRIPTOR_SET_KEY, CDCI_BLACK_REF_LEVEL_ITEM_KEY, 0x3304, UInt32, false, "BlackRefLevel");
    item!(m, CDCI_DESCRIPTOR_SET_KEY, CDCI_WHITE_REF_LEVEL_ITEM_KEY, 0x3305, UInt32, false, "WhiteRefLevel");
    item!(m, CDCI_DESCRIPTOR_SET_KEY, CDCI_COLOR_RANGE_ITEM_KEY, 0x3306, UInt32, false, "ColorRange");

    set!(m, RGBA_DESCRIPTOR_SET_KEY, Some(GENERIC_PICTURE_DESCRIPTOR_SET_KEY), "RGBAEssenceDescriptor");

    set!(m, GENERIC_SOUND_DESCRIPTOR_SET_KEY, Some(FILE_DESCRIPTOR_SET_KEY), "GenericSoundEssenceDescriptor");
    item!(m, GENERIC_SOUND_DESCRIPTOR_SET_KEY, SD_AUDIO_SAMPLING_RATE_ITEM_KEY, 0x3d03, Rational, true, "AudioSamplingRate");
    item!(m, GENERIC_SOUND_DESCRIPTOR_SET_KEY, SD_LOCKED_ITEM_KEY, 0x3d02, Boolean, false, "Locked");
    item!(m, GENERIC_SOUND_DESCRIPTOR_SET_KEY, SD_AUDIO_REF_LEVEL_ITEM_KEY, 0x3d04, Int8, false, "AudioRefLevel");
    item!(m, GENERIC_SOUND_DESCRIPTOR_SET_KEY, SD_CHANNEL_COUNT_ITEM_KEY, 0x3d07, UInt32, true, "ChannelCount");
    item!(m, GENERIC_SOUND_DESCRIPTOR_SET_KEY, SD_QUANTIZATION_BITS_ITEM_KEY, 0x3d01, UInt32, true, "QuantizationBits");
    item!(m, GENERIC_SOUND_DESCRIPTOR_SET_KEY, SD_SOUND_COMPRESSION_ITEM_KEY, 0x3d06, Ul, false, "SoundEssenceCompression");

    set!(m, GENERIC_DATA_DESCRIPTOR_SET_KEY, Some(FILE_DESCRIPTOR_SET_KEY), "GenericDataEssenceDescriptor");
    item!(m, GENERIC_DATA_DESCRIPTOR_SET_KEY, DD_DATA_ESSENCE_CODING_ITEM_KEY, 0x3e01, Ul, false, "DataEssenceCoding");

    set!(m, MULTIPLE_DESCRIPTOR_SET_KEY, Some(FILE_DESCRIPTOR_SET_KEY), "MultipleDescriptor");
    item!(m, MULTIPLE_DESCRIPTOR_SET_KEY, MD_SUB_DESCRIPTOR_UIDS_ITEM_KEY, 0x3f01, StrongRefArray, true, "FileDescriptors");

    set!(m, WAVE_AUDIO_DESCRIPTOR_SET_KEY, Some(GENERIC_SOUND_DESCRIPTOR_SET_KEY), "WaveAudioDescriptor");
    item!(m, WAVE_AUDIO_DESCRIPTOR_SET_KEY, WAVE_BLOCK_ALIGN_ITEM_KEY, 0x3d0a, UInt16, true, "BlockAlign");
    item!(m, WAVE_AUDIO_DESCRIPTOR_SET_KEY, WAVE_SEQUENCE_OFFSET_ITEM_KEY, 0x3d0b, UInt8, false, "SequenceOffset");
    item!(m, WAVE_AUDIO_DESCRIPTOR_SET_KEY, WAVE_AVG_BPS_ITEM_KEY, 0x3d09, UInt32, true, "AvgBps");
    item!(m, WAVE_AUDIO_DESCRIPTOR_SET_KEY, WAVE_CHANNEL_ASSIGNMENT_ITEM_KEY, 0x3d32, Ul, false, "ChannelAssignment");

    set!(m, AES3_AUDIO_DESCRIPTOR_SET_KEY, Some(WAVE_AUDIO_DESCRIPTOR_SET_KEY), "AES3AudioDescriptor");

    set!(m, MPEG2_VIDEO_DESCRIPTOR_SET_KEY, Some(CDCI_DESCRIPTOR_SET_KEY), "MPEG2VideoDescriptor");
    item!(m, MPEG2_VIDEO_DESCRIPTOR_SET_KEY, MPEG2_SINGLE_SEQUENCE_ITEM_KEY, 0, Boolean, false, "SingleSequence");
    item!(m, MPEG2_VIDEO_DESCRIPTOR_SET_KEY, MPEG2_CONSTANT_B_FRAMES_ITEM_KEY, 0, Boolean, false, "ConstantBFrames");
    item!(m, MPEG2_VIDEO_DESCRIPTOR_SET_KEY, MPEG2_CODED_CONTENT_TYPE_ITEM_KEY, 0, UInt8, false, "CodedContentType");
    item!(m, MPEG2_VIDEO_DESCRIPTOR_SET_KEY, MPEG2_LOW_DELAY_ITEM_KEY, 0, Boolean, false, "LowDelay");
    item!(m, MPEG2_VIDEO_DESCRIPTOR_SET_KEY, MPEG2_CLOSED_GOP_ITEM_KEY, 0, Boolean, false, "ClosedGOP");
    item!(m, MPEG2_VIDEO_DESCRIPTOR_SET_KEY, MPEG2_IDENTICAL_GOP_ITEM_KEY, 0, Boolean, false, "IdenticalGOP");
    item!(m, MPEG2_VIDEO_DESCRIPTOR_SET_KEY, MPEG2_MAX_GOP_ITEM_KEY, 0, UInt16, false, "MaxGOP");
    item!(m, MPEG2_VIDEO_DESCRIPTOR_SET_KEY, MPEG2_B_PICTURE_COUNT_ITEM_KEY, 0, UInt16, false, "BPictureCount");
    item!(m, MPEG2_VIDEO_DESCRIPTOR_SET_KEY, MPEG2_PROFILE_AND_LEVEL_ITEM_KEY, 0, UInt8, false, "ProfileAndLevel");
    item!(m, MPEG2_VIDEO_DESCRIPTOR_SET_KEY, MPEG2_BIT_RATE_ITEM_KEY, 0, UInt32, false, "BitRate");

    set!(m, ANC_DATA_DESCRIPTOR_SET_KEY, Some(GENERIC_DATA_DESCRIPTOR_SET_KEY), "ANCDataDescriptor");
    set!(m, VBI_DATA_DESCRIPTOR_SET_KEY, Some(GENERIC_DATA_DESCRIPTOR_SET_KEY), "VBIDataDescriptor");

    set!(m, DC_TIMED_TEXT_DESCRIPTOR_SET_KEY, Some(GENERIC_DATA_DESCRIPTOR_SET_KEY), "DCTimedTextDescriptor");
    item!(m, DC_TIMED_TEXT_DESCRIPTOR_SET_KEY, TT_RESOURCE_ID_ITEM_KEY, 0, Uuid, true, "ResourceID");
    item!(m, DC_TIMED_TEXT_DESCRIPTOR_SET_KEY, TT_UCS_ENCODING_ITEM_KEY, 0, Utf16String, true, "UCSEncoding");
    item!(m, DC_TIMED_TEXT_DESCRIPTOR_SET_KEY, TT_NAMESPACE_URI_ITEM_KEY, 0, Utf16String, true, "NamespaceURI");
    item!(m, DC_TIMED_TEXT_DESCRIPTOR_SET_KEY, TT_LANGUAGES_ITEM_KEY, 0, Utf16String, false, "RFC5646LanguageTagList");

    set!(m, DC_TIMED_TEXT_RESOURCE_SUB_DESCRIPTOR_SET_KEY, Some(SUB_DESCRIPTOR_SET_KEY), "DCTimedTextResourceSubDescriptor");
    item!(m, DC_TIMED_TEXT_RESOURCE_SUB_DESCRIPTOR_SET_KEY, TT_ANC_RESOURCE_ID_ITEM_KEY, 0, Uuid, true, "AncillaryResourceID");
    item!(m, DC_TIMED_TEXT_RESOURCE_SUB_DESCRIPTOR_SET_KEY, TT_ANC_MIME_TYPE_ITEM_KEY, 0, Utf16String, true, "MIMEMediaType");
    item!(m, DC_TIMED_TEXT_RESOURCE_SUB_DESCRIPTOR_SET_KEY, TT_ANC_STREAM_ID_ITEM_KEY, 0, UInt32, true, "EssenceStreamID");

    set!(m, SUB_DESCRIPTOR_SET_KEY, Some(INTERCHANGE_OBJECT_SET_KEY), "SubDescriptor");

    set!(m, AVC_SUB_DESCRIPTOR_SET_KEY, Some(SUB_DESCRIPTOR_SET_KEY), "AVCSubDescriptor");
    item!(m, AVC_SUB_DESCRIPTOR_SET_KEY, AVC_DECODING_DELAY_ITEM_KEY, 0, UInt8, false, "AVCDecodingDelay");
    item!(m, AVC_SUB_DESCRIPTOR_SET_KEY, AVC_CODED_CONTENT_KIND_ITEM_KEY, 0, UInt8, false, "AVCCodedContentKind");
    item!(m, AVC_SUB_DESCRIPTOR_SET_KEY, AVC_CLOSED_GOP_ITEM_KEY, 0, Boolean, false, "AVCClosedGOPIndicator");
    item!(m, AVC_SUB_DESCRIPTOR_SET_KEY, AVC_PROFILE_ITEM_KEY, 0, UInt8, false, "AVCProfile");
    item!(m, AVC_SUB_DESCRIPTOR_SET_KEY, AVC_PROFILE_CONSTRAINT_ITEM_KEY, 0, UInt8, false, "AVCProfileConstraint");
    item!(m, AVC_SUB_DESCRIPTOR_SET_KEY, AVC_LEVEL_ITEM_KEY, 0, UInt8, false, "AVCLevel");
    item!(m, AVC_SUB_DESCRIPTOR_SET_KEY, AVC_MAX_BIT_RATE_ITEM_KEY, 0, UInt32, false, "AVCMaximumBitRate");
    item!(m, AVC_SUB_DESCRIPTOR_SET_KEY, AVC_SPS_FLAG_ITEM_KEY, 0, UInt8, false, "AVCSequenceParameterSetFlag");
    item!(m, AVC_SUB_DESCRIPTOR_SET_KEY, AVC_PPS_FLAG_ITEM_KEY, 0, UInt8, false, "AVCPictureParameterSetFlag");
    item!(m, AVC_SUB_DESCRIPTOR_SET_KEY, AVC_FRAME_HEADER_BYTES_ITEM_KEY, 0, Bytes, false, "FrameHeaderBytes");

    set!(m, JPEG2000_SUB_DESCRIPTOR_SET_KEY, Some(SUB_DESCRIPTOR_SET_KEY), "JPEG2000SubDescriptor");
    item!(m, JPEG2000_SUB_DESCRIPTOR_SET_KEY, J2K_RSIZ_ITEM_KEY, 0, UInt16, true, "Rsiz");
    item!(m, JPEG2000_SUB_DESCRIPTOR_SET_KEY, J2K_XSIZ_ITEM_KEY, 0, UInt32, true, "Xsiz");
    item!(m, JPEG2000_SUB_DESCRIPTOR_SET_KEY, J2K_YSIZ_ITEM_KEY, 0, UInt32, true, "Ysiz");
    item!(m, JPEG2000_SUB_DESCRIPTOR_SET_KEY, J2K_XOSIZ_ITEM_KEY, 0, UInt32, true, "XOsiz");
    item!(m, JPEG2000_SUB_DESCRIPTOR_SET_KEY, J2K_YOSIZ_ITEM_KEY, 0, UInt32, true, "YOsiz");
    item!(m, JPEG2000_SUB_DESCRIPTOR_SET_KEY, J2K_CSIZ_ITEM_KEY, 0, UInt16, true, "Csiz");

    set!(m, VC2_SUB_DESCRIPTOR_SET_KEY, Some(SUB_DESCRIPTOR_SET_KEY), "VC2SubDescriptor");
    item!(m, VC2_SUB_DESCRIPTOR_SET_KEY, VC2_MAJOR_VERSION_ITEM_KEY, 0, UInt32, true, "VC2MajorVersion");
    item!(m, VC2_SUB_DESCRIPTOR_SET_KEY, VC2_MINOR_VERSION_ITEM_KEY, 0, UInt32, true, "VC2MinorVersion");
    item!(m, VC2_SUB_DESCRIPTOR_SET_KEY, VC2_PROFILE_ITEM_KEY, 0, UInt32, true, "VC2Profile");
    item!(m, VC2_SUB_DESCRIPTOR_SET_KEY, VC2_LEVEL_ITEM_KEY, 0, UInt32, true, "VC2Level");
    item!(m, VC2_SUB_DESCRIPTOR_SET_KEY, VC2_SEQUENCE_HEADERS_IDENTICAL_ITEM_KEY, 0, Boolean, false, "VC2SequenceHeadersIdentical");
    item!(m, VC2_SUB_DESCRIPTOR_SET_KEY, VC2_COMPLETE_SEQUENCES_ITEM_KEY, 0, Boolean, false, "VC2EditUnitsAreCompleteSequences");

    set!(m, JPEGXS_SUB_DESCRIPTOR_SET_KEY, Some(SUB_DESCRIPTOR_SET_KEY), "JPEGXSSubDescriptor");
    item!(m, JPEGXS_SUB_DESCRIPTOR_SET_KEY, JXS_PPIH_ITEM_KEY, 0, UInt16, true, "JPEGXSPpih");
    item!(m, JPEGXS_SUB_DESCRIPTOR_SET_KEY, JXS_PLEV_ITEM_KEY, 0, UInt16, true, "JPEGXSPlev");
    item!(m, JPEGXS_SUB_DESCRIPTOR_SET_KEY, JXS_WF_ITEM_KEY, 0, UInt16, true, "JPEGXSWf");
    item!(m, JPEGXS_SUB_DESCRIPTOR_SET_KEY, JXS_HF_ITEM_KEY, 0, UInt16, true, "JPEGXSHf");
    item!(m, JPEGXS_SUB_DESCRIPTOR_SET_KEY, JXS_NC_ITEM_KEY, 0, UInt8, true, "JPEGXSNc");
    item!(m, JPEGXS_SUB_DESCRIPTOR_SET_KEY, JXS_CW_ITEM_KEY, 0, UInt16, false, "JPEGXSCw");
    item!(m, JPEGXS_SUB_DESCRIPTOR_SET_KEY, JXS_SLH_ITEM_KEY, 0, UInt16, false, "JPEGXSSlh");

    Ok(())
}
