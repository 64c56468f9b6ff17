//! Well-known universal labels and keys.
//!
//! Set and item keys used by the header metadata live in
//! [`crate::model::keys`]; this module holds the non-metadata wire keys,
//! operational patterns, essence container labels and data definitions.

use crate::types::Ul;

macro_rules! ul {
    ($($b:literal)*) => {
        Ul::new([$($b),*])
    };
}
pub(crate) use ul;

/// First 13 bytes shared by all partition pack keys; byte 13 is the
/// partition kind and byte 14 the status.
pub const PARTITION_PACK_PREFIX: [u8; 13] = [
    0x06, 0x0e, 0x2b, 0x34, 0x02, 0x05, 0x01, 0x01, 0x0d, 0x01, 0x02, 0x01, 0x01,
];

pub const FILL_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x02 0x03 0x01 0x02 0x10 0x01 0x00 0x00 0x00);

pub const PRIMER_PACK_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x02 0x05 0x01 0x01 0x0d 0x01 0x02 0x01 0x01 0x05 0x01 0x00);

pub const INDEX_TABLE_SEGMENT_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x02 0x53 0x01 0x01 0x0d 0x01 0x02 0x01 0x01 0x10 0x01 0x00);

pub const RANDOM_INDEX_PACK_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x02 0x05 0x01 0x01 0x0d 0x01 0x02 0x01 0x01 0x11 0x01 0x00);

/// Generic stream partition pack: a body partition kind with the generic
/// stream status byte.
pub const GENERIC_STREAM_PARTITION_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x02 0x05 0x01 0x01 0x0d 0x01 0x02 0x01 0x01 0x03 0x11 0x00);

/// Generic stream payload element.
pub const GENERIC_STREAM_DATA_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x02 0x01 0x01 0x0d 0x01 0x05 0x09 0x01 0x00 0x00 0x00);

/// First 12 bytes of every generic-container essence element key; the
/// last four bytes carry the track number.
pub const ESSENCE_ELEMENT_PREFIX: [u8; 12] = [
    0x06, 0x0e, 0x2b, 0x34, 0x01, 0x02, 0x01, 0x01, 0x0d, 0x01, 0x03, 0x01,
];

pub const ESSENCE_ELEMENT_BASE_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x02 0x01 0x01 0x0d 0x01 0x03 0x01 0x00 0x00 0x00 0x00);

// Operational patterns.

pub const OP_1A: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x04 0x01 0x01 0x01 0x0d 0x01 0x02 0x01 0x01 0x01 0x09 0x00);

pub const OP_ATOM: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x04 0x01 0x01 0x02 0x0d 0x01 0x02 0x01 0x10 0x00 0x00 0x00);

pub const OP_PREFIX: [u8; 12] = [
    0x06, 0x0e, 0x2b, 0x34, 0x04, 0x01, 0x01, 0x01, 0x0d, 0x01, 0x02, 0x01,
];

// Data definitions.

pub const DATA_DEF_PICTURE: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x04 0x01 0x01 0x01 0x01 0x03 0x02 0x02 0x01 0x00 0x00 0x00);

pub const DATA_DEF_SOUND: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x04 0x01 0x01 0x01 0x01 0x03 0x02 0x02 0x02 0x00 0x00 0x00);

pub const DATA_DEF_TIMECODE: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x04 0x01 0x01 0x01 0x01 0x03 0x02 0x01 0x01 0x00 0x00 0x00);

pub const DATA_DEF_DATA: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x04 0x01 0x01 0x01 0x01 0x03 0x02 0x02 0x03 0x00 0x00 0x00);

// Essence container labels. Byte 14 of the frame/clip wrapped pairs is
// the wrapping kind (0x01 frame, 0x02 clip) where the mapping defines one.

pub const EC_BWF_FRAME_WRAPPED: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x04 0x01 0x01 0x01 0x0d 0x01 0x03 0x01 0x02 0x06 0x01 0x00);

pub const EC_BWF_CLIP_WRAPPED: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x04 0x01 0x01 0x01 0x0d 0x01 0x03 0x01 0x02 0x06 0x02 0x00);

pub const EC_AES3_FRAME_WRAPPED: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x04 0x01 0x01 0x01 0x0d 0x01 0x03 0x01 0x02 0x06 0x03 0x00);

pub const EC_MPEG_ES_FRAME_WRAPPED: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x04 0x01 0x01 0x02 0x0d 0x01 0x03 0x01 0x02 0x04 0x60 0x01);

pub const EC_AVC_FRAME_WRAPPED: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x04 0x01 0x01 0x0a 0x0d 0x01 0x03 0x01 0x02 0x10 0x60 0x01);

pub const EC_DV_FRAME_WRAPPED: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x04 0x01 0x01 0x01 0x0d 0x01 0x03 0x01 0x02 0x02 0x7f 0x01);

pub const EC_DV_CLIP_WRAPPED: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x04 0x01 0x01 0x01 0x0d 0x01 0x03 0x01 0x02 0x02 0x7f 0x02);

pub const EC_UNC_FRAME_WRAPPED: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x04 0x01 0x01 0x01 0x0d 0x01 0x03 0x01 0x02 0x05 0x7f 0x01);

pub const EC_VC2_FRAME_WRAPPED: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x04 0x01 0x01 0x0d 0x0d 0x01 0x03 0x01 0x02 0x15 0x01 0x00);

pub const EC_VC3_FRAME_WRAPPED: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x04 0x01 0x01 0x0a 0x0d 0x01 0x03 0x01 0x02 0x11 0x01 0x00);

pub const EC_JPEG2000_FRAME_WRAPPED: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x04 0x01 0x01 0x07 0x0d 0x01 0x03 0x01 0x02 0x0c 0x01 0x00);

pub const EC_JPEGXS_FRAME_WRAPPED: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x04 0x01 0x01 0x0d 0x0d 0x01 0x03 0x01 0x02 0x21 0x01 0x00);

pub const EC_TIMED_TEXT_CLIP_WRAPPED: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x04 0x01 0x01 0x0a 0x0d 0x01 0x03 0x01 0x02 0x13 0x01 0x01);

pub const EC_ANC_FRAME_WRAPPED: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x04 0x01 0x01 0x09 0x0d 0x01 0x03 0x01 0x02 0x0e 0x00 0x00);

/// Multiple-wrappings label used on the Preface when more than one
/// essence container appears in the file.
pub const EC_MULTIPLE_WRAPPINGS: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x04 0x01 0x01 0x03 0x0d 0x01 0x03 0x01 0x02 0x7f 0x01 0x00);

// Codec / picture essence coding labels.

pub const CODING_MPEG2_MP_ML: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x04 0x01 0x01 0x03 0x04 0x01 0x02 0x02 0x01 0x01 0x11 0x00);

pub const CODING_MPEG2_422P_HL: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x04 0x01 0x01 0x03 0x04 0x01 0x02 0x02 0x01 0x04 0x03 0x00);

pub const CODING_AVC_HIGH_422_INTRA: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x04 0x01 0x01 0x0a 0x04 0x01 0x02 0x02 0x01 0x32 0x30 0x01);

pub const CODING_DV_BASE: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x04 0x01 0x01 0x01 0x04 0x01 0x02 0x02 0x02 0x00 0x00 0x00);

pub const CODING_VC2: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x04 0x01 0x01 0x0d 0x04 0x01 0x02 0x02 0x03 0x03 0x01 0x00);

pub const CODING_VC3: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x04 0x01 0x01 0x0a 0x04 0x01 0x02 0x02 0x71 0x00 0x00 0x00);

pub const CODING_JPEG2000: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x04 0x01 0x01 0x07 0x04 0x01 0x02 0x02 0x03 0x01 0x01 0x00);

pub const CODING_JPEGXS: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x04 0x01 0x01 0x0d 0x04 0x01 0x02 0x02 0x03 0x09 0x01 0x00);

pub const CODING_UNC_SD: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x04 0x01 0x01 0x01 0x04 0x01 0x02 0x01 0x01 0x00 0x00 0x00);

pub const SOUND_CODING_PCM: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x04 0x01 0x01 0x01 0x04 0x02 0x02 0x01 0x00 0x00 0x00 0x00);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_prefix_matches_all_partition_kinds() {
        let mut key = GENERIC_STREAM_PARTITION_KEY;
        assert!(key.matches_prefix(&PARTITION_PACK_PREFIX));
        key.0[13] = 0x02;
        assert!(key.matches_prefix(&PARTITION_PACK_PREFIX));
        assert!(!FILL_KEY.matches_prefix(&PARTITION_PACK_PREFIX));
    }
}
