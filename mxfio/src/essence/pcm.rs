//! PCM audio: no bitstream parsing. The work here is the integer sample
//! sequence that packs a non-integer samples-per-frame ratio into
//! frame-wrapped elements, plus the AES-3 element layout helpers.

use crate::error::MxfError;
use crate::prelude::*;
use crate::types::{gcd, Rational};

/// Samples carried by each consecutive edit unit, repeating. For frame
/// rates whose samples per edit unit is integral this is a single
/// element; otherwise the cycle distributes the remainder, e.g.
/// 48 kHz at 30000/1001 gives {1602, 1601, 1602, 1601, 1602}.
pub fn sample_sequence(edit_rate: Rational, sampling_rate: Rational) -> Result<Vec<u32>> {
    if edit_rate.num <= 0 || edit_rate.den == 0 || sampling_rate.num <= 0 {
        return Err(MxfError::LogicError("invalid rate for sample sequence"));
    }
    if sampling_rate.den != 1 {
        return Err(MxfError::LogicError("non-integer sampling rate"));
    }
    let samples_num = sampling_rate.num as u64 * edit_rate.den as u64;
    let frame_num = edit_rate.num as u64;

    let cycle = (frame_num / gcd(samples_num, frame_num)) as usize;
    let mut sequence = Vec::with_capacity(cycle);
    for i in 0..cycle as u64 {
        let before = (i * samples_num + frame_num / 2) / frame_num;
        let after = ((i + 1) * samples_num + frame_num / 2) / frame_num;
        sequence.push((after - before) as u32);
    }
    Ok(sequence)
}

/// Total samples in one full cycle.
pub fn sequence_total(sequence: &[u32]) -> u64 {
    sequence.iter().map(|&n| n as u64).sum()
}

/// Samples consumed by the `count` edit units preceding `position`.
pub fn samples_before(sequence: &[u32], position: i64) -> i64 {
    if sequence.is_empty() || position <= 0 {
        return 0;
    }
    let cycle = sequence.len() as i64;
    let total = sequence_total(sequence) as i64;
    let full = position / cycle;
    let mut samples = full * total;
    for i in 0..(position % cycle) as usize {
        samples += sequence[i] as i64;
    }
    samples
}

/// Pack whole sample frames of interleaved little-endian PCM into an
/// AES-3 element: FVUCP validity byte, little-endian sample count and
/// channel valid flags, then one 32-bit word per channel per sample.
pub fn pcm_to_aes3(pcm: &[u8], bits_per_sample: u32, channel_count: u8) -> Result<Vec<u8>> {
    if channel_count == 0 || channel_count > 8 {
        return Err(MxfError::LogicError("aes3 carries 1 to 8 channels"));
    }
    if bits_per_sample == 0 || bits_per_sample > 24 {
        return Err(MxfError::LogicError("aes3 carries up to 24 bits per sample"));
    }
    let bytes_per_sample = ((bits_per_sample + 7) / 8) as usize;
    let block = bytes_per_sample * channel_count as usize;
    if pcm.len() % block != 0 {
        return Err(MxfError::LogicError("pcm data does not fill whole sample frames"));
    }
    let sample_count = pcm.len() / block;
    if sample_count > u16::MAX as usize {
        return Err(MxfError::CapacityExceeded("aes3 sample count"));
    }

    let mut element = Vec::with_capacity(4 + sample_count * channel_count as usize * 4);
    element.push(0); // FVUCP flags: all samples valid
    element.extend_from_slice(&(sample_count as u16).to_le_bytes());
    element.push(((1u16 << channel_count) - 1) as u8);
    for sample in 0..sample_count {
        for channel in 0..channel_count as usize {
            let at = sample * block + channel * bytes_per_sample;
            let mut value: u32 = 0;
            for (i, byte) in pcm[at..at + bytes_per_sample].iter().enumerate() {
                value |= (*byte as u32) << (8 * i);
            }
            // left-justify above the 4-bit preamble
            let word = (value << (24 - bits_per_sample)) << 4;
            element.extend_from_slice(&word.to_le_bytes());
        }
    }
    Ok(element)
}

/// Unpack an AES-3 element back to interleaved PCM across all channels.
pub fn aes3_to_mc_pcm(data: &[u8], bits_per_sample: u32, channel_count: u8) -> Result<Vec<u8>> {
    let bytes_per_sample = ((bits_per_sample + 7) / 8) as usize;
    let mut channels = Vec::with_capacity(channel_count as usize);
    for channel in 0..channel_count {
        channels.push(aes3_to_pcm(data, bits_per_sample, channel_count, channel)?);
    }
    let sample_count = aes3_sample_count(data)? as usize;
    let mut pcm = Vec::with_capacity(sample_count * bytes_per_sample * channel_count as usize);
    for sample in 0..sample_count {
        let at = sample * bytes_per_sample;
        for channel in &channels {
            pcm.extend_from_slice(&channel[at..at + bytes_per_sample]);
        }
    }
    Ok(pcm)
}

/// AES-3 element header: FVUCP validity byte, a little-endian 16-bit
/// sample count and the channel valid flags, then 32-bit channel words
/// per sample.
pub fn aes3_sample_count(data: &[u8]) -> Result<u16> {
    if data.len() < 4 {
        return Err(MxfError::malformed(0, "aes3 element too short"));
    }
    Ok(u16::from_le_bytes([data[1], data[2]]))
}

pub fn aes3_channel_valid_flags(data: &[u8]) -> Result<u8> {
    if data.len() < 4 {
        return Err(MxfError::malformed(0, "aes3 element too short"));
    }
    Ok(data[3])
}

/// Extract plain PCM for one channel from an AES-3 element. Channel
/// words hold the sample left-justified after the 4-bit preamble.
pub fn aes3_to_pcm(
    data: &[u8],
    bits_per_sample: u32,
    channel_count: u8,
    channel: u8,
) -> Result<Vec<u8>> {
    if channel >= channel_count {
        return Err(MxfError::LogicError("aes3 channel out of range"));
    }
    let sample_count = aes3_sample_count(data)? as usize;
    let bytes_per_sample = ((bits_per_sample + 7) / 8) as usize;
    let body = &data[4..];
    let stride = channel_count as usize * 4;
    if body.len() < sample_count * stride {
        return Err(MxfError::malformed(0, "aes3 element truncated"));
    }

    let mut pcm = Vec::with_capacity(sample_count * bytes_per_sample);
    for sample in 0..sample_count {
        let at = sample * stride + channel as usize * 4;
        let word = u32::from_le_bytes([body[at], body[at + 1], body[at + 2], body[at + 3]]);
        // drop the preamble/status nibble, keep the top bits_per_sample
        let value = (word >> 4) >> (24 - bits_per_sample);
        for i in 0..bytes_per_sample {
            pcm.push((value >> (8 * i)) as u8);
        }
    }
    Ok(pcm)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ntsc_sequence() {
        let sequence =
            sample_sequence(Rational::new(30000, 1001), Rational::new(48000, 1)).unwrap();
        assert_eq!(sequence, vec![1602, 1601, 1602, 1601, 1602]);
        assert_eq!(sequence_total(&sequence), 8008);
    }

    #[test]
    fn integral_rates_collapse_to_one_element() {
        let sequence = sample_sequence(Rational::new(25, 1), Rational::new(48000, 1)).unwrap();
        assert_eq!(sequence, vec![1920]);
        let sequence = sample_sequence(Rational::new(24, 1), Rational::new(48000, 1)).unwrap();
        assert_eq!(sequence, vec![2000]);
    }

    #[test]
    fn sequence_identity_holds() {
        // sum(S) * F_num == len(S) * R * F_den for every supported rate
        for (num, den) in [(24000, 1001), (30000, 1001), (60000, 1001), (25, 1), (50, 1)] {
            let edit_rate = Rational::new(num, den);
            let sequence = sample_sequence(edit_rate, Rational::new(48000, 1)).unwrap();
            let lhs = sequence_total(&sequence) * num as u64;
            let rhs = sequence.len() as u64 * 48000 * den as u64;
            assert_eq!(lhs, rhs, "rate {num}/{den}");
        }
    }

    #[test]
    fn samples_before_positions() {
        let sequence =
            sample_sequence(Rational::new(30000, 1001), Rational::new(48000, 1)).unwrap();
        assert_eq!(samples_before(&sequence, 0), 0);
        assert_eq!(samples_before(&sequence, 1), 1602);
        assert_eq!(samples_before(&sequence, 5), 8008);
        assert_eq!(samples_before(&sequence, 7), 8008 + 1602 + 1601);
    }

    #[test]
    fn aes3_layout() {
        let mut element = vec![0u8; 4 + 2 * 2 * 4];
        element[1] = 2; // two samples, little endian
        element[3] = 0b0000_0011; // both channels valid
        assert_eq!(aes3_sample_count(&element).unwrap(), 2);
        assert_eq!(aes3_channel_valid_flags(&element).unwrap(), 3);
        let pcm = aes3_to_pcm(&element, 16, 2, 1).unwrap();
        assert_eq!(pcm.len(), 4);
    }

    #[test]
    fn aes3_pack_round_trip() {
        // four stereo 16-bit sample frames
        let pcm: Vec<u8> = (0..4 * 2 * 2).map(|i| (i * 7 + 1) as u8).collect();
        let element = pcm_to_aes3(&pcm, 16, 2).unwrap();
        assert_eq!(element.len(), 4 + 4 * 2 * 4);
        assert_eq!(aes3_sample_count(&element).unwrap(), 4);
        assert_eq!(aes3_channel_valid_flags(&element).unwrap(), 0b0000_0011);
        assert_eq!(aes3_to_mc_pcm(&element, 16, 2).unwrap(), pcm);

        // single channel extraction deinterleaves
        let right = aes3_to_pcm(&element, 16, 2, 1).unwrap();
        let expected: Vec<u8> = pcm.chunks(4).flat_map(|frame| frame[2..4].to_vec()).collect();
        assert_eq!(right, expected);
    }

    #[test]
    fn aes3_pack_rejects_bad_shapes() {
        assert!(pcm_to_aes3(&[0u8; 6], 16, 2).is_err()); // partial sample frame
        assert!(pcm_to_aes3(&[0u8; 8], 32, 2).is_err()); // too deep
        assert!(pcm_to_aes3(&[0u8; 8], 16, 0).is_err());
    }
}
