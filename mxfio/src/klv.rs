use crate::error::MxfError;
use crate::labels::{FILL_KEY, PARTITION_PACK_PREFIX};
use crate::prelude::*;
use crate::types::Ul;
use byteorder::{ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

pub const KEY_SIZE: u64 = 16;
/// Smallest possible filler triple: 16 key bytes plus a 1-byte length.
pub const MIN_FILL_SIZE: u64 = KEY_SIZE + 1;
/// Largest BER length encoding: length byte plus 8 value bytes.
pub const MAX_LLEN: u8 = 9;

/// Key and BER-encoded length of one KLV triple. The value itself is
/// consumed by the caller through a length-limited `take` view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KlvHeader {
    pub key: Ul,
    pub llen: u8,
    pub len: u64,
}

impl KlvHeader {
    pub fn new(key: Ul, len: u64) -> KlvHeader {
        KlvHeader { key, llen: 0, len }
    }

    pub fn with_llen(key: Ul, llen: u8, len: u64) -> KlvHeader {
        KlvHeader { key, llen, len }
    }

    /// Bytes occupied by key and length fields.
    pub fn header_size(&self) -> u64 {
        let llen = if self.llen == 0 {
            min_llen(self.len)
        } else {
            self.llen
        };
        KEY_SIZE + llen as u64
    }

    pub fn is_fill(&self) -> bool {
        self.key.matches(&FILL_KEY)
    }

    pub fn is_partition_pack(&self) -> bool {
        self.key.matches_prefix(&PARTITION_PACK_PREFIX)
    }
}

impl Decode for KlvHeader {
    fn from_reader<R: Read>(reader: &mut R) -> Result<KlvHeader> {
        let key = Ul::from_reader(reader)?;
        let (len, llen) = read_ber_length(reader)?;
        Ok(KlvHeader { key, llen, len })
    }
}

impl Encode for KlvHeader {
    fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        self.key.write_to(writer)?;
        write_ber_length(writer, self.len, self.llen)?;
        Ok(())
    }
}

/// Decode a BER length. Returns the length and the number of bytes the
/// encoding occupied. Short form is a single byte below 0x80; long form
/// is `0x80 | n` followed by `n` big-endian bytes.
pub fn read_ber_length<R: Read>(reader: &mut R) -> Result<(u64, u8)> {
    let first = reader.read_u8()?;
    if first < 0x80 {
        return Ok((first as u64, 1));
    }
    let count = (first & 0x7f) as usize;
    if count == 0 || count > 8 {
        return Err(MxfError::malformed(0, "invalid BER length"));
    }
    let mut len: u64 = 0;
    for _ in 0..count {
        len = (len << 8) | reader.read_u8()? as u64;
    }
    if len > i64::MAX as u64 {
        return Err(MxfError::malformed(0, "KLV length exceeds 2^63-1"));
    }
    Ok((len, count as u8 + 1))
}

/// Encode a BER length. `llen == 0` selects the minimal encoding;
/// otherwise the fixed `llen`-byte form is used, which keeps the header
/// size stable for lengths that are back-patched later.
pub fn write_ber_length<W: Write>(writer: &mut W, len: u64, llen: u8) -> Result<u8> {
    let llen = if llen == 0 { min_llen(len) } else { llen };
    if llen > MAX_LLEN {
        return Err(MxfError::LogicError("BER length llen out of range"));
    }
    if llen == 1 {
        if len >= 0x80 {
            return Err(MxfError::LogicError("length does not fit short-form BER"));
        }
        writer.write_u8(len as u8)?;
        return Ok(1);
    }
    let count = llen - 1;
    if count < 8 && len >= 1u64 << (count * 8) {
        return Err(MxfError::LogicError("length does not fit fixed llen"));
    }
    writer.write_u8(0x80 | count)?;
    for i in (0..count).rev() {
        writer.write_u8((len >> (i * 8)) as u8)?;
    }
    Ok(llen)
}

pub fn min_llen(len: u64) -> u8 {
    if len < 0x80 {
        return 1;
    }
    let mut count = 0;
    let mut v = len;
    while v > 0 {
        count += 1;
        v >>= 8;
    }
    count + 1
}

/// Emit a filler KLV occupying exactly `size` bytes, zero value bytes
/// included. `size` must be at least [`MIN_FILL_SIZE`].
pub fn write_fill<W: Write>(writer: &mut W, size: u64) -> Result<()> {
    if size < MIN_FILL_SIZE {
        return Err(MxfError::LogicError("fill size below minimum KLV size"));
    }
    // pick the smallest llen whose encoding leaves a representable value size
    let mut llen = 1u8;
    loop {
        let value_len = size - KEY_SIZE - llen as u64;
        let fits = if llen == 1 {
            value_len < 0x80
        } else {
            let count = llen - 1;
            count >= 8 || value_len < 1u64 << (count * 8)
        };
        if fits {
            FILL_KEY.write_to(writer)?;
            write_ber_length(writer, value_len, llen)?;
            let zeros = [0u8; 1024];
            let mut remaining = value_len;
            while remaining > 0 {
                let n = remaining.min(zeros.len() as u64) as usize;
                writer.write_all(&zeros[..n])?;
                remaining -= n as u64;
            }
            return Ok(());
        }
        llen += 1;
        if llen > MAX_LLEN {
            return Err(MxfError::LogicError("fill size not encodable"));
        }
    }
}
