use crate::prelude::*;
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

pub(crate) fn take<R: Read>(reader: &mut R, len: usize) -> std::io::Result<Vec<u8>> {
    let mut r = Vec::with_capacity(len);
    let got = std::io::copy(&mut reader.take(len as u64), &mut r)?;
    if got < len as u64 {
        return Err(std::io::ErrorKind::UnexpectedEof.into());
    }
    Ok(r)
}

pub(crate) fn skip<R: Read>(reader: &mut R, len: u64) -> std::io::Result<u64> {
    std::io::copy(&mut reader.take(len), &mut std::io::sink())
}

/// Container-internal strings are UTF-16BE. Code units are preserved as
/// stored; no normalisation is applied. A trailing NUL terminator is
/// dropped on read and appended on write.
pub(crate) fn read_utf16_string<R: Read>(reader: &mut R, byte_len: usize) -> Result<String> {
    let mut units = Vec::with_capacity(byte_len / 2);
    for _ in 0..byte_len / 2 {
        units.push(reader.read_u16::<BigEndian>()?);
    }
    while units.last() == Some(&0) {
        units.pop();
    }
    Ok(String::from_utf16(&units)?)
}

pub(crate) fn write_utf16_string<W: Write>(writer: &mut W, value: &str) -> Result<()> {
    for unit in value.encode_utf16() {
        writer.write_u16::<BigEndian>(unit)?;
    }
    writer.write_u16::<BigEndian>(0)?;
    Ok(())
}

pub(crate) fn utf16_string_bytes(value: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(value.len() * 2 + 2);
    for unit in value.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    bytes.extend_from_slice(&[0, 0]);
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf16_round_trip() {
        let bytes = utf16_string_bytes("clip-1 ärger");
        let mut cursor = std::io::Cursor::new(&bytes);
        let back = read_utf16_string(&mut cursor, bytes.len()).unwrap();
        assert_eq!(back, "clip-1 ärger");
    }

    #[test]
    fn take_short_read_is_eof() {
        let data = [1u8, 2, 3];
        let err = take(&mut &data[..], 5).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::UnexpectedEof);
    }
}
