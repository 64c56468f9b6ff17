use crate::prelude::*;
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::cmp::Ordering;
use std::fmt;
use std::io::{Read, Write};
use uuid::Uuid;

/// Edit-unit position on a track, in edit rate units.
pub type Position = i64;
/// Duration in edit rate units.
pub type Length = i64;

/// 16-byte SMPTE universal label.
///
/// Byte 7 is the registry version and is ignored by [`Ul::matches`];
/// comparisons that must be byte-exact use `==`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ul(pub [u8; 16]);

impl Ul {
    pub const fn new(bytes: [u8; 16]) -> Ul {
        Ul(bytes)
    }

    pub const fn null() -> Ul {
        Ul([0; 16])
    }

    pub fn is_null(&self) -> bool {
        self.0 == [0; 16]
    }

    /// Equality mod registry version.
    pub fn matches(&self, other: &Ul) -> bool {
        for i in 0..16 {
            if i != 7 && self.0[i] != other.0[i] {
                return false;
            }
        }
        true
    }

    /// Prefix match mod registry version. Used for key family recognition.
    pub fn matches_prefix(&self, prefix: &[u8]) -> bool {
        debug_assert!(prefix.len() <= 16);
        for (i, b) in prefix.iter().enumerate() {
            if i != 7 && self.0[i] != *b {
                return false;
            }
        }
        true
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

impl Decode for Ul {
    fn from_reader<R: Read>(reader: &mut R) -> Result<Ul> {
        let mut bytes = [0u8; 16];
        reader.read_exact(&mut bytes)?;
        Ok(Ul(bytes))
    }
}

impl Encode for Ul {
    fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.0)?;
        Ok(())
    }
}

impl fmt::Debug for Ul {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ul({})", hex::encode(self.0))
    }
}

impl fmt::Display for Ul {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, chunk) in self.0.chunks(4).enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", hex::encode(chunk))?;
        }
        Ok(())
    }
}

pub(crate) fn read_uuid<R: Read>(reader: &mut R) -> Result<Uuid> {
    let mut bytes = [0u8; 16];
    reader.read_exact(&mut bytes)?;
    Ok(Uuid::from_bytes(bytes))
}

pub(crate) fn write_uuid<W: Write>(writer: &mut W, uuid: &Uuid) -> Result<()> {
    writer.write_all(uuid.as_bytes())?;
    Ok(())
}

/// 32-byte unique material identifier: a 16-byte prefix identifying the
/// identifier format and instance, followed by a 16-byte material number.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Umid(pub [u8; 32]);

/// SMPTE UMID prefix for a UUID material number and no defined instance
/// generation method.
const UMID_PREFIX: [u8; 16] = [
    0x06, 0x0a, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x05, 0x01, 0x01, 0x0f, 0x20, 0x13, 0x00, 0x00, 0x00,
];

impl Umid {
    pub const fn new(bytes: [u8; 32]) -> Umid {
        Umid(bytes)
    }

    pub const fn null() -> Umid {
        Umid([0; 32])
    }

    /// Generate a UMID with a fresh v4 UUID as material number.
    pub fn generate() -> Umid {
        Umid::with_material(Uuid::new_v4())
    }

    pub fn with_material(material: Uuid) -> Umid {
        let mut bytes = [0u8; 32];
        bytes[..16].copy_from_slice(&UMID_PREFIX);
        bytes[16..].copy_from_slice(material.as_bytes());
        Umid(bytes)
    }

    pub fn is_null(&self) -> bool {
        self.0 == [0; 32]
    }

    pub fn material_number(&self) -> [u8; 16] {
        let mut material = [0u8; 16];
        material.copy_from_slice(&self.0[16..]);
        material
    }
}

impl Decode for Umid {
    fn from_reader<R: Read>(reader: &mut R) -> Result<Umid> {
        let mut bytes = [0u8; 32];
        reader.read_exact(&mut bytes)?;
        Ok(Umid(bytes))
    }
}

impl Encode for Umid {
    fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.0)?;
        Ok(())
    }
}

impl fmt::Debug for Umid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Umid({})", hex::encode(self.0))
    }
}

/// Signed numerator over unsigned denominator. Edit rates and aspect
/// ratios are kept exact; comparison uses cross multiplication.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Rational {
    pub num: i32,
    pub den: u32,
}

impl Rational {
    pub const fn new(num: i32, den: u32) -> Rational {
        Rational { num, den }
    }

    pub fn is_zero(&self) -> bool {
        self.num == 0
    }

    /// Cross-multiplied equality, e.g. 25/1 == 50/2.
    pub fn same_value(&self, other: &Rational) -> bool {
        self.num as i64 * other.den as i64 == other.num as i64 * self.den as i64
    }

    pub fn reduce(&self) -> Rational {
        if self.num == 0 || self.den == 0 {
            return *self;
        }
        let g = gcd(self.num.unsigned_abs() as u64, self.den as u64) as u32;
        Rational {
            num: self.num / g as i32,
            den: self.den / g,
        }
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Rational) -> Option<Ordering> {
        let lhs = self.num as i64 * other.den as i64;
        let rhs = other.num as i64 * self.den as i64;
        lhs.partial_cmp(&rhs)
    }
}

impl Decode for Rational {
    fn from_reader<R: Read>(reader: &mut R) -> Result<Rational> {
        let num = reader.read_i32::<BigEndian>()?;
        let den = reader.read_u32::<BigEndian>()?;
        Ok(Rational { num, den })
    }
}

impl Encode for Rational {
    fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_i32::<BigEndian>(self.num)?;
        writer.write_u32::<BigEndian>(self.den)?;
        Ok(())
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

pub(crate) fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// 8-byte timestamp: year, month, day, hour, minute, second, 1/250s.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Timestamp {
    pub year: i16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub min: u8,
    pub sec: u8,
    pub qmsec: u8,
}

impl Decode for Timestamp {
    fn from_reader<R: Read>(reader: &mut R) -> Result<Timestamp> {
        Ok(Timestamp {
            year: reader.read_i16::<BigEndian>()?,
            month: reader.read_u8()?,
            day: reader.read_u8()?,
            hour: reader.read_u8()?,
            min: reader.read_u8()?,
            sec: reader.read_u8()?,
            qmsec: reader.read_u8()?,
        })
    }
}

impl Encode for Timestamp {
    fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_i16::<BigEndian>(self.year)?;
        writer.write_u8(self.month)?;
        writer.write_u8(self.day)?;
        writer.write_u8(self.hour)?;
        writer.write_u8(self.min)?;
        writer.write_u8(self.sec)?;
        writer.write_u8(self.qmsec)?;
        Ok(())
    }
}

/// 10-byte product version: major, minor, patch, build, release kind.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct ProductVersion {
    pub major: u16,
    pub minor: u16,
    pub patch: u16,
    pub build: u16,
    pub release: u16,
}

impl Decode for ProductVersion {
    fn from_reader<R: Read>(reader: &mut R) -> Result<ProductVersion> {
        Ok(ProductVersion {
            major: reader.read_u16::<BigEndian>()?,
            minor: reader.read_u16::<BigEndian>()?,
            patch: reader.read_u16::<BigEndian>()?,
            build: reader.read_u16::<BigEndian>()?,
            release: reader.read_u16::<BigEndian>()?,
        })
    }
}

impl Encode for ProductVersion {
    fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_u16::<BigEndian>(self.major)?;
        writer.write_u16::<BigEndian>(self.minor)?;
        writer.write_u16::<BigEndian>(self.patch)?;
        writer.write_u16::<BigEndian>(self.build)?;
        writer.write_u16::<BigEndian>(self.release)?;
        Ok(())
    }
}

/// Generic-container track number: item type, element count, element type,
/// element number packed big-endian into the last four key bytes.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TrackNumber {
    pub item_type: u8,
    pub element_count: u8,
    pub element_type: u8,
    pub element_number: u8,
}

impl TrackNumber {
    pub fn to_u32(&self) -> u32 {
        ((self.item_type as u32) << 24)
            | ((self.element_count as u32) << 16)
            | ((self.element_type as u32) << 8)
            | self.element_number as u32
    }

    pub fn from_u32(value: u32) -> TrackNumber {
        TrackNumber {
            item_type: (value >> 24) as u8,
            element_count: (value >> 16) as u8,
            element_type: (value >> 8) as u8,
            element_number: value as u8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ul_matches_ignores_registry_version() {
        let a = Ul::new([
            0x06, 0x0e, 0x2b, 0x34, 0x02, 0x05, 0x01, 0x01, 0x0d, 0x01, 0x02, 0x01, 0x01, 0x02,
            0x04, 0x00,
        ]);
        let mut b = a;
        b.0[7] = 0x03;
        assert_ne!(a, b);
        assert!(a.matches(&b));
        assert!(a.matches_prefix(&b.0[..13]));
    }

    #[test]
    fn rational_compare_cross_multiplies() {
        let a = Rational::new(30000, 1001);
        let b = Rational::new(25, 1);
        assert!(a > b);
        assert!(a.same_value(&Rational::new(60000, 2002)));
        assert_eq!(Rational::new(50, 2).reduce(), Rational::new(25, 1));
    }

    #[test]
    fn track_number_round_trip() {
        let n = TrackNumber {
            item_type: 0x15,
            element_count: 0x01,
            element_type: 0x05,
            element_number: 0x01,
        };
        assert_eq!(n.to_u32(), 0x15010501);
        assert_eq!(TrackNumber::from_u32(0x15010501), n);
    }
}
