use crate::prelude::*;
use std::fs::{File, OpenOptions};
use std::io::{Cursor, Read, Seek, SeekFrom, Write};
use std::path::Path;

/// Positioned byte stream used by the container engine.
///
/// Blocking happens only inside these calls; the engine itself never
/// suspends. Closing the underlying stream from another context surfaces
/// as an I/O error on the next call.
pub trait MxfFile: Read + Write + Seek {
    fn size(&mut self) -> Result<u64>;

    fn is_seekable(&self) -> bool {
        true
    }

    fn position(&mut self) -> Result<u64> {
        Ok(self.stream_position()?)
    }
}

/// Growable in-memory file.
#[derive(Default)]
pub struct MemoryFile {
    cursor: Cursor<Vec<u8>>,
}

impl MemoryFile {
    pub fn new() -> MemoryFile {
        MemoryFile::default()
    }

    pub fn from_data(data: Vec<u8>) -> MemoryFile {
        MemoryFile {
            cursor: Cursor::new(data),
        }
    }

    pub fn data(&self) -> &[u8] {
        self.cursor.get_ref()
    }

    pub fn into_data(self) -> Vec<u8> {
        self.cursor.into_inner()
    }

    /// Drop everything from `size` onwards. Test and salvage helper.
    pub fn truncate(&mut self, size: u64) {
        self.cursor.get_mut().truncate(size as usize);
    }
}

impl Read for MemoryFile {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.cursor.read(buf)
    }
}

impl Write for MemoryFile {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.cursor.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.cursor.flush()
    }
}

impl Seek for MemoryFile {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        self.cursor.seek(pos)
    }
}

impl MxfFile for MemoryFile {
    fn size(&mut self) -> Result<u64> {
        Ok(self.cursor.get_ref().len() as u64)
    }
}

/// On-disk file.
pub struct DiskFile {
    file: File,
}

impl DiskFile {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<DiskFile> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        Ok(DiskFile { file })
    }

    pub fn open_read<P: AsRef<Path>>(path: P) -> Result<DiskFile> {
        Ok(DiskFile {
            file: File::open(path)?,
        })
    }

    pub fn open_modify<P: AsRef<Path>>(path: P) -> Result<DiskFile> {
        Ok(DiskFile {
            file: OpenOptions::new().read(true).write(true).open(path)?,
        })
    }
}

impl Read for DiskFile {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.file.read(buf)
    }
}

impl Write for DiskFile {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.file.flush()
    }
}

impl Seek for DiskFile {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        self.file.seek(pos)
    }
}

impl MxfFile for DiskFile {
    fn size(&mut self) -> Result<u64> {
        Ok(self.file.metadata()?.len())
    }
}

/// Wraps another file and feeds every byte read or written through a
/// CRC-32 checksum. Seeking invalidates the running digest for anything
/// but a forward scan, so the digest tracks sequential traffic only.
pub struct ChecksumFile<F: MxfFile> {
    inner: F,
    hasher: crc32fast::Hasher,
}

impl<F: MxfFile> ChecksumFile<F> {
    pub fn new(inner: F) -> ChecksumFile<F> {
        ChecksumFile {
            inner,
            hasher: crc32fast::Hasher::new(),
        }
    }

    pub fn update(&mut self, bytes: &[u8]) {
        self.hasher.update(bytes);
    }

    pub fn finalise(self) -> (F, u32) {
        (self.inner, self.hasher.finalize())
    }

    pub fn inner_mut(&mut self) -> &mut F {
        &mut self.inner
    }
}

impl<F: MxfFile> Read for ChecksumFile<F> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.hasher.update(&buf[..n]);
        Ok(n)
    }
}

impl<F: MxfFile> Write for ChecksumFile<F> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.hasher.update(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

impl<F: MxfFile> Seek for ChecksumFile<F> {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        self.inner.seek(pos)
    }
}

impl<F: MxfFile> MxfFile for ChecksumFile<F> {
    fn size(&mut self) -> Result<u64> {
        self.inner.size()
    }

    fn is_seekable(&self) -> bool {
        self.inner.is_seekable()
    }
}

/// Write staging in fixed-size blocks. Keeps bulk copies between two files
/// on the same device running in long contiguous bursts instead of
/// alternating small transfers.
pub struct InterleavedFile<F: MxfFile> {
    inner: F,
    block_size: usize,
    buffer: Vec<u8>,
}

impl<F: MxfFile> InterleavedFile<F> {
    pub fn new(inner: F, block_size: usize) -> InterleavedFile<F> {
        InterleavedFile {
            inner,
            block_size: block_size.max(1),
            buffer: Vec::new(),
        }
    }

    fn flush_blocks(&mut self, all: bool) -> std::io::Result<()> {
        let mut flushed = 0;
        while self.buffer.len() - flushed >= self.block_size {
            self.inner
                .write_all(&self.buffer[flushed..flushed + self.block_size])?;
            flushed += self.block_size;
        }
        if all && flushed < self.buffer.len() {
            self.inner.write_all(&self.buffer[flushed..])?;
            flushed = self.buffer.len();
        }
        self.buffer.drain(..flushed);
        Ok(())
    }

    pub fn into_inner(mut self) -> std::io::Result<F> {
        self.flush_blocks(true)?;
        Ok(self.inner)
    }
}

impl<F: MxfFile> Read for InterleavedFile<F> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.flush_blocks(true)?;
        self.inner.read(buf)
    }
}

impl<F: MxfFile> Write for InterleavedFile<F> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        self.flush_blocks(false)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_blocks(true)?;
        self.inner.flush()
    }
}

impl<F: MxfFile> Seek for InterleavedFile<F> {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        self.flush_blocks(true)?;
        self.inner.seek(pos)
    }
}

impl<F: MxfFile> MxfFile for InterleavedFile<F> {
    fn size(&mut self) -> Result<u64> {
        self.flush_blocks(true)?;
        self.inner.size()
    }

    fn is_seekable(&self) -> bool {
        self.inner.is_seekable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_file_seek_and_size() {
        let mut file = MemoryFile::new();
        file.write_all(b"0123456789").unwrap();
        assert_eq!(file.size().unwrap(), 10);
        file.seek(SeekFrom::Start(4)).unwrap();
        let mut buf = [0u8; 3];
        file.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"456");
        file.truncate(5);
        assert_eq!(file.size().unwrap(), 5);
    }

    #[test]
    fn checksum_covers_reads_and_writes() {
        let mut file = ChecksumFile::new(MemoryFile::new());
        file.write_all(b"abcdef").unwrap();
        let (_, digest) = file.finalise();
        assert_eq!(digest, crc32fast::hash(b"abcdef"));
    }

    #[test]
    fn interleaved_writes_arrive_in_order() {
        let mut file = InterleavedFile::new(MemoryFile::new(), 4);
        file.write_all(b"abc").unwrap();
        file.write_all(b"defgh").unwrap();
        let inner = file.into_inner().unwrap();
        assert_eq!(inner.data(), b"abcdefgh");
    }
}
