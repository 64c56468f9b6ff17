//! Sequence mode: an ordered set of files representing one contiguous
//! material package, read as a single timeline.

use super::{ClipReader, TrackInfo};
use crate::error::MxfError;
use crate::file::MxfFile;
use crate::index::IndexedEntry;
use crate::prelude::*;
use crate::types::{Position, Rational};

pub struct SequenceReader<F: MxfFile> {
    readers: Vec<ClipReader<F>>,
    /// Global position at which each file starts.
    starts: Vec<Position>,
    duration: i64,
    positions: Vec<Position>,
}

impl<F: MxfFile> SequenceReader<F> {
    /// Concatenate already-open readers. Track layouts and edit rates
    /// must agree; differing material numbers are reported but allowed.
    pub fn new(readers: Vec<ClipReader<F>>) -> Result<SequenceReader<F>> {
        let first = readers
            .first()
            .ok_or(MxfError::LogicError("empty file sequence"))?;
        let edit_rate = first.edit_rate();
        let track_count = first.tracks().len();
        let material = first.material_umid();

        let mut starts = Vec::with_capacity(readers.len());
        let mut duration = 0;
        for reader in &readers {
            if !reader.edit_rate().same_value(&edit_rate) {
                return Err(MxfError::LogicError("edit rate mismatch in sequence"));
            }
            if reader.tracks().len() != track_count {
                return Err(MxfError::LogicError("track layout mismatch in sequence"));
            }
            if reader.material_umid() != material {
                log::warn!("sequence file has a different material package");
            }
            starts.push(duration);
            duration += reader.duration();
        }

        let positions = vec![0; track_count];
        Ok(SequenceReader {
            readers,
            starts,
            duration,
            positions,
        })
    }

    pub fn duration(&self) -> i64 {
        self.duration
    }

    pub fn edit_rate(&self) -> Rational {
        self.readers[0].edit_rate()
    }

    pub fn tracks(&self) -> &[TrackInfo] {
        self.readers[0].tracks()
    }

    pub fn segment_count(&self) -> usize {
        self.readers.len()
    }

    /// The file covering a global edit-unit position.
    fn segment_for(&self, position: Position) -> Result<(usize, Position)> {
        if position < 0 || position >= self.duration {
            return Err(MxfError::LogicError("position outside sequence"));
        }
        let at = self.starts.partition_point(|s| *s <= position) - 1;
        Ok((at, position - self.starts[at]))
    }

    pub fn seek(&mut self, track: usize, position: Position) -> Result<()> {
        if track >= self.positions.len() {
            return Err(MxfError::LogicError("track out of range"));
        }
        self.positions[track] = position;
        Ok(())
    }

    pub fn position(&self, track: usize) -> Position {
        self.positions[track]
    }

    pub fn index_entry(&self, position: Position) -> Result<IndexedEntry> {
        let (segment, local) = self.segment_for(position)?;
        self.readers[segment].index_entry(local)
    }

    /// Read edit units across file boundaries.
    pub fn read(&mut self, track: usize, count: u64) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        let mut remaining = count as i64;
        while remaining > 0 {
            let position = self.positions[track];
            let (segment, local) = self.segment_for(position)?;
            let available = (self.readers[segment].duration() - local).min(remaining);
            let mut reader = self.readers[segment].track_reader(track);
            reader.seek(local);
            out.extend(reader.read(available as u64)?);
            self.positions[track] = position + available;
            remaining -= available;
        }
        Ok(out)
    }
}
