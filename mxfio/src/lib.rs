pub mod descriptor;
pub mod error;
pub mod essence;
pub mod file;
pub mod index;
pub mod klv;
pub mod labels;
pub mod metadata;
pub mod model;
pub mod partition;
pub mod prelude;
pub mod primer;
pub mod reader;
pub mod types;
pub mod writer;

mod utils;

pub use error::MxfError;
pub use file::{ChecksumFile, DiskFile, MemoryFile, MxfFile};
pub use prelude::{Decode, Encode, Result};
pub use reader::ClipReader;
pub use types::{Rational, Timestamp, Ul, Umid};
pub use writer::ClipWriter;
