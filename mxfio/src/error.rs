use std::string::FromUtf16Error;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum MxfError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("unexpected end of stream at offset {0}")]
    UnexpectedEof(u64),
    #[error("{reason} at offset {offset}")]
    Malformed { offset: u64, reason: &'static str },
    #[error("item {item} value does not conform to {expected}")]
    TypeMismatch {
        item: &'static str,
        expected: &'static str,
    },
    #[error("unresolved strong reference {0}")]
    BrokenReference(Uuid),
    #[error("unsupported container version {major}.{minor}")]
    UnsupportedVersion { major: u16, minor: u16 },
    #[error("{0} capacity exceeded")]
    CapacityExceeded(&'static str),
    #[error("{0}")]
    LogicError(&'static str),
    #[error(transparent)]
    InvalidString(#[from] FromUtf16Error),
}

impl MxfError {
    pub(crate) fn malformed(offset: u64, reason: &'static str) -> Self {
        MxfError::Malformed { offset, reason }
    }

    /// Remap a short read into the truncated-file error kind.
    pub(crate) fn at_eof(self, offset: u64) -> Self {
        match self {
            MxfError::Io(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                MxfError::UnexpectedEof(offset)
            }
            other => other,
        }
    }
}
