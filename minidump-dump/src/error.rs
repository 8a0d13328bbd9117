// Copyright 2015 Ted Mielczarek. See the COPYRIGHT
// file at the top-level directory of this distribution.

use std::io;

/// Why a record or raw stream could not be printed.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("stream not found")]
    NotFound,
    #[error("stream could not be read: {0}")]
    Unreadable(#[source] minidump::Error),
    #[error("module count {count} exceeds the limit of {limit}")]
    TooManyModules { count: usize, limit: u32 },
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl RecordError {
    /// Returns just the name of the error, for log lines.
    pub fn name(&self) -> &'static str {
        match self {
            RecordError::NotFound => "NotFound",
            RecordError::Unreadable(err) => err.name(),
            RecordError::TooManyModules { .. } => "TooManyModules",
            RecordError::Io(_) => "IoError",
        }
    }
}

impl From<minidump::Error> for RecordError {
    fn from(err: minidump::Error) -> Self {
        match err {
            minidump::Error::StreamNotFound => RecordError::NotFound,
            err => RecordError::Unreadable(err),
        }
    }
}

/// Errors that stop a run before it can produce a result.
#[derive(Debug, thiserror::Error)]
pub enum DumpError {
    #[error("Error reading dump: {0}")]
    Read(#[from] minidump::Error),
    #[error("Error writing output: {0}")]
    Io(#[from] io::Error),
}

impl DumpError {
    pub fn name(&self) -> &'static str {
        match self {
            DumpError::Read(err) => err.name(),
            DumpError::Io(_) => "IoError",
        }
    }
}
