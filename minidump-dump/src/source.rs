// Copyright 2015 Ted Mielczarek. See the COPYRIGHT
// file at the top-level directory of this distribution.

//! The view of a minidump that the dumper consumes.
//!
//! Everything that actually decodes the container lives behind [`DumpSource`].
//! The dumper only decides *what* to ask for, in which order, and what a
//! failure means for the overall result.

use std::fmt;
use std::io::Write;

use crate::catalogue::RecordKind;
use crate::error::RecordError;

/// A source of minidump records and raw streams.
pub trait DumpSource {
    /// Write the container header and its stream directory to `out`.
    fn print_header<W: Write>(&self, out: &mut W) -> std::io::Result<()>;

    /// Decode the record identified by `kind` and write its verbose
    /// description to `out`.
    ///
    /// Nothing is written if the record cannot be retrieved.
    fn print_record<W: Write>(&self, kind: RecordKind, out: &mut W) -> Result<(), RecordError>;

    /// The identities of every module in the module list.
    ///
    /// Lists with more than `max_modules` entries are treated as unavailable.
    fn modules(&self, max_modules: u32) -> Result<Vec<ModuleIdentity>, RecordError>;

    /// The identity of the system that produced the minidump.
    fn system(&self) -> Result<SystemIdentity, RecordError>;

    /// The length of the stream tagged `stream_type`, if the directory has one.
    fn locate_stream(&self, stream_type: u32) -> Option<u32>;

    /// The raw contents of the stream tagged `stream_type`.
    fn read_stream(&self, stream_type: u32) -> Result<&[u8], RecordError>;
}

/// The identifiers of one loaded module.
///
/// Values the minidump does not provide are empty strings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModuleIdentity {
    pub code_file: String,
    pub code_identifier: String,
    pub debug_file: String,
    pub debug_identifier: String,
}

/// The operating system and CPU that produced a minidump.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SystemIdentity {
    pub os: String,
    pub cpu: String,
    /// The raw version numbers, if the system info record carried them.
    pub version: Option<OsVersion>,
}

/// The `major.minor.build` version triple from the raw system info record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OsVersion {
    pub major: u32,
    pub minor: u32,
    pub build: u32,
}

impl fmt::Display for OsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.build)
    }
}
