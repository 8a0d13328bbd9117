// Copyright 2015 Ted Mielczarek. See the COPYRIGHT
// file at the top-level directory of this distribution.

//! The fixed list of streams a full dump walks, in output order.

use minidump_common::format::MINIDUMP_STREAM_TYPE;

/// The module ceiling used when only a module summary is wanted.
pub const DEFAULT_MAX_MODULES: u32 = 2048;

/// How the absence of a stream affects the run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Requiredness {
    /// Absence is an error and counts against the run.
    Required,
    /// Absence is expected for some minidumps and is only logged.
    Optional,
    /// Absence is neither counted nor logged.
    Silent,
}

/// The structured records the dumper asks its source to print.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RecordKind {
    ThreadList,
    ThreadNames,
    /// The module list, unavailable if it holds more than `max_modules` entries.
    ModuleList {
        max_modules: u32,
    },
    MemoryList,
    Exception,
    Assertion,
    SystemInfo,
    MiscInfo,
    BreakpadInfo,
    MemoryInfoList,
    CrashpadInfo,
}

/// How a catalogued stream is turned into text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderStrategy {
    /// Decoded and printed by the source.
    Structured(RecordKind),
    /// Printed byte for byte with NUL terminators made visible.
    Raw,
}

/// One well-known stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CatalogueEntry {
    pub stream_type: u32,
    pub name: &'static str,
    pub requiredness: Requiredness,
    pub strategy: RenderStrategy,
}

impl CatalogueEntry {
    pub fn is_raw(&self) -> bool {
        self.strategy == RenderStrategy::Raw
    }
}

macro_rules! record {
    ($stream:ident, $name:literal, $req:ident, $kind:expr) => {
        CatalogueEntry {
            stream_type: MINIDUMP_STREAM_TYPE::$stream as u32,
            name: $name,
            requiredness: Requiredness::$req,
            strategy: RenderStrategy::Structured($kind),
        }
    };
}

// Linux streams that are just a dump of some system "file".
macro_rules! raw_streams {
    ( $( $x:ident ),* ) => {
        [$( CatalogueEntry {
            stream_type: MINIDUMP_STREAM_TYPE::$x as u32,
            name: stringify!($x),
            requiredness: Requiredness::Silent,
            strategy: RenderStrategy::Raw,
        } ),*]
    };
}

/// Structured records, in the order a full dump prints them.
pub static RECORDS: [CatalogueEntry; 11] = [
    record!(ThreadListStream, "MinidumpThreadList", Required, RecordKind::ThreadList),
    record!(ThreadNamesStream, "MinidumpThreadNames", Optional, RecordKind::ThreadNames),
    // The whole list is wanted here, even past the limit a stackwalk would use.
    record!(
        ModuleListStream,
        "MinidumpModuleList",
        Required,
        RecordKind::ModuleList {
            max_modules: u32::MAX
        }
    ),
    record!(MemoryListStream, "MinidumpMemoryList", Required, RecordKind::MemoryList),
    record!(ExceptionStream, "MinidumpException", Optional, RecordKind::Exception),
    record!(AssertionInfoStream, "MinidumpAssertion", Optional, RecordKind::Assertion),
    record!(SystemInfoStream, "MinidumpSystemInfo", Required, RecordKind::SystemInfo),
    record!(MiscInfoStream, "MinidumpMiscInfo", Required, RecordKind::MiscInfo),
    record!(BreakpadInfoStream, "MinidumpBreakpadInfo", Optional, RecordKind::BreakpadInfo),
    record!(
        MemoryInfoListStream,
        "MinidumpMemoryInfoList",
        Required,
        RecordKind::MemoryInfoList
    ),
    record!(CrashpadInfoStream, "MinidumpCrashpadInfo", Silent, RecordKind::CrashpadInfo),
];

/// Platform text streams, printed raw after the structured records.
pub static RAW_STREAMS: [CatalogueEntry; 6] = raw_streams!(
    LinuxCmdLine,
    LinuxEnviron,
    LinuxLsbRelease,
    LinuxProcStatus,
    LinuxCpuInfo,
    LinuxMaps
);

/// Every catalogued stream in full-dump order.
pub fn full_dump() -> impl Iterator<Item = &'static CatalogueEntry> {
    RECORDS.iter().chain(RAW_STREAMS.iter())
}
