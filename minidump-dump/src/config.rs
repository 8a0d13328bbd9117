// Copyright 2015 Ted Mielczarek. See the COPYRIGHT
// file at the top-level directory of this distribution.

use std::io::{self, Write};
use std::path::PathBuf;

use crate::dump::print_full_dump;
use crate::source::DumpSource;
use crate::summary::{print_module_summary, print_platform_summary};

/// What a run prints.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Every record and raw stream in the minidump.
    #[default]
    FullDump,
    /// One line of identifiers per module.
    ModuleSummary,
    /// One line describing the OS and CPU.
    PlatformSummary,
}

impl OutputMode {
    /// Pick the mode from the command-line flags. The summaries take
    /// precedence over the full dump, modules over platform.
    pub fn from_flags(modules: bool, platform: bool) -> Self {
        if modules {
            OutputMode::ModuleSummary
        } else if platform {
            OutputMode::PlatformSummary
        } else {
            OutputMode::FullDump
        }
    }

    /// Print `source` to `out` in this mode, returning whether it succeeded.
    pub fn run<S, W>(self, source: &S, out: &mut W) -> io::Result<bool>
    where
        S: DumpSource,
        W: Write,
    {
        match self {
            OutputMode::FullDump => print_full_dump(source, out),
            OutputMode::ModuleSummary => print_module_summary(source, out),
            OutputMode::PlatformSummary => print_platform_summary(source, out),
        }
    }
}

/// Everything a single run needs to know.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfiguration {
    pub path: PathBuf,
    /// Print memory regions and thread stacks in full, not just their descriptors.
    pub hexdump: bool,
    pub mode: OutputMode,
}

impl RunConfiguration {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        RunConfiguration {
            path: path.into(),
            hexdump: false,
            mode: OutputMode::default(),
        }
    }

    pub fn hexdump(mut self, hexdump: bool) -> Self {
        self.hexdump = hexdump;
        self
    }

    pub fn mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }
}
