// Copyright 2015 Ted Mielczarek. See the COPYRIGHT
// file at the top-level directory of this distribution.

//! [`DumpSource`] backed by the `minidump` crate.

use std::borrow::Cow;
use std::io::{self, Write};
use std::ops::Deref;

use minidump::{
    Minidump, MinidumpAssertion, MinidumpBreakpadInfo, MinidumpCrashpadInfo, MinidumpException,
    MinidumpMemoryInfoList, MinidumpMemoryList, MinidumpMiscInfo, MinidumpModuleList,
    MinidumpSystemInfo, MinidumpThreadList, MinidumpThreadNames, Module, UnifiedMemoryList,
};
use tracing::trace;

use crate::catalogue::RecordKind;
use crate::config::RunConfiguration;
use crate::error::RecordError;
use crate::source::{DumpSource, ModuleIdentity, OsVersion, SystemIdentity};

/// A parsed minidump, plus the streams other streams need to print.
pub struct MinidumpSource<'a, T>
where
    T: Deref<Target = [u8]> + 'a,
{
    dump: &'a Minidump<'a, T>,
    hexdump: bool,
    // Other streams depend on these, so load them upfront.
    system_info: Result<MinidumpSystemInfo, minidump::Error>,
    misc_info: Result<MinidumpMiscInfo, minidump::Error>,
    memory: Option<UnifiedMemoryList<'a>>,
}

impl<'a, T> MinidumpSource<'a, T>
where
    T: Deref<Target = [u8]> + 'a,
{
    pub fn new(dump: &'a Minidump<'a, T>) -> Self {
        MinidumpSource {
            dump,
            hexdump: false,
            system_info: dump.get_stream::<MinidumpSystemInfo>(),
            misc_info: dump.get_stream::<MinidumpMiscInfo>(),
            memory: dump.get_memory(),
        }
    }

    /// Create a source that renders memory the way `config` asks.
    pub fn with_config(dump: &'a Minidump<'a, T>, config: &RunConfiguration) -> Self {
        MinidumpSource::new(dump).hexdump(config.hexdump)
    }

    /// Print the contents of memory regions and thread stacks, not just
    /// their descriptors.
    pub fn hexdump(mut self, hexdump: bool) -> Self {
        self.hexdump = hexdump;
        self
    }

    fn brief(&self) -> bool {
        !self.hexdump
    }

    fn system_info(&self) -> Result<&MinidumpSystemInfo, RecordError> {
        preloaded(&self.system_info)
    }

    fn misc_info(&self) -> Result<&MinidumpMiscInfo, RecordError> {
        preloaded(&self.misc_info)
    }
}

fn preloaded<S>(stream: &Result<S, minidump::Error>) -> Result<&S, RecordError> {
    stream.as_ref().map_err(|err| RecordError::from(err.clone()))
}

impl<'a, T> DumpSource for MinidumpSource<'a, T>
where
    T: Deref<Target = [u8]> + 'a,
{
    fn print_header<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.dump.print(out)
    }

    fn print_record<W: Write>(&self, kind: RecordKind, out: &mut W) -> Result<(), RecordError> {
        trace!("printing {:?}", kind);
        let dump = self.dump;
        match kind {
            RecordKind::ThreadList => dump.get_stream::<MinidumpThreadList<'a>>()?.print(
                out,
                self.memory.as_ref(),
                self.system_info().ok(),
                self.misc_info().ok(),
                self.brief(),
            )?,
            RecordKind::ThreadNames => dump.get_stream::<MinidumpThreadNames>()?.print(out)?,
            RecordKind::ModuleList { max_modules } => {
                let module_list = read_module_list(dump, max_modules)?;
                module_list.print(out)?
            }
            RecordKind::MemoryList => dump
                .get_stream::<MinidumpMemoryList<'a>>()?
                .print(out, self.brief())?,
            RecordKind::Exception => dump.get_stream::<MinidumpException>()?.print(
                out,
                self.system_info().ok(),
                self.misc_info().ok(),
            )?,
            RecordKind::Assertion => dump.get_stream::<MinidumpAssertion>()?.print(out)?,
            RecordKind::SystemInfo => self.system_info()?.print(out)?,
            RecordKind::MiscInfo => self.misc_info()?.print(out)?,
            RecordKind::BreakpadInfo => dump.get_stream::<MinidumpBreakpadInfo>()?.print(out)?,
            RecordKind::MemoryInfoList => {
                dump.get_stream::<MinidumpMemoryInfoList<'a>>()?.print(out)?
            }
            RecordKind::CrashpadInfo => dump.get_stream::<MinidumpCrashpadInfo>()?.print(out)?,
        }
        Ok(())
    }

    fn modules(&self, max_modules: u32) -> Result<Vec<ModuleIdentity>, RecordError> {
        let module_list = read_module_list(self.dump, max_modules)?;
        Ok(module_list
            .iter()
            .map(|module| ModuleIdentity {
                code_file: module.code_file().into_owned(),
                code_identifier: module
                    .code_identifier()
                    .map(|id| id.to_string())
                    .unwrap_or_default(),
                debug_file: module
                    .debug_file()
                    .map(Cow::into_owned)
                    .unwrap_or_default(),
                debug_identifier: module
                    .debug_identifier()
                    .map(|id| id.breakpad().to_string())
                    .unwrap_or_default(),
            })
            .collect())
    }

    fn system(&self) -> Result<SystemIdentity, RecordError> {
        let system_info = self.system_info()?;
        Ok(SystemIdentity {
            os: system_info.os.to_string(),
            cpu: system_info.cpu.to_string(),
            version: Some(OsVersion {
                major: system_info.raw.major_version,
                minor: system_info.raw.minor_version,
                build: system_info.raw.build_number,
            }),
        })
    }

    fn locate_stream(&self, stream_type: u32) -> Option<u32> {
        self.dump
            .all_streams()
            .find(|dir| dir.stream_type == stream_type)
            .map(|dir| dir.location.data_size)
    }

    fn read_stream(&self, stream_type: u32) -> Result<&[u8], RecordError> {
        Ok(self.dump.get_raw_stream(stream_type)?)
    }
}

fn read_module_list<'a, T>(
    dump: &'a Minidump<'a, T>,
    max_modules: u32,
) -> Result<MinidumpModuleList, RecordError>
where
    T: Deref<Target = [u8]> + 'a,
{
    let module_list = dump.get_stream::<MinidumpModuleList>()?;
    let count = module_list.iter().count();
    if count > max_modules as usize {
        return Err(RecordError::TooManyModules {
            count,
            limit: max_modules,
        });
    }
    Ok(module_list)
}
