// Copyright 2015 Ted Mielczarek. See the COPYRIGHT
// file at the top-level directory of this distribution.

//! One-line-per-item summaries, for scripts rather than humans.

use std::io::{self, Write};

use tracing::error;

use crate::catalogue::DEFAULT_MAX_MODULES;
use crate::error::RecordError;
use crate::source::DumpSource;

/// Print `code_file;code_identifier;debug_file;debug_identifier` for every
/// module, in module list order.
///
/// Returns `Ok(false)` if the module list is unavailable.
pub fn print_module_summary<S, W>(source: &S, out: &mut W) -> io::Result<bool>
where
    S: DumpSource,
    W: Write,
{
    let modules = match source.modules(DEFAULT_MAX_MODULES) {
        Ok(modules) => modules,
        Err(RecordError::Io(err)) => return Err(err),
        Err(err) => {
            error!("{} - reading module list failed: {}", err.name(), err);
            return Ok(false);
        }
    };
    for module in &modules {
        writeln!(
            out,
            "{};{};{};{}",
            module.code_file, module.code_identifier, module.debug_file, module.debug_identifier
        )?;
    }
    Ok(true)
}

/// Print `os;major.minor.build;cpu`.
///
/// The version is left empty if the system info has no raw version record.
/// Returns `Ok(false)` if the system info is unavailable.
pub fn print_platform_summary<S, W>(source: &S, out: &mut W) -> io::Result<bool>
where
    S: DumpSource,
    W: Write,
{
    let system = match source.system() {
        Ok(system) => system,
        Err(RecordError::Io(err)) => return Err(err),
        Err(err) => {
            error!("{} - reading system info failed: {}", err.name(), err);
            return Ok(false);
        }
    };
    let version = system
        .version
        .map(|version| version.to_string())
        .unwrap_or_default();
    writeln!(out, "{};{};{}", system.os, version, system.cpu)?;
    Ok(true)
}
