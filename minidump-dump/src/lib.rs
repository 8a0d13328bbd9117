// Copyright 2015 Ted Mielczarek. See the COPYRIGHT
// file at the top-level directory of this distribution.

//! Print the contents of a minidump file in somewhat readable text.
//!
//! This is an implementation of the old Breakpad `minidump_dump` tool. It
//! minimally interprets the minidump and produces a fairly "raw" dump of its
//! contents, which is mostly useful for debugging a misbehaving minidump
//! generator or the processor itself.
//!
//! Three outputs are available, see [`OutputMode`]:
//!
//! * the full dump, which prints every record the [`catalogue`] knows about
//!   and fails if a required one is missing,
//! * a module summary, one `code_file;code_id;debug_file;debug_id` line per
//!   module,
//! * a platform summary, a single `os;version;cpu` line.
//!
//! # Example
//!
//! ```rust,no_run
//! use minidump_dump::{dump_path, OutputMode, RunConfiguration};
//!
//! let config = RunConfiguration::new("crash.dmp").mode(OutputMode::PlatformSummary);
//! let ok = dump_path(&config, &mut std::io::stdout())?;
//! # Ok::<(), minidump_dump::DumpError>(())
//! ```

use std::io::Write;

use minidump::Minidump;

pub mod catalogue;
pub mod config;
pub mod dump;
mod error;
pub mod raw;
pub mod reader;
pub mod source;
pub mod summary;

#[cfg(test)]
mod testing;

pub use crate::config::{OutputMode, RunConfiguration};
pub use crate::error::{DumpError, RecordError};
pub use crate::reader::MinidumpSource;
pub use crate::source::{DumpSource, ModuleIdentity, OsVersion, SystemIdentity};

/// Read the minidump at `config.path` and print it to `out`.
///
/// Returns whether the selected output mode succeeded. Errors are only
/// returned if the minidump can't be read at all or `out` can't be written.
pub fn dump_path<W: Write>(config: &RunConfiguration, out: &mut W) -> Result<bool, DumpError> {
    let dump = Minidump::read_path(&config.path)?;
    let source = MinidumpSource::with_config(&dump, config);
    let ok = config.mode.run(&source, out)?;
    out.flush()?;
    Ok(ok)
}
