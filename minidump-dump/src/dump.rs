// Copyright 2015 Ted Mielczarek. See the COPYRIGHT
// file at the top-level directory of this distribution.

//! The full dump: every catalogued stream, in order.

use std::io::{self, Write};

use tracing::{debug, error, info};

use crate::catalogue::{self, CatalogueEntry, RecordKind, RenderStrategy, Requiredness};
use crate::error::RecordError;
use crate::raw;
use crate::source::DumpSource;

/// Counts the failures of a single run.
#[derive(Debug, Default)]
pub struct ErrorTally {
    errors: usize,
}

impl ErrorTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self) {
        self.errors += 1;
    }

    pub fn count(&self) -> usize {
        self.errors
    }

    pub fn is_clean(&self) -> bool {
        self.errors == 0
    }
}

/// Print every catalogued stream in `source` to `out`.
///
/// A missing or damaged stream never stops the dump; as much as possible is
/// printed. Returns `Ok(true)` if no required record was missing and every
/// present raw stream could be read. Only failures to write to `out` are
/// returned as errors.
pub fn print_full_dump<S, W>(source: &S, out: &mut W) -> io::Result<bool>
where
    S: DumpSource,
    W: Write,
{
    let mut tally = ErrorTally::new();
    print_catalogue(source, catalogue::full_dump(), &mut tally, out)?;
    if !tally.is_clean() {
        debug!("full dump finished with {} errors", tally.count());
    }
    Ok(tally.is_clean())
}

/// Print the container header followed by `entries`, counting failures in `tally`.
pub fn print_catalogue<'e, S, W, I>(
    source: &S,
    entries: I,
    tally: &mut ErrorTally,
    out: &mut W,
) -> io::Result<()>
where
    S: DumpSource,
    W: Write,
    I: IntoIterator<Item = &'e CatalogueEntry>,
{
    source.print_header(out)?;
    for entry in entries {
        match entry.strategy {
            RenderStrategy::Structured(kind) => print_record(source, entry, kind, tally, out)?,
            RenderStrategy::Raw => print_raw(source, entry, tally, out)?,
        }
    }
    Ok(())
}

fn print_record<S, W>(
    source: &S,
    entry: &CatalogueEntry,
    kind: RecordKind,
    tally: &mut ErrorTally,
    out: &mut W,
) -> io::Result<()>
where
    S: DumpSource,
    W: Write,
{
    let err = match source.print_record(kind, out) {
        Ok(()) => return Ok(()),
        Err(RecordError::Io(err)) => return Err(err),
        Err(err) => err,
    };
    match entry.requiredness {
        Requiredness::Required => {
            tally.record();
            error!("{} - reading {} failed: {}", err.name(), entry.name, err);
        }
        Requiredness::Optional => {
            info!("{} - reading {} failed: {}", err.name(), entry.name, err);
        }
        Requiredness::Silent => {
            // A present but undecodable record still leaves a trace in the output.
            if !matches!(err, RecordError::NotFound) {
                writeln!(out, "{} cannot print invalid data", entry.name)?;
            }
        }
    }
    Ok(())
}

fn print_raw<S, W>(
    source: &S,
    entry: &CatalogueEntry,
    tally: &mut ErrorTally,
    out: &mut W,
) -> io::Result<()>
where
    S: DumpSource,
    W: Write,
{
    let length = match source.locate_stream(entry.stream_type) {
        Some(length) => length,
        None => return Ok(()),
    };

    raw::write_stream_header(entry.name, out)?;
    if length == 0 {
        return writeln!(out);
    }

    match source.read_stream(entry.stream_type) {
        Ok(contents) => raw::render_raw_stream(contents, out),
        Err(RecordError::Io(err)) => Err(err),
        Err(err) => {
            // Being absent is fine, but a stream the directory promises must be readable.
            tally.record();
            error!("{} - reading stream {} failed: {}", err.name(), entry.name, err);
            Ok(())
        }
    }
}
