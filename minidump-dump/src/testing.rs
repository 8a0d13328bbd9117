// Copyright 2015 Ted Mielczarek. See the COPYRIGHT
// file at the top-level directory of this distribution.

//! An in-memory `DumpSource` for unit tests.

use std::collections::{HashMap, HashSet};
use std::io::Write;

use minidump_common::format::MINIDUMP_STREAM_TYPE;

use crate::catalogue::{RecordKind, RenderStrategy, RECORDS};
use crate::error::RecordError;
use crate::source::{DumpSource, ModuleIdentity, OsVersion, SystemIdentity};

/// Prints `[<record name>]` for every record it has.
#[derive(Debug, Default)]
pub struct FakeSource {
    missing: HashSet<RecordKind>,
    corrupt: HashSet<RecordKind>,
    modules: Option<Vec<ModuleIdentity>>,
    system: Option<SystemIdentity>,
    streams: HashMap<u32, Option<Vec<u8>>>,
    lengths: HashMap<u32, u32>,
}

impl FakeSource {
    /// A source with every structured record and no raw streams.
    pub fn complete() -> Self {
        FakeSource {
            modules: Some(vec![]),
            system: Some(SystemIdentity {
                os: "linux".to_string(),
                cpu: "amd64".to_string(),
                version: Some(OsVersion {
                    major: 5,
                    minor: 15,
                    build: 0,
                }),
            }),
            ..Default::default()
        }
    }

    /// Normalizes the module ceiling so any `ModuleList` matches.
    fn key(kind: RecordKind) -> RecordKind {
        match kind {
            RecordKind::ModuleList { .. } => RecordKind::ModuleList { max_modules: 0 },
            kind => kind,
        }
    }

    pub fn without(mut self, kind: RecordKind) -> Self {
        self.missing.insert(Self::key(kind));
        if let RecordKind::ModuleList { .. } = kind {
            self.modules = None;
        }
        if kind == RecordKind::SystemInfo {
            self.system = None;
        }
        self
    }

    pub fn corrupt(mut self, kind: RecordKind) -> Self {
        self.corrupt.insert(Self::key(kind));
        self
    }

    pub fn with_modules(mut self, modules: Vec<ModuleIdentity>) -> Self {
        self.modules = Some(modules);
        self
    }

    pub fn with_system(mut self, system: SystemIdentity) -> Self {
        self.system = Some(system);
        self
    }

    pub fn with_stream(mut self, stream_type: MINIDUMP_STREAM_TYPE, contents: &[u8]) -> Self {
        let stream_type = stream_type as u32;
        self.lengths.insert(stream_type, contents.len() as u32);
        self.streams.insert(stream_type, Some(contents.to_vec()));
        self
    }

    /// A stream the directory lists with `length` bytes that cannot be read.
    pub fn with_unreadable_stream(mut self, stream_type: MINIDUMP_STREAM_TYPE, length: u32) -> Self {
        let stream_type = stream_type as u32;
        self.lengths.insert(stream_type, length);
        self.streams.insert(stream_type, None);
        self
    }
}

fn record_name(kind: RecordKind) -> &'static str {
    RECORDS
        .iter()
        .find(|entry| match entry.strategy {
            RenderStrategy::Structured(k) => FakeSource::key(k) == FakeSource::key(kind),
            RenderStrategy::Raw => false,
        })
        .map(|entry| entry.name)
        .unwrap_or("unknown")
}

impl DumpSource for FakeSource {
    fn print_header<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "header")
    }

    fn print_record<W: Write>(&self, kind: RecordKind, out: &mut W) -> Result<(), RecordError> {
        let key = Self::key(kind);
        if self.missing.contains(&key) {
            return Err(RecordError::NotFound);
        }
        if self.corrupt.contains(&key) {
            return Err(RecordError::Unreadable(minidump::Error::DataError));
        }
        writeln!(out, "[{}]", record_name(kind))?;
        Ok(())
    }

    fn modules(&self, max_modules: u32) -> Result<Vec<ModuleIdentity>, RecordError> {
        let modules = self.modules.clone().ok_or(RecordError::NotFound)?;
        if modules.len() > max_modules as usize {
            return Err(RecordError::TooManyModules {
                count: modules.len(),
                limit: max_modules,
            });
        }
        Ok(modules)
    }

    fn system(&self) -> Result<SystemIdentity, RecordError> {
        self.system.clone().ok_or(RecordError::NotFound)
    }

    fn locate_stream(&self, stream_type: u32) -> Option<u32> {
        self.lengths.get(&stream_type).copied()
    }

    fn read_stream(&self, stream_type: u32) -> Result<&[u8], RecordError> {
        match self.streams.get(&stream_type) {
            Some(Some(contents)) => Ok(contents),
            Some(None) => Err(RecordError::Unreadable(minidump::Error::StreamReadFailure)),
            None => Err(RecordError::NotFound),
        }
    }
}
