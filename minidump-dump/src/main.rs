// Copyright 2015 Ted Mielczarek. See the COPYRIGHT
// file at the top-level directory of this distribution.

use std::fs::File;
use std::io::{self, BufWriter};
use std::ops::Deref;
use std::panic;
use std::path::PathBuf;
use std::process;

use clap::error::ErrorKind;
use clap::Parser;
use log::error;
use minidump_dump::{dump_path, OutputMode, RunConfiguration};
use simplelog::{
    ColorChoice, ConfigBuilder, Level, LevelFilter, TermLogger, TerminalMode, WriteLogger,
};

/// Dump data in a minidump.
#[derive(Debug, Parser)]
#[command(name = "minidump-dump", version)]
struct Args {
    /// Display memory in a hexdump like format
    #[arg(short = 'x', long)]
    hexdump: bool,

    /// Display modules and debug information, one `code_file;code_id;debug_file;debug_id` line
    /// per module
    #[arg(short = 'M', long)]
    modules: bool,

    /// Display platform information as a single `os;version;cpu` line
    #[arg(short = 'P', long)]
    platform: bool,

    /// Where to write the output to (if unspecified, stdout is used)
    #[arg(long)]
    output_file: Option<PathBuf>,

    /// Where to write logs to (if unspecified, stderr is used)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Set the logging level
    #[arg(
        long,
        default_value = "error",
        value_parser = ["off", "error", "warn", "info", "debug", "trace"]
    )]
    verbose: String,

    /// Path to the minidump file to dump
    minidump: PathBuf,
}

impl Args {
    fn configuration(&self) -> RunConfiguration {
        RunConfiguration::new(&self.minidump)
            .hexdump(self.hexdump)
            .mode(OutputMode::from_flags(self.modules, self.platform))
    }

    fn verbosity(&self) -> LevelFilter {
        match self.verbose.as_str() {
            "off" => LevelFilter::Off,
            "warn" => LevelFilter::Warn,
            "info" => LevelFilter::Info,
            "debug" => LevelFilter::Debug,
            "trace" => LevelFilter::Trace,
            _ => LevelFilter::Error,
        }
    }
}

fn init_logger(args: &Args) {
    let verbosity = args.verbosity();
    if let Some(log_path) = &args.log_file {
        let log_file = match File::create(log_path) {
            Ok(file) => file,
            Err(err) => {
                eprintln!("Error creating log file {}: {}", log_path.display(), err);
                process::exit(1);
            }
        };
        let _ = WriteLogger::init(
            verbosity,
            ConfigBuilder::new()
                .set_location_level(LevelFilter::Off)
                .set_time_level(LevelFilter::Off)
                .set_thread_level(LevelFilter::Off)
                .set_target_level(LevelFilter::Off)
                .build(),
            log_file,
        );
    } else {
        let _ = TermLogger::init(
            verbosity,
            ConfigBuilder::new()
                .set_location_level(LevelFilter::Off)
                .set_time_level(LevelFilter::Off)
                .set_thread_level(LevelFilter::Off)
                .set_target_level(LevelFilter::Off)
                .set_level_color(Level::Trace, None)
                .build(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        );
    }
}

#[cfg_attr(test, allow(dead_code))]
fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => process::exit(0),
                _ => process::exit(1),
            }
        }
    };

    init_logger(&args);

    // Set a panic hook to redirect to the logger
    panic::set_hook(Box::new(|panic_info| {
        let (filename, line) = panic_info
            .location()
            .map(|loc| (loc.file(), loc.line()))
            .unwrap_or(("<unknown>", 0));
        let cause = panic_info
            .payload()
            .downcast_ref::<String>()
            .map(String::deref)
            .unwrap_or_else(|| {
                panic_info
                    .payload()
                    .downcast_ref::<&str>()
                    .copied()
                    .unwrap_or("<cause unknown>")
            });
        error!(
            "Panic - A panic occurred at {}:{}: {}",
            filename, line, cause
        );
    }));

    let config = args.configuration();
    let result = match &args.output_file {
        Some(output_path) => match File::create(output_path) {
            Ok(file) => dump_path(&config, &mut BufWriter::new(file)),
            Err(err) => {
                error!(
                    "Error creating output file {}: {}",
                    output_path.display(),
                    err
                );
                process::exit(1);
            }
        },
        None => dump_path(&config, &mut io::stdout().lock()),
    };

    match result {
        Ok(true) => (),
        Ok(false) => process::exit(1),
        Err(err) => {
            error!("{} - {}", err.name(), err);
            process::exit(1);
        }
    }
}
