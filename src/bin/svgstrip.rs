//! Remove editor-specific elements and attributes from SVG files.

use std::{
    fs::{File, read},
    io::{Read, Write, stdin, stdout},
    process::ExitCode,
};

use anyhow::Context;
use clap::Parser;
use const_format::concatcp;
use tinydom::{
    encoding::decode,
    strip::{ProgressReporter, StripOptions, scour_string},
};
use tracing_subscriber::EnvFilter;

const VERSION: &str = concatcp!(
    env!("CARGO_PKG_VERSION_MAJOR"),
    ".",
    env!("CARGO_PKG_VERSION_MINOR"),
    ".",
    env!("CARGO_PKG_VERSION_PATCH"),
);

#[derive(clap::Parser, Debug)]
#[command(
    version = VERSION,
    name = "svgstrip",
    about = "Remove Inkscape, Sodipodi and Adobe editor data from SVG files.",
    arg_required_else_help = true
)]
struct CmdArgs {
    /// SVG files to process. `-` reads from the standard input
    #[clap(required = true)]
    files: Vec<String>,
    /// don't remove anything, only parse and reserialize
    #[arg(long)]
    keep_editor_data: bool,
    /// also remove elements and attributes in this namespace
    #[arg(long, value_name = "URI")]
    namespace: Vec<String>,
    /// save to a given file
    #[arg(short, long, value_name = "file")]
    output: Option<String>,
    /// don't output the result
    #[arg(long)]
    noout: bool,
    /// print more messages (-v: info, -vv: debug, -vvv: trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl CmdArgs {
    fn strip_options(&self) -> StripOptions {
        self.namespace
            .iter()
            .fold(StripOptions::default(), |options, ns| options.with_namespace(ns))
            .keep_editor_data(self.keep_editor_data)
    }
}

/// Forward progress notifications to the log.
struct TracingProgress<'a> {
    file: &'a str,
}

impl ProgressReporter for TracingProgress<'_> {
    fn progress(&mut self, loaded: u32, total: u32) {
        tracing::debug!(file = self.file, loaded, total, "progress");
    }

    fn message(&mut self, message: &str) {
        tracing::info!(file = self.file, "{}", message.trim());
    }

    fn update(&mut self, update: &str) {
        tracing::trace!(file = self.file, "{}", update.trim());
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_input(file: &str) -> anyhow::Result<Vec<u8>> {
    if file == "-" {
        let mut buf = vec![];
        stdin()
            .read_to_end(&mut buf)
            .context("failed to read the standard input")?;
        Ok(buf)
    } else {
        read(file).with_context(|| format!("failed to read {file}"))
    }
}

fn process_file(file: &str, options: &StripOptions) -> anyhow::Result<String> {
    let bytes = read_input(file)?;
    let text = decode(&bytes).with_context(|| format!("failed to decode {file}"))?;
    scour_string(&text, options, &mut TracingProgress { file })
        .with_context(|| format!("failed to process {file}"))
}

fn main() -> ExitCode {
    let cmd_args = CmdArgs::parse();
    init_logging(cmd_args.verbose);
    let options = cmd_args.strip_options();

    let mut out: Box<dyn Write> = match cmd_args.output.as_deref() {
        Some(path) if !cmd_args.noout => match File::create(path) {
            Ok(file) => Box::new(file),
            Err(err) => {
                eprintln!("Unable to open {path}: {err}");
                return ExitCode::FAILURE;
            }
        },
        _ => Box::new(stdout().lock()),
    };

    let mut failed = false;
    for file in &cmd_args.files {
        let result = process_file(file, &options).and_then(|svg| {
            if !cmd_args.noout {
                writeln!(out, "{svg}").context("failed to write the result")?;
            }
            Ok(())
        });
        if let Err(err) = result {
            eprintln!("{err:#}");
            failed = true;
        }
    }
    if let Err(err) = out.flush() {
        eprintln!("failed to flush the output: {err}");
        failed = true;
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
