//! microKORG program dump CLI
//!
//! Decodes one or more `.prg` / `.syx` files and prints their sections as
//! text, JSON or CSV. Files are decoded in parallel; output keeps the order
//! of the command line. Failed files are reported on stderr and make the
//! process exit non-zero.

mod args;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::info;
use microkorg_prg::{DecoderConfig, DwgsTable, ProgramLoader};
use rayon::prelude::*;
use std::io;
use std::process::ExitCode;

use args::CliArgs;
use render::{render, Decoded};

fn main() -> ExitCode {
    let args = CliArgs::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(args.log_filter())).init();

    match run(&args) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(failures) => {
            info!("{failures} of {} file(s) failed", args.files.len());
            ExitCode::from(1)
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

/// Decode every file and render the successes. Returns the failure count.
fn run(args: &CliArgs) -> Result<usize> {
    let config = match &args.config {
        Some(path) => DecoderConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => DecoderConfig::default(),
    };
    let config = args.apply(config);

    let names = match &args.wave_names {
        Some(path) => DwgsTable::from_file(path)
            .with_context(|| format!("loading wavetable names {}", path.display()))?,
        None => DwgsTable::builtin(),
    };
    let loader = ProgramLoader::with_names(names).config(config);
    info!(
        "decoding {} file(s) as {} with {:?}",
        args.files.len(),
        args.format,
        loader.decoder_config()
    );

    // Indexed collect keeps argument order.
    let results: Vec<_> = args
        .files
        .par_iter()
        .map(|path| (path, loader.load(path)))
        .collect();

    let mut failures = 0;
    let mut decoded = Vec::with_capacity(results.len());
    for (path, result) in results {
        match result {
            Ok(program) => {
                for warning in &program.warnings {
                    eprintln!("{}: warning: {warning}", path.display());
                }
                decoded.push(Decoded {
                    path: path.clone(),
                    decoded: program,
                });
            }
            Err(err) => {
                failures += 1;
                eprintln!("{}: [{}] {err}", path.display(), err.kind());
            }
        }
    }

    render(args.format, &decoded, args.pretty, io::stdout().lock())
        .context("writing output")?;
    Ok(failures)
}
