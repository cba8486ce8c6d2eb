//! Command-line arguments for `prg-dump`.

use clap::{ArgAction, Parser, ValueEnum};
use microkorg_prg::{DecoderConfig, OctaveShiftPolicy};
use std::fmt;
use std::path::PathBuf;

/// Output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable section listing
    Text,
    /// One JSON document per run
    Json,
    /// One row per parameter
    Csv,
}

impl OutputFormat {
    /// Lowercase name as accepted on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Parser)]
#[command(name = "prg-dump")]
#[command(version)]
#[command(about = "Decode microKORG / microKORG S program files (.prg, .syx)")]
pub struct CliArgs {
    /// Program files to decode
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// JSON array of DWGS wavetable names replacing the built-in table
    #[arg(long, value_name = "FILE")]
    pub wave_names: Option<PathBuf>,

    /// Decoder configuration (JSON)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Treat a missing SysEx end byte as an error
    #[arg(long)]
    pub strict: bool,

    /// Clamp out-of-range keyboard octave shifts instead of failing
    #[arg(long)]
    pub clamp_octave_shift: bool,

    /// Pretty print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl CliArgs {
    /// Log filter for the requested verbosity.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Apply the command-line switches on top of a base configuration.
    pub fn apply(&self, mut config: DecoderConfig) -> DecoderConfig {
        if self.strict {
            config = config.strict_end_marker(true);
        }
        if self.clamp_octave_shift {
            config = config.octave_shift(OctaveShiftPolicy::Clamp);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = CliArgs::try_parse_from(["prg-dump", "a.prg"]).unwrap();
        assert_eq!(args.format, OutputFormat::Text);
        assert_eq!(args.log_filter(), "warn");
        assert_eq!(args.apply(DecoderConfig::default()), DecoderConfig::default());
    }

    #[test]
    fn switches_override_config() {
        let args = CliArgs::try_parse_from([
            "prg-dump",
            "--format",
            "csv",
            "--strict",
            "--clamp-octave-shift",
            "-vv",
            "a.prg",
            "b.syx",
        ])
        .unwrap();
        assert_eq!(args.files.len(), 2);
        assert_eq!(args.format, OutputFormat::Csv);
        assert_eq!(args.log_filter(), "debug");
        let config = args.apply(DecoderConfig::default());
        assert!(config.strict_end_marker);
        assert_eq!(config.octave_shift, OctaveShiftPolicy::Clamp);
    }

    #[test]
    fn files_are_required() {
        assert!(CliArgs::try_parse_from(["prg-dump"]).is_err());
    }
}
