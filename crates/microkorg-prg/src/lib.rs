//! Decoder for microKORG / microKORG S single-program dumps.
//!
//! Reads the editor's wrapped `.prg` files and bare `.syx` program dumps,
//! unpacks the 7-bit SysEx payload into the 252-byte program record and
//! decodes it into named sections of labelled parameters, laid out the way
//! the front panel groups them.
//!
//! # Quick Start
//!
//! ```no_run
//! use microkorg_prg::load_file;
//!
//! # fn main() -> microkorg_prg::Result<()> {
//! let decoded = load_file("INIT.prg")?;
//! println!("{}", decoded.program);
//! for section in decoded.program.timbre1_sections() {
//!     for param in section.iter() {
//!         println!("{} / {}: {}", section.name(), param.name, param.value);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Custom loaders
//!
//! ```no_run
//! use microkorg_prg::{ContainerKind, DecoderConfig, DwgsTable, OctaveShiftPolicy, ProgramLoader};
//!
//! # fn main() -> microkorg_prg::Result<()> {
//! let loader = ProgramLoader::with_names(DwgsTable::from_file("names.json")?)
//!     .config(DecoderConfig::default().octave_shift(OctaveShiftPolicy::Clamp));
//! let bytes = std::fs::read("bass.syx")?;
//! let decoded = loader.load_from_bytes(&bytes, ContainerKind::Bare)?;
//! for warning in &decoded.warnings {
//!     eprintln!("warning: {warning}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`container`]: extension mapping and the file size gate
//! - [`frame`]: SysEx framing and 7-bit chunk unpacking
//! - [`record`]: the unpacked record and its regions
//! - [`decode`]: general and timbre decoders driven by static layouts
//! - [`program`]: the assembled [`Program`]
//! - [`loader`]: the end-to-end pipeline

#![warn(missing_docs)]

pub mod bits;
pub mod config;
pub mod container;
pub mod decode;
pub mod error;
pub mod frame;
pub mod loader;
pub mod model;
pub mod program;
pub mod record;
pub mod wavetable;

pub use config::{DecoderConfig, OctaveShiftPolicy};
pub use container::ContainerKind;
pub use decode::{ArpFlags, Engine, VoiceFlags, VoiceMode};
pub use error::{DecodeWarning, ErrorKind, PrgError, Result};
pub use frame::DeviceVariant;
pub use loader::{load_bytes, load_file, DecodedProgram, ProgramLoader};
pub use model::{Param, ParamValue, Section};
pub use program::{decode_program, Program, Voices};
pub use record::RawProgramRecord;
pub use wavetable::{DwgsTable, NoWaveNames, WaveNameResolver};
