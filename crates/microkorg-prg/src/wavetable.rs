//! DWGS wavetable names.
//!
//! Name resolution is injected into the timbre decoder through
//! [`WaveNameResolver`] so decoding itself never touches the filesystem.
//! [`DwgsTable::builtin`] carries the 64 names printed on the device.

use crate::error::{PrgError, Result};
use std::path::Path;
use std::sync::Arc;

/// Number of DWGS wavetables on the device.
pub const DWGS_COUNT: usize = 64;

const BUILTIN_NAMES: [&str; DWGS_COUNT] = [
    "SynSine1", "SynSine2", "SynSine3", "SynSine4", "SynSine5", "SynSine6", "SynSine7",
    "SynBass1", "SynBass2", "SynBass3", "SynBass4", "SynBass5", "SynBass6", "SynBass7",
    "SynWave1", "SynWave2", "SynWave3", "SynWave4", "SynWave5", "SynWave6", "SynWave7",
    "SynWave8", "SynWave9", "5thWave1", "5thWave2", "5thWave3", "Digi1", "Digi2", "Digi3",
    "Digi4", "Digi5", "Digi6", "Digi7", "Digi8", "Endless", "E.Piano1", "E.Piano2",
    "E.Piano3", "E.Piano4", "Organ1", "Organ2", "Organ3", "Organ4", "Organ5", "Organ6",
    "Organ7", "Clav1", "Clav2", "Guitar1", "Guitar2", "Guitar3", "Bass1", "Bass2", "Bass3",
    "Bass4", "Bass5", "Bell1", "Bell2", "Bell3", "Bell4", "Voice1", "Voice2", "Voice3",
    "Voice4",
];

/// Index-to-name lookup for DWGS wavetables.
///
/// Shared read-only between concurrent decodes, hence `Send + Sync`.
pub trait WaveNameResolver: Send + Sync {
    /// Name for a wavetable index, `None` if unknown.
    fn wave_name(&self, index: u8) -> Option<&str>;
}

impl<T: WaveNameResolver + ?Sized> WaveNameResolver for &T {
    fn wave_name(&self, index: u8) -> Option<&str> {
        (**self).wave_name(index)
    }
}

impl<T: WaveNameResolver + ?Sized> WaveNameResolver for Arc<T> {
    fn wave_name(&self, index: u8) -> Option<&str> {
        (**self).wave_name(index)
    }
}

/// Resolver that knows no names; every DWGS reference decodes with `name: None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoWaveNames;

impl WaveNameResolver for NoWaveNames {
    fn wave_name(&self, _index: u8) -> Option<&str> {
        None
    }
}

/// Ordered wavetable name table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DwgsTable {
    names: Vec<String>,
}

impl DwgsTable {
    /// The factory table.
    pub fn builtin() -> Self {
        Self {
            names: BUILTIN_NAMES.iter().map(|name| name.to_string()).collect(),
        }
    }

    /// Table from explicit names. Index `i` resolves to `names[i]`.
    pub fn from_names<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(PrgError::WaveNames("table is empty".to_string()));
        }
        if names.len() > usize::from(u8::MAX) + 1 {
            return Err(PrgError::WaveNames(format!(
                "{} entries, a byte index addresses at most 256",
                names.len()
            )));
        }
        Ok(Self { names })
    }

    /// Parse a JSON array of strings.
    pub fn from_json(json: &str) -> Result<Self> {
        let names: Vec<String> = serde_json::from_str(json)?;
        Self::from_names(names)
    }

    /// Load a JSON array of strings from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let table = Self::from_json(&json)?;
        log::debug!(
            "loaded {} wavetable names from {}",
            table.len(),
            path.as_ref().display()
        );
        Ok(table)
    }

    /// Number of names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the table has no names. Never true for a constructed table.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for DwgsTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl WaveNameResolver for DwgsTable {
    fn wave_name(&self, index: u8) -> Option<&str> {
        self.names.get(usize::from(index)).map(String::as_str)
    }
}
