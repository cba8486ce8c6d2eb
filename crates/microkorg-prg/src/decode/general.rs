//! General region decoder (record bytes 0-37).
//!
//! Holds the program-wide properties (name, voice mode, arpeggiator switch
//! and trigger pattern, keyboard octave shift) and the five shared effect /
//! arpeggiator sections.

use super::field::{decode_section, FieldContext, Region};
use super::layout;
use crate::bits::{self, Bitmask};
use crate::config::{DecoderConfig, OctaveShiftPolicy};
use crate::error::{DecodeWarning, PrgError, Result};
use crate::model::Section;
use crate::record::GENERAL_REGION;
use crate::wavetable::NoWaveNames;
use bitflags::bitflags;
use serde::Serialize;
use std::fmt;

const NAME_LEN: usize = 12;
const TRIGGER_PATTERN_BYTE: usize = 15;
const VOICE_MODE_BYTE: usize = 16;
const ARP_CONTROL_BYTE: usize = 32;
const OCTAVE_SHIFT_BYTE: usize = 37;

/// Steps in the arpeggiator trigger pattern.
pub const TRIGGER_STEPS: usize = 8;

/// Largest keyboard octave shift in either direction.
pub const MAX_OCTAVE_SHIFT: i8 = 3;

bitflags! {
    /// Arpeggiator control byte (general byte 32)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ArpFlags: u8 {
        /// Arpeggiator switched on
        const ENABLED = 0x80;
        /// Latch
        const LATCH = 0x40;
        /// Key sync
        const KEY_SYNC = 0x01;
    }
}

impl ArpFlags {
    /// Flags from the raw control byte. Target timbre bits are ignored.
    pub fn from_byte(value: u8) -> Self {
        ArpFlags::from_bits_truncate(value)
    }
}

/// Sound engine arrangement of a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum VoiceMode {
    /// One synth timbre.
    Single,
    /// Two layered synth timbres.
    Layer,
    /// Vocoder engine.
    Vocoder,
}

impl VoiceMode {
    /// Decode bits 4-5 of general byte 16. Index 1 is reserved.
    pub fn from_byte(raw: u8) -> Result<Self> {
        match bits::field(raw, Bitmask::Bits(0x03), -4) {
            0 => Ok(VoiceMode::Single),
            2 => Ok(VoiceMode::Layer),
            3 => Ok(VoiceMode::Vocoder),
            index => Err(PrgError::InvalidVoiceMode { index, raw }),
        }
    }

    /// Display name.
    pub const fn as_str(self) -> &'static str {
        match self {
            VoiceMode::Single => "Single",
            VoiceMode::Layer => "Layer",
            VoiceMode::Vocoder => "Vocoder",
        }
    }
}

impl TryFrom<u8> for VoiceMode {
    type Error = PrgError;

    fn try_from(raw: u8) -> Result<Self> {
        Self::from_byte(raw)
    }
}

impl fmt::Display for VoiceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything decoded from the general region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneralData {
    /// Program name, at most 12 ASCII characters, trimmed.
    pub name: String,
    /// Voice mode.
    pub voice_mode: VoiceMode,
    /// Arpeggiator on/off.
    pub arp_enabled: bool,
    /// Trigger pattern, step 1 first.
    pub trigger_pattern: [bool; TRIGGER_STEPS],
    /// Keyboard octave shift in -3..=3.
    pub keyboard_octave_shift: i8,
    /// MOD FX, DELAY, EQ, ARPEG. A and ARPEG. B.
    pub sections: Vec<Section>,
}

/// Decode the general region.
///
/// Warnings (clamped octave shift) are appended to `warnings`.
pub fn decode_general(
    bytes: &[u8],
    config: &DecoderConfig,
    warnings: &mut Vec<DecodeWarning>,
) -> Result<GeneralData> {
    let region = Region::new(bytes, GENERAL_REGION.start);

    let name = bits::ascii_trimmed(region.slice(0, NAME_LEN)?);
    let voice_mode = VoiceMode::from_byte(region.byte(VOICE_MODE_BYTE)?)?;
    let arp_enabled =
        ArpFlags::from_byte(region.byte(ARP_CONTROL_BYTE)?).contains(ArpFlags::ENABLED);
    let trigger_pattern = trigger_pattern(region.byte(TRIGGER_PATTERN_BYTE)?);
    let keyboard_octave_shift =
        octave_shift(region.byte(OCTAVE_SHIFT_BYTE)?, config.octave_shift, warnings)?;

    let ctx = FieldContext {
        voice_mode,
        names: &NoWaveNames,
    };
    let sections = layout::GENERAL
        .iter()
        .map(|spec| decode_section(spec, &region, &ctx))
        .collect::<Result<Vec<_>>>()?;

    log::debug!("general: name={name:?} voice_mode={voice_mode} arp={arp_enabled}");

    Ok(GeneralData {
        name,
        voice_mode,
        arp_enabled,
        trigger_pattern,
        keyboard_octave_shift,
        sections,
    })
}

/// Step `i` plays when bit `i` is clear.
fn trigger_pattern(byte: u8) -> [bool; TRIGGER_STEPS] {
    let mut pattern = [false; TRIGGER_STEPS];
    for (step, slot) in pattern.iter_mut().enumerate() {
        *slot = bits::is_set(bits::bitshift(byte, -(step as i8)) as u8, Bitmask::Lsb, true);
    }
    pattern
}

/// Map general byte 37 to an octave shift.
pub fn octave_shift(
    raw: u8,
    policy: OctaveShiftPolicy,
    warnings: &mut Vec<DecodeWarning>,
) -> Result<i8> {
    match raw {
        253 => Ok(-3),
        254 => Ok(-2),
        255 => Ok(-1),
        0..=3 => Ok(raw as i8),
        _ => match policy {
            OctaveShiftPolicy::Reject => Err(PrgError::UnknownOctaveShift { raw }),
            OctaveShiftPolicy::Clamp => {
                let clamped = (raw as i8).clamp(-MAX_OCTAVE_SHIFT, MAX_OCTAVE_SHIFT);
                let warning = DecodeWarning::OctaveShiftClamped { raw, clamped };
                log::warn!("{warning}");
                warnings.push(warning);
                Ok(clamped)
            }
        },
    }
}
