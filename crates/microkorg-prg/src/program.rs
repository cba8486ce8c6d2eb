//! Program aggregate and assembler.

use crate::config::DecoderConfig;
use crate::decode::general::{decode_general, GeneralData, VoiceMode, TRIGGER_STEPS};
use crate::decode::timbre::{decode_timbre, Engine};
use crate::error::{DecodeWarning, PrgError, Result};
use crate::model::Section;
use crate::record::{RawProgramRecord, TIMBRE1_REGION, TIMBRE2_REGION, VOCODER_REGION};
use crate::wavetable::WaveNameResolver;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;

/// Engine sections of a program. Exactly one arrangement is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Voices {
    /// One synth timbre.
    Single {
        /// Timbre 1 sections.
        timbre1: Vec<Section>,
    },
    /// Two layered synth timbres.
    Layer {
        /// Timbre 1 sections.
        timbre1: Vec<Section>,
        /// Timbre 2 sections.
        timbre2: Vec<Section>,
    },
    /// Vocoder engine.
    Vocoder {
        /// Vocoder sections.
        vocoder: Vec<Section>,
    },
}

impl Voices {
    /// Voice mode this arrangement belongs to.
    pub fn voice_mode(&self) -> VoiceMode {
        match self {
            Voices::Single { .. } => VoiceMode::Single,
            Voices::Layer { .. } => VoiceMode::Layer,
            Voices::Vocoder { .. } => VoiceMode::Vocoder,
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            Voices::Single { .. } => "single timbre",
            Voices::Layer { .. } => "layered timbre",
            Voices::Vocoder { .. } => "vocoder",
        }
    }
}

/// A decoded program. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    name: String,
    voice_mode: VoiceMode,
    general_sections: Vec<Section>,
    voices: Voices,
    arp_enabled: bool,
    arp_trigger_pattern: [bool; TRIGGER_STEPS],
    keyboard_octave_shift: i8,
}

impl Program {
    /// Combine the general data with the engine sections.
    ///
    /// Fails if `voices` does not match the voice mode decoded from the
    /// general region.
    pub fn new(general: GeneralData, voices: Voices) -> Result<Self> {
        if voices.voice_mode() != general.voice_mode {
            return Err(PrgError::VoiceModeMismatch {
                voice_mode: general.voice_mode,
                voices: voices.describe(),
            });
        }
        Ok(Self {
            name: general.name,
            voice_mode: general.voice_mode,
            general_sections: general.sections,
            voices,
            arp_enabled: general.arp_enabled,
            arp_trigger_pattern: general.trigger_pattern,
            keyboard_octave_shift: general.keyboard_octave_shift,
        })
    }

    /// Program name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Voice mode.
    pub fn voice_mode(&self) -> VoiceMode {
        self.voice_mode
    }

    /// MOD FX, DELAY, EQ, ARPEG. A, ARPEG. B.
    pub fn general_sections(&self) -> &[Section] {
        &self.general_sections
    }

    /// Engine sections.
    pub fn voices(&self) -> &Voices {
        &self.voices
    }

    /// Timbre 1 sections, empty for vocoder programs.
    pub fn timbre1_sections(&self) -> &[Section] {
        match &self.voices {
            Voices::Single { timbre1 } | Voices::Layer { timbre1, .. } => timbre1.as_slice(),
            Voices::Vocoder { .. } => &[],
        }
    }

    /// Timbre 2 sections, empty unless the program is layered.
    pub fn timbre2_sections(&self) -> &[Section] {
        match &self.voices {
            Voices::Layer { timbre2, .. } => timbre2.as_slice(),
            _ => &[],
        }
    }

    /// Vocoder sections, empty for synth programs.
    pub fn vocoder_sections(&self) -> &[Section] {
        match &self.voices {
            Voices::Vocoder { vocoder } => vocoder.as_slice(),
            _ => &[],
        }
    }

    /// Arpeggiator on/off.
    pub fn arp_enabled(&self) -> bool {
        self.arp_enabled
    }

    /// Arpeggiator trigger pattern, step 1 first.
    pub fn arp_trigger_pattern(&self) -> &[bool; TRIGGER_STEPS] {
        &self.arp_trigger_pattern
    }

    /// Keyboard octave shift in -3..=3.
    pub fn keyboard_octave_shift(&self) -> i8 {
        self.keyboard_octave_shift
    }
}

impl Serialize for Program {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Program", 9)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("voice_mode", &self.voice_mode)?;
        state.serialize_field("timbre1_sections", self.timbre1_sections())?;
        state.serialize_field("timbre2_sections", self.timbre2_sections())?;
        state.serialize_field("vocoder_sections", self.vocoder_sections())?;
        state.serialize_field("general_sections", &self.general_sections)?;
        state.serialize_field("arp_enabled", &self.arp_enabled)?;
        state.serialize_field("arp_trigger_pattern", &self.arp_trigger_pattern)?;
        state.serialize_field("keyboard_octave_shift", &self.keyboard_octave_shift)?;
        state.end()
    }
}

/// Short summary without section details.
impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pattern: String = self
            .arp_trigger_pattern
            .iter()
            .map(|&step| if step { 'x' } else { '.' })
            .collect();
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Voice mode: {}", self.voice_mode)?;
        writeln!(
            f,
            "Arpeggiator: {}",
            if self.arp_enabled { "ON" } else { "OFF" }
        )?;
        writeln!(f, "Trigger pattern: {pattern}")?;
        write!(f, "Keyboard octave shift: {:+}", self.keyboard_octave_shift)
    }
}

/// Decode a record into a program.
///
/// The general region is decoded first; its voice mode selects which
/// engine regions follow. Non-fatal findings are returned next to the
/// program.
pub fn decode_program(
    record: &RawProgramRecord,
    names: &dyn WaveNameResolver,
    config: &DecoderConfig,
) -> Result<(Program, Vec<DecodeWarning>)> {
    let mut warnings = Vec::new();
    let general = decode_general(record.general(), config, &mut warnings)?;
    let voice_mode = general.voice_mode;

    let synth = |bytes: &[u8], base: usize| {
        decode_timbre(Engine::Synth, bytes, base, voice_mode, names)
    };

    let voices = match voice_mode {
        VoiceMode::Vocoder => Voices::Vocoder {
            vocoder: decode_timbre(
                Engine::Vocoder,
                record.vocoder(),
                VOCODER_REGION.start,
                voice_mode,
                names,
            )?,
        },
        VoiceMode::Single => Voices::Single {
            timbre1: synth(record.timbre1(), TIMBRE1_REGION.start)?,
        },
        VoiceMode::Layer => Voices::Layer {
            timbre1: synth(record.timbre1(), TIMBRE1_REGION.start)?,
            timbre2: synth(record.timbre2(), TIMBRE2_REGION.start)?,
        },
    };

    let program = Program::new(general, voices)?;
    Ok((program, warnings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OctaveShiftPolicy;
    use crate::record::RECORD_LEN;
    use crate::wavetable::NoWaveNames;

    fn record(voice_byte: u8, octave: u8) -> RawProgramRecord {
        let mut bytes = [64u8; RECORD_LEN];
        bytes[..12].copy_from_slice(b"Test Patch  ");
        bytes[16] = voice_byte;
        bytes[37] = octave;
        RawProgramRecord::new(bytes)
    }

    fn general(voice_mode: VoiceMode) -> GeneralData {
        GeneralData {
            name: "X".into(),
            voice_mode,
            arp_enabled: false,
            trigger_pattern: [true; TRIGGER_STEPS],
            keyboard_octave_shift: 0,
            sections: Vec::new(),
        }
    }

    #[test]
    fn constructor_rejects_mismatched_voices() {
        let err = Program::new(
            general(VoiceMode::Layer),
            Voices::Single {
                timbre1: Vec::new(),
            },
        )
        .unwrap_err();
        assert!(matches!(
            err,
            PrgError::VoiceModeMismatch {
                voice_mode: VoiceMode::Layer,
                ..
            }
        ));
    }

    #[test]
    fn single_program_has_only_timbre1() {
        let (program, warnings) =
            decode_program(&record(0x00, 0), &NoWaveNames, &DecoderConfig::default()).unwrap();
        assert_eq!(program.name(), "Test Patch");
        assert_eq!(program.voice_mode(), VoiceMode::Single);
        assert_eq!(program.timbre1_sections().len(), 15);
        assert!(program.timbre2_sections().is_empty());
        assert!(program.vocoder_sections().is_empty());
        assert_eq!(program.general_sections().len(), 5);
        assert!(warnings.is_empty());
    }

    #[test]
    fn layer_program_has_both_timbres() {
        let (program, _) =
            decode_program(&record(0x20, 0), &NoWaveNames, &DecoderConfig::default()).unwrap();
        assert_eq!(program.timbre1_sections().len(), 15);
        assert_eq!(program.timbre2_sections().len(), 15);
        assert!(program.vocoder_sections().is_empty());
    }

    #[test]
    fn vocoder_program_has_no_timbres() {
        let (program, _) =
            decode_program(&record(0x30, 0), &NoWaveNames, &DecoderConfig::default()).unwrap();
        assert_eq!(program.vocoder_sections().len(), 15);
        assert!(program.timbre1_sections().is_empty());
        assert!(program.timbre2_sections().is_empty());
    }

    #[test]
    fn clamped_octave_shift_surfaces_a_warning() {
        let config = DecoderConfig::default().octave_shift(OctaveShiftPolicy::Clamp);
        let (program, warnings) = decode_program(&record(0x00, 9), &NoWaveNames, &config).unwrap();
        assert_eq!(program.keyboard_octave_shift(), 3);
        assert_eq!(warnings.len(), 1);

        let err = decode_program(&record(0x00, 9), &NoWaveNames, &DecoderConfig::default())
            .unwrap_err();
        assert!(matches!(err, PrgError::UnknownOctaveShift { raw: 9 }));
    }

    #[test]
    fn serializes_every_section_group() {
        let (program, _) =
            decode_program(&record(0x00, 254), &NoWaveNames, &DecoderConfig::default()).unwrap();
        let json = serde_json::to_value(&program).unwrap();
        assert_eq!(json["voice_mode"], "Single");
        assert_eq!(json["keyboard_octave_shift"], -2);
        assert_eq!(json["timbre2_sections"].as_array().unwrap().len(), 0);
        assert_eq!(json["vocoder_sections"].as_array().unwrap().len(), 0);
        assert_eq!(json["arp_trigger_pattern"].as_array().unwrap().len(), 8);
    }

    #[test]
    fn summary_text() {
        let (program, _) =
            decode_program(&record(0x00, 1), &NoWaveNames, &DecoderConfig::default()).unwrap();
        let text = program.to_string();
        assert!(text.contains("Name: Test Patch"));
        assert!(text.contains("Voice mode: Single"));
        assert!(text.contains("Keyboard octave shift: +1"));
    }
}
