//! Field interpreter.
//!
//! A [`Field`] says where a parameter lives in a region and how its bytes
//! become a [`ParamValue`]. Layouts are plain data; everything that reads
//! bytes goes through [`decode_section`].

use super::general::VoiceMode;
use super::tables;
use crate::bits::{self, Bitmask};
use crate::error::{PrgError, Result};
use crate::model::{Param, ParamValue, Params, Section, SLOT_COUNT};
use crate::wavetable::WaveNameResolver;

/// How one parameter is read. Offsets are relative to the region start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Byte value as is.
    Byte(usize),
    /// Byte centred at 64 and clamped to `±limit`.
    Normalized {
        /// Byte offset.
        offset: usize,
        /// Absolute limit.
        limit: i32,
    },
    /// Masked bit as a switch.
    Flag {
        /// Byte offset.
        offset: usize,
        /// Bit(s) to test.
        mask: Bitmask,
    },
    /// Label from a table, indexed by a shifted and masked byte.
    Choice {
        /// Byte offset.
        offset: usize,
        /// Shift applied before masking (negative shifts right).
        shift: i8,
        /// Mask applied after shifting.
        mask: Bitmask,
        /// Labels in index order.
        options: &'static [&'static str],
    },
    /// Integer from a table indexed by the raw byte.
    IntChoice {
        /// Byte offset.
        offset: usize,
        /// Values in index order.
        values: &'static [i32],
    },
    /// Masked value plus a base (`1`-based step counts and ranges).
    Counter {
        /// Byte offset.
        offset: usize,
        /// Shift applied before masking.
        shift: i8,
        /// Mask applied after shifting.
        mask: Bitmask,
        /// Added to the masked value.
        base: i32,
    },
    /// Normalized byte shown as `L<n>`, `cnt` or `R<n>`.
    Panpot(usize),
    /// Two bytes combined as `high * 256 + low`.
    Word {
        /// Offset of the high byte.
        high: usize,
        /// Offset of the low byte.
        low: usize,
    },
    /// Byte capped at `max` and shown as a percentage.
    Percent {
        /// Byte offset.
        offset: usize,
        /// Largest value shown.
        max: u8,
    },
    /// Byte read as a two's complement value and shown as a percentage.
    SignedPercent(usize),
    /// Note value when the sync byte's top bit is set, raw value byte otherwise.
    TempoSynced {
        /// Byte holding the sync flag (bit 7) and note index (low nibble).
        sync: usize,
        /// Byte used when not synced.
        value: usize,
        /// Note labels in index order.
        notes: &'static [&'static str],
    },
    /// Byte, or `"Hold"` when it equals `hold`.
    HoldOrByte {
        /// Byte offset.
        offset: usize,
        /// Raw value meaning "hold".
        hold: u8,
    },
    /// `"Synth"` or `"Vocoder"`, from the voice mode.
    EngineLabel,
    /// `"Single"` or `"Layer"`, from the voice mode.
    LayerLabel,
    /// Voice assign from bits 6-7.
    VoiceAssign(usize),
    /// Trigger mode from bit 3, or the placeholder for poly voices.
    TriggerMode(usize),
    /// Detune amount for unison voices, placeholder otherwise.
    UnisonDetune {
        /// Byte holding the voice assign bits.
        assign: usize,
        /// Detune byte.
        value: usize,
    },
    /// OSC 1 control 1: the control byte, or the placeholder for DWGS.
    Osc1Control1 {
        /// Waveform byte.
        wave: usize,
        /// Control byte.
        value: usize,
    },
    /// OSC 1 control 2: the control byte, or a wavetable reference for DWGS.
    Osc1Control2 {
        /// Waveform byte.
        wave: usize,
        /// Control byte.
        value: usize,
        /// Wavetable index byte.
        wavetable: usize,
    },
}

impl Field {
    /// Raw byte as a label index, no shift or mask.
    pub const fn choice(offset: usize, options: &'static [&'static str]) -> Self {
        Field::Choice {
            offset,
            shift: 0,
            mask: Bitmask::Bits(0xFF),
            options,
        }
    }

    /// Normalized with the default limit of 63.
    pub const fn normalized(offset: usize) -> Self {
        Field::Normalized {
            offset,
            limit: bits::DEFAULT_LIMIT,
        }
    }

    /// Every byte offset this field reads.
    pub fn offsets(&self) -> Vec<usize> {
        match *self {
            Field::Byte(offset)
            | Field::Normalized { offset, .. }
            | Field::Flag { offset, .. }
            | Field::Choice { offset, .. }
            | Field::IntChoice { offset, .. }
            | Field::Counter { offset, .. }
            | Field::Panpot(offset)
            | Field::Percent { offset, .. }
            | Field::SignedPercent(offset)
            | Field::HoldOrByte { offset, .. }
            | Field::VoiceAssign(offset)
            | Field::TriggerMode(offset) => vec![offset],
            Field::Word { high, low } => vec![high, low],
            Field::TempoSynced { sync, value, .. } => vec![sync, value],
            Field::UnisonDetune { assign, value } => vec![assign, value],
            Field::Osc1Control1 { wave, value } => vec![wave, value],
            Field::Osc1Control2 {
                wave,
                value,
                wavetable,
            } => vec![wave, value, wavetable],
            Field::EngineLabel | Field::LayerLabel => Vec::new(),
        }
    }
}

/// A labelled field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Panel label.
    pub label: &'static str,
    /// How the value is read.
    pub field: Field,
}

/// Shorthand for building layout tables.
pub const fn param(label: &'static str, field: Field) -> FieldSpec {
    FieldSpec { label, field }
}

/// A section: a name and up to five fields in knob order.
///
/// The built-in layouts are checked at compile time to never exceed
/// [`SLOT_COUNT`] fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpec {
    /// Section name.
    pub name: &'static str,
    /// Fields in knob order.
    pub fields: &'static [FieldSpec],
}

impl SectionSpec {
    /// Largest offset any field reads, `None` for sections that read no bytes.
    pub fn max_offset(&self) -> Option<usize> {
        self.fields
            .iter()
            .flat_map(|spec| spec.field.offsets())
            .max()
    }
}

/// Bytes of one record region plus its record offset, for error reporting.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Region<'a> {
    bytes: &'a [u8],
    base: usize,
}

impl<'a> Region<'a> {
    pub(crate) fn new(bytes: &'a [u8], base: usize) -> Self {
        Self { bytes, base }
    }

    pub(crate) fn byte(&self, offset: usize) -> Result<u8> {
        self.bytes
            .get(offset)
            .copied()
            .ok_or(PrgError::UnexpectedEof {
                offset: self.base + offset,
            })
    }

    pub(crate) fn slice(&self, start: usize, len: usize) -> Result<&'a [u8]> {
        start
            .checked_add(len)
            .and_then(|end| self.bytes.get(start..end))
            .ok_or(PrgError::UnexpectedEof {
                offset: self.base + self.bytes.len(),
            })
    }
}

/// What a field may need besides the region bytes.
pub(crate) struct FieldContext<'a> {
    pub(crate) voice_mode: VoiceMode,
    pub(crate) names: &'a dyn WaveNameResolver,
}

/// Decode every field of `spec` into a section.
pub(crate) fn decode_section(
    spec: &SectionSpec,
    region: &Region<'_>,
    ctx: &FieldContext<'_>,
) -> Result<Section> {
    let mut slots: [Option<Param>; SLOT_COUNT] = Default::default();
    for (slot, field) in slots.iter_mut().zip(spec.fields) {
        let value = decode_field(&field.field, region, ctx)?;
        *slot = Some(Param::new(field.label, value));
    }
    log::trace!("decoded section {}", spec.name);
    Ok(Section::with_params(spec.name, Params::from_slots(slots)))
}

fn decode_field(field: &Field, region: &Region<'_>, ctx: &FieldContext<'_>) -> Result<ParamValue> {
    let value = match *field {
        Field::Byte(offset) => ParamValue::from(region.byte(offset)?),
        Field::Normalized { offset, limit } => {
            ParamValue::Int(bits::normalize(region.byte(offset)?, limit))
        }
        Field::Flag { offset, mask } => {
            ParamValue::Bool(bits::is_set(region.byte(offset)?, mask, false))
        }
        Field::Choice {
            offset,
            shift,
            mask,
            options,
        } => label(region.byte(offset)?, options, mask, shift),
        Field::IntChoice { offset, values } => {
            let raw = region.byte(offset)?;
            match values.get(usize::from(raw)) {
                Some(&value) => ParamValue::Int(value),
                None => fallback(raw),
            }
        }
        Field::Counter {
            offset,
            shift,
            mask,
            base,
        } => ParamValue::Int(i32::from(bits::field(region.byte(offset)?, mask, shift)) + base),
        Field::Panpot(offset) => ParamValue::Label(panpot(region.byte(offset)?)),
        Field::Word { high, low } => {
            let value = u16::from(region.byte(high)?) * 256 + u16::from(region.byte(low)?);
            ParamValue::Int(i32::from(value))
        }
        Field::Percent { offset, max } => {
            ParamValue::Label(format!("{}%", region.byte(offset)?.min(max)))
        }
        Field::SignedPercent(offset) => {
            ParamValue::Label(format!("{}%", region.byte(offset)? as i8))
        }
        Field::TempoSynced { sync, value, notes } => {
            let sync_byte = region.byte(sync)?;
            if bits::is_set(sync_byte, Bitmask::Msb, false) {
                label(sync_byte, notes, Bitmask::Bits(0x0F), 0)
            } else {
                ParamValue::from(region.byte(value)?)
            }
        }
        Field::HoldOrByte { offset, hold } => {
            let raw = region.byte(offset)?;
            if raw == hold {
                ParamValue::from("Hold")
            } else {
                ParamValue::from(raw)
            }
        }
        Field::EngineLabel => ParamValue::from(match ctx.voice_mode {
            VoiceMode::Vocoder => "Vocoder",
            VoiceMode::Single | VoiceMode::Layer => "Synth",
        }),
        Field::LayerLabel => ParamValue::from(match ctx.voice_mode {
            VoiceMode::Layer => "Layer",
            VoiceMode::Single | VoiceMode::Vocoder => "Single",
        }),
        Field::VoiceAssign(offset) => voice_assign(region.byte(offset)?),
        Field::TriggerMode(offset) => {
            let raw = region.byte(offset)?;
            if voice_assign_index(raw) == tables::VOICE_ASSIGN_POLY {
                ParamValue::placeholder()
            } else {
                label(raw, tables::TRIGGER_MODES, Bitmask::Lsb, -3)
            }
        }
        Field::UnisonDetune { assign, value } => {
            if voice_assign_index(region.byte(assign)?) == tables::VOICE_ASSIGN_UNISON {
                ParamValue::from(region.byte(value)?)
            } else {
                ParamValue::placeholder()
            }
        }
        Field::Osc1Control1 { wave, value } => {
            if is_dwgs(region.byte(wave)?) {
                ParamValue::placeholder()
            } else {
                ParamValue::from(region.byte(value)?)
            }
        }
        Field::Osc1Control2 {
            wave,
            value,
            wavetable,
        } => {
            if is_dwgs(region.byte(wave)?) {
                let index = region.byte(wavetable)?;
                let name = ctx.names.wave_name(index).map(str::to_string);
                if name.is_none() {
                    log::debug!("no wavetable name for DWGS index {index}");
                }
                ParamValue::Wavetable { index, name }
            } else {
                ParamValue::from(region.byte(value)?)
            }
        }
    };
    Ok(value)
}

fn label(byte: u8, options: &[&str], mask: Bitmask, shift: i8) -> ParamValue {
    match bits::select_option(byte, options, mask, shift) {
        Some(option) => ParamValue::from(*option),
        None => fallback(bits::field(byte, mask, shift)),
    }
}

/// Token for an index the table does not cover.
fn fallback(index: u8) -> ParamValue {
    log::debug!("option index {index} out of range, using fallback label");
    ParamValue::Label(format!("? ({index})"))
}

fn voice_assign_index(byte: u8) -> u8 {
    bits::field(byte, Bitmask::Bits(0x03), -6)
}

fn voice_assign(byte: u8) -> ParamValue {
    label(byte, tables::VOICE_ASSIGNS, Bitmask::Bits(0x03), -6)
}

fn is_dwgs(wave_byte: u8) -> bool {
    bits::field(wave_byte, Bitmask::Bits(0x07), 0) == tables::OSC1_WAVE_DWGS
}

/// `cnt` at centre, otherwise side and distance.
pub(crate) fn panpot(raw: u8) -> String {
    let value = bits::normalize_default(raw);
    match value {
        0 => "cnt".to_string(),
        v if v < 0 => format!("L{}", v.unsigned_abs()),
        v => format!("R{v}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wavetable::{DwgsTable, NoWaveNames};

    fn ctx(voice_mode: VoiceMode) -> FieldContext<'static> {
        FieldContext {
            voice_mode,
            names: &NoWaveNames,
        }
    }

    fn decode(field: Field, bytes: &[u8]) -> ParamValue {
        decode_field(&field, &Region::new(bytes, 0), &ctx(VoiceMode::Single)).unwrap()
    }

    #[test]
    fn panpot_labels() {
        assert_eq!(panpot(64), "cnt");
        assert_eq!(panpot(0), "L63");
        assert_eq!(panpot(60), "L4");
        assert_eq!(panpot(127), "R63");
    }

    #[test]
    fn out_of_range_choice_falls_back() {
        let field = Field::choice(0, tables::MOD_FX_TYPES);
        assert_eq!(decode(field, &[1]), ParamValue::from("Ensemble"));
        assert_eq!(decode(field, &[7]), ParamValue::from("? (7)"));
        let shifts = Field::IntChoice {
            offset: 0,
            values: tables::FORMANT_SHIFTS,
        };
        assert_eq!(decode(shifts, &[4]), ParamValue::Int(-2));
        assert_eq!(decode(shifts, &[9]), ParamValue::from("? (9)"));
    }

    #[test]
    fn tempo_sync_switches_source() {
        let field = Field::TempoSynced {
            sync: 0,
            value: 1,
            notes: tables::LFO_SYNC_NOTES,
        };
        assert_eq!(decode(field, &[0x80 | 3, 99]), ParamValue::from("1/2"));
        assert_eq!(decode(field, &[0x03, 99]), ParamValue::Int(99));
    }

    #[test]
    fn percent_fields() {
        let gate = Field::Percent {
            offset: 0,
            max: 100,
        };
        assert_eq!(decode(gate, &[72]), ParamValue::from("72%"));
        assert_eq!(decode(gate, &[120]), ParamValue::from("100%"));
        assert_eq!(decode(Field::SignedPercent(0), &[0xCE]), ParamValue::from("-50%"));
        assert_eq!(decode(Field::SignedPercent(0), &[25]), ParamValue::from("25%"));
    }

    #[test]
    fn voice_dependent_fields() {
        // Poly: no trigger mode, no detune.
        let poly = [0, 0b0100_1000, 20];
        assert!(decode(Field::TriggerMode(1), &poly).is_placeholder());
        let detune = Field::UnisonDetune {
            assign: 1,
            value: 2,
        };
        assert!(decode(detune, &poly).is_placeholder());

        // Unison with multi trigger.
        let unison = [0, 0b1000_1000, 20];
        assert_eq!(decode(Field::VoiceAssign(1), &unison), ParamValue::from("Unison"));
        assert_eq!(decode(Field::TriggerMode(1), &unison), ParamValue::from("Multi"));
        assert_eq!(decode(detune, &unison), ParamValue::Int(20));
    }

    #[test]
    fn dwgs_controls_resolve_through_the_table() {
        let bytes = [5, 11, 22, 35];
        let table = DwgsTable::builtin();
        let ctx = FieldContext {
            voice_mode: VoiceMode::Vocoder,
            names: &table,
        };
        let region = Region::new(&bytes, 38);
        let ctrl1 = Field::Osc1Control1 { wave: 0, value: 1 };
        let ctrl2 = Field::Osc1Control2 {
            wave: 0,
            value: 2,
            wavetable: 3,
        };
        assert!(decode_field(&ctrl1, &region, &ctx).unwrap().is_placeholder());
        assert_eq!(
            decode_field(&ctrl2, &region, &ctx).unwrap(),
            ParamValue::Wavetable {
                index: 35,
                name: Some("E.Piano1".to_string())
            }
        );

        let saw = [0, 11, 22, 35];
        assert_eq!(decode(ctrl2, &saw), ParamValue::Int(22));
    }

    #[test]
    fn short_region_reports_record_offset() {
        let region = Region::new(&[0u8; 4], 146);
        let err = decode_field(&Field::Byte(10), &region, &ctx(VoiceMode::Layer)).unwrap_err();
        assert!(matches!(err, PrgError::UnexpectedEof { offset: 156 }));
    }

    #[test]
    fn engine_and_layer_labels() {
        let region = Region::new(&[], 0);
        let vocoder = ctx(VoiceMode::Vocoder);
        assert_eq!(
            decode_field(&Field::EngineLabel, &region, &vocoder).unwrap(),
            ParamValue::from("Vocoder")
        );
        assert_eq!(
            decode_field(&Field::LayerLabel, &region, &vocoder).unwrap(),
            ParamValue::from("Single")
        );
        let layer = ctx(VoiceMode::Layer);
        assert_eq!(
            decode_field(&Field::LayerLabel, &region, &layer).unwrap(),
            ParamValue::from("Layer")
        );
    }
}
